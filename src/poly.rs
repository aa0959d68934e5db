//! Polynomials over GF(p).
//!
//! A [`Poly`] stores its coefficients lowest degree first, so
//! `coeffs[i]` is the coefficient of `x^i`. Storage may carry trailing
//! zeros; [`degree`] and the comparison operators ignore them.
//!
//! This module backs the Berlekamp-Welch decoder, which needs Horner
//! evaluation, Euclidean division and (for callers reconstructing a
//! polynomial from points) Lagrange interpolation.
//!
//! [`degree`]: Poly::degree

use std::fmt;

use num::bigint::BigUint;
use num::Zero;

use crate::{field::PrimeField, Error};

// ======================================================================
// Poly - PUBLIC

/// Polynomial with field-element coefficients, lowest degree first.
#[derive(Clone, Debug)]
pub struct Poly {
    coeffs: Vec<BigUint>,
}

impl Poly {
    /// Creates the zero polynomial with capacity for the given degree.
    pub fn new(degree: usize) -> Self {
        Self {
            coeffs: vec![BigUint::zero(); degree + 1],
        }
    }

    /// Creates the constant polynomial `P(x) = c`.
    pub fn constant(c: BigUint) -> Self {
        Self { coeffs: vec![c] }
    }

    /// Creates a polynomial from the given coefficients, lowest degree
    /// first. An empty vector gives the zero polynomial.
    pub fn from_coeffs(coeffs: Vec<BigUint>) -> Self {
        if coeffs.is_empty() {
            Self::new(0)
        } else {
            Self { coeffs }
        }
    }

    /// Returns the stored coefficients, including any trailing zeros.
    pub fn coeffs(&self) -> &[BigUint] {
        &self.coeffs
    }

    /// Returns the coefficient of `x^i`, or zero beyond the storage.
    pub fn coeff(&self, i: usize) -> BigUint {
        self.coeffs.get(i).cloned().unwrap_or_else(BigUint::zero)
    }

    /// Sets the coefficient of `x^i`, growing the storage if needed.
    pub fn set_coeff(&mut self, i: usize, value: BigUint) {
        if i >= self.coeffs.len() {
            self.coeffs.resize(i + 1, BigUint::zero());
        }
        self.coeffs[i] = value;
    }

    /// Returns the degree, ignoring trailing zero coefficients.
    ///
    /// The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        let mut deg = self.coeffs.len() - 1;
        while deg > 0 && self.coeffs[deg].is_zero() {
            deg -= 1;
        }
        deg
    }

    /// Returns the coefficient of the highest power of x.
    pub fn leading_coefficient(&self) -> &BigUint {
        &self.coeffs[self.degree()]
    }

    /// Returns `true` for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coeffs[0].is_zero()
    }

    /// Evaluates the polynomial at `x` by Horner's rule, mod p.
    pub fn eval(&self, x: &BigUint, field: &PrimeField) -> BigUint {
        let deg = self.degree();
        let mut acc = field.reduce(&self.coeffs[deg]);
        for i in (0..deg).rev() {
            acc = field.add(&field.mul(&acc, x), &self.coeffs[i]);
        }
        acc
    }

    /// Returns `self + other` mod p. The result is as long as the
    /// longer input.
    pub fn add(&self, other: &Poly, field: &PrimeField) -> Poly {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut coeffs = Vec::with_capacity(len);
        for i in 0..len {
            coeffs.push(field.add(&self.coeff(i), &other.coeff(i)));
        }
        Poly { coeffs }
    }

    /// Returns `self - other` mod p. The result is as long as the
    /// longer input.
    pub fn sub(&self, other: &Poly, field: &PrimeField) -> Poly {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut coeffs = Vec::with_capacity(len);
        for i in 0..len {
            coeffs.push(field.sub(&self.coeff(i), &other.coeff(i)));
        }
        Poly { coeffs }
    }

    /// Returns the convolution product `self * other` mod p.
    pub fn mul(&self, other: &Poly, field: &PrimeField) -> Poly {
        let d1 = self.degree();
        let d2 = other.degree();
        let mut coeffs = vec![BigUint::zero(); d1 + d2 + 1];
        for i in 0..=d1 {
            if self.coeffs[i].is_zero() {
                continue;
            }
            for j in 0..=d2 {
                coeffs[i + j] = field.add(&coeffs[i + j], &field.mul(&self.coeffs[i], &other.coeffs[j]));
            }
        }
        Poly { coeffs }
    }

    /// Returns `self` scaled by the constant `c`, mod p.
    pub fn mul_scalar(&self, c: &BigUint, field: &PrimeField) -> Poly {
        Poly {
            coeffs: self.coeffs.iter().map(|v| field.mul(v, c)).collect(),
        }
    }

    /// Euclidean division: returns `(q, r)` with `self = divisor * q + r`
    /// and `deg(r) < deg(divisor)`, all coefficients reduced mod p.
    ///
    /// Fails with [`Error::DivideByZero`] when `divisor` is the zero
    /// polynomial, and with [`Error::NoInverse`] when its leading
    /// coefficient is not invertible mod p.
    pub fn div_mod(&self, divisor: &Poly, field: &PrimeField) -> Result<(Poly, Poly), Error> {
        if divisor.is_zero() {
            return Err(Error::DivideByZero);
        }
        let d = divisor.degree();
        let lead_inv = field.inv(divisor.leading_coefficient())?;

        let mut quotient = Poly::new(self.degree().saturating_sub(d));
        let mut remainder = Poly {
            coeffs: self.coeffs.iter().map(|c| field.reduce(c)).collect(),
        };

        while !remainder.is_zero() && remainder.degree() >= d {
            let shift = remainder.degree() - d;
            let factor = field.mul(remainder.leading_coefficient(), &lead_inv);
            // Subtracting factor * x^shift * divisor cancels the
            // leading term exactly, so the degree drops every pass.
            for i in 0..=d {
                let value = field.sub(&remainder.coeffs[shift + i], &field.mul(&factor, &divisor.coeffs[i]));
                remainder.coeffs[shift + i] = value;
            }
            quotient.coeffs[shift] = factor;
        }

        Ok((quotient, remainder))
    }

    /// Lagrange interpolation: returns the unique polynomial of degree
    /// below `xs.len()` passing through all `(xs[i], ys[i])`.
    ///
    /// The evaluation points must be distinct mod p; a repeated point
    /// makes a basis denominator zero and fails with
    /// [`Error::NoInverse`]. Fails with [`Error::DimensionMismatch`]
    /// when `xs` and `ys` have different lengths.
    pub fn lagrange(xs: &[BigUint], ys: &[BigUint], field: &PrimeField) -> Result<Poly, Error> {
        if xs.len() != ys.len() {
            return Err(Error::DimensionMismatch {
                left: xs.len(),
                right: ys.len(),
            });
        }
        let mut result = Poly::new(0);
        for j in 0..xs.len() {
            let mut basis = Poly::constant(field.one());
            for m in 0..xs.len() {
                if m == j {
                    continue;
                }
                let denom_inv = field.inv(&field.sub(&xs[j], &xs[m]))?;
                // (x - x_m) / (x_j - x_m)
                let factor = Poly::from_coeffs(vec![
                    field.mul(&field.sub(&field.zero(), &xs[m]), &denom_inv),
                    denom_inv.clone(),
                ]);
                basis = basis.mul(&factor, field);
            }
            result = result.add(&basis.mul_scalar(&ys[j], field), field);
        }
        Ok(result)
    }
}

// ======================================================================
// Poly - IMPL PartialEq

impl PartialEq for Poly {
    /// Compares coefficients up to the degree, so trailing zeros do
    /// not matter.
    fn eq(&self, other: &Poly) -> bool {
        let deg = self.degree();
        if deg != other.degree() {
            return false;
        }
        self.coeffs[..=deg] == other.coeffs[..=deg]
    }
}

impl Eq for Poly {}

// ======================================================================
// Poly - IMPL DISPLAY

impl fmt::Display for Poly {
    /// Renders `c x^d + ... + c`, skipping zero coefficients except
    /// the constant term.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (1..=self.degree()).rev() {
            if self.coeffs[i].is_zero() {
                continue;
            }
            write!(f, "{} x^{} + ", self.coeffs[i], i)?;
        }
        write!(f, "{}", self.coeffs[0])
    }
}

// ======================================================================
// TESTS
