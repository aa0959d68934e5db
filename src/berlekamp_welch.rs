//! Berlekamp-Welch error correction backing [`ReedSolomon::correct`].
//!
//! For each candidate error count `e` the decoder solves for an error
//! locator `E(x)` (monic, degree `e`) and a product polynomial
//! `Q(x) = E(x) * P(x)` such that `y_i * E(x_i) - Q(x_i) = 0` at every
//! used point, then recovers the data polynomial as `P = Q / E`.
//!
//! [`ReedSolomon::correct`]: crate::ReedSolomon::correct

use num::bigint::BigUint;

use crate::{matrix::Matrix, poly::Poly, reed_solomon::ReedSolomon, share::Share, Error};

// ======================================================================
// FUNCTIONS - CRATE

/// Removes up to `(shares.len() - required) / 2` silent corruptions
/// and returns the freshly re-encoded full set of shares.
pub(crate) fn correct(rs: &ReedSolomon, shares: &[Share]) -> Result<Vec<Share>, Error> {
    let k = rs.k;
    if shares.len() < k {
        return Err(Error::TooFewShards {
            required: k,
            got: shares.len(),
        });
    }

    let mut sorted = shares.to_vec();
    sorted.sort_unstable();

    // Evaluation points follow the generator convention: row i of the
    // Vandermonde matrix evaluates the data polynomial at i + 1.
    let xs: Vec<BigUint> = sorted
        .iter()
        .map(|share| BigUint::from(share.number + 1))
        .collect();
    let ys: Vec<BigUint> = sorted.iter().map(|share| share.data.clone()).collect();

    let e_max = (sorted.len() - k) / 2;
    for e in 0..=e_max {
        if let Some(data) = solve_candidate(rs, &xs, &ys, e, e_max) {
            let mut inputs = Vec::with_capacity(k);
            for j in 0..k {
                inputs.push(data.coeff(j));
            }
            return rs.encode(&inputs);
        }
    }
    Err(Error::TooManyErrors)
}

// ======================================================================
// FUNCTIONS - PRIVATE

/// Attempts one candidate error count.
///
/// Returns the data polynomial when the candidate yields a consistent
/// decoding and `None` when it does not. Arithmetic failures inside
/// the solve (a singular system, a non-invertible element) only mean
/// this candidate does not work, so they map to `None` as well.
fn solve_candidate(
    rs: &ReedSolomon,
    xs: &[BigUint],
    ys: &[BigUint],
    e: usize,
    e_max: usize,
) -> Option<Poly> {
    let field = &rs.field;
    let k = rs.k;

    // Unknowns: coefficients 0..=q of Q and 0..=e of E.
    let q = e + k - 1;
    let dim = q + e + 2;

    // The first dim - 1 = k + 2e sorted shares give the point rows;
    // the final row pins E's leading coefficient to 1.
    let mut system = Matrix::zeros(dim, dim).ok()?;
    for i in 0..dim - 1 {
        for j in 0..=q {
            system.set(i, j, field.pow(&xs[i], j as u64));
        }
        for l in 0..=e {
            let value = field.sub(&field.zero(), &field.mul(&ys[i], &field.pow(&xs[i], l as u64)));
            system.set(i, q + 1 + l, value);
        }
    }
    system.set(dim - 1, dim - 1, field.one());

    // The right-hand side is the last unit vector, so the solution is
    // the last column of the inverse.
    let inverse = system.invert(field).ok()?;
    let solution: Vec<BigUint> = (0..dim).map(|row| inverse.get(row, dim - 1).clone()).collect();

    let q_poly = Poly::from_coeffs(solution[..=q].to_vec());
    let e_poly = Poly::from_coeffs(solution[q + 1..].to_vec());

    let (data, remainder) = q_poly.div_mod(&e_poly, field).ok()?;
    if !remainder.is_zero() {
        return None;
    }
    if data.degree() > k - 1 {
        return None;
    }

    // The square system constrains only the first k + 2e points. The
    // recovered polynomial must also stand against the full received
    // set: it may disagree with at most e_max of the r values.
    let mismatches = xs
        .iter()
        .zip(ys)
        .filter(|&(x, y)| data.eval(x, field) != *y)
        .count();
    if mismatches > e_max {
        return None;
    }

    Some(data)
}

// ======================================================================
// TESTS

// Exercised through the `correct` tests in reed_solomon.rs.
