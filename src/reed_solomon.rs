use num::bigint::BigUint;

use crate::{berlekamp_welch, field::PrimeField, matrix::Matrix, share::Share, Error};

// ======================================================================
// ReedSolomon - PUBLIC

/// Reed-Solomon codec over GF(p) for a fixed `(required, total)` pair.
///
/// The codec precomputes its `total x required` Vandermonde generator
/// matrix at construction and is immutable afterwards, so it can be
/// shared across threads without synchronization.
///
/// The code is not systematic: share `i` is a linear combination of
/// all inputs, not a copy of input `i`, and decoding always goes back
/// through the generator matrix.
pub struct ReedSolomon {
    pub(crate) k: usize,
    pub(crate) n: usize,
    pub(crate) field: PrimeField,
    pub(crate) enc_matrix: Matrix,
}

impl ReedSolomon {
    /// Creates a codec producing `total` shares of which any
    /// `required` recover the data.
    ///
    /// `modulus` must be an odd prime; primality is the caller's
    /// obligation and is not checked.
    ///
    /// Fails with [`Error::InvalidParams`] unless
    /// `1 <= required <= total`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reed_solomon_gfp::{BigUint, ReedSolomon};
    ///
    /// assert!(ReedSolomon::new(3, 5, BigUint::from(29u64)).is_ok());
    /// assert!(ReedSolomon::new(5, 3, BigUint::from(29u64)).is_err());
    /// ```
    pub fn new(required: usize, total: usize, modulus: BigUint) -> Result<Self, Error> {
        if required == 0 || total == 0 || required > total {
            return Err(Error::InvalidParams { required, total });
        }
        let field = PrimeField::new(modulus);
        let enc_matrix = Matrix::vandermonde(total, required, &field)?;
        Ok(Self {
            k: required,
            n: total,
            field,
            enc_matrix,
        })
    }

    /// Returns the number of shares required to recover the data.
    pub fn required(&self) -> usize {
        self.k
    }

    /// Returns the total number of shares produced by encoding.
    pub fn total(&self) -> usize {
        self.n
    }

    /// Returns the field modulus.
    pub fn modulus(&self) -> &BigUint {
        self.field.modulus()
    }

    /// Encodes the inputs into the full set of `total` shares.
    ///
    /// Inputs must be field elements in `[0, p)`. Only the first
    /// `required` inputs are used; extras are ignored. Fails with
    /// [`Error::TooFewShards`] when fewer are given.
    ///
    /// Encoding is deterministic: the same inputs always produce the
    /// same shares, numbered `0..total` in order.
    pub fn encode(&self, inputs: &[BigUint]) -> Result<Vec<Share>, Error> {
        if inputs.len() < self.k {
            return Err(Error::TooFewShards {
                required: self.k,
                got: inputs.len(),
            });
        }
        let mut shares = Vec::with_capacity(self.n);
        for i in 0..self.n {
            let row = self.enc_matrix.row(i);
            let mut acc = self.field.zero();
            for j in 0..self.k {
                acc = self.field.add(&acc, &self.field.mul(&inputs[j], &row[j]));
            }
            shares.push(Share {
                number: i,
                data: acc,
            });
        }
        Ok(shares)
    }

    /// Recovers the original inputs from at least `required` correct
    /// shares, calling `on_output` exactly `required` times with one
    /// recovered symbol each, in ascending input index.
    ///
    /// The shares are sorted by number and the first `required` of
    /// them select rows of the generator matrix; inverting that square
    /// system yields the inputs. Corrupted shares are not detected
    /// here; run [`correct`] first when silent corruption is possible.
    ///
    /// Fails with [`Error::TooFewShards`] when fewer than `required`
    /// shares are given and with [`Error::InvalidShare`] when a share
    /// number is outside `[0, total)`. Duplicate share numbers make
    /// the decode matrix singular and surface as [`Error::Singular`].
    ///
    /// [`correct`]: ReedSolomon::correct
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reed_solomon_gfp::{BigUint, ReedSolomon};
    ///
    /// let rs = ReedSolomon::new(2, 4, BigUint::from(29u64))?;
    /// let inputs = vec![BigUint::from(7u64), BigUint::from(11u64)];
    /// let shares = rs.encode(&inputs)?;
    ///
    /// let mut restored = vec![BigUint::from(0u64); 2];
    /// rs.rebuild(&shares[2..], |share| restored[share.number] = share.data)?;
    /// assert_eq!(restored, inputs);
    /// # Ok::<(), reed_solomon_gfp::Error>(())
    /// ```
    pub fn rebuild<F>(&self, shares: &[Share], mut on_output: F) -> Result<(), Error>
    where
        F: FnMut(Share),
    {
        if shares.len() < self.k {
            return Err(Error::TooFewShards {
                required: self.k,
                got: shares.len(),
            });
        }
        for share in shares {
            if share.number >= self.n {
                return Err(Error::InvalidShare {
                    total: self.n,
                    number: share.number,
                });
            }
        }

        let mut sorted = shares.to_vec();
        sorted.sort_unstable();

        let rows: Vec<Vec<BigUint>> = sorted[..self.k]
            .iter()
            .map(|share| self.enc_matrix.row(share.number).to_vec())
            .collect();
        let decode_matrix = Matrix::from_data(rows)?;
        let inverse = decode_matrix.invert(&self.field)?;

        for j in 0..self.k {
            let mut acc = self.field.zero();
            for c in 0..self.k {
                acc = self
                    .field
                    .add(&acc, &self.field.mul(inverse.get(j, c), &sorted[c].data));
            }
            on_output(Share {
                number: j,
                data: acc,
            });
        }
        Ok(())
    }

    /// Repairs silent corruption: given `r >= required` shares of
    /// which at most `(r - required) / 2` carry wrong data, returns a
    /// freshly encoded full set of `total` shares.
    ///
    /// The Berlekamp-Welch decoder recovers the data polynomial
    /// jointly with an error locator, trying candidate error counts
    /// in ascending order so the smallest consistent one wins.
    ///
    /// Fails with [`Error::TooFewShards`] when fewer than `required`
    /// shares are given and with [`Error::TooManyErrors`] when no
    /// candidate error count yields a consistent decoding.
    pub fn correct(&self, shares: &[Share]) -> Result<Vec<Share>, Error> {
        berlekamp_welch::correct(self, shares)
    }
}

// ======================================================================
// TESTS
