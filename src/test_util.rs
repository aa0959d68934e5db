use num::bigint::{BigUint, RandBigInt};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{ReedSolomon, Share};

// ======================================================================
// FUNCTIONS - CRATE

/// `2^127 - 1`, a Mersenne prime large enough to exercise multi-limb
/// arithmetic.
pub(crate) fn large_prime() -> BigUint {
    BigUint::parse_bytes(b"170141183460469231731687303715884105727", 10).unwrap()
}

pub(crate) fn big(value: u64) -> BigUint {
    BigUint::from(value)
}

pub(crate) fn bigs(values: &[u64]) -> Vec<BigUint> {
    values.iter().map(|&value| BigUint::from(value)).collect()
}

/// Deterministic pseudo-random field elements below `modulus`.
pub(crate) fn generate_inputs(count: usize, modulus: &BigUint, seed: u8) -> Vec<BigUint> {
    let mut rng = ChaCha8Rng::from_seed([seed; 32]);
    (0..count).map(|_| rng.gen_biguint_below(modulus)).collect()
}

/// Rebuilds from the given shares and asserts that every input symbol
/// comes back at its own index.
pub(crate) fn assert_rebuilds(rs: &ReedSolomon, shares: &[Share], inputs: &[BigUint]) {
    let mut restored: Vec<Option<BigUint>> = vec![None; rs.required()];
    rs.rebuild(shares, |share| restored[share.number] = Some(share.data))
        .unwrap();

    assert_eq!(restored.len(), inputs.len());
    for (restored, input) in restored.iter().zip(inputs) {
        assert_eq!(restored.as_ref(), Some(input));
    }
}
