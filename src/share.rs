use num::bigint::BigUint;

// ======================================================================
// Share - PUBLIC

/// One encoded output symbol.
///
/// `number` identifies the generator-matrix row that produced the
/// share; `data` is the resulting field element. Shares order by
/// `number`, so a received batch can be sorted directly.
///
/// A share is a plain value: callers that keep shares handed to them
/// through callbacks own their copies outright.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Share {
    /// Index of the generator-matrix row that produced this share,
    /// in `[0, total)`.
    pub number: usize,
    /// The encoded field element, in `[0, p)`.
    pub data: BigUint,
}

// ======================================================================
// TESTS
