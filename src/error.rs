use thiserror::Error;

/// Failure signal returned to the host propagation engine.
///
/// Every variant means the same thing to the caller: the constraint cannot
/// be satisfied over the supplied domains. The split exists so hosts can
/// count and report the distinct causes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrowError {
    /// A required intersection produced an empty domain.
    #[error("domain became empty")]
    Empty,
    /// An indeterminate form (0/0, ∞−∞, ∞/∞) reached an endpoint.
    #[error("indeterminate form in interval computation")]
    Undefined,
    /// The host supplied a malformed interval or a wrong-arity tuple.
    #[error("malformed input interval")]
    Malformed,
}
