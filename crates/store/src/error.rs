use thiserror::Error;

/// Result type used across the repositories.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by the repositories.
///
/// `NotFound` / `Conflict` / `Validation` come from explicit checks and
/// map to structured 4xx responses; the rest are opaque storage failures
/// that collapse into a generic 500 at the HTTP boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The target of the operation does not exist. The payload describes
    /// what was missing, e.g. `product with id: ...`.
    #[error("there is no {0}")]
    NotFound(String),

    /// A unique key collided (or a location name, under the reject
    /// policy).
    #[error("{0}")]
    Conflict(String),

    /// The submission was structurally unusable.
    #[error("{0}")]
    Validation(String),

    /// Any unexpected driver failure, including malformed queries.
    #[error("storage failure")]
    Storage(#[from] mongodb::error::Error),

    /// Document serialization failure.
    #[error("serialization failure")]
    Bson(#[from] bson::ser::Error),
}
