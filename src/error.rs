use thiserror::Error;

/// Failures surfaced by the catalog source and cache.
///
/// `NotFound` is kept apart from `Transport` so callers can treat a missing
/// entity as a normal condition, and `Malformed` is kept apart from both so
/// "server down" and "server changed shape" stay distinguishable.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The query resolved to no entity.
    #[error("catalog entry not found")]
    NotFound,

    /// The remote source was unreachable or answered with a server error.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote payload could not be normalized into a catalog record.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Id outside the valid catalog range.
    #[error("invalid catalog id {0}, expected 1..={1}")]
    InvalidId(u32, u32),
}
