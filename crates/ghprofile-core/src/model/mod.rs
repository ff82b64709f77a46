// ── Domain model ──
//
// Immutable per-query snapshots. Nothing here outlives the lookup that
// produced it.

pub mod profile;
pub mod repository;

pub use profile::{ProfileQuery, ProfileRecord};
pub use repository::RepositoryRecord;
