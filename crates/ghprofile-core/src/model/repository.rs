use serde::{Deserialize, Serialize};

/// One public repository entry. Order is whatever the server returned
/// (most recently updated first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub primary_language: Option<String>,
    pub star_count: u64,
    pub fork_count: u64,
    pub homepage_url: Option<String>,
}
