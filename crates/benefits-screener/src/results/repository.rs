use serde::{Deserialize, Serialize};

use super::domain::{FormData, Program};

/// Identifier of one completed screener submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(pub String);

/// Raw eligibility results for a screen, as returned by the eligibility API.
///
/// Filtering never writes back to the record, so admin and user views can be rendered from the
/// same stored program list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRecord {
    pub screen_id: ScreenId,
    pub form_data: FormData,
    pub programs: Vec<Program>,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ScreenRepository: Send + Sync {
    fn save(&self, record: ScreenRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ScreenId) -> Result<Option<ScreenRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("screen not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
