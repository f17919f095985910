//! Registry Query Use Case

use std::sync::Arc;

use crate::application::config::AdminConfig;
use crate::domain::entities::{RegistrantOverview, RegistryEntry, SubmittedFile};
use crate::domain::repository::RegistryQueryRepository;
use crate::error::{AdminError, AdminResult};

pub struct QueryRegistryUseCase<Q>
where
    Q: RegistryQueryRepository,
{
    query_repo: Arc<Q>,
    config: Arc<AdminConfig>,
}

impl<Q> QueryRegistryUseCase<Q>
where
    Q: RegistryQueryRepository,
{
    pub fn new(query_repo: Arc<Q>, config: Arc<AdminConfig>) -> Self {
        Self { query_repo, config }
    }

    pub async fn overview(&self) -> AdminResult<Vec<RegistrantOverview>> {
        self.query_repo.list_overview().await
    }

    pub async fn registry(&self) -> AdminResult<Vec<RegistryEntry>> {
        self.query_repo.list_registry().await
    }

    /// Files submitted under `raw_code`; a malformed code is rejected
    pub async fn files(&self, raw_code: &str) -> AdminResult<Vec<SubmittedFile>> {
        let code = self
            .config
            .code_format
            .parse(raw_code)
            .ok_or(AdminError::InvalidPath)?;

        self.query_repo.list_files(code.as_str()).await
    }
}
