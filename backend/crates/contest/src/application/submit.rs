//! Submit Use Case
//!
//! Validation order: code present, code known, project file, declaration
//! file. The first failure wins and nothing is written before all four pass.
//! A submission that fails after validation leaves earlier uploads intact.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::ContestConfig;
use crate::domain::entities::{NewSubmission, Registrant, Submission};
use crate::domain::repository::{FileStore, RegistrantRepository, SubmissionRepository};
use crate::domain::services::stored_filename;
use crate::domain::value_objects::{FileCategory, StagedFile, UploadedFile};
use crate::error::{ContestError, ContestResult};

/// Parsed submission form
#[derive(Debug, Clone, Default)]
pub struct SubmitInput {
    pub code: String,
    pub project: Option<UploadedFile>,
    pub declaration: Option<UploadedFile>,
}

#[derive(Debug, Clone)]
pub struct SubmitOutput {
    pub registrant: Registrant,
    pub submissions: Vec<Submission>,
}

/// Submit Use Case
pub struct SubmitUseCase<R, S, F>
where
    R: RegistrantRepository,
    S: SubmissionRepository,
    F: FileStore,
{
    registrant_repo: Arc<R>,
    submission_repo: Arc<S>,
    file_store: Arc<F>,
    config: Arc<ContestConfig>,
}

impl<R, S, F> SubmitUseCase<R, S, F>
where
    R: RegistrantRepository,
    S: SubmissionRepository,
    F: FileStore,
{
    pub fn new(
        registrant_repo: Arc<R>,
        submission_repo: Arc<S>,
        file_store: Arc<F>,
        config: Arc<ContestConfig>,
    ) -> Self {
        Self {
            registrant_repo,
            submission_repo,
            file_store,
            config,
        }
    }

    pub async fn execute(&self, input: SubmitInput) -> ContestResult<SubmitOutput> {
        let raw_code = input.code.trim();
        if raw_code.is_empty() {
            return Err(ContestError::MissingCode);
        }

        // A malformed code cannot exist in the store
        let code = self
            .config
            .code_format
            .parse(raw_code)
            .ok_or(ContestError::CodeNotFound)?;

        let registrant = self
            .registrant_repo
            .find_by_code(&code)
            .await?
            .ok_or(ContestError::CodeNotFound)?;

        let project = self.accept(FileCategory::Project, input.project)?;
        let declaration = self.accept(FileCategory::Declaration, input.declaration)?;

        // Files are staged first and only replace earlier uploads of the
        // same name once the rows are committed.
        let mut staged: Vec<StagedFile> = Vec::with_capacity(2);
        for (category, file) in [
            (FileCategory::Project, &project),
            (FileCategory::Declaration, &declaration),
        ] {
            let filename = stored_filename(category, &file.file_name);
            match self.file_store.stage(&code, &filename, &file.bytes).await {
                Ok(staged_file) => staged.push(staged_file),
                Err(e) => {
                    self.discard_all(&staged).await;
                    return Err(e);
                }
            }
        }

        let submitted_at = Utc::now();
        let entries: Vec<NewSubmission> = FileCategory::ALL
            .into_iter()
            .zip(&staged)
            .map(|(category, file)| NewSubmission {
                registrant_id: registrant.id,
                access_code: code.clone(),
                stored_filename: file.filename.clone(),
                category,
                submitted_at,
            })
            .collect();

        let submissions = match self.submission_repo.record(&entries).await {
            Ok(submissions) => submissions,
            Err(e) => {
                self.discard_all(&staged).await;
                return Err(e);
            }
        };

        for (i, file) in staged.iter().enumerate() {
            if let Err(e) = self.file_store.promote(file).await {
                tracing::error!(
                    error = %e,
                    code = %code,
                    filename = %file.filename,
                    "Submission recorded but upload could not be moved into place"
                );
                self.discard_all(&staged[i..]).await;
                return Err(e);
            }
        }

        tracing::info!(
            registrant_id = %registrant.id,
            code = %code,
            files = submissions.len(),
            "Submission recorded"
        );

        Ok(SubmitOutput {
            registrant,
            submissions,
        })
    }

    fn accept(
        &self,
        category: FileCategory,
        file: Option<UploadedFile>,
    ) -> ContestResult<UploadedFile> {
        match file {
            Some(file) if !file.file_name.trim().is_empty() && self.config.allows(&file.file_name) => {
                Ok(file)
            }
            _ => Err(ContestError::InvalidFile(category)),
        }
    }

    /// Best-effort removal of staged files from a request that failed
    async fn discard_all(&self, staged: &[StagedFile]) {
        for file in staged {
            if let Err(e) = self.file_store.discard(file).await {
                tracing::warn!(
                    error = %e,
                    code = %file.code,
                    filename = %file.filename,
                    "Failed to remove staged upload"
                );
            }
        }
    }
}
