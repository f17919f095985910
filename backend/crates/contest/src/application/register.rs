//! Register Use Case

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::ContestConfig;
use crate::domain::entities::{NewRegistrant, Registrant};
use crate::domain::repository::RegistrantRepository;
use crate::domain::services::generate_access_code;
use crate::error::{ContestError, ContestResult};

/// Raw registration form fields
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub full_name: String,
    pub student_id: String,
    pub pseudonym: String,
}

/// Register Use Case
pub struct RegisterUseCase<R>
where
    R: RegistrantRepository,
{
    registrant_repo: Arc<R>,
    config: Arc<ContestConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: RegistrantRepository,
{
    pub fn new(registrant_repo: Arc<R>, config: Arc<ContestConfig>) -> Self {
        Self {
            registrant_repo,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> ContestResult<Registrant> {
        let new = NewRegistrant::new(&input.full_name, &input.student_id, &input.pseudonym)?;
        let max_attempts = self.config.code_max_attempts.max(1);

        for attempt in 1..=max_attempts {
            // ThreadRng is not Send; keep it out of the await below.
            let code = generate_access_code(&self.config.code_format, &mut rand::rng());
            let registered_at = Utc::now();

            match self
                .registrant_repo
                .try_insert(&new, &code, registered_at)
                .await?
            {
                Some(id) => {
                    tracing::info!(
                        registrant_id = %id,
                        code = %code,
                        attempt,
                        "Registrant created"
                    );
                    return Ok(Registrant::from_new(id, new, code, registered_at));
                }
                None => {
                    tracing::warn!(attempt, "Access code collision, sampling again");
                }
            }
        }

        tracing::error!(
            attempts = max_attempts,
            capacity = self.config.code_format.capacity(),
            "Could not find a free access code"
        );
        Err(ContestError::CodeSpaceExhausted {
            attempts: max_attempts,
        })
    }
}
