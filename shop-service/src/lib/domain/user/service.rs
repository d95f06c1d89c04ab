use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegistrationOutcome;
use crate::domain::verification::ports::VerificationGatePort;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, VG>
where
    UR: UserRepository,
    VG: VerificationGatePort,
{
    repository: Arc<UR>,
    verification_gate: Arc<VG>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, VG> UserService<UR, VG>
where
    UR: UserRepository,
    VG: VerificationGatePort,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `verification_gate` - Issues and sends confirmation links
    pub fn new(repository: Arc<UR>, verification_gate: Arc<VG>) -> Self {
        Self {
            repository,
            verification_gate,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR, VG> UserServicePort for UserService<UR, VG>
where
    UR: UserRepository,
    VG: VerificationGatePort,
{
    async fn register(&self, command: CreateUserCommand) -> Result<RegistrationOutcome, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        let confirmation_sent = match self.verification_gate.send_verification_link(&user).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    error = %e,
                    "Failed to send confirmation link"
                );
                false
            }
        };

        Ok(RegistrationOutcome {
            user,
            confirmation_sent,
        })
    }
}
