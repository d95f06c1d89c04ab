use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegistrationOutcome;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and send the account confirmation link.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created user and whether the confirmation email went out
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<RegistrationOutcome, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user together with its default business.
    ///
    /// Both rows are written atomically; the business is named after the user.
    ///
    /// # Returns
    /// Created user entity with storage-assigned id and join time
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username (or the matching business name) is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Flip `is_verified` to true if it is currently false.
    ///
    /// Check and write happen in a single conditional update, so concurrent
    /// callers for the same user see exactly one `true`.
    ///
    /// # Returns
    /// True if this call changed the flag; false if the user was already
    /// verified or does not exist
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn mark_verified(&self, id: &UserId) -> Result<bool, UserError>;
}
