use async_trait::async_trait;
use auth::AccessToken;
use auth::SubjectIdentity;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user and authentication operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user, storing a hash of the password.
    ///
    /// # Errors
    /// * `NameTaken` - A user with this exact name already exists
    /// * `PasswordHashing` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown user or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError>;

    /// Verify a bearer token and return the username it was issued to.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is malformed, forged, expired or has no subject
    fn authenticate(&self, token: &str) -> Result<SubjectIdentity, UserError>;

    /// Verify a bearer token and load the user it names.
    ///
    /// # Errors
    /// * `Unauthorized` - Token rejected, or its subject no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn current_user(&self, token: &str) -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    async fn list_users(&self) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Name lookups are exact, case-sensitive matches.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `NameTaken` - Unique constraint on the name was hit
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Fetch the stored credential and profile for a username.
    async fn find_by_name(&self, name: &Username) -> Result<Option<User>, UserError>;

    async fn name_exists(&self, name: &Username) -> Result<bool, UserError>;

    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}
