use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessToken;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use auth::SubjectIdentity;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service for registration, login and request authentication.
///
/// Stateless apart from its injected collaborators. Argon2 work is moved to
/// tokio's blocking pool so it never stalls the request executor.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Credential hasher and token codec, built once from configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

async fn run_blocking<F, T>(task: F) -> Result<T, UserError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| UserError::Unknown(format!("Blocking task failed: {}", e)))
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self.repository.name_exists(&command.name).await? {
            return Err(UserError::NameTaken(command.name.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = run_blocking(move || authenticator.hash_password(&password))
            .await?
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            age: command.age,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError> {
        let Some(user) = self.repository.find_by_name(&command.name).await? else {
            tracing::info!(username = %command.name, "Login rejected: unknown user");
            return Err(UserError::Unauthorized);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let claims = Claims::for_subject(user.name.as_str());
        let password = command.password;
        let stored_hash = user.password_hash;

        let issued =
            run_blocking(move || authenticator.issue_token(&password, &stored_hash, &claims))
                .await?;

        match issued {
            Ok(token) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                Ok(token)
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!(user_id = %user.id, "Login rejected: wrong password");
                Err(UserError::Unauthorized)
            }
            Err(e) => Err(UserError::Unknown(format!("Token generation failed: {}", e))),
        }
    }

    fn authenticate(&self, token: &str) -> Result<SubjectIdentity, UserError> {
        self.authenticator
            .authenticate(token)
            .map_err(|_| UserError::Unauthorized)
    }

    async fn current_user(&self, token: &str) -> Result<User, UserError> {
        let subject = self.authenticate(token)?;
        let name = Username::new(subject.into_inner()).map_err(|_| UserError::Unauthorized)?;

        self.repository.find_by_name(&name).await?.ok_or_else(|| {
            tracing::warn!(username = %name, "Token subject no longer exists");
            UserError::Unauthorized
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }
}
