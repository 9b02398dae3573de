//! Administrator account service.

use aduan_common::{AppError, AppResult, IdGenerator, config::AdminConfig};
use aduan_db::{entities::user, repositories::UserRepository};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::Set;

/// Service for administrator accounts and their access tokens.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Authenticate a user by token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Authenticate a user by email and password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Sign in and return the user's current token, issuing one if the
    /// account has none yet.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<(user::Model, String)> {
        let user = self.authenticate(email, password).await?;

        let token = match user.token.clone() {
            Some(token) => token,
            None => self.regenerate_token(&user.id).await?,
        };

        tracing::info!(user_id = %user.id, "Administrator signed in");
        Ok((user, token))
    }

    /// Regenerate a user's authentication token.
    ///
    /// The previous token stops working immediately.
    pub async fn regenerate_token(&self, user_id: &str) -> AppResult<String> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let new_token = self.id_gen.generate_token();

        let mut active: user::ActiveModel = user.into();
        active.token = Set(Some(new_token.clone()));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await?;

        Ok(new_token)
    }

    /// Make sure the configured administrator account exists.
    ///
    /// An existing account with the same email is left untouched apart from
    /// being granted the administrator flag.
    pub async fn ensure_admin(&self, config: &AdminConfig) -> AppResult<user::Model> {
        let email = config.email.trim().to_lowercase();
        if email.is_empty() || config.password.is_empty() {
            return Err(AppError::Config(
                "admin email and password must not be empty".to_string(),
            ));
        }

        if let Some(existing) = self.user_repo.find_by_email(&email).await? {
            if existing.is_admin {
                return Ok(existing);
            }
            let mut active: user::ActiveModel = existing.into();
            active.is_admin = Set(true);
            active.updated_at = Set(Some(chrono::Utc::now().into()));
            let user = self.user_repo.update(active).await?;
            tracing::info!(user_id = %user.id, "Granted administrator flag");
            return Ok(user);
        }

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(config.name.clone()),
            email: Set(email),
            password_hash: Set(hash_password(&config.password)?),
            token: Set(Some(self.id_gen.generate_token())),
            is_admin: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let user = self.user_repo.create(model).await?;
        tracing::info!(user_id = %user.id, "Created administrator account");
        Ok(user)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(password_hash: String, is_admin: bool) -> user::Model {
        user::Model {
            id: "01hzyadmin0000000000000000".to_string(),
            name: "Admin Desa".to_string(),
            email: "admin@desa.id".to_string(),
            password_hash,
            token: Some("test_token".to_string()),
            is_admin,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(results: Vec<Vec<user::Model>>) -> UserService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        );
        UserService::new(UserRepository::new(db))
    }

    #[test]
    fn test_hash_password() {
        let hash = hash_password("rahasia123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("rahasia123", &hash).unwrap());
        assert!(!verify_password("salah", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("rahasia123", "not-a-hash").is_err());
    }

    #[tokio::test]
    async fn test_authenticate() {
        let hash = hash_password("rahasia123").unwrap();
        let service = service_with(vec![vec![create_test_user(hash, true)]]);

        let user = service
            .authenticate("Admin@Desa.id", "rahasia123")
            .await
            .unwrap();
        assert_eq!(user.email, "admin@desa.id");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hash = hash_password("rahasia123").unwrap();
        let service = service_with(vec![vec![create_test_user(hash, true)]]);

        let result = service.authenticate("admin@desa.id", "salah").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = service_with(vec![vec![]]);

        let result = service.authenticate("nobody@desa.id", "x").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_by_token_not_found() {
        let service = service_with(vec![vec![]]);

        let result = service.authenticate_by_token("invalid").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_regenerate_token() {
        let user = create_test_user("hash".to_string(), true);
        let mut rotated = user.clone();
        rotated.token = Some("rotated".to_string());
        let service = service_with(vec![vec![user], vec![rotated]]);

        let token = service
            .regenerate_token("01hzyadmin0000000000000000")
            .await
            .unwrap();

        assert_eq!(token.len(), 32);
        assert_ne!(token, "test_token");
    }

    #[tokio::test]
    async fn test_ensure_admin_keeps_existing() {
        let existing = create_test_user("hash".to_string(), true);
        let service = service_with(vec![vec![existing.clone()]]);

        let config = AdminConfig {
            email: "admin@desa.id".to_string(),
            password: "rahasia123".to_string(),
            name: "Admin Desa".to_string(),
        };

        let user = service.ensure_admin(&config).await.unwrap();
        assert_eq!(user, existing);
    }

    #[tokio::test]
    async fn test_ensure_admin_rejects_empty_password() {
        let service = service_with(vec![]);
        let config = AdminConfig {
            email: "admin@desa.id".to_string(),
            password: String::new(),
            name: "Admin Desa".to_string(),
        };

        let result = service.ensure_admin(&config).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
