//! `SQLite` implementation of [`UserRepository`], including login sessions.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hubdesk_app::ports::UserRepository;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::id::UserId;
use hubdesk_domain::user::{PasswordHash, PasswordReset, Profile, Session, User};

use crate::codec::{format_timestamp, get_id, get_timestamp, parse_timestamp};
use crate::error::{Op, Table};

struct UserRow(User);

impl<'r> FromRow<'r, SqliteRow> for UserRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let reset_token: Option<String> = row.try_get("reset_token")?;
        let reset_expires_at: Option<String> = row.try_get("reset_expires_at")?;
        let reset = match (reset_token, reset_expires_at) {
            (Some(token), Some(expires_at)) => Some(PasswordReset {
                token,
                expires_at: parse_timestamp(&expires_at)?,
            }),
            _ => None,
        };

        Ok(Self(User {
            id: get_id(row, "id")?,
            email: row.try_get("email")?,
            password: PasswordHash::from_encoded(row.try_get::<String, _>("password_hash")?),
            profile: Profile {
                name: row.try_get("profile_name")?,
                location: row.try_get("profile_location")?,
                website: row.try_get("profile_website")?,
            },
            reset,
            created_at: get_timestamp(row, "created_at")?,
        }))
    }
}

struct SessionRow(Session);

impl<'r> FromRow<'r, SqliteRow> for SessionRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Session {
            token: row.try_get("token")?,
            user: get_id(row, "user_id")?,
            created_at: get_timestamp(row, "created_at")?,
        }))
    }
}

const INSERT_USER: &str = "INSERT INTO users (id, email, password_hash, profile_name, profile_location, profile_website, reset_token, reset_expires_at, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";
const UPDATE_USER: &str = "UPDATE users SET email = ?, password_hash = ?, profile_name = ?, profile_location = ?, profile_website = ?, reset_token = ?, reset_expires_at = ? WHERE id = ?";

/// `SQLite`-backed user and session repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_user(&self, query: &str, value: String) -> Result<Option<User>, HubdeskError> {
        let row: Option<UserRow> = sqlx::query_as(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(Table::Users.failed(Op::Select))?;
        Ok(row.map(|r| r.0))
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User, HubdeskError> {
        sqlx::query(INSERT_USER)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(user.password.as_str())
            .bind(&user.profile.name)
            .bind(&user.profile.location)
            .bind(&user.profile.website)
            .bind(user.reset.as_ref().map(|r| r.token.clone()))
            .bind(user.reset.as_ref().map(|r| format_timestamp(&r.expires_at)))
            .bind(format_timestamp(&user.created_at))
            .execute(&self.pool)
            .await
            .map_err(Table::Users.failed(Op::Insert))?;
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, HubdeskError> {
        self.fetch_user("SELECT * FROM users WHERE id = ?", id.to_string())
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, HubdeskError> {
        self.fetch_user("SELECT * FROM users WHERE email = ?", email.to_string())
            .await
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, HubdeskError> {
        self.fetch_user(
            "SELECT * FROM users WHERE reset_token = ?",
            token.to_string(),
        )
        .await
    }

    async fn update(&self, user: User) -> Result<User, HubdeskError> {
        sqlx::query(UPDATE_USER)
            .bind(&user.email)
            .bind(user.password.as_str())
            .bind(&user.profile.name)
            .bind(&user.profile.location)
            .bind(&user.profile.website)
            .bind(user.reset.as_ref().map(|r| r.token.clone()))
            .bind(user.reset.as_ref().map(|r| format_timestamp(&r.expires_at)))
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Users.failed(Op::Update))?;
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), HubdeskError> {
        self.delete_sessions_for(id).await?;
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Users.failed(Op::Delete))?;
        Ok(())
    }

    async fn create_session(&self, session: Session) -> Result<Session, HubdeskError> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&session.token)
            .bind(session.user.to_string())
            .bind(format_timestamp(&session.created_at))
            .execute(&self.pool)
            .await
            .map_err(Table::Sessions.failed(Op::Insert))?;
        Ok(session)
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>, HubdeskError> {
        let row: Option<SessionRow> = sqlx::query_as("SELECT * FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(Table::Sessions.failed(Op::Select))?;
        Ok(row.map(|r| r.0))
    }

    async fn delete_session(&self, token: &str) -> Result<(), HubdeskError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(Table::Sessions.failed(Op::Delete))?;
        Ok(())
    }

    async fn delete_sessions_for(&self, user: UserId) -> Result<(), HubdeskError> {
        sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Sessions.failed(Op::Delete))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteUserRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteUserRepository::new(db.pool().clone())
    }

    fn user(email: &str) -> User {
        User::new(
            email,
            "correct horse",
            Profile {
                name: Some("Ada".to_string()),
                location: None,
                website: Some("https://example.com".to_string()),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn should_round_trip_user_with_password_hash() {
        let repo = setup().await;
        let created = user("ada@example.com");

        repo.create(created.clone()).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.password.verify("correct horse"));
    }

    #[tokio::test]
    async fn should_persist_password_as_single_bcrypt_column() {
        let repo = setup().await;
        let created = repo.create(user("ada@example.com")).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
            .bind(created.id.to_string())
            .fetch_one(&repo.pool)
            .await
            .unwrap();

        assert_eq!(stored, created.password.as_str());
        assert!(stored.starts_with("$2b$"));
        assert!(!stored.contains("correct horse"));
    }

    #[tokio::test]
    async fn should_find_user_by_email_and_reset_token() {
        let repo = setup().await;
        let mut created = repo.create(user("ada@example.com")).await.unwrap();
        let reset = PasswordReset::issue();
        created.reset = Some(reset.clone());
        repo.update(created.clone()).await.unwrap();

        let by_email = repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        let by_token = repo.find_by_reset_token(&reset.token).await.unwrap().unwrap();

        assert_eq!(by_email.id, created.id);
        assert_eq!(by_token.reset, Some(reset));
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_duplicate_email_at_store_level() {
        let repo = setup().await;
        repo.create(user("ada@example.com")).await.unwrap();

        let err = repo.create(user("ada@example.com")).await.unwrap_err();

        assert!(matches!(err, HubdeskError::Storage(_)));
        assert_eq!(
            std::error::Error::source(&err).unwrap().to_string(),
            "insert into users failed"
        );
    }

    #[tokio::test]
    async fn should_manage_sessions() {
        let repo = setup().await;
        let created = repo.create(user("ada@example.com")).await.unwrap();
        let first = repo.create_session(Session::open(created.id)).await.unwrap();
        let second = repo.create_session(Session::open(created.id)).await.unwrap();

        repo.delete_session(&first.token).await.unwrap();

        assert!(repo.find_session(&first.token).await.unwrap().is_none());
        assert_eq!(
            repo.find_session(&second.token).await.unwrap(),
            Some(second.clone())
        );

        repo.delete_sessions_for(created.id).await.unwrap();
        assert!(repo.find_session(&second.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_delete_user_with_sessions() {
        let repo = setup().await;
        let created = repo.create(user("ada@example.com")).await.unwrap();
        let session = repo.create_session(Session::open(created.id)).await.unwrap();

        repo.delete(created.id).await.unwrap();

        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(repo.find_session(&session.token).await.unwrap().is_none());
    }
}
