use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::business::models::Business;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    is_verified: bool,
    joined_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            is_verified: row.is_verified,
            joined_at: row.joined_at,
        })
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_insert_error(e: sqlx::Error, user: &NewUser) -> UserError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                match db_err.constraint() {
                    // The default business is named after its owner
                    Some("users_username_key") | Some("businesses_name_key") => {
                        return UserError::UsernameAlreadyExists(
                            user.username.as_str().to_string(),
                        );
                    }
                    Some("users_email_key") => {
                        return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                    }
                    _ => {}
                }
            }
        }
        UserError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, is_verified, joined_at
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Self::map_insert_error(e, &user))?;

        sqlx::query(
            r#"
            INSERT INTO businesses (name, city, region, logo, owner_id)
            VALUES ($1, $2, $2, $3, $4)
            "#,
        )
        .bind(user.username.as_str())
        .bind(Business::DEFAULT_LOCATION)
        .bind(Business::DEFAULT_LOGO)
        .bind(row.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::map_insert_error(e, &user))?;

        tx.commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, is_verified, joined_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, is_verified, joined_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn mark_verified(&self, id: &UserId) -> Result<bool, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_verified = TRUE
            WHERE id = $1 AND is_verified = FALSE
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
