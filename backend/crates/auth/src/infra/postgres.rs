//! PostgreSQL Repository Implementations
//!
//! Opaque tokens are indexed by their SHA-256 digest; clear values never
//! reach the database. Compound writes run in one transaction, which rolls
//! back when dropped uncommitted.

use chrono::{DateTime, Utc};
use platform::crypto::sha256;
use platform::password::HashedPassword;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::entity::{
    csrf_token::CsrfToken, refresh_token::RefreshToken, session::IssuedSession, user::User,
};
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::value_object::{user_id::UserId, user_name::Username};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove refresh tokens past expiry and csrf tokens older than `csrf_max_age`
    pub async fn purge_expired(&self, csrf_max_age: chrono::Duration) -> AuthResult<(u64, u64)> {
        let now = Utc::now();

        let refresh_deleted = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        let csrf_deleted = sqlx::query("DELETE FROM csrf_tokens WHERE created_at < $1")
            .bind(now - csrf_max_age)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(
            refresh_tokens = refresh_deleted,
            csrf_tokens = csrf_deleted,
            "Purged expired auth tokens"
        );

        Ok((refresh_deleted, csrf_deleted))
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash).map_err(|e| {
            AuthError::Internal(format!("Stored password hash for {}: {e}", self.user_id))
        })?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            username: Username::from_db(self.username),
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshToken {
            user_id: UserId::from_uuid(row.user_id),
            expires_at: row.expires_at,
            revoked_at: row.revoked_at,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CsrfTokenRow {
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<CsrfTokenRow> for CsrfToken {
    fn from(row: CsrfTokenRow) -> Self {
        CsrfToken {
            user_id: UserId::from_uuid(row.user_id),
            created_at: row.created_at,
        }
    }
}

// ============================================================================
// Statements (usable on the pool or inside a transaction)
// ============================================================================

async fn insert_refresh_token<'e>(
    executor: impl PgExecutor<'e>,
    token: &str,
    record: &RefreshToken,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (
            token_hash,
            user_id,
            expires_at,
            revoked_at,
            created_at
        ) VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(sha256(token.as_bytes()).as_slice())
    .bind(record.user_id.as_uuid())
    .bind(record.expires_at)
    .bind(record.revoked_at)
    .bind(record.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

async fn insert_csrf_token<'e>(
    executor: impl PgExecutor<'e>,
    token: &str,
    record: &CsrfToken,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO csrf_tokens (
            token_hash,
            user_id,
            created_at
        ) VALUES ($1, $2, $3)
        "#,
    )
    .bind(sha256(token.as_bytes()).as_slice())
    .bind(record.user_id.as_uuid())
    .bind(record.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

async fn revoke_refresh_token<'e>(
    executor: impl PgExecutor<'e>,
    token: &str,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET revoked_at = COALESCE(revoked_at, $2)
        WHERE token_hash = $1
        "#,
    )
    .bind(sha256(token.as_bytes()).as_slice())
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

async fn delete_csrf_token<'e>(
    executor: impl PgExecutor<'e>,
    token: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM csrf_tokens WHERE token_hash = $1")
        .bind(sha256(token.as_bytes()).as_slice())
        .execute(executor)
        .await?;

    Ok(())
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                password_hash,
                created_at,
                updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                password_hash,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// Token Store Implementation
// ============================================================================

impl TokenStore for PgAuthRepository {
    async fn store_refresh_token(&self, token: &str, record: &RefreshToken) -> AuthResult<()> {
        insert_refresh_token(&self.pool, token, record).await?;
        Ok(())
    }

    async fn store_csrf_token(&self, token: &str, record: &CsrfToken) -> AuthResult<()> {
        insert_csrf_token(&self.pool, token, record).await?;
        Ok(())
    }

    async fn get_refresh_token(&self, token: &str) -> AuthResult<RefreshToken> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT
                user_id,
                expires_at,
                revoked_at,
                created_at
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(sha256(token.as_bytes()).as_slice())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RefreshToken::from).ok_or(AuthError::TokenNotFound)
    }

    async fn get_csrf_token(&self, token: &str) -> AuthResult<CsrfToken> {
        let row = sqlx::query_as::<_, CsrfTokenRow>(
            r#"
            SELECT
                user_id,
                created_at
            FROM csrf_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(sha256(token.as_bytes()).as_slice())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CsrfToken::from).ok_or(AuthError::TokenNotFound)
    }

    async fn revoke_refresh_token(&self, token: &str) -> AuthResult<()> {
        revoke_refresh_token(&self.pool, token, Utc::now()).await?;
        Ok(())
    }

    async fn delete_csrf_token(&self, token: &str) -> AuthResult<()> {
        delete_csrf_token(&self.pool, token).await?;
        Ok(())
    }

    async fn open_session(&self, session: &IssuedSession) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        insert_csrf_token(&mut *tx, &session.csrf_token, &session.csrf).await?;
        insert_refresh_token(&mut *tx, &session.refresh_token, &session.refresh).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn rotate_session(
        &self,
        presented_refresh: &str,
        presented_csrf: Option<&str>,
        next: &IssuedSession,
    ) -> AuthResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Conditional update: of two concurrent rotations only one matches
        let consumed = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2
            WHERE token_hash = $1
              AND user_id = $3
              AND revoked_at IS NULL
              AND expires_at >= $2
            "#,
        )
        .bind(sha256(presented_refresh.as_bytes()).as_slice())
        .bind(now)
        .bind(next.user_id.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if consumed != 1 {
            tracing::warn!(user_id = %next.user_id, "Refresh token consumed concurrently");
            return Err(AuthError::unauthenticated("refresh token already consumed"));
        }

        if let Some(csrf) = presented_csrf {
            sqlx::query("DELETE FROM csrf_tokens WHERE token_hash = $1 AND user_id = $2")
                .bind(sha256(csrf.as_bytes()).as_slice())
                .bind(next.user_id.as_uuid())
                .execute(&mut *tx)
                .await?;
        }

        insert_csrf_token(&mut *tx, &next.csrf_token, &next.csrf).await?;
        insert_refresh_token(&mut *tx, &next.refresh_token, &next.refresh).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn close_session(&self, refresh_token: &str, csrf_token: &str) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        revoke_refresh_token(&mut *tx, refresh_token, Utc::now()).await?;
        delete_csrf_token(&mut *tx, csrf_token).await?;

        tx.commit().await?;
        Ok(())
    }
}
