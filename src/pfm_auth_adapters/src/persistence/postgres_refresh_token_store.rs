use chrono::{DateTime, Utc};
use pfm_auth_core::{
    RefreshTokenRecord, RefreshTokenStore, RefreshTokenStoreError, TokenHash, UserId,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresRefreshTokenStore {
    pool: sqlx::PgPool,
}

impl PostgresRefreshTokenStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresRefreshTokenStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    user_id: Uuid,
    token_hash: String,
    expires_at: DateTime<Utc>,
    revoked: bool,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshTokenRecord {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshTokenRecord {
            user_id: UserId::from(row.user_id),
            token_hash: TokenHash::from_stored(row.token_hash),
            expires_at: row.expires_at,
            revoked: row.revoked,
            created_at: row.created_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> RefreshTokenStoreError {
    RefreshTokenStoreError::DatabaseError(e.to_string())
}

#[async_trait::async_trait]
impl RefreshTokenStore for PostgresRefreshTokenStore {
    #[tracing::instrument(name = "Storing refresh token in PostgreSQL", skip_all)]
    async fn create(&self, record: RefreshTokenRecord) -> Result<(), RefreshTokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO refresh_tokens (user_id, token_hash, expires_at, revoked, created_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.user_id.as_uuid())
        .bind(record.token_hash.as_str())
        .bind(record.expires_at)
        .bind(record.revoked)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Looking up refresh token in PostgreSQL", skip_all)]
    async fn find_by_hash(
        &self,
        token_hash: &TokenHash,
    ) -> Result<RefreshTokenRecord, RefreshTokenStoreError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
                SELECT user_id, token_hash, expires_at, revoked, created_at
                FROM refresh_tokens
                WHERE token_hash = $1 AND revoked = false AND expires_at > now()
            "#,
        )
        .bind(token_hash.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(RefreshTokenRecord::from)
            .ok_or(RefreshTokenStoreError::TokenNotFound)
    }

    #[tracing::instrument(name = "Revoking refresh token in PostgreSQL", skip_all)]
    async fn revoke_by_hash(&self, token_hash: &TokenHash) -> Result<(), RefreshTokenStoreError> {
        sqlx::query("UPDATE refresh_tokens SET revoked = true WHERE token_hash = $1")
            .bind(token_hash.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Revoking user refresh tokens in PostgreSQL", skip_all)]
    async fn revoke_all_for_user(&self, user_id: &UserId) -> Result<u64, RefreshTokenStoreError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = true WHERE user_id = $1 AND revoked = false",
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "Deleting expired refresh tokens in PostgreSQL", skip_all)]
    async fn delete_expired(&self) -> Result<u64, RefreshTokenStoreError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
