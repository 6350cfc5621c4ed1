use super::IPushTokenRepo;
use crate::repos::shared::repo::DeleteResult;
use gemschihub_domain::PushToken;
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresPushTokenRepo {
    pool: PgPool,
}

impl PostgresPushTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PushTokenRaw {
    token: String,
    user_id: Option<String>,
    created: i64,
}

impl From<PushTokenRaw> for PushToken {
    fn from(t: PushTokenRaw) -> Self {
        Self {
            token: t.token,
            user_id: t.user_id,
            created: t.created,
        }
    }
}

#[async_trait::async_trait]
impl IPushTokenRepo for PostgresPushTokenRepo {
    async fn insert_if_absent(&self, token: &PushToken) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO push_tokens(token, user_id, created)
            VALUES($1, $2, $3)
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(&token.token)
        .bind(&token.user_id)
        .bind(token.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to insert push token. DB returned error: {:?}", e);
            e
        })?;

        Ok(res.rows_affected() == 1)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<PushToken>> {
        let tokens: Vec<PushTokenRaw> = sqlx::query_as(
            r#"
            SELECT * FROM push_tokens
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tokens.into_iter().map(|t| t.into()).collect())
    }

    async fn delete_by_token(&self, token: &str) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM push_tokens AS t
            WHERE t.token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn delete_many(&self, tokens: &[String]) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM push_tokens AS t
            WHERE t.token = ANY($1)
            "#,
        )
        .bind(tokens)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
