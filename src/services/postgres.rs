use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use super::store::{FaqStore, StoreError};
use crate::config::DatabaseSettings;
use crate::models::{Admin, Faq};

/// PostgreSQL-backed store for FAQ entries and admin accounts
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!(
            "Connecting to PostgreSQL (max: {} connections)",
            settings.max_connections.unwrap_or(10)
        );

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn faq_from_row(row: &PgRow) -> Result<Faq, sqlx::Error> {
    Ok(Faq {
        id: row.try_get("id")?,
        question: row.try_get::<Option<String>, _>("question")?.unwrap_or_default(),
        answer: row.try_get::<Option<String>, _>("answer")?.unwrap_or_default(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn admin_from_row(row: &PgRow) -> Result<Admin, sqlx::Error> {
    Ok(Admin {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl FaqStore for PostgresClient {
    async fn list_faqs(&self) -> Result<Vec<Faq>, StoreError> {
        let query = r#"
            SELECT id, question, answer, created_at, updated_at
            FROM faqs
            ORDER BY id ASC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        let faqs = rows.iter().map(faq_from_row).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} FAQ entries", faqs.len());

        Ok(faqs)
    }

    async fn get_faq(&self, id: i64) -> Result<Option<Faq>, StoreError> {
        let query = r#"
            SELECT id, question, answer, created_at, updated_at
            FROM faqs
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(faq_from_row).transpose()?)
    }

    async fn create_faq(&self, question: &str, answer: &str) -> Result<Faq, StoreError> {
        let query = r#"
            INSERT INTO faqs (question, answer, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, question, answer, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(question)
            .bind(answer)
            .fetch_one(&self.pool)
            .await?;

        let faq = faq_from_row(&row)?;
        tracing::debug!("Created FAQ {}", faq.id);

        Ok(faq)
    }

    async fn update_faq(&self, id: i64, question: &str, answer: &str) -> Result<Faq, StoreError> {
        let query = r#"
            UPDATE faqs
            SET question = $2, answer = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, question, answer, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(question)
            .bind(answer)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("faq {}", id)))?;

        Ok(faq_from_row(&row)?)
    }

    async fn delete_faq(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("faq {}", id)));
        }

        Ok(())
    }

    async fn count_faqs(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM faqs")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    async fn find_admin(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        let query = r#"
            SELECT id, username, password_hash, created_at
            FROM admins
            WHERE username = $1
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(admin_from_row).transpose()?)
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin, StoreError> {
        let query = r#"
            INSERT INTO admins (username, password_hash, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, password_hash, created_at
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::Conflict(format!("admin {} already exists", username)))?;

        Ok(admin_from_row(&row)?)
    }

    async fn count_admins(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}
