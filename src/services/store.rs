// Storage trait for FAQ entries and admin accounts.
//
// Implementors: PostgresClient (sqlx) and MemoryStore (in-process).
// Route handlers only see `Arc<dyn FaqStore>`, so the service can run
// against either backend and the HTTP tests need no database.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Admin, Faq};

/// Errors that can occur when reading or writing stored records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

#[async_trait]
pub trait FaqStore: Send + Sync {
    // --- FAQ entries ---

    /// All entries in ascending id order, which is the matcher's tie-break order.
    async fn list_faqs(&self) -> Result<Vec<Faq>, StoreError>;

    async fn get_faq(&self, id: i64) -> Result<Option<Faq>, StoreError>;

    async fn create_faq(&self, question: &str, answer: &str) -> Result<Faq, StoreError>;

    /// Replace question and answer; `NotFound` if the id does not exist.
    async fn update_faq(&self, id: i64, question: &str, answer: &str) -> Result<Faq, StoreError>;

    /// `NotFound` if the id does not exist.
    async fn delete_faq(&self, id: i64) -> Result<(), StoreError>;

    async fn count_faqs(&self) -> Result<i64, StoreError>;

    // --- Admin accounts ---

    async fn find_admin(&self, username: &str) -> Result<Option<Admin>, StoreError>;

    /// `Conflict` if the username is taken.
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin, StoreError>;

    async fn count_admins(&self) -> Result<i64, StoreError>;

    // --- Lifecycle ---

    async fn health_check(&self) -> Result<(), StoreError>;
}
