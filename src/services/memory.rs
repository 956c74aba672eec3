use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::store::{FaqStore, StoreError};
use crate::models::{Admin, Faq};

#[derive(Debug, Default)]
struct Tables {
    faqs: BTreeMap<i64, Faq>,
    admins: Vec<Admin>,
    next_faq_id: i64,
    next_admin_id: i64,
}

/// In-process store
///
/// Used when `database.url = "memory"` and by the HTTP tests. Ids are
/// assigned like a serial column: increasing, never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `(question, answer)` pairs, ids starting at 1
    pub async fn with_faqs<'a, I>(faqs: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let store = Self::new();
        for (question, answer) in faqs {
            store.create_faq(question, answer).await?;
        }
        Ok(store)
    }
}

#[async_trait]
impl FaqStore for MemoryStore {
    async fn list_faqs(&self) -> Result<Vec<Faq>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.faqs.values().cloned().collect())
    }

    async fn get_faq(&self, id: i64) -> Result<Option<Faq>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.faqs.get(&id).cloned())
    }

    async fn create_faq(&self, question: &str, answer: &str) -> Result<Faq, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_faq_id += 1;
        let faq = Faq::new(tables.next_faq_id, question, answer);
        tables.faqs.insert(faq.id, faq.clone());
        Ok(faq)
    }

    async fn update_faq(&self, id: i64, question: &str, answer: &str) -> Result<Faq, StoreError> {
        let mut tables = self.tables.write().await;
        let faq = tables
            .faqs
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("faq {}", id)))?;

        faq.question = question.to_string();
        faq.answer = answer.to_string();
        faq.updated_at = Utc::now();

        Ok(faq.clone())
    }

    async fn delete_faq(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .faqs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("faq {}", id)))
    }

    async fn count_faqs(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.faqs.len() as i64)
    }

    async fn find_admin(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.username == username).cloned())
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.admins.iter().any(|a| a.username == username) {
            return Err(StoreError::Conflict(format!("admin {} already exists", username)));
        }

        tables.next_admin_id += 1;
        let admin = Admin {
            id: tables.next_admin_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.admins.push(admin.clone());
        Ok(admin)
    }

    async fn count_admins(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.admins.len() as i64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
