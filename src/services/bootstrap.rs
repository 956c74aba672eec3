use super::auth::{hash_password, AuthError};
use super::store::{FaqStore, StoreError};
use crate::config::AuthSettings;
use thiserror::Error;

/// Sample entries inserted into an empty deployment
pub const SAMPLE_FAQS: [(&str, &str); 3] = [
    (
        "What is OSPOLY?",
        "Osun State Polytechnic, Iree (OSPOLY) is an institution offering ND and HND programmes.",
    ),
    (
        "How can I contact the registrar?",
        "You can contact the Registrar via the official school portal or visit the administrative office during working hours.",
    ),
    (
        "What are the admission requirements?",
        "Requirements vary by programme; typically you need relevant O'level credits and JAMB score as specified by OSPOLY.",
    ),
];

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// What a bootstrap run inserted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub admin_created: bool,
    pub faqs_seeded: usize,
}

/// Seed a default admin and the sample FAQs when their tables are empty
pub async fn bootstrap(store: &dyn FaqStore, auth: &AuthSettings) -> Result<BootstrapReport, BootstrapError> {
    let mut report = BootstrapReport::default();

    if store.count_admins().await? == 0 {
        let password_hash = hash_password(&auth.default_admin_password)?;
        store
            .create_admin(&auth.default_admin_username, &password_hash)
            .await?;
        report.admin_created = true;
        tracing::warn!(
            "Default admin created -> username: {} (change its password before going live)",
            auth.default_admin_username
        );
    }

    if store.count_faqs().await? == 0 {
        for (question, answer) in SAMPLE_FAQS {
            store.create_faq(question, answer).await?;
        }
        report.faqs_seeded = SAMPLE_FAQS.len();
        tracing::info!("Seeded {} sample FAQ entries", report.faqs_seeded);
    }

    Ok(report)
}
