// Service exports
pub mod auth;
pub mod bootstrap;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod store;

pub use auth::{AdminClaims, AuthError, AuthService};
pub use bootstrap::{bootstrap, BootstrapError, BootstrapReport};
pub use cache::FaqCache;
pub use memory::MemoryStore;
pub use postgres::PostgresClient;
pub use store::{FaqStore, StoreError};
