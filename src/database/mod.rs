pub mod manager;
pub mod memory;
pub mod models;
pub mod store;

pub use memory::MemoryAccountStore;
pub use store::{AccountStore, PgAccountStore, StoreError};
