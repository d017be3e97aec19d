pub mod auth;

pub use auth::{access_guard, bearer_token, AuthContext};
