use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::password::{self, PasswordError};
use crate::config::SecurityConfig;
use crate::database::models::Role;
use crate::database::store::{AccountStore, StoreError};

/// An identity usable for an authentication decision, wherever it came
/// from. Both the configured emergency admin and store-backed accounts
/// flatten into this shape.
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub subject: String,
    pub role: Role,
    pub approved: bool,
    pub password_hash: String,
}

/// One source of identities. Resolvers are tried in priority order; the
/// first one that knows the username wins.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, username: &str) -> Result<Option<ResolvedIdentity>, StoreError>;
}

/// Configuration-supplied emergency superuser. Sits ahead of the store in
/// the resolver chain, so it works even with an empty or unreachable
/// account table. The static credential is argon2-hashed at construction;
/// the plaintext is dropped immediately.
pub struct BootstrapAdminResolver {
    username: String,
    password_hash: String,
}

impl BootstrapAdminResolver {
    pub fn new(username: &str, password: &str) -> Result<Self, PasswordError> {
        Ok(Self {
            username: username.to_string(),
            password_hash: password::hash(password)?,
        })
    }

    /// Build from config. Returns `None` when the identity is disabled
    /// (empty username or password).
    pub fn from_config(security: &SecurityConfig) -> Result<Option<Self>, PasswordError> {
        if security.bootstrap_admin_username.is_empty()
            || security.bootstrap_admin_password.is_empty()
        {
            return Ok(None);
        }
        Self::new(
            &security.bootstrap_admin_username,
            &security.bootstrap_admin_password,
        )
        .map(Some)
    }
}

#[async_trait]
impl IdentityResolver for BootstrapAdminResolver {
    async fn resolve(&self, username: &str) -> Result<Option<ResolvedIdentity>, StoreError> {
        if username != self.username {
            return Ok(None);
        }
        Ok(Some(ResolvedIdentity {
            subject: self.username.clone(),
            role: Role::Admin,
            approved: true,
            password_hash: self.password_hash.clone(),
        }))
    }
}

/// Store-backed identities: everyone who registered through the API.
pub struct StoreResolver {
    store: Arc<dyn AccountStore>,
}

impl StoreResolver {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdentityResolver for StoreResolver {
    async fn resolve(&self, username: &str) -> Result<Option<ResolvedIdentity>, StoreError> {
        let account = self.store.find_by_username(username).await?;
        Ok(account.map(|a| ResolvedIdentity {
            subject: a.username,
            role: a.role,
            approved: a.approved,
            password_hash: a.password_hash,
        }))
    }
}
