use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{self, PasswordError};
use crate::auth::resolver::{
    BootstrapAdminResolver, IdentityResolver, ResolvedIdentity, StoreResolver,
};
use crate::auth::token::JwtError;
use crate::database::models::{Account, NewAccount};
use crate::database::store::{AccountStore, StoreError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account pending approval")]
    NotApproved,

    #[error("Account not found")]
    NotFound,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Candidate registration as submitted by the client, plaintext password
/// included. The password leaves this struct only as an argon2 hash.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub contact_number: String,
    pub mobile_number: String,
    pub password: String,
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub concerning_person: String,
    pub website: Option<String>,
}

/// Registration, authentication decisions and the approval workflow.
///
/// Identity lookups go through a priority-ordered resolver chain: the
/// configured emergency admin first (when enabled), then the account
/// store. Authentication and per-request role resolution share the chain
/// so the two paths can never drift apart.
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    resolvers: Vec<Arc<dyn IdentityResolver>>,
}

impl AuthService {
    pub fn new(store: Arc<dyn AccountStore>, sentinel: Option<BootstrapAdminResolver>) -> Self {
        let mut resolvers: Vec<Arc<dyn IdentityResolver>> = Vec::new();
        if let Some(sentinel) = sentinel {
            resolvers.push(Arc::new(sentinel));
        }
        resolvers.push(Arc::new(StoreResolver::new(store.clone())));
        Self { store, resolvers }
    }

    /// Register a new partner account. The store decides role/approval
    /// atomically at insert time: first account ever becomes an
    /// auto-approved admin, everyone else waits for approval.
    pub async fn register(&self, registration: Registration) -> Result<Account, AuthError> {
        if self.store.exists_by_email(&registration.email).await? {
            return Err(AuthError::DuplicateIdentity("email".to_string()));
        }
        if self.store.exists_by_username(&registration.username).await? {
            return Err(AuthError::DuplicateIdentity("username".to_string()));
        }

        let password_hash = password::hash_blocking(registration.password).await?;

        let account = self
            .store
            .create(NewAccount {
                username: registration.username,
                email: registration.email,
                contact_number: registration.contact_number,
                mobile_number: registration.mobile_number,
                password_hash,
                company_name: registration.company_name,
                address: registration.address,
                city: registration.city,
                state: registration.state,
                concerning_person: registration.concerning_person,
                website: registration.website,
            })
            .await
            .map_err(|e| match e {
                // A raced duplicate slipped past the pre-checks and hit the
                // storage constraint instead
                StoreError::Conflict(field) => AuthError::DuplicateIdentity(field),
                other => AuthError::Store(other),
            })?;

        info!(
            username = %account.username,
            role = %account.role,
            approved = account.approved,
            "Registered new account"
        );
        Ok(account)
    }

    /// Verify credentials and the approval gate. Unknown username, wrong
    /// password and a pending account are logged with distinct reasons but
    /// all surface identically at the HTTP boundary.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ResolvedIdentity, AuthError> {
        let Some(identity) = self.resolve_subject(username).await? else {
            warn!(username, "Authentication failed: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        let matches =
            password::verify_blocking(password.to_string(), identity.password_hash.clone()).await?;
        if !matches {
            warn!(username, "Authentication failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        // Approval gate: admins always pass, everyone else must be approved
        if identity.role != crate::database::models::Role::Admin && !identity.approved {
            warn!(username, "Authentication refused: account pending approval");
            return Err(AuthError::NotApproved);
        }

        info!(username, role = %identity.role, "Authentication successful");
        Ok(identity)
    }

    /// Resolve a subject through the chain without a credential check.
    /// Used by the request guard to re-read the current role on every
    /// request, so a rejection or deletion takes effect immediately.
    pub async fn resolve_subject(
        &self,
        username: &str,
    ) -> Result<Option<ResolvedIdentity>, AuthError> {
        for resolver in &self.resolvers {
            if let Some(identity) = resolver.resolve(username).await? {
                return Ok(Some(identity));
            }
        }
        Ok(None)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self.store.exists_by_username(username).await?)
    }

    pub async fn pending_accounts(&self) -> Result<Vec<Account>, AuthError> {
        Ok(self.store.find_pending().await?)
    }

    /// Approve a pending account. Idempotent: approving an already
    /// approved account is a no-op success.
    pub async fn approve(&self, id: Uuid) -> Result<Account, AuthError> {
        let account = self.store.set_approved(id, true).await.map_err(|e| match e {
            StoreError::NotFound => AuthError::NotFound,
            other => AuthError::Store(other),
        })?;
        info!(username = %account.username, "Account approved");
        Ok(account)
    }

    /// Reject a pending account by deleting it outright. There is no
    /// tombstone; the username and email become available again.
    pub async fn reject(&self, id: Uuid) -> Result<(), AuthError> {
        self.store.delete_by_id(id).await.map_err(|e| match e {
            StoreError::NotFound => AuthError::NotFound,
            other => AuthError::Store(other),
        })?;
        info!(%id, "Account rejected and deleted");
        Ok(())
    }
}
