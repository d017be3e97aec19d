use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::database::models::{bootstrap_assignment, Account, NewAccount};
use crate::database::store::{AccountStore, StoreError};

/// In-memory account store. Backs the integration tests so the full
/// router can be exercised without a live Postgres; uniqueness and the
/// bootstrap decision happen under one lock, matching the transactional
/// guarantees of the Postgres implementation.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, new: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.lock().unwrap();

        for existing in accounts.iter() {
            if existing.username == new.username {
                return Err(StoreError::Conflict("username".to_string()));
            }
            if existing.email == new.email {
                return Err(StoreError::Conflict("email".to_string()));
            }
            if existing.contact_number == new.contact_number {
                return Err(StoreError::Conflict("contact_number".to_string()));
            }
            if existing.mobile_number == new.mobile_number {
                return Err(StoreError::Conflict("mobile_number".to_string()));
            }
        }

        let (role, approved) = bootstrap_assignment(accounts.len() as u64);
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            contact_number: new.contact_number,
            mobile_number: new.mobile_number,
            password_hash: new.password_hash,
            company_name: new.company_name,
            address: new.address,
            city: new.city,
            state: new.state,
            concerning_person: new.concerning_person,
            website: new.website,
            role,
            approved,
            created_at: now,
            updated_at: now,
        };
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().any(|a| a.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().any(|a| a.email == email))
    }

    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.clone())
    }

    async fn find_pending(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().filter(|a| !a.approved).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.len() as u64)
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;
        account.approved = approved;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        if accounts.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(n: u32) -> NewAccount {
        NewAccount {
            username: format!("user{n}"),
            email: format!("user{n}@example.com"),
            contact_number: format!("100-{n}"),
            mobile_number: format!("200-{n}"),
            password_hash: "$argon2$fake".to_string(),
            company_name: "Acme Travel".to_string(),
            address: "1 Main St".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            concerning_person: "A Person".to_string(),
            website: None,
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = MemoryAccountStore::new();
        store.create(candidate(1)).await.unwrap();

        let mut dup = candidate(2);
        dup.username = "user1".to_string();
        let err = store.create(dup).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(f) if f == "username"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found() {
        let store = MemoryAccountStore::new();
        let account = store.create(candidate(1)).await.unwrap();

        store.delete_by_id(account.id).await.unwrap();
        assert!(store.find_by_id(account.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_by_id(account.id).await,
            Err(StoreError::NotFound)
        ));
    }
}
