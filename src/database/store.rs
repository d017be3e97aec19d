use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{bootstrap_assignment, Account, NewAccount, Role};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Account not found")]
    NotFound,

    #[error("Corrupt account row: unknown role '{0}'")]
    UnknownRole(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence contract for partner accounts.
///
/// `create` owns the bootstrap decision: implementations must decide
/// role/approval and insert in one atomic step so two concurrent first
/// registrations can never both become admin.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(&self, new: NewAccount) -> Result<Account, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;
    async fn find_all(&self) -> Result<Vec<Account>, StoreError>;
    async fn find_pending(&self) -> Result<Vec<Account>, StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
    /// Returns the updated account. Setting an already-set flag is a no-op.
    async fn set_approved(&self, id: Uuid, approved: bool) -> Result<Account, StoreError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}

const ACCOUNT_COLUMNS: &str = "id, username, email, contact_number, mobile_number, \
     password_hash, company_name, address, city, state, concerning_person, website, \
     role, approved, created_at, updated_at";

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    contact_number: String,
    mobile_number: String,
    password_hash: String,
    company_name: String,
    address: String,
    city: String,
    state: String,
    concerning_person: String,
    website: Option<String>,
    role: String,
    approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, StoreError> {
        let role = Role::from_str(&row.role).ok_or(StoreError::UnknownRole(row.role))?;
        Ok(Account {
            id: row.id,
            username: row.username,
            email: row.email,
            contact_number: row.contact_number,
            mobile_number: row.mobile_number,
            password_hash: row.password_hash,
            company_name: row.company_name,
            address: row.address,
            city: row.city,
            state: row.state,
            concerning_person: row.concerning_person,
            website: row.website,
            role,
            approved: row.approved,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed account store. Uniqueness lives in the table's UNIQUE
/// constraints; raced duplicate inserts surface as `Conflict`.
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent schema setup, run once at startup.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS accounts (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                contact_number TEXT NOT NULL UNIQUE,
                mobile_number TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                company_name TEXT NOT NULL,
                address TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                concerning_person TEXT NOT NULL,
                website TEXT,
                role TEXT NOT NULL,
                approved BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn fetch_optional(&self, column: &str, value: &str) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Account::try_from).transpose()
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let constraint = db.constraint().unwrap_or("unique field").to_string();
            return StoreError::Conflict(constraint);
        }
    }
    StoreError::Sqlx(err)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, new: NewAccount) -> Result<Account, StoreError> {
        let mut tx = self.pool.begin().await?;

        // The count-then-insert pair must be atomic or two concurrent first
        // registrations could both observe an empty table and both claim the
        // admin bootstrap. Registrations are rare; an exclusive lock is fine.
        sqlx::query("LOCK TABLE accounts IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&mut *tx)
            .await?;
        let (role, approved) = bootstrap_assignment(count as u64);

        let sql = format!(
            "INSERT INTO accounts (id, username, email, contact_number, mobile_number, \
             password_hash, company_name, address, city, state, concerning_person, website, \
             role, approved) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.username)
            .bind(&new.email)
            .bind(&new.contact_number)
            .bind(&new.mobile_number)
            .bind(&new.password_hash)
            .bind(&new.company_name)
            .bind(&new.address)
            .bind(&new.city)
            .bind(&new.state)
            .bind(&new.concerning_person)
            .bind(&new.website)
            .bind(role.as_str())
            .bind(approved)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_insert_error)?;

        tx.commit().await?;
        Account::try_from(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Account::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        self.fetch_optional("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.fetch_optional("email", email).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at");
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Account::try_from).collect()
    }

    async fn find_pending(&self) -> Result<Vec<Account>, StoreError> {
        let sql =
            format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE approved = FALSE ORDER BY created_at");
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Account::try_from).collect()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> Result<Account, StoreError> {
        let sql = format!(
            "UPDATE accounts SET approved = $2, updated_at = now() WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .bind(approved)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Account::try_from)
            .transpose()?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
