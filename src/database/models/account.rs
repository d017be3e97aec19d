use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. Closed set: the bootstrap rule is the only path that
/// ever produces `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    pub fn from_str(s: &str) -> Option<Role> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted partner account. The password hash stays inside the crate;
/// outward responses go through `AccountView`, which has no hash field.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub contact_number: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub concerning_person: String,
    pub website: Option<String>,
    pub role: Role,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate account handed to the store. Password is already hashed by
/// the time this exists; role/approved are decided by the store's
/// bootstrap logic at insert time.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub contact_number: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub concerning_person: String,
    pub website: Option<String>,
}

/// Role and approval assignment for a new account. Applied atomically by
/// each store implementation: the first account ever created becomes an
/// auto-approved admin, everyone after that waits in the approval queue.
pub fn bootstrap_assignment(existing_accounts: u64) -> (Role, bool) {
    if existing_accounts == 0 {
        (Role::Admin, true)
    } else {
        (Role::User, false)
    }
}

/// Client-facing projection of an account.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub contact_number: String,
    pub mobile_number: String,
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub concerning_person: String,
    pub website: Option<String>,
    pub role: Role,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            contact_number: account.contact_number.clone(),
            mobile_number: account.mobile_number.clone(),
            company_name: account.company_name.clone(),
            address: account.address.clone(),
            city: account.city.clone(),
            state: account.state.clone(),
            concerning_person: account.concerning_person.clone(),
            website: account.website.clone(),
            role: account.role,
            approved: account.approved,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        assert_eq!(Role::from_str("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_str("USER"), Some(Role::User));
        assert_eq!(Role::from_str("ROLE_ADMIN"), None);
        assert_eq!(Role::Admin.as_str(), "ADMIN");
    }

    #[test]
    fn first_account_bootstraps_as_admin() {
        assert_eq!(bootstrap_assignment(0), (Role::Admin, true));
        assert_eq!(bootstrap_assignment(1), (Role::User, false));
        assert_eq!(bootstrap_assignment(42), (Role::User, false));
    }

    #[test]
    fn account_view_carries_no_hash() {
        let view = AccountView {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            contact_number: "1".into(),
            mobile_number: "2".into(),
            company_name: "Acme".into(),
            address: "1 Main St".into(),
            city: "Pune".into(),
            state: "MH".into(),
            concerning_person: "Alice".into(),
            website: None,
            role: Role::User,
            approved: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "USER");
    }
}
