pub mod account;

pub use account::{bootstrap_assignment, Account, AccountView, NewAccount, Role};
