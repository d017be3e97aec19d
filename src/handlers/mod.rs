pub mod admin;
pub mod hotels;
pub mod public;
