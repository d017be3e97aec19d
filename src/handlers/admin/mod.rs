pub mod approve;
pub mod pending;
pub mod reject;

pub use approve::approve_post;
pub use pending::pending_get;
pub use reject::reject_post;
