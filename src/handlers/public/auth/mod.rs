pub mod check_user;
pub mod login;
pub mod register;
pub mod validate;

pub use check_user::check_user_get;
pub use login::login_post;
pub use register::register_post;
pub use validate::validate_get;
