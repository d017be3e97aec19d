pub mod password;
pub mod policy;
pub mod resolver;
pub mod service;
pub mod token;

pub use policy::{Capability, PolicyTable};
pub use resolver::{BootstrapAdminResolver, IdentityResolver, ResolvedIdentity, StoreResolver};
pub use service::{AuthError, AuthService, Registration};
pub use token::{generate_jwt, validate_jwt, Claims, JwtError};
