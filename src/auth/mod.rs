//! Authentication, roles, and role-scoped data access.

pub mod access;
pub mod password;
pub mod role;
pub mod session;

pub use access::{AccessController, AccessError, RegisterError};
pub use password::{hash_password, verify_password};
pub use role::{Page, Role};
pub use session::{AuthenticatedUser, Session};
