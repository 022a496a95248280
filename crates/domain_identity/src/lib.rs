//! Identity Domain
//!
//! User accounts for CampusFind: registration, institutional-email
//! verification, password hashing, and credential checks. Token issuance
//! lives in the API layer; this crate only answers "who is this".

pub mod user;
pub mod policy;
pub mod password;
pub mod ports;
pub mod service;
pub mod error;

pub use user::{User, NewUser, UserCredentials, Registration};
pub use policy::AccountPolicy;
pub use ports::UserStore;
pub use service::AccountService;
pub use error::IdentityError;
