mod access_gate;
mod content_store;
mod credential_store;
mod login;
mod register_user;
mod token_service;

pub use access_gate::{AccessError, AccessGate};
pub use content_store::{BlobRef, ContentError, ContentStore, UploadRequest};
pub use credential_store::{CredentialError, CredentialStore};
pub use login::{Login, LoginError, LoginOutcome};
pub use register_user::{RegisterUser, RegistrationError};
pub use token_service::TokenService;
