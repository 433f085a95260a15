//! # wc-app
//!
//! Application layer for weicopy. Every operation a client can trigger is a
//! use case here, wired against the ports declared in `wc-core`.

pub mod deps;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;

pub use deps::{AppDeps, AuthSettings};
pub use usecases::{
    AccessError, AccessGate, ContentError, ContentStore, CredentialError, CredentialStore, Login,
    LoginError, LoginOutcome, RegisterUser, RegistrationError, TokenService, UploadRequest,
};

use std::sync::Arc;

/// All use cases, constructed once at startup and shared by the transport.
/// 所有用例，在启动时构造一次，由传输层共享。
#[derive(Clone)]
pub struct App {
    pub credentials: Arc<CredentialStore>,
    pub tokens: Arc<TokenService>,
    pub access_gate: Arc<AccessGate>,
    pub content: Arc<ContentStore>,
    pub register: Arc<RegisterUser>,
    pub login: Arc<Login>,
}

impl App {
    pub fn new(deps: AppDeps, settings: AuthSettings) -> Self {
        let credentials = Arc::new(CredentialStore::from_ports(
            deps.users,
            deps.hasher,
            deps.clock.clone(),
        ));
        let tokens = Arc::new(TokenService::new(
            deps.token_codec,
            deps.clock.clone(),
            settings.token_ttl,
        ));
        let access_gate = Arc::new(AccessGate::new(tokens.clone(), credentials.clone()));
        let content = Arc::new(ContentStore::from_ports(deps.items, deps.blobs, deps.clock));
        let register = Arc::new(RegisterUser::new(
            credentials.clone(),
            settings.registration_enabled,
        ));
        let login = Arc::new(Login::new(credentials.clone(), tokens.clone()));

        Self {
            credentials,
            tokens,
            access_gate,
            content,
            register,
            login,
        }
    }
}
