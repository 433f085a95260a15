use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use wc_core::ports::{ClockPort, TokenCodecPort};
use wc_core::{TokenClaims, TokenError, UserId};

/// Mints and verifies bearer tokens. Holds no state besides the codec (which
/// owns the signing secret) and the expiry policy.
pub struct TokenService {
    codec: Arc<dyn TokenCodecPort>,
    clock: Arc<dyn ClockPort>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(codec: Arc<dyn TokenCodecPort>, clock: Arc<dyn ClockPort>, ttl: Duration) -> Self {
        Self { codec, clock, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[tracing::instrument(name = "usecase.token_service.issue", skip(self), fields(user_id = %user))]
    pub fn issue(&self, user: UserId) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims::new(user, self.clock.now_secs(), ttl_secs);
        self.codec.sign(&claims)
    }

    /// Resolves a token to the user it was issued for.
    ///
    /// The returned error kind is meant for logging; transports collapse all
    /// of them into one generic rejection.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let result = self.codec.decode(token).and_then(|claims| {
            if claims.is_expired_at(self.clock.now_secs()) {
                return Err(TokenError::Expired);
            }
            claims.subject()
        });

        if let Err(err) = &result {
            debug!(reason = %err, "Token rejected");
        }
        result
    }
}
