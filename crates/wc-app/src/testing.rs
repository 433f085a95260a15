//! In-memory port implementations for use-case tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncReadExt;

use wc_core::ports::*;
use wc_core::{
    ClipboardItem, ItemId, NewUser, PasswordHash, StorageLocator, TokenClaims, TokenError, User,
    UserId, Username,
};

use crate::{App, AppDeps, AuthSettings};

pub struct FakeClock(AtomicI64);

impl FakeClock {
    pub fn at_ms(ms: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(ms)))
    }

    pub fn advance(&self, by: Duration) {
        self.0.fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }

    pub fn set_ms(&self, ms: i64) {
        self.0.store(ms, Ordering::SeqCst);
    }
}

impl ClockPort for FakeClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Reversible stand-in for argon2; only the format matters to use cases.
pub struct FakeHasher;

impl PasswordHasherPort for FakeHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let encoded = format!("$argon2id$v=19$m=8,t=1,p=1$c2FsdA${}x", plaintext.len());
        let encoded = format!("{encoded}{}", reverse(plaintext));
        PasswordHash::parse(encoded).ok_or_else(|| PasswordHashError("bad format".into()))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> bool {
        self.hash(candidate)
            .map(|h| h.as_str() == hash.as_str())
            .unwrap_or(false)
    }
}

fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// `secret|sub|iat|exp`; anything else is malformed.
pub struct FakeCodec {
    pub secret: String,
}

impl TokenCodecPort for FakeCodec {
    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        Ok(format!(
            "{}|{}|{}|{}",
            self.secret, claims.sub, claims.iat, claims.exp
        ))
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let parts: Vec<&str> = token.split('|').collect();
        let [secret, sub, iat, exp] = parts.as_slice() else {
            return Err(TokenError::Malformed);
        };
        if *secret != self.secret {
            return Err(TokenError::BadSignature);
        }
        Ok(TokenClaims {
            sub: sub.to_string(),
            iat: iat.parse().map_err(|_| TokenError::Malformed)?,
            exp: exp.parse().map_err(|_| TokenError::Malformed)?,
        })
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn remove(&self, id: UserId) {
        self.rows.lock().unwrap().retain(|u| u.id != id);
    }

    pub fn stored(&self, username: &str) -> Option<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned()
    }
}

#[async_trait]
impl UserRepositoryPort for InMemoryUsers {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict);
        }
        let stored = User {
            id: UserId::new(rows.len() as i64 + 1),
            username: user.username,
            password_hash: user.password_hash,
            created_at_ms: user.created_at_ms,
            updated_at_ms: user.created_at_ms,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryItems {
    rows: Mutex<Vec<ClipboardItem>>,
}

impl InMemoryItems {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn push_raw(&self, item: ClipboardItem) {
        self.rows.lock().unwrap().push(item);
    }
}

#[async_trait]
impl ClipboardItemRepositoryPort for InMemoryItems {
    async fn insert(&self, item: &ClipboardItem) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<ClipboardItem>, RepositoryError> {
        let mut items: Vec<ClipboardItem> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.owner == owner)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.created_at_ms
                .cmp(&a.created_at_ms)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(items)
    }

    async fn latest_by_owner(&self, owner: UserId) -> Result<Option<ClipboardItem>, RepositoryError> {
        Ok(self.list_by_owner(owner).await?.into_iter().next())
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<ClipboardItem>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|i| &i.id == id).cloned())
    }

    async fn delete_owned(&self, id: &ItemId, owner: UserId) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|i| !(&i.id == id && i.owner == owner));
        Ok(rows.len() != before)
    }
}

pub struct InMemoryBlobs {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    limit_bytes: u64,
    pub fail_remove: bool,
}

impl InMemoryBlobs {
    pub fn with_limit(limit_bytes: u64) -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            limit_bytes,
            fail_remove: false,
        }
    }

    pub fn contains(&self, locator: &StorageLocator) -> bool {
        self.blobs.lock().unwrap().contains_key(locator.as_str())
    }

    pub fn count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

impl Default for InMemoryBlobs {
    fn default() -> Self {
        Self::with_limit(1024 * 1024)
    }
}

#[async_trait]
impl BlobStorePort for InMemoryBlobs {
    async fn store(
        &self,
        source: BlobSource<'_>,
        suggested_name: &str,
    ) -> Result<StorageLocator, BlobStoreError> {
        let mut bytes = Vec::new();
        source
            .take(self.limit_bytes + 1)
            .read_to_end(&mut bytes)
            .await?;
        if bytes.len() as u64 > self.limit_bytes {
            return Err(BlobStoreError::TooLarge {
                limit_bytes: self.limit_bytes,
            });
        }
        let locator = format!("{}-{suggested_name}", ItemId::new());
        self.blobs.lock().unwrap().insert(locator.clone(), bytes);
        Ok(StorageLocator::new(locator))
    }

    async fn open(&self, locator: &StorageLocator) -> Result<OpenedBlob, BlobStoreError> {
        let bytes = self
            .blobs
            .lock()
            .unwrap()
            .get(locator.as_str())
            .cloned()
            .ok_or(BlobStoreError::NotFound)?;
        Ok(OpenedBlob {
            size_bytes: bytes.len() as u64,
            reader: Box::pin(std::io::Cursor::new(bytes)),
        })
    }

    async fn remove(&self, locator: &StorageLocator) -> Result<(), BlobStoreError> {
        if self.fail_remove {
            return Err(BlobStoreError::Io(std::io::Error::other("disk on fire")));
        }
        self.blobs
            .lock()
            .unwrap()
            .remove(locator.as_str())
            .map(|_| ())
            .ok_or(BlobStoreError::NotFound)
    }
}

pub struct Harness {
    pub app: App,
    pub users: Arc<InMemoryUsers>,
    pub items: Arc<InMemoryItems>,
    pub blobs: Arc<InMemoryBlobs>,
    pub clock: Arc<FakeClock>,
}

pub fn harness(registration_enabled: bool) -> Harness {
    harness_with_blobs(registration_enabled, InMemoryBlobs::default())
}

pub fn harness_with_blobs(registration_enabled: bool, blobs: InMemoryBlobs) -> Harness {
    let users = Arc::new(InMemoryUsers::default());
    let items = Arc::new(InMemoryItems::default());
    let blobs = Arc::new(blobs);
    let clock = FakeClock::at_ms(1_700_000_000_000);
    let deps = AppDeps {
        users: users.clone(),
        items: items.clone(),
        blobs: blobs.clone(),
        hasher: Arc::new(FakeHasher),
        token_codec: Arc::new(FakeCodec {
            secret: "test-secret".into(),
        }),
        clock: clock.clone(),
    };
    let app = App::new(
        deps,
        AuthSettings {
            token_ttl: Duration::from_secs(24 * 3600),
            registration_enabled,
        },
    );
    Harness {
        app,
        users,
        items,
        blobs,
        clock,
    }
}
