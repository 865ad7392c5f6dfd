//! Client session: current user and token mirrored into durable storage.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::error::AppError;
use crate::permission::{can_access, Page};
use crate::user::{LoginRequest, LoginResponse, UserRecord};

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "user";

/// Key/value persistence for the session (browser `localStorage` in the app).
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-process storage, used off the browser and in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Anything that can check credentials.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError>;
}

/// Token used when the backend authenticates without issuing one.
pub fn fabricated_token(now: DateTime<Utc>) -> String {
    format!("auth_{}", now.timestamp_millis())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    user: Option<UserRecord>,
    token: Option<String>,
    loading: bool,
}

impl<S: SessionStorage> SessionStore<S> {
    /// A fresh store stays in the loading state until [`restore`](Self::restore) runs.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            user: None,
            token: None,
            loading: true,
        }
    }

    /// Reload the session from storage. Partial or corrupt entries are wiped.
    pub fn restore(&mut self) {
        let token = self.storage.get(TOKEN_KEY);
        let user = self
            .storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<UserRecord>(&raw).ok());
        match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => {
                self.token = Some(token);
                self.user = Some(user);
            }
            _ => self.clear(),
        }
        self.loading = false;
    }

    /// Apply a login response. Only the exact success shape authenticates.
    pub fn complete_login(&mut self, response: &LoginResponse, now: DateTime<Utc>) -> bool {
        let Some(user) = response.authenticated_user() else {
            return false;
        };
        let Ok(user_json) = serde_json::to_string(user) else {
            return false;
        };
        let token = response
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| fabricated_token(now));

        self.storage.set(TOKEN_KEY, &token);
        self.storage.set(USER_KEY, &user_json);
        self.token = Some(token);
        self.user = Some(user.clone());
        self.loading = false;
        true
    }

    /// Authenticate against `backend`. `Ok(false)` means the credentials
    /// were rejected; transport failures come back as `Err`.
    pub async fn login<B: AuthBackend>(
        &mut self,
        backend: &B,
        username: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        let request = LoginRequest {
            user_name: username.to_string(),
            password: password.to_string(),
        };
        let response = backend.login(&request).await?;
        Ok(self.complete_login(&response, Utc::now()))
    }

    pub fn logout(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.token = None;
        self.user = None;
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_access(&self, page: Page) -> bool {
        can_access(self.user(), page)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{Permissions, Role, LOGIN_SUCCESS_MESSAGE};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn admin() -> UserRecord {
        UserRecord {
            id: "1".into(),
            user_name: "admin".into(),
            user_role: Role::Admin,
            permissions: Permissions::default(),
        }
    }

    fn success(token: Option<&str>) -> LoginResponse {
        LoginResponse {
            message: LOGIN_SUCCESS_MESSAGE.into(),
            user: Some(admin()),
            token: token.map(Into::into),
        }
    }

    struct FixedBackend(Result<LoginResponse, AppError>);

    impl AuthBackend for FixedBackend {
        async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, AppError> {
            self.0.clone()
        }
    }

    #[test]
    fn new_store_is_loading_and_anonymous() {
        let store = SessionStore::new(MemoryStorage::new());
        assert!(store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn restore_with_both_keys_authenticates() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok");
        storage.set(USER_KEY, &serde_json::to_string(&admin()).unwrap());
        let mut store = SessionStore::new(storage);
        store.restore();
        assert!(!store.is_loading());
        assert_eq!(store.user(), Some(&admin()));
        assert_eq!(store.token(), Some("tok"));
    }

    #[test]
    fn restore_with_corrupt_user_clears_both_keys() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok");
        storage.set(USER_KEY, "{not json");
        let mut store = SessionStore::new(storage);
        store.restore();
        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn restore_with_only_one_key_clears() {
        let mut storage = MemoryStorage::new();
        storage.set(USER_KEY, &serde_json::to_string(&admin()).unwrap());
        let mut store = SessionStore::new(storage);
        store.restore();
        assert!(!store.is_authenticated());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn complete_login_keeps_server_token() {
        let mut store = SessionStore::new(MemoryStorage::new());
        assert!(store.complete_login(&success(Some("server-token")), Utc::now()));
        assert_eq!(store.storage().get(TOKEN_KEY).as_deref(), Some("server-token"));
        let stored: UserRecord =
            serde_json::from_str(&store.storage().get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, admin());
    }

    #[test]
    fn complete_login_fabricates_token() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut store = SessionStore::new(MemoryStorage::new());
        assert!(store.complete_login(&success(None), now));
        assert_eq!(store.token(), Some("auth_1700000000123"));
    }

    #[test]
    fn wrong_message_is_not_a_login() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let response = LoginResponse {
            message: "Invalid credentials".into(),
            ..success(Some("t"))
        };
        assert!(!store.complete_login(&response, Utc::now()));
        assert!(store.storage().is_empty());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn logout_clears_everything() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.complete_login(&success(Some("t")), Utc::now());
        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
        assert!(store.storage().is_empty());
        assert!(!store.can_access(Page::Home));
    }

    #[tokio::test]
    async fn login_through_backend() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let ok = FixedBackend(Ok(success(Some("t"))));
        assert_eq!(store.login(&ok, "admin", "pw").await, Ok(true));
        assert!(store.can_access(Page::UserList));

        let mut other = SessionStore::new(MemoryStorage::new());
        let rejected = FixedBackend(Ok(LoginResponse::default()));
        assert_eq!(other.login(&rejected, "admin", "bad").await, Ok(false));

        let down = FixedBackend(Err(AppError::upstream("connection refused")));
        let err = other.login(&down, "admin", "pw").await.unwrap_err();
        assert!(err.is_transport());
        assert!(!other.is_authenticated());
    }
}
