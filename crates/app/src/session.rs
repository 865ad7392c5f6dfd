use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{
    AppError, AuthBackend, LoginRequest, LoginResponse, Page, SessionStorage, SessionStore,
    UserRecord,
};

/// Session storage backed by `window.localStorage`.
///
/// Outside the browser (server rendering, desktop) there is no
/// `localStorage`, so every read misses and writes are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl SessionStorage for BrowserStorage {
    #[cfg(target_arch = "wasm32")]
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    #[cfg(target_arch = "wasm32")]
    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "localStorage write rejected");
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn remove(&mut self, key: &str) {
        if let Some(storage) = local_storage() {
            if storage.remove_item(key).is_err() {
                tracing::warn!(key, "localStorage remove rejected");
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn set(&mut self, _key: &str, _value: &str) {}

    #[cfg(not(target_arch = "wasm32"))]
    fn remove(&mut self, _key: &str) {}
}

/// Credentials are checked by the `login` server function.
pub struct ServerAuth;

impl AuthBackend for ServerAuth {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        server::api::login(request.user_name.clone(), request.password.clone())
            .await
            .map_err(|e| server_error(&e))
    }
}

/// Recover the structured error from a server function failure.
/// Anything without one (dropped connection, bad gateway) counts as transport.
pub fn server_error(err: &ServerFnError) -> AppError {
    let text = err.to_string();
    AppError::from_server_error(&text).unwrap_or_else(|| AppError::upstream(text))
}

/// Handle to the session provided by the app shell.
#[derive(Clone, Copy, PartialEq)]
pub struct Session {
    store: Signal<SessionStore<BrowserStorage>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            store: Signal::new(SessionStore::new(BrowserStorage)),
        }
    }

    pub fn restore(&mut self) {
        self.store.write().restore();
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.store.read().user().cloned()
    }

    pub fn user_name(&self) -> String {
        self.store
            .read()
            .user()
            .map(|u| u.user_name.clone())
            .unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.read().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.store.read().is_loading()
    }

    pub fn can_access(&self, page: Page) -> bool {
        self.store.read().can_access(page)
    }

    /// Sign in. The signal is only written once the backend has answered,
    /// so no borrow is held across the await.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool, AppError> {
        let mut store = self.store.peek().clone();
        let result = store.login(&ServerAuth, username, password).await;
        if matches!(result, Ok(true)) {
            tracing::info!(user = username, "Signed in");
            self.store.set(store);
        }
        result
    }

    pub fn logout(&mut self) {
        self.store.write().logout();
    }

    /// Stamp used for `updatedAt` on locally merged records.
    pub fn now() -> String {
        shared_types::format::timestamp(Utc::now())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access the session.
pub fn use_session() -> Session {
    use_context::<Session>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_storage_is_inert_off_wasm() {
        let mut storage = BrowserStorage;
        storage.set("authToken", "t");
        assert_eq!(storage.get("authToken"), None);
        storage.remove("authToken");
    }

    #[test]
    fn untagged_server_errors_count_as_transport() {
        let err = server_error(&ServerFnError::new("connection refused"));
        assert!(err.is_transport());
    }

    #[test]
    fn tagged_server_errors_keep_their_kind() {
        let payload = serde_json::to_string(&AppError::unauthorized("Invalid username or password"))
            .unwrap();
        let err = server_error(&ServerFnError::new(payload));
        assert!(!err.is_transport());
        assert_eq!(err.message, "Invalid username or password");
    }
}
