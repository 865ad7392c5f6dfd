//! Access to the case REST backend.
//!
//! [`HttpBackend`] talks to the real service; [`DemoBackend`] keeps everything
//! in memory and is selected by the `demo` feature flag. Server functions go
//! through [`backend()`], which picks one at first use.

pub mod demo;
pub mod http;

pub use demo::DemoBackend;
pub use http::HttpBackend;

use shared_types::{
    AppError, AuthBackend, CaseDraft, CaseRecord, ChartDatum, LoginRequest, LoginResponse,
    NewUser, UserRecord, UserUpdate,
};
use std::sync::OnceLock;

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "auth/api/login";
    pub const REGISTER: &str = "auth/api/register";
    pub const USERS: &str = "auth/api/getallusers";
    pub const UPDATE_USER: &str = "auth/api/updateuser";
    pub const DELETE_USER: &str = "auth/api/deleteuser";
    pub const CREATE_CASE: &str = "auth/data/newdata";
    pub const CASES: &str = "auth/data/getdata";
    pub const UPDATE_CASE: &str = "auth/data/update";
    pub const DELETE_CASE: &str = "auth/data/delete";
    pub const CRIME_TYPE_COUNT: &str = "auth/data/crimetypecount";
    pub const CASE_COUNT: &str = "auth/data/casecount";
}

/// Message shown after a successful registration when the backend sends none.
pub const REGISTERED_MESSAGE: &str = "User registered successfully";

/// Every operation the dashboard needs from the backend.
#[allow(async_fn_in_trait)]
pub trait CaseBackend: AuthBackend {
    /// Returns the backend's confirmation message.
    async fn register(&self, user: &NewUser) -> Result<String, AppError>;
    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError>;
    async fn update_user(&self, update: &UserUpdate) -> Result<(), AppError>;
    async fn delete_user(&self, id: &str) -> Result<(), AppError>;

    /// `None` when the backend accepted the case without echoing it back.
    async fn create_case(&self, draft: &CaseDraft) -> Result<Option<CaseRecord>, AppError>;
    async fn list_cases(&self) -> Result<Vec<CaseRecord>, AppError>;
    async fn update_case(&self, id: &str, draft: &CaseDraft) -> Result<CaseRecord, AppError>;
    async fn delete_case(&self, id: &str) -> Result<(), AppError>;
    async fn crime_type_counts(&self) -> Result<Vec<ChartDatum>, AppError>;
    async fn case_count(&self) -> Result<Option<u64>, AppError>;
}

/// The backend chosen at startup.
pub enum Backend {
    Http(HttpBackend),
    Demo(DemoBackend),
}

static BACKEND: OnceLock<Backend> = OnceLock::new();

/// The process-wide backend, selected from config on first call.
pub fn backend() -> &'static Backend {
    BACKEND.get_or_init(|| {
        let config = crate::config::load_config();
        if config.features.demo {
            tracing::info!("Demo mode enabled, serving cases from memory");
            Backend::Demo(DemoBackend::new())
        } else {
            tracing::info!(base_url = %config.backend.base_url, "Using REST backend");
            Backend::Http(HttpBackend::new(config.backend.clone()))
        }
    })
}

impl Backend {
    /// Short label for health reporting.
    pub fn mode(&self) -> &'static str {
        match self {
            Backend::Http(_) => "http",
            Backend::Demo(_) => "demo",
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $b:ident => $call:expr) => {
        match $self {
            Backend::Http($b) => $call,
            Backend::Demo($b) => $call,
        }
    };
}

impl AuthBackend for Backend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        dispatch!(self, b => b.login(request).await)
    }
}

impl CaseBackend for Backend {
    async fn register(&self, user: &NewUser) -> Result<String, AppError> {
        dispatch!(self, b => b.register(user).await)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        dispatch!(self, b => b.list_users().await)
    }

    async fn update_user(&self, update: &UserUpdate) -> Result<(), AppError> {
        dispatch!(self, b => b.update_user(update).await)
    }

    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        dispatch!(self, b => b.delete_user(id).await)
    }

    async fn create_case(&self, draft: &CaseDraft) -> Result<Option<CaseRecord>, AppError> {
        dispatch!(self, b => b.create_case(draft).await)
    }

    async fn list_cases(&self) -> Result<Vec<CaseRecord>, AppError> {
        dispatch!(self, b => b.list_cases().await)
    }

    async fn update_case(&self, id: &str, draft: &CaseDraft) -> Result<CaseRecord, AppError> {
        dispatch!(self, b => b.update_case(id, draft).await)
    }

    async fn delete_case(&self, id: &str) -> Result<(), AppError> {
        dispatch!(self, b => b.delete_case(id).await)
    }

    async fn crime_type_counts(&self) -> Result<Vec<ChartDatum>, AppError> {
        dispatch!(self, b => b.crime_type_counts().await)
    }

    async fn case_count(&self) -> Result<Option<u64>, AppError> {
        dispatch!(self, b => b.case_count().await)
    }
}
