use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use shared_types::wire::{
    coerce_case_count, coerce_case_list, coerce_crime_type_counts, coerce_echoed_case,
    coerce_user_list, decode_login_response, error_message,
};
use shared_types::{
    AppError, AuthBackend, BackendConfig, CaseDraft, CaseRecord, ChartDatum, LoginRequest,
    LoginResponse, NewUser, UserRecord, UserUpdate,
};

use super::{endpoints, CaseBackend, REGISTERED_MESSAGE};
use crate::error_convert::{status_to_app_error, ReqwestErrorExt};

/// JSON client for the case REST backend. No timeout is set here.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(BackendConfig {
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// `path/{id}` with the id escaped as a single path segment.
    fn url_with_id(&self, path: &str, id: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| AppError::internal(format!("Invalid backend URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| AppError::internal("Backend URL cannot carry a path"))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Send a request and return the parsed body, mapping non-2xx statuses.
    async fn send(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = request.send().await.map_err(|e| e.into_app_error())?;
        let status = response.status();
        let text = response.text().await.map_err(|e| e.into_app_error())?;
        let body = parse_body(&text);

        if !status.is_success() {
            let err = status_to_app_error(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "Backend call failed");
            return Err(err);
        }
        Ok(body)
    }
}

/// Empty bodies become `null`; non-JSON bodies are kept as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

impl AuthBackend for HttpBackend {
    #[tracing::instrument(skip_all, fields(user = %request.user_name))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let body = self
            .send(self.client.post(self.url(endpoints::LOGIN)).json(request))
            .await?;
        decode_login_response(&body)
            .map_err(|e| AppError::upstream(format!("Unexpected login response: {e}")))
    }
}

impl CaseBackend for HttpBackend {
    #[tracing::instrument(skip_all, fields(user = %user.user_name, role = %user.user_role))]
    async fn register(&self, user: &NewUser) -> Result<String, AppError> {
        let body = self
            .send(self.client.post(self.url(endpoints::REGISTER)).json(user))
            .await?;
        Ok(error_message(&body).unwrap_or_else(|| REGISTERED_MESSAGE.to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        let body = self.send(self.client.get(self.url(endpoints::USERS))).await?;
        Ok(coerce_user_list(&body))
    }

    #[tracing::instrument(skip_all, fields(id = %update.id, updated_by = %update.updated_by))]
    async fn update_user(&self, update: &UserUpdate) -> Result<(), AppError> {
        let url = self.url_with_id(endpoints::UPDATE_USER, &update.id)?;
        self.send(self.client.put(url).json(update)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let url = self.url_with_id(endpoints::DELETE_USER, id)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(cr_no = %draft.cr_no))]
    async fn create_case(&self, draft: &CaseDraft) -> Result<Option<CaseRecord>, AppError> {
        let body = self
            .send(self.client.post(self.url(endpoints::CREATE_CASE)).json(draft))
            .await?;
        let created = coerce_echoed_case(&body);
        if created.is_none() {
            tracing::info!("Backend accepted the case without echoing it");
        }
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    async fn list_cases(&self) -> Result<Vec<CaseRecord>, AppError> {
        let body = self.send(self.client.get(self.url(endpoints::CASES))).await?;
        let cases = coerce_case_list(&body);
        tracing::debug!(count = cases.len(), "Fetched cases");
        Ok(cases)
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update_case(&self, id: &str, draft: &CaseDraft) -> Result<CaseRecord, AppError> {
        let url = self.url_with_id(endpoints::UPDATE_CASE, id)?;
        let body = self.send(self.client.put(url).json(draft)).await?;
        Ok(coerce_echoed_case(&body).unwrap_or_else(|| draft.clone().into_record(id)))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_case(&self, id: &str) -> Result<(), AppError> {
        let url = self.url_with_id(endpoints::DELETE_CASE, id)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn crime_type_counts(&self) -> Result<Vec<ChartDatum>, AppError> {
        let body = self
            .send(self.client.get(self.url(endpoints::CRIME_TYPE_COUNT)))
            .await?;
        Ok(coerce_crime_type_counts(&body))
    }

    #[tracing::instrument(skip(self))]
    async fn case_count(&self) -> Result<Option<u64>, AppError> {
        let body = self.send(self.client.get(self.url(endpoints::CASE_COUNT))).await?;
        Ok(coerce_case_count(&body))
    }
}
