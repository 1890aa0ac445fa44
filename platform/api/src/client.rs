use std::time::Duration;

use entity::{Employee, EmployeeKey, EmployeeUpdate, NewEmployee};
use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{ApiError, ApiResult, extract_detail};

pub const DEFAULT_COLLECTION_PATH: &str = "/api/employees";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the employee collection lives.
#[derive(Clone, Debug)]
pub struct Endpoint {
    base_url: Url,
    collection_path: String,
    timeout: Duration,
}

impl Endpoint {
    pub fn new(base_url: &str, collection_path: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| ApiError::Url(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Url(format!("{base_url} cannot be a base url")));
        }
        Ok(Self {
            base_url,
            collection_path: collection_path.trim().to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn collection_url(&self) -> Url {
        self.url_for(None)
    }

    /// `{collection}/{key}`, with the key encoded as a single path segment.
    pub fn record_url(&self, key: &EmployeeKey) -> Url {
        self.url_for(Some(key))
    }

    fn url_for(&self, key: Option<&EmployeeKey>) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base urls, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(self.collection_path.split('/').filter(|s| !s.is_empty()));
            if let Some(key) = key {
                segments.push(key.path_segment());
            }
        }
        url
    }
}

/// Thin async wrapper over the four registry endpoints.
#[derive(Clone, Debug)]
pub struct EmployeeClient {
    http: Client,
    endpoint: Endpoint,
}

impl EmployeeClient {
    pub fn new(endpoint: Endpoint) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    #[instrument(name = "employees.list", skip_all)]
    pub async fn list(&self) -> ApiResult<Vec<Employee>> {
        let response = self
            .http
            .get(self.endpoint.collection_url())
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let employees = ensure_success(response)
            .await?
            .json::<Vec<Employee>>()
            .await
            .map_err(ApiError::Decode)?;
        debug!(count = employees.len(), "employees loaded");
        Ok(employees)
    }

    #[instrument(name = "employees.create", skip_all, fields(name = %employee.name))]
    pub async fn create(&self, employee: &NewEmployee) -> ApiResult<()> {
        let response = self
            .http
            .post(self.endpoint.collection_url())
            .json(employee)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        ensure_success(response).await.map(drop)
    }

    #[instrument(name = "employees.update", skip_all, fields(key = %key))]
    pub async fn update(&self, key: &EmployeeKey, update: &EmployeeUpdate) -> ApiResult<()> {
        let response = self
            .http
            .put(self.endpoint.record_url(key))
            .json(update)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        ensure_success(response).await.map(drop)
    }

    #[instrument(name = "employees.delete", skip_all, fields(key = %key))]
    pub async fn delete(&self, key: &EmployeeKey) -> ApiResult<()> {
        let response = self
            .http
            .delete(self.endpoint.record_url(key))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        ensure_success(response).await.map(drop)
    }
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = match response.bytes().await {
        Ok(body) => extract_detail(&body),
        Err(_) => None,
    };
    warn!(%status, detail = detail.as_deref().unwrap_or(""), "registry rejected request");
    Err(ApiError::Server { status, detail })
}
