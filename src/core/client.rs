//! Machine translation engine management client

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::{ClientConfig, Credentials};
use crate::core::errors::{ClientError, Result};
use crate::core::models::{
    AddMtRequest, ListMtsOptions, MachineTranslation, PatchRequest, ResponseList, ResponseObject,
    TranslateRequest, TranslationResult,
};
use crate::core::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Client for the `/mts` resource
///
/// Holds immutable credentials and a shared transport, so clones are cheap
/// and calls may run concurrently.
#[derive(Clone)]
pub struct MachineTranslationClient {
    credentials: Arc<Credentials>,
    base_url: Arc<str>,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for MachineTranslationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineTranslationClient")
            .field("organization", &self.credentials.organization)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl MachineTranslationClient {
    /// Create a client backed by `reqwest`
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with default settings for the given credentials
    pub fn from_credentials(credentials: Credentials) -> Result<Self> {
        Self::new(ClientConfig::new(credentials))
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// Create a client on top of any transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let base_url = config.api_url();
        info!("MT client targeting {}", base_url);

        Self {
            credentials: Arc::new(config.credentials()),
            base_url: base_url.into(),
            transport,
        }
    }

    /// API root every path is appended to
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Token sent as bearer credentials
    pub fn token(&self) -> &str {
        &self.credentials.token
    }

    /// Organization the client was created for
    pub fn organization(&self) -> Option<&str> {
        self.credentials.organization.as_deref()
    }

    /// List engines, one page
    pub async fn list_mts(
        &self,
        options: &ListMtsOptions,
    ) -> Result<ResponseList<MachineTranslation>> {
        let request = self.request(Method::GET, "/mts").query(options.to_query());
        self.fetch(request).await
    }

    /// Create an engine
    pub async fn create_mt(
        &self,
        spec: &AddMtRequest,
    ) -> Result<ResponseObject<MachineTranslation>> {
        let request = self.request(Method::POST, "/mts").json(to_body(spec)?);
        self.fetch(request).await
    }

    /// Get an engine by id
    pub async fn get_mt(&self, id: u64) -> Result<ResponseObject<MachineTranslation>> {
        let request = self.request(Method::GET, &format!("/mts/{}", id));
        self.fetch(request).await
    }

    /// Delete an engine. Any 2xx counts as success; the body is ignored.
    pub async fn delete_mt(&self, id: u64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/mts/{}", id));
        self.execute(request).await?;
        Ok(())
    }

    /// Apply patch operations to an engine
    pub async fn update_mt(
        &self,
        id: u64,
        ops: &[PatchRequest],
    ) -> Result<ResponseObject<MachineTranslation>> {
        let request = self
            .request(Method::PATCH, &format!("/mts/{}", id))
            .json(to_body(ops)?);
        self.fetch(request).await
    }

    /// Translate through an engine
    pub async fn translate(
        &self,
        id: u64,
        request: &TranslateRequest,
    ) -> Result<ResponseObject<TranslationResult>> {
        let request = self
            .request(Method::POST, &format!("/mts/{}/translations", id))
            .json(to_body(request)?);
        self.fetch(request).await
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{}", self.base_url, path))
            .header("Authorization", self.credentials.bearer())
    }

    /// Send and fail on non-success status
    async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        if request.body.is_some() {
            request = request.header("Content-Type", "application/json");
        }

        debug!("{} {}", request.method, request.url);
        let method = request.method.clone();
        let url = request.url.clone();

        let response = self.transport.send(request).await?;

        if response.is_success() {
            Ok(response)
        } else {
            warn!("{} {} failed with status {}", method, url, response.status);
            Err(ClientError::from_response(response.status, &response.body))
        }
    }

    /// Send and decode the JSON body
    async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.execute(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ClientError::InvalidResponseError {
            message: e.to_string(),
        })
    }
}

fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
