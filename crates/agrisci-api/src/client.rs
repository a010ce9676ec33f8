// Async HTTP gateway for the admin JSON API.
//
// Every call except login passes through the interceptor chain before it
// is sent. No retries and no token refresh: a 401 comes back as
// `Error::Unauthorized` and the caller decides what to do.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::RequestInterceptor;
use crate::resource::Resource;
use crate::transport::TransportConfig;
use crate::types::{CartResponse, ProductResponse, ShippingResponse};
use crate::Error;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Gateway to the admin API.
///
/// Holds the HTTP client, the base URL, and the ordered interceptor chain.
/// Cheap to share behind an `Arc`; it carries no per-request state.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a gateway for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            interceptors: Vec::new(),
        }
    }

    /// Append an interceptor to the end of the chain.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let url = Url::parse(raw.trim())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(raw.to_owned()));
        }
        Ok(url)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL, keeping any base path prefix.
    pub(crate) fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn prepare(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        self.interceptors
            .iter()
            .fold(request, |req, interceptor| interceptor.intercept(req))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.prepare(self.http.get(url)).send().await?;
        handle_response(resp).await
    }

    async fn post_no_response<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("POST {url}");

        let resp = self.prepare(self.http.post(url).json(body)).send().await?;
        handle_empty(resp).await
    }

    async fn put_no_response<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("PUT {url}");

        let resp = self.prepare(self.http.put(url).json(body)).send().await?;
        handle_empty(resp).await
    }

    async fn delete_no_response(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.prepare(self.http.delete(url)).send().await?;
        handle_empty(resp).await
    }

    // ── Generic resource operations ──────────────────────────────────

    /// `GET /{resource}`: the whole collection, no paging.
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, Error> {
        let url = self.url(resource.list_segments())?;
        self.get(url).await
    }

    /// Create an entity. The response body is ignored; callers refetch.
    pub async fn create<B: Serialize + Sync>(&self, resource: Resource, body: &B) -> Result<(), Error> {
        let url = self.url(resource.create_segments())?;
        self.post_no_response(url, body).await
    }

    /// `PUT /{resource}/{id}`. The response body is ignored.
    pub async fn update<B: Serialize + Sync>(
        &self,
        resource: Resource,
        id: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(resource.item_segments(id))?;
        self.put_no_response(url, body).await
    }

    /// `DELETE /{resource}/{id}`.
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<(), Error> {
        let url = self.url(resource.item_segments(id))?;
        self.delete_no_response(url).await
    }

    // ── Typed list endpoints ─────────────────────────────────────────

    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, Error> {
        self.list(Resource::Products).await
    }

    pub async fn list_carts(&self) -> Result<Vec<CartResponse>, Error> {
        self.list(Resource::Cart).await
    }

    pub async fn list_shippings(&self) -> Result<Vec<ShippingResponse>, Error> {
        self.list(Resource::Shippings).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

// ── Response handling ────────────────────────────────────────────────

pub(crate) async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Unauthorized;
    }

    let raw = resp.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(err) => err.message.or(err.error),
        Err(_) => None,
    }
    .unwrap_or_else(|| {
        if raw.is_empty() {
            status.to_string()
        } else {
            raw
        }
    });

    Error::Api {
        status: status.as_u16(),
        message,
    }
}
