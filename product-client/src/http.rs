// product-client/src/http.rs
// HTTP 客户端 - 产品 REST API

use crate::{ApiErrorBody, ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::{Product, ProductPayload, ProductQuery};

/// Header carrying the shared secret on write operations
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Body of `GET /healthcheck`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
}

/// Product API operations, one HTTP call each
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `POST /products`
    async fn create(&self, payload: &ProductPayload) -> ClientResult<Product>;
    /// `PUT /products/{id}`
    async fn update(&self, id: &str, payload: &ProductPayload) -> ClientResult<Product>;
    /// `GET /products/{id}`
    async fn retrieve(&self, id: &str) -> ClientResult<Product>;
    /// `DELETE /products/{id}`
    async fn delete(&self, id: &str) -> ClientResult<()>;
    /// `GET /products[?name=][&category=][&price=]`
    async fn search(&self, query: &ProductQuery) -> ClientResult<Vec<Product>>;
    /// `PUT /products/{id}/buy`
    async fn buy(&self, id: &str) -> ClientResult<Product>;
    /// `GET /healthcheck`
    async fn health(&self) -> ClientResult<HealthStatus>;
}

/// Whether a request carries the API key.
///
/// Only create, update and delete do; reads, search and buy go out bare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    ApiKey,
    None,
}

/// 网络 HTTP 客户端
#[derive(Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut req = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if auth == Auth::ApiKey
            && let Some(key) = &self.api_key
        {
            req = req.header(API_KEY_HEADER, key);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = Self::check_status(req.send().await?).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Turn a non-2xx response into an error, preferring the structured `message`
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        // 尝试解析为 API 错误响应
        if let Some(body) = ApiErrorBody::parse(&text) {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body.message,
            });
        }
        Err(ClientError::Status {
            status: status.as_u16(),
            body: text,
        })
    }
}

#[async_trait]
impl ProductApi for NetworkHttpClient {
    async fn create(&self, payload: &ProductPayload) -> ClientResult<Product> {
        let req = self
            .request(Method::POST, "/products", Auth::ApiKey)
            .json(payload);
        self.send(req).await
    }

    async fn update(&self, id: &str, payload: &ProductPayload) -> ClientResult<Product> {
        let req = self
            .request(Method::PUT, &format!("/products/{}", id), Auth::ApiKey)
            .json(payload);
        self.send(req).await
    }

    async fn retrieve(&self, id: &str) -> ClientResult<Product> {
        let req = self.request(Method::GET, &format!("/products/{}", id), Auth::None);
        self.send(req).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/products/{}", id), Auth::ApiKey);
        // Body is ignored; 204 and 200 both count
        Self::check_status(req.send().await?).await?;
        Ok(())
    }

    async fn search(&self, query: &ProductQuery) -> ClientResult<Vec<Product>> {
        let path = format!("/products{}", query.to_query_string());
        let req = self.request(Method::GET, &path, Auth::None);
        self.send(req).await
    }

    async fn buy(&self, id: &str) -> ClientResult<Product> {
        let req = self.request(Method::PUT, &format!("/products/{}/buy", id), Auth::None);
        self.send(req).await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        let req = self.request(Method::GET, "/healthcheck", Auth::None);
        self.send(req).await
    }
}

impl std::fmt::Debug for NetworkHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkHttpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}
