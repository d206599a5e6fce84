use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;

use crate::domains::auth::Session;
use crate::error::NetworkError;
use crate::infra::api_types::{ApiMessage, AuthToken};
use crate::infra::config::ClientConfig;

/// HTTP client for the catalog backend.
///
/// Authorization comes from an explicit [`Session`] handed in by the caller;
/// every request built through [`ApiClient::build_request`] carries its bearer
/// token when one is present.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    session: Arc<RwLock<Session>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "has_token",
                &self
                    .session
                    .try_read()
                    .map(|s| s.token.is_some())
                    .unwrap_or(false),
            )
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client with the default 30 second transport timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Self {
            client,
            base_url,
            session: Arc::new(RwLock::new(Session::default())),
        }
    }

    /// Build a client from loaded configuration and an existing session
    pub fn from_config(config: &ClientConfig, session: Session) -> Self {
        let mut client = Self::with_timeout(
            config.server_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        );
        client.session = Arc::new(RwLock::new(session));
        client
    }

    /// Join a route onto the base URL
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the session used to authorize requests
    pub async fn set_session(&self, session: Session) {
        *self.session.write().await = session;
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Set the authentication token, keeping the known user
    pub async fn set_token(&self, token: Option<AuthToken>) {
        self.session.write().await.token = token;
    }

    /// Build a request with authentication headers
    pub async fn build_request(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.session.read().await.token.as_ref() {
            builder.header("Authorization", token.bearer())
        } else {
            builder
        }
    }

    /// Execute a request and decode a JSON body on success
    async fn execute_request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, NetworkError> {
        let response = request.send().await?;

        if response.status().is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice(&body).map_err(|e| NetworkError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
        } else {
            Err(self.error_from_response(response, url).await)
        }
    }

    /// Execute a request whose body is irrelevant on success (200 or 204)
    async fn execute_no_content(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<(), NetworkError> {
        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            _ => Err(self.error_from_response(response, url).await),
        }
    }

    async fn error_from_response(&self, response: Response, url: &str) -> NetworkError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("[ApiClient] Unauthorized response from {}, clearing token", url);
            self.set_token(None).await;
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        // Backend errors are `{status: false, message}`; fall back to the raw body
        let message = serde_json::from_str::<ApiMessage>(&error_text)
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.is_empty())
            .unwrap_or(error_text);

        NetworkError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        }
    }

    /// GET request with authentication
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, NetworkError> {
        self.get_with_query(path, &[]).await
    }

    /// GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, NetworkError> {
        let url = self.build_url(path);

        debug!("[ApiClient] GET {} {:?}", url, query);

        let request = self.client.get(&url).query(query);
        let request = self.build_request(request).await;
        self.execute_request(request, &url).await
    }

    /// POST request with authentication
    pub async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, NetworkError> {
        let url = self.build_url(path);

        debug!("[ApiClient] POST {}", url);

        let request = self.client.post(&url).json(body);
        let request = self.build_request(request).await;
        self.execute_request(request, &url).await
    }

    /// POST request for public endpoints (no authentication)
    pub async fn post_public<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, NetworkError> {
        let url = self.build_url(path);

        debug!("[ApiClient] POST (public) {}", url);

        let request = self.client.post(&url).json(body);
        self.execute_request(request, &url).await
    }

    /// PUT request
    pub async fn put<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, NetworkError> {
        let url = self.build_url(path);

        debug!("[ApiClient] PUT {}", url);

        let request = self.client.put(&url).json(body);
        let request = self.build_request(request).await;
        self.execute_request(request, &url).await
    }

    /// DELETE request; any 2xx counts as success
    pub async fn delete(&self, path: &str) -> Result<(), NetworkError> {
        let url = self.build_url(path);

        debug!("[ApiClient] DELETE {}", url);

        let request = self.client.delete(&url);
        let request = self.build_request(request).await;
        self.execute_no_content(request, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_without_double_slashes() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.build_url("/movies"),
            "http://localhost:5000/api/movies"
        );
        assert_eq!(
            client.build_url("movies/5"),
            "http://localhost:5000/api/movies/5"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let client = ApiClient::new("http://localhost:5000");
        assert_eq!(
            client.build_url("https://cdn.example/p.jpg"),
            "https://cdn.example/p.jpg"
        );
    }

    #[tokio::test]
    async fn token_is_held_in_session() {
        let client = ApiClient::new("http://localhost:5000");
        assert!(client.session().await.token.is_none());

        client.set_token(Some(AuthToken::new("abc"))).await;
        assert_eq!(
            client.session().await.token.map(|t| t.bearer()),
            Some("Bearer abc".to_string())
        );
    }
}
