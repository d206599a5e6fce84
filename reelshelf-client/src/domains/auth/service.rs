use log::info;

use crate::domains::auth::Session;
use crate::error::{CatalogResult, ValidationError};
use crate::infra::api_client::ApiClient;
use crate::infra::api_types::{ApiMessage, LoginRequest, LoginResponse, RegisterRequest};
use crate::infra::constants::routes::auth;

/// Login and registration calls
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token. On success the client's session is
    /// replaced and returned so the caller can persist it.
    pub async fn login(&self, email: &str, password: &str) -> CatalogResult<Session> {
        require("email", email)?;
        require("password", password)?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.api.post_public(auth::LOGIN, &request).await?;

        info!("[Auth] Logged in as {}", response.data.user.email);
        let session = Session::authenticated(response.data.user, response.data.token);
        self.api.set_session(session.clone()).await;
        Ok(session)
    }

    /// Create an account. Registration does not log the user in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> CatalogResult<String> {
        require("name", name)?;
        require("email", email)?;
        require("password", password)?;

        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: ApiMessage = self.api.post_public(auth::REGISTER, &request).await?;
        info!("[Auth] Registered {}", request.email);
        Ok(response.message)
    }

    pub async fn logout(&self) {
        self.api.set_session(Session::anonymous()).await;
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}
