//! # Shop Backend Client
//!
//! The HTTP client for the shop backend (JSON bodies).
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation        Method/Path              Success                      │
//! │  ─────────        ───────────              ───────                      │
//! │  signup           POST /signup             201                          │
//! │  forgot password  POST /forgot-password    200                          │
//! │  get user data    POST /get-user-data      200 → profile JSON           │
//! │  profile          GET  /profile            200 → profile JSON           │
//! │                   (Authorization: Bearer <token>)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client classifies failures but attaches no meaning to them: whether
//! a failed profile fetch clears the cache is `atelier-state`'s decision.
//! Nothing is retried here.

use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use atelier_core::UserProfile;

use crate::config::RemoteConfig;
use crate::error::{RemoteError, RemoteResult};

// =============================================================================
// Request Bodies
// =============================================================================

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct GetUserDataRequest<'a> {
    email: &'a str,
    password: &'a str,
}

// =============================================================================
// Client
// =============================================================================

/// Shop backend API client.
///
/// Cheap to clone; the underlying `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Creates a new client from the given configuration.
    ///
    /// ## Errors
    /// Returns [`RemoteError::Transport`] if the HTTP client fails to build.
    pub fn new(config: RemoteConfig) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(RemoteClient {
            client,
            base_url: config.base_url,
        })
    }

    /// Registers a new account.
    ///
    /// Success is HTTP 201; any other status is a typed error.
    pub async fn signup(&self, email: &str, password: &str) -> RemoteResult<()> {
        debug!(email = %email, "signup request");

        let response = self
            .client
            .post(format!("{}/signup", self.base_url))
            .json(&SignupRequest { email, password })
            .send()
            .await?;

        Self::expect_status("signup", &response, StatusCode::CREATED)?;
        Ok(())
    }

    /// Requests a password reset link for the given email.
    ///
    /// Success is HTTP 200.
    pub async fn forgot_password(&self, email: &str) -> RemoteResult<()> {
        debug!(email = %email, "forgot-password request");

        let response = self
            .client
            .post(format!("{}/forgot-password", self.base_url))
            .json(&ForgotPasswordRequest { email })
            .send()
            .await?;

        Self::expect_status("forgot-password", &response, StatusCode::OK)?;
        Ok(())
    }

    /// Fetches the user profile with email/password credentials.
    pub async fn get_user_data(
        &self,
        email: &str,
        password: &str,
    ) -> RemoteResult<UserProfile> {
        debug!(email = %email, "get-user-data request");

        let response = self
            .client
            .post(format!("{}/get-user-data", self.base_url))
            .json(&GetUserDataRequest { email, password })
            .send()
            .await?;

        Self::expect_status("get-user-data", &response, StatusCode::OK)?;
        Self::decode_profile("get-user-data", response).await
    }

    /// Fetches the user profile with a bearer token.
    pub async fn profile(&self, token: &str) -> RemoteResult<UserProfile> {
        debug!("profile request");

        let response = self
            .client
            .get(format!("{}/profile", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        Self::expect_status("profile", &response, StatusCode::OK)?;
        Self::decode_profile("profile", response).await
    }

    /// Maps a non-expected status to a typed error, keeping the code.
    fn expect_status(
        operation: &'static str,
        response: &reqwest::Response,
        expected: StatusCode,
    ) -> RemoteResult<()> {
        let status = response.status();
        if status == expected {
            Ok(())
        } else {
            Err(RemoteError::Status {
                operation,
                status: status.as_u16(),
            })
        }
    }

    /// Decodes a profile body, classifying parse failures separately from
    /// transport failures.
    async fn decode_profile(
        operation: &'static str,
        response: reqwest::Response,
    ) -> RemoteResult<UserProfile> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RemoteError::Decode {
            operation,
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> RemoteClient {
        RemoteClient::new(RemoteConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_signup_success_is_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .and(body_json(json!({"email": "a@b.c", "password": "hunter2"})))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.signup("a@b.c", "hunter2").await.unwrap();
    }

    #[tokio::test]
    async fn test_signup_other_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(ResponseTemplate::new(200)) // not 201
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.signup("a@b.c", "hunter2").await.unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_forgot_password_success_is_200() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/forgot-password"))
            .and(body_json(json!({"email": "a@b.c"})))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.forgot_password("a@b.c").await.unwrap();
    }

    #[tokio::test]
    async fn test_profile_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "tok-1",
                "name": "X",
                "email": "x@example.com"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let profile = client.profile("tok-1").await.unwrap();
        assert_eq!(profile.name, "X");
    }

    #[tokio::test]
    async fn test_profile_401_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.profile("expired").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_profile_bad_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.profile("tok-1").await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_get_user_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get-user-data"))
            .and(body_json(json!({"email": "x@example.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "tok-2",
                "name": "X",
                "email": "x@example.com",
                "phone": "+1-555-0100"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let profile = client.get_user_data("x@example.com", "pw").await.unwrap();
        assert_eq!(profile.token, "tok-2");
        assert_eq!(profile.phone.as_deref(), Some("+1-555-0100"));
    }
}
