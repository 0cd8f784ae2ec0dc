//! REST client for the authentication endpoints
//!
//! Endpoints, relative to the API base URL:
//! - `POST /register` `{name, email, password, password_confirmation}`
//! - `POST /login` `{email, password}` -> `{token, user}`
//! - `POST /logout` (bearer)
//! - `GET /user` (bearer) -> user profile

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::RequestError;
use crate::session::{Token, UserProfile};

#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: Token,
    pub user: UserProfile,
}

/// The backend as seen by the session store
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<Value, RequestError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, RequestError>;

    async fn logout(&self, token: Option<&Token>) -> Result<(), RequestError>;

    async fn current_user(&self, token: &Token) -> Result<UserProfile, RequestError>;
}

pub struct HttpAuthApi {
    client: Client,
    base_url: Url,
}

impl HttpAuthApi {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, RequestError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, RequestError> {
        let mut base_url = Url::parse(base_url)?;
        // Join relative to the base path instead of replacing its last segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, RequestError> {
        let response = request.header(ACCEPT, "application/json").send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "Auth API returned non-success status");

        Err(RequestError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<Value, RequestError> {
        let url = self.endpoint("/register")?;
        let response = self.send(self.client.post(url).json(request)).await?;
        Self::decode(response).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, RequestError> {
        let url = self.endpoint("/login")?;
        let response = self.send(self.client.post(url).json(credentials)).await?;
        Self::decode(response).await
    }

    async fn logout(&self, token: Option<&Token>) -> Result<(), RequestError> {
        let url = self.endpoint("/logout")?;
        let mut request = self.client.post(url);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }
        self.send(request).await?;
        Ok(())
    }

    async fn current_user(&self, token: &Token) -> Result<UserProfile, RequestError> {
        let url = self.endpoint("/user")?;
        let response = self
            .send(self.client.get(url).bearer_auth(token.as_str()))
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER_AGENT: &str = "gatehouse-test/0.1";

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = HttpAuthApi::new("http://localhost:8000/api", USER_AGENT).unwrap();
        assert_eq!(
            api.endpoint("/login").unwrap().as_str(),
            "http://localhost:8000/api/login"
        );

        let api = HttpAuthApi::new("http://localhost:8000/api/", USER_AGENT).unwrap();
        assert_eq!(
            api.endpoint("/user").unwrap().as_str(),
            "http://localhost:8000/api/user"
        );

        let api = HttpAuthApi::new("http://localhost:8000", USER_AGENT).unwrap();
        assert_eq!(
            api.endpoint("/logout").unwrap().as_str(),
            "http://localhost:8000/logout"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = HttpAuthApi::new("not a url", USER_AGENT).err().unwrap();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_register_sends_all_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/register"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "pw",
                "password_confirmation": "pw"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "user": {"id": 7, "name": "Ada"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpAuthApi::new(&server.uri(), USER_AGENT).unwrap();
        let result = api
            .register(&RegisterRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
                password_confirmation: "pw".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result["user"]["id"], json!(7));
    }

    #[tokio::test]
    async fn test_register_validation_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "The email has already been taken."
            })))
            .mount(&server)
            .await;

        let api = HttpAuthApi::new(&server.uri(), USER_AGENT).unwrap();
        let err = api
            .register(&RegisterRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
                password_confirmation: "pw".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(422));
        match err {
            RequestError::Status { body, .. } => assert!(body.contains("already been taken")),
            other => panic!("Expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_parses_token_and_user() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "t1",
                "user": {"id": 1}
            })))
            .mount(&server)
            .await;

        let api = HttpAuthApi::new(&server.uri(), USER_AGENT).unwrap();
        let response = api
            .login(&Credentials {
                email: "a@b.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.token.as_str(), "t1");
        assert_eq!(response.user.id(), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_login_with_empty_token_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "",
                "user": {"id": 1}
            })))
            .mount(&server)
            .await;

        let api = HttpAuthApi::new(&server.uri(), USER_AGENT).unwrap();
        let err = api
            .login(&Credentials {
                email: "a@b.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[tokio::test]
    async fn test_logout_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/logout"))
            .and(header("authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpAuthApi::new(&server.uri(), USER_AGENT).unwrap();
        let token = Token::new("t1").unwrap();
        api.logout(Some(&token)).await.unwrap();
    }

    #[tokio::test]
    async fn test_current_user_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Unauthenticated."
            })))
            .mount(&server)
            .await;

        let api = HttpAuthApi::new(&server.uri(), USER_AGENT).unwrap();
        let token = Token::new("abc").unwrap();
        let err = api.current_user(&token).await.unwrap_err();

        assert!(err.is_rejection());
    }
}
