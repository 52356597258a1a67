//! Lemmy HTTP API client.
//!
//! Only the v3 endpoints the sidebar updater needs: login, community
//! lookup by name, and community edit. Community edits report their
//! status code to the caller instead of failing, since a rejected write
//! (e.g. revoked moderator rights) is an operator problem, not a crash.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{BotError, Result};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Community {
    pub id: i64,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub actor_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommunityView {
    pub community: Community,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModeratorView {
    pub moderator: Person,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommunityResponse {
    pub community_view: CommunityView,
    #[serde(default)]
    pub moderators: Vec<ModeratorView>,
}

impl CommunityResponse {
    pub fn has_moderator(&self, username: &str) -> bool {
        self.moderators
            .iter()
            .any(|view| view.moderator.name == username)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username_or_email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    jwt: Option<String>,
}

#[derive(Serialize)]
struct EditCommunityRequest<'a> {
    community_id: i64,
    description: &'a str,
}

/// Platform seam consumed by the update cycle. The concrete
/// implementation is `LemmyClient`; tests substitute doubles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityApi: Send + Sync {
    async fn get_community(&self, name: &str) -> Result<CommunityResponse>;

    /// Returns the platform's status code; non-success is the caller's to
    /// log, transport failures are errors.
    async fn edit_community_description(
        &self,
        community_id: i64,
        description: &str,
    ) -> Result<StatusCode>;
}

pub struct LemmyClient {
    http: Client,
    instance: String,
    jwt: RwLock<Option<String>>,
}

impl LemmyClient {
    pub fn new(instance: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("pennant/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            instance: instance.trim_end_matches('/').to_string(),
            jwt: RwLock::new(None),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v3{path}", self.instance)
    }

    async fn bearer(&self) -> Option<String> {
        self.jwt.read().await.clone()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        debug!("Logging in to {} as [{username}]", self.instance);
        let resp = self
            .http
            .post(self.api_url("/user/login"))
            .json(&LoginRequest {
                username_or_email: username,
                password,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Auth(format!(
                "login failed with status {status}: {body}"
            )));
        }

        let login: LoginResponse = resp.json().await?;
        let jwt = login
            .jwt
            .ok_or_else(|| BotError::Auth("login response carried no token".to_string()))?;
        *self.jwt.write().await = Some(jwt);
        Ok(())
    }
}

#[async_trait]
impl CommunityApi for LemmyClient {
    async fn get_community(&self, name: &str) -> Result<CommunityResponse> {
        let mut req = self
            .http
            .get(self.api_url("/community"))
            .query(&[("name", name)]);
        if let Some(jwt) = self.bearer().await {
            req = req.bearer_auth(jwt);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Platform(format!(
                "community lookup [{name}] failed with status {status}: {body}"
            )));
        }
        Ok(resp.json().await?)
    }

    async fn edit_community_description(
        &self,
        community_id: i64,
        description: &str,
    ) -> Result<StatusCode> {
        let mut req = self.http.put(self.api_url("/community")).json(&EditCommunityRequest {
            community_id,
            description,
        });
        if let Some(jwt) = self.bearer().await {
            req = req.bearer_auth(jwt);
        }

        let resp = req.send().await?;
        Ok(resp.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMUNITY_JSON: &str = r#"{
        "community_view": {
            "community": {
                "id": 42,
                "name": "baseball",
                "title": "Baseball",
                "description": "rules",
                "actor_id": "https://fanaticus.social/c/baseball"
            }
        },
        "moderators": [
            {"moderator": {"name": "somebody-else"}}
        ]
    }"#;

    #[tokio::test]
    async fn test_login_stores_token_for_later_calls() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v3/user/login")
            .with_status(200)
            .with_body(r#"{"jwt": "token-123"}"#)
            .create_async()
            .await;
        let community_mock = server
            .mock("GET", "/api/v3/community?name=baseball")
            .match_header("authorization", "Bearer token-123")
            .with_status(200)
            .with_body(COMMUNITY_JSON)
            .create_async()
            .await;

        let client = LemmyClient::new(&server.url()).unwrap();
        client.login("pennant-bot", "hunter2").await.unwrap();

        let resp = client.get_community("baseball").await.unwrap();
        community_mock.assert_async().await;
        assert_eq!(resp.community_view.community.id, 42);
        assert_eq!(
            resp.community_view.community.description.as_deref(),
            Some("rules")
        );
        assert!(resp.has_moderator("somebody-else"));
        assert!(!resp.has_moderator("pennant-bot"));
    }

    #[tokio::test]
    async fn test_login_rejection_is_an_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v3/user/login")
            .with_status(401)
            .with_body(r#"{"error": "incorrect_login"}"#)
            .create_async()
            .await;

        let client = LemmyClient::new(&server.url()).unwrap();
        let err = client.login("pennant-bot", "wrong").await.unwrap_err();
        assert!(matches!(err, BotError::Auth(_)));
    }

    #[tokio::test]
    async fn test_login_without_token_is_an_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v3/user/login")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = LemmyClient::new(&server.url()).unwrap();
        let err = client.login("pennant-bot", "hunter2").await.unwrap_err();
        assert!(matches!(err, BotError::Auth(_)));
    }

    #[tokio::test]
    async fn test_edit_returns_status_instead_of_failing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/api/v3/community")
            .with_status(400)
            .with_body(r#"{"error": "not_a_moderator"}"#)
            .create_async()
            .await;

        let client = LemmyClient::new(&server.url()).unwrap();
        let status = client
            .edit_community_description(42, "new sidebar")
            .await
            .unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
