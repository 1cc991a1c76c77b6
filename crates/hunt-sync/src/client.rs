//! HTTP client for the backend

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::wire::{
    LoginRequest, LoginResponse, ProgressRequest, ScoreSubmission, UnlockRequest, UserData,
};
use hunt_core::{GameId, ProgressSnapshot, UserId};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub mod endpoints {
    pub const LOGIN: &str = "/mobile-login";
    pub const UNLOCK: &str = "/api/mobile-unlock";
    pub const SCORE: &str = "/api/mobile-score";
    pub const PROGRESS: &str = "/api/mobile-get-progress";
}

/// Backend client. Cheap to clone; clones share the connection pool and
/// the cancellation token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    cancel: CancellationToken,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            http,
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Tie requests to an externally owned token
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancel everything in flight on this client and its clones
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Start over with a fresh token after a cancel. Existing clones keep
    /// the cancelled one.
    pub fn renew_cancel_token(&mut self) {
        self.cancel = CancellationToken::new();
    }

    /// POST `payload` as JSON to `endpoint` and decode the JSON reply.
    ///
    /// Resolves to [`Error::Cancelled`] as soon as the token is cancelled,
    /// even if the request is still in flight.
    pub async fn post<P, R>(&self, endpoint: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        tokio::select! {
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            res = self.send(endpoint, payload) => res,
        }
    }

    async fn send<P, R>(&self, endpoint: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.url(endpoint);
        debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Acks sometimes come back empty
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Log in. A 2xx reply that does not carry `success` and a user is
    /// reported as [`Error::Rejected`].
    pub async fn login(&self, email: &str, password: &str) -> Result<UserData> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post(endpoints::LOGIN, &request).await?;
        match response {
            LoginResponse {
                success: true,
                user: Some(user),
                ..
            } => Ok(user),
            LoginResponse { message, .. } => Err(Error::Rejected(
                message.unwrap_or_else(|| "Login failed.".to_string()),
            )),
        }
    }

    /// Record an unlock on the server
    pub async fn unlock(&self, user: UserId, marker_id: &str) -> Result<serde_json::Value> {
        let request = UnlockRequest {
            user_id: user.raw(),
            marker_id: marker_id.to_string(),
        };
        self.post(endpoints::UNLOCK, &request).await
    }

    pub async fn submit_score(
        &self,
        user: UserId,
        game: GameId,
        score: u32,
    ) -> Result<serde_json::Value> {
        let request = ScoreSubmission {
            user_id: user.raw(),
            game_id: game.leaderboard_id().to_string(),
            score,
        };
        self.post(endpoints::SCORE, &request).await
    }

    /// Pull the authoritative unlock list
    pub async fn fetch_progress(&self, user: UserId) -> Result<ProgressSnapshot> {
        let request = ProgressRequest {
            user_id: user.raw(),
        };
        self.post(endpoints::PROGRESS, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiConfig::default().with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_login_sends_headers_and_returns_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mobile-login"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", "TheHuntMobile/1.0"))
            .and(body_json(json!({"email": "juan@example.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "ok",
                "user": {"id": 42, "email": "juan@example.com", "username": "Juan"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client_for(&server).login("juan@example.com", "pw").await.unwrap();
        assert_eq!(
            user,
            UserData {
                id: 42,
                email: "juan@example.com".into(),
                username: "Juan".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_login_rejected_with_success_false() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mobile-login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "Account disabled"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).login("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, Error::Rejected(m) if m == "Account disabled"));
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mobile-login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let err = client_for(&server).login("a@b.c", "pw").await.unwrap_err();
        match err {
            Error::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unlock_and_score_payloads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/mobile-unlock"))
            .and(body_json(json!({"user_id": 7, "marker_id": "sewing"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/mobile-score"))
            .and(body_json(json!({"user_id": 7, "game_id": "matching_cards", "score": 1600})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "saved"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ack = client.unlock(UserId::new(7), "sewing").await.unwrap();
        assert_eq!(ack, serde_json::Value::Null);
        let ack = client
            .submit_score(UserId::new(7), GameId::Flavors, 1600)
            .await
            .unwrap();
        assert_eq!(ack["status"], "saved");
    }

    #[tokio::test]
    async fn test_fetch_progress_defaults_missing_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/mobile-get-progress"))
            .and(body_json(json!({"user_id": 7})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"unlocked_ids": ["sewing"]})),
            )
            .mount(&server)
            .await;

        let snapshot = client_for(&server).fetch_progress(UserId::new(7)).await.unwrap();
        assert_eq!(snapshot.unlocked_ids, vec!["sewing".to_string()]);
        assert_eq!(snapshot.progress_value, 0.0);
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_progress(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_ms: 2_000,
            ..ApiConfig::default()
        };
        let err = ApiClient::new(config)
            .unwrap()
            .unlock(UserId::new(1), "sewing")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }

    #[tokio::test]
    async fn test_cancelled_before_and_during_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = client.cancel_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });
        let err = client.unlock(UserId::new(1), "sewing").await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));

        let err = client.fetch_progress(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));

        let mut client = client;
        client.renew_cancel_token();
        assert!(!client.cancel_token().is_cancelled());
    }
}
