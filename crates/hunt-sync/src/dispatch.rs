//! Fire-and-forget sync calls

use crate::client::ApiClient;
use crate::error::{Error, Result};
use hunt_core::{GameId, UserId};
use std::future::Future;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Runs sync calls in the background and only logs their outcome.
///
/// Calls are independent: several can be in flight at once and none of them
/// is retried. Dropping the dispatcher aborts whatever is still running.
pub struct Dispatcher {
    client: ApiClient,
    tasks: JoinSet<()>,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tasks: JoinSet::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Push an unlock without waiting for the reply
    pub fn unlock(&mut self, user: UserId, marker_id: impl Into<String>) {
        let client = self.client.clone();
        let marker_id = marker_id.into();
        let label = format!("unlock {marker_id}");
        self.spawn(label, async move { client.unlock(user, &marker_id).await });
    }

    /// Submit a score without waiting for the reply
    pub fn submit_score(&mut self, user: UserId, game: GameId, score: u32) {
        let client = self.client.clone();
        let label = format!("score {}", game.leaderboard_id());
        self.spawn(label, async move { client.submit_score(user, game, score).await });
    }

    fn spawn<F>(&mut self, label: String, call: F)
    where
        F: Future<Output = Result<serde_json::Value>> + Send + 'static,
    {
        // Reap finished calls so the set does not grow without bound
        while self.tasks.try_join_next().is_some() {}

        self.tasks.spawn(async move {
            match call.await {
                Ok(_) => debug!(call = %label, "sync call done"),
                Err(Error::Cancelled) => debug!(call = %label, "sync call cancelled"),
                Err(e) => warn!(call = %label, error = %e, "sync call failed"),
            }
        });
    }

    /// Calls spawned and not yet reaped
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every call spawned so far
    pub async fn settle(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_calls_run_in_background() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/mobile-unlock"))
            .and(body_json(json!({"user_id": 3, "marker_id": "MKT_Empanadas"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/mobile-score"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::default().with_base_url(server.uri())).unwrap();
        let mut dispatcher = Dispatcher::new(client);
        dispatcher.unlock(UserId::new(3), "MKT_Empanadas");
        dispatcher.submit_score(UserId::new(3), GameId::Flavors, 900);
        assert_eq!(dispatcher.in_flight(), 2);

        // The failing score call is only logged
        dispatcher.settle().await;
        assert_eq!(dispatcher.in_flight(), 0);
    }
}
