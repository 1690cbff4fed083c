use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::ApiError;
use super::normalize;
use super::raw::{RawCard, RawComment, RawTimeLog};
use super::CardSource;
use crate::config::ClientConfig;
use crate::model::card::{Card, CardUpdate, NewCard};
use crate::model::comment::Comment;
use crate::model::time_log::TimeLogEntry;

/// Authenticated access to the Kaiten REST API. One call per operation,
/// never retried.
pub struct KaitenClient {
    base_url: String,
    client: reqwest::Client,
}

impl KaitenClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .context("KAITEN_API_TOKEN contains characters not allowed in a header")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.client.get(format!("{}{path}", self.base_url));
        self.execute(Method::GET, path, builder).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self
            .client
            .request(method.clone(), format!("{}{path}", self.base_url))
            .json(body);
        self.execute(method, path, builder).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(%method, path, "sending Kaiten request");

        let response = builder.send().await.map_err(|err| {
            let api_err = ApiError::from_reqwest(path, &err);
            warn!(%method, path, error = %err, "Kaiten request failed");
            api_err
        })?;

        let status = response.status();
        debug!(%method, path, %status, "received Kaiten response");
        if !status.is_success() {
            warn!(%method, path, %status, "Kaiten returned an error status");
            return Err(ApiError::from_status(status.as_u16(), path));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::from_reqwest(path, &err))?;
        serde_json::from_slice(&bytes).map_err(|err| {
            warn!(%method, path, error = %err, "unexpected Kaiten response body");
            ApiError::decode(path, err)
        })
    }
}

#[async_trait]
impl CardSource for KaitenClient {
    async fn get_card(&self, card_id: u64) -> Result<Card, ApiError> {
        let raw: RawCard = self.get(&format!("/cards/{card_id}")).await?;
        Ok(normalize::card(raw))
    }

    async fn get_card_comments(&self, card_id: u64) -> Result<Vec<Comment>, ApiError> {
        let raw: Vec<RawComment> = self.get(&format!("/cards/{card_id}/comments")).await?;
        Ok(raw.into_iter().map(normalize::comment).collect())
    }

    async fn get_card_time_logs(&self, card_id: u64) -> Result<Vec<TimeLogEntry>, ApiError> {
        let raw: Vec<RawTimeLog> = self.get(&format!("/cards/{card_id}/time-logs")).await?;
        Ok(raw.into_iter().map(normalize::time_log).collect())
    }

    async fn create_card(&self, card: &NewCard) -> Result<Card, ApiError> {
        let raw: RawCard = self.send_json(Method::POST, "/cards", card).await?;
        Ok(normalize::card(raw))
    }

    async fn update_card(&self, card_id: u64, changes: &CardUpdate) -> Result<Card, ApiError> {
        let raw: RawCard = self
            .send_json(Method::PATCH, &format!("/cards/{card_id}"), changes)
            .await?;
        Ok(normalize::card(raw))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::kaiten::error::ApiErrorKind;

    const TOKEN: &str = "test-api-token";

    fn client_for(server: &MockServer) -> KaitenClient {
        client_with_timeout(server, Duration::from_secs(5))
    }

    fn client_with_timeout(server: &MockServer, timeout: Duration) -> KaitenClient {
        KaitenClient::new(&ClientConfig {
            base_url: format!("{}/api/latest", server.uri()),
            token: TOKEN.into(),
            timeout,
        })
        .unwrap()
    }

    fn card_json(id: u64, state: i64) -> serde_json::Value {
        json!({
            "id": id,
            "title": "Test card",
            "description": "Some description",
            "state": state,
            "board_id": 10,
            "column_id": 101,
            "lane_id": null,
            "owner_id": 501,
            "members": [
                { "id": 501, "full_name": "Ivan Ivanov" },
                { "id": 502, "full_name": "Maria Petrova" }
            ],
            "tags": [{ "id": 1, "name": "bug" }],
            "created": "2026-02-01T10:00:00Z",
            "updated": "2026-02-10T14:30:00Z"
        })
    }

    fn comments_json(count: u64) -> serde_json::Value {
        let items: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "id": 301 + i,
                    "text": format!("Comment {i}"),
                    "author_id": 502,
                    "card_id": 12345,
                    "created": "2026-02-05T12:00:00Z",
                    "updated": "2026-02-05T12:00:00Z"
                })
            })
            .collect();
        json!(items)
    }

    #[tokio::test]
    async fn get_card_sends_auth_headers_and_maps_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/cards/12345"))
            .and(header("Authorization", "Bearer test-api-token"))
            .and(header("Accept", "application/json"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_json(12345, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let card = client_for(&server).get_card(12345).await.unwrap();
        assert_eq!(card.card_id, 12345);
        assert_eq!(card.title, "Test card");
        assert_eq!(card.state, "active");
        assert_eq!(card.board_id, 10);
        assert_eq!(card.owner_id, Some(501));
        assert_eq!(card.members.len(), 2);
        assert_eq!(card.updated_at, "2026-02-10T14:30:00Z");
    }

    #[tokio::test]
    async fn get_card_maps_unknown_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/cards/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_json(7, 99)))
            .mount(&server)
            .await;

        let card = client_for(&server).get_card(7).await.unwrap();
        assert_eq!(card.state, "unknown_99");
    }

    #[tokio::test]
    async fn error_statuses_map_to_kinds() {
        let server = MockServer::start().await;
        for (id, status) in [(1u64, 401u16), (2, 403), (3, 404), (4, 500)] {
            Mock::given(method("GET"))
                .and(path(format!("/api/latest/cards/{id}")))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;
        }
        let client = client_for(&server);

        let err = client.get_card(1).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Unauthorized);
        assert_eq!(err.status, 401);

        let err = client.get_card(2).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Forbidden);

        let err = client.get_card(3).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.to_string(), "Card not found");

        let err = client.get_card(4).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Status);
        assert_eq!(err.status, 500);
        assert_eq!(err.path, "/cards/4");
        assert_eq!(err.to_string(), "Kaiten API error: 500");
    }

    #[tokio::test]
    async fn slow_response_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/cards/12345"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(card_json(12345, 1))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_with_timeout(&server, Duration::from_millis(100));
        let err = client.get_card(12345).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Timeout);
        assert_eq!(err.status, 0);
        assert_eq!(err.path, "/cards/12345");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let client = KaitenClient::new(&ClientConfig {
            base_url: "http://127.0.0.1:1/api/latest".into(),
            token: TOKEN.into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let err = client.get_card(12345).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Network);
        assert_eq!(err.status, 0);
        assert!(err.message.starts_with("Network error:"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/cards/12345"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_card(12345).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);
        assert!(!err.is_expected());
    }

    #[tokio::test]
    async fn comments_are_fetched_in_full_and_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/cards/12345/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(5)))
            .mount(&server)
            .await;

        let comments = client_for(&server).get_card_comments(12345).await.unwrap();
        let ids: Vec<u64> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![301, 302, 303, 304, 305]);
        assert_eq!(comments[0].author_id, 502);
        assert_eq!(comments[0].created_at, "2026-02-05T12:00:00Z");
    }

    #[tokio::test]
    async fn time_logs_are_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/latest/cards/12345/time-logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 1,
                "card_id": 12345,
                "user_id": 501,
                "author_id": 501,
                "role_id": null,
                "time_spent": 120,
                "for_date": "2026-02-10",
                "comment": "Auth module refactoring",
                "created": "2026-02-10T16:00:00Z",
                "updated": "2026-02-10T16:00:00Z"
            }])))
            .mount(&server)
            .await;

        let logs = client_for(&server).get_card_time_logs(12345).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].time_spent, 120);
        assert_eq!(logs[0].for_date, "2026-02-10");
        assert_eq!(logs[0].comment.as_deref(), Some("Auth module refactoring"));
        assert_eq!(logs[0].created_at, "2026-02-10T16:00:00Z");
    }

    #[tokio::test]
    async fn create_posts_only_supplied_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/latest/cards"))
            .and(body_json(json!({ "title": "New", "board_id": 10, "column_id": 101 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_json(777, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let card = client_for(&server)
            .create_card(&NewCard {
                title: "New".into(),
                board_id: 10,
                column_id: 101,
                ..NewCard::default()
            })
            .await
            .unwrap();
        assert_eq!(card.card_id, 777);
    }

    #[tokio::test]
    async fn update_patches_exactly_the_given_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/latest/cards/12345"))
            .and(body_json(json!({ "title": "X" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_json(12345, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let changes = CardUpdate {
            title: Some("X".into()),
            ..CardUpdate::default()
        };
        let card = client_for(&server).update_card(12345, &changes).await.unwrap();
        assert_eq!(card.card_id, 12345);
    }
}
