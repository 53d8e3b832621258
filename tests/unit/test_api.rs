//! Unit tests for the API module
//!
//! Tests cover:
//! - Region parsing and labels
//! - FriendResponse parsing
//! - HttpFriendClient against a local mock server

use serde_json::json;
use termfolio::api::{FriendClient, FriendRequest, FriendResponse, HttpFriendClient, Region};
use termfolio::config::ApiConfig;
use termfolio::errors::ApiError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> FriendRequest {
    FriendRequest {
        code: "X 1&2".into(),
        server: Region::Na,
        uid: "U1".into(),
    }
}

// ============================================================================
// Type Tests
// ============================================================================

mod type_tests {
    use super::*;

    #[test]
    fn test_region_round_trips_through_str() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>(), Ok(region));
        }
        assert_eq!(" NA ".parse::<Region>(), Ok(Region::Na));
        assert!("atlantis".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_cycle_wraps() {
        assert_eq!(Region::Sa.next(), Region::Asia);
        assert_eq!(Region::Asia.prev(), Region::Sa);
    }

    #[test]
    fn test_response_id_forms() {
        let text: FriendResponse =
            serde_json::from_value(json!({"success": true, "id": "abc"})).unwrap();
        let number: FriendResponse =
            serde_json::from_value(json!({"success": true, "id": 12})).unwrap();
        assert_eq!(text.id_text().as_deref(), Some("abc"));
        assert_eq!(number.id_text().as_deref(), Some("12"));
    }

    #[test]
    fn test_empty_server_message_is_absent() {
        let response: FriendResponse =
            serde_json::from_value(json!({"success": false, "message": ""})).unwrap();
        assert_eq!(response.server_message(), None);
    }
}

// ============================================================================
// HTTP Client Tests
// ============================================================================

mod http_tests {
    use super::*;

    async fn client_for(server: &MockServer) -> HttpFriendClient {
        let config = ApiConfig {
            endpoint: format!("{}/api/friend/send", server.uri()),
            timeout_secs: 5,
            connect_timeout_secs: 5,
        };
        HttpFriendClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_sends_fields_as_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/friend/send"))
            .and(query_param("code", "X 1&2"))
            .and(query_param("server", "na"))
            .and(query_param("uid", "U1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "R-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .await
            .send_friend_request(&request())
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.id_text().as_deref(), Some("R-1"));
    }

    #[tokio::test]
    async fn test_body_is_parsed_regardless_of_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"success": false, "message": "BAD CODE"})),
            )
            .mount(&server)
            .await;

        let response = client_for(&server)
            .await
            .send_friend_request(&request())
            .await
            .unwrap();
        assert!(!response.success);
        assert_eq!(response.server_message(), Some("BAD CODE"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .await
            .send_friend_request(&request())
            .await;
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        drop(server);

        let result = client.send_friend_request(&request()).await;
        assert!(matches!(
            result,
            Err(ApiError::Network(_)) | Err(ApiError::Timeout)
        ));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let config = ApiConfig {
            endpoint: "ftp://example.com/send".into(),
            ..Default::default()
        };
        assert!(HttpFriendClient::new(&config).is_err());
    }
}
