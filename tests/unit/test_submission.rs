//! Unit tests for the submission coordinator
//!
//! Tests cover:
//! - Validation without any outbound call
//! - Success, rejection and transport failure classification
//! - Loading state and re-entrancy while a call is in flight
//! - Form clearing rules

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use termfolio::api::{FriendClient, FriendRequest, FriendResponse, Region};
use termfolio::errors::{ApiError, SubmissionError};
use termfolio::submission::{
    classify, success_message, Field, SubmissionCoordinator, SubmissionState, SubmitOutcome,
    FATAL_MESSAGE, GENERIC_FAILURE_MESSAGE, LOADING_MESSAGE, VALIDATION_MESSAGE,
};
use tokio::sync::Notify;

/// Scripted client: answers from a queue, optionally parking each call
#[derive(Default)]
struct ScriptedClient {
    answers: Mutex<VecDeque<Result<FriendResponse, ApiError>>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<FriendRequest>>,
    hold: Option<Arc<Notify>>,
}

impl ScriptedClient {
    fn answering(answers: Vec<Result<FriendResponse, ApiError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            ..Default::default()
        }
    }

    fn held(mut self, hold: Arc<Notify>) -> Self {
        self.hold = Some(hold);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FriendClient for ScriptedClient {
    async fn send_friend_request(
        &self,
        request: &FriendRequest,
    ) -> Result<FriendResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("script exhausted".into())))
    }
}

fn filled(client: Arc<ScriptedClient>) -> SubmissionCoordinator {
    let coordinator = SubmissionCoordinator::new(client);
    coordinator.update_field(Field::Code, "X1");
    coordinator.update_field(Field::Server, "europe");
    coordinator.update_field(Field::Uid, "U1");
    coordinator
}

// ============================================================================
// Classification Tests
// ============================================================================

mod classify_tests {
    use super::*;

    #[test]
    fn test_success_with_numeric_id() {
        let response: FriendResponse =
            serde_json::from_value(json!({"success": true, "id": 7})).unwrap();
        assert_eq!(classify(Ok(response)), Ok("7".to_string()));
    }

    #[test]
    fn test_rejection_uses_server_message() {
        let response: FriendResponse =
            serde_json::from_value(json!({"success": false, "message": "UID NOT FOUND"})).unwrap();
        assert_eq!(
            classify(Ok(response)),
            Err(SubmissionError::Rejected("UID NOT FOUND".into()))
        );
    }

    #[test]
    fn test_rejection_without_message_is_generic() {
        let response: FriendResponse = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(
            classify(Ok(response)),
            Err(SubmissionError::Rejected(GENERIC_FAILURE_MESSAGE.into()))
        );
    }

    #[test]
    fn test_every_api_error_is_transport() {
        for error in [
            ApiError::Timeout,
            ApiError::Network("refused".into()),
            ApiError::Parse("eof".into()),
        ] {
            assert_eq!(classify(Err(error)), Err(SubmissionError::Transport));
        }
    }
}

// ============================================================================
// Coordinator Tests
// ============================================================================

mod coordinator_tests {
    use super::*;

    #[tokio::test]
    async fn test_incomplete_form_fails_validation_without_call() {
        let client = Arc::new(ScriptedClient::default());
        let coordinator = SubmissionCoordinator::new(client.clone());
        coordinator.update_field(Field::Code, "X1");

        let outcome = coordinator.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed(SubmissionError::Validation));
        assert_eq!(
            coordinator.state(),
            SubmissionState::Error {
                message: VALIDATION_MESSAGE.into()
            }
        );
        assert_eq!(client.calls(), 0);
        assert_eq!(coordinator.fields().code, "X1");
    }

    #[tokio::test]
    async fn test_unknown_region_fails_validation() {
        let client = Arc::new(ScriptedClient::default());
        let coordinator = filled(client.clone());
        coordinator.update_field(Field::Server, "mars");

        let outcome = coordinator.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed(SubmissionError::Validation));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_clears_form_and_reports_id() {
        let client = Arc::new(ScriptedClient::answering(vec![Ok(FriendResponse::accepted(
            "A-9",
        ))]));
        let coordinator = filled(client.clone());

        let outcome = coordinator.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Succeeded {
                message: success_message("A-9")
            }
        );
        assert_eq!(coordinator.fields(), Default::default());

        let seen = client.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].server, Region::Europe);
        assert_eq!(seen[0].code, "X1");
    }

    #[tokio::test]
    async fn test_failures_keep_form() {
        let client = Arc::new(ScriptedClient::answering(vec![
            Ok(FriendResponse::rejected(None)),
            Err(ApiError::Timeout),
        ]));
        let coordinator = filled(client.clone());

        coordinator.submit().await;
        assert_eq!(coordinator.state().message(), Some(GENERIC_FAILURE_MESSAGE));
        assert_eq!(coordinator.fields().uid, "U1");

        coordinator.submit().await;
        assert_eq!(coordinator.state().message(), Some(FATAL_MESSAGE));
        assert_eq!(coordinator.fields().uid, "U1");
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_second_submit_while_loading_is_ignored() {
        let hold = Arc::new(Notify::new());
        let client = Arc::new(
            ScriptedClient::answering(vec![Ok(FriendResponse::accepted("1"))]).held(hold.clone()),
        );
        let coordinator = filled(client.clone());
        let mut states = coordinator.subscribe();

        let first = tokio::spawn({
            let coordinator = coordinator.clone();
            async move { coordinator.submit().await }
        });
        states
            .wait_for(SubmissionState::is_loading)
            .await
            .unwrap();
        assert_eq!(coordinator.state().message(), Some(LOADING_MESSAGE));

        assert_eq!(coordinator.submit().await, SubmitOutcome::Ignored);
        assert_eq!(client.calls(), 1);

        hold.notify_one();
        let outcome = first.await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Succeeded { .. }));
        assert!(!coordinator.is_loading());
    }
}
