//! # Service Client
//!
//! Everything that talks to the remote analysis service. Each call makes one
//! attempt and ends in exactly one of `Ok(payload)` or `Err(ServiceError)`.
//!
//! [`perform`] is the bridge back into the core: it runs a
//! [`ServiceRequest`] produced by the reducer and turns the outcome into the
//! completion [`Action`] the reducer expects next.

pub mod client;
pub mod http;
pub mod types;

pub use client::{AnalysisService, GENERIC_FAILURE_DETAIL, ServiceError};
pub use http::HttpServiceClient;
pub use types::{
    AnalysisResult, AnalyzeRequest, AnalyzeResponse, ChatReply, ChatRequest, Condition,
    RankedEntry, ServiceStatus,
};

use crate::core::action::Action;

/// A network operation the reducer wants issued.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    Analyze(AnalyzeRequest),
    Chat(ChatRequest),
    Health,
}

/// Runs one request against the service and wraps the outcome as an action.
pub async fn perform(service: &dyn AnalysisService, request: ServiceRequest) -> Action {
    match request {
        ServiceRequest::Analyze(req) => Action::AnalyzeCompleted(service.analyze(&req).await),
        ServiceRequest::Chat(req) => {
            Action::ChatCompleted(service.chat(&req).await.map(|r| r.reply))
        }
        ServiceRequest::Health => Action::HealthChecked(service.health().await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedService;

    #[tokio::test]
    async fn perform_chat_unwraps_reply_text() {
        let service = ScriptedService::default().with_chat(Ok("Aloha"));
        let action = perform(
            &service,
            ServiceRequest::Chat(ChatRequest {
                session_id: "abc123".into(),
                message: "hi".into(),
            }),
        )
        .await;
        assert_eq!(action, Action::ChatCompleted(Ok("Aloha".to_string())));
    }

    #[tokio::test]
    async fn perform_passes_failures_through() {
        let service = ScriptedService::default()
            .with_analyze(Err(ServiceError::TransportFailed("refused".into())));
        let action = perform(
            &service,
            ServiceRequest::Analyze(AnalyzeRequest {
                race_event_id: "FEB-S-2024".into(),
                target_date: "2024-02-03".into(),
            }),
        )
        .await;
        assert_eq!(
            action,
            Action::AnalyzeCompleted(Err(ServiceError::TransportFailed("refused".into())))
        );
        assert_eq!(service.calls(), vec!["analyze"]);
    }
}
