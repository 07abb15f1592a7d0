use std::fmt;

use async_trait::async_trait;

use super::types::{AnalyzeRequest, AnalyzeResponse, ChatReply, ChatRequest, ServiceStatus};

/// Fallback detail when a failed response carries no readable `detail`.
pub const GENERIC_FAILURE_DETAIL: &str = "the service returned an error";

/// Errors a service call can end in. Each call makes exactly one attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The service answered with a non-success status (or a body we could
    /// not decode). `detail` is the server-supplied text when parseable.
    RequestFailed { status: u16, detail: String },
    /// No response was obtainable (connection refused, DNS, reset).
    TransportFailed(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::RequestFailed { status, detail } => {
                write!(f, "request failed (HTTP {status}): {detail}")
            }
            ServiceError::TransportFailed(reason) => write!(f, "transport error: {reason}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// The remote analysis/chat service.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Returns the name of the backend (for logs).
    fn name(&self) -> &str;

    /// Runs an analysis and opens a chat session for it.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ServiceError>;

    /// Sends one follow-up message within an established session.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ServiceError>;

    /// Checks that the service is up.
    async fn health(&self) -> Result<ServiceStatus, ServiceError>;
}
