//! Wire types for the analysis service, plus the domain view of an analysis.
//!
//! The service speaks snake_case JSON with its own field names
//! (`horse_results`, `median_rate`, ...). Those are mapped onto the domain
//! names with serde renames so the rest of the crate never sees them.

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /analyze`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub race_event_id: String,
    pub target_date: String,
}

/// Body of `POST /chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Successful `POST /analyze` response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyzeResponse {
    pub session_id: String,
    #[serde(rename = "data")]
    pub result: AnalysisResult,
}

/// Successful `POST /chat` response. The service also echoes the history,
/// which we ignore.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub reply: String,
}

/// `GET /` health check response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub app: Option<String>,
}

/// Error body the service attaches to non-success responses (when it does).
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub detail: String,
}

// ============================================================================
// Analysis payload
// ============================================================================

/// Structured output of one analysis run.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    /// Race the analysis was run for, when the service echoes it back.
    #[serde(default)]
    pub race_event_id: Option<String>,
    #[serde(rename = "ai_reasoning", default)]
    pub narrative: String,
    /// Ordered by analysis rank. Consumers must not re-sort.
    #[serde(rename = "horse_results", default)]
    pub ranked_entries: Vec<RankedEntry>,
}

/// One scored candidate.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RankedEntry {
    #[serde(rename = "predicted_rank")]
    pub rank: u32,
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub matched_conditions: Vec<Condition>,
}

/// A historical condition the entry matches, with its track record.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Condition {
    pub name: String,
    /// In `[0, 1]`.
    #[serde(rename = "median_rate")]
    pub success_rate: f64,
    #[serde(rename = "n_top3")]
    pub support_count: u32,
    #[serde(rename = "n_all")]
    pub sample_size: u32,
}
