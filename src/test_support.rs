//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::service::{
    AnalysisResult, AnalysisService, AnalyzeRequest, AnalyzeResponse, ChatReply, ChatRequest,
    Condition, RankedEntry, ServiceError, ServiceStatus,
};

/// An in-memory service that answers with canned outcomes and records calls.
pub struct ScriptedService {
    analyze: Result<AnalyzeResponse, ServiceError>,
    chat: Result<String, ServiceError>,
    calls: Mutex<Vec<&'static str>>,
}

impl Default for ScriptedService {
    fn default() -> Self {
        Self {
            analyze: Ok(sample_response("abc123", 5)),
            chat: Ok("ok".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedService {
    pub fn with_analyze(mut self, outcome: Result<AnalyzeResponse, ServiceError>) -> Self {
        self.analyze = outcome;
        self
    }

    pub fn with_chat(mut self, outcome: Result<&str, ServiceError>) -> Self {
        self.chat = outcome.map(str::to_string);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

#[async_trait]
impl AnalysisService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn analyze(&self, _request: &AnalyzeRequest) -> Result<AnalyzeResponse, ServiceError> {
        self.record("analyze");
        self.analyze.clone()
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatReply, ServiceError> {
        self.record("chat");
        self.chat.clone().map(|reply| ChatReply { reply })
    }

    async fn health(&self) -> Result<ServiceStatus, ServiceError> {
        self.record("health");
        Ok(ServiceStatus {
            status: "ok".to_string(),
            app: None,
        })
    }
}

pub fn condition(name: &str, rate: f64, top3: u32, all: u32) -> Condition {
    Condition {
        name: name.to_string(),
        success_rate: rate,
        support_count: top3,
        sample_size: all,
    }
}

pub fn entry(rank: u32, name: &str, score: f64, conditions: Vec<Condition>) -> RankedEntry {
    RankedEntry {
        rank,
        name: name.to_string(),
        score,
        matched_conditions: conditions,
    }
}

/// A result with `n` ranked entries, each matching three conditions.
pub fn sample_result(n: u32) -> AnalysisResult {
    AnalysisResult {
        race_event_id: Some("FEB-S-2024".to_string()),
        narrative: "Runner 1 has the best expected value.\nStrong match with past winners."
            .to_string(),
        ranked_entries: (1..=n)
            .map(|rank| {
                entry(
                    rank,
                    &format!("Runner {rank}"),
                    100.0 - f64::from(rank) * 7.5,
                    vec![
                        condition("Dirt 1600m", 0.42, 5, 12),
                        condition("Post position 1-4", 0.3, 3, 10),
                        condition("Prior G1 top 3", 0.25, 2, 8),
                    ],
                )
            })
            .collect(),
    }
}

pub fn sample_response(session_id: &str, n: u32) -> AnalyzeResponse {
    AnalyzeResponse {
        session_id: session_id.to_string(),
        result: sample_result(n),
    }
}

/// Creates a test App bound to the default race.
pub fn test_app() -> App {
    App::from_config(&ResolvedConfig {
        api_base: "http://localhost:0/api".to_string(),
        race_event_id: "FEB-S-2024".to_string(),
        target_date: "2024-02-03".to_string(),
        race_name: "February Stakes".to_string(),
    })
}
