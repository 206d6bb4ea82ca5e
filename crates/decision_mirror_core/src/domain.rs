//! crates/decision_mirror_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or transport format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-local storage key holding the bearer session token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Client-local storage key holding the optional analysis API credential.
pub const API_CREDENTIAL_KEY: &str = "decision_mirror_api_key";
/// Client-local storage key holding the demo/real mode switch.
pub const MODE_KEY: &str = "decision_mirror_mode";

// Represents a user - used throughout the app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

// Only used internally for register/login - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    /// Always true today; email verification is declared but not built.
    pub is_verified: bool,
}

/// The life areas a decision can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionCategory {
    Career,
    Relationship,
    Financial,
    Health,
    Education,
    Lifestyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Analyzing,
    Decided,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Best,
    Realistic,
    Worst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineImpact {
    Positive,
    Negative,
    Neutral,
}

/// A single projected milestone within a scenario's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub year: u32,
    pub event: String,
    pub impact: TimelineImpact,
}

/// One simulated outcome of a decision. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    /// Serialized as `type`, the name clients know this field by.
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    pub title: String,
    pub description: String,
    /// The three scenarios of a decision sum to 100.
    pub probability: u8,
    pub timeline: Vec<TimelinePoint>,
    pub emotional_score: u8,
    /// Signed; a negative value is a projected loss.
    pub financial_impact: i64,
    pub happiness_index: u8,
    pub stress_level: u8,
}

/// Projected emotional profile for a decision (all fields 0-100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalAnalysis {
    pub satisfaction: u8,
    pub stress: u8,
    pub regret_potential: u8,
    pub happiness: u8,
    pub confidence: u8,
}

/// Risk breakdown accompanying a set of scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub risk_score: u8,
    pub regret_probability: u8,
    pub uncertainty_factors: Vec<String>,
    pub mitigation_strategies: Vec<String>,
}

/// One paragraph of advice per philosophical school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhilosophicalGuidance {
    pub stoic: String,
    pub buddhist: String,
    pub rationalist: String,
    pub utilitarian: String,
    pub existentialist: String,
}

/// The full bundle produced by an analysis pass over one decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// True when the fixed sample data was served because no API credential
    /// is configured (or demo mode forced it).
    pub used_fallback: bool,
    pub scenarios: Vec<Scenario>,
    pub risk: RiskAnalysis,
    pub emotional: EmotionalAnalysis,
    pub guidance: PhilosophicalGuidance,
}

/// The client's analysis mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Demo,
    Real,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Demo => "demo",
            AnalysisMode::Real => "real",
        }
    }

    /// Parses the persisted mode string; anything unrecognised is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "demo" => Some(AnalysisMode::Demo),
            "real" => Some(AnalysisMode::Real),
            _ => None,
        }
    }
}

/// Client preferences persisted in local storage. Not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub mode: AnalysisMode,
    pub api_credential: Option<String>,
}

impl Preferences {
    /// Whether a submitted decision should be enriched asynchronously.
    ///
    /// Demo mode is a hard override: a stored credential is ignored
    /// entirely, not merely deprioritised.
    pub fn wants_enrichment(&self) -> bool {
        self.mode == AnalysisMode::Real && self.api_credential.is_some()
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Real,
            api_credential: None,
        }
    }
}

/// Outcome of the asynchronous enrichment step for a decision.
///
/// `Skipped` means no enrichment was requested (demo mode or no credential);
/// `Failed` means enrichment was attempted and errored. Both leave the
/// placeholder analysis in place, but callers can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    Skipped,
    Pending,
    Succeeded,
    Failed,
}

/// What the user types into the decision form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionInput {
    pub title: String,
    pub description: String,
    pub category: DecisionCategory,
}

/// The decision currently being analyzed. Owned by the active view session
/// and never persisted across reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: DecisionCategory,
    pub created_at: DateTime<Utc>,
    pub status: DecisionStatus,
    /// Exactly three, in best/realistic/worst order.
    pub scenarios: Vec<Scenario>,
    pub risk_score: u8,
    pub emotional_impact: EmotionalAnalysis,
    pub values: Vec<String>,
    pub enrichment: EnrichmentStatus,
}
