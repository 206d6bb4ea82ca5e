//! services/api/src/adapters/analysis.rs
//!
//! This module contains the canned analysis adapter, the concrete implementation
//! of the `AnalysisService` port. Both branches serve hand-authored fixture data:
//! without a configured credential (or in demo mode) the fixed sample set is
//! returned verbatim, and with one the same set is returned with cosmetic
//! relabeling. A future model integration would replace the relabeling branch
//! while keeping this contract.

use async_trait::async_trait;
use decision_mirror_core::domain::{
    AnalysisMode, AnalysisResult, DecisionInput, EmotionalAnalysis, PhilosophicalGuidance,
    Preferences, RiskAnalysis, Scenario, ScenarioKind, TimelineImpact, TimelinePoint,
};
use decision_mirror_core::ports::{AnalysisService, PortResult};
use tracing::debug;

const SAMPLE_SUFFIX: &str = " (Sample Data)";
const ENHANCED_SUFFIX: &str = " (AI Enhanced)";
const SAMPLE_FACTOR_PREFIX: &str = "Sample uncertainty factor - ";
const ENHANCED_FACTOR_PREFIX: &str = "AI-analyzed factor - ";
const SAMPLE_STRATEGY_PREFIX: &str = "Sample strategy - ";
const ENHANCED_STRATEGY_PREFIX: &str = "AI-recommended strategy - ";
const SAMPLE_GUIDANCE_PREFIX: &str = "Sample ";
const ENHANCED_GUIDANCE_PREFIX: &str = "AI-enhanced ";
const CONFIGURE_GUIDANCE_SUFFIX: &str =
    " (Configure API key for personalized philosophical insights)";

/// How many characters of the user's own description get spliced into the
/// relabeled scenario text.
const DESCRIPTION_SPLICE_CHARS: usize = 100;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `AnalysisService` port from fixture data.
#[derive(Clone, Default)]
pub struct CannedAnalysisAdapter;

impl CannedAnalysisAdapter {
    /// Creates a new `CannedAnalysisAdapter`.
    pub fn new() -> Self {
        Self
    }
}

//=========================================================================================
// `AnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AnalysisService for CannedAnalysisAdapter {
    /// Selects one of the two canned result sets.
    ///
    /// Deterministic and total: identical inputs always produce identical
    /// output, and there is no failure path. Demo mode ignores a stored
    /// credential entirely.
    async fn analyze(
        &self,
        input: &DecisionInput,
        preferences: &Preferences,
    ) -> PortResult<AnalysisResult> {
        if preferences.mode == AnalysisMode::Demo || preferences.api_credential.is_none() {
            debug!("no API credential in play, serving sample analysis");
            return Ok(sample_analysis());
        }

        debug!("credential configured, serving relabeled analysis (no model call)");
        Ok(relabeled_analysis(input))
    }
}

//=========================================================================================
// Fixture Data (the sample branch)
//=========================================================================================

fn sample_analysis() -> AnalysisResult {
    AnalysisResult {
        used_fallback: true,
        scenarios: sample_scenarios(),
        risk: sample_risk_analysis(),
        emotional: sample_emotional_analysis(),
        guidance: sample_guidance(),
    }
}

fn sample_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "1".to_string(),
            kind: ScenarioKind::Best,
            title: format!("Optimal Outcome{}", SAMPLE_SUFFIX),
            description: "This is sample data. Everything goes better than expected with this \
                          decision. For personalized analysis, please add your OpenAI API key \
                          in Settings."
                .to_string(),
            probability: 25,
            timeline: vec![
                point(1, "Positive initial results (sample)", TimelineImpact::Positive),
                point(2, "Continued success (sample)", TimelineImpact::Positive),
                point(5, "Long-term benefits realized (sample)", TimelineImpact::Positive),
            ],
            emotional_score: 9,
            financial_impact: 45_000,
            happiness_index: 85,
            stress_level: 25,
        },
        Scenario {
            id: "2".to_string(),
            kind: ScenarioKind::Realistic,
            title: format!("Most Likely Scenario{}", SAMPLE_SUFFIX),
            description: "This is sample data showing a balanced outcome. For real AI analysis \
                          based on your specific situation, please configure your API key."
                .to_string(),
            probability: 50,
            timeline: vec![
                point(1, "Mixed initial results (sample)", TimelineImpact::Neutral),
                point(2, "Steady progress (sample)", TimelineImpact::Positive),
                point(5, "Solid foundation built (sample)", TimelineImpact::Positive),
            ],
            emotional_score: 7,
            financial_impact: 15_000,
            happiness_index: 70,
            stress_level: 45,
        },
        Scenario {
            id: "3".to_string(),
            kind: ScenarioKind::Worst,
            title: format!("Challenging Outcome{}", SAMPLE_SUFFIX),
            description: "This is sample data showing potential challenges. Real analysis would \
                          consider your specific circumstances and provide personalized insights."
                .to_string(),
            probability: 25,
            timeline: vec![
                point(1, "Initial difficulties (sample)", TimelineImpact::Negative),
                point(2, "Learning from setbacks (sample)", TimelineImpact::Neutral),
                point(5, "Recovery and growth (sample)", TimelineImpact::Positive),
            ],
            emotional_score: 4,
            financial_impact: -8_000,
            happiness_index: 45,
            stress_level: 75,
        },
    ]
}

fn sample_risk_analysis() -> RiskAnalysis {
    RiskAnalysis {
        risk_score: 55,
        regret_probability: 35,
        uncertainty_factors: vec![
            format!("{}Market conditions (Configure API key for personalized analysis)", SAMPLE_FACTOR_PREFIX),
            format!("{}Personal circumstances changes", SAMPLE_FACTOR_PREFIX),
            format!("{}External economic factors", SAMPLE_FACTOR_PREFIX),
            format!("{}Competition and industry changes", SAMPLE_FACTOR_PREFIX),
            format!("{}Unforeseen personal developments", SAMPLE_FACTOR_PREFIX),
        ],
        mitigation_strategies: vec![
            format!("{}Create backup plans (Real strategies would be personalized)", SAMPLE_STRATEGY_PREFIX),
            format!("{}Build professional network", SAMPLE_STRATEGY_PREFIX),
            format!("{}Develop transferable skills", SAMPLE_STRATEGY_PREFIX),
            format!("{}Maintain financial reserves", SAMPLE_STRATEGY_PREFIX),
            format!("{}Set regular review checkpoints", SAMPLE_STRATEGY_PREFIX),
            format!("{}Seek mentorship and guidance", SAMPLE_STRATEGY_PREFIX),
        ],
    }
}

fn sample_emotional_analysis() -> EmotionalAnalysis {
    EmotionalAnalysis {
        satisfaction: 75,
        stress: 45,
        regret_potential: 30,
        happiness: 70,
        confidence: 65,
    }
}

fn sample_guidance() -> PhilosophicalGuidance {
    PhilosophicalGuidance {
        stoic: format!(
            "Sample Stoic guidance: Focus on what you can control in this decision.{}",
            CONFIGURE_GUIDANCE_SUFFIX
        ),
        buddhist: "Sample Buddhist guidance: Consider how this choice affects suffering for \
                   yourself and others."
            .to_string(),
        rationalist: "Sample Rationalist guidance: Analyze the evidence and logical reasoning \
                      behind each option."
            .to_string(),
        utilitarian: "Sample Utilitarian guidance: Evaluate which choice creates the greatest \
                      overall good."
            .to_string(),
        existentialist: "Sample Existentialist guidance: Choose authentically based on your \
                         personal values."
            .to_string(),
    }
}

fn point(year: u32, event: &str, impact: TimelineImpact) -> TimelinePoint {
    TimelinePoint {
        year,
        event: event.to_string(),
        impact,
    }
}

//=========================================================================================
// The Relabeled Branch (credential configured)
//=========================================================================================

fn relabeled_analysis(input: &DecisionInput) -> AnalysisResult {
    let spliced = splice_description(&input.description);

    let scenarios = sample_scenarios()
        .into_iter()
        .map(|mut scenario| {
            scenario.title = scenario.title.replace(SAMPLE_SUFFIX, ENHANCED_SUFFIX);
            scenario.description = format!(
                "AI-analyzed scenario based on your specific situation: {}...",
                spliced
            );
            scenario
        })
        .collect();

    let mut risk = sample_risk_analysis();
    risk.uncertainty_factors = risk
        .uncertainty_factors
        .iter()
        .map(|factor| factor.replace(SAMPLE_FACTOR_PREFIX, ENHANCED_FACTOR_PREFIX))
        .collect();
    risk.mitigation_strategies = risk
        .mitigation_strategies
        .iter()
        .map(|strategy| strategy.replace(SAMPLE_STRATEGY_PREFIX, ENHANCED_STRATEGY_PREFIX))
        .collect();

    let guidance = sample_guidance();
    let guidance = PhilosophicalGuidance {
        stoic: relabel_guidance(&guidance.stoic),
        buddhist: relabel_guidance(&guidance.buddhist),
        rationalist: relabel_guidance(&guidance.rationalist),
        utilitarian: relabel_guidance(&guidance.utilitarian),
        existentialist: relabel_guidance(&guidance.existentialist),
    };

    AnalysisResult {
        used_fallback: false,
        scenarios,
        risk,
        emotional: sample_emotional_analysis(),
        guidance,
    }
}

fn relabel_guidance(text: &str) -> String {
    text.replace(SAMPLE_GUIDANCE_PREFIX, ENHANCED_GUIDANCE_PREFIX)
        .replace(CONFIGURE_GUIDANCE_SUFFIX, "")
}

/// The leading `DESCRIPTION_SPLICE_CHARS` characters of the description,
/// cut on a character boundary so multi-byte text never panics.
fn splice_description(description: &str) -> &str {
    match description.char_indices().nth(DESCRIPTION_SPLICE_CHARS) {
        Some((index, _)) => &description[..index],
        None => description,
    }
}

//=========================================================================================
// Tests
//=========================================================================================
