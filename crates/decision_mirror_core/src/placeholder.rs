//! crates/decision_mirror_core/src/placeholder.rs
//!
//! The fixed placeholder analysis filled in synchronously when a decision is
//! submitted, so the caller never renders an empty state. Enrichment may
//! later replace these values in place; when it is skipped or fails they
//! simply stay.

use crate::domain::{
    EmotionalAnalysis, RiskAnalysis, Scenario, ScenarioKind, TimelineImpact, TimelinePoint,
};

/// Placeholder risk score shown until enrichment resolves.
pub const RISK_SCORE: u8 = 55;

/// The values list attached to every freshly submitted decision.
pub fn default_values() -> Vec<String> {
    ["growth", "stability", "authenticity", "impact"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The three placeholder scenarios, in best/realistic/worst order.
/// Probabilities sum to 100.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "1".to_string(),
            kind: ScenarioKind::Best,
            title: "Optimal Outcome".to_string(),
            description: "Everything goes better than expected. New opportunities emerge, \
                          skills develop rapidly, and the decision leads to unprecedented \
                          growth and satisfaction."
                .to_string(),
            probability: 25,
            timeline: vec![
                point(1, "Successful transition and immediate positive impact", TimelineImpact::Positive),
                point(2, "Recognition and new opportunities arise", TimelineImpact::Positive),
                point(5, "Significant career advancement and personal fulfillment", TimelineImpact::Positive),
            ],
            emotional_score: 9,
            financial_impact: 45_000,
            happiness_index: 85,
            stress_level: 25,
        },
        Scenario {
            id: "2".to_string(),
            kind: ScenarioKind::Realistic,
            title: "Most Likely Scenario".to_string(),
            description: "A balanced outcome with both challenges and rewards. Initial \
                          adjustment period followed by steady progress and moderate \
                          satisfaction."
                .to_string(),
            probability: 50,
            timeline: vec![
                point(1, "Initial challenges but gradual adaptation", TimelineImpact::Neutral),
                point(2, "Steady progress and skill development", TimelineImpact::Positive),
                point(5, "Solid foundation built with room for growth", TimelineImpact::Positive),
            ],
            emotional_score: 7,
            financial_impact: 15_000,
            happiness_index: 70,
            stress_level: 45,
        },
        Scenario {
            id: "3".to_string(),
            kind: ScenarioKind::Worst,
            title: "Challenging Outcome".to_string(),
            description: "Significant obstacles and setbacks occur. The decision leads to \
                          unexpected difficulties requiring substantial effort to overcome."
                .to_string(),
            probability: 25,
            timeline: vec![
                point(1, "Major challenges and adaptation difficulties", TimelineImpact::Negative),
                point(2, "Continued struggles but learning experiences", TimelineImpact::Negative),
                point(5, "Recovery and lessons learned, though at significant cost", TimelineImpact::Neutral),
            ],
            emotional_score: 4,
            financial_impact: -8_000,
            happiness_index: 45,
            stress_level: 75,
        },
    ]
}

/// Placeholder emotional profile.
pub fn emotional_analysis() -> EmotionalAnalysis {
    EmotionalAnalysis {
        satisfaction: 75,
        stress: 45,
        regret_potential: 30,
        happiness: 70,
        confidence: 65,
    }
}

/// Placeholder risk breakdown for the analysis view.
pub fn risk_analysis() -> RiskAnalysis {
    RiskAnalysis {
        risk_score: RISK_SCORE,
        regret_probability: 35,
        uncertainty_factors: vec![
            "Market conditions may change unexpectedly, affecting the success of this decision".to_string(),
            "Personal circumstances could evolve, making this choice less suitable over time".to_string(),
            "External factors beyond your control may influence the outcome significantly".to_string(),
            "Competition in your field might intensify, creating additional challenges".to_string(),
            "Economic conditions could impact the financial aspects of this decision".to_string(),
        ],
        mitigation_strategies: vec![
            "Create a detailed backup plan with alternative options if the primary choice doesn't work out".to_string(),
            "Build a strong professional network to provide support and opportunities".to_string(),
            "Develop transferable skills that will be valuable regardless of the specific outcome".to_string(),
            "Maintain financial reserves to weather any temporary setbacks".to_string(),
            "Set up regular review points to assess progress and make adjustments as needed".to_string(),
            "Seek mentorship from others who have made similar decisions successfully".to_string(),
        ],
    }
}

fn point(year: u32, event: &str, impact: TimelineImpact) -> TimelinePoint {
    TimelinePoint {
        year,
        event: event.to_string(),
        impact,
    }
}
