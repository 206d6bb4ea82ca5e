//! crates/decision_mirror_core/src/session.rs
//!
//! The client-facing session: authentication state derived from the stored
//! bearer token, the persisted preferences, and the decision view model
//! currently on screen.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    AnalysisMode, AnalysisResult, Decision, DecisionInput, DecisionStatus, EnrichmentStatus,
    Preferences, API_CREDENTIAL_KEY, AUTH_TOKEN_KEY, MODE_KEY,
};
use crate::placeholder;
use crate::ports::{ClientStorage, PortError, PortResult};

//=========================================================================================
// Preference persistence
//=========================================================================================

impl Preferences {
    /// Reads preferences from client storage. An unrecognised mode string
    /// falls back to `Real`, the application default.
    pub fn load(storage: &impl ClientStorage) -> Self {
        let mode = storage
            .get(MODE_KEY)
            .and_then(|raw| AnalysisMode::parse(&raw))
            .unwrap_or(AnalysisMode::Real);
        Self {
            mode,
            api_credential: storage.get(API_CREDENTIAL_KEY),
        }
    }

    /// Writes preferences back to client storage. Clearing the credential
    /// removes its key entirely rather than storing an empty string.
    pub fn store(&self, storage: &mut impl ClientStorage) {
        storage.put(MODE_KEY, self.mode.as_str());
        match &self.api_credential {
            Some(credential) => storage.put(API_CREDENTIAL_KEY, credential),
            None => storage.remove(API_CREDENTIAL_KEY),
        }
    }
}

//=========================================================================================
// Decision construction
//=========================================================================================

impl Decision {
    /// Builds a freshly submitted decision, filled with placeholder analysis.
    ///
    /// Starts in `Analyzing` status; enrichment is `Pending` when the
    /// preferences call for it and `Skipped` otherwise.
    pub fn draft(input: DecisionInput, preferences: &Preferences) -> Self {
        let enrichment = if preferences.wants_enrichment() {
            EnrichmentStatus::Pending
        } else {
            EnrichmentStatus::Skipped
        };

        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            category: input.category,
            created_at: Utc::now(),
            status: DecisionStatus::Analyzing,
            scenarios: placeholder::scenarios(),
            risk_score: placeholder::RISK_SCORE,
            emotional_impact: placeholder::emotional_analysis(),
            values: placeholder::default_values(),
            enrichment,
        }
    }

    /// Replaces the analysis fields in place, identity preserved.
    pub fn apply_analysis(&mut self, analysis: &AnalysisResult) {
        self.scenarios = analysis.scenarios.clone();
        self.risk_score = analysis.risk.risk_score;
        self.emotional_impact = analysis.emotional.clone();
        self.enrichment = EnrichmentStatus::Succeeded;
    }
}

//=========================================================================================
// Client Session
//=========================================================================================

/// The two authentication states a client can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

/// Holds the bearer token slot and the decision currently being analyzed.
///
/// Storage access goes through the injected [`ClientStorage`]; nothing here
/// reaches for an ambient global store.
pub struct ClientSession<S: ClientStorage> {
    storage: S,
    state: AuthState,
    current_decision: Option<Decision>,
}

impl<S: ClientStorage> ClientSession<S> {
    /// A token already present in storage counts as logged in. No expiry
    /// check happens here; a stale token is only discovered when a
    /// protected call rejects it.
    pub fn new(storage: S) -> Self {
        let state = if storage.get(AUTH_TOKEN_KEY).is_some() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        };
        Self {
            storage,
            state,
            current_decision: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::LoggedIn
    }

    /// The stored bearer token, if any.
    pub fn auth_token(&self) -> Option<String> {
        self.storage.get(AUTH_TOKEN_KEY)
    }

    /// Stores the freshly issued token and transitions to `LoggedIn`.
    pub fn on_login_success(&mut self, token: &str) {
        self.storage.put(AUTH_TOKEN_KEY, token);
        self.state = AuthState::LoggedIn;
    }

    /// Removes the stored token and discards all in-memory decision state.
    pub fn logout(&mut self) {
        self.storage.remove(AUTH_TOKEN_KEY);
        self.state = AuthState::LoggedOut;
        self.current_decision = None;
    }

    /// The decision currently on screen, if one has been submitted.
    pub fn current_decision(&self) -> Option<&Decision> {
        self.current_decision.as_ref()
    }

    /// Creates the decision synchronously, filled with placeholder analysis
    /// so there is never an empty state to render. When the preferences call
    /// for enrichment the decision starts `Pending` and is patched later via
    /// [`apply_enrichment`](Self::apply_enrichment); otherwise it is
    /// `Skipped` and the placeholders are final.
    pub fn submit_decision(
        &mut self,
        input: DecisionInput,
        preferences: &Preferences,
    ) -> PortResult<&Decision> {
        if !self.is_authenticated() {
            return Err(PortError::Unauthorized);
        }

        let decision = Decision::draft(input, preferences);
        Ok(self.current_decision.insert(decision))
    }

    /// Replaces the decision's analysis fields in place, identity preserved.
    ///
    /// A patch addressed to a decision that is no longer current (replaced,
    /// or torn down by logout) is dropped silently; a late enrichment must
    /// never be a fault.
    pub fn apply_enrichment(&mut self, decision_id: Uuid, analysis: &AnalysisResult) {
        match self.current_decision.as_mut() {
            Some(decision) if decision.id == decision_id => {
                decision.apply_analysis(analysis);
            }
            _ => {
                debug!(%decision_id, "dropping enrichment for a decision that is no longer current");
            }
        }
    }

    /// Records a failed enrichment. The placeholder values stay on screen
    /// and no error surfaces to the caller.
    pub fn enrichment_failed(&mut self, decision_id: Uuid) {
        if let Some(decision) = self.current_decision.as_mut() {
            if decision.id == decision_id {
                decision.enrichment = EnrichmentStatus::Failed;
            }
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DecisionCategory, ScenarioKind};
    use crate::ports::MemoryStorage;

    fn job_input() -> DecisionInput {
        DecisionInput {
            title: "Should I take the job?".to_string(),
            description: "A new role in another city with better pay.".to_string(),
            category: DecisionCategory::Career,
        }
    }

    fn logged_in_session() -> ClientSession<MemoryStorage> {
        let mut session = ClientSession::new(MemoryStorage::new());
        session.on_login_success("token-abc");
        session
    }

    #[test]
    fn starts_logged_in_when_token_already_stored() {
        let mut storage = MemoryStorage::new();
        storage.put(AUTH_TOKEN_KEY, "leftover-token");

        let session = ClientSession::new(storage);
        assert!(session.is_authenticated(), "stored token should mean logged in");
    }

    #[test]
    fn starts_logged_out_without_token() {
        let session = ClientSession::new(MemoryStorage::new());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_removes_token_and_decision_state() {
        let mut session = logged_in_session();
        let preferences = Preferences::default();
        session
            .submit_decision(job_input(), &preferences)
            .expect("submission should succeed while logged in");

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.auth_token().is_none(), "auth_token key should be gone");
        assert!(session.current_decision().is_none(), "decision state should be discarded");
    }

    #[test]
    fn submit_is_rejected_while_logged_out() {
        let mut session = ClientSession::new(MemoryStorage::new());
        let result = session.submit_decision(job_input(), &Preferences::default());
        assert!(matches!(result, Err(PortError::Unauthorized)));
    }

    #[test]
    fn submitted_decision_has_three_scenarios_summing_to_100() {
        let mut session = logged_in_session();
        let preferences = Preferences {
            mode: AnalysisMode::Demo,
            api_credential: None,
        };

        let decision = session
            .submit_decision(job_input(), &preferences)
            .expect("submission should succeed");

        assert_eq!(decision.status, DecisionStatus::Analyzing);
        assert_eq!(decision.scenarios.len(), 3);
        let kinds: Vec<ScenarioKind> = decision.scenarios.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![ScenarioKind::Best, ScenarioKind::Realistic, ScenarioKind::Worst]
        );
        let probability_sum: u32 = decision
            .scenarios
            .iter()
            .map(|s| u32::from(s.probability))
            .sum();
        assert_eq!(probability_sum, 100, "scenario probabilities must sum to 100");
    }

    #[test]
    fn demo_mode_skips_enrichment_even_with_credential() {
        let mut session = logged_in_session();
        let preferences = Preferences {
            mode: AnalysisMode::Demo,
            api_credential: Some("sk-configured".to_string()),
        };

        let decision = session
            .submit_decision(job_input(), &preferences)
            .expect("submission should succeed");
        assert_eq!(decision.enrichment, EnrichmentStatus::Skipped);
    }

    #[test]
    fn real_mode_with_credential_starts_enrichment_pending() {
        let mut session = logged_in_session();
        let preferences = Preferences {
            mode: AnalysisMode::Real,
            api_credential: Some("sk-configured".to_string()),
        };

        let decision = session
            .submit_decision(job_input(), &preferences)
            .expect("submission should succeed");
        assert_eq!(decision.enrichment, EnrichmentStatus::Pending);
    }

    #[test]
    fn enrichment_failure_keeps_placeholder_risk_score() {
        let mut session = logged_in_session();
        let preferences = Preferences {
            mode: AnalysisMode::Real,
            api_credential: Some("sk-configured".to_string()),
        };
        let decision_id = session
            .submit_decision(job_input(), &preferences)
            .expect("submission should succeed")
            .id;

        session.enrichment_failed(decision_id);

        let decision = session.current_decision().expect("decision should still be current");
        assert_eq!(decision.risk_score, placeholder::RISK_SCORE);
        assert_eq!(decision.enrichment, EnrichmentStatus::Failed);
    }

    #[test]
    fn stale_enrichment_after_logout_is_a_no_op() {
        let mut session = logged_in_session();
        let preferences = Preferences {
            mode: AnalysisMode::Real,
            api_credential: Some("sk-configured".to_string()),
        };
        let decision_id = session
            .submit_decision(job_input(), &preferences)
            .expect("submission should succeed")
            .id;

        session.logout();

        let analysis = AnalysisResult {
            used_fallback: false,
            scenarios: placeholder::scenarios(),
            risk: placeholder::risk_analysis(),
            emotional: placeholder::emotional_analysis(),
            guidance: crate::domain::PhilosophicalGuidance {
                stoic: String::new(),
                buddhist: String::new(),
                rationalist: String::new(),
                utilitarian: String::new(),
                existentialist: String::new(),
            },
        };
        // Must not panic, and must not resurrect any decision state.
        session.apply_enrichment(decision_id, &analysis);
        assert!(session.current_decision().is_none());
    }

    #[test]
    fn enrichment_for_a_replaced_decision_is_dropped() {
        let mut session = logged_in_session();
        let preferences = Preferences {
            mode: AnalysisMode::Real,
            api_credential: Some("sk-configured".to_string()),
        };
        let first_id = session
            .submit_decision(job_input(), &preferences)
            .expect("first submission should succeed")
            .id;
        let second_id = session
            .submit_decision(job_input(), &preferences)
            .expect("second submission should succeed")
            .id;
        assert_ne!(first_id, second_id);

        session.enrichment_failed(first_id);

        let decision = session.current_decision().expect("second decision should be current");
        assert_eq!(
            decision.enrichment,
            EnrichmentStatus::Pending,
            "a stale failure must not touch the current decision"
        );
    }

    #[test]
    fn preferences_round_trip_through_storage() {
        let mut storage = MemoryStorage::new();
        let preferences = Preferences {
            mode: AnalysisMode::Demo,
            api_credential: Some("sk-test".to_string()),
        };
        preferences.store(&mut storage);

        assert_eq!(Preferences::load(&storage), preferences);

        let cleared = Preferences {
            mode: AnalysisMode::Real,
            api_credential: None,
        };
        cleared.store(&mut storage);
        assert!(storage.get(API_CREDENTIAL_KEY).is_none(), "clearing removes the key");
        assert_eq!(Preferences::load(&storage), cleared);
    }

    #[test]
    fn unknown_mode_string_falls_back_to_real() {
        let mut storage = MemoryStorage::new();
        storage.put(MODE_KEY, "turbo");
        assert_eq!(Preferences::load(&storage).mode, AnalysisMode::Real);
    }
}
