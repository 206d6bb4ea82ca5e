pub mod domain;
pub mod placeholder;
pub mod ports;
pub mod session;

pub use domain::{
    AnalysisMode, AnalysisResult, Decision, DecisionCategory, DecisionInput, DecisionStatus,
    EmotionalAnalysis, EnrichmentStatus, PhilosophicalGuidance, Preferences, RiskAnalysis,
    Scenario, ScenarioKind, TimelineImpact, TimelinePoint, User, UserCredentials,
};
pub use ports::{AnalysisService, ClientStorage, CredentialStore, MemoryStorage, PortError, PortResult};
pub use session::{AuthState, ClientSession};
