pub mod analysis;
pub mod db;

pub use analysis::CannedAnalysisAdapter;
pub use db::PgCredentialStore;
