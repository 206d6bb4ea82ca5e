pub mod auth;
pub mod decisions;
pub mod middleware;
pub mod state;

// Re-export the pieces the binary needs to build the web server router.
pub use decisions::submit_decision_handler;
pub use middleware::require_auth;
