pub mod error;
pub mod metrics;
pub mod session;
pub mod session_manager;
pub mod session_params;
pub mod session_state;
pub mod subscribers;
