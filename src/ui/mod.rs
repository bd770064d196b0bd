// Module declarations
mod app;
pub mod dashboard;
pub mod metrics;
pub mod notifications;
// Re-exports for external use
pub use app::{App, UIConfig, run};
