// Profile analysis: running the evaluator battery, streaming progress, and
// persisting the finished report.

pub mod events;
pub mod handlers;
pub mod orchestrator;
pub mod reconciler;

pub use orchestrator::ProfileChecker;
