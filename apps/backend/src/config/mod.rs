pub mod orchestrator;

pub use orchestrator::OrchestratorConfig;
