// stagehand/src/runtime/mod.rs

//! The stage runtime seam: handler registration, ordered execution and the
//! bail/overlay failure policies.

pub mod control;
pub mod definition;
pub mod execution;
pub mod executor;
pub mod handler;
pub mod hooks;
pub mod report;
pub mod state;

pub use control::{PipelineControl, PipelineResult};
pub use definition::StageRuntime;
pub use executor::StageExecutor;
pub use handler::{StageHandler, StageInvocation};
pub use report::{BuildReport, FailurePolicy, Severity, StageDiagnostic};
pub use state::{BuildLedger, BuildState};
