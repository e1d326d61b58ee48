//! The stage contract and the driver that sequences stages.

use std::path::PathBuf;

use veneer_engine::AbstractionManifest;
use veneer_mappings::MappingTable;
use veneer_policy::SelectionPolicy;

use crate::error::PipelineError;

/// In-memory products handed from stage to stage.
///
/// Filesystem products flow through [`crate::RunPaths`]; parsed structures
/// that later stages consume directly live here.
#[derive(Default)]
pub struct RunState {
    /// The mapping table, loaded by the mappings stage.
    pub table: Option<MappingTable>,

    /// The selection policy, loaded by the policy stage.
    pub policy: Option<SelectionPolicy>,

    /// The abstraction manifest emitted by the implementation pass.
    pub abstraction: Option<AbstractionManifest>,

    /// Local paths of the fetched dependency libraries.
    pub library_paths: Vec<PathBuf>,
}

/// One pipeline stage.
///
/// Stages declare their filesystem inputs and outputs so the driver can
/// verify preconditions without each stage re-checking them; in-memory
/// products are checked by the consuming stage itself.
pub trait Stage {
    /// Short stage name for progress and error reporting.
    fn name(&self) -> &'static str;

    /// Filesystem paths that must exist before the stage runs.
    fn inputs(&self) -> Vec<PathBuf>;

    /// Filesystem paths the stage produces.
    fn outputs(&self) -> Vec<PathBuf>;

    /// Runs the stage.
    fn run(&self, state: &mut RunState) -> Result<(), PipelineError>;
}

/// Runs the stages in order, aborting on the first error.
///
/// `progress` is invoked with each stage name just before it runs.
pub fn run_stages(
    stages: &[&dyn Stage],
    state: &mut RunState,
    progress: &mut dyn FnMut(&'static str),
) -> Result<(), PipelineError> {
    for stage in stages {
        for input in stage.inputs() {
            if !input.exists() {
                return Err(PipelineError::Precondition {
                    stage: stage.name(),
                    path: input,
                });
            }
        }
        progress(stage.name());
        stage.run(state)?;
    }
    Ok(())
}
