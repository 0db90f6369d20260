//! Project initialization
//!
//! Definition name → definition document → resolved template → new project directory.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::bindings::Bindings;
use crate::config::Config;
use crate::error::Result;
use crate::locator::Locator;
use crate::materialize::{materialize, UnresolvedToken};
use crate::prompt::Prompter;
use crate::resolver::Resolver;

/// Initialize a new project from the definition called `definition`.
///
/// Nothing is written until every question has been answered and a template
/// has been chosen. A failure while copying leaves whatever was already
/// written in place.
pub fn init_project<P: Prompter>(
    config: &Config,
    definition: &str,
    destination: &Path,
    prompter: P,
) -> Result<InitResult> {
    let locator = Locator::from_config(config);
    let document = locator.load_definition(definition)?;

    let resolved =
        Resolver::new(prompter, config.max_depth).resolve(&document.templates, Bindings::new())?;

    let report = materialize(
        &locator,
        &resolved.template_path,
        &resolved.bindings,
        destination,
    )?;

    info!(
        destination = %destination.display(),
        files = report.files.len(),
        "Project created"
    );

    Ok(InitResult {
        project_dir: destination.to_path_buf(),
        template_path: resolved.template_path,
        template_dir: report.template_dir,
        bindings: resolved.bindings,
        files_created: report.files,
        unresolved: report.unresolved,
    })
}

/// Result of project initialization
#[derive(Debug)]
pub struct InitResult {
    pub project_dir: PathBuf,
    /// Template path as written in the definition
    pub template_path: String,
    pub template_dir: PathBuf,
    pub bindings: Bindings,
    /// Relative to `project_dir`
    pub files_created: Vec<PathBuf>,
    pub unresolved: Vec<UnresolvedToken>,
}
