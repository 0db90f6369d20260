//! Error types with fix suggestions
//!
//! Error code ranges:
//! - CP-000-009: Definition lookup/parse errors
//! - CP-010-019: Resolution errors
//! - CP-020-029: Prompt errors
//! - CP-030-039: Materialization errors

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no data roots".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Top-level error returned by [`crate::init::init_project`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("[CP-001] Definition '{name}' not found (searched: {})", join_paths(.searched))]
    DefinitionNotFound { name: String, searched: Vec<PathBuf> },

    #[error("[CP-002] Failed to parse definition {}: {source}", .path.display())]
    DefinitionParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Everything except a missing definition aborts the process.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::DefinitionNotFound { .. })
    }
}

/// Failures while walking a definition graph.
///
/// `node` is the chain of selection values from the root, e.g. `templates > rs`.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("[CP-010] Invalid template node at '{node}': expected 'path' or 'selection_variable'")]
    InvalidNode { node: String },

    #[error("[CP-011] Selection variable '{variable}' has no value at '{node}'")]
    MissingSelectionVariable { variable: String, node: String },

    #[error("[CP-012] No template for {variable}='{value}' at '{node}' (available: {available})")]
    UnknownSelection {
        variable: String,
        value: String,
        node: String,
        available: String,
    },

    #[error("[CP-013] Definition graph revisits node '{node}'")]
    CycleDetected { node: String },

    #[error("[CP-014] Definition nesting exceeds {max_depth} levels at '{node}'")]
    DepthExceeded { max_depth: usize, node: String },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("[CP-020] Input closed before '{variable}' was answered")]
    Closed { variable: String },

    #[error("[CP-021] No answer collected for '{variable}'")]
    Unanswered { variable: String },

    #[error("[CP-022] Default '{default}' for '{variable}' is not one of its choices")]
    InvalidDefault { variable: String, default: String },

    #[error("Prompt IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("[CP-030] Template '{path}' not found (searched: {})", join_paths(.searched))]
    TemplateNotFound { path: String, searched: Vec<PathBuf> },

    #[error("[CP-031] Destination {} already exists", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("[CP-032] {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[CP-033] Failed to walk template tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl MaterializeError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| MaterializeError::Io { path, source }
    }
}

impl FixSuggestion for Error {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            Error::DefinitionNotFound { .. } => {
                Some("Add <name>.yaml under a definitions/ directory in a data root")
            }
            Error::DefinitionParse { .. } => Some("Check YAML syntax: indentation and quoting"),
            Error::Resolve(e) => e.fix_suggestion(),
            Error::Materialize(e) => e.fix_suggestion(),
            Error::Io(_) => Some("Check file path and permissions"),
        }
    }
}

impl FixSuggestion for ResolveError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ResolveError::InvalidNode { .. } => {
                Some("Give every template node either 'path' or 'selection_variable' + 'templates'")
            }
            ResolveError::MissingSelectionVariable { .. } => {
                Some("Declare the selection variable at this node or one of its parents")
            }
            ResolveError::UnknownSelection { .. } => {
                Some("Add a template for this value or remove it from the variable's choices")
            }
            ResolveError::CycleDetected { .. } | ResolveError::DepthExceeded { .. } => {
                Some("Flatten the definition: nested templates must form a finite tree")
            }
            ResolveError::Prompt(e) => e.fix_suggestion(),
        }
    }
}

impl FixSuggestion for PromptError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            PromptError::Closed { .. } => Some("Run interactively or pipe one answer per question"),
            PromptError::Unanswered { .. } => None,
            PromptError::InvalidDefault { .. } => {
                Some("Use one of the keys under 'values' as the default")
            }
            PromptError::Io(_) => None,
        }
    }
}

impl FixSuggestion for MaterializeError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            MaterializeError::TemplateNotFound { .. } => {
                Some("Add the template directory under a templates/ directory in a data root")
            }
            MaterializeError::DestinationExists { .. } => {
                Some("Choose a destination that does not exist yet")
            }
            MaterializeError::Io { .. } => {
                Some("Check permissions; template files must be UTF-8 text")
            }
            MaterializeError::Walk(_) => Some("Check the template tree for broken symlinks"),
        }
    }
}
