//! create-project - scaffold new projects from question-driven template definitions
//!
//! A definition is a YAML graph of questions and branches. Resolving it picks
//! one template directory and a set of variable bindings; materializing copies
//! that directory and replaces `@@NAME@@` tokens with the bound values.

pub mod bindings;
pub mod config;
pub mod definition;
pub mod error;
pub mod init;
pub mod locator;
pub mod materialize;
pub mod prompt;
pub mod question;
pub mod resolver;

pub use bindings::Bindings;
pub use config::Config;
pub use definition::{Definition, NodeDef, NodeKind, VariableKind, VariableSpec};
pub use error::{Error, FixSuggestion, MaterializeError, PromptError, ResolveError};
pub use init::{init_project, InitResult};
pub use locator::Locator;
pub use materialize::{materialize, MaterializeReport};
pub use prompt::{Prompter, StaticPrompter, TerminalPrompter};
pub use question::{Choice, Question, QuestionKind};
pub use resolver::{resolve, ResolvedTemplate, Resolver};
