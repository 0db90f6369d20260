//! Definition resolver
//!
//! Walks a definition graph from the root node, asking each node's questions,
//! until it reaches a leaf:
//!
//! ```text
//! node ─ ask(variables) ─ overlay answers ─┬─ Leaf   → (path, bindings)
//!                                          └─ Branch → children[bindings[selection_variable]] ─ recurse
//! ```
//!
//! Selection values are compared by exact string equality.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::bindings::Bindings;
use crate::definition::{NodeDef, NodeKind};
use crate::error::{PromptError, ResolveError};
use crate::prompt::Prompter;
use crate::question::questions_for;

const ROOT: &str = "templates";

/// Terminal template plus every binding collected on the way to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTemplate {
    pub template_path: String,
    pub bindings: Bindings,
}

pub struct Resolver<P> {
    prompter: P,
    max_depth: usize,
}

impl<P: Prompter> Resolver<P> {
    pub fn new(prompter: P, max_depth: usize) -> Self {
        Self {
            prompter,
            max_depth,
        }
    }

    /// Resolve `root` to a single template, starting from `inherited`.
    pub fn resolve(
        &mut self,
        root: &NodeDef,
        inherited: Bindings,
    ) -> Result<ResolvedTemplate, ResolveError> {
        let mut visited = HashSet::new();
        let mut trail = vec![ROOT.to_string()];
        let resolved = self.resolve_node(root, inherited, &mut visited, &mut trail)?;

        info!(
            template = %resolved.template_path,
            variables = resolved.bindings.len(),
            "Resolved definition"
        );
        Ok(resolved)
    }

    fn resolve_node(
        &mut self,
        node: &NodeDef,
        inherited: Bindings,
        visited: &mut HashSet<*const NodeDef>,
        trail: &mut Vec<String>,
    ) -> Result<ResolvedTemplate, ResolveError> {
        let here = trail.join(" > ");

        if !visited.insert(node as *const NodeDef) {
            return Err(ResolveError::CycleDetected { node: here });
        }
        if trail.len() > self.max_depth {
            return Err(ResolveError::DepthExceeded {
                max_depth: self.max_depth,
                node: here,
            });
        }

        let answers = self.ask(node)?;
        let bindings = inherited.overlay(&answers);
        debug!(node = %here, answered = answers.len(), "Collected variables");

        match node.kind() {
            Some(NodeKind::Leaf { template_path }) => Ok(ResolvedTemplate {
                template_path: template_path.to_string(),
                bindings,
            }),
            Some(NodeKind::Branch {
                selection_variable,
                children,
            }) => {
                let value = bindings.get(selection_variable).ok_or_else(|| {
                    ResolveError::MissingSelectionVariable {
                        variable: selection_variable.to_string(),
                        node: here.clone(),
                    }
                })?;

                let child = children
                    .get(value)
                    .ok_or_else(|| ResolveError::UnknownSelection {
                        variable: selection_variable.to_string(),
                        value: value.to_string(),
                        node: here.clone(),
                        available: children.keys().collect::<Vec<_>>().join(", "),
                    })?;

                debug!(node = %here, %selection_variable, %value, "Selected branch");
                trail.push(value.to_string());
                self.resolve_node(child, bindings, visited, trail)
            }
            None => Err(ResolveError::InvalidNode { node: here }),
        }
    }

    /// One prompt call for all of the node's variables.
    fn ask(&mut self, node: &NodeDef) -> Result<Bindings, ResolveError> {
        let questions = questions_for(&node.variables);
        let answers = self.prompter.ask(&questions)?;

        if let Some(missing) = questions.iter().find(|q| !answers.contains(&q.id)) {
            return Err(PromptError::Unanswered {
                variable: missing.id.clone(),
            }
            .into());
        }
        Ok(answers)
    }
}

/// Convenience wrapper for a one-off resolution.
pub fn resolve<P: Prompter>(
    root: &NodeDef,
    inherited: Bindings,
    prompter: P,
    max_depth: usize,
) -> Result<ResolvedTemplate, ResolveError> {
    Resolver::new(prompter, max_depth).resolve(root, inherited)
}
