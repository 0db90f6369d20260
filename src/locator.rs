//! Definition and template lookup across data roots
//!
//! First match wins. Nothing is cached: every lookup checks the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{existing_subdirs, Config};
use crate::definition::Definition;
use crate::error::{Error, MaterializeError};

pub const DEFINITIONS_DIR: &str = "definitions";
pub const TEMPLATES_DIR: &str = "templates";
pub const DEFINITION_EXT: &str = "yaml";

/// First `search_root/relative` that exists.
pub fn find_in(search_roots: &[PathBuf], relative: &Path) -> Option<PathBuf> {
    search_roots.iter().map(|root| root.join(relative)).find(|candidate| {
        let found = candidate.exists();
        debug!(path = %candidate.display(), found, "Checked candidate");
        found
    })
}

#[derive(Debug, Clone)]
pub struct Locator {
    roots: Vec<PathBuf>,
}

impl Locator {
    /// `roots` are data roots, each possibly holding `definitions/` and `templates/`.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_roots())
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Existing `<root>/<category>` directories, in search order.
    pub fn search_roots(&self, category: &str) -> Vec<PathBuf> {
        existing_subdirs(&self.roots, category)
    }

    pub fn find_definition(&self, name: &str) -> Option<PathBuf> {
        let file = PathBuf::from(format!("{}.{}", name, DEFINITION_EXT));
        find_in(&self.search_roots(DEFINITIONS_DIR), &file)
    }

    /// Parsed definition, or `DefinitionNotFound` when no root has it.
    pub fn load_definition(&self, name: &str) -> Result<Definition, Error> {
        let path = self
            .find_definition(name)
            .ok_or_else(|| Error::DefinitionNotFound {
                name: name.to_string(),
                searched: self.search_roots(DEFINITIONS_DIR),
            })?;

        debug!(path = %path.display(), "Loading definition");
        let yaml = fs::read_to_string(&path)?;
        Definition::from_yaml(&yaml).map_err(|source| Error::DefinitionParse { path, source })
    }

    pub fn find_template(&self, template_path: &str) -> Result<PathBuf, MaterializeError> {
        let roots = self.search_roots(TEMPLATES_DIR);
        find_in(&roots, Path::new(template_path)).ok_or_else(|| {
            MaterializeError::TemplateNotFound {
                path: template_path.to_string(),
                searched: roots,
            }
        })
    }
}
