//! Runtime configuration
//!
//! Data roots are the directories holding `definitions/` and `templates/`.
//!
//! ## Priority Order
//!
//! 1. Bundled data directory (`CREATE_PROJECT_DATA_DIR`, else `<crate>/data`)
//! 2. `<dir>/create_project/` for every `<dir>` in `XDG_DATA_DIRS`, in order

use std::env;
use std::path::PathBuf;

/// Overrides the bundled data directory.
pub const DATA_DIR_ENV: &str = "CREATE_PROJECT_DATA_DIR";

/// Colon-separated list of extra data directories.
pub const SEARCH_PATH_ENV: &str = "XDG_DATA_DIRS";

/// Sub-directory of each search path entry that belongs to this tool.
pub const SHARE_DIR: &str = "create_project";

const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Bundled/installed data directory, always searched first
    pub data_dir: PathBuf,

    /// Entries from the search path variable, in the order given there
    pub search_path: Vec<PathBuf>,

    /// Maximum nesting of template nodes before resolution gives up
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(BUNDLED_DATA_DIR),
            search_path: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Defaults merged with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over defaults.
    pub fn with_env(mut self) -> Self {
        if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }

        if let Ok(dirs) = env::var(SEARCH_PATH_ENV) {
            self.search_path = parse_search_path(&dirs);
        }

        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_search_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_path = dirs;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Ordered data roots: the bundled directory, then every search path
    /// entry's `create_project/` sub-directory that exists.
    ///
    /// Re-scanned on every call.
    pub fn data_roots(&self) -> Vec<PathBuf> {
        let shared = self
            .search_path
            .iter()
            .map(|dir| dir.join(SHARE_DIR))
            .filter(|dir| dir.exists());

        std::iter::once(self.data_dir.clone()).chain(shared).collect()
    }
}

/// Split a colon-separated directory list, dropping empty entries.
pub fn parse_search_path(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// `root/category` for each root where it exists, order preserved.
pub fn existing_subdirs(roots: &[PathBuf], category: &str) -> Vec<PathBuf> {
    roots
        .iter()
        .map(|root| root.join(category))
        .filter(|dir| dir.exists())
        .collect()
}
