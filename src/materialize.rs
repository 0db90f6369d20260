//! Template materialization
//!
//! Copies a template tree to the destination, then replaces `@@NAME@@` tokens
//! in every file with the bound values.
//!
//! Files are copied by content only. Permission bits and timestamps of the
//! template are never carried over, so generated files get the destination's
//! default creation mode even when the template is read-only.
//!
//! Every file is read back as UTF-8 text for substitution. There is no binary
//! detection: a template file that is not valid UTF-8 fails materialization.
//! Substitution is plain substring replacement; a bound value must not itself
//! contain a `@@NAME@@` token.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::bindings::Bindings;
use crate::error::MaterializeError;
use crate::locator::Locator;

const TOKEN_DELIMITER: &str = "@@";

/// Token markers left in a file after substitution
static LEFTOVER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@@[A-Z0-9_]+@@").expect("valid token regex"));

/// Outcome of a successful materialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterializeReport {
    /// Template directory the tree was copied from
    pub template_dir: PathBuf,
    /// Copied files, relative to the destination, in walk order
    pub files: Vec<PathBuf>,
    /// Tokens still present after substitution
    pub unresolved: Vec<UnresolvedToken>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedToken {
    /// Relative to the destination
    pub file: PathBuf,
    pub token: String,
}

/// `@@` + uppercased name + `@@`
pub fn token_for(name: &str) -> String {
    format!("{}{}{}", TOKEN_DELIMITER, name.to_uppercase(), TOKEN_DELIMITER)
}

/// Replace every token of every binding, in binding order.
pub fn substitute_tokens(content: &str, bindings: &Bindings) -> String {
    bindings
        .iter()
        .fold(content.to_string(), |acc, (name, value)| {
            acc.replace(&token_for(name), value)
        })
}

/// Locate `template_path`, copy it to `destination` and substitute tokens.
pub fn materialize(
    locator: &Locator,
    template_path: &str,
    bindings: &Bindings,
    destination: &Path,
) -> Result<MaterializeReport, MaterializeError> {
    let template_dir = locator.find_template(template_path)?;
    debug!(template = %template_dir.display(), "Found template");

    let files = copy_tree(&template_dir, destination)?;
    let unresolved = substitute_tree(destination, bindings)?;

    Ok(MaterializeReport {
        template_dir,
        files,
        unresolved,
    })
}

/// Recursively copy `source` into a new `destination` directory.
///
/// Symlinks in the template are followed and copied as regular files.
/// Returns the copied files relative to `destination`.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<Vec<PathBuf>, MaterializeError> {
    if !source.is_dir() {
        return Err(MaterializeError::Io {
            path: source.to_path_buf(),
            source: io::Error::other("template is not a directory"),
        });
    }
    if destination.exists() {
        return Err(MaterializeError::DestinationExists {
            path: destination.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(MaterializeError::io(&target))?;
        } else if entry.file_type().is_file() {
            copy_contents(entry.path(), &target)?;
            debug!(file = %relative.display(), "Copied");
            files.push(relative.to_path_buf());
        } else {
            debug!(path = %entry.path().display(), "Skipping special file");
        }
    }

    Ok(files)
}

/// Byte copy into a freshly created file. Unlike `fs::copy`, the source's
/// permissions are not applied to the target.
fn copy_contents(from: &Path, to: &Path) -> Result<(), MaterializeError> {
    let bytes = fs::read(from).map_err(MaterializeError::io(from))?;
    fs::write(to, bytes).map_err(MaterializeError::io(to))
}

/// Rewrite every regular file under `root` with tokens replaced.
pub fn substitute_tree(
    root: &Path,
    bindings: &Bindings,
) -> Result<Vec<UnresolvedToken>, MaterializeError> {
    let mut unresolved = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();

        let content = fs::read_to_string(path).map_err(MaterializeError::io(path))?;
        let replaced = substitute_tokens(&content, bindings);
        fs::write(path, &replaced).map_err(MaterializeError::io(path))?;

        let relative = path.strip_prefix(root).unwrap_or(path);
        if replaced != content {
            debug!(file = %relative.display(), "Substituted tokens");
        }
        for token in LEFTOVER_TOKEN.find_iter(&replaced) {
            warn!(file = %relative.display(), token = token.as_str(), "Unbound token left in file");
            unresolved.push(UnresolvedToken {
                file: relative.to_path_buf(),
                token: token.as_str().to_string(),
            });
        }
    }

    Ok(unresolved)
}
