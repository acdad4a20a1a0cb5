//! @acp:module "Selective Copier"
//! @acp:summary "Copy template files whose names match enabled features"
//! @acp:domain cli
//! @acp:layer io
//!
//! Copies the direct children of a template directory into a destination
//! directory. Files are picked by a [`FileFilter`]: an ordered list of
//! feature keys, where a file is copied when an enabled key is a prefix of
//! its name. This lets `favicon.ico` pick `favicon.ico` and `normalize` pick
//! `normalize.css` without exact-name coupling.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::choices::Feature;
use crate::error::{Result, ScaffoldError};

/// One `(key, enabled)` rule of a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub key: String,
    pub enabled: bool,
}

impl FilterRule {
    fn matches(&self, file_name: &str) -> bool {
        self.enabled && file_name.starts_with(&self.key)
    }
}

/// Ordered, first-match-wins file name filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    rules: Vec<FilterRule>,
}

impl FileFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; rules are evaluated in insertion order
    pub fn rule(mut self, key: impl Into<String>, enabled: bool) -> Self {
        self.rules.push(FilterRule {
            key: key.into(),
            enabled,
        });
        self
    }

    /// Build a filter from feature entries, keyed by each feature's file prefix
    pub fn from_features<F: Feature>(entries: impl IntoIterator<Item = (F, bool)>) -> Self {
        entries
            .into_iter()
            .fold(Self::new(), |filter, (feature, on)| filter.rule(feature.key(), on))
    }

    /// Key of the first enabled rule matching `file_name`
    pub fn matching_key(&self, file_name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(file_name))
            .map(|rule| rule.key.as_str())
    }
}

/// Files written by one copy operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Destination paths, in the order they were written
    pub copied: Vec<PathBuf>,
    /// Source subdirectories that were not descended into
    pub skipped_dirs: Vec<PathBuf>,
}

impl CopyReport {
    fn absorb(&mut self, other: CopyReport) {
        self.copied.extend(other.copied);
        self.skipped_dirs.extend(other.skipped_dirs);
    }
}

/// @acp:summary "Copy matching children of `src` into `dest`"
///
/// With no filter every regular file is copied. Subdirectories are descended
/// into only when `recursive` is set, with the same filter. Destination
/// directories are created as files land in them and existing files are
/// overwritten. Any I/O failure aborts the whole copy.
pub fn copy_dir(
    src: &Path,
    dest: &Path,
    filter: Option<&FileFilter>,
    recursive: bool,
) -> Result<CopyReport> {
    if !src.is_dir() {
        return Err(ScaffoldError::MissingSource(src.to_path_buf()));
    }

    let mut report = CopyReport::default();

    let children = WalkDir::new(src)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in children {
        let entry = entry.map_err(|source| ScaffoldError::Walk {
            path: src.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        let src_path = entry.path();
        let dest_path = dest.join(name);

        if entry.file_type().is_dir() {
            if recursive {
                report.absorb(copy_dir(src_path, &dest_path, filter, recursive)?);
            } else {
                tracing::debug!("Skipping directory {}", src_path.display());
                report.skipped_dirs.push(src_path.to_path_buf());
            }
            continue;
        }

        let selected = match filter {
            None => true,
            Some(filter) => filter.matching_key(&name.to_string_lossy()).is_some(),
        };
        if !selected {
            continue;
        }

        copy_file(src_path, &dest_path)?;
        report.copied.push(dest_path);
    }

    Ok(report)
}

/// Copy a single file, creating the destination's parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| ScaffoldError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    fs::copy(from, to).map_err(|source| ScaffoldError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    tracing::debug!("Copied {} -> {}", from.display(), to.display());
    Ok(())
}
