//! @acp:module "Choice Normalizer"
//! @acp:summary "Turn raw flags or prompt answers into a ChoiceSet"
//! @acp:domain cli
//! @acp:layer service

use std::collections::HashMap;

use super::features::Feature;
use super::tables::{self, FlagBinding, PromptChoice};
use super::{ChoiceSet, FeatureSet};

/// Flags as they came off the command line.
///
/// Only flags the user actually passed are recorded; a missing entry means
/// "unset", which is distinct from an explicit `false`.
#[derive(Debug, Clone, Default)]
pub struct RawFlags {
    values: HashMap<String, bool>,
    pub css_dir: Option<String>,
    pub js_dir: Option<String>,
    pub doc_dir: Option<String>,
    pub img_dir: Option<String>,
}

impl RawFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an explicit value for a boolean flag (name without `--`)
    pub fn set(&mut self, flag: &str, value: bool) -> &mut Self {
        self.values.insert(flag.to_string(), value);
        self
    }

    pub fn get(&self, flag: &str) -> Option<bool> {
        self.values.get(flag).copied()
    }

    /// True when nothing at all was supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
            && self.css_dir.is_none()
            && self.js_dir.is_none()
            && self.doc_dir.is_none()
            && self.img_dir.is_none()
    }
}

/// Answers collected by the interactive session.
///
/// Checklist answers hold the `value` strings of the selected entries of the
/// prompt tables, as a prompt library would report them.
#[derive(Debug, Clone, Default)]
pub struct PromptAnswers {
    pub css_dir: String,
    pub css_files: Vec<String>,
    pub js_dir: String,
    pub js_files: Vec<String>,
    pub other_files: Vec<String>,
    pub documentation: bool,
    pub doc_dir: String,
    pub google_analytics: bool,
}

/// `true` when set explicitly, or when unset and `default-all` is on
pub fn resolve_flag(default_all: bool, value: Option<bool>) -> bool {
    match value {
        Some(v) => v,
        None => default_all,
    }
}

fn dir_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn features_from_flags<F: Feature>(
    bindings: &[FlagBinding<F>],
    raw: &RawFlags,
    default_all: bool,
) -> FeatureSet<F> {
    FeatureSet::from_fn(|feature| {
        let value = bindings
            .iter()
            .find(|b| b.feature == feature)
            .and_then(|b| raw.get(b.flag));
        resolve_flag(default_all, value)
    })
}

fn features_from_answers<F: Feature>(
    choices: &[PromptChoice<F>],
    selected: &[String],
) -> FeatureSet<F> {
    for value in selected {
        if !choices.iter().any(|c| c.value == value) {
            tracing::warn!("Ignoring unknown checklist answer: {}", value);
        }
    }
    FeatureSet::from_fn(|feature| {
        choices
            .iter()
            .filter(|c| c.feature == feature)
            .any(|c| selected.iter().any(|s| s == c.value))
    })
}

impl ChoiceSet {
    /// @acp:summary "Normalize command-line flags (flag-mode default policy)"
    pub fn from_flags(raw: &RawFlags) -> Self {
        let default_all = raw.get(tables::DEFAULT_FLAG) == Some(true);

        Self {
            css_dir: dir_or(raw.css_dir.as_deref(), tables::DEFAULT_CSS_DIR),
            js_dir: dir_or(raw.js_dir.as_deref(), tables::DEFAULT_JS_DIR),
            doc_dir: dir_or(raw.doc_dir.as_deref(), tables::DEFAULT_DOC_DIR),
            img_dir: dir_or(raw.img_dir.as_deref(), tables::DEFAULT_IMG_DIR),
            css_files: features_from_flags(tables::CSS_FLAGS, raw, default_all),
            js_files: features_from_flags(tables::JS_FLAGS, raw, default_all),
            other_files: features_from_flags(tables::OTHER_FLAGS, raw, default_all),
            documentation: resolve_flag(default_all, raw.get(tables::DOCUMENTATION_FLAG)),
            google_analytics: resolve_flag(default_all, raw.get(tables::ANALYTICS_FLAG)),
        }
    }

    /// @acp:summary "Normalize interactive answers (prompt-mode default policy)"
    pub fn from_answers(answers: &PromptAnswers) -> Self {
        Self {
            css_dir: dir_or(Some(answers.css_dir.as_str()), tables::DEFAULT_CSS_DIR),
            js_dir: dir_or(Some(answers.js_dir.as_str()), tables::DEFAULT_JS_DIR),
            doc_dir: dir_or(Some(answers.doc_dir.as_str()), tables::DEFAULT_DOC_DIR),
            img_dir: tables::DEFAULT_IMG_DIR.to_string(),
            css_files: features_from_answers(tables::CSS_PROMPT, &answers.css_files),
            js_files: features_from_answers(tables::JS_PROMPT, &answers.js_files),
            other_files: features_from_answers(tables::OTHER_PROMPT, &answers.other_files),
            documentation: answers.documentation,
            google_analytics: answers.google_analytics,
        }
    }
}
