//! @acp:module "Choices"
//! @acp:summary "Normalized user choices driving a generator run"
//! @acp:domain cli
//! @acp:layer model
//!
//! A [`ChoiceSet`] is built once per run, either from command-line flags
//! ([`ChoiceSet::from_flags`]) or from interactive answers
//! ([`ChoiceSet::from_answers`]), and is read-only from then on.

pub mod features;
pub mod normalize;
pub mod tables;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub use features::{CssFile, Feature, JsFile, OtherFile};
pub use normalize::{PromptAnswers, RawFlags};

/// Directory names used by the template tree itself
pub const SOURCE_CSS_DIR: &str = "css";
pub const SOURCE_JS_DIR: &str = "js";
pub const SOURCE_DOC_DIR: &str = "doc";

/// Total map from every member of a feature set to its include flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet<F: Feature> {
    entries: Vec<(F, bool)>,
}

impl<F: Feature> FeatureSet<F> {
    /// Build a set by asking `enabled` about every feature, in `F::all()` order
    pub fn from_fn(mut enabled: impl FnMut(F) -> bool) -> Self {
        Self {
            entries: F::all().iter().map(|&f| (f, enabled(f))).collect(),
        }
    }

    /// Every feature disabled
    pub fn none() -> Self {
        Self::from_fn(|_| false)
    }

    /// Every feature enabled
    pub fn all() -> Self {
        Self::from_fn(|_| true)
    }

    pub fn is_enabled(&self, feature: F) -> bool {
        self.entries
            .iter()
            .any(|(f, on)| *f == feature && *on)
    }

    /// All entries with their flags, in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (F, bool)> + '_ {
        self.entries.iter().copied()
    }

    /// Enabled features only
    pub fn enabled(&self) -> impl Iterator<Item = F> + '_ {
        self.iter().filter_map(|(f, on)| on.then_some(f))
    }

    /// Same set with the given features dropped from consideration
    pub fn without(&self, excluded: &[F]) -> Vec<(F, bool)> {
        self.iter()
            .filter(|(f, _)| !excluded.contains(f))
            .collect()
    }
}

impl<F: Feature> Serialize for FeatureSet<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (f, on) in &self.entries {
            map.serialize_entry(f.key(), on)?;
        }
        map.end()
    }
}

/// @acp:summary "Canonical, immutable set of choices for one run"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSet {
    pub css_dir: String,
    pub js_dir: String,
    pub doc_dir: String,
    pub img_dir: String,
    pub css_files: FeatureSet<CssFile>,
    pub js_files: FeatureSet<JsFile>,
    pub other_files: FeatureSet<OtherFile>,
    pub documentation: bool,
    pub google_analytics: bool,
}

impl Default for ChoiceSet {
    /// Default directories and nothing selected
    fn default() -> Self {
        Self {
            css_dir: tables::DEFAULT_CSS_DIR.to_string(),
            js_dir: tables::DEFAULT_JS_DIR.to_string(),
            doc_dir: tables::DEFAULT_DOC_DIR.to_string(),
            img_dir: tables::DEFAULT_IMG_DIR.to_string(),
            css_files: FeatureSet::none(),
            js_files: FeatureSet::none(),
            other_files: FeatureSet::none(),
            documentation: false,
            google_analytics: false,
        }
    }
}
