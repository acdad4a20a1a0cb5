//! @acp:module "Markup Reconciler"
//! @acp:summary "Align index.html resource references with the chosen files"
//! @acp:domain cli
//! @acp:layer service
//!
//! [`reconcile`] is a pure function: it reads the template document and the
//! choices, decides which `<link>`/`<script>` elements survive (and at which
//! path), and returns a new document. The template is never modified.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::{Document, Element, ElementKind, Node};
use crate::choices::{ChoiceSet, Feature, FeatureSet, JsFile, SOURCE_CSS_DIR, SOURCE_JS_DIR};
use crate::error::{Result, ScaffoldError};

/// Comment introducing the analytics snippet
static ANALYTICS_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!--\s*Google\sAnalytics").unwrap());

/// Suffix identifying the CDN jQuery reference
const JQUERY_CDN_SUFFIX: &str = "jquery.min.js";

/// Elements that survive, by node position, in their final form
type Kept = BTreeMap<usize, Element>;

/// @acp:summary "Compute the reconciled index document"
pub fn reconcile(doc: &Document, choices: &ChoiceSet) -> Document {
    let mut kept = Kept::new();

    keep_relocated(
        doc,
        &mut kept,
        ElementKind::Link,
        SOURCE_CSS_DIR,
        &choices.css_dir,
        enabled_keys(&choices.css_files),
    );
    keep_relocated(
        doc,
        &mut kept,
        ElementKind::Script,
        SOURCE_JS_DIR,
        &choices.js_dir,
        enabled_keys(&choices.js_files),
    );

    let mut inline = doc.inline_scripts();
    let jquery_fallback = inline.next();
    let analytics = inline.next();

    if choices.js_files.is_enabled(JsFile::Jquery) {
        for (i, el) in doc.elements() {
            if el.kind() == ElementKind::Script
                && el.reference().is_some_and(|src| src.ends_with(JQUERY_CDN_SUFFIX))
            {
                kept.entry(i).or_insert_with(|| el.clone());
            }
        }
        if let Some((i, el)) = jquery_fallback {
            let body = relocate_script_paths(el.body(), SOURCE_JS_DIR, &choices.js_dir);
            kept.insert(i, el.with_body(body));
        }
    }

    if choices.google_analytics {
        if let Some((i, el)) = analytics {
            kept.insert(i, el.clone());
        }
    }

    let decisions = doc
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| match node {
            Node::Element(_) => kept.remove(&i).map(Node::Element),
            Node::Comment(text)
                if !choices.google_analytics && ANALYTICS_COMMENT.is_match(text) =>
            {
                None
            }
            other => Some(other.clone()),
        })
        .collect();

    doc.rebuild(decisions)
}

fn enabled_keys<F: Feature>(set: &FeatureSet<F>) -> Vec<&'static str> {
    set.enabled().map(|f| f.key()).collect()
}

/// Keep every `kind` element whose reference contains an enabled key and
/// starts with `src_dir`, moving it under `dest_dir`.
fn keep_relocated(
    doc: &Document,
    kept: &mut Kept,
    kind: ElementKind,
    src_dir: &str,
    dest_dir: &str,
    keys: Vec<&'static str>,
) {
    let attr = kind.reference_attr();

    for key in keys {
        let mut matched = 0usize;
        for (i, el) in doc.elements() {
            if el.kind() != kind || kept.contains_key(&i) {
                continue;
            }
            let Some(reference) = el.attr(attr) else {
                continue;
            };
            if !reference.contains(key) || !reference.starts_with(src_dir) {
                continue;
            }

            let element = if src_dir != dest_dir {
                let moved = format!("{}{}", dest_dir, &reference[src_dir.len()..]);
                el.with_attr(attr, &moved)
            } else {
                el.clone()
            };
            kept.insert(i, element);
            matched += 1;
        }
        if matched == 0 {
            tracing::debug!("No <{:?}> reference matches '{}'", kind, key);
        }
    }
}

/// Point quoted `src_dir/...` paths inside inline script text at `dest_dir`.
///
/// Only a `src_dir/` prefix directly after a `"` or `'` is rewritten; bare
/// occurrences of the directory name elsewhere in the script are left alone.
fn relocate_script_paths(body: &str, src_dir: &str, dest_dir: &str) -> String {
    if src_dir == dest_dir {
        return body.to_string();
    }
    ['"', '\''].iter().fold(body.to_string(), |text, quote| {
        text.replace(
            &format!("{quote}{src_dir}/"),
            &format!("{quote}{dest_dir}/"),
        )
    })
}

/// @acp:summary "Read the template index, reconcile it and write it out"
pub fn render_index(template: &Path, dest_root: &Path, choices: &ChoiceSet) -> Result<PathBuf> {
    let source = template.join("index.html");
    let html = std::fs::read_to_string(&source)
        .map_err(|err| ScaffoldError::Read { path: source.clone(), source: err })?;

    let rendered = reconcile(&Document::parse(&html), choices);

    let target = dest_root.join("index.html");
    if !dest_root.exists() {
        std::fs::create_dir_all(dest_root)?;
    }
    std::fs::write(&target, rendered.to_html()).map_err(|source| ScaffoldError::Write {
        path: target.clone(),
        source,
    })?;
    tracing::info!("Wrote {}", target.display());
    Ok(target)
}
