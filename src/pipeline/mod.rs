//! @acp:module "Pipeline"
//! @acp:summary "Plan and run the generator steps for a ChoiceSet"
//! @acp:domain cli
//! @acp:layer service
//!
//! A run is a fixed sequence of named steps. [`plan`] derives the steps that
//! apply to a [`ChoiceSet`]; [`Generator::run`] executes them in order and
//! stops at the first error, leaving whatever was already written in place.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::choices::{
    ChoiceSet, OtherFile, SOURCE_CSS_DIR, SOURCE_DOC_DIR, SOURCE_JS_DIR,
};
use crate::copy::{copy_dir, copy_file, FileFilter};
use crate::error::{Result, ScaffoldError};
use crate::markup::render_index;
use crate::patch::{self, HTACCESS};

/// Root-level files handled by dedicated steps instead of the root copy
const SPECIAL_ROOT_FILES: &[OtherFile] = &[OtherFile::Htaccess, OtherFile::IndexHtml];

/// Named pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CopyRootFiles,
    CopyStylesheets,
    CopyScripts,
    CopyDocumentation,
    CreateImageDir,
    RenderIndex,
    PatchHtaccess,
    CopyHtaccess,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::CopyRootFiles => "copy-root-files",
            Step::CopyStylesheets => "copy-stylesheets",
            Step::CopyScripts => "copy-scripts",
            Step::CopyDocumentation => "copy-documentation",
            Step::CreateImageDir => "create-image-dir",
            Step::RenderIndex => "render-index",
            Step::PatchHtaccess => "patch-htaccess",
            Step::CopyHtaccess => "copy-htaccess",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// @acp:summary "Steps that apply to the given choices"
pub fn plan(choices: &ChoiceSet) -> Vec<Step> {
    let mut steps = vec![Step::CopyRootFiles, Step::CopyStylesheets, Step::CopyScripts];

    if choices.documentation {
        steps.push(Step::CopyDocumentation);
        steps.push(Step::CreateImageDir);
    }

    if choices.other_files.is_enabled(OtherFile::IndexHtml) {
        steps.push(Step::RenderIndex);
    }

    if patch::needs_patch(choices) {
        steps.push(Step::PatchHtaccess);
    } else if choices.other_files.is_enabled(OtherFile::Htaccess) {
        steps.push(Step::CopyHtaccess);
    }

    steps
}

/// What one step wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    /// Files written, in order
    pub files: Vec<PathBuf>,
    /// Directories created on their own
    pub dirs: Vec<PathBuf>,
}

impl StepOutcome {
    fn with_files(step: Step, files: Vec<PathBuf>) -> Self {
        Self {
            step,
            files,
            dirs: Vec::new(),
        }
    }
}

/// Everything a run wrote, step by step
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<StepOutcome>,
}

impl RunReport {
    /// Every path written, in order
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> + '_ {
        self.outcomes
            .iter()
            .flat_map(|o| o.files.iter().chain(o.dirs.iter()))
    }

    pub fn file_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.files.len()).sum()
    }
}

/// @acp:summary "Materializes a project from a template directory"
#[derive(Debug, Clone)]
pub struct Generator {
    template: PathBuf,
    destination: PathBuf,
}

impl Generator {
    pub fn new(template: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Check the template before anything is written
    pub fn verify_template(&self, choices: &ChoiceSet) -> Result<()> {
        if !self.template.is_dir() {
            return Err(ScaffoldError::TemplateNotFound(self.template.clone()));
        }
        let required = [
            (OtherFile::IndexHtml, "index.html"),
            (OtherFile::Htaccess, HTACCESS),
        ];
        for (feature, file) in required {
            let path = self.template.join(file);
            if choices.other_files.is_enabled(feature) && !path.is_file() {
                return Err(ScaffoldError::MissingSource(path));
            }
        }
        Ok(())
    }

    /// @acp:summary "Run every planned step in order"
    pub fn run(&self, choices: &ChoiceSet) -> Result<RunReport> {
        self.verify_template(choices)?;

        let mut report = RunReport::default();
        for step in plan(choices) {
            tracing::debug!("Running step {}", step);
            let outcome = self.run_step(step, choices)?;
            tracing::info!(
                "Step {} wrote {} file(s), {} dir(s)",
                step,
                outcome.files.len(),
                outcome.dirs.len()
            );
            report.outcomes.push(outcome);
        }
        Ok(report)
    }

    fn run_step(&self, step: Step, choices: &ChoiceSet) -> Result<StepOutcome> {
        let template = &self.template;
        let dest = &self.destination;

        let files = match step {
            Step::CopyRootFiles => {
                let filter =
                    FileFilter::from_features(choices.other_files.without(SPECIAL_ROOT_FILES));
                copy_dir(template, dest, Some(&filter), false)?.copied
            }
            Step::CopyStylesheets => {
                let filter = FileFilter::from_features(choices.css_files.iter());
                copy_dir(
                    &template.join(SOURCE_CSS_DIR),
                    &dest.join(&choices.css_dir),
                    Some(&filter),
                    false,
                )?
                .copied
            }
            Step::CopyScripts => {
                let filter = FileFilter::from_features(choices.js_files.iter());
                copy_dir(
                    &template.join(SOURCE_JS_DIR),
                    &dest.join(&choices.js_dir),
                    Some(&filter),
                    true,
                )?
                .copied
            }
            Step::CopyDocumentation => {
                copy_dir(
                    &template.join(SOURCE_DOC_DIR),
                    &dest.join(&choices.doc_dir),
                    None,
                    false,
                )?
                .copied
            }
            Step::CreateImageDir => {
                let dir = dest.join(&choices.img_dir);
                std::fs::create_dir_all(&dir).map_err(|source| ScaffoldError::Write {
                    path: dir.clone(),
                    source,
                })?;
                return Ok(StepOutcome {
                    step,
                    files: Vec::new(),
                    dirs: vec![dir],
                });
            }
            Step::RenderIndex => vec![render_index(template, dest, choices)?],
            Step::PatchHtaccess => vec![patch::write_patched_htaccess(template, dest)?],
            Step::CopyHtaccess => {
                let target = dest.join(HTACCESS);
                copy_file(&template.join(HTACCESS), &target)?;
                vec![target]
            }
        };
        Ok(StepOutcome::with_files(step, files))
    }
}
