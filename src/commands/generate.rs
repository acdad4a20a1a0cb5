//! @acp:module "Generate Command"
//! @acp:summary "Scaffold a project from flags or interactive answers"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements the default `h5bp` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};

use crate::choices::tables::{self, PromptChoice};
use crate::choices::{ChoiceSet, PromptAnswers, RawFlags};
use crate::pipeline::{Generator, RunReport};

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Template directory to copy from
    pub template: PathBuf,
    /// Project root to write into
    pub destination: PathBuf,
    /// Choice flags given on the command line
    pub flags: RawFlags,
    /// Print the resolved choices before running
    pub verbose: bool,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions) -> Result<()> {
    // Interactive mode only when no choice flags were given
    let choices = if options.flags.is_empty() {
        ChoiceSet::from_answers(&ask_questions()?)
    } else {
        ChoiceSet::from_flags(&options.flags)
    };

    if options.verbose {
        println!(
            "{} Choices:\n{}",
            style("→").dim(),
            serde_json::to_string_pretty(&choices)?
        );
    }

    let generator = Generator::new(&options.template, &options.destination);
    let report = generator.run(&choices).with_context(|| {
        format!(
            "Failed to generate project from {}",
            options.template.display()
        )
    })?;

    print_report(&generator, &report);
    println!("{}", style("done").green().bold());

    Ok(())
}

fn print_report(generator: &Generator, report: &RunReport) {
    for path in report.written() {
        let shown = path
            .strip_prefix(generator.destination())
            .unwrap_or(path);
        println!("{} {}", style("✓").green(), shown.display());
    }
    println!(
        "\n{} {} file(s) written to {}",
        style("✓").green(),
        report.file_count(),
        style(generator.destination().display()).cyan()
    );
}

fn ask_questions() -> Result<PromptAnswers> {
    let theme = ColorfulTheme::default();

    let css_dir: String = Input::with_theme(&theme)
        .with_prompt("Where do you want your CSS files to be stored?")
        .default(tables::DEFAULT_CSS_DIR.to_string())
        .interact_text()?;
    let css_files = checklist(&theme, "Which CSS files do you want?", tables::CSS_PROMPT)?;

    let js_dir: String = Input::with_theme(&theme)
        .with_prompt("Where do you want your JavaScript files to be stored?")
        .default(tables::DEFAULT_JS_DIR.to_string())
        .interact_text()?;
    let js_files = checklist(&theme, "Which JavaScript files do you want?", tables::JS_PROMPT)?;

    let other_files = checklist(&theme, "What other files do you want?", tables::OTHER_PROMPT)?;

    let documentation = Confirm::with_theme(&theme)
        .with_prompt("Would you like docs to be included?")
        .default(tables::DOCUMENTATION_PROMPT_DEFAULT)
        .interact()?;
    let doc_dir: String = if documentation {
        Input::with_theme(&theme)
            .with_prompt("Where do you want the doc files to be stored?")
            .default(tables::DEFAULT_DOC_DIR.to_string())
            .interact_text()?
    } else {
        tables::DEFAULT_DOC_DIR.to_string()
    };

    let google_analytics = Confirm::with_theme(&theme)
        .with_prompt("Would you like Google Analytics to be included?")
        .default(tables::ANALYTICS_PROMPT_DEFAULT)
        .interact()?;

    Ok(PromptAnswers {
        css_dir,
        css_files,
        js_dir,
        js_files,
        other_files,
        documentation,
        doc_dir,
        google_analytics,
    })
}

/// Multi-select over a prompt table; returns the selected entries' values
fn checklist<F>(
    theme: &ColorfulTheme,
    prompt: &str,
    choices: &[PromptChoice<F>],
) -> Result<Vec<String>> {
    let labels: Vec<&str> = choices.iter().map(|c| c.label).collect();
    let selections = MultiSelect::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .defaults(&tables::checked_defaults(choices))
        .interact()?;

    Ok(selections
        .into_iter()
        .map(|idx| choices[idx].value.to_string())
        .collect())
}
