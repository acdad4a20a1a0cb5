#![forbid(unsafe_code)]

//! @acp:module "h5bp Library"
//! @acp:summary "Selective HTML5 Boilerplate project generator"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # h5bp - project scaffolding
//!
//! Copies the HTML5 Boilerplate template into a new project, keeping only the
//! files you pick, and rewrites `index.html` so its `<link>` and `<script>`
//! tags point at exactly those files in their chosen directories.
//!
//! ## Features
//!
//! - **Selective copy**: feature keys pick files by name prefix
//! - **Relocation**: CSS, JS and doc directories can be renamed
//! - **Markup reconciliation**: unused references are pruned from `index.html`
//! - **Two input modes**: command-line flags or an interactive session
//!
//! ## Example
//!
//! ```rust,no_run
//! use h5bp::{ChoiceSet, Generator, RawFlags};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut flags = RawFlags::new();
//!     flags.set("default", true);
//!     flags.css_dir = Some("styles".to_string());
//!
//!     let choices = ChoiceSet::from_flags(&flags);
//!     let report = Generator::new("template", "my-site").run(&choices)?;
//!
//!     println!("{} files written", report.file_count());
//!     Ok(())
//! }
//! ```

pub mod choices;
pub mod commands;
pub mod config;
pub mod copy;
pub mod error;
pub mod markup;
pub mod patch;
pub mod pipeline;

// Re-exports
pub use choices::{ChoiceSet, CssFile, Feature, FeatureSet, JsFile, OtherFile, PromptAnswers, RawFlags};
pub use config::Config;
pub use copy::{copy_dir, CopyReport, FileFilter};
pub use error::{Result, ScaffoldError};
pub use markup::{reconcile, Document};
pub use pipeline::{plan, Generator, RunReport, Step};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
