//! @acp:module "Choice Tables"
//! @acp:summary "Flag-mode and prompt-mode option tables"
//! @acp:domain cli
//! @acp:layer config
//!
//! The two input modes resolve defaults differently and are kept as two
//! separate tables:
//!
//! - **Flag mode**: every feature is off unless its flag is given, or unless
//!   `--default` is given and the feature's own flag is left unset.
//! - **Prompt mode**: each checklist entry carries its own pre-checked state.
//!   `.htaccess`, `404.html` and `crossdomain.xml` start unchecked; everything
//!   else starts checked. Documentation and analytics confirms default to no.

use super::features::{CssFile, JsFile, OtherFile};

/// Binds a feature to its command-line switch (without the leading `--`)
#[derive(Debug, Clone, Copy)]
pub struct FlagBinding<F> {
    pub feature: F,
    pub flag: &'static str,
}

/// One entry of an interactive checklist
#[derive(Debug, Clone, Copy)]
pub struct PromptChoice<F> {
    pub feature: F,
    /// Text shown to the user
    pub label: &'static str,
    /// Value recorded in the answer set when selected
    pub value: &'static str,
    /// Pre-checked state
    pub checked: bool,
}

// =============================================================================
// Flag mode
// =============================================================================

pub const DEFAULT_FLAG: &str = "default";
pub const ANALYTICS_FLAG: &str = "google-analytics";
pub const DOCUMENTATION_FLAG: &str = "documentation";

pub const CSS_FLAGS: &[FlagBinding<CssFile>] = &[
    FlagBinding { feature: CssFile::MainCss, flag: "main-css" },
    FlagBinding { feature: CssFile::Normalize, flag: "normalize" },
];

pub const JS_FLAGS: &[FlagBinding<JsFile>] = &[
    FlagBinding { feature: JsFile::Jquery, flag: "jquery" },
    FlagBinding { feature: JsFile::MainJs, flag: "main-js" },
    FlagBinding { feature: JsFile::Modernizr, flag: "modernizr" },
    FlagBinding { feature: JsFile::PluginsJs, flag: "plugins-js" },
];

pub const OTHER_FLAGS: &[FlagBinding<OtherFile>] = &[
    FlagBinding { feature: OtherFile::Htaccess, flag: "htaccess" },
    FlagBinding { feature: OtherFile::NotFoundPage, flag: "404" },
    FlagBinding { feature: OtherFile::AppleTouchIcon, flag: "apple-touch-icons" },
    FlagBinding { feature: OtherFile::CrossdomainXml, flag: "crossdomain-xml" },
    FlagBinding { feature: OtherFile::Favicon, flag: "favicon" },
    FlagBinding { feature: OtherFile::HumansTxt, flag: "humans-txt" },
    FlagBinding { feature: OtherFile::IndexHtml, flag: "index" },
    FlagBinding { feature: OtherFile::RobotsTxt, flag: "robots-txt" },
];

// =============================================================================
// Prompt mode
// =============================================================================

pub const DEFAULT_CSS_DIR: &str = "css";
pub const DEFAULT_JS_DIR: &str = "js";
pub const DEFAULT_DOC_DIR: &str = "doc";
pub const DEFAULT_IMG_DIR: &str = "img";

pub const DOCUMENTATION_PROMPT_DEFAULT: bool = false;
pub const ANALYTICS_PROMPT_DEFAULT: bool = false;

pub const CSS_PROMPT: &[PromptChoice<CssFile>] = &[
    PromptChoice { feature: CssFile::MainCss, label: "main.css", value: "main.css", checked: true },
    PromptChoice {
        feature: CssFile::Normalize,
        label: "normalize.css",
        value: "normalize.css",
        checked: true,
    },
];

pub const JS_PROMPT: &[PromptChoice<JsFile>] = &[
    PromptChoice { feature: JsFile::MainJs, label: "main.js", value: "main.js", checked: true },
    PromptChoice {
        feature: JsFile::PluginsJs,
        label: "plugins.js",
        value: "plugins.js",
        checked: true,
    },
    PromptChoice { feature: JsFile::Jquery, label: "jQuery", value: "jquery", checked: true },
    PromptChoice {
        feature: JsFile::Modernizr,
        label: "Modernizr",
        value: "modernizr",
        checked: true,
    },
];

pub const OTHER_PROMPT: &[PromptChoice<OtherFile>] = &[
    PromptChoice {
        feature: OtherFile::Htaccess,
        label: ".htaccess",
        value: ".htaccess",
        checked: false,
    },
    PromptChoice {
        feature: OtherFile::NotFoundPage,
        label: "404.html",
        value: "404.html",
        checked: false,
    },
    PromptChoice {
        feature: OtherFile::AppleTouchIcon,
        label: "apple-touch-icons",
        value: "apple-touch-icon",
        checked: true,
    },
    PromptChoice {
        feature: OtherFile::CrossdomainXml,
        label: "crossdomain.xml",
        value: "crossdomain.xml",
        checked: false,
    },
    PromptChoice {
        feature: OtherFile::Favicon,
        label: "favicon.ico",
        value: "favicon.ico",
        checked: true,
    },
    PromptChoice {
        feature: OtherFile::HumansTxt,
        label: "humans.txt",
        value: "humans.txt",
        checked: true,
    },
    PromptChoice {
        feature: OtherFile::IndexHtml,
        label: "index.html",
        value: "index.html",
        checked: true,
    },
    PromptChoice {
        feature: OtherFile::RobotsTxt,
        label: "robots.txt",
        value: "robots.txt",
        checked: true,
    },
];

/// Pre-checked states of a checklist, in display order
pub fn checked_defaults<F>(choices: &[PromptChoice<F>]) -> Vec<bool> {
    choices.iter().map(|c| c.checked).collect()
}
