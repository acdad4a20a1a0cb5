//! @acp:module "Feature Keys"
//! @acp:summary "Closed sets of optional template files"
//! @acp:domain cli
//! @acp:layer model

use std::fmt;
use std::hash::Hash;

/// A selectable template file.
///
/// `key()` is the file-name prefix used both to pick files from the template
/// tree and to find the matching `<link>`/`<script>` references in `index.html`.
pub trait Feature: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every member of the set, in a fixed order
    fn all() -> &'static [Self];

    /// File-name prefix for this feature
    fn key(&self) -> &'static str;
}

/// Stylesheets shipped in the template `css/` directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssFile {
    MainCss,
    Normalize,
}

impl Feature for CssFile {
    fn all() -> &'static [Self] {
        &[CssFile::MainCss, CssFile::Normalize]
    }

    fn key(&self) -> &'static str {
        match self {
            CssFile::MainCss => "main.css",
            CssFile::Normalize => "normalize",
        }
    }
}

/// Scripts shipped in the template `js/` tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsFile {
    Jquery,
    MainJs,
    Modernizr,
    PluginsJs,
}

impl Feature for JsFile {
    fn all() -> &'static [Self] {
        &[JsFile::Jquery, JsFile::MainJs, JsFile::Modernizr, JsFile::PluginsJs]
    }

    fn key(&self) -> &'static str {
        match self {
            JsFile::Jquery => "jquery",
            JsFile::MainJs => "main.js",
            JsFile::Modernizr => "modernizr",
            JsFile::PluginsJs => "plugins.js",
        }
    }
}

/// Files living at the template root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtherFile {
    Htaccess,
    NotFoundPage,
    AppleTouchIcon,
    CrossdomainXml,
    Favicon,
    HumansTxt,
    IndexHtml,
    RobotsTxt,
}

impl Feature for OtherFile {
    fn all() -> &'static [Self] {
        &[
            OtherFile::Htaccess,
            OtherFile::NotFoundPage,
            OtherFile::AppleTouchIcon,
            OtherFile::CrossdomainXml,
            OtherFile::Favicon,
            OtherFile::HumansTxt,
            OtherFile::IndexHtml,
            OtherFile::RobotsTxt,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            OtherFile::Htaccess => ".htaccess",
            OtherFile::NotFoundPage => "404.html",
            OtherFile::AppleTouchIcon => "apple-touch-icon",
            OtherFile::CrossdomainXml => "crossdomain.xml",
            OtherFile::Favicon => "favicon.ico",
            OtherFile::HumansTxt => "humans.txt",
            OtherFile::IndexHtml => "index.html",
            OtherFile::RobotsTxt => "robots.txt",
        }
    }
}

impl fmt::Display for CssFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for JsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for OtherFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_keys<F: Feature>() {
        let keys: HashSet<&str> = F::all().iter().map(|f| f.key()).collect();
        assert_eq!(keys.len(), F::all().len());
    }

    #[test]
    fn test_keys_are_unique() {
        assert_unique_keys::<CssFile>();
        assert_unique_keys::<JsFile>();
        assert_unique_keys::<OtherFile>();
    }

    #[test]
    fn test_display_uses_key() {
        assert_eq!(OtherFile::NotFoundPage.to_string(), "404.html");
        assert_eq!(JsFile::PluginsJs.to_string(), "plugins.js");
    }
}
