//! End-to-end generator tests
//!
//! Runs the full pipeline against the bundled template into temporary
//! project directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use h5bp::choices::tables;
use h5bp::config::BUNDLED_TEMPLATE;
use h5bp::{ChoiceSet, Generator, PromptAnswers, RawFlags, Step};
use tempfile::TempDir;
use walkdir::WalkDir;

fn template() -> PathBuf {
    PathBuf::from(BUNDLED_TEMPLATE)
}

fn flags(switches: &[&str]) -> RawFlags {
    let mut raw = RawFlags::new();
    for flag in switches {
        raw.set(flag, true);
    }
    raw
}

fn generate(dest: &Path, choices: &ChoiceSet) {
    Generator::new(template(), dest).run(choices).unwrap();
}

/// Relative path -> contents for every file and directory under `root`
fn snapshot(root: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_string_lossy().to_string();
            let content = e.file_type().is_file().then(|| fs::read(e.path()).unwrap());
            (rel, content)
        })
        .collect()
}

fn files(root: &Path) -> Vec<String> {
    snapshot(root)
        .into_iter()
        .filter_map(|(path, content)| content.map(|_| path))
        .collect()
}

// =============================================================================
// Flag mode
// =============================================================================

mod flag_mode_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_copies_everything_and_keeps_index() {
        let temp = TempDir::new().unwrap();
        let choices = ChoiceSet::from_flags(&flags(&["default"]));

        generate(temp.path(), &choices);

        let written = files(temp.path());
        for expected in [
            ".htaccess",
            "404.html",
            "apple-touch-icon-precomposed.png",
            "crossdomain.xml",
            "favicon.ico",
            "humans.txt",
            "index.html",
            "robots.txt",
            "css/main.css",
            "css/normalize.css",
            "js/main.js",
            "js/plugins.js",
            "js/vendor/jquery-1.10.2.min.js",
            "js/vendor/modernizr-2.6.2.min.js",
            "doc/usage.md",
        ] {
            assert!(written.contains(&expected.to_string()), "missing {}", expected);
        }
        assert!(!written.contains(&"README.md".to_string()));
        assert!(temp.path().join("img").is_dir());

        // Everything selected in default locations: index.html is untouched
        assert_eq!(
            fs::read_to_string(temp.path().join("index.html")).unwrap(),
            fs::read_to_string(template().join("index.html")).unwrap()
        );
        // 404 page ships, so the directive stays active
        assert_eq!(
            fs::read(temp.path().join(".htaccess")).unwrap(),
            fs::read(template().join(".htaccess")).unwrap()
        );
    }

    #[test]
    fn test_relocated_directories() {
        let temp = TempDir::new().unwrap();
        let mut raw = flags(&["default"]);
        raw.css_dir = Some("styles".to_string());
        raw.js_dir = Some("scripts".to_string());
        raw.doc_dir = Some("docs".to_string());
        raw.img_dir = Some("images".to_string());
        let choices = ChoiceSet::from_flags(&raw);

        generate(temp.path(), &choices);

        let root = temp.path();
        assert!(root.join("styles/main.css").is_file());
        assert!(root.join("scripts/vendor/modernizr-2.6.2.min.js").is_file());
        assert!(root.join("docs/TOC.md").is_file());
        assert!(root.join("images").is_dir());
        assert!(!root.join("css").exists());
        assert!(!root.join("js").exists());

        let index = fs::read_to_string(root.join("index.html")).unwrap();
        assert!(index.contains(r#"<link rel="stylesheet" href="styles/normalize.css">"#));
        assert!(index.contains(r#"<link rel="stylesheet" href="styles/main.css">"#));
        assert!(index.contains(r#"<script src="scripts/vendor/modernizr-2.6.2.min.js"></script>"#));
        assert!(index.contains(r#"<script src="scripts/plugins.js"></script>"#));
        assert!(index.contains(r#"<script src="scripts/main.js"></script>"#));
        assert!(index.contains(r#"document.write('<script src="scripts/vendor/jquery-1.10.2.min.js"><\/script>')"#));
        assert!(index.contains("//ajax.googleapis.com/ajax/libs/jquery/1.10.2/jquery.min.js"));
        assert!(!index.contains("\"css/"));
        assert!(!index.contains("\"js/"));
    }

    #[test]
    fn test_single_flag_copies_single_file() {
        let temp = TempDir::new().unwrap();
        let choices = ChoiceSet::from_flags(&flags(&["favicon"]));

        generate(temp.path(), &choices);

        assert_eq!(files(temp.path()), vec!["favicon.ico".to_string()]);
    }

    #[test]
    fn test_stylesheets_without_scripts() {
        let temp = TempDir::new().unwrap();
        let choices = ChoiceSet::from_flags(&flags(&["main-css", "index"]));

        generate(temp.path(), &choices);

        assert_eq!(
            files(temp.path()),
            vec!["css/main.css".to_string(), "index.html".to_string()]
        );
        let index = fs::read_to_string(temp.path().join("index.html")).unwrap();
        assert!(index.contains(r#"href="css/main.css""#));
        assert!(!index.contains("normalize"));
        assert!(!index.contains("<script"));
        assert!(!index.contains("Google Analytics"));
        // Conditional comments and content survive
        assert!(index.contains("<!--[if lt IE 7]>"));
        assert!(index.contains("Hello world! This is HTML5 Boilerplate."));
    }

    #[test]
    fn test_htaccess_patched_without_404() {
        let temp = TempDir::new().unwrap();
        let choices = ChoiceSet::from_flags(&flags(&["htaccess"]));

        let report = Generator::new(template(), temp.path()).run(&choices).unwrap();

        let htaccess = fs::read_to_string(temp.path().join(".htaccess")).unwrap();
        assert!(htaccess.contains("\n# ErrorDocument 404 /404.html\n"));
        assert!(!temp.path().join("404.html").exists());
        assert_eq!(
            report.outcomes.last().map(|o| o.step),
            Some(Step::PatchHtaccess)
        );
    }

    #[test]
    fn test_htaccess_unchanged_with_404() {
        let temp = TempDir::new().unwrap();
        let choices = ChoiceSet::from_flags(&flags(&["htaccess", "404"]));

        generate(temp.path(), &choices);

        let htaccess = fs::read_to_string(temp.path().join(".htaccess")).unwrap();
        assert!(htaccess.contains("\nErrorDocument 404 /404.html\n"));
        assert!(!htaccess.contains("# ErrorDocument"));
        assert!(temp.path().join("404.html").is_file());
    }

    #[test]
    fn test_default_with_analytics_opt_out() {
        let temp = TempDir::new().unwrap();
        let mut raw = flags(&["default"]);
        raw.set("google-analytics", false);

        generate(temp.path(), &ChoiceSet::from_flags(&raw));

        let index = fs::read_to_string(temp.path().join("index.html")).unwrap();
        assert!(!index.contains("Google Analytics"));
        assert!(!index.contains("google-analytics.com"));
        assert!(index.contains("window.jQuery"));
    }
}

// =============================================================================
// Prompt mode
// =============================================================================

mod prompt_mode_tests {
    use super::*;

    fn default_answers() -> PromptAnswers {
        fn checked<F>(choices: &[tables::PromptChoice<F>]) -> Vec<String> {
            choices
                .iter()
                .filter(|c| c.checked)
                .map(|c| c.value.to_string())
                .collect()
        }
        PromptAnswers {
            css_dir: "css".to_string(),
            css_files: checked(tables::CSS_PROMPT),
            js_dir: "js".to_string(),
            js_files: checked(tables::JS_PROMPT),
            other_files: checked(tables::OTHER_PROMPT),
            documentation: false,
            doc_dir: "doc".to_string(),
            google_analytics: false,
        }
    }

    #[test]
    fn test_accepting_every_default() {
        let temp = TempDir::new().unwrap();
        let choices = ChoiceSet::from_answers(&default_answers());

        generate(temp.path(), &choices);

        let written = files(temp.path());
        assert!(written.contains(&"favicon.ico".to_string()));
        assert!(written.contains(&"css/normalize.css".to_string()));
        assert!(written.contains(&"js/vendor/jquery-1.10.2.min.js".to_string()));
        assert!(!written.contains(&".htaccess".to_string()));
        assert!(!written.contains(&"404.html".to_string()));
        assert!(!written.contains(&"crossdomain.xml".to_string()));
        assert!(!temp.path().join("doc").exists());
        assert!(!temp.path().join("img").exists());

        let index = fs::read_to_string(temp.path().join("index.html")).unwrap();
        assert!(index.contains("css/normalize.css"));
        assert!(!index.contains("Google Analytics"));
    }

    #[test]
    fn test_custom_directories_from_answers() {
        let temp = TempDir::new().unwrap();
        let answers = PromptAnswers {
            css_dir: "assets/css".to_string(),
            js_dir: "assets/js".to_string(),
            documentation: true,
            doc_dir: "manual".to_string(),
            ..default_answers()
        };

        generate(temp.path(), &ChoiceSet::from_answers(&answers));

        assert!(temp.path().join("assets/css/main.css").is_file());
        assert!(temp.path().join("assets/js/plugins.js").is_file());
        assert!(temp.path().join("manual/faq.md").is_file());
        assert!(temp.path().join("img").is_dir());
        let index = fs::read_to_string(temp.path().join("index.html")).unwrap();
        assert!(index.contains(r#"href="assets/css/main.css""#));
        assert!(index.contains(r#"src="assets/js/main.js""#));
    }
}

// =============================================================================
// Run properties
// =============================================================================

mod run_property_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_runs_are_byte_identical() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let mut raw = flags(&["default"]);
        raw.js_dir = Some("scripts".to_string());
        let choices = ChoiceSet::from_flags(&raw);

        generate(first.path(), &choices);
        generate(second.path(), &choices);

        assert_eq!(snapshot(first.path()), snapshot(second.path()));
    }

    #[test]
    fn test_rerun_into_same_directory_is_stable() {
        let temp = TempDir::new().unwrap();
        let choices = ChoiceSet::from_flags(&flags(&["default", "htaccess"]));

        generate(temp.path(), &choices);
        let before = snapshot(temp.path());
        generate(temp.path(), &choices);

        assert_eq!(snapshot(temp.path()), before);
    }

    #[test]
    fn test_missing_template_index_fails_before_writing() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(&template).unwrap();
        let dest = temp.path().join("out");

        let result = Generator::new(&template, &dest)
            .run(&ChoiceSet::from_flags(&flags(&["index"])));

        assert!(result.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_missing_script_directory_aborts_run() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(template.join("css")).unwrap();
        fs::write(template.join("css/main.css"), "body {}").unwrap();
        fs::write(template.join("robots.txt"), "User-agent: *").unwrap();
        let dest = temp.path().join("out");

        let result = Generator::new(&template, &dest)
            .run(&ChoiceSet::from_flags(&flags(&["main-css", "robots-txt"])));

        assert!(result.is_err());
        // Steps before the failure already wrote their files
        assert!(dest.join("robots.txt").is_file());
        assert!(dest.join("css/main.css").is_file());
    }
}
