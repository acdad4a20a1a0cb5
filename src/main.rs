#![forbid(unsafe_code)]
//! h5bp Command Line Interface

use std::path::PathBuf;

use clap::{Args, Parser};
use console::style;
use tracing_subscriber::EnvFilter;

use h5bp::choices::tables;
use h5bp::commands::{execute_generate, GenerateOptions};
use h5bp::config::{Config, CONFIG_FILE};
use h5bp::RawFlags;

#[derive(Parser)]
#[command(name = "h5bp")]
#[command(about = "Scaffold a web project from HTML5 Boilerplate, keeping only the files you pick")]
#[command(
    long_about = "Scaffold a web project from HTML5 Boilerplate, keeping only the files you pick.\n\n\
    Without any file or directory flags an interactive session asks for each choice.\n\n\
    With --default every file and feature is included; only --no-doc and\n\
    --no-ga can switch one back off, other files have no negated form."
)]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Template directory (defaults to the bundled template)
    #[arg(long, env = "H5BP_TEMPLATE")]
    template: Option<PathBuf>,

    /// Project root to write into
    #[arg(short = 'o', long)]
    dest: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    dirs: DirArgs,

    #[command(flatten)]
    files: FileArgs,
}

/// Destination directory names
#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Directories")]
struct DirArgs {
    /// Stylesheet directory
    #[arg(long, value_name = "DIR")]
    cssdir: Option<String>,

    /// Documentation directory
    #[arg(long, value_name = "DIR")]
    docdir: Option<String>,

    /// Image directory
    #[arg(long, value_name = "DIR")]
    imgdir: Option<String>,

    /// Script directory
    #[arg(long, value_name = "DIR")]
    jsdir: Option<String>,
}

/// File and feature switches
#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Files")]
struct FileArgs {
    /// Include every file whose own flag is not given (only --no-doc/--no-ga negate)
    #[arg(long)]
    default: bool,

    /// css/main.css
    #[arg(long)]
    main_css: bool,

    /// css/normalize.css
    #[arg(long)]
    normalize: bool,

    /// jQuery (CDN reference and local fallback)
    #[arg(long)]
    jquery: bool,

    /// js/main.js
    #[arg(long)]
    main_js: bool,

    /// Modernizr
    #[arg(long)]
    modernizr: bool,

    /// js/plugins.js
    #[arg(long)]
    plugins_js: bool,

    /// .htaccess
    #[arg(long)]
    htaccess: bool,

    /// 404.html
    #[arg(long = "404")]
    not_found: bool,

    /// apple-touch-icon*.png
    #[arg(long)]
    apple_touch_icons: bool,

    /// crossdomain.xml
    #[arg(long)]
    crossdomain_xml: bool,

    /// favicon.ico
    #[arg(long)]
    favicon: bool,

    /// humans.txt
    #[arg(long)]
    humans_txt: bool,

    /// index.html
    #[arg(long)]
    index: bool,

    /// robots.txt
    #[arg(long)]
    robots_txt: bool,

    /// Keep the Google Analytics snippet
    #[arg(long, visible_alias = "ga", overrides_with = "no_google_analytics")]
    google_analytics: bool,

    /// Drop the Google Analytics snippet
    #[arg(long, visible_alias = "no-ga", overrides_with = "google_analytics")]
    no_google_analytics: bool,

    /// Copy the documentation and create the image directory
    #[arg(long, visible_alias = "doc", overrides_with = "no_documentation")]
    documentation: bool,

    /// Skip the documentation
    #[arg(long, visible_alias = "no-doc", overrides_with = "documentation")]
    no_documentation: bool,
}

impl Cli {
    /// Collect only the choice flags that were actually passed
    fn raw_flags(&self) -> RawFlags {
        let mut raw = RawFlags::new();
        let f = &self.files;

        let switches = [
            (tables::DEFAULT_FLAG, f.default),
            ("main-css", f.main_css),
            ("normalize", f.normalize),
            ("jquery", f.jquery),
            ("main-js", f.main_js),
            ("modernizr", f.modernizr),
            ("plugins-js", f.plugins_js),
            ("htaccess", f.htaccess),
            ("404", f.not_found),
            ("apple-touch-icons", f.apple_touch_icons),
            ("crossdomain-xml", f.crossdomain_xml),
            ("favicon", f.favicon),
            ("humans-txt", f.humans_txt),
            ("index", f.index),
            ("robots-txt", f.robots_txt),
        ];
        for (flag, on) in switches {
            if on {
                raw.set(flag, true);
            }
        }

        let negatable = [
            (tables::ANALYTICS_FLAG, f.google_analytics, f.no_google_analytics),
            (tables::DOCUMENTATION_FLAG, f.documentation, f.no_documentation),
        ];
        for (flag, on, off) in negatable {
            if on {
                raw.set(flag, true);
            } else if off {
                raw.set(flag, false);
            }
        }

        raw.css_dir = self.dirs.cssdir.clone();
        raw.doc_dir = self.dirs.docdir.clone();
        raw.img_dir = self.dirs.imgdir.clone();
        raw.js_dir = self.dirs.jsdir.clone();
        raw
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "h5bp=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(&cli.config)?;

    let options = GenerateOptions {
        template: config.template_dir(cli.template.as_deref()),
        destination: config.destination_dir(cli.dest.as_deref()),
        flags: cli.raw_flags(),
        verbose: cli.verbose,
    };
    tracing::debug!(
        "Template {} -> {}",
        options.template.display(),
        options.destination.display()
    );

    execute_generate(options)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("✗").red(), e);
        std::process::exit(1);
    }
}
