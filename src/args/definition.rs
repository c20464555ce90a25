//! Command-line argument definition and dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use alamendah::i18n::Locale;

/// Alamendah - locale resolution and runtime translation for the tourism village storefront
#[derive(Parser, Debug)]
#[command(name = "alamendah")]
#[command(version)]
#[command(about = "Locale resolution and runtime translation for the Alamendah storefront", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Localization config file (default: config/i18n.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the translation service endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Override the per-request translation timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output format for bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BundleFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML under the locale key, like the files in `config/locales`.
    Yaml,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate one Indonesian text and print a JSON report
    Translate {
        /// Text to translate
        text: String,
        /// Target locale
        #[arg(long, default_value = "en")]
        to: Locale,
    },
    /// Print the site copy bundle in a locale, translating it when needed
    Bundle {
        /// Locale to print
        #[arg(long, default_value = "id")]
        locale: Locale,
        /// Directory holding `{locale}.yml` files
        #[arg(long)]
        locales_dir: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = BundleFormat::Json)]
        format: BundleFormat,
        /// Skip seeding the translation cache from the curated bundle
        #[arg(long)]
        no_seed: bool,
    },
    /// Resolve the locale for a request path
    Resolve {
        /// Request path, e.g. `/en/menu`
        path: String,
        /// Raw `Cookie` header sent with the request
        #[arg(long)]
        cookie: Option<String>,
        /// Preference file (default: ~/.config/alamendah/preferences.yml)
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Switch the preferred locale and print the navigation target
    Switch {
        /// Locale to switch to
        locale: Locale,
        /// Path the user is on
        #[arg(long, default_value = "/")]
        path: String,
        /// Preference file (default: ~/.config/alamendah/preferences.yml)
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Print site settings and resolve photo paths
    Site {
        /// Photo paths to resolve to URLs
        images: Vec<String>,
    },
}

/// What: Run the selected subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(())` once the command's output has been printed.
///
/// # Errors
/// - Returns `Err` when a bundle or config cannot be loaded, the HTTP client cannot be
///   built, the preference file cannot be written, or output cannot be serialized.
pub async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use crate::args::utils::load_config;
    use crate::args::{bundle, locale, site, translate};

    match &args.command {
        Command::Translate { text, to } => translate::handle_translate(args, text, *to).await,
        Command::Bundle {
            locale,
            locales_dir,
            format,
            no_seed,
        } => {
            bundle::handle_bundle(args, *locale, locales_dir.as_deref(), *format, !*no_seed).await
        }
        Command::Resolve { path, cookie, prefs } => locale::handle_resolve(
            path,
            cookie.as_deref(),
            prefs.as_deref(),
            load_config(args).default_locale,
        ),
        Command::Switch { locale, path, prefs } => {
            locale::handle_switch(*locale, path, prefs.as_deref())
        }
        Command::Site { images } => site::handle_site(images),
    }
}
