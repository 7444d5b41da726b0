//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use plainread_core::{ProgressReporter, TranslateRequest, Translator, translate_batch};
use plainread_shared::{
    AppConfig, DIRECT_INPUT_SOURCE, SubjectArea, TranslationResult, init_config, load_config,
    load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// PlainRead: academic papers in plain language.
#[derive(Parser)]
#[command(
    name = "plainread",
    version,
    about = "Translate academic papers into plain, accessible language.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.plainread/plainread.toml.
    #[arg(long, global = true, env = "PLAINREAD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Translate one or more documents (TXT, Markdown, HTML) or direct text.
    Translate {
        /// Documents to translate.
        files: Vec<PathBuf>,

        /// Translate this text instead of (or in addition to) files.
        #[arg(short, long)]
        text: Option<String>,

        /// Accessibility module to apply (repeatable, applied in order).
        #[arg(short, long = "module", value_delimiter = ',')]
        modules: Vec<String>,

        /// Subject area override: medical, psychology, education, social_science, science.
        #[arg(short, long)]
        subject: Option<SubjectArea>,

        /// Report file stem (defaults to `<subject>_research_translation`).
        #[arg(short, long)]
        output: Option<String>,

        /// Directory for JSON/HTML reports (defaults to config `output_dir`).
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the result JSON to stdout instead of the summary.
        #[arg(long)]
        json: bool,
    },

    /// List available accessibility modules.
    Modules,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "plainread=warn",
        1 => "plainread=info",
        2 => "plainread=debug",
        _ => "plainread=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Translate {
            files,
            text,
            modules,
            subject,
            output,
            out_dir,
            json,
        } => {
            let args = TranslateArgs {
                files,
                text,
                modules,
                subject,
                output,
                out_dir,
                json,
            };
            cmd_translate(&config, args).await
        }
        Command::Modules => cmd_modules(&config),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// translate
// ---------------------------------------------------------------------------

struct TranslateArgs {
    files: Vec<PathBuf>,
    text: Option<String>,
    modules: Vec<String>,
    subject: Option<SubjectArea>,
    output: Option<String>,
    out_dir: Option<PathBuf>,
    json: bool,
}

async fn cmd_translate(config: &AppConfig, args: TranslateArgs) -> Result<()> {
    if args.files.is_empty() && args.text.is_none() {
        return Err(eyre!("nothing to translate: pass one or more FILES or --text"));
    }

    let modules = if args.modules.is_empty() {
        config.modules.default.clone()
    } else {
        args.modules
    };

    let mut requests = Vec::new();
    let mut stems = Vec::new();

    if let Some(text) = args.text {
        requests.push(
            TranslateRequest::new(text)
                .with_modules(modules.clone())
                .with_source(DIRECT_INPUT_SOURCE)
                .with_subject(args.subject),
        );
        stems.push(None);
    }

    for path in &args.files {
        let text = plainread_ingest::extract_text(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        info!(path = %path.display(), chars = text.chars().count(), "read document");

        requests.push(
            TranslateRequest::new(text)
                .with_modules(modules.clone())
                .with_source(path.display().to_string())
                .with_subject(args.subject),
        );
        stems.push(file_stem(path));
    }

    let single = requests.len() == 1;
    let translator = Arc::new(Translator::from_config(config));
    let reporter = Arc::new(CliProgress::new(args.json));
    let concurrency = config.defaults.concurrency as usize;

    let results = translate_batch(
        translator,
        requests,
        concurrency,
        Arc::clone(&reporter) as Arc<dyn ProgressReporter>,
    )
    .await;
    reporter.finish();

    let out_dir = args
        .out_dir
        .unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir));

    let total = results.len();
    let mut failed = 0;

    for (index, (result, stem_hint)) in results.into_iter().zip(stems).enumerate() {
        let result = match result {
            Ok(result) => result,
            Err(e) => {
                failed += 1;
                warn!(error = %e, "translation failed");
                eprintln!("  ✗ document {}: {e}", index + 1);
                continue;
            }
        };

        let stem = match (&args.output, stem_hint, single) {
            (Some(output), _, true) => output.clone(),
            (Some(output), _, false) => format!("{output}_{}", index + 1),
            (None, Some(hint), false) => hint,
            (None, _, _) => plainread_report::default_stem(&result),
        };

        let metas = plainread_report::save_report(&result, &stem, &out_dir)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_summary(&result);
            for meta in &metas {
                println!("  💾 Saved: {}", meta.path.display());
            }
            println!();
        }
    }

    if failed > 0 {
        return Err(eyre!("{failed} of {total} documents could not be translated"));
    }
    Ok(())
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

fn print_summary(result: &TranslationResult) {
    println!();
    println!("  📄 Source: {}", result.source_identifier);
    println!("  📚 Subject Area: {}", result.subject_area.label());
    println!("  📖 Reading Level: {}", result.reading_level);
    println!("  🎯 Translation Confidence: {:.0}%", result.confidence * 100.0);

    print_top(
        &format!("🔍 Key Findings ({} found)", result.key_findings.len()),
        &result.key_findings,
        3,
    );
    print_top(
        &format!("💡 Why This Matters ({} reasons)", result.why_it_matters.len()),
        &result.why_it_matters,
        3,
    );
    print_top(
        &format!("❓ Questions to Ask Experts ({} suggestions)", result.questions.len()),
        &result.questions,
        2,
    );

    if !result.modules_applied.is_empty() {
        println!();
        println!("  🔧 Modules applied: {}", result.modules_applied.join(", "));
    }
}

fn print_top(heading: &str, items: &[String], limit: usize) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("  {heading}:");
    for item in items.iter().take(limit) {
        println!("     {item}");
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new(hidden: bool) -> Self {
        let spinner = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn document_started(&self, source: &str, index: usize, total: usize) {
        self.spinner
            .set_message(format!("Translating [{}/{total}] {source}", index + 1));
    }

    fn document_finished(&self, source: &str, ok: bool) {
        if !ok {
            self.spinner.println(format!("  ✗ {source}"));
        }
    }
}

// ---------------------------------------------------------------------------
// modules / config
// ---------------------------------------------------------------------------

fn cmd_modules(config: &AppConfig) -> Result<()> {
    let translator = Translator::from_config(config);
    let modules = translator.list_available_modules();

    if modules.is_empty() {
        println!("No accessibility modules available.");
        return Ok(());
    }

    println!("📚 Available Accessibility Modules:");
    for module in &modules {
        println!(
            "   • {} ({}): {}",
            module.name, module.display_name, module.description
        );
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
