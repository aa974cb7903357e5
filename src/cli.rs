use crate::{
    analyzer, catalog,
    config::Config,
    prefs::{self, RawPreferences},
    probe::{poppler::PopplerProbe, DocProbe},
    report, scoring,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "shrink-advisor")]
#[command(about = "PDF compression profile advisor (content probes + preference scoring)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./shrink-advisor.toml, then
    /// ./shrink-advisor.example.toml, if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the external inspection tools are available.
    Doctor {},
    /// Characterize a document's content signals.
    Analyze {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Rank compression profiles for a document and/or stated preferences.
    Recommend {
        /// Document to analyze. Without it, scoring runs on preferences alone.
        #[arg(long)]
        input: Option<PathBuf>,
        /// print | digital | archive | bulk
        #[arg(long)]
        use_case: Option<String>,
        /// scanned | text | mixed | unknown
        #[arg(long)]
        doc_type: Option<String>,
        /// quality | balanced | aggressive
        #[arg(long)]
        size_priority: Option<String>,
        /// Overrides the print intent implied by --use-case.
        #[arg(long)]
        will_print: Option<bool>,
        /// Show only the N best profiles.
        #[arg(long)]
        top: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Dump the profile catalog.
    Profiles {
        #[arg(long)]
        json: bool,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref());
    let cfg = match &cfg_path {
        Some(p) => Config::load(p)?,
        None => Config::default(),
    };
    let _guard = init_logging(&args, &cfg)?;

    match &args.cmd {
        Command::Doctor {} => doctor(&cfg),
        Command::Analyze { input, json } => analyze(&cfg, input, *json),
        Command::Recommend {
            input,
            use_case,
            doc_type,
            size_priority,
            will_print,
            top,
            json,
        } => {
            let raw = RawPreferences {
                use_case: use_case.clone(),
                document_type: doc_type.clone(),
                size_priority: size_priority.clone(),
                will_print: *will_print,
            };
            recommend(&cfg, input.as_deref(), &raw, *top, *json)
        }
        Command::Profiles { json } => profiles(*json),
    }
}

/// `--config` wins; otherwise `./shrink-advisor.toml`, then the shipped
/// example file. `None` (built-in defaults) only when neither file exists.
pub fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("shrink-advisor.toml");
    if default.exists() {
        return Some(default);
    }
    let example = PathBuf::from("shrink-advisor.example.toml");
    if example.exists() { Some(example) } else { None }
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if cfg.logging.write_to_file {
        let path = if cfg.logging.file_path.is_empty() {
            PathBuf::from("shrink-advisor.log")
        } else {
            PathBuf::from(&cfg.logging.file_path)
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create log dir: {}", parent.display()))?;
            }
        }
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn doctor(cfg: &Config) -> Result<()> {
    let probe = PopplerProbe::new(cfg);
    let diag = probe.doctor()?;
    println!("{}", serde_json::to_string_pretty(&diag)?);
    Ok(())
}

fn analyze(cfg: &Config, input: &Path, json: bool) -> Result<()> {
    validate_input(cfg, input)?;
    let probe = PopplerProbe::new(cfg);
    let doc = analyzer::analyze(cfg, &probe, input)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", report::format_analysis(&doc));
    }
    Ok(())
}

fn recommend(
    cfg: &Config,
    input: Option<&Path>,
    raw: &RawPreferences,
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    let preferences = prefs::normalize(raw);

    let doc = match input {
        Some(path) => {
            validate_input(cfg, path)?;
            let probe = PopplerProbe::new(cfg);
            Some(analyzer::analyze(cfg, &probe, path)?)
        }
        None => None,
    };

    let mut scores = scoring::score_profiles(cfg, &preferences, doc.as_ref());
    if let Some(n) = top {
        scores.truncate(n.max(1));
    }

    if json {
        let rec = report::Recommendation {
            preferences: &preferences,
            characterization: doc.as_ref(),
            scores: &scores,
        };
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        if let Some(doc) = &doc {
            print!("{}", report::format_analysis(doc));
            println!();
        }
        print!("{}", report::format_scores(&scores));
    }
    Ok(())
}

fn profiles(json: bool) -> Result<()> {
    let all = catalog::all();
    if json {
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }
    for p in all {
        println!(
            "{:<16} {:>3} dpi  {:?}  est. reduction {}-{}%  quality {}{}{}",
            p.name,
            p.dpi_tier.dpi(),
            p.encoding,
            p.estimated_compression.low_pct,
            p.estimated_compression.high_pct,
            p.quality.label(),
            if p.legacy { "  [legacy]" } else { "" },
            if p.archive { "  [archive]" } else { "" },
        );
    }
    Ok(())
}

fn validate_input(cfg: &Config, input: &Path) -> Result<()> {
    let input_str = input.display().to_string();

    if cfg.security.reject_url_inputs && looks_like_url(&input_str) {
        return Err(anyhow!("URL inputs are disabled: {input_str}"));
    }

    if let Some(ext) = input.extension().and_then(|s| s.to_str()) {
        if ext.to_ascii_lowercase() != "pdf" {
            warn!("input does not look like a PDF: {}", input.display());
        }
    } else {
        warn!("input has no extension; assuming PDF: {}", input.display());
    }

    Ok(())
}

fn looks_like_url(s: &str) -> bool {
    let s = s.to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://")
}
