//! CLI binary for resume-skill-scan.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalysisConfig`, prints the comparison and writes the chart and report.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resume_skill_scan::{
    build_outputs, parse_language, render_chart, AnalysisConfig, AnalysisProgressCallback,
    Analyzer, ProgressCallback, SkillSet, Warning, DEFAULT_SKILLS, REPORT_FILE_NAME,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the batch, one log line per
/// resume, warnings printed as they happen.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} resumes  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Analysing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl AnalysisProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_documents: usize) {
        self.bar.set_length(total_documents as u64);
        self.bar.reset_eta();
    }

    fn on_document_start(&self, _index: usize, _total: usize, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn on_document_complete(&self, index: usize, total: usize, name: &str, matched_skills: usize) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3} {}  {}",
            green("✓"),
            index,
            total,
            name,
            dim(&format!("{matched_skills} skills matched")),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, index: usize, total: usize, name: &str, error: &str) {
        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };
        self.bar.println(format!(
            "  {} {:>3}/{:<3} {}  {}",
            red("✗"),
            index,
            total,
            name,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_warning(&self, warning: &Warning) {
        self.bar
            .println(format!("  {} {}", yellow("⚠"), yellow(&warning.to_string())));
    }

    fn on_batch_complete(&self, total_documents: usize, success_count: usize) {
        self.bar.finish_and_clear();
        let failed = total_documents.saturating_sub(success_count);
        if failed == 0 {
            eprintln!(
                "{} {} resumes analysed",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} resumes analysed  ({} unreadable)",
                yellow("⚠"),
                bold(&success_count.to_string()),
                total_documents,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Count the default skills in two resumes
  skillscan alice.pdf bob.pdf

  # Custom skills, write chart and report
  skillscan --skills "Rust, Kubernetes, SQL" --chart chart.svg --report=report.docx resumes/*.pdf

  # Report under its default name
  skillscan --report resumes/*.pdf

  # Skip translation entirely (no API key needed)
  skillscan --no-translate resumes/*.pdf

  # Machine-readable output
  skillscan --json resumes/*.pdf > skills.json

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key (translation)
  ANTHROPIC_API_KEY       Anthropic API key (translation)
  EDGEQUAKE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID
  PDFIUM_LIB_PATH         Path to libpdfium (otherwise ./ then the system library)

Matching is case-insensitive substring counting over text in which spaces
have been turned into line breaks: "sql" also matches "MySQL", and
multi-word skills such as "Machine Learning" never match.
"#;

/// Count skill keywords across PDF resumes and compare them.
#[derive(Parser, Debug)]
#[command(
    name = "skillscan",
    version,
    about = "Count skill keywords across PDF resumes and compare them",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file paths or HTTP/HTTPS URLs.
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Required skills, comma-separated.
    #[arg(short, long, env = "SKILLSCAN_SKILLS", default_value = DEFAULT_SKILLS)]
    skills: String,

    /// Write the Word report. A bare `--report` writes
    /// `skills_comparison_report.docx`; use `--report=<PATH>` to choose the path.
    #[arg(
        short,
        long,
        env = "SKILLSCAN_REPORT",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = REPORT_FILE_NAME
    )]
    report: Option<PathBuf>,

    /// Write the comparison bar chart (SVG) to this path.
    #[arg(long, env = "SKILLSCAN_CHART")]
    chart: Option<PathBuf>,

    /// Output the analysis as JSON instead of a text table.
    #[arg(long, env = "SKILLSCAN_JSON")]
    json: bool,

    /// Do not translate non-target-language resumes.
    #[arg(long, env = "SKILLSCAN_NO_TRANSLATE")]
    no_translate: bool,

    /// Target language, ISO 639-3 (eng, fra, deu, …).
    #[arg(long, env = "SKILLSCAN_TARGET_LANGUAGE", default_value = "eng")]
    target_language: String,

    /// LLM model ID used for translation.
    #[arg(long, env = "EDGEQUAKE_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "EDGEQUAKE_PROVIDER")]
    provider: Option<String>,

    /// Path to a text file containing a custom translation prompt.
    #[arg(long, env = "SKILLSCAN_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "SKILLSCAN_TEMPERATURE", default_value_t = 0.1)]
    temperature: f32,

    /// Max LLM output tokens per resume.
    #[arg(long, env = "SKILLSCAN_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// PDF user password for encrypted resumes.
    #[arg(long, env = "SKILLSCAN_PASSWORD")]
    password: Option<String>,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "SKILLSCAN_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Disable progress bar.
    #[arg(long, env = "SKILLSCAN_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SKILLSCAN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, env = "SKILLSCAN_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let skills = SkillSet::parse(&cli.skills);
    if skills.is_empty() {
        anyhow::bail!("No skills given: --skills must contain at least one non-empty entry");
    }

    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn AnalysisProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress).await?;

    // ── Run analysis ─────────────────────────────────────────────────────
    let analyzer = Analyzer::new(&config);
    let outcome = analyzer.analyze_inputs(&cli.inputs, &skills).await;

    // Without the progress bar nobody has shown the user what went wrong yet.
    if !show_progress && !cli.quiet {
        for warning in &outcome.warnings {
            eprintln!("{} {}", yellow("⚠"), warning);
        }
        for failure in &outcome.failures {
            eprintln!("{} {}: {}", red("✗"), failure.name, failure.error);
        }
    }

    let (table, report) = build_outputs(&outcome.documents, &skills);

    if cli.json {
        let json = serde_json::json!({
            "skills": skills,
            "outcome": outcome,
            "comparison": table,
            "report": report,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).context("Failed to serialise output")?
        );
    } else {
        print!("{}", table.render_text());
    }

    if let Some(ref path) = cli.chart {
        render_chart(&table, path).context("Failed to render chart")?;
        if !cli.quiet {
            eprintln!("{} chart  →  {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    if let Some(ref path) = cli.report {
        report.write_docx(path).context("Failed to write report")?;
        if !cli.quiet {
            eprintln!(
                "{} report ({} resumes)  →  {}",
                green("✔"),
                report.entries.len(),
                bold(&path.display().to_string())
            );
        }
    }

    Ok(())
}

/// Map CLI args to `AnalysisConfig`.
async fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<AnalysisConfig> {
    let target = parse_language(&cli.target_language).context("Invalid --target-language")?;

    let mut builder = AnalysisConfig::builder()
        .target_language(target)
        .translate(!cli.no_translate)
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref path) = cli.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(prompt);
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider.clone());
    }
    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_flag_without_value_uses_default_name() {
        let cli = Cli::try_parse_from(["skillscan", "a.pdf", "--report"]).unwrap();
        assert_eq!(cli.report, Some(PathBuf::from(REPORT_FILE_NAME)));
    }

    #[test]
    fn bare_report_flag_does_not_take_the_next_input() {
        let cli = Cli::try_parse_from(["skillscan", "--report", "alice.pdf", "bob.pdf"]).unwrap();
        assert_eq!(cli.inputs, vec!["alice.pdf", "bob.pdf"]);
        assert_eq!(cli.report, Some(PathBuf::from(REPORT_FILE_NAME)));
    }

    #[test]
    fn report_path_needs_equals() {
        let cli =
            Cli::try_parse_from(["skillscan", "--report=out/skills.docx", "alice.pdf"]).unwrap();
        assert_eq!(cli.report, Some(PathBuf::from("out/skills.docx")));
        assert_eq!(cli.inputs, vec!["alice.pdf"]);
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["skillscan", "a.pdf", "b.pdf"]).unwrap();
        assert_eq!(cli.inputs, vec!["a.pdf", "b.pdf"]);
        assert_eq!(cli.skills, DEFAULT_SKILLS);
        assert_eq!(cli.target_language, "eng");
        assert!(cli.report.is_none());
        assert!(!cli.no_translate);
    }
}
