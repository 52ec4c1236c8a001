//! MindMate CLI - Command-line front-end for the mood journal
//!
//! Commands:
//! - check-in: Classify a check-in and append it to the mood log
//! - history: Print the mood log
//! - summary: Print label counts and the mood trend
//! - export: Write a JSON mood report
//! - doctor: Diagnose configuration and mood log health

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mindmate::{
    CheckInEntry, ConfigError, FileMoodLog, JournalConfig, JournalError, MoodJournal, MoodLabel,
    MoodLog, MoodSummary, MINDMATE_VERSION, PRODUCER_NAME,
};

/// MindMate - Local-first mood journal
#[derive(Parser)]
#[command(name = "mindmate")]
#[command(version = MINDMATE_VERSION)]
#[command(about = "Private mood check-ins with crisis detection", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Mood log path, overrides the config file
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a check-in and append it to the mood log
    CheckIn {
        /// Check-in text (read from stdin when omitted)
        text: Option<String>,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the mood log
    History {
        /// Only print the last N entries
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Print label counts and the mood trend
    Summary {
        /// Number of recent entries to include
        #[arg(long)]
        recent: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a JSON mood report
    Export {
        /// Report title, also used for the file name
        #[arg(long)]
        title: String,

        /// Output directory, overrides the config file
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Diagnose configuration and mood log health
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one entry per line)
    Ndjson,
    /// JSON array of entries
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), MindmateCliError> {
    let mut config = JournalConfig::load_or_default(cli.config.as_deref())?;
    if let Some(log) = cli.log {
        config.log_path = log;
    }

    match cli.command {
        Commands::CheckIn { text, json } => cmd_check_in(&config, text, json),

        Commands::History {
            limit,
            output_format,
        } => cmd_history(&config, limit, output_format),

        Commands::Summary { recent, json } => {
            cmd_summary(&config, recent.unwrap_or(config.recent_limit), json)
        }

        Commands::Export { title, output_dir } => {
            let dir = output_dir.unwrap_or_else(|| config.report_dir.clone());
            cmd_export(&config, &title, &dir)
        }

        Commands::Doctor { json } => cmd_doctor(&config, cli.config.as_deref(), json),
    }
}

fn cmd_check_in(
    config: &JournalConfig,
    text: Option<String>,
    json: bool,
) -> Result<(), MindmateCliError> {
    let text = match text {
        Some(text) => text,
        None if atty::isnt(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(MindmateCliError::Journal(JournalError::EmptyInput)),
    };

    let journal = MoodJournal::open(config);
    let result = journal.check_in(&text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Detected mood: {}", result.label);
        if result.is_crisis {
            println!("RED FLAG detected! {}", result.message);
        } else {
            println!("{}", result.message);
        }
        if result.persisted {
            println!("Saved locally to {}", journal.log().path().display());
        } else {
            println!("Warning: this check-in could not be saved");
        }
    }

    Ok(())
}

fn cmd_history(
    config: &JournalConfig,
    limit: Option<usize>,
    output_format: OutputFormat,
) -> Result<(), MindmateCliError> {
    let journal = MoodJournal::open(config);
    let mut entries = journal.history()?;

    if let Some(limit) = limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }

    print!("{}", format_output(&entries, &output_format)?);
    Ok(())
}

fn cmd_summary(config: &JournalConfig, recent: usize, json: bool) -> Result<(), MindmateCliError> {
    let journal = MoodJournal::open(config);
    let summary = journal.summary(recent)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.is_empty() {
        println!("No logs yet. Do a check-in to generate local logs.");
        return Ok(());
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &MoodSummary) {
    println!("Mood Summary");
    println!("============");
    println!("Total check-ins: {}", summary.total);
    if let (Some(first), Some(last)) = (summary.first_at, summary.last_at) {
        println!("Period:          {} .. {}", first.to_rfc3339(), last.to_rfc3339());
    }
    if let Some(mean) = summary.mean_mood {
        println!("Mean mood:       {:+.2}", mean);
    }

    println!("\nLabel counts:");
    for label in MoodLabel::ALL {
        println!("  {:<9} {}", label.as_str(), summary.counts.get(label));
    }

    let trend: String = summary
        .trend
        .iter()
        .map(|p| match p.value {
            v if v < 0 => '-',
            v if v > 0 => '+',
            _ => '0',
        })
        .collect();
    println!("\nTrend: {}", trend);

    println!("\nRecent entries:");
    for entry in &summary.recent {
        println!(
            "  {} [{}] {}",
            entry.timestamp.to_rfc3339(),
            entry.label,
            entry.text.trim()
        );
    }
}

fn cmd_export(config: &JournalConfig, title: &str, dir: &Path) -> Result<(), MindmateCliError> {
    let journal = MoodJournal::open(config);
    let report = journal.report(title)?;
    let path = report.write_to_dir(dir)?;

    println!("Report generated: {}", path.display());
    Ok(())
}

fn cmd_doctor(
    config: &JournalConfig,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), MindmateCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "mindmate_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("MindMate version {}", MINDMATE_VERSION),
    });

    checks.push(DoctorCheck {
        name: "config".to_string(),
        status: CheckStatus::Ok,
        message: match config_path {
            Some(path) => format!("Loaded {}", path.display()),
            None => "Using built-in defaults".to_string(),
        },
    });

    let log = FileMoodLog::new(config.log_path.clone());
    let log_check = if !log.exists() {
        DoctorCheck {
            name: "mood_log".to_string(),
            status: CheckStatus::Warning,
            message: format!("Mood log {} does not exist yet", log.path().display()),
        }
    } else {
        match log.read_all() {
            Ok(entries) => DoctorCheck {
                name: "mood_log".to_string(),
                status: CheckStatus::Ok,
                message: format!("Mood log valid ({} entries)", entries.len()),
            },
            Err(e) => DoctorCheck {
                name: "mood_log".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            },
        }
    };
    checks.push(log_check);

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (pass check-in text as an argument)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (check-in text can be piped)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: MINDMATE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("MindMate Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(MindmateCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn format_output(
    entries: &[CheckInEntry],
    format: &OutputFormat,
) -> Result<String, MindmateCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut out = String::new();
            for entry in entries {
                out.push_str(&serde_json::to_string(entry)?);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string(entries)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(entries)? + "\n"),
    }
}

// Error types

#[derive(Debug)]
enum MindmateCliError {
    Io(io::Error),
    Config(ConfigError),
    Journal(JournalError),
    Json(serde_json::Error),
    DoctorFailed,
}

impl From<io::Error> for MindmateCliError {
    fn from(e: io::Error) -> Self {
        MindmateCliError::Io(e)
    }
}

impl From<ConfigError> for MindmateCliError {
    fn from(e: ConfigError) -> Self {
        MindmateCliError::Config(e)
    }
}

impl From<JournalError> for MindmateCliError {
    fn from(e: JournalError) -> Self {
        MindmateCliError::Journal(e)
    }
}

impl From<serde_json::Error> for MindmateCliError {
    fn from(e: serde_json::Error) -> Self {
        MindmateCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MindmateCliError> for CliError {
    fn from(e: MindmateCliError) -> Self {
        match e {
            MindmateCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that stdin is readable".to_string()),
            },
            MindmateCliError::Config(e) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the --config path and TOML keys".to_string()),
            },
            MindmateCliError::Journal(JournalError::EmptyInput) => CliError {
                code: "EMPTY_INPUT".to_string(),
                message: "Check-in text is empty".to_string(),
                hint: Some("Please type something about how you are feeling".to_string()),
            },
            MindmateCliError::Journal(e @ JournalError::Store(_)) => CliError {
                code: "STORE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'mindmate doctor' to inspect the mood log".to_string()),
            },
            MindmateCliError::Journal(e) => CliError {
                code: "REPORT_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the output directory and permissions".to_string()),
            },
            MindmateCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            MindmateCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
