//! Coach CLI - Command-line interface for Pipo Coach
//!
//! Commands:
//! - review: Generate feedback cards, a narrative note, and follow-up questions
//! - summarize: Print the normalized metrics summary for a session
//! - article: Print a daily article draft
//! - doctor: Diagnose configuration health

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use pipo_coach::{
    daily_article_draft, CoachEngine, CoachError, GenerationConfig, SessionNormalizer,
    SessionRecord, TargetLevel, COACH_VERSION, PRODUCER_NAME,
};

/// Coach - Feedback generation for recorded speech practice sessions
#[derive(Parser)]
#[command(name = "coach")]
#[command(author = "Pipo Labs")]
#[command(version = COACH_VERSION)]
#[command(about = "Turn practice-session metrics into coaching artifacts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate all coaching artifacts for a recorded session
    Review {
        /// Session record JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Scenario title the session was practicing
        #[arg(long)]
        scenario: Option<String>,

        /// Target level for follow-up questions
        #[arg(long, default_value = "2")]
        next_level: u8,

        /// Skip the completion provider and use rule-based generation only
        #[arg(long)]
        offline: bool,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the normalized metrics summary for a session
    Summarize {
        /// Session record JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Scenario title the session was practicing
        #[arg(long)]
        scenario: Option<String>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print a daily article draft
    Article {
        /// Titles to exclude from selection (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Diagnose configuration health
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
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

fn run(cli: Cli) -> Result<(), CoachCliError> {
    match cli.command {
        Commands::Review {
            input,
            scenario,
            next_level,
            offline,
            pretty,
        } => cmd_review(&input, scenario.as_deref(), next_level, offline, pretty),

        Commands::Summarize {
            input,
            scenario,
            pretty,
        } => cmd_summarize(&input, scenario.as_deref(), pretty),

        Commands::Article { exclude, pretty } => cmd_article(&exclude, pretty),

        Commands::Doctor { json } => cmd_doctor(json),
    }
}

fn read_session(input: &PathBuf) -> Result<SessionRecord, CoachCliError> {
    let data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    if data.trim().is_empty() {
        return Err(CoachCliError::EmptyInput);
    }

    Ok(serde_json::from_str(&data)?)
}

fn cmd_review(
    input: &PathBuf,
    scenario: Option<&str>,
    next_level: u8,
    offline: bool,
    pretty: bool,
) -> Result<(), CoachCliError> {
    let session = read_session(input)?;
    let target =
        TargetLevel::try_from(next_level).map_err(CoachCliError::InvalidTargetLevel)?;

    let summary = SessionNormalizer::normalize(&session, scenario);

    let (cards, note, questions) = if offline {
        (
            pipo_coach::fallback::fallback_feedback_cards(&summary),
            pipo_coach::fallback::fallback_narrative_note(&summary),
            pipo_coach::fallback::fallback_questions(summary.scenario_title.as_deref(), target),
        )
    } else {
        let engine = CoachEngine::new(GenerationConfig::from_env());
        (
            engine.generate_feedback_cards(&summary)?,
            engine.generate_narrative_note(&summary)?,
            engine.generate_follow_up_questions(&summary, target)?,
        )
    };

    let output = serde_json::json!({
        "summary": summary,
        "cards": cards,
        "note": note,
        "questions": questions,
    });
    print_json(&output, pretty)?;
    Ok(())
}

fn cmd_summarize(
    input: &PathBuf,
    scenario: Option<&str>,
    pretty: bool,
) -> Result<(), CoachCliError> {
    let session = read_session(input)?;
    let summary = SessionNormalizer::normalize(&session, scenario);

    if let Some(recorded_at) = session.recorded_at {
        log::info!("session recorded at {}", recorded_at.to_rfc3339());
    }

    print_json(&serde_json::to_value(&summary)?, pretty)?;
    Ok(())
}

fn cmd_article(exclude: &[String], pretty: bool) -> Result<(), CoachCliError> {
    let draft = daily_article_draft(exclude);
    print_json(&serde_json::to_value(&draft)?, pretty)?;
    Ok(())
}

fn cmd_doctor(json: bool) -> Result<(), CoachCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "coach_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Coach version {}", COACH_VERSION),
    });

    let config = GenerationConfig::from_env();
    if config.api_key.is_some() {
        checks.push(DoctorCheck {
            name: "credential".to_string(),
            status: CheckStatus::Ok,
            message: "GEMINI_API_KEY is configured".to_string(),
        });
    } else {
        checks.push(DoctorCheck {
            name: "credential".to_string(),
            status: CheckStatus::Error,
            message: "GEMINI_API_KEY is missing; only --offline review will work".to_string(),
        });
    }

    checks.push(DoctorCheck {
        name: "model".to_string(),
        status: CheckStatus::Ok,
        message: format!("Completion model: {}", config.model),
    });

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (ready for --input -)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: COACH_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Coach Doctor Report");
        println!("===================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
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
        Err(CoachCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), CoachCliError> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

// Error types

#[derive(Debug)]
enum CoachCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Coach(CoachError),
    InvalidTargetLevel(u8),
    EmptyInput,
    DoctorFailed,
}

impl From<io::Error> for CoachCliError {
    fn from(e: io::Error) -> Self {
        CoachCliError::Io(e)
    }
}

impl From<serde_json::Error> for CoachCliError {
    fn from(e: serde_json::Error) -> Self {
        CoachCliError::Json(e)
    }
}

impl From<CoachError> for CoachCliError {
    fn from(e: CoachError) -> Self {
        CoachCliError::Coach(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CoachCliError> for CliError {
    fn from(e: CoachCliError) -> Self {
        match e {
            CoachCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CoachCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that the input is a valid session record".to_string()),
            },
            CoachCliError::Coach(e) => CliError {
                code: match e {
                    CoachError::Configuration(_) => "CONFIGURATION_ERROR".to_string(),
                    CoachError::Upstream(_) => "UPSTREAM_ERROR".to_string(),
                    CoachError::Extraction(_) => "EXTRACTION_ERROR".to_string(),
                },
                message: e.to_string(),
                hint: Some("Set GEMINI_API_KEY or rerun with --offline".to_string()),
            },
            CoachCliError::InvalidTargetLevel(level) => CliError {
                code: "INVALID_TARGET_LEVEL".to_string(),
                message: format!("target level must be 2 or 3, got {}", level),
                hint: Some("Pass --next-level 2 or --next-level 3".to_string()),
            },
            CoachCliError::EmptyInput => CliError {
                code: "EMPTY_INPUT".to_string(),
                message: "No session data found in input".to_string(),
                hint: Some("Ensure the input file is not empty".to_string()),
            },
            CoachCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

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
    Error,
}
