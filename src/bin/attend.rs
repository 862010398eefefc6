//! attend - Command-line interface for the attendance normalizer
//!
//! Commands:
//! - fetch: Query the attendance service for a student and print the record
//! - normalize: Normalize a saved response body offline
//! - config: Print the effective configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use attendance_normalizer::report::{render, ReportFormat, ReportOptions};
use attendance_normalizer::{
    fetch_attendance, AppConfig, AttendanceError, AttendanceRecord, Normalizer, NORMALIZER_VERSION,
};

/// attend - Look up a student's attendance record
#[derive(Parser)]
#[command(name = "attend")]
#[command(version = NORMALIZER_VERSION)]
#[command(about = "Fetch and normalize student attendance records", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the attendance service for one student
    Fetch {
        /// Student name as registered with the service
        #[arg(short, long)]
        name: String,

        /// Attendance service endpoint (overrides config and ATTENDANCE_ENDPOINT)
        #[arg(long)]
        endpoint: Option<String>,

        /// Request timeout in seconds (0 disables the timeout)
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only show courses whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Normalize a saved attendance-service response body
    Normalize {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only show courses whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Stats block and course table
    Text,
    /// Canonical record as compact JSON
    Json,
    /// Canonical record as pretty-printed JSON
    JsonPretty,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::JsonPretty => ReportFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

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

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: Cli) -> Result<(), AttendCliError> {
    match cli.command {
        Commands::Fetch {
            name,
            endpoint,
            timeout_secs,
            config,
            filter,
            format,
        } => {
            let mut app_config = load_config(config.as_deref())?;
            if let Some(endpoint) = endpoint {
                app_config.client.endpoint = Some(endpoint);
            }
            if let Some(timeout_secs) = timeout_secs {
                app_config.client.timeout_secs = timeout_secs;
            }

            let record = fetch_attendance(&app_config, &name)?;
            print_record(&record, &app_config, filter, format)
        }

        Commands::Normalize {
            input,
            config,
            filter,
            format,
        } => {
            let app_config = load_config(config.as_deref())?;
            let body = read_input(&input)?;
            let record = Normalizer::new(app_config.normalizer.clone()).normalize_json(&body)?;
            print_record(&record, &app_config, filter, format)
        }

        Commands::Config { config } => {
            let app_config = load_config(config.as_deref())?;
            println!("{}", app_config.to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, AttendCliError> {
    Ok(AppConfig::load(path)?.with_env_overrides()?)
}

fn read_input(input: &Path) -> Result<String, AttendCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(AttendCliError::InteractiveStdin);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn print_record(
    record: &AttendanceRecord,
    config: &AppConfig,
    filter: Option<String>,
    format: OutputFormat,
) -> Result<(), AttendCliError> {
    let options = ReportOptions {
        filter,
        minimum_attendance: config.normalizer.minimum_attendance,
    };
    let output = render(record, format.into(), &options)?;
    println!("{}", output.trim_end());
    Ok(())
}

// Error types

#[derive(Debug)]
enum AttendCliError {
    Attendance(AttendanceError),
    Io(io::Error),
    InteractiveStdin,
}

impl From<AttendanceError> for AttendCliError {
    fn from(e: AttendanceError) -> Self {
        AttendCliError::Attendance(e)
    }
}

impl From<io::Error> for AttendCliError {
    fn from(e: io::Error) -> Self {
        AttendCliError::Io(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<AttendCliError> for CliError {
    fn from(e: AttendCliError) -> Self {
        match e {
            AttendCliError::Attendance(e) => {
                let message = e.to_string();
                let (code, hint) = match e {
                    AttendanceError::EmptyStudentName => {
                        ("EMPTY_STUDENT_NAME", "Please enter your name with --name")
                    }
                    AttendanceError::Transport(_) => (
                        "CONNECTION_ERROR",
                        "Cannot connect to the attendance service; check the endpoint URL and network",
                    ),
                    AttendanceError::Status { .. } => (
                        "SERVER_ERROR",
                        "The attendance service rejected the request; see the response body",
                    ),
                    AttendanceError::JsonError(_) => {
                        ("JSON_ERROR", "The response body is not valid JSON")
                    }
                    AttendanceError::Config(_) => (
                        "CONFIG_ERROR",
                        "Run 'attend config' to inspect the effective configuration",
                    ),
                    AttendanceError::Io(_) => ("IO_ERROR", "Check file paths and permissions"),
                };
                CliError {
                    code: code.to_string(),
                    message,
                    hint: Some(hint.to_string()),
                }
            }
            AttendCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            AttendCliError::InteractiveStdin => CliError {
                code: "NO_INPUT".to_string(),
                message: "Refusing to read a response body from an interactive terminal".to_string(),
                hint: Some("Pipe a saved response or pass --input <FILE>".to_string()),
            },
        }
    }
}
