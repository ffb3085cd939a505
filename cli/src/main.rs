//! fsx - file system extras
//!
//! Copy a file with a progress bar, show volume labels, set file times and
//! compare file names, powered by fsext.

use chrono::DateTime;
use clap::{Args, Parser, Subcommand};
use fsext::{
    CopyBuilder, CopyOutcome, DEFAULT_CHUNK_SIZE, Decision, Error as FsextError, ErrorKind,
    FileTimestamps, compare_names, create_progress_bar, has_system_attribute, progress_bar_callback,
    set_file_times, volume_label,
};
use indicatif::ProgressBar;
use serde_json::{Value, json};
use std::cmp::Ordering as NameOrder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// fsx - file system extras
///
/// Usage:
///   fsx cp SOURCE DEST
///   fsx label PATH
///   fsx touch PATH --modified 2024-01-01T00:00:00Z
///   fsx sysattr PATH
///   fsx cmp NAME NAME
#[derive(Parser, Debug)]
#[command(name = "fsx", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print one JSON object on stdout instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy a single file, into DEST if it is a directory
    Cp(CpArgs),

    /// Print the label of the volume holding PATH
    Label {
        /// Any path, existing or not
        path: PathBuf,
    },

    /// Set creation, modification and access times of an existing file
    Touch(TouchArgs),

    /// Print whether PATH has the system attribute (always false outside Windows)
    Sysattr {
        /// Any path, existing or not
        path: PathBuf,
    },

    /// Compare two file names in platform order and print -1, 0 or 1
    Cmp {
        /// First name
        a: String,
        /// Second name
        b: String,
    },
}

#[derive(Args, Debug)]
struct CpArgs {
    /// Source file
    source: PathBuf,

    /// Destination file or directory
    dest: PathBuf,

    /// Bytes copied between progress updates
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    chunk_size: u64,

    /// Disable progress bar
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Do not call fsync on the destination (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Do not preserve file permissions
    #[arg(long)]
    no_perms: bool,

    /// Do not preserve file timestamps
    #[arg(long)]
    no_times: bool,

    /// Do not try to copy owner and group
    ///
    /// This option only has an effect on Unix.
    #[arg(long)]
    no_owner: bool,
}

#[derive(Args, Debug)]
struct TouchArgs {
    /// File to update
    path: PathBuf,

    /// Creation time, RFC 3339 or Unix seconds (ignored outside Windows)
    #[arg(long, value_name = "TIME", value_parser = parse_time, allow_hyphen_values = true)]
    created: Option<SystemTime>,

    /// Modification time, RFC 3339 or Unix seconds
    #[arg(long, value_name = "TIME", value_parser = parse_time, allow_hyphen_values = true)]
    modified: Option<SystemTime>,

    /// Access time, RFC 3339 or Unix seconds
    #[arg(long, value_name = "TIME", value_parser = parse_time, allow_hyphen_values = true)]
    accessed: Option<SystemTime>,
}

type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Fsext(#[from] FsextError),

    #[error("cancelled")]
    Cancelled,

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::Fsext(error) => match error.kind() {
                ErrorKind::NotFound => "source_not_found",
                ErrorKind::InvalidArgument => "invalid_argument",
                ErrorKind::IdentityConflict => "same_file",
                ErrorKind::Io => "io_error",
            },
            Self::Cancelled => "cancelled",
            Self::JsonSerialize { .. } => "internal",
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Self::Fsext(error) => match error.kind() {
                ErrorKind::NotFound => 3,
                ErrorKind::InvalidArgument => 2,
                ErrorKind::IdentityConflict => 4,
                ErrorKind::Io => 1,
            },
            Self::Cancelled => 130,
            Self::JsonSerialize { .. } => 1,
        }
    }

    fn to_json_value(&self) -> Value {
        json!({
            "schema_version": "1.0",
            "status": if matches!(self, Self::Cancelled) { "cancelled" } else { "error" },
            "error_code": self.code(),
            "message": self.to_string(),
        })
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(&cli) {
        if cli.json {
            // Best effort: the error itself is what matters
            let _ = print_json_value(&error.to_json_value());
        }
        match error {
            CliError::Cancelled => eprintln!("cancelled"),
            _ => eprintln!("error[{}]: {}", error.code(), error),
        }
        std::process::exit(error.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> CliResult<()> {
    tracing::debug!(command = ?cli.command, "starting");
    match &cli.command {
        Command::Cp(args) => run_copy(args, cli.json),
        Command::Label { path } => run_label(path, cli.json),
        Command::Touch(args) => run_touch(args, cli.json),
        Command::Sysattr { path } => run_sysattr(path, cli.json),
        Command::Cmp { a, b } => run_cmp(a, b, cli.json),
    }
}

fn run_copy(args: &CpArgs, json_output: bool) -> CliResult<()> {
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel_clone = cancel.clone();
        ctrlc::set_handler(move || {
            if cancel_clone.load(Ordering::Relaxed) {
                eprintln!("\nForce quit.");
                std::process::exit(130);
            }
            cancel_clone.store(true, Ordering::Relaxed);
            eprintln!("\nCancelling... Press Ctrl+C again to abort immediately.");
        })
        .ok();
    }

    let source_size = args.source.metadata().map(|meta| meta.len()).unwrap_or(0);
    let pb = (!args.quiet && !json_output).then(|| create_progress_bar(source_size));

    let mut builder = CopyBuilder::new(&args.source, &args.dest)
        .chunk_size(args.chunk_size)
        .on_progress(cancellable_progress(&cancel, pb.as_ref()));
    if args.no_sync {
        builder = builder.no_fsync();
    }
    if args.no_perms {
        builder = builder.no_permissions();
    }
    if args.no_times {
        builder = builder.no_timestamps();
    }
    if args.no_owner {
        builder = builder.no_ownership();
    }

    let outcome = builder.run();

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    match outcome? {
        CopyOutcome::Copied(destination) => {
            if json_output {
                print_json_value(&json!({
                    "schema_version": "1.0",
                    "command": "cp",
                    "status": "copied",
                    "source": display_path(&args.source),
                    "destination": display_path(&destination),
                    "bytes": source_size,
                }))
            } else {
                println!("{}", destination.display());
                Ok(())
            }
        }
        CopyOutcome::Cancelled => Err(CliError::Cancelled),
    }
}

/// Progress callback that draws `pb` and cancels once `cancel` is set.
fn cancellable_progress<'a>(
    cancel: &'a AtomicBool,
    pb: Option<&'a ProgressBar>,
) -> impl FnMut(u64, u64) -> Decision + 'a {
    let mut draw = pb.map(progress_bar_callback);
    move |copied, total| {
        if let Some(draw) = draw.as_mut() {
            draw(copied, total);
        }
        if cancel.load(Ordering::Relaxed) {
            Decision::Cancel
        } else {
            Decision::Continue
        }
    }
}

fn run_label(path: &Path, json_output: bool) -> CliResult<()> {
    let label = volume_label(path);
    if json_output {
        print_json_value(&json!({
            "schema_version": "1.0",
            "command": "label",
            "path": display_path(path),
            "label": label.as_str(),
            "known": label.is_known(),
        }))
    } else {
        println!("{label}");
        Ok(())
    }
}

fn run_touch(args: &TouchArgs, json_output: bool) -> CliResult<()> {
    let mut times = FileTimestamps::new();
    let mut applied = Vec::new();
    if let Some(created) = args.created {
        times = times.with_created(created);
        applied.push("created");
    }
    if let Some(modified) = args.modified {
        times = times.with_modified(modified);
        applied.push("modified");
    }
    if let Some(accessed) = args.accessed {
        times = times.with_accessed(accessed);
        applied.push("accessed");
    }

    set_file_times(&args.path, &times)?;

    if json_output {
        print_json_value(&json!({
            "schema_version": "1.0",
            "command": "touch",
            "path": display_path(&args.path),
            "applied": applied,
        }))?;
    }
    Ok(())
}

fn run_sysattr(path: &Path, json_output: bool) -> CliResult<()> {
    let system = has_system_attribute(path);
    if json_output {
        print_json_value(&json!({
            "schema_version": "1.0",
            "command": "sysattr",
            "path": display_path(path),
            "system": system,
        }))
    } else {
        println!("{system}");
        Ok(())
    }
}

fn run_cmp(a: &str, b: &str, json_output: bool) -> CliResult<()> {
    let order = match compare_names(a, b) {
        NameOrder::Less => -1,
        NameOrder::Equal => 0,
        NameOrder::Greater => 1,
    };
    if json_output {
        print_json_value(&json!({
            "schema_version": "1.0",
            "command": "cmp",
            "a": a,
            "b": b,
            "order": order,
        }))
    } else {
        println!("{order}");
        Ok(())
    }
}

/// Parse an RFC 3339 date or a (possibly negative) count of Unix seconds.
fn parse_time(value: &str) -> Result<SystemTime, String> {
    if let Ok(secs) = value.parse::<i64>() {
        let offset = Duration::from_secs(secs.unsigned_abs());
        let time = if secs >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        };
        return time.ok_or_else(|| format!("timestamp out of range: {value}"));
    }
    DateTime::parse_from_rfc3339(value)
        .map(SystemTime::from)
        .map_err(|e| format!("expected RFC 3339 or Unix seconds: {e}"))
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
