mod cmd_append;
mod cmd_copy;
mod cmd_paste;
mod cmd_undo;
mod display;
mod prompt;
mod runtime;
#[cfg(feature = "tui")]
mod tui;

use clap::{Parser, Subcommand};
use pacte_core::{exit_code, FileError, HistoryError, PacteError};
use pacte_store::Encoding;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `PACTE_LOG=debug`).
const LOG_ENV: &str = "PACTE_LOG";

#[derive(Parser)]
#[command(
    name = "pacte",
    version,
    about = "Paste, append and copy between the clipboard and files, with undo"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Paste clipboard content into a file (creating it and its directories)
    Paste {
        /// Target file path
        file: PathBuf,
        /// Skip backup creation
        #[arg(long)]
        no_backup: bool,
        /// Overwrite without confirmation
        #[arg(short, long)]
        force: bool,
        /// Fail if the file doesn't exist instead of creating it
        #[arg(long)]
        no_create: bool,
    },
    /// Append clipboard content to a file
    Append {
        /// Target file path
        file: PathBuf,
        /// Don't put a newline between existing content and the clipboard text
        #[arg(long)]
        no_newline: bool,
        /// Skip backup creation
        #[arg(long)]
        no_backup: bool,
    },
    /// Copy file content to the clipboard
    Copy {
        /// Source file path
        file: PathBuf,
        /// Copy files that look binary without asking
        #[arg(short, long)]
        force: bool,
        /// File encoding label (defaults to `default_encoding` from config)
        #[arg(short, long, value_parser = parse_encoding)]
        encoding: Option<&'static Encoding>,
    },
    /// Undo a paste or append
    Undo {
        /// Undo the most recent operation without prompting
        #[arg(long)]
        last: bool,
        /// List recorded operations instead of undoing
        #[arg(long, conflicts_with = "last")]
        list: bool,
    },
}

/// How a command finished when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    Cancelled,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(Status::Done) => ExitCode::from(exit_code::SUCCESS),
        Ok(Status::Cancelled) => {
            eprintln!("Operation cancelled");
            ExitCode::from(exit_code::CANCELLED)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Status> {
    let cwd = std::env::current_dir()?;

    match cli.cmd {
        Command::Paste {
            file,
            no_backup,
            force,
            no_create,
        } => cmd_paste::execute(
            &cwd,
            &file,
            pacte_ops::PasteOptions {
                no_backup,
                force,
                no_create,
            },
        ),
        Command::Append {
            file,
            no_newline,
            no_backup,
        } => cmd_append::execute(
            &cwd,
            &file,
            pacte_ops::AppendOptions {
                no_newline,
                no_backup,
            },
        ),
        Command::Copy {
            file,
            force,
            encoding,
        } => cmd_copy::execute(&cwd, &file, pacte_ops::CopyOptions { force, encoding }),
        Command::Undo { last, list } => cmd_undo::execute(&cwd, last, list),
    }
}

fn parse_encoding(label: &str) -> Result<&'static Encoding, String> {
    pacte_store::encoding::for_label(label).ok_or_else(|| format!("unknown encoding: {label}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit code for a failed command: the category of the first pacte error
/// in the chain, else generic.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<PacteError>() {
            return e.exit_code();
        }
        if cause.is::<FileError>() {
            return exit_code::FILE;
        }
        if cause.is::<HistoryError>() {
            return exit_code::HISTORY;
        }
    }
    exit_code::GENERIC
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
    fn undo_last_and_list_conflict() {
        assert!(Cli::try_parse_from(["pacte", "undo", "--last", "--list"]).is_err());
        assert!(Cli::try_parse_from(["pacte", "undo", "--list"]).is_ok());
    }

    #[test]
    fn paste_flags_parse() {
        let cli = Cli::try_parse_from(["pacte", "paste", "out.txt", "-f", "--no-backup"]).unwrap();
        let Command::Paste {
            file,
            force,
            no_backup,
            no_create,
        } = cli.cmd
        else {
            panic!("expected paste");
        };
        assert_eq!(file, PathBuf::from("out.txt"));
        assert!(force && no_backup && !no_create);
    }

    #[test]
    fn copy_encoding_is_resolved_at_parse_time() {
        let cli = Cli::try_parse_from(["pacte", "copy", "a.txt", "--encoding", "sjis"]).unwrap();
        let Command::Copy { encoding, .. } = cli.cmd else {
            panic!("expected copy");
        };
        assert_eq!(encoding.map(|e| e.name()), Some("Shift_JIS"));

        let cli = Cli::try_parse_from(["pacte", "copy", "a.txt"]).unwrap();
        assert!(matches!(cli.cmd, Command::Copy { encoding: None, .. }));

        assert!(Cli::try_parse_from(["pacte", "copy", "a.txt", "-e", "nope"]).is_err());
    }

    #[test]
    fn exit_codes_follow_error_category() {
        let clip = anyhow::Error::new(PacteError::EmptyClipboard);
        assert_eq!(exit_code_for(&clip), exit_code::CLIPBOARD);

        let file = anyhow::Error::new(FileError::NotFound {
            path: PathBuf::from("x"),
        });
        assert_eq!(exit_code_for(&file), exit_code::FILE);

        let wrapped = anyhow::Error::new(PacteError::from(HistoryError::NotFound {
            id: "op_x".into(),
        }));
        assert_eq!(exit_code_for(&wrapped), exit_code::HISTORY);

        let config = anyhow::Error::new(PacteError::Config("bad".into()));
        assert_eq!(exit_code_for(&config), exit_code::GENERIC);

        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), exit_code::GENERIC);

        for err in [clip, file, wrapped, config] {
            assert_ne!(exit_code_for(&err), exit_code::SUCCESS);
        }
    }
}
