use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "notebook-cells",
    version,
    about = "Navigate comment-delimited code cells and view streamed execution results"
)]
pub struct Cli {
    /// Configuration file (RON). Defaults to ./notebook.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: log::LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List the cells of a file
    Cells {
        file: PathBuf,
        /// Language id; detected from the file extension when omitted
        #[arg(long)]
        language: Option<String>,
    },
    /// Print the line the caret moves to when going to the next cell
    Next(MoveArgs),
    /// Print the line the caret moves to when going to the previous cell
    Previous(MoveArgs),
    /// Connect to a result server and render streamed results
    View {
        /// Server address, host:port
        addr: String,
        /// Start in append mode instead of replacing on every batch
        #[arg(long)]
        append: bool,
    },
}

#[derive(Debug, clap::Args, Clone)]
pub struct MoveArgs {
    pub file: PathBuf,
    /// 1-based cursor line
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub line: u64,
    #[arg(long)]
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_arguments() {
        let cli = Cli::parse_from(["notebook-cells", "next", "a.py", "--line", "3"]);
        match cli.command {
            Command::Next(args) => {
                assert_eq!(args.file, PathBuf::from("a.py"));
                assert_eq!(args.line, 3);
                assert_eq!(args.language, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn rejects_line_zero() {
        assert!(Cli::try_parse_from(["notebook-cells", "previous", "a.py", "--line", "0"]).is_err());
    }

    #[test]
    fn view_takes_global_config() {
        let cli = Cli::parse_from([
            "notebook-cells",
            "view",
            "127.0.0.1:9000",
            "--append",
            "--config",
            "custom.ron",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.ron")));
        assert!(matches!(cli.command, Command::View { append: true, .. }));
    }
}
