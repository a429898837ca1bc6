//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Browse the history of one git branch in the terminal.
#[derive(Debug, Parser)]
#[command(name = "gitp", version)]
pub struct Cli {
    /// Local branch whose history to browse, e.g. `main`.
    #[arg(value_parser = non_empty)]
    pub branch: String,

    /// Repository to open: a working-tree root or a git directory.
    #[arg(short = 'C', long = "repo", value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,

    /// TOML file with theme and width settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn non_empty(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("branch name must not be empty".to_owned())
    } else {
        Ok(raw.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn branch_is_required() {
        let err = Cli::try_parse_from(["gitp"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn empty_branch_is_rejected() {
        let err = Cli::try_parse_from(["gitp", ""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["gitp", "main"]).unwrap();
        assert_eq!(cli.branch, "main");
        assert_eq!(cli.repo, PathBuf::from("."));
        assert!(cli.config.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn accepts_repo_and_files() {
        let cli = Cli::try_parse_from([
            "gitp", "-C", "/src/project", "--config", "gitp.toml", "--log-file", "gitp.log",
            "feature/x",
        ])
        .unwrap();
        assert_eq!(cli.branch, "feature/x");
        assert_eq!(cli.repo, PathBuf::from("/src/project"));
        assert_eq!(cli.config, Some(PathBuf::from("gitp.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("gitp.log")));
    }
}
