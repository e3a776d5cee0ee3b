use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Crop transparent borders from sprite images
#[derive(Parser, Debug)]
#[command(name = "spritecrop", version, about, long_about = None)]
pub struct Args {
    /// Path to sprite file or directory
    #[arg(default_value = "assets")]
    pub path: PathBuf,

    /// Don't create `_original` backup files
    #[arg(long)]
    pub no_backup: bool,

    /// Output directory for cropped sprites
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report what would be cropped without changing any files
    #[arg(long, visible_alias = "preview")]
    pub dry_run: bool,

    /// Analyze transparent borders of each file in detail
    #[arg(long, conflicts_with = "dry_run")]
    pub inspect: bool,

    /// Alpha values at or below this are treated as empty [default: 10]
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub alpha_threshold: Option<i32>,

    /// TOML file with default settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// What a run does with each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Crop,
    DryRun,
    Inspect,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.inspect {
            Mode::Inspect
        } else if self.dry_run {
            Mode::DryRun
        } else {
            Mode::Crop
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["spritecrop"]).unwrap();

        assert_eq!(args.path, PathBuf::from("assets"));
        assert!(!args.no_backup);
        assert_eq!(args.output_dir, None);
        assert_eq!(args.alpha_threshold, None);
        assert_eq!(args.mode(), Mode::Crop);
        assert_eq!(args.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "spritecrop",
            "sprites/hero.png",
            "--no-backup",
            "-o",
            "out",
            "--alpha-threshold",
            "0",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.path, PathBuf::from("sprites/hero.png"));
        assert!(args.no_backup);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.alpha_threshold, Some(0));
        assert_eq!(args.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_preview_alias() {
        let args = Args::try_parse_from(["spritecrop", "--preview"]).unwrap();
        assert_eq!(args.mode(), Mode::DryRun);
    }

    #[test]
    fn test_negative_threshold() {
        let args = Args::try_parse_from(["spritecrop", "-a", "-5"]).unwrap();
        assert_eq!(args.alpha_threshold, Some(-5));
    }

    #[test]
    fn test_inspect_conflicts_with_dry_run() {
        assert!(Args::try_parse_from(["spritecrop", "--inspect", "--dry-run"]).is_err());
        let args = Args::try_parse_from(["spritecrop", "--inspect"]).unwrap();
        assert_eq!(args.mode(), Mode::Inspect);
    }

    #[test]
    fn test_quiet() {
        let args = Args::try_parse_from(["spritecrop", "-q"]).unwrap();
        assert_eq!(args.log_level(), log::LevelFilter::Error);
        assert!(Args::try_parse_from(["spritecrop", "-q", "-v"]).is_err());
    }
}
