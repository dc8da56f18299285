//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagshelf")]
#[command(about = "Tag files with names and values", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new tag database
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Apply tags to files
    Tag {
        /// Tags to apply to every file, e.g. "holiday year=2015"
        #[arg(short, long, value_name = "TAGS")]
        tags: Option<String>,

        /// Also tag the contents of directories
        #[arg(short, long)]
        recursive: bool,

        /// FILE TAG[=VALUE]..., or FILE... when --tags is given
        #[arg(value_name = "ARGS", required = true)]
        args: Vec<String>,
    },

    /// Remove tags from files
    Untag {
        /// Remove every tag from the files
        #[arg(short, long, conflicts_with = "tags")]
        all: bool,

        /// Tags to remove from every file, e.g. "holiday year=2015"
        #[arg(short, long, value_name = "TAGS")]
        tags: Option<String>,

        /// Also untag the contents of directories
        #[arg(short, long)]
        recursive: bool,

        /// FILE TAG[=VALUE]..., or FILE... with --all or --tags
        #[arg(value_name = "ARGS", required = true)]
        args: Vec<String>,
    },

    /// Make one tag imply others
    Imply {
        /// Implying tag, as TAG or TAG=VALUE
        tag: String,

        /// Implied tags, as TAG or TAG=VALUE
        #[arg(required = true)]
        implied: Vec<String>,
    },

    /// List every value
    Values,

    /// Delete values along with their taggings
    DeleteValue {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Show database statistics
    Stats {
        /// Include per-tag file counts
        #[arg(short, long)]
        usage: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positional_untag() {
        let cli = Cli::try_parse_from(["tagshelf", "-v", "untag", "a.jpg", "colour=red"]).unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Untag {
                all, tags, args, ..
            } => {
                assert!(!all);
                assert!(tags.is_none());
                assert_eq!(args, vec!["a.jpg", "colour=red"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn all_conflicts_with_tags() {
        let result = Cli::try_parse_from(["tagshelf", "untag", "--all", "--tags", "x", "a.jpg"]);
        assert!(result.is_err());
    }
}
