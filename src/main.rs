use clap::Parser;
use std::io::IsTerminal;
use std::path::{Component, PathBuf};
use tagshelf::application::imply::imply;
use tagshelf::application::init::init;
use tagshelf::application::tag::tag;
use tagshelf::application::untag::untag;
use tagshelf::application::values::{delete_values_named, list_values};
use tagshelf::application::{collect_stats, ConfigService, TagRequest, UntagRequest, UntagTarget};
use tagshelf::cli::{format_stats, format_value_list, Cli, Commands};
use tagshelf::domain::TagSpecifier;
use tagshelf::error::TagshelfError;
use tagshelf::infrastructure::{Repository, ShelfRepository};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            if !e.is_silent() {
                eprintln!("Error: {}", e.display_with_suggestions());
            }
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr. `-v` flags win over RUST_LOG; warnings are shown by default.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}

/// Files are stored by absolute, lexically normalized path.
fn absolute_path(arg: &str) -> Result<PathBuf, TagshelfError> {
    let path = std::path::absolute(arg)?;

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

fn absolute_paths(args: &[String]) -> Result<Vec<PathBuf>, TagshelfError> {
    args.iter().map(|arg| absolute_path(arg)).collect()
}

/// Split `FILE TAG[=VALUE]...`, or take every argument as a file when the
/// tags came from `--tags`.
fn split_args(
    tags: Option<&str>,
    args: &[String],
) -> Result<(Vec<PathBuf>, Vec<TagSpecifier>), TagshelfError> {
    match tags {
        Some(tags) => Ok((absolute_paths(args)?, TagSpecifier::parse_list(tags))),
        None => match args.split_first() {
            Some((file, specifiers)) => Ok((
                vec![absolute_path(file)?],
                specifiers.iter().map(|s| TagSpecifier::parse(s)).collect(),
            )),
            None => Ok((Vec::new(), Vec::new())),
        },
    }
}

fn run(cli: Cli) -> Result<(), TagshelfError> {
    match cli.command {
        Commands::Init { path } => {
            let repo = init(&path)?;
            println!(
                "Initialized tagshelf database in {}",
                repo.database_path().display()
            );
            Ok(())
        }
        Commands::Tag {
            tags,
            recursive,
            args,
        } => {
            let repo = Repository::discover()?;
            let config = repo.load_config()?;
            let mut database = repo.open_database()?;

            let (paths, specifiers) = split_args(tags.as_deref(), &args)?;
            let request = TagRequest {
                paths,
                specifiers,
                recursive,
            };
            let report = tag(&mut database, &config, &request)?;

            if report.had_errors() {
                return Err(TagshelfError::ItemsFailed);
            }
            Ok(())
        }
        Commands::Untag {
            all,
            tags,
            recursive,
            args,
        } => {
            let repo = Repository::discover()?;
            let mut database = repo.open_database()?;

            let request = if all {
                UntagRequest {
                    paths: absolute_paths(&args)?,
                    target: UntagTarget::All,
                    recursive,
                }
            } else {
                let (paths, specifiers) = split_args(tags.as_deref(), &args)?;
                UntagRequest {
                    paths,
                    target: UntagTarget::Tags(specifiers),
                    recursive,
                }
            };
            let report = untag(&mut database, &request)?;

            if report.had_errors() {
                return Err(TagshelfError::ItemsFailed);
            }
            Ok(())
        }
        Commands::Imply { tag, implied } => {
            let repo = Repository::discover()?;
            let config = repo.load_config()?;
            let mut database = repo.open_database()?;

            let implying = TagSpecifier::parse(&tag);
            let implied: Vec<TagSpecifier> =
                implied.iter().map(|s| TagSpecifier::parse(s)).collect();
            imply(&mut database, &config, &implying, &implied)?;
            Ok(())
        }
        Commands::Values => {
            let repo = Repository::discover()?;
            let mut database = repo.open_database()?;
            let tx = database.begin()?;

            let output = format_value_list(&list_values(&tx)?);
            println!("{}", output.trim_end());
            Ok(())
        }
        Commands::DeleteValue { names } => {
            let repo = Repository::discover()?;
            let mut database = repo.open_database()?;
            let tx = database.begin()?;

            let report = delete_values_named(&tx, &names)?;
            tx.commit()?;

            if report.had_errors() {
                return Err(TagshelfError::ItemsFailed);
            }
            Ok(())
        }
        Commands::Stats { usage } => {
            let repo = Repository::discover()?;
            let mut database = repo.open_database()?;
            let tx = database.begin()?;

            let stats = collect_stats(&tx, usage)?;
            print!("{}", format_stats(&stats, &repo.database_path()));
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = Repository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("auto_create_tags = {}", config.auto_create_tags);
                println!("auto_create_values = {}", config.auto_create_values);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    println!("{}", service.get(&k)?);
                    Ok(())
                }
            } else {
                println!("Usage: tagshelf config [--list | <key> [<value>]]");
                println!("Valid keys: auto_create_tags, auto_create_values, created");
                Ok(())
            }
        }
    }
}
