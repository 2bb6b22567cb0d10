use clap::Parser;
use fmtags::application::{init::init, ConfigService, PreviewService, TagNoteService};
use fmtags::cli::{format_note_change, format_tag_list, Cli, Commands};
use fmtags::error::FmTagsError;
use fmtags::infrastructure::FileSystemRepository;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Note arguments are relative to the working directory, not the workspace root
fn absolute(note: &Path) -> Result<PathBuf, FmTagsError> {
    Ok(std::env::current_dir()?.join(note))
}

fn run(cli: Cli) -> Result<(), FmTagsError> {
    match cli.command {
        Commands::Init { path } => {
            init(&path)?;
            println!("Initialized fmtags workspace at {}", path.display());
            Ok(())
        }
        Commands::Add { note, tag } => {
            let service = TagNoteService::new(FileSystemRepository::discover()?);
            let change = service.add(&absolute(&note)?, &tag)?;
            println!("{}", format_note_change(&note, change));
            Ok(())
        }
        Commands::Remove { note, tag } => {
            let service = TagNoteService::new(FileSystemRepository::discover()?);
            let change = service.remove(&absolute(&note)?, &tag)?;
            println!("{}", format_note_change(&note, change));
            Ok(())
        }
        Commands::Rename {
            note,
            tag,
            new_name,
        } => {
            let service = TagNoteService::new(FileSystemRepository::discover()?);
            let change = service.rename(&absolute(&note)?, &tag, &new_name)?;
            println!("{}", format_note_change(&note, change));
            Ok(())
        }
        Commands::List { note } => {
            let service = TagNoteService::new(FileSystemRepository::discover()?);
            let paths = service.list(&absolute(&note)?)?;
            let settings = service.settings()?;
            print!("{}", format_tag_list(&paths, &settings.hierarchy_separator));
            if paths.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Preview { note } => {
            let service = PreviewService::new(FileSystemRepository::discover()?);
            print!("{}", service.execute(&absolute(&note)?)?);
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                let config = service.list()?;
                println!(
                    "use_three_dash_closing = {}",
                    config.tags.use_three_dash_closing
                );
                println!("hierarchy_separator = {}", config.tags.hierarchy_separator);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: fmtags config [--list | <key> [<value>]]");
                println!("Valid keys: use_three_dash_closing, hierarchy_separator, created");
                Ok(())
            }
        }
    }
}
