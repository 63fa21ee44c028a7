//! Command-line front end for the cat record catalog.
//!
//! # Responsibility
//! - Expose every `CatService` operation as a subcommand.
//! - Print records as JSON on stdout and map error kinds to exit codes.

use catrecord_core::{
    Cat, CatService, CatServiceError, CoreConfig, ErrorKind, SqliteCatRepository,
};
use clap::{Parser, Subcommand};
use log::error;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "catrecord", version = catrecord_core::core_version(), about = "Manage cat records")]
struct Cli {
    /// SQLite database file (overrides CATRECORD_DB_PATH; in-memory when unset).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every cat.
    List,
    /// Case-insensitive substring search by name.
    FindName { name: String },
    /// Exact search by age.
    FindAge {
        #[arg(allow_negative_numbers = true)]
        age: i32,
    },
    /// Create a cat.
    Add {
        name: String,
        #[arg(allow_negative_numbers = true)]
        age: i32,
    },
    /// Create a cat with its name uppercased.
    AddUpper {
        name: String,
        #[arg(allow_negative_numbers = true)]
        age: i32,
    },
    /// Delete every cat with exactly this name.
    Delete { name: String },
    /// Rename every cat named exactly OLD.
    Rename { old: String, new: String },
    /// Show one cat.
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Re-save one cat unchanged.
    Refresh { id: i64 },
    /// Lowercase cats named exactly NAME uppercased.
    Lowercase { name: String },
    /// Write a one-page PDF summary of a cat.
    ExportPdf {
        id: i64,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };
    if cli.db.is_some() {
        config.db_path = cli.db.clone();
    }
    if let Err(err) = config.init_logging() {
        eprintln!("{err}");
        return ExitCode::from(2);
    }

    let conn = match config.open_db() {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=cli_run module=cli status=error error_code=db_open_failed error={err}");
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };
    let service = CatService::new(SqliteCatRepository::new(&conn));

    match run(&service, cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(
                "event=cli_run module=cli status=error status_code={} error={}",
                err.status_code(),
                err
            );
            eprintln!("{err}");
            ExitCode::from(exit_code(err.kind()))
        }
    }
}

fn run(
    service: &CatService<SqliteCatRepository<'_>>,
    command: Command,
) -> Result<serde_json::Value, CatServiceError> {
    let value = match command {
        Command::List => json!(service.list_all()?),
        Command::FindName { name } => json!(service.find_by_name(&name)?),
        Command::FindAge { age } => json!(service.find_by_age(age)?),
        Command::Add { name, age } => json!(service.create(Cat::new(name, age))?),
        Command::AddUpper { name, age } => json!(service.create_with_uppercased_name(&name, age)?),
        Command::Delete { name } => json!(service.delete_by_name(&name)?),
        Command::Rename { old, new } => json!(service.rename_all(&old, &new)?),
        Command::Get { id } => json!(service.get_by_id(id)?),
        Command::Refresh { id } => json!(service.refresh(id)?),
        Command::Lowercase { name } => {
            json!(service.lowercase_all_matching_uppercased_name(&name)?)
        }
        Command::ExportPdf { id, output } => {
            let bytes = service.export_pdf(id)?;
            std::fs::write(&output, &bytes).map_err(|err| {
                CatServiceError::Render(catrecord_core::RenderError::Io(err))
            })?;
            json!({
                "path": output.display().to_string(),
                "media_type": catrecord_core::PDF_MEDIA_TYPE,
                "bytes": bytes.len(),
            })
        }
    };
    Ok(value)
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::NotFound => 3,
        ErrorKind::InvalidArgument => 4,
        ErrorKind::Fatal => 1,
    }
}
