//! sheet-import command line
//!
//! Usage:
//!   sheet-import normalize catalog.xlsx --pretty
//!   sheet-import header "  Style  Name "
//!   sheet-import serve --port 3001

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use sheet_import::domain::import::{CANONICAL_COLUMNS, REGION_PREFIXES};
use sheet_import::infrastructure::config::ImportOverrides;
use sheet_import::interfaces::http::new_log_buffer;
use sheet_import::{init_tracing, load_config, normalize_header, serve, SheetImportUseCase};

#[derive(Parser, Debug)]
#[command(about = "Normalize spreadsheet rows into canonical product columns")]
struct Cli {
    /// TOML config file (defaults to ./sheet-import.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a CSV or workbook and print the report as JSON
    Normalize {
        file: PathBuf,

        /// CSV delimiter; detected when omitted
        #[arg(long)]
        delimiter: Option<char>,

        /// Worksheet index for workbooks
        #[arg(long)]
        sheet: Option<usize>,

        /// Keep surrounding whitespace in CSV values
        #[arg(long)]
        no_trim: bool,

        #[arg(long)]
        pretty: bool,
    },

    /// Print the canonical key for a column name
    Header { name: String },

    /// Print the canonical columns and region prefixes
    Vocabulary,

    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Normalize {
            file,
            delimiter,
            sheet,
            no_trim,
            pretty,
        } => {
            config
                .apply_import_overrides(ImportOverrides {
                    delimiter,
                    sheet_index: sheet,
                    no_trim,
                })
                .context("invalid command line options")?;
            init_tracing(&config.log_filter);

            let use_case = SheetImportUseCase::new(config.import, new_log_buffer());
            let report = use_case
                .import_file(file.clone())
                .await
                .with_context(|| format!("importing {}", file.display()))?;

            let out = if pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .context("serializing import report")?;

            #[allow(clippy::print_stdout)]
            {
                println!("{}", out);
            }
        }
        Command::Header { name } => {
            #[allow(clippy::print_stdout)]
            {
                println!("{}", normalize_header(&name));
            }
        }
        Command::Vocabulary => {
            let out = serde_json::to_string_pretty(&json!({
                "canonicalColumns": CANONICAL_COLUMNS,
                "regionPrefixes": REGION_PREFIXES,
            }))
            .context("serializing vocabulary")?;

            #[allow(clippy::print_stdout)]
            {
                println!("{}", out);
            }
        }
        Command::Serve { host, port } => {
            config
                .apply_server_overrides(host, port)
                .context("invalid command line options")?;
            init_tracing(&config.log_filter);

            serve(config).await.context("running HTTP server")?;
        }
    }

    Ok(())
}
