use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::info;

use crate::loader;
use crate::search;
use crate::server::{self, AppState};

mod args;
mod config;
mod format;
mod http_backend;

pub use args::{Cli, Commands, FieldsArgs, OutputFormat, SearchArgs, ServeArgs};

use config::{
    apply_fields_config_defaults, apply_search_config_defaults, apply_serve_config_defaults,
    load_cli_config,
};
use http_backend::HttpSearchBackend;

/// Entry point for the CLI binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = load_cli_config()?.unwrap_or_default();

    match cli.command {
        Some(Commands::Serve(mut serve_args)) => {
            apply_serve_config_defaults(&cli_config, &mut serve_args);

            let addr = args::serve_addr_from_args(&serve_args)?;
            let data_path = args::data_path(serve_args.data.as_ref());

            // The snapshot is fully built before the listener exists.
            let records = loader::load_file(&data_path)?;
            let state = AppState::new(
                records,
                cli_config.field_names(),
                cli_config.display_fields(),
            );

            info!("starting natlas HTTP server on http://{addr}");

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            runtime.block_on(server::run(addr, state))?;
            Ok(())
        }
        Some(Commands::Search(mut search_args)) => {
            apply_search_config_defaults(&cli_config, &mut search_args);

            let fields = cli_config.field_names();
            let remote;
            let local;
            let results = if let Some(server_url) =
                effective_server_url(search_args.server.as_deref(), search_args.no_server)
            {
                let backend = HttpSearchBackend::new(server_url)?;
                remote = backend.search(&search_args.query)?;
                remote.iter().collect::<Vec<_>>()
            } else {
                local = loader::load_file(&args::data_path(search_args.data.as_ref()))?;
                search::search(&search_args.query, &local, &fields)
            };

            match search_args.format {
                OutputFormat::Text => format::print_text(&results, &fields),
                OutputFormat::Json => format::print_json(&results),
            }
        }
        Some(Commands::Fields(mut fields_args)) => {
            apply_fields_config_defaults(&cli_config, &mut fields_args);

            let records = loader::load_file(&args::data_path(fields_args.data.as_ref()))?;
            format::print_fields(records.schema())
        }
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

fn effective_server_url(server_flag: Option<&str>, no_server: bool) -> Option<String> {
    if no_server {
        None
    } else {
        server_flag.map(|s| s.to_string())
    }
}
