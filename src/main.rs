mod config;
mod errors;
mod handlers;
mod operations;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use discshelf_core::{parse_facet_selections, ViewMode};
use log::LevelFilter;
use std::path::PathBuf;
use std::process;

use crate::config::load_config;
use crate::errors::{format_error, map_export_error, map_load_error};
use crate::operations::{export_results, resolve_source};
use crate::state::AppState;
use crate::ui::{format_choices, render_view};

/// Music catalog browser - filter, search and page through a record collection
///
/// Examples:
///   # Show the whole catalog as a table
///   discshelf catalogo_musical.xlsx
///
///   # Filter by facet (exact match, combined with AND)
///   discshelf --facet Intérprete="Lucho Gatica" --facet Composer=Lara
///
///   # Free-text search across every field, shown as cards
///   discshelf --search vinilo --view cards --page 2
///
///   # Export the current results to CSV
///   discshelf --facet Performer=X --export seleccion.csv
#[derive(Parser, Debug)]
#[command(name = "discshelf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - Facets: Song, Performer, Orchestra/Soloist, Composer (configurable)\n  \
    - Facet names accept the Spanish headers too (Canción, Intérprete, ...)\n  \
    - Different facets are combined with AND\n  \
    - Search is case-insensitive and looks at every field\n\n\
Configuration:\n  \
    - Read from --config or <config_dir>/discshelf/config.toml")]
struct Cli {
    /// Catalog spreadsheet or CSV (defaults to the configured source)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Filter by facet (format: name=value, can be specified multiple times)
    #[arg(short, long = "facet", value_name = "NAME=VALUE")]
    facets: Vec<String>,

    /// Case-insensitive text to look for in any field
    #[arg(short, long, value_name = "TEXT")]
    search: Option<String>,

    /// Presentation: table or cards
    #[arg(long, value_name = "MODE")]
    view: Option<ViewMode>,

    /// Page to show in card view (clamped to the available pages)
    #[arg(short, long, value_name = "N")]
    page: Option<usize>,

    /// Records per page in card view
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Cards per row (1-3)
    #[arg(long, value_name = "N")]
    cards_per_row: Option<usize>,

    /// Write the matching records to a CSV file instead of displaying them
    #[arg(short, long, value_name = "OUT.csv")]
    export: Option<PathBuf>,

    /// List the values available for each facet
    #[arg(long)]
    choices: bool,

    /// Print the view-model as JSON
    #[arg(long)]
    json: bool,

    /// Keep running and read commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut clog = colog::default_builder();
    clog.filter(None, level);
    clog.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut state = AppState::new(&config);

    let source = resolve_source(cli.file.as_deref(), &config);
    if let Err(err) = state.load_from_file(&source) {
        eprintln!("{}", format_error(&map_load_error(&err)).red());
        process::exit(1);
    }

    apply_cli_overrides(&cli, &mut state);

    if cli.interactive {
        let stdin = std::io::stdin();
        return handlers::run_session(&mut state, stdin.lock(), std::io::stdout());
    }

    if cli.choices {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&state.facet_index)?);
        } else {
            print!("{}", format_choices(&state.facet_index, &state.browse));
        }
        return Ok(());
    }

    if let Some(path) = &cli.export {
        match export_results(&state, path) {
            Ok(rows) => println!("Exported {} rows to {}", rows, path.display()),
            Err(err) => {
                eprintln!("{}", format_error(&map_export_error(&err, path)).red());
                process::exit(1);
            }
        }
        return Ok(());
    }

    let view = state.render();
    if cli.json {
        let json = serde_json::to_string_pretty(&view).context("Failed to serialize view")?;
        println!("{}", json);
    } else {
        println!("{}", state.get_title().bold());
        print!("{}", render_view(&view, &state.browse));
    }
    Ok(())
}

/// Command-line flags take precedence over configured defaults
fn apply_cli_overrides(cli: &Cli, state: &mut AppState) {
    match parse_facet_selections(&cli.facets, state.aliases()) {
        Ok(selections) => {
            for (field, selection) in selections {
                state.browse.select_facet(field, selection);
            }
        }
        Err(errors) => {
            eprintln!("Invalid facet filters:\n");
            for (i, error) in errors.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, error);
            }
            eprintln!("\nPlease fix these errors and try again.");
            process::exit(1);
        }
    }

    if let Some(search) = &cli.search {
        state.browse.set_search(search.clone());
    }
    if let Some(mode) = cli.view {
        state.browse.set_view_mode(mode);
    }
    if let Some(size) = cli.page_size {
        state.browse.set_page_size(size);
    }
    if let Some(count) = cli.cards_per_row {
        state.browse.set_cards_per_row(count);
    }
    if let Some(page) = cli.page {
        state.browse.set_page(page);
    }
}
