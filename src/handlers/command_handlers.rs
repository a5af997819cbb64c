use discshelf_core::{parse_facet_selections, ViewMode};
use std::path::PathBuf;

use crate::errors::{format_error, map_export_error, map_load_error};
use crate::operations::export_results;
use crate::state::AppState;
use crate::ui::{format_choices, format_facet_choices, render_view};

pub const HELP: &str = "\
Commands:
  filter NAME=VALUE   select a facet value (e.g. filter Performer=X)
  clear [NAME]        clear one facet, or every facet
  search TEXT         free-text search across all fields (empty clears)
  page N | next | prev
  size N              records per page in card view
  cards N             cards per row (1-3)
  view table|cards    switch presentation
  choices [NAME]      list facet values
  export PATH         write the current results to CSV
  reload              re-read the catalog if it changed
  reset               back to the default view
  help                this text
  quit";

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(String),
    Clear(Option<String>),
    Search(String),
    Page(usize),
    Next,
    Previous,
    PageSize(usize),
    CardsPerRow(usize),
    View(ViewMode),
    Choices(Option<String>),
    Export(PathBuf),
    Reload,
    Reset,
    Help,
    Quit,
}

/// What the session should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and redraw the view
    Redraw(Option<String>),
    /// Print the text only
    Message(String),
    Quit,
}

fn parse_number(name: &str, arg: &str) -> Result<usize, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!("'{}' expects a number, got '{}'", name, arg.trim()))
}

fn optional(arg: &str) -> Option<String> {
    let arg = arg.trim();
    if arg.is_empty() {
        None
    } else {
        Some(arg.to_string())
    }
}

/// Parse a command line; blank lines are `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    let command = match name.to_ascii_lowercase().as_str() {
        "filter" | "f" => match optional(arg) {
            Some(arg) => Command::Filter(arg),
            None => return Err("'filter' expects NAME=VALUE".to_string()),
        },
        "clear" => Command::Clear(optional(arg)),
        // search text is kept verbatim; the engine trims it
        "search" | "s" => Command::Search(arg.to_string()),
        "page" | "p" => Command::Page(parse_number("page", arg)?),
        "next" | "n" => Command::Next,
        "prev" | "previous" => Command::Previous,
        "size" => Command::PageSize(parse_number("size", arg)?),
        "cards" => Command::CardsPerRow(parse_number("cards", arg)?),
        "view" | "v" => Command::View(arg.parse()?),
        "choices" => Command::Choices(optional(arg)),
        "export" => match optional(arg) {
            Some(path) => Command::Export(PathBuf::from(path)),
            None => return Err("'export' expects a file path".to_string()),
        },
        "reload" => Command::Reload,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(Some(command))
}

/// Apply a command to the session
pub fn execute(command: Command, state: &mut AppState) -> Outcome {
    match command {
        Command::Filter(arg) => match parse_facet_selections(&[arg], state.aliases()) {
            Ok(selections) => {
                for (field, selection) in selections {
                    state.browse.select_facet(field, selection);
                }
                Outcome::Redraw(None)
            }
            Err(errors) => Outcome::Message(errors.join("\n")),
        },
        Command::Clear(None) => {
            let facets: Vec<_> = state.browse.filters.facets().collect();
            for field in facets {
                state.browse.clear_facet(field);
            }
            Outcome::Redraw(None)
        }
        Command::Clear(Some(name)) => match state.aliases().resolve_name(&name) {
            Some(field) => {
                state.browse.clear_facet(field);
                Outcome::Redraw(None)
            }
            None => Outcome::Message(format!("Unknown field '{}'", name)),
        },
        Command::Search(text) => {
            state.browse.set_search(text);
            Outcome::Redraw(None)
        }
        Command::Page(page) => {
            state.browse.set_page(page);
            Outcome::Redraw(None)
        }
        Command::Next => {
            let total = state.match_count();
            state.browse.pagination.next(total);
            Outcome::Redraw(None)
        }
        Command::Previous => {
            let total = state.match_count();
            state.browse.pagination.previous(total);
            Outcome::Redraw(None)
        }
        Command::PageSize(size) => {
            let total = state.match_count();
            state.browse.set_page_size(size);
            state.browse.pagination.reclamp(total);
            Outcome::Redraw(None)
        }
        Command::CardsPerRow(count) => {
            state.browse.set_cards_per_row(count);
            Outcome::Redraw(None)
        }
        Command::View(mode) => {
            state.browse.set_view_mode(mode);
            Outcome::Redraw(None)
        }
        Command::Choices(None) => {
            Outcome::Message(format_choices(&state.facet_index, &state.browse))
        }
        Command::Choices(Some(name)) => match state.aliases().resolve_name(&name) {
            Some(field) => match state.facet_index.choices(field) {
                Some(choices) => Outcome::Message(format_facet_choices(choices, &state.browse)),
                None => Outcome::Message(format!("'{}' is not a facet", field)),
            },
            None => Outcome::Message(format!("Unknown field '{}'", name)),
        },
        Command::Export(path) => match export_results(state, &path) {
            Ok(rows) => Outcome::Message(format!("Exported {} rows to {}", rows, path.display())),
            Err(err) => Outcome::Message(format_error(&map_export_error(&err, &path))),
        },
        Command::Reload => match state.reload() {
            Ok(true) => Outcome::Redraw(Some(state.get_title())),
            Ok(false) => Outcome::Message("Catalog unchanged".to_string()),
            Err(err) => Outcome::Message(format_error(&map_load_error(&err))),
        },
        Command::Reset => {
            state.browse.reset();
            Outcome::Redraw(Some("View reset".to_string()))
        }
        Command::Help => Outcome::Message(HELP.to_string()),
        Command::Quit => Outcome::Quit,
    }
}

/// Text for a redraw: the optional message followed by the current view
pub fn redraw(state: &mut AppState, message: Option<String>) -> String {
    let view = state.render();
    let body = render_view(&view, &state.browse);
    match message {
        Some(message) => format!("{}\n{}", message, body),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use discshelf_core::Field;
    use std::fs;

    fn loaded_state(dir: &std::path::Path) -> AppState {
        let path = dir.join("catalogo.csv");
        let mut body = String::from("Canción,Intérprete,Formato\n");
        for i in 0..13 {
            body.push_str(&format!("Song {},{},CD\n", i, if i < 3 { "X" } else { "Y" }));
        }
        fs::write(&path, body).unwrap();
        let mut state = AppState::new(&Config::default());
        state.load_from_file(&path).unwrap();
        state
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(
            parse_command("filter Intérprete=X"),
            Ok(Some(Command::Filter("Intérprete=X".to_string())))
        );
        assert_eq!(parse_command("clear"), Ok(Some(Command::Clear(None))));
        assert_eq!(parse_command("PAGE 3"), Ok(Some(Command::Page(3))));
        assert_eq!(parse_command("view cards"), Ok(Some(Command::View(ViewMode::Cards))));
        assert_eq!(parse_command("search"), Ok(Some(Command::Search(String::new()))));
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
        assert!(parse_command("page two").is_err());
        assert!(parse_command("view grid").is_err());
        assert!(parse_command("export").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_filter_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());

        let outcome = execute(Command::Filter("performer=X".to_string()), &mut state);
        assert_eq!(outcome, Outcome::Redraw(None));
        assert_eq!(state.match_count(), 3);

        execute(Command::Clear(Some("Intérprete".to_string())), &mut state);
        assert_eq!(state.match_count(), 13);

        let outcome = execute(Command::Filter("Precio=3".to_string()), &mut state);
        assert!(matches!(outcome, Outcome::Message(text) if text.contains("Unknown field")));
    }

    #[test]
    fn test_paging_commands_stay_in_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());
        execute(Command::View(ViewMode::Cards), &mut state);
        execute(Command::PageSize(5), &mut state);

        execute(Command::Next, &mut state);
        execute(Command::Next, &mut state);
        execute(Command::Next, &mut state);
        assert_eq!(state.browse.pagination.current_page, 3);

        execute(Command::Page(10), &mut state);
        let text = redraw(&mut state, None);
        assert_eq!(state.browse.pagination.current_page, 3);
        assert!(text.contains("Page 3 of 3"));

        execute(Command::PageSize(10), &mut state);
        assert_eq!(state.browse.pagination.current_page, 2);
    }

    #[test]
    fn test_reset_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());
        execute(Command::Filter("Performer=X".to_string()), &mut state);
        execute(Command::Search("song".to_string()), &mut state);
        execute(Command::View(ViewMode::Cards), &mut state);

        let outcome = execute(Command::Reset, &mut state);
        assert_eq!(outcome, Outcome::Redraw(Some("View reset".to_string())));
        assert!(!state.browse.filters.has_filters());
        assert_eq!(state.browse.search, "");
        assert_eq!(state.browse.view_mode, ViewMode::Table);
        assert_eq!(state.match_count(), 13);
    }

    #[test]
    fn test_choices_for_one_facet() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());
        match execute(Command::Choices(Some("performer".to_string())), &mut state) {
            Outcome::Message(text) => {
                assert!(text.contains("(2 values)"));
                assert!(!text.contains("Song 1"));
            }
            other => panic!("expected message, got {:?}", other),
        }
        let outcome = execute(Command::Choices(Some("Year".to_string())), &mut state);
        assert_eq!(outcome, Outcome::Message(format!("'{}' is not a facet", Field::Year)));
    }

    #[test]
    fn test_export_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(dir.path());
        execute(Command::Filter("Performer=X".to_string()), &mut state);
        let out = dir.path().join("out.csv");
        let outcome = execute(Command::Export(out.clone()), &mut state);
        assert!(matches!(outcome, Outcome::Message(text) if text.starts_with("Exported 3 rows")));
        assert!(out.exists());
    }
}
