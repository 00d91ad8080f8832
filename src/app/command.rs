use duckboard_domain::{ChartKind, PanelPatch};

use super::action::Action;
use super::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Open(String),
    Close(Option<String>),
    Add(ChartKind),
    Remove,
    Bind(String),
    Unbind,
    Kind(ChartKind),
    Title(String),
    Filter { category: String, value: String },
    Breakdown(Vec<String>),
    Sql(String),
    Refresh,
    /// Known command with bad arguments; carries the message to show
    Invalid(String),
    Unknown(String),
}

/// Parse a command line (without the leading `:`) into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let (name, rest) = match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    };

    match name {
        "q" | "quit" => Command::Quit,
        "open" | "o" => required(rest, "open <path>", |p| Command::Open(p.to_string())),
        "close" => Command::Close((!rest.is_empty()).then(|| rest.to_string())),
        "add" => parse_kind(rest, ChartKind::Default, Command::Add),
        "rm" | "remove" => Command::Remove,
        "bind" => required(rest, "bind <path>", |p| Command::Bind(p.to_string())),
        "unbind" => Command::Unbind,
        "kind" => required(rest, "kind <kind>", |k| {
            parse_kind(k, ChartKind::Default, Command::Kind)
        }),
        "title" => required(rest, "title <text>", |t| Command::Title(t.to_string())),
        "filter" => match rest.split_once(char::is_whitespace) {
            Some((category, value)) if !value.trim().is_empty() => Command::Filter {
                category: category.to_string(),
                value: value.trim().to_string(),
            },
            _ => usage("filter <category> <value>"),
        },
        "breakdown" => Command::Breakdown(
            rest.split(',')
                .map(str::trim)
                .filter(|node| !node.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        "sql" => Command::Sql(rest.to_string()),
        "refresh" | "r" => Command::Refresh,
        _ => Command::Unknown(input.to_string()),
    }
}

fn required(rest: &str, form: &str, build: impl FnOnce(&str) -> Command) -> Command {
    if rest.is_empty() {
        usage(form)
    } else {
        build(rest)
    }
}

fn parse_kind(rest: &str, fallback: ChartKind, build: fn(ChartKind) -> Command) -> Command {
    if rest.is_empty() {
        return build(fallback);
    }
    match rest.parse::<ChartKind>() {
        Ok(kind) => build(kind),
        Err(e) => Command::Invalid(e.to_string()),
    }
}

fn usage(form: &str) -> Command {
    Command::Invalid(format!("Usage: {form}"))
}

/// Registry key for a typed path; unknown paths pass through and are
/// rejected by the reducer.
fn loaded_path(state: &AppState, path: String) -> String {
    state
        .databases
        .resolve(&path)
        .map_or(path, |db| db.path.clone())
}

/// Resolves a Command against the current selection.
/// `Err` carries a message for the footer.
pub fn command_to_action(cmd: Command, state: &AppState) -> Result<Action, String> {
    let selected_panel = || {
        state
            .selected_panel()
            .map(|p| p.id.clone())
            .ok_or_else(|| "No panel selected".to_string())
    };
    let update = |patch: PanelPatch| -> Result<Action, String> {
        Ok(Action::UpdatePanel {
            id: selected_panel()?,
            patch,
        })
    };

    match cmd {
        Command::Quit => Ok(Action::Quit),
        Command::Open(path) => Ok(Action::OpenDatabase(path)),
        Command::Close(Some(path)) => Ok(Action::CloseDatabase(loaded_path(state, path))),
        Command::Close(None) => state
            .selected_database()
            .map(|db| Action::CloseDatabase(db.path.clone()))
            .ok_or_else(|| "No database selected".to_string()),
        Command::Add(kind) => Ok(Action::AddPanel(kind)),
        Command::Remove => selected_panel().map(Action::RemovePanel),
        Command::Bind(path) => update(PanelPatch::bind(loaded_path(state, path))),
        Command::Unbind => update(PanelPatch::unbind()),
        Command::Kind(kind) => update(PanelPatch::kind(kind)),
        Command::Title(title) => update(PanelPatch::title(title)),
        Command::Filter { category, value } => Ok(Action::ToggleFilter {
            id: selected_panel()?,
            category,
            value,
        }),
        Command::Breakdown(nodes) => update(PanelPatch::breakdown(nodes)),
        Command::Sql(sql) => update(PanelPatch::sql(sql)),
        Command::Refresh => Ok(Action::RefreshSelected),
        Command::Invalid(msg) => Err(msg),
        Command::Unknown(input) => Err(format!("Unknown command: {input}")),
    }
}
