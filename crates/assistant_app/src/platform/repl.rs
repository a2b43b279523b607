//! Line-oriented side panel.

use std::io::{self, Write};

use anyhow::Result;
use assistant_core::{Msg, OperationKind};
use assistant_engine::KeyValueStore;
use assistant_logging::{assistant_info, assistant_warn};

use super::app::Panel;
use super::render::{render_panel, status_line};

const HELP: &str = "\
commands:
  select TEXT                  set the current selection
  summarize|suggest|explain|keypoints [TEXT]
                               run an operation on TEXT or the current selection
  edit TEXT                    replace the notes buffer
  append TEXT                  add a line to the notes buffer
  save | clear | export        notes actions
  show                         redraw the panel
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Select(String),
    Operate(OperationKind, Option<String>),
    Edit(String),
    Append(String),
    Save,
    Clear,
    Export,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> PanelCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line.trim(), ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());
    match word.to_ascii_lowercase().as_str() {
        "" => PanelCommand::Empty,
        "select" => PanelCommand::Select(rest.to_string()),
        "edit" => PanelCommand::Edit(rest.to_string()),
        "append" => PanelCommand::Append(rest.to_string()),
        "save" => PanelCommand::Save,
        "clear" => PanelCommand::Clear,
        "export" => PanelCommand::Export,
        "show" => PanelCommand::Show,
        "help" | "?" => PanelCommand::Help,
        "quit" | "exit" | "q" => PanelCommand::Quit,
        other => match other.parse::<OperationKind>() {
            Ok(operation) => PanelCommand::Operate(operation, arg),
            Err(_) => PanelCommand::Unknown(other.to_string()),
        },
    }
}

pub fn run<S: KeyValueStore>(panel: &mut Panel<S>) -> Result<()> {
    let mut out = io::stdout();
    let view = panel.load_notes()?;
    render_panel(&mut out, &view)?;

    let mut selection = String::new();
    match panel.take_pending_selection() {
        Ok(Some(pending)) => {
            assistant_info!("Picked up pending {} selection", pending.operation);
            selection = pending.text;
            operate(panel, &mut out, pending.operation, selection.clone())?;
        }
        Ok(None) => {}
        Err(err) => assistant_warn!("Could not read pending selection: {}", err),
    }

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let msg = match parse_line(&line) {
            PanelCommand::Empty => continue,
            PanelCommand::Quit => break,
            PanelCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            PanelCommand::Show => {
                render_panel(&mut out, &panel.state().view())?;
                continue;
            }
            PanelCommand::Unknown(word) => {
                writeln!(out, "unknown command '{word}', try 'help'")?;
                continue;
            }
            PanelCommand::Select(text) => {
                selection = text;
                writeln!(out, "selection: {} characters", selection.trim().chars().count())?;
                continue;
            }
            PanelCommand::Operate(operation, text) => {
                if let Some(text) = text {
                    selection = text;
                }
                operate(panel, &mut out, operation, selection.clone())?;
                continue;
            }
            PanelCommand::Edit(text) => Msg::NotesEdited(text),
            PanelCommand::Append(text) => {
                let mut buffer = panel.state().notes_buffer().to_string();
                if !buffer.is_empty() && !buffer.ends_with('\n') {
                    buffer.push('\n');
                }
                buffer.push_str(&text);
                Msg::NotesEdited(buffer)
            }
            PanelCommand::Save => Msg::SaveClicked,
            PanelCommand::Clear => Msg::ClearClicked,
            PanelCommand::Export => Msg::ExportClicked,
        };
        if let Some(view) = panel.dispatch(msg) {
            render_panel(&mut out, &view)?;
        }
    }
    Ok(())
}

fn operate<S: KeyValueStore>(
    panel: &mut Panel<S>,
    out: &mut impl Write,
    operation: OperationKind,
    selection: String,
) -> Result<()> {
    if let Some(view) = panel.dispatch(Msg::OperationTriggered {
        operation,
        selection,
    }) {
        writeln!(out, "{}", status_line(&view))?;
    }
    if let Some(view) = panel.wait_until_settled() {
        render_panel(out, &view)?;
    } else {
        render_panel(out, &panel.state().view())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_take_optional_text() {
        assert_eq!(
            parse_line("summarize\n"),
            PanelCommand::Operate(OperationKind::Summarize, None)
        );
        assert_eq!(
            parse_line("  KEYPOINTS   some longer text here  \n"),
            PanelCommand::Operate(
                OperationKind::Keypoints,
                Some("some longer text here".to_string())
            )
        );
    }

    #[test]
    fn notes_commands_keep_their_text() {
        assert_eq!(
            parse_line("edit first line"),
            PanelCommand::Edit("first line".to_string())
        );
        assert_eq!(parse_line("append"), PanelCommand::Append(String::new()));
        assert_eq!(parse_line("save"), PanelCommand::Save);
        assert_eq!(parse_line("clear\r\n"), PanelCommand::Clear);
        assert_eq!(parse_line("export"), PanelCommand::Export);
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_line("   \n"), PanelCommand::Empty);
        assert_eq!(parse_line("q"), PanelCommand::Quit);
        assert_eq!(
            parse_line("translate this"),
            PanelCommand::Unknown("translate".to_string())
        );
    }
}
