use std::io::{self, Write};

use assistant_core::{AppViewModel, StatusTone};

pub fn status_line(view: &AppViewModel) -> String {
    let marker = match view.status_tone {
        StatusTone::Idle => "-",
        StatusTone::Loading => "…",
        StatusTone::Success => "✓",
        StatusTone::Error => "✗",
    };
    format!("[{marker}] {}", view.status_text)
}

/// Full panel: status, result area and notes.
pub fn render_panel(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    writeln!(out, "{}", status_line(view))?;
    render_result(out, view)?;
    let unsaved = if view.notes_unsaved { " (unsaved)" } else { "" };
    writeln!(out, "--- notes{unsaved}")?;
    if view.notes.is_empty() {
        writeln!(out, "(empty)")?;
    } else {
        writeln!(out, "{}", view.notes)?;
    }
    Ok(())
}

pub fn render_result(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    if let Some(result) = &view.result {
        if result.meta.is_empty() {
            writeln!(out, "--- result")?;
        } else {
            writeln!(out, "--- result ({})", result.meta)?;
        }
        writeln!(out, "{}", result.content)?;
    }
    Ok(())
}
