use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Produce a rectangle centered within `area` that spans the requested
/// percent of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Section header line used on the detail screens.
pub(crate) fn section_line(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Append a titled bullet-list section to `lines`, skipping the section
/// entirely when the list is empty so detail screens stay compact.
pub(crate) fn push_bullet_section(lines: &mut Vec<Line<'static>>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(section_line(title));
    for item in items {
        lines.push(Line::from(format!("  - {item}")));
    }
    lines.push(Line::from(""));
}

/// Append a titled paragraph section, skipped when the text is blank.
pub(crate) fn push_text_section(lines: &mut Vec<Line<'static>>, title: &str, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    lines.push(section_line(title));
    lines.push(Line::from(format!("  {text}")));
    lines.push(Line::from(""));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sections_are_skipped() {
        let mut lines = Vec::new();
        push_bullet_section(&mut lines, "Types", &[]);
        push_text_section(&mut lines, "Warnings", "   ");
        assert!(lines.is_empty());
    }

    #[test]
    fn sections_render_header_then_entries() {
        let mut lines = Vec::new();
        push_bullet_section(&mut lines, "Symptoms", &["Wheezing".to_string()]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].to_string(), "  - Wheezing");
    }
}
