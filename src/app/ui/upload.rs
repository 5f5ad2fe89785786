use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::UploadStaging;

const IDLE_COLOR: Color = Color::DarkGray;
const DRAG_COLOR: Color = Color::LightMagenta;
const SELECTED_COLOR: Color = Color::Rgb(64, 224, 208);

/// Drop zone above the input box. Shows the staged file with the
/// confirm/cancel hints once one is selected.
pub struct UploadPanel;

impl UploadPanel {
    pub const HEIGHT: u16 = 3;

    pub fn render(f: &mut Frame, area: Rect, staging: &UploadStaging) {
        let (border_color, content) = match staging.selected() {
            Some(file) => (
                SELECTED_COLOR,
                Line::from(vec![
                    Span::from(file.name().to_string()).bold(),
                    Span::from(format!(" ({}, {})", human_size(file.size()), file.mime_type()))
                        .dim(),
                    Span::from("   Ctrl+Y").bold(),
                    Span::from(" upload  "),
                    Span::from("Esc").bold(),
                    Span::from(" cancel"),
                ]),
            ),
            None if staging.is_drag_over() => (
                DRAG_COLOR,
                Line::from("Release to drop the file here")
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            ),
            None => (
                IDLE_COLOR,
                Line::from("Drop a file here or press Ctrl+O to pick one").dim(),
            ),
        };

        let block = Block::default()
            .title(" Upload ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        f.render_widget(
            Paragraph::new(content)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

pub fn human_size(size: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        return format!("{} {}", size, UNITS[0]);
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }
}
