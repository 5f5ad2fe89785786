use crate::models::Event;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Padding, Widget},
};
use tui_textarea::{CursorMove, TextArea};

/// Single line popup used to type the path of a file to upload.
pub struct InputBox<'a> {
    showing: bool,
    input: TextArea<'a>,

    title: String,
    placeholder: String,
}

impl<'a> InputBox<'a> {
    pub fn with_title(mut self, title: &str) -> InputBox<'a> {
        if !title.is_empty() {
            self.title = title.to_string();
        }
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> InputBox<'a> {
        if !placeholder.is_empty() {
            self.placeholder = placeholder.to_string();
        }
        self
    }

    pub fn showing(&self) -> bool {
        self.showing
    }

    pub fn open(&mut self, text: impl Into<String>) {
        self.input = self.build_input(text.into());
        self.showing = true;
    }

    /// Hides the popup and returns what was typed, cleaned up as a path.
    pub fn close(&mut self) -> Option<String> {
        if !self.showing {
            return None;
        }
        self.showing = false;
        Some(clean_path(&self.input.lines().join("")))
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        if !self.showing {
            return;
        }

        f.render_widget(Clear, area);
        self.input.render(area, f.buffer_mut());
    }

    pub fn handle_key_event(&mut self, event: &Event) {
        match event {
            Event::KeyboardCharInput(input) => {
                self.input.input(input.clone());
            }
            Event::KeyboardPaste(text) => {
                self.input.insert_str(text.replace(['\r', '\n'], ""));
            }
            _ => {}
        }
    }

    fn build_input(&self, text: String) -> TextArea<'a> {
        let mut text_area = TextArea::new(vec![text]);
        let block = Block::default()
            .title(Line::from(self.title.clone()).bold())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightMagenta))
            .padding(Padding::symmetric(1, 0));
        text_area.set_block(block);
        text_area.set_placeholder_text(&self.placeholder);
        text_area.move_cursor(CursorMove::End);
        text_area
    }
}

impl Default for InputBox<'_> {
    fn default() -> Self {
        Self {
            showing: false,
            input: TextArea::default(),
            title: " Input ".to_string(),
            placeholder: "Type here...".to_string(),
        }
    }
}

pub fn build_area(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height.saturating_sub(3) / 2;
    Rect::new(x, y, width, 3.min(area.height))
}

/// Terminals paste dropped files as a path, sometimes quoted or with
/// escaped spaces.
pub fn clean_path(text: &str) -> String {
    let text = text.trim();
    let text = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .or_else(|| text.strip_prefix('"').and_then(|t| t.strip_suffix('"')))
        .unwrap_or(text);
    let text = text.strip_prefix("file://").unwrap_or(text);
    text.replace("\\ ", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("  /tmp/a.txt \n"), "/tmp/a.txt");
        assert_eq!(clean_path("'/tmp/my file.pdf'"), "/tmp/my file.pdf");
        assert_eq!(clean_path("\"/tmp/b.md\""), "/tmp/b.md");
        assert_eq!(clean_path("/tmp/my\\ notes.txt"), "/tmp/my notes.txt");
        assert_eq!(clean_path("file:///home/me/c.csv"), "/home/me/c.csv");
    }

    #[test]
    fn test_builders_ignore_empty_values() {
        let input = InputBox::default()
            .with_title(" Upload file ")
            .with_placeholder("");
        assert_eq!(input.title, " Upload file ");
        assert_eq!(input.placeholder, "Type here...");
    }

    #[test]
    fn test_open_close() {
        let mut input = InputBox::default();
        assert!(!input.showing());
        assert_eq!(input.close(), None);

        input.open("'/tmp/report.pdf'");
        assert!(input.showing());
        assert_eq!(input.close().as_deref(), Some("/tmp/report.pdf"));
        assert!(!input.showing());
    }
}
