use std::time::Duration;

use crate::models::NoticeMessage;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};
use unicode_width::UnicodeWidthStr;

use super::utils;

struct MessageWrapper {
    value: NoticeMessage,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Transient messages stacked in the top right corner. Each one expires
/// after its own duration or the default display duration.
pub struct Notice {
    notices: Vec<MessageWrapper>,
    display_duration: Duration,
}

impl Notice {
    pub fn new(display_duration: Duration) -> Notice {
        Notice {
            notices: vec![],
            display_duration,
        }
    }

    pub fn add_message(&mut self, msg: NoticeMessage) {
        self.notices.push(MessageWrapper {
            value: msg,
            created_at: chrono::Utc::now(),
        });
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.add_message(NoticeMessage::info(msg))
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.add_message(NoticeMessage::error(msg))
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    fn sync(&mut self) {
        let now = chrono::Utc::now();
        let default_duration = self.display_duration;
        self.notices.retain(|msg| {
            let elapsed = now.signed_duration_since(msg.created_at);
            elapsed.num_milliseconds()
                < msg.value.duration().unwrap_or(default_duration).as_millis() as i64
        });
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.sync();
        if self.notices.is_empty() || area.width < 6 || area.height < 3 {
            return;
        }

        let max_width = area.width as usize - 2;
        let max_height = area.height as usize;

        let items = build_list_items(&self.notices, max_width, max_height);
        f.render_widget(List::new(items), area);
    }
}

impl Default for Notice {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

fn build_list_items<'a>(
    notices: &[MessageWrapper],
    max_width: usize,
    max_height: usize,
) -> Vec<ListItem<'a>> {
    let mut items = vec![];
    let mut current_height = 0;

    for item in notices {
        let lines = build_bubble(
            item.value.message(),
            max_width,
            item.value.kind().border_color(),
        );

        current_height += lines.len();
        if current_height > max_height {
            break;
        }
        items.push(ListItem::new(lines));
    }
    items
}

fn build_bubble<'a>(message: &str, max_width: usize, border_color: Color) -> Vec<Line<'a>> {
    let mut lines = vec![];
    let mut line = String::new();
    for word in message.replace('\n', " ").split(' ') {
        if !line.is_empty() && line.width() + word.width() > max_width - 2 {
            lines.push(line.trim().to_string());
            line = String::new();
        }
        line.push_str(word);
        line.push(' ');
    }

    if !line.trim().is_empty() {
        lines.push(line.trim().to_string());
    }

    wrap_bubble(lines, max_width, border_color)
}

fn wrap_bubble<'a>(lines: Vec<String>, max_width: usize, border_color: Color) -> Vec<Line<'a>> {
    let mut wrapped_lines = vec![highlight_line(
        format!("╭{}╮", "─".repeat(max_width)),
        border_color,
    )];
    for line in lines {
        let fill = utils::repeat_from_substactions(" ", vec![max_width - 2, line.width()]);
        wrapped_lines.push(highlight_line(format!("│ {line}{fill} │"), border_color));
    }
    wrapped_lines.push(highlight_line(
        format!("╰{}╯", "─".repeat(max_width)),
        border_color,
    ));
    wrapped_lines
}

fn highlight_line<'a>(text: String, color: Color) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(color)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_bubble_wraps_words() {
        let lines = build_bubble("upload failed: payload too large", 16, Color::Red);
        let texts = lines
            .iter()
            .map(|line| line.spans[0].content.to_string())
            .collect::<Vec<_>>();

        assert_eq!(texts.first().map(|s| s.width()), Some(18));
        assert!(texts.iter().all(|s| s.width() == 18), "{texts:?}");
        assert!(texts.len() > 3);
    }

    #[test]
    fn test_expired_notices_are_dropped() {
        let mut notice = Notice::new(Duration::from_secs(60));
        notice.info("stays");
        notice.add_message(NoticeMessage::error("gone").with_duration(Duration::ZERO));
        assert_eq!(notice.len(), 2);

        notice.sync();
        assert_eq!(notice.len(), 1);
    }
}
