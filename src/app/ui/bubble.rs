#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use crate::{config::Configuration, models::Message};
use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span},
};
use syntect::highlighting::Theme;
use unicode_width::UnicodeWidthStr;

use super::utils;

pub const DEFAULT_PADDING: usize = 8;
pub const DEFAULT_BORDER_ELEMENTS_LEN: usize = 5;
pub const DEFAULT_OUTER_PADDING_PERCENTAGE: f32 = 0.04;

const USER_COLOR: Color = Color::Rgb(64, 224, 208);
const ASSISTANT_COLOR: Color = Color::Rgb(255, 140, 105);

/// A message rendered as a rounded box. Assistant messages hug the left
/// edge, user messages the right one.
pub struct Bubble<'m> {
    message: &'m Message,
    max_width: usize,
    italic: bool,

    // left border + left padding + (text, not counted) + right padding
    // + right border + scrollbar
    border_elements_length: usize,
    padding: usize,
    outer_padding_percentage: f32,
}

impl<'m> Bubble<'m> {
    pub fn new(message: &'m Message, max_width: usize) -> Bubble<'m> {
        Bubble {
            message,
            max_width,
            italic: false,
            border_elements_length: DEFAULT_BORDER_ELEMENTS_LEN,
            padding: DEFAULT_PADDING,
            outer_padding_percentage: DEFAULT_OUTER_PADDING_PERCENTAGE,
        }
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn as_lines<'a>(&self, theme: &'a Theme) -> Vec<Line<'a>> {
        let max_line_len = self.get_max_line_length();

        let lines = utils::build_message_lines(self.message.text(), max_line_len, theme, |line| {
            self.format_spans(line.spans, max_line_len)
        });

        self.wrap_lines_in_bubble(lines, max_line_len)
    }

    fn date(&self) -> String {
        self.message
            .created_at()
            .with_timezone(&chrono::Local)
            .format("%H:%M %m/%d")
            .to_string()
    }

    fn wrap_lines_in_bubble<'a>(&self, lines: Vec<Line<'a>>, max_line_len: usize) -> Vec<Line<'a>> {
        let sender = self.message.sender_str();
        let top_bar = format!(
            "╭─ {} {}╮",
            sender,
            utils::repeat_from_substactions("─", vec![max_line_len, sender.width(), 1])
        );

        let date = self.date();
        let bottom_bar = format!(
            "╰─ {} {}╯",
            date,
            utils::repeat_from_substactions("─", vec![max_line_len, date.width(), 1])
        );
        let bar_padding =
            utils::repeat_from_substactions(" ", vec![self.max_width, max_line_len, self.padding]);

        let (top, bottom) = if self.message.is_assistant() {
            (
                format!("{top_bar}{bar_padding}"),
                format!("{bottom_bar}{bar_padding}"),
            )
        } else {
            (
                format!("{bar_padding}{top_bar}"),
                format!("{bar_padding}{bottom_bar}"),
            )
        };

        let mut res = vec![self.highlighted_line(top)];
        res.extend(lines);
        res.push(self.highlighted_line(bottom));
        res
    }

    fn get_max_line_length(&self) -> usize {
        let min_bubble_padding_length =
            ((self.max_width as f32 * self.outer_padding_percentage).ceil()) as usize;
        let line_border_width = self.border_elements_length + min_bubble_padding_length;

        let mut max_line_len = self
            .message
            .text()
            .lines()
            .map(|line| line.width())
            .max()
            .unwrap_or_default()
            .min(self.max_width.saturating_sub(line_border_width));

        // 2 padding spaces around the sender and the date
        max_line_len = max_line_len
            .max(self.message.sender_str().width() + 2)
            .max(self.date().width() + 2);

        let max_width_percent =
            Configuration::instance().general.get_bubble_width_percent() as f32 / 100.0;
        if max_line_len as f32 > max_width_percent * self.max_width as f32 {
            max_line_len = (self.max_width as f32 * max_width_percent).ceil() as usize;
        }

        max_line_len
    }

    fn format_spans<'a>(&self, mut spans: Vec<Span<'a>>, max_line_len: usize) -> Line<'a> {
        if self.italic {
            spans = spans
                .into_iter()
                .map(|span| span.italic())
                .collect();
        }

        let line_str_len: usize = spans.iter().map(|e| e.content.width()).sum();
        let fill = utils::repeat_from_substactions(" ", vec![max_line_len, line_str_len]);
        let formatted_line_len = line_str_len + fill.len() + self.padding;

        let mut wrapped_spans = vec![self.highlighted_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlighted_span(format!("{fill} │")));

        let outer_padding =
            utils::repeat_from_substactions(" ", vec![self.max_width, formatted_line_len]);

        if self.message.is_assistant() {
            wrapped_spans.push(Span::from(outer_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_padding)];
        line_spans.extend(wrapped_spans);
        Line::from(line_spans)
    }

    fn highlighted_span<'a>(&self, text: String) -> Span<'a> {
        let color = if self.message.is_assistant() {
            ASSISTANT_COLOR
        } else {
            USER_COLOR
        };
        Span::styled(text, Style::default().fg(color))
    }

    fn highlighted_line<'a>(&self, text: String) -> Line<'a> {
        Line::from(self.highlighted_span(text))
    }
}
