#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::{collections::BTreeMap, sync::Arc};

use crate::{config::constants::TYPING_MESSAGE, models::Message};
use ratatui::{buffer::Buffer, layout::Rect, text::Line};
use syntect::highlighting::Theme;

use super::bubble::Bubble;

struct CacheEntry<'a> {
    message_id: String,
    text_len: usize,
    lines: Vec<Arc<Line<'a>>>,
}

pub struct BubbleList<'a> {
    theme: &'a Theme,
    cache: BTreeMap<usize, CacheEntry<'a>>,
    typing: Option<Vec<Arc<Line<'a>>>>,
    lines: Vec<Arc<Line<'a>>>,
    line_width: usize,
}

impl<'a> BubbleList<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            cache: BTreeMap::new(),
            typing: None,
            lines: Vec::new(),
            line_width: 0,
        }
    }

    /// Rebuilds the rendered lines. Bubbles are cached by position and only
    /// rebuilt when the message at that position changed or the width did.
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize, typing: bool) {
        if self.line_width != line_width {
            self.cache.clear();
            self.typing = None;
            self.line_width = line_width;
        }

        self.cache.retain(|i, _| *i < messages.len());
        for (i, message) in messages.iter().enumerate() {
            if let Some(entry) = self.cache.get(&i) {
                if entry.message_id == message.id() && entry.text_len == message.text().len() {
                    continue;
                }
            }

            let lines = Bubble::new(message, line_width).as_lines(self.theme);
            self.cache.insert(
                i,
                CacheEntry {
                    message_id: message.id().to_string(),
                    text_len: message.text().len(),
                    lines: lines.into_iter().map(Arc::new).collect(),
                },
            );
        }

        match (typing, self.typing.is_some()) {
            (true, false) => {
                let message = Message::new_assistant(TYPING_MESSAGE);
                let lines = Bubble::new(&message, line_width)
                    .with_italic(true)
                    .as_lines(self.theme);
                self.typing = Some(lines.into_iter().map(Arc::new).collect());
            }
            (false, true) => self.typing = None,
            _ => {}
        }

        self.update_lines();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Arc<Line<'a>>] {
        &self.lines
    }

    pub fn get_visible_lines(&self, height: usize, scroll_index: usize) -> Vec<Arc<Line<'a>>> {
        self.lines
            .iter()
            .skip(scroll_index)
            .take(height)
            .cloned()
            .collect()
    }

    pub fn render(&self, rect: Rect, buf: &mut Buffer, scroll_index: usize) {
        for (i, line) in self
            .get_visible_lines(rect.height as usize, scroll_index)
            .iter()
            .enumerate()
        {
            buf.set_line(rect.x, rect.y + i as u16, line, rect.width);
        }
    }

    fn update_lines(&mut self) {
        self.lines = self
            .cache
            .values()
            .flat_map(|entry| entry.lines.clone())
            .chain(self.typing.iter().flatten().cloned())
            .collect();
    }
}
