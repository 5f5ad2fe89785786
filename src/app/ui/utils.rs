#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
};
use syntect::{easy::HighlightLines, highlighting::Theme};
use unicode_width::UnicodeWidthStr;

use crate::app::ui::syntaxes::{SYNTAX_SET, Syntaxes};

pub fn notice_area(area: Rect, percent_width: u16) -> Rect {
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_width)]).flex(Flex::End);
    let [area] = horizontal.areas(area);
    area
}

pub fn split_to_lines<'a>(text: impl Into<Line<'a>>, max_width: usize) -> Vec<Line<'a>> {
    let mut lines = vec![];
    let mut line = vec![];
    let mut line_char_count = 0;
    let spans = split_spans(text);

    for word in spans {
        if line_char_count + word.content.width() > max_width && !line.is_empty() {
            lines.push(Line::from(line));
            line = vec![];
            line_char_count = 0;
        }
        line_char_count += word.width();
        line.push(word);
    }
    if !line.is_empty() {
        lines.push(Line::from(line));
    }
    lines
}

fn split_spans<'a>(input: impl Into<Line<'a>>) -> Vec<Span<'a>> {
    let mut spans = vec![];
    input.into().spans.into_iter().for_each(|item| {
        spans.extend(split_span_by_space(item));
    });
    spans
}

fn split_span_by_space(span: Span) -> Vec<Span> {
    let mut spans = vec![];
    let s = span.content.to_string();
    let mut in_word = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c == ' ' {
            if in_word {
                spans.push(Span::styled(s[start..i].to_string(), span.style));
                in_word = false;
            }
            let space_end = i + c.len_utf8();
            spans.push(Span::styled(s[i..space_end].to_string(), span.style));
            start = space_end;
        } else if !in_word {
            start = i;
            in_word = true;
        }
    }
    if in_word {
        spans.push(Span::styled(s[start..].to_string(), span.style));
    }
    spans
        .into_iter()
        .filter(|s| s.content.width() > 0)
        .collect()
}

/// Turns markdown-ish message text into wrapped terminal lines. Fenced code
/// blocks are highlighted by their declared language, headings are bold and
/// list bullets are normalized. Text is never interpreted beyond that.
pub fn build_message_lines<'a, F>(
    content: &str,
    max_width: usize,
    theme: &'a Theme,
    format_spans: F,
) -> Vec<Line<'a>>
where
    F: Fn(Line<'a>) -> Line<'a>,
{
    let mut highlight = HighlightLines::new(Syntaxes::get("text"), theme);
    let mut in_codeblock = false;
    let mut lines: Vec<Line> = vec![];

    for line in content.lines() {
        let line = line.replace('\t', "  ");
        let trimmed = line.trim();

        let spans = if trimmed.starts_with("```") {
            if !in_codeblock {
                let lang = trimmed.trim_start_matches('`');
                highlight = HighlightLines::new(Syntaxes::get(lang), theme);
            }
            in_codeblock = !in_codeblock;
            vec![Span::from(line.clone()).dim()]
        } else if in_codeblock {
            highlight_code_line(&mut highlight, &line)
        } else {
            markdown_spans(&line)
        };

        lines.extend(
            split_to_lines(spans, max_width)
                .into_iter()
                .map(&format_spans)
                .collect::<Vec<_>>(),
        );
    }
    lines
}

fn highlight_code_line<'a>(highlight: &mut HighlightLines, line: &str) -> Vec<Span<'a>> {
    let line_nl = format!("{}\n", line);
    let highlighted = match highlight.highlight_line(&line_nl, &SYNTAX_SET) {
        Ok(highlighted) => highlighted,
        Err(err) => {
            log::debug!("Failed to highlight line: {}", err);
            return vec![Span::raw(line.to_string())];
        }
    };

    let spans = highlighted
        .iter()
        .map(|(style, content)| {
            Span::styled(
                content.trim_end_matches('\n').to_string(),
                Style {
                    fg: Syntaxes::translate_colour(style.foreground),
                    ..Style::default()
                },
            )
        })
        .filter(|span| !span.content.is_empty())
        .collect::<Vec<_>>();

    if spans.is_empty() {
        return vec![Span::raw(String::new())];
    }
    spans
}

fn markdown_spans<'a>(line: &str) -> Vec<Span<'a>> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        let heading = trimmed.trim_start_matches('#');
        if heading.is_empty() || heading.starts_with(' ') {
            return vec![Span::styled(
                heading.trim().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
        }
    }

    let indent = &line[..line.len() - trimmed.len()];
    for marker in ["- ", "* ", "+ "] {
        if let Some(item) = trimmed.strip_prefix(marker) {
            return vec![Span::raw(format!("{indent}• {item}"))];
        }
    }

    vec![Span::raw(line.to_string())]
}

pub fn repeat_from_substactions(text: &str, subs: Vec<usize>) -> String {
    let count = subs
        .into_iter()
        .map(|e| e as i64)
        .reduce(|a, b| a - b)
        .unwrap_or_default();

    if count <= 0 {
        return String::new();
    }

    text.repeat(count as usize)
}
