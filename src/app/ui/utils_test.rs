use ratatui::style::{Modifier, Stylize};
use ratatui_macros::span;
use syntect::highlighting::ThemeSet;

use super::*;

#[test]
fn test_split_to_lines() {
    let text = "This is a test string that is too long to fit in a single line.";
    let max_width = 20;
    let lines = split_to_lines(text, max_width);

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].content(), "This is a test ");
    assert_eq!(lines[1].content(), "string that is too ");
    assert_eq!(lines[2].content(), "long to fit in a ");
    assert_eq!(lines[3].content(), "single line.");
}

#[test]
fn test_split_to_lines_contains_styled_span() {
    let text = vec![
        span!("This "),
        span!("is styled span").bold(),
        span!(" can"),
        span!(" be"),
        span!(" split"),
    ];

    let lines = split_to_lines(text, 6);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0].content(), "This ");
    assert_eq!(lines[1].content(), "is ");
    check_span_style(&lines[1], &[bold; 2]);
    assert_eq!(lines[2].content(), "styled");
    assert_eq!(lines[3].content(), " span ");
    check_span_style(&lines[3], &[bold, bold, Style::default()]);
    assert_eq!(lines[4].content(), "can be");
    assert_eq!(lines[5].content(), " split");
}

#[test]
fn test_build_message_lines_markdown() {
    let theme = default_theme();
    let content = "# Title\n- first\n  * nested\nplain text";
    let lines = build_message_lines(content, 40, &theme, |line| line);

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].content(), "Title");
    assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(lines[1].content(), "• first");
    assert_eq!(lines[2].content(), "  • nested");
    assert_eq!(lines[3].content(), "plain text");
}

#[test]
fn test_build_message_lines_hashtag_is_not_heading() {
    let theme = default_theme();
    let lines = build_message_lines("#rust is fun", 40, &theme, |line| line);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].content(), "#rust is fun");
    assert!(!lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn test_build_message_lines_code_block() {
    let theme = default_theme();
    let content = "Here:\n```rust\nfn main() {}\n```\ndone";
    let lines = build_message_lines(content, 40, &theme, |line| line);

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1].content(), "```rust");
    assert_eq!(lines[2].content(), "fn main() {}");
    // highlighted code carries colors from the theme
    assert!(lines[2].spans.iter().any(|span| span.style.fg.is_some()));
    assert_eq!(lines[3].content(), "```");
    assert_eq!(lines[4].content(), "done");
}

#[test]
fn test_build_message_lines_applies_formatter() {
    let theme = default_theme();
    let lines = build_message_lines("a\nb", 40, &theme, |mut line| {
        line.spans.insert(0, Span::raw("> "));
        line
    });

    assert_eq!(lines[0].content(), "> a");
    assert_eq!(lines[1].content(), "> b");
}

#[test]
fn test_repeat_from_substactions() {
    assert_eq!(repeat_from_substactions("-", vec![10, 3, 2]), "-----");
    assert_eq!(repeat_from_substactions("-", vec![3, 10]), "");
    assert_eq!(repeat_from_substactions("-", vec![]), "");
}

trait Content {
    fn content(&self) -> String;
}

impl Content for Line<'_> {
    fn content(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.content.to_string())
            .collect::<Vec<String>>()
            .join("")
    }
}

fn check_span_style(line: &Line, styles: &[Style]) {
    assert_eq!(line.spans.len(), styles.len());
    for (i, span) in line.spans.iter().enumerate() {
        assert_eq!(span.style, styles[i]);
    }
}

fn default_theme() -> Theme {
    let themes = ThemeSet::load_defaults();
    themes.themes["base16-ocean.dark"].clone()
}
