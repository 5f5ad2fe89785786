use ratatui::style::Modifier;
use syntect::highlighting::ThemeSet;
use unicode_width::UnicodeWidthStr;

use super::*;

fn theme() -> Theme {
    ThemeSet::load_defaults().themes["base16-ocean.dark"].clone()
}

fn content(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.to_string()).collect()
}

#[test]
fn test_assistant_bubble_is_left_aligned() {
    let theme = theme();
    let message = Message::new_assistant("Hello there");
    let lines = Bubble::new(&message, 80).as_lines(&theme);

    assert_eq!(lines.len(), 3);
    assert!(content(&lines[0]).starts_with("╭─ assistant "));
    assert!(content(&lines[1]).starts_with("│ Hello there"));
    assert!(content(&lines[2]).starts_with("╰─ "));
}

#[test]
fn test_user_bubble_is_right_aligned() {
    let theme = theme();
    let message = Message::new_user("Hi");
    let lines = Bubble::new(&message, 80).as_lines(&theme);

    assert_eq!(lines.len(), 3);
    let top = content(&lines[0]);
    assert!(top.starts_with(' '));
    assert!(top.trim_start().starts_with("╭─ user "));
    assert!(content(&lines[1]).trim_end().ends_with('│'));
    assert!(content(&lines[1]).starts_with(' '));
}

#[test]
fn test_bubble_lines_share_width() {
    let theme = theme();
    let message = Message::new_user("short\na considerably longer line of text");
    let lines = Bubble::new(&message, 100).as_lines(&theme);

    let widths = lines
        .iter()
        .map(|line| content(line).trim().width())
        .collect::<Vec<_>>();
    assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
}

#[test]
fn test_long_text_is_wrapped() {
    let theme = theme();
    let message = Message::new_assistant("word ".repeat(60));
    let lines = Bubble::new(&message, 80).as_lines(&theme);

    assert!(lines.len() > 3);
    for line in &lines {
        assert!(content(line).width() <= 80);
    }
}

#[test]
fn test_italic_bubble() {
    let theme = theme();
    let message = Message::new_assistant("typing");
    let lines = Bubble::new(&message, 80).with_italic(true).as_lines(&theme);

    let text_span = lines[1]
        .spans
        .iter()
        .find(|span| span.content == "typing")
        .expect("text span");
    assert!(text_span.style.add_modifier.contains(Modifier::ITALIC));
}
