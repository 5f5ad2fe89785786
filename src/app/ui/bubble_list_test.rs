use syntect::highlighting::ThemeSet;

use super::*;

fn theme() -> Theme {
    ThemeSet::load_defaults().themes["base16-ocean.dark"].clone()
}

fn content(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.to_string()).collect()
}

#[test]
fn test_set_messages() {
    let theme = theme();
    let mut list = BubbleList::new(&theme);
    assert!(list.is_empty());

    let messages = vec![
        Message::new_assistant("Hello!"),
        Message::new_user("Hi\nthere"),
    ];
    list.set_messages(&messages, 80, false);

    // 3 lines for the first bubble, 4 for the second one
    assert_eq!(list.len(), 7);
    assert!(content(&list.lines()[0]).contains("assistant"));
    assert!(content(&list.lines()[3]).contains("user"));
}

#[test]
fn test_typing_indicator() {
    let theme = theme();
    let mut list = BubbleList::new(&theme);
    let messages = vec![Message::new_user("question")];

    list.set_messages(&messages, 80, true);
    assert_eq!(list.len(), 6);
    assert!(content(&list.lines()[4]).contains(TYPING_MESSAGE));

    list.set_messages(&messages, 80, false);
    assert_eq!(list.len(), 3);
    assert!(
        list.lines()
            .iter()
            .all(|line| !content(line).contains(TYPING_MESSAGE))
    );
}

#[test]
fn test_messages_shrink_after_reset() {
    let theme = theme();
    let mut list = BubbleList::new(&theme);
    let messages = vec![
        Message::new_assistant("Hello!"),
        Message::new_user("one"),
        Message::new_assistant("two"),
    ];
    list.set_messages(&messages, 80, false);
    assert_eq!(list.len(), 9);

    let fresh = vec![Message::new_assistant("Welcome back")];
    list.set_messages(&fresh, 80, false);
    assert_eq!(list.len(), 3);
    assert!(content(&list.lines()[1]).contains("Welcome back"));
}

#[test]
fn test_get_visible_lines() {
    let theme = theme();
    let mut list = BubbleList::new(&theme);
    let messages = vec![
        Message::new_assistant("Hello!"),
        Message::new_user("one"),
    ];
    list.set_messages(&messages, 80, false);

    let visible = list.get_visible_lines(2, 3);
    assert_eq!(visible.len(), 2);
    assert!(content(&visible[0]).contains("user"));
}
