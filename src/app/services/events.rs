#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use crate::{config::constants::FRAME_DURATION, models::Event};
use crossterm::event::{Event as CrosstermEvent, EventStream, MouseEventKind};
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::{Input, Key};

use super::CrosstermStream;

pub struct EventService {
    crossterm_events: Box<dyn CrosstermStream>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    event_tx: mpsc::UnboundedSender<Event>,
}

impl EventService {
    pub fn new(crossterm_events: Box<dyn CrosstermStream>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
        Self {
            crossterm_events,
            event_rx,
            event_tx,
        }
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => Some(Event::KeyboardPaste(text)),
            CrosstermEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => Some(Event::UiScrollUp),
                MouseEventKind::ScrollDown => Some(Event::UiScrollDown),
                MouseEventKind::Drag(button) => Some(Event::UiMouseDrag {
                    button,
                    x: mouse_event.column,
                    y: mouse_event.row,
                }),
                MouseEventKind::Up(button) => Some(Event::UiMouseUp {
                    button,
                    x: mouse_event.column,
                    y: mouse_event.row,
                }),
                _ => None,
            },
            CrosstermEvent::Key(key_event) => {
                let input: Input = key_event.into();
                if input.key == Key::Enter && (input.shift || input.alt) {
                    return Some(Event::KeyboardNewLine);
                }

                // Map ctrl events
                if input.ctrl {
                    match input.key {
                        Key::Char('u') => return Some(Event::UiScrollPageUp),
                        Key::Char('d') => return Some(Event::UiScrollPageDown),
                        Key::Char('q') => return Some(Event::Quit),
                        Key::Char('c') => return Some(Event::KeyboardCtrlC),
                        Key::Char('n') => return Some(Event::KeyboardCtrlN),
                        Key::Char('o') => return Some(Event::KeyboardCtrlO),
                        Key::Char('y') => return Some(Event::KeyboardCtrlY),
                        _ => return None,
                    }
                }

                match input.key {
                    Key::Esc => Some(Event::KeyboardEsc),
                    Key::Enter => Some(Event::KeyboardEnter),
                    Key::Up => Some(Event::UiScrollUp),
                    Key::Down => Some(Event::UiScrollDown),
                    Key::PageUp => Some(Event::UiScrollPageUp),
                    Key::PageDown => Some(Event::UiScrollPageDown),
                    _ => Some(Event::KeyboardCharInput(input)),
                }
            }
            _ => None,
        }
    }

    pub fn event_tx(&self) -> mpsc::UnboundedSender<Event> {
        self.event_tx.clone()
    }

    pub async fn next(&mut self) -> Event {
        loop {
            let e = tokio::select! {
                event = self.event_rx.recv() => event,
                event = self.crossterm_events.next().fuse() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(FRAME_DURATION) => Some(Event::UiTick)
            };

            if let Some(event) = e {
                return event;
            }
        }
    }
}

impl Default for EventService {
    fn default() -> Self {
        Self::new(Box::new(EventStream::new()))
    }
}
