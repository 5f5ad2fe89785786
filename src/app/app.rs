#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::{io, path::Path, time::Duration};

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::Result;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    prelude::{Backend, CrosstermBackend},
    style::Stylize,
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation},
};
use ratatui_macros::span;
use syntect::highlighting::Theme;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    app::app_state::AppState,
    app::ui::{InputBox, Loading, Notice, TextArea, UploadPanel, input_box, utils},
    client::ChatClient,
    info_notice,
    models::{Action, Event, UploadFile, UploadReply},
    warn_notice,
};

use super::services::EventService;

const MIN_WIDTH: u16 = 60;

pub struct App<'a> {
    action_tx: mpsc::UnboundedSender<Action>,

    events: &'a mut EventService,

    app_state: AppState<'a>,
    input: tui_textarea::TextArea<'a>,
    file_picker: InputBox<'a>,

    notice: Notice,
    loading: Loading<'a>,
    uploading: Loading<'a>,

    cancel_token: CancellationToken,
}

impl<'a> App<'a> {
    pub fn new(
        theme: Theme,
        client: ChatClient,
        action_tx: mpsc::UnboundedSender<Action>,
        events: &'a mut EventService,
        cancel_token: CancellationToken,
    ) -> App<'a> {
        let theme = Box::leak(Box::new(theme));

        App {
            action_tx,
            events,
            app_state: AppState::new(theme, client),
            input: new_input(),
            file_picker: InputBox::default()
                .with_title(" Upload file ")
                .with_placeholder("Path to the file..."),
            loading: Loading::new(vec![
                span!("Waiting for the reply... Press ").gray(),
                span!("Ctrl+c").green().bold(),
                span!(" to abort!").gray(),
            ]),
            uploading: Loading::new(span!("Uploading file...").gray()),
            notice: Notice::default(),
            cancel_token,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        enable_raw_mode()?;
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        let term_backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(term_backend)?;
        let result = self.start_loop(&mut terminal).await;

        self.cancel_token.cancel();

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;

        terminal.show_cursor()?;
        result
    }

    async fn start_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.render(terminal)?;
            let event = self.events.next().await;
            if self.handle_event(event) {
                return Ok(());
            }
        }
    }

    /// Applies one event to the app. Returns true when the app should quit.
    fn handle_event(&mut self, event: Event) -> bool {
        if let Some(stop) = self.handle_global_event(&event) {
            return stop;
        }

        // Result events are consumed above, the rest is user input
        if self.file_picker.showing() {
            self.handle_file_picker_event(event);
            return false;
        }

        self.handle_input_event(event);
        false
    }

    fn handle_global_event(&mut self, event: &Event) -> Option<bool> {
        match event {
            Event::Quit => {
                self.app_state.client.abort();
                Some(true)
            }
            Event::Notice(msg) => {
                self.notice.add_message(msg.clone());
                Some(false)
            }
            Event::UiTick => Some(false),
            _ => None,
        }
    }

    fn handle_file_picker_event(&mut self, event: Event) {
        match event {
            Event::KeyboardEsc | Event::KeyboardCtrlC => {
                self.file_picker.close();
            }
            Event::KeyboardEnter => {
                if let Some(path) = self.file_picker.close() {
                    if !path.is_empty() {
                        self.load_file(path, false);
                    }
                }
            }
            Event::ChatReply(_) | Event::UploadReply(_) | Event::FileSelected(_) => {
                self.handle_input_event(event)
            }
            event => self.file_picker.handle_key_event(&event),
        }
    }

    fn handle_input_event(&mut self, event: Event) {
        match event {
            Event::ChatReply(reply) => {
                if self.app_state.client.finish_text(reply) {
                    self.app_state.sync_state();
                    self.app_state.scroll.last();
                }
            }

            Event::UploadReply(reply) => self.handle_upload_reply(reply),

            Event::FileSelected(file) => self.handle_file_selected(file),

            Event::KeyboardCharInput(c) => {
                if !self.app_state.client.is_loading() {
                    self.input.input(c);
                }
            }

            Event::KeyboardNewLine => {
                if !self.app_state.client.is_loading() {
                    self.input.insert_newline();
                }
            }

            Event::KeyboardEnter => self.handle_send_text(),

            Event::KeyboardCtrlC => {
                if self.app_state.client.abort() {
                    return;
                }
                self.input = new_input();
            }

            Event::KeyboardCtrlN => {
                self.app_state.reset();
                self.input = new_input();
                self.notice.info("Started a new conversation");
            }

            Event::KeyboardCtrlO => {
                if self.app_state.client.upload_enabled() {
                    self.file_picker.open("");
                }
            }

            Event::KeyboardCtrlY => self.handle_confirm_upload(),

            Event::KeyboardEsc => {
                if self.app_state.client.staging().confirmation_visible() {
                    self.app_state.client.cancel_upload();
                }
            }

            Event::KeyboardPaste(text) => self.handle_paste(text),

            Event::UiMouseDrag { .. } => {
                if self.app_state.client.upload_enabled() {
                    self.app_state.client.drag_enter();
                }
            }
            Event::UiMouseUp { .. } => self.app_state.client.drag_leave(),

            Event::UiScrollDown => self.app_state.scroll.down(),
            Event::UiScrollUp => self.app_state.scroll.up(),
            Event::UiScrollPageDown => self.app_state.scroll.page_down(),
            Event::UiScrollPageUp => self.app_state.scroll.page_up(),
            _ => {}
        }
    }

    fn handle_send_text(&mut self) {
        if self.app_state.client.is_loading() {
            self.notice.add_message(warn_notice!(
                "Waiting for the assistant to reply, please wait..."
            ));
            return;
        }

        let input_str = self.input.lines().join("\n");
        let Some(request) = self.app_state.client.begin_text(&input_str) else {
            return;
        };

        self.input = new_input();
        self.app_state.sync_state();
        self.app_state.scroll.last();
        let _ = self.action_tx.send(Action::SendChat(request));
    }

    fn handle_confirm_upload(&mut self) {
        if self.app_state.uploading.is_some() {
            self.notice
                .add_message(warn_notice!("An upload is already in progress"));
            return;
        }

        let Some(request) = self.app_state.client.begin_upload() else {
            return;
        };
        self.app_state.uploading = Some(request.id);
        let _ = self.action_tx.send(Action::SendFile(request));
    }

    fn handle_upload_reply(&mut self, reply: UploadReply) {
        let current = self.app_state.uploading == Some(reply.id);
        if current {
            self.app_state.uploading = None;
        }

        let file_name = reply.file_name.clone();
        let result = self.app_state.client.finish_upload(reply);
        self.app_state.sync_state();
        self.app_state.scroll.last();

        if !current {
            return;
        }
        match result {
            Ok(()) => self.notice.add_message(info_notice!(
                format!("Uploaded {}", file_name),
                Duration::from_secs(3)
            )),
            Err(err) => self.notice.error(format!("Upload failed: {:#}", err)),
        }
    }

    fn handle_file_selected(&mut self, file: UploadFile) {
        if !self.app_state.client.upload_enabled() {
            return;
        }

        if std::mem::take(&mut self.app_state.pending_drop) {
            self.app_state.client.drop_file(file);
        } else {
            self.app_state.client.select_file(file);
        }
    }

    /// A paste that is exactly the path of an existing file is how terminals
    /// deliver a dropped file. Anything else goes into the input box.
    fn handle_paste(&mut self, text: String) {
        if self.app_state.client.upload_enabled() && !text.trim().contains('\n') {
            let path = input_box::clean_path(&text);
            if !path.is_empty() && Path::new(&path).is_file() {
                self.load_file(path, true);
                return;
            }
        }

        if self.app_state.client.is_loading() {
            return;
        }
        self.input.set_yank_text(text.replace('\r', "\n"));
        self.input.paste();
    }

    fn load_file(&mut self, path: String, dropped: bool) {
        log::debug!("Loading {} (dropped: {})", path, dropped);
        self.app_state.pending_drop = dropped;
        let _ = self.action_tx.send(Action::LoadFile(path));
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| self.draw(f))?;
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame) {
        let current_width = f.area().width;
        if current_width < MIN_WIDTH {
            f.render_widget(
                Paragraph::new(utils::split_to_lines(
                    format!(
                        "I'm too small, make me bigger! I need at least {} cells (current: {})",
                        MIN_WIDTH, current_width
                    ),
                    current_width.saturating_sub(2) as usize,
                ))
                .alignment(Alignment::Left),
                f.area(),
            );
            return;
        }

        let upload_enabled = self.app_state.client.upload_enabled();
        let textarea_len = u16::try_from(self.input.lines().len() + 2).unwrap_or(u16::MAX);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Min(1),
                Constraint::Length(if upload_enabled {
                    UploadPanel::HEIGHT
                } else {
                    0
                }),
                Constraint::Max(textarea_len),
                Constraint::Length(1),
            ])
            .split(f.area());

        if layout[0].width as usize != self.app_state.last_known_width
            || layout[0].height as usize != self.app_state.last_known_height
        {
            self.app_state.set_rect(layout[0]);
        }

        self.app_state.bubble_list.render(
            layout[0],
            f.buffer_mut(),
            self.app_state.scroll.position,
        );

        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .end_symbol(None)
                .begin_symbol(None),
            layout[0].inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.app_state.scroll.scrollbar_state,
        );

        if upload_enabled {
            UploadPanel::render(f, layout[1], self.app_state.client.staging());
        }

        if self.app_state.client.is_loading() {
            self.loading.render(f, layout[2]);
        } else if self.app_state.uploading.is_some() {
            self.uploading.render(f, layout[2]);
        } else {
            f.render_widget(&self.input, layout[2]);
        }

        render_help_line(f, layout[3], upload_enabled);

        self.file_picker
            .render(f, input_box::build_area(f.area(), f.area().width * 2 / 3));
        self.notice.render(f, utils::notice_area(f.area(), 30));
    }
}

fn render_help_line(f: &mut Frame, area: Rect, upload_enabled: bool) {
    let mut spans = vec![
        span!("Enter").green().bold(),
        span!(" send  ").gray(),
        span!("Shift+Enter").green().bold(),
        span!(" new line  ").gray(),
        span!("Ctrl+n").green().bold(),
        span!(" new chat  ").gray(),
    ];
    if upload_enabled {
        spans.extend([
            span!("Ctrl+o").green().bold(),
            span!(" upload  ").gray(),
        ]);
    }
    spans.extend([span!("Ctrl+q").green().bold(), span!(" quit").gray()]);

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn new_input<'a>() -> tui_textarea::TextArea<'a> {
    TextArea::new(" Message ")
        .with_placeholder("Type your message here...")
        .build()
}
