use ratatui::layout::Rect;
use syntect::highlighting::Theme;

use crate::{
    app::ui::{BubbleList, Scroll},
    client::ChatClient,
};

pub(crate) struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub scroll: Scroll,

    pub client: ChatClient,
    // Id of the upload in flight, replies for other ids are stale
    pub uploading: Option<u64>,
    // The next selected file came from a paste, not from the picker
    pub pending_drop: bool,
}

impl<'a> AppState<'a> {
    pub fn new(theme: &'a Theme, client: ChatClient) -> AppState<'a> {
        AppState {
            bubble_list: BubbleList::new(theme),
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
            client,
            uploading: None,
            pending_drop: false,
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_height = rect.height.into();
        self.last_known_width = rect.width.into();
        self.sync_state();
    }

    /// Re-renders the conversation and keeps the view pinned to the bottom
    /// if it was there before.
    pub fn sync_state(&mut self) {
        let scrollbar_at_bottom = self.scroll.is_position_at_last();
        self.bubble_list.set_messages(
            self.client.state().messages(),
            self.last_known_width,
            self.client.is_loading(),
        );
        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height);
        if scrollbar_at_bottom {
            self.scroll.last();
        }
    }

    pub fn reset(&mut self) {
        self.client.reset();
        self.uploading = None;
        self.pending_drop = false;
        self.sync_state();
        self.scroll.last();
    }
}
