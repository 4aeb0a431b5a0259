//! Results screen: follower counts and the two difference lists.

mod render;
mod update;

use std::cell::Cell;

pub use render::render_results;
pub use update::handle_key;

/// The two scrollable lists on the results screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultList {
    #[default]
    NotFollowingBack,
    Fans,
}

impl ResultList {
    fn index(self) -> usize {
        match self {
            ResultList::NotFollowingBack => 0,
            ResultList::Fans => 1,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResultList::NotFollowingBack => "No te siguen",
            ResultList::Fans => "No los sigues",
        }
    }
}

/// Scroll and focus state for the results screen.
#[derive(Debug, Default)]
pub struct ResultsView {
    pub focus: ResultList,
    offsets: [usize; 2],
    /// Rows available to each list, recorded during render.
    list_height: Cell<u16>,
}

impl ResultsView {
    pub fn offset(&self, list: ResultList) -> usize {
        self.offsets[list.index()]
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ResultList::NotFollowingBack => ResultList::Fans,
            ResultList::Fans => ResultList::NotFollowingBack,
        };
    }

    pub fn set_list_height(&self, height: u16) {
        self.list_height.set(height);
    }

    /// Rows per page, never zero.
    pub fn page_size(&self) -> usize {
        usize::from(self.list_height.get().max(1))
    }

    /// Scrolls the focused list of `len` entries by `delta` rows.
    pub fn scroll_by(&mut self, len: usize, delta: isize) {
        let max = self.max_offset(len);
        let offset = &mut self.offsets[self.focus.index()];
        *offset = offset.saturating_add_signed(delta).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.offsets[self.focus.index()] = 0;
    }

    pub fn scroll_to_bottom(&mut self, len: usize) {
        self.offsets[self.focus.index()] = self.max_offset(len);
    }

    fn max_offset(&self, len: usize) -> usize {
        len.saturating_sub(self.page_size())
    }
}
