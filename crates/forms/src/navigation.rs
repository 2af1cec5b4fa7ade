//! Page cursor with gated forward moves.
//!
//! States are the data pages `1..=total_pages` plus the review step at
//! `total_pages + 1`. Transitions:
//!   * `advance`: only when the current page is valid (or validation is
//!     bypassed); the last data page advances into review
//!   * `retreat`: always allowed above page 1
//!   * `edit_section`: jump straight to any page, no validation on entry
//!
//! Transitions are pure state changes. Anything the caller has to do
//! afterwards (scrolling back to the top) comes back as an `Effect`.

use tracing::{debug, warn};

/// Message shown when `advance` is refused.
pub const INCOMPLETE_PAGE_MESSAGE: &str =
    "Please complete all required fields on this page before continuing.";

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScrollToTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: u32, to: u32 },
    /// Forward move refused by validation; the error message is set.
    Blocked,
    /// Nothing to do (e.g. retreat on page 1, advance on review).
    Unchanged,
}

impl Transition {
    pub fn effects(&self) -> Vec<Effect> {
        match self {
            Transition::Moved { .. } => vec![Effect::ScrollToTop],
            Transition::Blocked | Transition::Unchanged => Vec::new(),
        }
    }

    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current_page: u32,
    total_pages: u32,
    bypass_validation: bool,
    error_message: Option<String>,
}

impl Navigator {
    pub fn new(total_pages: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages.max(1),
            bypass_validation: false,
            error_message: None,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn review_page(&self) -> u32 {
        self.total_pages.saturating_add(1)
    }

    pub fn is_review(&self) -> bool {
        self.current_page == self.review_page()
    }

    pub fn is_last_data_page(&self) -> bool {
        self.current_page == self.total_pages
    }

    pub fn bypass_validation(&self) -> bool {
        self.bypass_validation
    }

    pub fn set_bypass_validation(&mut self, bypass: bool) {
        self.bypass_validation = bypass;
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Move forward one page (or into review) if `page_valid` or bypassed.
    pub fn advance(&mut self, page_valid: bool) -> Transition {
        if self.is_review() {
            return Transition::Unchanged;
        }
        if !(page_valid || self.bypass_validation) {
            debug!(page = self.current_page, "advance blocked by validation");
            self.error_message = Some(INCOMPLETE_PAGE_MESSAGE.to_string());
            return Transition::Blocked;
        }
        self.move_to(self.current_page + 1)
    }

    pub fn retreat(&mut self) -> Transition {
        if self.current_page <= 1 {
            return Transition::Unchanged;
        }
        self.move_to(self.current_page - 1)
    }

    /// Jump to `page` (typically from the review step) without validating it.
    pub fn edit_section(&mut self, page: u32) -> Transition {
        if page == 0 || page > self.review_page() {
            warn!(page, total = self.total_pages, "edit_section target out of range");
            return Transition::Unchanged;
        }
        self.move_to(page)
    }

    /// Place the cursor on a restored page, clamped into range.
    pub fn restore(&mut self, page: u32) {
        self.current_page = page.clamp(1, self.review_page());
        self.error_message = None;
    }

    fn move_to(&mut self, to: u32) -> Transition {
        let from = self.current_page;
        self.current_page = to;
        self.error_message = None;
        debug!(from, to, "page transition");
        Transition::Moved { from, to }
    }
}
