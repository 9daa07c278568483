use std::time::Instant;

use ratatui::prelude::Size;

use crate::core::catalog::TEMPLATES;
use crate::core::notification::NotificationCenter;

/// Where key presses are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Composer at the bottom of the thread has focus.
    Chat,

    /// The quick-reply template panel is open above the composer.
    Templates,

    /// The settings overlay is open.
    Settings,
}

/// Presentation-only state: focus, cursors, toasts and loop control.
#[derive(Debug)]
pub struct UiState {
    pub mode: UiMode,
    pub template_cursor: usize,
    pub notifications: NotificationCenter,
    pub exit_requested: bool,
    pub last_term_size: Size,
    pub auto_scroll: bool,
    pub scroll_offset: u16,
    pub started_at: Instant,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            mode: UiMode::Chat,
            template_cursor: 0,
            notifications: NotificationCenter::default(),
            exit_requested: false,
            last_term_size: Size::default(),
            auto_scroll: true,
            scroll_offset: 0,
            started_at: Instant::now(),
        }
    }

    pub fn move_template_cursor(&mut self, delta: isize) {
        let len = TEMPLATES.len() as isize;
        let next = (self.template_cursor as isize + delta).rem_euclid(len);
        self.template_cursor = next as usize;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    /// Jump back to the newest message and keep following it.
    pub fn follow_latest(&mut self) {
        self.auto_scroll = true;
    }
}
