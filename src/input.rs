//! Keyboard input handling.
//!
//! Maps terminal key events to [`Action`]s.  Adding a new keybinding is a
//! single match arm in the [`From<KeyEvent>`] impl.
//!
//! [`handle_key_event`] applies the actions that only touch [`App`] state.
//! Fetching and opening links reach outside the app (runtime, browser), so
//! those are handed back to the main loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

/// Lines moved per page scroll.
pub const PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSource,
    PrevSource,
    Fetch,
    ScrollDown(u16),
    ScrollUp(u16),
    ScrollTop,
    ScrollBottom,
    /// Open the link of the given displayed entry (0-based).
    OpenLink(usize),
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        // Only react to presses so each physical keypress is one action.
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Down | KeyCode::Char('j') => Action::NextSource,
            KeyCode::Up | KeyCode::Char('k') => Action::PrevSource,
            KeyCode::Enter | KeyCode::Char('f') => Action::Fetch,
            KeyCode::PageDown => Action::ScrollDown(PAGE),
            KeyCode::PageUp => Action::ScrollUp(PAGE),
            KeyCode::Char('J') => Action::ScrollDown(1),
            KeyCode::Char('K') => Action::ScrollUp(1),
            KeyCode::Home | KeyCode::Char('g') => Action::ScrollTop,
            KeyCode::End | KeyCode::Char('G') => Action::ScrollBottom,
            KeyCode::Char('0') => Action::OpenLink(9),
            KeyCode::Char(c @ '1'..='9') => Action::OpenLink(c as usize - '1' as usize),
            _ => Action::None,
        }
    }
}

/// Process a single key event and return the action it mapped to.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    let action = Action::from(key);
    match action {
        Action::Quit => app.quit = true,
        Action::NextSource => app.select_next(),
        Action::PrevSource => app.select_previous(),
        Action::ScrollDown(n) => app.scroll_down(n),
        Action::ScrollUp(n) => app.scroll_up(n),
        Action::ScrollTop => app.scroll_top(),
        Action::ScrollBottom => app.scroll_bottom(),
        Action::Fetch | Action::OpenLink(_) | Action::None => {}
    }
    action
}
