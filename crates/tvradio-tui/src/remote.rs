//! Keyboard → TV remote translation.
//!
//! The focus engine only speaks remote key codes. The terminal stands in for
//! the remote: arrows and Enter map to the shared codes, Esc and Backspace
//! to the configured platform's BACK code.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tvradio_core::focus::{NavigationEvent, RemotePlatform};

/// Host-level keys that never reach the focus engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    Quit,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Remote(u32),
    Host(HostKey),
}

pub fn translate(key: KeyEvent, platform: RemotePlatform) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyInput::Host(HostKey::Quit));
    }
    let event = match key.code {
        KeyCode::Up => NavigationEvent::Up,
        KeyCode::Down => NavigationEvent::Down,
        KeyCode::Left => NavigationEvent::Left,
        KeyCode::Right => NavigationEvent::Right,
        KeyCode::Enter => NavigationEvent::Select,
        KeyCode::Esc | KeyCode::Backspace => NavigationEvent::Back,
        KeyCode::Char('q') => return Some(KeyInput::Host(HostKey::Quit)),
        KeyCode::Char('s') => return Some(KeyInput::Host(HostKey::Stop)),
        _ => return None,
    };
    Some(KeyInput::Remote(platform.code_for(event)))
}
