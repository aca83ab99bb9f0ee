//! Raw remote key codes.
//!
//! Both supported TV platforms deliver the DOM key codes for the arrow keys
//! and ENTER; they differ only in the code sent by the BACK button.

use serde::{Deserialize, Serialize};

use super::event::NavigationEvent;

pub const KEY_ENTER: u32 = 13;
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
pub const TIZEN_BACK: u32 = 10009;
pub const WEBOS_BACK: u32 = 461;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemotePlatform {
    /// Samsung Tizen remotes.
    #[default]
    Tizen,
    /// LG webOS remotes.
    Webos,
}

impl RemotePlatform {
    pub fn back_code(self) -> u32 {
        match self {
            RemotePlatform::Tizen => TIZEN_BACK,
            RemotePlatform::Webos => WEBOS_BACK,
        }
    }

    /// Map a raw code to an event. Codes this platform does not send
    /// (including the other platform's BACK) are `None`.
    pub fn normalize(self, code: u32) -> Option<NavigationEvent> {
        match code {
            KEY_UP => Some(NavigationEvent::Up),
            KEY_DOWN => Some(NavigationEvent::Down),
            KEY_LEFT => Some(NavigationEvent::Left),
            KEY_RIGHT => Some(NavigationEvent::Right),
            KEY_ENTER => Some(NavigationEvent::Select),
            c if c == self.back_code() => Some(NavigationEvent::Back),
            _ => None,
        }
    }

    /// Inverse of [`normalize`](Self::normalize), used by hosts that
    /// synthesise remote input from another keyboard.
    pub fn code_for(self, event: NavigationEvent) -> u32 {
        match event {
            NavigationEvent::Up => KEY_UP,
            NavigationEvent::Down => KEY_DOWN,
            NavigationEvent::Left => KEY_LEFT,
            NavigationEvent::Right => KEY_RIGHT,
            NavigationEvent::Select => KEY_ENTER,
            NavigationEvent::Back => self.back_code(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RemotePlatform::Tizen => "tizen",
            RemotePlatform::Webos => "webos",
        }
    }
}
