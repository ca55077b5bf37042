//! Host toolkit events delivered to a [`UiWidget`](crate::UiWidget).
//!
//! The host numbers buttons, actions, modifier bits and key codes the way
//! GLFW does. Positions are widget-local logical coordinates. Hover-class
//! events report the position and the motion delta separately; the bridge
//! adds them together.

use egui::{Pos2, Vec2};

/// Whether the widget kept an event or let it fall through to the host.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The UI consumed the event; the host stops propagating it.
    Captured,
    /// The host should keep dispatching the event to other widgets.
    Ignored,
}

impl EventStatus {
    /// `Captured` when `wanted` is true, `Ignored` otherwise.
    pub fn captured_if(wanted: bool) -> Self {
        if wanted { Self::Captured } else { Self::Ignored }
    }

    /// Whether the event was consumed.
    pub fn is_captured(self) -> bool {
        self == Self::Captured
    }
}

/// Button or key transition, numbered as GLFW numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `GLFW_RELEASE` (0).
    Release,
    /// `GLFW_PRESS` (1).
    Press,
    /// `GLFW_REPEAT` (2).
    Repeat,
}

impl Action {
    /// Decode a raw GLFW action value.
    pub fn from_glfw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Release),
            1 => Some(Self::Press),
            2 => Some(Self::Repeat),
            _ => None,
        }
    }
}

/// Host mouse button, numbered as GLFW numbers them (left 0, right 1, middle 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// `GLFW_MOUSE_BUTTON_LEFT`.
    Left,
    /// `GLFW_MOUSE_BUTTON_RIGHT`.
    Right,
    /// `GLFW_MOUSE_BUTTON_MIDDLE`.
    Middle,
    /// Any extra button (back/forward/…), carrying the raw GLFW number.
    Other(i32),
}

impl MouseButton {
    /// Decode a raw GLFW button number.
    pub fn from_glfw(raw: i32) -> Self {
        match raw {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Middle,
            other => Self::Other(other),
        }
    }
}

bitflags::bitflags! {
    /// GLFW modifier bit mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Mods: i32 {
        /// `GLFW_MOD_SHIFT`.
        const SHIFT = 0x0001;
        /// `GLFW_MOD_CONTROL`.
        const CONTROL = 0x0002;
        /// `GLFW_MOD_ALT`.
        const ALT = 0x0004;
        /// `GLFW_MOD_SUPER`.
        const SUPER = 0x0008;
    }
}

impl Mods {
    /// No modifiers held.
    pub const NONE: Self = Self::empty();

    /// Decode a raw host mask. Bits without a name (caps lock, num lock)
    /// are kept.
    pub fn from_glfw(raw: i32) -> Self {
        Self::from_bits_retain(raw)
    }
}

impl Default for Mods {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer moved over the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverEvent {
    /// Pointer position in widget-local logical coordinates.
    pub pos: Pos2,
    /// Motion since the previous hover event.
    pub mouse_delta: Vec2,
}

/// Pointer moved over the widget while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragHoverEvent {
    /// Pointer position in widget-local logical coordinates.
    pub pos: Pos2,
    /// Motion since the previous drag-hover event.
    pub mouse_delta: Vec2,
}

/// A drag left the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragLeaveEvent;

/// Scroll wheel or trackpad scroll over the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverScrollEvent {
    /// Scroll amount in host units (x horizontal, y vertical).
    pub scroll_delta: Vec2,
}

/// Mouse button pressed or released over the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Which button changed.
    pub button: MouseButton,
    /// Press or release.
    pub action: Action,
    /// Modifiers held at the time of the event.
    pub mods: Mods,
}

/// Key pressed, released or repeated while the widget is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectKeyEvent {
    /// Native (GLFW) key code. May be negative for unknown keys.
    pub key: i32,
    /// Press, release or repeat.
    pub action: Action,
    /// Modifiers held at the time of the event.
    pub mods: Mods,
}

/// Text input while the widget is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectTextEvent {
    /// Unicode code point.
    pub codepoint: u32,
}
