//! Persistent input state mirrored from host events.
//!
//! The host delivers discrete transitions; egui wants a list of events per
//! frame. [`InputState`] keeps both: the current level of every input
//! (pointer position, button and key tables, modifiers, wheel accumulators,
//! pending text) and the queue of transitions that happened since the last
//! frame, in arrival order. [`InputState::take_frame_input`] drains the
//! per-frame part into an [`egui::RawInput`]; the levels are never reset.

use egui::{Event, Modifiers, MouseWheelUnit, PointerButton, Pos2, RawInput, Vec2};

use crate::event::Mods;
use crate::keymap::{KEY_TABLE_SIZE, UiKey};

/// Factor applied to host scroll deltas before they reach the wheel
/// accumulators.
pub const WHEEL_SCALE: f32 = 0.01;

/// Number of tracked mouse buttons.
pub const MOUSE_BUTTON_COUNT: usize = 3;

/// Index of the left button in the button-down table.
pub const BUTTON_LEFT: usize = 0;
/// Index of the middle button in the button-down table.
pub const BUTTON_MIDDLE: usize = 1;
/// Index of the right button in the button-down table.
pub const BUTTON_RIGHT: usize = 2;

/// Modifier keys held, as the UI sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    /// Control held.
    pub ctrl: bool,
    /// Shift held.
    pub shift: bool,
    /// Alt / Option held.
    pub alt: bool,
    /// Super / Command / Windows key held.
    pub super_key: bool,
}

impl KeyModifiers {
    /// Decode a host modifier mask.
    pub fn from_mods(mods: Mods) -> Self {
        Self {
            ctrl: mods.contains(Mods::CONTROL),
            shift: mods.contains(Mods::SHIFT),
            alt: mods.contains(Mods::ALT),
            super_key: mods.contains(Mods::SUPER),
        }
    }

    /// egui modifiers. `command` follows the platform shortcut key
    /// (Command on macOS, Control elsewhere).
    pub fn to_egui(self) -> Modifiers {
        let mac = cfg!(target_os = "macos");
        Modifiers {
            alt: self.alt,
            ctrl: self.ctrl,
            shift: self.shift,
            mac_cmd: mac && self.super_key,
            command: if mac { self.super_key } else { self.ctrl },
        }
    }
}

/// Input levels plus the transitions queued for the next frame.
#[derive(Debug, Clone)]
pub struct InputState {
    pointer_pos: Pos2,
    mouse_down: [bool; MOUSE_BUTTON_COUNT],
    /// `x` horizontal, `y` vertical, in wheel lines.
    wheel: Vec2,
    modifiers: KeyModifiers,
    keys_down: Box<[bool; KEY_TABLE_SIZE]>,
    pending_text: Vec<char>,
    queued: Vec<Event>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Everything released, pointer at the origin.
    pub fn new() -> Self {
        Self {
            pointer_pos: Pos2::ZERO,
            mouse_down: [false; MOUSE_BUTTON_COUNT],
            wheel: Vec2::ZERO,
            modifiers: KeyModifiers::default(),
            keys_down: Box::new([false; KEY_TABLE_SIZE]),
            pending_text: Vec::new(),
            queued: Vec::new(),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Last pointer position in logical coordinates.
    pub fn pointer_pos(&self) -> Pos2 {
        self.pointer_pos
    }

    /// Whether the button at `index` (see [`BUTTON_LEFT`] etc.) is down.
    /// Out-of-range indices read as released.
    pub fn mouse_down(&self, index: usize) -> bool {
        self.mouse_down.get(index).copied().unwrap_or(false)
    }

    /// The whole button-down table.
    pub fn mouse_buttons(&self) -> [bool; MOUSE_BUTTON_COUNT] {
        self.mouse_down
    }

    /// Wheel accumulated since the last frame (`x` horizontal, `y` vertical).
    pub fn wheel(&self) -> Vec2 {
        self.wheel
    }

    /// Modifier keys as of the last button or key event.
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Whether the native key `code` is down. Codes outside the table read
    /// as released.
    pub fn key_down(&self, code: i32) -> bool {
        table_index(code).is_some_and(|i| self.keys_down[i])
    }

    /// The whole key-down table.
    pub fn keys_down(&self) -> &[bool; KEY_TABLE_SIZE] {
        &self.keys_down
    }

    /// Characters received since the last frame.
    pub fn pending_text(&self) -> &[char] {
        &self.pending_text
    }

    /// Transitions queued for the next frame.
    pub fn queued_events(&self) -> &[Event] {
        &self.queued
    }

    // ── Updates ─────────────────────────────────────────────────────────────

    /// Move the pointer. Consecutive moves collapse into one queued event
    /// at the latest position.
    pub fn set_pointer_pos(&mut self, pos: Pos2) {
        self.pointer_pos = pos;
        if let Some(Event::PointerMoved(last)) = self.queued.last_mut() {
            *last = pos;
        } else {
            self.queued.push(Event::PointerMoved(pos));
        }
    }

    /// Set a button level. Queues a press or release only when the level
    /// actually changes. Out-of-range indices are ignored.
    pub fn set_mouse_down(&mut self, index: usize, down: bool) {
        let Some(slot) = self.mouse_down.get_mut(index) else {
            return;
        };
        if *slot == down {
            return;
        }
        *slot = down;
        self.queued.push(Event::PointerButton {
            pos: self.pointer_pos,
            button: pointer_button(index),
            pressed: down,
            modifiers: self.modifiers.to_egui(),
        });
    }

    /// Force every button up.
    pub fn release_all_buttons(&mut self) {
        for index in 0..MOUSE_BUTTON_COUNT {
            self.set_mouse_down(index, false);
        }
    }

    /// Accumulate a host scroll delta, scaled by [`WHEEL_SCALE`].
    pub fn add_scroll(&mut self, scroll_delta: Vec2) {
        self.wheel += scroll_delta * WHEEL_SCALE;
    }

    /// Replace the modifier state.
    pub fn set_modifiers(&mut self, modifiers: KeyModifiers) {
        self.modifiers = modifiers;
    }

    /// Set a key level. `key` is the abstract key bound to `code`, if any;
    /// only bound keys are forwarded to egui. Returns `false` (and changes
    /// nothing) when `code` is outside the table.
    ///
    /// Modifiers must already be up to date: the queued event carries them,
    /// and a command+C / command+X press is reported as copy / cut.
    pub fn set_key_down(&mut self, code: i32, down: bool, key: Option<UiKey>) -> bool {
        let Some(index) = table_index(code) else {
            return false;
        };
        self.keys_down[index] = down;

        if let Some(key) = key {
            let modifiers = self.modifiers.to_egui();
            let event = match key {
                UiKey::C if down && modifiers.command => Event::Copy,
                UiKey::X if down && modifiers.command => Event::Cut,
                _ => Event::Key {
                    key: key.to_egui(),
                    physical_key: None,
                    pressed: down,
                    repeat: false,
                    modifiers,
                },
            };
            self.queued.push(event);
        }
        true
    }

    /// Queue a text code point in arrival order. Characters typed back to
    /// back share one text event. Invalid scalar values and NUL are dropped;
    /// returns whether the character was queued.
    pub fn push_codepoint(&mut self, codepoint: u32) -> bool {
        let Some(c) = char::from_u32(codepoint).filter(|&c| c != '\0') else {
            return false;
        };
        self.pending_text.push(c);
        if let Some(Event::Text(text)) = self.queued.last_mut() {
            text.push(c);
        } else {
            self.queued.push(Event::Text(c.to_string()));
        }
        true
    }

    // ── Frame bookkeeping ───────────────────────────────────────────────────

    /// Move this frame's transitions into `raw`: queued events (text
    /// included) in arrival order, then the wheel. Clears the queue, the
    /// text and the wheel accumulators; levels are kept.
    pub fn take_frame_input(&mut self, raw: &mut RawInput) {
        let modifiers = self.modifiers.to_egui();
        raw.modifiers = modifiers;
        raw.events.append(&mut self.queued);
        self.pending_text.clear();

        if self.wheel != Vec2::ZERO {
            raw.events.push(Event::MouseWheel {
                unit: MouseWheelUnit::Line,
                delta: self.wheel,
                modifiers,
            });
            self.wheel = Vec2::ZERO;
        }
    }
}

fn table_index(code: i32) -> Option<usize> {
    usize::try_from(code).ok().filter(|&i| i < KEY_TABLE_SIZE)
}

fn pointer_button(index: usize) -> PointerButton {
    match index {
        BUTTON_LEFT => PointerButton::Primary,
        BUTTON_MIDDLE => PointerButton::Middle,
        _ => PointerButton::Secondary,
    }
}
