//! Translate baseview input events into rackui host events.
//!
//! The widget expects what a GLFW-based host delivers: logical cursor
//! positions, GLFW button numbers, GLFW key codes and modifier masks, and
//! text as separate code points. baseview already reports logical cursor
//! positions, so no rescaling happens here.

use baseview::{MouseButton as BvMouseButton, MouseEvent, ScrollDelta};
use egui::{Pos2, Vec2};
use keyboard_types::{Code, Key, KeyState, KeyboardEvent, Modifiers as KbModifiers};
use rackui_core::keymap::glfw;
use rackui_core::{
    Action, ButtonEvent, DragHoverEvent, DragLeaveEvent, HoverEvent, HoverScrollEvent, Mods,
    MouseButton, SelectKeyEvent, SelectTextEvent,
};

/// Host-side scroll units per wheel line (the widget scales by 0.01).
const SCROLL_PER_LINE: f32 = 100.0;

/// baseview pixel deltas per wheel line.
const PIXELS_PER_LINE: f32 = 24.0;

/// One event in the widget's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer moved with no button held.
    Hover(HoverEvent),
    /// Pointer moved while a button is held.
    DragHover(DragHoverEvent),
    /// Pointer left the window.
    DragLeave(DragLeaveEvent),
    /// Wheel or trackpad scroll.
    Scroll(HoverScrollEvent),
    /// Mouse button transition.
    Button(ButtonEvent),
    /// Key transition.
    Key(SelectKeyEvent),
    /// Typed character.
    Text(SelectTextEvent),
}

/// Stateful translator; remembers held buttons to tell hover from drag.
#[derive(Debug, Default)]
pub struct Translator {
    held: u32,
    last_pos: Option<Pos2>,
}

impl Translator {
    /// Create a translator with no buttons held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any mouse button is currently held.
    pub fn dragging(&self) -> bool {
        self.held != 0
    }

    /// Translate a baseview [`MouseEvent`], appending to `out`.
    pub fn mouse(&mut self, event: &MouseEvent, out: &mut Vec<HostEvent>) {
        match event {
            MouseEvent::CursorMoved { position, .. } => {
                let pos = Pos2::new(position.x as f32, position.y as f32);
                self.last_pos = Some(pos);
                // Absolute positions: the motion delta is already applied.
                if self.dragging() {
                    out.push(HostEvent::DragHover(DragHoverEvent {
                        pos,
                        mouse_delta: Vec2::ZERO,
                    }));
                } else {
                    out.push(HostEvent::Hover(HoverEvent {
                        pos,
                        mouse_delta: Vec2::ZERO,
                    }));
                }
            }

            MouseEvent::ButtonPressed { button, modifiers } => {
                let button = map_mouse_button(*button);
                self.held |= button_bit(button);
                out.push(HostEvent::Button(ButtonEvent {
                    button,
                    action: Action::Press,
                    mods: map_modifiers(*modifiers),
                }));
            }

            MouseEvent::ButtonReleased { button, modifiers } => {
                let button = map_mouse_button(*button);
                self.held &= !button_bit(button);
                out.push(HostEvent::Button(ButtonEvent {
                    button,
                    action: Action::Release,
                    mods: map_modifiers(*modifiers),
                }));
            }

            MouseEvent::WheelScrolled { delta, .. } => {
                let lines = match delta {
                    ScrollDelta::Lines { x, y } => Vec2::new(*x, *y),
                    ScrollDelta::Pixels { x, y } => Vec2::new(*x, *y) / PIXELS_PER_LINE,
                };
                out.push(HostEvent::Scroll(HoverScrollEvent {
                    scroll_delta: lines * SCROLL_PER_LINE,
                }));
            }

            MouseEvent::CursorLeft => {
                self.held = 0;
                out.push(HostEvent::DragLeave(DragLeaveEvent));
            }

            _ => {}
        }
    }

    /// Last cursor position seen, in logical coordinates.
    pub fn last_pos(&self) -> Option<Pos2> {
        self.last_pos
    }
}

/// Translate a keyboard event, appending a key transition for mapped
/// physical keys and text for printable characters.
///
/// Text is only produced on key-down without Ctrl or Meta held, so command
/// shortcuts never type their letter.
pub fn keyboard(event: &KeyboardEvent, out: &mut Vec<HostEvent>) {
    let mods = map_modifiers(event.modifiers);

    if let Some(key) = glfw_key(event.code) {
        let action = match (event.state, event.repeat) {
            (KeyState::Down, false) => Action::Press,
            (KeyState::Down, true) => Action::Repeat,
            (KeyState::Up, _) => Action::Release,
        };
        out.push(HostEvent::Key(SelectKeyEvent { key, action, mods }));
    }

    if event.state == KeyState::Down
        && !event.modifiers.intersects(KbModifiers::CONTROL | KbModifiers::META)
    {
        if let Key::Character(text) = &event.key {
            out.extend(
                text.chars()
                    .filter(|c| !c.is_control())
                    .map(|c| HostEvent::Text(SelectTextEvent { codepoint: c as u32 })),
            );
        }
    }
}

/// Map keyboard-types modifier flags to a GLFW modifier mask.
pub fn map_modifiers(mods: KbModifiers) -> Mods {
    let mut out = Mods::NONE;
    if mods.contains(KbModifiers::SHIFT) {
        out |= Mods::SHIFT;
    }
    if mods.contains(KbModifiers::CONTROL) {
        out |= Mods::CONTROL;
    }
    if mods.contains(KbModifiers::ALT) {
        out |= Mods::ALT;
    }
    if mods.contains(KbModifiers::META) {
        out |= Mods::SUPER;
    }
    out
}

/// Map a baseview mouse button to its GLFW-numbered counterpart.
fn map_mouse_button(button: BvMouseButton) -> MouseButton {
    match button {
        BvMouseButton::Left => MouseButton::Left,
        BvMouseButton::Right => MouseButton::Right,
        BvMouseButton::Middle => MouseButton::Middle,
        BvMouseButton::Back => MouseButton::Other(3),
        BvMouseButton::Forward => MouseButton::Other(4),
        BvMouseButton::Other(n) => MouseButton::Other(i32::from(n)),
    }
}

fn button_bit(button: MouseButton) -> u32 {
    let index = match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Other(n) => n.clamp(3, 31),
    };
    1 << index
}

const LETTERS: [Code; 26] = [
    Code::KeyA,
    Code::KeyB,
    Code::KeyC,
    Code::KeyD,
    Code::KeyE,
    Code::KeyF,
    Code::KeyG,
    Code::KeyH,
    Code::KeyI,
    Code::KeyJ,
    Code::KeyK,
    Code::KeyL,
    Code::KeyM,
    Code::KeyN,
    Code::KeyO,
    Code::KeyP,
    Code::KeyQ,
    Code::KeyR,
    Code::KeyS,
    Code::KeyT,
    Code::KeyU,
    Code::KeyV,
    Code::KeyW,
    Code::KeyX,
    Code::KeyY,
    Code::KeyZ,
];

const DIGITS: [Code; 10] = [
    Code::Digit0,
    Code::Digit1,
    Code::Digit2,
    Code::Digit3,
    Code::Digit4,
    Code::Digit5,
    Code::Digit6,
    Code::Digit7,
    Code::Digit8,
    Code::Digit9,
];

const FUNCTION_KEYS: [Code; 12] = [
    Code::F1,
    Code::F2,
    Code::F3,
    Code::F4,
    Code::F5,
    Code::F6,
    Code::F7,
    Code::F8,
    Code::F9,
    Code::F10,
    Code::F11,
    Code::F12,
];

/// GLFW key code of a physical key, if the widget has a use for it.
pub fn glfw_key(code: Code) -> Option<i32> {
    let offset = |table: &[Code], base: i32| {
        table
            .iter()
            .position(|&c| c == code)
            .map(|i| base + i as i32)
    };

    let named = match code {
        Code::Space => Some(glfw::KEY_SPACE),
        Code::Escape => Some(glfw::KEY_ESCAPE),
        Code::Enter => Some(glfw::KEY_ENTER),
        Code::Tab => Some(glfw::KEY_TAB),
        Code::Backspace => Some(glfw::KEY_BACKSPACE),
        Code::Insert => Some(glfw::KEY_INSERT),
        Code::Delete => Some(glfw::KEY_DELETE),
        Code::ArrowRight => Some(glfw::KEY_RIGHT),
        Code::ArrowLeft => Some(glfw::KEY_LEFT),
        Code::ArrowDown => Some(glfw::KEY_DOWN),
        Code::ArrowUp => Some(glfw::KEY_UP),
        Code::PageUp => Some(glfw::KEY_PAGE_UP),
        Code::PageDown => Some(glfw::KEY_PAGE_DOWN),
        Code::Home => Some(glfw::KEY_HOME),
        Code::End => Some(glfw::KEY_END),
        Code::NumpadEnter => Some(glfw::KEY_KP_ENTER),
        _ => None,
    };

    named
        .or_else(|| offset(&LETTERS, glfw::KEY_A))
        .or_else(|| offset(&DIGITS, glfw::KEY_0))
        .or_else(|| offset(&FUNCTION_KEYS, glfw::KEY_F1))
}
