//! Abstract UI keys and their native (GLFW) key codes.
//!
//! The key-down table in [`InputState`](crate::InputState) is indexed by
//! native code, so its size must cover every code the host can deliver.
//! GLFW's highest key code is `GLFW_KEY_LAST` (348); the table rounds that
//! up to [`KEY_TABLE_SIZE`].

/// Number of entries in the key-down table. Valid native codes are
/// `0..KEY_TABLE_SIZE`; anything outside is dropped by the bridge.
pub const KEY_TABLE_SIZE: usize = 512;

/// Native GLFW key codes used by [`KeyMap::glfw`].
pub mod glfw {
    #![allow(missing_docs)]

    pub const KEY_SPACE: i32 = 32;
    pub const KEY_0: i32 = 48;
    pub const KEY_9: i32 = 57;
    pub const KEY_A: i32 = 65;
    pub const KEY_C: i32 = 67;
    pub const KEY_V: i32 = 86;
    pub const KEY_X: i32 = 88;
    pub const KEY_Y: i32 = 89;
    pub const KEY_Z: i32 = 90;
    pub const KEY_ESCAPE: i32 = 256;
    pub const KEY_ENTER: i32 = 257;
    pub const KEY_TAB: i32 = 258;
    pub const KEY_BACKSPACE: i32 = 259;
    pub const KEY_INSERT: i32 = 260;
    pub const KEY_DELETE: i32 = 261;
    pub const KEY_RIGHT: i32 = 262;
    pub const KEY_LEFT: i32 = 263;
    pub const KEY_DOWN: i32 = 264;
    pub const KEY_UP: i32 = 265;
    pub const KEY_PAGE_UP: i32 = 266;
    pub const KEY_PAGE_DOWN: i32 = 267;
    pub const KEY_HOME: i32 = 268;
    pub const KEY_END: i32 = 269;
    pub const KEY_F1: i32 = 290;
    pub const KEY_F12: i32 = 301;
    pub const KEY_KP_ENTER: i32 = 335;
    pub const KEY_LAST: i32 = 348;
}

/// Keys the UI context gives meaning to (navigation, editing, shortcuts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiKey {
    /// Tab (focus navigation).
    Tab,
    /// Left arrow.
    LeftArrow,
    /// Right arrow.
    RightArrow,
    /// Up arrow.
    UpArrow,
    /// Down arrow.
    DownArrow,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Backspace.
    Backspace,
    /// Space.
    Space,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Keypad enter.
    KeypadEnter,
    /// A (select all).
    A,
    /// C (copy).
    C,
    /// V (paste).
    V,
    /// X (cut).
    X,
    /// Y (redo).
    Y,
    /// Z (undo).
    Z,
}

impl UiKey {
    /// Number of abstract keys.
    pub const COUNT: usize = 22;

    /// Every abstract key, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Tab,
        Self::LeftArrow,
        Self::RightArrow,
        Self::UpArrow,
        Self::DownArrow,
        Self::PageUp,
        Self::PageDown,
        Self::Home,
        Self::End,
        Self::Insert,
        Self::Delete,
        Self::Backspace,
        Self::Space,
        Self::Enter,
        Self::Escape,
        Self::KeypadEnter,
        Self::A,
        Self::C,
        Self::V,
        Self::X,
        Self::Y,
        Self::Z,
    ];

    /// The egui key this abstract key is reported as.
    ///
    /// egui has no separate keypad enter; it shares [`egui::Key::Enter`].
    pub fn to_egui(self) -> egui::Key {
        use egui::Key;
        match self {
            Self::Tab => Key::Tab,
            Self::LeftArrow => Key::ArrowLeft,
            Self::RightArrow => Key::ArrowRight,
            Self::UpArrow => Key::ArrowUp,
            Self::DownArrow => Key::ArrowDown,
            Self::PageUp => Key::PageUp,
            Self::PageDown => Key::PageDown,
            Self::Home => Key::Home,
            Self::End => Key::End,
            Self::Insert => Key::Insert,
            Self::Delete => Key::Delete,
            Self::Backspace => Key::Backspace,
            Self::Space => Key::Space,
            Self::Enter | Self::KeypadEnter => Key::Enter,
            Self::Escape => Key::Escape,
            Self::A => Key::A,
            Self::C => Key::C,
            Self::V => Key::V,
            Self::X => Key::X,
            Self::Y => Key::Y,
            Self::Z => Key::Z,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Mapping from [`UiKey`] to native key codes.
///
/// Built once when a [`UiContext`](crate::UiContext) is created and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    codes: [i32; UiKey::COUNT],
}

impl KeyMap {
    /// The GLFW key map used by the host toolkit.
    pub fn glfw() -> Self {
        use glfw::*;

        let mut codes = [-1; UiKey::COUNT];
        let pairs = [
            (UiKey::Tab, KEY_TAB),
            (UiKey::LeftArrow, KEY_LEFT),
            (UiKey::RightArrow, KEY_RIGHT),
            (UiKey::UpArrow, KEY_UP),
            (UiKey::DownArrow, KEY_DOWN),
            (UiKey::PageUp, KEY_PAGE_UP),
            (UiKey::PageDown, KEY_PAGE_DOWN),
            (UiKey::Home, KEY_HOME),
            (UiKey::End, KEY_END),
            (UiKey::Insert, KEY_INSERT),
            (UiKey::Delete, KEY_DELETE),
            (UiKey::Backspace, KEY_BACKSPACE),
            (UiKey::Space, KEY_SPACE),
            (UiKey::Enter, KEY_ENTER),
            (UiKey::Escape, KEY_ESCAPE),
            (UiKey::KeypadEnter, KEY_KP_ENTER),
            (UiKey::A, KEY_A),
            (UiKey::C, KEY_C),
            (UiKey::V, KEY_V),
            (UiKey::X, KEY_X),
            (UiKey::Y, KEY_Y),
            (UiKey::Z, KEY_Z),
        ];
        for (key, code) in pairs {
            codes[key.index()] = code;
        }
        Self { codes }
    }

    /// Native code for an abstract key.
    pub fn native_code(&self, key: UiKey) -> i32 {
        self.codes[key.index()]
    }

    /// Abstract key bound to a native code, if any.
    pub fn ui_key(&self, native: i32) -> Option<UiKey> {
        UiKey::ALL
            .into_iter()
            .find(|key| self.codes[key.index()] == native)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::glfw()
    }
}
