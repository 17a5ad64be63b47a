/// Keys the grid reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    F2,
    Char(char),
    Other,
}

/// Modifier state accompanying an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Pointer position in grid coordinates plus click count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub clicks: u32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub const fn click(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            clicks: 1,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn double_click(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            clicks: 2,
            modifiers: Modifiers::NONE,
        }
    }
}

/// Input event routed to the editor provider's trigger predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerClicked(PointerEvent),
    KeyPressed(KeyEvent),
    KeyTyped(char),
}

/// Pointer shape the grid requests from its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    ColResize,
}
