#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! The controller does not talk to a real UI toolkit. The host adapter
//! translates whatever its toolkit produces into these types and forwards
//! them, then honors the returned [`KeyDisposition`]. All types derive
//! `Clone`, `PartialEq`, and `Eq` for use in tests and pattern matching.

use bitflags::bitflags;

/// A keyboard event as delivered by the host widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Super/Meta/Cmd modifier is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }
}

/// Key codes the controller reacts to.
///
/// Anything the host cannot express with these should not be forwarded;
/// the controller would report it [`KeyDisposition::Ignored`] anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event inside the text field.
///
/// `caret` is the char offset the host resolved for the hit. `column` is the
/// visual column of the hit when the host can report one; the controller
/// falls back to it for a click that raced placeholder materialization,
/// where the reported caret was computed against the previously empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    /// Char offset of the caret the host placed for this hit.
    pub caret: usize,

    /// Visual column of the hit, if the host can resolve one.
    pub column: Option<usize>,
}

impl PointerEvent {
    /// Create a pointer event from a caret offset.
    #[must_use]
    pub const fn new(caret: usize) -> Self {
        Self {
            caret,
            column: None,
        }
    }

    /// Attach the visual column of the hit.
    #[must_use]
    pub const fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

/// What the host should do with the default handling of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyDisposition {
    /// The controller handled the key; cancel the host default (text
    /// insertion, focus traversal, caret movement).
    Consumed,

    /// The controller did not handle the key; let the host default run.
    /// This is how Tab leaves the field at either end and how Enter
    /// reaches a surrounding form.
    Ignored,
}

impl KeyDisposition {
    /// True when the host default must be cancelled.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed)
    }
}
