#![forbid(unsafe_code)]

//! Host ports.
//!
//! The controller owns no UI. It drives a text-field-like widget through
//! [`TextField`] and schedules its deferred selection work through
//! [`Scheduler`]. Both are implemented by the host adapter; the in-memory
//! implementations behind the `test-helpers` feature stand in for a real
//! widget in tests and benches.
//!
//! All offsets are char offsets into the field's current text.

/// The text-input widget the controller is attached to.
pub trait TextField {
    /// Current full text content.
    fn text(&self) -> String;

    /// Replace the full text content.
    fn set_text(&mut self, text: &str);

    /// Current caret position as a char offset.
    fn caret(&self) -> usize;

    /// Select the char span `[start, end)`.
    fn set_selection(&mut self, start: usize, end: usize);

    /// Set the custom validity message. An empty string clears it, restoring
    /// whatever native validity the host applies on its own.
    fn set_validity_message(&mut self, message: &str);

    /// Apply or clear the marker class used to style an active action
    /// segment. `None` clears.
    fn set_marker_class(&mut self, class: Option<&str>);
}

/// Post-event scheduler port.
///
/// Selection asserted synchronously from inside a focus or click
/// notification would be overwritten by the host's own default caret
/// placement. The controller instead calls [`Scheduler::request_flush`];
/// the host must arrange to call `SegmentedInput::flush_deferred` once its
/// default handling for the current event has run (a zero-delay task on the
/// host event loop, or simply the end of the event dispatch).
pub trait Scheduler {
    /// Arrange for a deferred-work flush after the current host event.
    fn request_flush(&mut self);
}

/// An in-memory [`TextField`] for tests and benches.
///
/// Records the last selection, validity message, and marker class so
/// assertions can observe what a real widget would have been told.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Default)]
pub struct MemoryField {
    text: String,
    caret: usize,
    selection: Option<(usize, usize)>,
    validity: String,
    marker: Option<String>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl MemoryField {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field already holding `text`.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Move the caret, clamped to the text length in chars.
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(crate::text::char_len(&self.text));
    }

    /// Last selection set by the controller, if any.
    #[must_use]
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Current custom validity message ("" = none).
    #[must_use]
    pub fn validity_message(&self) -> &str {
        &self.validity
    }

    /// Current marker class, if any.
    #[must_use]
    pub fn marker_class(&self) -> Option<&str> {
        self.marker.as_deref()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl TextField for MemoryField {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        let len = crate::text::char_len(&self.text);
        self.caret = self.caret.min(len);
        // A real widget drops the selection when its value is replaced.
        self.selection = None;
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Some((start, end));
        self.caret = end;
    }

    fn set_validity_message(&mut self, message: &str) {
        self.validity = message.to_owned();
    }

    fn set_marker_class(&mut self, class: Option<&str>) {
        self.marker = class.map(str::to_owned);
    }
}

/// A [`Scheduler`] that only counts flush requests.
///
/// Tests drive `flush_deferred` by hand after checking the count, which is
/// exactly the contract a real host event loop fulfills.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingScheduler {
    /// Number of flushes requested so far.
    pub requested: usize,
}

#[cfg(any(test, feature = "test-helpers"))]
impl Scheduler for CountingScheduler {
    fn request_flush(&mut self) {
        self.requested += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_field_clamps_caret() {
        let mut field = MemoryField::with_text("abc");
        field.set_caret(10);
        assert_eq!(field.caret(), 3);
    }

    #[test]
    fn test_set_text_drops_selection() {
        let mut field = MemoryField::new();
        field.set_text("hello");
        field.set_selection(1, 3);
        assert_eq!(field.selection(), Some((1, 3)));
        assert_eq!(field.caret(), 3);
        field.set_text("bye");
        assert_eq!(field.selection(), None);
        assert_eq!(field.caret(), 3);
    }

    #[test]
    fn test_counting_scheduler() {
        let mut sched = CountingScheduler::default();
        sched.request_flush();
        sched.request_flush();
        assert_eq!(sched.requested, 2);
    }
}
