#![forbid(unsafe_code)]

//! Edit controller.
//!
//! [`SegmentedInput`] is the state machine behind the segmented field: it
//! owns the host ports, tracks the active segment and the in-progress
//! keystroke buffer, and turns host notifications (focus, blur, click,
//! keydown) into value writes, selection updates, and validity refreshes.
//!
//! Everything here is synchronous except the selection assertion after
//! focus and click, which is deferred through the [`Scheduler`] port so it
//! lands after the host's own default caret placement.

use regex::Regex;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use segfield_core::event::{KeyCode, KeyDisposition, KeyEvent, PointerEvent};
use segfield_core::host::{Scheduler, TextField};

use crate::codec::ValueCodec;
use crate::descriptor::{NumericSpec, SegmentKind, SegmentSpec, TextSpec};
use crate::notify::{FieldNotice, ListenerId, Listeners};
use crate::range::{SegmentRange, segment_at};
use crate::store::Store;
use crate::validity;

/// Default custom-validity message for incomplete values.
pub const DEFAULT_INVALID_MESSAGE: &str = "Value is incomplete.";

/// Attachment-time configuration error. Everything past attachment is a
/// total function: out-of-range indexes clamp, rejected keystrokes are
/// absorbed, codec mismatches fall back to zero-width ranges.
#[derive(Debug, Error)]
pub enum AttachError {
    /// The descriptor list was empty.
    #[error("segment list is empty")]
    NoSegments,

    /// `parse(format(placeholders))` did not yield one value per segment.
    #[error("parse produced {actual} values for {expected} segments")]
    ParseArity {
        /// Number of segment descriptors.
        expected: usize,
        /// Number of values the codec's parse returned.
        actual: usize,
    },
}

/// Attachment configuration.
pub struct FieldConfig {
    segments: Vec<SegmentSpec>,
    codec: Box<dyn ValueCodec>,
    invalid_message: String,
    marker_class: Option<String>,
}

impl FieldConfig {
    /// Configuration over `segments` and `codec` with the default
    /// invalid-state message and no marker class.
    #[must_use]
    pub fn new(segments: Vec<SegmentSpec>, codec: impl ValueCodec + 'static) -> Self {
        Self {
            segments,
            codec: Box::new(codec),
            invalid_message: DEFAULT_INVALID_MESSAGE.to_owned(),
            marker_class: None,
        }
    }

    /// Set the custom-validity message used for incomplete values (builder).
    #[must_use]
    pub fn with_invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = message.into();
        self
    }

    /// Set the CSS marker class applied while an action segment is active
    /// (builder).
    #[must_use]
    pub fn with_marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = Some(class.into());
        self
    }
}

/// The segmented-field controller attached to one host widget.
pub struct SegmentedInput<F: TextField, S: Scheduler> {
    field: F,
    scheduler: S,
    segments: Vec<SegmentSpec>,
    codec: Box<dyn ValueCodec>,
    invalid_message: String,
    marker_class: Option<String>,

    active: usize,
    buffer: String,
    /// Set while placeholder text was just materialized into an empty
    /// field; the next click may carry a caret computed against the old
    /// empty text and falls back to `pending_column`.
    placeholder_materialized: bool,
    pending_column: Option<usize>,
    pending_selection: Option<usize>,

    listeners: Listeners,
    detached: bool,
}

impl<F: TextField, S: Scheduler> std::fmt::Debug for SegmentedInput<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedInput")
            .field("segments", &self.segments)
            .field("invalid_message", &self.invalid_message)
            .field("marker_class", &self.marker_class)
            .field("active", &self.active)
            .field("buffer", &self.buffer)
            .field("placeholder_materialized", &self.placeholder_materialized)
            .field("pending_column", &self.pending_column)
            .field("pending_selection", &self.pending_selection)
            .field("listeners", &self.listeners)
            .field("detached", &self.detached)
            .finish_non_exhaustive()
    }
}

impl<F: TextField, S: Scheduler> SegmentedInput<F, S> {
    /// Attach a controller to `field`.
    ///
    /// Fails fast on configuration errors; existing field text is left
    /// untouched.
    pub fn attach(field: F, scheduler: S, config: FieldConfig) -> Result<Self, AttachError> {
        if config.segments.is_empty() {
            return Err(AttachError::NoSegments);
        }
        let placeholders: Vec<String> = config
            .segments
            .iter()
            .map(|s| s.placeholder().to_owned())
            .collect();
        let parsed = config.codec.parse(&config.codec.format(&placeholders));
        if parsed.len() != config.segments.len() {
            return Err(AttachError::ParseArity {
                expected: config.segments.len(),
                actual: parsed.len(),
            });
        }

        let mut this = Self {
            field,
            scheduler,
            segments: config.segments,
            codec: config.codec,
            invalid_message: config.invalid_message,
            marker_class: config.marker_class,
            active: 0,
            buffer: String::new(),
            placeholder_materialized: false,
            pending_column: None,
            pending_selection: None,
            listeners: Listeners::default(),
            detached: false,
        };
        this.refresh_validity();
        Ok(this)
    }

    // --- Accessors ---

    /// The attached host field.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Mutable access to the attached host field.
    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    /// The scheduler port.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The segment descriptors.
    pub fn segments(&self) -> &[SegmentSpec] {
        &self.segments
    }

    /// Descriptor of segment `index`, if in range.
    pub fn segment_spec(&self, index: usize) -> Option<&SegmentSpec> {
        self.segments.get(index)
    }

    /// Index of the active segment.
    #[must_use]
    pub fn active_segment(&self) -> usize {
        self.active
    }

    /// Current value of segment `index` (clamped).
    #[must_use]
    pub fn segment_value(&self, index: usize) -> String {
        let index = index.min(self.segments.len() - 1);
        self.store()
            .values(&self.field.text())
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    /// Spans of all segments in the normalized displayed text.
    #[must_use]
    pub fn segment_ranges(&self) -> Vec<SegmentRange> {
        self.store().ranges(&self.field.text())
    }

    /// The externally visible value: no guards, no action-segment text,
    /// trailing whitespace trimmed.
    #[must_use]
    pub fn clean_value(&self) -> String {
        self.store().clean_value(&self.field.text())
    }

    // --- Public operations ---

    /// Register a notification listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&FieldNotice) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener. Returns false when the id was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Move segment focus to `index` (clamped) and assert the selection.
    pub fn focus_segment(&mut self, index: usize) {
        if self.detached {
            return;
        }
        self.focus_index(index);
        self.assert_selection();
    }

    /// Write `value` into segment `index` (clamped): reformats, refocuses,
    /// notifies, refreshes validity.
    pub fn set_segment_value(&mut self, index: usize, value: impl Into<String>) {
        if self.detached {
            return;
        }
        let index = index.min(self.segments.len() - 1);
        self.focus_index(index);
        self.commit_value(index, value.into());
        self.assert_selection();
    }

    /// Step the active segment up.
    pub fn increment(&mut self) {
        if !self.detached {
            self.step_active(1);
        }
    }

    /// Step the active segment down.
    pub fn decrement(&mut self) {
        if !self.detached {
            self.step_active(-1);
        }
    }

    /// Apply deferred selection work. The host must call this after its
    /// default handling for the event that triggered
    /// [`Scheduler::request_flush`].
    pub fn flush_deferred(&mut self) {
        if self.detached {
            return;
        }
        if let Some(index) = self.pending_selection.take() {
            self.active = index.min(self.segments.len() - 1);
            self.assert_selection();
        }
    }

    /// Detach: drop all listeners and clear controller-owned host state.
    /// Idempotent.
    pub fn destroy(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.listeners.clear();
        self.pending_selection = None;
        self.pending_column = None;
        self.field.set_validity_message("");
        self.field.set_marker_class(None);
    }

    // --- Host notifications ---

    /// The host field gained focus.
    pub fn notify_focus(&mut self) {
        if self.detached {
            return;
        }
        let text = self.field.text();
        if text.is_empty() {
            self.materialize_placeholders();
        } else {
            // Text may have been set externally, without guards.
            let values = self.store().values(&text);
            let normalized = self.store().render(&values);
            if normalized != text {
                self.field.set_text(&normalized);
            }
        }
        let index = self.active;
        self.emit(FieldNotice::SegmentFocusGained { index });
        self.defer_selection();
    }

    /// The host field lost focus.
    pub fn notify_blur(&mut self) {
        if self.detached {
            return;
        }
        let lost = self.active;
        let text = self.field.text();
        if !text.is_empty() {
            let values = self.store().values(&text);
            let untouched = self
                .segments
                .iter()
                .zip(&values)
                .all(|(spec, value)| spec.is_action() || value == spec.placeholder());
            if untouched {
                // Let the host's native empty-state affordances apply.
                self.field.set_text("");
                self.active = 0;
                self.buffer.clear();
            }
        }
        self.placeholder_materialized = false;
        self.pending_column = None;
        self.pending_selection = None;
        self.field.set_marker_class(None);
        self.refresh_validity();
        self.emit(FieldNotice::SegmentFocusLost { index: lost });
    }

    /// A pointer went down inside the field. Stashes the visual column for
    /// the click that may race placeholder materialization.
    pub fn notify_pointer_down(&mut self, event: &PointerEvent) {
        if self.detached {
            return;
        }
        self.pending_column = event.column;
    }

    /// A click landed inside the field.
    pub fn notify_click(&mut self, event: &PointerEvent) {
        if self.detached {
            return;
        }
        // A click that raced materialization reports a caret computed
        // against the previously empty text; the stashed column is closer
        // to the truth then.
        let offset = if self.placeholder_materialized {
            self.pending_column
                .take()
                .or(event.column)
                .unwrap_or(event.caret)
        } else {
            event.caret
        };
        self.placeholder_materialized = false;
        self.pending_column = None;

        let ranges = self.segment_ranges();
        let index = segment_at(offset as isize, &ranges).min(self.segments.len() - 1);
        let (is_action, selectable) = match &self.segments[index].kind {
            SegmentKind::Action(action) => (true, action.selectable),
            _ => (false, false),
        };

        if is_action {
            // Exclusive-end containment against the unguarded span decides
            // activation; the mapper's inclusive boundaries only decide
            // ownership.
            let inside = ranges
                .get(index)
                .is_some_and(|r| offset >= r.start && offset < r.end);
            if inside {
                self.activate(index);
            }
            if selectable {
                self.focus_index(index);
            } else {
                let target = self.nearest_editable_before(index);
                self.focus_index(target);
            }
        } else {
            self.focus_index(index);
        }
        self.defer_selection();
    }

    /// A key went down while the field was focused. [`KeyDisposition::Consumed`]
    /// means the host must cancel its default handling.
    pub fn notify_key(&mut self, key: &KeyEvent) -> KeyDisposition {
        if self.detached {
            return KeyDisposition::Ignored;
        }
        match key.code {
            KeyCode::Char(c) if !key.ctrl() && !key.alt() && !key.super_key() => {
                self.type_char(c);
                KeyDisposition::Consumed
            }
            KeyCode::Backspace => {
                self.reset_active_to_placeholder();
                KeyDisposition::Consumed
            }
            KeyCode::Up => {
                self.step_active(1);
                KeyDisposition::Consumed
            }
            KeyCode::Down => {
                self.step_active(-1);
                KeyDisposition::Consumed
            }
            KeyCode::Left => {
                if let Some(index) = self.nearest_navigable(self.active, -1) {
                    self.focus_index(index);
                    self.assert_selection();
                }
                KeyDisposition::Consumed
            }
            KeyCode::Right => {
                if let Some(index) = self.nearest_navigable(self.active, 1) {
                    self.focus_index(index);
                    self.assert_selection();
                }
                KeyDisposition::Consumed
            }
            KeyCode::Tab => {
                let dir = if key.shift() { -1 } else { 1 };
                match self.nearest_navigable(self.active, dir) {
                    Some(index) => {
                        self.focus_index(index);
                        self.assert_selection();
                        KeyDisposition::Consumed
                    }
                    // No wraparound: let host focus traversal leave the field.
                    None => KeyDisposition::Ignored,
                }
            }
            KeyCode::Enter => {
                let selectable_action = matches!(
                    &self.segments[self.active].kind,
                    SegmentKind::Action(action) if action.selectable
                );
                if selectable_action {
                    self.activate(self.active);
                    KeyDisposition::Consumed
                } else {
                    KeyDisposition::Ignored
                }
            }
            _ => KeyDisposition::Ignored,
        }
    }

    // --- Internals ---

    fn store(&self) -> Store<'_> {
        Store {
            codec: &*self.codec,
            specs: &self.segments,
        }
    }

    fn emit(&mut self, notice: FieldNotice) {
        self.listeners.emit(&notice);
    }

    fn materialize_placeholders(&mut self) {
        let placeholders = self.store().placeholders();
        let rendered = self.store().render(&placeholders);
        self.field.set_text(&rendered);
        self.placeholder_materialized = true;
        self.refresh_validity();
    }

    fn refresh_validity(&mut self) {
        let text = self.field.text();
        if text.is_empty() {
            self.field.set_validity_message("");
            return;
        }
        let values = self.store().values(&text);
        if validity::is_incomplete(&self.segments, &values) {
            let message = self.invalid_message.clone();
            self.field.set_validity_message(&message);
        } else {
            self.field.set_validity_message("");
        }
    }

    /// Write one value, rerender the field, notify, refresh validity.
    fn commit_value(&mut self, index: usize, value: String) {
        #[cfg(feature = "tracing")]
        self.trace_edit("commit");

        let mut values = self.store().values(&self.field.text());
        while values.len() < self.segments.len() {
            // Best-effort repair of an under-length parse result.
            values.push(self.segments[values.len()].placeholder().to_owned());
        }
        values[index] = value.clone();
        let rendered = self.store().render(&values);
        self.field.set_text(&rendered);

        self.emit(FieldNotice::Input);
        self.emit(FieldNotice::Change);
        self.emit(FieldNotice::SegmentValueChanged { index, value });
        self.refresh_validity();
    }

    fn assert_selection(&mut self) {
        let ranges = self.segment_ranges();
        if let Some(r) = ranges.get(self.active) {
            self.field.set_selection(r.start, r.end);
        }
        let marker = match (&self.marker_class, self.segments[self.active].is_action()) {
            (Some(class), true) => Some(class.as_str()),
            _ => None,
        };
        self.field.set_marker_class(marker);
    }

    fn defer_selection(&mut self) {
        self.pending_selection = Some(self.active);
        self.scheduler.request_flush();
    }

    fn focus_index(&mut self, index: usize) {
        let index = index.min(self.segments.len() - 1);
        if index != self.active {
            let lost = self.active;
            self.emit(FieldNotice::SegmentFocusLost { index: lost });
            self.active = index;
            self.emit(FieldNotice::SegmentFocusGained { index });
        }
        self.buffer.clear();
    }

    fn nearest_navigable(&self, from: usize, dir: isize) -> Option<usize> {
        let mut i = from as isize + dir;
        while i >= 0 && (i as usize) < self.segments.len() {
            if self.segments[i as usize].is_navigable() {
                return Some(i as usize);
            }
            i += dir;
        }
        None
    }

    /// Nearest editable segment before `from`, falling back forward; a
    /// non-selectable action segment never holds focus.
    fn nearest_editable_before(&self, from: usize) -> usize {
        (0..from)
            .rev()
            .find(|&i| self.segments[i].is_editable())
            .or_else(|| (from + 1..self.segments.len()).find(|&i| self.segments[i].is_editable()))
            .unwrap_or(from)
    }

    fn advance_after_commit(&mut self) {
        match self.nearest_navigable(self.active, 1) {
            Some(next) => self.focus_index(next),
            None => self.buffer.clear(),
        }
        self.assert_selection();
    }

    fn activate(&mut self, index: usize) {
        #[cfg(feature = "tracing")]
        self.trace_edit("activate");
        if let SegmentKind::Action(action) = &mut self.segments[index].kind
            && let Some(callback) = action.on_activate.as_mut()
        {
            callback();
        }
    }

    fn reset_active_to_placeholder(&mut self) {
        if self.segments[self.active].is_action() {
            return;
        }
        if self.field.text().is_empty() {
            self.materialize_placeholders();
        }
        let index = self.active;
        let placeholder = self.segments[index].placeholder().to_owned();
        self.buffer.clear();
        self.commit_value(index, placeholder);
        self.assert_selection();
    }

    fn type_char(&mut self, c: char) {
        if self.field.text().is_empty() {
            self.materialize_placeholders();
        }
        self.placeholder_materialized = false;
        self.pending_column = None;

        let active = self.active;
        let snapshot = match &self.segments[active].kind {
            SegmentKind::Action(_) => return,
            SegmentKind::Choice(choice) => KindSnapshot::Choice(choice.options.clone()),
            SegmentKind::Numeric(numeric) => KindSnapshot::Numeric(numeric.clone()),
            SegmentKind::Text(text) => KindSnapshot::Text(text.clone()),
        };

        match snapshot {
            KindSnapshot::Choice(options) => {
                let Some(found) = match_option(&options, c) else {
                    return;
                };
                self.commit_value(active, options[found].clone());
                self.advance_after_commit();
            }
            KindSnapshot::Numeric(numeric) => {
                if !admits(numeric.pattern.as_ref(), c) {
                    return;
                }
                let mut candidate = self.buffer.clone();
                candidate.push(c);
                // An integer buffer that would overflow max is not written:
                // the character is dropped and what is already committed
                // stands.
                if !numeric.is_decimal()
                    && let Some(max) = numeric.max
                    && let Ok(parsed) = i64::from_str_radix(&candidate, numeric.radix)
                    && parsed as f64 > max
                {
                    self.advance_after_commit();
                    return;
                }
                self.buffer = candidate.clone();
                self.commit_value(active, candidate);
                self.assert_selection();
                if should_auto_advance(&numeric, &self.buffer) {
                    self.advance_after_commit();
                }
            }
            KindSnapshot::Text(text) => {
                if !admits(text.pattern.as_ref(), c) {
                    return;
                }
                self.buffer.push(c);
                self.commit_value(active, self.buffer.clone());
                self.assert_selection();
                if let Some(cap) = text.max_length
                    && self.buffer.graphemes(true).count() >= cap
                {
                    self.advance_after_commit();
                }
            }
        }
    }

    fn step_active(&mut self, dir: i64) {
        if self.field.text().is_empty() {
            self.materialize_placeholders();
        }
        let active = self.active;
        let current = self.segment_value(active);
        let rendered = match &self.segments[active].kind {
            SegmentKind::Action(_) | SegmentKind::Text(_) => return,
            SegmentKind::Choice(choice) => {
                let options = &choice.options;
                if options.is_empty() {
                    return;
                }
                let next = match options.iter().position(|o| *o == current) {
                    Some(i) => (i as i64 + dir).rem_euclid(options.len() as i64) as usize,
                    None if dir > 0 => 0,
                    None => options.len() - 1,
                };
                options[next].clone()
            }
            SegmentKind::Numeric(numeric) => {
                let parse = |s: &str| -> Option<f64> {
                    if numeric.radix == 10 {
                        s.trim().parse::<f64>().ok()
                    } else {
                        i64::from_str_radix(s.trim(), numeric.radix)
                            .ok()
                            .map(|v| v as f64)
                    }
                };
                let base = parse(&current)
                    .or_else(|| parse(&self.segments[active].default_value))
                    .unwrap_or(0.0);
                let mut value = base + dir as f64 * numeric.step;
                if let Some(min) = numeric.min {
                    value = value.max(min);
                }
                if let Some(max) = numeric.max {
                    value = value.min(max);
                }
                if numeric.radix != 10 {
                    integer_to_radix(value.round() as i64, numeric.radix)
                } else if numeric.decimal_places() > 0 {
                    format!("{value:.places$}", places = numeric.decimal_places())
                } else {
                    format!("{}", value.round() as i64)
                }
            }
        };
        #[cfg(feature = "tracing")]
        self.trace_edit(if dir > 0 { "increment" } else { "decrement" });
        self.buffer.clear();
        self.commit_value(active, rendered);
        self.assert_selection();
    }

    #[cfg(feature = "tracing")]
    fn trace_edit(&self, operation: &'static str) {
        let _span = tracing::debug_span!(
            "segfield.edit",
            operation,
            active_segment = self.active,
            buffer_len = self.buffer.len()
        )
        .entered();
    }
}

enum KindSnapshot {
    Choice(Vec<String>),
    Numeric(NumericSpec),
    Text(TextSpec),
}

/// Whether typing should move on to the next segment.
///
/// An explicit max length wins outright. Without a max there is no length
/// basis. Decimal segments advance at the display width of the formatted
/// max; integer segments advance at the digit count of max in the radix,
/// or earlier once no further digit could keep the buffer in range.
fn should_auto_advance(spec: &NumericSpec, buffer: &str) -> bool {
    if let Some(cap) = spec.max_length {
        return buffer.graphemes(true).count() >= cap;
    }
    let Some(max) = spec.max else {
        return false;
    };
    if spec.is_decimal() {
        let width = format!("{max:.places$}", places = spec.decimal_places()).len();
        return buffer.chars().count() >= width;
    }
    let width = integer_to_radix(max.floor() as i64, spec.radix).len();
    if buffer.chars().count() >= width {
        return true;
    }
    match i64::from_str_radix(buffer, spec.radix) {
        Ok(value) => value as f64 * f64::from(spec.radix) > max,
        Err(_) => false,
    }
}

/// Render an integer in `radix`, uppercase digits, base 10 unchanged.
fn integer_to_radix(value: i64, radix: u32) -> String {
    if radix == 10 {
        return value.to_string();
    }
    let negative = value < 0;
    let mut rest = value.unsigned_abs();
    let mut digits = Vec::new();
    loop {
        let digit = (rest % u64::from(radix)) as u32;
        digits.push(
            char::from_digit(digit, radix)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('0'),
        );
        rest /= u64::from(radix);
        if rest == 0 {
            break;
        }
    }
    if negative {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

/// Case-insensitive option match; an exact match wins over a prefix match.
fn match_option(options: &[String], c: char) -> Option<usize> {
    let needle: String = c.to_lowercase().collect();
    options
        .iter()
        .position(|option| option.to_lowercase() == needle)
        .or_else(|| {
            options
                .iter()
                .position(|option| option.to_lowercase().starts_with(&needle))
        })
}

/// Single-character admission check; no pattern admits everything.
fn admits(pattern: Option<&Regex>, c: char) -> bool {
    let mut buf = [0u8; 4];
    pattern.is_none_or(|p| p.is_match(c.encode_utf8(&mut buf)))
}
