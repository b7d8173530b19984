#![forbid(unsafe_code)]

//! Segment descriptors.
//!
//! One [`SegmentSpec`] per logical field, supplied by the integrator at
//! attach time. The behavior of a segment is dispatched on the
//! [`SegmentKind`] tag; each variant carries only the fields that are
//! meaningful for it.

use std::fmt;

use regex::Regex;

/// Static description of one logical field.
pub struct SegmentSpec {
    /// Seeds increment/decrement when the current value is unparsable.
    pub(crate) default_value: String,
    /// Text shown and considered while the segment is unfilled.
    pub(crate) placeholder: String,
    pub(crate) kind: SegmentKind,
}

/// Behavior tag of a segment.
pub enum SegmentKind {
    /// A number edited by typed digits and Up/Down stepping.
    Numeric(NumericSpec),

    /// Free text; increment/decrement are no-ops.
    Text(TextSpec),

    /// An enumerated value cycled by Up/Down and matched by typed prefix.
    Choice(ChoiceSpec),

    /// Non-editable. Activated by click or (when selectable) Enter.
    Action(ActionSpec),
}

/// Numeric segment parameters.
#[derive(Debug, Clone)]
pub struct NumericSpec {
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    /// Increment granularity. A fractional step marks the segment
    /// decimal-valued, which changes overflow math and output formatting.
    pub(crate) step: f64,
    /// Numeric base. Non-10 values render uppercase.
    pub(crate) radix: u32,
    pub(crate) pattern: Option<Regex>,
    pub(crate) max_length: Option<usize>,
}

/// Text segment parameters.
#[derive(Debug, Clone, Default)]
pub struct TextSpec {
    pub(crate) pattern: Option<Regex>,
    pub(crate) max_length: Option<usize>,
}

/// Choice segment parameters.
#[derive(Debug, Clone, Default)]
pub struct ChoiceSpec {
    pub(crate) options: Vec<String>,
}

/// Action segment parameters.
#[derive(Default)]
pub struct ActionSpec {
    pub(crate) on_activate: Option<Box<dyn FnMut()>>,
    /// Whether keyboard focus/navigation may land on the segment.
    pub(crate) selectable: bool,
}

impl Default for NumericSpec {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            step: 1.0,
            radix: 10,
            pattern: None,
            max_length: None,
        }
    }
}

impl NumericSpec {
    /// True when the step implies decimal-valued editing.
    pub(crate) fn is_decimal(&self) -> bool {
        self.step.fract() != 0.0
    }

    /// Number of decimal places implied by the step (0 for integer steps).
    pub(crate) fn decimal_places(&self) -> usize {
        let rendered = format!("{}", self.step);
        rendered.find('.').map_or(0, |dot| rendered.len() - dot - 1)
    }
}

impl SegmentSpec {
    /// A numeric segment with `default_value` as both default and
    /// placeholder, step 1, radix 10, and no bounds.
    #[must_use]
    pub fn numeric(default_value: impl Into<String>) -> Self {
        let default_value = default_value.into();
        Self {
            placeholder: default_value.clone(),
            default_value,
            kind: SegmentKind::Numeric(NumericSpec::default()),
        }
    }

    /// A free-text segment.
    #[must_use]
    pub fn text(default_value: impl Into<String>) -> Self {
        let default_value = default_value.into();
        Self {
            placeholder: default_value.clone(),
            default_value,
            kind: SegmentKind::Text(TextSpec::default()),
        }
    }

    /// An enumerated segment cycling through `options`.
    #[must_use]
    pub fn choice(
        default_value: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let default_value = default_value.into();
        Self {
            placeholder: default_value.clone(),
            default_value,
            kind: SegmentKind::Choice(ChoiceSpec {
                options: options.into_iter().map(Into::into).collect(),
            }),
        }
    }

    /// A non-editable action segment displaying `text` (an icon, usually).
    #[must_use]
    pub fn action(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            placeholder: text.clone(),
            default_value: text,
            kind: SegmentKind::Action(ActionSpec::default()),
        }
    }

    // --- Builder methods ---

    /// Set the placeholder text (builder). Defaults to the default value.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the numeric lower bound (builder). Numeric segments only.
    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        if let SegmentKind::Numeric(n) = &mut self.kind {
            n.min = Some(min);
        }
        self
    }

    /// Set the numeric upper bound (builder). Numeric segments only.
    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        if let SegmentKind::Numeric(n) = &mut self.kind {
            n.max = Some(max);
        }
        self
    }

    /// Set the increment step (builder). Numeric segments only.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        if let SegmentKind::Numeric(n) = &mut self.kind {
            n.step = step;
        }
        self
    }

    /// Set the numeric base, clamped to 2..=36 (builder). Numeric segments
    /// only.
    #[must_use]
    pub fn with_radix(mut self, radix: u32) -> Self {
        if let SegmentKind::Numeric(n) = &mut self.kind {
            n.radix = radix.clamp(2, 36);
        }
        self
    }

    /// Set the single-character admission pattern (builder). Numeric and
    /// text segments only.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        match &mut self.kind {
            SegmentKind::Numeric(n) => n.pattern = Some(pattern),
            SegmentKind::Text(t) => t.pattern = Some(pattern),
            _ => {}
        }
        self
    }

    /// Cap the typed-character count before auto-advance (builder). Numeric
    /// and text segments only; when absent the cap derives from `max`.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        match &mut self.kind {
            SegmentKind::Numeric(n) => n.max_length = Some(max_length),
            SegmentKind::Text(t) => t.max_length = Some(max_length),
            _ => {}
        }
        self
    }

    /// Allow keyboard focus/navigation to reach this action segment
    /// (builder). Action segments only.
    #[must_use]
    pub fn selectable(mut self, selectable: bool) -> Self {
        if let SegmentKind::Action(a) = &mut self.kind {
            a.selectable = selectable;
        }
        self
    }

    /// Set the activation callback (builder). Action segments only.
    #[must_use]
    pub fn on_activate(mut self, callback: impl FnMut() + 'static) -> Self {
        if let SegmentKind::Action(a) = &mut self.kind {
            a.on_activate = Some(Box::new(callback));
        }
        self
    }

    // --- Accessors ---

    /// The default value.
    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// The placeholder text.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The kind tag.
    #[must_use]
    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    /// True for action segments.
    #[must_use]
    pub fn is_action(&self) -> bool {
        matches!(self.kind, SegmentKind::Action(_))
    }

    /// True when the segment holds user-editable content.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        !self.is_action()
    }

    /// True when keyboard navigation may land on the segment.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        match &self.kind {
            SegmentKind::Action(a) => a.selectable,
            _ => true,
        }
    }
}

impl fmt::Debug for SegmentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentSpec")
            .field("default_value", &self.default_value)
            .field("placeholder", &self.placeholder)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Debug for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => f.debug_tuple("Numeric").field(n).finish(),
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::Choice(c) => f.debug_tuple("Choice").field(c).finish(),
            Self::Action(a) => f.debug_tuple("Action").field(a).finish(),
        }
    }
}

impl fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSpec")
            .field("selectable", &self.selectable)
            .field("on_activate", &self.on_activate.as_ref().map(|_| "..."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_defaults_to_default_value() {
        let seg = SegmentSpec::numeric("00");
        assert_eq!(seg.placeholder(), "00");
        let seg = SegmentSpec::numeric("00").with_placeholder("hh");
        assert_eq!(seg.placeholder(), "hh");
        assert_eq!(seg.default_value(), "00");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(SegmentSpec::numeric("0").is_editable());
        assert!(SegmentSpec::numeric("0").is_navigable());
        let icon = SegmentSpec::action("\u{1F4C5}");
        assert!(icon.is_action());
        assert!(!icon.is_navigable());
        assert!(icon.selectable(true).is_navigable());
    }

    #[test]
    fn test_builders_target_matching_kind_only() {
        let seg = SegmentSpec::action("x").with_max(10.0).with_max_length(2);
        match seg.kind() {
            SegmentKind::Action(a) => assert!(!a.selectable),
            other => panic!("kind changed: {other:?}"),
        }
    }

    #[test]
    fn test_decimal_places_from_step() {
        let mut n = NumericSpec {
            step: 0.1,
            radix: 10,
            ..NumericSpec::default()
        };
        assert!(n.is_decimal());
        assert_eq!(n.decimal_places(), 1);
        n.step = 0.25;
        assert_eq!(n.decimal_places(), 2);
        n.step = 2.0;
        assert!(!n.is_decimal());
        assert_eq!(n.decimal_places(), 0);
    }
}
