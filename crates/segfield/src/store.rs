#![forbid(unsafe_code)]

//! Segment value store.
//!
//! There is no persisted copy of the per-segment values: every read derives
//! them from the live host text (guards stripped, then `parse`), every
//! write renders them back (`format`, then guards re-spliced). An empty
//! field reads as the placeholder row — the text a focus would materialize.

use crate::codec::ValueCodec;
use crate::descriptor::SegmentSpec;
use crate::guard;
use crate::range::{SegmentRange, locate_values};

/// Borrowed view tying the codec and the segment list together for one
/// read or write.
pub(crate) struct Store<'a> {
    pub(crate) codec: &'a dyn ValueCodec,
    pub(crate) specs: &'a [SegmentSpec],
}

impl Store<'_> {
    /// The placeholder row.
    pub(crate) fn placeholders(&self) -> Vec<String> {
        self.specs
            .iter()
            .map(|s| s.placeholder().to_owned())
            .collect()
    }

    /// Current values derived from `text`.
    pub(crate) fn values(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return self.placeholders();
        }
        self.codec.parse(&guard::decode(text))
    }

    /// Render a value row into display text, guards included.
    pub(crate) fn render(&self, values: &[String]) -> String {
        guard::encode(self.codec, self.specs, values)
    }

    /// Segment spans for the normalized display text derived from `text`.
    pub(crate) fn ranges(&self, text: &str) -> Vec<SegmentRange> {
        let values = self.values(text);
        let normalized = self.render(&values);
        locate_values(&normalized, &values)
    }

    /// The externally visible clean value for `text`.
    pub(crate) fn clean_value(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        guard::clean_value(self.codec, self.specs, &self.values(text))
    }
}
