#![forbid(unsafe_code)]

//! Guard codec.
//!
//! Action segments (icons, pickers) get one zero-width marker spliced
//! immediately before and after their text in the displayed string. The
//! markers give boundary clicks a deterministic owner: a click exactly on
//! the left marker falls to the preceding segment through the mapper's
//! left tie-break, a click strictly inside the marked span activates the
//! action. Markers exist strictly between the raw host text and the
//! integrator's codec — `decode` strips them before `parse` ever runs, and
//! the clean-value accessor never shows them.

use crate::codec::ValueCodec;
use crate::descriptor::SegmentSpec;
use crate::range::{locate_values, splice_markers};
use segfield_core::text::char_to_byte;

/// The zero-width marker character (ZERO WIDTH SPACE).
pub const GUARD: char = '\u{200B}';

/// True when the segment list needs guarding at all.
pub(crate) fn needs_guards(specs: &[SegmentSpec]) -> bool {
    specs.iter().any(SegmentSpec::is_action)
}

/// Format `values` and splice guards around every action segment's text.
pub(crate) fn encode(codec: &dyn ValueCodec, specs: &[SegmentSpec], values: &[String]) -> String {
    let plain = codec.format(values);
    if !needs_guards(specs) {
        return plain;
    }
    let ranges = locate_values(&plain, values);
    let flagged: Vec<bool> = specs.iter().map(SegmentSpec::is_action).collect();
    splice_markers(&plain, &ranges, &flagged, GUARD)
}

/// Strip all guard markers, yielding text safe to hand to `parse`.
#[must_use]
pub fn decode(text: &str) -> String {
    if !text.contains(GUARD) {
        return text.to_owned();
    }
    text.chars().filter(|c| *c != GUARD).collect()
}

/// The externally visible value: action-segment text removed, no guards,
/// trailing whitespace trimmed.
pub(crate) fn clean_value(
    codec: &dyn ValueCodec,
    specs: &[SegmentSpec],
    values: &[String],
) -> String {
    let plain = codec.format(values);
    let mut out = plain.clone();
    let ranges = locate_values(&plain, values);
    for (r, _) in ranges
        .iter()
        .zip(specs)
        .rev()
        .filter(|(_, spec)| spec.is_action())
    {
        let start = char_to_byte(&plain, r.start);
        let end = char_to_byte(&plain, r.end);
        out.replace_range(start..end, "");
    }
    out.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::JoinCodec;

    fn date_specs() -> Vec<SegmentSpec> {
        vec![
            SegmentSpec::numeric("yyyy"),
            SegmentSpec::numeric("mm"),
            SegmentSpec::numeric("dd"),
            SegmentSpec::action("\u{1F4C5}"),
        ]
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn test_encode_wraps_action_text() {
        let codec = JoinCodec::new("-");
        let specs = date_specs();
        let values = row(&["2024", "01", "15", "\u{1F4C5}"]);
        let text = encode(&codec, &specs, &values);
        assert_eq!(text, "2024-01-15-\u{200B}\u{1F4C5}\u{200B}");
    }

    #[test]
    fn test_encode_without_actions_is_plain_format() {
        let codec = JoinCodec::new(".");
        let specs = vec![SegmentSpec::numeric("0"), SegmentSpec::numeric("0")];
        let values = row(&["1", "2"]);
        assert_eq!(encode(&codec, &specs, &values), "1.2");
    }

    #[test]
    fn test_decode_strips_all_guards() {
        let text = "15\u{200B}\u{1F4C5}\u{200B}";
        assert_eq!(decode(text), "15\u{1F4C5}");
        assert_eq!(decode("plain"), "plain");
    }

    #[test]
    fn test_round_trip_never_leaks_guards_into_parse() {
        let codec = JoinCodec::new("-");
        let specs = date_specs();
        let values = row(&["2024", "01", "15", "\u{1F4C5}"]);
        let parsed = codec.parse(&decode(&encode(&codec, &specs, &values)));
        assert_eq!(parsed, values);
    }

    #[test]
    fn test_clean_value_drops_action_text_and_trims() {
        let codec = JoinCodec::new(" ");
        let specs = date_specs();
        let values = row(&["2024", "01", "15", "\u{1F4C5}"]);
        assert_eq!(clean_value(&codec, &specs, &values), "2024 01 15");
    }
}
