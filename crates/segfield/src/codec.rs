#![forbid(unsafe_code)]

//! Value codec strategy.
//!
//! The integrator supplies the single source of truth for string shape as a
//! [`ValueCodec`]: `format` renders one string per segment into the display
//! text, `parse` splits display text back into one string per segment. The
//! controller relies on `parse(format(values)) == values` for every value
//! row it produces; a codec that breaks this round-trip is a contract error
//! and is only papered over by the resolver's zero-width fallback.
//!
//! [`JoinCodec`] covers the common delimited case (IP addresses, durations,
//! dates); anything fancier is the integrator's codec.

/// Injected format/parse strategy.
pub trait ValueCodec {
    /// Render one string per segment into the display text.
    fn format(&self, values: &[String]) -> String;

    /// Split display text into one string per segment.
    fn parse(&self, text: &str) -> Vec<String>;
}

/// Fields joined by a fixed separator, with an optional literal prefix.
///
/// `JoinCodec::new(".")` formats `["10", "0", "0", "1"]` as `"10.0.0.1"`.
/// The separator must be non-empty and must not occur inside segment
/// values; with an empty separator the whole text parses as one field.
#[derive(Debug, Clone, Default)]
pub struct JoinCodec {
    separator: String,
    prefix: String,
}

impl JoinCodec {
    /// Create a codec joining fields with `separator`.
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            prefix: String::new(),
        }
    }

    /// Set a literal prefix rendered before the first field (builder).
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl ValueCodec for JoinCodec {
    fn format(&self, values: &[String]) -> String {
        let mut out = self.prefix.clone();
        out.push_str(&values.join(&self.separator));
        out
    }

    fn parse(&self, text: &str) -> Vec<String> {
        let body = text.strip_prefix(self.prefix.as_str()).unwrap_or(text);
        if self.separator.is_empty() {
            return vec![body.to_owned()];
        }
        body.split(self.separator.as_str())
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn test_join_round_trip() {
        let codec = JoinCodec::new(".");
        let values = row(&["10", "0", "0", "1"]);
        let text = codec.format(&values);
        assert_eq!(text, "10.0.0.1");
        assert_eq!(codec.parse(&text), values);
    }

    #[test]
    fn test_prefix_round_trip() {
        let codec = JoinCodec::new(":").with_prefix("T");
        let values = row(&["12", "30"]);
        let text = codec.format(&values);
        assert_eq!(text, "T12:30");
        assert_eq!(codec.parse(&text), values);
    }

    #[test]
    fn test_empty_separator_parses_single_field() {
        let codec = JoinCodec::new("");
        assert_eq!(codec.parse("abc"), row(&["abc"]));
    }

    #[test]
    fn test_parse_tolerates_missing_prefix() {
        let codec = JoinCodec::new("-").with_prefix("#");
        assert_eq!(codec.parse("a-b"), row(&["a", "b"]));
    }
}
