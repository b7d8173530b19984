#![allow(dead_code)]

//! Shared harness for the integration tests: an in-memory host, fixture
//! configurations, and a notification sink.

use std::cell::RefCell;
use std::rc::Rc;

use segfield::{FieldConfig, FieldNotice, JoinCodec, SegmentSpec, SegmentedInput, ValueCodec};
use segfield_core::{CountingScheduler, MemoryField};

pub const ICON: &str = "\u{1F4C5}";

/// `yyyy-mm-dd📅`: three dash-joined fields with the picker icon appended
/// directly after the day, no separator.
#[derive(Debug, Clone, Default)]
pub struct DateIconCodec;

impl ValueCodec for DateIconCodec {
    fn format(&self, values: &[String]) -> String {
        let icon = values.get(3).map(String::as_str).unwrap_or(ICON);
        format!(
            "{}-{}-{}{icon}",
            values.first().map(String::as_str).unwrap_or(""),
            values.get(1).map(String::as_str).unwrap_or(""),
            values.get(2).map(String::as_str).unwrap_or(""),
        )
    }

    fn parse(&self, text: &str) -> Vec<String> {
        let body = text.strip_suffix(ICON).unwrap_or(text);
        let mut values: Vec<String> = body.splitn(3, '-').map(str::to_owned).collect();
        values.resize(3, String::new());
        values.push(ICON.to_owned());
        values
    }
}

pub type Controller = SegmentedInput<MemoryField, CountingScheduler>;

pub fn attach(config: FieldConfig) -> Controller {
    SegmentedInput::attach(MemoryField::new(), CountingScheduler::default(), config)
        .expect("attach should succeed")
}

/// 24h clock, `hh:mm:ss`.
pub fn clock_config() -> FieldConfig {
    let segments = vec![
        SegmentSpec::numeric("hh").with_min(0.0).with_max(23.0),
        SegmentSpec::numeric("mm").with_min(0.0).with_max(59.0),
        SegmentSpec::numeric("ss").with_min(0.0).with_max(59.0),
    ];
    FieldConfig::new(segments, JoinCodec::new(":"))
}

/// Dotted quad with `0` placeholders.
pub fn ipv4_config() -> FieldConfig {
    let segments = (0..4)
        .map(|_| SegmentSpec::numeric("0").with_min(0.0).with_max(255.0))
        .collect();
    FieldConfig::new(segments, JoinCodec::new("."))
}

/// Date plus a non-selectable picker icon; `activations` counts callback
/// firings.
pub fn date_config(activations: &Rc<RefCell<usize>>) -> FieldConfig {
    let counter = Rc::clone(activations);
    let segments = vec![
        SegmentSpec::numeric("yyyy").with_min(1.0).with_max(9999.0),
        SegmentSpec::numeric("mm").with_min(1.0).with_max(12.0),
        SegmentSpec::numeric("dd").with_min(1.0).with_max(31.0),
        SegmentSpec::action(ICON).on_activate(move || *counter.borrow_mut() += 1),
    ];
    FieldConfig::new(segments, DateIconCodec)
}

/// Subscribe a collecting listener; returns the shared event log.
pub fn record_notices(ctrl: &mut Controller) -> Rc<RefCell<Vec<FieldNotice>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    ctrl.subscribe(move |notice| sink.borrow_mut().push(notice.clone()));
    log
}
