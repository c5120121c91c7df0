//! Settings as a Rust expression.
//!
//! The parent embeds the result of [`serialize`] in the generated entry point;
//! compiled in the child, the expression evaluates to a `Settings` equal to the
//! one serialized.
use std::fmt::Write;

use crate::config::settings::{SettingValue, Settings};
use crate::kernel::constants::CORE_CRATE_NAME;

/// Renders `settings` as a Rust expression of type `yep_core::config::Settings`.
///
/// Entries come out sorted by key, one per line, so the same settings always
/// produce the same text.
pub fn serialize(settings: &Settings) -> String {
    if settings.is_empty() {
        return format!("{CORE_CRATE_NAME}::config::Settings::new()");
    }

    let mut out = format!("{CORE_CRATE_NAME}::config::Settings::from_entries([\n");
    for (key, value) in settings.iter() {
        // Writing into a String cannot fail
        let _ = writeln!(out, "        ({key:?}, {}),", value_literal(value));
    }
    out.push_str("    ])");
    out
}

fn value_literal(value: &SettingValue) -> String {
    let ty = format!("{CORE_CRATE_NAME}::config::SettingValue");
    match value {
        SettingValue::Bool(b) => format!("{ty}::Bool({b})"),
        SettingValue::Integer(i) => format!("{ty}::Integer({i})"),
        SettingValue::Float(f) => format!("{ty}::Float({})", float_literal(*f)),
        SettingValue::String(s) => format!("{ty}::String(::std::string::String::from({s:?}))"),
    }
}

fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "f64::NAN".to_string()
    } else if f == f64::INFINITY {
        "f64::INFINITY".to_string()
    } else if f == f64::NEG_INFINITY {
        "f64::NEG_INFINITY".to_string()
    } else {
        // Debug keeps a decimal point or exponent, so the literal stays a float
        format!("{f:?}")
    }
}
