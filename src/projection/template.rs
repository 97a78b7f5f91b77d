use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder regex"))
}

/// Substitute `{{ field }}` placeholders from `fields`.
///
/// A placeholder naming an absent field renders as `Unknown field: <name>`.
pub fn render(template: &str, fields: &BTreeMap<String, String>) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match fields.get(name) {
                Some(value) => value.clone(),
                None => unknown_field(name),
            }
        })
        .into_owned()
}

pub fn unknown_field(name: &str) -> String {
    format!("Unknown field: {}", name)
}
