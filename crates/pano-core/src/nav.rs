//! Page navigation glue: the hide-on-scroll header and legacy `#id` links.

use crate::constants::LEGACY_YEAR_FALLBACK;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Next header translation: follows the scroll delta, kept within
/// `[-header_height, 0]` so the header is either fully hidden or in place.
#[inline]
pub fn header_offset(current_offset: f64, scroll_delta: f64, header_height: f64) -> f64 {
    let mut offset = current_offset - scroll_delta;
    if offset < -header_height {
        offset = -header_height;
    }
    if offset > 0.0 {
        offset = 0.0;
    }
    offset
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderScroll {
    last_scroll_top: f64,
}

impl HeaderScroll {
    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }

    /// Returns the new offset in px; overscroll above the top counts as 0.
    pub fn update(&mut self, scroll_top: f64, current_offset: f64, header_height: f64) -> f64 {
        let offset = header_offset(
            current_offset,
            scroll_top - self.last_scroll_top,
            header_height,
        );
        self.last_scroll_top = if scroll_top <= 0.0 { 0.0 } else { scroll_top };
        offset
    }

    pub fn reset(&mut self) {
        self.last_scroll_top = 0.0;
    }
}

/// `translateY(...)` value for the header.
pub fn header_transform(offset: f64) -> String {
    format!("translateY({}px)", offset)
}

/// Item id of a legacy `#id` link, if the hash looks like one.
pub fn legacy_hash_id(hash: &str) -> Option<&str> {
    if hash.is_empty() || hash == "#" {
        return None;
    }
    let id = hash.get(1..)?;
    if id.is_empty() || id.contains('/') || id.contains('?') {
        return None;
    }
    Some(id)
}

/// One entry of the compiled site index. Field types are read the loose way
/// the page script reads them: a falsy `year` is no year and a falsy
/// `locked` is unlocked.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CompiledEntry {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_year")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "de_truthy")]
    pub locked: bool,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn de_truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

fn de_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if !is_truthy(&value) {
        return Ok(None);
    }
    Ok(Some(match value {
        Value::String(s) => s,
        // 2019.0 is written as 2019
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }))
}

/// Entries that don't fit [`CompiledEntry`] are skipped so one bad record
/// doesn't break every legacy link. Only a non-array document is an error.
pub fn parse_compiled_index(text: &str) -> Result<Vec<CompiledEntry>, serde_json::Error> {
    let raw: Vec<Value> = serde_json::from_str(text)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<CompiledEntry>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("[nav] skipping compiled index entry: {}", e);
                None
            }
        })
        .collect())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LegacyRedirect {
    /// `location.replace` target.
    Redirect(String),
    /// Unknown or locked item: drop the hash and stay.
    ClearHash,
}

pub fn resolve_legacy_redirect(entries: &[CompiledEntry], item_id: &str) -> LegacyRedirect {
    match entries.iter().find(|e| e.id == item_id) {
        Some(entry) if !entry.locked => {
            let year = entry.year.as_deref().unwrap_or(LEGACY_YEAR_FALLBACK);
            LegacyRedirect::Redirect(format!("/{}/{}", year, item_id))
        }
        _ => LegacyRedirect::ClearHash,
    }
}
