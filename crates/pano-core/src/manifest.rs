//! Per-location manifest (`./loc/{id}/manifest.json`) and URL helpers.

use crate::constants::{FOOTER_FADE_SECS, LOCATION_ROOT, MANIFEST_FILE};
use crate::fade::FadeOutItem;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("manifest has no panorama image")]
    MissingPanorama,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Manifest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub pano: String,
    #[serde(default)]
    pub sound: Vec<String>,
    /// Seconds; authored either as a number or a numeric string.
    #[serde(rename = "fadeIn", default, deserialize_with = "de_seconds")]
    pub fade_in_secs: f64,
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_json::from_str(text)?;
        if manifest.pano.trim().is_empty() {
            return Err(ManifestError::MissingPanorama);
        }
        Ok(manifest)
    }

    pub fn pano_path(&self, site_id: &str) -> String {
        asset_path(site_id, &self.pano)
    }

    pub fn sound_paths(&self, site_id: &str) -> Vec<String> {
        self.sound.iter().map(|f| asset_path(site_id, f)).collect()
    }

    /// Start-screen text faded out on entry: title and description over the
    /// manifest fade, the footer prompt over a fixed second.
    pub fn fade_out_group(&self) -> Vec<FadeOutItem> {
        vec![
            FadeOutItem {
                element_id: "title",
                duration_secs: self.fade_in_secs,
            },
            FadeOutItem {
                element_id: "description",
                duration_secs: self.fade_in_secs,
            },
            FadeOutItem {
                element_id: "footer",
                duration_secs: FOOTER_FADE_SECS,
            },
        ]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn de_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(s) => parse_leading_float(&s).unwrap_or(0.0),
    })
}

/// Longest numeric prefix after leading whitespace, e.g. `" 2.5s"` → 2.5.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    let mut seen_exp = false;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let sign_ok = i == 0 || (seen_exp && matches!(bytes[i - 1], b'e' | b'E'));
        let allowed = c.is_ascii_digit()
            || (c == b'.' && !seen_exp)
            || ((c == b'-' || c == b'+') && sign_ok)
            || (matches!(c, b'e' | b'E') && !seen_exp && i > 0);
        if !allowed {
            break;
        }
        seen_exp |= matches!(c, b'e' | b'E');
        i += 1;
        end = i;
    }
    // "1e" or "1e+" fall back to the shorter prefix
    (1..=end)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
}

pub fn asset_path(site_id: &str, file_name: &str) -> String {
    format!("{}/{}/{}", LOCATION_ROOT, site_id, file_name)
}

pub fn manifest_url(site_id: &str) -> String {
    asset_path(site_id, MANIFEST_FILE)
}

/// Value of `name` in a `location.search` string. The value runs up to the
/// next `&`, `;`, `#` or the end; `+` means space and `%XX` escapes are decoded.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let key = format!("{}=", name);
    let mut from = 0;
    while let Some(found) = search[from..].find(&key) {
        let at = from + found;
        from = at + key.len();
        let preceded = search[..at]
            .chars()
            .next_back()
            .map(|c| matches!(c, '?' | '&' | '|'))
            .unwrap_or(false);
        if !preceded {
            continue;
        }
        let rest = &search[from..];
        let end = rest
            .find(|c: char| matches!(c, '&' | ';' | '#'))
            .unwrap_or(rest.len());
        if end == 0 {
            continue;
        }
        return percent_decode(&rest[..end].replace('+', " "));
    }
    None
}

/// `%XX` decoding; malformed escapes or invalid UTF-8 give `None`.
pub fn percent_decode(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = text.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
