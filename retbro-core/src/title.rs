//! Title naming: display names derived from ROM URLs and the lookup keys
//! used for metadata queries.
//!
//! A catalog only stores URLs. Everything shown to the user is derived from
//! the URL's last path segment:
//! ```text
//! https://host/roms/Mega%20Man%20(USA)%20[!].nes
//!                   └──────── segment ────────┘
//! display name:  Mega Man (USA) [!]
//! lookup key:    Mega Man
//! ```

use crate::platform::Platform;

/// One playable title inside a system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    /// Source URL, unique within its system.
    pub url: String,
    /// Name shown in lists, region/revision tags included.
    pub display_name: String,
}

impl Title {
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let display_name = display_name(&url);
        Self { url, display_name }
    }

    /// Cleaned name used for metadata queries.
    pub fn lookup_key(&self) -> String {
        lookup_key(&self.display_name)
    }

    /// Player core hint derived from the URL's extension.
    pub fn platform(&self) -> Platform {
        Platform::from_url(&self.url)
    }
}

/// Final path segment of a URL or path, without query string or fragment.
pub fn last_segment(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    path.rsplit('/').next().unwrap_or(path)
}

/// Derive the display name for a title URL.
///
/// Takes the last path segment, percent-decodes it (left as-is if the
/// escapes do not decode to UTF-8) and removes a single trailing extension.
/// An extension is a final `.` followed by ASCII letters and digits only, so
/// names such as `Super Mario Bros. 3 (USA)` keep their inner dots.
pub fn display_name(url: &str) -> String {
    let segment = last_segment(url);
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    strip_extension(&decoded).to_string()
}

fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => name,
    }
}

/// Derive the metadata lookup key from a display name.
///
/// Removes `[...]` tags (dump flags such as `[!]`, `[b]`) and `(...)` tags
/// (region, revision, language), then collapses runs of whitespace.
/// Distinct titles can share a key (`Tetris (USA)` and `Tetris (Japan)`);
/// such titles share cached metadata.
pub fn lookup_key(display_name: &str) -> String {
    let without_brackets = strip_enclosed(display_name, '[', ']', false);
    let without_parens = strip_enclosed(&without_brackets, '(', ')', true);
    without_parens.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every `open ... close` span. An `open` without a matching `close`
/// is kept literally, along with the rest of the string.
fn strip_enclosed(s: &str, open: char, close: char, eat_leading_space: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find(open) {
        let Some(len) = rest[start..].find(close) else {
            break;
        };
        let before = &rest[..start];
        if eat_leading_space {
            out.push_str(before.trim_end());
        } else {
            out.push_str(before);
        }
        rest = &rest[start + len + close.len_utf8()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "tests/title_tests.rs"]
mod tests;
