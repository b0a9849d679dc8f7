use std::fmt;

use serde::{Deserialize, Serialize};

/// Text styling flags stored under the `<name>Styles` companion state key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyles {
    /// Render the text with `font-weight: bold`.
    pub bold: bool,
    /// Render the text with `font-style: italic`.
    pub italic: bool,
    /// Upper-case the text content.
    pub uppercase: bool,
}

impl TextStyles {
    /// Parse a comma separated flag list such as `bold,uppercase`.
    ///
    /// Unknown flags are ignored.
    pub fn from_flags(flags: &str) -> Self {
        let mut out = Self::default();
        for flag in flags.split(',').map(str::trim) {
            match flag {
                "bold" => out.bold = true,
                "italic" => out.italic = true,
                "uppercase" => out.uppercase = true,
                _ => {}
            }
        }
        out
    }
}

/// A single state value.
///
/// State is schema-extensible: any key may hold any variant. Equality is structural and is the
/// only de-duplication the state store performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value (range controls).
    Number(f64),
    /// Boolean flag.
    Bool(bool),
    /// Text value (text, color and select controls).
    Text(String),
    /// Structured text style flags.
    Styles(TextStyles),
}

impl Value {
    /// Borrow the text payload, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value.
    ///
    /// Text is parsed with [`parse_number_prefix`], so `"12px"` reads as `12`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => parse_number_prefix(s),
            _ => None,
        }
    }

    /// Copy the styles payload, if this is a [`Value::Styles`].
    pub fn as_styles(&self) -> Option<TextStyles> {
        match self {
            Self::Styles(s) => Some(*s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => fmt_number(*n, f),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::Styles(s) => {
                let mut flags = Vec::new();
                if s.bold {
                    flags.push("bold");
                }
                if s.italic {
                    flags.push("italic");
                }
                if s.uppercase {
                    flags.push("uppercase");
                }
                f.write_str(&flags.join(","))
            }
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // `-0` is written as `0` in markup.
    if n == 0.0 {
        return f.write_str("0");
    }
    write!(f, "{n}")
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<TextStyles> for Value {
    fn from(v: TextStyles) -> Self {
        Self::Styles(v)
    }
}

/// Parse the longest leading decimal number of `s`, ignoring leading whitespace.
///
/// Returns `None` when no digits lead the string. Trailing garbage such as a unit suffix is
/// ignored.
pub fn parse_number_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    while end < bytes.len() {
        let b = bytes[end];
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }

    // Back off over an incomplete exponent such as `1e` or `1e-`.
    (1..=end)
        .rev()
        .find_map(|len| s[..len].parse::<f64>().ok())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
