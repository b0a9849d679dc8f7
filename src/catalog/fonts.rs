use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Font-family display name to stylesheet import URL, plus the selectable families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontCatalog {
    /// Display family name (`Inter`) to import URL.
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
    /// CSS `font-family` values offered by `fontFamily` select controls.
    #[serde(default)]
    pub families: Vec<String>,
}

impl FontCatalog {
    /// The stock font set.
    pub fn builtin() -> Self {
        let imports = [
            (
                "Hanken Grotesk",
                "https://fonts.googleapis.com/css2?family=Hanken+Grotesk:ital,wght@0,100..900;1,100..900&display=swap",
            ),
            (
                "Inter",
                "https://fonts.googleapis.com/css2?family=Inter:wght@400;700;800&display=swap",
            ),
            (
                "Lato",
                "https://fonts.googleapis.com/css2?family=Lato:ital,wght@0,100;0,300;0,400;0,700;0,900;1,100;1,300;1,400;1,700;1,900&display=swap",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let families = [
            "Inter, sans-serif",
            "Lato, sans-serif",
            "Hanken Grotesk, sans-serif",
            "Arial, sans-serif",
            "Georgia, serif",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();

        Self { imports, families }
    }

    /// Import URL for a CSS `font-family` value, keyed by its first family name.
    pub fn import_url(&self, font_family: &str) -> Option<&str> {
        let family = primary_family(font_family);
        self.imports.get(family).map(String::as_str)
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// First comma-separated family of a CSS `font-family` value, trimmed and unquoted.
pub fn primary_family(font_family: &str) -> &str {
    font_family
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
}
