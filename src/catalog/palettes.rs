use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Palette used when a color property names none (or an unknown one).
pub const DEFAULT_PALETTE: &str = "frame";

/// Named color sets offered by color controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palettes {
    sets: BTreeMap<String, Vec<String>>,
}

impl Palettes {
    /// The stock `frame` and `text` palettes.
    pub fn builtin() -> Self {
        let frame = [
            "#79389F",
            "#467031",
            "#FFFFFF",
            "black",
            "#F5F300",
            "#2ABF21",
            "#00D1FF",
            "#FF7745",
            "#0A66C2",
            "#FFF000",
            "#FF80ED",
            "#7B5804",
            "#00FF00",
            "#FF0000",
            "#00FFFF",
        ];
        let text = ["#FFFFFF", "black", "#79389F", "#467031", "#0A66C2", "#F5F300"];

        let mut sets = BTreeMap::new();
        sets.insert(DEFAULT_PALETTE.to_owned(), to_owned(&frame));
        sets.insert("text".to_owned(), to_owned(&text));
        Self { sets }
    }

    /// Build from explicit sets.
    pub fn from_sets(sets: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            sets: sets.into_iter().collect(),
        }
    }

    /// Colors of a named palette.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    /// Colors for an optional palette name, falling back to [`DEFAULT_PALETTE`].
    pub fn resolve(&self, name: Option<&str>) -> &[String] {
        name.and_then(|n| self.get(n))
            .or_else(|| self.get(DEFAULT_PALETTE))
            .unwrap_or_default()
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self::builtin()
    }
}

fn to_owned(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| (*c).to_owned()).collect()
}
