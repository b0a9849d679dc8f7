use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{FrameError, FrameResult};

/// Frame style whose element colors stay as drawn until the user picks a different color.
pub const GRADIENT_STYLE: &str = "gradient";

/// How a frame's source is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    /// SVG markup carrying an embedded schema.
    Svg,
    /// Plain raster image (PNG, JPEG); no schema.
    #[serde(alias = "image", alias = "png")]
    Raster,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEntry {
    /// Source interpretation.
    #[serde(rename = "type")]
    pub kind: FrameKind,
    /// Source path, relative to the frame source root.
    pub src: String,
    /// Free-form style hint (`solid`, `gradient`).
    #[serde(
        rename = "frameStyle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub frame_style: Option<String>,
}

impl FrameEntry {
    /// SVG entry.
    pub fn svg(src: impl Into<String>) -> Self {
        Self {
            kind: FrameKind::Svg,
            src: src.into(),
            frame_style: None,
        }
    }

    /// Whether the frame keeps its drawn colors (gradients) while a color is at its default.
    pub fn keeps_drawn_colors(&self) -> bool {
        self.frame_style.as_deref() == Some(GRADIENT_STYLE)
    }

    /// Raster entry.
    pub fn raster(src: impl Into<String>) -> Self {
        Self {
            kind: FrameKind::Raster,
            src: src.into(),
            frame_style: None,
        }
    }
}

/// Ordered mapping of frame id to [`FrameEntry`].
///
/// JSON object order is preserved; it is the gallery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameCatalog {
    frames: IndexMap<String, FrameEntry>,
}

impl FrameCatalog {
    /// The stock frames shipped under `assets/`.
    pub fn builtin() -> Self {
        let styled = |src: &str, style: &str| FrameEntry {
            frame_style: Some(style.to_owned()),
            ..FrameEntry::svg(src)
        };
        Self::from_entries([
            (
                "opentowork2",
                styled("frames-svg/open-to-work-800.svg", "solid"),
            ),
            ("hiring", styled("frames-svg/zhiring.svg", GRADIENT_STYLE)),
            ("opentowork", styled("frames-svg/zopen-to.svg", "solid")),
            ("zonehiring", styled("frames-svg/zone-hiring.svg", "solid")),
            (
                "hiringarc",
                styled("frames-svg/hiring-gradient-arc.svg", GRADIENT_STYLE),
            ),
        ])
    }

    /// Build from `(id, entry)` pairs. A repeated id replaces the earlier entry in place.
    pub fn from_entries<S: Into<String>>(entries: impl IntoIterator<Item = (S, FrameEntry)>) -> Self {
        Self {
            frames: entries.into_iter().map(|(id, e)| (id.into(), e)).collect(),
        }
    }

    /// Parse a catalog from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FrameResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FrameError::serde(format!("parse frame catalog JSON: {e}")))
    }

    /// Parse a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FrameError::validation(format!("open frame catalog '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Entry by id.
    pub fn get(&self, id: &str) -> Option<&FrameEntry> {
        self.frames.get(id)
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameEntry)> {
        self.frames.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Frame ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
