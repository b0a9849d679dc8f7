//! frame-maker builds profile-picture frames from SVG templates.
//!
//! A frame's markup carries a `<config>` block describing its editable properties. The engine
//! parses that block into a [`Schema`], keeps property values in a reactive [`StateStore`],
//! writes them back into the markup on every change and rasterizes the result:
//!
//! - Build a [`FrameMakerContext`] (frame, font and palette catalogs)
//! - Create a [`FrameMaker`] over a [`FrameSource`]
//! - Load a frame, drive its [`ControlPanel`] and export the composed avatar
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod catalog;
pub(crate) mod render;
pub(crate) mod schema;
pub(crate) mod session;
pub(crate) mod state;
pub(crate) mod svg;
pub(crate) mod ui;

pub use crate::foundation::error::{FrameError, FrameResult};
pub use crate::foundation::value::{TextStyles, Value, parse_number_prefix};

pub use crate::svg::selector::Selector;
pub use crate::svg::tree::{Descendants, NodeId, SvgDocument};

pub use crate::state::store::{ChangeHandler, StateStore, Subscription, WeakStateStore};

pub use crate::schema::apply::{FONT_FAMILY_KEY, STYLE_BLOCK_MARKER, apply_schema};
pub use crate::schema::model::{
    PropertyDescriptor, PropertyKind, RangeBounds, Schema, TEXT_CONTENT_ATTR, Target,
};
pub use crate::schema::parse::{CONFIG_ELEMENT, OPTIONS_DELIMITER, PROPERTY_ELEMENT, parse_schema};

pub use crate::catalog::fonts::{FontCatalog, primary_family};
pub use crate::catalog::frames::{FrameCatalog, FrameEntry, FrameKind, GRADIENT_STYLE};
pub use crate::catalog::palettes::{DEFAULT_PALETTE, Palettes};

pub use crate::ui::generate::{UiCatalog, generate_ui, sync_ui};
pub use crate::ui::panel::{
    ColorPalette, Control, ControlGroup, ControlPanel, RangeSlider, SelectInput, SelectOption,
    TextInput,
};

pub use crate::render::composite::{compose, decode_image, write_png};
pub use crate::render::raster::Rasterizer;

pub use crate::session::maker::{
    FrameMaker, FrameMakerContext, LoadOutcome, LoadTicket, MakerOpts, SELECTED_FRAME_KEY,
    SVG_CONTENT_KEY,
};
pub use crate::session::source::{FrameSource, FsFrameSource, MemoryFrameSource};
