use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use image::RgbaImage;

use crate::catalog::fonts::FontCatalog;
use crate::catalog::frames::{FrameCatalog, FrameKind};
use crate::catalog::palettes::Palettes;
use crate::foundation::error::{FrameError, FrameResult};
use crate::render::composite::{compose, decode_image, write_png};
use crate::render::raster::Rasterizer;
use crate::schema::apply::{FONT_FAMILY_KEY, apply_schema};
use crate::schema::model::{PropertyDescriptor, PropertyKind, Schema, Target};
use crate::schema::parse::parse_schema;
use crate::session::source::FrameSource;
use crate::state::store::{StateStore, Subscription};
use crate::svg::tree::SvgDocument;
use crate::ui::generate::{UiCatalog, generate_ui, sync_ui};
use crate::ui::panel::ControlPanel;

/// State key holding the id of the selected frame.
pub const SELECTED_FRAME_KEY: &str = "selectedFrameId";
/// State key holding the raw markup of the loaded SVG frame.
pub const SVG_CONTENT_KEY: &str = "svgContent";

/// Session options.
#[derive(Debug, Clone)]
pub struct MakerOpts {
    /// Edge length of the square output canvas, in pixels.
    pub canvas_size: u32,
    /// Load system fonts so frame text rasterizes.
    pub load_system_fonts: bool,
}

impl Default for MakerOpts {
    fn default() -> Self {
        Self {
            canvas_size: 800,
            load_system_fonts: true,
        }
    }
}

/// Everything the session is configured with, built once at startup.
#[derive(Debug, Clone)]
pub struct FrameMakerContext {
    /// Frames available for selection.
    pub frames: FrameCatalog,
    /// Font imports and selectable families.
    pub fonts: FontCatalog,
    /// Color palettes.
    pub palettes: Palettes,
    /// Session options.
    pub opts: MakerOpts,
}

impl Default for FrameMakerContext {
    fn default() -> Self {
        Self {
            frames: FrameCatalog::builtin(),
            fonts: FontCatalog::builtin(),
            palettes: Palettes::builtin(),
            opts: MakerOpts::default(),
        }
    }
}

/// An issued frame load, completed by [`FrameMaker::complete_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    /// Selection generation the load belongs to.
    pub generation: u64,
    /// Selected frame id.
    pub frame_id: String,
    /// Catalog source path.
    pub src: String,
    /// How the source is interpreted.
    pub kind: FrameKind,
    /// Color properties at their default leave the drawn colors alone.
    pub keeps_drawn_colors: bool,
}

/// Result of completing a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The frame is now current.
    Applied,
    /// A newer selection was made meanwhile; the result was dropped.
    Discarded,
}

struct RenderSlot {
    schema: Rc<Schema>,
    kind: FrameKind,
    keeps_drawn_colors: bool,
    markup: Option<String>,
    raster: Option<RgbaImage>,
    revision: u64,
}

/// Frame-maker session: owns state, the current schema and the control panel, and keeps the
/// rendered frame in step with state.
///
/// Loading is split in two so an embedder can fetch asynchronously: [`Self::select_frame`]
/// issues a [`LoadTicket`] and [`Self::complete_load`] commits the fetched bytes. Every
/// selection bumps a generation counter; completions from older generations are discarded.
pub struct FrameMaker {
    ctx: Rc<FrameMakerContext>,
    source: Box<dyn FrameSource>,
    store: StateStore,
    panel: ControlPanel,
    generation: u64,
    slot: Rc<RefCell<RenderSlot>>,
    rasterizer: Rc<Rasterizer>,
    subscription: Option<Subscription>,
    photo: Option<RgbaImage>,
}

impl FrameMaker {
    /// Create a session over `ctx`, fetching frames from `source`.
    pub fn new(ctx: FrameMakerContext, source: impl FrameSource + 'static) -> Self {
        let rasterizer = Rc::new(Rasterizer::new(ctx.opts.load_system_fonts));
        Self {
            ctx: Rc::new(ctx),
            source: Box::new(source),
            store: StateStore::default(),
            panel: ControlPanel::new(),
            generation: 0,
            slot: Rc::new(RefCell::new(RenderSlot {
                schema: Rc::new(Schema::default()),
                kind: FrameKind::Svg,
                keeps_drawn_colors: false,
                markup: None,
                raster: None,
                revision: 0,
            })),
            rasterizer,
            subscription: None,
            photo: None,
        }
    }

    /// Session context.
    pub fn context(&self) -> &FrameMakerContext {
        &self.ctx
    }

    /// Session state. Writes to editable properties re-render the frame.
    pub fn state(&self) -> &StateStore {
        &self.store
    }

    /// Schema of the current frame (empty before the first load and for raster frames).
    pub fn schema(&self) -> Rc<Schema> {
        Rc::clone(&self.slot.borrow().schema)
    }

    /// Generated controls.
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// Generated controls, for feeding user input.
    pub fn panel_mut(&mut self) -> &mut ControlPanel {
        &mut self.panel
    }

    /// Current selection generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Id of the selected frame.
    pub fn selected_frame(&self) -> Option<String> {
        self.store
            .get(SELECTED_FRAME_KEY)
            .and_then(|v| v.as_text().map(str::to_owned))
    }

    /// Markup of the last render, with state applied and the config removed.
    pub fn rendered_markup(&self) -> Option<String> {
        self.slot.borrow().markup.clone()
    }

    /// Raster of the current frame at canvas size (SVG) or source size (raster frames).
    pub fn frame_raster(&self) -> Option<RgbaImage> {
        self.slot.borrow().raster.clone()
    }

    /// Number of successful renders so far.
    pub fn render_revision(&self) -> u64 {
        self.slot.borrow().revision
    }

    /// Select frame `id` and issue a load for it.
    ///
    /// [`SELECTED_FRAME_KEY`] is only written once the load commits, so a failed load leaves the
    /// previous frame selected and live.
    pub fn select_frame(&mut self, id: &str) -> FrameResult<LoadTicket> {
        let entry = self
            .ctx
            .frames
            .get(id)
            .ok_or_else(|| FrameError::validation(format!("unknown frame '{id}'")))?;

        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
            frame_id: id.to_owned(),
            src: entry.src.clone(),
            kind: entry.kind,
            keeps_drawn_colors: entry.keeps_drawn_colors(),
        };
        tracing::debug!(frame = id, generation = self.generation, "frame selected");
        Ok(ticket)
    }

    /// Fetch the source of `ticket` from the configured [`FrameSource`].
    pub fn fetch(&self, ticket: &LoadTicket) -> FrameResult<Vec<u8>> {
        self.source.fetch(&ticket.src)
    }

    /// Commit a fetched frame source.
    ///
    /// Stale tickets are discarded without touching state. Fetch errors of a current ticket are
    /// returned as-is. On success the schema is replaced, defaults are seeded, the control panel
    /// is regenerated and the frame is rendered.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        fetched: FrameResult<Vec<u8>>,
    ) -> FrameResult<LoadOutcome> {
        if ticket.generation != self.generation {
            tracing::debug!(
                frame = %ticket.frame_id,
                stale = ticket.generation,
                current = self.generation,
                "discarding stale frame load"
            );
            return Ok(LoadOutcome::Discarded);
        }

        let bytes = fetched.inspect_err(|e| {
            tracing::error!(frame = %ticket.frame_id, error = %e, "frame fetch failed");
        })?;

        match ticket.kind {
            FrameKind::Svg => {
                let (markup, schema) = prepare_svg(bytes)?;
                self.install_svg(markup, schema, ticket.keeps_drawn_colors);
                self.store.set(SELECTED_FRAME_KEY, ticket.frame_id.as_str());
                self.render()?;
            }
            FrameKind::Raster => {
                let raster = decode_image(&bytes)?;
                self.install_raster(raster);
                self.store.set(SELECTED_FRAME_KEY, ticket.frame_id.as_str());
            }
        }

        tracing::info!(
            frame = %ticket.frame_id,
            properties = self.slot.borrow().schema.len(),
            "frame loaded"
        );
        Ok(LoadOutcome::Applied)
    }

    /// Select, fetch and commit frame `id` in one call.
    pub fn load_frame(&mut self, id: &str) -> FrameResult<LoadOutcome> {
        let ticket = self.select_frame(id)?;
        let fetched = self.fetch(&ticket);
        self.complete_load(&ticket, fetched)
    }

    fn install_svg(&mut self, markup: String, schema: Rc<Schema>, keeps_drawn_colors: bool) {
        self.drop_subscription();
        {
            let mut slot = self.slot.borrow_mut();
            slot.schema = Rc::clone(&schema);
            slot.kind = FrameKind::Svg;
            slot.keeps_drawn_colors = keeps_drawn_colors;
            slot.markup = None;
            slot.raster = None;
        }

        self.store.set(SVG_CONTENT_KEY, markup);
        self.store.seed(schema.defaults());
        self.subscription = Some(self.subscribe_renders(&schema));

        generate_ui(&schema, &self.store, &mut self.panel, ui_catalog(&self.ctx));
        sync_ui(&schema, &self.store, &mut self.panel);
    }

    fn install_raster(&mut self, raster: RgbaImage) {
        self.drop_subscription();
        {
            let mut slot = self.slot.borrow_mut();
            slot.schema = Rc::new(Schema::default());
            slot.kind = FrameKind::Raster;
            slot.keeps_drawn_colors = false;
            slot.markup = None;
            slot.raster = Some(raster);
            slot.revision += 1;
        }
        self.store.set(SVG_CONTENT_KEY, "");

        let empty = Schema::default();
        generate_ui(&empty, &self.store, &mut self.panel, ui_catalog(&self.ctx));
    }

    fn drop_subscription(&mut self) {
        if let Some(sub) = self.subscription.take() {
            self.store.unsubscribe(sub);
        }
    }

    /// Re-render whenever a property of `schema` (or a text style companion) changes.
    fn subscribe_renders(&self, schema: &Schema) -> Subscription {
        let mut names: Vec<String> = schema.names().map(str::to_owned).collect();
        names.extend(
            schema
                .iter()
                .filter(|p| p.kind == PropertyKind::Text && p.writes_text_content())
                .map(|p| p.styles_key()),
        );
        if schema.get(FONT_FAMILY_KEY).is_none() {
            names.push(FONT_FAMILY_KEY.to_owned());
        }

        let slot = Rc::downgrade(&self.slot);
        let store = self.store.downgrade();
        let ctx = Rc::clone(&self.ctx);
        let rasterizer = Rc::clone(&self.rasterizer);

        self.store.subscribe(names, move |name, _, _| {
            let (Some(slot), Some(store)) = (slot.upgrade(), store.upgrade()) else {
                return;
            };
            let Ok(mut slot) = slot.try_borrow_mut() else {
                tracing::debug!(property = name, "render already in progress, skipping");
                return;
            };
            if let Err(e) = render_into(&mut slot, &store, &ctx, &rasterizer) {
                tracing::error!(property = name, error = %e, "re-render failed");
            }
        })
    }

    /// Apply current state to the frame and rasterize it.
    pub fn render(&self) -> FrameResult<()> {
        let mut slot = self.slot.borrow_mut();
        render_into(&mut slot, &self.store, &self.ctx, &self.rasterizer)
    }

    /// Set the user photo from encoded bytes.
    pub fn set_photo(&mut self, bytes: &[u8]) -> FrameResult<()> {
        self.photo = Some(decode_image(bytes)?);
        Ok(())
    }

    /// Remove the user photo.
    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    /// Photo with the current frame on top, at canvas size.
    pub fn compose(&self) -> RgbaImage {
        let slot = self.slot.borrow();
        compose(
            self.ctx.opts.canvas_size,
            self.photo.as_ref(),
            slot.raster.as_ref(),
        )
    }

    /// Write [`Self::compose`] to `path` as a PNG.
    pub fn export_png(&self, path: impl AsRef<Path>) -> FrameResult<()> {
        let path = path.as_ref();
        write_png(&self.compose(), path)?;
        tracing::info!(path = %path.display(), "exported avatar");
        Ok(())
    }
}

/// Element color still at its default, so a gradient frame keeps whatever the markup draws.
fn color_at_default(prop: &PropertyDescriptor, store: &StateStore) -> bool {
    prop.kind == PropertyKind::Color
        && matches!(prop.target, Target::Element(_))
        && store.get(&prop.name).is_none_or(|v| v == prop.default_value)
}

/// Decode and parse an SVG frame source without touching the session.
fn prepare_svg(bytes: Vec<u8>) -> FrameResult<(String, Rc<Schema>)> {
    let markup = String::from_utf8(bytes)
        .map_err(|e| FrameError::parse(format!("frame source is not utf-8: {e}")))?;
    let doc = SvgDocument::parse(&markup)?;
    let schema = Rc::new(parse_schema(&doc));
    Ok((markup, schema))
}

fn ui_catalog(ctx: &FrameMakerContext) -> UiCatalog<'_> {
    UiCatalog {
        palettes: &ctx.palettes,
        fonts: &ctx.fonts,
    }
}

fn render_into(
    slot: &mut RenderSlot,
    store: &StateStore,
    ctx: &FrameMakerContext,
    rasterizer: &Rasterizer,
) -> FrameResult<()> {
    if slot.kind != FrameKind::Svg {
        return Ok(());
    }
    let Some(markup) = store
        .get(SVG_CONTENT_KEY)
        .and_then(|v| v.as_text().map(str::to_owned))
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    // The stored markup still carries the config block; apply to a fresh parse every time.
    let mut doc = SvgDocument::parse(&markup)?;
    if slot.keeps_drawn_colors {
        let schema = slot.schema.filtered(|p| !color_at_default(p, store));
        apply_schema(&mut doc, &schema, store, &ctx.fonts);
    } else {
        apply_schema(&mut doc, &slot.schema, store, &ctx.fonts);
    }
    let applied = doc.to_markup();

    let size = ctx.opts.canvas_size;
    let raster = rasterizer.rasterize(&applied, size, size)?;

    slot.markup = Some(applied);
    slot.raster = Some(raster);
    slot.revision += 1;
    tracing::trace!(revision = slot.revision, "frame rendered");
    Ok(())
}
