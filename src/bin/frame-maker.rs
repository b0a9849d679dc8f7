use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "frame-maker", version)]
struct Cli {
    /// Tracing filter (`warn`, `frame_maker=debug`, ...).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List frame ids in catalog order.
    Frames(FramesArgs),
    /// Print a frame's parsed schema as JSON.
    Schema(SchemaArgs),
    /// Load a frame, apply overrides and write the composed avatar as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Frame catalog JSON (defaults to the built-in presets).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory frame sources are resolved against.
    #[arg(long, default_value = "assets")]
    root: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Frame catalog JSON (defaults to the built-in presets).
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SchemaArgs {
    /// Frame id.
    #[arg(long)]
    frame: String,

    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Frame id.
    #[arg(long)]
    frame: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Property override, routed through the property's control (repeatable).
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    overrides: Vec<(String, String)>,

    /// Text styles for a text property, e.g. `frame-text=bold,uppercase` (repeatable).
    #[arg(long = "text-style", value_name = "NAME=FLAGS", value_parser = parse_key_val)]
    text_styles: Vec<(String, String)>,

    /// Photo placed under the frame.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Output edge length in pixels.
    #[arg(long, default_value_t = 800)]
    size: u32,

    /// Also write the applied frame markup here.
    #[arg(long)]
    markup_out: Option<PathBuf>,

    /// Skip loading system fonts (frame text will not rasterize).
    #[arg(long)]
    no_system_fonts: bool,

    #[command(flatten)]
    catalog: CatalogArgs,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (k, v) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if k.is_empty() {
        return Err(format!("empty property name in '{raw}'"));
    }
    Ok((k.to_owned(), v.to_owned()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Schema(args) => cmd_schema(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("parse log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn read_catalog(path: Option<&Path>) -> anyhow::Result<frame_maker::FrameCatalog> {
    match path {
        Some(path) => frame_maker::FrameCatalog::from_path(path)
            .with_context(|| format!("load frame catalog '{}'", path.display())),
        None => Ok(frame_maker::FrameCatalog::builtin()),
    }
}

fn make_maker(
    catalog: &CatalogArgs,
    opts: frame_maker::MakerOpts,
) -> anyhow::Result<frame_maker::FrameMaker> {
    let ctx = frame_maker::FrameMakerContext {
        frames: read_catalog(catalog.catalog.as_deref())?,
        opts,
        ..frame_maker::FrameMakerContext::default()
    };
    let source = frame_maker::FsFrameSource::new(&catalog.root);
    Ok(frame_maker::FrameMaker::new(ctx, source))
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let catalog = read_catalog(args.catalog.as_deref())?;
    for (id, entry) in catalog.iter() {
        let kind = match entry.kind {
            frame_maker::FrameKind::Svg => "svg",
            frame_maker::FrameKind::Raster => "raster",
        };
        println!("{id}\t{kind}\t{}", entry.src);
    }
    Ok(())
}

fn cmd_schema(args: SchemaArgs) -> anyhow::Result<()> {
    let opts = frame_maker::MakerOpts {
        load_system_fonts: false,
        ..frame_maker::MakerOpts::default()
    };
    let mut maker = make_maker(&args.catalog, opts)?;
    maker
        .load_frame(&args.frame)
        .with_context(|| format!("load frame '{}'", args.frame))?;

    let schema = maker.schema();
    let json = serde_json::to_string_pretty(&*schema).context("serialize schema")?;
    println!("{json}");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = frame_maker::MakerOpts {
        canvas_size: args.size,
        load_system_fonts: !args.no_system_fonts,
    };
    let mut maker = make_maker(&args.catalog, opts)?;
    maker
        .load_frame(&args.frame)
        .with_context(|| format!("load frame '{}'", args.frame))?;

    for (name, raw) in &args.overrides {
        maker
            .panel_mut()
            .submit(name, raw)
            .with_context(|| format!("set '{name}' to '{raw}'"))?;
    }
    for (name, flags) in &args.text_styles {
        let styles = frame_maker::TextStyles::from_flags(flags);
        maker.state().set(&format!("{name}Styles"), styles);
    }

    if let Some(photo) = &args.photo {
        let bytes =
            std::fs::read(photo).with_context(|| format!("read photo '{}'", photo.display()))?;
        maker
            .set_photo(&bytes)
            .with_context(|| format!("decode photo '{}'", photo.display()))?;
    }

    if let Some(path) = &args.markup_out {
        let markup = maker
            .rendered_markup()
            .context("frame has no markup (raster frame?)")?;
        std::fs::write(path, markup)
            .with_context(|| format!("write markup '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    maker
        .export_png(&args.out)
        .with_context(|| format!("write PNG '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
