use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

use kropper::{
    BoothOptions, CropOptions, ExportFormat, FilterKind, FsImageLoader, ImageSource,
    InputEvent, Kropper, KropperConfig, PhotoBooth, Point, ShapeLibrary, Surface,
    camera::StillImageDevices, frame::default_stickers,
};

#[derive(Parser, Debug)]
#[command(name = "kropper", version)]
struct Cli {
    /// Log at DEBUG level.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Options JSON (`{"crop": {...}, "booth": {...}}`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop an image into a shape and write it.
    Crop(CropArgs),
    /// Apply a pixel filter to an image.
    Filter(FilterArgs),
    /// Composite a photo with a frame as the booth would capture it.
    Booth(BoothArgs),
    /// List the preset shapes.
    Shapes,
}

#[derive(Parser, Debug)]
struct CropArgs {
    /// Input image (raster or SVG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Crop canvas width in pixels; the height follows the configured aspect ratio.
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Preset shape id (see `kropper shapes`).
    #[arg(long)]
    shape: Option<String>,

    /// Zoom factor (clamped to the configured range).
    #[arg(long)]
    zoom: Option<f64>,

    /// Horizontal pan in canvas pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    /// Vertical pan in canvas pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Filter id.
    #[arg(long, value_parser = parse_filter)]
    filter: FilterKind,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,
}

#[derive(Parser, Debug)]
struct BoothArgs {
    /// Photo standing in for the camera frame.
    #[arg(long)]
    photo: PathBuf,

    /// Frame JSON (one frame or an array). Cut-out paths resolve relative to this file.
    #[arg(long)]
    frames: PathBuf,

    /// Index of the frame to overlay.
    #[arg(long, default_value_t = 0)]
    frame_index: usize,

    /// Filter id.
    #[arg(long, value_parser = parse_filter, default_value = "none")]
    filter: FilterKind,

    /// Camera facing; `user` mirrors the photo.
    #[arg(long, value_enum, default_value_t = FacingChoice::User)]
    facing: FacingChoice,

    /// Sticker ids to place (repeatable).
    #[arg(long = "sticker")]
    stickers: Vec<String>,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write a PNG thumbnail of the frame here.
    #[arg(long)]
    thumbnail: Option<PathBuf>,

    /// Thumbnail width in pixels.
    #[arg(long, default_value_t = 48)]
    thumbnail_width: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

impl FormatChoice {
    fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FacingChoice {
    User,
    Environment,
}

fn parse_filter(s: &str) -> Result<FilterKind, String> {
    FilterKind::from_id(s).ok_or_else(|| {
        let ids: Vec<_> = kropper::filters::FILTER_LIST.iter().map(|f| f.id()).collect();
        format!("unknown filter '{s}' (expected one of: {})", ids.join(", "))
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => KropperConfig::from_path(path)?,
        None => KropperConfig::default(),
    };
    match cli.cmd {
        Command::Crop(args) => cmd_crop(args, config.crop),
        Command::Filter(args) => cmd_filter(args),
        Command::Booth(args) => cmd_booth(args, config.booth.with_env_overrides()),
        Command::Shapes => {
            for id in ShapeLibrary::names() {
                println!("{id}\t{}", ShapeLibrary::resolve(id).name());
            }
            Ok(())
        }
    }
}

fn read_image(path: &Path) -> anyhow::Result<kropper::PreparedImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(kropper::decode_any(&bytes)?)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_crop(args: CropArgs, mut options: CropOptions) -> anyhow::Result<()> {
    if let Some(shape) = args.shape {
        options = options.with_shape(shape);
    }
    let canvas = options.canvas_for_width(args.width);
    let mut engine = Kropper::new(canvas, options)?;
    engine.set_image(ImageSource::Prepared(read_image(&args.in_path)?))?;
    if let Some(zoom) = args.zoom {
        engine.set_zoom(zoom);
    }
    if args.pan_x != 0.0 || args.pan_y != 0.0 {
        engine.handle_event(&InputEvent::MouseDown(Point::ZERO));
        engine.handle_event(&InputEvent::MouseMove(Point::new(args.pan_x, args.pan_y)));
        engine.handle_event(&InputEvent::MouseUp);
    }
    tracing::debug!(state = ?engine.state(), "crop view");

    let encoded = engine
        .crop(args.format.mime())
        .context("crop produced no output")?;
    write_output(&args.out, &encoded.bytes)
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let image = read_image(&args.in_path)?;
    let mut surface = Surface::from_image(&image)?;
    kropper::filters::apply_filter(&mut surface, args.filter)?;
    let format = ExportFormat::from_mime(args.format.mime(), kropper::DEFAULT_JPEG_QUALITY);
    let encoded = surface.encode(format)?;
    write_output(&args.out, &encoded.bytes)
}

fn cmd_booth(args: BoothArgs, options: BoothOptions) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.frames)
        .with_context(|| format!("read frames '{}'", args.frames.display()))?;
    let frames = kropper::CustomFrame::list_from_json(&json)?;
    anyhow::ensure!(
        args.frame_index < frames.len(),
        "frame index {} out of range ({} frames)",
        args.frame_index,
        frames.len()
    );

    let photo = read_image(&args.photo)?;
    let mut booth = PhotoBooth::new(StillImageDevices::new(photo), frames, options)?;
    let root = args.frames.parent().unwrap_or_else(|| Path::new("."));
    let loaded = booth.preload_images(&FsImageLoader::new(root));
    tracing::info!(loaded, "frame images loaded");

    booth.select_frame(args.frame_index);
    booth.select_filter(args.filter);
    let catalog = default_stickers();
    for id in &args.stickers {
        let sticker = catalog
            .iter()
            .find(|s| &s.id == id)
            .with_context(|| format!("unknown sticker '{id}'"))?;
        booth.toggle_sticker(sticker);
    }

    if !booth.open() {
        let msg = booth.camera_session().error.clone().unwrap_or_default();
        anyhow::bail!("camera did not start: {msg}");
    }
    if matches!(args.facing, FacingChoice::Environment) && !booth.switch_camera() {
        anyhow::bail!("environment camera did not start");
    }
    let url = booth.capture().context("capture produced no output")?;
    let (_, bytes) = kropper::decode_data_url(&url)?;
    write_output(&args.out, &bytes)?;

    if let Some(path) = &args.thumbnail {
        let thumb = booth
            .thumbnail(args.frame_index, args.thumbnail_width)?
            .context("frame disappeared")?;
        write_output(path, &thumb.encode(ExportFormat::Png)?.bytes)?;
    }
    eprintln!("suggested name: {}", booth.download_name());
    booth.close();
    Ok(())
}
