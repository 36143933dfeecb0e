use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};

use sketchboard::Config;
use sketchboard::app::Sketchboard;
use sketchboard::capture::{ExportOutcome, ExportSink, FileExportSink, compositor};
use sketchboard::input::InputEvent;
use sketchboard::util::{MAX_VIEWPORT_DIMENSION, Rect, Viewport};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SKETCHBOARD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(version = VERSION, about = "Freehand drawing surface with region export")]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "print_config")]
    init_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop a region of a PNG onto an opaque background
    Crop(CropArgs),
    /// Replay a recorded event script against a blank canvas
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct CropArgs {
    /// Source image
    input: PathBuf,

    /// Region as x,y,width,height
    #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
    rect: Rect,

    /// Directory to write into (defaults to the configured export directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output filename (defaults to the configured selection filename)
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Event script, one event per line ("-" reads stdin)
    script: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 800, value_parser = viewport_side())]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600, value_parser = viewport_side())]
    height: u32,

    /// Directory to write exports into (defaults to the configured export directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("Config file {} does not exist", path.display());
            }
            Config::load_from(path)?
        }
        None => Config::load()?,
    };

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    match cli.command {
        Some(Command::Crop(args)) => crop(args, &config),
        Some(Command::Replay(args)) => replay(args, &mut config),
        None => {
            println!("sketchboard: Freehand drawing surface with region export");
            println!();
            println!("Usage:");
            println!("  sketchboard crop IMAGE --rect x,y,w,h     Crop a PNG to an opaque PNG");
            println!("  sketchboard replay SCRIPT                 Replay an event script");
            println!("  sketchboard --print-config                Show the effective config");
            println!("  sketchboard --init-config                 Write a default config file");
            println!("  sketchboard --help                        Show help");
            Ok(())
        }
    }
}

fn crop(args: CropArgs, config: &Config) -> Result<()> {
    let source = image::open(&args.input)
        .with_context(|| format!("Failed to read image {}", args.input.display()))?
        .to_rgba8();

    let (width, height) = source.dimensions();
    if args.rect.clamp_to(width, height).is_empty() {
        bail!(
            "Region {},{} {}x{} does not overlap the {}x{} image",
            args.rect.left,
            args.rect.top,
            args.rect.width,
            args.rect.height,
            width,
            height
        );
    }

    let background = config.controller_settings().background.to_rgba8();
    let output = compositor::crop(&source, args.rect, background);

    let mut save_config = config.export.file_save_config();
    if let Some(dir) = args.output_dir {
        save_config.save_directory = dir;
    }
    let name = args
        .name
        .unwrap_or_else(|| config.export.selection_filename.clone());

    let saved = FileExportSink::new(save_config).deliver(&output, &name)?;
    if let Some(path) = saved {
        println!(
            "Saved {}x{} to {}",
            output.width(),
            output.height(),
            path.display()
        );
    }
    Ok(())
}

fn replay(args: ReplayArgs, config: &mut Config) -> Result<()> {
    let script = read_script(&args.script)?;
    let events = parse_script(&script)?;

    if let Some(dir) = &args.output_dir {
        config.export.directory = dir.display().to_string();
    }

    let runtime =
        tokio::runtime::Runtime::new().context("Failed to create Tokio runtime for exports")?;
    let mut board = Sketchboard::from_config(
        config,
        Viewport::new(args.width, args.height),
        runtime.handle(),
    );

    let mut exported = 0;
    for event in &events {
        if board.handle(*event) == 0 {
            continue;
        }
        // Wait so outcomes are reported in script order.
        if let Some(outcome) = runtime.block_on(board.settle()) {
            print_outcome(&outcome);
            if matches!(outcome, ExportOutcome::Success(_)) {
                exported += 1;
            }
        }
    }

    board.shutdown();
    println!("Replayed {} events, {} exported", events.len(), exported);
    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut script = String::new();
        std::io::stdin()
            .read_to_string(&mut script)
            .context("Failed to read script from stdin")?;
        return Ok(script);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read script {}", path.display()))
}

/// Parses one event per line; blank lines and `#` comments are skipped.
fn parse_script(script: &str) -> Result<Vec<InputEvent>> {
    script
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            line.parse::<InputEvent>()
                .with_context(|| format!("Line {}: '{}'", number, line))
        })
        .collect()
}

fn print_outcome(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Success(result) => {
            let location = result
                .saved_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| result.name.clone());
            println!(
                "Exported {}x{} to {}",
                result.width, result.height, location
            );
        }
        ExportOutcome::Failed(error) => println!("Export failed: {}", error),
        ExportOutcome::Cancelled(reason) => println!("Export cancelled: {}", reason),
    }
}

fn viewport_side() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(MAX_VIEWPORT_DIMENSION))
}

fn parse_rect(value: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(format!("expected x,y,width,height, got '{}'", value));
    };
    let coord = |s: &str| s.parse::<i32>().map_err(|_| format!("invalid coordinate '{}'", s));
    let size = |s: &str| s.parse::<u32>().map_err(|_| format!("invalid size '{}'", s));
    Ok(Rect::new(coord(*x)?, coord(*y)?, size(*w)?, size(*h)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchboard::input::ToolAction;
    use sketchboard::util::Point;

    #[test]
    fn parse_rect_accepts_negative_origin() {
        assert_eq!(parse_rect("-20,10,100,50"), Ok(Rect::new(-20, 10, 100, 50)));
        assert!(parse_rect("1,2,3").is_err());
        assert!(parse_rect("1,2,-3,4").is_err());
    }

    #[test]
    fn parse_script_skips_comments_and_reports_line() {
        let events = parse_script("# select\nsave\n\ndown 1 2\n").unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::Tool(ToolAction::Save),
                InputEvent::PointerDown(Point::new(1, 2)),
            ]
        );

        let err = parse_script("save\nwiggle\n").unwrap_err();
        assert!(format!("{err:#}").contains("Line 2"));
    }
}
