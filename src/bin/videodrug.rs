use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use videodrug::{BackLayer, CpuBackend, EffectChain, EffectIndex, ShaderBackend as _};

#[derive(Parser, Debug)]
#[command(name = "videodrug", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an effect description and print its stages.
    Check(CheckArgs),
    /// Run an effect over an image and write one PNG per frame.
    Render(RenderArgs),
    /// Validate an effect index and print its mappings.
    Index(IndexArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Effect description JSON.
    effect: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Effect description JSON.
    effect: PathBuf,

    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out: PathBuf,

    /// Animation to start on the whole chain instead of each stage's default.
    #[arg(long)]
    animation: Option<String>,

    /// Frame delta applied between rendered frames.
    #[arg(long, default_value_t = 1.0)]
    step: f64,
}

#[derive(Parser, Debug)]
struct IndexArgs {
    /// Effect index JSON (`EffectList.json`).
    index: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Render(args) => cmd_render(args),
        Command::Index(args) => cmd_index(args),
    }
}

fn read_chain(path: &Path) -> anyhow::Result<EffectChain> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read effect '{}'", path.display()))?;
    let chain = EffectChain::from_json_str(&text)
        .with_context(|| format!("build effect '{}'", path.display()))?;
    Ok(chain)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let chain = read_chain(&args.effect)?;
    println!("{}: {} stage(s)", args.effect.display(), chain.len());
    for (i, filter) in chain.filters().iter().enumerate() {
        let names: Vec<&str> = filter.kind().channel_names().collect();
        let animations: Vec<String> = filter.controller().animation_names().into_iter().collect();
        println!(
            "  stage_{i}: {} channels=[{}] animations=[{}] current={}",
            filter.kind().type_name(),
            names.join(", "),
            animations.join(", "),
            filter.controller().current_animation().unwrap_or("-"),
        );
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut chain = read_chain(&args.effect)?;
    let source = image::open(&args.image)
        .with_context(|| format!("open image '{}'", args.image.display()))?
        .to_rgba8();

    let controller = chain.controller_mut();
    if let Some(name) = &args.animation {
        controller.transition(name)?;
    }
    controller.play();

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut backend = CpuBackend::new();
    for frame in 0..args.frames {
        let out = backend.apply_chain(chain.filters(), &source)?;
        let path = args.out.join(format!("frame_{frame:04}.png"));
        out.save(&path)
            .with_context(|| format!("write frame '{}'", path.display()))?;
        chain.controller_mut().update(args.step);
    }

    println!(
        "wrote {} frame(s) to {} ({} uniform upload(s))",
        args.frames,
        args.out.display(),
        backend.upload_count()
    );
    Ok(())
}

fn cmd_index(args: IndexArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.index)
        .with_context(|| format!("read index '{}'", args.index.display()))?;
    let index = EffectIndex::from_json_str(&text)
        .with_context(|| format!("parse index '{}'", args.index.display()))?;

    for layer in BackLayer::ALL {
        println!("{}:", layer.namespace());
        for (image, effect) in index.mapping(layer) {
            println!("  {image} -> {effect}");
        }
    }
    println!("effects: {}", index.effect_names().join(", "));
    Ok(())
}
