use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parallax", version, about = "Scroll-driven parallax layout simulator")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll a scene through a range of positions and print every layout pass.
    Simulate(SimulateArgs),
    /// Print the page a drag release would snap to.
    Snap(SnapArgs),
    /// Run the built-in demo screen and print the header styling.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct RangeArgs {
    /// First scroll position, measured from the rest offset.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    from: f64,

    /// Last scroll position (inclusive).
    #[arg(long, default_value_t = 200.0, allow_hyphen_values = true)]
    to: f64,

    /// Distance between samples.
    #[arg(long, default_value_t = 25.0)]
    step: f64,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    range: RangeArgs,
}

#[derive(Parser, Debug)]
struct SnapArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll position at release, measured from the rest offset.
    #[arg(long, allow_hyphen_values = true)]
    position: f64,

    /// Direction of the last scroll.
    #[arg(long, value_enum, default_value_t = DirectionChoice::Up)]
    direction: DirectionChoice,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    #[command(flatten)]
    range: RangeArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Up,
    Down,
}

const MAX_SAMPLES: usize = 10_000;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Snap(args) => cmd_snap(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn sample_positions(range: &RangeArgs) -> anyhow::Result<Vec<f64>> {
    if !(range.step.is_finite() && range.step > 0.0) {
        anyhow::bail!("--step must be a positive number");
    }
    if !(range.from.is_finite() && range.to.is_finite()) || range.to < range.from {
        anyhow::bail!("--from/--to must be finite with from <= to");
    }
    let span = ((range.to - range.from) / range.step).floor();
    if span >= MAX_SAMPLES as f64 {
        anyhow::bail!("range produces more than {MAX_SAMPLES} samples");
    }
    let count = span as usize + 1;
    Ok((0..count)
        .map(|i| range.from + i as f64 * range.step)
        .collect())
}

#[derive(serde::Serialize)]
struct Sample {
    position: f64,
    report: parallax::LayoutReport,
}

fn load_scene(path: &std::path::Path) -> anyhow::Result<parallax::Scene> {
    let scene = parallax::Scene::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))?;
    scene.validate()?;
    Ok(scene)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    use parallax::ScrollHost as _;

    let positions = sample_positions(&args.range)?;
    let scene = load_scene(&args.in_path)?;
    let labels = scene.item_labels();

    let mut p = scene.build_parallax()?;
    p.activate()?;
    let rest = p.host().content_offset_y();

    let mut samples = Vec::with_capacity(positions.len());
    for position in positions {
        let report = match parallax::sim::scroll_to(&mut p, rest + position)? {
            Some(report) => report,
            None => p.layout_containers(),
        };
        samples.push(Sample { position, report });
    }

    if args.range.json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
    } else {
        for sample in &samples {
            print_sample(sample, &labels);
        }
    }
    Ok(())
}

fn print_sample(sample: &Sample, labels: &[String]) {
    let metrics = sample.report.metrics;
    println!(
        "position {} (offset {}, inset {})",
        sample.position, metrics.content_offset_y, metrics.inset_top
    );
    for frame in &sample.report.frames {
        let label = labels
            .get(frame.item.index())
            .map(String::as_str)
            .unwrap_or("?");
        let (clip_top, clip_bottom) = frame.content.clipped(frame.height);
        println!(
            "  {label:<12} top={:<9.2} height={:<8.2} clip={:.2}/{:.2} y={:.4} h={:.4}",
            frame.top - metrics.content_offset_y,
            frame.height,
            clip_top,
            clip_bottom,
            frame.y_progress,
            frame.height_progress,
        );
    }
}

fn cmd_snap(args: SnapArgs) -> anyhow::Result<()> {
    use parallax::ScrollHost as _;

    let scene = load_scene(&args.in_path)?;
    let mut p = scene.build_parallax()?;
    p.activate()?;

    let rest = p.host().content_offset_y();
    let current = rest + args.position;
    let inset = p.host().adjusted_content_inset_top();
    let up = parallax::offsets_up(p.resolved_items(), inset);
    let down = parallax::offsets_down(p.resolved_items(), inset);
    let direction = match args.direction {
        DirectionChoice::Up => parallax::ScrollDirection::Up,
        DirectionChoice::Down => parallax::ScrollDirection::Down,
    };

    match parallax::snap_target(&up, &down, current, direction, scene.snap_config()) {
        Some(target) => println!("snap to position {} (offset {target})", target - rest),
        None => println!("no snap target"),
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct DemoSample {
    position: f64,
    progress: f64,
    style: parallax::demo::HeaderStyle,
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let positions = sample_positions(&args.range)?;
    let mut screen = parallax::demo::DemoScreen::new(parallax::demo::DemoMetrics::default())?;
    screen.activate()?;

    let mut samples = Vec::with_capacity(positions.len());
    for position in positions {
        screen.scroll_to_position(position)?;
        samples.push(DemoSample {
            position,
            progress: screen.header_progress(),
            style: screen.header_style(),
        });
    }

    if args.range.json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
    } else {
        for s in &samples {
            println!(
                "position {:<8} progress={:.4} alpha={:.3} scale={:.3} background={}",
                s.position,
                s.progress,
                s.style.alpha,
                s.style.scale,
                s.style.background.to_hex_string(),
            );
        }
    }
    Ok(())
}
