use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reelquiz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a manifest to an MP4 (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Print the assembled timeline as JSON without encoding.
    Plan(PlanArgs),
    /// Generate a manifest from an actor's TMDB filmography.
    Manifest(ManifestArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Render settings JSON; defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Upload the finished video to B2.
    #[arg(long, default_value_t = false)]
    upload: bool,

    /// Skip narration even if the manifest enables it.
    #[arg(long, default_value_t = false)]
    no_voice: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Render settings JSON; defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the ffmpeg command line instead of the timeline.
    #[arg(long, default_value_t = false)]
    ffmpeg: bool,
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Actor name to search for.
    #[arg(long)]
    actor: String,

    /// Write the manifest here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Manifest(args) => cmd_manifest(args),
    }
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<reelquiz::RenderSettings> {
    Ok(match path {
        Some(p) => reelquiz::RenderSettings::from_path(p)?,
        None => reelquiz::RenderSettings::default(),
    })
}

fn studio_for(
    settings: reelquiz::RenderSettings,
    manifest: &reelquiz::Manifest,
) -> anyhow::Result<reelquiz::Studio> {
    let keys = reelquiz::ApiKeys::from_env().with_manifest_overrides(manifest);
    Ok(reelquiz::Studio::new(settings)?.with_remote_collaborators(&keys)?)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut manifest = reelquiz::Manifest::from_path(&args.manifest)?;
    if args.no_voice {
        manifest.enable_voice_overs = false;
    }
    let settings = load_settings(args.settings.as_ref())?;
    let studio = studio_for(settings, &manifest)?;

    let outcome = studio.render(&manifest, &args.out, args.upload)?;
    if let Some(err) = &outcome.upload_error {
        eprintln!("upload failed: {err}");
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let manifest = reelquiz::Manifest::from_path(&args.manifest)?;
    let settings = load_settings(args.settings.as_ref())?;
    let studio = studio_for(settings, &manifest)?;

    let program = studio.build_program(&manifest)?;
    if args.ffmpeg {
        let audio = studio.audio_plan(&manifest, &program)?;
        let cfg = studio.encode_config(std::path::Path::new("out.mp4"));
        let job = reelquiz::encode::ffmpeg::plan_job(&program, &audio, &cfg)?;
        let line = job
            .args(&cfg)
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        println!("ffmpeg {line}");
    } else {
        println!("{}", program.to_json_pretty()?);
    }
    Ok(())
}

fn cmd_manifest(args: ManifestArgs) -> anyhow::Result<()> {
    let keys = reelquiz::ApiKeys::from_env();
    let token = keys.tmdb.with_context(|| {
        format!(
            "manifest generation needs a TMDB token in {}",
            reelquiz::settings::ENV_TMDB_API_KEY
        )
    })?;
    let credits =
        reelquiz::resolve::tmdb::TmdbCredits::new(reelquiz::resolve::tmdb::TmdbClient::new(token));
    let manifest = reelquiz::generate_manifest(&credits, &args.actor)?;
    let json = manifest.to_json_pretty()?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
