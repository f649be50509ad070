// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dynasty headless preview.
//!
//! Plays a project through the timeline engine in real time and logs the
//! composited frames, standing in for the renderer:
//! - Loads JSON or RON projects
//! - Reads engine settings from a RON config file
//! - Falls back to a built-in demo project

use anyhow::Context as _;
use clap::Parser;
use dynasty_editor_timeline::{
    AnimatableProperty, ClipId, ClipKind, ClipUpdate, Easing, EngineConfig, Frame,
    PlaybackClock, PlaybackDriver, Project, SharedProject, CONFIG_FILE_NAME,
};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "dynasty_preview", version)]
struct Cli {
    /// Project file (`.json` or `.ron`). Uses a demo project when omitted.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Engine config file (RON).
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Start position in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Write the demo project as JSON to this path and exit.
    #[arg(long)]
    dump_demo: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("dynasty_editor_timeline=debug".parse()?)
        .add_directive("dynasty_editor_preview=info".parse()?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    if let Some(path) = &cli.dump_demo {
        let json = demo_project(&config).to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote demo project");
        return Ok(());
    }

    let project = match &cli.project {
        Some(path) => load_project(path)?,
        None => demo_project(&config),
    };

    tracing::info!(
        name = %project.name,
        clips = project.clip_count(),
        duration = project.duration,
        aspect_ratio = %project.aspect_ratio,
        "Loaded project"
    );

    let clock = Arc::new(Mutex::new(PlaybackClock::new(project.duration)));
    clock.lock().seek(cli.from);
    let driver = PlaybackDriver::new(SharedProject::new(project), clock, config.preview_frame_rate);

    let mut frames = 0u64;
    let mut visible: Vec<ClipId> = Vec::new();
    let ticket = driver.play();
    let outcome = driver
        .run(ticket, &mut |frame: &Frame<'_>| {
            frames += 1;
            log_frame(frame, &mut visible);
        })
        .await;

    tracing::info!(?outcome, frames, "Preview ended");
    Ok(())
}

fn load_project(path: &Path) -> anyhow::Result<Project> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let project = match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Project::from_ron(&source),
        _ => Project::from_json(&source),
    }
    .with_context(|| format!("invalid project {}", path.display()))?;
    Ok(project)
}

fn log_frame(frame: &Frame<'_>, visible: &mut Vec<ClipId>) {
    let ids: Vec<ClipId> = frame.iter().map(|l| l.clip.id.clone()).collect();
    if ids != *visible {
        let names: Vec<&str> = frame.iter().map(|l| l.clip.name.as_str()).collect();
        tracing::info!(time = frame.time, clips = ?names, "Visible clips changed");
        *visible = ids;
    }

    for layer in frame.stacked() {
        let t = &layer.transform;
        tracing::debug!(
            time = frame.time,
            clip = %layer.clip.name,
            layer = layer.clip.layer,
            x = t.x,
            y = t.y,
            scale = t.scale,
            rotation = t.rotation,
            opacity = t.opacity,
            brightness = layer.color_grading.brightness,
            "Layer"
        );
    }
}

/// Title fading in over a background that slowly zooms.
fn demo_project(config: &EngineConfig) -> Project {
    let mut project = Project::from_defaults(&config.new_project);
    project.name = "Preview Demo".to_string();
    project.duration = 6.0;

    let background = project.add_clip(ClipKind::Video, 0.0);
    project.update_clip(&background, ClipUpdate::new().name("Background").duration(6.0));
    project.add_keyframe(&background, AnimatableProperty::Scale, 0.0);
    project.set_property_value(&background, AnimatableProperty::Scale, 6.0, 1.2);
    project.add_keyframe(&background, AnimatableProperty::Scale, 6.0);
    project.update_keyframe_easing(&background, AnimatableProperty::Scale, 0.0, Easing::EaseInOut);

    let title = project.add_clip(ClipKind::Text, 1.0);
    project.update_clip(&title, ClipUpdate::new().name("Title").duration(4.0));
    project.set_property_value(&title, AnimatableProperty::Opacity, 0.0, 0.0);
    project.add_keyframe(&title, AnimatableProperty::Opacity, 0.0);
    project.set_property_value(&title, AnimatableProperty::Opacity, 1.0, 1.0);
    project.add_keyframe(&title, AnimatableProperty::Opacity, 1.0);
    project.update_keyframe_easing(&title, AnimatableProperty::Opacity, 0.0, Easing::EaseOut);

    project
}
