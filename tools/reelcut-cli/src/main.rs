//! Reelcut CLI: build and inspect short-form timeline projects.
//!
//! Usage:
//!   reelcut init <PATH>              Write a starter project
//!   reelcut info <PATH>              Show project information
//!   reelcut validate <PATH>          Check timeline invariants
//!   reelcut segment [OPTIONS]        Plan cut points (optionally place them)
//!   reelcut captions <PATH> [...]    Generate caption cues from narration
//!   reelcut template <PATH> [...]    Apply a template payload
//!   reelcut motion [OPTIONS]         Print scene camera samples
//!   reelcut export <PATH>            Write the export job description

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use reelcut_project_model::FrameRate;

mod commands;

#[derive(Parser)]
#[command(
    name = "reelcut",
    about = "Timeline composition for short-form video",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Segment planning strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SegmentModeArg {
    Count,
    Seconds,
    Silence,
    Scene,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter project
    Init {
        /// Project file to create
        path: PathBuf,

        /// Timeline frame rate (30 or 60)
        #[arg(long, default_value = "30", value_parser = parse_fps)]
        fps: FrameRate,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show project information
    Info {
        /// Path to the project file
        path: PathBuf,
    },

    /// Check timeline invariants
    Validate {
        /// Path to the project file
        path: PathBuf,
    },

    /// Plan segments for a source duration
    Segment {
        /// Source duration in seconds
        #[arg(long)]
        total_sec: f64,

        /// Planning strategy
        #[arg(long, value_enum, default_value = "count")]
        mode: SegmentModeArg,

        /// Number of parts for `count`
        #[arg(long, default_value = "3")]
        split_count: u32,

        /// Part length for `seconds`
        #[arg(long, default_value = "30")]
        split_seconds: f64,

        /// Place the segments onto this project file
        #[arg(long)]
        apply: Option<PathBuf>,
    },

    /// Generate caption cues from a narration file
    Captions {
        /// Path to the project file
        path: PathBuf,

        /// Narration text file
        #[arg(long)]
        narration: PathBuf,

        /// Words per caption (2-10)
        #[arg(long)]
        words: Option<u32>,

        /// Caption delay in milliseconds (-500 to 1500)
        #[arg(long)]
        delay_ms: Option<i64>,

        /// Also write subtitles (.srt or .vtt)
        #[arg(long)]
        srt: Option<PathBuf>,
    },

    /// Apply a template payload to a project
    Template {
        /// Path to the project file
        path: PathBuf,

        /// Template payload JSON
        #[arg(long)]
        payload: PathBuf,

        /// Template name used for default labels
        #[arg(long, default_value = "template")]
        name: String,

        /// Value for {{title}}
        #[arg(long, default_value = "")]
        title: String,

        /// Value for {{topic}}
        #[arg(long, default_value = "")]
        topic: String,
    },

    /// Print sampled scene camera motion
    Motion {
        /// gentle_zoom | up_down | left_right | focus_smooth | random
        #[arg(long)]
        preset: Option<String>,

        /// 1-based scene number
        #[arg(long, default_value = "1")]
        scene: u32,

        /// Number of samples, both ends included
        #[arg(long, default_value = "5")]
        samples: usize,
    },

    /// Write the export job description
    Export {
        /// Path to the project file
        path: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_fps(value: &str) -> Result<FrameRate, String> {
    let fps: u32 = value.parse().map_err(|e| format!("{e}"))?;
    FrameRate::try_from(fps).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = reelcut_common::config::AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    reelcut_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Init { path, fps, force } => commands::init::run(path, fps, force),
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Segment {
            total_sec,
            mode,
            split_count,
            split_seconds,
            apply,
        } => commands::segment::run(&config, total_sec, mode, split_count, split_seconds, apply),
        Commands::Captions {
            path,
            narration,
            words,
            delay_ms,
            srt,
        } => commands::captions::run(&config, path, narration, words, delay_ms, srt),
        Commands::Template {
            path,
            payload,
            name,
            title,
            topic,
        } => commands::template::run(&config, path, payload, name, title, topic),
        Commands::Motion {
            preset,
            scene,
            samples,
        } => commands::motion::run(&config, preset, scene, samples),
        Commands::Export { path, output } => commands::export::run(path, output),
    }
}
