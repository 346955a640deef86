use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use podforge::{
    FeedConfig, GenerateOptions, NoopReporter, ProgressEvent, ProgressReporter,
    SharedProgressReporter, generate_feed, read_feed_config,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "[a] ");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "x ");

/// Generate a podcast RSS feed from a directory of MP3 files
#[derive(Parser, Debug)]
#[command(name = "podforge")]
#[command(about = "Generate a podcast RSS feed from a directory of MP3 files")]
#[command(version)]
struct Args {
    /// Directory containing the MP3 files
    audio_dir: PathBuf,

    /// Output RSS XML file (default: feed.xml in the audio directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Feed configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL for enclosure links, overriding the config
    #[arg(long)]
    base_url: Option<String>,

    /// Podcast cover image URL, overriding the config
    #[arg(long)]
    cover_image: Option<String>,

    /// Directory for extracted episode artwork (default: episode_artwork
    /// under the audio directory)
    #[arg(long)]
    artwork_dir: Option<PathBuf>,

    /// Overwrite existing episode artwork files
    #[arg(long)]
    overwrite_artwork: bool,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Progress reporter using indicatif for terminal output
struct IndicatifReporter {
    main_bar: ProgressBar,
    file_bar: ProgressBar,
    warnings: Mutex<Vec<(String, String)>>,
}

impl IndicatifReporter {
    fn new() -> Self {
        let multi = MultiProgress::new();

        let main_style = ProgressStyle::default_bar()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let main_bar = multi.add(ProgressBar::new_spinner());
        main_bar.set_style(main_style);
        main_bar.enable_steady_tick(std::time::Duration::from_millis(100));

        let file_style = ProgressStyle::default_bar()
            .template("  {bar:30.cyan/blue} {pos}/{len} {wide_msg}")
            .unwrap()
            .progress_chars("█▓░");

        let file_bar = multi.add(ProgressBar::new(0));
        file_bar.set_style(file_style);

        Self {
            main_bar,
            file_bar,
            warnings: Mutex::new(Vec::new()),
        }
    }

    fn take_warnings(&self) -> Vec<(String, String)> {
        std::mem::take(&mut *self.warnings.lock().unwrap())
    }
}

impl ProgressReporter for IndicatifReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::ScanningDirectory { path } => {
                self.main_bar
                    .set_message(format!("{SEARCH}Scanning: {}", path.cyan()));
            }

            ProgressEvent::DirectoryScanned { file_count } => {
                self.main_bar.set_message(format!(
                    "{HEADPHONES}{} MP3 files found",
                    file_count.to_string().cyan()
                ));
                self.file_bar.set_length(file_count as u64);
            }

            ProgressEvent::ReadingTags {
                filename,
                file_index,
                ..
            } => {
                self.file_bar.set_position(file_index as u64 + 1);
                self.file_bar.set_message(truncate_title(&filename, 40));
            }

            ProgressEvent::FileWarning { filename, message } => {
                self.warnings.lock().unwrap().push((filename, message));
            }

            ProgressEvent::FileSkipped { filename, reason } => {
                self.warnings.lock().unwrap().push((filename, reason));
            }

            ProgressEvent::EpisodesPlanned { episode_count } => {
                self.main_bar.set_message(format!(
                    "{HEADPHONES}{} episodes dated and sorted",
                    episode_count.to_string().cyan()
                ));
            }

            ProgressEvent::ArtworkWritten {
                episode_number,
                filename,
            } => {
                self.main_bar.set_message(format!(
                    "{PICTURE}Episode {}: wrote {}",
                    episode_number.to_string().cyan(),
                    filename.dimmed()
                ));
            }

            ProgressEvent::FeedWritten {
                path,
                episode_count,
            } => {
                self.main_bar.set_message(format!(
                    "{HEADPHONES}Feed with {} episodes written to {}",
                    episode_count.to_string().cyan(),
                    path.dimmed()
                ));
            }

            ProgressEvent::GenerationCompleted {
                episode_count,
                skipped_count,
                artwork_count,
            } => {
                self.file_bar.finish_and_clear();
                self.main_bar.finish_and_clear();
                println!(
                    "\n{PARTY}{} {} episodes, {} artwork files, {} skipped",
                    "Feed complete:".bold().green(),
                    episode_count.to_string().green().bold(),
                    artwork_count.to_string().cyan(),
                    if skipped_count > 0 {
                        skipped_count.to_string().yellow().bold()
                    } else {
                        skipped_count.to_string().green()
                    }
                );
            }
        }
    }
}

fn truncate_title(title: &str, max_len: usize) -> String {
    if title.len() <= max_len {
        title.to_string()
    } else {
        format!("{}...", &title[..max_len.saturating_sub(3)])
    }
}

fn load_config(args: &Args) -> Result<FeedConfig> {
    let mut config = match &args.config {
        Some(path) => read_feed_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FeedConfig::default(),
    };

    // CLI flags win over the config file
    if let Some(base_url) = &args.base_url {
        config.media_base_url = base_url.clone();
    }
    if let Some(cover_image) = &args.cover_image {
        config.cover_image_url = cover_image.clone();
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podforge".bold().magenta(),
            "- Podcast Feed Generator".dimmed()
        );
    }

    let config = load_config(&args)?;

    let options = GenerateOptions {
        output: args.output.clone(),
        artwork_dir: args.artwork_dir.clone(),
        overwrite_artwork: args.overwrite_artwork,
    };

    let indicatif = if args.quiet {
        None
    } else {
        Some(Arc::new(IndicatifReporter::new()))
    };
    let reporter: SharedProgressReporter = match &indicatif {
        Some(reporter) => reporter.clone(),
        None => NoopReporter::shared(),
    };

    let result = generate_feed(&args.audio_dir, &config, &options, reporter)
        .context("Failed to generate feed")?;

    if let Some(indicatif) = &indicatif {
        let warnings = indicatif.take_warnings();
        if !warnings.is_empty() {
            println!("\n{WARNING}{}", "Warnings:".yellow().bold());
            for (filename, message) in &warnings {
                println!(
                    "  {}{} - {}",
                    CROSS,
                    filename.yellow(),
                    message.to_string().dimmed()
                );
            }
        }
    }

    if !args.quiet {
        println!(
            "\n{FOLDER}Feed: {}\n",
            result.output_path.display().to_string().cyan()
        );
    }

    if result.episode_count == 0 {
        std::process::exit(1);
    }

    Ok(())
}
