use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;

use soundscout_core::{
    FreesoundClient, MusicRequirement, ScoredCandidate, SoundCandidate, SoundEffectCategory,
    build_music_report, category_dir_name, effect_match_score, format_kb, format_match_listing,
    format_mb, get_music_dir, get_report_path, get_sfx_dir, mp3_census, mp3_census_recursive,
    music_match_score, music_search_filter, parse_music_requirements_with,
    parse_sound_effect_categories, safe_file_name, save_report, select_top_n,
};

const MUSIC_PAGE_SIZE: u8 = 20;
const SFX_PAGE_SIZE: u8 = 10;
const MAX_EFFECTS_PER_CATEGORY: usize = 5;

#[derive(Parser)]
#[command(name = "soundscout")]
#[command(
    about = "Score production music and sound effects against a requirements document and download the best Freesound matches"
)]
struct Cli {
    /// Requirements document (markdown)
    document: PathBuf,

    /// Output directory. Defaults to the platform download directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tracks to download per music requirement
    #[arg(long, default_value_t = 3)]
    music_matches: usize,

    /// Sounds to download per effect
    #[arg(long, default_value_t = 2)]
    sfx_matches: usize,
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("soundscout")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Validate the API key early, before touching the filesystem.
    let client = match FreesoundClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    let output_dir = cli.output.unwrap_or_else(default_output_dir);
    let music_out = get_music_dir(&output_dir);
    let sfx_out = get_sfx_dir(&output_dir);
    fs::create_dir_all(&music_out).await?;
    fs::create_dir_all(&sfx_out).await?;

    println!(
        "\n{}  {}\n",
        style("soundscout").cyan().bold(),
        style("Music & SFX Scorer").dim()
    );

    let total_start = Instant::now();

    // A missing document is reported but never fatal: the run continues
    // with zero requirements and still produces a summary.
    let text = match fs::read_to_string(&cli.document).await {
        Ok(text) => text,
        Err(e) => {
            println!(
                "{} Document not found: {} ({})",
                style("!").yellow().bold(),
                cli.document.display(),
                e
            );
            String::new()
        }
    };

    let requirements = parse_music_requirements_with(&text, |skipped| {
        println!(
            "{} Skipping malformed track block {} ({})",
            style("!").yellow().bold(),
            skipped.heading_number,
            skipped.title
        );
    });
    let categories = parse_sound_effect_categories(&text);

    process_music_tracks(&client, &requirements, &music_out, cli.music_matches).await?;
    process_sound_effects(&client, &categories, &sfx_out, cli.sfx_matches).await?;

    print_summary(&music_out, &sfx_out);

    println!(
        "\n{} {}\n",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );

    Ok(())
}

async fn process_music_tracks(
    client: &FreesoundClient,
    requirements: &[MusicRequirement],
    music_out: &Path,
    top_n: usize,
) -> Result<()> {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Music Tracks").bold());

    if requirements.is_empty() {
        println!("No music requirements found");
        return Ok(());
    }
    println!("Found {} music track requirements", requirements.len());

    for req in requirements {
        println!("\n{}", style("─".repeat(60)).dim());
        println!(
            "{} {}",
            style(format!("Track {}:", req.track_number)).cyan().bold(),
            style(&req.title).bold()
        );
        println!("  Time: {}   Genre: {}", req.time_range, req.genre);
        println!(
            "  Mood: {}   BPM: {}   Instruments: {}",
            req.mood, req.bpm, req.instruments
        );

        let query = req.search_query();
        let filter = music_search_filter(req.target_duration_seconds);
        let (bpm_low, bpm_high) = req.bpm_range();
        println!(
            "  Query: {}   Filter: {}   BPM window: {}-{}",
            style(&query).yellow(),
            filter,
            bpm_low,
            bpm_high
        );

        let results = search_or_empty(client, &query, Some(filter), MUSIC_PAGE_SIZE).await;

        let scored: Vec<ScoredCandidate> = results
            .into_iter()
            .map(|sound| ScoredCandidate {
                score: music_match_score(req, &sound),
                sound,
            })
            .collect();
        let top = select_top_n(scored, top_n);

        // A requirement with zero matches still gets a report on disk.
        let report = build_music_report(req, &query, &top);
        save_report(&report, &get_report_path(music_out, req.track_number)).await?;

        if top.is_empty() {
            println!("{} No results found", style("✗").red().bold());
            continue;
        }

        println!("\nTop {} matches:", top.len());
        print!("{}", format_match_listing(&top));

        println!("\nDownloading {} matches...", top.len());
        for (i, m) in top.iter().enumerate() {
            let prefix = format!("track{:02}_match{}", req.track_number, i + 1);
            download_with_narration(client, &m.sound, music_out, &prefix).await;
        }
    }

    Ok(())
}

async fn process_sound_effects(
    client: &FreesoundClient,
    categories: &[SoundEffectCategory],
    sfx_out: &Path,
    top_n: usize,
) -> Result<()> {
    println!("\n{}", style("─".repeat(60)).dim());
    println!("{}", style("Sound Effects").bold());

    if categories.is_empty() {
        println!("No sound effect requirements found");
        return Ok(());
    }
    let total_effects: usize = categories.iter().map(|c| c.effects.len()).sum();
    println!(
        "Found {} categories with {} sound effects",
        categories.len(),
        total_effects
    );

    for category in categories {
        println!(
            "\n{} {}",
            style("Category:").cyan().bold(),
            style(&category.name).bold()
        );
        let category_dir = sfx_out.join(category_dir_name(&category.name));
        fs::create_dir_all(&category_dir).await?;

        for effect in category.effects.iter().take(MAX_EFFECTS_PER_CATEGORY) {
            println!("\n  Effect: {}", effect);

            let results = search_or_empty(client, effect, None, SFX_PAGE_SIZE).await;
            if results.is_empty() {
                println!("    No results found");
                continue;
            }

            let scored: Vec<ScoredCandidate> = results
                .into_iter()
                .map(|sound| ScoredCandidate {
                    score: effect_match_score(effect, &sound),
                    sound,
                })
                .collect();
            let top = select_top_n(scored, top_n);

            if let Some(best) = top.first() {
                println!(
                    "    Best match: {} (Score: {:.1}/100)",
                    best.sound.name, best.score
                );
            }

            for (i, m) in top.iter().enumerate() {
                let prefix = format!("sfx_{}_match{}", safe_file_name(effect, 30), i + 1);
                download_with_narration(client, &m.sound, &category_dir, &prefix).await;
            }
        }
    }

    Ok(())
}

/// Run one search, narrating failures. A failed search and an empty result
/// set both come back as "no candidates".
async fn search_or_empty(
    client: &FreesoundClient,
    query: &str,
    filter: Option<&str>,
    page_size: u8,
) -> Vec<SoundCandidate> {
    let spinner = create_spinner("Searching Freesound...");
    let search = client.search(query, filter, page_size).await;
    spinner.finish_and_clear();

    match search {
        Ok(results) => results,
        Err(e) => {
            println!("{} Search error: {}", style("✗").red().bold(), e);
            Vec::new()
        }
    }
}

async fn download_with_narration(
    client: &FreesoundClient,
    sound: &SoundCandidate,
    dest_dir: &Path,
    prefix: &str,
) {
    match client.download_preview(sound, dest_dir, prefix).await {
        Ok(path) => {
            let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            println!(
                "    {} Downloaded: {} ({})",
                style("✓").green().bold(),
                path.file_name().unwrap_or_default().to_string_lossy(),
                format_kb(size)
            );
        }
        Err(e) => println!("    {} {}", style("✗").red().bold(), e),
    }
}

fn print_summary(music_out: &Path, sfx_out: &Path) {
    println!("\n{}", style("─".repeat(60)).dim());
    println!("{}", style("Download Summary").bold());

    let (music_count, music_bytes) = mp3_census(music_out);
    let (sfx_count, sfx_bytes) = mp3_census_recursive(sfx_out);

    println!("Music tracks:  {} files ({})", music_count, format_mb(music_bytes));
    println!("Sound effects: {} files ({})", sfx_count, format_mb(sfx_bytes));
    println!(
        "Total:         {} files ({})",
        music_count + sfx_count,
        format_mb(music_bytes + sfx_bytes)
    );

    println!("\nOutput:");
    println!("  Music: {}", music_out.display());
    println!("  SFX:   {}", sfx_out.display());
}
