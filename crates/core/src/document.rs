use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FALLBACK_DURATION_SECONDS, MusicRequirement, SoundEffectCategory};

static TRACK_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"### Track (\d+): (.+)\n").unwrap());

// Labels must follow the heading immediately, in exactly this order.
static TRACK_LABELS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A\*\*Time:\*\* (.+)\n- \*\*Genre:\*\* (.+)\n- \*\*Mood:\*\* (.+)\n- \*\*BPM:\*\* (.+)\n- \*\*Instruments:\*\* (.+)\n",
    )
    .unwrap()
});

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"### (.+)\n((?:- \[ \] .+\n)+)").unwrap());
static EFFECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"- \[ \] (.+)").unwrap());

const EFFECTS_SECTION_HEADING: &str = "## Sound Effects Library";

/// A track heading whose block did not match the expected label shape.
#[derive(Debug, Clone, Copy)]
pub struct SkippedTrack<'a> {
    /// The numeric text from the heading, unparsed.
    pub heading_number: &'a str,
    pub title: &'a str,
}

/// Extract music track requirements from document text, in document order.
///
/// Blocks that do not match the expected shape are dropped without error;
/// use [`parse_music_requirements_with`] to observe them.
pub fn parse_music_requirements(text: &str) -> Vec<MusicRequirement> {
    parse_music_requirements_with(text, |_| {})
}

/// Like [`parse_music_requirements`], invoking `on_skip` for every track
/// heading whose block is malformed (missing or reordered labels).
pub fn parse_music_requirements_with(
    text: &str,
    mut on_skip: impl FnMut(SkippedTrack<'_>),
) -> Vec<MusicRequirement> {
    let mut requirements = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TRACK_HEADING_RE.captures_at(text, pos) {
        let heading = caps.get(0).unwrap();
        let number_text = caps.get(1).unwrap().as_str();
        let title = caps.get(2).unwrap().as_str();
        let body = &text[heading.end()..];

        match parse_track_block(number_text, title, body) {
            Some((requirement, body_len)) => {
                requirements.push(requirement);
                pos = heading.end() + body_len;
            }
            None => {
                on_skip(SkippedTrack {
                    heading_number: number_text,
                    title: title.trim(),
                });
                // Resume just past the heading start so a heading embedded
                // later in this line can still be found.
                pos = heading.start() + 1;
            }
        }
    }

    requirements
}

fn parse_track_block(
    number_text: &str,
    title: &str,
    body: &str,
) -> Option<(MusicRequirement, usize)> {
    let caps = TRACK_LABELS_RE.captures(body)?;
    let track_number: u32 = number_text.parse().ok()?;
    let time_range = caps.get(1).unwrap().as_str().trim().to_string();
    let duration = derive_duration(&time_range);

    let requirement = MusicRequirement {
        track_number,
        title: title.trim().to_string(),
        time_range,
        genre: caps.get(2).unwrap().as_str().trim().to_string(),
        mood: caps.get(3).unwrap().as_str().trim().to_string(),
        bpm: caps.get(4).unwrap().as_str().trim().to_string(),
        instruments: caps.get(5).unwrap().as_str().trim().to_string(),
        target_duration_seconds: Some(duration),
    };
    Some((requirement, caps.get(0).unwrap().end()))
}

/// Duration in seconds derived from an `HH:MM:SS - HH:MM:SS` range.
///
/// Anything that does not split into exactly two clock times falls back to
/// [`FALLBACK_DURATION_SECONDS`]. An end time earlier than the start time
/// yields a negative duration, left as computed.
pub fn derive_duration(time_range: &str) -> f64 {
    let parts: Vec<&str> = time_range.split(" - ").collect();
    if parts.len() != 2 {
        return FALLBACK_DURATION_SECONDS;
    }
    match (clock_to_seconds(parts[0]), clock_to_seconds(parts[1])) {
        (Some(start), Some(end)) => (end - start) as f64,
        _ => FALLBACK_DURATION_SECONDS,
    }
}

fn clock_to_seconds(clock: &str) -> Option<i64> {
    let fields: Vec<&str> = clock.split(':').collect();
    if fields.len() < 3 {
        return None;
    }
    let hours: i64 = fields[0].trim().parse().ok()?;
    let minutes: i64 = fields[1].trim().parse().ok()?;
    let seconds: i64 = fields[2].trim().parse().ok()?;
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Extract sound-effect categories from the document's effects section.
///
/// A document without the section yields an empty sequence. Duplicate
/// category headings are not validated; each occurrence yields its own
/// record.
pub fn parse_sound_effect_categories(text: &str) -> Vec<SoundEffectCategory> {
    let Some(start) = text.find(EFFECTS_SECTION_HEADING) else {
        return Vec::new();
    };
    let section = &text[start + EFFECTS_SECTION_HEADING.len()..];
    let section = &section[..section_end(section)];

    CATEGORY_RE
        .captures_iter(section)
        .map(|caps| SoundEffectCategory {
            name: caps.get(1).unwrap().as_str().trim().to_string(),
            effects: EFFECT_RE
                .captures_iter(caps.get(2).unwrap().as_str())
                .map(|c| c.get(1).unwrap().as_str().to_string())
                .collect(),
        })
        .collect()
}

// Offset of the next top-level heading marker (a run of exactly two '#'),
// or the section length. Category headings use three, so they stay inside.
fn section_end(section: &str) -> usize {
    let bytes = section.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' {
            let run_start = i;
            while i < bytes.len() && bytes[i] == b'#' {
                i += 1;
            }
            if i - run_start == 2 {
                return run_start;
            }
        } else {
            i += 1;
        }
    }
    section.len()
}
