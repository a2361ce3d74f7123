use serde::{Deserialize, Serialize};

/// Duration assigned to a track when its time range cannot be parsed.
pub const FALLBACK_DURATION_SECONDS: f64 = 30.0;

/// BPM window assigned when the document's BPM field cannot be parsed.
pub const FALLBACK_BPM_RANGE: (i32, i32) = (80, 140);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicRequirement {
    pub track_number: u32,
    pub title: String,
    pub time_range: String,
    pub genre: String,
    pub mood: String,
    pub bpm: String,
    pub instruments: String,
    /// Derived from `time_range`. A value of `Some(0.0)` disables the
    /// duration-proximity pass during scoring.
    pub target_duration_seconds: Option<f64>,
}

impl MusicRequirement {
    /// Derive a Freesound search query from the genre text.
    ///
    /// Known genre families map to curated queries that search well;
    /// anything else falls back to the first two genre words.
    pub fn search_query(&self) -> String {
        let genre = self.genre.to_lowercase();

        if genre.contains("orchestral") {
            "orchestral cinematic".to_string()
        } else if genre.contains("electronic") && genre.contains("pop") {
            "electronic music loop".to_string()
        } else if genre.contains("electronic") {
            "electronic music".to_string()
        } else if genre.contains("industrial") {
            "industrial electronic".to_string()
        } else if genre.contains("progressive") {
            "progressive music".to_string()
        } else if genre.contains("tech") || genre.contains("corporate") {
            "corporate tech music".to_string()
        } else if genre.contains("epic") {
            "epic music".to_string()
        } else {
            let words: Vec<&str> = genre.split_whitespace().take(2).collect();
            if words.is_empty() {
                "music".to_string()
            } else {
                words.join(" ")
            }
        }
    }

    /// BPM window for this track. A hyphenated field is read as an explicit
    /// range, a single value becomes ±5, and anything unparseable falls back
    /// to [`FALLBACK_BPM_RANGE`].
    pub fn bpm_range(&self) -> (i32, i32) {
        if self.bpm.contains('-') {
            let parts: Vec<&str> = self.bpm.split('-').collect();
            let low = parts.first().and_then(|p| p.trim().parse::<i32>().ok());
            let high = parts.get(1).and_then(|p| p.trim().parse::<i32>().ok());
            match (low, high) {
                (Some(low), Some(high)) => (low, high),
                _ => FALLBACK_BPM_RANGE,
            }
        } else {
            match self.bpm.trim().parse::<i32>() {
                Ok(bpm) => (bpm - 5, bpm + 5),
                Err(_) => FALLBACK_BPM_RANGE,
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundEffectCategory {
    pub name: String,
    /// Effect descriptions in document order.
    pub effects: Vec<String>,
}

/// One Freesound search result. Read-only input to scoring; absent fields
/// deserialize to their neutral values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundCandidate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Seconds; 0 means the service did not report a duration.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub previews: Previews,
    #[serde(default)]
    pub license: String,
    /// 0–5; 0 means unrated.
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub num_ratings: u32,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Previews {
    #[serde(rename = "preview-hq-mp3", default, skip_serializing_if = "Option::is_none")]
    pub hq_mp3: Option<String>,
    #[serde(rename = "preview-lq-mp3", default, skip_serializing_if = "Option::is_none")]
    pub lq_mp3: Option<String>,
}

impl Previews {
    /// Best available preview URL, HQ first.
    pub fn best_mp3(&self) -> Option<&str> {
        self.hq_mp3.as_deref().or(self.lq_mp3.as_deref())
    }
}

#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub score: f64,
    pub sound: SoundCandidate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoringReport {
    pub track_number: u32,
    pub title: String,
    pub requirements: RequirementSummary,
    pub search_query: String,
    pub top_matches: Vec<RankedMatch>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequirementSummary {
    pub genre: String,
    pub mood: String,
    pub bpm: String,
    pub instruments: String,
    pub duration: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankedMatch {
    pub rank: usize,
    pub score: f64,
    pub sound_id: u64,
    pub name: String,
    pub url: String,
}
