use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::Deserialize;
use tokio::fs;

use crate::{
    error::{Result, SoundscoutError},
    paths::safe_file_name,
    types::{ScoringReport, SoundCandidate},
};

pub const API_BASE_URL: &str = "https://freesound.org/apiv2";
pub const API_KEY_ENV: &str = "FREESOUND_API_KEY";

const SEARCH_FIELDS: &str =
    "id,name,tags,description,duration,previews,license,avg_rating,num_ratings,username,url";

/// Read the Freesound API key from the environment.
pub fn api_key_from_env() -> Result<String> {
    std::env::var(API_KEY_ENV).map_err(|_| SoundscoutError::MissingApiKey {
        env_var: API_KEY_ENV.to_string(),
    })
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SoundCandidate>,
}

pub struct FreesoundClient {
    client: Client,
    api_key: String,
}

impl FreesoundClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(api_key_from_env()?))
    }

    /// Text search, best-rated first. The returned order is the service's
    /// ranking; selection preserves it when breaking score ties.
    pub async fn search(
        &self,
        query: &str,
        filter: Option<&str>,
        page_size: u8,
    ) -> Result<Vec<SoundCandidate>> {
        let mut params = vec![
            ("query", query.to_string()),
            ("fields", SEARCH_FIELDS.to_string()),
            ("page_size", page_size.to_string()),
            ("sort", "rating_desc".to_string()),
        ];
        if let Some(filter) = filter {
            params.push(("filter", filter.to_string()));
        }

        let response = self
            .client
            .get(format!("{API_BASE_URL}/search/text/"))
            .header("Authorization", format!("Token {}", self.api_key))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await?;

        Ok(response.results)
    }

    /// Download a sound's preview mp3 (HQ first, LQ fallback) into
    /// `dest_dir` and write a metadata sidecar next to it. Returns the
    /// audio file path.
    pub async fn download_preview(
        &self,
        sound: &SoundCandidate,
        dest_dir: &Path,
        prefix: &str,
    ) -> Result<PathBuf> {
        let preview_url = sound
            .previews
            .best_mp3()
            .ok_or(SoundscoutError::PreviewUnavailable { sound_id: sound.id })?;

        let response = self.client.get(preview_url).send().await?;
        if !response.status().is_success() {
            return Err(SoundscoutError::DownloadFailed {
                sound_id: sound.id,
                reason: format!("preview request returned {}", response.status()),
            });
        }
        let bytes = response.bytes().await?;

        let file_name = preview_file_name(sound, prefix);
        let file_path = dest_dir.join(&file_name);
        fs::write(&file_path, &bytes).await?;

        let metadata = serde_json::json!({
            "id": sound.id,
            "name": sound.name,
            "duration": sound.duration,
            "tags": sound.tags,
            "description": sound.description,
            "username": sound.username,
            "license": sound.license,
            "url": sound.url,
            "avg_rating": sound.avg_rating,
            "num_ratings": sound.num_ratings,
            "filename": file_name,
        });
        fs::write(
            dest_dir.join(format!("{file_name}.json")),
            serde_json::to_string_pretty(&metadata)?,
        )
        .await?;

        Ok(file_path)
    }
}

/// Search filter for a music requirement. Short tracks search a tighter
/// duration band; longer tracks also accept loops.
pub fn music_search_filter(target_duration: Option<f64>) -> &'static str {
    match target_duration {
        Some(d) if d != 0.0 && d < 60.0 => "duration:[10 TO 120] tag:music",
        Some(d) if d != 0.0 => "duration:[30 TO 300] tag:music OR tag:loop",
        _ => "tag:music",
    }
}

fn preview_file_name(sound: &SoundCandidate, prefix: &str) -> String {
    let safe_name = safe_file_name(&sound.name, 50);
    if prefix.is_empty() {
        format!("freesound_{}_{safe_name}.mp3", sound.id)
    } else {
        format!("{prefix}_{}_{safe_name}.mp3", sound.id)
    }
}

/// Persist a scoring report as pretty-printed JSON.
pub async fn save_report(report: &ScoringReport, path: &Path) -> Result<()> {
    let pretty = serde_json::to_string_pretty(report)?;
    fs::write(path, &pretty).await?;
    Ok(())
}

/// Load a previously saved scoring report.
pub async fn load_report(path: &Path) -> Result<ScoringReport> {
    let json = fs::read_to_string(path).await?;
    let report: ScoringReport = serde_json::from_str(&json)?;
    Ok(report)
}
