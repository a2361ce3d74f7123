pub mod document;
pub mod error;
pub mod format;
pub mod freesound;
pub mod paths;
pub mod scoring;
pub mod selection;
pub mod types;

pub use document::{
    SkippedTrack, parse_music_requirements, parse_music_requirements_with,
    parse_sound_effect_categories,
};
pub use error::{Result, SoundscoutError};
pub use format::{format_kb, format_match_listing, format_mb};
pub use freesound::{
    API_KEY_ENV, FreesoundClient, api_key_from_env, load_report, music_search_filter, save_report,
};
pub use paths::{
    category_dir_name, get_music_dir, get_report_path, get_sfx_dir, mp3_census,
    mp3_census_recursive, safe_file_name,
};
pub use scoring::{effect_match_score, music_match_score};
pub use selection::{build_music_report, select_top_n};
pub use types::{
    MusicRequirement, Previews, RankedMatch, RequirementSummary, ScoredCandidate, ScoringReport,
    SoundCandidate, SoundEffectCategory,
};
