use crate::types::{
    MusicRequirement, RankedMatch, RequirementSummary, ScoredCandidate, ScoringReport,
};

/// Keep the `n` highest-scoring candidates.
///
/// The sort is stable and descending: candidates with equal scores keep the
/// relative order the search service returned them in.
pub fn select_top_n(mut scored: Vec<ScoredCandidate>, n: usize) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(n);
    scored
}

/// Assemble the serializable scoring report for one music requirement.
///
/// Total over well-formed inputs; an empty candidate slice produces a
/// report with an empty `top_matches` list.
pub fn build_music_report(
    req: &MusicRequirement,
    search_query: &str,
    top_matches: &[ScoredCandidate],
) -> ScoringReport {
    ScoringReport {
        track_number: req.track_number,
        title: req.title.clone(),
        requirements: RequirementSummary {
            genre: req.genre.clone(),
            mood: req.mood.clone(),
            bpm: req.bpm.clone(),
            instruments: req.instruments.clone(),
            duration: req.target_duration_seconds,
        },
        search_query: search_query.to_string(),
        top_matches: top_matches
            .iter()
            .enumerate()
            .map(|(i, m)| RankedMatch {
                rank: i + 1,
                score: m.score,
                sound_id: m.sound.id,
                name: m.sound.name.clone(),
                url: m.sound.url.clone(),
            })
            .collect(),
    }
}
