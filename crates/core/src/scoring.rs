//! Candidate scoring against extracted requirements.
//!
//! Both scorers are pure and total: identical inputs always produce the
//! same score, missing candidate fields contribute zero, and the result is
//! clamped to [0, 100]. The music scorer applies its caps to the running
//! total after each keyword pass, not to each pass independently; changing
//! that changes scores whenever an earlier pass lands near a cap.

use crate::types::{MusicRequirement, SoundCandidate};

/// Score how well a sound matches a music requirement, 0–100.
pub fn music_match_score(req: &MusicRequirement, sound: &SoundCandidate) -> f64 {
    let name = sound.name.to_lowercase();
    let tags: Vec<String> = sound.tags.iter().map(|t| t.to_lowercase()).collect();
    let description = sound.description.to_lowercase();

    let mut score = 0.0_f64;

    // Genre keywords split on whitespace only, 5 points each.
    for keyword in split_keywords(&req.genre, false) {
        if field_match(&keyword, &name, &tags, &description) {
            score += 5.0;
        }
    }
    score = score.min(25.0);

    // Mood keywords split on whitespace and commas, 4 points each.
    for keyword in split_keywords(&req.mood, true) {
        if field_match(&keyword, &name, &tags, &description) {
            score += 4.0;
        }
    }
    score = score.min(50.0);

    // Instrument keywords, 3 points each.
    for keyword in split_keywords(&req.instruments, true) {
        if field_match(&keyword, &name, &tags, &description) {
            score += 3.0;
        }
    }
    score = score.min(65.0);

    // Duration proximity. A zero target disables the pass, as does an
    // unreported candidate duration.
    if let Some(target) = req.target_duration_seconds {
        if target != 0.0 && sound.duration > 0.0 {
            let diff = (target - sound.duration).abs();
            if diff < 5.0 {
                score += 10.0;
            } else if diff < 10.0 {
                score += 7.0;
            } else if diff < 20.0 {
                score += 4.0;
            }
        }
    }

    // Rating quality, discounted toward zero for sounds with few voters.
    if sound.avg_rating > 0.0 {
        let weight = (sound.num_ratings as f64 / 10.0).min(1.0);
        score += (sound.avg_rating / 5.0) * 10.0 * weight;
    }

    // License preference: CC0 over attribution-required.
    if sound.license.contains("Creative Commons 0") || sound.license.contains("CC0") {
        score += 5.0;
    } else if sound.license.contains("Attribution") {
        score += 3.0;
    }

    score.min(100.0)
}

/// Score how well a sound matches one effect name from a category, 0–100.
pub fn effect_match_score(effect_name: &str, sound: &SoundCandidate) -> f64 {
    let name = sound.name.to_lowercase();
    let tags: Vec<String> = sound.tags.iter().map(|t| t.to_lowercase()).collect();
    let description = sound.description.to_lowercase();

    let keywords = split_keywords(effect_name, false);

    let mut score = 0.0_f64;

    // Name tiers are mutually exclusive: every keyword present beats some.
    if keywords.iter().all(|kw| name.contains(kw.as_str())) {
        score += 40.0;
    } else if keywords.iter().any(|kw| name.contains(kw.as_str())) {
        score += 20.0;
    }

    // Unlike the music scorer, a keyword here only needs to appear inside
    // a tag, not equal one.
    let tag_matches = keywords
        .iter()
        .filter(|kw| tags.iter().any(|tag| tag.contains(kw.as_str())))
        .count();
    score += (tag_matches as f64 * 10.0).min(30.0);

    let description_matches = keywords
        .iter()
        .filter(|kw| description.contains(kw.as_str()))
        .count();
    score += (description_matches as f64 * 5.0).min(15.0);

    // No voter-count discount here.
    score += (sound.avg_rating / 5.0) * 15.0;

    score.min(100.0)
}

/// Lowercased keywords from free requirement text. Commas become
/// separators only where the document format uses comma lists.
fn split_keywords(text: &str, split_commas: bool) -> Vec<String> {
    let lowered = text.to_lowercase();
    let lowered = if split_commas {
        lowered.replace(',', " ")
    } else {
        lowered
    };
    lowered.split_whitespace().map(str::to_string).collect()
}

// Name and description match on substring; tags on exact membership.
fn field_match(keyword: &str, name: &str, tags: &[String], description: &str) -> bool {
    name.contains(keyword) || tags.iter().any(|tag| tag == keyword) || description.contains(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Previews;

    // -----------------------------------------------------------------------
    // Fixture constructors
    // -----------------------------------------------------------------------

    fn music_req(genre: &str, mood: &str, instruments: &str, duration: Option<f64>) -> MusicRequirement {
        MusicRequirement {
            track_number: 1,
            title: "Fixture".to_string(),
            time_range: String::new(),
            genre: genre.to_string(),
            mood: mood.to_string(),
            bpm: "120".to_string(),
            instruments: instruments.to_string(),
            target_duration_seconds: duration,
        }
    }

    fn sound(name: &str, tags: &[&str], description: &str) -> SoundCandidate {
        SoundCandidate {
            id: 1,
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: description.to_string(),
            duration: 0.0,
            previews: Previews::default(),
            license: String::new(),
            avg_rating: 0.0,
            num_ratings: 0,
            username: String::new(),
            url: String::new(),
        }
    }

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    // -----------------------------------------------------------------------
    // Music scoring
    // -----------------------------------------------------------------------

    #[test]
    fn music_score_reproduces_full_scenario() {
        let req = music_req(
            "orchestral cinematic",
            "epic, triumphant",
            "strings, brass",
            Some(30.0),
        );
        let mut candidate = sound("Epic Orchestral Strings", &["epic", "orchestral", "strings"], "");
        candidate.duration = 32.0;
        candidate.license = "Creative Commons 0".to_string();
        candidate.avg_rating = 4.5;
        candidate.num_ratings = 20;

        // genre "orchestral" 5, mood "epic" 4, instruments "strings" 3,
        // duration |30-32| < 5 → 10, rating 4.5/5*10*1 = 9, license 5.
        let score = music_match_score(&req, &candidate);
        assert!(approx(score, 36.0), "expected 36.0, got {score}");
    }

    #[test]
    fn music_score_is_deterministic() {
        let req = music_req("orchestral", "epic", "strings", Some(30.0));
        let mut candidate = sound("Epic Orchestral", &["strings"], "sweeping score");
        candidate.duration = 31.0;
        candidate.avg_rating = 3.7;
        candidate.num_ratings = 4;
        let first = music_match_score(&req, &candidate);
        let second = music_match_score(&req, &candidate);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn music_score_stays_in_bounds() {
        let req = music_req(
            "epic epic epic epic epic epic epic",
            "epic, epic, epic, epic, epic, epic, epic, epic, epic, epic, epic, epic, epic, epic",
            "epic, epic, epic, epic, epic, epic, epic, epic",
            Some(30.0),
        );
        let mut candidate = sound("Epic", &["epic"], "epic");
        candidate.duration = 30.0;
        candidate.license = "CC0".to_string();
        candidate.avg_rating = 5.0;
        candidate.num_ratings = 100;
        let score = music_match_score(&req, &candidate);
        assert!((0.0..=100.0).contains(&score), "score {score} out of bounds");
        // Running caps: 25 + (genre already spent the headroom) 25 + 15 + 10 + 10 + 5.
        assert!(approx(score, 90.0), "expected 90.0, got {score}");
    }

    #[test]
    fn genre_cap_applies_to_running_total() {
        // Six matching genre keywords would be 30 points uncapped.
        let req = music_req("epic dark epic dark epic dark", "", "", None);
        let candidate = sound("epic dark", &[], "");
        let score = music_match_score(&req, &candidate);
        assert!(approx(score, 25.0), "expected genre pass capped at 25, got {score}");
    }

    #[test]
    fn adding_a_matching_tag_never_decreases_the_score() {
        let req = music_req("cinematic orchestral epic dark heavy", "", "", None);
        let mut candidate = sound("", &[], "");
        let mut previous = music_match_score(&req, &candidate);
        for tag in ["cinematic", "orchestral", "epic", "dark", "heavy"] {
            candidate.tags.push(tag.to_string());
            let next = music_match_score(&req, &candidate);
            assert!(
                next >= previous,
                "score dropped from {previous} to {next} after adding tag {tag:?}",
            );
            previous = next;
        }
        assert!(approx(previous, 25.0), "five matches should reach the 25 cap");
    }

    #[test]
    fn music_tags_match_exactly_not_by_substring() {
        let req = music_req("orch", "", "", None);
        let tagged = sound("", &["orchestral"], "");
        assert!(approx(music_match_score(&req, &tagged), 0.0));

        let named = sound("orchestral hit", &[], "");
        assert!(approx(music_match_score(&req, &named), 5.0));
    }

    #[test]
    fn duration_tiers_step_down_with_distance() {
        let req = music_req("", "", "", Some(30.0));
        let mut candidate = sound("", &[], "");
        for (duration, expected) in [(32.0, 10.0), (37.0, 7.0), (45.0, 4.0), (55.0, 0.0)] {
            candidate.duration = duration;
            let score = music_match_score(&req, &candidate);
            assert!(
                approx(score, expected),
                "duration {duration}: expected {expected}, got {score}",
            );
        }
    }

    #[test]
    fn zero_target_duration_disables_proximity() {
        let req = music_req("", "", "", Some(0.0));
        let mut candidate = sound("", &[], "");
        candidate.duration = 1.0;
        assert!(approx(music_match_score(&req, &candidate), 0.0));

        let unknown = music_req("", "", "", None);
        assert!(approx(music_match_score(&unknown, &candidate), 0.0));
    }

    #[test]
    fn rating_weight_discounts_few_voters() {
        let req = music_req("", "", "", None);
        let mut candidate = sound("", &[], "");
        candidate.avg_rating = 5.0;
        candidate.num_ratings = 5;
        // 5/5 * 10 * (5/10) = 5.
        assert!(approx(music_match_score(&req, &candidate), 5.0));

        candidate.num_ratings = 40;
        assert!(approx(music_match_score(&req, &candidate), 10.0));
    }

    #[test]
    fn unrated_candidate_contributes_nothing() {
        let req = music_req("", "", "", None);
        let mut candidate = sound("", &[], "");
        candidate.num_ratings = 50;
        assert!(approx(music_match_score(&req, &candidate), 0.0));
    }

    #[test]
    fn license_preference_tiers() {
        let req = music_req("", "", "", None);
        let mut candidate = sound("", &[], "");

        candidate.license = "Creative Commons 0".to_string();
        assert!(approx(music_match_score(&req, &candidate), 5.0));

        candidate.license = "Attribution 4.0".to_string();
        assert!(approx(music_match_score(&req, &candidate), 3.0));

        candidate.license = "All rights reserved".to_string();
        assert!(approx(music_match_score(&req, &candidate), 0.0));
    }

    // -----------------------------------------------------------------------
    // Effect scoring
    // -----------------------------------------------------------------------

    #[test]
    fn effect_partial_name_match_takes_lower_tier() {
        // "glass" appears in the name, "break" does not.
        let candidate = sound("Glass Shattering Sound", &[], "");
        let score = effect_match_score("glass break", &candidate);
        assert!(approx(score, 20.0), "expected 20.0, got {score}");
    }

    #[test]
    fn effect_full_name_match_takes_top_tier() {
        let candidate = sound("Glass Break Close", &[], "");
        let score = effect_match_score("glass break", &candidate);
        assert!(approx(score, 40.0), "expected 40.0, got {score}");
    }

    #[test]
    fn effect_tags_match_by_substring() {
        let candidate = sound("", &["glass-smash", "breaking"], "");
        // Both keywords appear inside tags: 2 * 10.
        let score = effect_match_score("glass break", &candidate);
        assert!(approx(score, 20.0), "expected 20.0, got {score}");
    }

    #[test]
    fn effect_tag_and_description_passes_are_capped() {
        let candidate = sound(
            "",
            &["one", "two", "three", "four", "five"],
            "one two three four five",
        );
        let score = effect_match_score("one two three four five", &candidate);
        // Tag pass 5*10 capped at 30, description pass 5*5 capped at 15.
        assert!(approx(score, 45.0), "expected 45.0, got {score}");
    }

    #[test]
    fn effect_quality_has_no_voter_discount() {
        let mut candidate = sound("", &[], "");
        candidate.avg_rating = 4.0;
        candidate.num_ratings = 1;
        let score = effect_match_score("thunder", &candidate);
        assert!(approx(score, 12.0), "expected 12.0, got {score}");
    }

    #[test]
    fn effect_score_stays_in_bounds() {
        let mut candidate = sound(
            "glass break glass break",
            &["glass", "break", "glass-break"],
            "glass break glass break",
        );
        candidate.avg_rating = 5.0;
        let score = effect_match_score("glass break", &candidate);
        assert!((0.0..=100.0).contains(&score), "score {score} out of bounds");
        // 40 + 20 + 10 + 15 = 85.
        assert!(approx(score, 85.0), "expected 85.0, got {score}");
    }

    #[test]
    fn effect_score_is_deterministic() {
        let candidate = sound("Door Creak", &["door", "creak"], "old wooden door");
        let first = effect_match_score("door creak", &candidate);
        let second = effect_match_score("door creak", &candidate);
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
