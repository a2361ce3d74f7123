use std::path::{Path, PathBuf};

/// Directory for downloaded music tracks and their scoring reports.
pub fn get_music_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("music_tracks")
}

/// Root directory for downloaded sound effects.
pub fn get_sfx_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("sound_effects")
}

/// Directory name for one effect category.
pub fn category_dir_name(category: &str) -> String {
    category.to_lowercase().replace(' ', "_").replace('&', "and")
}

/// Path of the scoring report for one music track.
pub fn get_report_path(music_dir: &Path, track_number: u32) -> PathBuf {
    music_dir.join(format!("track{track_number:02}_scoring_report.json"))
}

/// File-system-safe rendition of a sound or effect name: word characters
/// kept, runs of whitespace and hyphens collapsed to underscores, then
/// truncated to `max_chars` characters.
pub fn safe_file_name(name: &str, max_chars: usize) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut collapsed = String::new();
    let mut pending_separator = false;
    for c in kept.chars() {
        if c.is_whitespace() || c == '-' {
            pending_separator = true;
        } else {
            if pending_separator {
                collapsed.push('_');
                pending_separator = false;
            }
            collapsed.push(c);
        }
    }

    collapsed.trim_matches('_').chars().take(max_chars).collect()
}

/// Count and total byte size of mp3 files directly inside `dir`.
pub fn mp3_census(dir: &Path) -> (usize, u64) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return (0, 0);
    };

    let mut count = 0;
    let mut bytes = 0;
    for entry in entries.flatten() {
        if is_mp3(&entry.path()) {
            count += 1;
            bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }
    (count, bytes)
}

/// Like [`mp3_census`], descending into subdirectories.
pub fn mp3_census_recursive(dir: &Path) -> (usize, u64) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return (0, 0);
    };

    let mut count = 0;
    let mut bytes = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let (sub_count, sub_bytes) = mp3_census_recursive(&path);
            count += sub_count;
            bytes += sub_bytes;
        } else if is_mp3(&path) {
            count += 1;
            bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }
    (count, bytes)
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase() == "mp3")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_dir_names_are_normalized() {
        assert_eq!(category_dir_name("Impacts & Hits"), "impacts_and_hits");
        assert_eq!(category_dir_name("Ambience"), "ambience");
        assert_eq!(category_dir_name("UI Sounds"), "ui_sounds");
    }

    #[test]
    fn safe_file_name_strips_and_collapses() {
        assert_eq!(safe_file_name("Epic Boom! (take #2)", 50), "Epic_Boom_take_2");
        assert_eq!(safe_file_name("wind -- howling", 50), "wind_howling");
        assert_eq!(safe_file_name("--edges--", 50), "edges");
        assert_eq!(safe_file_name("", 50), "");
    }

    #[test]
    fn safe_file_name_truncates_by_characters() {
        let long = "a".repeat(80);
        assert_eq!(safe_file_name(&long, 50).chars().count(), 50);
        assert_eq!(safe_file_name("glass break", 5), "glass");
    }

    #[test]
    fn report_paths_zero_pad_track_numbers() {
        let dir = get_music_dir(Path::new("/out"));
        assert_eq!(
            get_report_path(&dir, 3),
            Path::new("/out/music_tracks/track03_scoring_report.json")
        );
        assert_eq!(
            get_report_path(&dir, 12),
            Path::new("/out/music_tracks/track12_scoring_report.json")
        );
    }

    #[test]
    fn census_counts_only_mp3s() {
        let root = std::env::temp_dir().join("soundscout_census_test");
        let nested = root.join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("a.mp3"), b"aaaa").unwrap();
        std::fs::write(root.join("a.mp3.json"), b"{}").unwrap();
        std::fs::write(nested.join("b.mp3"), b"bb").unwrap();

        assert_eq!(mp3_census(&root), (1, 4));
        assert_eq!(mp3_census_recursive(&root), (2, 6));
        assert_eq!(mp3_census(Path::new("/nonexistent/soundscout")), (0, 0));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
