use crate::types::ScoredCandidate;

/// Render scored matches the way the CLI lists them, best first.
pub fn format_match_listing(matches: &[ScoredCandidate]) -> String {
    let mut output = String::new();

    for (i, m) in matches.iter().enumerate() {
        output.push_str(&format!("\n  [{}] Score: {:.1}/100\n", i + 1, m.score));
        output.push_str(&format!("      Name: {}\n", m.sound.name));
        output.push_str(&format!("      Duration: {:.1}s\n", m.sound.duration));
        output.push_str(&format!(
            "      Rating: {:.1}/5 ({} ratings)\n",
            m.sound.avg_rating, m.sound.num_ratings
        ));
        output.push_str(&format!("      License: {}\n", m.sound.license));
        let tags: Vec<&str> = m.sound.tags.iter().take(5).map(String::as_str).collect();
        output.push_str(&format!("      Tags: {}\n", tags.join(", ")));
    }

    output
}

/// Kilobytes with one decimal, for per-file download messages.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Megabytes with two decimals, for the closing summary.
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
