//! Read-only projections over the record log: the grouped timeline text,
//! theme coverage counts, and theme filtering.

use std::collections::BTreeMap;

use contracts::{LogRecord, Theme};

/// Renders the log grouped by movie: a header line each time the movie
/// label changes from the previous record, then one line per record.
pub fn format_timeline(log: &[LogRecord]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<&str> = None;
    for record in log {
        if current != Some(record.movie.as_str()) {
            current = Some(record.movie.as_str());
            lines.push(format!("\n=== {} ===", record.movie));
        }
        lines.push(record.to_string());
    }
    lines.join("\n")
}

/// Occurrences per theme across the whole log, skips included, ordered by
/// descending count and then by theme name.
pub fn theme_counts(log: &[LogRecord]) -> Vec<(Theme, usize)> {
    let mut counts: BTreeMap<Theme, usize> = BTreeMap::new();
    for record in log {
        for theme in &record.themes {
            *counts.entry(*theme).or_insert(0) += 1;
        }
    }
    let mut ordered: Vec<(Theme, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    ordered
}

/// Records tagged with the given theme, in log order.
pub fn records_with_theme(log: &[LogRecord], theme: Theme) -> Vec<&LogRecord> {
    log.iter()
        .filter(|record| record.themes.contains(&theme))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::WorldSnapshot;

    fn record(movie: &str, event: &str, themes: Vec<Theme>) -> LogRecord {
        LogRecord {
            movie: movie.to_string(),
            event: event.to_string(),
            desc: "desc".to_string(),
            themes,
            myth: Vec::new(),
            snapshot: WorldSnapshot {
                matrix_control: 1.0,
                zion_defense: 0.4,
                smith_factor: 0.0,
                humans_free: 1_000,
                humans_enslaved: 1_000_000_000,
                neo_awake: false,
                neo_alive: true,
                trinity_alive: true,
                zion_alive: true,
                peace: false,
                prophecy_valid: true,
            },
        }
    }

    #[test]
    fn timeline_emits_one_header_per_movie_change() {
        let log = vec![
            record("Prelude", "Start", vec![Theme::ControlSystems]),
            record("Matrix (1999)", "Neo awakens (Red Pill)", Vec::new()),
            record("Matrix (1999)", "Rescue Morpheus", Vec::new()),
            record("Matrix Reloaded (2003)", "Keymaker freed", Vec::new()),
        ];
        let text = format_timeline(&log);
        assert_eq!(text.matches("=== Prelude ===").count(), 1);
        assert_eq!(text.matches("=== Matrix (1999) ===").count(), 1);
        assert_eq!(text.matches("=== Matrix Reloaded (2003) ===").count(), 1);
        assert_eq!(text.matches("- ").count(), 4);
        let header_at = text.find("=== Matrix (1999) ===").expect("header present");
        let first_event = text.find("- Neo awakens").expect("line present");
        assert!(header_at < first_event);
    }

    #[test]
    fn theme_counts_order_by_count_then_name() {
        let log = vec![
            record("Prelude", "a", vec![Theme::ControlSystems, Theme::FreeWill]),
            record("Prelude", "b", vec![Theme::ControlSystems, Theme::Determinism]),
            record("Prelude", "c", vec![Theme::FreeWill]),
        ];
        let counts = theme_counts(&log);
        assert_eq!(
            counts,
            vec![
                (Theme::ControlSystems, 2),
                (Theme::FreeWill, 2),
                (Theme::Determinism, 1),
            ]
        );
    }

    #[test]
    fn records_with_theme_preserves_log_order() {
        let log = vec![
            record("Prelude", "a", vec![Theme::FreeWill]),
            record("Prelude", "b", vec![Theme::Determinism]),
            record("Prelude", "c", vec![Theme::FreeWill]),
        ];
        let hits = records_with_theme(&log, Theme::FreeWill);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].event, "a");
        assert_eq!(hits[1].event, "c");
        assert!(records_with_theme(&log, Theme::SmithShadow).is_empty());
    }
}
