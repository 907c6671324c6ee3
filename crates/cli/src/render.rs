//! Plain-text rendering of browser state.

use std::fmt::Write;

use popcorn_core::{DetailView, SearchState, WatchedEntry, WatchedStats};

pub fn search(state: &SearchState) -> String {
    if state.is_loading {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return format!("error: {}", error);
    }

    let mut out = format!("Found {} results", state.results.len());
    for (i, item) in state.results.iter().enumerate() {
        let _ = write!(out, "\n{:>3}. {} ({}) [{}]", i + 1, item.title, item.year, item.id);
    }
    out
}

pub fn detail(view: &DetailView) -> String {
    let state = &view.state;
    if state.is_loading {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return format!("error: {}", error);
    }
    let Some(movie) = &state.detail else {
        return String::new();
    };

    let rating = movie
        .rating_external
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", movie.title, movie.year);
    let _ = writeln!(out, "{} • {}", movie.released, movie.runtime_label());
    let _ = writeln!(out, "{}", movie.genre);
    let _ = writeln!(out, "{} IMDb rating", rating);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", movie.plot);
    let _ = writeln!(out, "Starring: {}", movie.actors);
    let _ = writeln!(out, "Directed by: {}", movie.director);
    let _ = writeln!(out);
    match (view.watched_rating, view.pending_rating) {
        (Some(rating), _) => {
            let _ = write!(out, "You rated this movie {}", rating);
        }
        (None, Some(rating)) => {
            let _ = write!(out, "Your rating: {} (type 'add' to add to list)", rating);
        }
        (None, None) => {
            let _ = write!(out, "Rate it with 'rate <1-10>'");
        }
    }
    out
}

pub fn stats(stats: &WatchedStats) -> String {
    format!(
        "{} movie{} | IMDb {:.1} | yours {:.1} | {:.0} min",
        stats.count,
        if stats.count == 1 { "" } else { "s" },
        stats.average_external_rating,
        stats.average_user_rating,
        stats.average_runtime,
    )
}

pub fn watched(entries: &[WatchedEntry]) -> String {
    if entries.is_empty() {
        return "Your watched list is empty".to_string();
    }
    entries
        .iter()
        .map(|e| {
            format!(
                "{} ({}) [{}] IMDb {} | yours {} | {} min",
                e.title, e.year, e.id, e.rating_external, e.user_rating, e.runtime_minutes
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use popcorn_core::testing::fixtures;

    #[test]
    fn test_search_lists_results() {
        let state = SearchState {
            query: "bat".to_string(),
            results: vec![
                fixtures::search_item("tt1", "Batman", "1989"),
                fixtures::search_item("tt2", "Batman Returns", "1992"),
            ],
            is_loading: false,
            error: None,
        };
        let out = search(&state);
        assert!(out.starts_with("Found 2 results"));
        assert!(out.contains("  2. Batman Returns (1992) [tt2]"));
    }

    #[test]
    fn test_search_error_replaces_list() {
        let state = SearchState {
            error: Some("Movie not found".to_string()),
            ..Default::default()
        };
        assert_eq!(search(&state), "error: Movie not found");
    }

    #[test]
    fn test_stats_singular() {
        let out = stats(&WatchedStats {
            count: 1,
            average_external_rating: 7.5,
            average_user_rating: 8.0,
            average_runtime: 120.0,
        });
        assert_eq!(out, "1 movie | IMDb 7.5 | yours 8.0 | 120 min");
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(
            stats(&WatchedStats::default()),
            "0 movies | IMDb 0.0 | yours 0.0 | 0 min"
        );
    }
}
