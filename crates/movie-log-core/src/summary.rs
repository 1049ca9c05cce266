use movie_log_models::WatchedEntry;

/// Aggregate statistics over the watched list.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

/// Arithmetic means over the watched list. An empty list yields zeros.
pub fn summarize(entries: &[WatchedEntry]) -> WatchedSummary {
    WatchedSummary {
        count: entries.len(),
        avg_imdb_rating: average(entries.iter().map(|entry| entry.imdb_rating)),
        avg_user_rating: average(entries.iter().map(|entry| f64::from(entry.user_rating))),
        avg_runtime: average(entries.iter().map(|entry| f64::from(entry.runtime_minutes))),
    }
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::watched_entry;

    #[test]
    fn test_empty_list_yields_zeros() {
        let summary = summarize(&[]);
        assert_eq!(
            summary,
            WatchedSummary {
                count: 0,
                avg_imdb_rating: 0.0,
                avg_user_rating: 0.0,
                avg_runtime: 0.0,
            }
        );
    }

    #[test]
    fn test_averages_are_arithmetic_means() {
        let mut first = watched_entry("tt0000001");
        first.imdb_rating = 8.0;
        first.user_rating = 6;
        first.runtime_minutes = 100;

        let mut second = watched_entry("tt0000002");
        second.imdb_rating = 6.0;
        second.user_rating = 10;
        second.runtime_minutes = 140;

        let summary = summarize(&[first, second]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_imdb_rating, 7.0);
        assert_eq!(summary.avg_user_rating, 8.0);
        assert_eq!(summary.avg_runtime, 120.0);
    }
}
