use crate::errors::AppError;
use crate::models::ChartWindow;
use crate::storage::VisitStore;
use chrono::{Duration, Local, NaiveDate};

const WINDOW_DAYS: usize = 7;

pub async fn chart_window(store: &dyn VisitStore) -> Result<ChartWindow, AppError> {
    chart_window_at(Local::now().date_naive(), store).await
}

/// Last 7 calendar dates ending at `today`, oldest first, with the histogram
/// count for each (0 where no bucket exists).
pub async fn chart_window_at(
    today: NaiveDate,
    store: &dyn VisitStore,
) -> Result<ChartWindow, AppError> {
    let labels = window_labels(today);
    let mut data = Vec::with_capacity(labels.len());
    for label in &labels {
        data.push(store.daily_count(label).await?);
    }

    Ok(ChartWindow { labels, data })
}

fn window_labels(today: NaiveDate) -> Vec<String> {
    (0..WINDOW_DAYS)
        .rev()
        .map(|offset| date_key(today - Duration::days(offset as i64)))
        .collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn window_is_ordered_oldest_to_newest_and_zero_filled() {
        let store = MemoryStore::default();
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let yesterday = today - Duration::days(1);

        for _ in 0..3 {
            store.increment_daily(&date_key(today)).await.unwrap();
        }
        for _ in 0..5 {
            store.increment_daily(&date_key(yesterday)).await.unwrap();
        }

        let window = chart_window_at(today, &store).await.unwrap();
        assert_eq!(window.labels.len(), 7);
        assert_eq!(window.data.len(), 7);
        assert_eq!(window.labels[6], "2026-08-06");
        assert_eq!(window.labels[0], "2026-07-31");
        assert_eq!(window.data[6], 3);
        assert_eq!(window.data[5], 5);
        assert_eq!(&window.data[..5], &[0, 0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn counts_outside_the_window_are_ignored() {
        let store = MemoryStore::default();
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let last_month = today - Duration::days(30);
        store.increment_daily(&date_key(last_month)).await.unwrap();

        let window = chart_window_at(today, &store).await.unwrap();
        assert!(window.data.iter().all(|&count| count == 0));
    }

    #[test]
    fn window_spans_a_month_boundary() {
        let labels = window_labels(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(labels.first().map(String::as_str), Some("2026-02-24"));
        assert_eq!(labels.last().map(String::as_str), Some("2026-03-02"));
    }
}
