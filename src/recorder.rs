use crate::errors::AppError;
use crate::models::{Marker, VisitOutcome};
use crate::stats::{self, date_key};
use crate::storage::VisitStore;
use chrono::Local;

const MILESTONES: [(u64, &str); 3] = [
    (100, "Milestone: 100 visits! The counter is officially warmed up."),
    (500, "Milestone: 500 visits! Halfway to four digits."),
    (1000, "Milestone: 1000 visits! A thousand thanks for stopping by."),
];

const QUOTES: [&str; 5] = [
    "The only way to do great work is to love what you do. - Steve Jobs",
    "Success is not final, failure is not fatal: It is the courage to continue that counts. - Winston Churchill",
    "You miss 100% of the shots you don't take. - Wayne Gretzky",
    "Do or do not, there is no try. - Yoda",
    "Every visit tells a story.",
];

/// One count event: advance the counter and today's histogram bucket, append
/// a synthetic marker, and pick the quote and milestone to display.
///
/// The marker append is a read-modify-write on a single blob; concurrent
/// counts can race and lose markers (see `VisitStore::replace_markers`).
pub async fn record_visit(store: &dyn VisitStore) -> Result<VisitOutcome, AppError> {
    let count = store.increment_visits().await?;
    let today = Local::now().date_naive();
    store.increment_daily(&date_key(today)).await?;

    let mut markers = store.markers().await?;
    markers.push(Marker::synthetic());
    store.replace_markers(&markers).await?;

    let chart = stats::chart_window_at(today, store).await?;

    Ok(VisitOutcome {
        count,
        quote: pick_quote(),
        milestone: milestone_for(count),
        markers,
        chart,
    })
}

/// Clear all three records. Three independent store operations; a crash
/// mid-sequence can leave partial state. Repeated resets are no-ops.
pub async fn reset(store: &dyn VisitStore) -> Result<(), AppError> {
    store.reset_visits().await?;
    store.clear_markers().await?;
    store.clear_daily().await?;
    Ok(())
}

fn pick_quote() -> &'static str {
    QUOTES[fastrand::usize(..QUOTES.len())]
}

fn milestone_for(count: u64) -> Option<&'static str> {
    MILESTONES
        .iter()
        .find(|(at, _)| *at == count)
        .map(|(_, text)| *text)
}
