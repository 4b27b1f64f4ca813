use serde::{Deserialize, Serialize};

/// One recorded visit location, serialized as a `[lat, lon]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker(pub f64, pub f64);

impl Marker {
    /// Synthetic coordinate: latitude in [-90, 90], longitude in [-180, 180].
    pub fn synthetic() -> Self {
        Self(
            fastrand::f64() * 180.0 - 90.0,
            fastrand::f64() * 360.0 - 180.0,
        )
    }

    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }
}

/// Parallel label/count arrays for the last-7-days chart, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartWindow {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

/// Everything one count event produces for display.
#[derive(Debug)]
pub struct VisitOutcome {
    pub count: u64,
    pub quote: &'static str,
    pub milestone: Option<&'static str>,
    pub markers: Vec<Marker>,
    pub chart: ChartWindow,
}

/// Page context for the renderer. One variant per route that renders HTML,
/// so a count page always carries its map and chart together.
#[derive(Debug)]
pub enum Page {
    Welcome,
    Count(VisitOutcome),
    About,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_serializes_as_pair() {
        let marker = Marker(12.5, -30.25);
        let json = serde_json::to_string(&marker).unwrap();
        assert_eq!(json, "[12.5,-30.25]");

        let back: Marker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, marker);
    }

    #[test]
    fn synthetic_markers_stay_in_range() {
        fastrand::seed(42);
        for _ in 0..200 {
            let marker = Marker::synthetic();
            assert!((-90.0..=90.0).contains(&marker.lat()));
            assert!((-180.0..=180.0).contains(&marker.lon()));
        }
    }
}
