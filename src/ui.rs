use crate::models::{Page, VisitOutcome};

pub fn render(page: &Page) -> String {
    match page {
        Page::Welcome => compose(
            "Welcome to Visit Tracker!",
            "Track your visits with ease. Click the button below to see how many times this page has been visited.",
            Sections {
                actions: r#"<a href="/count" class="btn btn-primary">View Visit Count</a>"#.to_string(),
                ..Sections::default()
            },
        ),
        Page::Count(outcome) => compose(
            "Visit Count",
            &format!("This page has been visited {} times.", outcome.count),
            count_sections(outcome),
        ),
        Page::About => compose(
            "About Visit Tracker",
            "Visit Tracker counts every visit to this page, drops a marker somewhere on the world map for each one, and charts the last seven days of activity. Each milestone along the way gets its own little celebration.",
            Sections::default(),
        ),
    }
}

#[derive(Default)]
struct Sections {
    quote: String,
    milestone: String,
    map: String,
    chart: String,
    actions: String,
}

fn count_sections(outcome: &VisitOutcome) -> Sections {
    let markers: Vec<[f64; 2]> = outcome
        .markers
        .iter()
        .map(|marker| [marker.lat(), marker.lon()])
        .collect();

    Sections {
        quote: QUOTE_SECTION.replace("{{QUOTE}}", &escape(outcome.quote)),
        milestone: outcome
            .milestone
            .map(|text| MILESTONE_SECTION.replace("{{MILESTONE}}", &escape(text)))
            .unwrap_or_default(),
        map: MAP_SECTION.replace("{{MARKERS}}", &json_array(&markers)),
        chart: CHART_SECTION
            .replace("{{LABELS}}", &json_array(&outcome.chart.labels))
            .replace("{{DATA}}", &json_array(&outcome.chart.data)),
        actions: concat!(
            r#"<a href="/count" class="btn btn-primary">Count Again</a>"#,
            "\n      ",
            r#"<a href="/reset" class="btn btn-danger">Reset Counter</a>"#,
        )
        .to_string(),
    }
}

fn compose(title: &str, message: &str, sections: Sections) -> String {
    BASE_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{MESSAGE}}", &escape(message))
        .replace("{{QUOTE_SECTION}}", &sections.quote)
        .replace("{{MILESTONE_SECTION}}", &sections.milestone)
        .replace("{{MAP_SECTION}}", &sections.map)
        .replace("{{CHART_SECTION}}", &sections.chart)
        .replace("{{ACTIONS}}", &sections.actions)
}

fn json_array<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const QUOTE_SECTION: &str = r#"<p class="quote"><em>"{{QUOTE}}"</em></p>"#;

const MILESTONE_SECTION: &str = r#"<p class="milestone">{{MILESTONE}}</p>"#;

const MAP_SECTION: &str = r#"<div id="visit-map"></div>
    <script>
      const map = L.map('visit-map').setView([20, 0], 1);
      L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
        maxZoom: 18,
        attribution: '&copy; OpenStreetMap'
      }).addTo(map);
      const markers = {{MARKERS}};
      markers.forEach((pair) => L.marker(pair).addTo(map));
    </script>"#;

const CHART_SECTION: &str = r#"<canvas id="visit-chart"></canvas>
    <script>
      new Chart(document.getElementById('visit-chart').getContext('2d'), {
        type: 'line',
        data: {
          labels: {{LABELS}},
          datasets: [{
            label: 'Daily Visits',
            data: {{DATA}},
            borderColor: '#ff775c',
            borderWidth: 2,
            fill: false
          }]
        },
        options: {
          scales: {
            y: { beginAtZero: true }
          }
        }
      });
    </script>"#;

const BASE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet" />
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Chart.js/4.0.1/chart.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js"></script>
  <style>
    body {
      background: linear-gradient(135deg, #242f46, #ff775c);
      color: white;
      font-family: Arial, sans-serif;
      padding: 50px 0;
    }

    .container {
      background-color: #ffffff;
      color: #333;
      padding: 40px;
      border-radius: 15px;
      box-shadow: 0 10px 20px rgba(0, 0, 0, 0.2);
      margin-bottom: 20px;
    }

    .logo {
      width: 100px;
      margin-bottom: 20px;
    }

    .btn-primary,
    .btn-danger {
      background-color: #ff775c;
      border: none;
    }

    .btn-primary:hover,
    .btn-danger:hover {
      background-color: #ff5c42;
    }

    .btn-secondary {
      background-color: #242f46;
      color: #ffffff;
      border: 1px solid #ff775c;
    }

    .btn-secondary:hover {
      background-color: #ff5c42;
      color: #ffffff;
    }

    .btn-container {
      margin-top: 30px;
    }

    .milestone {
      margin-top: 20px;
      font-style: italic;
      color: #ff775c;
    }

    #visit-map {
      height: 300px;
      margin-top: 20px;
      border-radius: 10px;
    }

    #visit-chart {
      margin-top: 20px;
    }
  </style>
</head>
<body>
  <div class="container text-center">
    <img src="/static/logo.svg" alt="Visit Tracker logo" class="logo" />
    <h1>{{TITLE}}</h1>
    <p class="lead">{{MESSAGE}}</p>
    {{QUOTE_SECTION}}
    {{MILESTONE_SECTION}}
    {{MAP_SECTION}}
    {{CHART_SECTION}}
    <div class="btn-container">
      {{ACTIONS}}
      <a href="/" class="btn btn-secondary">Home</a>
    </div>
  </div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChartWindow, Marker};

    fn outcome(milestone: Option<&'static str>) -> VisitOutcome {
        VisitOutcome {
            count: 42,
            quote: "Do or do not, there is no try. - Yoda",
            milestone,
            markers: vec![Marker(10.0, 20.0), Marker(-5.5, 100.0)],
            chart: ChartWindow {
                labels: vec!["2026-08-05".to_string(), "2026-08-06".to_string()],
                data: vec![5, 3],
            },
        }
    }

    #[test]
    fn welcome_page_offers_the_count_action_only() {
        let html = render(&Page::Welcome);
        assert!(html.contains(r#"href="/count""#));
        assert!(!html.contains(r#"href="/reset""#));
        assert!(!html.contains("visit-map"));
        assert!(!html.contains("visit-chart"));
    }

    #[test]
    fn count_page_carries_quote_map_chart_and_reset() {
        let html = render(&Page::Count(outcome(None)));
        assert!(html.contains("visited 42 times"));
        assert!(html.contains("there is no try"));
        assert!(html.contains(r#"href="/reset""#));
        assert!(html.contains("[[10.0,20.0],[-5.5,100.0]]"));
        assert!(html.contains(r#"["2026-08-05","2026-08-06"]"#));
        assert!(html.contains("[5,3]"));
        assert!(!html.contains("class=\"milestone\""));
    }

    #[test]
    fn milestone_section_appears_only_when_present() {
        let html = render(&Page::Count(outcome(Some("Milestone: 100 visits!"))));
        assert!(html.contains("Milestone: 100 visits!"));
        assert!(html.contains("class=\"milestone\""));
    }

    #[test]
    fn about_page_has_no_action_buttons() {
        let html = render(&Page::About);
        assert!(!html.contains(r#"href="/count""#));
        assert!(!html.contains(r#"href="/reset""#));
        assert!(html.contains(r#"href="/""#));
    }

    #[test]
    fn no_placeholder_survives_rendering() {
        for page in [&Page::Welcome, &Page::Count(outcome(None)), &Page::About] {
            assert!(!render(page).contains("{{"), "unreplaced placeholder");
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>"a" & 'b'</script>"#),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }
}
