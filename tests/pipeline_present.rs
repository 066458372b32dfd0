use serde_json::json;
use sheetviz::models::{AnalysisResult, ChartDescriptor};
use sheetviz::pipeline::{ChartSession, present, present_all};
use sheetviz::{ChartPresentation, ThemeMode};

fn descriptor(raw: serde_json::Value) -> ChartDescriptor {
    serde_json::from_value(raw).unwrap()
}

#[test]
fn valid_line_chart_is_ready() {
    let d = descriptor(json!({
        "title": "Sales",
        "type": "line",
        "plotly_json": {
            "data": [{ "x": ["2024-01-01", "2024-02-01"], "y": [1, 2] }],
            "layout": { "xaxis": { "title": { "text": "Month" } } }
        }
    }));
    let p = present(&d, ThemeMode::Dark);
    let spec = p.spec().expect("ready");
    assert_eq!(spec.data.len(), 1);
    assert_eq!(spec.layout["xaxis"]["title"]["text"], json!("Month"));
}

#[test]
fn unreadable_spec_degrades_to_no_data() {
    let d = descriptor(json!({
        "title": "broken",
        "type": "line",
        "plotly_json": [1, 2, 3]
    }));
    assert!(present(&d, ThemeMode::Light).is_no_data());
}

#[test]
fn empty_series_degrades_to_no_data() {
    let d = descriptor(json!({
        "title": "empty",
        "type": "line",
        "plotly_json": { "data": [], "layout": {} }
    }));
    assert_eq!(present(&d, ThemeMode::Light), ChartPresentation::NoData);
}

#[test]
fn theme_transition_recomposes_without_reshaping() {
    let d = descriptor(json!({
        "title": "Sales",
        "type": "line",
        "plotly_json": {
            "data": [
                { "x": ["2024-01-01"], "y": [1] },
                { "x": ["2024-02-01"], "y": [2] }
            ],
            "layout": {}
        }
    }));
    let session = ChartSession::new(&d);
    assert_eq!(session.trace_count(), 2);

    let dark = session.presentation(ThemeMode::Dark);
    let light = session.presentation(ThemeMode::Light);
    let (dark, light) = (dark.spec().unwrap().clone(), light.spec().unwrap().clone());

    // structural shape is theme-independent
    assert_eq!(dark.data, light.data);
    assert_ne!(dark.layout["font"], light.layout["font"]);

    // repeating a theme reproduces the identical spec
    assert_eq!(session.presentation(ThemeMode::Dark).spec().unwrap(), &dark);
}

#[test]
fn present_all_keeps_order_and_degrades_per_chart() {
    let result: AnalysisResult = serde_json::from_value(json!({
        "report": {
            "rows_before": 10,
            "rows_after": 10,
            "cleaning_summary": {
                "missing_values": 0,
                "invalid_types": 0,
                "duplicates_removed": 0
            }
        },
        "charts": [
            {
                "title": "ok",
                "type": "bar",
                "plotly_json": { "data": [{ "x": [1], "y": [1] }], "layout": {} }
            },
            { "title": "broken", "type": "line", "plotly_json": false },
            {
                "title": "also ok",
                "type": "line",
                "plotly_json": { "data": [{ "x": [1, 2], "y": [1, 2] }], "layout": {} }
            }
        ]
    }))
    .unwrap();

    let charts = present_all(&result, ThemeMode::Light);
    assert_eq!(charts.len(), 3);
    assert_eq!(charts[0].0, "ok");
    assert!(!charts[0].1.is_no_data());
    assert!(charts[1].1.is_no_data());
    assert!(!charts[2].1.is_no_data());
}
