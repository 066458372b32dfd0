//! Theme-aware layout composition.
//!
//! Merges a reshaped series list with the fixed style policy and the
//! current theme into a fully resolved, renderable spec. The merge is
//! governed by two explicit ownership sets: top-level layout fields the
//! composer owns outright ([`OWNED_FIELDS`]) and axis sub-fields it
//! owns inside a deep-merged axis object ([`OWNED_AXIS_FIELDS`]).
//! Owned fields always win over whatever the analysis service emitted;
//! everything else passes through untouched.

use crate::models::ChartKind;
use crate::normalize::StyledTrace;
use crate::theme::{Palette, ThemeMode};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Ten-color accent cycle assigned to traces by index, identical in
/// both themes.
pub const COLORWAY: [&str; 10] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#6366f1", "#14b8a6",
    "#f97316", "#06b6d4",
];

/// Top-level layout fields the composer owns. Caller-supplied values
/// are replaced outright, except the axis objects, which are owned at
/// sub-field granularity (see [`OWNED_AXIS_FIELDS`]).
pub const OWNED_FIELDS: [&str; 12] = [
    "autosize",
    "margin",
    "paper_bgcolor",
    "plot_bgcolor",
    "font",
    "xaxis",
    "yaxis",
    "colorway",
    "legend",
    "height",
    "hovermode",
    "hoverlabel",
];

/// Axis sub-fields the composer owns. The rest of a caller-supplied
/// axis object (notably its title text) survives the merge.
pub const OWNED_AXIS_FIELDS: [&str; 8] = [
    "tickfont",
    "gridcolor",
    "linecolor",
    "linewidth",
    "showgrid",
    "zeroline",
    "tickformat",
    "tickangle",
];

const AXIS_LINE_COLOR: &str = "#FFFFFF";
const CHART_HEIGHT: u64 = 400;
const DATE_TICK_FORMAT: &str = "%b %Y";
const DATE_TICK_ANGLE: i64 = 30;

/// Fully resolved, presentation-ready chart specification.
///
/// Immutable once produced: every field the pipeline owns is concrete,
/// independent of later theme transitions or caller mutation. Passed to
/// the rendering primitive as one declarative JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableSpec {
    pub data: Vec<StyledTrace>,
    pub layout: Map<String, Value>,
}

/// Merge reshaped series, the caller's partial layout, and the current
/// theme into a renderable spec.
///
/// Pure and idempotent: identical inputs always compose to an identical
/// spec, and only font/grid colors vary between themes.
pub fn compose(
    series: Vec<StyledTrace>,
    base_layout: &Map<String, Value>,
    theme: ThemeMode,
    kind: &ChartKind,
) -> RenderableSpec {
    let palette = theme.palette();
    let mut layout = base_layout.clone();

    layout.insert("autosize".to_string(), json!(true));
    layout.insert(
        "margin".to_string(),
        json!({ "l": 50, "r": 50, "b": 50, "t": 30, "pad": 4 }),
    );
    layout.insert("paper_bgcolor".to_string(), json!("rgba(0,0,0,0)"));
    layout.insert("plot_bgcolor".to_string(), json!("rgba(0,0,0,0)"));
    layout.insert(
        "font".to_string(),
        json!({ "color": palette.font_color, "size": 14 }),
    );
    layout.insert(
        "xaxis".to_string(),
        compose_axis(base_layout.get("xaxis"), &palette, kind, true),
    );
    layout.insert(
        "yaxis".to_string(),
        compose_axis(base_layout.get("yaxis"), &palette, kind, false),
    );
    layout.insert("colorway".to_string(), json!(COLORWAY));
    layout.insert(
        "legend".to_string(),
        json!({
            "font": { "color": "#FFFFFF", "size": 13 },
            "bgcolor": "rgba(0,0,0,0)",
            "bordercolor": "#FFFFFF",
            "borderwidth": 1
        }),
    );
    layout.insert("height".to_string(), json!(CHART_HEIGHT));
    layout.insert("hovermode".to_string(), json!("closest"));
    layout.insert(
        "hoverlabel".to_string(),
        json!({
            "bgcolor": "#1F2937",
            "bordercolor": "#FFFFFF",
            "font": { "color": "#FFFFFF", "size": 14 }
        }),
    );

    RenderableSpec { data: series, layout }
}

/// Deep-merge one axis: start from the caller's axis object and
/// overwrite exactly the owned sub-fields. The date tick format and
/// rotation land on the x axis of `line` charts only; every other
/// axis is left unformatted and unrotated.
fn compose_axis(base: Option<&Value>, palette: &Palette, kind: &ChartKind, x_axis: bool) -> Value {
    let mut axis = base
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    // Title text passes through; only its font is owned.
    let mut title = axis
        .get("title")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    title.insert(
        "font".to_string(),
        json!({ "color": palette.font_color, "size": 16 }),
    );
    axis.insert("title".to_string(), Value::Object(title));

    axis.insert(
        "tickfont".to_string(),
        json!({ "color": palette.font_color, "size": 14 }),
    );
    axis.insert("gridcolor".to_string(), json!(palette.grid_color));
    axis.insert("linecolor".to_string(), json!(AXIS_LINE_COLOR));
    axis.insert("linewidth".to_string(), json!(2));
    axis.insert("showgrid".to_string(), json!(true));
    axis.insert("zeroline".to_string(), json!(false));

    if x_axis && *kind == ChartKind::Line {
        axis.insert("tickformat".to_string(), json!(DATE_TICK_FORMAT));
        axis.insert("tickangle".to_string(), json!(DATE_TICK_ANGLE));
    } else {
        axis.remove("tickformat");
        axis.insert("tickangle".to_string(), json!(0));
    }

    Value::Object(axis)
}
