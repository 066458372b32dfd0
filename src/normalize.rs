//! Chart descriptor normalization: decide the presentation treatment
//! for each trace and produce a fully reshaped series list.
//!
//! Only `line` descriptors get special handling. When their x axis
//! looks date-like, the series alternate between a filled bar and a
//! smoothed area rendition; otherwise every line is smoothed. All
//! other chart kinds pass through with their data untouched.
//!
//! The alternation is keyed purely by series position, not by what a
//! series means (it cannot tell "actual" from "forecast"). That is a
//! deliberate, known limitation of the heuristic; the role assignment
//! is injectable via [`normalize_with_roles`] so a smarter policy can
//! replace it without touching the rest of the pipeline.

use crate::models::{ChartDescriptor, ChartKind, Trace};
use log::warn;
use regex::Regex;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Default accent used when a trace carries no color hint (`#3b82f6`).
pub const DEFAULT_ACCENT: &str = "#3b82f6";
/// Default translucent area fill when no color hint is present.
pub const TRANSLUCENT_ACCENT: &str = "rgba(59, 130, 246, 0.3)";
/// Hex alpha suffix appended to an inherited line color for area fills.
const FILL_ALPHA_SUFFIX: &str = "50";
/// Bar width as a fraction of the category width.
pub const BAR_WIDTH: f64 = 0.7;
const BAR_OPACITY: f64 = 0.8;
const BAR_BORDER_COLOR: &str = "#FFFFFF";
/// Stroke width applied to smoothed/area lines.
pub const STROKE_WIDTH: f64 = 3.0;
const SPLINE_SMOOTHING: f64 = 1.3;
/// Marker size forced on smoothed and area traces.
pub const MARKER_SIZE: u64 = 8;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("iso date regex"));

/// Presentation treatment assigned to one trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Filled bar series (temporal composite, even positions).
    Bar,
    /// Smoothed area series filled to the baseline (odd positions).
    AreaSpline,
    /// Smoothed line with enlarged markers (non-temporal lines).
    SmoothLine,
    /// Style pass-through for non-line descriptors.
    Unchanged,
}

/// Role a series plays inside the temporal composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRole {
    Bar,
    Area,
}

/// Pure position-to-role policy used by the temporal composite.
pub type RoleAssignment = fn(usize) -> SeriesRole;

/// Default policy: even positions become bars, odd positions areas.
pub fn alternating_roles(index: usize) -> SeriesRole {
    if index % 2 == 0 {
        SeriesRole::Bar
    } else {
        SeriesRole::Area
    }
}

/// One normalized series: the original trace plus its treatment.
///
/// Serializes to the final Plotly trace object, with the treatment
/// overlaid on the original fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledTrace {
    pub kind: TraceKind,
    pub trace: Trace,
}

impl StyledTrace {
    /// Render this series as a Plotly trace object.
    pub fn to_plotly(&self) -> Value {
        let mut obj = self.trace.to_object();
        match self.kind {
            TraceKind::Unchanged => {}
            TraceKind::Bar => {
                obj.insert("type".to_string(), json!("bar"));
                obj.insert("width".to_string(), json!(BAR_WIDTH));
                obj.insert(
                    "marker".to_string(),
                    json!({
                        "color": self.trace.line_color().unwrap_or(DEFAULT_ACCENT),
                        "opacity": BAR_OPACITY,
                        "line": { "width": 1, "color": BAR_BORDER_COLOR }
                    }),
                );
            }
            TraceKind::AreaSpline => {
                obj.insert("type".to_string(), json!("scatter"));
                obj.insert("fill".to_string(), json!("tozeroy"));
                let fillcolor = match self.trace.line_color() {
                    Some(c) => format!("{c}{FILL_ALPHA_SUFFIX}"),
                    None => TRANSLUCENT_ACCENT.to_string(),
                };
                obj.insert("fillcolor".to_string(), json!(fillcolor));
                obj.insert("line".to_string(), Value::Object(smoothed_line(&self.trace)));
                obj.insert(
                    "marker".to_string(),
                    Value::Object(enlarged_marker(&self.trace)),
                );
            }
            TraceKind::SmoothLine => {
                obj.insert("line".to_string(), Value::Object(smoothed_line(&self.trace)));
                obj.insert(
                    "marker".to_string(),
                    Value::Object(enlarged_marker(&self.trace)),
                );
            }
        }
        Value::Object(obj)
    }
}

impl Serialize for StyledTrace {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plotly().serialize(serializer)
    }
}

fn smoothed_line(trace: &Trace) -> serde_json::Map<String, Value> {
    let mut line = trace.line.clone();
    line.insert("width".to_string(), json!(STROKE_WIDTH));
    line.insert("shape".to_string(), json!("spline"));
    line.insert("smoothing".to_string(), json!(SPLINE_SMOOTHING));
    line
}

fn enlarged_marker(trace: &Trace) -> serde_json::Map<String, Value> {
    let mut marker = trace.marker.clone();
    marker.insert("size".to_string(), json!(MARKER_SIZE));
    marker
}

/// Temporal signal: true iff at least one trace opens with a string x
/// value whose prefix matches `YYYY-MM-DD`. Only the first x value of
/// each trace is inspected.
pub fn has_temporal_axis(traces: &[Trace]) -> bool {
    traces.iter().any(|t| {
        t.first_x()
            .and_then(Value::as_str)
            .is_some_and(|s| ISO_DATE.is_match(s))
    })
}

/// Normalize one descriptor into its reshaped series list using the
/// default alternating role policy.
///
/// Never fails: an unreadable embedded plot spec or a descriptor whose
/// traces are all invalid yields an empty list, which displays as an
/// explicit "no data" state downstream.
pub fn normalize(descriptor: &ChartDescriptor) -> Vec<StyledTrace> {
    normalize_with_roles(descriptor, alternating_roles)
}

/// Like [`normalize`], with an injected role policy for the temporal
/// composite.
pub fn normalize_with_roles(descriptor: &ChartDescriptor, roles: RoleAssignment) -> Vec<StyledTrace> {
    let spec = match descriptor.spec() {
        Ok(spec) => spec,
        Err(e) => {
            warn!("chart '{}': unreadable plot spec: {e}", descriptor.title);
            return Vec::new();
        }
    };
    normalize_traces(&descriptor.kind, &spec.data, roles, &descriptor.title)
}

/// Core reshaping over already-parsed traces.
///
/// Invalid traces are dropped, never raised: a mismatched x/y pair is
/// unrenderable for every chart kind; a missing coordinate array only
/// disqualifies a trace on the `line` path, since other kinds (pie,
/// heatmap) legitimately omit x/y.
pub fn normalize_traces(
    kind: &ChartKind,
    traces: &[Trace],
    roles: RoleAssignment,
    title: &str,
) -> Vec<StyledTrace> {
    if *kind != ChartKind::Line {
        return traces
            .iter()
            .enumerate()
            .filter(|(i, t)| keep_trace(t, false, *i, title))
            .map(|(_, t)| StyledTrace {
                kind: TraceKind::Unchanged,
                trace: t.clone(),
            })
            .collect();
    }

    let temporal = has_temporal_axis(traces);
    let survivors = traces
        .iter()
        .enumerate()
        .filter(|(i, t)| keep_trace(t, true, *i, title))
        .map(|(_, t)| t);

    survivors
        .enumerate()
        .map(|(idx, trace)| {
            let kind = if temporal {
                match roles(idx) {
                    SeriesRole::Bar => TraceKind::Bar,
                    SeriesRole::Area => TraceKind::AreaSpline,
                }
            } else {
                TraceKind::SmoothLine
            };
            StyledTrace {
                kind,
                trace: trace.clone(),
            }
        })
        .collect()
}

fn keep_trace(trace: &Trace, require_coordinates: bool, index: usize, title: &str) -> bool {
    if trace.coordinates_mismatched() {
        warn!("chart '{title}': dropping trace {index}: x/y lengths differ");
        return false;
    }
    if require_coordinates && !trace.is_renderable() {
        warn!("chart '{title}': dropping trace {index}: missing coordinate array");
        return false;
    }
    true
}
