use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Full payload returned by the analysis service for one uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub report: CleaningReport,
    #[serde(default)]
    pub charts: Vec<ChartDescriptor>,
}

/// Row counts before/after cleaning, plus a per-category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_before: u64,
    pub rows_after: u64,
    pub cleaning_summary: CleaningSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleaningSummary {
    pub missing_values: u64,
    pub invalid_types: u64,
    pub duplicates_removed: u64,
}

/// Declared chart kind. The service sends a free-form string; unknown
/// values are preserved in [`ChartKind::Other`] and pass through the
/// pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
    Histogram,
    Box,
    Heatmap,
    Other(String),
}

impl ChartKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Histogram => "histogram",
            ChartKind::Box => "box",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Other(s) => s,
        }
    }
}

impl From<&str> for ChartKind {
    fn from(s: &str) -> Self {
        match s {
            "line" => ChartKind::Line,
            "bar" => ChartKind::Bar,
            "pie" => ChartKind::Pie,
            "scatter" => ChartKind::Scatter,
            "histogram" => ChartKind::Histogram,
            "box" => ChartKind::Box,
            "heatmap" => ChartKind::Heatmap,
            other => ChartKind::Other(other.to_string()),
        }
    }
}

impl Serialize for ChartKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChartKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ChartKind::from(s.as_str()))
    }
}

/// One chart request as emitted by the service.
///
/// `plotly_json` is kept as a raw [`Value`] on purpose: a malformed
/// embedded plot spec must degrade that single chart to a "no data"
/// state, never fail decoding of the whole payload. Use
/// [`ChartDescriptor::spec`] to parse it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDescriptor {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(default)]
    pub plotly_json: Value,
}

impl ChartDescriptor {
    /// Parse the embedded plot spec. Errors here are terminal for this
    /// chart only.
    pub fn spec(&self) -> Result<PlotSpec, serde_json::Error> {
        serde_json::from_value(self.plotly_json.clone())
    }
}

/// Embedded declarative plot specification: data series plus a partial
/// layout the service may or may not have filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlotSpec {
    #[serde(default)]
    pub data: Vec<Trace>,
    #[serde(default)]
    pub layout: Map<String, Value>,
}

/// One data series: paired x/y values plus style hints.
///
/// Fields the pipeline does not interpret are carried through
/// losslessly in `extra`, so arbitrary Plotly trace attributes survive
/// a round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Trace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub line: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub marker: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trace {
    /// Original line color hint, if the service provided one.
    pub fn line_color(&self) -> Option<&str> {
        self.line.get("color").and_then(Value::as_str)
    }

    /// First x value, used by the temporal-axis heuristic.
    pub fn first_x(&self) -> Option<&Value> {
        self.x.as_ref().and_then(|x| x.first())
    }

    /// True when both coordinate arrays are present but disagree on
    /// length. Such a trace is unrenderable for any chart kind.
    pub fn coordinates_mismatched(&self) -> bool {
        matches!((&self.x, &self.y), (Some(x), Some(y)) if x.len() != y.len())
    }

    /// True when the trace carries a valid, index-aligned x/y pair.
    pub fn is_renderable(&self) -> bool {
        self.x.is_some() && self.y.is_some() && !self.coordinates_mismatched()
    }

    /// Rebuild the trace as a plain JSON object, preserving all
    /// uninterpreted fields.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut obj = self.extra.clone();
        if let Some(name) = &self.name {
            obj.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(x) = &self.x {
            obj.insert("x".to_string(), Value::Array(x.clone()));
        }
        if let Some(y) = &self.y {
            obj.insert("y".to_string(), Value::Array(y.clone()));
        }
        if !self.line.is_empty() {
            obj.insert("line".to_string(), Value::Object(self.line.clone()));
        }
        if !self.marker.is_empty() {
            obj.insert("marker".to_string(), Value::Object(self.marker.clone()));
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_kind_round_trips_unknown_strings() {
        let kind: ChartKind = serde_json::from_value(serde_json::json!("violin")).unwrap();
        assert_eq!(kind, ChartKind::Other("violin".into()));
        assert_eq!(
            serde_json::to_value(&kind).unwrap(),
            serde_json::json!("violin")
        );
    }

    #[test]
    fn trace_preserves_unknown_fields() {
        let raw = serde_json::json!({
            "x": [1, 2],
            "y": [3, 4],
            "mode": "lines+markers",
            "hovertemplate": "%{y}"
        });
        let trace: Trace = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            trace.extra.get("mode"),
            Some(&serde_json::json!("lines+markers"))
        );
        assert_eq!(Value::Object(trace.to_object()), raw);
    }

    #[test]
    fn mismatched_coordinates_detected() {
        let trace: Trace = serde_json::from_value(serde_json::json!({
            "x": [1, 2, 3],
            "y": [1, 2]
        }))
        .unwrap();
        assert!(trace.coordinates_mismatched());
        assert!(!trace.is_renderable());
    }
}
