//! Per-chart display orchestration.
//!
//! Thin glue over the normalizer and the composer: one descriptor in,
//! one presentation state out. Parse failures and empty series degrade
//! to [`ChartPresentation::NoData`]; nothing here ever aborts the rest
//! of a report.

use crate::layout::{RenderableSpec, compose};
use crate::models::{AnalysisResult, ChartDescriptor, ChartKind};
use crate::normalize::{RoleAssignment, StyledTrace, alternating_roles, normalize_traces};
use crate::theme::ThemeMode;
use log::warn;
use serde_json::{Map, Value};

/// Presentation outcome for one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPresentation {
    /// Fully composed, ready for the rendering primitive.
    Ready(RenderableSpec),
    /// Nothing renderable survived; show an explicit empty state.
    NoData,
}

impl ChartPresentation {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartPresentation::NoData)
    }

    pub fn spec(&self) -> Option<&RenderableSpec> {
        match self {
            ChartPresentation::Ready(spec) => Some(spec),
            ChartPresentation::NoData => None,
        }
    }
}

/// Run the full pipeline for one descriptor under the given theme.
pub fn present(descriptor: &ChartDescriptor, theme: ThemeMode) -> ChartPresentation {
    ChartSession::new(descriptor).presentation(theme)
}

/// Present every chart of an analysis result, keeping order and titles.
pub fn present_all(
    result: &AnalysisResult,
    theme: ThemeMode,
) -> Vec<(String, ChartPresentation)> {
    result
        .charts
        .iter()
        .map(|c| (c.title.clone(), present(c, theme)))
        .collect()
}

/// One chart's display state across theme transitions.
///
/// Normalization runs exactly once, at construction: a descriptor's
/// structural shape does not depend on theme, so a transition only
/// re-runs the composer over the cached series.
#[derive(Debug, Clone)]
pub struct ChartSession {
    title: String,
    kind: ChartKind,
    base_layout: Map<String, Value>,
    series: Vec<StyledTrace>,
}

impl ChartSession {
    pub fn new(descriptor: &ChartDescriptor) -> Self {
        Self::with_roles(descriptor, alternating_roles)
    }

    pub fn with_roles(descriptor: &ChartDescriptor, roles: RoleAssignment) -> Self {
        let (series, base_layout) = match descriptor.spec() {
            Ok(spec) => {
                let series =
                    normalize_traces(&descriptor.kind, &spec.data, roles, &descriptor.title);
                (series, spec.layout)
            }
            Err(e) => {
                warn!("chart '{}': unreadable plot spec: {e}", descriptor.title);
                (Vec::new(), Map::new())
            }
        };
        Self {
            title: descriptor.title.clone(),
            kind: descriptor.kind.clone(),
            base_layout,
            series,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of renderable series after normalization.
    pub fn trace_count(&self) -> usize {
        self.series.len()
    }

    /// Compose the current presentation for a theme. Idempotent; safe
    /// to call again on every theme notification.
    pub fn presentation(&self, theme: ThemeMode) -> ChartPresentation {
        if self.series.is_empty() {
            return ChartPresentation::NoData;
        }
        ChartPresentation::Ready(compose(
            self.series.clone(),
            &self.base_layout,
            theme,
            &self.kind,
        ))
    }
}
