//! sheetviz
//!
//! A lightweight Rust library for turning spreadsheet-analysis results
//! into presentation-ready chart specifications. Pairs with the
//! `sheetviz` CLI.
//!
//! ### Features
//! - Upload an `.xlsx`/`.xls` file to the analysis service and decode
//!   the `{report, charts}` payload
//! - Normalize chart descriptors: temporal line charts become an
//!   alternating bar/area composite, plain line charts get smoothed
//! - Compose theme-aware (light/dark) Plotly layouts with an explicit
//!   owned-field merge policy
//! - Cleaning-report arithmetic and CSV/JSON export of reports and specs
//!
//! ### Example
//! ```no_run
//! use sheetviz::{Client, ThemeMode, pipeline};
//!
//! let client = Client::default();
//! let result = client.analyze("sales.xlsx")?;
//! println!("{} rows removed", result.report.rows_removed());
//! for (title, presentation) in pipeline::present_all(&result, ThemeMode::Dark) {
//!     match presentation.spec() {
//!         Some(spec) => println!("{title}: {} traces", spec.data.len()),
//!         None => println!("{title}: no data"),
//!     }
//! }
//! # Ok::<(), sheetviz::AnalyzeError>(())
//! ```

pub mod api;
pub mod layout;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod theme;

pub use api::{AnalyzeError, Client};
pub use layout::{RenderableSpec, compose};
pub use models::{AnalysisResult, ChartDescriptor, ChartKind, CleaningReport, PlotSpec, Trace};
pub use normalize::{SeriesRole, StyledTrace, TraceKind, normalize};
pub use pipeline::{ChartPresentation, ChartSession, present};
pub use theme::{ThemeMode, ThemeSignal};
