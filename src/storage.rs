use crate::layout::RenderableSpec;
use crate::models::CleaningReport;
use crate::pipeline::ChartPresentation;
use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct SavedChart<'a> {
    title: &'a str,
    spec: &'a RenderableSpec,
}

/// Save one composed spec as pretty JSON.
pub fn save_spec_json<P: AsRef<Path>>(spec: &RenderableSpec, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(spec)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save every ready chart as a pretty JSON array of `{title, spec}`
/// objects. Charts in the "no data" state are skipped.
pub fn save_specs_json<P: AsRef<Path>>(
    charts: &[(String, ChartPresentation)],
    path: P,
) -> Result<()> {
    let ready: Vec<SavedChart<'_>> = charts
        .iter()
        .filter_map(|(title, p)| {
            p.spec().map(|spec| SavedChart {
                title: title.as_str(),
                spec,
            })
        })
        .collect();
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&ready)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save the cleaning breakdown as CSV with header.
pub fn save_report_csv<P: AsRef<Path>>(report: &CleaningReport, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("category", "count", "percent"))?;
    for row in report.summary_rows() {
        wtr.serialize((row.category, row.count, row.percent))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the full cleaning report as pretty JSON.
pub fn save_report_json<P: AsRef<Path>>(report: &CleaningReport, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(report)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
