//! CSV export and the anonymized log-log scatter plot.

use crate::aggregate::ResultRow;
use crate::error::{PresenceError, Result};
use plotters::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

/// Exact CSV header
pub const CSV_COLUMNS: [&str; 3] = ["name", "ads_papers", "google_results"];

/// Plot size in pixels (6in at 200dpi)
const PLOT_SIZE: (u32, u32) = (1200, 1200);

/// Lower edge of both log axes; true zero counts are drawn here
const AXIS_FLOOR: f64 = 0.5;

/// Family name the bundled font is registered under
const PLOT_FONT: &str = "sans-serif";

/// DejaVu Sans, see assets/fonts/DejaVuSans-LICENSE
static PLOT_FONT_BYTES: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// One CSV line; failed lookups serialize as empty fields
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    name: &'a str,
    ads_papers: Option<u64>,
    google_results: Option<u64>,
}

impl<'a> From<&'a ResultRow> for CsvRecord<'a> {
    fn from(row: &'a ResultRow) -> Self {
        Self {
            name: &row.name,
            ads_papers: row.ads_count.count(),
            google_results: row.web_count.count(),
        }
    }
}

/// Write rows to `path`, replacing any existing file.
pub fn write_csv(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv_to(file, rows)?;
    info!(path = %path.display(), rows = rows.len(), "Saved CSV");
    Ok(())
}

/// Write the header and one record per row to `writer`.
///
/// The header is written even when `rows` is empty.
pub fn write_csv_to<W: Write>(writer: W, rows: &[ResultRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_COLUMNS)?;
    for row in rows {
        wtr.serialize(CsvRecord::from(row))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Points for the scatter plot: (ADS papers, Google results) of every row
/// where both lookups succeeded, in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterPlot {
    points: Vec<(u64, u64)>,
}

impl ScatterPlot {
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        Self {
            points: rows.iter().filter_map(ResultRow::counts).collect(),
        }
    }

    pub fn points(&self) -> &[(u64, u64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis ranges covering every point, for x then y
    fn axis_ranges(&self) -> (Range<f64>, Range<f64>) {
        let x_max = self.points.iter().map(|p| p.0).max().unwrap_or(0);
        let y_max = self.points.iter().map(|p| p.1).max().unwrap_or(0);
        (axis_range(x_max), axis_range(y_max))
    }

    /// Render to a PNG at `path`, replacing any existing file.
    ///
    /// No names or per-point labels are drawn.
    pub fn render(&self, path: &Path) -> Result<()> {
        register_plot_font()?;
        let (x_range, y_range) = self.axis_ranges();

        let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(40)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc("ADS papers")
            .y_desc("Google results")
            .label_style((PLOT_FONT, 22))
            .axis_desc_style((PLOT_FONT, 28))
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(BLACK.mix(0.05))
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(self.points.iter().map(|&(x, y)| {
                Circle::new((plot_coord(x), plot_coord(y)), 6, BLUE.mix(0.7).filled())
            }))
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;

        info!(path = %path.display(), points = self.len(), "Saved scatter plot");
        Ok(())
    }
}

/// Build the plot from `rows` and render it to `path`.
pub fn render_scatter(path: &Path, rows: &[ResultRow]) -> Result<ScatterPlot> {
    let plot = ScatterPlot::from_rows(rows);
    plot.render(path)?;
    Ok(plot)
}

fn axis_range(max: u64) -> Range<f64> {
    // Twice the largest point, never below 10
    let upper = (max as f64 * 2.0).max(10.0);
    AXIS_FLOOR..upper
}

fn plot_coord(count: u64) -> f64 {
    (count as f64).max(AXIS_FLOOR)
}

/// Register the bundled font with plotters once per process.
fn register_plot_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();

    let ok = *REGISTERED.get_or_init(|| {
        plotters::style::register_font(PLOT_FONT, FontStyle::Normal, PLOT_FONT_BYTES).is_ok()
    });
    if ok {
        Ok(())
    } else {
        Err(PresenceError::Plot("bundled plot font could not be loaded".to_string()))
    }
}

fn plot_err<E: std::fmt::Display>(e: E) -> PresenceError {
    PresenceError::Plot(e.to_string())
}
