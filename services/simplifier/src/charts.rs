use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use corpus::{derived_path, Dataset, Metric};
use plotters::prelude::*;

const PALETTE: [RGBColor; 8] = [
    BLACK,
    RGBColor(128, 128, 128),
    RGBColor(255, 165, 0),
    RGBColor(0, 128, 0),
    RGBColor(165, 42, 42),
    RGBColor(0, 139, 139),
    RED,
    BLUE,
];

/// `<table stem>_<METRIC>_scores.png` next to the table, or
/// `<METRIC>_scores.png` when the table was not saved.
pub fn chart_path(table: Option<&Path>, metric: Metric) -> PathBuf {
    match table {
        Some(t) => derived_path(t, &format!("_{}_scores", metric.name()), Some("png")),
        None => PathBuf::from(format!("{}_scores.png", metric.name())),
    }
}

/// Grouped bars of every column scoring `metric`, one group per row, with
/// a horizontal line at each column's average.
pub fn plot_scores(dataset: &Dataset, metric: Metric, out: &Path) -> Result<()> {
    let series = dataset.score_series(metric);
    if series.is_empty() || dataset.is_empty() {
        bail!("No {} score columns to plot", metric.name());
    }

    let values = series.iter().flat_map(|(_, v)| v.iter().copied()).filter(|v| v.is_finite());
    let (lo, hi) = values.fold((0f64, 0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((hi - lo) * 0.1).max(1.0);
    let (y_min, y_max) = (if lo < 0.0 { lo - pad } else { 0.0 }, hi + pad);

    let n = dataset.len() as f64;
    let width = 0.8 / series.len() as f64;

    let root = BitMapBackend::new(out, (2000, 1400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} Scores", metric.name()), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..n, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Text Sample")
        .y_desc(format!("{} Score", metric.name()))
        .draw()?;

    for (i, (label, values)) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];

        chart.draw_series(values.iter().enumerate().filter(|(_, v)| v.is_finite()).map(|(row, v)| {
            let x0 = row as f64 + 0.1 + i as f64 * width;
            Rectangle::new([(x0, 0.0), (x0 + width, *v)], color.filled())
        }))?;

        let avg = readability::mean(values.iter().copied());
        if avg.is_finite() {
            chart
                .draw_series(LineSeries::new(vec![(0.0, avg), (n, avg)], color.stroke_width(2)))?
                .label(format!("Average {label}: {avg:.2}"))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;
    root.present()?;
    Ok(())
}

/// Renders FRE and WSTF charts; failures are logged, never fatal.
pub fn plot_all(dataset: &Dataset, table: Option<&Path>) {
    for metric in Metric::ALL {
        let out = chart_path(table, metric);
        match plot_scores(dataset, metric, &out) {
            Ok(()) => tracing::info!(path = %out.display(), "saved chart"),
            Err(e) => tracing::warn!(metric = metric.name(), "chart not rendered: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_path() {
        assert_eq!(
            chart_path(Some(Path::new("data/set_analysed.csv")), Metric::Fre),
            PathBuf::from("data/set_analysed_FRE_scores.png")
        );
        assert_eq!(chart_path(None, Metric::Wstf), PathBuf::from("WSTF_scores.png"));
    }
}
