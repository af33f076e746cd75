//! PNG chart rendering with `plotters`.
//!
//! Two chart shapes cover every report:
//! - [`LineChart`] — labelled curves with markers, an optional dashed
//!   reference line, and an optional log-scaled x axis
//! - [`BarChart`] — grouped bars, one group per category
//!
//! Font sizes, margins, and marker radii scale with the figure height so the
//! high-resolution outputs stay legible.

use std::ops::Range;
use std::path::Path;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::info;

use crate::aggregate::Series;
use crate::config::FigureSize;
use crate::error::{ReportError, Result};

/// Share of a category slot covered by its bars; the rest is the gap.
const GROUP_FILL: f64 = 0.75;

/// Colors of the bar series, in series order.
const BAR_COLORS: [RGBColor; 3] = [BLUE, YELLOW, RED];

impl<E> From<DrawingAreaErrorKind<E>> for ReportError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ReportError::Chart(err.to_string())
    }
}

/// A line chart of one or more speedup curves.
#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    /// Caption above the plot
    pub title: String,
    /// X axis description
    pub x_desc: &'a str,
    /// Y axis description
    pub y_desc: &'a str,
    /// Heading shown as the first legend entry
    pub legend_title: Option<&'a str>,
    /// Curves, drawn with markers in palette order
    pub series: &'a [Series],
    /// Dashed black reference curve (e.g. ideal speedup)
    pub reference: Option<&'a Series>,
    /// Log-scale the x axis
    pub log_x: bool,
}

/// One series of a grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Legend label
    pub label: String,
    /// One value per category
    pub values: Vec<f64>,
}

/// A grouped bar chart: each category gets one bar per series.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    /// X axis description
    pub x_desc: &'a str,
    /// Y axis description
    pub y_desc: &'a str,
    /// Category names, one tick label per group
    pub categories: &'a [String],
    /// Bar series, at most one color per entry of the bar palette before cycling
    pub series: &'a [BarSeries],
}

struct Style {
    scale: f64,
}

impl Style {
    fn new(size: FigureSize) -> Self {
        Style {
            scale: f64::from(size.height) / 500.0,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn px(&self, base: f64) -> u32 {
        (base * self.scale).round().max(1.0) as u32
    }
}

/// Render a line chart to a PNG file.
///
/// # Errors
///
/// Returns [`ReportError::EmptyDataset`] if there are no points at all and
/// [`ReportError::Chart`] if drawing fails (including missing fonts).
pub fn render_line_chart(path: &Path, size: FigureSize, chart: &LineChart<'_>) -> Result<()> {
    let xs: Vec<f64> = all_points(chart).map(|(x, _)| x).collect();
    let ys: Vec<f64> = all_points(chart).map(|(_, y)| y).collect();
    if xs.is_empty() {
        return Err(ReportError::EmptyDataset(format!(
            "no points for chart '{}'",
            chart.title
        )));
    }

    let style = Style::new(size);
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_range = axis_range(&ys, true);
    if chart.log_x {
        let mut ctx = build_chart(&root, &style, &chart.title)
            .build_cartesian_2d(log_axis_range(&xs).log_scale(), y_range)?;
        ctx.configure_mesh()
            .x_desc(chart.x_desc)
            .y_desc(chart.y_desc)
            .label_style(("sans-serif", style.px(12.0)))
            .axis_desc_style(("sans-serif", style.px(14.0)))
            .draw()?;
        draw_curves(&mut ctx, &style, chart)?;
    } else {
        let mut ctx = build_chart(&root, &style, &chart.title)
            .build_cartesian_2d(axis_range(&xs, false), y_range)?;
        ctx.configure_mesh()
            .x_desc(chart.x_desc)
            .y_desc(chart.y_desc)
            .label_style(("sans-serif", style.px(12.0)))
            .axis_desc_style(("sans-serif", style.px(14.0)))
            .draw()?;
        draw_curves(&mut ctx, &style, chart)?;
    }

    root.present()?;
    info!(path = %path.display(), "wrote line chart");
    Ok(())
}

/// Render a grouped bar chart to a PNG file.
///
/// Bars in a group sit side by side starting at the category index; the tick
/// label is centred under the middle of the group.
///
/// # Errors
///
/// Returns [`ReportError::EmptyDataset`] if there are no categories or
/// series, and [`ReportError::Chart`] if drawing fails.
pub fn render_bar_chart(path: &Path, size: FigureSize, chart: &BarChart<'_>) -> Result<()> {
    if chart.categories.is_empty() || chart.series.is_empty() {
        return Err(ReportError::EmptyDataset(
            "bar chart needs categories and series".to_string(),
        ));
    }

    let style = Style::new(size);
    let width = bar_width(chart.series.len());
    let layout = BarLayout {
        width,
        groups: chart.categories.len(),
        series: chart.series.len(),
    };

    let ys: Vec<f64> = chart.series.iter().flat_map(|s| s.values.iter().copied()).collect();
    let y_top = ys.iter().copied().fold(0.0_f64, f64::max).max(1.0) * 1.1;

    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root)
        .margin(style.px(10.0))
        .x_label_area_size(style.px(45.0))
        .y_label_area_size(style.px(55.0))
        .build_cartesian_2d(GroupAxis::new(&layout), 0.0..y_top)?;

    let categories = chart.categories;
    let label_for = |x: &f64| {
        layout
            .category_at(*x)
            .map_or_else(String::new, |i| categories[i].clone())
    };
    let bold_desc = ("sans-serif", style.px(15.0)).into_font().style(FontStyle::Bold);
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_desc)
        .y_desc(chart.y_desc)
        .x_label_formatter(&label_for)
        .label_style(("sans-serif", style.px(12.0)))
        .axis_desc_style(bold_desc)
        .draw()?;

    for (k, series) in chart.series.iter().enumerate() {
        let color = BAR_COLORS[k % BAR_COLORS.len()];
        let bars: Vec<[(f64, f64); 2]> = series
            .values
            .iter()
            .take(layout.groups)
            .enumerate()
            .map(|(i, &v)| layout.bar(i, k, v))
            .collect();

        ctx.draw_series(bars.iter().map(|&corners| Rectangle::new(corners, color.filled())))?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
            });
        ctx.draw_series(
            bars.iter()
                .map(|&corners| Rectangle::new(corners, RGBColor(128, 128, 128).stroke_width(1))),
        )?;
    }

    ctx.configure_series_labels()
        .label_font(("sans-serif", style.px(12.0)))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    info!(path = %path.display(), "wrote bar chart");
    Ok(())
}

fn build_chart<'a, 'b, 'c>(
    root: &'a DrawingArea<BitMapBackend<'c>, Shift>,
    style: &Style,
    title: &str,
) -> ChartBuilder<'a, 'b, BitMapBackend<'c>> {
    let mut builder = ChartBuilder::on(root);
    builder
        .caption(title, ("sans-serif", style.px(18.0)))
        .margin(style.px(10.0))
        .x_label_area_size(style.px(45.0))
        .y_label_area_size(style.px(55.0));
    builder
}

fn draw_curves<'a, X>(
    ctx: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<X, RangedCoordf64>>,
    style: &Style,
    chart: &LineChart<'_>,
) -> Result<()>
where
    X: Ranged<ValueType = f64>,
{
    let stroke = style.px(2.0);
    let marker = style.px(4.0);

    if let Some(title) = chart.legend_title {
        ctx.draw_series(std::iter::empty::<Circle<(f64, f64), u32>>())?
            .label(title)
            .legend(|(x, y)| EmptyElement::at((x, y)));
    }

    for (i, series) in chart.series.iter().enumerate() {
        let color = Palette99::pick(i).mix(1.0);
        ctx.draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(stroke),
        ))?
        .label(series.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        ctx.draw_series(
            series
                .points
                .iter()
                .map(|&p| Circle::new(p, marker, color.filled())),
        )?;
    }

    if let Some(reference) = chart.reference {
        ctx.draw_series(DashedLineSeries::new(
            reference.points.iter().copied(),
            style.px(8.0),
            style.px(6.0),
            BLACK.stroke_width(stroke),
        ))?
        .label(reference.label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));
    }

    ctx.configure_series_labels()
        .label_font(("sans-serif", style.px(12.0)))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;
    Ok(())
}

fn all_points<'a>(chart: &'a LineChart<'_>) -> impl Iterator<Item = (f64, f64)> + 'a {
    chart
        .series
        .iter()
        .chain(chart.reference)
        .flat_map(|s| s.points.iter().copied())
}

/// Linear axis range covering `values` with 5% padding.
///
/// With `from_zero` the range starts at zero unless a value is negative.
/// Degenerate ranges widen by one unit on each side.
#[must_use]
pub fn axis_range(values: &[f64], from_zero: bool) -> Range<f64> {
    let (min, max) = min_max(values).unwrap_or((0.0, 1.0));
    let min = if from_zero { min.min(0.0) } else { min };
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    let low = if from_zero && min >= 0.0 { 0.0 } else { min - pad };
    low..(max + pad)
}

/// Positive axis range for log scaling, padded by a factor on each side.
///
/// Non-positive values are left out; an empty input gives `1..10`.
#[must_use]
pub fn log_axis_range(values: &[f64]) -> Range<f64> {
    let positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    match min_max(&positive) {
        Some((min, max)) if max > min => (min / 1.5)..(max * 1.5),
        Some((v, _)) => (v / 2.0)..(v * 2.0),
        None => 1.0..10.0,
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;
    Some(finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Width of one bar when `series` bars share a category slot.
#[must_use]
pub fn bar_width(series: usize) -> f64 {
    GROUP_FILL / series.max(1) as f64
}

/// Geometry of a grouped bar chart on a continuous x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BarLayout {
    width: f64,
    groups: usize,
    series: usize,
}

impl BarLayout {
    /// Bar `k` of group `i` is centred at `i + k * width`.
    fn bar(&self, group: usize, k: usize, value: f64) -> [(f64, f64); 2] {
        let centre = group as f64 + k as f64 * self.width;
        let half = self.width / 2.0;
        [(centre - half, 0.0), (centre + half, value)]
    }

    fn group_centre(&self, group: usize) -> f64 {
        group as f64 + (self.series.saturating_sub(1)) as f64 * self.width / 2.0
    }

    fn tick_positions(&self) -> Vec<f64> {
        (0..self.groups).map(|i| self.group_centre(i)).collect()
    }

    fn x_range(&self) -> Range<f64> {
        let last = self.groups.saturating_sub(1) as f64
            + self.series.saturating_sub(1) as f64 * self.width;
        (-self.width)..(last + self.width)
    }

    fn category_at(&self, x: f64) -> Option<usize> {
        (0..self.groups).find(|&i| (self.group_centre(i) - x).abs() < 1e-6)
    }
}

/// Continuous x axis of a bar chart with one tick per group centre.
struct GroupAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl GroupAxis {
    fn new(layout: &BarLayout) -> Self {
        GroupAxis {
            inner: layout.x_range().into(),
            ticks: layout.tick_positions(),
        }
    }
}

impl Ranged for GroupAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}
