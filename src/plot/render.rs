//! Chart rendering: render to **PNG** or **SVG** through the `plotters`
//! backends.
//!
//! Log axes are drawn by transforming data into log10 domain and formatting
//! tick labels accordingly, which keeps one coordinate type across every
//! chart shape. Map axes (lon/lat) get degree-formatted tick labels.

use super::contour::{contour_levels, contour_segments};
use super::format::{
    AxesStyle, axis_range, colour_norm, colourbar_split, colourbar_ticks, degree_label,
    format_tick,
};
use super::histogram::{BinSpec, bin_edges, histogram_counts};
use super::histogram2d::{comparative_histogram, joint_range};
use super::types::{CbarOrient, LineStyle, PlotKind, plot_types};
use super::unpack::{ComparativeData, GridData, SeriesXY, Unpacked, unpack};
use crate::error::{EoplotError, Result};
use crate::model::DataItem;
use crate::parse::PlotConfig;
use log::info;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::PathBuf;
use std::sync::Once;

/// Pixels per configured inch of figure size.
const DPI: f64 = 100.0;

/// Series palette (Microsoft Office 2013+ chart colours).
const PALETTE: [RGBColor; 10] = [
    RGBColor(68, 114, 196),
    RGBColor(237, 125, 49),
    RGBColor(165, 165, 165),
    RGBColor(255, 192, 0),
    RGBColor(91, 155, 213),
    RGBColor(112, 173, 71),
    RGBColor(38, 68, 120),
    RGBColor(158, 72, 14),
    RGBColor(99, 99, 99),
    RGBColor(153, 115, 0),
];

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS
/// fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

fn render_err<E: std::fmt::Debug>(e: E) -> EoplotError {
    EoplotError::Render(format!("{e:?}"))
}

fn series_colour(config: &PlotConfig, spec_colour: Option<RGBColor>, idx: usize) -> RGBColor {
    spec_colour
        .or(config.color)
        .unwrap_or(PALETTE[idx % PALETTE.len()])
}

/// Resolve the chart shape: the registered `--type`, else heatmap for 2-D
/// valued data and line otherwise.
fn resolve_kind(config: &PlotConfig, items: &[DataItem]) -> Result<PlotKind> {
    match &config.chart_type {
        Some(name) => plot_types()
            .get(name.as_str())
            .map(|entry| entry.kind)
            .ok_or_else(|| EoplotError::UnknownPlotType { name: name.clone() }),
        None => Ok(if items[0].values.ndim() == 2 {
            PlotKind::Heatmap
        } else {
            PlotKind::Line
        }),
    }
}

/// Render the items according to the configuration and return the output
/// path. The configuration is updated in place where a chart shape derives
/// axis limits (the comparative histogram writes its bin range back).
pub fn render_plot(items: &[DataItem], config: &mut PlotConfig) -> Result<PathBuf> {
    if items.is_empty() {
        return Err(EoplotError::EmptyData);
    }
    ensure_fonts_registered();

    let kind = resolve_kind(config, items)?;
    let unpacked = unpack(kind, items)?;

    let out_path = config.output.clone().unwrap_or_else(|| {
        let path = PathBuf::from(format!("{}.png", items[0].metadata.standard_name));
        info!("no output path given, writing {}", path.display());
        path
    });
    let width = (config.width.unwrap_or(8.0) * DPI) as u32;
    let height = (config.height.unwrap_or(6.0) * DPI) as u32;
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_any(root, kind, unpacked, config)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_any(root, kind, unpacked, config)?;
    }
    Ok(out_path)
}

fn draw_any<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    kind: PlotKind,
    unpacked: Unpacked,
    config: &mut PlotConfig,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;
    match unpacked {
        Unpacked::Series(series) => {
            draw_series_chart(root, &series, config, matches!(kind, PlotKind::Scatter))
        }
        Unpacked::Histogram { values, label } => draw_histogram(root, &values, &label, config),
        Unpacked::Grid(grid) => match kind {
            PlotKind::Contour => draw_contour(root, &grid, config),
            _ => draw_heatmap(root, &grid, config),
        },
        Unpacked::Comparative(data) => match kind {
            PlotKind::Histogram2d => draw_histogram2d(root, &data, config),
            _ => draw_comparative_scatter(root, &data, config),
        },
    }
}

/// Transform values for a manual log axis, dropping non-positive samples.
fn log_points(x: &[f64], y: &[f64], logx: bool, logy: bool) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .filter_map(|(&px, &py)| {
            if !px.is_finite() || !py.is_finite() {
                return None;
            }
            if (logx && px <= 0.0) || (logy && py <= 0.0) {
                return None;
            }
            Some((
                if logx { px.log10() } else { px },
                if logy { py.log10() } else { py },
            ))
        })
        .collect()
}

fn range_of(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for v in values.filter(|v| v.is_finite()) {
        range = Some(match range {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    range
}

fn draw_series_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &[SeriesXY],
    config: &PlotConfig,
    markers: bool,
) -> Result<()> {
    let style = AxesStyle::from_config(
        config,
        &series[0].xlabel,
        &series[0].label,
        &series[0].label,
        false,
    );

    let xdata = range_of(series.iter().flat_map(|s| s.x.iter().copied()));
    let ydata = range_of(series.iter().flat_map(|s| s.y.iter().copied()));
    let xrange = axis_range(xdata, config.xmin, config.xmax, config.logx);
    let yrange = axis_range(
        ydata,
        config.ymin.or(config.valrange.min),
        config.ymax.or(config.valrange.max),
        config.logy,
    );

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(&style.title, (FontFamily::SansSerif, style.font_px + 8))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(xrange.0..xrange.1, yrange.0..yrange.1)
        .map_err(render_err)?;

    configure_mesh(&mut chart, &style, xrange, yrange)?;

    for (idx, s) in series.iter().enumerate() {
        let spec = config.series.get(idx);
        let colour = series_colour(config, spec.and_then(|s| s.color), idx);
        let label = spec
            .and_then(|s| s.label.clone())
            .unwrap_or_else(|| s.label.clone());
        let points = log_points(&s.x, &s.y, config.logx, config.logy);
        if points.is_empty() {
            return Err(EoplotError::EmptyData);
        }
        let stroke = spec
            .and_then(|s| s.linewidth)
            .or(config.linewidth)
            .unwrap_or(2.0) as u32;

        if markers {
            let elem = chart
                .draw_series(
                    points
                        .iter()
                        .map(|(x, y)| Circle::new((*x, *y), stroke.max(3), colour.filled())),
                )
                .map_err(render_err)?;
            elem.label(label)
                .legend(move |(x, y)| Circle::new((x + 8, y), 4, colour.filled()));
        } else {
            let shape = ShapeStyle {
                color: colour.to_rgba(),
                filled: false,
                stroke_width: stroke,
            };
            let linestyle = spec
                .and_then(|s| s.linestyle)
                .unwrap_or(config.linestyle);
            let elem = match linestyle {
                LineStyle::Solid => chart
                    .draw_series(LineSeries::new(points.clone(), shape))
                    .map_err(render_err)?,
                LineStyle::Dashed => chart
                    .draw_series(DashedLineSeries::new(points.clone().into_iter(), 10, 6, shape))
                    .map_err(render_err)?,
                LineStyle::DashDot => chart
                    .draw_series(DashedLineSeries::new(points.clone().into_iter(), 12, 9, shape))
                    .map_err(render_err)?,
                LineStyle::Dotted => chart
                    .draw_series(DashedLineSeries::new(points.clone().into_iter(), 2, 5, shape))
                    .map_err(render_err)?,
            };
            elem.label(label)
                .legend(move |(x, y)| Circle::new((x + 8, y), 4, colour.filled()));
        }
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, style.font_px + 2))
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_histogram<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    values: &ndarray::ArrayD<f64>,
    label: &str,
    config: &PlotConfig,
) -> Result<()> {
    let spec = BinSpec {
        min: config.xmin,
        max: config.xmax,
        width: config.xbinwidth,
        log: config.logx,
    };
    let edges = bin_edges(values.iter().copied(), &spec)?;
    let counts = histogram_counts(values.iter().copied(), &edges);

    let style = AxesStyle::from_config(config, label, "Frequency", label, false);
    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;
    if max_count == 0.0 {
        return Err(EoplotError::EmptyData);
    }

    let to_x = |v: f64| if config.logx { v.log10() } else { v };
    let xrange = (to_x(edges[0]), to_x(*edges.last().unwrap()));
    let yrange = axis_range(
        Some((0.0, max_count * 1.05)),
        config.ymin.or(config.valrange.min),
        config.ymax.or(config.valrange.max),
        false,
    );

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(&style.title, (FontFamily::SansSerif, style.font_px + 8))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(xrange.0..xrange.1, yrange.0..yrange.1)
        .map_err(render_err)?;

    configure_mesh(&mut chart, &style, xrange, yrange)?;

    let colour = series_colour(config, config.series.first().and_then(|s| s.color), 0);
    chart
        .draw_series(edges.windows(2).zip(counts.iter()).filter_map(|(w, &c)| {
            if c == 0 {
                return None;
            }
            Some(Rectangle::new(
                [(to_x(w[0]), 0.0), (to_x(w[1]), c as f64)],
                colour.mix(0.7).filled(),
            ))
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Cell edges around a run of cell-center positions: midpoints between
/// neighbours, extrapolated at the ends.
fn cell_bounds(centers: &[f64]) -> Vec<(f64, f64)> {
    let n = centers.len();
    let step = |i: usize| {
        if i + 1 < n {
            centers[i + 1] - centers[i]
        } else if n > 1 {
            centers[n - 1] - centers[n - 2]
        } else {
            1.0
        }
    };
    (0..n)
        .map(|i| {
            let lo = if i == 0 {
                centers[0] - step(0) / 2.0
            } else {
                (centers[i - 1] + centers[i]) / 2.0
            };
            let hi = if i + 1 == n {
                centers[n - 1] + step(i) / 2.0
            } else {
                (centers[i] + centers[i + 1]) / 2.0
            };
            (lo, hi)
        })
        .collect()
}

fn value_bounds(config: &PlotConfig, data: Option<(f64, f64)>) -> (f64, f64) {
    let (dlo, dhi) = data.unwrap_or((0.0, 1.0));
    let lo = config.vmin.or(config.valrange.min).unwrap_or(dlo);
    let hi = config.vmax.or(config.valrange.max).unwrap_or(dhi);
    if hi > lo { (lo, hi) } else { (lo, lo + 1.0) }
}

fn draw_heatmap<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    grid: &GridData,
    config: &PlotConfig,
) -> Result<()> {
    let (plot_area, cbar_area) = split_for_colourbar(&root, config.cbarorient);
    let style = AxesStyle::from_config(config, &grid.xlabel, &grid.ylabel, &grid.label, grid.map);

    let xrange = axis_range(range_of(grid.x.iter().copied()), config.xmin, config.xmax, false);
    let yrange = axis_range(range_of(grid.y.iter().copied()), config.ymin, config.ymax, false);
    let (vmin, vmax) = value_bounds(config, range_of(grid.values.iter().copied()));

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(16)
        .caption(&style.title, (FontFamily::SansSerif, style.font_px + 8))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(xrange.0..xrange.1, yrange.0..yrange.1)
        .map_err(render_err)?;

    configure_mesh(&mut chart, &style, xrange, yrange)?;

    let xbounds = cell_bounds(&grid.x);
    let ybounds = cell_bounds(&grid.y);
    for (j, &(ylo, yhi)) in ybounds.iter().enumerate() {
        for (i, &(xlo, xhi)) in xbounds.iter().enumerate() {
            let v = grid.values[[j, i]];
            if !v.is_finite() {
                continue;
            }
            let colour = config.cmap.color(colour_norm(v, vmin, vmax, config.logv));
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(xlo, ylo), (xhi, yhi)],
                    colour.filled(),
                )))
                .map_err(render_err)?;
        }
    }

    let cbar_label = config.cbarlabel.clone().unwrap_or_else(|| grid.units.clone());
    draw_colourbar(&cbar_area, vmin, vmax, config, &cbar_label, style.font_px)?;

    plot_area.present().map_err(render_err)?;
    cbar_area.present().map_err(render_err)?;
    Ok(())
}

fn draw_contour<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    grid: &GridData,
    config: &PlotConfig,
) -> Result<()> {
    let (plot_area, cbar_area) = split_for_colourbar(&root, config.cbarorient);
    let style = AxesStyle::from_config(config, &grid.xlabel, &grid.ylabel, &grid.label, grid.map);

    let xrange = axis_range(range_of(grid.x.iter().copied()), config.xmin, config.xmax, false);
    let yrange = axis_range(range_of(grid.y.iter().copied()), config.ymin, config.ymax, false);
    let (vmin, vmax) = value_bounds(config, range_of(grid.values.iter().copied()));

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(16)
        .caption(&style.title, (FontFamily::SansSerif, style.font_px + 8))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(xrange.0..xrange.1, yrange.0..yrange.1)
        .map_err(render_err)?;

    configure_mesh(&mut chart, &style, xrange, yrange)?;

    let stroke = config.linewidth.unwrap_or(1.0) as u32;
    for level in contour_levels(vmin, vmax, config.vstep) {
        let colour = config
            .cmap
            .color(colour_norm(level, vmin, vmax, config.logv));
        let shape = ShapeStyle {
            color: colour.to_rgba(),
            filled: false,
            stroke_width: stroke.max(1),
        };
        let segments = contour_segments(&grid.x, &grid.y, &grid.values, level);
        chart
            .draw_series(
                segments
                    .into_iter()
                    .map(|(a, b)| PathElement::new(vec![a, b], shape)),
            )
            .map_err(render_err)?;
    }

    let cbar_label = config.cbarlabel.clone().unwrap_or_else(|| grid.units.clone());
    draw_colourbar(&cbar_area, vmin, vmax, config, &cbar_label, style.font_px)?;

    plot_area.present().map_err(render_err)?;
    cbar_area.present().map_err(render_err)?;
    Ok(())
}

fn draw_comparative_scatter<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    data: &ComparativeData,
    config: &PlotConfig,
) -> Result<()> {
    if data.first.len() != data.second.len() {
        return Err(EoplotError::ShapeMismatch {
            expected: data.first.len(),
            actual: data.second.len(),
        });
    }
    let style = AxesStyle::from_config(config, &data.xlabel, &data.ylabel, "", false);

    let pairs: Vec<(f64, f64)> = data
        .first
        .iter()
        .zip(data.second.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect();
    if pairs.is_empty() {
        return Err(EoplotError::EmptyData);
    }

    let xrange = axis_range(
        range_of(pairs.iter().map(|p| p.0)),
        config.xmin,
        config.xmax,
        config.logx,
    );
    let yrange = axis_range(
        range_of(pairs.iter().map(|p| p.1)),
        config.ymin,
        config.ymax,
        config.logy,
    );

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(&style.title, (FontFamily::SansSerif, style.font_px + 8))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(xrange.0..xrange.1, yrange.0..yrange.1)
        .map_err(render_err)?;

    configure_mesh(&mut chart, &style, xrange, yrange)?;

    let colour = series_colour(config, config.series.first().and_then(|s| s.color), 0);
    let to = |v: f64, log: bool| if log { v.log10() } else { v };
    chart
        .draw_series(
            pairs
                .iter()
                .filter(|(a, b)| (!config.logx || *a > 0.0) && (!config.logy || *b > 0.0))
                .map(|(a, b)| {
                    Circle::new(
                        (to(*a, config.logx), to(*b, config.logy)),
                        3,
                        colour.filled(),
                    )
                }),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_histogram2d<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    data: &ComparativeData,
    config: &mut PlotConfig,
) -> Result<()> {
    let xspec = BinSpec {
        min: config.xmin,
        max: config.xmax,
        width: config.xbinwidth,
        log: config.logx,
    };
    let yspec = BinSpec {
        min: config.ymin,
        max: config.ymax,
        width: config.ybinwidth,
        log: config.logy,
    };
    let hist = comparative_histogram(&data.first, &data.second, &xspec, &yspec)?;

    // Downstream formatting and labeling use the derived bin range.
    config.xmin = hist.xedges.first().copied();
    config.xmax = hist.xedges.last().copied();
    config.ymin = hist.yedges.first().copied();
    config.ymax = hist.yedges.last().copied();

    let (plot_area, cbar_area) = split_for_colourbar(&root, config.cbarorient);
    let style = AxesStyle::from_config(config, &data.xlabel, &data.ylabel, "", false);

    let to_x = |v: f64| if config.logx { v.log10() } else { v };
    let to_y = |v: f64| if config.logy { v.log10() } else { v };
    let xrange = (
        to_x(config.xmin.unwrap_or(0.0)),
        to_x(config.xmax.unwrap_or(1.0)),
    );
    let yrange = (
        to_y(config.ymin.unwrap_or(0.0)),
        to_y(config.ymax.unwrap_or(1.0)),
    );

    // Bins with a count below `--vmin` (or above `--vmax`) are not displayed.
    let cmin = config.vmin;
    let cmax = config.vmax;
    let norm_lo = cmin.unwrap_or(1.0);
    let norm_hi = cmax.unwrap_or_else(|| hist.max_count());

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(16)
        .caption(&style.title, (FontFamily::SansSerif, style.font_px + 8))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(xrange.0..xrange.1, yrange.0..yrange.1)
        .map_err(render_err)?;

    configure_mesh(&mut chart, &style, xrange, yrange)?;

    for i in 0..hist.xedges.len() - 1 {
        for j in 0..hist.yedges.len() - 1 {
            let count = hist.counts[[i, j]];
            if !count.is_finite() {
                continue;
            }
            if cmin.is_some_and(|m| count < m) || cmax.is_some_and(|m| count > m) {
                continue;
            }
            let colour = config
                .cmap
                .color(colour_norm(count, norm_lo, norm_hi, config.logv));
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [
                        (to_x(hist.xedges[i]), to_y(hist.yedges[j])),
                        (to_x(hist.xedges[i + 1]), to_y(hist.yedges[j + 1])),
                    ],
                    colour.filled(),
                )))
                .map_err(render_err)?;
        }
    }

    // y = x reference over the joint value range.
    if let Some((lo, hi)) = joint_range(&data.first, &data.second) {
        let line = vec![(to_x(lo), to_y(lo)), (to_x(hi), to_y(hi))];
        chart
            .draw_series(DashedLineSeries::new(
                line.into_iter(),
                8,
                5,
                ShapeStyle {
                    color: BLACK.to_rgba(),
                    filled: false,
                    stroke_width: 1,
                },
            ))
            .map_err(render_err)?;
    }

    // A density surface has no per-series legend; only the colour bar is
    // labeled, defaulting to "Frequency".
    let cbar_label = config
        .cbarlabel
        .clone()
        .unwrap_or_else(|| "Frequency".to_string());
    draw_colourbar(&cbar_area, norm_lo, norm_hi, config, &cbar_label, style.font_px)?;

    plot_area.present().map_err(render_err)?;
    cbar_area.present().map_err(render_err)?;
    Ok(())
}

fn split_for_colourbar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    orient: CbarOrient,
) -> (DrawingArea<DB, Shift>, DrawingArea<DB, Shift>) {
    let (w, h) = root.dim_in_pixel();
    let (plot_w, plot_h) = colourbar_split(orient, w, h);
    match orient {
        CbarOrient::Vertical => {
            let (plot, bar) = root.split_horizontally(plot_w);
            (plot, bar)
        }
        CbarOrient::Horizontal => {
            let (plot, bar) = root.split_vertically(plot_h);
            (plot, bar)
        }
    }
}

/// Draw a colour bar into its panel: a gradient strip with tick labels on
/// the value axis and an optional label.
fn draw_colourbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    vmin: f64,
    vmax: f64,
    config: &PlotConfig,
    label: &str,
    font_px: u32,
) -> Result<()> {
    let logv = config.logv;
    let to_v = |v: f64| if logv { v.max(f64::MIN_POSITIVE).log10() } else { v };
    let (lo, hi) = (to_v(vmin), to_v(vmax));
    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Ok(());
    }
    let ticks = colourbar_ticks(vmin, vmax, config.vstep, logv);
    let steps = 64;

    match config.cbarorient {
        CbarOrient::Vertical => {
            let mut chart = ChartBuilder::on(area)
                .margin(12)
                .set_label_area_size(LabelAreaPosition::Right, 56)
                .build_cartesian_2d(0.0..1.0, lo..hi)
                .map_err(render_err)?;
            chart
                .configure_mesh()
                .disable_mesh()
                .disable_x_axis()
                .y_desc(label)
                .y_labels(ticks.len().max(2))
                .y_label_formatter(&|v| format_tick(*v, logv))
                .label_style((FontFamily::SansSerif, font_px))
                .axis_desc_style((FontFamily::SansSerif, font_px + 2))
                .draw()
                .map_err(render_err)?;
            for i in 0..steps {
                let v0 = lo + (hi - lo) * i as f64 / steps as f64;
                let v1 = lo + (hi - lo) * (i + 1) as f64 / steps as f64;
                let value = if logv { 10f64.powf(v0) } else { v0 };
                let colour = config.cmap.color(colour_norm(value, vmin, vmax, logv));
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(0.0, v0), (1.0, v1)],
                        colour.filled(),
                    )))
                    .map_err(render_err)?;
            }
        }
        CbarOrient::Horizontal => {
            let mut chart = ChartBuilder::on(area)
                .margin(12)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d(lo..hi, 0.0..1.0)
                .map_err(render_err)?;
            chart
                .configure_mesh()
                .disable_mesh()
                .disable_y_axis()
                .x_desc(label)
                .x_labels(ticks.len().max(2))
                .x_label_formatter(&|v| format_tick(*v, logv))
                .label_style((FontFamily::SansSerif, font_px))
                .axis_desc_style((FontFamily::SansSerif, font_px + 2))
                .draw()
                .map_err(render_err)?;
            for i in 0..steps {
                let v0 = lo + (hi - lo) * i as f64 / steps as f64;
                let v1 = lo + (hi - lo) * (i + 1) as f64 / steps as f64;
                let value = if logv { 10f64.powf(v0) } else { v0 };
                let colour = config.cmap.color(colour_norm(value, vmin, vmax, logv));
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(v0, 0.0), (v1, 1.0)],
                        colour.filled(),
                    )))
                    .map_err(render_err)?;
            }
        }
    }
    Ok(())
}

/// Apply the shared axis formatting: grid toggle, tick steps and rotation,
/// log/map tick labels, axis descriptions, threaded font size.
fn configure_mesh<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    style: &AxesStyle,
    xrange: (f64, f64),
    yrange: (f64, f64),
) -> Result<()> {
    let logx = style.logx;
    let logy = style.logy;
    let map = style.map;
    let x_fmt = move |v: &f64| {
        if map {
            degree_label(*v, true)
        } else {
            format_tick(*v, logx)
        }
    };
    let y_fmt = move |v: &f64| {
        if map {
            degree_label(*v, false)
        } else {
            format_tick(*v, logy)
        }
    };

    let mut mesh = chart.configure_mesh();
    if !style.grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&style.xlabel)
        .y_desc(&style.ylabel)
        .x_labels(AxesStyle::tick_count(xrange, style.xstep, 10))
        .y_labels(AxesStyle::tick_count(yrange, style.ystep, 10))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .x_label_style(
            ("sans-serif", style.font_px)
                .into_font()
                .transform(AxesStyle::rotation(style.xtickangle)),
        )
        .y_label_style(
            ("sans-serif", style.font_px)
                .into_font()
                .transform(AxesStyle::rotation(style.ytickangle)),
        )
        .axis_desc_style((FontFamily::SansSerif, style.font_px + 4))
        .draw()
        .map_err(render_err)?;
    Ok(())
}
