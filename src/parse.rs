//! CLI parsing and validation.
//!
//! Three subcommands (`plot`, `info`, `col`), each with its own validator.
//! `clap` handles tokenizing and numeric flags; the validators turn the raw
//! arguments into immutable configuration records, surfacing every failure as
//! a `clap` usage error naming the offending argument (and the valid choices
//! where applicable) rather than an internal crash.

use crate::plot::colormap::{ColourMap, named_colour};
use crate::plot::types::{
    CBAR_ORIENTS, CbarOrient, LINE_STYLES, LineStyle, plot_types, valid_type_names,
};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use plotters::style::RGBColor;
use std::ffi::OsString;
use std::fmt::Display;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "eoplot",
    version,
    about = "Load, inspect, collocate & plot gridded and ungridded earth-observation data"
)]
struct Cli {
    #[command(subcommand)]
    command: RawCommand,
}

#[derive(Subcommand, Debug)]
enum RawCommand {
    /// Create plots
    Plot(PlotArgs),
    /// Get information about a file
    Info(InfoArgs),
    /// Collocate data files onto a sample file's points
    Col(ColArgs),
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// The series to plot, each of the form `variable:filename[:option=value,...]`
    #[arg(value_name = "VARIABLE:FILENAME[:OPTS]", required = true)]
    series: Vec<String>,
    /// The filename of the output file for the plot image (.png or .svg)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// The chart type
    #[arg(long = "type")]
    chart_type: Option<String>,
    /// The label for the x axis
    #[arg(long)]
    xlabel: Option<String>,
    /// The label for the y axis
    #[arg(long)]
    ylabel: Option<String>,
    /// The title for the chart
    #[arg(long)]
    title: Option<String>,
    /// The style of the line
    #[arg(long, default_value = "solid")]
    linestyle: String,
    /// The width of the line
    #[arg(long)]
    linewidth: Option<f64>,
    /// The colour of the line
    #[arg(long)]
    color: Option<String>,
    /// The size of the font
    #[arg(long)]
    fontsize: Option<f64>,
    /// The colour map used, e.g. viridis
    #[arg(long)]
    cmap: Option<String>,
    /// The height of the plot in inches
    #[arg(long)]
    height: Option<f64>,
    /// The width of the plot in inches
    #[arg(long)]
    width: Option<f64>,
    /// The range of values to plot, as `min:max` (either side may be empty)
    #[arg(long)]
    valrange: Option<String>,
    /// Minimum of the x axis
    #[arg(long)]
    xmin: Option<f64>,
    /// Maximum of the x axis
    #[arg(long)]
    xmax: Option<f64>,
    /// Tick step of the x axis
    #[arg(long)]
    xstep: Option<f64>,
    /// Histogram bin width along the x axis
    #[arg(long)]
    xbinwidth: Option<f64>,
    /// Rotation angle of x tick labels, in degrees
    #[arg(long)]
    xtickangle: Option<f64>,
    /// Minimum of the y axis
    #[arg(long)]
    ymin: Option<f64>,
    /// Maximum of the y axis
    #[arg(long)]
    ymax: Option<f64>,
    /// Tick step of the y axis
    #[arg(long)]
    ystep: Option<f64>,
    /// Histogram bin width along the y axis
    #[arg(long)]
    ybinwidth: Option<f64>,
    /// Rotation angle of y tick labels, in degrees
    #[arg(long)]
    ytickangle: Option<f64>,
    /// Minimum of the value (colour) axis
    #[arg(long)]
    vmin: Option<f64>,
    /// Maximum of the value (colour) axis
    #[arg(long)]
    vmax: Option<f64>,
    /// Colour bar tick step
    #[arg(long)]
    vstep: Option<f64>,
    /// Use a log scale on the x axis
    #[arg(long)]
    logx: bool,
    /// Use a log scale on the y axis
    #[arg(long)]
    logy: bool,
    /// Use a log scale on the value (colour) axis
    #[arg(long)]
    logv: bool,
    /// Draw grid lines
    #[arg(long)]
    grid: bool,
    /// Colour bar orientation
    #[arg(long)]
    cbarorient: Option<String>,
    /// Colour bar label
    #[arg(long)]
    cbarlabel: Option<String>,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// The filename of the file to inspect
    filename: PathBuf,
    /// The variable(s) to inspect
    #[arg(short = 'v', long = "variables", num_args = 1..)]
    variables: Vec<String>,
    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ColArgs {
    /// The filename of the sample file
    samplefilename: PathBuf,
    /// Files to collocate, each `filename:variable:method` (variable and
    /// method optional, colons required)
    #[arg(value_name = "DATAFILE", required = true)]
    datafiles: Vec<String>,
    /// The default variable to use when a data file omits one
    #[arg(short = 'v', long = "variable")]
    variable: Option<String>,
    /// The default method to use when a data file omits one
    #[arg(short = 'm', long = "method")]
    method: Option<String>,
    /// The filename of the output CSV
    #[arg(short, long, default_value = "colocated.csv")]
    output: PathBuf,
}

/// One input series with its per-series style overrides.
#[derive(Debug, Clone)]
pub struct SeriesSpec {
    pub variable: String,
    pub filename: PathBuf,
    pub color: Option<RGBColor>,
    pub linestyle: Option<LineStyle>,
    pub linewidth: Option<f64>,
    pub label: Option<String>,
}

/// Value-axis range; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Validated `plot` configuration, consumed read-only by the pipeline.
///
/// The comparative histogram writes its derived axis limits back into
/// `xmin`/`xmax`/`ymin`/`ymax` so downstream formatting sees the same range.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub series: Vec<SeriesSpec>,
    pub chart_type: Option<String>,
    pub output: Option<PathBuf>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: Option<String>,
    pub linestyle: LineStyle,
    pub linewidth: Option<f64>,
    pub color: Option<RGBColor>,
    pub fontsize: Option<f64>,
    pub cmap: ColourMap,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub valrange: ValueRange,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub xstep: Option<f64>,
    pub xbinwidth: Option<f64>,
    pub xtickangle: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
    pub ystep: Option<f64>,
    pub ybinwidth: Option<f64>,
    pub ytickangle: Option<f64>,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    pub vstep: Option<f64>,
    pub logx: bool,
    pub logy: bool,
    pub logv: bool,
    pub grid: bool,
    pub cbarorient: CbarOrient,
    pub cbarlabel: Option<String>,
}

/// Validated `info` configuration.
#[derive(Debug, Clone)]
pub struct InfoConfig {
    pub filename: PathBuf,
    pub variables: Vec<String>,
    pub json: bool,
}

/// One data file to collocate, after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DatafileSpec {
    pub filename: PathBuf,
    pub variable: Option<String>,
    pub method: Option<String>,
}

/// Validated `col` configuration.
#[derive(Debug, Clone)]
pub struct ColConfig {
    pub samplefile: PathBuf,
    pub datafiles: Vec<DatafileSpec>,
    pub output: PathBuf,
}

/// A fully validated invocation.
#[derive(Debug, Clone)]
pub enum Command {
    Plot(PlotConfig),
    Info(InfoConfig),
    Col(ColConfig),
}

/// Parse and validate CLI tokens (without the program name).
pub fn parse_args<I, T>(args: I) -> Result<Command, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv = std::iter::once(OsString::from("eoplot")).chain(args.into_iter().map(Into::into));
    let cli = Cli::try_parse_from(argv)?;
    match cli.command {
        RawCommand::Plot(a) => validate_plot(a).map(Command::Plot),
        RawCommand::Info(a) => validate_info(a).map(Command::Info),
        RawCommand::Col(a) => validate_col(a).map(Command::Col),
    }
}

fn usage_error(msg: impl Display) -> clap::Error {
    Cli::command().error(ErrorKind::ValueValidation, msg)
}

fn check_file_exists(path: &Path) -> Result<(), clap::Error> {
    if !path.is_file() {
        return Err(usage_error(format!(
            "'{}' is not a valid filename",
            path.display()
        )));
    }
    Ok(())
}

fn parse_float(arg: &str, name: &str) -> Result<f64, clap::Error> {
    arg.parse::<f64>()
        .map_err(|_| usage_error(format!("'{arg}' is not a valid {name}")))
}

fn parse_series_spec(spec: &str) -> Result<SeriesSpec, clap::Error> {
    let mut parts = spec.splitn(3, ':');
    let variable = parts.next().unwrap_or_default();
    let filename = parts.next().unwrap_or_default();
    if variable.is_empty() || filename.is_empty() {
        return Err(usage_error(format!(
            "'{spec}' is not a valid series, use variable:filename[:option=value,...]"
        )));
    }
    let filename = PathBuf::from(filename);
    check_file_exists(&filename)?;

    let mut series = SeriesSpec {
        variable: variable.to_string(),
        filename,
        color: None,
        linestyle: None,
        linewidth: None,
        label: None,
    };
    if let Some(opts) = parts.next() {
        for opt in opts.split(',').filter(|o| !o.is_empty()) {
            let (key, value) = opt.split_once('=').ok_or_else(|| {
                usage_error(format!("'{opt}' is not a valid series option, use key=value"))
            })?;
            match key {
                "color" => series.color = Some(validate_colour(value)?),
                "linestyle" => series.linestyle = Some(validate_line_style(value)?),
                "linewidth" => series.linewidth = Some(parse_float(value, "line width")?),
                "label" => series.label = Some(value.to_string()),
                _ => {
                    return Err(usage_error(format!(
                        "'{key}' is not a valid series option"
                    )));
                }
            }
        }
    }
    Ok(series)
}

fn validate_plot_type(chart_type: &str, n_series: usize) -> Result<(), clap::Error> {
    match plot_types().get(chart_type) {
        Some(entry) => {
            if let Some(expected) = entry.expected_series {
                if expected != n_series {
                    return Err(usage_error(format!(
                        "Invalid number of variables for plot type '{chart_type}' (expected {expected}, got {n_series})"
                    )));
                }
            }
            Ok(())
        }
        None => Err(usage_error(format!(
            "'{chart_type}' is not a valid plot type, please use one of: {:?}",
            valid_type_names()
        ))),
    }
}

fn validate_line_style(name: &str) -> Result<LineStyle, clap::Error> {
    LineStyle::from_name(name).ok_or_else(|| {
        usage_error(format!(
            "'{name}' is not a valid line style, please use one of: {LINE_STYLES:?}"
        ))
    })
}

fn validate_colour(name: &str) -> Result<RGBColor, clap::Error> {
    named_colour(name).ok_or_else(|| usage_error(format!("'{name}' is not a valid colour")))
}

fn validate_val_range(valrange: &str) -> Result<ValueRange, clap::Error> {
    let Some((lo, hi)) = valrange.split_once(':') else {
        return Err(usage_error("Range must be in the format 'min:max'"));
    };
    if hi.contains(':') {
        return Err(usage_error("Range must be in the format 'min:max'"));
    }
    let mut range = ValueRange::default();
    if !lo.is_empty() {
        range.min = Some(parse_float(lo, "min")?);
    }
    if !hi.is_empty() {
        range.max = Some(parse_float(hi, "max")?);
    }
    Ok(range)
}

fn validate_plot(args: PlotArgs) -> Result<PlotConfig, clap::Error> {
    let series = args
        .series
        .iter()
        .map(|s| parse_series_spec(s))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(chart_type) = &args.chart_type {
        validate_plot_type(chart_type, series.len())?;
    }
    let linestyle = validate_line_style(&args.linestyle)?;
    let color = args.color.as_deref().map(validate_colour).transpose()?;
    let valrange = args
        .valrange
        .as_deref()
        .map(validate_val_range)
        .transpose()?
        .unwrap_or_default();
    let cmap = args
        .cmap
        .as_deref()
        .map(|name| ColourMap::from_name(name).map_err(usage_error))
        .transpose()?
        .unwrap_or_default();
    let cbarorient = args
        .cbarorient
        .as_deref()
        .map(|name| {
            CbarOrient::from_name(name).ok_or_else(|| {
                usage_error(format!(
                    "'{name}' is not a valid colour bar orientation, please use one of: {CBAR_ORIENTS:?}"
                ))
            })
        })
        .transpose()?
        .unwrap_or_default();

    Ok(PlotConfig {
        series,
        chart_type: args.chart_type,
        output: args.output,
        xlabel: args.xlabel,
        ylabel: args.ylabel,
        title: args.title,
        linestyle,
        linewidth: args.linewidth,
        color,
        fontsize: args.fontsize,
        cmap,
        height: args.height,
        width: args.width,
        valrange,
        xmin: args.xmin,
        xmax: args.xmax,
        xstep: args.xstep,
        xbinwidth: args.xbinwidth,
        xtickangle: args.xtickangle,
        ymin: args.ymin,
        ymax: args.ymax,
        ystep: args.ystep,
        ybinwidth: args.ybinwidth,
        ytickangle: args.ytickangle,
        vmin: args.vmin,
        vmax: args.vmax,
        vstep: args.vstep,
        logx: args.logx,
        logy: args.logy,
        logv: args.logv,
        grid: args.grid,
        cbarorient,
        cbarlabel: args.cbarlabel,
    })
}

fn validate_info(args: InfoArgs) -> Result<InfoConfig, clap::Error> {
    check_file_exists(&args.filename)?;
    Ok(InfoConfig {
        filename: args.filename,
        variables: args.variables,
        json: args.json,
    })
}

fn validate_col(args: ColArgs) -> Result<ColConfig, clap::Error> {
    check_file_exists(&args.samplefilename)?;

    let mut datafiles = Vec::new();
    for datafile in &args.datafiles {
        let parts: Vec<&str> = datafile.split(':').collect();
        if parts.len() != 3 {
            return Err(usage_error(
                "Data files must be in the format filename:variable:method, \
                 where variable and method are optional, but the colons are required",
            ));
        }
        let filename = PathBuf::from(parts[0]);
        check_file_exists(&filename)?;

        let variable = if parts[1].is_empty() {
            args.variable.clone()
        } else {
            Some(parts[1].to_string())
        };
        let method = if parts[2].is_empty() {
            args.method.clone()
        } else {
            Some(parts[2].to_string())
        };
        datafiles.push(DatafileSpec {
            filename,
            variable,
            method,
        });
    }

    Ok(ColConfig {
        samplefile: args.samplefilename,
        datafiles,
        output: args.output,
    })
}
