use super::scales::to_fixed;
use super::value_objects::{Margin, SeriesKind};
use crate::domain::market_data::Record;
use crate::time_utils::format_tooltip_date;
use chrono::NaiveDate;
use std::fmt;

/// Tick mark length and label gap used by both axes
pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;

/// Tooltip offset from the pointer's page coordinates
pub const TOOLTIP_OFFSET_X: f64 = 10.0;
pub const TOOLTIP_OFFSET_Y: f64 = -28.0;

/// Outer SVG size and the margins of the plot group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Frame {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// `transform` of the plot group
    pub fn plot_transform(&self) -> String {
        format!("translate({},{})", format_coord(self.margin.left), format_coord(self.margin.top))
    }
}

/// Everything needed to draw one state of the widget
#[derive(Debug, Clone, PartialEq)]
pub enum ChartScene {
    /// No dataset (absent or empty): nothing is drawn
    Blank,
    /// Dataset present, but nothing matches the selection
    NoData { frame: Frame, message: String },
    Plot(PlotScene),
}

impl ChartScene {
    pub fn point_count(&self) -> usize {
        match self {
            Self::Plot(plot) => plot.markers.len(),
            _ => 0,
        }
    }

    pub fn frame(&self) -> Option<&Frame> {
        match self {
            Self::Blank => None,
            Self::NoData { frame, .. } => Some(frame),
            Self::Plot(plot) => Some(&plot.frame),
        }
    }

    pub fn as_plot(&self) -> Option<&PlotScene> {
        match self {
            Self::Plot(plot) => Some(plot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotScene {
    pub frame: Frame,
    pub x_domain: (NaiveDate, NaiveDate),
    pub y_domain: (f64, f64),
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<SeriesPath>,
    pub markers: Vec<Marker>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

/// Axis with its ticks, laid out relative to the plot group
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orientation: AxisOrientation,
    /// Length of the axis line in pixels
    pub length: f64,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Offset along the axis
    pub position: f64,
    pub label: String,
}

impl Axis {
    /// Offset of the axis line's start inside the plot group
    pub fn origin(&self, inner_height: f64) -> (f64, f64) {
        match self.orientation {
            AxisOrientation::Bottom => (0.0, inner_height),
            AxisOrientation::Left => (0.0, 0.0),
        }
    }

    /// `transform` of the axis group inside the plot group
    pub fn transform(&self, inner_height: f64) -> Option<String> {
        match self.orientation {
            AxisOrientation::Bottom => {
                let (x, y) = self.origin(inner_height);
                Some(format!("translate({},{})", format_coord(x), format_coord(y)))
            }
            AxisOrientation::Left => None,
        }
    }

    /// Corner points of the domain path, relative to the axis origin
    pub fn domain_points(&self) -> [(f64, f64); 4] {
        match self.orientation {
            AxisOrientation::Bottom => [(0.0, TICK_SIZE), (0.0, 0.0), (self.length, 0.0), (self.length, TICK_SIZE)],
            AxisOrientation::Left => [(-TICK_SIZE, self.length), (0.0, self.length), (0.0, 0.0), (-TICK_SIZE, 0.0)],
        }
    }

    /// Path of the axis line including the outer ticks at both ends
    pub fn domain_path(&self) -> String {
        let len = format_coord(self.length);
        let tick = format_coord(TICK_SIZE);
        match self.orientation {
            AxisOrientation::Bottom => format!("M0,{tick}V0H{len}V{tick}"),
            AxisOrientation::Left => format!("M-{tick},{len}H0V0H-{tick}"),
        }
    }

    /// Offset of a tick relative to the axis origin
    pub fn tick_offset(&self, tick: &AxisTick) -> (f64, f64) {
        match self.orientation {
            AxisOrientation::Bottom => (tick.position, 0.0),
            AxisOrientation::Left => (0.0, tick.position),
        }
    }

    pub fn tick_transform(&self, tick: &AxisTick) -> String {
        let (x, y) = self.tick_offset(tick);
        format!("translate({},{})", format_coord(x), format_coord(y))
    }

    /// End point of the tick line, starting from the tick origin
    pub fn tick_line_end(&self) -> (f64, f64) {
        match self.orientation {
            AxisOrientation::Bottom => (0.0, TICK_SIZE),
            AxisOrientation::Left => (-TICK_SIZE, 0.0),
        }
    }

    /// Label anchor point, SVG `text-anchor` and `dy`
    pub fn label_placement(&self) -> (f64, f64, &'static str, &'static str) {
        let offset = TICK_SIZE + TICK_PADDING;
        match self.orientation {
            AxisOrientation::Bottom => (0.0, offset, "middle", "0.71em"),
            AxisOrientation::Left => (-offset, 0.0, "end", "0.32em"),
        }
    }
}

/// One polyline series in plot coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPath {
    pub kind: SeriesKind,
    pub color: String,
    pub stroke_width: f64,
    pub points: Vec<(f64, f64)>,
}

impl SeriesPath {
    /// SVG path data (`M x,y L x,y ...`), empty when there are no points
    pub fn path_data(&self) -> String {
        let mut data = String::new();
        for (i, (x, y)) in self.points.iter().enumerate() {
            data.push(if i == 0 { 'M' } else { 'L' });
            data.push_str(&format_coord(*x));
            data.push(',');
            data.push_str(&format_coord(*y));
        }
        data
    }
}

/// Point marker carrying the tooltip shown on hover
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: String,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub swatch_x: f64,
    pub swatch_y: f64,
    pub swatch_size: f64,
    pub label_x: f64,
    pub label_y: f64,
}

/// Values shown for one record on hover
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

impl TooltipContent {
    pub fn diff(&self) -> f64 {
        self.close - self.open
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!("Date: {}", format_tooltip_date(self.date)),
            format!("Open: {}", self.open),
            format!("Close: {}", self.close),
            format!("Diff: {}", to_fixed(self.diff(), 2)),
        ]
    }
}

impl From<&Record> for TooltipContent {
    fn from(record: &Record) -> Self {
        Self { date: record.date, open: record.open, close: record.close }
    }
}

impl fmt::Display for TooltipContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Floating tooltip: content plus its page position
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub content: TooltipContent,
    pub left: f64,
    pub top: f64,
}

impl Tooltip {
    /// Place the tooltip next to the pointer at page coordinates `(page_x, page_y)`
    pub fn at_pointer(content: TooltipContent, page_x: f64, page_y: f64) -> Self {
        Self { content, left: page_x + TOOLTIP_OFFSET_X, top: page_y + TOOLTIP_OFFSET_Y }
    }
}

/// Coordinate for SVG attributes: at most 3 decimals, no trailing zeros
pub fn format_coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}
