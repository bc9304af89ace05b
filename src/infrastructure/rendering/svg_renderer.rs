//! Standalone SVG export of a [`ChartScene`] through the plotters SVG backend.
//!
//! Geometry comes from the scene unchanged, snapped to whole pixels. The
//! export is static: markers carry no tooltip.

use crate::domain::chart::{Axis, AxisOrientation, ChartScene, Frame, PlotScene, hex_rgb};
use crate::domain::errors::{AppError, AppResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;

const AXIS_FONT_PX: u32 = 10;
const LABEL_FONT_PX: u32 = 12;
const EMPTY_STATE_COLOR: RGBColor = RGBColor(0x66, 0x66, 0x66);

#[derive(Debug, Clone, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize the scene. A blank scene yields an empty, zero-sized document.
    pub fn render(&self, scene: &ChartScene) -> AppResult<String> {
        let size = scene.frame().map(|frame| (whole(frame.width), whole(frame.height))).unwrap_or((0, 0));
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            match scene {
                ChartScene::Blank => {}
                ChartScene::NoData { frame, message } => draw_empty_state(&root, frame, message)?,
                ChartScene::Plot(plot) => draw_plot(&root, plot)?,
            }
            root.present().map_err(export_error)?;
        }
        Ok(svg)
    }
}

fn draw_empty_state<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, frame: &Frame, message: &str) -> AppResult<()> {
    let style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .color(&EMPTY_STATE_COLOR)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let center = to_pixel(frame, (frame.inner_width() / 2.0, frame.inner_height() / 2.0));
    root.draw(&Text::new(message, center, style)).map_err(export_error)
}

fn draw_plot<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, plot: &PlotScene) -> AppResult<()> {
    let frame = &plot.frame;
    draw_axis(root, frame, &plot.x_axis)?;
    draw_axis(root, frame, &plot.y_axis)?;

    for series in &plot.series {
        let points: Vec<_> = series.points.iter().map(|&point| to_pixel(frame, point)).collect();
        let style = rgb(&series.color)?.stroke_width(whole(series.stroke_width));
        root.draw(&PathElement::new(points, style)).map_err(export_error)?;
    }

    for marker in &plot.markers {
        let center = to_pixel(frame, (marker.cx, marker.cy));
        let radius = marker.radius.round() as i32;
        root.draw(&Circle::new(center, radius, rgb(&marker.fill)?.filled())).map_err(export_error)?;
    }

    let label_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX)).pos(Pos::new(HPos::Left, VPos::Bottom));
    for entry in &plot.legend {
        let upper_left = to_pixel(frame, (entry.swatch_x, entry.swatch_y));
        let lower_right =
            to_pixel(frame, (entry.swatch_x + entry.swatch_size, entry.swatch_y + entry.swatch_size));
        root.draw(&Rectangle::new([upper_left, lower_right], rgb(&entry.color)?.filled()))
            .map_err(export_error)?;
        let anchor = to_pixel(frame, (entry.label_x, entry.label_y));
        root.draw(&Text::new(entry.label.as_str(), anchor, label_style.clone())).map_err(export_error)?;
    }
    Ok(())
}

fn draw_axis<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, frame: &Frame, axis: &Axis) -> AppResult<()> {
    let (ox, oy) = axis.origin(frame.inner_height());
    let at = |(x, y): (f64, f64)| to_pixel(frame, (ox + x, oy + y));

    let domain: Vec<_> = axis.domain_points().into_iter().map(&at).collect();
    root.draw(&PathElement::new(domain, BLACK.stroke_width(1))).map_err(export_error)?;

    let (line_x, line_y) = axis.tick_line_end();
    let (label_x, label_y, _, _) = axis.label_placement();
    let label_pos = match axis.orientation {
        AxisOrientation::Bottom => Pos::new(HPos::Center, VPos::Top),
        AxisOrientation::Left => Pos::new(HPos::Right, VPos::Center),
    };
    let label_style = TextStyle::from((FontFamily::SansSerif, AXIS_FONT_PX)).pos(label_pos);

    for tick in &axis.ticks {
        let (tx, ty) = axis.tick_offset(tick);
        let line = vec![at((tx, ty)), at((tx + line_x, ty + line_y))];
        root.draw(&PathElement::new(line, BLACK.stroke_width(1))).map_err(export_error)?;
        root.draw(&Text::new(tick.label.as_str(), at((tx + label_x, ty + label_y)), label_style.clone()))
            .map_err(export_error)?;
    }
    Ok(())
}

/// Plot-group coordinates to whole SVG pixels
fn to_pixel(frame: &Frame, (x, y): (f64, f64)) -> (i32, i32) {
    ((frame.margin.left + x).round() as i32, (frame.margin.top + y).round() as i32)
}

fn whole(length: f64) -> u32 {
    length.round().max(0.0) as u32
}

fn rgb(color: &str) -> AppResult<RGBColor> {
    let hex = hex_rgb(color).ok_or_else(|| AppError::Export(format!("unsupported colour {color:?}")))?;
    Ok(RGBColor((hex >> 16) as u8, (hex >> 8) as u8, hex as u8))
}

fn export_error<E: std::fmt::Debug>(err: E) -> AppError {
    AppError::Export(format!("{err:?}"))
}
