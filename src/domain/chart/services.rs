use super::entities::{
    Axis, AxisOrientation, AxisTick, ChartScene, Frame, LegendEntry, Marker, PlotScene, SeriesPath, TooltipContent,
};
use super::scales::{LinearScale, TimeScale};
use super::value_objects::{ChartConfig, SeriesKind};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{Dataset, FilteredSet, Selection};
use crate::{log_debug, log_info};
use strum::IntoEnumIterator;

const LEGEND_SWATCH: f64 = 15.0;
const LEGEND_ROW_HEIGHT: f64 = 20.0;

/// Turns a dataset and a selection into a fully laid out scene.
/// Holds no state besides its configuration: the same inputs always produce an equal scene.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    config: ChartConfig,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, dataset: &Dataset, selection: &Selection) -> ChartScene {
        if dataset.is_empty() {
            log_debug!(LogComponent::Domain("ChartRenderer"), "empty dataset, nothing to draw");
            return ChartScene::Blank;
        }

        let filtered = dataset.filter(selection);
        log_debug!(
            LogComponent::Domain("ChartRenderer"),
            "{} {}: {} of {} records",
            selection.company,
            selection.month,
            filtered.len(),
            dataset.len()
        );

        self.render_filtered(&filtered).unwrap_or_else(|| {
            log_info!(
                LogComponent::Domain("ChartRenderer"),
                "no {} records in {}",
                selection.company,
                selection.month
            );
            ChartScene::NoData {
                frame: self.frame(),
                message: format!("No data for {} in {}", selection.company, selection.month),
            }
        })
    }

    /// Scene for an already filtered set, `None` when it is empty
    pub fn render_filtered(&self, filtered: &FilteredSet) -> Option<ChartScene> {
        let x_domain = filtered.date_extent()?;
        let y_domain = filtered.price_extent()?;

        let width = self.config.inner_width();
        let height = self.config.inner_height();
        let x = TimeScale::new(x_domain, (0.0, width));
        let y = LinearScale::new(y_domain, (height, 0.0));

        let series = SeriesKind::iter()
            .map(|kind| SeriesPath {
                kind,
                color: self.config.color_of(kind).to_string(),
                stroke_width: self.config.stroke_width,
                points: filtered
                    .records()
                    .iter()
                    .map(|r| {
                        let value = match kind {
                            SeriesKind::Open => r.open,
                            SeriesKind::Close => r.close,
                        };
                        (x.scale(r.date), y.scale(value))
                    })
                    .collect(),
            })
            .collect();

        let markers = filtered
            .records()
            .iter()
            .map(|r| Marker {
                cx: x.scale(r.date),
                cy: y.scale(r.open),
                radius: self.config.marker_radius,
                fill: self.config.open_color.clone(),
                tooltip: TooltipContent::from(r),
            })
            .collect();

        Some(ChartScene::Plot(PlotScene {
            frame: self.frame(),
            x_domain,
            y_domain,
            x_axis: self.x_axis(&x),
            y_axis: self.y_axis(&y),
            series,
            markers,
            legend: self.legend(),
        }))
    }

    fn frame(&self) -> Frame {
        Frame { width: self.config.width, height: self.config.height, margin: self.config.margin }
    }

    fn x_axis(&self, x: &TimeScale) -> Axis {
        Axis {
            orientation: AxisOrientation::Bottom,
            length: self.config.inner_width(),
            ticks: x
                .ticks(self.config.x_ticks)
                .into_iter()
                .map(|date| AxisTick { position: x.scale(date), label: x.format_tick(date) })
                .collect(),
        }
    }

    fn y_axis(&self, y: &LinearScale) -> Axis {
        let count = self.config.y_ticks;
        Axis {
            orientation: AxisOrientation::Left,
            length: self.config.inner_height(),
            ticks: y
                .ticks(count)
                .into_iter()
                .map(|value| AxisTick { position: y.scale(value), label: y.format_tick(value, count) })
                .collect(),
        }
    }

    /// Two fixed rows in the top-right corner of the plot area
    fn legend(&self) -> Vec<LegendEntry> {
        let swatch_x = self.config.inner_width() - 100.0;
        SeriesKind::iter()
            .enumerate()
            .map(|(row, kind)| {
                let swatch_y = 10.0 + row as f64 * LEGEND_ROW_HEIGHT;
                LegendEntry {
                    label: kind.to_string(),
                    color: self.config.color_of(kind).to_string(),
                    swatch_x,
                    swatch_y,
                    swatch_size: LEGEND_SWATCH,
                    label_x: swatch_x + LEGEND_SWATCH + 5.0,
                    label_y: swatch_y + 12.0,
                }
            })
            .collect()
    }
}
