use crate::domain::errors::{AppError, AppResult};
use crate::domain::market_data::{Company, Month, Selection};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// Upper bound for `x_ticks` and `y_ticks`; tick generation allocates one entry per tick
pub const MAX_TICKS: usize = 100;

/// Value Object - the two plotted price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum SeriesKind {
    #[display(fmt = "Open")]
    Open,
    #[display(fmt = "Close")]
    Close,
}

/// Value Object - outer margins around the plot area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 20.0, right: 50.0, bottom: 50.0, left: 60.0 }
    }
}

/// Widget configuration. Every field is optional in JSON; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub open_color: String,
    pub close_color: String,
    pub stroke_width: f64,
    pub marker_radius: f64,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub default_company: Company,
    pub default_month: Month,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin: Margin::default(),
            open_color: "#b2df8a".to_string(),
            close_color: "#e41a1c".to_string(),
            stroke_width: 2.0,
            marker_radius: 4.0,
            x_ticks: 10,
            y_ticks: 10,
            default_company: Company::Apple,
            default_month: Month::November,
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| AppError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(AppError::InvalidConfig(format!(
                "plot area {}x{} leaves no room inside the margins",
                self.width, self.height
            )));
        }
        if self.marker_radius < 0.0 || self.stroke_width < 0.0 {
            return Err(AppError::InvalidConfig("negative marker radius or stroke width".to_string()));
        }
        for (axis, count) in [("x_ticks", self.x_ticks), ("y_ticks", self.y_ticks)] {
            if !(1..=MAX_TICKS).contains(&count) {
                return Err(AppError::InvalidConfig(format!("{axis} must be within 1..={MAX_TICKS}, got {count}")));
            }
        }
        for color in [&self.open_color, &self.close_color] {
            if hex_rgb(color).is_none() {
                return Err(AppError::InvalidConfig(format!("colour {color:?} is not #rrggbb")));
            }
        }
        Ok(())
    }

    /// Plot width inside the margins
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Plot height inside the margins
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn default_selection(&self) -> Selection {
        Selection::new(self.default_company, self.default_month)
    }

    pub fn color_of(&self, kind: SeriesKind) -> &str {
        match kind {
            SeriesKind::Open => &self.open_color,
            SeriesKind::Close => &self.close_color,
        }
    }
}

/// Packed `0xRRGGBB` value of a `#rrggbb` colour
pub fn hex_rgb(color: &str) -> Option<u32> {
    let digits = color.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
