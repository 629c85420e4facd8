//! Terminal rendering of a [`HoldButton`].
//!
//! The button is a base fill in the tint colour with a progress overlay
//! growing from the left edge, the label centred on top. A capsule shape
//! leaves its four corner cells out of both the drawing and the contact
//! area.

use std::str::FromStr;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Widget,
};

use crate::config::{ButtonConfig, ButtonShape, ConfigError};
use crate::hold::{HoldButton, Phase};

/// Points per terminal row.
pub const POINTS_PER_ROW: f64 = 10.0;
/// Points per terminal column.
pub const POINTS_PER_COLUMN: f64 = 5.0;

/// Resolved styling of the button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    /// Base fill.
    pub tint: Color,
    /// Progress fill.
    pub loading_tint: Color,
    /// Scale while held.
    pub holding_scale: f64,
    /// Clip and contact shape.
    pub shape: ButtonShape,
    /// Rows above and below the label.
    pub vertical_padding: u16,
    /// Columns left and right of the label.
    pub horizontal_padding: u16,
}

impl ButtonStyle {
    /// Resolve colours and convert padding from points to cells.
    pub fn from_config(config: &ButtonConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            tint: parse_color("button.tint_color", &config.tint_color)?,
            loading_tint: parse_color("button.loading_tint_color", &config.loading_tint_color)?,
            holding_scale: config.holding_scale,
            shape: config.shape,
            vertical_padding: points_to_cells(config.vertical_padding, POINTS_PER_ROW),
            horizontal_padding: points_to_cells(config.horizontal_padding, POINTS_PER_COLUMN),
        })
    }

    /// Cells needed to draw `label` with padding, as (width, height).
    pub fn size(&self, label: &str) -> (u16, u16) {
        let label_width = Line::from(label).width() as u16;
        (
            label_width.saturating_add(self.horizontal_padding.saturating_mul(2)),
            1 + self.vertical_padding.saturating_mul(2),
        )
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            tint: Color::Black,
            loading_tint: Color::DarkGray,
            holding_scale: 0.95,
            shape: ButtonShape::Capsule,
            vertical_padding: 1,
            horizontal_padding: 4,
        }
    }
}

fn parse_color(key: &str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value.trim())
        .map_err(|_| ConfigError::Invalid(format!("{key} is not a colour: {value}")))
}

fn points_to_cells(points: f64, per_cell: f64) -> u16 {
    (points / per_cell).round().clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Whether cell (`x`, `y`) lies inside `shape` drawn over `area`.
pub fn contains(shape: ButtonShape, area: Rect, x: u16, y: u16) -> bool {
    let inside = x >= area.x && x < area.right() && y >= area.y && y < area.bottom();
    if !inside {
        return false;
    }
    match shape {
        ButtonShape::Rectangle => true,
        ButtonShape::Capsule => {
            if area.width < 3 || area.height < 2 {
                return true;
            }
            let edge_x = x == area.x || x == area.right() - 1;
            let edge_y = y == area.y || y == area.bottom() - 1;
            !(edge_x && edge_y)
        }
    }
}

/// `area` scaled by `scale` about its centre; never smaller than one cell.
pub fn scaled_rect(area: Rect, scale: f64) -> Rect {
    let width = ((f64::from(area.width) * scale).round() as u16).clamp(1, area.width.max(1));
    let height = ((f64::from(area.height) * scale).round() as u16).clamp(1, area.height.max(1));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Width of the progress overlay for `progress` over `width` cells.
pub fn fill_width(progress: f64, width: u16) -> u16 {
    ((progress.clamp(0.0, 1.0) * f64::from(width)).round() as u16).min(width)
}

/// Stateless view of a [`HoldButton`].
#[derive(Debug)]
pub struct HoldButtonWidget<'a> {
    button: &'a HoldButton,
    style: &'a ButtonStyle,
}

impl<'a> HoldButtonWidget<'a> {
    /// Render `button` with `style`.
    pub fn new(button: &'a HoldButton, style: &'a ButtonStyle) -> Self {
        Self { button, style }
    }
}

impl Widget for HoldButtonWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        let rect = if self.button.phase() == Phase::Holding {
            scaled_rect(area, self.style.holding_scale)
        } else {
            area
        };

        let filled = rect.x + fill_width(self.button.session().progress(), rect.width);
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                if !contains(self.style.shape, rect, x, y) {
                    continue;
                }
                let bg = if x < filled {
                    self.style.loading_tint
                } else {
                    self.style.tint
                };
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(' ').set_bg(bg);
                }
            }
        }

        let label = self.button.label();
        let label_width = (Line::from(label).width() as u16).min(rect.width);
        let x = rect.x + (rect.width - label_width) / 2;
        let y = rect.y + rect.height / 2;
        buf.set_stringn(
            x,
            y,
            label,
            usize::from(label_width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );
    }
}
