use super::svg::{Color, Point};
use serde::{Deserialize, Serialize};

/// Parámetros de dibujo del mapa, tal como llegan en `render_settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: Point,
    pub stop_label_font_size: u32,
    pub stop_label_offset: Point,
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RenderSettingsError {
    #[error("Color palette is empty")]
    EmptyPalette,
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), RenderSettingsError> {
        if self.color_palette.is_empty() {
            return Err(RenderSettingsError::EmptyPalette);
        }

        let sizes = [
            ("width", self.width),
            ("height", self.height),
            ("padding", self.padding),
            ("line_width", self.line_width),
            ("stop_radius", self.stop_radius),
            ("underlayer_width", self.underlayer_width),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderSettingsError::InvalidValue { field, value });
            }
        }

        // El padding no puede comerse todo el lienzo
        let half_side = self.width.min(self.height) / 2.0;
        if self.padding >= half_side && half_side > 0.0 {
            return Err(RenderSettingsError::InvalidValue {
                field: "padding",
                value: self.padding,
            });
        }

        Ok(())
    }

    /// Color de la paleta para la ruta número `index`, ciclando.
    /// Con la paleta vacía se devuelve `Color::None`.
    pub fn palette_color(&self, index: usize) -> Color {
        if self.color_palette.is_empty() {
            return Color::None;
        }
        self.color_palette[index % self.color_palette.len()].clone()
    }
}
