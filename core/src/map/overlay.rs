use serde::{Deserialize, Serialize};

/// Stroke styling for the footprint outline and its corner markers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayStyle {
    pub stroke_color: String,
    pub stroke_opacity: f32,
    pub stroke_weight: f32,
    pub marker_radius: f32,
    pub draggable_markers: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#FF0000".into(),
            stroke_opacity: 0.8,
            stroke_weight: 2.0,
            marker_radius: 6.0,
            draggable_markers: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl OverlayStyle {
    /// Stroke colour as RGB; malformed hex falls back to red.
    pub fn stroke_rgb(&self) -> Rgb {
        parse_hex_color(&self.stroke_color).unwrap_or(Rgb { r: 0xFF, g: 0, b: 0 })
    }
}

fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let trimmed = hex.strip_prefix('#').unwrap_or(hex);
    if trimmed.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(trimmed, 16).ok()?;
    Some(Rgb {
        r: (value >> 16) as u8,
        g: (value >> 8) as u8,
        b: value as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_outline_is_red() {
        let style = OverlayStyle::default();
        assert_eq!(style.stroke_rgb(), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(style.stroke_opacity, 0.8);
    }

    #[test]
    fn malformed_colour_falls_back() {
        let style = OverlayStyle {
            stroke_color: "#zz".into(),
            ..Default::default()
        };
        assert_eq!(style.stroke_rgb(), Rgb { r: 255, g: 0, b: 0 });
        let teal = OverlayStyle {
            stroke_color: "2EB8E3".into(),
            ..Default::default()
        };
        assert_eq!(teal.stroke_rgb(), Rgb { r: 0x2E, g: 0xB8, b: 0xE3 });
    }
}
