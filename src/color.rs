use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::{FigureError, Result};

/// An sRGB colour, serialised as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl From<Rgb> for Color32 {
    fn from(Rgb([r, g, b]): Rgb) -> Self {
        Color32::from_rgb(r, g, b)
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb([
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Named colours
// ---------------------------------------------------------------------------

/// Resolve a CSS/SVG colour keyword such as `"steelblue"` or `"tomato"`.
pub fn named_color(name: &str) -> Result<Rgb> {
    let key = name.trim().to_ascii_lowercase();
    palette::named::from_str(&key)
        .map(|c| Rgb([c.red, c.green, c.blue]))
        .ok_or_else(|| FigureError::InvalidParameter(format!("unknown colour name '{name}'")))
}

/// Assign a colour to each of `requested` entries: named ones are resolved,
/// the rest draw from an evenly spaced palette.
pub fn assign_colors(requested: &[Option<&str>]) -> Result<Vec<Rgb>> {
    let unnamed = requested.iter().filter(|c| c.is_none()).count();
    let mut fallback = generate_palette(unnamed).into_iter();

    requested
        .iter()
        .map(|c| match c {
            Some(name) => named_color(name),
            None => fallback
                .next()
                .ok_or_else(|| FigureError::InvalidParameter("palette exhausted".to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn named_colours_resolve() {
        assert_eq!(named_color("steelblue").unwrap(), Rgb([70, 130, 180]));
        assert_eq!(named_color("Tomato").unwrap(), Rgb([255, 99, 71]));
        assert!(matches!(
            named_color("not-a-colour"),
            Err(FigureError::InvalidParameter(_))
        ));
    }

    #[test]
    fn assign_mixes_named_and_generated() {
        let colours = assign_colors(&[Some("black"), None, None]).unwrap();
        assert_eq!(colours[0], Rgb([0, 0, 0]));
        assert_eq!(&colours[1..], generate_palette(2).as_slice());
    }

    #[test]
    fn converts_to_egui_colour() {
        let c: Color32 = Rgb([1, 2, 3]).into();
        assert_eq!(c, Color32::from_rgb(1, 2, 3));
    }
}
