//! Rounded-rectangle gradient backgrounds for app icons.

use anyhow::{anyhow, bail, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::str::FromStr;

/// Fraction of the icon edge left transparent around the rounded rectangle.
pub const MARGIN_RATIO: f64 = 0.02;

/// Default corner radius as a fraction of the icon edge.
pub const DEFAULT_RADIUS_RATIO: f64 = 0.18;

/// Vertical two-stop gradient, `top` at row 0 fading towards `bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub top: Rgba<u8>,
    pub bottom: Rgba<u8>,
}

impl Default for Gradient {
    /// The orange gradient used for the chess client icon.
    fn default() -> Self {
        Self {
            top: Rgba([235, 145, 65, 255]),
            bottom: Rgba([190, 110, 40, 255]),
        }
    }
}

impl Gradient {
    /// Builds a gradient from two opaque CSS color strings.
    pub fn parse(top: &str, bottom: &str) -> Result<Self> {
        Ok(Self {
            top: parse_opaque_color(top)?,
            bottom: parse_opaque_color(bottom)?,
        })
    }

    /// Opaque color of row `y` in an icon `size` pixels tall.
    pub fn color_at(&self, y: u32, size: u32) -> Rgba<u8> {
        let ratio = y as f64 / size as f64;
        let channel = |i: usize| {
            let top = self.top[i] as f64;
            let bottom = self.bottom[i] as f64;
            (top + (bottom - top) * ratio) as u8
        };
        Rgba([channel(0), channel(1), channel(2), 255])
    }
}

/// Parses a CSS color (e.g. `#eb9141`, `orange`) into an RGBA pixel.
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow!("Invalid color: {color}"))?;
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.).round() as u8;
    Ok(Rgba([
        to_u8(srgb.red),
        to_u8(srgb.green),
        to_u8(srgb.blue),
        to_u8(srgb.alpha),
    ]))
}

// The gradient is always drawn opaque, so translucent stops are refused.
fn parse_opaque_color(color: &str) -> Result<Rgba<u8>> {
    let rgba = parse_color(color)?;
    if rgba[3] != 255 {
        bail!("Gradient colors must be opaque, got {color}");
    }
    Ok(rgba)
}

/// Returns true when `(x, y)` lies inside the rounded rectangle inset by
/// `margin` with corner `radius`, in a `size × size` canvas.
///
/// Corners take precedence left before right and top before bottom, which only
/// matters on tiny canvases where the corner regions overlap.
pub fn in_rounded_rect(x: u32, y: u32, size: u32, margin: u32, radius: u32) -> bool {
    let (x, y, size, margin, radius) = (
        x as i64,
        y as i64,
        size as i64,
        margin as i64,
        radius as i64,
    );
    let near = margin + radius;
    let far = size - margin - radius - 1;

    let corner = |v: i64| {
        if v < near {
            Some(near)
        } else if v > far {
            Some(far)
        } else {
            None
        }
    };

    match (corner(x), corner(y)) {
        (Some(cx), Some(cy)) => {
            let (dx, dy) = (x - cx, y - cy);
            dx * dx + dy * dy <= radius * radius
        }
        _ => x >= margin && x < size - margin && y >= margin && y < size - margin,
    }
}

/// Draws the gradient rounded rectangle on a transparent `size × size` canvas.
pub fn create_rounded_gradient(size: u32, gradient: &Gradient, radius_ratio: f64) -> RgbaImage {
    let margin = (size as f64 * MARGIN_RATIO) as u32;
    let radius = (size as f64 * radius_ratio) as u32;

    ImageBuffer::from_fn(size, size, |x, y| {
        if in_rounded_rect(x, y, size, margin, radius) {
            gradient.color_at(y, size)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_rows() {
        let gradient = Gradient::default();
        assert_eq!(gradient.color_at(0, 100), Rgba([235, 145, 65, 255]));
        // ratio 0.5: 235 - 22.5, 145 - 17.5, 65 - 12.5, truncated
        assert_eq!(gradient.color_at(50, 100), Rgba([212, 127, 52, 255]));
        assert_eq!(gradient.color_at(99, 100), Rgba([190, 110, 40, 255]));
    }

    #[test]
    fn test_parse_default_colors() {
        let gradient = Gradient::parse("#eb9141", "#be6e28").unwrap();
        assert_eq!(gradient, Gradient::default());
    }

    #[test]
    fn test_parse_invalid_color() {
        let err = parse_color("not-a-color").unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn test_parse_rejects_translucent_colors() {
        for color in ["rgba(10, 20, 30, 0.5)", "rgba(0, 0, 0, 0)"] {
            let err = Gradient::parse(color, "#be6e28").unwrap_err();
            assert!(err.to_string().contains("opaque"), "{color}: {err}");
        }
        assert!(Gradient::parse("#eb9141", "rgba(190, 110, 40, 0.2)").is_err());

        // plain parsing still reports the alpha channel
        assert_eq!(parse_color("rgba(0, 0, 0, 0)").unwrap()[3], 0);
    }

    #[test]
    fn test_rounded_rect_mask() {
        // size 100: margin 2, radius 18
        assert!(in_rounded_rect(50, 50, 100, 2, 18));
        assert!(!in_rounded_rect(1, 50, 100, 2, 18));
        assert!(!in_rounded_rect(50, 98, 100, 2, 18));
        assert!(in_rounded_rect(97, 50, 100, 2, 18));

        // cut-off corners
        assert!(!in_rounded_rect(2, 2, 100, 2, 18));
        assert!(!in_rounded_rect(97, 97, 100, 2, 18));
        // straight edges next to a corner region
        assert!(in_rounded_rect(20, 2, 100, 2, 18));
        assert!(in_rounded_rect(2, 20, 100, 2, 18));
        // either side of the top-left arc
        assert!(in_rounded_rect(19, 3, 100, 2, 18));
        assert!(!in_rounded_rect(19, 2, 100, 2, 18));
    }

    #[test]
    fn test_rounded_gradient_is_symmetric() {
        let img = create_rounded_gradient(64, &Gradient::default(), DEFAULT_RADIUS_RATIO);
        assert_eq!(img.dimensions(), (64, 64));

        for y in 0..64 {
            for x in 0..64 {
                let alpha = img.get_pixel(x, y)[3];
                assert_eq!(alpha, img.get_pixel(63 - x, y)[3], "mirror at ({x}, {y})");
                assert_eq!(alpha, img.get_pixel(x, 63 - y)[3], "flip at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_rounded_gradient_corners_transparent() {
        let img = create_rounded_gradient(128, &Gradient::default(), DEFAULT_RADIUS_RATIO);
        for (x, y) in [(0, 0), (127, 0), (0, 127), (127, 127), (4, 4)] {
            assert_eq!(img.get_pixel(x, y)[3], 0, "corner ({x}, {y})");
        }
        assert_eq!(img.get_pixel(64, 64)[3], 255);
        assert_eq!(*img.get_pixel(64, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*img.get_pixel(64, 2), Gradient::default().color_at(2, 128));
    }

    #[test]
    fn test_zero_radius_is_plain_inset_square() {
        let img = create_rounded_gradient(100, &Gradient::default(), 0.0);
        assert_eq!(img.get_pixel(2, 2)[3], 255);
        assert_eq!(img.get_pixel(1, 2)[3], 0);
        assert_eq!(img.get_pixel(97, 97)[3], 255);
        assert_eq!(img.get_pixel(98, 97)[3], 0);
    }
}
