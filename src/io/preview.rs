//! UV layout preview images
//!
//! Rasterizes the edges of every placed face into a square image, one color
//! per island, for eyeballing a layout.

use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::document::DocumentError;
use crate::unwrap::UnwrapResult;

/// Line colors, cycled by island
const ISLAND_COLORS: [[u8; 4]; 6] = [
    [230, 230, 230, 255],
    [255, 170, 60, 255],
    [90, 200, 250, 255],
    [150, 230, 120, 255],
    [240, 110, 160, 255],
    [200, 160, 255, 255],
];

/// Preview image settings
#[derive(Debug, Clone)]
pub struct PreviewStyle {
    /// Width and height in pixels
    pub size: u32,
    /// Empty border in pixels
    pub padding: u32,
    /// Background color (RGBA)
    pub background: [u8; 4],
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            size: 512,
            padding: 16,
            background: [24, 24, 28, 255],
        }
    }
}

impl PreviewStyle {
    /// Set image size
    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set padding
    #[must_use]
    pub const fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }
}

/// Draw the layout's face edges
#[must_use]
pub fn render_preview<F>(result: &UnwrapResult<F>, style: &PreviewStyle) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(style.size, style.size, Rgba(style.background));

    let Some((min, max)) = result.uv_bounds() else {
        return image;
    };

    let extent = (max - min).max_element();
    let drawable = style.size.saturating_sub(2 * style.padding).max(1) as f32 - 1.0;
    let scale = if extent > 0.0 { drawable / extent } else { 1.0 };
    let padding = style.padding as f32;
    let bottom = style.size as f32 - 1.0;

    // V grows upward in the layout, rows grow downward in the image
    let to_pixel = |uv: Vec2| {
        let p = (uv - min) * scale;
        Vec2::new(padding + p.x, bottom - padding - p.y)
    };

    for face in &result.faces {
        let color = Rgba(ISLAND_COLORS[face.island % ISLAND_COLORS.len()]);
        let ring = &face.indices;

        for (i, &start) in ring.iter().enumerate() {
            let end = ring[(i + 1) % ring.len()];
            if let (Some(a), Some(b)) = (result.uv(start), result.uv(end)) {
                draw_line(&mut image, to_pixel(a), to_pixel(b), color);
            }
        }
    }

    image
}

/// Render and write a preview as PNG
///
/// # Errors
///
/// Returns an error if the image cannot be encoded or written
pub fn save_preview<F>(
    result: &UnwrapResult<F>,
    style: &PreviewStyle,
    path: impl AsRef<Path>,
) -> Result<(), DocumentError> {
    let path = path.as_ref();
    render_preview(result, style)
        .save(path)
        .map_err(|e| DocumentError::ImageError(format!("{}: {e}", path.display())))?;
    log::info!("Wrote preview {}", path.display());
    Ok(())
}

/// Plot a line by stepping along its longer axis
fn draw_line(image: &mut RgbaImage, from: Vec2, to: Vec2, color: Rgba<u8>) {
    let delta = to - from;
    let steps = delta.abs().max_element().ceil().max(1.0) as u32;

    for step in 0..=steps {
        let p = from + delta * (step as f32 / steps as f32);
        let (x, y) = (p.x.round(), p.y.round());
        if x >= 0.0 && y >= 0.0 && (x as u32) < image.width() && (y as u32) < image.height() {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::PolyMesh;
    use crate::unwrap::unwrap_faces;

    #[test]
    fn test_empty_result_is_blank() {
        let style = PreviewStyle::default().with_size(32);
        let image = render_preview(&UnwrapResult::<u32>::default(), &style);

        assert_eq!(image.dimensions(), (32, 32));
        assert!(image.pixels().all(|p| p.0 == style.background));
    }

    #[test]
    fn test_quad_outline_touches_padding_box() {
        let quad = PolyMesh::quad(1.0);
        let faces: Vec<_> = quad.face_ids().collect();
        let result = unwrap_faces(&quad, &faces);

        let style = PreviewStyle::default().with_size(64).with_padding(4);
        let image = render_preview(&result, &style);

        let lit = |x: u32, y: u32| image.get_pixel(x, y).0 != style.background;
        // Corners of the drawable box
        assert!(lit(4, 4));
        assert!(lit(59, 59));
        assert!(lit(4, 59));
        assert!(lit(59, 4));
        // Interior stays empty
        assert!(!lit(32, 32));
    }
}
