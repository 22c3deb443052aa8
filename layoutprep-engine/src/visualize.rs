//! Highlight images for labeled pages
//!
//! Renders every heading word of a page as a translucent box with a solid
//! outline so labeling mistakes are easy to spot by eye. Rendering is
//! advisory: the pipeline goes on when it fails.

use crate::error::Result;
use image::{DynamicImage, Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use layoutprep_core::{ImageSize, LabelId, NormBox};
use log::warn;
use std::path::{Path, PathBuf};

/// Draws label boxes onto a page image
pub trait Renderer: Send + Sync {
    /// Render `labels` over `image` and write the result to `out`
    fn render(&self, image: &Path, boxes: &[NormBox], labels: &[LabelId], out: &Path) -> Result<PathBuf>;
}

/// Outline and fill color per label, `None` for unlabeled words
#[inline]
const fn label_color(label: LabelId) -> Option<[u8; 3]> {
    match label {
        LabelId::BeginSection | LabelId::InsideSection => Some([0, 0, 255]), // Blue
        LabelId::BeginSubsection | LabelId::InsideSubsection => Some([0, 200, 0]), // Green
        LabelId::Outside => None,
    }
}

/// Translucent box renderer
#[derive(Debug, Clone)]
pub struct HighlightRenderer {
    opacity: u8,
    line_thickness: u32,
}

impl Default for HighlightRenderer {
    fn default() -> Self {
        Self {
            opacity: 64,
            line_thickness: 2,
        }
    }
}

impl HighlightRenderer {
    /// Renderer with the given fill opacity and outline thickness
    pub fn new(opacity: u8, line_thickness: u32) -> Self {
        Self {
            opacity,
            line_thickness,
        }
    }

    /// Draw onto an overlay the size of `size`
    fn overlay(&self, size: ImageSize, boxes: &[NormBox], labels: &[LabelId]) -> RgbaImage {
        let mut overlay = RgbaImage::new(size.width, size.height);

        for (bbox, label) in boxes.iter().zip(labels) {
            let Some([r, g, b]) = label_color(*label) else {
                continue;
            };
            let (x0, y0, x1, y1) = bbox.denormalize(size);
            // Corners are inclusive
            let w = x1.saturating_sub(x0) + 1;
            let h = y1.saturating_sub(y0) + 1;

            let rect = Rect::at(x0 as i32, y0 as i32).of_size(w, h);
            draw_filled_rect_mut(&mut overlay, rect, Rgba([r, g, b, self.opacity]));

            for t in 0..self.line_thickness {
                let inner_w = w.saturating_sub(2 * t);
                let inner_h = h.saturating_sub(2 * t);
                if inner_w > 0 && inner_h > 0 {
                    let rect = Rect::at((x0 + t) as i32, (y0 + t) as i32).of_size(inner_w, inner_h);
                    draw_hollow_rect_mut(&mut overlay, rect, Rgba([r, g, b, 255]));
                }
            }
        }

        overlay
    }
}

impl Renderer for HighlightRenderer {
    fn render(&self, image: &Path, boxes: &[NormBox], labels: &[LabelId], out: &Path) -> Result<PathBuf> {
        let mut base = image::open(image)?.to_rgba8();
        let size = ImageSize::new(base.width(), base.height());
        let overlay = self.overlay(size, boxes, labels);

        for (dst, src) in base.pixels_mut().zip(overlay.pixels()) {
            if src.0[3] > 0 {
                dst.blend(src);
            }
        }

        DynamicImage::ImageRgba8(base).to_rgb8().save(out)?;
        Ok(out.to_path_buf())
    }
}

/// Render, logging instead of failing
pub fn render_best_effort<R: Renderer + ?Sized>(
    renderer: &R,
    image: &Path,
    boxes: &[NormBox],
    labels: &[LabelId],
    out: &Path,
) -> Option<PathBuf> {
    match renderer.render(image, boxes, labels, out) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("Skipping visualization {}: {}", out.display(), e);
            None
        }
    }
}
