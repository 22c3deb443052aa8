//! Bounding-box coordinate spaces
//!
//! OCR reports pixel boxes as `(left, top, width, height)`. LayoutLM-style
//! models expect `(x0, y0, x1, y1)` integers scaled to a fixed `0..=1000`
//! space regardless of the page resolution.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound of the normalized coordinate space
pub const NORM_SCALE: u16 = 1000;

/// Pixel box as reported by OCR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBox {
    /// Left edge in pixels
    pub left: i32,
    /// Top edge in pixels
    pub top: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl PixelBox {
    /// Create a pixel box
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalize against the given image size
    pub fn normalize(&self, image_size: ImageSize) -> Result<NormBox> {
        normalize(
            self.left,
            self.top,
            self.width,
            self.height,
            image_size.width,
            image_size.height,
        )
    }
}

/// Image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageSize {
    /// Create an image size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Box in the normalized `0..=1000` space, serialized as `[x0, y0, x1, y1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u16; 4]", into = "[u16; 4]")]
pub struct NormBox {
    /// Left
    pub x0: u16,
    /// Top
    pub y0: u16,
    /// Right
    pub x1: u16,
    /// Bottom
    pub y1: u16,
}

impl NormBox {
    /// Box used for padding and special-token positions
    pub const ZERO: NormBox = NormBox {
        x0: 0,
        y0: 0,
        x1: 0,
        y1: 0,
    };

    /// Create a box, restoring `x0 <= x1` and `y0 <= y1` and clamping to the scale
    pub fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        let (x0, x1) = (x0.min(NORM_SCALE), x1.min(NORM_SCALE));
        let (y0, y1) = (y0.min(NORM_SCALE), y1.min(NORM_SCALE));
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Coordinates as an array
    pub fn to_array(self) -> [u16; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }

    /// Whether the box satisfies the ordering and range invariants
    pub fn is_well_formed(&self) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1 && self.x1 <= NORM_SCALE && self.y1 <= NORM_SCALE
    }

    /// Map back to a pixel rectangle `(x0, y0, x1, y1)` of the given image
    pub fn denormalize(&self, image_size: ImageSize) -> (u32, u32, u32, u32) {
        let to_px = |v: u16, len: u32| (u64::from(v) * u64::from(len) / u64::from(NORM_SCALE)) as u32;
        (
            to_px(self.x0, image_size.width),
            to_px(self.y0, image_size.height),
            to_px(self.x1, image_size.width),
            to_px(self.y1, image_size.height),
        )
    }
}

impl From<[u16; 4]> for NormBox {
    fn from(v: [u16; 4]) -> Self {
        NormBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<NormBox> for [u16; 4] {
    fn from(b: NormBox) -> Self {
        b.to_array()
    }
}

/// Scale a pixel box to the `0..=1000` space
///
/// Each coordinate is `clamp(round(1000 * v / extent), 0, 1000)`; components are
/// swapped afterwards if clamping inverted them. Fails on a zero-sized image.
pub fn normalize(
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    img_w: u32,
    img_h: u32,
) -> Result<NormBox> {
    if img_w == 0 || img_h == 0 {
        return Err(CoreError::DegenerateImage {
            width: img_w,
            height: img_h,
        });
    }

    let scale = |v: i64, extent: u32| -> u16 {
        let scaled = (f64::from(NORM_SCALE) * v as f64 / f64::from(extent)).round();
        scaled.clamp(0.0, f64::from(NORM_SCALE)) as u16
    };

    let (left, top) = (i64::from(left), i64::from(top));
    let x0 = scale(left, img_w);
    let y0 = scale(top, img_h);
    let x1 = scale(left + i64::from(width), img_w);
    let y1 = scale(top + i64::from(height), img_h);

    Ok(NormBox::new(x0, y0, x1, y1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        let b = normalize(100, 200, 50, 20, 1000, 2000).unwrap();
        assert_eq!(b, NormBox::new(100, 100, 150, 110));
    }

    #[test]
    fn test_normalize_rounds() {
        // 1000 * 1 / 3 = 333.33 -> 333, 1000 * 2 / 3 = 666.67 -> 667
        let b = normalize(1, 1, 1, 1, 3, 3).unwrap();
        assert_eq!(b.to_array(), [333, 333, 667, 667]);
    }

    #[test]
    fn test_normalize_clamps_overflowing_box() {
        let b = normalize(-10, 590, 700, 40, 600, 600).unwrap();
        assert_eq!(b.to_array(), [0, 983, 1000, 1000]);
    }

    #[test]
    fn test_normalize_restores_order_for_negative_extent() {
        let b = normalize(300, 300, -100, -100, 1000, 1000).unwrap();
        assert_eq!(b.to_array(), [200, 200, 300, 300]);
        assert!(b.is_well_formed());
    }

    #[test]
    fn test_normalize_degenerate_image() {
        assert_eq!(
            normalize(0, 0, 10, 10, 0, 100),
            Err(CoreError::DegenerateImage {
                width: 0,
                height: 100
            })
        );
        assert!(normalize(0, 0, 10, 10, 100, 0).is_err());
    }

    #[test]
    fn test_denormalize() {
        let b = NormBox::new(100, 250, 500, 1000);
        assert_eq!(b.denormalize(ImageSize::new(2000, 800)), (200, 200, 1000, 800));
    }

    #[test]
    fn test_norm_box_serializes_as_array() {
        let b = NormBox::new(1, 2, 3, 4);
        assert_eq!(serde_json::to_string(&b).unwrap(), "[1,2,3,4]");
        let back: NormBox = serde_json::from_str("[5,6,7,8]").unwrap();
        assert_eq!(back, NormBox::new(5, 6, 7, 8));
    }
}
