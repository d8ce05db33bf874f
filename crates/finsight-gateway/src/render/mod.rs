//! PNG chart rendering for the chart output mode.
//!
//! Charts are plain raster drawings (no text): a bar chart for the revenue
//! aggregate and a color-mapped grid for the trading-activity pivot. Results
//! are returned to clients as `data:image/png;base64,...` URIs.

pub mod bar;
pub mod heatmap;

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, Rgb, RgbImage};

use finsight_core::error::{Result, FinsightError};

pub use bar::render_bar_chart;
pub use heatmap::render_heatmap;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 480;
pub const MARGIN: u32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);

/// Drawing surface with clipped rectangle fills.
pub(crate) struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, BACKGROUND),
        }
    }

    /// Fill `[x0, x1) x [y0, y1)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
        let (w, h) = self.img.dimensions();
        for y in y0.min(h)..y1.min(h) {
            for x in x0.min(w)..x1.min(w) {
                self.img.put_pixel(x, y, color);
            }
        }
    }

    /// Left and bottom axis lines around the plot area.
    pub fn axes(&mut self) {
        let (w, h) = self.img.dimensions();
        self.fill_rect(MARGIN - 2, MARGIN, MARGIN, h - MARGIN, AXIS);
        self.fill_rect(MARGIN - 2, h - MARGIN, w - MARGIN, h - MARGIN + 2, AXIS);
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }
}

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| FinsightError::Render(e.to_string()))?;
    Ok(buf.into_inner())
}

pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Encode and wrap in one step.
pub fn to_data_uri(img: &RgbImage) -> Result<String> {
    Ok(png_data_uri(&encode_png(img)?))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn png_signature_and_uri_prefix() {
        let mut c = Canvas::new(16, 16);
        c.fill_rect(0, 0, 100, 100, AXIS);
        let png = encode_png(&c.into_image()).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

        let uri = png_data_uri(&png);
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
