//! Themed tile-atlas decoding.
//!
//! A theme atlas is a square image divided into a 16×16 grid of equally sized
//! cells, one per byte value. Within each cell two uniquely colored marker
//! pixels encode the glyph metrics:
//!
//! - a pure blue pixel marks the glyph's anchor (pen offset);
//! - a pure green pixel marks the horizontal advance.
//!
//! [`decode`] extracts an [`AtlasMetrics`] table and scrubs the markers (and
//! the magenta colorkey) to transparency, so the returned pixels can be
//! uploaded to a texture as-is.

use image::{Rgba, RgbaImage};

use crate::backend::AtlasMetrics;

const MARKER_ANCHOR: Rgba<u8> = Rgba([0, 0, 255, 255]);
const MARKER_ADVANCE: Rgba<u8> = Rgba([0, 255, 0, 255]);
const COLORKEY: Rgba<u8> = Rgba([255, 0, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A decoded theme atlas: marker-free pixels plus the extracted metrics.
pub struct Atlas {
    pub image: RgbaImage,
    pub metrics: AtlasMetrics,
}

/// Load and decode a theme atlas from disk (PNG or BMP).
pub fn load(path: &str) -> Result<Atlas, image::ImageError> {
    let img = image::open(path)?.to_rgba8();
    Ok(decode(img))
}

/// Extract glyph metrics from an atlas image and scrub the marker pixels.
pub fn decode(mut img: RgbaImage) -> Atlas {
    let cell_w = img.width() as i32 / 16;
    let cell_h = img.height() as i32 / 16;

    let mut offsets = vec![(0, 0); 256];
    let mut advances = vec![cell_w; 256];

    for ty in 0..16i32 {
        for tx in 0..16i32 {
            let base_x = tx * cell_w;
            let base_y = ty * cell_h;
            let glyph = (tx + ty * 16) as usize;

            for oy in 0..cell_h {
                for ox in 0..cell_w {
                    let px = (base_x + ox) as u32;
                    let py = (base_y + oy) as u32;
                    let pixel = *img.get_pixel(px, py);
                    if pixel == MARKER_ANCHOR {
                        // anchored from the cell bottom
                        offsets[glyph] = (ox, cell_h - oy);
                        img.put_pixel(px, py, TRANSPARENT);
                    } else if pixel == MARKER_ADVANCE {
                        advances[glyph] = ox;
                        img.put_pixel(px, py, TRANSPARENT);
                    } else if pixel == COLORKEY {
                        img.put_pixel(px, py, TRANSPARENT);
                    }
                }
            }
        }
    }

    log::debug!("decoded atlas: 16x16 cells of {}x{}px", cell_w, cell_h);

    let metrics = AtlasMetrics::new(img.width() as i32, img.height() as i32, offsets, advances);
    Atlas {
        image: img,
        metrics,
    }
}
