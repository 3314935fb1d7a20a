//! The rendering backend boundary.
//!
//! The toolkit never rasterizes anything itself. It accumulates draw commands
//! (see [`crate::device`]) and replays them at flush time against a [`Backend`]
//! implementation supplied by the host: an SDL renderer, a GPU pipeline, or
//! the [`RecordingBackend`] used by tests and headless demos.
//!
//! Glyph metrics come from the themed tile atlas and are likewise supplied by
//! the host as [`AtlasMetrics`] (the [`crate::atlas`] module can extract them
//! from an atlas image).

use crate::geometry::{Color, Rect};

/// Raster operations the host must provide.
///
/// `src` rectangles are in atlas pixel coordinates; `dst` rectangles in
/// viewport pixel coordinates. Blits stretch when the sizes differ.
pub trait Backend {
    /// Copy a sub-region of the themed atlas to the viewport with a tint.
    fn blit(&mut self, src: Rect, dst: Rect, tint: Color);

    /// Set or clear the active scissor rectangle.
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Draw a debug outline. Only emitted by [`crate::device::Device::debug_rect`].
    fn outline(&mut self, rect: Rect);

    /// Current viewport size in pixels.
    fn viewport(&self) -> (i32, i32);

    /// Current clipboard contents, empty when unavailable.
    fn clipboard_text(&self) -> String {
        String::new()
    }
}

/// Per-glyph metrics extracted from a themed tile atlas.
///
/// The atlas is a square grid of 16×16 equally sized cells, one per byte
/// value. Each glyph has an anchor offset (where the pen position sits within
/// the cell) and a horizontal advance to the next glyph.
#[derive(Debug, Clone)]
pub struct AtlasMetrics {
    atlas_width: i32,
    atlas_height: i32,
    offsets: Vec<(i32, i32)>,
    advances: Vec<i32>,
}

impl AtlasMetrics {
    pub fn new(
        atlas_width: i32,
        atlas_height: i32,
        offsets: Vec<(i32, i32)>,
        advances: Vec<i32>,
    ) -> Self {
        debug_assert_eq!(offsets.len(), 256);
        debug_assert_eq!(advances.len(), 256);
        Self {
            atlas_width,
            atlas_height,
            offsets,
            advances,
        }
    }

    /// Metrics for a grid with no anchor markers: zero offsets, full-cell
    /// advances. Handy for tests and hosts with pre-aligned glyphs.
    pub fn uniform(cell_width: i32, cell_height: i32) -> Self {
        Self {
            atlas_width: cell_width * 16,
            atlas_height: cell_height * 16,
            offsets: vec![(0, 0); 256],
            advances: vec![cell_width; 256],
        }
    }

    pub fn atlas_width(&self) -> i32 {
        self.atlas_width
    }

    pub fn atlas_height(&self) -> i32 {
        self.atlas_height
    }

    pub fn cell_width(&self) -> i32 {
        self.atlas_width / 16
    }

    pub fn cell_height(&self) -> i32 {
        self.atlas_height / 16
    }

    pub fn offset(&self, glyph: u8) -> (i32, i32) {
        self.offsets[glyph as usize]
    }

    pub fn advance(&self, glyph: u8) -> i32 {
        self.advances[glyph as usize]
    }
}

/// A recorded blit, for inspection after a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blit {
    pub src: Rect,
    pub dst: Rect,
    pub tint: Color,
}

/// Backend that records every raster call instead of drawing.
///
/// Used by the test suite to assert on emitted geometry and ordering, and by
/// headless demos.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    width: i32,
    height: i32,
    pub clipboard: String,
    pub blits: Vec<Blit>,
    pub clips: Vec<Option<Rect>>,
    pub outlines: Vec<Rect>,
}

impl RecordingBackend {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.blits.clear();
        self.clips.clear();
        self.outlines.clear();
    }
}

impl Backend for RecordingBackend {
    fn blit(&mut self, src: Rect, dst: Rect, tint: Color) {
        self.blits.push(Blit { src, dst, tint });
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clips.push(clip);
    }

    fn outline(&mut self, rect: Rect) {
        self.outlines.push(rect);
    }

    fn viewport(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn clipboard_text(&self) -> String {
        self.clipboard.clone()
    }
}
