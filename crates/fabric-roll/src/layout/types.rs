//! Layout data types
//!
//! These types sit between the tiling arithmetic and PDF rendering.

/// A rectangular area in points (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (top edge)
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Bottom edge in PDF user space for a page of the given height
    pub fn pdf_y(&self, page_height: f64) -> f64 {
        page_height - self.bottom()
    }
}

/// One placement of the scaled source image
pub type Tile = Rect;

/// Every tile covering a template, row-major from the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet {
    /// Full tile width (points)
    pub tile_width: f64,
    /// Full tile height (points); clipped tiles may be shorter
    pub tile_height: f64,
    /// Tiles per row
    pub columns: usize,
    /// Number of rows, including a partial last row
    pub rows: usize,
    pub tiles: Vec<Tile>,
}

impl TileSet {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles of one row, left to right
    pub fn row(&self, index: usize) -> &[Tile] {
        let start = index * self.columns;
        let end = (start + self.columns).min(self.tiles.len());
        self.tiles.get(start..end).unwrap_or(&[])
    }

    /// Whether the tile is shorter than a full tile (clipped at the page bottom)
    pub fn is_truncated(&self, tile: &Tile) -> bool {
        tile.height < self.tile_height
    }

    /// Width-to-height ratio of a full tile
    pub fn aspect_ratio(&self) -> f64 {
        self.tile_width / self.tile_height
    }
}
