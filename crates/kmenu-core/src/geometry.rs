#![forbid(unsafe_code)]

//! Geometric primitives.

/// An axis-aligned rectangle used for panel bounds and row layout.
///
/// Uses screen coordinates with the origin at top-left. All values are in
/// host units (pixels, cells, whatever the render callbacks draw in).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// The zero rectangle. Render traversals use it to mean "no own row".
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge. Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Whether a point lies inside (left/top inclusive, right/bottom exclusive).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// The same origin with a different height.
    #[inline]
    #[must_use]
    pub fn with_height(&self, height: f32) -> Rect {
        Rect::new(self.x, self.y, self.width, height)
    }
}
