// SPDX-License-Identifier: MIT
//
// Geometry: absolute screen regions.
//
// A `Rect` is the only geometric type the engine knows. Layout derives them,
// widgets paint inside them, and the runtime hands out the full-screen one.
// Coordinates are unsigned and 0-indexed from the top-left corner; anything
// that would go negative (an inset larger than the rect) clamps to zero.

// ─── Rect ───────────────────────────────────────────────────────────────────

/// An absolute screen region in terminal cells.
///
/// # Examples
///
/// ```
/// use minitui::geometry::Rect;
///
/// let r = Rect::new(10, 5, 80, 24);
/// assert_eq!(r.right(), 90);
/// assert_eq!(r.bottom(), 29);
/// assert!(Rect::zero().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (column).
    pub x: u16,
    /// Top edge (row).
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// The empty rectangle at the origin.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Right edge (exclusive), saturating at `u16::MAX`.
    #[inline]
    #[must_use]
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating at `u16::MAX`.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Number of cells covered (`width × height`).
    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Whether this rectangle covers no cells.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink by the given amount on each side. Width and height clamp at 0.
    #[must_use]
    pub const fn inset(self, left: u16, top: u16, right: u16, bottom: u16) -> Self {
        Self {
            x: self.x.saturating_add(left),
            y: self.y.saturating_add(top),
            width: self.width.saturating_sub(left).saturating_sub(right),
            height: self.height.saturating_sub(top).saturating_sub(bottom),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
