// SPDX-License-Identifier: MIT
//
// Layout: splitting a rectangle by sizing constraints.
//
// Resolution is two passes over the constraint list:
//
//   1. Length(n) reserves n cells, Percentage(p) reserves floor(total·p/100).
//      Fill weights are summed on the side.
//   2. Whatever is left (never below zero) is shared among Fill constraints,
//      each getting floor(remaining·w/total_weight).
//
// Rects are then laid end to end from the parent's origin along the split
// axis; the other axis is copied from the parent. Floor truncation can leave
// a few cells unused at the end. They are not redistributed.

use crate::geometry::Rect;

// ─── Constraint ──────────────────────────────────────────────────────────────

/// How much of the split axis one segment takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Exactly this many cells.
    Length(u16),
    /// This percentage of the parent, rounded down.
    Percentage(u16),
    /// A weighted share of whatever Length and Percentage left over.
    Fill(u16),
}

impl Constraint {
    #[must_use]
    pub const fn length(n: u16) -> Self {
        Self::Length(n)
    }

    #[must_use]
    pub const fn percentage(p: u16) -> Self {
        Self::Percentage(p)
    }

    #[must_use]
    pub const fn fill(weight: u16) -> Self {
        Self::Fill(weight)
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::Fill(1)
    }
}

// ─── Direction ───────────────────────────────────────────────────────────────

/// The axis along which a rectangle is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Stack segments top to bottom; constraints size heights.
    #[default]
    Vertical,
    /// Place segments left to right; constraints size widths.
    Horizontal,
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// `floor(total · p / 100)`.
fn percent_of(total: u16, p: u16) -> u32 {
    u32::from(total) * u32::from(p) / 100
}

fn saturate(n: u32) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Resolve `constraints` against `total` cells, returning one size each.
///
/// ```
/// use minitui::layout::{resolve, Constraint};
///
/// let sizes = resolve(&[Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)], 24);
/// assert_eq!(sizes, vec![1, 22, 1]);
/// ```
#[must_use]
pub fn resolve(constraints: &[Constraint], total: u16) -> Vec<u16> {
    let mut reserved: u32 = 0;
    let mut fill_weight: u32 = 0;

    for constraint in constraints {
        match *constraint {
            Constraint::Length(n) => reserved += u32::from(n),
            Constraint::Percentage(p) => reserved += percent_of(total, p),
            Constraint::Fill(w) => fill_weight += u32::from(w),
        }
    }

    let remaining = u32::from(total).saturating_sub(reserved);

    constraints
        .iter()
        .map(|constraint| match *constraint {
            Constraint::Length(n) => n,
            Constraint::Percentage(p) => saturate(percent_of(total, p)),
            Constraint::Fill(_) if fill_weight == 0 => 0,
            Constraint::Fill(w) => saturate(remaining * u32::from(w) / fill_weight),
        })
        .collect()
}

/// Split `rect` along `direction` into one rectangle per constraint.
///
/// An empty constraint list yields an empty result.
///
/// ```
/// use minitui::geometry::Rect;
/// use minitui::layout::{split, Constraint, Direction};
///
/// let cols = split(
///     Rect::new(0, 0, 80, 24),
///     Direction::Horizontal,
///     &[Constraint::Length(20), Constraint::Fill(1)],
/// );
/// assert_eq!(cols, vec![Rect::new(0, 0, 20, 24), Rect::new(20, 0, 60, 24)]);
/// ```
#[must_use]
pub fn split(rect: Rect, direction: Direction, constraints: &[Constraint]) -> Vec<Rect> {
    match direction {
        Direction::Vertical => {
            let mut y = rect.y;
            resolve(constraints, rect.height)
                .into_iter()
                .map(|height| {
                    let r = Rect::new(rect.x, y, rect.width, height);
                    y = y.saturating_add(height);
                    r
                })
                .collect()
        }
        Direction::Horizontal => {
            let mut x = rect.x;
            resolve(constraints, rect.width)
                .into_iter()
                .map(|width| {
                    let r = Rect::new(x, rect.y, width, rect.height);
                    x = x.saturating_add(width);
                    r
                })
                .collect()
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
