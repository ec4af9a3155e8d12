use std::fmt;

/// Axis-aligned rectangle in the virtual desktop coordinate space.
///
/// The main display's top-left corner is the origin; displays left of or
/// above it have negative coordinates. Width and height are always derived
/// from the corner pair so the two views can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Rect {
    /// Build from corners. Returns `None` when `right < left`, `bottom < top`,
    /// or the width or height does not fit in an `i32`.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Option<Self> {
        if right < left || bottom < top {
            return None;
        }
        right.checked_sub(left)?;
        bottom.checked_sub(top)?;
        Some(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Build from an origin and a size. Returns `None` for negative sizes or
    /// when the far edge would overflow.
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width < 0 || height < 0 {
            return None;
        }
        Self::new(x, y, x.checked_add(width)?, y.checked_add(height)?)
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn x(&self) -> i32 {
        self.left
    }

    pub fn y(&self) -> i32 {
        self.top
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the two rectangles share any interior area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{}) {}x{}",
            self.left,
            self.top,
            self.width(),
            self.height()
        )
    }
}
