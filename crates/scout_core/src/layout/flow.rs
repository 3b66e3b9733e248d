//! Greedy line-wrapping flow layout for tag chips.
//!
//! # Invariants
//! - Items are placed in input order, left-to-right then top-to-bottom.
//! - An item never wraps when its row is still empty, so oversized items
//!   are placed alone at the row start instead of being dropped.
//! - One forward pass, no backtracking.

/// Chip spacing used by the tag editor and detail screens.
pub const DEFAULT_FLOW_SPACING: f64 = 8.0;

/// Measured size of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left origin of a placed item, relative to the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Result of packing a sequence of items into a container.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowPacking {
    /// Container width the items were measured against.
    pub width: f64,
    /// Height needed to show every row.
    pub height: f64,
    /// One origin per input item, in input order.
    pub placements: Vec<Point>,
}

/// Flow layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    /// Gap applied between items in a row and between rows.
    pub spacing: f64,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_FLOW_SPACING,
        }
    }
}

impl FlowLayout {
    pub fn new(spacing: f64) -> Self {
        Self { spacing }
    }

    /// Packs `items` into rows no wider than `container_width`.
    pub fn pack(&self, items: &[Size], container_width: f64) -> FlowPacking {
        let mut placements = Vec::with_capacity(items.len());
        let mut x = 0.0_f64;
        let mut y = 0.0_f64;
        let mut row_height = 0.0_f64;
        let mut row_has_items = false;
        let mut height = 0.0_f64;

        for item in items {
            if row_has_items && x + item.width > container_width {
                y += row_height + self.spacing;
                x = 0.0;
                row_height = item.height;
            } else {
                row_height = row_height.max(item.height);
            }

            placements.push(Point { x, y });
            row_has_items = true;
            x += item.width + self.spacing;
            height = height.max(y + row_height);
        }

        FlowPacking {
            width: container_width,
            height,
            placements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FlowLayout, Point, Size};

    #[test]
    fn empty_input_has_zero_height() {
        let packing = FlowLayout::default().pack(&[], 100.0);
        assert_eq!(packing.height, 0.0);
        assert!(packing.placements.is_empty());
    }

    #[test]
    fn row_height_tracks_tallest_item() {
        let items = [Size::new(10.0, 12.0), Size::new(10.0, 30.0), Size::new(10.0, 5.0)];
        let packing = FlowLayout::new(0.0).pack(&items, 100.0);
        assert_eq!(packing.height, 30.0);
        assert_eq!(packing.placements[2], Point { x: 20.0, y: 0.0 });
    }
}
