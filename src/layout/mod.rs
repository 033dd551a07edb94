//! Layout - Taffy flex row for the segment boxes
//!
//! The field is a single flex row: N fixed-size leaves separated by a gap.
//! Taffy computes positions relative to the row; results are shifted by the
//! field origin and rounded to terminal cells.

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId, Size, Style,
    TaffyTree,
};

use crate::error::{OtpError, Result};
use crate::primitives::SegmentStyle;
use crate::types::Rect;

/// Computed placement of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentLayout {
    /// One rect per segment, left to right.
    pub boxes: Vec<Rect>,
    /// Bounds of the whole row.
    pub bounds: Rect,
}

impl SegmentLayout {
    /// Segment index under a point.
    pub fn segment_at(&self, x: u16, y: u16) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        self.boxes.iter().position(|rect| rect.contains(x, y))
    }
}

fn layout_err(err: taffy::TaffyError) -> OtpError {
    OtpError::Layout(err.to_string())
}

/// Lay out `digits` boxes in a row starting at (`x`, `y`).
pub fn compute_segment_layout(
    digits: usize,
    style: &SegmentStyle,
    x: u16,
    y: u16,
) -> Result<SegmentLayout> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let leaf = Style {
        size: Size {
            width: Dimension::Length(style.width as f32),
            height: Dimension::Length(style.height as f32),
        },
        flex_shrink: 0.0,
        ..Default::default()
    };

    let children = (0..digits)
        .map(|_| tree.new_leaf(leaf.clone()))
        .collect::<std::result::Result<Vec<NodeId>, _>>()
        .map_err(layout_err)?;

    let row = Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        gap: Size {
            width: LengthPercentage::Length(style.gap as f32),
            height: LengthPercentage::Length(0.0),
        },
        ..Default::default()
    };
    let root = tree.new_with_children(row, &children).map_err(layout_err)?;

    let available = Size {
        width: AvailableSpace::MaxContent,
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(root, available).map_err(layout_err)?;

    let mut boxes = Vec::with_capacity(digits);
    for child in children {
        let layout = tree.layout(child).map_err(layout_err)?;
        boxes.push(Rect::new(
            x.saturating_add(layout.location.x.round() as u16),
            y.saturating_add(layout.location.y.round() as u16),
            layout.size.width.round() as u16,
            layout.size.height.round() as u16,
        ));
    }

    let root_layout = tree.layout(root).map_err(layout_err)?;
    let bounds = Rect::new(
        x,
        y,
        root_layout.size.width.round() as u16,
        root_layout.size.height.round() as u16,
    );

    Ok(SegmentLayout { boxes, bounds })
}
