//! Taffy bridge: lays out a host element tree in terminal cells.
//!
//! Each render builds a fresh taffy tree from the [`Node`] tree, computes it
//! against the terminal size and collects absolute rectangles. Forwarded
//! [`NodeRef`](crate::node::NodeRef) slots are filled as elements are built.

use crate::node::{HostElement, LayoutPass, Node, NodeHandle};
use crate::resolve::ResolvedStyle;
use crate::style::{
    AlignItems as BoxAlignItems, AlignSelf as BoxAlignSelf, Dimension as BoxDimension,
    Display as BoxDisplay, Edges, FlexDirection as BoxFlexDirection, FlexWrap as BoxFlexWrap,
    JustifyContent as BoxJustifyContent, Overflow as BoxOverflow, Position as BoxPosition,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use taffy::geometry::Point;
use taffy::prelude::*;
use taffy::style::Overflow as TaffyOverflow;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout engine failure: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Absolute layouts keyed by the handle assigned during the build.
///
/// The root of the computed tree always has handle index 0.
pub type LayoutMap = HashMap<NodeHandle, ComputedLayout>;

// Shared across engines so a ref moved between engines still sees a new pass.
static NEXT_PASS: AtomicU64 = AtomicU64::new(1);

pub struct LayoutEngine {
    tree: TaffyTree<()>,
    handles: HashMap<NodeId, NodeHandle>,
    next_handle: usize,
    pass: LayoutPass,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            handles: HashMap::new(),
            next_handle: 0,
            pass: LayoutPass::new(0),
        }
    }

    pub fn compute(
        &mut self,
        node: &Node,
        width: f32,
        height: f32,
    ) -> Result<LayoutMap, LayoutError> {
        self.tree = TaffyTree::new();
        self.handles.clear();
        self.next_handle = 0;
        self.pass = LayoutPass::new(NEXT_PASS.fetch_add(1, Ordering::Relaxed));

        let root_id = self.build_node(node, width)?;

        let available = Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        };
        self.tree.compute_layout(root_id, available)?;

        let mut layouts = HashMap::new();
        self.collect_layouts(root_id, 0.0, 0.0, &mut layouts)?;
        tracing::trace!(nodes = layouts.len(), width, height, "layout computed");
        Ok(layouts)
    }

    fn build_node(&mut self, node: &Node, available_width: f32) -> Result<NodeId, LayoutError> {
        let handle = NodeHandle::new(self.next_handle);
        self.next_handle += 1;

        let node_id = match node {
            Node::Empty => self.tree.new_leaf(Style {
                display: Display::None,
                ..Default::default()
            })?,

            Node::Text(text) => {
                let (cols, lines) = measure_text(&text.content, available_width as usize);
                self.tree.new_leaf(Style {
                    size: Size {
                        width: length(cols as f32),
                        height: length(lines as f32),
                    },
                    flex_shrink: 0.0,
                    ..Default::default()
                })?
            }

            Node::Element(element) => self.build_element(element, handle, available_width)?,

            Node::Fragment(children) => {
                let child_ids = children
                    .iter()
                    .map(|c| self.build_node(c, available_width))
                    .collect::<Result<Vec<_>, _>>()?;

                self.tree.new_with_children(
                    Style {
                        display: Display::Flex,
                        flex_direction: FlexDirection::Column,
                        ..Default::default()
                    },
                    &child_ids,
                )?
            }
        };

        self.handles.insert(node_id, handle);
        Ok(node_id)
    }

    fn build_element(
        &mut self,
        element: &HostElement,
        handle: NodeHandle,
        available_width: f32,
    ) -> Result<NodeId, LayoutError> {
        if let Some(slot) = &element.node_ref {
            if !slot.populate(self.pass, handle) {
                tracing::debug!(%handle, existing = ?slot.get(), "node ref already filled this pass, keeping first handle");
            }
        }

        let style = to_taffy_style(&element.style);
        let inner_width = (available_width
            - horizontal_inset(element.style.padding)
            - if element.style.border_style.is_some() { 2.0 } else { 0.0 })
        .max(0.0);

        let child_ids = element
            .children
            .iter()
            .map(|c| self.build_node(c, inner_width))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.tree.new_with_children(style, &child_ids)?)
    }

    fn collect_layouts(
        &self,
        node_id: NodeId,
        offset_x: f32,
        offset_y: f32,
        layouts: &mut LayoutMap,
    ) -> Result<(), LayoutError> {
        let layout = self.tree.layout(node_id)?;
        let x = offset_x + layout.location.x;
        let y = offset_y + layout.location.y;

        if let Some(&handle) = self.handles.get(&node_id) {
            layouts.insert(
                handle,
                ComputedLayout {
                    x,
                    y,
                    width: layout.size.width,
                    height: layout.size.height,
                },
            );
        }

        for child_id in self.tree.children(node_id)? {
            self.collect_layouts(child_id, x, y, layouts)?;
        }
        Ok(())
    }
}

/// Translates a resolved box style into taffy's style record.
pub fn to_taffy_style(style: &ResolvedStyle) -> Style {
    let border_width = if style.border_style.is_some() { 1.0 } else { 0.0 };
    let padding = style.padding.unwrap_or_default();
    let margin = style.margin.unwrap_or_default();

    Style {
        display: match style.display {
            Some(BoxDisplay::None) => Display::None,
            Some(BoxDisplay::Flex) | None => Display::Flex,
        },
        position: match style.position {
            Some(BoxPosition::Absolute) => Position::Absolute,
            Some(BoxPosition::Relative) | None => Position::Relative,
        },
        flex_direction: convert_direction(style.flex_direction),
        flex_wrap: convert_wrap(style.flex_wrap),
        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink,
        flex_basis: style.flex_basis.map(convert_dimension).unwrap_or(auto()),
        align_items: style.align_items.map(convert_align_items),
        align_self: style.align_self.and_then(convert_align_self),
        justify_content: style.justify_content.map(convert_justify_content),
        size: Size {
            width: style.width.map(convert_dimension).unwrap_or(auto()),
            height: style.height.map(convert_dimension).unwrap_or(auto()),
        },
        min_size: Size {
            width: style.min_width.map(convert_dimension).unwrap_or(auto()),
            height: style.min_height.map(convert_dimension).unwrap_or(auto()),
        },
        max_size: Size {
            width: style.max_width.map(convert_dimension).unwrap_or(auto()),
            height: style.max_height.map(convert_dimension).unwrap_or(auto()),
        },
        gap: Size {
            width: length(style.column_gap.unwrap_or(0) as f32),
            height: length(style.row_gap.unwrap_or(0) as f32),
        },
        padding: Rect {
            top: length(padding.top as f32),
            right: length(padding.right as f32),
            bottom: length(padding.bottom as f32),
            left: length(padding.left as f32),
        },
        margin: Rect {
            top: length(margin.top as f32),
            right: length(margin.right as f32),
            bottom: length(margin.bottom as f32),
            left: length(margin.left as f32),
        },
        border: Rect {
            top: length(border_width),
            right: length(border_width),
            bottom: length(border_width),
            left: length(border_width),
        },
        overflow: Point {
            x: convert_overflow(style.overflow_x),
            y: convert_overflow(style.overflow_y),
        },
        ..Default::default()
    }
}

fn horizontal_inset(padding: Option<Edges>) -> f32 {
    padding.map(|p| p.horizontal() as f32).unwrap_or(0.0)
}

fn convert_dimension(dim: BoxDimension) -> Dimension {
    match dim {
        BoxDimension::Cells(n) => length(n as f32),
        BoxDimension::Percent(p) => percent(p / 100.0),
        BoxDimension::Auto => auto(),
    }
}

fn convert_direction(direction: BoxFlexDirection) -> FlexDirection {
    match direction {
        BoxFlexDirection::Row => FlexDirection::Row,
        BoxFlexDirection::RowReverse => FlexDirection::RowReverse,
        BoxFlexDirection::Column => FlexDirection::Column,
        BoxFlexDirection::ColumnReverse => FlexDirection::ColumnReverse,
    }
}

fn convert_wrap(wrap: BoxFlexWrap) -> FlexWrap {
    match wrap {
        BoxFlexWrap::NoWrap => FlexWrap::NoWrap,
        BoxFlexWrap::Wrap => FlexWrap::Wrap,
        BoxFlexWrap::WrapReverse => FlexWrap::WrapReverse,
    }
}

fn convert_align_items(align: BoxAlignItems) -> AlignItems {
    match align {
        BoxAlignItems::FlexStart => AlignItems::FlexStart,
        BoxAlignItems::FlexEnd => AlignItems::FlexEnd,
        BoxAlignItems::Center => AlignItems::Center,
        BoxAlignItems::Baseline => AlignItems::Baseline,
        BoxAlignItems::Stretch => AlignItems::Stretch,
    }
}

fn convert_align_self(align: BoxAlignSelf) -> Option<AlignItems> {
    match align {
        BoxAlignSelf::Auto => None,
        BoxAlignSelf::FlexStart => Some(AlignItems::FlexStart),
        BoxAlignSelf::FlexEnd => Some(AlignItems::FlexEnd),
        BoxAlignSelf::Center => Some(AlignItems::Center),
        BoxAlignSelf::Baseline => Some(AlignItems::Baseline),
        BoxAlignSelf::Stretch => Some(AlignItems::Stretch),
    }
}

fn convert_justify_content(justify: BoxJustifyContent) -> JustifyContent {
    match justify {
        BoxJustifyContent::FlexStart => JustifyContent::FlexStart,
        BoxJustifyContent::FlexEnd => JustifyContent::FlexEnd,
        BoxJustifyContent::Center => JustifyContent::Center,
        BoxJustifyContent::SpaceBetween => JustifyContent::SpaceBetween,
        BoxJustifyContent::SpaceAround => JustifyContent::SpaceAround,
        BoxJustifyContent::SpaceEvenly => JustifyContent::SpaceEvenly,
    }
}

fn convert_overflow(overflow: BoxOverflow) -> TaffyOverflow {
    match overflow {
        BoxOverflow::Visible => TaffyOverflow::Visible,
        BoxOverflow::Hidden => TaffyOverflow::Hidden,
    }
}

/// Widest line in cells and line count after wrapping to `width`.
fn measure_text(content: &str, width: usize) -> (usize, usize) {
    if content.is_empty() {
        return (0, 0);
    }

    let mut widest = 0;
    let mut total = 0;
    for line in content.lines() {
        let cols = line.width();
        widest = widest.max(cols);
        total += if cols == 0 || width == 0 {
            1
        } else {
            cols.div_ceil(width)
        };
    }

    let widest = if width == 0 { widest } else { widest.min(width) };
    (widest, total.max(1))
}
