//! Style resolution: caller properties merged over the box defaults.
//!
//! Resolution is a pure, field-by-field merge. The only derived fields are
//! the per-axis overflow policies, which fall back from the explicit axis to
//! the `overflow` shorthand and finally to [`Overflow::Visible`].

use crate::style::{
    AlignItems, AlignSelf, Border, Dimension, Display, Edges, FlexDirection, FlexWrap,
    JustifyContent, Overflow, Position, Styles,
};
use crate::transition::TransitionState;

/// Layout defaults a box applies before caller properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDefaults {
    pub flex_wrap: FlexWrap,
    pub flex_direction: FlexDirection,
    pub flex_grow: f32,
    pub flex_shrink: f32,
}

impl Default for BoxDefaults {
    fn default() -> Self {
        Self {
            flex_wrap: FlexWrap::NoWrap,
            flex_direction: FlexDirection::Row,
            flex_grow: 0.0,
            flex_shrink: 1.0,
        }
    }
}

/// The style record handed to the host for one render.
///
/// Defaulted fields and both overflow axes are always concrete; everything
/// else is passed through from the caller as declared.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub position: Option<Position>,
    pub display: Option<Display>,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Option<Dimension>,
    pub align_items: Option<AlignItems>,
    pub align_self: Option<AlignSelf>,
    pub justify_content: Option<JustifyContent>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub max_height: Option<Dimension>,
    pub padding: Option<Edges>,
    pub margin: Option<Edges>,
    pub column_gap: Option<u16>,
    pub row_gap: Option<u16>,
    pub border_style: Option<Border>,
    pub overflow: Option<Overflow>,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        resolve(&Styles::default(), &BoxDefaults::default())
    }
}

/// Merges `style` over `defaults`. Caller-set fields always win.
pub fn resolve(style: &Styles, defaults: &BoxDefaults) -> ResolvedStyle {
    ResolvedStyle {
        position: style.position,
        display: style.display,
        flex_direction: style.flex_direction.unwrap_or(defaults.flex_direction),
        flex_wrap: style.flex_wrap.unwrap_or(defaults.flex_wrap),
        flex_grow: style.flex_grow.unwrap_or(defaults.flex_grow),
        flex_shrink: style.flex_shrink.unwrap_or(defaults.flex_shrink),
        flex_basis: style.flex_basis,
        align_items: style.align_items,
        align_self: style.align_self,
        justify_content: style.justify_content,
        width: style.width,
        height: style.height,
        min_width: style.min_width,
        min_height: style.min_height,
        max_width: style.max_width,
        max_height: style.max_height,
        padding: style.padding,
        margin: style.margin,
        column_gap: style.column_gap,
        row_gap: style.row_gap,
        border_style: style.border_style,
        overflow: style.overflow,
        overflow_x: axis_overflow(style.overflow_x, style.overflow),
        overflow_y: axis_overflow(style.overflow_y, style.overflow),
    }
}

/// Like [`resolve`], with width and height taken from an animated size.
///
/// A displayed value of `None` keeps a non-numeric declared size (percent or
/// auto) as declared. A numeric declared size with no displayed value yet is
/// left unset until the next tick picks it up.
pub fn resolve_displayed(
    style: &Styles,
    displayed: TransitionState,
    defaults: &BoxDefaults,
) -> ResolvedStyle {
    let mut resolved = resolve(style, defaults);
    resolved.width = displayed_dimension(displayed.displayed_width, style.width);
    resolved.height = displayed_dimension(displayed.displayed_height, style.height);
    resolved
}

/// Explicit axis, then shorthand, then visible.
pub fn axis_overflow(axis: Option<Overflow>, shorthand: Option<Overflow>) -> Overflow {
    axis.or(shorthand).unwrap_or(Overflow::Visible)
}

fn displayed_dimension(displayed: Option<u16>, declared: Option<Dimension>) -> Option<Dimension> {
    match displayed {
        Some(cells) => Some(Dimension::Cells(cells)),
        None => declared.filter(|d| !d.is_cells()),
    }
}
