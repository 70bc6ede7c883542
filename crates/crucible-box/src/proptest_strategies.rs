//! Proptest strategies for box property tests
//!
//! Provides reusable generators for styles, sizes and transition targets.

use crate::style::*;
use crate::transition::TargetSize;
use proptest::prelude::*;

/// Cell counts: zero (edge case), small, and occasionally large
pub fn arb_cells() -> impl Strategy<Value = u16> {
    prop_oneof![
        1 => Just(0u16),
        6 => 1u16..=120,
        1 => 121u16..=1000,
    ]
}

pub fn arb_dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        5 => arb_cells().prop_map(Dimension::Cells),
        1 => (0u16..=100).prop_map(|p| Dimension::Percent(p as f32)),
        1 => Just(Dimension::Auto),
    ]
}

pub fn arb_overflow() -> impl Strategy<Value = Option<Overflow>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(Overflow::Visible)),
        1 => Just(Some(Overflow::Hidden)),
    ]
}

pub fn arb_direction() -> impl Strategy<Value = Option<FlexDirection>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(FlexDirection::Row)),
        1 => Just(Some(FlexDirection::Column)),
        1 => Just(Some(FlexDirection::RowReverse)),
        1 => Just(Some(FlexDirection::ColumnReverse)),
    ]
}

/// Small padding values to keep layouts inside a normal terminal
pub fn arb_edges() -> impl Strategy<Value = Edges> {
    (0u16..4, 0u16..4, 0u16..4, 0u16..4).prop_map(|(t, r, b, l)| Edges {
        top: t,
        right: r,
        bottom: b,
        left: l,
    })
}

/// Styles with the fields the resolver and the transition care about
pub fn arb_styles() -> impl Strategy<Value = Styles> {
    (
        prop::option::of(arb_dimension()),
        prop::option::of(arb_dimension()),
        arb_overflow(),
        arb_overflow(),
        arb_overflow(),
        arb_direction(),
        prop::option::of(0u8..4),
        prop::option::of(arb_edges()),
    )
        .prop_map(
            |(width, height, overflow, overflow_x, overflow_y, direction, grow, padding)| Styles {
                width,
                height,
                overflow,
                overflow_x,
                overflow_y,
                flex_direction: direction,
                flex_grow: grow.map(f32::from),
                padding,
                ..Styles::default()
            },
        )
}

/// Animation target on one axis, `None` standing for auto
pub fn arb_target_axis() -> impl Strategy<Value = Option<u16>> {
    prop_oneof![
        1 => Just(None),
        5 => (0u16..200).prop_map(Some),
    ]
}

pub fn arb_target() -> impl Strategy<Value = TargetSize> {
    (arb_target_axis(), arb_target_axis()).prop_map(|(w, h)| TargetSize::new(w, h))
}
