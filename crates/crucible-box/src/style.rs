//! Caller-facing layout properties for a box.
//!
//! Every field of [`Styles`] is optional. An unset field means "let the
//! resolver decide", which is how the box defaults and the overflow
//! shorthand get their chance to apply (see [`crate::resolve`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A length along one axis, measured in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    /// A definite number of cells. The only variant that can be animated.
    Cells(u16),
    /// A fraction of the parent's size, `0.0..=100.0`.
    Percent(f32),
    #[default]
    Auto,
}

impl Dimension {
    /// The definite cell count, or `None` for percentage and auto sizes.
    pub fn cells(self) -> Option<u16> {
        match self {
            Dimension::Cells(n) => Some(n),
            Dimension::Percent(_) | Dimension::Auto => None,
        }
    }

    pub fn is_cells(self) -> bool {
        matches!(self, Dimension::Cells(_))
    }
}

impl From<u16> for Dimension {
    fn from(cells: u16) -> Self {
        Dimension::Cells(cells)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Cells(n) => write!(f, "{n}"),
            Dimension::Percent(p) => write!(f, "{p}%"),
            Dimension::Auto => f.write_str("auto"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid dimension {0:?}: expected a cell count, a percentage like \"50%\", or \"auto\"")]
pub struct ParseDimensionError(String);

impl FromStr for Dimension {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Dimension::Auto);
        }
        if let Some(pct) = trimmed.strip_suffix('%') {
            return pct
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|p| p.is_finite())
                .map(Dimension::Percent)
                .ok_or_else(|| ParseDimensionError(s.to_string()));
        }
        trimmed
            .parse::<u16>()
            .map(Dimension::Cells)
            .map_err(|_| ParseDimensionError(s.to_string()))
    }
}

/// Wire form: a bare integer for cells, a string for everything else.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Cells(u16),
    Text(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = ParseDimensionError;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Cells(n) => Ok(Dimension::Cells(n)),
            DimensionRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(dim: Dimension) -> Self {
        match dim {
            Dimension::Cells(n) => DimensionRepr::Cells(n),
            other => DimensionRepr::Text(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    #[default]
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    #[default]
    Auto,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    Relative,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    #[default]
    Flex,
    None,
}

/// What happens to children that do not fit inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Border {
    Single,
    Double,
    Rounded,
    Heavy,
}

/// Per-side spacing in cells, used for padding and margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    pub fn xy(x: u16, y: u16) -> Self {
        Self {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }

    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

/// Layout properties a caller declares for a box.
///
/// Built either with the chained setters below or by deserializing a
/// kebab-case table (see [`crate::stylesheet::StyleSheet`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Styles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<FlexDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_wrap: Option<FlexWrap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_grow: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_shrink: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_basis: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<AlignSelf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<Border>,
    /// Shorthand for both axes. Each axis field below takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Overflow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_x: Option<Overflow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_y: Option<Overflow>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = Some(direction);
        self
    }

    pub fn wrap(mut self, wrap: FlexWrap) -> Self {
        self.flex_wrap = Some(wrap);
        self
    }

    pub fn grow(mut self, grow: f32) -> Self {
        self.flex_grow = Some(grow);
        self
    }

    pub fn shrink(mut self, shrink: f32) -> Self {
        self.flex_shrink = Some(shrink);
        self
    }

    pub fn basis(mut self, basis: impl Into<Dimension>) -> Self {
        self.flex_basis = Some(basis.into());
        self
    }

    pub fn align_items(mut self, align: AlignItems) -> Self {
        self.align_items = Some(align);
        self
    }

    pub fn align_self(mut self, align: AlignSelf) -> Self {
        self.align_self = Some(align);
        self
    }

    pub fn justify(mut self, justify: JustifyContent) -> Self {
        self.justify_content = Some(justify);
        self
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn min_width(mut self, width: impl Into<Dimension>) -> Self {
        self.min_width = Some(width.into());
        self
    }

    pub fn min_height(mut self, height: impl Into<Dimension>) -> Self {
        self.min_height = Some(height.into());
        self
    }

    pub fn max_width(mut self, width: impl Into<Dimension>) -> Self {
        self.max_width = Some(width.into());
        self
    }

    pub fn max_height(mut self, height: impl Into<Dimension>) -> Self {
        self.max_height = Some(height.into());
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Sets both the column and the row gap.
    pub fn gap(mut self, gap: u16) -> Self {
        self.column_gap = Some(gap);
        self.row_gap = Some(gap);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border_style = Some(border);
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn overflow_x(mut self, overflow: Overflow) -> Self {
        self.overflow_x = Some(overflow);
        self
    }

    pub fn overflow_y(mut self, overflow: Overflow) -> Self {
        self.overflow_y = Some(overflow);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("12", Dimension::Cells(12) ; "bare cells")]
    #[test_case(" 3 ", Dimension::Cells(3) ; "padded cells")]
    #[test_case("50%", Dimension::Percent(50.0) ; "percent")]
    #[test_case("auto", Dimension::Auto ; "auto")]
    #[test_case("AUTO", Dimension::Auto ; "auto any case")]
    fn dimension_parses(input: &str, expected: Dimension) {
        assert_eq!(input.parse::<Dimension>().unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("-4" ; "negative")]
    #[test_case("wide" ; "word")]
    #[test_case("abc%" ; "bad percent")]
    fn dimension_rejects(input: &str) {
        assert!(input.parse::<Dimension>().is_err());
    }

    #[test]
    fn only_cells_are_numeric() {
        assert_eq!(Dimension::Cells(7).cells(), Some(7));
        assert_eq!(Dimension::Percent(25.0).cells(), None);
        assert_eq!(Dimension::Auto.cells(), None);
    }

    #[test]
    fn setters_only_touch_their_field() {
        let style = Styles::new().width(10).overflow(Overflow::Hidden);

        assert_eq!(style.width, Some(Dimension::Cells(10)));
        assert_eq!(style.overflow, Some(Overflow::Hidden));
        assert_eq!(style.height, None);
        assert_eq!(style.overflow_x, None);
        assert_eq!(style.flex_direction, None);
    }

    #[test]
    fn gap_sets_both_axes() {
        let style = Styles::new().gap(2);
        assert_eq!(style.column_gap, Some(2));
        assert_eq!(style.row_gap, Some(2));
    }

    #[test]
    fn edges_helpers() {
        let e = Edges::xy(2, 1);
        assert_eq!(e.horizontal(), 4);
        assert_eq!(e.vertical(), 2);
        assert_eq!(Edges::all(3), Edges { top: 3, right: 3, bottom: 3, left: 3 });
    }

    #[test]
    fn dimension_display_round_trips_through_parse() {
        for dim in [Dimension::Cells(4), Dimension::Percent(12.5), Dimension::Auto] {
            assert_eq!(dim.to_string().parse::<Dimension>().unwrap(), dim);
        }
    }
}
