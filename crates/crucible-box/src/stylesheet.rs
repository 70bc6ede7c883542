//! Named box styles loaded from TOML.
//!
//! ```toml
//! [sidebar]
//! width = 30
//! flex-direction = "column"
//! overflow-y = "hidden"
//!
//! [body]
//! width = "70%"
//! padding = { left = 1, right = 1 }
//! ```

use crate::style::Styles;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum StyleLoadError {
    #[error("failed to parse style sheet: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet {
    styles: BTreeMap<String, Styles>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, StyleLoadError> {
        let sheet: StyleSheet = toml::from_str(source)?;
        tracing::debug!(styles = sheet.styles.len(), "style sheet loaded");
        Ok(sheet)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Styles> {
        self.styles.get(name)
    }

    /// Adds or replaces a named style.
    pub fn insert(&mut self, name: impl Into<String>, style: Styles) -> Option<Styles> {
        self.styles.insert(name.into(), style)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Dimension, Edges, FlexDirection, Overflow};

    const SHEET: &str = r#"
[sidebar]
width = 30
flex-direction = "column"
overflow-y = "hidden"

[body]
width = "70%"
height = "auto"
padding = { left = 1, right = 1 }
"#;

    #[test]
    fn loads_named_styles() {
        let sheet = StyleSheet::from_toml_str(SHEET).unwrap();

        assert_eq!(sheet.len(), 2);
        let sidebar = sheet.get("sidebar").expect("sidebar style");
        assert_eq!(sidebar.width, Some(Dimension::Cells(30)));
        assert_eq!(sidebar.flex_direction, Some(FlexDirection::Column));
        assert_eq!(sidebar.overflow_y, Some(Overflow::Hidden));
        assert_eq!(sidebar.overflow, None);
    }

    #[test]
    fn parses_non_numeric_sizes_and_partial_edges() {
        let sheet = StyleSheet::from_toml_str(SHEET).unwrap();
        let body = sheet.get("body").unwrap();

        assert_eq!(body.width, Some(Dimension::Percent(70.0)));
        assert_eq!(body.height, Some(Dimension::Auto));
        assert_eq!(
            body.padding,
            Some(Edges {
                top: 0,
                right: 1,
                bottom: 0,
                left: 1
            })
        );
    }

    #[test]
    fn names_are_sorted() {
        let sheet = StyleSheet::from_toml_str(SHEET).unwrap();
        assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["body", "sidebar"]);
    }

    #[test]
    fn unknown_enum_value_is_an_error() {
        let err = StyleSheet::from_toml_str("[a]\noverflow = \"scroll\"\n").unwrap_err();
        assert!(err.to_string().contains("failed to parse style sheet"));
    }

    #[test]
    fn bad_dimension_is_an_error() {
        assert!(StyleSheet::from_toml_str("[a]\nwidth = \"wide\"\n").is_err());
    }

    #[test]
    fn serialized_sheet_loads_back() {
        let mut sheet = StyleSheet::new();
        sheet.insert("card", Styles::new().width(12).height(Dimension::Percent(50.0)));

        let source = toml::to_string(&sheet).unwrap();
        let loaded = StyleSheet::from_toml_str(&source).unwrap();

        assert_eq!(loaded, sheet);
    }

    #[test]
    fn empty_source_is_empty_sheet() {
        assert!(StyleSheet::from_toml_str("").unwrap().is_empty());
    }
}
