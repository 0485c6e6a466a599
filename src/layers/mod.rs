//! Layer records and the builders that produce them.
//!
//! Field names, their order and the numeric codes are what the design tool
//! reads; they are written out exactly as declared here.

pub mod shape;
pub mod text;

use serde::Serialize;

pub use shape::{Border, CurvePoint, Fill, Rectangle, ShapeGroup};
pub use text::{TextAlignment, TextLayer};

use crate::geometry::Frame;

/// `booleanOperation` for layers that do not combine with siblings
pub const BOOLEAN_OPERATION_NONE: i32 = -1;
/// `resizingConstraint` with every edge flexible
pub const RESIZING_CONSTRAINT_NONE: u32 = 63;
/// `windingRule` even-odd
pub const WINDING_RULE_EVEN_ODD: u32 = 1;

/// One visual unit placed on the artboard.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Layer {
    ShapeGroup(ShapeGroup),
    Text(TextLayer),
}

impl Layer {
    pub fn object_id(&self) -> &str {
        match self {
            Layer::ShapeGroup(s) => &s.object_id,
            Layer::Text(t) => &t.object_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Layer::ShapeGroup(s) => &s.name,
            Layer::Text(t) => &t.name,
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            Layer::ShapeGroup(s) => &s.frame,
            Layer::Text(t) => &t.frame,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "exportOptions", rename_all = "camelCase")]
pub struct LayerExportOptions {
    pub export_formats: Vec<String>,
    pub included_layer_ids: Vec<String>,
    pub layer_options: u32,
    pub should_trim: bool,
}

impl Default for LayerExportOptions {
    fn default() -> Self {
        Self {
            export_formats: Vec::new(),
            included_layer_ids: Vec::new(),
            layer_options: 0,
            should_trim: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "_class", rename = "rulerData")]
pub struct RulerData {
    pub base: i32,
    pub guides: Vec<i32>,
}

/// Style record. Path-like layers carry the marker/winding tail, text layers
/// only their text style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "style", rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<Border>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Fill>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miter_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_marker_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_marker_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winding_rule: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<text::TextStyle>,
}

impl Style {
    /// Default style of artboards and rectangle paths
    pub fn path() -> Self {
        Self {
            borders: None,
            fills: None,
            miter_limit: Some(10),
            start_marker_type: Some(0),
            end_marker_type: Some(0),
            winding_rule: Some(WINDING_RULE_EVEN_ODD),
            text_style: None,
        }
    }

    pub fn shape(borders: Vec<Border>, fills: Vec<Fill>) -> Self {
        Self {
            borders: Some(borders),
            fills: Some(fills),
            ..Self::path()
        }
    }

    pub fn text(text_style: text::TextStyle) -> Self {
        Self {
            borders: None,
            fills: None,
            miter_limit: None,
            start_marker_type: None,
            end_marker_type: None,
            winding_rule: None,
            text_style: Some(text_style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_style_has_fixed_tail() {
        let json = serde_json::to_value(Style::path()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "_class": "style",
                "miterLimit": 10,
                "startMarkerType": 0,
                "endMarkerType": 0,
                "windingRule": 1
            })
        );
    }

    #[test]
    fn empty_records_serialize_with_class() {
        let json = serde_json::to_value(LayerExportOptions::default()).unwrap();
        assert_eq!(json["_class"], "exportOptions");
        assert_eq!(json["exportFormats"], serde_json::json!([]));
        let json = serde_json::to_value(RulerData::default()).unwrap();
        assert_eq!(json, serde_json::json!({"_class": "rulerData", "base": 0, "guides": []}));
    }
}
