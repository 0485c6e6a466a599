//! Text layers: one per non-blank text node, a single style run each.

use serde::{Serialize, Serializer};

use super::{LayerExportOptions, Style, BOOLEAN_OPERATION_NONE, RESIZING_CONSTRAINT_NONE};
use crate::color::{parse_color_or, Color};
use crate::dom::RenderNode;
use crate::geometry::{Frame, Rect};
use crate::id::IdGenerator;
use crate::number::{self, parse_leading_float};

/// Text color when the parent reports none (slate 900)
pub const TEXT_COLOR_FALLBACK: Color = Color::new(15.0 / 255.0, 23.0 / 255.0, 42.0 / 255.0, 1.0);
pub const FONT_FAMILY_FALLBACK: &str = "Helvetica";
pub const FONT_SIZE_FALLBACK: f64 = 14.0;

const NAME_MAX_CHARS: usize = 32;

/// Horizontal alignment codes of the paragraph style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Right,
    Center,
    Justified,
}

impl TextAlignment {
    /// Map a computed `text-align`; anything unrecognized is left.
    pub fn from_css(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("right") => TextAlignment::Right,
            Some("center") => TextAlignment::Center,
            Some("justify") => TextAlignment::Justified,
            _ => TextAlignment::Left,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            TextAlignment::Left => 0,
            TextAlignment::Right => 1,
            TextAlignment::Center => 2,
            TextAlignment::Justified => 3,
        }
    }
}

impl Serialize for TextAlignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontAttributes {
    pub name: String,
    #[serde(serialize_with = "number::serialize")]
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "fontDescriptor")]
pub struct FontDescriptor {
    pub attributes: FontAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "paragraphStyle")]
pub struct ParagraphStyle {
    pub alignment: TextAlignment,
}

/// Attribute bundle shared by the layer's text style and its style run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedAttributes {
    #[serde(rename = "MSAttributedStringColorAttribute")]
    pub color: Color,
    #[serde(rename = "MSAttributedStringFontAttribute")]
    pub font: FontDescriptor,
    #[serde(rename = "paragraphStyle")]
    pub paragraph_style: ParagraphStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "textStyle", rename_all = "camelCase")]
pub struct TextStyle {
    pub encoded_attributes: EncodedAttributes,
}

/// Style run over `[location, location + length)` in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "stringAttribute")]
pub struct StringAttribute {
    pub location: usize,
    pub length: usize,
    pub attributes: EncodedAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "attributedString")]
pub struct AttributedString {
    pub string: String,
    pub attributes: Vec<StringAttribute>,
}

impl AttributedString {
    /// `text` with one run covering all of it.
    pub fn single_run(text: &str, attributes: EncodedAttributes) -> Self {
        Self {
            string: text.to_string(),
            attributes: vec![StringAttribute {
                location: 0,
                length: text.encode_utf16().count(),
                attributes,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "text", rename_all = "camelCase")]
pub struct TextLayer {
    #[serde(rename = "do_objectID")]
    pub object_id: String,
    pub name: String,
    pub boolean_operation: i32,
    pub clipping_mask_mode: u32,
    pub export_options: LayerExportOptions,
    pub frame: Frame,
    pub is_locked: bool,
    pub is_visible: bool,
    pub layer_list_expanded_type: u32,
    pub line_spacing_behaviour: u32,
    pub name_is_fixed: bool,
    pub resizing_constraint: u32,
    pub resizing_type: u32,
    pub rotation: i32,
    pub should_break_mask_chain: bool,
    pub style: Style,
    pub attributed_string: AttributedString,
    pub text_behaviour: u32,
}

/// First family of a computed `font-family` list, unquoted.
pub fn primary_font_family(value: Option<&str>) -> String {
    let family = value
        .and_then(|v| v.split(',').next())
        .map(|f| f.replace(['"', '\''], ""))
        .map(|f| f.trim().to_string())
        .unwrap_or_default();
    if family.is_empty() {
        FONT_FAMILY_FALLBACK.to_string()
    } else {
        family
    }
}

/// Pixel size from a computed `font-size`; unparseable or zero gives the fallback.
pub fn font_size(value: Option<&str>) -> f64 {
    value
        .and_then(parse_leading_float)
        .filter(|size| *size != 0.0)
        .unwrap_or(FONT_SIZE_FALLBACK)
}

/// Build the text layer for a text node, or `None` when it is blank or has
/// no measurable extent. Style comes from the parent element.
pub fn build<N: RenderNode>(node: &N, origin: &Rect, ids: &mut IdGenerator) -> Option<TextLayer> {
    let rect = node.bounding_rect()?;
    if !rect.has_area() {
        log::debug!("skipping text run with zero-area range");
        return None;
    }

    let raw = node.text_content()?;
    let content = raw.trim();
    if content.is_empty() {
        return None;
    }

    let parent = node.parent();
    let style = |property: &str| parent.as_ref().and_then(|p| p.computed_style(property));

    let attributes = EncodedAttributes {
        color: parse_color_or(style("color").as_deref(), TEXT_COLOR_FALLBACK),
        font: FontDescriptor {
            attributes: FontAttributes {
                name: primary_font_family(style("font-family").as_deref()),
                size: font_size(style("font-size").as_deref()),
            },
        },
        paragraph_style: ParagraphStyle {
            alignment: TextAlignment::from_css(style("text-align").as_deref()),
        },
    };

    Some(TextLayer {
        object_id: ids.next_id(),
        name: content.chars().take(NAME_MAX_CHARS).collect(),
        boolean_operation: BOOLEAN_OPERATION_NONE,
        clipping_mask_mode: 0,
        export_options: LayerExportOptions::default(),
        frame: Frame::relative_to(&rect, origin),
        is_locked: false,
        is_visible: true,
        layer_list_expanded_type: 0,
        line_spacing_behaviour: 2,
        name_is_fixed: false,
        resizing_constraint: RESIZING_CONSTRAINT_NONE,
        resizing_type: 0,
        rotation: 0,
        should_break_mask_chain: false,
        style: Style::text(TextStyle {
            encoded_attributes: attributes.clone(),
        }),
        attributed_string: AttributedString::single_run(content, attributes),
        text_behaviour: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{RenderTree, SnapshotNode};

    fn build_in(parent: SnapshotNode, text: &str, rect: Rect) -> Option<TextLayer> {
        let tree = RenderTree::from_snapshot(parent.with_child(SnapshotNode::text(text, rect)));
        let node = tree.root().children()[0];
        let mut ids = IdGenerator::new();
        build(&node, &Rect::new(10.0, 20.0, 800.0, 600.0), &mut ids)
    }

    fn p() -> SnapshotNode {
        SnapshotNode::element("p", Rect::new(10.0, 20.0, 200.0, 40.0))
    }

    #[test]
    fn hello_at_sixteen_pixels() {
        let layer = build_in(
            p().with_style("font-size", "16px")
                .with_style("color", "rgba(0,0,0,1)"),
            "Hello",
            Rect::new(12.0, 24.0, 36.0, 18.0),
        )
        .unwrap();
        assert_eq!(layer.attributed_string.string, "Hello");
        assert_eq!(layer.attributed_string.attributes.len(), 1);
        let run = &layer.attributed_string.attributes[0];
        assert_eq!((run.location, run.length), (0, 5));
        assert_eq!(run.attributes.font.attributes.size, 16.0);
        assert_eq!(run.attributes.color, Color::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(layer.frame.x, 2.0);
        assert_eq!(layer.frame.y, 4.0);
    }

    #[test]
    fn layer_style_duplicates_run_attributes() {
        let layer = build_in(
            p().with_style("text-align", "center"),
            "Title",
            Rect::new(10.0, 20.0, 30.0, 10.0),
        )
        .unwrap();
        let layer_attrs = &layer.style.text_style.as_ref().unwrap().encoded_attributes;
        assert_eq!(*layer_attrs, layer.attributed_string.attributes[0].attributes);
        assert_eq!(layer_attrs.paragraph_style.alignment, TextAlignment::Center);
    }

    #[test]
    fn content_is_trimmed_and_name_truncated() {
        let text = "   The quick brown fox jumps over the lazy dog   ";
        let layer = build_in(p(), text, Rect::new(10.0, 20.0, 300.0, 10.0)).unwrap();
        assert_eq!(layer.attributed_string.string, text.trim());
        assert_eq!(layer.name, "The quick brown fox jumps over t");
        assert_eq!(layer.name.chars().count(), 32);
    }

    #[test]
    fn blank_or_flat_text_is_skipped() {
        assert!(build_in(p(), "  \n ", Rect::new(0.0, 0.0, 10.0, 10.0)).is_none());
        assert!(build_in(p(), "x", Rect::new(0.0, 0.0, 0.0, 10.0)).is_none());
        assert!(build_in(p(), "x", Rect::new(0.0, 0.0, 10.0, 0.0)).is_none());
    }

    #[test]
    fn fallbacks_apply_without_parent_style() {
        let layer = build_in(p(), "x", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let attrs = &layer.attributed_string.attributes[0].attributes;
        assert_eq!(attrs.color, TEXT_COLOR_FALLBACK);
        assert_eq!(attrs.font.attributes.name, FONT_FAMILY_FALLBACK);
        assert_eq!(attrs.font.attributes.size, FONT_SIZE_FALLBACK);
        assert_eq!(attrs.paragraph_style.alignment, TextAlignment::Left);
    }

    #[test]
    fn font_family_takes_first_unquoted_entry() {
        assert_eq!(primary_font_family(Some("\"Inter\", Arial, sans-serif")), "Inter");
        assert_eq!(primary_font_family(Some("'Fira Sans'")), "Fira Sans");
        assert_eq!(primary_font_family(Some(" \"\" , serif")), FONT_FAMILY_FALLBACK);
        assert_eq!(primary_font_family(None), FONT_FAMILY_FALLBACK);
    }

    #[test]
    fn font_size_parsing() {
        assert_eq!(font_size(Some("18.5px")), 18.5);
        assert_eq!(font_size(Some("normal")), FONT_SIZE_FALLBACK);
        assert_eq!(font_size(Some("0px")), FONT_SIZE_FALLBACK);
    }

    #[test]
    fn alignment_codes() {
        assert_eq!(TextAlignment::from_css(Some("left")).code(), 0);
        assert_eq!(TextAlignment::from_css(Some("right")).code(), 1);
        assert_eq!(TextAlignment::from_css(Some("center")).code(), 2);
        assert_eq!(TextAlignment::from_css(Some("justify")).code(), 3);
        assert_eq!(TextAlignment::from_css(Some("start")), TextAlignment::Left);
        assert_eq!(TextAlignment::from_css(None), TextAlignment::Left);
    }

    #[test]
    fn run_length_counts_utf16_units() {
        let layer = build_in(p(), "héllo 👋", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(layer.attributed_string.attributes[0].length, 8);
    }

    #[test]
    fn serializes_schema_literals() {
        let layer = build_in(p(), "Hi", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["_class"], "text");
        assert_eq!(json["lineSpacingBehaviour"], 2);
        assert_eq!(json["textBehaviour"], 0);
        let attrs = &json["attributedString"]["attributes"][0];
        assert_eq!(attrs["_class"], "stringAttribute");
        assert_eq!(
            attrs["attributes"]["MSAttributedStringFontAttribute"]["_class"],
            "fontDescriptor"
        );
        assert_eq!(attrs["attributes"]["paragraphStyle"]["alignment"], 0);
        assert_eq!(json["style"]["textStyle"]["_class"], "textStyle");
        assert!(json["style"].get("windingRule").is_none());
    }
}
