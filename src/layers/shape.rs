//! Shape groups: one per element box, holding a rectangle path.

use serde::Serialize;

use super::{LayerExportOptions, Style, BOOLEAN_OPERATION_NONE, RESIZING_CONSTRAINT_NONE};
use crate::color::{parse_color_or, Color};
use crate::dom::RenderNode;
use crate::geometry::{Frame, Rect};
use crate::id::IdGenerator;
use crate::number::{self, parse_leading_float};

/// Fill used when the element reports no background color
pub const FILL_FALLBACK: Color = Color::new(1.0, 1.0, 1.0, 0.0);
/// Border color used when the element reports none
pub const BORDER_FALLBACK: Color = Color::new(0.0, 0.0, 0.0, 0.0);
/// Border thickness when the computed width has no number in it
pub const DEFAULT_BORDER_THICKNESS: f64 = 1.0;

const NAME_ID_PREFIX: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "shapeGroup", rename_all = "camelCase")]
pub struct ShapeGroup {
    #[serde(rename = "do_objectID")]
    pub object_id: String,
    pub name: String,
    pub boolean_operation: i32,
    pub clipping_mask_mode: u32,
    pub export_options: LayerExportOptions,
    pub frame: Frame,
    pub has_clipping_mask: bool,
    pub is_fixed_to_viewport: bool,
    pub is_flipped_horizontal: bool,
    pub is_flipped_vertical: bool,
    pub is_locked: bool,
    pub is_visible: bool,
    pub layer_list_expanded_type: u32,
    pub name_is_fixed: bool,
    pub resizing_constraint: u32,
    pub resizing_type: u32,
    pub rotation: i32,
    pub should_break_mask_chain: bool,
    pub style: Style,
    pub layers: Vec<Rectangle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "rectangle", rename_all = "camelCase")]
pub struct Rectangle {
    #[serde(rename = "do_objectID")]
    pub object_id: String,
    pub boolean_operation: i32,
    pub edited: bool,
    pub is_closed: bool,
    pub point_radius_behaviour: u32,
    pub points: Vec<CurvePoint>,
    pub frame: Frame,
    pub style: Style,
}

/// Path vertex in unit space of the owning layer's frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "curvePoint", rename_all = "camelCase")]
pub struct CurvePoint {
    pub corner_radius: u32,
    pub curve_from: String,
    pub curve_mode: u32,
    pub curve_to: String,
    pub has_curve_from: bool,
    pub has_curve_to: bool,
    pub point: String,
}

impl CurvePoint {
    /// A straight corner at `(x, y)`.
    pub fn corner(x: u8, y: u8) -> Self {
        let p = format!("{{{}, {}}}", x, y);
        Self {
            corner_radius: 0,
            curve_from: p.clone(),
            curve_mode: 1,
            curve_to: p.clone(),
            has_curve_from: false,
            has_curve_to: false,
            point: p,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "fill", rename_all = "camelCase")]
pub struct Fill {
    pub is_enabled: bool,
    pub color: Color,
    pub fill_type: u32,
    pub noise_index: u32,
    pub noise_intensity: u32,
    pub pattern_fill_type: u32,
    pub pattern_tile_scale: u32,
}

impl Fill {
    /// Solid fill, enabled only when the color is not fully transparent.
    pub fn solid(color: Color) -> Self {
        Self {
            is_enabled: color.is_visible(),
            color,
            fill_type: 0,
            noise_index: 0,
            noise_intensity: 0,
            pattern_fill_type: 1,
            pattern_tile_scale: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_class", rename = "border", rename_all = "camelCase")]
pub struct Border {
    pub is_enabled: bool,
    pub color: Color,
    pub fill_type: u32,
    /// 1 = inside
    pub position: u32,
    #[serde(serialize_with = "number::serialize")]
    pub thickness: f64,
}

/// Four axis-aligned corners, clockwise from the top-left.
pub fn rectangle_points() -> Vec<CurvePoint> {
    vec![
        CurvePoint::corner(0, 0),
        CurvePoint::corner(1, 0),
        CurvePoint::corner(1, 1),
        CurvePoint::corner(0, 1),
    ]
}

fn first_style<N: RenderNode>(node: &N, properties: &[&str]) -> Option<String> {
    properties.iter().find_map(|p| node.computed_style(p))
}

/// Border entry for the element, if it has a visible one.
fn border_for<N: RenderNode>(node: &N) -> Option<Border> {
    let color = parse_color_or(
        first_style(node, &["border-color", "border-top-color"]).as_deref(),
        BORDER_FALLBACK,
    );
    if !color.is_visible() {
        return None;
    }

    let thickness = first_style(node, &["border-width", "border-top-width"])
        .as_deref()
        .and_then(parse_leading_float)
        .unwrap_or(DEFAULT_BORDER_THICKNESS);
    if thickness <= 0.0 {
        return None;
    }

    Some(Border {
        is_enabled: true,
        color,
        fill_type: 0,
        position: 1,
        thickness,
    })
}

fn display_name<N: RenderNode>(node: &N, object_id: &str) -> String {
    let tag = node.tag_name().unwrap_or_default();
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
    let suffix = non_empty(node.attribute("class"))
        .or_else(|| non_empty(node.attribute("id")))
        .unwrap_or_else(|| object_id.chars().take(NAME_ID_PREFIX).collect());
    format!("{}#{}", tag, suffix)
}

/// Build the shape group for an element, or `None` when it has no area.
pub fn build<N: RenderNode>(node: &N, origin: &Rect, ids: &mut IdGenerator) -> Option<ShapeGroup> {
    let rect = node.bounding_rect()?;
    if !rect.has_area() {
        log::debug!("skipping zero-area <{}>", node.tag_name().unwrap_or_default());
        return None;
    }

    let object_id = ids.next_id();
    let fill = Fill::solid(parse_color_or(
        node.computed_style("background-color").as_deref(),
        FILL_FALLBACK,
    ));
    let borders: Vec<Border> = border_for(node).into_iter().collect();

    let path = Rectangle {
        object_id: ids.next_id(),
        boolean_operation: BOOLEAN_OPERATION_NONE,
        edited: false,
        is_closed: true,
        point_radius_behaviour: 1,
        points: rectangle_points(),
        frame: Frame::local(rect.width, rect.height),
        style: Style::path(),
    };

    Some(ShapeGroup {
        name: display_name(node, &object_id),
        object_id,
        boolean_operation: BOOLEAN_OPERATION_NONE,
        clipping_mask_mode: 0,
        export_options: LayerExportOptions::default(),
        frame: Frame::relative_to(&rect, origin),
        has_clipping_mask: false,
        is_fixed_to_viewport: false,
        is_flipped_horizontal: false,
        is_flipped_vertical: false,
        is_locked: false,
        is_visible: true,
        layer_list_expanded_type: 0,
        name_is_fixed: false,
        resizing_constraint: RESIZING_CONSTRAINT_NONE,
        resizing_type: 0,
        rotation: 0,
        should_break_mask_chain: false,
        style: Style::shape(borders, vec![fill]),
        layers: vec![path],
    })
}
