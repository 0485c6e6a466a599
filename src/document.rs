//! Page, artboard and the top-level document records.
//!
//! Pure composition: the layer list goes into one artboard, the artboard
//! into one page, and the document/meta/user records around them are fixed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::geometry::{to_frame, Frame};
use crate::id::IdGenerator;
use crate::layers::{
    Layer, LayerExportOptions, RulerData, Style, BOOLEAN_OPERATION_NONE, RESIZING_CONSTRAINT_NONE,
};
use crate::Result;

pub const ARTBOARD_NAME: &str = "HTML Preview";
pub const PAGE_NAME: &str = "Generated Page";
pub const SKETCH_APP: &str = "com.bohemiancoding.sketch3";
pub const SKETCH_VERSION: u32 = 124;
pub const SKETCH_BUILD: &str = "99999";
pub const SKETCH_APP_VERSION: &str = "95";
pub const SKETCH_VARIANT: &str = "NONAPPSTORE";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "_class", rename = "artboard", rename_all = "camelCase")]
pub struct Artboard {
    #[serde(rename = "do_objectID")]
    pub object_id: String,
    pub name: String,
    pub boolean_operation: i32,
    pub frame: Frame,
    pub clipping_mask_mode: u32,
    pub export_options: LayerExportOptions,
    pub has_background_color: bool,
    pub include_background_color_in_export: bool,
    pub include_in_cloud_upload: bool,
    pub is_flow_home: bool,
    pub layer_list_expanded_type: u32,
    pub layers: Vec<Layer>,
    pub name_is_fixed: bool,
    pub resizing_constraint: u32,
    pub resizing_type: u32,
    pub rotation: i32,
    pub should_break_mask_chain: bool,
    pub style: Style,
    pub vertical_ruler_data: RulerData,
    pub horizontal_ruler_data: RulerData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "_class", rename = "page", rename_all = "camelCase")]
pub struct Page {
    #[serde(rename = "do_objectID")]
    pub object_id: String,
    pub boolean_operation: i32,
    pub clipping_mask_mode: u32,
    pub export_options: LayerExportOptions,
    pub has_click_through: bool,
    pub horizontal_ruler_data: RulerData,
    pub is_locked: bool,
    pub layer_list_expanded_type: u32,
    pub layers: Vec<Artboard>,
    pub name: String,
    pub resizing_constraint: u32,
    pub resizing_type: u32,
    pub rotation: i32,
    pub should_break_mask_chain: bool,
    pub vertical_ruler_data: RulerData,
}

impl Page {
    /// Archive member holding this page
    pub fn path(&self) -> String {
        format!("pages/{}.json", self.object_id)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "_class", rename = "assetCollection")]
pub struct AssetCollection {
    pub colors: Vec<String>,
    pub gradients: Vec<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "_class", rename = "sharedStyleContainer")]
pub struct SharedStyleContainer {
    pub objects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "_class", rename = "sharedTextStyleContainer")]
pub struct SharedTextStyleContainer {
    pub objects: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "_class", rename = "MSJSONFileReference")]
pub struct FileReference {
    #[serde(rename = "_ref_class")]
    pub ref_class: String,
    #[serde(rename = "_ref")]
    pub reference: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "_class", rename = "document", rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(rename = "do_objectID")]
    pub object_id: String,
    pub assets: AssetCollection,
    pub color_space: u32,
    pub current_page_index: u32,
    pub enable_layer_interaction: bool,
    pub enable_slice_interaction: bool,
    pub foreign_layer_styles: Vec<String>,
    pub foreign_swatches: Vec<String>,
    pub foreign_symbols: Vec<String>,
    pub foreign_text_styles: Vec<String>,
    pub layer_styles: SharedStyleContainer,
    pub layer_text_styles: SharedTextStyleContainer,
    pub pages: Vec<FileReference>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedBy {
    pub app: String,
    pub build: String,
    pub version: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub commit: String,
    pub app: String,
    pub build: String,
    pub version: u32,
    pub compatibility_version: u32,
    pub app_version: String,
    pub variant: String,
    pub autosaved: u32,
    pub created: CreatedBy,
    pub save_history: Vec<String>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            commit: "0".repeat(40),
            app: SKETCH_APP.to_string(),
            build: SKETCH_BUILD.to_string(),
            version: SKETCH_VERSION,
            compatibility_version: SKETCH_VERSION,
            app_version: SKETCH_APP_VERSION.to_string(),
            variant: SKETCH_VARIANT.to_string(),
            autosaved: 0,
            created: CreatedBy {
                app: SKETCH_APP.to_string(),
                build: SKETCH_BUILD.to_string(),
                version: SKETCH_VERSION,
            },
            save_history: vec![format!("{}:{}", SKETCH_VARIANT, SKETCH_APP_VERSION)],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocumentState {
    pub page_list_collapsed: u32,
    pub page_list_height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub document: UserDocumentState,
    pub pages: BTreeMap<String, serde_json::Value>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            document: UserDocumentState {
                page_list_collapsed: 0,
                page_list_height: 85,
            },
            pages: BTreeMap::new(),
        }
    }
}

/// Every record of one package, in memory.
#[derive(Debug, Clone)]
pub struct SketchPackage {
    pub document: DocumentRecord,
    pub meta: Meta,
    pub user: User,
    pub page: Page,
}

impl SketchPackage {
    pub fn page_id(&self) -> &str {
        &self.page.object_id
    }

    pub fn artboard(&self) -> &Artboard {
        &self.page.layers[0]
    }

    pub fn layers(&self) -> &[Layer] {
        &self.artboard().layers
    }

    /// Archive member path to pretty-printed JSON, in writing order.
    pub fn members(&self) -> Result<Vec<(String, String)>> {
        Ok(vec![
            (
                "document.json".to_string(),
                serde_json::to_string_pretty(&self.document)?,
            ),
            ("meta.json".to_string(), serde_json::to_string_pretty(&self.meta)?),
            ("user.json".to_string(), serde_json::to_string_pretty(&self.user)?),
            (self.page.path(), serde_json::to_string_pretty(&self.page)?),
        ])
    }
}

fn artboard(object_id: String, width: f64, height: f64, layers: Vec<Layer>) -> Artboard {
    Artboard {
        object_id,
        name: ARTBOARD_NAME.to_string(),
        boolean_operation: BOOLEAN_OPERATION_NONE,
        frame: to_frame(0.0, 0.0, width, height),
        clipping_mask_mode: 0,
        export_options: LayerExportOptions::default(),
        has_background_color: false,
        include_background_color_in_export: true,
        include_in_cloud_upload: true,
        is_flow_home: false,
        layer_list_expanded_type: 2,
        layers,
        name_is_fixed: true,
        resizing_constraint: RESIZING_CONSTRAINT_NONE,
        resizing_type: 0,
        rotation: 0,
        should_break_mask_chain: true,
        style: Style::path(),
        vertical_ruler_data: RulerData::default(),
        horizontal_ruler_data: RulerData::default(),
    }
}

/// Wrap `layers` into a single-page, single-artboard package of the given size.
pub fn assemble(layers: Vec<Layer>, width: f64, height: f64, ids: &mut IdGenerator) -> SketchPackage {
    let page_id = ids.next_id();
    let artboard = artboard(ids.next_id(), width, height, layers);

    let page = Page {
        object_id: page_id,
        boolean_operation: BOOLEAN_OPERATION_NONE,
        clipping_mask_mode: 0,
        export_options: LayerExportOptions::default(),
        has_click_through: false,
        horizontal_ruler_data: RulerData::default(),
        is_locked: false,
        layer_list_expanded_type: 0,
        layers: vec![artboard],
        name: PAGE_NAME.to_string(),
        resizing_constraint: RESIZING_CONSTRAINT_NONE,
        resizing_type: 0,
        rotation: 0,
        should_break_mask_chain: false,
        vertical_ruler_data: RulerData::default(),
    };

    let document = DocumentRecord {
        object_id: ids.next_id(),
        assets: AssetCollection::default(),
        color_space: 0,
        current_page_index: 0,
        enable_layer_interaction: true,
        enable_slice_interaction: true,
        foreign_layer_styles: Vec::new(),
        foreign_swatches: Vec::new(),
        foreign_symbols: Vec::new(),
        foreign_text_styles: Vec::new(),
        layer_styles: SharedStyleContainer::default(),
        layer_text_styles: SharedTextStyleContainer::default(),
        pages: vec![FileReference {
            ref_class: "MSImmutablePage".to_string(),
            reference: page.path(),
        }],
    };

    SketchPackage {
        document,
        meta: Meta::default(),
        user: User::default(),
        page,
    }
}
