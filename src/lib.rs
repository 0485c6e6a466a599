//! Sketchport
//!
//! Converts a rendered HTML document into a Sketch document package. The
//! layer tree mirrors what the page looks like (boxes, fills, borders, text
//! runs), not its markup: geometry and style are read from the host's
//! render tree through the [`RenderNode`] trait.
//!
//! # Pipeline
//!
//! - [`walker`] visits the content root's descendants in document order
//! - [`layers`] turns elements into shape groups and text nodes into text layers
//! - [`document`] wraps the layers into artboard, page and document records
//! - [`package`] writes the records into a zip container
//!
//! # Example
//!
//! ```no_run
//! use sketchport::{convert_document, ExportOptions, RenderTree};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = std::fs::read_to_string("page.render.json")?;
//! let tree = RenderTree::from_json(&json)?;
//! let options = ExportOptions {
//!     viewport_width: Some(1280.0),
//!     ..Default::default()
//! };
//! let export = convert_document(tree.body(), &options)?;
//! export.write_to(&export.filename)?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::Deserialize;

pub mod color;
pub mod document;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod id;
pub mod layers;
mod number;
pub mod package;
pub mod walker;

pub use color::{parse_color, Color};
pub use document::SketchPackage;
pub use dom::{NodeKind, NodeRef, RenderNode, RenderTree, SnapshotNode};
pub use error::{Error, Result};
pub use geometry::{Frame, Rect};
pub use id::IdGenerator;
pub use layers::Layer;
pub use package::{PackageWriter, ZipPackageWriter};

/// Default name of the produced archive
pub const DEFAULT_FILENAME: &str = "export.sketch";

/// Options for one conversion.
///
/// Deserializes from the camelCase form hosts pass around
/// (`{"viewportWidth": 1280, "filename": "page.sketch"}`).
///
/// # Examples
///
/// ```
/// let opts = sketchport::ExportOptions::default();
/// assert_eq!(opts.filename, "export.sketch");
/// assert!(opts.viewport_width.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Artboard width; the content root's measured width when absent
    pub viewport_width: Option<f64>,
    /// Artboard height; the content root's measured height when absent
    pub viewport_height: Option<f64>,
    /// File name reported with the archive
    pub filename: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            viewport_width: None,
            viewport_height: None,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl ExportOptions {
    /// Reject values a host most likely passed by mistake.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("viewport width", self.viewport_width),
            ("viewport height", self.viewport_height),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::Config(format!("{} must be a non-negative number, got {}", name, v)));
                }
            }
        }
        if self.filename.trim().is_empty() {
            return Err(Error::Config("filename must not be empty".into()));
        }
        Ok(())
    }

    /// Artboard size: overrides win, otherwise the root box rounded to whole pixels.
    /// Zero or non-finite overrides count as absent.
    pub fn artboard_size(&self, root: &Rect) -> (f64, f64) {
        let pick = |over: Option<f64>, measured: f64| {
            over.filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or_else(|| measured.round())
        };
        (
            pick(self.viewport_width, root.width),
            pick(self.viewport_height, root.height),
        )
    }
}

/// A finished archive.
#[derive(Debug, Clone)]
pub struct SketchExport {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl SketchExport {
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Build every record of the package in memory without serializing it.
///
/// `root` is the content root (usually `<body>`): it sets the artboard
/// origin and is never emitted as a layer itself.
pub fn build_package<N: RenderNode>(root: N, options: &ExportOptions) -> SketchPackage {
    let origin = root.bounding_rect().unwrap_or_else(|| {
        log::warn!("content root has no measured box; using an empty origin");
        Rect::default()
    });
    let (width, height) = options.artboard_size(&origin);

    let mut ids = IdGenerator::new();
    let layers = walker::collect_layers(&root, &origin, &mut ids);
    log::info!(
        "collected {} layers for a {}x{} artboard",
        layers.len(),
        width,
        height
    );
    document::assemble(layers, width, height, &mut ids)
}

fn package_with<W: PackageWriter + ?Sized>(
    package: &SketchPackage,
    writer: &W,
    filename: &str,
) -> Result<SketchExport> {
    let members = package.members()?;
    let bytes = writer.write(&members)?;
    log::info!("packaged {} ({} bytes)", filename, bytes.len());
    Ok(SketchExport {
        bytes,
        filename: filename.to_string(),
    })
}

/// Convert and package with the zip writer.
pub fn convert_document<N: RenderNode>(root: N, options: &ExportOptions) -> Result<SketchExport> {
    convert_document_with(root, options, &ZipPackageWriter::default())
}

/// Convert and package with a caller-supplied writer.
pub fn convert_document_with<N: RenderNode, W: PackageWriter + ?Sized>(
    root: N,
    options: &ExportOptions,
    writer: &W,
) -> Result<SketchExport> {
    let package = build_package(root, options);
    package_with(&package, writer, &options.filename)
}

/// Async form of [`convert_document`].
///
/// The record graph is built synchronously on the calling task; only
/// serialization and compression run on tokio's blocking pool.
pub async fn convert_document_async<N: RenderNode>(
    root: N,
    options: &ExportOptions,
) -> Result<SketchExport> {
    let package = build_package(root, options);
    let filename = options.filename.clone();

    tokio::task::spawn_blocking(move || {
        package_with(&package, &ZipPackageWriter::default(), &filename)
    })
    .await
    .map_err(|e| Error::Packaging(format!("packaging task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ExportOptions::default();
        assert_eq!(opts.filename, DEFAULT_FILENAME);
        assert!(opts.viewport_width.is_none());
        assert!(opts.viewport_height.is_none());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn options_deserialize_from_camel_case() {
        let opts: ExportOptions =
            serde_json::from_str(r#"{"viewportWidth": 1024, "filename": "page.sketch"}"#).unwrap();
        assert_eq!(opts.viewport_width, Some(1024.0));
        assert_eq!(opts.viewport_height, None);
        assert_eq!(opts.filename, "page.sketch");
    }

    #[test]
    fn artboard_size_prefers_overrides() {
        let root = Rect::new(0.0, 0.0, 799.6, 300.4);
        assert_eq!(ExportOptions::default().artboard_size(&root), (800.0, 300.0));
        let opts = ExportOptions {
            viewport_width: Some(1280.0),
            viewport_height: Some(0.0),
            ..Default::default()
        };
        assert_eq!(opts.artboard_size(&root), (1280.0, 300.0));
    }

    #[test]
    fn validation_rejects_bad_overrides() {
        let opts = ExportOptions {
            viewport_width: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(Error::Config(_))));
        let opts = ExportOptions {
            filename: " ".into(),
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    struct FailingWriter;

    impl PackageWriter for FailingWriter {
        fn write(&self, _members: &[(String, String)]) -> Result<Vec<u8>> {
            Err(Error::Packaging("disk full".into()))
        }
    }

    #[test]
    fn packaging_failure_surfaces() {
        let tree = RenderTree::from_snapshot(SnapshotNode::element(
            "body",
            Rect::new(0.0, 0.0, 10.0, 10.0),
        ));
        let err = convert_document_with(tree.root(), &ExportOptions::default(), &FailingWriter)
            .unwrap_err();
        assert!(matches!(err, Error::Packaging(_)));
    }
}
