//! Async conversion: the layer graph is built inline, packaging runs on the blocking pool

use sketchport::{convert_document_async, ExportOptions, Rect, RenderTree, SnapshotNode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tree = RenderTree::from_snapshot(
        SnapshotNode::element("body", Rect::new(0.0, 0.0, 400.0, 200.0)).with_child(
            SnapshotNode::element("div", Rect::new(20.0, 20.0, 160.0, 48.0))
                .with_style("background-color", "rgb(37, 99, 235)")
                .with_style("color", "rgb(255, 255, 255)")
                .with_child(SnapshotNode::text("Hello", Rect::new(36.0, 32.0, 40.0, 20.0))),
        ),
    );

    let options = ExportOptions {
        viewport_width: Some(400.0),
        viewport_height: Some(200.0),
        filename: "hello.sketch".into(),
    };
    let export = convert_document_async(tree.root(), &options).await?;
    export.write_to(&export.filename)?;
    println!("Wrote {} ({} bytes)", export.filename, export.bytes.len());
    Ok(())
}
