//! Convert a render snapshot file into a .sketch package
//!
//! cargo run --example convert_snapshot -- tests/fixtures/landing_page.json out.sketch

use sketchport::{convert_document, ExportOptions, Layer, RenderTree};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .unwrap_or_else(|| "tests/fixtures/landing_page.json".to_string());
    let output = args.next().unwrap_or_else(|| "export.sketch".to_string());

    let tree = RenderTree::from_json(&std::fs::read_to_string(&input)?)?;
    let options = ExportOptions {
        filename: output.clone(),
        ..Default::default()
    };

    let package = sketchport::build_package(tree.body(), &options);
    println!("Layers in {}:", input);
    for layer in package.layers() {
        let kind = match layer {
            Layer::ShapeGroup(_) => "shape",
            Layer::Text(_) => "text ",
        };
        let f = layer.frame();
        println!("  {} {:<32} {:>8.2} {:>8.2} {:>8.2} {:>8.2}", kind, layer.name(), f.x, f.y, f.width, f.height);
    }

    let export = convert_document(tree.body(), &options)?;
    export.write_to(&export.filename)?;
    println!("\nWrote {} ({} bytes)", export.filename, export.bytes.len());
    Ok(())
}
