use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sketchport::{ExportOptions, RenderTree};

/// Convert a render-tree snapshot of an HTML page into a .sketch package
#[derive(Parser, Debug)]
#[command(name = "sketchport", version, about)]
struct Cli {
    /// Render snapshot JSON ("-" reads stdin)
    #[arg(short, long)]
    input: String,

    /// Output path (defaults to the options' filename)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Artboard width override in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Artboard height override in pixels
    #[arg(long)]
    height: Option<f64>,

    /// JSON file with export options (viewportWidth, viewportHeight, filename)
    #[arg(long)]
    options: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_options(cli: &Cli) -> anyhow::Result<ExportOptions> {
    let mut options = match &cli.options {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing options in {}", path.display()))?
        }
        None => ExportOptions::default(),
    };
    if cli.width.is_some() {
        options.viewport_width = cli.width;
    }
    if cli.height.is_some() {
        options.viewport_height = cli.height;
    }
    options.validate()?;
    Ok(options)
}

fn load_tree(input: &str) -> anyhow::Result<RenderTree> {
    let tree = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        RenderTree::from_json(&buf)?
    } else {
        let file = File::open(input).with_context(|| format!("opening {}", input))?;
        RenderTree::from_reader(BufReader::new(file))
            .with_context(|| format!("loading snapshot {}", input))?
    };
    Ok(tree)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = load_options(&cli)?;
    let tree = load_tree(&cli.input)?;
    log::debug!("snapshot has {} nodes", tree.len());

    let export = sketchport::convert_document(tree.body(), &options)?;
    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&export.filename));
    export
        .write_to(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {} ({} bytes)", path.display(), export.bytes.len());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("sketchport failed: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_a_named_flag() {
        let cli = Cli::try_parse_from(["sketchport", "--input", "page.json", "--width", "1440"])
            .unwrap();
        assert_eq!(cli.input, "page.json");
        assert_eq!(cli.width, Some(1440.0));

        let cli = Cli::try_parse_from(["sketchport", "-i", "-", "-o", "out.sketch"]).unwrap();
        assert_eq!(cli.input, "-");
        assert_eq!(cli.output, Some(PathBuf::from("out.sketch")));
    }

    #[test]
    fn missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["sketchport", "page.json"]).is_err());
    }
}
