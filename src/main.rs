use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use sldstyle::model::Style;
use sldstyle::{ParserConfig, SldStyleParser, SldVersion, SymbolizerUnits};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert OGC SLD styles to JSON and back", long_about = None)]
struct Cli {
    /// JSON file with parser configuration
    #[arg(long, global = true, value_name = "CONFIG_JSON")]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read SLD files (or directories of them) and print the styles as JSON
    Read {
        #[arg(value_name = "SLD_FILE", required = true)]
        paths: Vec<Utf8PathBuf>,
    },
    /// Write a JSON style as SLD
    Write {
        #[arg(value_name = "STYLE_JSON")]
        style: Utf8PathBuf,
        #[arg(long)]
        sld_version: Option<SldVersion>,
        /// metre, foot or pixel
        #[arg(long)]
        units: Option<SymbolizerUnits>,
        /// Spaces per level, 0 for a single line
        #[arg(long)]
        indent: Option<usize>,
    },
}

fn load_config(path: Option<&Utf8Path>) -> Result<ParserConfig> {
    let Some(path) = path else {
        return Ok(ParserConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path))
}

/// Expand directories into the `.sld` and `.xml` files below them.
fn collect_inputs(paths: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path) {
            let entry = entry.with_context(|| format!("Walk {}", path))?;
            let Some(file) = Utf8Path::from_path(entry.path()) else {
                log::warn!("skipping non UTF-8 path {}", entry.path().display());
                continue;
            };
            if entry.file_type().is_file() && matches!(file.extension(), Some("sld" | "xml")) {
                files.push(file.to_path_buf());
            }
        }
    }
    files.sort();
    Ok(files)
}

fn read(parser: &SldStyleParser, paths: &[Utf8PathBuf]) -> Result<()> {
    let files = collect_inputs(paths)?;
    let results: Vec<_> = files
        .par_iter()
        .map(|file| (file, parser.read_style_file(file)))
        .collect();

    let mut failed = 0;
    let mut styles = serde_json::Map::new();
    for (file, result) in results {
        match result {
            Ok(style) => {
                styles.insert(file.to_string(), serde_json::to_value(&style)?);
            }
            Err(e) => {
                log::error!("{}: {}", file, parser.describe_error(&e));
                failed += 1;
            }
        }
    }
    println!("{}", serde_json::to_string_pretty(&styles)?);
    if failed > 0 {
        bail!("{} of {} files failed to parse", failed, files.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Read { paths } => read(&SldStyleParser::new(config), &paths),
        Command::Write {
            style: style_path,
            sld_version,
            units,
            indent,
        } => {
            if let Some(v) = sld_version {
                config.sld_version = v;
            }
            if let Some(u) = units {
                config.symbolizer_units = u;
            }
            if let Some(n) = indent {
                config.writer.indent = (n > 0).then_some(n);
            }
            let text = std::fs::read_to_string(&style_path)
                .with_context(|| format!("Open {}", style_path))?;
            let style: Style = serde_json::from_str(&text)
                .with_context(|| format!("Invalid style {}", style_path))?;
            let parser = SldStyleParser::new(config);
            let written = parser
                .write_style(&style)
                .map_err(|e| anyhow::anyhow!(parser.describe_error(&e)))?;
            println!("{}", written.output);
            Ok(())
        }
    }
}
