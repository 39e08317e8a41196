//! picascii CLI - Convert images to ASCII art

use clap::Parser;
use picascii::canvas::CanvasRenderer;
use picascii::{ConversionSettings, Conversion, PicasciiError, PixelBuffer, Ramp};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "picascii", about = "Convert images to ASCII art")]
struct Args {
    /// Input image files
    #[arg(required_unless_present = "list_charsets")]
    inputs: Vec<PathBuf>,
    /// Fraction of source columns sampled (0.0-1.0]
    #[arg(short, long)]
    resolution: Option<f64>,
    /// Character ramp
    #[arg(short, long)]
    charset: Option<Ramp>,
    /// Invert brightness
    #[arg(short, long)]
    invert: bool,
    /// Color each glyph from the source pixel
    #[arg(long)]
    color: bool,
    /// JSON settings file; flags override its values
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Write <name>.txt files here instead of printing
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
    /// Also write the colored grid as <name>.json
    #[arg(long, requires = "out_dir")]
    json: bool,
    /// Also render <name>.png with the given monospace font
    #[arg(long, requires = "out_dir", value_name = "FONT")]
    png: Option<PathBuf>,
    /// Font size for --png, in pixels
    #[arg(long, default_value = "14")]
    font_size: f32,
    /// Print the available character ramps and exit
    #[arg(long)]
    list_charsets: bool,
}

impl Args {
    fn conversion_settings(&self) -> Result<ConversionSettings, PicasciiError> {
        let mut settings = match &self.settings {
            Some(path) => ConversionSettings::load(path)?,
            None => ConversionSettings::default(),
        };
        if let Some(resolution) = self.resolution {
            settings.resolution = resolution;
        }
        if let Some(charset) = self.charset {
            settings.char_set = charset;
        }
        settings.inverted |= self.invert;
        if self.color {
            settings.grayscale = false;
        }
        settings.validate()?;
        Ok(settings)
    }
}

/// Base name of the files written for `input`.
fn output_stem(input: &Path) -> String {
    input.file_stem().map_or_else(|| "output".into(), |s| s.to_string_lossy().into_owned())
}

/// Refuse batches where two inputs would write the same output files.
fn check_unique_stems(inputs: &[PathBuf]) -> Result<(), PicasciiError> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for input in inputs {
        if let Some(first) = seen.insert(output_stem(input), input) {
            return Err(PicasciiError::InvalidSettings(format!(
                "{} and {} would both write {}.*",
                first.display(),
                input.display(),
                output_stem(input)
            )));
        }
    }
    Ok(())
}

struct Exporter<'a> {
    out_dir: &'a Path,
    json: bool,
    canvas: Option<CanvasRenderer>,
}

impl Exporter<'_> {
    fn write(&self, input: &Path, conversion: &Conversion) -> Result<(), PicasciiError> {
        let stem = output_stem(input);
        let txt = self.out_dir.join(format!("{stem}.txt"));
        std::fs::write(&txt, &conversion.text)?;
        tracing::info!(path = %txt.display(), "wrote text");

        if self.json {
            let path = self.out_dir.join(format!("{stem}.json"));
            let file = std::io::BufWriter::new(std::fs::File::create(&path)?);
            serde_json::to_writer(file, &conversion.grid)?;
            tracing::info!(path = %path.display(), "wrote grid");
        }
        if let Some(canvas) = &self.canvas {
            let path = self.out_dir.join(format!("{stem}.png"));
            canvas.render(&conversion.grid)?.save(&path)?;
            tracing::info!(path = %path.display(), "wrote canvas");
        }
        Ok(())
    }
}

fn main() -> Result<(), PicasciiError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_charsets {
        for ramp in Ramp::ALL {
            let glyphs: String = ramp.glyphs().iter().collect();
            println!("{:<10} {:>3}  {}", ramp.name(), ramp.len(), glyphs);
        }
        return Ok(());
    }

    let settings = args.conversion_settings()?;

    let Some(out_dir) = args.out_dir.as_deref() else {
        if args.inputs.len() > 1 {
            return Err(PicasciiError::InvalidSettings(
                "converting several images requires --out-dir".into(),
            ));
        }
        let image = PixelBuffer::open(&args.inputs[0])?;
        let conversion = picascii::convert(&image, &settings)?;
        let stdout = std::io::stdout();
        let rendered = if !settings.grayscale && stdout.is_terminal() {
            conversion.grid.to_ansi()
        } else {
            conversion.text
        };
        stdout.lock().write_all(rendered.as_bytes())?;
        return Ok(());
    };

    check_unique_stems(&args.inputs)?;
    std::fs::create_dir_all(out_dir)?;
    let canvas = match &args.png {
        Some(font) => Some(CanvasRenderer::new(&std::fs::read(font)?, args.font_size)?),
        None => None,
    };
    let exporter = Exporter { out_dir, json: args.json, canvas };

    let failures: Vec<(PathBuf, PicasciiError)> = args
        .inputs
        .par_iter()
        .filter_map(|input| {
            let result = PixelBuffer::open(input)
                .and_then(|image| picascii::convert(&image, &settings))
                .and_then(|conversion| exporter.write(input, &conversion));
            result.err().map(|e| (input.clone(), e))
        })
        .collect();

    for (input, error) in &failures {
        tracing::error!(input = %input.display(), %error, "conversion failed");
    }
    match failures.into_iter().next() {
        Some((_, error)) => Err(error),
        None => Ok(()),
    }
}
