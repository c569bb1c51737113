//! Render command implementation

use std::fs;
use std::io::Write;
use std::path::Path;

use headmark_core::Markdown;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{debug, info};

use crate::cli::RenderArgs;
use crate::config::HeadmarkConfig;

pub fn run_render(config_path: Option<&Path>, args: &RenderArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.overrides.apply(&mut config);

    let source = fs::read_to_string(&args.file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", args.file.display()))?;

    let md = build_markdown(&config);
    let output = if args.dump_ast {
        md.parse(&source).into_diagnostic()?.dump()
    } else {
        md.convert_to_string(&source).into_diagnostic()?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, output)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes()).into_diagnostic()?;
            stdout.flush().into_diagnostic()?;
        }
    }
    Ok(())
}

/// Builds the pipeline described by `config`.
pub fn build_markdown(config: &HeadmarkConfig) -> Markdown {
    let mut builder = Markdown::builder()
        .parser_options((&config.parser).into())
        .html_options((&config.html).into());
    match config.anchor.extender() {
        Some(extender) => {
            debug!(
                position = %config.anchor.position,
                text = %config.anchor.text,
                "anchors enabled"
            );
            builder = builder.with_extension(&extender);
        }
        None => debug!("anchors disabled"),
    }
    builder.build()
}

fn load_config(path: Option<&Path>) -> Result<HeadmarkConfig> {
    if let Some(path) = path {
        return HeadmarkConfig::from_file(path).into_diagnostic();
    }
    if let Some(path) = HeadmarkConfig::discover(".") {
        info!("Using config: {}", path.display());
        return HeadmarkConfig::from_file(&path).into_diagnostic();
    }

    debug!("No config file found, using defaults");
    Ok(HeadmarkConfig::default())
}
