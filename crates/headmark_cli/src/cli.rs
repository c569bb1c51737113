//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use headmark_anchor::Position;

use crate::config::HeadmarkConfig;

/// headmark - Markdown to HTML with heading permalinks
#[derive(Parser)]
#[command(name = "headmark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a Markdown file to HTML
    Render(RenderArgs),

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct RenderArgs {
    /// Markdown file to render
    pub file: PathBuf,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the transformed document tree instead of HTML
    #[arg(long)]
    pub dump_ast: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Command-line settings taking precedence over the config file.
#[derive(Args, Default)]
pub struct Overrides {
    /// Anchor text (an empty string disables anchors)
    #[arg(long)]
    pub text: Option<String>,

    /// Anchor position inside the heading
    #[arg(long, value_enum)]
    pub position: Option<PositionArg>,

    /// Class attribute of the anchor
    #[arg(long)]
    pub class: Option<String>,

    /// Do not escape the anchor text
    #[arg(long)]
    pub unsafe_text: bool,

    /// Pass raw HTML through
    #[arg(long)]
    pub unsafe_html: bool,

    /// Do not add anchors
    #[arg(long)]
    pub no_anchors: bool,

    /// Do not derive heading ids from heading text
    #[arg(long)]
    pub no_auto_heading_id: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PositionArg {
    Before,
    After,
}

impl From<PositionArg> for Position {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Before => Position::Before,
            PositionArg::After => Position::After,
        }
    }
}

impl Overrides {
    pub fn apply(&self, config: &mut HeadmarkConfig) {
        if let Some(text) = &self.text {
            config.anchor.text.clone_from(text);
        }
        if let Some(position) = self.position {
            config.anchor.position = position.into();
        }
        if let Some(class) = &self.class {
            config
                .anchor
                .attributes
                .insert("class".to_string(), class.clone());
        }
        if self.unsafe_text {
            config.anchor.unsafe_text = true;
        }
        if self.unsafe_html {
            config.html.unsafe_html = true;
        }
        if self.no_anchors {
            config.anchor.enabled = false;
        }
        if self.no_auto_heading_id {
            config.parser.auto_heading_id = false;
        }
    }
}
