use std::path::PathBuf;

use clap::{Parser, Subcommand};
use codesh_config::Appearance;
use codesh_theme::{CoreColor, ThemeVariant};

#[derive(Parser, Debug)]
#[command(name = "codesh")]
#[command(about = "Derive, manage and render TextMate-style code highlighting themes")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Config file (defaults to the XDG config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Custom themes directory, overriding the config
    #[arg(long, global = true)]
    pub themes_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize a theme from core colors
    Generate {
        /// Base variant (dark or light)
        #[arg(long, short = 'v', default_value = "dark")]
        variant: ThemeVariant,

        /// Core color, as role=#hex (repeatable)
        #[arg(long = "color", short = 'c', value_parser = parse_core_color)]
        colors: Vec<(CoreColor, String)>,

        /// Save under this name instead of printing
        #[arg(long)]
        save: Option<String>,

        /// Display name when saving
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the core colors of a stored theme
    Extract { theme: String },
    /// List available themes
    List {
        /// Only custom themes
        #[arg(long)]
        custom: bool,
    },
    /// Import a VS Code theme JSON file
    Import {
        file: PathBuf,

        /// Store under this name
        #[arg(long)]
        name: Option<String>,
    },
    /// Export a theme without codesh metadata
    Export {
        theme: String,

        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Copy a theme under a new name
    Copy { source: String, name: String },
    /// Delete a custom theme
    Delete { theme: String },
    /// Highlight a sample program with a theme
    Preview {
        theme: String,

        #[arg(long, short = 'l', default_value = "php")]
        lang: String,
    },
    /// Render a source file as a code block
    Render {
        file: PathBuf,

        /// Language (detected from the extension when omitted)
        #[arg(long, short = 'l')]
        lang: Option<String>,

        /// Theme, overriding the configured appearance
        #[arg(long, short = 't')]
        theme: Option<String>,

        #[arg(long)]
        appearance: Option<Appearance>,

        #[arg(long, short = 'n')]
        line_numbers: bool,

        #[arg(long, default_value_t = 1)]
        start: i64,

        /// Lines to highlight, e.g. 1,3-5
        #[arg(long, default_value = "")]
        highlight: String,

        /// Lines to focus, e.g. 2-4
        #[arg(long, default_value = "")]
        focus: String,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        class: String,

        #[arg(long)]
        no_header: bool,

        /// Bypass the rendered block cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Render source files as one tabbed code group
    Group {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Groups sharing this key switch tabs together
        #[arg(long, default_value = "")]
        sync: String,

        #[arg(long)]
        appearance: Option<Appearance>,
    },
    /// Highlight the code blocks of a rendered HTML page
    Page {
        file: PathBuf,

        #[arg(long)]
        appearance: Option<Appearance>,
    },
    /// Color arithmetic on a single hex color
    Color {
        hex: String,

        /// Lighten (positive) or darken (negative) by percentage points
        #[arg(long, allow_hyphen_values = true)]
        brightness: Option<f64>,

        /// Mix with another color
        #[arg(long)]
        mix: Option<String>,

        /// Mix weight of the other color
        #[arg(long, default_value_t = 0.5)]
        weight: f64,

        /// Apply opacity in [0, 1]
        #[arg(long)]
        alpha: Option<f64>,
    },
    /// Manage TextMate grammars
    Grammars {
        #[command(subcommand)]
        action: GrammarAction,
    },
}

/// Grammar management subcommands.
#[derive(Subcommand, Debug)]
pub enum GrammarAction {
    /// List custom grammars
    List,
    /// Import a grammar JSON file
    Import { file: PathBuf },
    /// Delete a custom grammar
    Delete { name: String },
}

fn parse_core_color(value: &str) -> Result<(CoreColor, String), String> {
    let (key, hex) = value
        .split_once('=')
        .ok_or_else(|| format!("expected role=#hex, got '{}'", value))?;
    let role = CoreColor::from_key(key.trim()).ok_or_else(|| {
        let roles: Vec<_> = CoreColor::ALL.iter().map(|c| c.key()).collect();
        format!("unknown role '{}' (expected one of {})", key, roles.join(", "))
    })?;
    Ok((role, hex.trim().to_string()))
}
