mod cli;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use codesh_config::{Appearance, Config};
use codesh_grammar::GrammarManager;
use codesh_highlight::{
    detect_language, process_page_content, render_code_block, render_code_group, render_preview,
    CodeBlockOptions, Highlighter, RenderCache, ThemeRef, TreeSitterHighlighter,
};
use codesh_logger::LogLevel;
use codesh_theme::{PartialCoreColors, ThemeManager};

use cli::{Cli, Command, GrammarAction};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    init_logging(&config);

    let themes_dir = match &cli.themes_dir {
        Some(dir) => dir.clone(),
        None => config.themes_dir()?,
    };
    let themes = ThemeManager::open(&themes_dir)
        .with_context(|| format!("Failed to open themes in {}", themes_dir.display()))?;

    let highlighter = TreeSitterHighlighter::new();
    run(cli.command, &config, &themes, &highlighter)
}

fn init_logging(config: &Config) {
    let level = config.logging.min_level.parse().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info", config.logging.min_level);
        LogLevel::Info
    });
    let file = config.logging.file_path.as_ref().map(PathBuf::from);
    codesh_logger::init(file, config.logging.max_entries, level);
}

fn run(
    command: Command,
    config: &Config,
    themes: &ThemeManager,
    highlighter: &dyn Highlighter,
) -> Result<()> {
    match command {
        Command::Generate {
            variant,
            colors,
            save,
            title,
        } => {
            let core = colors
                .into_iter()
                .fold(PartialCoreColors::default(), |core, (role, hex)| core.with(role, hex));
            match save {
                Some(name) => {
                    themes.save_generated(&name, title.as_deref(), &core, variant)?;
                    println!("Saved theme '{}'", name);
                }
                None => println!("{}", themes.generate(&core, variant).to_json_pretty()?),
            }
        }
        Command::Extract { theme } => {
            let core = themes.extract_core_colors(&theme)?;
            println!("{}", serde_json::to_string_pretty(&core)?);
        }
        Command::List { custom } => {
            let list = if custom {
                themes.list_custom()?
            } else {
                themes.list_all()?
            };
            for summary in list {
                println!(
                    "{:<28} {:<6} {}{}",
                    summary.name,
                    summary.variant,
                    summary.display_name,
                    if summary.custom { "" } else { " (built-in)" }
                );
            }
        }
        Command::Import { file, name } => {
            let json = read_file(&file)?;
            let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            let saved = themes.import(&json, file_name, name.as_deref())?;
            println!("Imported theme '{}'", saved);
        }
        Command::Export { theme, output } => {
            let json = themes.export(&theme)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported '{}' to {}", theme, path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Copy { source, name } => {
            let saved = themes.copy(&source, &name)?;
            println!("Copied '{}' to '{}'", source, saved);
        }
        Command::Delete { theme } => {
            if !themes.delete(&theme)? {
                bail!("No custom theme named '{}'", theme);
            }
            println!("Deleted theme '{}'", theme);
        }
        Command::Preview { theme, lang } => {
            let doc = themes.get(&theme)?;
            println!("{}", render_preview(highlighter, &doc, &lang));
        }
        Command::Render {
            file,
            lang,
            theme,
            appearance,
            line_numbers,
            start,
            highlight,
            focus,
            title,
            class,
            no_header,
            no_cache,
        } => {
            let options = CodeBlockOptions {
                theme,
                line_numbers: line_numbers || config.render.show_line_numbers,
                start_line: start,
                highlight,
                focus,
                class,
                show_lang: config.render.show_lang,
                title,
                header: config.render.show_header && !no_header,
            };
            let cache = if no_cache { None } else { block_cache(config) };
            let site_theme = site_theme(config, appearance);
            let block = BlockRenderer {
                highlighter,
                themes,
                cache: cache.as_ref(),
                site_theme: &site_theme,
            };
            println!("{}", block.render_file(&file, lang, &options)?);
        }
        Command::Group {
            files,
            sync,
            appearance,
        } => {
            let options = CodeBlockOptions {
                line_numbers: config.render.show_line_numbers,
                show_lang: config.render.show_lang,
                ..CodeBlockOptions::default()
            };
            let cache = block_cache(config);
            let site_theme = site_theme(config, appearance);
            let block = BlockRenderer {
                highlighter,
                themes,
                cache: cache.as_ref(),
                site_theme: &site_theme,
            };
            let blocks = files
                .iter()
                .map(|file| block.render_file(file, None, &options))
                .collect::<Result<Vec<_>>>()?;
            println!("{}", render_code_group(&blocks, &sync));
        }
        Command::Page { file, appearance } => {
            let content = read_file(&file)?;
            if !config.render.process_markdown {
                codesh_logger::info("Markdown processing disabled, page left unchanged");
                print!("{}", content);
                return Ok(());
            }
            let site_theme = site_theme(config, appearance);
            print!(
                "{}",
                process_page_content(highlighter, themes, &content, &site_theme)
            );
        }
        Command::Color {
            hex,
            brightness,
            mix,
            weight,
            alpha,
        } => {
            let mut out = codesh_color::Color::from_hex(&hex)?;
            if let Some(pct) = brightness {
                out = out.adjust_brightness(pct);
            }
            if let Some(other) = mix {
                out = out.mix(codesh_color::Color::from_hex(&other)?, weight);
            }
            if let Some(opacity) = alpha {
                out = out.alpha(opacity);
            }
            println!("{}", out.to_hex());
        }
        Command::Grammars { action } => run_grammars(action, config)?,
    }
    Ok(())
}

fn run_grammars(action: GrammarAction, config: &Config) -> Result<()> {
    let dir = config.grammars_dir()?;
    let grammars = GrammarManager::open(&dir)
        .with_context(|| format!("Failed to open grammars in {}", dir.display()))?;

    match action {
        GrammarAction::List => {
            for grammar in grammars.list_all()? {
                println!(
                    "{:<24} {:<28} {}",
                    grammar.slug,
                    grammar.scope_name,
                    grammar.file_types.join(",")
                );
            }
        }
        GrammarAction::Import { file } => {
            let json = read_file(&file)?;
            let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            let slug = grammars.import(&json, file_name)?;
            println!("Imported grammar '{}'", slug);
        }
        GrammarAction::Delete { name } => {
            if !grammars.delete(&name)? {
                bail!("No custom grammar named '{}'", name);
            }
            println!("Deleted grammar '{}'", name);
        }
    }
    Ok(())
}

/// Themes for the site appearance; `system` renders both.
fn site_theme(config: &Config, appearance: Option<Appearance>) -> ThemeRef {
    let general = &config.general;
    match appearance.unwrap_or(general.appearance) {
        Appearance::System => ThemeRef::Dual {
            light: general.theme_light.clone(),
            dark: general.theme_dark.clone(),
        },
        Appearance::Light => ThemeRef::Named(general.theme_light.clone()),
        Appearance::Dark => ThemeRef::Named(general.theme_dark.clone()),
    }
}

/// Block cache from the config; `None` when disabled or unavailable.
fn block_cache(config: &Config) -> Option<RenderCache> {
    if config.render.cache_ttl == 0 {
        return None;
    }
    match config.cache_dir() {
        Ok(dir) => Some(RenderCache::new(dir, Duration::from_secs(config.render.cache_ttl))),
        Err(e) => {
            codesh_logger::warn(format!("Render cache disabled: {}", e));
            None
        }
    }
}

/// Renders source files as code blocks, through the cache when one is given.
struct BlockRenderer<'a> {
    highlighter: &'a dyn Highlighter,
    themes: &'a ThemeManager,
    cache: Option<&'a RenderCache>,
    site_theme: &'a ThemeRef,
}

impl BlockRenderer<'_> {
    /// `lang` defaults to the language detected from the extension, then `txt`.
    fn render_file(&self, file: &Path, lang: Option<String>, options: &CodeBlockOptions) -> Result<String> {
        let content = read_file(file)?;
        let lang = lang
            .or_else(|| detect_language(file).map(str::to_string))
            .unwrap_or_else(|| "txt".to_string());
        let render = || {
            render_code_block(self.highlighter, self.themes, &content, &lang, self.site_theme, options)
        };

        Ok(match self.cache {
            Some(cache) => {
                let key = RenderCache::key(&[
                    content.as_str(),
                    lang.as_str(),
                    format!("{:?}", options).as_str(),
                    format!("{:?}", self.site_theme).as_str(),
                ]);
                cache.get_or_render(&key, render)
            }
            None => render(),
        })
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
