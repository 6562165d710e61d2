use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use dropit_core::{FigmaClient, ImageFormat, ImageOptions};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

/// Settings shared by every subcommand
pub struct Session {
    pub token: Option<String>,
    pub quiet: bool,
}

impl Session {
    pub fn client(&self) -> Result<FigmaClient> {
        let Some(token) = self.token.as_deref() else {
            bail!("No Figma token provided, pass --token or set FIGMA_TOKEN");
        };
        FigmaClient::authenticated(token).context("Failed to set up the Figma client")
    }

    fn spinner(&self, message: String) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(message);
        Some(spinner)
    }
}

pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_banner() {
    eprintln!(
        "{} {}",
        "dropit".bright_magenta().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
}

/// Split a comma separated list of node ids, dropping blanks
pub fn parse_node_ids(raw: &str) -> Result<Vec<String>, String> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(format!("No node ids found in '{}'", raw));
    }
    Ok(ids)
}

pub fn image_options(format: Option<&String>, scale: Option<&f64>) -> Result<ImageOptions> {
    let mut options = ImageOptions::default();
    if let Some(format) = format {
        let format: ImageFormat = format.parse().map_err(anyhow::Error::msg)?;
        options = options.with_format(format);
    }
    if let Some(scale) = scale {
        options = options.with_scale(*scale);
    }
    Ok(options)
}

pub fn render_json<T: Serialize>(value: &T, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

/// Expand a leading `~` in a user supplied path
pub fn expand_output_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// Print `value` as JSON, or write it to the path given by `--output`.
pub fn emit<T: Serialize>(args: &ArgMatches, session: &Session, value: &T) -> Result<()> {
    let compact = args.get_flag("compact");
    let json = render_json(value, compact).context("Failed to serialize output")?;

    match args.get_one::<PathBuf>("output") {
        Some(path) => {
            let path = write_output(path, &json)?;
            if !session.quiet {
                eprintln!("{} Wrote {}", "✓".green().bold(), path.display());
            }
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Write `contents` to `path`, creating parent directories. Returns the
/// expanded path.
pub fn write_output(path: &Path, contents: &str) -> Result<PathBuf> {
    let path = expand_output_path(path);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn file_id(args: &ArgMatches) -> Result<&str> {
    args.get_one::<String>("FILE_ID")
        .map(String::as_str)
        .context("FILE_ID is required")
}

pub async fn handle_app(args: &ArgMatches, session: &Session) -> Result<()> {
    let file_id = file_id(args)?;
    let client = session.client()?;

    let spinner = session.spinner(format!("Building app for {}...", file_id));
    let result = dropit_core::build_app(&client, file_id).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let app = result?;
    if !session.quiet {
        eprintln!(
            "{} {}: {} screens, {} styles, {} images",
            "✓".green().bold(),
            app.name.bright_white(),
            app.screens.len(),
            app.styles.len(),
            app.images.len()
        );
    }
    emit(args, session, &app)
}

pub async fn handle_images(args: &ArgMatches, session: &Session) -> Result<()> {
    let file_id = file_id(args)?;
    let options = image_options(args.get_one::<String>("format"), args.get_one::<f64>("scale"))?;
    let client = session.client()?;

    let spinner = session.spinner(format!("Resolving images of {}...", file_id));
    let result = dropit_core::list_images(&client, file_id, &options).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    emit(args, session, &result?)
}

pub async fn handle_node_images(args: &ArgMatches, session: &Session) -> Result<()> {
    let file_id = file_id(args)?;
    let raw_ids = args
        .get_one::<String>("ids")
        .context("--ids is required")?;
    let ids = parse_node_ids(raw_ids).map_err(anyhow::Error::msg)?;
    let options = image_options(args.get_one::<String>("format"), args.get_one::<f64>("scale"))?;
    let client = session.client()?;

    let urls = dropit_core::images_by_ids(&client, file_id, &ids, &options).await?;
    emit(args, session, &urls)
}

pub async fn handle_components(args: &ArgMatches, session: &Session) -> Result<()> {
    let file_id = file_id(args)?;
    let client = session.client()?;
    let components = dropit_core::list_components(&client, file_id).await?;
    emit(args, session, &components)
}

pub async fn handle_styles(args: &ArgMatches, session: &Session) -> Result<()> {
    let file_id = file_id(args)?;
    let client = session.client()?;
    let styles = dropit_core::list_styles(&client, file_id).await?;
    emit(args, session, &styles)
}

pub async fn handle_style(args: &ArgMatches, session: &Session) -> Result<()> {
    let key = args
        .get_one::<String>("KEY")
        .context("KEY is required")?;
    let client = session.client()?;
    let style = dropit_core::fetch_style(&client, key).await?;
    emit(args, session, &style)
}
