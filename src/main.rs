mod api;
mod app;
mod cache;
mod config;
mod event;
mod format;
mod i18n;
mod logging;
mod mutation;
mod query;
mod sync;
mod ui;
mod warmup;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "applyvault")]
#[command(about = "A terminal UI for tracking job applications")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/applyvault/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Backend base URL, overriding config and environment
  #[arg(short, long)]
  base_url: Option<String>,

  /// UI language (en or de)
  #[arg(short, long)]
  lang: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  // Put the terminal back before the panic report is printed
  let hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    app::restore_terminal();
    hook(info);
  }));

  let args = Args::parse();

  let mut config = config::Config::load(args.config.as_deref())?;
  if let Some(base_url) = args.base_url {
    config.api.base_url = base_url;
  }
  if let Some(tag) = args.lang {
    let lang = i18n::Language::from_tag(&tag)
      .ok_or_else(|| eyre!("Unsupported language '{}', expected 'en' or 'de'", tag))?;
    config.language = Some(lang);
  }
  config.validate()?;

  let _guard = logging::init()?;
  tracing::info!(version = env!("CARGO_PKG_VERSION"), "applyvault starting");

  let mut app = app::App::new(config)?;
  app.run().await?;

  tracing::info!("applyvault exiting");
  Ok(())
}
