use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use docnav::{
  cli::{Cli, Commands},
  pages,
};
use docnav_config::Config;
use log::{LevelFilter, error, info, warn};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return init(output, format, *force);
  }

  let mut config = Config::load(&cli.config_files, &cli.config_overrides)?;
  cli.command.apply_to(&mut config);
  config.validate()?;
  config.validate_paths()?;

  match &cli.command {
    Commands::Render { toc_json, .. } => {
      info!("Starting documentation generation...");
      let pages = pages::render_site(&config)?;

      if let Some(path) = toc_json {
        pages::write_toc_json(&pages, path).wrap_err_with(|| {
          format!("Failed to write table of contents to {}", path.display())
        })?;
      }

      info!(
        "Rendered {} page(s) into {}",
        pages.len(),
        config.output_dir.display()
      );
      Ok(())
    },
    Commands::Check { .. } => check(&config),
    Commands::Init { .. } => Ok(()),
  }
}

fn init(output: &std::path::Path, format: &str, force: bool) -> Result<()> {
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!(
    "Configuration file created successfully. Edit it to customize your \
     documentation."
  );
  Ok(())
}

fn check(config: &Config) -> Result<()> {
  let reports = pages::check_site(config)?;
  let mut problems = 0;

  for report in &reports {
    if let Some(e) = &report.error {
      error!("{}: {e}", report.source.display());
      problems += 1;
    }
    for issue in &report.issues {
      if issue.matches == 0 {
        warn!(
          "{}: TOC entry #{} has no matching element",
          report.source.display(),
          issue.slug
        );
      } else {
        warn!(
          "{}: TOC entry #{} matches {} elements",
          report.source.display(),
          issue.slug,
          issue.matches
        );
      }
      problems += 1;
    }
  }

  if problems > 0 {
    bail!(
      "Found {problems} anchor problem(s) in {} file(s)",
      reports.iter().filter(|report| !report.is_clean()).count()
    );
  }

  info!("All anchors resolve in {} file(s)", reports.len());
  Ok(())
}
