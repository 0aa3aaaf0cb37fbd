use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use vaultex_config::Config;
use vaultex_engine::{ConvertSettings, Converter, io, parsing::blocks::kinds::Marker};

/// Convert a vault of linked Markdown notes to LaTeX
#[derive(Debug, Parser)]
#[command(name = "vaultex", version, about)]
struct Cli {
    /// Input note, or vault folder walked from its index note
    #[arg(short, long)]
    input: PathBuf,

    /// LaTeX file to generate
    #[arg(short, long)]
    output: PathBuf,

    /// BibTeX database with every reference the notes may cite
    #[arg(short, long)]
    bibtex: Option<PathBuf>,

    /// Folder figure images are resolved against
    #[arg(short, long)]
    graphics: Option<PathBuf>,

    /// Main template wrapping the generated LaTeX
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Template applied to every rendered block
    #[arg(long)]
    job_template: Option<PathBuf>,

    /// BibTeX file to generate with only the cited entries
    #[arg(short, long)]
    main_bibtex: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging and print the plan outline
    #[arg(short, long)]
    debug: bool,
}

fn read_template(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|path| {
        io::read_path(path).with_context(|| format!("Failed to read template {}", path.display()))
    })
    .transpose()
}

/// Merges command-line flags over config values over engine defaults.
fn build_settings(cli: &Cli, config: &Config) -> Result<ConvertSettings> {
    let mut settings = ConvertSettings::default();

    let planner = &mut settings.planner;
    if let Some(index) = &config.index {
        planner.index = index.clone();
    }
    if let Some(base_level) = config.base_level {
        planner.base_level = base_level;
    }
    if let Some(max_depth) = config.max_depth {
        planner.max_depth = max_depth;
    }
    if let Some(implicit) = config.implicit_bibliography {
        planner.implicit_bibliography = implicit;
    }
    planner.bibliography = cli.bibtex.clone().or_else(|| config.bibliography.clone());

    let assembly = &mut settings.assembly;
    assembly.graphics = cli.graphics.clone().or_else(|| config.graphics.clone());
    if let Some(levels) = config.heading_levels()? {
        assembly.heading_levels = levels;
    }
    if let Some(marker) = &config.appendix_marker {
        assembly.appendix_marker = marker.clone();
    }
    assembly.bibliography_marker = match (&config.bibliography_marker, &cli.main_bibtex) {
        (Some(marker), _) => marker.clone(),
        (None, Some(out)) => match out.file_stem() {
            Some(stem) => Marker::bibliography_for(&stem.to_string_lossy()),
            None => Marker::DEFAULT_BIBLIOGRAPHY.to_string(),
        },
        (None, None) => Marker::DEFAULT_BIBLIOGRAPHY.to_string(),
    };

    if let Some(main) = read_template(cli.template.as_deref().or(config.main_template.as_deref()))? {
        log::info!("Using main template from file");
        settings.main_template = main;
    }
    if let Some(job) = read_template(cli.job_template.as_deref().or(config.job_template.as_deref()))? {
        settings.job_template = job;
    }

    Ok(settings)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let loaded = match &cli.config {
        Some(path) => {
            if !path.is_file() {
                bail!("Config file {} does not exist", path.display());
            }
            Config::load_from_path(path)?
        }
        None => Config::load()?,
    };
    if loaded.is_none() {
        log::debug!("No config file found at {}", Config::config_path().display());
    }
    Ok(loaded.unwrap_or_default())
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.input.exists() {
        bail!("Input path {} does not exist", cli.input.display());
    }

    let config = load_config(cli)?;
    let mut converter = Converter::new(build_settings(cli, &config)?)?;
    converter.add_path(&cli.input)?;

    let plan = converter.plan();
    log::info!(
        "Planned {} jobs from {} files ({} headers)",
        plan.jobs().len(),
        plan.files_read(),
        plan.header_count()
    );
    if cli.debug {
        plan.log_outline();
    }

    let conversion = converter.convert()?;
    for warning in &conversion.warnings {
        log::warn!("{warning}");
    }

    // The bibliography is only written once the document is on disk.
    io::write_path(&cli.output, &conversion.latex)?;
    match (&conversion.bibliography, &cli.main_bibtex) {
        (Some(bib), Some(path)) => {
            io::write_path(path, bib)?;
            log::info!("Bibliography written to {}", path.display());
        }
        (Some(_), None) => {
            log::warn!("Notes cite references but no output BibTeX path was given");
        }
        (None, _) => {}
    }

    println!("Output written to {}", cli.output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    run(&cli)
}
