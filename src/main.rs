use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error};

use quick_csr::cli::Args;
use quick_csr::config::{ProfileConfig, expand_home};
use quick_csr::{PlanDefaults, build_plan, process};

/// Exit status for any failure after argument parsing.
const EXIT_FAILURE: i32 = 3;

fn main() {
    env_logger::Builder::new()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{e:#}");
        eprintln!("An unhandled error occurred, please report this bug:");
        eprintln!("{e:?}");
        std::process::exit(EXIT_FAILURE);
    }
}

fn run(args: &Args) -> Result<()> {
    let source = args.config_source();
    let config_path = expand_home(&source.location);
    debug!(
        "Config location {} (profile: {:?})",
        config_path.display(),
        source.profile
    );

    let config = ProfileConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let plan = build_plan(
        &PlanDefaults::default(),
        &config,
        source.profile.as_deref(),
        &args.common_name,
        &args.alternative_names,
    )
    .context("Failed to resolve request plan")?;

    process(&plan).context("Failed to generate certificate signing request")?;
    Ok(())
}
