use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, error::ErrorKind};
use shader_store_gen::{GenerationContext, GeneratorError, cli::Cli};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let roots = cli.roots().unwrap_or_else(|e| e.exit());
    match run(&cli, roots) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(generator_error) = e.downcast_ref::<GeneratorError>()
                && generator_error.is_usage_error()
            {
                Cli::command()
                    .error(ErrorKind::ValueValidation, generator_error)
                    .exit();
            }
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, (input_root, output_root): (PathBuf, PathBuf)) -> Result<()> {
    let config = cli.load_config()?;
    if cli.print_config {
        let text = config.to_ron().map_err(anyhow::Error::msg)?;
        println!("{text}");
        return Ok(());
    }

    let context = GenerationContext::new(input_root, output_root, config)?;
    log::info!("Input directory: {}", context.input_root().display());
    log::info!("Output directory: {}", context.output_root().display());

    let report = context
        .run(cli.selection())
        .context("Shader store generation failed")?;

    for category in &report.categories {
        if let Some(store) = &category.store {
            log::info!("Wrote {} store: {}", category.category, store.display());
        }
        log::debug!(
            "{}: {} shaders in {:.3}s",
            category.category,
            category.shader_count,
            category.elapsed.as_secs_f64()
        );
    }
    log::info!(
        "Generated {} shader headers in {} categories",
        report.total_shaders(),
        report.categories.len()
    );
    Ok(())
}
