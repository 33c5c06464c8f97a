//! Command-line interface for the shader store generator.

use clap::{CommandFactory, Parser, error::ErrorKind};
use std::path::PathBuf;

use crate::{CategorySelection, GeneratorConfig, GeneratorResult};

/// Default Babylon.js checkout, relative to the working directory
const DEFAULT_INPUT_ROOT: &str = "../../../Projects/Babylon.js-2.5";
/// Default BabylonCpp tree, relative to the working directory
const DEFAULT_OUTPUT_ROOT: &str = "../src/BabylonCpp";

/// shader-store-gen - embeds Babylon.js shaders into BabylonCpp headers
#[derive(Parser, Debug)]
#[command(name = "shader-store-gen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Babylon.js root and BabylonCpp root, for whichever of them is not given by flag
    #[arg(value_name = "DIR", num_args = 0..=2)]
    pub roots: Vec<PathBuf>,

    /// Babylon.js root path
    #[arg(short = 'i', long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// BabylonCpp root path
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// RON file overriding the default layout and naming
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also generate the procedural textures and materials library headers
    #[arg(long)]
    pub with_libraries: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Input and output roots. Positionals fill the roots not given by flag, input first.
    pub fn roots(&self) -> Result<(PathBuf, PathBuf), clap::Error> {
        let mut positionals = self.roots.iter().cloned();
        let input = self.input_dir.clone().or_else(|| positionals.next());
        let output = self.output_dir.clone().or_else(|| positionals.next());

        let extra: Vec<String> = positionals.map(|p| p.display().to_string()).collect();
        if !extra.is_empty() {
            return Err(Cli::command().error(
                ErrorKind::TooManyValues,
                format!("Incorrect number of arguments: unexpected {}", extra.join(", ")),
            ));
        }

        Ok((
            input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_ROOT)),
            output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT)),
        ))
    }

    pub fn selection(&self) -> CategorySelection {
        CategorySelection {
            shader_stores: true,
            libraries: self.with_libraries,
        }
    }

    pub fn load_config(&self) -> GeneratorResult<GeneratorConfig> {
        match &self.config {
            Some(path) => GeneratorConfig::load(path),
            None => Ok(GeneratorConfig::default()),
        }
    }
}
