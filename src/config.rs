//! Generator configuration
//!
//! Built-in defaults describe the Babylon.js -> BabylonCpp layout. A RON file
//! can override any subset of fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{GeneratorError, GeneratorResult};

/// Top level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// C++ namespace wrapping every generated declaration
    pub namespace: String,
    /// Extension of shader source files
    pub shader_extension: String,
    /// Prefix output files with a UTF-8 byte order mark
    pub write_bom: bool,
    pub input: InputLayout,
    pub output: OutputLayout,
    pub guards: GuardPrefixes,
}

/// Input directories, relative to the input root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLayout {
    pub shaders: PathBuf,
    pub includes: PathBuf,
    pub procedural_textures: PathBuf,
    pub materials_library: PathBuf,
}

/// Output directories, relative to the output root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    pub shaders: PathBuf,
    pub includes: PathBuf,
    /// Store sources; must exist for the output root to be accepted
    pub store_sources: PathBuf,
    pub procedural_textures: PathBuf,
    pub materials_library: PathBuf,
}

/// Header guard prefixes per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardPrefixes {
    pub shaders: String,
    pub includes: String,
    pub procedural_textures: String,
    pub materials_library: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: "BABYLON".to_string(),
            shader_extension: ".fx".to_string(),
            write_bom: true,
            input: InputLayout::default(),
            output: OutputLayout::default(),
            guards: GuardPrefixes::default(),
        }
    }
}

impl Default for InputLayout {
    fn default() -> Self {
        Self {
            shaders: PathBuf::from("src/Shaders"),
            includes: PathBuf::from("src/Shaders/ShadersInclude"),
            procedural_textures: PathBuf::from("proceduralTexturesLibrary/src"),
            materials_library: PathBuf::from("materialsLibrary/src"),
        }
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            shaders: PathBuf::from("include/babylon/shaders"),
            includes: PathBuf::from("include/babylon/shaders/shadersinclude"),
            store_sources: PathBuf::from("src/materials"),
            procedural_textures: PathBuf::from(
                "../ProceduralTexturesLibrary/include/babylon/proceduraltextureslibrary",
            ),
            materials_library: PathBuf::from(
                "../MaterialsLibrary/include/babylon/materialslibrary",
            ),
        }
    }
}

impl Default for GuardPrefixes {
    fn default() -> Self {
        Self {
            shaders: "BABYLON_SHADERS".to_string(),
            includes: "BABYLON_SHADERS_SHADERS_INCLUDE".to_string(),
            procedural_textures: "BABYLON_PROCEDURAL_TEXTURES_LIBRARY".to_string(),
            materials_library: "BABYLON_MATERIALS_LIBRARY".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a RON configuration file
    pub fn load(path: &Path) -> GeneratorResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        let config = Self::from_ron(&content).map_err(|message| GeneratorError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        log::info!("Loaded configuration: {}", path.display());
        Ok(config)
    }

    pub fn from_ron(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|e| e.to_string())
    }

    pub fn to_ron(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| e.to_string())
    }
}
