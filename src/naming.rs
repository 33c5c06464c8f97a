/// Identifier derivation for generated shader units
/// Turns shader file names into header names, guard symbols and C++ variable names
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static LOWER_TO_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Suffix appended to non-include variable identifiers
const SHADER_SUFFIX: &str = "shader";
const FRAGMENT_SHADER_SUFFIX: &str = "FragmentShader";
const PIXEL_SHADER_SUFFIX: &str = "PixelShader";

/// The kind of shader source a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderCategory {
    Standard,
    Include,
    ProceduralTexture,
    MaterialLibrary,
}

impl ShaderCategory {
    pub fn is_include(self) -> bool {
        matches!(self, ShaderCategory::Include)
    }

    pub fn label(self) -> &'static str {
        match self {
            ShaderCategory::Standard => "standard shader",
            ShaderCategory::Include => "shader include",
            ShaderCategory::ProceduralTexture => "procedural texture",
            ShaderCategory::MaterialLibrary => "materials library",
        }
    }
}

impl fmt::Display for ShaderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A spelling that differs between output directory names and shader identifiers.
///
/// Directories are written with the `directory` spelling, while shader files
/// living in such a directory derive their identifiers from the `identifier`
/// spelling.
#[derive(Debug, Clone, Copy)]
pub struct CaseFix {
    pub identifier: &'static str,
    pub directory: &'static str,
}

pub const CASE_FIXES: &[CaseFix] = &[CaseFix {
    identifier: "triPlanar",
    directory: "triplanar",
}];

/// Snake case file identifier, e.g. `myAwesomeShader.fragment.fx` -> `my_awesome_shader_fragment_fx`
pub fn file_identifier(file_name: &str) -> String {
    let split_words = CAPITALIZED_WORD.replace_all(file_name, "${1}_${2}");
    let split_words = LOWER_TO_UPPER.replace_all(&split_words, "${1}_${2}");
    split_words.to_lowercase().replace('.', "_")
}

/// Camel case variable identifier, e.g. `default.fragment.fx` -> `defaultPixelShader`
pub fn variable_identifier(file_name: &str, is_include: bool) -> String {
    let mut segments: Vec<&str> = file_name.split('.').collect();
    segments.pop();
    if !is_include {
        segments.push(SHADER_SUFFIX);
    }

    let mut name = String::with_capacity(file_name.len() + SHADER_SUFFIX.len());
    for (index, segment) in segments.iter().enumerate() {
        if index == 0 {
            name.push_str(segment);
        } else {
            name.push_str(&capitalize_first(segment));
        }
    }

    if let Some(stem) = name.strip_suffix(FRAGMENT_SHADER_SUFFIX) {
        name = format!("{stem}{PIXEL_SHADER_SUFFIX}");
    }
    name
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the generated header for a shader file
pub fn header_file_name(file_name: &str) -> String {
    format!("{}.h", file_identifier(file_name))
}

/// Header guard symbol, e.g. `BABYLON_SHADERS` + `default.vertex.fx` -> `BABYLON_SHADERS_DEFAULT_VERTEX_FX_H`
pub fn guard_name(prefix: &str, file_name: &str) -> String {
    let header = header_file_name(file_name).replace('.', "_").to_uppercase();
    format!("{prefix}_{header}")
}

/// Applies the directory spelling of every case fix to the last component of `dir`
pub fn fix_output_dir(dir: &Path) -> PathBuf {
    let Some(name) = dir.file_name().and_then(|name| name.to_str()) else {
        return dir.to_path_buf();
    };

    let mut fixed = name.to_string();
    for fix in CASE_FIXES {
        fixed = fixed.replace(fix.identifier, fix.directory);
    }

    if fixed == name {
        dir.to_path_buf()
    } else {
        dir.with_file_name(fixed)
    }
}

/// Restores the identifier spelling in a shader file name written to a case-fixed directory
pub fn fix_shader_name(file_name: &str, output_dir: &Path) -> String {
    let dir_name = output_dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let mut fixed = file_name.to_string();
    for fix in CASE_FIXES {
        if dir_name.contains(fix.directory) {
            fixed = fixed.replace(fix.directory, fix.identifier);
        }
    }
    fixed
}
