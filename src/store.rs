/// Shader store generation
/// Builds the header/source pair exposing a name -> shader text lookup table
use std::collections::HashMap;

use crate::{GeneratorError, GeneratorResult};

/// Naming of one generated store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSpec {
    /// C++ struct holding the static map, e.g. `EffectShadersStore`
    pub struct_name: String,
    /// Guard of the store header
    pub guard: String,
    pub header_file: String,
    pub source_file: String,
    /// Include path of the store header as seen from the store source
    pub header_include: String,
    /// Include directory of the per-shader headers
    pub unit_include_dir: String,
}

const STORE_GUARD_PREFIX: &str = "BABYLON_MATERIALS";

impl StoreSpec {
    /// Derives file names and guard from the struct name, e.g. `EffectShadersStore`
    /// -> `effect_shaders_store.{h,cpp}` guarded by `BABYLON_MATERIALS_EFFECT_SHADERS_STORE_H`
    pub fn for_struct(struct_name: &str, header_include_dir: &str, unit_include_dir: &str) -> Self {
        let stem = crate::naming::file_identifier(struct_name);
        let header_file = format!("{stem}.h");
        Self {
            struct_name: struct_name.to_string(),
            guard: format!("{STORE_GUARD_PREFIX}_{}_H", stem.to_uppercase()),
            header_include: format!("{header_include_dir}/{header_file}"),
            source_file: format!("{stem}.cpp"),
            header_file,
            unit_include_dir: unit_include_dir.to_string(),
        }
    }
}

/// One row of the lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Original shader file name, used for ordering and error reports
    pub source_name: String,
    pub variable: String,
    pub header_file: String,
}

/// Ordered, duplicate free set of store entries
#[derive(Debug, Default)]
pub struct ShaderStore {
    category: String,
    entries: Vec<StoreEntry>,
    by_variable: HashMap<String, usize>,
}

impl ShaderStore {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    /// Adds an entry, rejecting a variable identifier that is already taken
    pub fn insert(&mut self, entry: StoreEntry) -> GeneratorResult<()> {
        if let Some(&existing) = self.by_variable.get(&entry.variable) {
            return Err(GeneratorError::DuplicateIdentifier {
                category: self.category.clone(),
                identifier: entry.variable,
                first: self.entries[existing].source_name.clone(),
                second: entry.source_name,
            });
        }
        self.by_variable
            .insert(entry.variable.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Entries sorted by original file name
    pub fn sorted_entries(&self) -> Vec<&StoreEntry> {
        let mut entries: Vec<&StoreEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.source_name.cmp(&b.source_name));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render_source(&self, spec: &StoreSpec, namespace: &str) -> String {
        render_source(spec, namespace, &self.sorted_entries())
    }
}

/// Header declaring the store struct and its static map
pub fn render_header(spec: &StoreSpec, namespace: &str) -> String {
    let StoreSpec {
        struct_name, guard, ..
    } = spec;

    let mut output = String::new();
    output.push_str(&format!("#ifndef {guard}\n"));
    output.push_str(&format!("#define {guard}\n\n"));
    output.push_str("#include <babylon/babylon_global.h>\n\n");
    output.push_str(&format!("namespace {namespace} {{\n\n"));
    output.push_str(&format!("struct BABYLON_SHARED_EXPORT {struct_name} {{\n"));
    output.push_str("  static std::unordered_map<std::string, const char*> Shaders;\n");
    output.push_str(&format!("}}; // end of struct {struct_name}\n\n"));
    output.push_str(&format!("}} // end of namespace {namespace}\n\n"));
    output.push_str(&format!("#endif // end of {guard}\n"));
    output
}

/// Source including every shader header and defining the lookup table
pub fn render_source(spec: &StoreSpec, namespace: &str, entries: &[&StoreEntry]) -> String {
    let mut output = format!("#include <{}>\n\n", spec.header_include);
    for entry in entries {
        output.push_str(&format!(
            "#include <{}/{}>\n",
            spec.unit_include_dir, entry.header_file
        ));
    }

    output.push_str(&format!("\nnamespace {namespace} {{\n\n"));
    output.push_str(&format!(
        "std::unordered_map<std::string, const char*> {}::Shaders = {{\n",
        spec.struct_name
    ));
    let rows: Vec<String> = entries
        .iter()
        .map(|entry| format!("  {{\"{0}\", {0}}}", entry.variable))
        .collect();
    if !rows.is_empty() {
        output.push_str(&rows.join(",\n"));
        output.push('\n');
    }
    output.push_str("};\n\n");
    output.push_str(&format!("}} // end of namespace {namespace}\n"));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> StoreSpec {
        StoreSpec {
            struct_name: "EffectShadersStore".to_string(),
            guard: "BABYLON_MATERIALS_EFFECT_SHADERS_STORE_H".to_string(),
            header_file: "effect_shaders_store.h".to_string(),
            source_file: "effect_shaders_store.cpp".to_string(),
            header_include: "babylon/materials/effect_shaders_store.h".to_string(),
            unit_include_dir: "babylon/shaders".to_string(),
        }
    }

    fn entry(source_name: &str, variable: &str, header_file: &str) -> StoreEntry {
        StoreEntry {
            source_name: source_name.to_string(),
            variable: variable.to_string(),
            header_file: header_file.to_string(),
        }
    }

    #[test]
    fn test_spec_for_struct() {
        assert_eq!(
            StoreSpec::for_struct("EffectShadersStore", "babylon/materials", "babylon/shaders"),
            spec()
        );

        let includes = StoreSpec::for_struct(
            "EffectIncludesShadersStore",
            "babylon/materials",
            "babylon/shaders/shadersinclude",
        );
        assert_eq!(includes.guard, "BABYLON_MATERIALS_EFFECT_INCLUDES_SHADERS_STORE_H");
        assert_eq!(includes.source_file, "effect_includes_shaders_store.cpp");
        assert_eq!(
            includes.header_include,
            "babylon/materials/effect_includes_shaders_store.h"
        );
    }

    #[test]
    fn test_header() {
        let header = render_header(&spec(), "BABYLON");
        assert!(header.starts_with("#ifndef BABYLON_MATERIALS_EFFECT_SHADERS_STORE_H\n"));
        assert!(header.contains("struct BABYLON_SHARED_EXPORT EffectShadersStore {\n"));
        assert!(header.contains("}; // end of struct EffectShadersStore\n"));
        assert!(header.ends_with("#endif // end of BABYLON_MATERIALS_EFFECT_SHADERS_STORE_H\n"));
    }

    #[test]
    fn test_source_is_sorted_by_file_name() {
        let mut store = ShaderStore::new("standard shader");
        store.insert(entry("b.fx", "bShader", "b_fx.h")).unwrap();
        store.insert(entry("a.fx", "aShader", "a_fx.h")).unwrap();

        let source = store.render_source(&spec(), "BABYLON");
        let expected = "#include <babylon/materials/effect_shaders_store.h>\n\
\n\
#include <babylon/shaders/a_fx.h>\n\
#include <babylon/shaders/b_fx.h>\n\
\n\
namespace BABYLON {\n\
\n\
std::unordered_map<std::string, const char*> EffectShadersStore::Shaders = {\n\
\x20 {\"aShader\", aShader},\n\
\x20 {\"bShader\", bShader}\n\
};\n\
\n\
} // end of namespace BABYLON\n";
        assert_eq!(source, expected);
    }

    #[test]
    fn test_duplicate_variable_is_rejected() {
        let mut store = ShaderStore::new("standard shader");
        store.insert(entry("a.fragment.fx", "aPixelShader", "a_fragment_fx.h")).unwrap();
        let err = store
            .insert(entry("a.pixel.fx", "aPixelShader", "a_pixel_fx.h"))
            .unwrap_err();
        match err {
            GeneratorError::DuplicateIdentifier {
                identifier, first, second, ..
            } => {
                assert_eq!(identifier, "aPixelShader");
                assert_eq!(first, "a.fragment.fx");
                assert_eq!(second, "a.pixel.fx");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_store() {
        let store = ShaderStore::new("shader include");
        assert!(store.is_empty());
        let source = store.render_source(&spec(), "BABYLON");
        assert!(source.contains("EffectShadersStore::Shaders = {\n};\n"));
    }
}
