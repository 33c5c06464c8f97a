/// Generation run orchestration
/// Walks the input tree per category, emits shader headers and writes the shader stores
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use crate::{
    GeneratorError, GeneratorResult,
    config::GeneratorConfig,
    discovery::{list_shader_files, list_subdirectories},
    emitter::{emit_unit, read_shader_lines},
    naming::{self, ShaderCategory},
    store::{ShaderStore, StoreEntry, StoreSpec, render_header},
};

const STANDARD_STORE: &str = "EffectShadersStore";
const INCLUDES_STORE: &str = "EffectIncludesShadersStore";

/// Which parts of the tree a run generates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySelection {
    /// Standard shaders and includes, with their stores
    pub shader_stores: bool,
    /// Procedural textures and materials library headers
    pub libraries: bool,
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self {
            shader_stores: true,
            libraries: false,
        }
    }
}

/// Outcome of one category
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub category: ShaderCategory,
    pub shader_count: usize,
    pub elapsed: Duration,
    /// Store source written for this category, if it has one
    pub store: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub categories: Vec<CategoryReport>,
}

impl GenerationReport {
    pub fn total_shaders(&self) -> usize {
        self.categories.iter().map(|c| c.shader_count).sum()
    }

    pub fn category(&self, category: ShaderCategory) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// One shader file with every derived name resolved, before anything is written
#[derive(Debug, Clone)]
struct PlannedShader {
    source: PathBuf,
    source_name: String,
    output_dir: PathBuf,
    header_file: String,
    variable: String,
    guard: String,
}

impl PlannedShader {
    fn new(
        category: ShaderCategory,
        source_name: &str,
        source: &Path,
        output_dir: &Path,
        guard_prefix: &str,
    ) -> Self {
        let output_dir = naming::fix_output_dir(output_dir);
        let id_name = naming::fix_shader_name(source_name, &output_dir);
        let variable = if category.is_include() {
            naming::variable_identifier(source_name, true)
        } else {
            naming::variable_identifier(&id_name, false)
        };

        Self {
            source: source.to_path_buf(),
            source_name: source_name.to_string(),
            header_file: naming::header_file_name(&id_name),
            guard: naming::guard_name(guard_prefix, &id_name),
            variable,
            output_dir,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.header_file)
    }

    fn store_entry(&self) -> StoreEntry {
        StoreEntry {
            source_name: self.source_name.clone(),
            variable: self.variable.clone(),
            header_file: self.header_file.clone(),
        }
    }
}

/// Resolved names of one category; identifiers are checked for collisions while planning
struct CategoryPlan {
    category: ShaderCategory,
    shaders: Vec<PlannedShader>,
    store: ShaderStore,
    outputs: HashMap<PathBuf, String>,
}

impl CategoryPlan {
    fn new(category: ShaderCategory) -> Self {
        Self {
            category,
            shaders: Vec::new(),
            store: ShaderStore::new(category.label()),
            outputs: HashMap::new(),
        }
    }

    fn push(&mut self, shader: PlannedShader) -> GeneratorResult<()> {
        let output = shader.output_path();
        if let Some(first) = self.outputs.get(&output) {
            return Err(GeneratorError::DuplicateIdentifier {
                category: self.category.label().to_string(),
                identifier: shader.header_file.clone(),
                first: first.clone(),
                second: shader.source.display().to_string(),
            });
        }
        self.store.insert(shader.store_entry())?;
        self.outputs.insert(output, shader.source.display().to_string());
        self.shaders.push(shader);
        Ok(())
    }
}

/// Input/output roots and configuration for one generation run
#[derive(Debug, Clone)]
pub struct GenerationContext {
    input_root: PathBuf,
    output_root: PathBuf,
    config: GeneratorConfig,
}

impl GenerationContext {
    /// Validates both roots before anything is generated
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        config: GeneratorConfig,
    ) -> GeneratorResult<Self> {
        let input_root = input_root.into();
        let output_root = output_root.into();

        if !input_root.is_dir() {
            return Err(GeneratorError::InvalidInputDir(input_root));
        }
        if !output_root.is_dir() {
            return Err(GeneratorError::InvalidOutputDir {
                path: output_root,
                reason: "not a directory".to_string(),
            });
        }
        let store_sources = output_root.join(&config.output.store_sources);
        if !store_sources.is_dir() {
            return Err(GeneratorError::InvalidOutputDir {
                reason: format!("missing {}", config.output.store_sources.display()),
                path: output_root,
            });
        }

        Ok(Self {
            input_root,
            output_root,
            config,
        })
    }

    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Runs the selected categories in order
    pub fn run(&self, selection: CategorySelection) -> GeneratorResult<GenerationReport> {
        let mut report = GenerationReport::default();
        if selection.shader_stores {
            self.generate_shader_stores(&mut report)?;
        }
        if selection.libraries {
            report.categories.push(self.generate_procedural_textures()?);
            report.categories.push(self.generate_materials_library()?);
        }
        Ok(report)
    }

    /// Standard shaders and includes, each followed by its store
    pub fn generate_shader_stores(&self, report: &mut GenerationReport) -> GeneratorResult<()> {
        let layout = &self.config.output;
        let store_dir = self.output_root.join(&layout.store_sources);

        let standard = StoreSpec::for_struct(
            STANDARD_STORE,
            &include_path(&store_header_dir(&layout.store_sources)),
            &include_path(&layout.shaders),
        );
        let mut standard_report = self.generate_flat_category(
            ShaderCategory::Standard,
            &self.input_root.join(&self.config.input.shaders),
            &self.output_root.join(&layout.shaders),
            &self.config.guards.shaders,
            &standard,
            &store_dir,
        )?;
        log::info!("Generated shader store");
        standard_report.store = Some(store_dir.join(&standard.source_file));
        report.categories.push(standard_report);

        let includes_dir = self.output_root.join(&layout.includes);
        fs::create_dir_all(&includes_dir).map_err(|e| GeneratorError::io(&includes_dir, e))?;

        let includes = StoreSpec::for_struct(
            INCLUDES_STORE,
            &include_path(&store_header_dir(&layout.store_sources)),
            &include_path(&layout.includes),
        );
        let mut includes_report = self.generate_flat_category(
            ShaderCategory::Include,
            &self.input_root.join(&self.config.input.includes),
            &includes_dir,
            &self.config.guards.includes,
            &includes,
            &store_dir,
        )?;
        log::info!("Generated shader include store");
        includes_report.store = Some(store_dir.join(&includes.source_file));
        report.categories.push(includes_report);

        Ok(())
    }

    pub fn generate_procedural_textures(&self) -> GeneratorResult<CategoryReport> {
        self.generate_library(
            ShaderCategory::ProceduralTexture,
            &self.input_root.join(&self.config.input.procedural_textures),
            &self.output_root.join(&self.config.output.procedural_textures),
            &self.config.guards.procedural_textures,
        )
    }

    pub fn generate_materials_library(&self) -> GeneratorResult<CategoryReport> {
        self.generate_library(
            ShaderCategory::MaterialLibrary,
            &self.input_root.join(&self.config.input.materials_library),
            &self.output_root.join(&self.config.output.materials_library),
            &self.config.guards.materials_library,
        )
    }

    /// A single input directory whose shaders all land in one output directory and one store
    fn generate_flat_category(
        &self,
        category: ShaderCategory,
        input_dir: &Path,
        output_dir: &Path,
        guard_prefix: &str,
        spec: &StoreSpec,
        store_dir: &Path,
    ) -> GeneratorResult<CategoryReport> {
        let files = list_shader_files(input_dir, &self.config.shader_extension)?;
        log::info!("Found {} {}s", files.len(), category.label());

        let mut plan = CategoryPlan::new(category);
        for (name, path) in &files {
            plan.push(PlannedShader::new(category, name, path, output_dir, guard_prefix))?;
        }

        let report = self.emit_plan(&plan)?;
        self.write_store(&plan.store, spec, store_dir)?;
        Ok(report)
    }

    /// One output subdirectory per library; libraries have no store
    fn generate_library(
        &self,
        category: ShaderCategory,
        input_dir: &Path,
        output_dir: &Path,
        guard_prefix: &str,
    ) -> GeneratorResult<CategoryReport> {
        let mut plan = CategoryPlan::new(category);
        if input_dir.is_dir() {
            for (library, library_dir) in list_subdirectories(input_dir)? {
                let prefix = format!("{guard_prefix}_{}", library.to_uppercase());
                let library_output = output_dir.join(&library);
                let files = list_shader_files(&library_dir, &self.config.shader_extension)?;
                for (name, path) in files {
                    let shader =
                        PlannedShader::new(category, &name, &path, &library_output, &prefix);
                    plan.push(shader)?;
                }
            }
        } else {
            log::debug!("Skipping {}: {} does not exist", category, input_dir.display());
        }
        log::info!("Found {} shaders in {}", plan.shaders.len(), category.label());

        self.emit_plan(&plan)
    }

    fn emit_plan(&self, plan: &CategoryPlan) -> GeneratorResult<CategoryReport> {
        let started = Instant::now();
        for shader in &plan.shaders {
            self.process_shader(shader)?;
            log::debug!("      |-Processed {} file: {}", plan.category, shader.source_name);
        }
        let elapsed = started.elapsed();
        log::info!(
            "Processed {} {} files in {:.3}s",
            plan.shaders.len(),
            plan.category,
            elapsed.as_secs_f64()
        );

        Ok(CategoryReport {
            category: plan.category,
            shader_count: plan.shaders.len(),
            elapsed,
            store: None,
        })
    }

    fn process_shader(&self, shader: &PlannedShader) -> GeneratorResult<PathBuf> {
        let lines = read_shader_lines(&shader.source)?;
        let unit = emit_unit(
            &shader.source,
            &lines,
            &shader.variable,
            &shader.guard,
            &self.config.namespace,
        )?;

        fs::create_dir_all(&shader.output_dir)
            .map_err(|e| GeneratorError::io(&shader.output_dir, e))?;
        let output = shader.output_path();
        self.write_text_file(&output, &unit.text)?;
        Ok(output)
    }

    fn write_store(
        &self,
        store: &ShaderStore,
        spec: &StoreSpec,
        store_dir: &Path,
    ) -> GeneratorResult<()> {
        let namespace = &self.config.namespace;

        let header_dir = store_header_dir(store_dir);
        fs::create_dir_all(&header_dir).map_err(|e| GeneratorError::io(&header_dir, e))?;
        let header = render_header(spec, namespace);
        self.write_text_file(&header_dir.join(&spec.header_file), &header)?;
        let source = store.render_source(spec, namespace);
        self.write_text_file(&store_dir.join(&spec.source_file), &source)?;
        Ok(())
    }

    fn write_text_file(&self, path: &Path, text: &str) -> GeneratorResult<()> {
        let content = if self.config.write_bom {
            format!("\u{feff}{text}")
        } else {
            text.to_string()
        };
        fs::write(path, content).map_err(|e| GeneratorError::io(path, e))
    }
}

/// Store headers live next to the sources, with the last `src` component
/// replaced by `include/babylon`
pub fn store_header_dir(store_sources: &Path) -> PathBuf {
    let components: Vec<Component> = store_sources.components().collect();
    let Some(src_index) = components
        .iter()
        .rposition(|c| c.as_os_str() == "src")
    else {
        return store_sources.to_path_buf();
    };

    let mut dir = PathBuf::new();
    for (index, component) in components.iter().enumerate() {
        if index == src_index {
            dir.push("include");
            dir.push("babylon");
        } else {
            dir.push(component.as_os_str());
        }
    }
    dir
}

/// `#include <...>` form of an output directory,
/// e.g. `include/babylon/shaders` -> `babylon/shaders`
pub fn include_path(dir: &Path) -> String {
    let dir = dir.strip_prefix("include").unwrap_or(dir);
    dir.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
