/// Renders shader source lines into a generated C++ header
/// Each line becomes a quoted string literal of one `const char*` definition
use std::fs;
use std::path::Path;

use crate::{GeneratorError, GeneratorResult};

/// Lines that must only be seen by GLSL ES compilers
pub const GL_ES_SENTINEL: &str = "precision highp float;";

const GL_ES_OPEN: &str = "#ifdef GL_ES";
const GL_ES_CLOSE: &str = "#endif";
const UTF8_BOM: char = '\u{feff}';

/// The generated header for one shader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub guard: String,
    pub variable: String,
    pub text: String,
}

/// Reads a shader file as lines, dropping a UTF-8 BOM and `\r` line endings
pub fn read_shader_lines(path: &Path) -> GeneratorResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);
    Ok(content.lines().map(str::to_string).collect())
}

/// Applies quote escaping, tab expansion and indent collapsing to one line
pub fn transform_line(line: &str) -> String {
    let escaped = line.replace('"', "\\\"").replace('\t', "  ");
    collapse_indent(&escaped)
}

/// Halves the leading space run while its length is a positive multiple of four
fn collapse_indent(line: &str) -> String {
    let body = line.trim_start_matches(' ');
    let mut indent = line.len() - body.len();
    while indent > 0 && indent % 4 == 0 {
        indent /= 2;
    }
    format!("{}{}", " ".repeat(indent), body)
}

/// String literal contents for a shader, with GL ES guards expanded
pub fn literal_lines(lines: &[String]) -> Vec<String> {
    let mut literals = Vec::with_capacity(lines.len());
    for line in lines {
        let transformed = transform_line(line);
        if transformed.trim() == GL_ES_SENTINEL {
            literals.push(GL_ES_OPEN.to_string());
            literals.push(transformed);
            literals.push(GL_ES_CLOSE.to_string());
        } else {
            literals.push(transformed);
        }
    }
    literals
}

/// Emits the header text for a shader.
///
/// `source` is only used to report an empty input.
pub fn emit_unit(
    source: &Path,
    lines: &[String],
    variable: &str,
    guard: &str,
    namespace: &str,
) -> GeneratorResult<GeneratedUnit> {
    if lines.is_empty() {
        return Err(GeneratorError::EmptyShader(source.to_path_buf()));
    }

    let literals = literal_lines(lines);
    let last = literals.len() - 1;

    let mut text = String::new();
    text.push_str(&format!("#ifndef {guard}\n"));
    text.push_str(&format!("#define {guard}\n\n"));
    text.push_str(&format!("namespace {namespace} {{\n\n"));
    text.push_str(&format!("extern const char* {variable};\n\n"));
    text.push_str(&format!("const char* {variable}\n"));
    for (index, literal) in literals.iter().enumerate() {
        let lead = if index == 0 { "  = " } else { "    " };
        let end = if index == last { ";" } else { "" };
        text.push_str(&format!("{lead}\"{literal}\\n\"{end}\n"));
    }
    text.push_str(&format!("\n}} // end of namespace {namespace}\n\n"));
    text.push_str(&format!("#endif // end of {guard}\n"));

    Ok(GeneratedUnit {
        guard: guard.to_string(),
        variable: variable.to_string(),
        text,
    })
}
