//! File extension to language mapping

use std::path::Path;

/// Label used for files without an extension
pub const NO_EXTENSION: &str = "(no ext)";

/// Infer a readable language name from a file path.
///
/// Unknown extensions are reported as the lowercased extension itself
/// (e.g. `.proto`) so they still group together.
pub fn language_for(path: &str) -> String {
    let ext = match Path::new(path).extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => return NO_EXTENSION.to_string(),
    };

    let name = match ext.as_str() {
        "py" => "Python",
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "jsx" => "React JSX",
        "tsx" => "React TSX",
        "go" => "Go",
        "rs" => "Rust",
        "rb" => "Ruby",
        "java" => "Java",
        "kt" => "Kotlin",
        "swift" => "Swift",
        "c" => "C",
        "cpp" | "cc" | "cxx" => "C++",
        "h" => "C/C++ Header",
        "cs" => "C#",
        "php" => "PHP",
        "dart" => "Dart",
        "html" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "json" => "JSON",
        "yaml" | "yml" => "YAML",
        "toml" => "TOML",
        "xml" => "XML",
        "md" => "Markdown",
        "txt" => "Text",
        "sh" | "bash" | "zsh" => "Shell",
        "sql" => "SQL",
        "r" => "R",
        "lua" => "Lua",
        "ex" | "exs" => "Elixir",
        "erl" => "Erlang",
        "zig" => "Zig",
        "nim" => "Nim",
        "v" => "V",
        "sol" => "Solidity",
        "vue" => "Vue",
        "svelte" => "Svelte",
        _ => return format!(".{ext}"),
    };
    name.to_string()
}
