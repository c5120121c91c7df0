use std::fmt::Write;

use crate::generator::discovery::ModuleSet;
use crate::generator::error::GeneratorError;
use crate::kernel::constants::CORE_CRATE_NAME;

/// First lines of every generated entry point.
pub const HEADER: &str = "\
// This file is autogenerated by `yep server`
// DO NOT MODIFY THIS FILE - ANY CHANGES WILL BE OVERWRITTEN
";

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe",
    "use", "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override",
    "priv", "typeof", "unsized", "virtual", "yield", "try",
];

/// Whether `path` can follow `use` as a module path: `::`-separated identifiers.
pub fn is_module_path(path: &str) -> bool {
    !path.is_empty() && path.split("::").all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let starts_well = match chars.next() {
        Some(c) => c == '_' || c.is_ascii_alphabetic(),
        None => false,
    };
    starts_well
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && segment != "_"
        && !KEYWORDS.contains(&segment)
}

/// Renders the source of the generated entry point.
///
/// One `use <module> as _;` per module links it in (so its registrations run)
/// and `main` hands `settings_literal` to `start_server`. Equal inputs give
/// byte-identical output. Nothing is rendered if a module path is invalid.
pub fn render(modules: &ModuleSet, settings_literal: &str) -> Result<String, GeneratorError> {
    if let Some(bad) = modules.iter().find(|m| !is_module_path(m)) {
        return Err(GeneratorError::InvalidModuleIdent { ident: bad.to_string() });
    }

    let mut source = String::with_capacity(256 + settings_literal.len());
    source.push_str(HEADER);
    source.push('\n');
    if !modules.is_empty() {
        for module in modules.iter() {
            // Writing to a String cannot fail
            let _ = writeln!(source, "use {} as _;", module);
        }
        source.push('\n');
    }
    let _ = writeln!(source, "fn main() -> std::process::ExitCode {{");
    let _ = writeln!(source, "    {}::start_server({})", CORE_CRATE_NAME, settings_literal);
    source.push_str("}\n");
    Ok(source)
}
