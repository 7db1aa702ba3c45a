//! Pattern-based extraction from the registry file and component modules.
//!
//! This is deliberately not a TypeScript parser. The component convention is
//! rigid enough that a handful of regexes recover everything the editor
//! needs; the known false-positive risk (the patterns firing inside strings
//! or dead code) is accepted.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel used when a component module carries no doc block.
pub const NO_DESCRIPTION: &str = "No description available";

/// `import Foo = require("./components/foo");` — only paths that pass
/// through a `/components/` segment count as component modules.
static IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import (\w+) = require\("(.*/components/[\w/]+)"\);"#).unwrap());

/// `@Register("Name")` — the marker that makes a module a component.
static REGISTER: Lazy<Regex> = Lazy::new(|| Regex::new(r#"@Register\("(.*?)"\)"#).unwrap());

/// First `/** ... */` block anywhere in the module.
static DOC_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/").unwrap());

/// `@type("typeName")` immediately followed (same or next line) by a field
/// declaration `ident:`.
static FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r#"@type\("(.*?)"\)\s*(\w+)\s*:"#).unwrap());

/// One typed field declaration, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub type_name: String,
}

/// What a single module declares, before the caller attaches its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDecl {
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldDecl>,
}

/// Extracts the module paths referenced by the registry file, resolved
/// against the registry file's own directory, in order of appearance.
/// Duplicates are preserved.
pub fn module_paths(registry_text: &str, registry_path: &Path) -> Vec<PathBuf> {
    let dir = registry_path.parent().unwrap_or_else(|| Path::new(""));

    IMPORT
        .captures_iter(registry_text)
        .map(|caps| {
            // "./components/foo" -> "components/foo", then resolve against
            // the registry directory and add the module extension.
            let target = caps[2].trim_start_matches("./").trim_start_matches('/');
            dir.join(format!("{target}.ts"))
        })
        .collect_vec()
}

/// Extracts the component a module declares, or `None` when the module has
/// no `@Register` marker. Total over its input: missing doc blocks fall back
/// to [`NO_DESCRIPTION`], missing fields to an empty list.
pub fn component_decl(module_text: &str) -> Option<ComponentDecl> {
    // First @Register wins when a module carries several.
    let name = REGISTER.captures(module_text)?[1].to_string();

    let description = DOC_BLOCK
        .captures(module_text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let fields = FIELD
        .captures_iter(module_text)
        .map(|caps| FieldDecl {
            name: caps[2].to_string(),
            type_name: caps[1].to_string(),
        })
        .collect_vec();

    Some(ComponentDecl {
        name,
        description,
        fields,
    })
}
