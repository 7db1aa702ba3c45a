//! The component registry: discovery, metadata extraction, and the
//! in-memory index the editing features query.
//!
//! A build is always a full re-scan: read the registry file, resolve the
//! module paths it imports, extract each module's component declaration,
//! and assemble a fresh name-keyed index. Nothing is mutated in place; the
//! caller swaps the finished snapshot into its cache.

pub mod extract;

pub use extract::{ComponentDecl, FieldDecl, NO_DESCRIPTION};

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Settings;

/// Everything the editor knows about one discovered component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMetadata {
    /// Unique key within one index snapshot.
    pub name: String,
    /// Absolute path of the module that declared the component. Used for
    /// navigation only; never re-validated after the build.
    pub source_path: PathBuf,
    /// Doc block text, or [`NO_DESCRIPTION`] when the module has none.
    pub description: String,
    /// Typed fields in declaration order, duplicates preserved.
    pub fields: Vec<FieldDecl>,
}

/// Immutable mapping from component name to metadata. One snapshot per
/// build; queries always read a whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentIndex {
    components: HashMap<String, ComponentMetadata>,
}

impl ComponentIndex {
    /// Builds a fresh index from the registry file under `root_dir`.
    ///
    /// Module files that are missing on disk are skipped silently, and
    /// modules without an `@Register` marker contribute nothing. On a name
    /// collision the later-listed module wins, so registry import order is
    /// the tie-break. The only error is a registry file that cannot be
    /// read; callers are expected to surface that to the user and fall
    /// back to an empty index rather than keep stale data.
    pub async fn build(settings: &Settings, root_dir: &Path) -> Result<ComponentIndex, io::Error> {
        let registry_path = settings.registry_path(root_dir);
        let registry_text = tokio::fs::read_to_string(&registry_path).await?;

        let mut components = HashMap::new();
        for module_path in extract::module_paths(&registry_text, &registry_path) {
            let Ok(module_text) = tokio::fs::read_to_string(&module_path).await else {
                continue;
            };
            if let Some(decl) = extract::component_decl(&module_text) {
                components.insert(
                    decl.name.clone(),
                    ComponentMetadata {
                        name: decl.name,
                        source_path: module_path,
                        description: decl.description,
                        fields: decl.fields,
                    },
                );
            }
        }

        Ok(ComponentIndex { components })
    }

    pub fn get(&self, name: &str) -> Option<&ComponentMetadata> {
        self.components.get(name)
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentMetadata> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
