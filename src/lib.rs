//! comyaml: component-aware editing assistance for OIRF YAML scene files
//!
//! OIRF scenes reference gameplay components by name inside a `components:`
//! block. This crate discovers which components exist by scanning the
//! project's registry file (`LoadClasses.ts` by convention), extracts each
//! component's name, doc block and typed fields from its module, and serves
//! that index to the editor.
//!
//! # Overview
//!
//! - **Component Registry**: regex-based discovery and indexing of
//!   `@Register`-annotated modules
//! - **Autocomplete**: component names on `- type:` lines, field names
//!   inside an item's block
//! - **Hover**: the component's doc block on its item line
//! - **Go-to-definition**: jump from `- type: Name` to the declaring module
//!
//! # Architecture
//!
//! The crate is organized around several key modules:
//!
//! - [`registry`]: extraction pipeline and the name-keyed component index
//! - [`classifier`]: pure positional predicates over document lines
//! - [`completion`]: the two completion providers
//! - [`config`]: configuration management and settings
//!
//! The index is rebuilt wholesale on every trigger (startup, the reload
//! command, a change to the registry file); queries read whichever snapshot
//! is current when they run.

// Core modules - component discovery and indexing
pub mod registry;

// LSP feature modules
pub mod completion;
pub mod gotodef;
pub mod hover;

// Configuration and line classification
pub mod classifier;
pub mod config;

// Test utilities (only available in test builds)
#[cfg(test)]
pub mod test_utils;
