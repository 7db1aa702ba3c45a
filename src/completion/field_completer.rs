//! Component Field Completer
//!
//! Suggests the typed fields of the component governing the cursor line.
//!
//! ## Trigger Pattern
//! - the line is indented past the item marker (starts with whitespace)
//! - the line prefix is not itself a new `-` item
//! - the upward scan finds a `- type: Name` item before any blank line
//! - `Name` resolves in the current index snapshot
//!
//! Can be switched off with the `field_completions` setting.

use itertools::Itertools;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use crate::classifier;
use crate::registry::{ComponentMetadata, FieldDecl};

use super::{Completable, Completer, Context};

pub struct ComponentFieldCompleter<'a> {
    component: &'a ComponentMetadata,
}

impl<'a> Completer<'a> for ComponentFieldCompleter<'a> {
    fn construct(context: Context<'a>, line: usize, character: usize) -> Option<Self>
    where
        Self: Sized + Completer<'a>,
    {
        if !context.settings.field_completions {
            return None;
        }

        let line_text = context.lines.get(line)?;
        if !line_text.starts_with([' ', '\t']) {
            return None;
        }

        let prefix = line_text.chars().take(character).collect::<String>();
        if prefix.trim_start().starts_with('-') {
            return None;
        }

        if !classifier::is_within_component_field_block(context.lines, line) {
            return None;
        }

        let name = classifier::governing_component_name(context.lines, line)?;
        let component = context.index.get(&name)?;

        Some(Self { component })
    }

    fn completions(&self) -> Vec<impl Completable<'a, Self>>
    where
        Self: Sized,
    {
        self.component.fields.iter().collect_vec()
    }
}

impl<'a> Completable<'a, ComponentFieldCompleter<'a>> for &'a FieldDecl {
    fn completions(&self, _completer: &ComponentFieldCompleter<'a>) -> Option<CompletionItem> {
        Some(CompletionItem {
            label: self.name.clone(),
            kind: Some(CompletionItemKind::FIELD),
            detail: Some(self.type_name.clone()),
            ..Default::default()
        })
    }
}
