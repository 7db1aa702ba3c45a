//! Component Name Completer
//!
//! Suggests every indexed component when the cursor sits on a `- type:`
//! item line inside a `components:` block.
//!
//! ## Trigger Pattern
//! - the line prefix up to the cursor, trimmed, starts with `- type:`
//! - the upward scan finds a `components:` header before any blank line
//!
//! Anywhere else the completer declines, leaving the position to other
//! providers.

use itertools::Itertools;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, MarkupContent, MarkupKind,
};

use crate::classifier::{self, COMPONENT_ITEM_PREFIX};
use crate::registry::{ComponentIndex, ComponentMetadata};

use super::{Completable, Completer, Context};

pub struct ComponentNameCompleter<'a> {
    index: &'a ComponentIndex,
}

impl<'a> Completer<'a> for ComponentNameCompleter<'a> {
    fn construct(context: Context<'a>, line: usize, character: usize) -> Option<Self>
    where
        Self: Sized + Completer<'a>,
    {
        let line_text = context.lines.get(line)?;
        let prefix = line_text.chars().take(character).collect::<String>();

        if !prefix.trim().starts_with(COMPONENT_ITEM_PREFIX) {
            return None;
        }
        if !classifier::is_within_components_block(context.lines, line) {
            return None;
        }

        Some(Self {
            index: context.index,
        })
    }

    fn completions(&self) -> Vec<impl Completable<'a, Self>>
    where
        Self: Sized,
    {
        self.index.components().collect_vec()
    }
}

impl<'a> Completable<'a, ComponentNameCompleter<'a>> for &'a ComponentMetadata {
    fn completions(&self, _completer: &ComponentNameCompleter<'a>) -> Option<CompletionItem> {
        Some(CompletionItem {
            label: self.name.clone(),
            kind: Some(CompletionItemKind::CLASS),
            detail: Some("Component".to_string()),
            documentation: Some(Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: self.description.clone(),
            })),
            ..Default::default()
        })
    }
}
