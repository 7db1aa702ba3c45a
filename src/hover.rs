//! Hover provider for component references in YAML scene files.
//!
//! Implements the LSP `textDocument/hover` capability: hovering a
//! `- type: Name` line shows the doc block extracted from `Name`'s module,
//! or the no-description sentinel when the module has none.
//!
//! Only the current line is inspected; there is no upward scan here. Hover
//! can be disabled via [`Settings::hover`].

use tower_lsp::lsp_types::{Hover, HoverContents, HoverParams, MarkupContent, MarkupKind};

use crate::{classifier, config::Settings, registry::ComponentIndex};

/// Generate hover content for the component named on the cursor line.
///
/// Returns `None` if hover is disabled, the line is not a component item,
/// or the named component is not in the current index snapshot.
pub fn hover(
    index: &ComponentIndex,
    params: &HoverParams,
    lines: &[String],
    settings: &Settings,
) -> Option<Hover> {
    if !settings.hover {
        return None;
    }

    let cursor_position = params.text_document_position_params.position;
    let line = lines.get(cursor_position.line as usize)?;

    let name = classifier::component_name_on_line(line)?;
    let component = index.get(&name)?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: component.description.clone(),
        }),
        range: None,
    })
}
