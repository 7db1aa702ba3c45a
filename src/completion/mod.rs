use tower_lsp::lsp_types::{CompletionItem, CompletionList, CompletionParams, CompletionResponse};

use crate::{config::Settings, registry::ComponentIndex};

use self::component_completer::ComponentNameCompleter;
use self::field_completer::ComponentFieldCompleter;

mod component_completer;
mod field_completer;

#[derive(Clone, Copy)]
pub struct Context<'a> {
    index: &'a ComponentIndex,
    lines: &'a [String],
    settings: &'a Settings,
}

pub trait Completer<'a>: Sized {
    fn construct(context: Context<'a>, line: usize, character: usize) -> Option<Self>
    where
        Self: Sized + Completer<'a>;

    fn completions(&self) -> Vec<impl Completable<'a, Self>>
    where
        Self: Sized;
}

pub trait Completable<'a, T: Completer<'a>>: Sized {
    fn completions(&self, completer: &T) -> Option<CompletionItem>;
}

/// Returning `None` means the provider declines to contribute at this
/// position, which the editor treats differently from an empty list.
pub fn get_completions(
    index: &ComponentIndex,
    params: &CompletionParams,
    lines: &[String],
    config: &Settings,
) -> Option<CompletionResponse> {
    let completion_context = Context {
        index,
        lines,
        settings: config,
    };

    run_completer::<ComponentNameCompleter>(
        completion_context,
        params.text_document_position.position.line,
        params.text_document_position.position.character,
    )
    .or_else(|| {
        run_completer::<ComponentFieldCompleter>(
            completion_context,
            params.text_document_position.position.line,
            params.text_document_position.position.character,
        )
    })
}

fn run_completer<'a, T: Completer<'a>>(
    context: Context<'a>,
    line: u32,
    character: u32,
) -> Option<CompletionResponse> {
    let completer = T::construct(context, line as usize, character as usize)?;
    let completions = completer.completions();

    let completions = completions
        .into_iter()
        .flat_map(|completable| completable.completions(&completer))
        .collect::<Vec<CompletionItem>>();

    Some(CompletionResponse::List(CompletionList {
        is_incomplete: true,
        items: completions,
    }))
}
