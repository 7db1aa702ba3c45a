use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ropey::Rope;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidChangeWatchedFilesParams, DidChangeWatchedFilesRegistrationOptions,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, ExecuteCommandOptions,
    ExecuteCommandParams, FileSystemWatcher, GlobPattern, GotoDefinitionParams,
    GotoDefinitionResponse, Hover, HoverParams, HoverProviderCapability, InitializeParams,
    InitializeResult, InitializedParams, MessageType, OneOf, Registration, ServerCapabilities,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};

use comyaml::config::Settings;
use comyaml::registry::ComponentIndex;
use comyaml::{completion, gotodef, hover};

const RELOAD_COMMAND: &str = "comyaml.reload";

#[derive(Parser, Debug)]
#[command(version, about = "Component-aware language server for OIRF YAML scene files")]
struct Args {
    /// Communicate over stdio. This is the only supported transport; the
    /// flag exists because editors pass it unconditionally.
    #[arg(long)]
    stdio: bool,
}

struct Backend {
    client: Client,
    /// Open documents, full-sync'd by the client.
    documents: RwLock<HashMap<Url, Rope>>,
    /// The current index snapshot. Readers clone the Arc and work on that
    /// snapshot; a rebuild swaps the Arc only once the new index is
    /// complete, so no reader ever observes a half-built map.
    index: RwLock<Arc<ComponentIndex>>,
    settings: RwLock<Settings>,
    root_dir: RwLock<Option<PathBuf>>,
}

impl Backend {
    fn new(client: Client) -> Self {
        Self {
            client,
            documents: RwLock::new(HashMap::new()),
            index: RwLock::new(Arc::new(ComponentIndex::default())),
            settings: RwLock::new(Settings::default()),
            root_dir: RwLock::new(None),
        }
    }

    async fn index_snapshot(&self) -> Arc<ComponentIndex> {
        self.index.read().await.clone()
    }

    /// Full re-scan of the registry. A missing registry file is the one
    /// user-visible failure; it empties the index rather than keeping the
    /// previous snapshot, so a stale registry never serves stale answers.
    async fn rebuild_index(&self) {
        let Some(root_dir) = self.root_dir.read().await.clone() else {
            return;
        };
        let settings = self.settings.read().await.clone();

        self.client
            .log_message(MessageType::INFO, "Loading components...")
            .await;

        let snapshot = match ComponentIndex::build(&settings, &root_dir).await {
            Ok(index) => index,
            Err(err) => {
                let registry_path = settings.registry_path(&root_dir);
                self.client
                    .show_message(
                        MessageType::ERROR,
                        format!(
                            "Component registry not found at {}: {err}",
                            registry_path.display()
                        ),
                    )
                    .await;
                ComponentIndex::default()
            }
        };

        let count = snapshot.len();
        *self.index.write().await = Arc::new(snapshot);

        self.client
            .log_message(MessageType::INFO, format!("Indexed {count} components"))
            .await;
    }

    async fn document_lines(&self, uri: &Url) -> Option<Vec<String>> {
        let documents = self.documents.read().await;
        let rope = documents.get(uri)?;
        Some(
            rope.lines()
                .map(|line| line.to_string().trim_end_matches(['\n', '\r']).to_string())
                .collect(),
        )
    }

    /// Subscribe to change notifications for the resolved registry file.
    async fn watch_registry_file(&self) {
        let Some(root_dir) = self.root_dir.read().await.clone() else {
            return;
        };
        let registry_path = self.settings.read().await.registry_path(&root_dir);

        let options = DidChangeWatchedFilesRegistrationOptions {
            watchers: vec![FileSystemWatcher {
                glob_pattern: GlobPattern::String(registry_path.to_string_lossy().to_string()),
                kind: None,
            }],
        };
        let registration = Registration {
            id: "comyaml-registry-watch".to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: serde_json::to_value(options).ok(),
        };

        if let Err(err) = self.client.register_capability(vec![registration]).await {
            self.client
                .log_message(
                    MessageType::WARNING,
                    format!("Could not watch registry file: {err}"),
                )
                .await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(root_dir) = params.root_uri.as_ref().and_then(|uri| uri.to_file_path().ok()) {
            match Settings::new(&root_dir) {
                Ok(settings) => *self.settings.write().await = settings,
                Err(err) => {
                    self.client
                        .log_message(
                            MessageType::WARNING,
                            format!("Could not read settings, using defaults: {err}"),
                        )
                        .await;
                }
            }
            *self.root_dir.write().await = Some(root_dir);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![":".to_string(), " ".to_string()]),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![RELOAD_COMMAND.to_string()],
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.rebuild_index().await;
        self.watch_registry_file().await;
        self.client
            .log_message(MessageType::INFO, "comyaml initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents.write().await.insert(
            params.text_document.uri,
            Rope::from_str(&params.text_document.text),
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.last() {
            self.documents
                .write()
                .await
                .insert(params.text_document.uri.clone(), Rope::from_str(&change.text));
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.write().await.remove(&params.text_document.uri);
    }

    async fn did_change_watched_files(&self, _params: DidChangeWatchedFilesParams) {
        // The only watcher we register is the registry file itself, so any
        // event here means the component list may have changed.
        self.rebuild_index().await;
        self.client
            .show_message(
                MessageType::INFO,
                "Components reloaded due to registry file change.",
            )
            .await;
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        if params.command == RELOAD_COMMAND {
            self.client
                .show_message(MessageType::INFO, "Reloading components...")
                .await;
            self.rebuild_index().await;
            self.client
                .show_message(MessageType::INFO, "Components reloaded!")
                .await;
        }
        Ok(None)
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let Some(lines) = self.document_lines(uri).await else {
            return Ok(None);
        };

        let index = self.index_snapshot().await;
        let settings = self.settings.read().await.clone();

        Ok(completion::get_completions(&index, &params, &lines, &settings))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let Some(lines) = self.document_lines(uri).await else {
            return Ok(None);
        };

        let index = self.index_snapshot().await;
        let settings = self.settings.read().await.clone();

        Ok(hover::hover(&index, &params, &lines, &settings))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let Some(lines) = self.document_lines(uri).await else {
            return Ok(None);
        };

        let index = self.index_snapshot().await;
        let position = params.text_document_position_params.position;

        Ok(gotodef::goto_definition(&index, position, &lines).map(GotoDefinitionResponse::Scalar))
    }
}

#[tokio::main]
async fn main() {
    let _args = Args::parse();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
