//! A compilation session: load, parse and check files, collecting
//! diagnostics along the way.

use std::path::Path;
use std::sync::Arc;

use kiln_diagnostic::{Context, Diagnostic, DiagnosticContainer, ErrorCode};
use kiln_ir::Document;
use kiln_parse::{scan, DirectiveRegistry, Item, Parser};
use kiln_source::{LoadError, SourceFile};
use tracing::{debug, warn};

use crate::cache::DocumentCache;
use crate::checks::{run_checks, Check, DEFAULT_CHECKS};
use crate::config::Config;

/// Driver state shared by every file of one invocation.
pub struct Session {
    config: Config,
    registry: DirectiveRegistry,
    checks: Vec<Check>,
    cache: DocumentCache,
    diagnostics: DiagnosticContainer,
}

impl Session {
    /// A session with the built-in directives and checks.
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, DirectiveRegistry::with_builtins())
    }

    pub fn with_registry(config: Config, registry: DirectiveRegistry) -> Self {
        Session {
            diagnostics: DiagnosticContainer::new(config.threshold),
            config,
            registry,
            checks: DEFAULT_CHECKS.to_vec(),
            cache: DocumentCache::new(),
        }
    }

    /// Replace the checks run after parsing.
    #[must_use]
    pub fn with_checks(mut self, checks: Vec<Check>) -> Self {
        self.checks = checks;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    pub fn diagnostics(&self) -> &DiagnosticContainer {
        &self.diagnostics
    }

    /// Whether a recorded diagnostic reached the configured threshold.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Record a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        let category = diagnostic.code.map(|code| code.category());
        if let Err(escalation) = self.diagnostics.add(diagnostic) {
            debug!(%escalation, ?category, "diagnostic reached threshold");
        }
    }

    /// Read `path`, reporting a failure.
    pub fn load(&mut self, path: &Path) -> Option<SourceFile> {
        match SourceFile::read(path) {
            Ok(file) => {
                debug!(file = %file.name(), lines = file.line_count(), "loaded");
                Some(file)
            }
            Err(error) => {
                warn!(%error, "load failed");
                self.report(load_error(error));
                None
            }
        }
    }

    /// Pre-scan `file` into terminals and directives.
    pub fn scan(&mut self, file: &SourceFile) -> Option<Vec<Item>> {
        match scan(file, &self.registry) {
            Ok(items) => Some(items),
            Err(diagnostic) => {
                self.report(diagnostic);
                None
            }
        }
    }

    /// Parse `file` and cache the document under its name.
    pub fn parse(&mut self, file: &SourceFile) -> Option<Arc<Document>> {
        let items = self.scan(file)?;
        match Parser::new(&items, file).document() {
            Ok(document) => {
                let document = Arc::new(document);
                if self
                    .cache
                    .insert(Arc::clone(file.name()), Arc::clone(&document))
                    .is_some()
                {
                    debug!(file = %file.name(), "replaced cached document");
                }
                Some(document)
            }
            Err(diagnostic) => {
                self.report(diagnostic);
                None
            }
        }
    }

    /// Run the session's checks, reporting the first failure.
    pub fn check(&mut self, document: &Document) -> bool {
        match run_checks(document, &self.checks) {
            Ok(()) => true,
            Err(diagnostic) => {
                self.report(diagnostic);
                false
            }
        }
    }

    /// Load, parse and, unless disabled, check `path`.
    pub fn compile(&mut self, path: &Path) -> Option<Arc<Document>> {
        let file = self.load(path)?;
        let document = self.parse(&file)?;
        if self.config.run_checks && !self.check(&document) {
            return None;
        }
        Some(document)
    }
}

fn load_error(error: LoadError) -> Diagnostic {
    match error {
        LoadError::Io { path, source } => Diagnostic::error(
            ErrorCode::E0001,
            format!("cannot read `{path}`"),
            Context::file_only(Arc::from(path.as_str())),
        )
        .with_note(source.to_string()),
    }
}
