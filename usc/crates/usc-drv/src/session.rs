//! Compilation session.
//!
//! A [`Session`] owns the loaded sources and the diagnostic [`Handler`].
//! Files are lexed independently on a rayon pool; their errors are merged
//! into the handler afterwards, in file order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;
use usc_lex::{LexError, Lexer, PositionMode, Token};
use usc_util::{FileId, Handler, SourceSnippet};

use crate::config::Config;
use crate::error::{DriverError, Result};

/// A loaded source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path the file was requested as.
    pub path: PathBuf,
    /// Display name used in output and diagnostics.
    pub name: String,
    /// Raw file contents.
    pub content: Vec<u8>,
}

/// All sources of a session, addressed by [`FileId`].
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and returns its id.
    pub fn add(&mut self, path: PathBuf, content: Vec<u8>) -> FileId {
        let id = FileId::new(self.files.len());
        let name = path.display().to_string();
        self.files.push(SourceFile {
            path,
            name,
            content,
        });
        id
    }

    /// Looks up a file.
    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    /// Display name of a file, or `<unknown>`.
    pub fn name(&self, id: FileId) -> &str {
        self.get(id).map_or("<unknown>", |f| f.name.as_str())
    }

    /// Iterates files in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| (FileId::new(i), f))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no file was added.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Settings that affect how a session lexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Position tracking for every file.
    pub position_mode: PositionMode,
    /// Worker threads used by [`Session::lex`].
    pub jobs: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            position_mode: PositionMode::ColumnOnly,
            jobs: 1,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            position_mode: config.lexer.position_mode.into(),
            jobs: config.driver.jobs.max(1) as usize,
        }
    }
}

/// Tokens and errors of one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// File the tokens belong to.
    pub file_id: FileId,
    /// Every token up to, not including, end of input.
    pub tokens: Vec<Token>,
    /// Errors in source order.
    pub errors: Vec<LexError>,
}

impl FileReport {
    /// Returns true if the file had lexical errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Holds the state of one driver run.
pub struct Session {
    options: SessionOptions,
    sources: SourceMap,
    handler: Handler,
}

impl Session {
    /// Creates an empty session.
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            sources: SourceMap::new(),
            handler: Handler::new(),
        }
    }

    /// Reads every path into the session, stopping at the first failure.
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        for path in paths {
            let path = path.as_ref();
            let content = std::fs::read(path).map_err(|source| DriverError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            debug!("loaded {} ({} bytes)", path.display(), content.len());
            self.add_source(path, content);
        }
        Ok(())
    }

    /// Adds in-memory source text.
    pub fn add_source(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> FileId {
        self.sources.add(path.into(), content.into())
    }

    /// The loaded sources.
    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// The diagnostics collected by [`Session::report`].
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The session settings.
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Lexes every file to end of input.
    ///
    /// Reports come back in load order whatever the number of jobs.
    pub fn lex(&self) -> Result<Vec<FileReport>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.jobs.max(1))
            .build()
            .map_err(|e| DriverError::ThreadPool(e.to_string()))?;

        let files = &self.sources.files;
        let mode = self.options.position_mode;
        debug!("lexing {} file(s) on {} thread(s)", files.len(), pool.current_num_threads());

        Ok(pool.install(|| {
            files
                .par_iter()
                .enumerate()
                .map(|(i, file)| lex_file(FileId::new(i), file, mode))
                .collect::<Vec<_>>()
        }))
    }

    /// Turns the errors of `reports` into diagnostics with source snippets.
    pub fn report(&self, reports: &[FileReport]) {
        for report in reports {
            let Some(file) = self.sources.get(report.file_id) else {
                continue;
            };
            self.handler.extend(report.errors.iter().map(|error| {
                let diagnostic = error.to_diagnostic();
                match SourceSnippet::from_source(&file.content, error.span) {
                    Some(snippet) => diagnostic.with_snippet(snippet),
                    None => diagnostic,
                }
            }));
        }
    }

    /// Renders every collected diagnostic, prefixed with its file name.
    pub fn render_diagnostics(&self) -> Vec<String> {
        self.handler
            .diagnostics()
            .iter()
            .map(|d| d.render(self.sources.name(d.span.file_id)))
            .collect()
    }
}

fn lex_file(file_id: FileId, file: &SourceFile, mode: PositionMode) -> FileReport {
    let mut errors = Vec::new();
    let mut tokens = Vec::new();
    {
        let lexer = Lexer::with_callback(file.name.as_str(), &file.content, |e: &LexError| {
            errors.push(e.clone())
        })
        .with_position_mode(mode)
        .with_file_id(file_id);
        tokens.extend(lexer);
    }
    debug!(
        "{}: {} token(s), {} error(s)",
        file.name,
        tokens.len(),
        errors.len()
    );
    FileReport {
        file_id,
        tokens,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usc_lex::{LexErrorKind, TokenKind};

    fn session_with(sources: &[(&str, &str)], options: SessionOptions) -> Session {
        let mut session = Session::new(options);
        for (name, text) in sources {
            session.add_source(*name, text.as_bytes());
        }
        session
    }

    #[test]
    fn test_source_map_ids() {
        let mut map = SourceMap::new();
        assert!(map.is_empty());
        let a = map.add(PathBuf::from("a.us"), b"a".to_vec());
        let b = map.add(PathBuf::from("b.us"), b"b".to_vec());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(map.len(), 2);
        assert_eq!(map.name(b), "b.us");
        assert_eq!(map.name(FileId::new(9)), "<unknown>");
    }

    #[test]
    fn test_lex_excludes_eof() {
        let session = session_with(&[("a.us", "var a = 1;")], SessionOptions::default());
        let reports = session.lex().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].tokens.len(), 5);
        assert!(reports[0].tokens.iter().all(|t| t.kind != TokenKind::Eof));
        assert!(!reports[0].has_errors());
    }

    #[test]
    fn test_lex_keeps_file_order_in_parallel() {
        let names: Vec<String> = (0..16).map(|i| format!("f{}.us", i)).collect();
        let bodies: Vec<String> = (0..16).map(|i| "x ".repeat(i + 1)).collect();
        let sources: Vec<(&str, &str)> = names
            .iter()
            .zip(&bodies)
            .map(|(n, b)| (n.as_str(), b.as_str()))
            .collect();
        let options = SessionOptions {
            jobs: 4,
            ..SessionOptions::default()
        };
        let reports = session_with(&sources, options).lex().unwrap();
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.file_id.index(), i);
            assert_eq!(report.tokens.len(), i + 1);
            assert!(report.tokens.iter().all(|t| t.span.file_id.index() == i));
        }
    }

    #[test]
    fn test_lex_uses_position_mode() {
        let options = SessionOptions {
            position_mode: PositionMode::LineColumn,
            ..SessionOptions::default()
        };
        let reports = session_with(&[("a.us", "a\n  b")], options).lex().unwrap();
        let second = &reports[0].tokens[1];
        assert_eq!((second.line(), second.column()), (2, 3));
    }

    #[test]
    fn test_report_renders_with_file_names() {
        let session = session_with(
            &[("ok.us", "var a;"), ("bad.us", "var b = 1__0;")],
            SessionOptions::default(),
        );
        let reports = session.lex().unwrap();
        assert!(!reports[0].has_errors());
        assert_eq!(reports[1].errors[0].kind, LexErrorKind::InvalidInteger);

        session.report(&reports);
        assert_eq!(session.handler().error_count(), 1);

        let rendered = session.render_diagnostics();
        assert_eq!(rendered.len(), 1);
        let first_line = rendered[0].lines().next().unwrap();
        assert_eq!(first_line, "bad.us:1:9: error[E0103]: Invalid integer literal");
        assert!(rendered[0].contains("1 | var b = 1__0;"));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let mut session = Session::new(SessionOptions::default());
        let err = session.load_files(&["/nonexistent/file.us"]).unwrap_err();
        assert!(matches!(err, DriverError::Read { .. }));
        assert!(session.sources().is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.lexer.position_mode = crate::config::PositionSetting::LineColumn;
        config.driver.jobs = 3;
        let options = SessionOptions::from(&config);
        assert_eq!(options.position_mode, PositionMode::LineColumn);
        assert_eq!(options.jobs, 3);
    }
}
