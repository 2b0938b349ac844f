//! Byte-at-a-time parser for declaration files.
//!
//! The grammar is
//!
//! ```text
//! projects { name name ... }
//! workspace alias -> /path { name name ... }
//! ```
//!
//! where the block after a workspace path is optional and a `#` at a word
//! boundary starts a comment running to the end of the line. Braces are
//! structural everywhere, comments included, so `# }` still closes a block.
//! Two independent state variables
//! drive the parser: the [`LexicalState`] decides whether a byte extends the
//! current word and the [`GrammarMode`] decides what a finished word means.
//! Both survive line breaks since declarations may span several lines.
//!
//! Input outside the grammar is never rejected here. Each violation is
//! recorded as a [`Diagnostic`] and parsing continues; callers choose what
//! to do with them.

use tracing::{debug, trace};

use super::consumer::DeclarationConsumer;
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::token::Token;

pub const PROJECTS_KEYWORD: &str = "projects";
pub const WORKSPACE_KEYWORD: &str = "workspace";
pub const POINTER_OPERATOR: &str = "->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalState {
    Idle,
    Comment,
    Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarMode {
    /// Between declarations.
    Control,
    /// After `projects`, waiting for `{`.
    Proj,
    /// Inside the default project block.
    ProjTuple,
    /// After `workspace`, waiting for the alias.
    Workspace,
    /// After the alias, waiting for `->`.
    WAlias,
    /// After `->`, waiting for the path.
    WPointer,
    /// After the path; an optional `{` may follow.
    WPath,
    /// Inside a workspace project block.
    WTuple,
}

/// Streaming declaration parser emitting events into a [`DeclarationConsumer`].
#[derive(Debug)]
pub struct DeclarationParser<C> {
    consumer: C,
    lexical: LexicalState,
    mode: GrammarMode,
    token: Token,
    alias: Token,
    line: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<C: DeclarationConsumer> DeclarationParser<C> {
    pub fn new(consumer: C) -> Self {
        Self {
            consumer,
            lexical: LexicalState::Idle,
            mode: GrammarMode::Control,
            token: Token::new(),
            alias: Token::new(),
            line: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Processes one byte and returns the first violation it revealed, if any.
    pub fn process_byte(&mut self, byte: u8) -> Option<Diagnostic> {
        let reported = self.diagnostics.len();

        match byte {
            b'\n' => {
                self.finalize_pending();
                self.lexical = LexicalState::Idle;
                self.line += 1;
            }
            b'{' | b'}' if self.lexical == LexicalState::Comment => {
                self.report(DiagnosticKind::BraceInComment(char::from(byte)));
                if byte == b'{' {
                    self.open_block();
                } else {
                    self.close_block();
                }
            }
            _ if self.lexical == LexicalState::Comment => {}
            b' ' | b'\t' => self.finalize_pending(),
            b'#' if self.lexical == LexicalState::Idle => self.lexical = LexicalState::Comment,
            b'#' => self.report(DiagnosticKind::HashInsideWord),
            b'{' => {
                self.finalize_pending();
                self.open_block();
            }
            b'}' => {
                self.finalize_pending();
                self.close_block();
            }
            0x21..=0x7e => {
                if self.lexical == LexicalState::Idle {
                    self.token.clear();
                    self.lexical = LexicalState::Token;
                }
                let already_truncated = self.token.is_truncated();
                if !self.token.push(byte) && !already_truncated {
                    self.report(DiagnosticKind::TokenTooLong);
                }
            }
            // Line endings may be CRLF; UTF-8 continuation bytes follow an
            // already reported lead byte.
            b'\r' | 0x80..=0xbf => {}
            _ => self.report(DiagnosticKind::UnexpectedByte(byte)),
        }

        self.diagnostics.get(reported).cloned()
    }

    /// Processes a chunk of input.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.process_byte(byte);
        }
    }

    /// Signals the end of the stream.
    ///
    /// A word still being read is finalized. Ending inside a block or a
    /// partial declaration is reported; a workspace without a block is
    /// complete.
    pub fn finish(&mut self) -> Option<Diagnostic> {
        let reported = self.diagnostics.len();

        self.finalize_pending();
        self.lexical = LexicalState::Idle;
        match self.mode {
            GrammarMode::Control | GrammarMode::WPath => {}
            _ => self.report(DiagnosticKind::UnexpectedEndOfInput),
        }
        self.set_mode(GrammarMode::Control);

        self.diagnostics.get(reported).cloned()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Current line, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn mode(&self) -> GrammarMode {
        self.mode
    }

    pub fn lexical_state(&self) -> LexicalState {
        self.lexical
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn into_parts(self) -> (C, Vec<Diagnostic>) {
        (self.consumer, self.diagnostics)
    }

    fn finalize_pending(&mut self) {
        if self.lexical == LexicalState::Token {
            self.lexical = LexicalState::Idle;
            self.finalize();
        }
    }

    fn finalize(&mut self) {
        trace!(token = self.token.as_str(), mode = ?self.mode, line = self.line, "token");

        match self.mode {
            GrammarMode::Control => self.dispatch_keyword(),
            GrammarMode::Proj => {
                self.report(DiagnosticKind::UnexpectedToken(self.token.as_str().to_string()))
            }
            GrammarMode::ProjTuple => self.consumer.add_project(self.token.as_str()),
            GrammarMode::Workspace => {
                self.alias.copy_from(&self.token);
                self.set_mode(GrammarMode::WAlias);
            }
            GrammarMode::WAlias => {
                if self.token == *POINTER_OPERATOR {
                    self.set_mode(GrammarMode::WPointer);
                } else {
                    self.report(DiagnosticKind::MissingPointer {
                        alias: self.alias.as_str().to_string(),
                        found: self.token.as_str().to_string(),
                    });
                    self.set_mode(GrammarMode::Control);
                }
            }
            GrammarMode::WPointer => {
                self.consumer
                    .add_workspace(self.alias.as_str(), self.token.as_str());
                self.set_mode(GrammarMode::WPath);
            }
            GrammarMode::WPath => {
                // No block followed the path; the word starts a new declaration.
                self.set_mode(GrammarMode::Control);
                self.dispatch_keyword();
            }
            GrammarMode::WTuple => self
                .consumer
                .add_workspace_project(self.alias.as_str(), self.token.as_str()),
        }
    }

    fn dispatch_keyword(&mut self) {
        if self.token == *PROJECTS_KEYWORD {
            self.set_mode(GrammarMode::Proj);
        } else if self.token == *WORKSPACE_KEYWORD {
            self.set_mode(GrammarMode::Workspace);
        } else {
            self.report(DiagnosticKind::UnknownKeyword(
                self.token.as_str().to_string(),
            ));
        }
    }

    fn open_block(&mut self) {
        match self.mode {
            GrammarMode::Proj => self.set_mode(GrammarMode::ProjTuple),
            GrammarMode::WPath => self.set_mode(GrammarMode::WTuple),
            _ => self.report(DiagnosticKind::UnexpectedToken("{".to_string())),
        }
    }

    fn close_block(&mut self) {
        if !matches!(self.mode, GrammarMode::ProjTuple | GrammarMode::WTuple) {
            self.report(DiagnosticKind::UnexpectedToken("}".to_string()));
        }
        self.set_mode(GrammarMode::Control);
    }

    fn set_mode(&mut self, mode: GrammarMode) {
        if self.mode != mode {
            debug!(from = ?self.mode, to = ?mode, line = self.line, "grammar mode");
            self.mode = mode;
        }
    }

    fn report(&mut self, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(self.line, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::declaration::DeclarationEvent;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> (Vec<DeclarationEvent>, Vec<Diagnostic>) {
        let mut parser = DeclarationParser::new(Vec::new());
        parser.feed(input.as_bytes());
        parser.finish();
        parser.into_parts()
    }

    fn events(input: &str) -> Vec<DeclarationEvent> {
        let (events, diagnostics) = parse(input);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        events
    }

    #[test]
    fn test_default_projects_and_workspace() {
        assert_eq!(
            events("projects { a b } workspace w1 -> /p {}"),
            vec![
                DeclarationEvent::project("a"),
                DeclarationEvent::project("b"),
                DeclarationEvent::workspace("w1", "/p"),
            ]
        );
    }

    #[test]
    fn test_multiline_declarations() {
        let input = "\
projects {
\tstrawberry
\treader
}

workspace w1 -> /home/me/src {
  game
  reader
}
";
        assert_eq!(
            events(input),
            vec![
                DeclarationEvent::project("strawberry"),
                DeclarationEvent::project("reader"),
                DeclarationEvent::workspace("w1", "/home/me/src"),
                DeclarationEvent::workspace_project("w1", "game"),
                DeclarationEvent::workspace_project("w1", "reader"),
            ]
        );
    }

    #[test]
    fn test_braces_delimit_tokens() {
        assert_eq!(
            events("projects{a}workspace w1 -> /p{c d}"),
            vec![
                DeclarationEvent::project("a"),
                DeclarationEvent::workspace("w1", "/p"),
                DeclarationEvent::workspace_project("w1", "c"),
                DeclarationEvent::workspace_project("w1", "d"),
            ]
        );
    }

    #[test]
    fn test_workspace_without_block() {
        let input = "workspace w1 -> /p\nworkspace w2 -> /q\nprojects { a }\n";
        assert_eq!(
            events(input),
            vec![
                DeclarationEvent::workspace("w1", "/p"),
                DeclarationEvent::workspace("w2", "/q"),
                DeclarationEvent::project("a"),
            ]
        );
    }

    #[test]
    fn test_hash_inside_word_is_dropped() {
        let (events, diagnostics) = parse("projects { foo#bar }\n");
        assert_eq!(events, vec![DeclarationEvent::project("foobar")]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(1, DiagnosticKind::HashInsideWord)]
        );
    }

    #[test]
    fn test_comment_ignores_keywords() {
        let input = "# workspace w9 -> /nowhere\nprojects # default set\n{ a } # trailing\n";
        assert_eq!(events(input), vec![DeclarationEvent::project("a")]);
    }

    #[test]
    fn test_closing_brace_in_comment_closes_block() {
        let (events, diagnostics) = parse("projects {\n  a # old }\n  b\n}\n");
        assert_eq!(events, vec![DeclarationEvent::project("a")]);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::new(2, DiagnosticKind::BraceInComment('}')),
                Diagnostic::new(3, DiagnosticKind::UnknownKeyword("b".to_string())),
                Diagnostic::new(4, DiagnosticKind::UnexpectedToken("}".to_string())),
            ]
        );
    }

    #[test]
    fn test_opening_brace_in_comment_opens_block() {
        let mut parser = DeclarationParser::new(Vec::new());
        parser.feed(b"workspace w1 -> /p # {\n  reader\n}\n");
        assert_eq!(parser.lexical_state(), LexicalState::Idle);
        parser.finish();

        let (events, diagnostics) = parser.into_parts();
        assert_eq!(
            events,
            vec![
                DeclarationEvent::workspace("w1", "/p"),
                DeclarationEvent::workspace_project("w1", "reader"),
            ]
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(1, DiagnosticKind::BraceInComment('{'))]
        );
    }

    #[test]
    fn test_non_ascii_outside_comments_is_reported() {
        let (events, diagnostics) = parse("projects { café } # déjà vu\n");
        assert_eq!(events, vec![DeclarationEvent::project("caf")]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(1, DiagnosticKind::UnexpectedByte(0xc3))]
        );

        let (events, diagnostics) = parse("projects { a\x07b }");
        assert_eq!(events, vec![DeclarationEvent::project("ab")]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(1, DiagnosticKind::UnexpectedByte(0x07))]
        );
    }

    #[test]
    fn test_carriage_returns_are_ignored() {
        assert_eq!(
            events("projects {\r\n  a\r\n}\r\n"),
            vec![DeclarationEvent::project("a")]
        );
    }

    #[test]
    fn test_split_feeds_match_whole_input() {
        let input = "projects { alpha beta }\nworkspace home -> /home/me { gamma }\n";
        let expected = events(input);

        for split in 0..input.len() {
            let mut parser = DeclarationParser::new(Vec::new());
            let (head, tail) = input.as_bytes().split_at(split);
            parser.feed(head);
            parser.feed(tail);
            parser.finish();
            let (events, diagnostics) = parser.into_parts();
            assert_eq!(events, expected, "split at {split}");
            assert!(diagnostics.is_empty());
        }
    }

    #[test]
    fn test_unknown_keyword_is_reported_and_skipped() {
        let (events, diagnostics) = parse("project { a }\nprojects { b }");
        assert_eq!(events, vec![DeclarationEvent::project("b")]);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::new(1, DiagnosticKind::UnknownKeyword("project".to_string())),
                Diagnostic::new(1, DiagnosticKind::UnexpectedToken("{".to_string())),
                Diagnostic::new(1, DiagnosticKind::UnknownKeyword("a".to_string())),
                Diagnostic::new(1, DiagnosticKind::UnexpectedToken("}".to_string())),
            ]
        );
    }

    #[test]
    fn test_missing_pointer_emits_no_workspace() {
        let (events, diagnostics) = parse("workspace w1 /p\n");
        assert!(events.is_empty());
        assert_eq!(
            diagnostics[0],
            Diagnostic::new(
                1,
                DiagnosticKind::MissingPointer {
                    alias: "w1".to_string(),
                    found: "/p".to_string(),
                }
            )
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_parsing_resumes_after_missing_pointer() {
        let (events, diagnostics) = parse("workspace w1 /p\nworkspace w2 -> /q { a }\n");
        assert_eq!(
            events,
            vec![
                DeclarationEvent::workspace("w2", "/q"),
                DeclarationEvent::workspace_project("w2", "a"),
            ]
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_process_byte_returns_diagnostic() {
        let mut parser = DeclarationParser::new(Vec::new());
        for byte in b"\n\nbogus" {
            assert_eq!(parser.process_byte(*byte), None);
        }
        let diagnostic = parser.process_byte(b' ');
        assert_eq!(
            diagnostic,
            Some(Diagnostic::new(3, DiagnosticKind::UnknownKeyword("bogus".to_string())))
        );
        assert_eq!(parser.line(), 3);
    }

    #[test]
    fn test_unterminated_block_reported_on_finish() {
        let mut parser = DeclarationParser::new(Vec::new());
        parser.feed(b"projects { a b");
        assert_eq!(parser.mode(), GrammarMode::ProjTuple);
        assert_eq!(parser.lexical_state(), LexicalState::Token);

        let diagnostic = parser.finish();
        assert_eq!(
            diagnostic.map(|d| d.kind),
            Some(DiagnosticKind::UnexpectedEndOfInput)
        );
        assert_eq!(
            parser.consumer(),
            &vec![DeclarationEvent::project("a"), DeclarationEvent::project("b")]
        );
    }

    #[test]
    fn test_long_token_is_truncated_once() {
        let word = "x".repeat(MAX + 10);
        let (events, diagnostics) = parse(&format!("projects {{ {word} }}"));
        assert_eq!(events, vec![DeclarationEvent::project(&word[..MAX])]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(1, DiagnosticKind::TokenTooLong)]
        );
    }

    const MAX: usize = crate::domain::declaration::token::MAX_TOKEN_LEN;
}
