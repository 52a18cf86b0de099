//! Tokenizer walk and per-keyword declaration readers.

use wirecheck_core::errors::ParseError;

use super::types::{Token, TokenKind, TokenStream};
use crate::scanner::{SourceScanner, TextRange, Word, DEFAULT_DELIMITERS};

const EXPOSING: &str = "exposing";

/// Tokenize `source`, returning declaration tokens only.
pub fn tokenize(source: &str) -> Vec<Token> {
    let scanner = SourceScanner::new(source);
    Tokenizer::new(&scanner).run().into_declarations()
}

/// A declaration found by the walk, before trivia is interleaved.
struct Declaration {
    kind: TokenKind,
    identifier: String,
    range: TextRange,
}

impl Declaration {
    fn new(kind: TokenKind, identifier: &str, start: usize, end: usize) -> Self {
        Self {
            kind,
            identifier: identifier.to_string(),
            range: TextRange::new(start, end),
        }
    }
}

pub struct Tokenizer<'a, 'src> {
    scanner: &'a SourceScanner<'src>,
    diagnostics: Vec<ParseError>,
}

impl<'a, 'src> Tokenizer<'a, 'src> {
    pub fn new(scanner: &'a SourceScanner<'src>) -> Self {
        Self {
            scanner,
            diagnostics: Vec::new(),
        }
    }

    /// Walk the file once and return the full token cover.
    pub fn run(mut self) -> TokenStream {
        let mut declarations = Vec::new();
        let mut cursor = 0;

        while let Some(word) = self.next_word(cursor) {
            match self.read_declaration(word) {
                Ok(Some(decl)) => {
                    cursor = decl.range.end.max(word.next_index);
                    declarations.push(decl);
                }
                Ok(None) => {
                    tracing::debug!(keyword = word.text, offset = word.start, "skipping unsupported declaration");
                    cursor = self.skip_block(word);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed declaration");
                    self.diagnostics.push(err);
                    cursor = self.skip_block(word);
                }
            }
        }

        if let Some(offset) = self.scanner.unterminated_comment() {
            self.diagnostics.push(ParseError::UnterminatedComment { offset });
        }

        let tokens = self.interleave_trivia(declarations);
        TokenStream {
            tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn read_declaration(&self, word: Word<'src>) -> Result<Option<Declaration>, ParseError> {
        match word.text {
            "module" => self.read_module(word.start, word.next_index).map(Some),
            "effect" | "port" => match self.next_word(word.next_index) {
                Some(next) if next.text == "module" => {
                    self.read_module(word.start, next.next_index).map(Some)
                }
                _ if word.text == "port" => self.read_port(word).map(Some),
                _ => self.read_function(word).map(Some),
            },
            "import" => self.read_import(word.start, word.next_index).map(Some),
            "type" => match self.next_word(word.next_index) {
                Some(next) if next.text == "alias" => {
                    self.read_type_alias(word.start, next.next_index).map(Some)
                }
                _ => self.read_type(word.start, word.next_index).map(Some),
            },
            "infix" => Ok(None),
            _ => self.read_function(word).map(Some),
        }
    }

    /// `module A exposing (..)`, `port module`, `effect module A where {..} exposing (..)`.
    /// Ends at the exposing list's closing paren, or at the bare name.
    fn read_module(&self, start: usize, after: usize) -> Result<Declaration, ParseError> {
        let name = self.expect_word(after, "module", "module name")?;
        let mut end = name.next_index;
        let mut next = self.next_word(end);

        if let Some(where_word) = next.filter(|w| w.text == "where") {
            let open = self
                .scanner
                .char_index(where_word.next_index, b'{', false)
                .ok_or_else(|| missing("module", "{", where_word.next_index))?;
            let close = self
                .scanner
                .matching_close(open, "{", "}", false)
                .ok_or_else(|| unbalanced("module", "{", open))?;
            end = close + 1;
            next = self.next_word(end);
        }

        if let Some(exposing) = next.filter(|w| is_exposing(w.text)) {
            end = self.exposing_close("module", exposing)? + 1;
        }

        Ok(Declaration::new(TokenKind::Module, name.text, start, end))
    }

    /// `import A.B as C exposing (x)`: ends at the exposing list, the alias,
    /// or the imported name.
    fn read_import(&self, start: usize, after: usize) -> Result<Declaration, ParseError> {
        let name = self.expect_word(after, "import", "module name")?;
        let mut end = name.next_index;
        let mut next = self.next_word(end);

        if let Some(as_word) = next.filter(|w| w.text == "as") {
            let alias = self.expect_word(as_word.next_index, "import", "alias")?;
            end = alias.next_index;
            next = self.next_word(end);
        }

        if let Some(exposing) = next.filter(|w| is_exposing(w.text)) {
            end = self.exposing_close("import", exposing)? + 1;
        }

        Ok(Declaration::new(TokenKind::Import, name.text, start, end))
    }

    fn read_port(&self, word: Word<'src>) -> Result<Declaration, ParseError> {
        let name = self.expect_word(word.next_index, "port", "port name")?;
        let block_end = self.scanner.end_of_block(word.start);
        let colon = self
            .scanner
            .code_char_index(name.next_index, block_end, b':')
            .ok_or_else(|| missing("port", ":", name.next_index))?;
        let end = self.scanner.end_of_block(colon);
        Ok(Declaration::new(TokenKind::Port, name.text, word.start, end))
    }

    /// Record aliases end at their matching `}`; anything else at end of block.
    fn read_type_alias(&self, start: usize, after: usize) -> Result<Declaration, ParseError> {
        let name = self.expect_word(after, "type alias", "type name")?;
        let eq = self.definition_equals(start, name.next_index, "type alias")?;
        let end = match self.next_word(eq + 1) {
            Some(body) if body.text.starts_with('{') => {
                self.scanner
                    .matching_close(body.start, "{", "}", false)
                    .ok_or_else(|| unbalanced("type alias", "{", body.start))?
                    + 1
            }
            _ => self.scanner.end_of_block(eq),
        };
        Ok(Declaration::new(TokenKind::TypeAlias, name.text, start, end))
    }

    fn read_type(&self, start: usize, after: usize) -> Result<Declaration, ParseError> {
        let name = self.expect_word(after, "type", "type name")?;
        let eq = self.definition_equals(start, name.next_index, "type")?;
        let end = self.scanner.end_of_block(eq);
        Ok(Declaration::new(TokenKind::Type, name.text, start, end))
    }

    /// A bare identifier: typed when followed by `:`, untyped otherwise.
    ///
    /// A typed function's token spans its signature and its definition. A
    /// signature with no definition directly after it becomes a token of its
    /// own and is left for the parser to reclassify.
    fn read_function(&self, word: Word<'src>) -> Result<Declaration, ParseError> {
        let typed = self
            .next_word(word.next_index)
            .is_some_and(|next| next.text.starts_with(':') && !next.text.starts_with("::"));

        if !typed {
            let eq = self.definition_equals(word.start, word.next_index, "function")?;
            let end = self.scanner.end_of_block(eq);
            return Ok(Declaration::new(TokenKind::UntypedFunction, word.text, word.start, end));
        }

        let signature_end = self.scanner.end_of_block(word.start);
        let definition = self
            .next_word(signature_end)
            .filter(|next| next.text == word.text);
        let end = match definition {
            Some(definition) => {
                let eq = self.definition_equals(definition.start, definition.next_index, "function")?;
                self.scanner.end_of_block(eq)
            }
            None => {
                tracing::debug!(name = word.text, "type signature without a definition");
                signature_end
            }
        };
        Ok(Declaration::new(TokenKind::TypedFunction, word.text, word.start, end))
    }

    /// The `=` of a declaration starting at `start`, searched from `from`
    /// within the declaration's block.
    fn definition_equals(&self, start: usize, from: usize, construct: &str) -> Result<usize, ParseError> {
        let block_end = self.scanner.end_of_block(start);
        self.scanner
            .code_char_index(from, block_end, b'=')
            .ok_or_else(|| missing(construct, "=", from))
    }

    /// Closing paren of the `exposing (...)` list that starts at `word`.
    fn exposing_close(&self, construct: &str, word: Word<'src>) -> Result<usize, ParseError> {
        let after_keyword = word.start + EXPOSING.len();
        let open = self
            .next_word(after_keyword)
            .filter(|w| w.text.starts_with('('))
            .map(|w| w.start)
            .ok_or_else(|| missing(construct, "(", after_keyword))?;
        self.scanner
            .matching_close(open, "(", ")", false)
            .ok_or_else(|| unbalanced(construct, "(", open))
    }

    fn skip_block(&self, word: Word<'src>) -> usize {
        self.scanner.end_of_block(word.start).max(word.next_index)
    }

    fn next_word(&self, index: usize) -> Option<Word<'src>> {
        self.scanner.word_at(index, true, DEFAULT_DELIMITERS)
    }

    fn expect_word(&self, index: usize, construct: &str, expected: &str) -> Result<Word<'src>, ParseError> {
        self.next_word(index)
            .ok_or_else(|| missing(construct, expected, index))
    }

    /// Build the full token list: declarations with comment, whitespace, and
    /// unparsed trivia filling every gap.
    fn interleave_trivia(&self, declarations: Vec<Declaration>) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(declarations.len() * 2 + 1);
        let mut cursor = 0;
        for decl in declarations {
            self.push_trivia(&mut tokens, cursor, decl.range.start);
            cursor = decl.range.end;
            tokens.push(self.make_token(decl.kind, decl.identifier, decl.range));
        }
        self.push_trivia(&mut tokens, cursor, self.scanner.len());
        tokens
    }

    fn push_trivia(&self, tokens: &mut Vec<Token>, from: usize, to: usize) {
        let comments = self.scanner.comment_ranges();
        let first = comments.partition_point(|c| c.from < from);
        let mut cursor = from;
        for comment in comments[first..].iter().take_while(|c| c.to < to) {
            if comment.from > cursor {
                self.push_gap(tokens, cursor, comment.from);
            }
            tokens.push(self.make_token(
                TokenKind::Comment,
                String::new(),
                TextRange::new(comment.from, comment.to + 1),
            ));
            cursor = comment.to + 1;
        }
        if cursor < to {
            self.push_gap(tokens, cursor, to);
        }
    }

    fn push_gap(&self, tokens: &mut Vec<Token>, from: usize, to: usize) {
        let range = TextRange::new(from, to);
        let kind = if self.scanner.slice(range).chars().all(char::is_whitespace) {
            TokenKind::Whitespace
        } else {
            TokenKind::Unparsed
        };
        tokens.push(self.make_token(kind, String::new(), range));
    }

    fn make_token(&self, kind: TokenKind, identifier: String, range: TextRange) -> Token {
        Token {
            kind,
            identifier,
            code: self.scanner.slice(range).to_string(),
            range,
            start: self.scanner.position(range.start),
            end: self.scanner.position(range.end),
        }
    }
}

fn is_exposing(word: &str) -> bool {
    word == EXPOSING || word.starts_with("exposing(")
}

fn missing(construct: &str, expected: &str, offset: usize) -> ParseError {
    ParseError::MissingTerminator {
        construct: construct.to_string(),
        expected: expected.to_string(),
        offset,
    }
}

fn unbalanced(construct: &str, open: &str, offset: usize) -> ParseError {
    ParseError::UnbalancedDelimiter {
        construct: construct.to_string(),
        open: open.to_string(),
        offset,
    }
}
