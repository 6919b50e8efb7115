//! Lexer implementation

use super::token::*;
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexer for permission clause strings.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    column: usize,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            column: 1,
            pos: 0,
        }
    }

    /// Tokenize the entire source. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    /// The source this lexer reads from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start_pos = self.pos;
        let start_col = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some('=') => {
                self.advance();
                TokenKind::Eq
            }
            Some(',') => {
                self.advance();
                TokenKind::Comma
            }
            Some(_) => self.scan_word(),
        };

        Token {
            kind,
            span: Span {
                start: start_pos,
                end: self.pos,
                column: start_col,
            },
        }
    }

    /// Scan a word. Whitespace between word characters is dropped, so
    /// `Diamond Sword` becomes the single word `DiamondSword`.
    fn scan_word(&mut self) -> TokenKind {
        let mut word = String::new();

        while let Some(c) = self.peek_char() {
            match c {
                '=' | ',' => break,
                c if c.is_whitespace() => {
                    // Only continue if more word characters follow the run.
                    let next = self.chars.clone().map(|(_, c)| c).find(|c| !c.is_whitespace());
                    match next {
                        Some(next) if next != '=' && next != ',' => self.skip_whitespace(),
                        _ => break,
                    }
                }
                c => {
                    word.push(c);
                    self.advance();
                }
            }
        }

        TokenKind::Word(word)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((i, c)) = self.chars.next() {
            self.pos = i + c.len_utf8();
            self.column += 1;
            Some(c)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().into_iter().map(|t| t.kind).collect()
    }

    fn word(w: &str) -> TokenKind {
        TokenKind::Word(w.to_string())
    }

    #[test]
    fn test_lexer_single_clause() {
        assert_eq!(
            kinds("flag=block-break"),
            vec![word("flag"), TokenKind::Eq, word("block-break"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_lexer_ignores_whitespace_around_delimiters() {
        assert_eq!(
            kinds("  flag = build ,  source=zombie  "),
            vec![
                word("flag"),
                TokenKind::Eq,
                word("build"),
                TokenKind::Comma,
                word("source"),
                TokenKind::Eq,
                word("zombie"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_joins_words_split_by_whitespace() {
        assert_eq!(
            kinds("item_name=Diamond Sword"),
            vec![word("item_name"), TokenKind::Eq, word("DiamondSword"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_lexer_long_whitespace_runs() {
        let gap = " ".repeat(10_000);
        assert_eq!(
            kinds(&format!("item_name=Diamond{}Sword{},state=on", gap, gap)),
            vec![
                word("item_name"),
                TokenKind::Eq,
                word("DiamondSword"),
                TokenKind::Comma,
                word("state"),
                TokenKind::Eq,
                word("on"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_namespaced_and_tag_values() {
        assert_eq!(
            kinds("source=#minecraft:undead"),
            vec![word("source"), TokenKind::Eq, word("#minecraft:undead"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_lexer_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \t"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_lexer_spans() {
        let tokens = Lexer::new("a = bc").tokenize();
        assert_eq!(tokens[0].span, Span { start: 0, end: 1, column: 1 });
        assert_eq!(tokens[1].span, Span { start: 2, end: 3, column: 3 });
        assert_eq!(tokens[2].span, Span { start: 4, end: 6, column: 5 });
        assert_eq!(tokens[3].kind, TokenKind::Eof);
        assert_eq!(tokens[3].span.start, 6);
    }

    #[test]
    fn test_lexer_multibyte_characters() {
        let tokens = Lexer::new("item_name=épée,state=on").tokenize();
        assert_eq!(tokens[2].kind, word("épée"));
        assert_eq!(tokens[3].kind, TokenKind::Comma);
        assert_eq!(tokens[3].span.column, 15);
    }
}
