//! Token scanner for search queries.
//!
//! One left-to-right pass classifies the query into keys, delimiters,
//! whitespace runs and values. Scanning is total: every input yields some
//! token sequence, and the spans of the returned tokens tile the whole input.

use crate::span::{Span, Spanned};

/// Token types produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A field name followed by `:`. Holds the name; the span includes the colon.
    Key(String),
    /// A `,` separating values of one field.
    Delimiter,
    /// A run of whitespace. Ends the current key/value group.
    Whitespace,
    /// A value wrapped in quote characters. Holds the text between the outer quotes.
    QuotedValue(String),
    /// An unquoted value running up to the next `,`, whitespace, or end of input.
    PlainValue(String),
}

impl TokenKind {
    /// Whether this token carries a value.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::QuotedValue(_) | Self::PlainValue(_))
    }
}

/// A token with its character span in the query.
pub type Token = Spanned<TokenKind>;

/// Scan `input` into tokens.
///
/// # Example
///
/// ```
/// use spendsearch_parser::scanner::{scan, TokenKind};
///
/// let kinds: Vec<_> = scan("tag:a,b").into_iter().map(|t| t.value).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Key("tag".to_string()),
///         TokenKind::PlainValue("a".to_string()),
///         TokenKind::Delimiter,
///         TokenKind::PlainValue("b".to_string()),
///     ]
/// );
/// ```
#[must_use]
pub fn scan(input: &str) -> Vec<Token> {
    Scanner::new(input).run()
}

/// Characters allowed in a field name.
pub(crate) const fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Straight and curly double quotes. iOS keyboards substitute the curly
/// forms, so all three open and close interchangeably.
pub(crate) const fn is_quote(ch: char) -> bool {
    matches!(ch, '"' | '“' | '”')
}

const fn is_operator(ch: char) -> bool {
    matches!(ch, ':' | '<' | '>' | '=' | '!')
}

fn ends_value(ch: char) -> bool {
    ch == ',' || ch.is_whitespace()
}

/// Where the scanner is within a key/value group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the start of a group, where a `key:` may appear.
    Key,
    /// After a key or a delimiter.
    Value,
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    state: State,
    closers: QuoteClosers,
    tokens: Vec<Token>,
}

impl Scanner {
    fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let closers = QuoteClosers::new(&chars);
        Self {
            chars,
            pos: 0,
            state: State::Key,
            closers,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(ch) = self.peek() {
            let start = self.pos;
            let kind = if ch.is_whitespace() {
                self.advance_while(char::is_whitespace);
                self.state = State::Key;
                TokenKind::Whitespace
            } else if ch == ',' {
                self.pos += 1;
                self.state = State::Value;
                TokenKind::Delimiter
            } else if let Some(name) = self.key_at_cursor() {
                self.state = State::Value;
                TokenKind::Key(name)
            } else {
                self.state = State::Value;
                self.value()
            };
            self.tokens.push(Token::new(kind, Span::new(start, self.pos)));
        }
        self.tokens
    }

    /// Consume `name:` if the cursor is at the start of a group and a field
    /// name follows.
    fn key_at_cursor(&mut self) -> Option<String> {
        if self.state != State::Key {
            return None;
        }
        let name_end = self.key_name_end(self.pos);
        if name_end == self.pos || self.chars.get(name_end) != Some(&':') {
            return None;
        }
        let name = self.chars[self.pos..name_end].iter().collect();
        self.pos = name_end + 1;
        Some(name)
    }

    fn value(&mut self) -> TokenKind {
        let start = self.pos;
        if is_quote(self.chars[start]) {
            if let Some(close) = self.closers.closing_quote(start) {
                self.pos = close + 1;
                return TokenKind::QuotedValue(self.chars[start + 1..close].iter().collect());
            }
            tracing::trace!(offset = start, "unterminated quote, scanning plain value");
        }
        self.advance_while(|ch| !ends_value(ch));
        TokenKind::PlainValue(self.chars[start..self.pos].iter().collect())
    }

    fn key_name_end(&self, from: usize) -> usize {
        self.chars[from..]
            .iter()
            .position(|ch| !is_key_char(*ch))
            .map_or(self.chars.len(), |len| from + len)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }
}

/// How a quote character may end a quoted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closing {
    /// Followed by something other than a value boundary; cannot close.
    No,
    /// Followed by whitespace and then more free text. Closes only when
    /// nothing better follows.
    Weak,
    /// Followed by end of input, `,`, trailing whitespace, or whitespace and
    /// another filter.
    Strong,
}

/// Precomputed closing-quote lookup.
///
/// A quoted value opened at `i` closes at the first strong closer after `i`,
/// falling back to the first weak closer. Quote characters inside the value
/// are kept literally, which is what makes `""Mad" Dog"` a single value.
/// Both answers are tabulated in one backward pass so the scanner never
/// rescans the rest of the input.
struct QuoteClosers {
    next_strong: Vec<Option<usize>>,
    next_any: Vec<Option<usize>>,
}

impl QuoteClosers {
    fn new(chars: &[char]) -> Self {
        let len = chars.len();
        let mut next_strong = vec![None; len + 1];
        let mut next_any = vec![None; len + 1];
        for i in (0..len).rev() {
            next_strong[i] = next_strong[i + 1];
            next_any[i] = next_any[i + 1];
            if !is_quote(chars[i]) {
                continue;
            }
            match closing_kind(chars, i) {
                Closing::Strong => {
                    next_strong[i] = Some(i);
                    next_any[i] = Some(i);
                }
                Closing::Weak => next_any[i] = Some(i),
                Closing::No => {}
            }
        }
        Self {
            next_strong,
            next_any,
        }
    }

    /// Index of the quote closing a value opened at `open`.
    fn closing_quote(&self, open: usize) -> Option<usize> {
        let from = open + 1;
        self.next_strong
            .get(from)
            .copied()
            .flatten()
            .or_else(|| self.next_any.get(from).copied().flatten())
    }
}

fn closing_kind(chars: &[char], quote: usize) -> Closing {
    let after = quote + 1;
    match chars.get(after).copied() {
        None | Some(',') => Closing::Strong,
        Some(ch) if ch.is_whitespace() => {
            let next = chars[after..]
                .iter()
                .position(|ch| !ch.is_whitespace())
                .map(|len| after + len);
            match next {
                None => Closing::Strong,
                Some(next) if starts_filter(chars, next) => Closing::Strong,
                Some(_) => Closing::Weak,
            }
        }
        Some(_) => Closing::No,
    }
}

/// Whether a filter (`name` followed by an operator) starts at `at`.
fn starts_filter(chars: &[char], at: usize) -> bool {
    let name_len = chars[at..].iter().take_while(|ch| is_key_char(**ch)).count();
    name_len > 0 && chars.get(at + name_len).copied().is_some_and(is_operator)
}
