//! Line-level lexer for CHAT transcripts.
//!
//! CHAT assigns meaning by line prefix, so the first classification pass is
//! a lexer over whole lines: `@` headers, `*LLL:\t` main lines, `%` dependent
//! tiers, tab-indented continuations, and anything else. Continuation lines
//! are a transcription artifact (one logical line wrapped for readability)
//! and are joined before any other processing, exactly like replacing the
//! two-character sequence newline + tab with a single space.

use logos::Logos;

/// Raw line tokens. Each variant consumes one physical line (or one newline).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineToken {
    /// `@`-prefixed metadata line, e.g. `@Participants:` or `@End`.
    #[regex(r"@[^\n]*", priority = 5)]
    Header,

    /// `*LLL:\t` main line opening a record; the speaker label is two or
    /// three alphanumeric characters.
    #[regex(r"\*[A-Za-z0-9][A-Za-z0-9][A-Za-z0-9]?:\t[^\n]*", priority = 6)]
    Main,

    /// `%`-prefixed dependent tier line.
    #[regex(r"%[^\n]*", priority = 5)]
    Dependent,

    /// Tab-indented continuation of the previous logical line.
    #[regex(r"\t[^\n]*", priority = 5)]
    Continuation,

    #[token("\n")]
    Newline,

    /// Any other non-empty line content.
    #[regex(r"[^\n]+", priority = 3)]
    Other,
}

impl LineToken {
    pub fn is_main(&self) -> bool {
        matches!(self, LineToken::Main)
    }

    pub fn is_dependent(&self) -> bool {
        matches!(self, LineToken::Dependent)
    }

    pub fn is_header(&self) -> bool {
        matches!(self, LineToken::Header)
    }
}

/// Classification of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Main,
    Dependent,
    Continuation,
    Other,
}

/// One classified line with its raw text (newline excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'s> {
    pub kind: LineKind,
    pub text: &'s str,
}

/// Iterator over classified lines of a text.
pub struct Lines<'s> {
    lexer: logos::Lexer<'s, LineToken>,
}

impl<'s> Iterator for Lines<'s> {
    type Item = Line<'s>;

    fn next(&mut self) -> Option<Line<'s>> {
        loop {
            let kind = match self.lexer.next()? {
                Ok(LineToken::Newline) => continue,
                Ok(LineToken::Header) => LineKind::Header,
                Ok(LineToken::Main) => LineKind::Main,
                Ok(LineToken::Dependent) => LineKind::Dependent,
                Ok(LineToken::Continuation) => LineKind::Continuation,
                Ok(LineToken::Other) => LineKind::Other,
                // The token set covers every byte, but a lexer error still
                // yields the unmatched slice as plain content.
                Err(()) => LineKind::Other,
            };
            return Some(Line {
                kind,
                text: self.lexer.slice(),
            });
        }
    }
}

/// Classifies the lines of `text`.
pub fn lines(text: &str) -> Lines<'_> {
    Lines {
        lexer: LineToken::lexer(text),
    }
}

/// Joins wrapped lines: a newline followed by a tab becomes a single space.
pub fn join_continuations(text: &str) -> String {
    text.replace("\n\t", " ")
}
