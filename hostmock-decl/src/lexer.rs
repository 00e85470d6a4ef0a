//! Tokenizer for the declaration subset.

use miette::SourceSpan;

/// Token payload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Tok {
    Ident(String),
    Str(String),
    Num(String),
    /// Backtick template, kept raw.
    Template(String),
    Arrow,
    Ellipsis,
    Punct(char),
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub tok: Tok,
    pub start: usize,
    pub end: usize,
    /// A line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    pub fn span(&self) -> SourceSpan {
        SourceSpan::from((self.start, self.end - self.start))
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.tok == Tok::Punct(c)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.tok, Tok::Ident(s) if s == name)
    }

    pub fn ident(&self) -> Option<&str> {
        match &self.tok {
            Tok::Ident(s) => Some(s),
            _ => None,
        }
    }
}

/// A lexing failure with the offending location.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LexError {
    pub message: String,
    pub span: SourceSpan,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<(usize, char)> = src.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut newline = false;
    let offset = |idx: usize| chars.get(idx).map_or(src.len(), |(o, _)| *o);

    while i < chars.len() {
        let (start, c) = chars[i];

        if c == '\n' {
            newline = true;
            i += 1;
            continue;
        }
        if c.is_whitespace() || c == '\u{feff}' {
            i += 1;
            continue;
        }

        // comments
        if c == '/' && chars.get(i + 1).map(|(_, c)| *c) == Some('/') {
            while i < chars.len() && chars[i].1 != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && chars.get(i + 1).map(|(_, c)| *c) == Some('*') {
            let mut j = i + 2;
            loop {
                match chars.get(j) {
                    None => {
                        return Err(LexError {
                            message: "unterminated block comment".into(),
                            span: SourceSpan::from((start, 2)),
                        });
                    }
                    Some((_, '*')) if chars.get(j + 1).map(|(_, c)| *c) == Some('/') => break,
                    Some((_, '\n')) => newline = true,
                    _ => {}
                }
                j += 1;
            }
            i = j + 2;
            continue;
        }

        let tok = if is_ident_start(c) {
            let mut j = i;
            while j < chars.len() && is_ident_continue(chars[j].1) {
                j += 1;
            }
            let tok = Tok::Ident(src[start..offset(j)].to_string());
            i = j;
            tok
        } else if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, i)) {
            let mut j = i;
            while j < chars.len()
                && (chars[j].1.is_ascii_alphanumeric() || chars[j].1 == '.' || chars[j].1 == '_')
            {
                j += 1;
            }
            let tok = Tok::Num(src[start..offset(j)].to_string());
            i = j;
            tok
        } else if c == '"' || c == '\'' {
            let (value, j) = lex_string(src, &chars, i, c)?;
            i = j;
            Tok::Str(value)
        } else if c == '`' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1 != '`' {
                if chars[j].1 == '\\' {
                    j += 1;
                }
                j += 1;
            }
            if j >= chars.len() {
                return Err(LexError {
                    message: "unterminated template literal".into(),
                    span: SourceSpan::from((start, 1)),
                });
            }
            let tok = Tok::Template(src[start..offset(j + 1)].to_string());
            i = j + 1;
            tok
        } else if c == '=' && chars.get(i + 1).map(|(_, c)| *c) == Some('>') {
            i += 2;
            Tok::Arrow
        } else if c == '.'
            && chars.get(i + 1).map(|(_, c)| *c) == Some('.')
            && chars.get(i + 2).map(|(_, c)| *c) == Some('.')
        {
            i += 3;
            Tok::Ellipsis
        } else if "{}()[]<>,;:?.|&=*-+!@#%^~/".contains(c) {
            i += 1;
            Tok::Punct(c)
        } else {
            return Err(LexError {
                message: format!("unexpected character '{}'", c),
                span: SourceSpan::from((start, c.len_utf8())),
            });
        };

        tokens.push(Token {
            tok,
            start,
            end: offset(i),
            newline_before: newline,
        });
        newline = false;
    }

    Ok(tokens)
}

fn next_is_digit(chars: &[(usize, char)], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|(_, c)| c.is_ascii_digit())
}

fn lex_string(
    src: &str,
    chars: &[(usize, char)],
    i: usize,
    quote: char,
) -> Result<(String, usize), LexError> {
    let start = chars[i].0;
    let mut value = String::new();
    let mut j = i + 1;
    loop {
        match chars.get(j) {
            None | Some((_, '\n')) => {
                return Err(LexError {
                    message: "unterminated string literal".into(),
                    span: SourceSpan::from((start, src.len().min(start + 1) - start)),
                });
            }
            Some((_, c)) if *c == quote => return Ok((value, j + 1)),
            Some((_, '\\')) => {
                let escaped = chars.get(j + 1).map(|(_, c)| *c).unwrap_or('\\');
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
                j += 2;
            }
            Some((_, c)) => {
                value.push(*c);
                j += 1;
            }
        }
    }
}
