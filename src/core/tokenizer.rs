// src/core/tokenizer.rs
//! Tag tokenizer.
//!
//! Turns raw HTML text into a flat stream of [`Token`]s in document order:
//! start tags (with their attributes), end tags and text runs. There is no
//! tree, no schema and no entity decoding here; the grid builder and the
//! field normalizer decide what the tokens mean.
//!
//! - Tag names are ASCII-lowercased. Attribute names and values are passed
//!   through exactly as written.
//! - `<img ... />` and other self-closing forms produce a start tag only.
//! - Comments, doctypes and processing instructions are dropped.
//! - `<script>`/`<style>` bodies are returned as one text token so markup-like
//!   content inside them does not leak into the tag stream.
//! - A `<` that does not open a tag, or a tag left unterminated at EOF, is text.
//!
//! The tokenizer borrows from the input; a single forward pass over the bytes,
//! no backtracking.

use std::borrow::Cow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr<'a> {
    pub name: &'a str,
    /// `None` for a bare attribute (`<td nowrap>`).
    pub value: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Start {
        name: Cow<'a, str>,
        attrs: Vec<Attr<'a>>,
        self_closing: bool,
    },
    End {
        name: Cow<'a, str>,
    },
    Text(&'a str),
}

impl<'a> Token<'a> {
    /// Value of the first attribute called `name` (ASCII case-insensitive).
    /// Bare attributes read as `""`.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self {
            Token::Start { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
                .map(|a| a.value.unwrap_or("")),
            _ => None,
        }
    }

    pub fn is_start(&self, tag: &str) -> bool {
        matches!(self, Token::Start { name, .. } if name == tag)
    }

    pub fn is_end(&self, tag: &str) -> bool {
        matches!(self, Token::End { name } if name == tag)
    }
}

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT: &[&str] = &["script", "style"];

pub struct Tokenizer<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
    raw_until: Option<&'static str>,
}

pub fn tokenize(html: &str) -> Tokenizer<'_> {
    Tokenizer::new(html)
}

impl<'a> Tokenizer<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, b: s.as_bytes(), i: 0, n: s.len(), raw_until: None }
    }

    #[inline]
    fn find_byte(&self, from: usize, ch: u8) -> Option<usize> {
        self.b.get(from..)?.iter().position(|&c| c == ch).map(|off| from + off)
    }

    fn find_str(&self, from: usize, pat: &str) -> Option<usize> {
        self.s.get(from..)?.find(pat).map(|off| from + off)
    }

    #[inline]
    fn skip_ws(&self, mut j: usize) -> usize {
        while j < self.n && self.b[j].is_ascii_whitespace() { j += 1; }
        j
    }

    /// Body of a raw-text element, up to (not including) its close tag.
    fn raw_text(&mut self, tag: &str) -> Option<Token<'a>> {
        let start = self.i;
        let needle = join!("</", tag);
        let end = self.s[start..]
            .as_bytes()
            .windows(needle.len())
            .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
            .map(|off| start + off)
            .unwrap_or(self.n);
        self.i = end;
        (end > start).then(|| Token::Text(&self.s[start..end]))
    }

    /// `<!-- ... -->`, `<!DOCTYPE ...>`, `<?...>`, `</ ...>`: skip past the closer.
    fn skip_markup_decl(&mut self) {
        let rest = &self.b[self.i..];
        self.i = if rest.starts_with(b"<!--") {
            self.find_str(self.i + 4, "-->").map_or(self.n, |p| p + 3)
        } else {
            self.find_byte(self.i + 1, b'>').map_or(self.n, |p| p + 1)
        };
    }

    /// Text up to the next `<` (at least one byte).
    fn text_run(&mut self) -> Token<'a> {
        let start = self.i;
        let end = self.find_byte(start + 1, b'<').unwrap_or(self.n);
        self.i = end;
        Token::Text(&self.s[start..end])
    }

    /// Reads a tag name starting at `j`; returns (name, end).
    fn tag_name(&self, mut j: usize) -> (&'a str, usize) {
        let start = j;
        while j < self.n {
            match self.b[j] {
                b'>' | b'/' => break,
                c if c.is_ascii_whitespace() => break,
                _ => j += 1,
            }
        }
        (&self.s[start..j], j)
    }

    /// `self.i` sits on `<` followed by a letter. `None` when unterminated.
    fn start_tag(&self) -> Option<(Token<'a>, usize)> {
        let (raw_name, mut j) = self.tag_name(self.i + 1);
        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            j = self.skip_ws(j);
            if j >= self.n { return None; }
            match self.b[j] {
                b'>' => { j += 1; break; }
                b'/' => {
                    if self.b.get(j + 1) == Some(&b'>') {
                        self_closing = true;
                        j += 2;
                        break;
                    }
                    j += 1;
                    continue;
                }
                _ => {}
            }

            // attribute name
            let name_start = j;
            while j < self.n {
                match self.b[j] {
                    b'=' | b'>' => break,
                    b'/' if self.b.get(j + 1) == Some(&b'>') => break,
                    c if c.is_ascii_whitespace() => break,
                    _ => j += 1,
                }
            }
            if j == name_start {
                // stray '=' with no name
                j += 1;
                continue;
            }
            let name = &self.s[name_start..j];

            // optional value
            let after_name = self.skip_ws(j);
            if self.b.get(after_name) != Some(&b'=') {
                attrs.push(Attr { name, value: None });
                continue;
            }
            j = self.skip_ws(after_name + 1);
            if j >= self.n { return None; }

            let value = match self.b[j] {
                q @ (b'"' | b'\'') => {
                    let close = self.find_byte(j + 1, q)?;
                    let v = &self.s[j + 1..close];
                    j = close + 1;
                    v
                }
                _ => {
                    let v_start = j;
                    while j < self.n && self.b[j] != b'>' && !self.b[j].is_ascii_whitespace() {
                        j += 1;
                    }
                    &self.s[v_start..j]
                }
            };
            attrs.push(Attr { name, value: Some(value) });
        }

        let tok = Token::Start { name: lower(raw_name), attrs, self_closing };
        Some((tok, j))
    }

    /// `self.i` sits on `</` followed by a letter. Attributes on end tags are ignored.
    fn end_tag(&self) -> Option<(Token<'a>, usize)> {
        let (raw_name, j) = self.tag_name(self.i + 2);
        let close = self.find_byte(j, b'>')?;
        Some((Token::End { name: lower(raw_name) }, close + 1))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tag) = self.raw_until.take() {
                if let Some(tok) = self.raw_text(tag) {
                    return Some(tok);
                }
            }
            if self.i >= self.n { return None; }

            if self.b[self.i] != b'<' {
                return Some(self.text_run());
            }

            let parsed = match self.b.get(self.i + 1) {
                Some(b'!') | Some(b'?') => {
                    self.skip_markup_decl();
                    continue;
                }
                Some(b'/') => match self.b.get(self.i + 2) {
                    Some(c) if c.is_ascii_alphabetic() => self.end_tag(),
                    Some(_) => {
                        // `</ >`, `</3>`: bogus comment
                        self.skip_markup_decl();
                        continue;
                    }
                    None => None,
                },
                Some(c) if c.is_ascii_alphabetic() => self.start_tag(),
                _ => return Some(self.text_run()),
            };

            return match parsed {
                Some((tok, next)) => {
                    self.i = next;
                    if let Token::Start { name, self_closing: false, .. } = &tok {
                        self.raw_until = RAW_TEXT.iter().copied().find(|t| *t == name.as_ref());
                    }
                    Some(tok)
                }
                None => {
                    // unterminated tag: the rest of the input is text
                    let rest = &self.s[self.i..];
                    self.i = self.n;
                    Some(Token::Text(rest))
                }
            };
        }
    }
}

fn lower(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|c| c.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}
