//! Kernel command line parser

use kstring::ascii::is_space;
use kstring::cstr::find_char;

/// Zero-copy command line parser over the raw bytes the loader passed.
pub struct CmdLine<'a> {
    raw: &'a [u8],
}

impl<'a> CmdLine<'a> {
    /// Create an iterator for parsing a command line. A zero byte ends the command line.
    pub fn parse(raw: &'a [u8]) -> CmdLine<'a> {
        CmdLine {
            raw: kstring::content(raw),
        }
    }

    /// Skip consecutive whitespace from the front.
    fn skip_whitespace(&mut self) {
        let skip = self.raw.iter().take_while(|ch| is_space(**ch)).count();
        self.raw = &self.raw[skip..];
    }

    /// Consume the next symbol in the command line. A symbol is either
    /// - a consecutive sequence of bytes that are neither whitespace nor '='
    ///   (depending on the `accept_equals` flag)
    /// - a quoted string of arbitrary bytes except quotes
    fn parse_symbol(&mut self, accept_equals: bool) -> Option<&'a [u8]> {
        let (first, rest) = self.raw.split_first()?;

        if *first == b'"' {
            match find_char(rest, b'"') {
                None => {
                    self.raw = &[];
                    Some(rest)
                },
                Some(pos) => {
                    self.raw = &rest[pos + 1..];
                    Some(&rest[..pos])
                }
            }
        } else {
            let s = self.raw;
            let end = s.iter()
                .position(|ch| (!accept_equals && *ch == b'=') || is_space(*ch))
                .unwrap_or(s.len());
            let (value, rest) = s.split_at(end);
            self.raw = rest;
            Some(value)
        }
    }

    /// Parse an equal sign. Returns true if an equals sign was found, otherwise false.
    fn parse_equals(&mut self) -> bool {
        match self.raw.split_first() {
            Some((&b'=', rest)) => {
                self.raw = rest;
                true
            },
            _ => false,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    Flag(&'a [u8]),
    KeyValuePair(&'a [u8], &'a [u8]),
}

impl<'a> Iterator for CmdLine<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let key = self.parse_symbol(false)?;
        if self.parse_equals() {
            let value = self.parse_symbol(true).unwrap_or(&[]);
            Some(Token::KeyValuePair(key, value))
        } else {
            Some(Token::Flag(key))
        }
    }
}

/// View loader bytes as text for log output.
pub fn as_text(bytes: &[u8]) -> &str {
    core::str::from_utf8(bytes).unwrap_or("<not utf-8>")
}
