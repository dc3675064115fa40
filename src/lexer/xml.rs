// jackc - A single-pass compiler translating Jack classes into Hack VM code
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Token listings for diagnostics.
//!
//! - `<tokens>` XML listing, one terminal per line
//! - Debug listing with token indices
//! - Escaping helpers shared with the parse tree rendering

use super::{Token, TokenKind};
use crate::error::Span;

/// Escape the characters that are unsafe inside XML text.
///
/// Control characters become numeric references such as `&#10;`, so every
/// terminal stays on one line of a listing.
pub fn escape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            c if c.is_control() => output.push_str(&format!("&#{};", u32::from(c))),
            c => output.push(c),
        }
    }
    output
}

/// Reverse [`escape`].
///
/// Decodes in a single pass; an `&` that starts no known reference is kept.
pub fn unescape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        output.push_str(&rest[..start]);
        let tail = &rest[start..];
        let decoded = tail
            .find(';')
            .and_then(|end| decode_reference(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                output.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                output.push('&');
                rest = &tail[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        _ => name
            .strip_prefix('#')?
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32),
    }
}

/// Render tokens as a `<tokens>` listing.
pub fn render_tokens_xml(tokens: &[(Token, Span)]) -> String {
    let mut output = String::from("<tokens>\n");
    for (token, _) in tokens {
        output.push_str(&token.to_xml());
        output.push('\n');
    }
    output.push_str("</tokens>\n");
    output
}

/// Render tokens as an indexed debug listing.
pub fn render_tokens_debug(tokens: &[(Token, Span)]) -> String {
    tokens
        .iter()
        .enumerate()
        .map(|(i, (token, _))| format!("[{:3}]: {:<15} {}\n", i, token.kind.tag(), token.content))
        .collect()
}

/// Read one terminal line such as `<symbol> &lt; </symbol>` back into a token.
pub fn parse_terminal_line(line: &str) -> Option<Token> {
    let line = line.trim();
    let rest = line.strip_prefix('<')?;
    let (tag, rest) = rest.split_once('>')?;
    let kind = TokenKind::from_tag(tag)?;
    let body = rest.strip_suffix(&format!("</{}>", tag))?;
    let content = body.strip_prefix(' ')?.strip_suffix(' ')?;
    Some(Token::new(kind, unescape(content)))
}
