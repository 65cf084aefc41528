//! List and string literals used by the reports.
//!
//! `['a', 'b']` style: each element is quoted with `'`, or with `"` when the
//! text holds a `'` but no `"`. Backslashes and the chosen quote are escaped,
//! as is every non-printable character: `\xNN`, `\uNNNN` or `\UNNNNNNNN` by
//! code point.
//!
//! Non-printable means control and format characters, separators other than
//! the ASCII space, and private-use code points. Unassigned code points are
//! written as they are.

use std::fmt::{self, Write};

/// Displays a slice of strings as a list literal.
pub struct ListLiteral<'a, T>(pub &'a [T]);

impl<T: AsRef<str>> fmt::Display for ListLiteral<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", StrLiteral(item.as_ref()))?;
        }
        f.write_char(']')
    }
}

/// Displays a string as a quoted literal.
pub struct StrLiteral<'a>(pub &'a str);

impl fmt::Display for StrLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0;
        let quote = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };

        f.write_char(quote)?;
        for c in text.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if c == quote => write!(f, "\\{c}")?,
                c if !is_printable(c) => match c as u32 {
                    n @ 0..=0xff => write!(f, "\\x{n:02x}")?,
                    n @ 0x100..=0xffff => write!(f, "\\u{n:04x}")?,
                    n => write!(f, "\\U{n:08x}")?,
                },
                c => f.write_char(c)?,
            }
        }
        f.write_char(quote)
    }
}

fn is_printable(c: char) -> bool {
    if c.is_control() {
        return false;
    }
    !matches!(
        c as u32,
        // space separators other than ' '
        0xa0 | 0x1680 | 0x2000..=0x200a | 0x202f | 0x205f | 0x3000
        // line and paragraph separators
        | 0x2028 | 0x2029
        // format characters
        | 0xad
        | 0x600..=0x605
        | 0x61c
        | 0x6dd
        | 0x70f
        | 0x890..=0x891
        | 0x8e2
        | 0x180e
        | 0x200b..=0x200f
        | 0x202a..=0x202e
        | 0x2060..=0x2064
        | 0x2066..=0x206f
        | 0xfeff
        | 0xfff9..=0xfffb
        | 0x110bd
        | 0x110cd
        | 0x13430..=0x1343f
        | 0x1bca0..=0x1bca3
        | 0x1d173..=0x1d17a
        | 0xe0001
        | 0xe0020..=0xe007f
        // private use
        | 0xe000..=0xf8ff
        | 0xf0000..=0xffffd
        | 0x100000..=0x10fffd
    )
}
