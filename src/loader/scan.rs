//! Quote-aware scanners for the delimited country dataset.
//!
//! Both scanners are small two-state machines. Reaching the end of
//! input while still inside a quoted section is a terminal state like
//! any other: the pending row or field is finalized as-is and no error
//! is raised.

use std::mem;

/// Position of a scanner relative to double-quoted sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Quoted,
}

impl QuoteState {
    fn toggled(self) -> Self {
        match self {
            QuoteState::Unquoted => QuoteState::Quoted,
            QuoteState::Quoted => QuoteState::Unquoted,
        }
    }
}

/// Split a document into raw rows.
///
/// `\n`, `\r` and `\r\n` end a row only outside quotes, so quoted fields
/// may span lines. Quote characters are kept verbatim; unescaping is
/// left to [`split_fields`]. Trailing unterminated content becomes a
/// final row when non-empty.
pub fn split_rows(text: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::Unquoted;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                state = state.toggled();
                current.push(c);
            }
            '\n' | '\r' if state == QuoteState::Unquoted => {
                if c == '\r' {
                    chars.next_if_eq(&'\n');
                }
                rows.push(mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

/// Split one raw row into field values.
///
/// `,` separates fields outside quotes. Inside quotes a doubled `""` is
/// a literal quote character; any other `"` toggles the quote state and
/// is dropped. The last field is always emitted, so a row always yields
/// at least one (possibly empty) value.
pub fn split_fields(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = QuoteState::Unquoted;
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if state == QuoteState::Quoted && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => state = state.toggled(),
            ',' if state == QuoteState::Unquoted => fields.push(mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    fields.push(field);
    fields
}
