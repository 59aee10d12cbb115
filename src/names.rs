//! Extraction of the identifier chain that sits to the left of the cursor.
//!
//! Completion needs to know which dotted expression the user is in the middle of
//! typing. Given `Requests.indexRequests.index('index_name').ty` and the cursor at
//! the end, the chain is `[Requests, indexRequests, index, ty]`: call arguments are
//! dropped and the last element is the partial name being completed.
//!
//! The scan is a single backward pass:
//! - identifier characters are accumulated into the current name
//! - `.` closes the current name; if it directly follows `)`, the whole argument
//!   list is skipped (see [`skip_call_arguments`])
//! - any other character is the left boundary of the expression and stops the scan

/// Returns true when `c` may appear inside a bare name of the console's scripting
/// language (Unicode letters and digits, `_` and `$`).
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Given the byte offset of a `)` inside `text`, returns the byte offset of the `(`
/// that opens it, taking nested groups into account. `None` when `close` does not
/// point at a `)` or when the group is never opened.
pub fn skip_call_arguments(text: &str, close: usize) -> Option<usize> {
    if text.as_bytes().get(close) != Some(&b')') {
        return None;
    }

    let mut depth = 0usize;
    for (idx, c) in text[..close].char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' if depth == 0 => return Some(idx),
            '(' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Extracts the names forming the chained expression that ends at `cursor`.
///
/// `cursor` is a byte offset into `buffer`. Only the text before it is examined.
/// Offsets past the end are clamped to the end, offsets that fall inside a
/// multi-byte character are moved back to the start of that character.
///
/// The result is in source order and is never empty: when nothing can be
/// collected a single empty name is returned, and an empty name also stands in
/// for each missing side of a separator (`"."` yields `["", ""]`).
pub fn extract_names(buffer: &str, cursor: usize) -> Vec<String> {
    let cursor = clamp_cursor(buffer, cursor);
    let text = &buffer[..cursor];

    let mut names = Vec::new();
    // characters of the current name, in reverse order
    let mut name: Vec<char> = Vec::new();
    let mut pos = text.len();
    let mut halted = false;

    while let Some(c) = text[..pos].chars().next_back() {
        if is_identifier_char(c) {
            name.push(c);
            pos -= c.len_utf8();
            continue;
        }

        names.push(take_name(&mut name));
        if c != '.' {
            halted = true;
            break;
        }

        pos -= 1;
        if text[..pos].ends_with(')') {
            // an unbalanced group swallows the rest of the buffer
            pos = skip_call_arguments(text, pos - 1).unwrap_or(0);
        }
    }

    if !halted {
        names.push(take_name(&mut name));
    }
    names.reverse();

    log::trace!("extract_names: prefix={text:?} chain={names:?}");
    names
}

fn take_name(reversed: &mut Vec<char>) -> String {
    let name = reversed.iter().rev().collect();
    reversed.clear();
    name
}

fn clamp_cursor(buffer: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(buffer.len());
    while !buffer.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}
