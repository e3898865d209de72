//! Highlight rendering
//!
//! Wraps each run of matched code points in open/close markers.

/// Render `text` with markers around runs of `positions`
///
/// `positions` are code point indices, strictly increasing. Everything after
/// the last match is copied verbatim.
pub fn highlight(text: &str, positions: &[usize], open: &str, close: &str) -> String {
    let Some(&last) = positions.last() else {
        return text.to_string();
    };

    let mut out = String::with_capacity(text.len() + positions.len() * (open.len() + close.len()));
    let mut next = 0;
    let mut opened = false;

    for (i, (byte, c)) in text.char_indices().enumerate() {
        if positions[next] == i {
            next += 1;
            if !opened {
                out.push_str(open);
                opened = true;
            }
            out.push(c);

            if i == last {
                out.push_str(close);
                out.push_str(&text[byte + c.len_utf8()..]);
                return out;
            }
        } else {
            if opened {
                out.push_str(close);
                opened = false;
            }
            out.push(c);
        }
    }

    // positions ran past the end of the text
    if opened {
        out.push_str(close);
    }
    out
}
