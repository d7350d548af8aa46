// ABOUTME: Text utilities for extracted content.
// ABOUTME: Provides entity decoding, whitespace collapsing, and script block removal.

/// Decodes HTML character references (a small named set plus numeric forms).
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match decode_one_entity(rest) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes a single reference at the start of `s` (which begins with '&').
/// Returns the character and the number of bytes consumed.
fn decode_one_entity(s: &str) -> Option<(char, usize)> {
    // A real reference is short; a distant ';' means this '&' is plain text.
    let semi = s.find(';').filter(|&i| i <= 10)?;
    let body = &s[1..semi];

    if let Some(num) = body.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        return char::from_u32(code).map(|c| (c, semi + 1));
    }

    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => return None,
    };
    Some((ch, semi + 1))
}

/// Collapses runs of whitespace to single spaces and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(c);
            last_was_space = false;
        }
    }

    out.trim().to_string()
}

/// Removes `<script>…</script>` blocks by textual substitution.
///
/// Best-effort cleanup for descriptions lifted off detail pages; this is a
/// cosmetic heuristic, not sanitization, and must not be relied on as a
/// security boundary. An unterminated block drops the rest of the fragment.
pub fn strip_script_blocks(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    loop {
        let lower = rest.to_ascii_lowercase();
        let Some(start) = lower.find("<script") else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..start]);
        let Some(close) = lower[start..].find("</script") else {
            break;
        };
        let after = start + close;
        let close_end = rest[after..]
            .find('>')
            .map(|i| after + i + 1)
            .unwrap_or(rest.len());
        rest = &rest[close_end..];
    }
    out
}
