//! Text-level HTML helpers. No parse tree is built: markup is scanned as
//! plain text, which is all the extractor needs.

/// Reduce a page to its visible text.
///
/// `<script>` and `<style>` bodies are dropped, tags are removed without
/// inserting a separator (adjacent text nodes run together, newlines in the
/// source survive) and entities are decoded.
pub fn page_text(html: &str) -> String {
    decode_entities(&strip_tags_raw(&without_code(html)))
}

/// Markup with comments and `<script>`/`<style>` blocks removed, so nothing
/// hidden from the reader is matched as page content.
pub fn without_code(html: &str) -> String {
    let html = remove_comments(html);
    remove_blocks(&remove_blocks(&html, "script"), "style")
}

/// Remove `<!-- ... -->` comments. An unterminated comment swallows the rest
/// of the input.
fn remove_comments(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        rest = match rest[start + 4..].find("-->") {
            Some(end) => &rest[start + 4 + end + 3..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Strip tags and collapse whitespace; used for short inline fragments.
pub fn strip_tags(s: &str) -> String {
    normalize_ws(&decode_entities(&strip_tags_raw(s)))
}

/// Remove `<tag ...> ... </tag>` blocks, case-insensitively. An unclosed
/// block swallows the rest of the input.
fn remove_blocks(s: &str, tag: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `s`.
    let lc = s.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}");

    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    while let Some(rel) = lc[pos..].find(&open) {
        let start = pos + rel;
        // `<scripts>` or `<styled-x>` are not the tag we want.
        let after = lc.as_bytes().get(start + open.len()).copied();
        if matches!(after, Some(b) if b.is_ascii_alphanumeric() || b == b'-') {
            out.push_str(&s[pos..start + open.len()]);
            pos = start + open.len();
            continue;
        }
        out.push_str(&s[pos..start]);
        pos = match lc[start..].find(&close) {
            Some(c) => {
                let close_start = start + c;
                match lc[close_start..].find('>') {
                    Some(gt) => close_start + gt + 1,
                    None => s.len(),
                }
            }
            None => s.len(),
        };
    }
    out.push_str(&s[pos..]);
    out
}

/// Drop everything between `<` and `>` when the `<` opens a tag, comment or
/// declaration. A bare `<` (as in `a < b`) is kept as text.
fn strip_tags_raw(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
            }
            continue;
        }
        if ch == '<' {
            let opens_tag = chars
                .peek()
                .is_some_and(|&n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?'));
            if opens_tag {
                in_tag = true;
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Decode the named entities seen on listing pages plus numeric references.
/// Unknown entities are left untouched.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)))
        {
            Some((decoded, semi)) => {
                out.push(decoded);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}
