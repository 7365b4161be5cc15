//! Content normalizer: HTML to matchable text
//!
//! Two pure functions make up the contract the engine relies on:
//! [`clean_html`] for HTML parts and [`extract_text_content`] for anything
//! that may or may not be markup.

/// Strip tags from an HTML document, keeping link text and image `alt` text,
/// dropping `<script>`/`<style>` contents and decoding entities.
///
/// Block-level closers and `<br>` become line breaks, table cells become
/// spaces, and each resulting line is whitespace-collapsed.
#[must_use]
pub fn clean_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len() / 2);
    let mut in_script = false;
    let mut in_style = false;

    let mut rest = html;
    while let Some(open) = rest.find('<') {
        if !in_script && !in_style {
            result.push_str(&rest[..open]);
        }
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            // Unterminated tag: keep the text verbatim
            if !in_script && !in_style {
                result.push_str(&rest[open..]);
            }
            rest = "";
            break;
        };
        let tag = &after[..close];
        let lower = tag.trim_start().to_ascii_lowercase();

        if lower.starts_with("script") {
            in_script = !tag.trim_end().ends_with('/');
        } else if lower.starts_with("/script") {
            in_script = false;
        } else if lower.starts_with("style") {
            in_style = true;
        } else if lower.starts_with("/style") {
            in_style = false;
        } else if !in_script && !in_style {
            if lower.starts_with("img") {
                if let Some(alt) = attribute(tag, "alt")
                    && !alt.trim().is_empty()
                {
                    result.push(' ');
                    result.push_str(alt.trim());
                    result.push(' ');
                }
            } else if is_line_break(&lower) {
                result.push('\n');
            } else if is_cell(&lower) {
                result.push(' ');
            }
        }

        rest = &after[close + 1..];
    }
    if !in_script && !in_style {
        result.push_str(rest);
    }

    collapse_lines(&decode_entities(&result))
}

/// Text content of a part that may be HTML or plain text
#[must_use]
pub fn extract_text_content(raw: &str) -> String {
    if looks_like_html(raw) {
        clean_html(raw)
    } else {
        collapse_lines(&decode_entities(raw))
    }
}

/// Decode named and numeric character references
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // Entities are short; anything longer is a bare ampersand
        let semi = tail.bytes().take(12).position(|b| b == b';');
        if let Some(semi) = semi
            && let Some(decoded) = decode_entity(&tail[1..semi])
        {
            out.push(decoded);
            rest = &tail[semi + 1..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        return char::from_u32(code);
    }

    let c = match name {
        "nbsp" | "ensp" | "emsp" | "thinsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "rupee" | "inr" => '₹',
        "ndash" => '–',
        "mdash" => '—',
        "times" => '×',
        "bull" | "middot" => '·',
        "rsquo" | "lsquo" => '\'',
        "rdquo" | "ldquo" => '"',
        "hellip" => '…',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        _ => return None,
    };
    Some(c)
}

fn looks_like_html(raw: &str) -> bool {
    let head: String = raw.chars().take(4096).collect::<String>().to_ascii_lowercase();
    ["<html", "<body", "<div", "<table", "<p>", "<p ", "<br", "<td", "<span", "<a "]
        .iter()
        .any(|marker| head.contains(marker))
}

fn is_line_break(tag: &str) -> bool {
    let name = tag_name(tag);
    matches!(
        name,
        "br" | "/p" | "p" | "/div" | "/li" | "/tr" | "/table" | "/h1" | "/h2" | "/h3" | "/h4"
            | "/h5" | "/h6" | "hr" | "/ul" | "/ol"
    )
}

fn is_cell(tag: &str) -> bool {
    matches!(tag_name(tag), "/td" | "/th" | "td" | "th")
}

fn tag_name(tag: &str) -> &str {
    tag.split(|c: char| c.is_whitespace() || (c == '/' && !tag.starts_with('/')))
        .next()
        .unwrap_or("")
        .trim_end_matches('/')
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let lower = tag.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(pos) = lower[search_from..].find(name) {
        let start = search_from + pos;
        let preceded_ok = start == 0
            || lower[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
        let after = lower[start + name.len()..].trim_start();
        if preceded_ok && after.starts_with('=') {
            let value_start = tag.len() - after.len() + 1;
            let value = tag[value_start..].trim_start();
            return Some(match value.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let inner = &value[1..];
                    inner.find(q).map_or(inner, |end| &inner[..end])
                }
                _ => value.split_whitespace().next().unwrap_or(""),
            });
        }
        search_from = start + name.len();
    }
    None
}

fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
