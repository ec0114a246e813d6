// src/core/html.rs
// Naive HTML scanning tailored to the DAC catalog pages. No DOM is built:
// callers receive &str slices of the original document and feed them back
// in to navigate. Tag and attribute matching is ASCII-case-insensitive.
// Same-name nesting is tracked (the catalog nests divs heavily), but the
// scanner stays deliberately dumb about everything else; missing structure
// comes back as None or an empty list, never a panic.

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

struct Tag<'a> {
    /// Lowercased element name.
    name: String,
    /// Raw attribute text between the name and the closing '>'.
    attrs: &'a str,
    /// Byte index of '<'.
    start: usize,
    /// Byte index just past the '>' of this tag.
    open_end: usize,
    /// This is a `</...>` tag.
    closing: bool,
    /// Void element or self-closing: carries no content.
    void: bool,
}

/// Scan for the next tag at or after `from`, skipping comments, doctypes
/// and processing instructions. Returns `None` at end of input or on a
/// truncated tag.
fn next_tag(s: &str, from: usize) -> Option<Tag<'_>> {
    let mut i = from;
    loop {
        let start = i + s.get(i..)?.find('<')?;
        let rest = &s[start + 1..];

        if rest.starts_with("!--") {
            i = start + s[start..].find("-->").map(|j| j + 3)?;
            continue;
        }
        if rest.starts_with('!') || rest.starts_with('?') {
            i = start + s[start..].find('>')? + 1;
            continue;
        }

        let closing = rest.starts_with('/');
        let name_start = start + 1 + usize::from(closing);
        let name_len = s[name_start..]
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(s.len() - name_start);
        if name_len == 0 {
            // Stray '<' in text content.
            i = start + 1;
            continue;
        }
        let name_end = name_start + name_len;
        let gt = name_end + s[name_end..].find('>')?;

        let name = s[name_start..name_end].to_ascii_lowercase();
        let attrs = &s[name_end..gt];
        let void = attrs.trim_end().ends_with('/') || VOID_TAGS.contains(&name.as_str());

        return Some(Tag { name, attrs, start, open_end: gt + 1, closing, void });
    }
}

/// Find where the block opened by `open` ends, tracking nesting of the
/// same tag name. Returns (index of the closing tag, index past it).
fn block_end(s: &str, open: &Tag) -> Option<(usize, usize)> {
    if open.void {
        return Some((open.open_end, open.open_end));
    }
    let mut depth = 1usize;
    let mut pos = open.open_end;
    while let Some(tag) = next_tag(s, pos) {
        pos = tag.open_end;
        if tag.name != open.name {
            continue;
        }
        if tag.closing {
            depth -= 1;
            if depth == 0 {
                return Some((tag.start, tag.open_end));
            }
        } else if !tag.void {
            depth += 1;
        }
    }
    None
}

/// Value of a named attribute, if present. `name` must be lowercase.
/// Handles double-quoted, single-quoted and bare values.
fn attr_value<'a>(tag: &Tag<'a>, name: &str) -> Option<&'a str> {
    let attrs = tag.attrs;
    let lower = attrs.to_ascii_lowercase();
    let bytes = attrs.as_bytes();

    let mut from = 0;
    while let Some(rel) = lower[from..].find(name) {
        let at = from + rel;
        from = at + 1;

        let boundary_before =
            at == 0 || !(bytes[at - 1].is_ascii_alphanumeric() || bytes[at - 1] == b'-');
        if !boundary_before {
            continue;
        }

        let mut j = at + name.len();
        if j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'-') {
            continue; // longer attribute name, e.g. "class" vs "classid"
        }
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= bytes.len() || bytes[j] != b'=' {
            continue;
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= bytes.len() {
            return None;
        }

        return Some(match bytes[j] {
            quote @ (b'"' | b'\'') => {
                let vstart = j + 1;
                let vend = attrs[vstart..]
                    .find(quote as char)
                    .map_or(attrs.len(), |k| vstart + k);
                &attrs[vstart..vend]
            }
            _ => {
                let vend = attrs[j..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '/')
                    .map_or(attrs.len(), |k| j + k);
                &attrs[j..vend]
            }
        });
    }
    None
}

fn attr_contains(tag: &Tag<'_>, attr: &str, pat_lower: &str) -> bool {
    attr_value(tag, attr).is_some_and(|v| v.to_ascii_lowercase().contains(pat_lower))
}

/// First complete block at or after `from` whose opening tag satisfies the
/// predicate. Descends into non-matching blocks. Returns byte offsets
/// (start, inner end, end).
fn first_match(
    doc: &str,
    from: usize,
    want: &mut dyn FnMut(&Tag<'_>) -> bool,
) -> Option<(usize, usize, usize)> {
    let mut pos = from;
    while let Some(tag) = next_tag(doc, pos) {
        pos = tag.open_end;
        if tag.closing || tag.void {
            continue;
        }
        if want(&tag) {
            if let Some((inner_end, end)) = block_end(doc, &tag) {
                return Some((tag.start, inner_end, end));
            }
        }
    }
    None
}

/// All non-overlapping matches; a matched block is skipped over whole, so
/// nested matches inside it are not reported again.
fn all_matches(doc: &str, want: &mut dyn FnMut(&Tag<'_>) -> bool) -> Vec<(usize, usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(found) = first_match(doc, pos, want) {
        pos = found.2;
        out.push(found);
    }
    out
}

/// First block of the named tag at or after `from`; (start, end) offsets.
pub fn tag_block(doc: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    first_match(doc, from, &mut |tag| tag.name == name).map(|(start, _, end)| (start, end))
}

/// First block of the named tag whose inner text contains `pat`
/// (case-insensitive), at or after `from`.
pub fn tag_with_text(doc: &str, name: &str, pat: &str, from: usize) -> Option<(usize, usize)> {
    let pat = pat.to_ascii_lowercase();
    let mut pos = from;
    while let Some((start, end)) = tag_block(doc, name, pos) {
        if inner_text(&doc[start..end]).to_ascii_lowercase().contains(&pat) {
            return Some((start, end));
        }
        pos = end;
    }
    None
}

/// First *leaf* block (no child tags) whose text contains `pat`,
/// case-insensitive. This is how label tags like `<b>Pré-Requisitos:</b>`
/// are located without matching every ancestor that also contains the text.
pub fn leaf_with_text(doc: &str, pat: &str) -> Option<(usize, usize)> {
    let pat = pat.to_ascii_lowercase();
    let mut pos = 0;
    while let Some(tag) = next_tag(doc, pos) {
        pos = tag.open_end;
        if tag.closing || tag.void {
            continue;
        }
        let Some((inner_end, end)) = block_end(doc, &tag) else { continue };
        let inner = &doc[tag.open_end..inner_end];
        if !inner.contains('<') && inner.to_ascii_lowercase().contains(&pat) {
            return Some((tag.start, end));
        }
    }
    None
}

/// All blocks whose `class` attribute contains `pat` (case-insensitive).
pub fn blocks_with_class<'a>(doc: &'a str, pat: &str) -> Vec<&'a str> {
    let pat = pat.to_ascii_lowercase();
    all_matches(doc, &mut |tag| attr_contains(tag, "class", &pat))
        .into_iter()
        .map(|(start, _, end)| &doc[start..end])
        .collect()
}

pub fn first_with_class<'a>(doc: &'a str, pat: &str) -> Option<&'a str> {
    let pat = pat.to_ascii_lowercase();
    first_match(doc, 0, &mut |tag| attr_contains(tag, "class", &pat))
        .map(|(start, _, end)| &doc[start..end])
}

/// First block whose `id` attribute contains `pat` (case-insensitive).
pub fn first_with_id<'a>(doc: &'a str, pat: &str) -> Option<&'a str> {
    let pat = pat.to_ascii_lowercase();
    first_match(doc, 0, &mut |tag| attr_contains(tag, "id", &pat))
        .map(|(start, _, end)| &doc[start..end])
}

/// All blocks of the named tag, non-overlapping.
pub fn blocks_of_tag<'a>(doc: &'a str, name: &str) -> Vec<&'a str> {
    all_matches(doc, &mut |tag| tag.name == name)
        .into_iter()
        .map(|(start, _, end)| &doc[start..end])
        .collect()
}

/// Whether any tag of the given name carries an attribute containing
/// `pat`. Matches the opening tag alone, so unclosed anchors still count.
pub fn has_tag_with_attr(doc: &str, name: &str, attr: &str, pat: &str) -> bool {
    let pat = pat.to_ascii_lowercase();
    let mut pos = 0;
    while let Some(tag) = next_tag(doc, pos) {
        pos = tag.open_end;
        if !tag.closing && tag.name == name && attr_contains(&tag, attr, &pat) {
            return true;
        }
    }
    false
}

/// Display texts of `<a>` links whose `href` contains `pat`.
pub fn link_texts(doc: &str, pat: &str) -> Vec<String> {
    let pat = pat.to_ascii_lowercase();
    all_matches(doc, &mut |tag| tag.name == "a" && attr_contains(tag, "href", &pat))
        .into_iter()
        .map(|(start, _, end)| inner_text(&doc[start..end]))
        .collect()
}

/// The next element that opens at or after `pos`, as a complete block.
/// Closing tags and void elements (line breaks above all) are stepped
/// over; this is the "element sibling" step used for label → value hops.
pub fn next_element_after(doc: &str, pos: usize) -> Option<&str> {
    let mut p = pos;
    while let Some(tag) = next_tag(doc, p) {
        p = tag.open_end;
        if tag.closing || tag.void {
            continue;
        }
        let (_, end) = block_end(doc, &tag)?;
        return Some(&doc[tag.start..end]);
    }
    None
}

/// Content between a block's opening and closing tags, tags included.
pub fn inner_html(block: &str) -> &str {
    let Some(open_end) = block.find('>') else { return "" };
    let Some(close_start) = block.rfind('<') else { return "" };
    if close_start > open_end {
        &block[open_end + 1..close_start]
    } else {
        ""
    }
}

/// Visible text of a block: tags stripped, the handful of entities the
/// catalog uses decoded, whitespace collapsed and trimmed.
pub fn inner_text(block: &str) -> String {
    collapse_ws(&decode_entities(&strip_tags(block)))
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        match rest[lt..].find('>') {
            Some(gt) => rest = &rest[lt + gt + 1..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
