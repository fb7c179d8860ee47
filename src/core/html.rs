// src/core/html.rs
// Tolerant, allocation-light HTML reading for the roster pages.
// Not a DOM: tags are scanned left to right and elements are delimited by
// depth-counting same-name tags. Tag/attribute names are ASCII case-insensitive.

use super::sanitize::{normalize_entities, normalize_ws};

/// Immutable snapshot of one rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    raw: String,
}

impl Document {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(&self.raw)
    }

    /// Value of the `<input name=…>` field, entities decoded.
    /// `None` when the field or its `value` attribute is missing.
    pub fn find_field_value(&self, field_name: &str) -> Option<String> {
        self.tags()
            .filter(|t| !t.closing && t.is("input"))
            .find(|t| t.attr("name") == Some(field_name))
            .and_then(|t| t.attr("value"))
            .map(normalize_entities)
    }

    /// Trimmed text content of the element carrying `id`.
    /// True when an `<input>` named `field_name` is present, valued or not.
    pub fn has_field(&self, field_name: &str) -> bool {
        self.tags()
            .any(|t| !t.closing && t.is("input") && t.attr("name") == Some(field_name))
    }

    pub fn find_text_by_id(&self, id: &str) -> Option<String> {
        let open = self.element_by_id(id)?;
        Some(text_content(element_inner(&self.raw, &open)))
    }

    /// Text of the first `<div>` nested in the element carrying `id`.
    /// `None` when no element has that id, `""` when it has no div.
    pub fn cell_text(&self, id: &str) -> Option<String> {
        let open = self.element_by_id(id)?;
        let inner = element_inner(&self.raw, &open);
        let text = Tags::new(inner)
            .find(|t| !t.closing && t.is("div"))
            .map(|div| text_content(element_inner(inner, &div)))
            .unwrap_or_default();
        Some(text)
    }

    fn element_by_id(&self, id: &str) -> Option<Tag<'_>> {
        self.tags().find(|t| !t.closing && t.attr("id") == Some(id))
    }
}

impl From<String> for Document {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Tag<'a> {
    /// Byte offset of `<`.
    pub start: usize,
    /// Byte offset just past `>`.
    pub end: usize,
    pub name: &'a str,
    pub closing: bool,
    pub self_closing: bool,
    attrs: &'a str,
}

impl<'a> Tag<'a> {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr_value(self.attrs, name)
    }

    fn is_raw_text(&self) -> bool {
        !self.closing && (self.is("script") || self.is("style"))
    }

    fn is_void(&self) -> bool {
        const VOID: &[&str] = &["br", "hr", "img", "input", "meta", "link", "col", "area", "base", "wbr"];
        self.self_closing || VOID.iter().any(|v| self.is(v))
    }
}

/// Iterator over the tags of a string. Comments, doctype and processing
/// instructions are skipped; `<script>`/`<style>` bodies are jumped over.
pub struct Tags<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Tags<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, pos: 0 }
    }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        loop {
            let start = self.s.get(self.pos..)?.find('<')? + self.pos;
            let rest = &self.s[start..];

            if rest.starts_with("<!--") {
                self.pos = rest.find("-->").map_or(self.s.len(), |e| start + e + 3);
                continue;
            }

            let b = rest.as_bytes();
            let closing = b.get(1) == Some(&b'/');
            let name_from = if closing { 2 } else { 1 };
            if !b.get(name_from).is_some_and(u8::is_ascii_alphabetic) {
                // Doctype/PI are skipped whole; a bare '<' is just text.
                self.pos = if matches!(b.get(1), Some(b'!') | Some(b'?')) {
                    rest.find('>').map_or(self.s.len(), |e| start + e + 1)
                } else {
                    start + 1
                };
                continue;
            }

            let end = start + tag_end(rest)?;
            let body = &self.s[start + name_from..end - 1];
            let name_len = body
                .find(|c: char| c.is_ascii_whitespace() || c == '/')
                .unwrap_or(body.len());
            let name = &body[..name_len];
            let attrs = body[name_len..].trim_end();
            let self_closing = attrs.ends_with('/');

            let tag = Tag {
                start,
                end,
                name,
                closing,
                self_closing,
                attrs: attrs.trim_end_matches('/'),
            };

            self.pos = end;
            if tag.is_raw_text() {
                let close = join_close(name);
                self.pos = to_lower(&self.s[end..]).find(&close).map_or(self.s.len(), |i| end + i);
            }
            return Some(tag);
        }
    }
}

fn join_close(name: &str) -> String {
    let mut close = s!("</");
    close.push_str(&to_lower(name));
    close
}

/// Offset just past the `>` closing the tag that starts `rest`, quote-aware.
fn tag_end(rest: &str) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    for (i, b) in rest.bytes().enumerate().skip(1) {
        match b {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Look up one attribute in a raw attribute list (`a="1" b='2' c=3 d`).
/// Valueless attributes yield `Some("")`.
fn attr_value<'a>(attrs: &'a str, want: &str) -> Option<&'a str> {
    let b = attrs.as_bytes();
    let n = b.len();
    let mut i = 0;

    while i < n {
        while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        let key_start = i;
        while i < n && !b[i].is_ascii_whitespace() && b[i] != b'=' && b[i] != b'/' { i += 1; }
        let key = &attrs[key_start..i];
        while i < n && b[i].is_ascii_whitespace() { i += 1; }

        let mut value = "";
        if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            if i < n && (b[i] == b'"' || b[i] == b'\'') {
                let quote = b[i];
                i += 1;
                let value_start = i;
                while i < n && b[i] != quote { i += 1; }
                value = &attrs[value_start..i];
                i += 1;
            } else {
                let value_start = i;
                while i < n && !b[i].is_ascii_whitespace() { i += 1; }
                value = &attrs[value_start..i];
            }
        } else if key.is_empty() {
            i += 1;
            continue;
        }

        if key.eq_ignore_ascii_case(want) {
            return Some(value);
        }
    }
    None
}

/// Markup between `open` and its matching close tag.
/// Void/self-closing elements are empty; an unclosed element runs to the end.
pub fn element_inner<'a>(s: &'a str, open: &Tag<'_>) -> &'a str {
    if open.is_void() {
        return "";
    }
    let mut depth = 0usize;
    for tag in Tags::new(&s[open.end..]) {
        if !tag.is(open.name) {
            continue;
        }
        if tag.closing {
            if depth == 0 {
                return &s[open.end..open.end + tag.start];
            }
            depth -= 1;
        } else if !tag.self_closing {
            depth += 1;
        }
    }
    &s[open.end..]
}

/// Text of a fragment: each text run is entity-decoded and trimmed, then
/// runs are concatenated without a separator. Script/style bodies are dropped.
pub fn text_content(fragment: &str) -> String {
    let mut out = s!();
    let mut pos = 0usize;
    let mut skip_run = false;

    for tag in Tags::new(fragment) {
        if !skip_run {
            push_run(&mut out, &fragment[pos..tag.start]);
        }
        skip_run = tag.is_raw_text();
        pos = tag.end;
    }
    if !skip_run {
        push_run(&mut out, &fragment[pos..]);
    }
    out
}

fn push_run(out: &mut String, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    out.push_str(&normalize_ws(&normalize_entities(raw)));
}

/// ASCII-only lowercasing; byte offsets are preserved.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"
        <form method="post" action="./Default.aspx" id="aspnetForm">
          <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="/wEPDwUK&#43;MTY=" />
          <INPUT TYPE=hidden NAME=__EVENTVALIDATION VALUE=abc123>
          <input name="ctl00$ContentPlaceHolder1$txtPersonnelId" type="text">
        </form>
    "#;

    #[test]
    fn field_values_quoted_unquoted_and_decoded() {
        let doc = Document::new(FORM);
        assert_eq!(doc.find_field_value("__VIEWSTATE").as_deref(), Some("/wEPDwUK+MTY="));
        assert_eq!(doc.find_field_value("__EVENTVALIDATION").as_deref(), Some("abc123"));
        // present but no value attribute
        assert_eq!(doc.find_field_value("ctl00$ContentPlaceHolder1$txtPersonnelId"), None);
        assert_eq!(doc.find_field_value("missing"), None);
    }

    #[test]
    fn has_field_ignores_missing_value() {
        let doc = Document::new(FORM);
        assert!(doc.has_field("ctl00$ContentPlaceHolder1$txtPersonnelId"));
        assert!(doc.has_field("__EVENTVALIDATION"));
        assert!(!doc.has_field("aspnetForm"));
    }

    #[test]
    fn text_by_id_trims_and_joins_runs() {
        let doc = Document::new(r#"<p><span id="lbl">
            January&nbsp;2024 </span></p><span id="two"><b>A</b> <i>B</i></span>"#);
        assert_eq!(doc.find_text_by_id("lbl").as_deref(), Some("January 2024"));
        assert_eq!(doc.find_text_by_id("two").as_deref(), Some("AB"));
        assert_eq!(doc.find_text_by_id("nope"), None);
    }

    #[test]
    fn nested_same_name_elements_are_matched() {
        let doc = Document::new(r#"<div id="outer"><div>in</div>tail</div><div>after</div>"#);
        assert_eq!(doc.find_text_by_id("outer").as_deref(), Some("intail"));
    }

    #[test]
    fn cell_text_reads_first_div_only() {
        let doc = Document::new(r#"
            <table><tr>
              <td id="c1"><a>1</a><div class="shift">D1(0700)<br/>N2(2200)</div></td>
              <td id="c2"><a>2</a></td>
            </tr></table>"#);
        assert_eq!(doc.cell_text("c1").as_deref(), Some("D1(0700)N2(2200)"));
        assert_eq!(doc.cell_text("c2").as_deref(), Some(""));
        assert_eq!(doc.cell_text("c3"), None);
    }

    #[test]
    fn comments_scripts_and_stray_brackets_are_ignored() {
        let doc = Document::new(r#"
            <!-- <span id="x">commented</span> -->
            <script>var s = "<span id='x'>script</span>";</script>
            <span id="x">real 1 < 2</span>"#);
        assert_eq!(doc.find_text_by_id("x").as_deref(), Some("real 1 < 2"));
    }

    #[test]
    fn malformed_input_never_panics() {
        for raw in ["", "<", "<<<>>>", "<span id=\"a", "<td id=a><div>", "&#xZZ;<", "<é id=1>"] {
            let doc = Document::new(raw);
            let _ = doc.find_text_by_id("a");
            let _ = doc.find_field_value("a");
            let _ = doc.cell_text("a");
        }
        assert_eq!(Document::new("<td id=a><div>x").cell_text("a").as_deref(), Some("x"));
    }
}
