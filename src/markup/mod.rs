//! @acp:module "Markup"
//! @acp:summary "Lossless HTML node model for resource-reference rewriting"
//! @acp:domain cli
//! @acp:layer model
//!
//! Only the elements that carry resource references are modeled: `<link>`
//! and `<script>`. Everything else (doctype, other tags, text) is kept as raw
//! text, and comments are kept as raw comment nodes, so serializing an
//! unmodified document reproduces the input byte for byte.

pub mod reconcile;

use std::fmt;
use std::ops::Range;

pub use reconcile::{reconcile, render_index};

/// Reference-carrying element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Link,
    Script,
}

impl ElementKind {
    fn from_tag(name: &str) -> Option<Self> {
        match name {
            "link" => Some(ElementKind::Link),
            "script" => Some(ElementKind::Script),
            _ => None,
        }
    }

    /// Attribute holding the external reference
    pub fn reference_attr(&self) -> &'static str {
        match self {
            ElementKind::Link => "href",
            ElementKind::Script => "src",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute {
    name: String,
    value: Option<String>,
    /// Byte range of the value text inside the raw start tag (quotes excluded)
    span: Option<Range<usize>>,
}

/// A `<link>` or `<script>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    kind: ElementKind,
    start_tag: String,
    attrs: Vec<Attribute>,
    body: String,
    end_tag: String,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Attribute value; `Some("")` for attributes written without a value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// The element's reference (`href` for links, `src` for scripts)
    pub fn reference(&self) -> Option<&str> {
        self.attr(self.kind.reference_attr())
    }

    /// Script without an external `src`
    pub fn is_inline_script(&self) -> bool {
        self.kind == ElementKind::Script && self.attr("src").is_none()
    }

    /// Raw text between the start and end tags
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Copy of this element with an existing attribute's value replaced.
    ///
    /// The rest of the start tag is left untouched. Attributes that are
    /// missing or written without a value are left as they are.
    pub fn with_attr(&self, name: &str, value: &str) -> Element {
        let mut next = self.clone();
        let Some(index) = self.attrs.iter().position(|a| a.name == name) else {
            return next;
        };
        let Some(span) = self.attrs[index].span.clone() else {
            return next;
        };

        next.start_tag.replace_range(span.clone(), value);
        let old_len = span.end - span.start;
        let new_end = span.start + value.len();
        for (i, attr) in next.attrs.iter_mut().enumerate() {
            if i == index {
                attr.value = Some(value.to_string());
                attr.span = Some(span.start..new_end);
            } else if let Some(s) = attr.span.as_mut() {
                if s.start >= span.end {
                    *s = (s.start + value.len() - old_len)..(s.end + value.len() - old_len);
                }
            }
        }
        next
    }

    /// Copy of this element with a new body
    pub fn with_body(&self, body: impl Into<String>) -> Element {
        Element {
            body: body.into(),
            ..self.clone()
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push_str(&self.start_tag);
        out.push_str(&self.body);
        out.push_str(&self.end_tag);
    }
}

/// One node of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Markup and text that is carried through verbatim
    Text(String),
    /// A complete `<!-- ... -->` comment, delimiters included
    Comment(String),
    Element(Element),
}

/// @acp:summary "Parsed HTML document; immutable once built"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse HTML text. Parsing never fails; unrecognized input stays text.
    pub fn parse(html: &str) -> Self {
        Parser::new(html).run()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Modeled elements with their node positions, in document order
    pub fn elements(&self) -> impl Iterator<Item = (usize, &Element)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match node {
            Node::Element(el) => Some((i, el)),
            _ => None,
        })
    }

    /// Inline scripts in document order
    pub fn inline_scripts(&self) -> impl Iterator<Item = (usize, &Element)> + '_ {
        self.elements().filter(|(_, el)| el.is_inline_script())
    }

    /// Build a new document from per-node decisions.
    ///
    /// `decisions` has one entry per node of `self`: `Some(node)` keeps that
    /// node (possibly replaced), `None` drops it. A dropped node that sat on
    /// its own line takes its indentation and line break with it.
    pub fn rebuild(&self, decisions: Vec<Option<Node>>) -> Document {
        debug_assert_eq!(decisions.len(), self.nodes.len());

        let mut out: Vec<Node> = Vec::with_capacity(decisions.len());
        let mut strip_leading_newline = false;

        for i in 0..decisions.len() {
            match &decisions[i] {
                Some(node) => {
                    let mut node = node.clone();
                    if strip_leading_newline {
                        if let Node::Text(text) = &mut node {
                            *text = strip_line_start(text).to_string();
                        }
                        strip_leading_newline = false;
                    }
                    push_node(&mut out, node);
                }
                None => {
                    let next_starts_line = matches!(
                        decisions.get(i + 1),
                        Some(Some(Node::Text(t))) if line_break_prefix(t).is_some()
                    );
                    let prev_ends_line = match out.last() {
                        Some(Node::Text(t)) => trailing_indent(t).is_some(),
                        None => true,
                        _ => false,
                    };
                    if next_starts_line && prev_ends_line {
                        if let Some(Node::Text(t)) = out.last_mut() {
                            if let Some(indent) = trailing_indent(t) {
                                t.truncate(t.len() - indent);
                            }
                        }
                        strip_leading_newline = true;
                    }
                }
            }
        }

        Document { nodes: out }
    }

    /// Serialize back to HTML text
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) | Node::Comment(text) => out.push_str(text),
                Node::Element(el) => el.write_html(&mut out),
            }
        }
        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn push_node(out: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text(prev)), Node::Text(text)) = (out.last_mut(), &node) {
        prev.push_str(text);
        return;
    }
    out.push(node);
}

/// Length of the spaces/tabs after the last line break, if only those follow it
fn trailing_indent(text: &str) -> Option<usize> {
    let tail = match text.rfind('\n') {
        Some(pos) => &text[pos + 1..],
        None if text.trim().is_empty() => text,
        None => return None,
    };
    tail.chars()
        .all(|c| c == ' ' || c == '\t')
        .then_some(tail.len())
}

/// Length of leading spaces/tabs plus one line break
fn line_break_prefix(text: &str) -> Option<usize> {
    let indent = text.len() - text.trim_start_matches([' ', '\t']).len();
    let rest = &text[indent..];
    if rest.starts_with("\r\n") {
        Some(indent + 2)
    } else if rest.starts_with('\n') {
        Some(indent + 1)
    } else {
        None
    }
}

fn strip_line_start(text: &str) -> &str {
    match line_break_prefix(text) {
        Some(len) => &text[len..],
        None => text,
    }
}

// =============================================================================
// Parser
// =============================================================================

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    nodes: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            nodes: Vec::new(),
        }
    }

    fn run(mut self) -> Document {
        let src = self.src;
        while self.pos < src.len() {
            let rest = &src[self.pos..];

            if rest.starts_with("<!--") {
                let end = rest[4..]
                    .find("-->")
                    .map(|i| i + 4 + 3)
                    .unwrap_or(rest.len());
                self.nodes.push(Node::Comment(rest[..end].to_string()));
                self.pos += end;
                continue;
            }

            if let Some((tag, consumed)) = scan_start_tag(rest) {
                match ElementKind::from_tag(&tag.name) {
                    Some(kind) => {
                        let element = self.finish_element(kind, tag, consumed);
                        self.nodes.push(Node::Element(element));
                    }
                    None => {
                        let mut len = consumed;
                        if !tag.self_closing && is_raw_text(&tag.name) {
                            len += raw_text_len(&rest[consumed..], &tag.name);
                        }
                        self.push_text(&rest[..len]);
                        self.pos += len;
                    }
                }
                continue;
            }

            // Plain text up to the next tag opener
            let first = rest.chars().next().map(char::len_utf8).unwrap_or(1);
            let len = rest[first..]
                .find('<')
                .map(|i| i + first)
                .unwrap_or(rest.len());
            self.push_text(&rest[..len]);
            self.pos += len;
        }

        Document { nodes: self.nodes }
    }

    fn finish_element(&mut self, kind: ElementKind, tag: StartTag, consumed: usize) -> Element {
        let src = self.src;
        let start_tag = src[self.pos..self.pos + consumed].to_string();
        self.pos += consumed;

        let (body, end_tag) = if kind == ElementKind::Script && !tag.self_closing {
            let after = &src[self.pos..];
            match find_ci(after, "</script") {
                Some(close) => {
                    let end = after[close..]
                        .find('>')
                        .map(|i| close + i + 1)
                        .unwrap_or(after.len());
                    self.pos += end;
                    (after[..close].to_string(), after[close..end].to_string())
                }
                None => {
                    self.pos += after.len();
                    (after.to_string(), String::new())
                }
            }
        } else {
            (String::new(), String::new())
        };

        Element {
            kind,
            start_tag,
            attrs: tag.attrs,
            body,
            end_tag,
        }
    }

    fn push_text(&mut self, text: &str) {
        push_node(&mut self.nodes, Node::Text(text.to_string()));
    }
}

struct StartTag {
    name: String,
    attrs: Vec<Attribute>,
    self_closing: bool,
}

fn is_raw_text(tag: &str) -> bool {
    matches!(tag, "style" | "textarea" | "title")
}

/// Bytes up to and including the matching close tag of a raw-text element
fn raw_text_len(rest: &str, tag: &str) -> usize {
    let close = format!("</{}", tag);
    match find_ci(rest, &close) {
        Some(i) => rest[i..].find('>').map(|j| i + j + 1).unwrap_or(rest.len()),
        None => rest.len(),
    }
}

/// ASCII case-insensitive substring search
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Parse a start tag at the beginning of `s`; returns it with its byte length
fn scan_start_tag(s: &str) -> Option<(StartTag, usize)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'<' || !bytes[1].is_ascii_alphabetic() {
        return None;
    }

    let mut i = 1;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
        i += 1;
    }
    let name = s[1..i].to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i) {
            None => return None,
            Some(b'>') => {
                return Some((StartTag { name, attrs, self_closing: false }, i + 1));
            }
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => {
                return Some((StartTag { name, attrs, self_closing: true }, i + 2));
            }
            Some(b'/') => {
                i += 1;
                continue;
            }
            Some(_) => {}
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let attr_name = s[name_start..i].to_ascii_lowercase();

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes.get(j) != Some(&b'=') {
            attrs.push(Attribute { name: attr_name, value: None, span: None });
            continue;
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }

        let span = match bytes.get(j) {
            None => return None,
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let close = s[j + 1..].find(quote as char)? + j + 1;
                i = close + 1;
                (j + 1)..close
            }
            Some(_) => {
                let start = j;
                while j < bytes.len() && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                    j += 1;
                }
                i = j;
                start..j
            }
        };
        attrs.push(Attribute {
            name: attr_name,
            value: Some(s[span.clone()].to_string()),
            span: Some(span),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<!DOCTYPE html>
<html class="no-js">
    <head>
        <title>Page <script> not a tag</title>
        <link rel="stylesheet" href="css/main.css">
        <!-- a comment -->
        <script src='js/vendor/modernizr-2.6.2.min.js'></script>
    </head>
    <body>
        <p>Hello</p>
        <script>var a = "<b>";</script>
        <SCRIPT SRC="js/main.js"></SCRIPT>
    </body>
</html>
"#;

    #[test]
    fn test_round_trip_is_lossless() {
        assert_eq!(Document::parse(PAGE).to_html(), PAGE);
    }

    #[test]
    fn test_finds_reference_elements() {
        let doc = Document::parse(PAGE);
        let refs: Vec<_> = doc
            .elements()
            .map(|(_, el)| (el.kind(), el.reference().map(str::to_string)))
            .collect();

        assert_eq!(
            refs,
            vec![
                (ElementKind::Link, Some("css/main.css".to_string())),
                (ElementKind::Script, Some("js/vendor/modernizr-2.6.2.min.js".to_string())),
                (ElementKind::Script, None),
                (ElementKind::Script, Some("js/main.js".to_string())),
            ]
        );
    }

    #[test]
    fn test_script_body_is_raw_text() {
        let doc = Document::parse(PAGE);
        let (_, inline) = doc.inline_scripts().next().unwrap();
        assert_eq!(inline.body(), r#"var a = "<b>";"#);
    }

    #[test]
    fn test_comments_are_nodes() {
        let doc = Document::parse(PAGE);
        let comments: Vec<_> = doc
            .nodes()
            .iter()
            .filter_map(|n| match n {
                Node::Comment(c) => Some(c.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(comments, vec!["<!-- a comment -->"]);
    }

    #[test]
    fn test_with_attr_keeps_rest_of_tag() {
        let doc = Document::parse(r#"<link rel="stylesheet" href="css/main.css" media="all">"#);
        let (_, link) = doc.elements().next().unwrap();
        let moved = link.with_attr("href", "styles/main.css");

        assert_eq!(moved.attr("href"), Some("styles/main.css"));
        assert_eq!(moved.attr("media"), Some("all"));
        let mut html = String::new();
        moved.write_html(&mut html);
        assert_eq!(html, r#"<link rel="stylesheet" href="styles/main.css" media="all">"#);
    }

    #[test]
    fn test_unquoted_and_boolean_attributes() {
        let doc = Document::parse("<script src=js/plugins.js async></script>");
        let (_, script) = doc.elements().next().unwrap();
        assert_eq!(script.attr("src"), Some("js/plugins.js"));
        assert_eq!(script.attr("async"), Some(""));
        assert!(!script.is_inline_script());
    }

    #[test]
    fn test_rebuild_drops_whole_lines() {
        let html = "<head>\n    <link href=\"a.css\">\n    <link href=\"b.css\">\n</head>\n";
        let doc = Document::parse(html);
        let decisions = doc
            .nodes()
            .iter()
            .map(|node| match node {
                Node::Element(el) if el.reference() == Some("a.css") => None,
                other => Some(other.clone()),
            })
            .collect();

        assert_eq!(
            doc.rebuild(decisions).to_html(),
            "<head>\n    <link href=\"b.css\">\n</head>\n"
        );
    }

    #[test]
    fn test_rebuild_keeps_inline_neighbours() {
        let html = "<p>before <script src=\"x.js\"></script> after</p>";
        let doc = Document::parse(html);
        let decisions = doc
            .nodes()
            .iter()
            .map(|node| match node {
                Node::Element(_) => None,
                other => Some(other.clone()),
            })
            .collect();

        assert_eq!(doc.rebuild(decisions).to_html(), "<p>before  after</p>");
    }
}
