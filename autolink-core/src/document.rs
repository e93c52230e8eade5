//! The document model consumed by the rewriter, and a Markdown adapter that
//! builds it.
//!
//! The rewriter only needs to know three things about a document: where the
//! plain prose is (with exact byte ranges), which constructs must be left
//! alone together with everything inside them, and everything else. [`NodeKind`]
//! is that closed set. [`parse_document`] produces it from `pulldown-cmark`
//! events; code spans and code blocks never come out as `PlainText`.

use std::ops::Range;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};

/// What a node is, as far as rewriting is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Ordinary prose. `range` is a byte range into the parsed source and
    /// `text` is what the parser says that range contains.
    PlainText { range: Range<usize>, text: String },
    /// `[label](url)`, `<https://...>` autolinks and email autolinks.
    InlineLink,
    /// `![alt](url)`.
    InlineImage,
    /// `[label][ref]`, `[label][]` and `[label]` resolved through a definition.
    ReferenceLink,
    /// `![alt][ref]` and friends.
    ReferenceImage,
    /// Anything else: containers, code, HTML, breaks.
    Other,
}

impl NodeKind {
    /// Links and images are never rewritten, and neither is anything inside them.
    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            NodeKind::InlineLink
                | NodeKind::InlineImage
                | NodeKind::ReferenceLink
                | NodeKind::ReferenceImage
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new(NodeKind::Other)
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn text(range: Range<usize>, text: impl Into<String>) -> Self {
        Self::new(NodeKind::PlainText {
            range,
            text: text.into(),
        })
    }
}

/// Markdown extensions recognised when parsing messages.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Parses Markdown into the node tree the rewriter walks.
pub fn parse_document(source: &str) -> Node {
    let mut builder = TreeBuilder::new(source);
    for (event, range) in Parser::new_ext(source, markdown_options()).into_offset_iter() {
        builder.push_event(event, range);
    }
    builder.finish()
}

fn kind_for_tag(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Link { link_type, .. } if is_inline(*link_type) => NodeKind::InlineLink,
        Tag::Link { .. } => NodeKind::ReferenceLink,
        Tag::Image { link_type, .. } if is_inline(*link_type) => NodeKind::InlineImage,
        Tag::Image { .. } => NodeKind::ReferenceImage,
        _ => NodeKind::Other,
    }
}

fn is_inline(link_type: LinkType) -> bool {
    matches!(link_type, LinkType::Inline | LinkType::Autolink | LinkType::Email)
}

struct TreeBuilder<'a> {
    source: &'a str,
    stack: Vec<Node>,
    code_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            stack: vec![Node::default()],
            code_depth: 0,
        }
    }

    fn push_event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => {
                if matches!(tag, Tag::CodeBlock(_)) {
                    self.code_depth += 1;
                }
                self.stack.push(Node::new(kind_for_tag(&tag)));
            }
            Event::End(tag_end) => {
                if matches!(tag_end, TagEnd::CodeBlock) {
                    self.code_depth = self.code_depth.saturating_sub(1);
                }
                self.close();
            }
            // Text inside a code block is code, not prose.
            Event::Text(text) if self.code_depth == 0 => {
                self.push_child(Node::text(range, text.into_string()));
            }
            _ => self.push_child(Node::default()),
        }
    }

    fn close(&mut self) {
        if self.stack.len() > 1 {
            if let Some(node) = self.stack.pop() {
                self.push_child(node);
            }
        }
    }

    /// Appends to the open node, joining contiguous prose.
    ///
    /// The parser splits prose at potential delimiters (`_`, `*`, `[` ...) even
    /// when they end up as literal text. Left split, `foo_bar` would look like
    /// two words to the boundary check.
    fn push_child(&mut self, node: Node) {
        let source = self.source;
        let Some(parent) = self.stack.last_mut() else {
            return;
        };

        if let (
            Some(Node {
                kind: NodeKind::PlainText { range: prev_range, text: prev_text },
                ..
            }),
            NodeKind::PlainText { range, text },
        ) = (parent.children.last_mut(), &node.kind)
        {
            let contiguous = prev_range.end == range.start;
            let faithful = source.get(prev_range.clone()) == Some(prev_text.as_str())
                && source.get(range.clone()) == Some(text.as_str());
            if contiguous && faithful {
                prev_range.end = range.end;
                prev_text.push_str(text);
                return;
            }
        }

        parent.children.push(node);
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack.pop().unwrap_or_default()
    }
}
