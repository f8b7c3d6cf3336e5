//! In-memory model of the rendered output.
//!
//! The surface is the source of truth for what the user sees. Frontends never
//! read content back from their own views; they re-project the surface
//! whenever its generation changes.

use crate::tokenizer::LinkTarget;

/// Window target applied to every rendered link.
pub const LINK_TARGET: &str = "_blank";
/// Relationship applied to every rendered link (no opener, no referrer).
pub const LINK_REL: &str = "noopener noreferrer";

/// Visual state of the cursor marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Waiting at a prompt
    Idle,
    /// Characters are being appended
    Typing,
}

impl CursorMode {
    pub fn class_name(self) -> &'static str {
        match self {
            CursorMode::Idle => "idle",
            CursorMode::Typing => "typing",
        }
    }
}

/// Who produced a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Typed by the typewriter
    Output,
    /// Echoed user keystroke
    Input,
}

/// A link element and the characters revealed inside it so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    target: LinkTarget,
    text: String,
}

impl Link {
    pub fn target(&self) -> &LinkTarget {
        &self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One rendered unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Char { ch: char, origin: Origin },
    Break,
    Link(Link),
    Prompt(String),
}

/// Ordered rendered nodes plus the single cursor marker.
#[derive(Debug, Default)]
pub struct Surface {
    nodes: Vec<Node>,
    cursor: Option<CursorMode>,
    generation: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incremented on every mutation; frontends redraw when it changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn cursor(&self) -> Option<CursorMode> {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Remove every node and the cursor.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.cursor = None;
        self.touch();
    }

    pub fn push_char(&mut self, ch: char, origin: Origin) {
        self.nodes.push(Node::Char { ch, origin });
        self.touch();
    }

    pub fn push_break(&mut self) {
        self.nodes.push(Node::Break);
        self.touch();
    }

    pub fn push_prompt(&mut self, prompt: &str) {
        self.nodes.push(Node::Prompt(prompt.to_string()));
        self.touch();
    }

    /// Append an empty link element at the tail.
    pub fn open_link(&mut self, target: LinkTarget) {
        self.nodes.push(Node::Link(Link {
            target,
            text: String::new(),
        }));
        self.touch();
    }

    /// Append a character inside the tail link element.
    ///
    /// Returns false when the tail is not a link (the surface was cleared
    /// underneath the caller).
    pub fn push_link_char(&mut self, ch: char) -> bool {
        match self.nodes.last_mut() {
            Some(Node::Link(link)) => {
                link.text.push(ch);
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Remove the tail node if it is an echoed input character.
    pub fn pop_input_char(&mut self) -> Option<char> {
        match self.nodes.last() {
            Some(&Node::Char {
                ch,
                origin: Origin::Input,
            }) => {
                self.nodes.pop();
                self.touch();
                Some(ch)
            }
            _ => None,
        }
    }

    pub fn set_cursor(&mut self, mode: CursorMode) {
        if self.cursor != Some(mode) {
            self.cursor = Some(mode);
            self.touch();
        }
    }

    pub fn clear_cursor(&mut self) {
        if self.cursor.take().is_some() {
            self.touch();
        }
    }

    /// Number of echoed user characters currently rendered
    pub fn input_char_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| {
                matches!(
                    node,
                    Node::Char {
                        origin: Origin::Input,
                        ..
                    }
                )
            })
            .count()
    }

    /// Rendered text without the cursor marker.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Char { ch, .. } => out.push(*ch),
                Node::Break => out.push('\n'),
                Node::Link(link) => out.push_str(&link.text),
                Node::Prompt(prompt) => out.push_str(prompt),
            }
        }
        out
    }

    /// HTML projection for a `white-space: pre` container.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Char { ch, .. } => push_escaped_char(&mut out, *ch),
                Node::Break => out.push('\n'),
                Node::Link(link) => {
                    out.push_str("<a href=\"");
                    push_escaped(&mut out, &link.target.href());
                    out.push_str("\" target=\"");
                    out.push_str(LINK_TARGET);
                    out.push_str("\" rel=\"");
                    out.push_str(LINK_REL);
                    out.push_str("\">");
                    push_escaped(&mut out, &link.text);
                    out.push_str("</a>");
                }
                Node::Prompt(prompt) => push_escaped(&mut out, prompt),
            }
        }
        if let Some(mode) = self.cursor {
            out.push_str("<span class=\"cursor ");
            out.push_str(mode.class_name());
            out.push_str("\" aria-hidden=\"true\"></span>");
        }
        out
    }

    /// ANSI projection for a real terminal: links become OSC 8 hyperlinks,
    /// the cursor a block (typing) or underscore (idle) glyph.
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Char { ch, .. } => out.push(*ch),
                Node::Break => out.push_str("\r\n"),
                Node::Link(link) => {
                    out.push_str("\x1b]8;;");
                    out.push_str(&link.target.href());
                    out.push_str("\x1b\\\x1b[4m");
                    out.push_str(&link.text);
                    out.push_str("\x1b[24m\x1b]8;;\x1b\\");
                }
                Node::Prompt(prompt) => out.push_str(prompt),
            }
        }
        match self.cursor {
            Some(CursorMode::Typing) => out.push('█'),
            Some(CursorMode::Idle) => out.push('_'),
            None => {}
        }
        out
    }
}

fn push_escaped_char(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        push_escaped_char(out, ch);
    }
}
