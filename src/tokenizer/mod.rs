/// Link detection for typed output lines
use regex::Regex;
use std::sync::OnceLock;

/// Combined URL / email pattern
static LINK_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get the compiled link regex pattern
fn link_regex() -> &'static Regex {
    LINK_REGEX.get_or_init(|| {
        // One alternation so URLs and emails are found in a single left-to-right
        // pass and can never overlap. The URL branch comes first so an address
        // embedded in a URL (https://user@host.io) stays part of the URL.
        // Email boundaries are ASCII word boundaries, so a letter like `é`
        // directly before an address does not swallow it.
        Regex::new(
            r"(?x)
            https?://\S+
            |
            (?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)
            ",
        )
        .expect("Failed to compile link regex")
    })
}

/// Where a link points once rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Email address, rendered as `mailto:<address>`
    Mailto(String),
    /// Web address, rendered unchanged
    Url(String),
}

impl LinkTarget {
    /// Classify the matched text of a link.
    pub fn classify(text: &str) -> Self {
        if text.contains('@') && !text.starts_with("http") {
            LinkTarget::Mailto(text.to_string())
        } else {
            LinkTarget::Url(text.to_string())
        }
    }

    /// The `href` value for this link
    pub fn href(&self) -> String {
        match self {
            LinkTarget::Mailto(address) => format!("mailto:{address}"),
            LinkTarget::Url(url) => url.clone(),
        }
    }
}

/// A classified span of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Link(String),
}

impl Token {
    /// The literal text covered by this token
    pub fn value(&self) -> &str {
        match self {
            Token::Text(value) | Token::Link(value) => value,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Token::Link(_))
    }

    /// Derived link target, `None` for plain text
    pub fn target(&self) -> Option<LinkTarget> {
        match self {
            Token::Text(_) => None,
            Token::Link(value) => Some(LinkTarget::classify(value)),
        }
    }
}

/// Split a line into text and link tokens.
///
/// Concatenating the values of the returned tokens reproduces `text` exactly.
/// Empty text spans are omitted.
pub fn tokenize_line(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for mat in link_regex().find_iter(text) {
        if mat.start() > last_end {
            tokens.push(Token::Text(text[last_end..mat.start()].to_string()));
        }
        tokens.push(Token::Link(mat.as_str().to_string()));
        last_end = mat.end();
    }

    if last_end < text.len() {
        tokens.push(Token::Text(text[last_end..].to_string()));
    }

    tokens
}
