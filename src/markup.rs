//! Turns the HTML display document into styled terminal text.
//!
//! Only the handful of elements feeds actually use get special treatment;
//! anything else contributes its text content.  If the markup cannot be
//! parsed, tags are stripped and the text is shown plain.  `html_parser`
//! keeps an unclosed tag (a bare `<p>`, say) as literal text rather than
//! failing, so a tag-looking text node also counts as unparseable.

use html_escape::decode_html_entities;
use html_parser::{Dom, Node};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};
use tracing::debug;

const RULE_WIDTH: usize = 40;

/// Convert `html` into ratatui [`Text`].
pub fn to_text(html: &str) -> Text<'static> {
    match Dom::parse(html) {
        Ok(dom) if has_stray_tag(&dom.children) => {
            debug!("markup has unclosed tags, showing plain text");
            plain(html)
        }
        Ok(dom) => {
            let mut writer = Writer::default();
            writer.nodes(&dom.children, Style::default());
            writer.finish()
        }
        Err(e) => {
            debug!(error = %e, "markup not parseable, showing plain text");
            plain(html)
        }
    }
}

/// A text node holding `<name` or `</name` is a tag the parser gave up on.
/// Raw text nodes are still entity-encoded, so a real `<` would be `&lt;`.
fn has_stray_tag(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::Text(s) => s.match_indices('<').any(|(i, _)| {
            s[i + 1..]
                .trim_start_matches('/')
                .starts_with(|c: char| c.is_ascii_alphabetic())
        }),
        Node::Element(el) => has_stray_tag(&el.children),
        Node::Comment(_) => false,
    })
}

#[derive(Default)]
struct Writer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    /// The last thing written was whitespace (or nothing), so collapse more.
    trailing_space: bool,
}

impl Writer {
    fn nodes(&mut self, nodes: &[Node], style: Style) {
        for node in nodes {
            self.node(node, style);
        }
    }

    fn node(&mut self, node: &Node, style: Style) {
        let el = match node {
            Node::Text(s) => return self.text(s, style),
            Node::Comment(_) => return,
            Node::Element(el) => el,
        };

        match el.name.to_ascii_lowercase().as_str() {
            "br" => self.newline(),
            "hr" => {
                self.break_block();
                self.lines.push(Line::styled(
                    "─".repeat(RULE_WIDTH),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            "b" | "strong" => self.nodes(&el.children, style.add_modifier(Modifier::BOLD)),
            "i" | "em" => self.nodes(&el.children, style.add_modifier(Modifier::ITALIC)),
            "u" => self.nodes(&el.children, style.add_modifier(Modifier::UNDERLINED)),
            "a" => self.nodes(
                &el.children,
                style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.break_block();
                self.nodes(&el.children, style.add_modifier(Modifier::BOLD));
                self.break_block();
            }
            "p" | "div" | "ul" | "ol" | "blockquote" | "figure" => {
                self.break_block();
                self.nodes(&el.children, style);
                self.break_block();
            }
            "li" => {
                self.break_block();
                self.current.push(Span::styled("• ", style));
                self.trailing_space = true;
                self.nodes(&el.children, style);
                self.break_block();
            }
            "img" | "script" | "style" | "head" | "iframe" => {}
            _ => self.nodes(&el.children, style),
        }
    }

    fn text(&mut self, raw: &str, style: Style) {
        let decoded = decode_html_entities(raw);
        let mut out = String::with_capacity(decoded.len());
        for ch in decoded.chars() {
            if ch.is_whitespace() {
                if !self.trailing_space {
                    out.push(' ');
                    self.trailing_space = true;
                }
            } else {
                out.push(ch);
                self.trailing_space = false;
            }
        }
        if !out.is_empty() {
            self.current.push(Span::styled(out, style));
        }
    }

    fn newline(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
        self.trailing_space = true;
    }

    /// End the current line if anything is on it.
    fn break_block(&mut self) {
        if !self.current.is_empty() {
            self.newline();
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.break_block();
        Text::from(self.lines)
    }
}

/// Strip tags, keeping line breaks for `<br>`, `<hr>`, and `<p>`.
fn plain(html: &str) -> Text<'static> {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => {
                let tag = rest[start + 1..start + end]
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                if matches!(tag.as_str(), "br" | "hr" | "p") {
                    out.push('\n');
                }
                rest = &rest[start + end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Text::from(decode_html_entities(&out).into_owned())
}
