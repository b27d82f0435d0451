use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template", "svg"];

/// Elements separated from their neighbours by a blank line
const PARAGRAPH_ELEMENTS: &[&str] = &["p"];

/// Elements separated from their neighbours by a line break
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "pre", "section", "table", "tr", "ul",
];

/// Flattens an HTML document to the text a reader would see in the body.
///
/// Whitespace inside text runs collapses to single spaces, block elements start new
/// lines and paragraphs are separated by a blank line, so that section
/// boundaries in the markup survive as blank-line boundaries in the text.
pub fn visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let body_selector = Selector::parse("body").expect("body selector should be valid");

    let mut builder = TextBuilder::default();
    for body in doc.select(&body_selector) {
        walk(body, &mut builder);
    }

    ::log::debug!("HTML flattened to {} chars of text", builder.out.len());
    builder.out
}

fn walk(element: ElementRef, builder: &mut TextBuilder) {
    let name = element.value().name();
    if HIDDEN_ELEMENTS.contains(&name) {
        return;
    }
    if name == "br" {
        builder.line_break(1);
        return;
    }

    let breaks = if PARAGRAPH_ELEMENTS.contains(&name) {
        2
    } else if BLOCK_ELEMENTS.contains(&name) {
        1
    } else {
        0
    };

    builder.line_break(breaks);
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            walk(child_element, builder);
        } else if let Node::Text(text) = child.value() {
            builder.push_text(text);
        }
    }
    builder.line_break(breaks);
}

#[derive(Default)]
struct TextBuilder {
    out: String,
    pending_breaks: usize,
    pending_space: bool,
}

impl TextBuilder {
    fn push_text(&mut self, text: &str) {
        let words = text.split_whitespace().collect::<Vec<_>>();
        if words.is_empty() {
            self.pending_space |= !text.is_empty();
            return;
        }

        if !self.out.is_empty() {
            if self.pending_breaks > 0 {
                self.out.push_str(&"\n".repeat(self.pending_breaks));
            } else if self.pending_space || text.starts_with(char::is_whitespace) {
                self.out.push(' ');
            }
        }

        self.out.push_str(&words.join(" "));
        self.pending_breaks = 0;
        self.pending_space = text.ends_with(char::is_whitespace);
    }

    fn line_break(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.pending_breaks = self.pending_breaks.max(count);
        self.pending_space = false;
    }
}
