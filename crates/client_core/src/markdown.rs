//! Markdown narrative rendering.
//!
//! Raw HTML in the source is escaped and shown as text; nothing the service
//! returns reaches the output as markup. Link and image targets with a scheme
//! outside [`SAFE_URL_SCHEMES`] are blanked.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownBlock {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph(String),
    ListItem {
        depth: usize,
        ordinal: Option<u64>,
        text: String,
    },
    CodeBlock(String),
    Quote(String),
    Rule,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub html: String,
    pub blocks: Vec<MarkdownBlock>,
}

impl RenderedMarkdown {
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            MarkdownBlock::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> RenderedMarkdown;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkRenderer;

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, source: &str) -> RenderedMarkdown {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let events: Vec<Event<'_>> = Parser::new_ext(source, options)
            .map(sanitize_event)
            .collect();

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events.iter().cloned());

        RenderedMarkdown {
            html: out,
            blocks: BlockCollector::default().collect(events),
        }
    }
}

pub const SAFE_URL_SCHEMES: [&str; 6] = ["http", "https", "mailto", "irc", "ircs", "xmpp"];

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

/// Keeps relative URLs and allow-listed schemes; anything else becomes empty.
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let Some(colon) = url.find(':') else {
        return url;
    };
    // A `/`, `?` or `#` before the first colon means the colon is not a scheme separator.
    if url[..colon].contains(['/', '?', '#']) {
        return url;
    }
    let scheme = &url[..colon];
    if SAFE_URL_SCHEMES
        .iter()
        .any(|safe| scheme.eq_ignore_ascii_case(safe))
    {
        url
    } else {
        CowStr::Borrowed("")
    }
}

const CELL_SEPARATOR: &str = " | ";

struct ListFrame {
    next: Option<u64>,
    current: Option<u64>,
}

#[derive(Default)]
struct BlockCollector {
    blocks: Vec<MarkdownBlock>,
    buf: String,
    heading: Option<u8>,
    lists: Vec<ListFrame>,
    quote_depth: usize,
    in_code: bool,
}

impl BlockCollector {
    fn collect(mut self, events: Vec<Event<'_>>) -> Vec<MarkdownBlock> {
        for event in events {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    self.flush();
                    self.heading = Some(level as u8);
                }
                Event::End(TagEnd::Heading(_)) => {
                    self.flush();
                    self.heading = None;
                }
                Event::Start(Tag::List(start)) => {
                    self.flush();
                    self.lists.push(ListFrame {
                        next: start,
                        current: None,
                    });
                }
                Event::End(TagEnd::List(_)) => {
                    self.flush();
                    self.lists.pop();
                }
                Event::Start(Tag::Item) => {
                    if let Some(frame) = self.lists.last_mut() {
                        frame.current = frame.next;
                        frame.next = frame.next.map(|n| n + 1);
                    }
                }
                Event::Start(Tag::BlockQuote(_)) => {
                    self.flush();
                    self.quote_depth += 1;
                }
                Event::End(TagEnd::BlockQuote(_)) => {
                    self.flush();
                    self.quote_depth = self.quote_depth.saturating_sub(1);
                }
                Event::Start(Tag::CodeBlock(_)) => {
                    self.flush();
                    self.in_code = true;
                }
                Event::End(TagEnd::CodeBlock) => {
                    self.flush();
                    self.in_code = false;
                }
                Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::HtmlBlock) => self.flush(),
                Event::End(TagEnd::TableRow | TagEnd::TableHead) => {
                    let trimmed = self.buf.trim_end_matches(CELL_SEPARATOR).len();
                    self.buf.truncate(trimmed);
                    self.flush();
                }
                Event::End(TagEnd::TableCell) => self.buf.push_str(CELL_SEPARATOR),
                Event::Text(text) | Event::Code(text) => self.push(text),
                Event::SoftBreak => {
                    let sep = if self.in_code { "\n" } else { " " };
                    self.buf.push_str(sep);
                }
                Event::HardBreak => self.buf.push('\n'),
                Event::Rule => {
                    self.flush();
                    self.blocks.push(MarkdownBlock::Rule);
                }
                _ => {}
            }
        }
        self.flush();
        self.blocks
    }

    fn push(&mut self, text: CowStr<'_>) {
        self.buf.push_str(&text);
    }

    fn flush(&mut self) {
        let raw = std::mem::take(&mut self.buf);
        let text = if self.in_code {
            raw.trim_end_matches('\n').to_string()
        } else {
            raw.trim().to_string()
        };
        if text.is_empty() {
            return;
        }

        let block = if self.in_code {
            MarkdownBlock::CodeBlock(text)
        } else if let Some(level) = self.heading {
            MarkdownBlock::Heading { level, text }
        } else if let Some(frame) = self.lists.last() {
            MarkdownBlock::ListItem {
                depth: self.lists.len() - 1,
                ordinal: frame.current,
                text,
            }
        } else if self.quote_depth > 0 {
            MarkdownBlock::Quote(text)
        } else {
            MarkdownBlock::Paragraph(text)
        };
        self.blocks.push(block);
    }
}
