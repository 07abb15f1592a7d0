//! Markdown → ratatui `Text` for message bodies.
//!
//! Supports what analysis results and chat replies actually use: bold,
//! italic, strikethrough, inline code, headings, rules, bullet and numbered
//! lists, blockquotes, fenced code and links. Every newline in the source
//! becomes a line break, blank runs included. Raw HTML and anything else
//! in angle brackets is shown as written; nothing is escaped or sanitized.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const RULE_WIDTH: usize = 40;
const GUTTER: &str = "│ ";

/// Render a message body in the given base color.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut renderer = Renderer::new(content, base_fg);
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH);
    for (event, range) in parser.into_offset_iter() {
        renderer.event(event, range);
    }
    Text::from(renderer.lines)
}

enum ListKind {
    Bullet,
    Numbered(u64),
}

struct Renderer {
    base: Style,
    lines: Vec<Line<'static>>,
    /// Open inline styles, innermost last.
    inline: Vec<Modifier>,
    quote_depth: usize,
    in_code: bool,
    lists: Vec<ListKind>,
    link: Option<String>,
    /// Blank line(s) are owed before the next block.
    gap: bool,
    /// Source offset where the last block ended.
    block_end: Option<usize>,
    /// Byte offsets of every '\n' in the source.
    newlines: Vec<usize>,
    /// A list item marker was just written; its first paragraph joins it.
    item_open: bool,
}

impl Renderer {
    fn new(source: &str, base_fg: Color) -> Self {
        Self {
            base: Style::default().fg(base_fg),
            lines: Vec::new(),
            inline: Vec::new(),
            quote_depth: 0,
            in_code: false,
            lists: Vec::new(),
            link: None,
            gap: false,
            block_end: None,
            newlines: source.match_indices('\n').map(|(i, _)| i).collect(),
            item_open: false,
        }
    }

    /// Zero-based source line containing byte `pos`.
    fn line_of(&self, pos: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < pos)
    }

    fn close_block(&mut self, end: usize) {
        self.gap = true;
        self.block_end = Some(end);
    }

    fn current_style(&self) -> Style {
        let mut style = self
            .inline
            .iter()
            .fold(self.base, |s, m| s.add_modifier(*m));
        if self.link.is_some() {
            style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    /// Start a fresh line carrying the quote/code gutter.
    fn line_break(&mut self) {
        let gutters = self.quote_depth + usize::from(self.in_code);
        let spans = (0..gutters)
            .map(|_| Span::styled(GUTTER, Style::default().fg(Color::DarkGray)))
            .collect::<Vec<_>>();
        self.lines.push(Line::from(spans));
    }

    /// Emit the blank lines between the previous block and one starting at
    /// `start`: as many as the source has, and at least one.
    fn settle_gap(&mut self, start: usize) {
        if !std::mem::take(&mut self.gap) {
            return;
        }
        let blanks = match self.block_end {
            Some(end) if end > 0 => self
                .line_of(start)
                .saturating_sub(self.line_of(end - 1) + 1),
            _ => 1,
        };
        for _ in 0..blanks.max(1) {
            self.lines.push(Line::default());
        }
    }

    fn emit(&mut self, span: Span<'static>) {
        if self.lines.is_empty() {
            self.line_break();
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start(tag, range.start),
            Event::End(tag) => self.end(tag, range.end),
            Event::Text(text) => self.text(&text),
            Event::InlineHtml(html) => {
                let style = self.current_style();
                self.emit(Span::styled(html.to_string(), style));
            }
            Event::Html(html) => {
                for html_line in html.lines() {
                    self.line_break();
                    self.emit(Span::styled(html_line.to_string(), self.base));
                }
            }
            Event::Code(code) => self.emit(Span::styled(
                code.to_string(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Event::SoftBreak | Event::HardBreak => self.line_break(),
            Event::Rule => {
                self.settle_gap(range.start);
                self.lines.push(Line::styled(
                    "─".repeat(RULE_WIDTH),
                    Style::default().fg(Color::DarkGray),
                ));
                self.close_block(range.end);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>, start: usize) {
        match tag {
            Tag::Paragraph => {
                // Loose list items wrap their text in a paragraph.
                if !std::mem::take(&mut self.item_open) {
                    self.settle_gap(start);
                    self.line_break();
                }
            }
            Tag::Heading { .. } => {
                self.settle_gap(start);
                self.line_break();
                self.inline.push(Modifier::BOLD);
            }
            Tag::BlockQuote(_) => {
                self.settle_gap(start);
                self.quote_depth += 1;
                self.inline.push(Modifier::ITALIC);
            }
            Tag::CodeBlock(_) => {
                self.settle_gap(start);
                self.in_code = true;
            }
            Tag::HtmlBlock => self.settle_gap(start),
            Tag::List(first) => {
                // A top-level list hugs the line above it.
                if self.lists.is_empty() {
                    self.gap = false;
                }
                self.lists.push(match first {
                    Some(n) => ListKind::Numbered(n),
                    None => ListKind::Bullet,
                });
            }
            Tag::Item => {
                self.line_break();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(ListKind::Numbered(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    Some(ListKind::Bullet) | None => format!("{indent}• "),
                };
                self.emit(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                self.item_open = true;
            }
            Tag::Emphasis => self.inline.push(Modifier::ITALIC),
            Tag::Strong => self.inline.push(Modifier::BOLD),
            Tag::Strikethrough => self.inline.push(Modifier::CROSSED_OUT),
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd, end: usize) {
        match tag {
            TagEnd::Paragraph | TagEnd::HtmlBlock => self.close_block(end),
            TagEnd::Heading(_) => {
                self.inline.pop();
                self.close_block(end);
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.inline.pop();
                self.close_block(end);
            }
            TagEnd::CodeBlock => {
                self.in_code = false;
                self.close_block(end);
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.close_block(end);
            }
            TagEnd::Item => self.item_open = false,
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.inline.pop();
            }
            TagEnd::Link => {
                if let Some(url) = self.link.take() {
                    self.emit(Span::styled(format!(" ({url})"), self.base));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        self.item_open = false;
        // Terminals draw \t as nothing.
        let text = text.replace('\t', "    ");
        if self.in_code {
            for code_line in text.lines() {
                self.line_break();
                self.emit(Span::styled(
                    code_line.to_string(),
                    Style::default().fg(Color::White),
                ));
            }
        } else {
            let style = self.current_style();
            self.emit(Span::styled(text, style));
        }
    }
}
