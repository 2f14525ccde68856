//! Markdown to HTML fragment compiler.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use vmarkdown_highlight::{CodeHighlighter, escape_html};

use crate::inline::render_inline;
use crate::state::{CodeBlockState, ImageState, TableState};
use crate::util::{fence_language, heading_level_to_num};

/// Markdown renderer producing one HTML fragment.
///
/// Text runs go through the inline grammar extensions; fenced code blocks go
/// through the [`CodeHighlighter`]. Everything else follows standard markdown
/// semantics. Headings are emitted bare: identifiers, anchors and the table
/// of contents are added later on the parsed tree.
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    highlighter: CodeHighlighter,
}

impl MarkdownRenderer {
    /// Create a renderer with the default highlighter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_highlighter(CodeHighlighter::new())
    }

    /// Create a renderer with a custom code highlighter.
    #[must_use]
    pub fn with_highlighter(highlighter: CodeHighlighter) -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            highlighter,
        }
    }

    /// Parser options: tables, strikethrough, task lists and footnotes.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
    }

    /// Render markdown text to an HTML fragment.
    pub fn render_markdown(&mut self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::parser_options());
        self.render(TextMergeStream::new(parser))
    }

    /// Render markdown events to an HTML fragment.
    ///
    /// Adjacent text events should be merged beforehand (see
    /// [`TextMergeStream`]) so that extension sequences split by the parser,
    /// such as `[tag:name]`, are recognized.
    pub fn render<'a, I>(&mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        std::mem::take(&mut self.output)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                write!(self.output, "<code>{}</code>", escape_html(&code)).unwrap();
            }
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                if checked {
                    self.output
                        .push_str(r#"<input type="checkbox" checked disabled> "#);
                } else {
                    self.output.push_str(r#"<input type="checkbox" disabled> "#);
                }
            }
            Event::FootnoteReference(name) => {
                let name = escape_html(&name);
                write!(
                    self.output,
                    r##"<sup class="footnote-reference"><a href="#fn_{name}">{name}</a></sup>"##
                )
                .unwrap();
            }
            Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.output, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(language);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(name) => {
                write!(
                    self.output,
                    r#"<div class="footnote-definition" id="fn_{}">"#,
                    escape_html(&name)
                )
                .unwrap();
            }
            Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<del>"),
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                write!(self.output, r#"<a href="{}""#, escape_html(&dest_url)).unwrap();
                if !title.is_empty() {
                    write!(self.output, r#" title="{}""#, escape_html(&title)).unwrap();
                }
                self.output.push('>');
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as text events; the tag is written at the end.
                self.image.start(dest_url.into_string(), title.into_string());
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(level) => {
                writeln!(self.output, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => {
                let (language, content) = self.code.end();
                let html = self.highlighter.render(&content, language.as_deref());
                self.output.push_str(&html);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::FootnoteDefinition => self.output.push_str("</div>\n"),
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>\n"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>\n"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>\n"),
            TagEnd::Table => self.output.push_str("</tbody></table>\n"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</del>"),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
            TagEnd::Link => self.output.push_str("</a>"),
            TagEnd::Image => {
                if let Some((src, title, alt)) = self.image.end() {
                    write!(
                        self.output,
                        r#"<img src="{}" alt="{}""#,
                        escape_html(&src),
                        escape_html(&alt)
                    )
                    .unwrap();
                    if !title.is_empty() {
                        write!(self.output, r#" title="{}""#, escape_html(&title)).unwrap();
                    }
                    self.output.push('>');
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        // Priority: code > image alt > inline text
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }

        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }

        render_inline(text, &mut self.output);
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_str("\n");
        } else {
            self.output.push('\n');
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
