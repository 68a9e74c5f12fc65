//! Structured doc comment rendering.

use javelin_ir::{DocComment, DocNode};

use super::Printer;
use crate::buffer::Emit;

impl Printer<'_> {
    /// Render a doc tree as a `/** ... */` block on lines of its own.
    pub(super) fn print_doc_comment(&mut self, doc: &DocComment) -> Emit {
        if !self.out.is_whitespace_line() {
            self.newline();
        }
        self.to_left_margin()?;
        self.print("/**")?;
        self.doc_line_break()?;
        for node in doc.first_sentence.iter().chain(&doc.body) {
            self.print_doc_node(node)?;
        }
        for tag in &doc.block_tags {
            self.doc_line_break()?;
            self.print_doc_node(tag)?;
        }
        self.newline();
        self.to_left_margin()?;
        self.print(" */")?;
        self.newline();
        self.to_left_margin()
    }

    /// Start a continuation line of the comment.
    fn doc_line_break(&mut self) -> Emit {
        self.newline();
        self.to_left_margin()?;
        self.print(" * ")
    }

    fn print_doc_nodes(&mut self, nodes: &[DocNode]) -> Emit {
        for node in nodes {
            self.print_doc_node(node)?;
        }
        Ok(())
    }

    fn print_doc_text(&mut self, text: &str) -> Emit {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.doc_line_break()?;
            }
            self.print(line)?;
        }
        Ok(())
    }

    /// `@tag content`, with the content separated only when present.
    fn print_block_tag(&mut self, name: &str, content: &[DocNode]) -> Emit {
        self.print("@")?;
        self.print(name)?;
        if !content.is_empty() {
            self.need_space()?;
            self.print_doc_nodes(content)?;
        }
        Ok(())
    }

    fn print_doc_node(&mut self, node: &DocNode) -> Emit {
        match node {
            DocNode::Text(text) => self.print_doc_text(text),
            DocNode::Entity(name) => {
                self.print("&")?;
                self.print(name)?;
                self.print(";")
            }

            DocNode::Link {
                plain,
                reference,
                label,
            } => {
                self.print(if *plain { "{@linkplain " } else { "{@link " })?;
                self.print(reference)?;
                if !label.is_empty() {
                    self.print(" ")?;
                    self.print_doc_nodes(label)?;
                }
                self.print("}")
            }
            DocNode::Code { literal, text } => {
                self.print(if *literal { "{@literal " } else { "{@code " })?;
                self.print_doc_text(text)?;
                self.print("}")
            }
            DocNode::Value(reference) => {
                self.print("{@value")?;
                if let Some(reference) = reference {
                    self.print(" ")?;
                    self.print(reference)?;
                }
                self.print("}")
            }
            DocNode::InheritDoc => self.print("{@inheritDoc}"),
            DocNode::DocRoot => self.print("{@docRoot}"),
            DocNode::UnknownInline { name, content } => {
                self.print("{@")?;
                self.print(name)?;
                if !content.is_empty() {
                    self.print(" ")?;
                    self.print_doc_nodes(content)?;
                }
                self.print("}")
            }

            DocNode::Param {
                name,
                is_type_param,
                description,
            } => {
                self.print("@param")?;
                self.need_space()?;
                if *is_type_param {
                    self.print("<")?;
                    self.print(name)?;
                    self.print(">")?;
                } else {
                    self.print(name)?;
                }
                if !description.is_empty() {
                    self.need_space()?;
                    self.print_doc_nodes(description)?;
                }
                Ok(())
            }
            DocNode::Throws {
                exception_keyword,
                name,
                description,
            } => {
                self.print(if *exception_keyword { "@exception" } else { "@throws" })?;
                self.need_space()?;
                self.print(name)?;
                if !description.is_empty() {
                    self.need_space()?;
                    self.print_doc_nodes(description)?;
                }
                Ok(())
            }
            DocNode::Return(content) => self.print_block_tag("return", content),
            DocNode::See(content) => self.print_block_tag("see", content),
            DocNode::Since(content) => self.print_block_tag("since", content),
            DocNode::Author(content) => self.print_block_tag("author", content),
            DocNode::Version(content) => self.print_block_tag("version", content),
            DocNode::Deprecated(content) => self.print_block_tag("deprecated", content),
            DocNode::Serial(content) => self.print_block_tag("serial", content),
            DocNode::UnknownBlock { name, content } => self.print_block_tag(name, content),
        }
    }
}
