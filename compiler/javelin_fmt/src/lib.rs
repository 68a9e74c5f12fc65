//! Javelin Printer
//!
//! Format-preserving printer for Java syntax trees.
//!
//! # Architecture
//!
//! A tree handed to the printer mixes subtrees shared with the parsed
//! baseline and subtrees built by a refactoring. Printing is one pass:
//!
//! 1. **Import pass**: [`imports`] decides how every generated type reference
//!    prints and which imports the file needs.
//! 2. **Render pass**: the printer walks the tree, copying unchanged subtrees
//!    from the original text and generating the rest per [`StyleConfig`].
//!
//! Besides the text, a print call reports where each tagged node ended up
//! and which copied regions still carry their old indentation.
//!
//! # Modules
//!
//! - [`buffer`]: output buffer with columns, margins and blank-line control
//! - [`config`]: the style policy
//! - [`width`]: single-line width estimation
//! - [`imports`]: name resolution and import planning
//! - [`header`]: declaration headers for outlines

pub mod buffer;
pub mod config;
pub mod dangling_else;
pub mod header;
pub mod imports;
mod original;
mod printer;
pub mod reindent;
pub mod span_map;
mod tokens;
pub mod width;

use std::ops::Range;

use javelin_ir::{CommentMap, DocMap, NodeId, SymbolTable, SyntaxTree, Tag};
use rustc_hash::FxHashMap;

pub use buffer::{Emit, OutputBuffer, Overflow, TrimObserver, UNLIMITED};
pub use config::{BracePlacement, BracesGeneration, StyleConfig, WrapStyle};
pub use dangling_else::has_dangling_else;
pub use header::{class_header, method_header, variable_header};
pub use imports::{ImportPlan, ResolvedNames};
pub use original::CopyRangeError;
pub use reindent::ReindentRegions;
pub use span_map::SpanMap;
pub use width::WidthEstimator;

use imports::ImportAnalysis;
use original::OriginalSource;
use printer::{Printer, PrinterParts};

/// Everything a print call reads.
#[derive(Copy, Clone)]
pub struct PrintInput<'a> {
    pub tree: &'a SyntaxTree,
    /// Text the baseline tree was parsed from.
    pub source: &'a str,
    pub style: &'a StyleConfig,
    pub comments: &'a CommentMap,
    pub docs: &'a DocMap,
    /// Nodes whose printed position the caller wants reported.
    pub tags: &'a FxHashMap<NodeId, Tag>,
    pub symbols: &'a SymbolTable,
    /// Offset of the output in the final document, added to every reported
    /// position.
    pub initial_offset: usize,
}

impl<'a> PrintInput<'a> {
    fn parts(&self, names: &'a ResolvedNames, added_imports: &'a [String]) -> PrinterParts<'a> {
        PrinterParts {
            tree: self.tree,
            source: self.source,
            style: self.style,
            comments: self.comments,
            docs: self.docs,
            tags: self.tags,
            names,
            added_imports,
            initial_offset: self.initial_offset,
        }
    }
}

/// Result of a print call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrintOutput {
    pub text: String,
    /// Printed range of every tagged node, offset by `initial_offset`.
    pub spans: SpanMap,
    /// Copied regions that keep their source indentation, offset by
    /// `initial_offset`.
    pub reindent_regions: Vec<Range<usize>>,
    /// Imports the printed text needs, including ones added to the import
    /// block.
    pub added_imports: Vec<String>,
}

/// Print a whole compilation unit.
#[tracing::instrument(level = "debug", skip_all)]
pub fn print_unit(input: &PrintInput<'_>, root: NodeId) -> PrintOutput {
    print(input, root)
}

/// Print any subtree, for example a member inserted into an existing class.
///
/// Imports the subtree needs are reported in
/// [`PrintOutput::added_imports`] for the caller to insert.
#[tracing::instrument(level = "debug", skip_all)]
pub fn print_node(input: &PrintInput<'_>, node: NodeId) -> PrintOutput {
    print(input, node)
}

fn print(input: &PrintInput<'_>, root: NodeId) -> PrintOutput {
    let original = OriginalSource::new(input.source, input.tree, input.comments);
    let plan = ImportAnalysis::analyze(
        input.tree,
        input.symbols,
        &input.style.imports,
        original,
        root,
    );
    let mut printer = Printer::new(input.parts(&plan.names, &plan.added));
    printer.print_root(root);
    let rendered = printer.finish();
    tracing::debug!(
        bytes = rendered.text.len(),
        spans = rendered.spans.len(),
        regions = rendered.reindent_regions.len(),
        "printed"
    );
    PrintOutput {
        text: rendered.text,
        spans: rendered.spans,
        reindent_regions: rendered.reindent_regions,
        added_imports: plan.added,
    }
}
