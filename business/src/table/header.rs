//! Declarative, nested header trees.
//!
//! A [`HeaderSpec`] mirrors the shape of a row: every leaf describes one
//! displayed column, every group describes a nested object. Columns are the
//! leaves in depth-first order.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{AccessPath, CellContent, TableError};

/// Turns a raw field value into displayable content.
pub type Formatter = Arc<dyn Fn(&Value) -> CellContent + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// A single displayed column.
#[derive(Clone)]
pub struct Header {
    label: String,
    align: Align,
    min_width: Option<f32>,
    format: Option<Formatter>,
}

impl Header {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            align: Align::Left,
            min_width: None,
            format: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn format(mut self, format: impl Fn(&Value) -> CellContent + Send + Sync + 'static) -> Self {
        self.format = Some(Arc::new(format));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn alignment(&self) -> Align {
        self.align
    }

    pub fn width(&self) -> Option<f32> {
        self.min_width
    }

    /// Applies the formatter if one is declared, otherwise the raw rendering.
    pub fn render(&self, value: &Value) -> CellContent {
        match &self.format {
            Some(format) => format(value),
            None => CellContent::from_raw(value),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("label", &self.label)
            .field("align", &self.align)
            .field("min_width", &self.min_width)
            .field("format", &self.format.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum HeaderNode {
    Leaf(Header),
    Group(HeaderSpec),
}

/// Ordered header tree.
#[derive(Debug, Clone, Default)]
pub struct HeaderSpec {
    nodes: Vec<(String, HeaderNode)>,
}

impl HeaderSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaf(mut self, key: impl Into<String>, header: Header) -> Self {
        self.nodes.push((key.into(), HeaderNode::Leaf(header)));
        self
    }

    pub fn group(mut self, key: impl Into<String>, children: HeaderSpec) -> Self {
        self.nodes.push((key.into(), HeaderNode::Group(children)));
        self
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &HeaderNode)> {
        self.nodes.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves, i.e. displayed columns.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|(_, node)| match node {
                HeaderNode::Leaf(_) => 1,
                HeaderNode::Group(children) => children.leaf_count(),
            })
            .sum()
    }

    /// Derives the leaf paths in depth-first order.
    ///
    /// This is also where the tree gets validated: every leaf needs a
    /// label, every group needs children, and keys must be unique
    /// non-empty path segments.
    pub fn access_paths(&self) -> Result<Vec<AccessPath>, TableError> {
        let mut paths = Vec::with_capacity(self.leaf_count());
        self.collect_paths(None, &mut paths)?;
        Ok(paths)
    }

    /// Leaf columns paired with their headers, in depth-first order.
    pub fn columns(&self) -> Result<Vec<(AccessPath, Header)>, TableError> {
        self.access_paths()?
            .into_iter()
            .map(|path| self.header_at(&path).map(|header| (path, header.clone())))
            .collect()
    }

    fn collect_paths(
        &self,
        parent: Option<AccessPath>,
        paths: &mut Vec<AccessPath>,
    ) -> Result<(), TableError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());

        for (key, node) in &self.nodes {
            if key.is_empty() || key.contains('.') {
                return Err(TableError::InvalidKey { key: key.clone() });
            }
            if !seen.insert(key.as_str()) {
                return Err(TableError::DuplicateKey { key: key.clone() });
            }

            let path = match parent {
                Some(parent) => parent.child(key),
                None => AccessPath::new(key),
            };

            match node {
                HeaderNode::Leaf(header) if header.label.trim().is_empty() => {
                    return Err(TableError::MissingLabel {
                        key: path.to_string(),
                    });
                }
                HeaderNode::Leaf(_) => paths.push(path),
                HeaderNode::Group(children) if children.is_empty() => {
                    return Err(TableError::EmptyGroup {
                        key: path.to_string(),
                    });
                }
                HeaderNode::Group(children) => children.collect_paths(Some(path), paths)?,
            }
        }

        Ok(())
    }

    /// Looks up the leaf header at `path`.
    pub fn header_at(&self, path: &AccessPath) -> Result<&Header, TableError> {
        let unknown = || TableError::UnknownPath {
            path: path.to_string(),
        };

        let mut spec = self;
        let mut segments = path.segments().peekable();

        while let Some(segment) = segments.next() {
            let node = spec
                .nodes
                .iter()
                .find(|(key, _)| key == segment)
                .map(|(_, node)| node)
                .ok_or_else(unknown)?;

            match (node, segments.peek()) {
                (HeaderNode::Leaf(header), None) => return Ok(header),
                (HeaderNode::Group(children), Some(_)) => spec = children,
                _ => return Err(unknown()),
            }
        }

        Err(unknown())
    }
}
