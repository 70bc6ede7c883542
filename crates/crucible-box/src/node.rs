//! Host element tree produced by box renders.

use crate::resolve::ResolvedStyle;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Handle the host assigns to a laid-out node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub(crate) fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Identifies one `LayoutEngine::compute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct LayoutPass(u64);

impl LayoutPass {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Slot the host fills with the handle of the rendered node.
///
/// The box forwards it untouched; the caller that created it keeps a clone
/// and reads the handle back after layout.
///
/// A handle is only meaningful for the layout pass that produced it: handles
/// are assigned in pre-order on every pass, so the same box can get a new one
/// when the tree shape changes. Each pass overwrites the handle left by an
/// earlier pass. Within a single pass the slot is write-once, so if one ref is
/// forwarded to several elements the first one built keeps it.
#[derive(Debug, Clone, Default)]
pub struct NodeRef(Rc<Cell<Option<(LayoutPass, NodeHandle)>>>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle from the most recent layout pass that reached this ref.
    pub fn get(&self) -> Option<NodeHandle> {
        self.0.get().map(|(_, handle)| handle)
    }

    pub fn is_populated(&self) -> bool {
        self.0.get().is_some()
    }

    /// Returns `false` if the slot was already filled during `pass`.
    pub(crate) fn populate(&self, pass: LayoutPass, handle: NodeHandle) -> bool {
        match self.0.get() {
            Some((filled, _)) if filled == pass => false,
            _ => {
                self.0.set(Some((pass, handle)));
                true
            }
        }
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Empty,
    Text(TextNode),
    Element(HostElement),
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub content: String,
}

/// One host render invocation: tag, resolved style, forwarded ref and the
/// children exactly as the caller passed them.
#[derive(Debug, Clone, PartialEq)]
pub struct HostElement {
    pub tag: &'static str,
    pub style: ResolvedStyle,
    pub node_ref: Option<NodeRef>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn as_element(&self) -> Option<&HostElement> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

pub fn text(content: impl Into<String>) -> Node {
    Node::Text(TextNode {
        content: content.into(),
    })
}

pub fn fragment(children: impl IntoIterator<Item = Node>) -> Node {
    Node::Fragment(children.into_iter().collect())
}

/// Builds a host element directly, bypassing a box instance. Useful for
/// static subtrees that never animate.
pub fn element(
    tag: &'static str,
    style: ResolvedStyle,
    children: impl IntoIterator<Item = Node>,
) -> Node {
    Node::Element(HostElement {
        tag,
        style,
        node_ref: None,
        children: children.into_iter().collect(),
    })
}
