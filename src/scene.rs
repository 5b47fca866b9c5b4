//! The host-side scene: a retained node tree the dock mounts into.
//
//! The scene plays the role of the host document. Nodes carry an optional
//! element id, a class set, and a rect relative to their parent; style nodes
//! carry a `StyleSheet` that governs their siblings and descendants. The
//! dock only ever touches nodes it created, and all of its ids and class
//! names are token-scoped, so several docks can share one scene.

use std::collections::BTreeSet;

use ratatui::layout::Rect;

use crate::style::{StyleProps, StyleSheet};

/// Handle into the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// What a node is, for rendering and hit-testing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Root,
    /// Positioned dock container.
    Container,
    /// Pointer-capture overlay sized to the embedded content rect.
    Overlay,
    /// Embedded surface mount point.
    Surface,
    /// Carrier for an injected stylesheet.
    Style,
}

/// How embedded surfaces attached to this scene report readiness.
///
/// Terminal backends differ the same way browsers do: some finish booting a
/// trivial surface while the attach call is still on the stack, others only
/// signal through a queued boot event. The frame must tolerate both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootBehavior {
    /// Readiness reported synchronously at attach (a queued boot event may
    /// still follow and must be ignored).
    Immediate,
    /// Readiness reported only via a queued boot event on a later tick.
    #[default]
    Deferred,
}

#[derive(Debug)]
pub struct Node {
    pub role: Role,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    /// Rect relative to the parent node (the root's rect is absolute).
    pub rect: Rect,
    pub visible: bool,
    pub sheet: Option<StyleSheet>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(role: Role) -> Self {
        Self {
            role,
            id: None,
            classes: BTreeSet::new(),
            rect: Rect::default(),
            visible: true,
            sheet: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    root: NodeId,
    area: Rect,
    boot: BootBehavior,
}

impl Scene {
    pub fn new(area: Rect) -> Self {
        Self::with_boot(area, BootBehavior::default())
    }

    pub fn with_boot(area: Rect, boot: BootBehavior) -> Self {
        let mut root = Node::new(Role::Root);
        root.rect = area;
        Self {
            nodes: vec![root],
            root: NodeId(0),
            area,
            boot,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn boot_behavior(&self) -> BootBehavior {
        self.boot
    }

    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.nodes[self.root.0].rect = area;
    }

    pub fn create(&mut self, role: Role) -> NodeId {
        self.nodes.push(Node::new(role));
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none(), "node already attached");
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Detach `node` (and with it, its subtree) from the scene.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// True when `node` is reachable from the scene root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut cursor = node;
        loop {
            if cursor == self.root {
                return true;
            }
            match self.nodes[cursor.0].parent {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    /// Replace the node's class set wholesale. State transitions always
    /// rebuild the full set, which keeps the exactly-one-of invariants
    /// trivially true.
    pub fn set_classes<I, S>(&mut self, node: NodeId, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = classes.into_iter().map(Into::into).collect();
        self.nodes[node.0].classes = set;
    }

    /// Absolute rect of `node`, accumulated from the root.
    pub fn screen_rect(&self, node: NodeId) -> Rect {
        let mut rect = self.nodes[node.0].rect;
        let mut cursor = self.nodes[node.0].parent;
        while let Some(parent) = cursor {
            let offset = self.nodes[parent.0].rect;
            rect.x = rect.x.saturating_add(offset.x);
            rect.y = rect.y.saturating_add(offset.y);
            cursor = self.nodes[parent.0].parent;
        }
        rect
    }

    /// Union of class names along the node's ancestor chain, node included.
    fn ancestry_classes(&self, node: NodeId) -> Vec<&str> {
        let mut out = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            out.extend(self.nodes[id.0].classes.iter().map(String::as_str));
            cursor = self.nodes[id.0].parent;
        }
        out
    }

    /// Sheets that govern `node`: every `Role::Style` child found while
    /// walking from the node up to the root.
    fn governing_sheets(&self, node: NodeId) -> Vec<&StyleSheet> {
        let mut out = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            for child in &self.nodes[id.0].children {
                if let Some(sheet) = &self.nodes[child.0].sheet {
                    out.push(sheet);
                }
            }
            cursor = self.nodes[id.0].parent;
        }
        out
    }

    /// Resolve the effective style properties for `node` from every sheet
    /// that governs it.
    pub fn resolve_props(&self, node: NodeId) -> StyleProps {
        let Some(target) = self.nodes[node.0].id.as_deref() else {
            return StyleProps::default();
        };
        let classes = self.ancestry_classes(node);
        let mut props = StyleProps::default();
        for sheet in self.governing_sheets(node) {
            props.merge(&sheet.resolve(target, classes.iter().copied()));
        }
        props
    }

    /// Whether `node` currently accepts pointer input per the active rules.
    pub fn pointer_accepts(&self, node: NodeId) -> bool {
        self.resolve_props(node).pointer.unwrap_or(false)
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}
