//! The isolated embedded surface a frame owns.
//
//! An embedded surface is a self-contained subdocument: its own node arena,
//! its own stylesheets, its own coordinate space. Nothing styles or measures
//! across the boundary in either direction; the only traffic is the boot
//! signal out and explicit structural access in (through the frame's gated
//! accessors).

use std::collections::BTreeSet;

use ratatui::layout::Rect;

use crate::errors::{DockError, DockResult};
use crate::scene::BootBehavior;
use crate::style::StyleSheet;
use crate::ui::UiFrame;

/// Handle into an embedded document's arena. Distinct from the host scene's
/// `NodeId` so the two trees cannot be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmbNodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbRole {
    Head,
    Body,
    Div,
    Style,
}

#[derive(Debug)]
pub struct EmbNode {
    pub role: EmbRole,
    pub classes: BTreeSet<String>,
    pub text: Option<String>,
    /// Declared size override; content without one is measured.
    pub size: Option<(u16, u16)>,
    pub sheet: Option<StyleSheet>,
    children: Vec<EmbNodeId>,
}

impl EmbNode {
    fn new(role: EmbRole) -> Self {
        Self {
            role,
            classes: BTreeSet::new(),
            text: None,
            size: None,
            sheet: None,
            children: Vec::new(),
        }
    }
}

/// The embedded document tree: a head holding stylesheets and a body holding
/// content. Fresh documents start structurally empty; the head is created by
/// the frame on load and the body is synthesized lazily on first access.
#[derive(Debug, Default)]
pub struct EmbeddedDocument {
    nodes: Vec<EmbNode>,
    head: Option<EmbNodeId>,
    body: Option<EmbNodeId>,
}

impl EmbeddedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: EmbNode) -> EmbNodeId {
        self.nodes.push(node);
        EmbNodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: EmbNodeId) -> &EmbNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: EmbNodeId) -> &mut EmbNode {
        &mut self.nodes[id.0]
    }

    pub fn head(&self) -> Option<EmbNodeId> {
        self.head
    }

    pub fn body(&self) -> Option<EmbNodeId> {
        self.body
    }

    /// Create the head if the document lacks one.
    pub fn ensure_head(&mut self) -> EmbNodeId {
        if let Some(head) = self.head {
            return head;
        }
        let head = self.push(EmbNode::new(EmbRole::Head));
        self.head = Some(head);
        head
    }

    /// The head, failing when the document unexpectedly lacks one.
    pub fn require_head(&self) -> DockResult<EmbNodeId> {
        self.head.ok_or(DockError::MissingExpectedNode("head"))
    }

    /// The body, synthesized on first access rather than failing.
    pub fn ensure_body(&mut self) -> EmbNodeId {
        if let Some(body) = self.body {
            return body;
        }
        let body = self.push(EmbNode::new(EmbRole::Body));
        self.body = Some(body);
        body
    }

    pub fn create_div(&mut self) -> EmbNodeId {
        self.push(EmbNode::new(EmbRole::Div))
    }

    pub fn create_text(&mut self, text: &str) -> EmbNodeId {
        let mut node = EmbNode::new(EmbRole::Div);
        node.size = Some((text.chars().count() as u16, 1));
        node.text = Some(text.to_string());
        self.push(node)
    }

    pub fn append(&mut self, parent: EmbNodeId, child: EmbNodeId) {
        self.nodes[parent.0].children.push(child);
    }

    pub fn children(&self, id: EmbNodeId) -> &[EmbNodeId] {
        &self.nodes[id.0].children
    }

    pub fn append_sheet(&mut self, head: EmbNodeId, sheet: StyleSheet) {
        let mut node = EmbNode::new(EmbRole::Style);
        node.sheet = Some(sheet);
        let id = self.push(node);
        self.append(head, id);
    }

    /// First element child of the body, if any. This is the holder in a
    /// loaded frame.
    pub fn first_body_child(&self) -> Option<EmbNodeId> {
        self.body
            .and_then(|body| self.nodes[body.0].children.first().copied())
    }

    /// Intrinsic size of `node`: declared size, else text extent, else the
    /// inline flow of its children (widths sum, heights max).
    pub fn measure(&self, node: EmbNodeId) -> (u16, u16) {
        if let Some(size) = self.nodes[node.0].size {
            return size;
        }
        if let Some(text) = &self.nodes[node.0].text {
            return (text.chars().count() as u16, 1);
        }
        let mut width = 0u16;
        let mut height = 0u16;
        for child in &self.nodes[node.0].children {
            let (w, h) = self.measure(*child);
            width = width.saturating_add(w);
            height = height.max(h);
        }
        (width, height)
    }

    /// Border box of `node` relative to the embedded viewport. Direct body
    /// children are centered horizontally at the top, per the baseline
    /// stylesheet; everything else flows inline inside its parent.
    pub fn border_box(&self, node: EmbNodeId, viewport: Rect) -> Rect {
        let (width, height) = self.measure(node);
        let is_body_child = self
            .body
            .map(|body| self.nodes[body.0].children.contains(&node))
            .unwrap_or(false);
        let x = if is_body_child {
            viewport.width.saturating_sub(width) / 2
        } else {
            0
        };
        Rect {
            x,
            y: 0,
            width,
            height,
        }
    }
}

/// The surface itself: an embedded document plus its boot plumbing.
///
/// Boot readiness is backend-dependent. An `Immediate` backend reports
/// readiness while `attach` is still on the stack *and* still delivers the
/// queued boot event afterwards, so both signal sources fire; a `Deferred`
/// backend only signals through the queue. Consumers must treat the two as
/// one latch.
#[derive(Debug)]
pub struct EmbeddedSurface {
    doc: EmbeddedDocument,
    viewport: Rect,
    ready_at_attach: bool,
    boot_queued: bool,
}

impl EmbeddedSurface {
    pub fn attach(boot: BootBehavior) -> Self {
        Self {
            doc: EmbeddedDocument::new(),
            viewport: Rect::default(),
            ready_at_attach: matches!(boot, BootBehavior::Immediate),
            boot_queued: true,
        }
    }

    pub fn ready_at_attach(&self) -> bool {
        self.ready_at_attach
    }

    /// Drain the queued boot event. Yields `true` exactly once.
    pub fn take_boot_event(&mut self) -> bool {
        std::mem::take(&mut self.boot_queued)
    }

    pub fn doc(&self) -> &EmbeddedDocument {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut EmbeddedDocument {
        &mut self.doc
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Rect {
            x: 0,
            y: 0,
            width,
            height,
        };
    }

    /// Paint the document's body content into the host buffer at `origin`,
    /// clipped to the surface extent.
    pub fn render(&self, ui: &mut UiFrame<'_>, origin: Rect, style: ratatui::style::Style) {
        let Some(body) = self.doc.body() else {
            return;
        };
        for child in self.doc.children(body) {
            let rect = self.doc.border_box(*child, self.viewport);
            let mut x = origin.x.saturating_add(rect.x);
            let y = origin.y.saturating_add(rect.y);
            for grand in std::iter::once(child).chain(self.doc.children(*child)) {
                if let Some(text) = &self.doc.node(*grand).text {
                    ui.draw_text(origin, x, y, text, style);
                    x = x.saturating_add(text.chars().count() as u16);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_synthesized_lazily() {
        let mut doc = EmbeddedDocument::new();
        assert!(doc.body().is_none());
        let body = doc.ensure_body();
        assert_eq!(doc.body(), Some(body));
        assert_eq!(doc.ensure_body(), body);
    }

    #[test]
    fn measure_sums_inline_children() {
        let mut doc = EmbeddedDocument::new();
        let body = doc.ensure_body();
        let holder = doc.create_div();
        doc.append(body, holder);
        let a = doc.create_text("abc");
        let b = doc.create_text("de");
        doc.append(holder, a);
        doc.append(holder, b);
        assert_eq!(doc.measure(holder), (5, 1));
    }

    #[test]
    fn body_children_are_centered() {
        let mut doc = EmbeddedDocument::new();
        let body = doc.ensure_body();
        let holder = doc.create_div();
        doc.append(body, holder);
        let text = doc.create_text("1234");
        doc.append(holder, text);
        let viewport = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 3,
        };
        let rect = doc.border_box(holder, viewport);
        assert_eq!(rect, Rect {
            x: 3,
            y: 0,
            width: 4,
            height: 1,
        });
    }

    #[test]
    fn boot_event_drains_once() {
        let mut surface = EmbeddedSurface::attach(BootBehavior::Deferred);
        assert!(!surface.ready_at_attach());
        assert!(surface.take_boot_event());
        assert!(!surface.take_boot_event());
    }

    #[test]
    fn immediate_backend_signals_twice() {
        let mut surface = EmbeddedSurface::attach(BootBehavior::Immediate);
        assert!(surface.ready_at_attach());
        // The queued event still arrives; the consumer's latch must absorb it.
        assert!(surface.take_boot_event());
    }
}
