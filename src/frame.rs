//! Frame: the embedded-surface lifecycle state machine.
//
//! A frame owns one isolated embedded surface mounted inside a dock
//! container. Readiness is a one-shot latch fed by two independent signal
//! sources (a synchronous at-attach report and a queued boot event), with a
//! one-tick settle deferral so the embedded document is stable before any
//! structural read. All structural accessors are gated on the `Loaded`
//! transition.

use ratatui::layout::Rect;
use tracing::debug;

use crate::constants::SETTLE_TICKS;
use crate::errors::{DockError, DockResult};
use crate::observer::SizeObserver;
use crate::scene::{NodeId, Role, Scene};
use crate::style;
use crate::surface::{EmbNodeId, EmbeddedDocument, EmbeddedSurface};
use crate::token::InstanceToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
}

#[derive(Debug)]
pub struct Frame {
    surface_node: NodeId,
    surface: EmbeddedSurface,
    observer: SizeObserver,
    holder: Option<EmbNodeId>,
    state: LoadState,
    ready_seen: bool,
    settle_after: u64,
    ticks: u64,
    visible: bool,
}

impl Frame {
    /// Mount a new embedded surface inside `container`.
    ///
    /// The container must already be attached to the scene; the surface
    /// element starts present and measurable but invisible, and never
    /// accepts pointer input on its own (the dock's class state drives
    /// that).
    pub fn new(
        scene: &mut Scene,
        container: NodeId,
        token: &InstanceToken,
    ) -> DockResult<Self> {
        if !scene.is_attached(container) {
            return Err(DockError::InvalidHost);
        }

        let surface_node = scene.create(Role::Surface);
        scene.node_mut(surface_node).id = Some(token.scoped("iframe"));
        scene.node_mut(surface_node).visible = false;
        let container_rect = scene.node(container).rect;
        scene.node_mut(surface_node).rect = Rect {
            x: 0,
            y: 0,
            width: container_rect.width,
            height: container_rect.height,
        };
        scene.append(container, surface_node);

        let surface = EmbeddedSurface::attach(scene.boot_behavior());
        let mut frame = Self {
            surface_node,
            surface,
            observer: SizeObserver::new(),
            holder: None,
            state: LoadState::NotLoaded,
            ready_seen: false,
            settle_after: 0,
            ticks: 0,
            visible: false,
        };
        if frame.surface.ready_at_attach() {
            frame.note_ready();
        }
        Ok(frame)
    }

    /// Record a readiness signal. Whichever source fires first wins; every
    /// later signal lands here and is absorbed by the latch.
    fn note_ready(&mut self) {
        if self.ready_seen {
            return;
        }
        self.ready_seen = true;
        self.settle_after = self.ticks + SETTLE_TICKS;
        debug!("embedded surface signaled ready");
    }

    /// Advance the lifecycle one tick. Returns `true` on the tick the frame
    /// completes its `Loaded` transition, which happens at most once.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;
        if self.surface.take_boot_event() {
            self.note_ready();
        }
        if self.ready_seen && self.state == LoadState::NotLoaded && self.ticks >= self.settle_after
        {
            self.settle();
            return true;
        }
        false
    }

    /// The settle step: baseline styling, holder creation and the start of
    /// size observation, in that order.
    fn settle(&mut self) {
        let doc = self.surface.doc_mut();
        let head = doc.ensure_head();
        doc.append_sheet(head, style::baseline_frame_sheet());
        let body = doc.ensure_body();
        let holder = doc.create_div();
        doc.append(body, holder);
        self.observer.observe(holder);
        self.holder = Some(holder);
        self.state = LoadState::Loaded;
        debug!("embedded surface loaded");
    }

    /// Diff observed boxes against their last reported state. A no-op until
    /// the frame is loaded, which is what keeps resize reports from ever
    /// preceding the load transition.
    pub fn flush_sizes(&mut self) {
        if self.state != LoadState::Loaded {
            return;
        }
        self.observer
            .flush(self.surface.doc(), self.surface.viewport());
    }

    /// Drain pending resize reports for the holder, in the order the
    /// underlying changes were seen. Reports for any other observed target
    /// are discarded.
    pub fn take_resize_reports(&mut self) -> Vec<Rect> {
        let holder = self.holder;
        self.observer
            .take_reports()
            .into_iter()
            .filter(|report| Some(report.target) == holder)
            .map(|report| report.rect)
            .collect()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn surface_node(&self) -> NodeId {
        self.surface_node
    }

    pub fn holder(&self) -> Option<EmbNodeId> {
        self.holder
    }

    /// Resize the embedded viewport to track its mount extent.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.surface.set_viewport(width, height);
    }

    pub fn surface(&self) -> &EmbeddedSurface {
        &self.surface
    }

    /// The embedded document. Fails with `NotReady` before the load
    /// transition.
    pub fn document(&self) -> DockResult<&EmbeddedDocument> {
        match self.state {
            LoadState::Loaded => Ok(self.surface.doc()),
            LoadState::NotLoaded => Err(DockError::NotReady),
        }
    }

    pub fn document_mut(&mut self) -> DockResult<&mut EmbeddedDocument> {
        match self.state {
            LoadState::Loaded => Ok(self.surface.doc_mut()),
            LoadState::NotLoaded => Err(DockError::NotReady),
        }
    }

    /// The embedded head. Fails with `NotReady` before load and with
    /// `MissingExpectedNode` if the loaded document somehow lacks one.
    pub fn head(&self) -> DockResult<EmbNodeId> {
        self.document()?.require_head()
    }

    /// The embedded body, synthesized lazily rather than failing.
    pub fn body(&mut self) -> DockResult<EmbNodeId> {
        if self.state != LoadState::Loaded {
            return Err(DockError::NotReady);
        }
        Ok(self.surface.doc_mut().ensure_body())
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Presentation-only visibility. Legal in any load state.
    pub fn set_visible(&mut self, scene: &mut Scene, visible: bool) {
        self.visible = visible;
        scene.node_mut(self.surface_node).visible = visible;
    }
}
