//! Dock: the positioned, screen-edge-anchored toolbar container.
//
//! A dock owns its container/overlay nodes, one scoped stylesheet, and one
//! frame. Placement derives from a 16-way compass position; interaction
//! capture is a strict two-state machine (outside/inside) driven by pointer
//! containment over the overlay and the embedded surface. All styling
//! consequences flow through class sets and the scoped sheet, never through
//! direct property writes.

use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tracing::debug;

use crate::errors::DockResult;
use crate::frame::Frame;
use crate::position::{DockPosition, Orientation};
use crate::scene::{rect_contains, NodeId, Role, Scene};
use crate::style::{scoped_dock_sheet, Shadow};
use crate::theme;
use crate::token::InstanceToken;
use crate::ui::UiFrame;

/// Invoked exactly once, when the dock's frame finishes loading. This is
/// where callers populate the embedded body with their toolbar content.
pub type LoadCallback = Box<dyn FnMut(&mut Frame)>;

pub struct Dock {
    token: InstanceToken,
    container: NodeId,
    overlay: NodeId,
    frame: Frame,
    position: DockPosition,
    /// Latest content rect reported by the frame, relative to the embedded
    /// viewport.
    content: Rect,
    overlay_entered: bool,
    frame_entered: bool,
    inside: bool,
    on_load: Option<LoadCallback>,
}

impl Dock {
    pub fn new(
        scene: &mut Scene,
        position: DockPosition,
        on_load: impl FnMut(&mut Frame) + 'static,
    ) -> DockResult<Self> {
        let token = InstanceToken::generate();

        let container = scene.create(Role::Container);
        scene.node_mut(container).id = Some(token.scoped("dock"));
        scene.append(scene.root(), container);

        let sheet_node = scene.create(Role::Style);
        scene.node_mut(sheet_node).sheet = Some(scoped_dock_sheet(&token));
        scene.append(container, sheet_node);

        let frame = Frame::new(scene, container, &token)?;

        let overlay = scene.create(Role::Overlay);
        scene.node_mut(overlay).id = Some(token.scoped("overlay"));
        scene.append(container, overlay);

        let mut dock = Self {
            token,
            container,
            overlay,
            frame,
            position,
            content: Rect::default(),
            overlay_entered: false,
            frame_entered: false,
            inside: false,
            on_load: Some(Box::new(on_load)),
        };
        // Interaction state starts outside; placement classes are published
        // immediately so the container is styleable before load.
        dock.apply_position(scene);
        debug!(token = %dock.token, "dock created");
        Ok(dock)
    }

    /// Advance the dock one tick: pump the frame lifecycle, run the load
    /// callback on the load transition, and apply pending resize reports.
    /// The load callback always runs before the first resize report is
    /// applied.
    pub fn tick(&mut self, scene: &mut Scene) {
        let container_rect = scene.node(self.container).rect;
        let viewport_width = match self.position.metrics().orientation {
            Orientation::Horizontal => container_rect.width,
            Orientation::Vertical => self.content.width,
        };
        self.frame
            .set_viewport(viewport_width, container_rect.height.max(1));

        if self.frame.tick() {
            if let Some(mut on_load) = self.on_load.take() {
                on_load(&mut self.frame);
                self.on_load = Some(on_load);
            }
            self.apply_position(scene);
        }

        self.frame.flush_sizes();
        for rect in self.frame.take_resize_reports() {
            debug!(?rect, "content resized");
            self.content = rect;
            scene.node_mut(self.overlay).rect = rect;
            self.apply_placement(scene);
        }
    }

    /// Track pointer containment over the overlay and the embedded surface.
    /// Returns `true` when the event lands on an element that currently
    /// accepts pointer input per the scoped sheet.
    pub fn handle_event(&mut self, scene: &mut Scene, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        let overlay_rect = scene.screen_rect(self.overlay);
        let surface_rect = scene.screen_rect(self.frame.surface_node());
        let over_overlay = rect_contains(overlay_rect, mouse.column, mouse.row);
        let over_surface = rect_contains(surface_rect, mouse.column, mouse.row);

        let mut edged = false;
        if over_overlay != self.overlay_entered {
            self.overlay_entered = over_overlay;
            edged = true;
        }
        if over_surface != self.frame_entered {
            self.frame_entered = over_surface;
            edged = true;
        }
        if edged {
            self.update_capture(scene);
        }

        (over_overlay && scene.pointer_accepts(self.overlay))
            || (over_surface && scene.pointer_accepts(self.frame.surface_node()))
    }

    /// Recompute `inside` from the two containment flags and republish the
    /// class state. `inside` is never written directly.
    fn update_capture(&mut self, scene: &mut Scene) {
        let inside = self.overlay_entered || self.frame_entered;
        if inside != self.inside {
            self.inside = inside;
            debug!(inside, "capture state changed");
        }
        self.apply_classes(scene);
    }

    pub fn position(&self) -> DockPosition {
        self.position
    }

    /// Move the dock. Metrics are re-derived from scratch and the class
    /// lists on both documents rebuilt.
    pub fn set_position(&mut self, scene: &mut Scene, position: DockPosition) {
        self.position = position;
        self.apply_position(scene);
    }

    fn apply_position(&mut self, scene: &mut Scene) {
        self.apply_classes(scene);
        self.apply_placement(scene);
    }

    /// Publish the five semantic classes: token-scoped on the container,
    /// unscoped on the embedded body once the frame has loaded.
    fn apply_classes(&mut self, scene: &mut Scene) {
        let metrics = self.position.metrics();
        let capture = if self.inside { "inside" } else { "outside" };
        let mut semantic = vec![capture];
        semantic.extend(metrics.class_names());

        let scoped: Vec<String> = semantic.iter().map(|c| self.token.scoped(c)).collect();
        scene.set_classes(self.container, scoped);

        if self.frame.is_loaded()
            && let Ok(body) = self.frame.body()
            && let Ok(doc) = self.frame.document_mut()
        {
            doc.node_mut(body).classes = semantic.iter().map(|c| (*c).to_string()).collect();
        }
    }

    /// Re-anchor the container for the current metrics and content rect and
    /// keep the surface extent tracking it.
    fn apply_placement(&mut self, scene: &mut Scene) {
        let metrics = self.position.metrics();
        let rect = metrics.anchor(scene.area(), self.content);
        scene.node_mut(self.container).rect = rect;
        scene.node_mut(self.frame.surface_node()).rect = Rect {
            x: 0,
            y: 0,
            width: rect.width,
            height: rect.height,
        };
    }

    pub fn inside(&self) -> bool {
        self.inside
    }

    pub fn token(&self) -> &InstanceToken {
        &self.token
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    /// Detach the dock from the scene, tearing down the frame with it.
    pub fn remove(self, scene: &mut Scene) {
        scene.remove(self.container);
    }

    /// Paint the dock: background ramp when inside, then the embedded
    /// content with its resolved emphasis, then the shadow row.
    pub fn render(&self, scene: &Scene, ui: &mut UiFrame<'_>) {
        let rect = scene.screen_rect(self.container);
        let bounds = rect.intersection(ui.area());
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }

        let container_props = scene.resolve_props(self.container);
        if container_props.ramp == Some(true) {
            let bg = container_props.bg.unwrap_or_else(theme::ramp_top);
            ui.fill_bg(bounds, bg);
        }

        if !self.frame.visible() {
            return;
        }
        let surface_props = scene.resolve_props(self.frame.surface_node());
        let mut content_style = Style::default().fg(theme::frame_fg());
        if surface_props.dim == Some(true) {
            content_style = content_style.add_modifier(Modifier::DIM);
        }
        let surface_rect = scene.screen_rect(self.frame.surface_node());
        self.frame.surface().render(ui, surface_rect, content_style);

        if let Some(shadow) = surface_props.shadow {
            // The shadow row hangs below the container, so it clips to the
            // frame area rather than the container bounds.
            let overlay_rect = scene.screen_rect(self.overlay);
            let shadow_row = overlay_rect.y.saturating_add(overlay_rect.height);
            let color = match shadow {
                Shadow::Heavy => theme::shadow_heavy(),
                Shadow::Light => theme::shadow_light(),
            };
            let full = ui.area();
            ui.tint_row(full, shadow_row, overlay_rect.x, overlay_rect.width, color);
        }
    }
}

impl std::fmt::Debug for Dock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dock")
            .field("token", &self.token)
            .field("position", &self.position)
            .field("inside", &self.inside)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent, MouseEventKind};
    use crate::scene::BootBehavior;

    fn scene(boot: BootBehavior) -> Scene {
        Scene::with_boot(
            Rect {
                x: 0,
                y: 0,
                width: 80,
                height: 24,
            },
            boot,
        )
    }

    fn mouse_at(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn loaded_dock(scene: &mut Scene) -> Dock {
        let mut dock = Dock::new(scene, DockPosition::N, |frame| {
            let body = frame.body().unwrap();
            let doc = frame.document_mut().unwrap();
            let holder = doc.first_body_child().unwrap_or(body);
            let text = doc.create_text("toolbar");
            doc.append(holder, text);
        })
        .unwrap();
        for _ in 0..4 {
            dock.tick(scene);
        }
        dock
    }

    #[test]
    fn starts_outside_with_full_class_state() {
        let mut scene = scene(BootBehavior::Deferred);
        let dock = Dock::new(&mut scene, DockPosition::Nnw, |_| {}).unwrap();
        let classes = &scene.node(dock.container()).classes;
        assert!(classes.contains(&dock.token().scoped("outside")));
        assert!(classes.contains(&dock.token().scoped("edge_north")));
        assert!(classes.contains(&dock.token().scoped("justify_center")));
        assert!(classes.contains(&dock.token().scoped("justify_north")));
        assert!(classes.contains(&dock.token().scoped("horizontal")));
        assert_eq!(classes.len(), 5);
    }

    #[test]
    fn load_callback_runs_before_first_resize_application() {
        let mut scene = scene(BootBehavior::Deferred);
        let mut dock = Dock::new(&mut scene, DockPosition::N, |frame| {
            assert!(
                frame.take_resize_reports().is_empty(),
                "no resize may precede the load callback"
            );
            let body = frame.body().unwrap();
            let doc = frame.document_mut().unwrap();
            let holder = doc.first_body_child().unwrap_or(body);
            let text = doc.create_text("hi");
            doc.append(holder, text);
        })
        .unwrap();
        for _ in 0..4 {
            dock.tick(&mut scene);
        }
        // The synthesized report arrived and sized the overlay to content.
        assert_eq!(scene.node(dock.overlay()).rect.width, 2);
    }

    #[test]
    fn resize_reports_size_overlay_and_grow_container() {
        let mut scene = scene(BootBehavior::Immediate);
        let mut dock = loaded_dock(&mut scene);

        // Grow the content and pump one tick.
        {
            let doc = dock.frame_mut().document_mut().unwrap();
            let holder = doc.first_body_child().unwrap();
            let extra = doc.create_text(" more");
            doc.append(holder, extra);
        }
        dock.tick(&mut scene);

        let overlay = scene.node(dock.overlay()).rect;
        let container = scene.node(dock.container()).rect;
        assert_eq!(overlay.width, "toolbar more".chars().count() as u16);
        assert_eq!(container.height, overlay.bottom());
    }

    #[test]
    fn inside_is_the_or_of_both_flags() {
        let mut scene = scene(BootBehavior::Immediate);
        let mut dock = loaded_dock(&mut scene);
        let overlay = scene.screen_rect(dock.overlay());

        dock.handle_event(&mut scene, &mouse_at(overlay.x, overlay.y));
        assert!(dock.inside());

        // Surface containment holds the state even as the overlay flag drops
        // (the surface spans the container, so a point left of the overlay
        // is still over the surface).
        let surface = scene.screen_rect(dock.frame().surface_node());
        dock.handle_event(&mut scene, &mouse_at(surface.x, surface.y));
        assert!(!dock.overlay_entered);
        assert!(dock.frame_entered);
        assert!(dock.inside());

        // Leaving both drops the state.
        dock.handle_event(&mut scene, &mouse_at(79, 23));
        assert!(!dock.inside());
    }

    #[test]
    fn capture_flip_swaps_pointer_targets() {
        let mut scene = scene(BootBehavior::Immediate);
        let mut dock = loaded_dock(&mut scene);

        assert!(scene.pointer_accepts(dock.overlay()));
        assert!(!scene.pointer_accepts(dock.frame().surface_node()));

        let overlay = scene.screen_rect(dock.overlay());
        dock.handle_event(&mut scene, &mouse_at(overlay.x, overlay.y));
        assert!(dock.inside());
        assert!(!scene.pointer_accepts(dock.overlay()));
        assert!(scene.pointer_accepts(dock.frame().surface_node()));
    }

    #[test]
    fn position_mutation_rebuilds_both_class_lists() {
        let mut scene = scene(BootBehavior::Immediate);
        let mut dock = loaded_dock(&mut scene);

        dock.set_position(&mut scene, DockPosition::SeV);
        let classes = &scene.node(dock.container()).classes;
        assert!(classes.contains(&dock.token().scoped("edge_east")));
        assert!(classes.contains(&dock.token().scoped("vertical")));
        assert!(classes.contains(&dock.token().scoped("justify_south")));

        let body = dock.frame_mut().body().unwrap();
        let doc = dock.frame().document().unwrap();
        let body_classes = &doc.node(body).classes;
        assert!(body_classes.contains("edge_east"));
        assert!(body_classes.contains("outside"));
        assert!(body_classes.iter().all(|c| !c.contains('_') || !c.ends_with(dock.token().as_str())));
    }

    #[test]
    fn body_mirror_waits_for_load() {
        let mut scene = scene(BootBehavior::Deferred);
        let mut dock = Dock::new(&mut scene, DockPosition::N, |_| {}).unwrap();
        // Not loaded yet; mutating position must not touch the embedded doc.
        dock.set_position(&mut scene, DockPosition::S);
        assert!(dock.frame().document().is_err());
        for _ in 0..4 {
            dock.tick(&mut scene);
        }
        let body = dock.frame_mut().body().unwrap();
        let doc = dock.frame().document().unwrap();
        assert!(doc.node(body).classes.contains("edge_south"));
    }

    #[test]
    fn generated_nodes_follow_the_id_contract() {
        let mut scene = scene(BootBehavior::Deferred);
        let dock = Dock::new(&mut scene, DockPosition::N, |_| {}).unwrap();
        let token = dock.token();
        assert_eq!(
            scene.find_by_id(&token.scoped("dock")),
            Some(dock.container())
        );
        assert_eq!(
            scene.find_by_id(&token.scoped("overlay")),
            Some(dock.overlay())
        );
        assert_eq!(
            scene.find_by_id(&token.scoped("iframe")),
            Some(dock.frame().surface_node())
        );
        let sheet_scoped = scene.children(dock.container()).iter().any(|child| {
            scene
                .node(*child)
                .sheet
                .as_ref()
                .is_some_and(|sheet| sheet.is_scoped_by(token))
        });
        assert!(sheet_scoped, "the injected sheet must be token-scoped");
    }

    #[test]
    fn two_docks_never_share_token_or_classes() {
        let mut scene = scene(BootBehavior::Immediate);
        let a = loaded_dock(&mut scene);
        let b = loaded_dock(&mut scene);
        assert_ne!(a.token().as_str(), b.token().as_str());
        let a_classes = scene.node(a.container()).classes.clone();
        let b_classes = scene.node(b.container()).classes.clone();
        assert!(a_classes.is_disjoint(&b_classes));
    }
}
