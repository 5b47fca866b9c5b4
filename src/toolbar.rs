//! Thin public entry point wrapping a dock.

use crossterm::event::Event;

use crate::dock::Dock;
use crate::errors::{DockError, DockResult};
use crate::frame::Frame;
use crate::position::DockPosition;
use crate::scene::Scene;
use crate::surface::EmbNodeId;
use crate::ui::UiFrame;

/// A docked toolbar. Convenience shell over [`Dock`]; anything beyond
/// mounting content and toggling visibility should go through the dock
/// itself.
#[derive(Debug)]
pub struct Toolbar {
    dock: Dock,
}

impl Toolbar {
    pub fn new(
        scene: &mut Scene,
        position: DockPosition,
        on_load: impl FnMut(&mut Frame) + 'static,
    ) -> DockResult<Self> {
        Ok(Self {
            dock: Dock::new(scene, position, on_load)?,
        })
    }

    pub fn dock(&self) -> &Dock {
        &self.dock
    }

    pub fn dock_mut(&mut self) -> &mut Dock {
        &mut self.dock
    }

    /// The mount point for toolbar content: the first element child of the
    /// embedded body.
    pub fn root_node(&self) -> DockResult<EmbNodeId> {
        self.dock
            .frame()
            .document()?
            .first_body_child()
            .ok_or(DockError::MissingExpectedNode("root"))
    }

    pub fn visible(&self) -> bool {
        self.dock.frame().visible()
    }

    pub fn set_visible(&mut self, scene: &mut Scene, visible: bool) {
        self.dock.frame_mut().set_visible(scene, visible);
    }

    pub fn tick(&mut self, scene: &mut Scene) {
        self.dock.tick(scene);
    }

    pub fn handle_event(&mut self, scene: &mut Scene, event: &Event) -> bool {
        self.dock.handle_event(scene, event)
    }

    pub fn render(&self, scene: &Scene, ui: &mut UiFrame<'_>) {
        self.dock.render(scene, ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use crate::scene::BootBehavior;

    #[test]
    fn root_node_is_gated_then_present() {
        let mut scene = Scene::with_boot(
            Rect {
                x: 0,
                y: 0,
                width: 40,
                height: 12,
            },
            BootBehavior::Immediate,
        );
        let mut toolbar = Toolbar::new(&mut scene, DockPosition::N, |_| {}).unwrap();
        assert_eq!(toolbar.root_node().unwrap_err(), DockError::NotReady);
        for _ in 0..3 {
            toolbar.tick(&mut scene);
        }
        assert!(toolbar.root_node().is_ok());
    }

    #[test]
    fn visibility_passthrough() {
        let mut scene = Scene::new(Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 12,
        });
        let mut toolbar = Toolbar::new(&mut scene, DockPosition::N, |_| {}).unwrap();
        assert!(!toolbar.visible());
        toolbar.set_visible(&mut scene, true);
        assert!(toolbar.visible());
    }
}
