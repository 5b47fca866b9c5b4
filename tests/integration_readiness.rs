use ratatui::layout::Rect;

use term_dock::errors::DockError;
use term_dock::frame::Frame;
use term_dock::scene::{BootBehavior, Role, Scene};
use term_dock::token::InstanceToken;

fn scene_with(boot: BootBehavior) -> (Scene, term_dock::scene::NodeId) {
    let mut scene = Scene::with_boot(
        Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        },
        boot,
    );
    let container = scene.create(Role::Container);
    scene.append(scene.root(), container);
    scene.node_mut(container).rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 3,
    };
    (scene, container)
}

fn drive_until_first_resize(frame: &mut Frame) -> Vec<&'static str> {
    let mut events = Vec::new();
    for _ in 0..10 {
        if frame.tick() {
            events.push("load");
        }
        frame.set_viewport(80, 3);
        frame.flush_sizes();
        for _ in frame.take_resize_reports() {
            events.push("resize");
        }
        if events.contains(&"resize") {
            break;
        }
    }
    events
}

#[test]
fn load_precedes_resize_with_synchronous_readiness() {
    let (mut scene, container) = scene_with(BootBehavior::Immediate);
    let token = InstanceToken::generate();
    let mut frame = Frame::new(&mut scene, container, &token).unwrap();
    let events = drive_until_first_resize(&mut frame);
    assert_eq!(events.first(), Some(&"load"));
    assert!(events.contains(&"resize"));
}

#[test]
fn load_precedes_resize_with_asynchronous_readiness() {
    let (mut scene, container) = scene_with(BootBehavior::Deferred);
    let token = InstanceToken::generate();
    let mut frame = Frame::new(&mut scene, container, &token).unwrap();
    let events = drive_until_first_resize(&mut frame);
    assert_eq!(events.first(), Some(&"load"));
    assert!(events.contains(&"resize"));
}

#[test]
fn both_signal_sources_produce_one_transition() {
    // An Immediate backend reports readiness at attach and still delivers
    // the queued boot event; the latch must collapse the pair.
    let (mut scene, container) = scene_with(BootBehavior::Immediate);
    let token = InstanceToken::generate();
    let mut frame = Frame::new(&mut scene, container, &token).unwrap();
    let transitions = (0..10).filter(|_| frame.tick()).count();
    assert_eq!(transitions, 1);
}

#[test]
fn structural_accessors_are_gated_on_readiness() {
    let (mut scene, container) = scene_with(BootBehavior::Deferred);
    let token = InstanceToken::generate();
    let mut frame = Frame::new(&mut scene, container, &token).unwrap();

    assert_eq!(frame.document().unwrap_err(), DockError::NotReady);
    assert_eq!(frame.head().unwrap_err(), DockError::NotReady);
    assert_eq!(frame.body().unwrap_err(), DockError::NotReady);

    while !frame.tick() {}

    assert!(frame.document().is_ok());
    assert!(frame.head().is_ok());
    // The body accessor synthesizes rather than failing.
    let body = frame.body().unwrap();
    assert_eq!(frame.document().unwrap().body(), Some(body));
}

#[test]
fn construction_rejects_detached_hosts() {
    let (mut scene, _) = scene_with(BootBehavior::Deferred);
    let loose = scene.create(Role::Container);
    let token = InstanceToken::generate();
    assert_eq!(
        Frame::new(&mut scene, loose, &token).unwrap_err(),
        DockError::InvalidHost
    );
}

#[test]
fn visibility_is_independent_of_load_state() {
    let (mut scene, container) = scene_with(BootBehavior::Deferred);
    let token = InstanceToken::generate();
    let mut frame = Frame::new(&mut scene, container, &token).unwrap();
    frame.set_visible(&mut scene, true);
    assert!(frame.visible());
    assert!(!frame.is_loaded());
    while !frame.tick() {}
    assert!(frame.visible());
}
