use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use term_dock::constants::POLL_INTERVAL_MS;
use term_dock::drivers::InputDriver;
use term_dock::drivers::console::ConsoleDriver;
use term_dock::event_loop::{ControlFlow, EventLoop};
use term_dock::position::DockPosition;
use term_dock::scene::Scene;
use term_dock::toolbar::Toolbar;
use term_dock::tracing_sub;
use term_dock::ui::UiFrame;

#[derive(Debug, Parser)]
#[command(about = "Demo: a docked toolbar anchored to a screen edge")]
struct Args {
    /// Compass position the toolbar docks at.
    #[arg(long, value_enum, default_value = "n")]
    position: DockPosition,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_sub::init_default();

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut driver = ConsoleDriver::new();
    driver.set_mouse_capture(true)?;

    let result = run(&mut terminal, driver, args.position);

    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    driver: ConsoleDriver,
    position: DockPosition,
) -> io::Result<()> {
    let size = terminal.size()?;
    let mut scene = Scene::new(Rect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
    });

    let mut toolbar = Toolbar::new(&mut scene, position, |frame| {
        let Ok(body) = frame.body() else {
            return;
        };
        let Ok(doc) = frame.document_mut() else {
            return;
        };
        let holder = doc.first_body_child().unwrap_or(body);
        let label = doc.create_text(" demo toolbar | hover me ");
        doc.append(holder, label);
    })
    .map_err(|err| io::Error::other(err.to_string()))?;

    let mut event_loop = EventLoop::new(driver, Duration::from_millis(POLL_INTERVAL_MS));
    event_loop.run(|_, event| {
        match event {
            None => {
                toolbar.tick(&mut scene);
                if toolbar.dock().frame().is_loaded() && !toolbar.visible() {
                    toolbar.set_visible(&mut scene, true);
                }
                terminal.draw(|frame| {
                    let mut ui = UiFrame::new(frame);
                    toolbar.render(&scene, &mut ui);
                })?;
            }
            Some(Event::Resize(width, height)) => {
                scene.resize(Rect {
                    x: 0,
                    y: 0,
                    width,
                    height,
                });
            }
            Some(Event::Key(key))
                if key.code == KeyCode::Char('q')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(ControlFlow::Quit);
            }
            Some(event) => {
                toolbar.handle_event(&mut scene, &event);
            }
        }
        Ok(ControlFlow::Continue)
    })
}
