mod logging;
mod surface;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size},
    style::{Color, Style, Stylize},
    text::{Line, Span},
};
use waypoint_anim::{Animation, AnimationError, FRAME_BUDGET};
use waypoint_config::Config;
use waypoint_core::{FrameScheduler, SurfaceSize};

use crate::surface::{CanvasSurface, surface_size};

/// Poll interval while frames are running (roughly one display refresh).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll interval once the animation has stopped.
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Accent color for the help line.
const ACCENT: Color = Color::Cyan;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    info!("logging to {}", log_path.display());

    let config = Config::load()?;
    let terminal = ratatui::init();
    let result = run(terminal, &config);
    ratatui::restore();
    result
}

/// Size the surface from the terminal once, then hand over to [`App`].
fn run(terminal: DefaultTerminal, config: &Config) -> color_eyre::Result<()> {
    let size = canvas_size(terminal.size()?);
    info!("surface size {}x{}", size.width, size.height);
    App::new(config, size)?.run(terminal)
}

/// Surface size for a terminal, leaving one row for the help line.
fn canvas_size(terminal: Size) -> SurfaceSize {
    surface_size(Size::new(terminal.width, terminal.height.saturating_sub(1)))
}

/// Pending request for the next frame.
#[derive(Debug, Default)]
struct NextFrame {
    requested: bool,
}

impl NextFrame {
    /// Consume the pending request, if any.
    fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

impl FrameScheduler for NextFrame {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Markers and path.
    animation: Animation,
    /// Retained drawing of the last frame.
    surface: CanvasSurface,
    /// Set when the animation wants another frame.
    next_frame: NextFrame,
}

impl App {
    /// Construct a new instance of [`App`] from the configured path and markers.
    pub fn new(config: &Config, size: SurfaceSize) -> Result<Self, AnimationError> {
        let animation = Animation::from_parts(
            size,
            config.path.iter().copied(),
            config.objects,
            rand::thread_rng(),
        )?;
        Ok(Self {
            running: false,
            animation,
            surface: CanvasSurface::new(size),
            next_frame: NextFrame::default(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.next_frame.request_frame();
        while self.running {
            self.tick()?;
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Run one animation frame if one was requested.
    fn tick(&mut self) -> Result<(), AnimationError> {
        if self.next_frame.take() {
            self.animation.update(&mut self.surface, &mut self.next_frame)?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Canvas
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        frame.render_widget(&self.surface, chunks[0]);

        let status = if self.animation.is_finished() {
            "finished".to_string()
        } else {
            format!("frame {}/{FRAME_BUDGET}", self.animation.frame_count())
        };
        let help = Line::from(vec![
            Span::styled(status, Style::new().dark_gray()),
            "  q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "r".bold().fg(ACCENT),
            " restart".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits about one refresh while frames are pending.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = if self.next_frame.requested {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // the surface size is fixed at startup
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.restart(),
            _ => {}
        }
    }

    /// Reset the frame budget and start the loop again.
    fn restart(&mut self) {
        self.animation.reset();
        self.next_frame.request_frame();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
