use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use e_mouse_grid::geometry::{bounding_box, Point, Rect as ScreenRect};
use e_mouse_grid::grid::Cell;
use e_mouse_grid::host::{DisplaySource, Feedback, OverlayRenderer, PointerBackend, RecordingPointer};
use e_mouse_grid::overlay::OverlayLayout;
use e_mouse_grid::pointer::Modifier as HeldKey;
use e_mouse_grid::{
    GridError, GridResult, KeyOutcome, MouseButton, MouseGridConfig, OverlayConfig,
    PointerController, PointerOutcome, PointerState, SessionController, SessionState,
};
use log::{error, info};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{self, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

const TICK_RATE: Duration = Duration::from_millis(100);

const HELP: &str =
    "space: grid  keys: narrow  enter: click  F2: right  F3: drag  F4: move  esc: close  q: quit";

/// The terminal itself is the only display, measured in character cells
struct TerminalDisplays;

impl DisplaySource for TerminalDisplays {
    fn enumerate_displays(&self) -> GridResult<Vec<ScreenRect>> {
        let (cols, rows) =
            crossterm::terminal::size().map_err(|e| GridError::Display(e.to_string()))?;
        // Bottom row is the status line
        Ok(vec![ScreenRect::new(
            0.0,
            0.0,
            cols as f64,
            rows.saturating_sub(1) as f64,
        )])
    }
}

#[derive(Default)]
struct OverlaySnapshot {
    surface: Option<ScreenRect>,
    cells: Vec<Cell>,
    pointer: PointerState,
}

/// Hands the controller's redraw requests to the draw loop
struct TerminalOverlay {
    snapshot: Arc<Mutex<OverlaySnapshot>>,
}

impl OverlayRenderer for TerminalOverlay {
    fn open(&mut self, displays: &[ScreenRect]) -> GridResult<()> {
        let mut snapshot = self
            .snapshot
            .lock()
            .map_err(|_| GridError::Render("Overlay snapshot poisoned".to_string()))?;
        snapshot.surface = bounding_box(displays).ok();
        Ok(())
    }

    fn request_redraw(&mut self, cells: &[Cell], pointer: PointerState) -> GridResult<()> {
        let mut snapshot = self
            .snapshot
            .lock()
            .map_err(|_| GridError::Render("Overlay snapshot poisoned".to_string()))?;
        snapshot.cells = cells.to_vec();
        snapshot.pointer = pointer;
        Ok(())
    }

    fn close(&mut self) {
        if let Ok(mut snapshot) = self.snapshot.lock() {
            snapshot.surface = None;
            snapshot.cells.clear();
        }
    }
}

/// Flag for the status line, plus the system sound on the desktop or the
/// terminal bell otherwise
struct TerminalFeedback {
    invalid: Arc<AtomicBool>,
    system: Option<Box<dyn Feedback>>,
}

impl Feedback for TerminalFeedback {
    fn signal_invalid(&mut self) {
        self.invalid.store(true, Ordering::Relaxed);
        if let Some(system) = self.system.as_mut() {
            system.signal_invalid();
            return;
        }
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

/// Forwards to the real backend and remembers where the pointer went
struct TrackedPointer {
    inner: Box<dyn PointerBackend>,
    last: Arc<Mutex<Option<Point>>>,
}

impl PointerBackend for TrackedPointer {
    fn move_pointer(&mut self, x: f64, y: f64) -> GridResult<()> {
        self.inner.move_pointer(x, y)?;
        if let Ok(mut last) = self.last.lock() {
            *last = Some(Point::new(x, y));
        }
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> GridResult<()> {
        self.inner.click(button)
    }

    fn start_drag(&mut self) -> GridResult<()> {
        self.inner.start_drag()
    }

    fn release_button(&mut self, button: MouseButton) -> GridResult<()> {
        self.inner.release_button(button)
    }

    fn key_down(&mut self, modifier: HeldKey) -> GridResult<()> {
        self.inner.key_down(modifier)
    }

    fn key_up(&mut self, modifier: HeldKey) -> GridResult<()> {
        self.inner.key_up(modifier)
    }
}

struct Options {
    config_path: Option<PathBuf>,
    desktop: bool,
}

impl Options {
    fn from_args() -> Result<Self, Box<dyn std::error::Error>> {
        let mut options = Options {
            config_path: None,
            desktop: false,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or("--config needs a path")?;
                    options.config_path = Some(PathBuf::from(path));
                }
                "--desktop" => options.desktop = true,
                other => return Err(format!("Unknown argument '{}'", other).into()),
            }
        }
        Ok(options)
    }

    fn load_config(&self) -> GridResult<MouseGridConfig> {
        if let Some(path) = &self.config_path {
            return MouseGridConfig::load_from_file(path);
        }
        let mut config = MouseGridConfig::from_env();
        if !self.desktop {
            // Character cells instead of pixels
            config.grid.cell_width = 8.0;
            config.grid.cell_height = 3.0;
            config.refine.min_width = 2.0;
            config.refine.min_height = 2.0;
            config.overlay = OverlayConfig {
                min_label_width: 4.0,
                min_label_height: 3.0,
                drop_shadow: false,
            };
        }
        config.validate()?;
        Ok(config)
    }
}

struct App {
    controller: SessionController,
    snapshot: Arc<Mutex<OverlaySnapshot>>,
    last_point: Arc<Mutex<Option<Point>>>,
    invalid: Arc<AtomicBool>,
    overlay_config: OverlayConfig,
    status: String,
    should_quit: bool,
}

impl App {
    fn new(options: &Options) -> Result<Self, Box<dyn std::error::Error>> {
        let config = options.load_config()?;
        let snapshot = Arc::new(Mutex::new(OverlaySnapshot::default()));
        let last_point = Arc::new(Mutex::new(None));
        let invalid = Arc::new(AtomicBool::new(false));

        let (displays, backend, system_feedback) = host_backends(options.desktop)?;
        let pointer = PointerController::new(
            Box::new(TrackedPointer {
                inner: backend,
                last: last_point.clone(),
            }),
            config.pointer.clone(),
        );
        let overlay_config = config.overlay.clone();
        let controller = SessionController::new(
            config,
            displays,
            Box::new(TerminalOverlay {
                snapshot: snapshot.clone(),
            }),
            pointer,
            Box::new(TerminalFeedback {
                invalid: invalid.clone(),
                system: system_feedback,
            }),
        )?;

        Ok(Self {
            controller,
            snapshot,
            last_point,
            invalid,
            overlay_config,
            status: "Press space to show the grid".to_string(),
            should_quit: false,
        })
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.invalid.store(false, Ordering::Relaxed);

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let held = if key.modifiers.contains(KeyModifiers::SHIFT) {
            Some(HeldKey::Shift)
        } else if key.modifiers.contains(KeyModifiers::ALT) {
            Some(HeldKey::Alt)
        } else {
            None
        };

        let result = match key.code {
            KeyCode::Esc if self.controller.is_active() => {
                self.controller.exit();
                Ok("Grid closed".to_string())
            }
            KeyCode::Esc => {
                self.should_quit = true;
                Ok(String::new())
            }
            KeyCode::Char(' ') | KeyCode::Backspace => self
                .controller
                .start()
                .map(|count| format!("{} cells", count)),
            KeyCode::Char('q') if !self.controller.is_active() => {
                self.should_quit = true;
                Ok(String::new())
            }
            KeyCode::Char(c) => self.controller.narrow(c).map(describe_key),
            KeyCode::Enter => self.click(MouseButton::Primary, held, false),
            KeyCode::F(2) => self.click(MouseButton::Secondary, held, false),
            KeyCode::F(3) => self.click(MouseButton::Primary, held, true),
            KeyCode::F(4) => self.controller.resolve().map(|point| match point {
                Some(p) => format!("Moved to ({:.1}, {:.1})", p.x, p.y),
                None => "Nothing to move to".to_string(),
            }),
            _ => return,
        };

        self.status = match result {
            Ok(status) => status,
            Err(e) => {
                error!("❌ {}", e);
                format!("Error: {}", e)
            }
        };
    }

    fn click(
        &mut self,
        button: MouseButton,
        held: Option<HeldKey>,
        drag: bool,
    ) -> GridResult<String> {
        let outcome = self.controller.click(button, held, drag)?;
        Ok(match outcome {
            Some(PointerOutcome::Clicked(button)) => format!("{:?} click", button),
            Some(PointerOutcome::DragStarted) => "Dragging - resolve again to drop".to_string(),
            Some(PointerOutcome::DragEnded) => "Dropped".to_string(),
            None => "Nothing to click".to_string(),
        })
    }
}

fn describe_key(outcome: KeyOutcome) -> String {
    match outcome {
        KeyOutcome::Ignored => "No grid active".to_string(),
        KeyOutcome::Rejected => "No cell starts with that key".to_string(),
        KeyOutcome::Narrowed { remaining } => format!("{} cells left", remaining),
        KeyOutcome::Refining(bounds) => format!(
            "Refining {:.1}x{:.1} at ({:.1}, {:.1})",
            bounds.width, bounds.height, bounds.x, bounds.y
        ),
    }
}

type HostBackends = (
    Box<dyn DisplaySource>,
    Box<dyn PointerBackend>,
    Option<Box<dyn Feedback>>,
);

#[cfg(windows)]
fn host_backends(desktop: bool) -> GridResult<HostBackends> {
    use e_mouse_grid::host::windows::{BeepFeedback, WindowsDisplays, WindowsPointer};
    if desktop {
        return Ok((
            Box::new(WindowsDisplays),
            Box::new(WindowsPointer),
            Some(Box::new(BeepFeedback)),
        ));
    }
    Ok((
        Box::new(TerminalDisplays),
        Box::new(RecordingPointer::new()),
        None,
    ))
}

#[cfg(not(windows))]
fn host_backends(desktop: bool) -> GridResult<HostBackends> {
    if desktop {
        return Err(GridError::Display(
            "--desktop is only available on Windows".to_string(),
        ));
    }
    Ok((
        Box::new(TerminalDisplays),
        Box::new(RecordingPointer::new()),
        None,
    ))
}

fn init_logging() -> io::Result<PathBuf> {
    // The terminal belongs to the overlay, so logs go to a file
    let path = std::env::temp_dir().join("mouse_grid.log");
    let file = std::fs::File::create(&path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_path = init_logging()?;
    let options = Options::from_args()?;
    let mut app = App::new(&options)?;
    info!("🚀 mouse_grid started, logging to {}", log_path.display());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            app.controller.exit();
            return Ok(());
        }
    }
}

/// Maps screen coordinates onto the terminal grid area
struct Projection {
    surface: ScreenRect,
    area: Rect,
}

impl Projection {
    fn x(&self, x: f64) -> f64 {
        self.area.x as f64 + (x - self.surface.x) * self.area.width as f64 / self.surface.width
    }

    fn y(&self, y: f64) -> f64 {
        self.area.y as f64 + (y - self.surface.y) * self.area.height as f64 / self.surface.height
    }

    fn rect(&self, rect: &ScreenRect) -> Rect {
        let left = self.x(rect.x).round().max(0.0) as u16;
        let top = self.y(rect.y).round().max(0.0) as u16;
        let right = (self.x(rect.right()).round().max(0.0) as u16).max(left + 1);
        let bottom = (self.y(rect.bottom()).round().max(0.0) as u16).max(top + 1);
        Rect::new(left, top, right - left, bottom - top).intersection(self.area)
    }
}

fn render(f: &mut Frame, app: &App) {
    let full = f.area();
    let area = Rect::new(full.x, full.y, full.width, full.height.saturating_sub(1));
    let status_area = Rect::new(full.x, full.bottom().saturating_sub(1), full.width, 1);

    if let Ok(snapshot) = app.snapshot.lock() {
        if let Some(surface) = snapshot.surface {
            if surface.width > 0.0 && surface.height > 0.0 {
                let projection = Projection { surface, area };
                render_overlay(f, &projection, &snapshot, &app.overlay_config);
            }
        }
    }

    if let Ok(last) = app.last_point.lock() {
        if let Some(point) = *last {
            render_pointer(f, area, point, app);
        }
    }

    render_status(f, status_area, app);
}

fn render_overlay(
    f: &mut Frame,
    projection: &Projection,
    snapshot: &OverlaySnapshot,
    config: &OverlayConfig,
) {
    let layout = OverlayLayout::build(projection.surface, &snapshot.cells, snapshot.pointer, config);

    // Make it clearer when the button is being held
    let shade_style = if layout.dragging {
        Style::default().bg(Color::Rgb(0, 34, 34))
    } else {
        Style::default().bg(Color::Rgb(16, 16, 16))
    };
    for region in &layout.shade {
        f.render_widget(Block::default().style(shade_style), projection.rect(region));
    }

    let grid_style = Style::default().fg(Color::Magenta);
    for cell in &layout.cells {
        let area = projection.rect(&cell.rect());
        if area.width >= 2 && area.height >= 2 {
            f.render_widget(
                Block::default().borders(Borders::ALL).border_style(grid_style),
                area,
            );
        }
    }

    let label_style = Style::default()
        .fg(Color::White)
        .bg(Color::Black)
        .add_modifier(Modifier::BOLD);
    for cell in &layout.labelled {
        let area = projection.rect(&cell.rect());
        let label = cell.label.trim();
        if label.is_empty() || area.height < 3 || (area.width as usize) < label.len() + 2 {
            continue;
        }
        let line_area = Rect::new(area.x + 1, area.y + area.height / 2, area.width - 2, 1);
        f.render_widget(
            Paragraph::new(label)
                .style(label_style)
                .alignment(Alignment::Center),
            line_area,
        );
    }
}

fn render_pointer(f: &mut Frame, area: Rect, point: Point, app: &App) {
    let surface = match app.snapshot.lock().ok().and_then(|s| s.surface) {
        Some(surface) => surface,
        // Overlay closed: the terminal is the surface
        None => ScreenRect::new(0.0, 0.0, area.width as f64, area.height as f64),
    };
    if surface.width <= 0.0 || surface.height <= 0.0 {
        return;
    }
    let projection = Projection { surface, area };
    let marker = projection.rect(&ScreenRect::new(point.x, point.y, 0.0, 0.0));
    if marker.width == 0 || marker.height == 0 {
        return;
    }
    let style = if app.controller.pointer_state() == PointerState::Dragging {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new("+").style(style),
        Rect::new(marker.x, marker.y, 1, 1),
    );
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let mode = match app.controller.state() {
        SessionState::Inactive => "idle",
        SessionState::GridActive(_) => "grid",
        SessionState::RefinementActive(_) => "refine",
    };
    let status_style = if app.invalid.load(Ordering::Relaxed) {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(app.status.clone(), status_style),
        Span::raw("  "),
        Span::styled(HELP, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
