//! Terminal demo for the flick animation toolkit.
//!
//! Two ASCII sprites move across the screen under easing drivers while
//! their frames cycle from an embedded clip pack. Keys: `q` quit,
//! `Tab` switch the runner's easing family, `s` switch the walker's
//! loop style, `r` restart both drivers.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};

use flick_anim::{LoopStyle, Sprite};
use flick_core::{
    clock::{FrameClock, RateMeter},
    geom::Vec2,
    logging::{self, LogRing},
};
use flick_ease::{AxisDirection, Curve, DriverSpec, EasingDriver, Family, Mode, Tuning};
use flick_pack::PackManifest;

/// Clip definitions for the embedded demo sprites.
const DEMO_PACK: &str = r#"
format = "1.0.0"

[sheet]
frame_width = 11
frame_height = 4

[clips.walker]
row = 0
frames = 3
frame_seconds = 0.22
style = "alternating"

[clips.runner]
row = 1
frames = 4
frame_seconds = 0.1
"#;

const WALKER_FRAMES: [[&str; 4]; 3] = [
    ["  .----.  ", " ( o _ o ) ", "  |     |  ", "  /|   |\\  "],
    ["  .----.  ", " ( o _ o ) ", "  |     |  ", "  <|   |>  "],
    ["  .----.  ", " ( - _ - ) ", "  |     |  ", "  \\|   |/  "],
];

const RUNNER_FRAMES: [[&str; 4]; 4] = [
    ["   __      ", "  |--|---o ", "  |__|     ", "  /  \\     "],
    ["   __      ", "  |--|--o  ", "  |__|     ", "  >  <     "],
    ["   __      ", "  |--|-o   ", "  |__|     ", "  \\  /     "],
    ["   __      ", "  |--|o    ", "  |__|     ", "  |  |     "],
];

/// Horizontal sweep in terminal cells for the runner sprite.
const RUNNER_SWEEP: f64 = 48.0;

struct DemoSprite {
    frames: &'static [[&'static str; 4]],
    sprite: Sprite,
}

impl DemoSprite {
    fn frame_lines(&self) -> &[&'static str] {
        &self.frames[self.sprite.cycler().index() % self.frames.len()]
    }
}

struct App {
    walker: DemoSprite,
    runner: DemoSprite,
    family_idx: usize,
    clock: FrameClock,
    meter: RateMeter,
    ring: LogRing,
}

fn walker_driver(start: Vec2) -> Result<EasingDriver> {
    let spec = DriverSpec {
        x_curve: Curve::new(Family::Sine, Mode::InOut),
        y_curve: Curve::new(Family::Quad, Mode::InOut),
        x_direction: AxisDirection::Positive,
        y_direction: AxisDirection::Positive,
        initial_value: 0.0,
        change_in_value: 30.0,
        duration: 4.0,
        tuning: Tuning::default(),
        looping: true,
        return_in_reverse: true,
    };
    EasingDriver::new(spec, start)
}

fn runner_driver(family: Family, start: Vec2) -> Result<EasingDriver> {
    let spec = DriverSpec {
        x_curve: Curve::new(family, Mode::Out),
        looping: true,
        return_in_reverse: true,
        ..DriverSpec::horizontal(RUNNER_SWEEP, 2.5)
    };
    EasingDriver::new(spec, start)
}

impl App {
    fn new(ring: LogRing, now: Instant) -> Result<Self> {
        let pack = PackManifest::from_toml_str(DEMO_PACK)?;

        let walker_start = Vec2::new(2.0, 2.0);
        let walker = DemoSprite {
            frames: &WALKER_FRAMES,
            sprite: Sprite::new(walker_start, pack.cycler("walker")?)
                .with_easing(walker_driver(walker_start)?),
        };

        let runner_start = Vec2::new(2.0, 12.0);
        let runner = DemoSprite {
            frames: &RUNNER_FRAMES,
            sprite: Sprite::new(runner_start, pack.cycler("runner")?)
                .with_easing(runner_driver(Family::ALL[0], runner_start)?),
        };

        Ok(Self {
            walker,
            runner,
            family_idx: 0,
            clock: FrameClock::new(now),
            meter: RateMeter::default(),
            ring,
        })
    }

    fn family(&self) -> Family {
        Family::ALL[self.family_idx]
    }

    /// Swap the runner onto the next easing family, restarting its
    /// sweep from wherever it currently is.
    fn next_family(&mut self) -> Result<()> {
        self.family_idx = (self.family_idx + 1) % Family::ALL.len();
        let pos = self.runner.sprite.position();
        let driver = runner_driver(self.family(), pos)?;
        self.runner.sprite = Sprite::new(pos, self.runner.sprite.cycler().clone())
            .with_easing(driver);
        tracing::info!(family = self.family().name(), "switched easing family");
        Ok(())
    }

    /// Cycle the walker's frame loop style.
    fn next_style(&mut self) {
        let cycler = self.walker.sprite.cycler_mut();
        let next = match cycler.style() {
            LoopStyle::Forward => LoopStyle::Reverse,
            LoopStyle::Reverse => LoopStyle::Alternating,
            LoopStyle::Alternating => LoopStyle::Forward,
        };
        cycler.set_style(next);
        tracing::info!(style = ?next, "switched loop style");
    }

    fn restart(&mut self) {
        let walker_start = Vec2::new(2.0, 2.0);
        self.walker.sprite.set_position(walker_start);
        if let Some(driver) = self.walker.sprite.easing_mut() {
            driver.restart(walker_start);
        }
        let runner_start = Vec2::new(2.0, 12.0);
        self.runner.sprite.set_position(runner_start);
        if let Some(driver) = self.runner.sprite.easing_mut() {
            driver.restart(runner_start);
        }
        tracing::info!("drivers restarted");
    }

    fn update(&mut self, now: Instant) {
        let dt = self.clock.delta(now);
        self.walker.sprite.update(dt);
        self.runner.sprite.update(dt);
    }

    fn last_log_line(&self) -> Option<String> {
        let ring = self.ring.lock().ok()?;
        ring.back()
            .map(|line| format!("{} {} {}", line.severity, line.target, line.message))
    }
}

/// Paint a sprite's current frame at its eased position, clipped to
/// `area`.
fn draw_sprite(f: &mut Frame, area: Rect, demo: &DemoSprite, style: Style) {
    let pos = demo.sprite.position();
    let lines = demo.frame_lines();
    let w = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16;
    let h = lines.len() as u16;

    let max_x = area.width.saturating_sub(w);
    let max_y = area.height.saturating_sub(h);
    let x = area.x + (pos.x.max(0.0) as u16).min(max_x);
    let y = area.y + (pos.y.max(0.0) as u16).min(max_y);

    let text: Vec<Line> = lines.iter().map(|l| Line::from(*l)).collect();
    f.render_widget(
        Paragraph::new(text).style(style),
        Rect::new(x, y, w.min(area.width), h.min(area.height)),
    );
}

fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let stage = Rect::new(
        area.x,
        area.y,
        area.width,
        area.height.saturating_sub(2),
    );

    draw_sprite(f, stage, &app.walker, Style::default().fg(Color::Cyan));
    draw_sprite(f, stage, &app.runner, Style::default().fg(Color::Yellow));

    let hud = format!(
        " curve: {}.out   style: {:?}   tps: {:>5.1}   [q] quit  [tab] curve  [s] style  [r] restart",
        app.family().name(),
        app.walker.sprite.cycler().style(),
        app.meter.rate(),
    );
    let mut lines = vec![Line::from(hud)];
    if let Some(log) = app.last_log_line() {
        lines.push(Line::styled(log, Style::default().fg(Color::DarkGray)));
    }
    let hud_area = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(2),
        area.width,
        area.height.min(2),
    );
    f.render_widget(Paragraph::new(lines), hud_area);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let ring = logging::init();
    tracing::info!("flick demo starting up");

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, ring);
    restore_terminal(terminal)?;
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, ring: LogRing) -> Result<()> {
    let mut app = App::new(ring, Instant::now())?;
    let poll_timeout = Duration::from_millis(16);

    loop {
        let now = Instant::now();
        app.meter.mark(now);
        app.update(now);

        terminal.draw(|f| draw(f, &app))?;

        if event::poll(poll_timeout)? {
            match event::read()? {
                CEvent::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Tab => app.next_family()?,
                    KeyCode::Char('s') => app.next_style(),
                    KeyCode::Char('r') => app.restart(),
                    _ => {}
                },
                CEvent::Resize(cols, rows) => {
                    tracing::debug!(cols, rows, "terminal resized");
                }
                _ => {}
            }
        }
    }
}
