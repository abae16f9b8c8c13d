//! Interactive terminal front end.
//!
//! The shell owns the board while the program runs. In edit mode the arrow
//! keys move a cursor over the interior and `x`/`o` flip cells; `r` starts the
//! simulation, `s`/`l` save and load. In run mode one generation is drawn per
//! tick until `r` pauses back into edit mode. `q`, Esc or Ctrl-C quit from
//! either mode.

mod cursor;
mod display;
mod input;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use log::{info, warn};

pub use cursor::Cursor;
pub use display::{CellDisplay, TerminalDisplay, TerminalGuard};
pub use input::{Command, Direction};

use crate::compute::{CellChange, GenerationEngine, Grid, GridStats};
use crate::persist;
use crate::schema::GameConfig;

/// How long edit mode waits for a key before rechecking the interrupt flag.
const IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Run,
}

/// Whether the event loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    config: GameConfig,
    grid: Grid,
    engine: GenerationEngine,
    cursor: Cursor,
    mode: Mode,
    /// Reused change buffer for run mode.
    changes: Vec<CellChange>,
    /// Set from outside (e.g. a SIGINT handler) to end `run`.
    interrupt: Arc<AtomicBool>,
}

impl Shell {
    pub fn new(config: GameConfig, grid: Grid) -> Self {
        let engine = GenerationEngine::for_grid(&grid);
        Self {
            config,
            grid,
            engine,
            cursor: Cursor::default(),
            mode: Mode::Edit,
            changes: Vec::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use `flag` as the interrupt flag checked by [`Shell::run`].
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = flag;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    /// Draw the whole board and put the cursor back.
    pub fn redraw<D: CellDisplay>(&self, display: &mut D) -> io::Result<()> {
        display.draw_grid(&self.grid)?;
        display.show_status(&self.status_text())?;
        self.finish_frame(display)
    }

    /// Apply one command.
    pub fn handle<D: CellDisplay>(
        &mut self,
        command: Command,
        display: &mut D,
    ) -> io::Result<Flow> {
        match (self.mode, command) {
            (_, Command::Quit) => return Ok(Flow::Quit),
            (Mode::Edit, Command::Move(direction)) => {
                self.cursor.step(direction, self.grid.dims());
            }
            (Mode::Edit, Command::Toggle) => {
                let Cursor { row, col } = self.cursor;
                let state = self.grid.toggle(row, col);
                display.draw_cell(row, col, state)?;
            }
            (Mode::Edit, Command::Run) => {
                info!("running from generation {}", self.engine.generation());
                self.mode = Mode::Run;
                display.set_cursor_visible(false)?;
                display.show_status(&self.status_text())?;
            }
            (Mode::Edit, Command::Save) => {
                let message = match persist::save(&self.grid, &self.config.save_path) {
                    Ok(()) => format!("saved to {}", self.config.save_path.display()),
                    Err(e) => {
                        warn!("save failed: {e}");
                        format!("save failed: {e}")
                    }
                };
                display.show_status(&message)?;
            }
            (Mode::Edit, Command::Load) => {
                match persist::load_into(&mut self.grid, &self.config.save_path) {
                    Ok(()) => {
                        self.engine.reset();
                        display.draw_grid(&self.grid)?;
                        display.show_status(&format!(
                            "loaded {}",
                            self.config.save_path.display()
                        ))?;
                    }
                    Err(e) => {
                        warn!("load failed: {e}");
                        display.show_status(&format!("load failed: {e}"))?;
                    }
                }
            }
            (Mode::Run, Command::Run) => {
                info!("paused at generation {}", self.engine.generation());
                self.mode = Mode::Edit;
                display.set_cursor_visible(true)?;
                display.show_status(&self.status_text())?;
            }
            // Editing is locked while the simulation runs
            (Mode::Run, _) => {}
        }
        self.finish_frame(display)?;
        Ok(Flow::Continue)
    }

    /// Advance one generation and draw only the cells that changed.
    pub fn tick<D: CellDisplay>(&mut self, display: &mut D) -> io::Result<()> {
        self.changes.clear();
        self.engine.step_into(&mut self.grid, &mut self.changes);
        for change in &self.changes {
            display.draw_cell(change.row, change.col, change.state)?;
        }
        display.show_status(&self.status_text())?;
        self.finish_frame(display)
    }

    /// Poll the keyboard and drive the simulation until the user quits or the
    /// interrupt flag is raised.
    pub fn run<D: CellDisplay>(&mut self, display: &mut D) -> io::Result<()> {
        let interval = Duration::from_millis(self.config.tick_interval_ms);
        let mut next_tick = Instant::now();
        self.redraw(display)?;

        loop {
            if self.interrupt.load(Ordering::Relaxed) {
                info!("interrupted at generation {}", self.engine.generation());
                return Ok(());
            }

            let key_ready = match self.mode {
                Mode::Edit => event::poll(IDLE_POLL)?,
                Mode::Run => event::poll(next_tick.saturating_duration_since(Instant::now()))?,
            };

            if !key_ready {
                if self.mode == Mode::Edit {
                    continue;
                }
                self.tick(display)?;
                next_tick = Instant::now() + interval;
                continue;
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };
            let Some(command) = Command::from_key(key) else {
                continue;
            };

            let was_running = self.mode == Mode::Run;
            if self.handle(command, display)? == Flow::Quit {
                info!("quit at generation {}", self.engine.generation());
                return Ok(());
            }
            if !was_running && self.mode == Mode::Run {
                next_tick = Instant::now();
            }
        }
    }

    fn status_text(&self) -> String {
        match self.mode {
            Mode::Edit => "edit: arrows move, x toggle, r run, s save, l load, q quit".to_string(),
            Mode::Run => {
                let stats = GridStats::from_grid(&self.grid);
                format!(
                    "run: generation {}, population {} (r pause, q quit)",
                    self.engine.generation(),
                    stats.population
                )
            }
        }
    }

    fn finish_frame<D: CellDisplay>(&self, display: &mut D) -> io::Result<()> {
        if self.mode == Mode::Edit {
            display.place_cursor(self.cursor.row, self.cursor.col)?;
        }
        display.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::CellState;
    use crate::schema::Dimensions;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Cell(usize, usize, CellState),
        Grid,
        Status(String),
        Cursor(usize, usize),
        CursorVisible(bool),
        Flush,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn cells(&self) -> Vec<(usize, usize, CellState)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Cell(r, c, s) => Some((*r, *c, *s)),
                    _ => None,
                })
                .collect()
        }

        fn last_status(&self) -> Option<&str> {
            self.ops.iter().rev().find_map(|op| match op {
                Op::Status(s) => Some(s.as_str()),
                _ => None,
            })
        }
    }

    impl CellDisplay for Recorder {
        fn draw_cell(&mut self, row: usize, col: usize, state: CellState) -> io::Result<()> {
            self.ops.push(Op::Cell(row, col, state));
            Ok(())
        }

        fn draw_grid(&mut self, _grid: &Grid) -> io::Result<()> {
            self.ops.push(Op::Grid);
            Ok(())
        }

        fn show_status(&mut self, message: &str) -> io::Result<()> {
            self.ops.push(Op::Status(message.to_string()));
            Ok(())
        }

        fn place_cursor(&mut self, row: usize, col: usize) -> io::Result<()> {
            self.ops.push(Op::Cursor(row, col));
            Ok(())
        }

        fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
            self.ops.push(Op::CursorVisible(visible));
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.ops.push(Op::Flush);
            Ok(())
        }
    }

    fn shell_with(config: GameConfig) -> Shell {
        let grid = Grid::new(config.grid).unwrap();
        Shell::new(config, grid)
    }

    fn small_config() -> GameConfig {
        GameConfig {
            grid: Dimensions::new(8, 8),
            ..Default::default()
        }
    }

    fn press(shell: &mut Shell, display: &mut Recorder, commands: &[Command]) {
        for &command in commands {
            assert_eq!(shell.handle(command, display).unwrap(), Flow::Continue);
        }
    }

    #[test]
    fn test_toggle_draws_cell() {
        let mut shell = shell_with(small_config());
        let mut display = Recorder::default();

        press(
            &mut shell,
            &mut display,
            &[Command::Move(Direction::Right), Command::Toggle],
        );

        assert_eq!(shell.grid().get(1, 2), CellState::Alive);
        assert_eq!(display.cells(), vec![(1, 2, CellState::Alive)]);
        assert_eq!(display.ops.last(), Some(&Op::Flush));
        assert!(display.ops.contains(&Op::Cursor(1, 2)));

        press(&mut shell, &mut display, &[Command::Toggle]);
        assert_eq!(shell.grid().get(1, 2), CellState::Dead);
    }

    #[test]
    fn test_cursor_stays_in_interior() {
        let mut shell = shell_with(small_config());
        let mut display = Recorder::default();

        press(
            &mut shell,
            &mut display,
            &[Command::Move(Direction::Up), Command::Move(Direction::Left)],
        );
        assert_eq!(shell.cursor(), Cursor { row: 1, col: 1 });

        press(&mut shell, &mut display, &[Command::Move(Direction::Down); 20]);
        assert_eq!(shell.cursor().row, 6);
    }

    #[test]
    fn test_run_and_pause() {
        let mut shell = shell_with(small_config());
        let mut display = Recorder::default();

        // Horizontal blinker on row 3
        press(
            &mut shell,
            &mut display,
            &[
                Command::Move(Direction::Down),
                Command::Move(Direction::Down),
                Command::Move(Direction::Right),
                Command::Toggle,
                Command::Move(Direction::Right),
                Command::Toggle,
                Command::Move(Direction::Right),
                Command::Toggle,
                Command::Run,
            ],
        );
        assert_eq!(shell.mode(), Mode::Run);
        assert!(display.ops.contains(&Op::CursorVisible(false)));

        // Editing is ignored while running
        press(&mut shell, &mut display, &[Command::Toggle]);
        assert_eq!(shell.grid().get(3, 4), CellState::Alive);

        display.ops.clear();
        shell.tick(&mut display).unwrap();
        assert_eq!(
            display.cells(),
            vec![
                (2, 3, CellState::Alive),
                (3, 2, CellState::Dead),
                (3, 4, CellState::Dead),
                (4, 3, CellState::Alive),
            ]
        );
        assert_eq!(shell.generation(), 1);
        assert_eq!(
            display.last_status(),
            Some("run: generation 1, population 3 (r pause, q quit)")
        );
        // No cursor placement while running
        assert!(!display.ops.iter().any(|op| matches!(op, Op::Cursor(..))));

        press(&mut shell, &mut display, &[Command::Run]);
        assert_eq!(shell.mode(), Mode::Edit);
        assert!(display.ops.contains(&Op::CursorVisible(true)));
    }

    #[test]
    fn test_quit_from_any_mode() {
        let mut shell = shell_with(small_config());
        let mut display = Recorder::default();
        assert_eq!(shell.handle(Command::Quit, &mut display).unwrap(), Flow::Quit);

        press(&mut shell, &mut display, &[Command::Run]);
        assert_eq!(shell.handle(Command::Quit, &mut display).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let config = GameConfig {
            save_path: dir.path().join("cgol_array.h"),
            ..small_config()
        };
        let mut shell = shell_with(config);
        let mut display = Recorder::default();

        press(&mut shell, &mut display, &[Command::Toggle, Command::Save]);
        assert!(display.last_status().unwrap().starts_with("saved to"));
        let saved = shell.grid().clone();

        press(&mut shell, &mut display, &[Command::Toggle]);
        assert_ne!(shell.grid(), &saved);

        display.ops.clear();
        press(&mut shell, &mut display, &[Command::Load]);
        assert_eq!(shell.grid(), &saved);
        assert_eq!(display.ops[0], Op::Grid);
        assert!(display.last_status().unwrap().starts_with("loaded"));
    }

    #[test]
    fn test_raised_interrupt_ends_run() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut shell = shell_with(small_config()).with_interrupt(Arc::clone(&flag));
        let mut display = Recorder::default();

        // The flag is checked before the keyboard is polled
        shell.run(&mut display).unwrap();
        assert_eq!(display.ops[0], Op::Grid);
        assert_eq!(display.ops.last(), Some(&Op::Flush));
        assert_eq!(shell.generation(), 0);
    }

    #[test]
    fn test_load_missing_file_reports() {
        let dir = tempdir().unwrap();
        let config = GameConfig {
            save_path: dir.path().join("absent.h"),
            ..small_config()
        };
        let mut shell = shell_with(config);
        let mut display = Recorder::default();

        press(&mut shell, &mut display, &[Command::Load]);
        let status = display.last_status().unwrap();
        assert!(status.starts_with("load failed: I/O error on"), "{status}");
        assert!(status.contains("absent.h"));
    }

    #[test]
    fn test_failed_load_keeps_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.h");
        std::fs::write(&path, "not a save file\n").unwrap();

        let config = GameConfig {
            save_path: path,
            ..small_config()
        };
        let mut shell = shell_with(config);
        let mut display = Recorder::default();

        press(&mut shell, &mut display, &[Command::Toggle, Command::Load]);
        assert_eq!(shell.grid().get(1, 1), CellState::Alive);
        assert_eq!(shell.mode(), Mode::Edit);
        assert!(display.last_status().unwrap().starts_with("load failed"));
        assert!(!display.ops.contains(&Op::Grid));
    }

    #[test]
    fn test_failed_save_reports() {
        let dir = tempdir().unwrap();
        let config = GameConfig {
            save_path: dir.path().join("missing").join("board.h"),
            ..small_config()
        };
        let mut shell = shell_with(config);
        let mut display = Recorder::default();

        press(&mut shell, &mut display, &[Command::Save]);
        assert!(display.last_status().unwrap().starts_with("save failed: I/O error"));
    }

    #[test]
    fn test_redraw_places_cursor() {
        let mut shell = shell_with(small_config());
        let mut display = Recorder::default();
        shell.redraw(&mut display).unwrap();
        assert_eq!(
            display.ops,
            vec![
                Op::Grid,
                Op::Status(
                    "edit: arrows move, x toggle, r run, s save, l load, q quit".to_string()
                ),
                Op::Cursor(1, 1),
                Op::Flush,
            ]
        );
    }
}
