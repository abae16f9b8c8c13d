//! cgol CLI - Edit and run a Life board in the terminal.

use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use log::{info, warn};
use signal_hook::consts::SIGINT;

use cgol::{
    compute::Grid,
    schema::{GameConfig, Seed},
    shell::{Shell, TerminalDisplay, TerminalGuard},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 || args.get(1).is_some_and(|a| a == "-h" || a == "--help") {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    if args.get(1).is_some_and(|a| a == "--example") {
        print_example_config();
        return;
    }

    let (config, seed) = match args.get(1) {
        Some(path) => load_config(&PathBuf::from(path)),
        None => (GameConfig::default(), Seed::default()),
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let mut grid = match Grid::new(config.grid) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    seed.apply(&mut grid);

    info!(
        "starting {}x{} board, saving to {}",
        config.grid.rows,
        config.grid.cols,
        config.save_path.display()
    );

    if let Err(e) = run(config, grid) {
        eprintln!("Terminal error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: GameConfig, grid: Grid) -> io::Result<()> {
    // Raw mode stops the tty from sending SIGINT for Ctrl-C, but an external
    // `kill -INT` still has to restore the terminal.
    let interrupt = Arc::new(AtomicBool::new(false));
    if let Err(e) = signal_hook::flag::register(SIGINT, Arc::clone(&interrupt)) {
        warn!("could not install SIGINT handler: {e}");
    }

    let mut stdout = io::stdout();
    let guard = TerminalGuard::enter(&mut stdout)?;

    let (rows, cols) = guard.size()?;
    // One extra row for the status line
    if rows < config.grid.rows + 1 || cols < config.grid.cols {
        warn!(
            "terminal is {}x{}, board needs {}x{}",
            rows,
            cols,
            config.grid.rows + 1,
            config.grid.cols
        );
    }

    let mut display = TerminalDisplay::new(
        BufWriter::new(stdout),
        config.display.clone(),
        config.grid.rows,
    );
    let mut shell = Shell::new(config, grid).with_interrupt(interrupt);
    let result = shell.run(&mut display);

    drop(display);
    drop(guard);
    result
}

fn load_config(config_path: &Path) -> (GameConfig, Seed) {
    let config_str = fs::read_to_string(config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: GameConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    // Load seed if present next to the config
    let seed_path = config_path.with_extension("seed.json");
    let seed: Seed = if seed_path.exists() {
        let seed_str = fs::read_to_string(&seed_path).unwrap_or_else(|e| {
            eprintln!("Error reading seed file: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&seed_str).unwrap_or_else(|e| {
            eprintln!("Error parsing seed: {}", e);
            std::process::exit(1);
        })
    } else {
        Seed::default()
    };

    (config, seed)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.json | --example]", program);
    eprintln!();
    eprintln!("Edit and run Conway's Game of Life in the terminal.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to game configuration file (optional)");
    eprintln!("               A config.seed.json next to it seeds the board");
    eprintln!("  --example    Print an example configuration and seed");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  arrows       Move the cursor");
    eprintln!("  x / o        Toggle the cell under the cursor");
    eprintln!("  r / space    Run or pause the simulation");
    eprintln!("  s / l        Save or load the board");
    eprintln!("  q / Esc      Quit");
}

fn print_example_config() {
    let config = GameConfig::default();
    let seed = Seed {
        pattern: cgol::schema::Pattern::Glider { row: 1, col: 1 },
    };

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
    println!();
    println!("Example seed (config.seed.json):");
    match serde_json::to_string_pretty(&seed) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing seed: {}", e),
    }
}
