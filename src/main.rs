use std::io::BufRead;
use std::thread;

use crossbeam_channel::unbounded;

use elevator_control::config::{self, ControllerConfig};
use elevator_control::controller::ElevatorControl;
use elevator_control::debug;

const CONFIG_PATH: &str = "config.json";

fn main() {
    // READ CONFIGURATION
    let settings = match config::load_file(CONFIG_PATH) {
        Ok(settings) => settings,
        Err(config::ConfigError::Io(_)) => {
            println!("No configuration file provided, using default settings...");
            default_settings()
        }
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return;
        }
    };

    // INITIALIZE NOTIFICATION CHANNELS
    let (button_tx, button_rx) = unbounded();
    let (position_tx, position_rx) = unbounded();

    // INITIALIZE CONTROLLER
    let controller =
        match ElevatorControl::new(settings.clone(), button_tx, Some(position_tx)) {
            Ok(controller) => controller,
            Err(err) => {
                eprintln!("invalid configuration: {}", err);
                return;
            }
        };

    // INITIALIZE THREAD FOR STATUS PANEL
    {
        let floors = settings.floors.clone();
        let initial_position = settings.initial_position;
        thread::spawn(move || debug::main(floors, initial_position, button_rx, position_rx));
    }

    println!("Commands: up <floor> | down <floor> | <floor> | quit");

    // COMMAND LOOP
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        let result = match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            [direction @ ("up" | "down"), floor] => {
                controller.request_elevator(direction, Some(*floor))
            }
            [floor] => controller.request_elevator(*floor, None),
            _ => {
                println!("usage: up <floor> | down <floor> | <floor> | quit");
                continue;
            }
        };
        if let Err(err) = result {
            println!("{}", err);
        }
    }
}

fn default_settings() -> ControllerConfig {
    let floors = ["1", "2", "3", "4", "5", "6"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    ControllerConfig::new(floors)
}
