/// ----- DEBUG MODULE -----
/// Terminal status panel for the demo binary: one row per floor showing the
/// hall and car button lights and the car position, redrawn in place on
/// every event.

use std::io::{stdout, Stdout, Write};

use crossbeam_channel::{select, Receiver};
use crossterm::{cursor, terminal, ExecutableCommand, Result};

use crate::direction::Direction;
use crate::notifications::{ButtonEvent, ButtonKind};

const HALL_UP: usize = 0;
const HALL_DOWN: usize = 1;
const CAB: usize = 2;

pub fn main(
    floors: Vec<String>,
    initial_position: usize,
    button_rx: Receiver<ButtonEvent>,
    position_rx: Receiver<usize>,
) -> Result<()> {
    let mut stdout = stdout();

    let mut lights = vec![[false; 3]; floors.len()];
    let mut position = initial_position;

    let height = 2 * floors.len() as u16 + 3;
    for _ in 0..height {
        writeln!(stdout)?;
    }
    printstatus(&mut stdout, &floors, &lights, position)?;

    loop {
        select! {
            recv(button_rx) -> msg => {
                let event = match msg {
                    Ok(event) => event,
                    Err(_) => return Ok(()),
                };
                let slot = match (event.kind, event.button) {
                    (ButtonKind::Car, _) => CAB,
                    (ButtonKind::Floor, Some(Direction::Down)) => HALL_DOWN,
                    (ButtonKind::Floor, _) => HALL_UP,
                };
                lights[event.location][slot] = event.active;
                printstatus(&mut stdout, &floors, &lights, position)?;
            },
            recv(position_rx) -> msg => {
                position = match msg {
                    Ok(floor) => floor,
                    Err(_) => return Ok(()),
                };
                printstatus(&mut stdout, &floors, &lights, position)?;
            },
        }
    }
}

fn printstatus(
    stdout: &mut Stdout,
    floors: &[String],
    lights: &[[bool; 3]],
    position: usize,
) -> Result<()> {
    let height = 2 * floors.len() as u16 + 3;
    stdout.execute(cursor::MoveUp(height))?;
    stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

    writeln!(stdout, "+------------+------------+------------+------------+------------+")?;
    writeln!(stdout, "| {0:<10} | {1:<10} | {2:<10} | {3:<10} | {4:<10} |", "FLOOR", "HALL UP", "HALL DOWN", "CAB", "CAR")?;
    for floor in (0..floors.len()).rev() {
        writeln!(stdout, "+------------+------------+------------+------------+------------+")?;
        writeln!(stdout, "| {0:<10} | {1:<10} | {2:<10} | {3:<10} | {4:<10} |",
            floors[floor],
            lights[floor][HALL_UP],
            lights[floor][HALL_DOWN],
            lights[floor][CAB],
            if floor == position { "[#]" } else { "" },
        )?;
    }
    writeln!(stdout, "+------------+------------+------------+------------+------------+")?;
    stdout.flush()?;

    Ok(())
}
