use colored::Colorize;
use libgame::{Universe, board::Cell, pos::Position};

const ALIVE: &str = "██";
const DEAD: &str = "··";

/// Prints the grid, then a one line summary.
///
/// With `show_changes`, cells born in the last delta step are drawn green and cells that died
/// are drawn red.
pub fn print_universe(universe: &Universe, show_changes: bool) {
    let width = universe.width() as usize;
    let mut marks = vec![Mark::None; universe.cells().len()];

    if show_changes {
        let mut mark = |positions: &[Position], value| {
            for pos in positions {
                marks[pos.row as usize * width + pos.col as usize] = value;
            }
        };
        mark(universe.born(), Mark::Born);
        mark(universe.died(), Mark::Died);
    }

    let mut out = String::new();
    for (cells, marks) in universe.cells().chunks(width).zip(marks.chunks(width)) {
        for (cell, mark) in cells.iter().zip(marks) {
            let symbol = match (cell, mark) {
                (Cell::Alive, Mark::Born) => ALIVE.bright_green(),
                (Cell::Alive, _) => ALIVE.white(),
                (Cell::Dead, Mark::Died) => ALIVE.red(),
                (Cell::Dead, _) => DEAD.bright_black(),
            };
            out.push_str(&symbol.to_string());
        }
        out.push('\n');
    }

    print!("{out}");
    println!("{}", status_line(universe));
}

pub fn status_line(universe: &Universe) -> String {
    format!(
        "gen {:6} | {}x{} {} | alive {:5} | {} {}",
        universe.generation(),
        universe.width(),
        universe.height(),
        universe.boundary_mode(),
        universe.live_count(),
        format!("+{}", universe.born_count()).green(),
        format!("-{}", universe.died_count()).red(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Born,
    Died,
}
