//! Plain-text board rendering

use sternhalma_core::{BoardSnapshot, CellView, Hex};

/// Render the board row by row, top to bottom.
///
/// `.` empty cell, `0`-`5` piece owner, `*` selected piece,
/// `o` highlighted destination.
pub fn render_board(snapshot: &BoardSnapshot, highlights: &[Hex]) -> String {
    let min_x = snapshot
        .cells
        .iter()
        .map(|cell| column(cell.pos))
        .min()
        .unwrap_or(0);

    let mut lines: Vec<String> = Vec::new();
    let mut row: Option<i32> = None;

    for cell in &snapshot.cells {
        if row != Some(cell.pos.r) {
            row = Some(cell.pos.r);
            lines.push(String::new());
        }
        if let Some(line) = lines.last_mut() {
            let x = (column(cell.pos) - min_x) as usize;
            while line.len() < x {
                line.push(' ');
            }
            line.push(glyph(cell, highlights));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Doubled horizontal position of a pointy-top hex
fn column(pos: Hex) -> i32 {
    2 * pos.q + pos.r
}

fn glyph(cell: &CellView, highlights: &[Hex]) -> char {
    match cell.owner {
        Some(_) if cell.selected => '*',
        Some(owner) => char::from_digit(owner as u32, 10).unwrap_or('?'),
        None if highlights.contains(&cell.pos) => 'o',
        None => '.',
    }
}
