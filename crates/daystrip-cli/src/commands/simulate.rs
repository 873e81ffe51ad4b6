use anyhow::{bail, Result};
use serde::Serialize;

use daystrip_core::{AppConfig, DatePicker, Direction, StripFrame, StripSurface};

/// A burst of input for the headless strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Step(Direction),
    Fling(Direction),
}

fn parse_moves(moves: &str) -> Result<Vec<Move>> {
    moves
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'r' => Ok(Move::Step(Direction::Forward)),
            'l' => Ok(Move::Step(Direction::Backward)),
            'R' => Ok(Move::Fling(Direction::Forward)),
            'L' => Ok(Move::Fling(Direction::Backward)),
            other => bail!("Unknown move '{}': use r/l to step and R/L to fling", other),
        })
        .collect()
}

/// Surface that keeps frames in memory for printing
struct HeadlessSurface {
    width: f64,
    month_row: f64,
    frames: Vec<StripFrame>,
}

impl StripSurface for HeadlessSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn month_row(&self) -> f64 {
        self.month_row
    }

    fn draw(&mut self, frame: &StripFrame) {
        self.frames.push(frame.clone());
    }
}

#[derive(Serialize)]
struct FrameLine<'a> {
    frame: usize,
    #[serde(flatten)]
    strip: &'a StripFrame,
}

pub fn run(config: &AppConfig, moves: &str, max_frames: usize, json: bool) -> Result<()> {
    let moves = parse_moves(moves)?;
    let mut picker = DatePicker::new(config)?;

    for m in &moves {
        match *m {
            Move::Step(direction) => picker.request_move(direction),
            Move::Fling(direction) => picker.fling(direction),
        }
    }

    let settings = picker.settings();
    let mut surface = HeadlessSurface {
        width: settings.tile_count() as f64 * config.strip.cell_width,
        month_row: settings.label_rise + 1.0,
        frames: Vec::new(),
    };

    // Frame 0 shows the strip before any tick
    picker.render(&mut surface);
    while surface.frames.len() <= max_frames {
        let moving = picker.update();
        picker.render(&mut surface);
        if !moving {
            break;
        }
    }

    for (index, frame) in surface.frames.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(&FrameLine { frame: index, strip: frame })?);
        } else {
            println!("{}", format_frame(index, frame));
        }
    }

    Ok(())
}

/// One text line per frame: state, month label, then the tiles with the
/// tile under the selection frame bracketed
fn format_frame(index: usize, frame: &StripFrame) -> String {
    let tiles: Vec<String> = frame
        .cells
        .iter()
        .map(|cell| {
            if (cell.x - frame.selection_x).abs() < frame.cell_width / 2.0 {
                format!("[{:>2}]", cell.label)
            } else {
                format!(" {:>2} ", cell.label)
            }
        })
        .collect();

    format!(
        "{:>4} {:<9} offset={:>6.2} {:<9} y={:>5.2} a={:.2} |{}| {} {} queued={}",
        index,
        format!("{:?}", frame.phase),
        frame.offset,
        frame.month_name,
        frame.month_label.y,
        frame.month_label.opacity,
        tiles.join(""),
        frame.date.month_name,
        frame.date.day,
        frame.queued_steps,
    )
}
