//! Glyph cell buffer flushed to the terminal with `crossterm`.
//!
//! Drawing goes through an off-screen grid of colored glyphs; one flush per
//! frame repaints the whole grid, re-emitting the foreground color escape
//! only when it changes between cells.

use crossterm::{
    cursor, queue,
    style::{self, Color},
};
use std::io::{self, Write};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

pub struct ScreenBuf {
    w: usize,
    h: usize,
    cells: Vec<Cell>,
}

impl ScreenBuf {
    pub fn new(w: u16, h: u16) -> Self {
        Self {
            w: usize::from(w),
            h: usize::from(h),
            cells: vec![BLANK; usize::from(w) * usize::from(h)],
        }
    }

    pub fn resize(&mut self, w: u16, h: u16) {
        self.w = usize::from(w);
        self.h = usize::from(h);
        self.cells.clear();
        self.cells.resize(self.w * self.h, BLANK);
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.cells[y as usize * self.w + x as usize] = Cell { ch, fg };
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.w + x]
    }

    pub fn print(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg);
        }
    }

    pub fn flush(&self, out: &mut impl Write) -> io::Result<()> {
        if self.w == 0 || self.h == 0 {
            return Ok(());
        }
        queue!(out, cursor::MoveTo(0, 0))?;
        let mut prev_fg = None;

        for row in 0..self.h {
            for col in 0..self.w {
                let cell = self.get(col, row);
                if prev_fg != Some(cell.fg) {
                    queue!(out, style::SetForegroundColor(cell.fg))?;
                    prev_fg = Some(cell.fg);
                }
                queue!(out, style::Print(cell.ch))?;
            }
            if row < self.h - 1 {
                queue!(out, style::Print("\r\n"))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}
