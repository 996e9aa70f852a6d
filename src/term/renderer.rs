//! TerminalRenderer: flushes frames to a real terminal.
//!
//! Frames are diffed row by row, so steady-state updates only rewrite the
//! cells that changed since the previous draw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::fb::{Frame, Glyph, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        match self.last.take() {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                self.diff_redraw(frame, &prev)?;
            }
            _ => self.full_redraw(frame)?,
        }
        self.last = Some(frame.clone());
        Ok(())
    }

    fn full_redraw(&mut self, frame: &Frame) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;

        let mut current: Option<(Rgb, bool)> = None;
        for y in 0..frame.height() {
            for glyph in frame.row(y) {
                self.print_glyph(*glyph, &mut current)?;
            }
            if y + 1 < frame.height() {
                self.stdout.queue(Print("\r\n"))?;
            }
        }

        self.finish_pass()
    }

    fn diff_redraw(&mut self, next: &Frame, prev: &Frame) -> Result<()> {
        let mut current: Option<(Rgb, bool)> = None;

        for y in 0..next.height() {
            for (start, len) in changed_spans(prev.row(y), next.row(y)) {
                self.stdout.queue(cursor::MoveTo(start, y))?;
                for dx in 0..len {
                    let glyph = next.row(y)[(start + dx) as usize];
                    self.print_glyph(glyph, &mut current)?;
                }
            }
        }

        self.finish_pass()
    }

    fn print_glyph(&mut self, glyph: Glyph, current: &mut Option<(Rgb, bool)>) -> Result<()> {
        let style = (glyph.fg, glyph.bold);
        if *current != Some(style) {
            self.stdout.queue(SetAttribute(Attribute::Reset))?;
            self.stdout.queue(SetForegroundColor(to_color(glyph.fg)))?;
            if glyph.bold {
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            *current = Some(style);
        }
        self.stdout.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn finish_pass(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Contiguous `(start, len)` spans where `next` differs from `prev`.
fn changed_spans(prev: &[Glyph], next: &[Glyph]) -> Vec<(u16, u16)> {
    let mut spans = Vec::new();
    let w = prev.len().min(next.len());
    let mut x = 0;

    while x < w {
        if prev[x] == next[x] {
            x += 1;
            continue;
        }
        let start = x;
        while x < w && prev[x] != next[x] {
            x += 1;
        }
        spans.push((start as u16, (x - start) as u16));
    }

    spans
}
