//! A [`Device`] backed by the terminal: keys stand in for the push buttons and
//! slide switches, the framebuffer is drawn with half-block characters and the
//! seven-segment displays as segment art underneath.

use crate::seven_seg::HighScoreDisplay;
use crate::{Buttons, Device, DeviceError, FrameBuffer, Rgb565, Switches};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Color as CColor},
    terminal::{self, BeginSynchronizedUpdate, ClearType, EndSynchronizedUpdate},
};
use log::{debug, warn};
use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;
const STATUS_ROWS: u16 = 4; // three rows of segment art, one legend line

pub struct TerminalDevice {
    out: Stdout,
    cols: u16,
    rows: u16,
    switches: Switches,
    held: u32,
    enhanced: bool,
    scores: HighScoreDisplay,
    active: bool,
}

impl TerminalDevice {
    /// Take over the terminal. `switches` is the initial switch bank.
    pub fn open(switches: Switches) -> Result<Self, DeviceError> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(DeviceError::TooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }

        terminal::enable_raw_mode()?;
        // From here on Drop restores the terminal if anything fails.
        let mut dev = TerminalDevice {
            out: stdout(),
            cols,
            rows,
            switches,
            held: 0,
            enhanced: false,
            scores: HighScoreDisplay::default(),
            active: true,
        };
        execute!(
            dev.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            terminal::Clear(ClearType::All),
        )?;

        dev.enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if dev.enhanced {
            execute!(
                dev.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        debug!(
            "terminal {cols}x{rows}, key release events {}",
            if dev.enhanced { "on" } else { "off" }
        );
        Ok(dev)
    }

    /// Give the terminal back. Called by Drop as well.
    pub fn close(&mut self) -> Result<(), DeviceError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        if self.enhanced {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn switches(&self) -> Switches {
        self.switches
    }

    fn frame_rows(&self) -> u16 {
        self.rows.saturating_sub(STATUS_ROWS)
    }

    fn on_key(&mut self, key: KeyEvent, pressed: &mut u32) {
        if let Some(mask) = button_for(&key) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    *pressed |= mask;
                    self.held |= mask;
                }
                KeyEventKind::Release => self.held &= !mask,
            }
            return;
        }
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let KeyCode::Char(c) = key.code {
            if let Some(sw) = c.to_digit(10) {
                self.switches = self.switches.toggled(sw);
                debug!("SW{sw} toggled, bank now {:#05x}", self.switches.0);
            }
        }
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let top = self.frame_rows();
        let art = status_art(self.scores);
        for (i, line) in art.iter().enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(0, top + i as u16),
                terminal::Clear(ClearType::CurrentLine),
                style::Print(clip(line, self.cols))
            )?;
        }
        queue!(
            self.out,
            cursor::MoveTo(0, top + 3),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(clip(&legend(self.switches), self.cols))
        )?;
        self.out.flush()
    }
}

impl Drop for TerminalDevice {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("failed to restore terminal: {e}");
        }
    }
}

impl Device for TerminalDevice {
    fn poll(&mut self) -> Result<(Buttons, Switches), DeviceError> {
        let mut pressed = 0u32;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.on_key(key, &mut pressed),
                Event::Resize(c, r) => {
                    self.cols = c;
                    self.rows = r;
                    execute!(self.out, terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
        }
        // Without release events a key is only "down" on the tick it arrives.
        let level = if self.enhanced {
            self.held | pressed
        } else {
            pressed
        };
        Ok((Buttons(level), self.switches))
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), DeviceError> {
        let rows = self.frame_rows();
        queue!(self.out, BeginSynchronizedUpdate)?;
        render_frame(&mut self.out, frame, self.cols, rows)?;
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }

    fn show_high_scores(&mut self, display: HighScoreDisplay) -> Result<(), DeviceError> {
        self.scores = display;
        self.draw_status()?;
        Ok(())
    }
}

/// Which button bit a key drives, if any.
pub fn button_for(key: &KeyEvent) -> Option<u32> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Buttons::QUIT),
        KeyCode::Char('q') | KeyCode::Esc => Some(Buttons::QUIT),
        KeyCode::Char(' ') | KeyCode::Char('w') => Some(Buttons::P1_JUMP),
        KeyCode::Enter | KeyCode::Up => Some(Buttons::P2_JUMP),
        _ => None,
    }
}

// ── Half-block rendering ────────────────────────────────────────────────────

/// Nearest-neighbour fit of a `w`x`h` frame into `cols` x `rows` cells, two
/// pixels per cell vertically. Returns (source step, used cols, used pixel rows).
pub fn fit(w: usize, h: usize, cols: u16, rows: u16) -> (f64, usize, usize) {
    let cols = cols.max(1) as usize;
    let px_rows = rows.max(1) as usize * 2;
    let step = (w as f64 / cols as f64).max(h as f64 / px_rows as f64).max(1.0);
    let used_cols = ((w as f64 / step) as usize).clamp(1, cols);
    let used_rows = ((h as f64 / step) as usize).clamp(2, px_rows) & !1;
    (step, used_cols, used_rows)
}

fn to_ccolor(c: Rgb565) -> CColor {
    let (r, g, b) = c.to_rgb888();
    CColor::Rgb { r, g, b }
}

/// Draw `frame` into the top-left `cols` x `rows` cells, only emitting colour
/// changes when the colour actually changes.
pub fn render_frame(
    out: &mut impl Write,
    frame: &FrameBuffer,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let (step, used_cols, used_rows) = fit(frame.width(), frame.height(), cols, rows);
    let sample = |col: usize, py: usize| {
        let x = (col as f64 * step) as i32;
        let y = (py as f64 * step) as i32;
        frame.get(x, y).unwrap_or_default()
    };

    let mut prev_fg = Rgb565::BLACK;
    let mut prev_bg = Rgb565::BLACK;
    for row in 0..used_rows / 2 {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        let mut need_fg = true;
        let mut need_bg = true;
        for col in 0..used_cols {
            let top = sample(col, row * 2);
            let bot = sample(col, row * 2 + 1);

            if top == bot {
                if need_bg || prev_bg != top {
                    queue!(out, style::SetBackgroundColor(to_ccolor(top)))?;
                    prev_bg = top;
                    need_bg = false;
                }
                queue!(out, style::Print(' '))?;
            } else {
                if need_fg || prev_fg != top {
                    queue!(out, style::SetForegroundColor(to_ccolor(top)))?;
                    prev_fg = top;
                    need_fg = false;
                }
                if need_bg || prev_bg != bot {
                    queue!(out, style::SetBackgroundColor(to_ccolor(bot)))?;
                    prev_bg = bot;
                    need_bg = false;
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
        }
        queue!(out, style::ResetColor)?;
    }
    Ok(())
}

// ── Seven-segment art ──────────────────────────────────────────────────────

/// Three text rows for one `gfedcba` segment code.
pub fn segment_art(code: u8) -> [String; 3] {
    let on = |bit: u8, c: char| if code & (1 << bit) != 0 { c } else { ' ' };
    [
        format!(" {} ", on(0, '_')),
        format!("{}{}{}", on(5, '|'), on(6, '_'), on(1, '|')),
        format!("{}{}{}", on(4, '|'), on(3, '_'), on(2, '|')),
    ]
}

fn status_art(scores: HighScoreDisplay) -> [String; 3] {
    let p1 = HighScoreDisplay::digits(scores.hex3_0).map(segment_art);
    let p2 = HighScoreDisplay::digits(scores.hex5_4).map(segment_art);
    let labels = ["        ", " P1 best", "        "];
    let labels2 = ["        ", " P2 best", "        "];
    std::array::from_fn(|i| {
        format!(
            "{} {}{}   {} {}{}",
            labels[i], p1[0][i], p1[1][i], labels2[i], p2[0][i], p2[1][i]
        )
    })
}

fn legend(sw: Switches) -> String {
    let bits: String = (0..Switches::COUNT)
        .rev()
        .map(|i| if sw.is_on(1 << i) { '1' } else { '0' })
        .collect();
    format!(" SW9..0 {bits}  [0-9] flip  space/w P1  enter/up P2  q quit")
}

fn clip(s: &str, cols: u16) -> String {
    s.chars().take(cols as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(button_for(&press(KeyCode::Char('q'))), Some(Buttons::QUIT));
        assert_eq!(button_for(&press(KeyCode::Esc)), Some(Buttons::QUIT));
        assert_eq!(
            button_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Buttons::QUIT)
        );
        assert_eq!(button_for(&press(KeyCode::Char(' '))), Some(Buttons::P1_JUMP));
        assert_eq!(button_for(&press(KeyCode::Up)), Some(Buttons::P2_JUMP));
        assert_eq!(button_for(&press(KeyCode::Char('c'))), None);
        assert_eq!(button_for(&press(KeyCode::Char('4'))), None);
    }

    #[test]
    fn test_fit_keeps_aspect() {
        // 160 cols x 60 rows of 2 px: exact half-scale
        assert_eq!(fit(320, 240, 160, 60), (2.0, 160, 120));
        // width-bound terminal
        let (step, cols, rows) = fit(320, 240, 80, 100);
        assert_eq!(step, 4.0);
        assert_eq!((cols, rows), (80, 60));
        // never upscales
        assert_eq!(fit(320, 240, 1000, 1000).0, 1.0);
    }

    #[test]
    fn test_fit_degenerate_terminal() {
        let (_, cols, rows) = fit(320, 240, 0, 0);
        assert_eq!((cols, rows), (1, 2));
    }

    #[test]
    fn test_uniform_frame_renders_spaces() {
        let mut frame = FrameBuffer::vga();
        frame.fill(Rgb565::SKY_BLUE);
        let mut out = Vec::new();
        render_frame(&mut out, &frame, 40, 8).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains('\u{2580}'));
        assert!(text.contains(' '));
    }

    #[test]
    fn test_split_cell_uses_half_block() {
        let mut frame = FrameBuffer::vga();
        frame.fill(Rgb565::SKY_BLUE);
        crate::render::fill_rect(&mut frame, 0, 120, 320, 240, Rgb565::GREEN);
        let mut out = Vec::new();
        // step 8: pixel rows 0..30, the boundary falls inside a cell pair
        render_frame(&mut out, &frame, 40, 15).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{2580}'));
    }

    #[test]
    fn test_segment_art_for_eight_and_one() {
        assert_eq!(segment_art(0x7F), [" _ ".to_string(), "|_|".into(), "|_|".into()]);
        assert_eq!(segment_art(0x06), ["   ".to_string(), "  |".into(), "  |".into()]);
    }

    #[test]
    fn test_legend_shows_switch_bits() {
        let text = legend(Switches(0b10_0000_0011));
        assert!(text.contains("1000000011"));
    }
}
