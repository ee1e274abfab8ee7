//! Terminal front end.  All terminal I/O lives here.
//!
//! `Terminal` keeps a cell buffer the size of the screen.  The `Canvas` calls
//! paint into it in world coordinates and `present` writes the finished frame
//! in one go, so text drawn over a filled rect keeps the rect's background.
//! It also stands in for the sound device: the current track, its volume and
//! the latest effect are shown on the bottom row instead of played.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use tracing::{debug, info, trace};

use platform_adventure::entities::{Sprite, SpriteSet, HEIGHT, WIDTH};
use platform_adventure::geometry::Rect;
use platform_adventure::presenter::{Audio, Canvas, Music, Rgb, Sound};
use platform_adventure::scene::BACKGROUND_IMAGE;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_DEFAULT_FG: Rgb = Rgb(255, 255, 255);
const C_DEFAULT_BG: Rgb = Rgb(0, 0, 0);
const C_CLOUD: Rgb = Rgb(250, 250, 250);
const C_HERO: Rgb = Rgb(20, 20, 90);
const C_ENEMY: Rgb = Rgb(170, 0, 70);
const C_STATUS_FG: Rgb = Rgb(230, 230, 230);
const C_STATUS_BG: Rgb = Rgb(40, 40, 40);

/// Backdrop clouds, in world coordinates.
const CLOUDS: [(f32, f32); 5] = [
    (150.0, 130.0),
    (420.0, 80.0),
    (760.0, 150.0),
    (980.0, 300.0),
    (260.0, 330.0),
];

/// Frames an effect name stays on the status row.
const EFFECT_FRAMES: u32 = 30;

const CONTROLS_HINT: &str = "← → / A D : Move   ↑ / W / SPACE : Jump   ESC : Menu   Q : Quit";

// ── Glyph tables ──────────────────────────────────────────────────────────────

const HERO_IDLE: [char; 4] = ['☺', '☻', '☺', '☻'];
const HERO_WALK_LEFT: [char; 2] = ['◄', '◂'];
const HERO_WALK_RIGHT: [char; 2] = ['►', '▸'];
const ENEMY_IDLE: char = '▲';
const ENEMY_WALK_LEFT: [char; 2] = ['◀', '◁'];
const ENEMY_WALK_RIGHT: [char; 2] = ['▶', '▷'];

fn glyph(sprite: Sprite) -> char {
    let f = sprite.frame;
    match sprite.set {
        SpriteSet::HeroIdle => HERO_IDLE[f % HERO_IDLE.len()],
        SpriteSet::HeroWalkLeft => HERO_WALK_LEFT[f % HERO_WALK_LEFT.len()],
        SpriteSet::HeroWalkRight => HERO_WALK_RIGHT[f % HERO_WALK_RIGHT.len()],
        SpriteSet::EnemyIdle => ENEMY_IDLE,
        SpriteSet::EnemyWalkLeft => ENEMY_WALK_LEFT[f % ENEMY_WALK_LEFT.len()],
        SpriteSet::EnemyWalkRight => ENEMY_WALK_RIGHT[f % ENEMY_WALK_RIGHT.len()],
    }
}

fn sprite_color(set: SpriteSet) -> Rgb {
    match set {
        SpriteSet::HeroIdle | SpriteSet::HeroWalkLeft | SpriteSet::HeroWalkRight => C_HERO,
        SpriteSet::EnemyIdle | SpriteSet::EnemyWalkLeft | SpriteSet::EnemyWalkRight => C_ENEMY,
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── Terminal ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: C_DEFAULT_FG,
    bg: C_DEFAULT_BG,
};

pub struct Terminal<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    music: Option<Music>,
    volume: f32,
    /// Latest effect and the frames it has left on screen.
    effect: Option<(Sound, u32)>,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Terminal {
            out,
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            music: None,
            volume: 1.0,
            effect: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        debug!(cols, rows, "terminal resized");
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    /// World point at the centre of a terminal cell.
    pub fn cell_to_world(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * WIDTH / self.cols.max(1) as f32,
            (row as f32 + 0.5) * HEIGHT / self.rows.max(1) as f32,
        )
    }

    fn scale(&self) -> (f32, f32) {
        (self.cols as f32 / WIDTH, self.rows as f32 / HEIGHT)
    }

    fn world_to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let (sx, sy) = self.scale();
        ((x * sx).floor() as i32, (y * sy).floor() as i32)
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(idx)
    }

    /// Write a glyph, keeping whatever background is already in the cell.
    fn put_char(&mut self, col: i32, row: i32, ch: char, fg: Rgb) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    fn put_text(&mut self, col: i32, row: i32, text: &str, fg: Rgb, bg: Option<Rgb>) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = fg;
                if let Some(bg) = bg {
                    cell.bg = bg;
                }
            }
        }
    }

    // ── Status row ───────────────────────────────────────────────────────────

    fn draw_status(&mut self) {
        let row = self.rows as i32 - 1;
        if row < 0 {
            return;
        }
        let blank = " ".repeat(self.cols as usize);
        self.put_text(0, row, &blank, C_STATUS_FG, Some(C_STATUS_BG));
        self.put_text(1, row, CONTROLS_HINT, C_STATUS_FG, Some(C_STATUS_BG));

        let mut right = String::new();
        if let Some((sound, _)) = self.effect {
            right.push_str(&format!("» {}  ", sound.name()));
        }
        match self.music {
            Some(track) => right.push_str(&format!(
                "♪ {} {:>3}%",
                track.name(),
                (self.volume * 100.0).round() as u32
            )),
            None => right.push_str("♪ off"),
        }
        let col = self.cols as i32 - right.chars().count() as i32 - 1;
        self.put_text(col, row, &right, C_STATUS_FG, Some(C_STATUS_BG));
    }

    /// Write the finished frame to the terminal.
    pub fn present(&mut self) -> io::Result<()> {
        self.draw_status();
        self.effect = match self.effect {
            Some((sound, frames)) if frames > 1 => Some((sound, frames - 1)),
            _ => None,
        };

        let mut current: Option<(Rgb, Rgb)> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if current != Some((cell.fg, cell.bg)) {
                    self.out.queue(style::SetForegroundColor(color(cell.fg)))?;
                    self.out.queue(style::SetBackgroundColor(color(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                self.out.queue(Print(cell.ch))?;
            }
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

impl<W: Write> Canvas for Terminal<W> {
    type Error = io::Error;

    fn fill(&mut self, c: Rgb) -> io::Result<()> {
        self.cells.fill(Cell {
            ch: ' ',
            fg: C_DEFAULT_FG,
            bg: c,
        });
        Ok(())
    }

    fn blit(&mut self, image: &str, _x: f32, _y: f32) -> io::Result<()> {
        if image != BACKGROUND_IMAGE {
            debug!(image, "no terminal art for image");
            return Ok(());
        }
        for (x, y) in CLOUDS {
            let (col, row) = self.world_to_cell(x, y);
            for dc in -1..=1 {
                self.put_char(col + dc, row, '☁', C_CLOUD);
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, center: (f32, f32), _size: f32, c: Rgb) -> io::Result<()> {
        let (col, row) = self.world_to_cell(center.0, center.1);
        let start = col - text.chars().count() as i32 / 2;
        self.put_text(start, row, text, c, None);
        Ok(())
    }

    fn filled_rect(&mut self, rect: Rect, c: Rgb) -> io::Result<()> {
        let (sx, sy) = self.scale();
        let c0 = (rect.left() * sx).floor() as i32;
        let r0 = (rect.top() * sy).floor() as i32;
        // Anything with area covers at least one cell
        let c1 = ((rect.right() * sx).ceil() as i32).max(c0 + 1);
        let r1 = ((rect.bottom() * sy).ceil() as i32).max(r0 + 1);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell { ch: ' ', fg: c, bg: c };
                }
            }
        }
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, center: (f32, f32)) -> io::Result<()> {
        let (col, row) = self.world_to_cell(center.0, center.1);
        trace!(asset = %sprite.asset_name(), col, row, "sprite as glyph");
        self.put_char(col, row, glyph(sprite), sprite_color(sprite.set));
        Ok(())
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

impl<W: Write> Audio for Terminal<W> {
    fn play_sound(&mut self, sound: Sound) {
        debug!(sound = sound.name(), "sound effect");
        self.effect = Some((sound, EFFECT_FRAMES));
    }

    fn play_music(&mut self, track: Music) {
        info!(track = track.name(), "music started");
        self.music = Some(track);
    }

    fn set_music_volume(&mut self, volume: f32) {
        debug!(volume, "music volume");
        self.volume = volume.clamp(0.0, 1.0);
    }
}
