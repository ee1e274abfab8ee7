//! Interfaces to the presentation collaborator.
//!
//! The game never touches a screen or a sound device directly.  Drawing goes
//! through a [`Canvas`] and playback through an [`Audio`]; the binary supplies
//! terminal-backed implementations and the tests supply recording fakes.

use crate::entities::Sprite;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Sounds ────────────────────────────────────────────────────────────────────

/// One-shot sound effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Jump,
    Hurt,
    Win,
    Lose,
}

impl Sound {
    pub fn name(self) -> &'static str {
        match self {
            Sound::Jump => "jump",
            Sound::Hurt => "hurt",
            Sound::Win => "win",
            Sound::Lose => "lose",
        }
    }
}

/// Looping music tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Music {
    Background,
}

impl Music {
    pub fn name(self) -> &'static str {
        match self {
            Music::Background => "bg_music",
        }
    }
}

/// Audio playback.  Every call is fire-and-forget.
pub trait Audio {
    fn play_sound(&mut self, sound: Sound);
    fn play_music(&mut self, track: Music);
    /// `volume` is in `0.0..=1.0`.
    fn set_music_volume(&mut self, volume: f32);
}

/// Sound-effect gate handed to entity physics: the sound flag plus an audio
/// handle, so entities never need a reference back to the whole game.
pub struct Sfx<'a> {
    enabled: bool,
    audio: &'a mut dyn Audio,
}

impl<'a> Sfx<'a> {
    pub fn new(enabled: bool, audio: &'a mut dyn Audio) -> Self {
        Sfx { enabled, audio }
    }

    pub fn play(&mut self, sound: Sound) {
        if self.enabled {
            self.audio.play_sound(sound);
        }
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Drawing primitives, all in world coordinates.
pub trait Canvas {
    type Error;

    fn fill(&mut self, color: Rgb) -> Result<(), Self::Error>;
    fn blit(&mut self, image: &str, x: f32, y: f32) -> Result<(), Self::Error>;
    fn draw_text(
        &mut self,
        text: &str,
        center: (f32, f32),
        size: f32,
        color: Rgb,
    ) -> Result<(), Self::Error>;
    fn filled_rect(&mut self, rect: Rect, color: Rgb) -> Result<(), Self::Error>;
    /// Draw `sprite` with its image centred on `center`.
    fn draw_sprite(&mut self, sprite: Sprite, center: (f32, f32)) -> Result<(), Self::Error>;
}
