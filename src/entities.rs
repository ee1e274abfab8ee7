//! All game entity types — pure data, no logic.

use crate::geometry::Rect;

// ── World constants ───────────────────────────────────────────────────────────

pub const WIDTH: f32 = 1200.0;
pub const HEIGHT: f32 = 700.0;

/// Player spawn point (sprite centre).
pub const PLAYER_START: (f32, f32) = (100.0, HEIGHT - 100.0);
pub const PLAYER_SIZE: (f32, f32) = (32.0, 48.0);
pub const PLAYER_SPEED: f32 = 4.0;
pub const GRAVITY: f32 = 0.8;
pub const JUMP_FORCE: f32 = -15.0;

pub const ENEMY_SIZE: (f32, f32) = (40.0, 60.0);
pub const ENEMY_SPEED: f32 = 1.5;
/// Enemies spawn this far above their authored point so they stand on it.
pub const ENEMY_SPAWN_LIFT: f32 = 30.0;

/// Top-left corner of the goal; the same on every level.
pub const GOAL_POS: (f32, f32) = (WIDTH - 100.0, 50.0);
pub const GOAL_SIZE: f32 = 30.0;

/// Ledge under the spawn point, prepended to every level.
pub const PLATFORM_START: Rect = Rect::new(0.0, HEIGHT - 40.0, 200.0, 20.0);

pub const MUSIC_ON_VOLUME: f32 = 0.25;
pub const MUSIC_PLAYING_VOLUME: f32 = 0.5;

pub const BUTTON_SIZE: (f32, f32) = (300.0, 40.0);

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Every animation sequence the game can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteSet {
    HeroIdle,
    HeroWalkLeft,
    HeroWalkRight,
    EnemyIdle,
    EnemyWalkLeft,
    EnemyWalkRight,
}

impl SpriteSet {
    pub const fn frame_count(self) -> usize {
        match self {
            SpriteSet::HeroIdle => 4,
            SpriteSet::HeroWalkLeft | SpriteSet::HeroWalkRight => 8,
            SpriteSet::EnemyIdle => 1,
            SpriteSet::EnemyWalkLeft | SpriteSet::EnemyWalkRight => 4,
        }
    }

    /// Image name of `frame` within this set, as the asset loader knows it.
    pub fn asset_name(self, frame: usize) -> String {
        let frame = frame % self.frame_count();
        match self {
            SpriteSet::HeroIdle => format!("characters/hero/idle/hero_idle_frame_{frame}"),
            SpriteSet::HeroWalkLeft => {
                format!("characters/hero/walk_left/hero_walk_left_frame_{frame}")
            }
            SpriteSet::HeroWalkRight => {
                format!("characters/hero/walk_right/hero_walk_right_frame_{frame}")
            }
            SpriteSet::EnemyIdle => "characters/enemy/idle/enemy_idle_frame".to_string(),
            SpriteSet::EnemyWalkLeft => {
                format!("characters/enemy/walk_left/enemy_walk_left_frame_{frame}")
            }
            SpriteSet::EnemyWalkRight => {
                format!("characters/enemy/walk_right/enemy_walk_right_frame_{frame}")
            }
        }
    }
}

/// The image an entity is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub set: SpriteSet,
    pub frame: usize,
}

impl Sprite {
    pub const fn new(set: SpriteSet, frame: usize) -> Self {
        Sprite { set, frame }
    }

    pub fn asset_name(&self) -> String {
        self.set.asset_name(self.frame)
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Sprite centre.
    pub x: f32,
    pub y: f32,
    pub velocity: Velocity,
    pub on_ground: bool,
    pub anim_frame: usize,
    pub anim_timer: u32,
    pub sprite: Sprite,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.x, self.y, PLAYER_SIZE.0, PLAYER_SIZE.1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Sprite centre.
    pub x: f32,
    pub y: f32,
    pub patrol_left: f32,
    pub patrol_right: f32,
    pub speed: f32,
    /// +1 walking right, -1 walking left.
    pub direction: i8,
    pub anim_frame: usize,
    pub anim_timer: u32,
    pub sprite: Sprite,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.x, self.y, ENEMY_SIZE.0, ENEMY_SIZE.1)
    }
}

// ── Menu & input ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    Victory,
    GameOver,
}

impl GameStatus {
    /// Menu-family screens show the buttons and accept clicks.
    pub fn is_menu(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    ToggleSound,
    Quit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub label: String,
    /// Centre of the button on screen.
    pub pos: (f32, f32),
    pub action: MenuAction,
}

impl Button {
    pub fn hit_box(&self) -> Rect {
        Rect::centered(self.pos.0, self.pos.1, BUTTON_SIZE.0, BUTTON_SIZE.1)
    }
}

/// Held-key snapshot, sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    /// Up or space.
    pub jump: bool,
}

/// Key-down events the controller reacts to outside of per-frame input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Space,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub status: GameStatus,
    /// Index into the level catalog; equals the catalog length once won.
    pub level: usize,
    pub sound_on: bool,
    /// `PLATFORM_START` followed by the current level's platforms.
    pub platforms: Vec<Rect>,
    pub enemies: Vec<Enemy>,
    pub goal: Rect,
    pub player: Player,
    pub buttons: Vec<Button>,
    /// Set by the Quit button; the frame driver exits when it sees it.
    pub exit_requested: bool,
}
