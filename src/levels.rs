//! Hand-authored level catalog.  Immutable; the game copies what it needs
//! out of it on every (re)load.

use crate::entities::ENEMY_SPEED;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    /// Point the enemy stands on.
    pub pos: (f32, f32),
    /// Distance the enemy walks either side of `pos.0`.
    pub patrol_range: f32,
    /// `None` uses `ENEMY_SPEED`.
    pub speed: Option<f32>,
}

impl EnemySpawn {
    const fn new(x: f32, y: f32, patrol_range: f32) -> Self {
        EnemySpawn { pos: (x, y), patrol_range, speed: None }
    }

    const fn with_speed(self, speed: f32) -> Self {
        EnemySpawn { speed: Some(speed), ..self }
    }

    pub fn speed(&self) -> f32 {
        self.speed.unwrap_or(ENEMY_SPEED)
    }
}

#[derive(Debug)]
pub struct LevelDef {
    pub platforms: &'static [Rect],
    pub enemies: &'static [EnemySpawn],
}

pub static LEVELS: [LevelDef; 4] = [
    // 1 — staircase, no enemies
    LevelDef {
        platforms: &[
            Rect::new(300.0, 600.0, 80.0, 20.0),
            Rect::new(400.0, 500.0, 80.0, 20.0),
            Rect::new(300.0, 400.0, 80.0, 20.0),
            Rect::new(400.0, 300.0, 80.0, 20.0),
            Rect::new(600.0, 350.0, 80.0, 20.0),
            Rect::new(700.0, 230.0, 80.0, 20.0),
            Rect::new(850.0, 150.0, 120.0, 20.0),
        ],
        enemies: &[],
    },
    // 2
    LevelDef {
        platforms: &[
            Rect::new(300.0, 600.0, 80.0, 20.0),
            Rect::new(400.0, 500.0, 200.0, 20.0),
            Rect::new(600.0, 370.0, 80.0, 20.0),
            Rect::new(700.0, 250.0, 80.0, 20.0),
            Rect::new(850.0, 150.0, 120.0, 20.0),
        ],
        enemies: &[
            EnemySpawn::new(500.0, 500.0, 100.0),
            EnemySpawn::new(900.0, 150.0, 60.0),
        ],
    },
    // 3
    LevelDef {
        platforms: &[
            Rect::new(300.0, 600.0, 80.0, 20.0),
            Rect::new(400.0, 500.0, 190.0, 20.0),
            Rect::new(300.0, 400.0, 80.0, 20.0),
            Rect::new(450.0, 300.0, 100.0, 20.0),
            Rect::new(600.0, 350.0, 80.0, 20.0),
            Rect::new(700.0, 230.0, 80.0, 20.0),
            Rect::new(850.0, 150.0, 200.0, 20.0),
        ],
        enemies: &[
            EnemySpawn::new(500.0, 500.0, 90.0),
            EnemySpawn::new(500.0, 300.0, 40.0),
            EnemySpawn::new(950.0, 150.0, 100.0).with_speed(3.0),
        ],
    },
    // 4 — pillars
    LevelDef {
        platforms: &[
            Rect::new(300.0, 660.0, 10.0, 20.0),
            Rect::new(400.0, 560.0, 10.0, 20.0),
            Rect::new(550.0, 660.0, 10.0, 20.0),
            Rect::new(650.0, 560.0, 10.0, 20.0),
            Rect::new(600.0, 450.0, 10.0, 20.0),
            Rect::new(700.0, 380.0, 10.0, 20.0),
            Rect::new(600.0, 280.0, 10.0, 20.0),
            Rect::new(720.0, 180.0, 10.0, 20.0),
            Rect::new(920.0, 280.0, 10.0, 20.0),
            Rect::new(1020.0, 180.0, 10.0, 20.0),
        ],
        enemies: &[],
    },
];

pub fn level_count() -> usize {
    LEVELS.len()
}

pub fn get(index: usize) -> Option<&'static LevelDef> {
    LEVELS.get(index)
}
