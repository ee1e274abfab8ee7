//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current state
//! and returns a brand-new value.  Side effects are limited to the injected
//! `Audio` handle.

use tracing::{debug, info, warn};

use crate::entities::{
    Button, Enemy, Game, GameStatus, Input, Key, MenuAction, Player, Sprite, SpriteSet, Velocity,
    ENEMY_SPAWN_LIFT, GOAL_POS, GOAL_SIZE, GRAVITY, HEIGHT, JUMP_FORCE, MUSIC_ON_VOLUME,
    MUSIC_PLAYING_VOLUME, PLATFORM_START, PLAYER_SIZE, PLAYER_SPEED, PLAYER_START, WIDTH,
};
use crate::geometry::Rect;
use crate::levels::{self, EnemySpawn};
use crate::presenter::{Audio, Music, Sfx, Sound};

// ── Animation timing ─────────────────────────────────────────────────────────

const IDLE_FRAME_TICKS: u32 = 8;
const WALK_FRAME_TICKS: u32 = 6;
/// Walk cycle length, independent of the idle set size.
const WALK_CYCLE: usize = 8;
const ENEMY_FRAME_TICKS: u32 = 8;
const ENEMY_CYCLE: usize = 4;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_player() -> Player {
    Player {
        x: PLAYER_START.0,
        y: PLAYER_START.1,
        velocity: Velocity::default(),
        on_ground: false,
        anim_frame: 0,
        anim_timer: 0,
        sprite: Sprite::new(SpriteSet::HeroIdle, 0),
    }
}

pub fn spawn_enemy(spawn: &EnemySpawn) -> Enemy {
    let (x, y) = spawn.pos;
    Enemy {
        x,
        y: y - ENEMY_SPAWN_LIFT,
        patrol_left: x - spawn.patrol_range,
        patrol_right: x + spawn.patrol_range,
        speed: spawn.speed(),
        direction: 1,
        anim_frame: 0,
        anim_timer: 0,
        sprite: Sprite::new(SpriteSet::EnemyIdle, 0),
    }
}

pub fn sound_label(sound_on: bool) -> String {
    format!("Musica e Sons: {}", if sound_on { "ON" } else { "OFF" })
}

fn menu_buttons(sound_on: bool) -> Vec<Button> {
    let cx = WIDTH / 2.0;
    vec![
        Button {
            label: "Começar o jogo".to_string(),
            pos: (cx, 200.0),
            action: MenuAction::StartGame,
        },
        Button {
            label: sound_label(sound_on),
            pos: (cx, 260.0),
            action: MenuAction::ToggleSound,
        },
        Button {
            label: "Sair".to_string(),
            pos: (cx, 320.0),
            action: MenuAction::Quit,
        },
    ]
}

fn goal_rect() -> Rect {
    Rect::new(GOAL_POS.0, GOAL_POS.1, GOAL_SIZE, GOAL_SIZE)
}

/// Build the game as it looks on launch: on the menu, level 0 loaded behind it.
pub fn init_game(sound_on: bool) -> Game {
    let game = Game {
        status: GameStatus::Menu,
        level: 0,
        sound_on,
        platforms: Vec::new(),
        enemies: Vec::new(),
        goal: goal_rect(),
        player: new_player(),
        buttons: menu_buttons(sound_on),
        exit_requested: false,
    };
    load_level(&game, 0)
}

// ── Level flow ───────────────────────────────────────────────────────────────

/// Move the player back to the spawn point.  Velocity and animation carry over.
pub fn reset_position(player: &Player) -> Player {
    Player {
        x: PLAYER_START.0,
        y: PLAYER_START.1,
        ..player.clone()
    }
}

/// Swap in level `index`: fresh platforms, goal and enemies, player back at spawn.
pub fn load_level(state: &Game, index: usize) -> Game {
    let Some(def) = levels::get(index) else {
        warn!(index, "no such level; keeping current layout");
        return state.clone();
    };

    let mut platforms = Vec::with_capacity(def.platforms.len() + 1);
    platforms.push(PLATFORM_START);
    platforms.extend_from_slice(def.platforms);

    info!(level = index + 1, enemies = def.enemies.len(), "level loaded");

    Game {
        level: index,
        platforms,
        enemies: def.enemies.iter().map(spawn_enemy).collect(),
        goal: goal_rect(),
        player: reset_position(&state.player),
        ..state.clone()
    }
}

pub fn start_game(state: &Game, audio: &mut impl Audio) -> Game {
    info!("game started");
    let playing = Game {
        status: GameStatus::Playing,
        ..state.clone()
    };
    let game = load_level(&playing, 0);
    if game.sound_on {
        audio.play_music(Music::Background);
        audio.set_music_volume(MUSIC_PLAYING_VOLUME);
    }
    game
}

pub fn toggle_sound(state: &Game, audio: &mut impl Audio) -> Game {
    let sound_on = !state.sound_on;
    audio.set_music_volume(if sound_on { MUSIC_ON_VOLUME } else { 0.0 });
    info!(sound_on, "sound toggled");

    let buttons = state
        .buttons
        .iter()
        .map(|b| {
            if b.action == MenuAction::ToggleSound {
                Button {
                    label: sound_label(sound_on),
                    ..b.clone()
                }
            } else {
                b.clone()
            }
        })
        .collect();

    Game {
        sound_on,
        buttons,
        ..state.clone()
    }
}

/// Player touched the goal: advance, or win once the catalog is exhausted.
fn reach_goal(state: &Game, audio: &mut impl Audio) -> Game {
    let next = state.level + 1;
    if next < levels::level_count() {
        return load_level(state, next);
    }

    info!("all levels cleared");
    if state.sound_on {
        audio.set_music_volume(0.0);
        audio.play_sound(Sound::Win);
    }
    Game {
        status: GameStatus::Victory,
        level: next,
        ..state.clone()
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

fn apply_input(player: &Player, input: &Input, sfx: &mut Sfx<'_>) -> Player {
    let mut p = player.clone();
    p.velocity.dx = 0.0;
    if input.right {
        p.velocity.dx = PLAYER_SPEED;
    }
    if input.left {
        p.velocity.dx = -PLAYER_SPEED;
    }
    if input.jump && p.on_ground {
        p.velocity.dy = JUMP_FORCE;
        p.on_ground = false;
        sfx.play(Sound::Jump);
    }
    p
}

/// Gravity, then collision resolved one axis at a time.  Overlapping
/// platforms are applied in list order, so a later one may override an
/// earlier snap.
fn apply_physics(player: &Player, platforms: &[Rect]) -> Player {
    let (half_w, half_h) = (PLAYER_SIZE.0 / 2.0, PLAYER_SIZE.1 / 2.0);
    let mut p = player.clone();
    p.velocity.dy += GRAVITY;

    // Horizontal pass — dx is left alone, input recomputes it next frame
    p.x += p.velocity.dx;
    for platform in platforms {
        if p.rect().overlaps(platform) {
            if p.velocity.dx > 0.0 {
                p.x = platform.left() - half_w;
            } else if p.velocity.dx < 0.0 {
                p.x = platform.right() + half_w;
            }
        }
    }

    // Vertical pass
    p.y += p.velocity.dy;
    p.on_ground = false;
    for platform in platforms {
        if p.rect().overlaps(platform) {
            if p.velocity.dy > 0.0 {
                p.y = platform.top() - half_h;
                p.on_ground = true;
            } else {
                p.y = platform.bottom() + half_h;
            }
            p.velocity.dy = 0.0;
        }
    }

    p
}

fn animate_player(player: &Player) -> Player {
    let mut p = player.clone();
    p.anim_timer += 1;

    if p.velocity.dx == 0.0 {
        if p.anim_timer >= IDLE_FRAME_TICKS {
            p.anim_timer = 0;
            p.anim_frame = (p.anim_frame + 1) % SpriteSet::HeroIdle.frame_count();
            p.sprite = Sprite::new(SpriteSet::HeroIdle, p.anim_frame);
        }
    } else if p.anim_timer >= WALK_FRAME_TICKS {
        p.anim_timer = 0;
        p.anim_frame = (p.anim_frame + 1) % WALK_CYCLE;
        let set = if p.velocity.dx < 0.0 {
            SpriteSet::HeroWalkLeft
        } else {
            SpriteSet::HeroWalkRight
        };
        p.sprite = Sprite::new(set, p.anim_frame);
    }

    p
}

fn check_enemies(player: &Player, enemies: &[Enemy], sfx: &mut Sfx<'_>) -> Player {
    let mut p = player.clone();
    for enemy in enemies {
        if p.rect().overlaps(&enemy.rect()) {
            debug!(x = p.x, y = p.y, "player hit by enemy; respawning");
            sfx.play(Sound::Hurt);
            p = reset_position(&p);
        }
    }
    p
}

/// Advance the player by one frame: input, physics, animation, enemy contact.
pub fn step_player(
    player: &Player,
    input: &Input,
    platforms: &[Rect],
    enemies: &[Enemy],
    sfx: &mut Sfx<'_>,
) -> Player {
    let p = apply_input(player, input, sfx);
    let p = apply_physics(&p, platforms);
    let p = animate_player(&p);
    check_enemies(&p, enemies, sfx)
}

// ── Enemy ────────────────────────────────────────────────────────────────────

/// Walk one step along the patrol and turn around at either bound.  Enemies
/// ignore platforms entirely.
pub fn step_enemy(enemy: &Enemy) -> Enemy {
    let mut e = enemy.clone();
    e.x += e.speed * f32::from(e.direction);
    if e.x > e.patrol_right {
        e.x = e.patrol_right;
        e.direction = -1;
    } else if e.x < e.patrol_left {
        e.x = e.patrol_left;
        e.direction = 1;
    }

    e.anim_timer += 1;
    if e.direction != 0 && e.anim_timer >= ENEMY_FRAME_TICKS {
        e.anim_timer = 0;
        e.anim_frame = (e.anim_frame + 1) % ENEMY_CYCLE;
        let set = if e.direction < 0 {
            SpriteSet::EnemyWalkLeft
        } else {
            SpriteSet::EnemyWalkRight
        };
        e.sprite = Sprite::new(set, e.anim_frame);
    }

    e
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing outside of `Playing`.
///
/// Order matters: the player moves first (against last frame's enemies),
/// then every enemy, then the fall and goal checks see the final positions.
pub fn tick(state: &Game, input: &Input, audio: &mut impl Audio) -> Game {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut sfx = Sfx::new(state.sound_on, &mut *audio);
    let player = step_player(
        &state.player,
        input,
        &state.platforms,
        &state.enemies,
        &mut sfx,
    );
    let enemies = state.enemies.iter().map(step_enemy).collect();

    let game = Game {
        player,
        enemies,
        ..state.clone()
    };

    if game.player.y > HEIGHT {
        info!(level = game.level + 1, "player fell off the world");
        if game.sound_on {
            audio.set_music_volume(0.0);
            audio.play_sound(Sound::Lose);
        }
        return Game {
            status: GameStatus::GameOver,
            ..game
        };
    }

    if game.player.rect().overlaps(&game.goal) {
        return reach_goal(&game, audio);
    }

    game
}

// ── Input events ─────────────────────────────────────────────────────────────

/// Mouse press at world point `(x, y)`.  Only menu-family screens react; the
/// first button whose hit box contains the point fires.
pub fn click_menu(state: &Game, (x, y): (f32, f32), audio: &mut impl Audio) -> Game {
    if !state.status.is_menu() {
        return state.clone();
    }

    let action = state
        .buttons
        .iter()
        .find(|b| b.hit_box().contains(x, y))
        .map(|b| b.action);

    match action {
        Some(MenuAction::StartGame) => start_game(state, audio),
        Some(MenuAction::ToggleSound) => toggle_sound(state, audio),
        Some(MenuAction::Quit) => {
            info!("quit requested from menu");
            Game {
                exit_requested: true,
                ..state.clone()
            }
        }
        None => state.clone(),
    }
}

pub fn key_down(state: &Game, key: Key, audio: &mut impl Audio) -> Game {
    match key {
        Key::Escape => Game {
            status: GameStatus::Menu,
            ..state.clone()
        },
        // Quick restart from any screen but the game itself
        Key::Space if state.status != GameStatus::Playing => start_game(state, audio),
        Key::Space => state.clone(),
    }
}
