use platform_adventure::compute::{init_game, new_player};
use platform_adventure::entities::*;
use platform_adventure::geometry::Rect;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq so equality comparisons work
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(MenuAction::Quit, MenuAction::Quit);
    assert_ne!(MenuAction::StartGame, MenuAction::ToggleSound);
    assert_ne!(SpriteSet::HeroWalkLeft, SpriteSet::HeroWalkRight);

    let sprite = Sprite::new(SpriteSet::EnemyWalkLeft, 2);
    assert_eq!(sprite, Sprite::new(SpriteSet::EnemyWalkLeft, 2));
}

#[test]
fn only_playing_is_outside_the_menu_family() {
    assert!(GameStatus::Menu.is_menu());
    assert!(GameStatus::Victory.is_menu());
    assert!(GameStatus::GameOver.is_menu());
    assert!(!GameStatus::Playing.is_menu());
}

#[test]
fn frame_counts_match_sprite_sets() {
    assert_eq!(SpriteSet::HeroIdle.frame_count(), 4);
    assert_eq!(SpriteSet::HeroWalkLeft.frame_count(), 8);
    assert_eq!(SpriteSet::HeroWalkRight.frame_count(), 8);
    assert_eq!(SpriteSet::EnemyIdle.frame_count(), 1);
    assert_eq!(SpriteSet::EnemyWalkLeft.frame_count(), 4);
    assert_eq!(SpriteSet::EnemyWalkRight.frame_count(), 4);
}

#[test]
fn asset_names_follow_asset_layout() {
    assert_eq!(
        Sprite::new(SpriteSet::HeroWalkLeft, 3).asset_name(),
        "characters/hero/walk_left/hero_walk_left_frame_3"
    );
    assert_eq!(
        Sprite::new(SpriteSet::HeroIdle, 0).asset_name(),
        "characters/hero/idle/hero_idle_frame_0"
    );
    assert_eq!(
        Sprite::new(SpriteSet::EnemyWalkRight, 1).asset_name(),
        "characters/enemy/walk_right/enemy_walk_right_frame_1"
    );
    assert_eq!(
        Sprite::new(SpriteSet::EnemyIdle, 0).asset_name(),
        "characters/enemy/idle/enemy_idle_frame"
    );
}

#[test]
fn asset_frame_wraps_within_set() {
    // Idle has 4 frames, so frame 6 of the shared counter shows frame 2
    assert_eq!(
        SpriteSet::HeroIdle.asset_name(6),
        "characters/hero/idle/hero_idle_frame_2"
    );
}

#[test]
fn player_rect_is_centred_on_position() {
    let p = new_player();
    let r = p.rect();
    assert_eq!(r, Rect::new(84.0, 576.0, PLAYER_SIZE.0, PLAYER_SIZE.1));
    assert_eq!(r, Rect::centered(PLAYER_START.0, PLAYER_START.1, 32.0, 48.0));
}

#[test]
fn button_hit_box_is_centred_on_label() {
    let g = init_game(true);
    assert_eq!(g.buttons[0].hit_box(), Rect::new(450.0, 180.0, 300.0, 40.0));
    assert_eq!(g.buttons[2].hit_box(), Rect::new(450.0, 300.0, 300.0, 40.0));
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_game(true);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 999.0;
    cloned.level = 3;
    cloned.buttons[1].label.push('!');
    cloned.platforms.clear();

    assert_eq!(original.player.x, PLAYER_START.0);
    assert_eq!(original.level, 0);
    assert_eq!(original.buttons[1].label, "Musica e Sons: ON");
    assert!(!original.platforms.is_empty());
}
