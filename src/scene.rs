//! Screen composition.  Decides what goes where on each screen; the
//! `Canvas` decides how it looks.

use crate::entities::{Game, GameStatus, WIDTH};
use crate::presenter::{Canvas, Rgb};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_MENU_BG: Rgb = Rgb(30, 144, 255);
pub const C_SKY: Rgb = Rgb(135, 206, 235);
pub const C_ACCENT: Rgb = Rgb(255, 51, 0);
pub const C_BUTTON_TEXT: Rgb = Rgb(255, 255, 255);
pub const C_WIN: Rgb = Rgb(0, 255, 0);
pub const C_LOSE: Rgb = Rgb(255, 50, 0);
pub const C_PLATFORM: Rgb = Rgb(139, 69, 19);
pub const C_GOAL: Rgb = Rgb(255, 215, 0);

pub const BACKGROUND_IMAGE: &str = "bg";
pub const TITLE: &str = "Platform Adventure";

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame for the current status.
pub fn render<C: Canvas>(canvas: &mut C, game: &Game) -> Result<(), C::Error> {
    match game.status {
        GameStatus::Playing => draw_game(canvas, game),
        GameStatus::Menu => draw_menu(canvas, game, None),
        GameStatus::Victory => draw_menu(canvas, game, Some(true)),
        GameStatus::GameOver => draw_menu(canvas, game, Some(false)),
    }
}

// ── Menu family ───────────────────────────────────────────────────────────────

/// `outcome` is `Some(won)` on the end screens, `None` on the plain menu.
fn draw_menu<C: Canvas>(canvas: &mut C, game: &Game, outcome: Option<bool>) -> Result<(), C::Error> {
    canvas.fill(C_MENU_BG)?;
    canvas.blit(BACKGROUND_IMAGE, 0.0, 0.0)?;
    canvas.draw_text(TITLE, (WIDTH / 2.0, 100.0), 72.0, C_ACCENT)?;

    if let Some(won) = outcome {
        let (text, color) = if won {
            ("Voce Venceu! :D", C_WIN)
        } else {
            ("Voce Perdeu! :(", C_LOSE)
        };
        canvas.draw_text(text, (WIDTH / 2.0, 450.0), 72.0, color)?;
    }

    for button in &game.buttons {
        canvas.filled_rect(button.hit_box(), C_ACCENT)?;
        canvas.draw_text(&button.label, button.pos, 32.0, C_BUTTON_TEXT)?;
    }

    Ok(())
}

// ── Playing ───────────────────────────────────────────────────────────────────

fn draw_game<C: Canvas>(canvas: &mut C, game: &Game) -> Result<(), C::Error> {
    canvas.fill(C_SKY)?;
    canvas.blit(BACKGROUND_IMAGE, 0.0, 0.0)?;
    canvas.draw_text(
        &format!("Level {}", game.level + 1),
        (WIDTH / 2.0, 30.0),
        48.0,
        C_ACCENT,
    )?;

    for platform in &game.platforms {
        canvas.filled_rect(*platform, C_PLATFORM)?;
    }
    canvas.filled_rect(game.goal, C_GOAL)?;

    for enemy in &game.enemies {
        canvas.draw_sprite(enemy.sprite, (enemy.x, enemy.y))?;
    }
    canvas.draw_sprite(game.player.sprite, (game.player.x, game.player.y))?;

    Ok(())
}
