//! Per-phase screen layouts
//!
//! Turns a `GameState` into draw commands. Pieces are copied out of their
//! pools; nothing here mutates the simulation.

use super::command::{Color, Frame, TextAnchor};
use crate::consts::ARENA_WIDTH;
use crate::sim::{EntityPool, GameState, Piece};

pub const INTRO_BACKGROUND: Color = Color::rgb(75, 125, 200);
pub const PLAY_BACKGROUND: Color = Color::BLACK;
pub const GAME_OVER_BACKGROUND: Color = Color::RED;
pub const SHIP_COLOR: Color = Color::RED;
pub const ENEMY_COLOR: Color = Color::GREEN;
pub const BUBBLE_COLOR: Color = Color::rgb(90, 160, 230);
pub const WALL_COLOR: Color = Color::rgb(110, 80, 50);
pub const SCOREBOARD_COLOR: Color = Color::rgb(30, 30, 100);
/// Height of the score strip at the top of the screen
pub const SCOREBOARD_HEIGHT: f32 = 16.0;

fn draw_rect(frame: &mut Frame, piece: Piece, color: Color) {
    frame.rect(
        piece.position.x,
        piece.position.y,
        piece.dimensions.x,
        piece.dimensions.y,
        color,
    );
}

fn draw_rects(frame: &mut Frame, pool: &EntityPool<Piece>, color: Color) {
    for (_, piece) in pool {
        draw_rect(frame, *piece, color);
    }
}

/// Bubbles and sidewalls, shared by every phase
pub fn draw_decor(frame: &mut Frame, state: &GameState) {
    for (_, bubble) in &state.bubbles {
        let center = bubble.center();
        frame.circle(bubble.dimensions.x * 0.5, center.x, center.y, BUBBLE_COLOR);
    }
    draw_rects(frame, &state.left_wall, WALL_COLOR);
    draw_rects(frame, &state.right_wall, WALL_COLOR);
}

pub fn draw_intro(frame: &mut Frame, state: &GameState) {
    frame.clear(INTRO_BACKGROUND);
    draw_decor(frame, state);
    frame.text("BUBBLE DODGE", TextAnchor::TopCenter, Color::WHITE);
    frame.text("press a button", TextAnchor::Center, Color::WHITE);
    frame.text("to start", TextAnchor::Below, Color::WHITE);
}

pub fn draw_playing(frame: &mut Frame, state: &GameState) {
    frame.clear(PLAY_BACKGROUND);
    draw_decor(frame, state);
    if let Some(ship) = state.ship {
        draw_rect(frame, ship, SHIP_COLOR);
    }
    draw_rects(frame, &state.enemies, ENEMY_COLOR);

    frame.rect(0.0, 0.0, ARENA_WIDTH, SCOREBOARD_HEIGHT, SCOREBOARD_COLOR);
    frame.text(
        format!("{}  L{}", state.score, state.level),
        TextAnchor::TopLeft,
        Color::WHITE,
    );
    if state.crashed {
        frame.text("Crash!!", TextAnchor::Below, Color::WHITE);
    }
}

pub fn draw_game_over(frame: &mut Frame, state: &GameState) {
    frame.clear(GAME_OVER_BACKGROUND);
    draw_decor(frame, state);
    frame.text("GAME OVER", TextAnchor::Center, Color::WHITE);
    frame.text(format!("score {}", state.score), TextAnchor::Below, Color::WHITE);
    frame.text(format!("level {}", state.level), TextAnchor::Below, Color::WHITE);
}
