/// Game entity types and the session state.
///
/// Entities are plain data plus their own position integration; everything
/// that involves more than one entity lives in `compute`.

use crate::collision::{Circle, Rect};
use crate::config::consts::PLAYER_BOTTOM_MARGIN;
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Intent flags for one frame, derived from whatever keys are held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// `x`/`y` is the top-left corner of the player's square.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

impl Player {
    /// Horizontally centered, resting just above the bottom edge.
    pub fn spawn(cfg: &GameConfig) -> Player {
        Player {
            x: (cfg.field_width - cfg.player_size) / 2.0,
            y: cfg.field_height - cfg.player_size - PLAYER_BOTTOM_MARGIN,
        }
    }

    /// Left wins when both directions are held.
    pub fn update(&mut self, intent: &InputIntent, cfg: &GameConfig) {
        let max_x = cfg.field_width - cfg.player_size;
        if intent.left {
            if self.x > 0.0 {
                self.x = (self.x - cfg.player_speed).max(0.0);
            }
        } else if intent.right && self.x < max_x {
            self.x = (self.x + cfg.player_speed).min(max_x);
        }
    }

    pub fn bounds(&self, cfg: &GameConfig) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: cfg.player_size,
            h: cfg.player_size,
        }
    }

    /// Circle inscribed in the player's square.
    pub fn hitbox_circle(&self, cfg: &GameConfig) -> Circle {
        let r = cfg.player_size / 2.0;
        Circle {
            x: self.x + r,
            y: self.y + r,
            radius: r,
        }
    }

    /// Where new bullets appear: top center of the ship.
    pub fn muzzle(&self, cfg: &GameConfig) -> (f32, f32) {
        (self.x + cfg.player_size / 2.0, self.y)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// `x`/`y` is the bullet's center.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

impl Bullet {
    pub fn update(&mut self, cfg: &GameConfig) {
        self.y -= cfg.bullet_speed;
    }

    pub fn is_offscreen(&self) -> bool {
        self.y < 0.0
    }

    pub fn hitbox(&self, cfg: &GameConfig) -> Circle {
        Circle {
            x: self.x,
            y: self.y,
            radius: cfg.bullet_size / 2.0,
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// `x`/`y` is the top-left corner of the enemy's square.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
}

impl Enemy {
    pub fn update(&mut self, cfg: &GameConfig) {
        self.y += cfg.enemy_speed;
    }

    /// True once the enemy's bottom edge touches or passes the field's bottom.
    pub fn reached_bottom(&self, cfg: &GameConfig) -> bool {
        self.y + cfg.enemy_size >= cfg.field_height
    }

    pub fn bounds(&self, cfg: &GameConfig) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: cfg.enemy_size,
            h: cfg.enemy_size,
        }
    }

    pub fn hitbox_circle(&self, cfg: &GameConfig) -> Circle {
        let r = cfg.enemy_size / 2.0;
        Circle {
            x: self.x + r,
            y: self.y + r,
            radius: r,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything one game attempt owns.  Cloneable so the transitions in
/// `compute` can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    /// Validated once by `compute::initialize`; read it through `config()`.
    pub(crate) config: GameConfig,
    pub player: Player,
    /// Spawn order.
    pub bullets: Vec<Bullet>,
    /// Spawn order.
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Frame of the most recent shot; `None` until the first one.
    pub last_fire_frame: Option<u64>,
    /// Set once the game-over event has been emitted for this session.
    pub game_over_announced: bool,
}

impl GameSession {
    /// The configuration this session was created with.  It cannot be
    /// changed after `initialize` has validated it.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
