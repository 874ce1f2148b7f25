/// Build-time game configuration.
///
/// Each `Variant` maps to a fixed table of field dimensions, entity sizes,
/// speeds and frame timers.  Nothing here is read at runtime from files or
/// the environment; a config is picked from the tables and validated once
/// when a session is created.

use std::fmt;

use crate::collision::Rect;

/// Raw constants for both variants.
pub mod consts {
    // ── Classic ──────────────────────────────────────────────────────────────
    pub const CLASSIC_FIELD_WIDTH: f32 = 600.0;
    pub const CLASSIC_FIELD_HEIGHT: f32 = 600.0;
    pub const CLASSIC_PLAYER_SIZE: f32 = 50.0;
    pub const CLASSIC_ENEMY_SIZE: f32 = 50.0;
    pub const CLASSIC_BULLET_SIZE: f32 = 5.0;
    pub const CLASSIC_PLAYER_SPEED: f32 = 5.0;
    pub const CLASSIC_ENEMY_SPEED: f32 = 2.0;
    pub const CLASSIC_BULLET_SPEED: f32 = 10.0;
    pub const CLASSIC_ENEMY_SPAWN_INTERVAL: u64 = 50;

    // ── Arcade ───────────────────────────────────────────────────────────────
    pub const ARCADE_FIELD_WIDTH: f32 = 600.0;
    pub const ARCADE_FIELD_HEIGHT: f32 = 400.0;
    pub const ARCADE_PLAYER_SIZE: f32 = 40.0;
    pub const ARCADE_ENEMY_SIZE: f32 = 40.0;
    pub const ARCADE_BULLET_SIZE: f32 = 10.0;
    pub const ARCADE_PLAYER_SPEED: f32 = 5.0;
    pub const ARCADE_ENEMY_SPEED: f32 = 1.5;
    pub const ARCADE_BULLET_SPEED: f32 = 4.0;
    pub const ARCADE_ENEMY_SPAWN_INTERVAL: u64 = 80;

    // ── Shared ───────────────────────────────────────────────────────────────
    /// Frames between two shots.
    pub const SHOOT_COOLDOWN: u64 = 10;
    /// Gap between the player's bottom edge and the field's bottom edge.
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    pub const RESTART_BUTTON_WIDTH: f32 = 100.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 40.0;
}

use consts::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Square sprites, rectangle hitboxes.
    Classic,
    /// Round sprites, circle hitboxes, slower pace.
    Arcade,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Classic => "CLASSIC",
            Variant::Arcade => "ARCADE",
        }
    }
}

/// How the player and enemies are shaped for collision purposes.
/// Bullets are always circles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitboxModel {
    /// Enemy↔player: rectangle-rectangle.  Bullet↔enemy: circle-rectangle.
    Rectangle,
    /// Enemy and player use the circle inscribed in their square.
    /// Bullet↔enemy and enemy↔player: circle-circle.
    Circle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub variant: Variant,
    pub field_width: f32,
    pub field_height: f32,
    /// Side of the player's square.
    pub player_size: f32,
    /// Side of an enemy's square.
    pub enemy_size: f32,
    /// Diameter of a bullet.
    pub bullet_size: f32,
    /// Horizontal pixels per frame.
    pub player_speed: f32,
    /// Downward pixels per frame.
    pub enemy_speed: f32,
    /// Upward pixels per frame.
    pub bullet_speed: f32,
    pub enemy_spawn_interval: u64,
    pub shoot_cooldown: u64,
    pub hitbox: HitboxModel,
    /// Pointer region that restarts the game while it is over.
    pub restart_button: Rect,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::for_variant(Variant::Classic)
    }
}

impl GameConfig {
    pub fn for_variant(variant: Variant) -> GameConfig {
        match variant {
            Variant::Classic => GameConfig {
                variant,
                field_width: CLASSIC_FIELD_WIDTH,
                field_height: CLASSIC_FIELD_HEIGHT,
                player_size: CLASSIC_PLAYER_SIZE,
                enemy_size: CLASSIC_ENEMY_SIZE,
                bullet_size: CLASSIC_BULLET_SIZE,
                player_speed: CLASSIC_PLAYER_SPEED,
                enemy_speed: CLASSIC_ENEMY_SPEED,
                bullet_speed: CLASSIC_BULLET_SPEED,
                enemy_spawn_interval: CLASSIC_ENEMY_SPAWN_INTERVAL,
                shoot_cooldown: SHOOT_COOLDOWN,
                hitbox: HitboxModel::Rectangle,
                restart_button: restart_button_below_center(
                    CLASSIC_FIELD_WIDTH,
                    CLASSIC_FIELD_HEIGHT,
                ),
            },
            Variant::Arcade => GameConfig {
                variant,
                field_width: ARCADE_FIELD_WIDTH,
                field_height: ARCADE_FIELD_HEIGHT,
                player_size: ARCADE_PLAYER_SIZE,
                enemy_size: ARCADE_ENEMY_SIZE,
                bullet_size: ARCADE_BULLET_SIZE,
                player_speed: ARCADE_PLAYER_SPEED,
                enemy_speed: ARCADE_ENEMY_SPEED,
                bullet_speed: ARCADE_BULLET_SPEED,
                enemy_spawn_interval: ARCADE_ENEMY_SPAWN_INTERVAL,
                shoot_cooldown: SHOOT_COOLDOWN,
                hitbox: HitboxModel::Circle,
                restart_button: restart_button_below_center(
                    ARCADE_FIELD_WIDTH,
                    ARCADE_FIELD_HEIGHT,
                ),
            },
        }
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_size", self.player_size),
            ("enemy_size", self.enemy_size),
            ("bullet_size", self.bullet_size),
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("bullet_speed", self.bullet_speed),
        ];
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.enemy_spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }

        let too_large = [
            ("player_size", self.player_size),
            ("enemy_size", self.enemy_size),
            ("bullet_size", self.bullet_size),
        ];
        for (name, size) in too_large {
            if size > self.field_width || size > self.field_height {
                return Err(ConfigError::LargerThanField { name, size });
            }
        }

        // The player rests PLAYER_BOTTOM_MARGIN above the bottom edge
        if self.player_size + PLAYER_BOTTOM_MARGIN > self.field_height {
            return Err(ConfigError::PlayerBelowField {
                size: self.player_size,
                field_height: self.field_height,
            });
        }

        let b = &self.restart_button;
        let finite = [b.x, b.y, b.w, b.h].iter().all(|v| v.is_finite());
        if !finite
            || b.w <= 0.0
            || b.h <= 0.0
            || b.x < 0.0
            || b.y < 0.0
            || b.right() > self.field_width
            || b.bottom() > self.field_height
        {
            return Err(ConfigError::RestartButtonOutOfField(*b));
        }

        Ok(())
    }
}

/// Button centered horizontally, just below the final-score line.
fn restart_button_below_center(width: f32, height: f32) -> Rect {
    Rect {
        x: (width - RESTART_BUTTON_WIDTH) / 2.0,
        y: height / 2.0 + 50.0,
        w: RESTART_BUTTON_WIDTH,
        h: RESTART_BUTTON_HEIGHT,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive { name: &'static str, value: f32 },
    ZeroSpawnInterval,
    LargerThanField { name: &'static str, size: f32 },
    PlayerBelowField { size: f32, field_height: f32 },
    RestartButtonOutOfField(Rect),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::NonPositive { name, value } => {
                write!(f, "{} must be a positive number, got {}", name, value)
            }
            ConfigError::ZeroSpawnInterval => {
                write!(f, "enemy_spawn_interval must be at least one frame")
            }
            ConfigError::LargerThanField { name, size } => {
                write!(f, "{} ({}) does not fit inside the field", name, size)
            }
            ConfigError::PlayerBelowField { size, field_height } => write!(
                f,
                "player_size ({}) plus the {} bottom margin does not fit a field {} high",
                size, PLAYER_BOTTOM_MARGIN, field_height
            ),
            ConfigError::RestartButtonOutOfField(r) => write!(
                f,
                "restart button ({}, {}, {}x{}) must be non-empty and inside the field",
                r.x, r.y, r.w, r.h
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
