/// Session lifecycle and the per-frame transition.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (and, where needed, an RNG handle) and returns a brand-new
/// `GameSession`.  Side effects are limited to the injected RNG; anything the
/// outside world should react to comes back as a list of `GameEvent`s.

use rand::Rng;

use crate::audio::GameEvent;
use crate::collision::{circle_rectangle_overlap, circles_overlap, rectangles_overlap};
use crate::config::{ConfigError, GameConfig, HitboxModel};
use crate::entities::{Bullet, Enemy, GameSession, GameStatus, InputIntent, Player};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Validate `config` and build the opening state of a session.
pub fn initialize(config: GameConfig) -> Result<GameSession, ConfigError> {
    config.validate()?;
    log::info!(
        "new {} session on a {}x{} field",
        config.variant.label(),
        config.field_width,
        config.field_height
    );
    Ok(fresh_session(config))
}

/// Throw the current attempt away and start over with the same config.
pub fn restart(state: &GameSession) -> GameSession {
    log::info!("restart after frame {} with score {}", state.frame, state.score);
    fresh_session(state.config.clone())
}

fn fresh_session(config: GameConfig) -> GameSession {
    GameSession {
        player: Player::spawn(&config),
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        last_fire_frame: None,
        game_over_announced: false,
        config,
    }
}

// ── Pointer input ────────────────────────────────────────────────────────────

/// Whether the restart button is currently shown.
pub fn restart_available(state: &GameSession) -> bool {
    state.status == GameStatus::GameOver
}

/// A click at field coordinates `(x, y)`.  Only a click on the restart
/// button while the game is over has any effect.
pub fn handle_click(state: &GameSession, x: f32, y: f32) -> GameSession {
    if restart_available(state) && state.config.restart_button.contains(x, y) {
        restart(state)
    } else {
        state.clone()
    }
}

// ── Collision policy ─────────────────────────────────────────────────────────

fn enemy_hits_player(enemy: &Enemy, player: &Player, cfg: &GameConfig) -> bool {
    match cfg.hitbox {
        HitboxModel::Rectangle => rectangles_overlap(&player.bounds(cfg), &enemy.bounds(cfg)),
        HitboxModel::Circle => {
            circles_overlap(&player.hitbox_circle(cfg), &enemy.hitbox_circle(cfg))
        }
    }
}

fn bullet_hits_enemy(bullet: &Bullet, enemy: &Enemy, cfg: &GameConfig) -> bool {
    match cfg.hitbox {
        HitboxModel::Rectangle => circle_rectangle_overlap(&bullet.hitbox(cfg), &enemy.bounds(cfg)),
        HitboxModel::Circle => circles_overlap(&bullet.hitbox(cfg), &enemy.hitbox_circle(cfg)),
    }
}

fn cooled_down(last_fire_frame: Option<u64>, frame: u64, cooldown: u64) -> bool {
    match last_fire_frame {
        None => true,
        Some(last) => frame.saturating_sub(last) >= cooldown,
    }
}

fn spawn_enemy(cfg: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let max_x = cfg.field_width - cfg.enemy_size;
    Enemy {
        x: rng.gen_range(0.0..=max_x),
        y: 0.0,
    }
}

// ── Per-frame step (nearly pure — RNG is injected) ──────────────────────────

/// Advance the session by one frame.  All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).
///
/// A finished session is returned unchanged with no events.
pub fn step(
    state: &GameSession,
    intent: &InputIntent,
    rng: &mut impl Rng,
) -> (GameSession, Vec<GameEvent>) {
    if state.status == GameStatus::GameOver {
        return (state.clone(), Vec::new());
    }

    let cfg = &state.config;
    let frame = state.frame;
    let mut events = Vec::new();

    // ── 1. Move the player ───────────────────────────────────────────────────
    let mut player = state.player.clone();
    player.update(intent, cfg);

    // ── 2. Fire, subject to the cooldown ─────────────────────────────────────
    let mut bullets = state.bullets.clone();
    let mut last_fire_frame = state.last_fire_frame;
    if intent.fire && cooled_down(last_fire_frame, frame, cfg.shoot_cooldown) {
        let (x, y) = player.muzzle(cfg);
        bullets.push(Bullet { x, y });
        last_fire_frame = Some(frame);
        events.push(GameEvent::ShotFired);
    }

    // ── 3. Move bullets, drop the ones past the top ──────────────────────────
    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .map(|mut b| {
            b.update(cfg);
            b
        })
        .filter(|b| !b.is_offscreen())
        .collect();

    // ── 4. Spawn a new enemy ─────────────────────────────────────────────────
    let mut enemies = state.enemies.clone();
    if frame % cfg.enemy_spawn_interval == 0 {
        let enemy = spawn_enemy(cfg, rng);
        log::debug!("frame {}: enemy spawned at x={:.1}", frame, enemy.x);
        enemies.push(enemy);
    }

    // ── 5. Move enemies, then resolve them in spawn order ────────────────────
    for enemy in enemies.iter_mut() {
        enemy.update(cfg);
    }

    let mut bullet_alive = vec![true; bullets.len()];
    let mut survivors: Vec<Enemy> = Vec::with_capacity(enemies.len());
    let mut score = state.score;
    let mut status = GameStatus::Playing;

    let mut remaining = enemies.into_iter();
    while let Some(enemy) = remaining.next() {
        if enemy.reached_bottom(cfg) || enemy_hits_player(&enemy, &player, cfg) {
            status = GameStatus::GameOver;
            // The frame stops here; everything not yet resolved stays as is.
            survivors.push(enemy);
            survivors.extend(remaining.by_ref());
            break;
        }

        // First live bullet in spawn order wins
        let hit = bullets
            .iter()
            .zip(&bullet_alive)
            .position(|(b, &alive)| alive && bullet_hits_enemy(b, &enemy, cfg));

        match hit {
            Some(bi) => {
                bullet_alive[bi] = false;
                score += 1;
                events.push(GameEvent::Explosion);
                log::debug!("frame {}: enemy destroyed, score {}", frame, score);
            }
            None => survivors.push(enemy),
        }
    }

    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .zip(bullet_alive)
        .filter_map(|(b, alive)| alive.then_some(b))
        .collect();

    // ── 6. Game over bookkeeping ─────────────────────────────────────────────
    let mut game_over_announced = state.game_over_announced;
    if status == GameStatus::GameOver && !game_over_announced {
        log::info!("game over at frame {} with score {}", frame, score);
        events.push(GameEvent::GameOver);
        game_over_announced = true;
    }

    let next = GameSession {
        player,
        bullets,
        enemies: survivors,
        score,
        status,
        frame: frame + 1,
        last_fire_frame,
        game_over_announced,
        config: state.config.clone(),
    };
    (next, events)
}
