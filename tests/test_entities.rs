use descent_shooter::config::{GameConfig, Variant};
use descent_shooter::entities::*;

fn classic() -> GameConfig {
    GameConfig::for_variant(Variant::Classic)
}

fn intent(left: bool, right: bool) -> InputIntent {
    InputIntent { left, right, fire: false }
}

#[test]
fn enums_compare_by_value() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(InputIntent::default(), intent(false, false));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_spawns_centered_near_bottom() {
    let p = Player::spawn(&classic());
    assert_eq!(p.x, 275.0); // (600 - 50) / 2
    assert_eq!(p.y, 540.0); // 600 - 50 - 10
}

#[test]
fn player_moves_left_and_right() {
    let cfg = classic();
    let mut p = Player::spawn(&cfg);
    p.update(&intent(true, false), &cfg);
    assert_eq!(p.x, 270.0);
    p.update(&intent(false, true), &cfg);
    p.update(&intent(false, true), &cfg);
    assert_eq!(p.x, 280.0);
}

#[test]
fn player_left_clamps_at_zero() {
    let cfg = classic();
    let mut p = Player { x: 3.0, y: 540.0 };
    p.update(&intent(true, false), &cfg);
    assert_eq!(p.x, 0.0);
    p.update(&intent(true, false), &cfg);
    assert_eq!(p.x, 0.0);
}

#[test]
fn player_right_clamps_at_field_edge() {
    let cfg = classic();
    let mut p = Player { x: 548.0, y: 540.0 };
    p.update(&intent(false, true), &cfg);
    assert_eq!(p.x, 550.0); // 600 - 50
    p.update(&intent(false, true), &cfg);
    assert_eq!(p.x, 550.0);
}

#[test]
fn both_directions_held_moves_left() {
    let cfg = classic();
    let mut p = Player::spawn(&cfg);
    p.update(&intent(true, true), &cfg);
    assert_eq!(p.x, 270.0);
}

#[test]
fn both_directions_held_at_left_wall_stays_put() {
    let cfg = classic();
    let mut p = Player { x: 0.0, y: 540.0 };
    p.update(&intent(true, true), &cfg);
    assert_eq!(p.x, 0.0);
}

#[test]
fn player_muzzle_is_top_center() {
    let cfg = classic();
    let p = Player::spawn(&cfg);
    assert_eq!(p.muzzle(&cfg), (300.0, 540.0));
}

#[test]
fn player_circle_is_inscribed() {
    let cfg = classic();
    let c = Player::spawn(&cfg).hitbox_circle(&cfg);
    assert_eq!((c.x, c.y, c.radius), (300.0, 565.0, 25.0));
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_moves_up() {
    let cfg = classic();
    let mut b = Bullet { x: 300.0, y: 100.0 };
    b.update(&cfg);
    assert_eq!(b.y, 90.0);
    assert_eq!(b.x, 300.0);
}

#[test]
fn bullet_offscreen_only_above_top() {
    assert!(!(Bullet { x: 0.0, y: 0.0 }).is_offscreen());
    assert!((Bullet { x: 0.0, y: -0.5 }).is_offscreen());
}

#[test]
fn bullet_hitbox_radius_is_half_the_size() {
    let cfg = classic();
    let c = Bullet { x: 1.0, y: 2.0 }.hitbox(&cfg);
    assert_eq!(c.radius, 2.5);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_moves_down() {
    let cfg = classic();
    let mut e = Enemy { x: 10.0, y: 0.0 };
    e.update(&cfg);
    e.update(&cfg);
    assert_eq!(e.y, 4.0);
}

#[test]
fn enemy_reaches_bottom_when_its_bottom_edge_does() {
    let cfg = classic();
    assert!(!(Enemy { x: 0.0, y: 549.0 }).reached_bottom(&cfg));
    assert!((Enemy { x: 0.0, y: 550.0 }).reached_bottom(&cfg));
    assert!((Enemy { x: 0.0, y: 600.0 }).reached_bottom(&cfg));
}

#[test]
fn enemy_bounds_use_enemy_size() {
    let cfg = classic();
    let r = Enemy { x: 280.0, y: 80.0 }.bounds(&cfg);
    assert_eq!((r.right(), r.bottom()), (330.0, 130.0));
}
