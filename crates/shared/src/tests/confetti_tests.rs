use rand::{rngs::StdRng, SeedableRng};

use super::*;

#[test]
fn timer_is_live_only_within_its_window() {
    let timer = ConfettiTimer::start(100.0);
    assert!(timer.is_live(100.0));
    assert!(timer.is_live(100.0 + (CONFETTI_DURATION as f64) - 0.01));
    assert!(!timer.is_live(100.0 + CONFETTI_DURATION as f64));
    assert!(!timer.is_live(200.0));
}

#[test]
fn timer_never_comes_back_to_life() {
    let timer = ConfettiTimer::start(5.0);
    let mut now = 5.0;
    let mut was_live = true;
    while now < 15.0 {
        let live = timer.is_live(now);
        assert!(was_live || !live, "timer restarted at {now}");
        was_live = live;
        now += 0.05;
    }
}

#[test]
fn both_edge_bursts_fire_the_configured_particle_count() {
    let mut rng = StdRng::seed_from_u64(14);
    for spec in edge_bursts() {
        let particles = spawn_burst(spec, 1280.0, 800.0, &mut rng);
        assert_eq!(particles.len(), BURST_PARTICLES);
    }
}

#[test]
fn left_burst_launches_up_and_right() {
    let mut rng = StdRng::seed_from_u64(14);
    let [left, _] = edge_bursts();
    for particle in spawn_burst(left, 1280.0, 800.0, &mut rng) {
        assert_eq!(particle.x, 0.0);
        assert_eq!(particle.y, 400.0);
        assert!(particle.vx > 0.0, "vx = {}", particle.vx);
        assert!(particle.vy < 0.0, "vy = {}", particle.vy);
    }
}

#[test]
fn right_burst_launches_up_and_left() {
    let mut rng = StdRng::seed_from_u64(14);
    let [_, right] = edge_bursts();
    for particle in spawn_burst(right, 1280.0, 800.0, &mut rng) {
        assert_eq!(particle.x, 1280.0);
        assert!(particle.vx < 0.0, "vx = {}", particle.vx);
        assert!(particle.vy < 0.0, "vy = {}", particle.vy);
    }
}

#[test]
fn spread_keeps_launch_angles_near_the_nominal_direction() {
    let mut rng = StdRng::seed_from_u64(14);
    let [left, _] = edge_bursts();
    for _ in 0..40 {
        for particle in spawn_burst(left, 1280.0, 800.0, &mut rng) {
            let angle = (-particle.vy).atan2(particle.vx).to_degrees();
            let half_spread = left.spread_degrees / 2.0;
            assert!(
                (angle - left.angle_degrees).abs() <= half_spread + 0.01,
                "angle {angle} outside spread"
            );
        }
    }
}

#[test]
fn particles_arc_under_gravity() {
    let mut rng = StdRng::seed_from_u64(14);
    let [left, _] = edge_bursts();
    let mut particle = spawn_burst(left, 1280.0, 800.0, &mut rng)[0];
    let initial_vy = particle.vy;
    for _ in 0..120 {
        particle.step(1.0 / 60.0);
    }
    // two simulated seconds in, gravity has won over the launch impulse
    assert!(particle.vy > 0.0);
    assert!(particle.vy > initial_vy);
}

#[test]
fn drag_bleeds_off_horizontal_speed() {
    let mut rng = StdRng::seed_from_u64(14);
    let [left, _] = edge_bursts();
    let mut particle = spawn_burst(left, 1280.0, 800.0, &mut rng)[0];
    let initial_vx = particle.vx;
    for _ in 0..60 {
        particle.step(1.0 / 60.0);
    }
    assert!(particle.vx > 0.0);
    assert!(particle.vx < initial_vx);
}

#[test]
fn particles_expire_at_the_end_of_their_lifetime() {
    let mut rng = StdRng::seed_from_u64(14);
    let [left, _] = edge_bursts();
    let mut particle = spawn_burst(left, 1280.0, 800.0, &mut rng)[0];
    assert!(!particle.expired());
    while particle.age < PARTICLE_LIFETIME {
        particle.step(1.0 / 60.0);
    }
    assert!(particle.expired());
}

#[test]
fn opacity_holds_then_fades_to_nothing() {
    let mut rng = StdRng::seed_from_u64(14);
    let [left, _] = edge_bursts();
    let mut particle = spawn_burst(left, 1280.0, 800.0, &mut rng)[0];
    assert_eq!(particle.opacity(), 1.0);
    particle.age = PARTICLE_LIFETIME * 0.75;
    assert!(particle.opacity() > 0.0 && particle.opacity() < 1.0);
    particle.age = PARTICLE_LIFETIME;
    assert_eq!(particle.opacity(), 0.0);
}

#[test]
fn bursts_mix_both_hues() {
    let mut rng = StdRng::seed_from_u64(14);
    let [left, _] = edge_bursts();
    let mut seen_love = false;
    let mut seen_white = false;
    for _ in 0..20 {
        for particle in spawn_burst(left, 1280.0, 800.0, &mut rng) {
            match particle.hue {
                ConfettiHue::Love => seen_love = true,
                ConfettiHue::White => seen_white = true,
            }
        }
    }
    assert!(seen_love && seen_white);
}
