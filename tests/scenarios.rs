// Page-level scenarios driven through the public API

use glam::{DVec3, Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;

use portfolio_engine::config::{DecorConfig, RevealConfig, Side};
use portfolio_engine::render::{Encoder, POINT_STRIDE};
use portfolio_engine::reveal::{Cascade, Section};
use portfolio_engine::scene::{MouseLight, ParticleField, Scene};

#[test]
fn about_highlights_cascade() {
    let config = RevealConfig {
        base_delay: 0.5,
        increment: 0.1,
        ..RevealConfig::default()
    };
    let mut section = Section::new("about", &Cascade::from_config(&config), 4);

    // scrolled past twice before it settles on screen
    let samples = [false, false, true, false, true, true];
    let fired: Vec<bool> = samples.iter().map(|&s| section.observe(s)).collect();
    assert_eq!(fired, [false, false, true, false, false, false]);

    let delays: Vec<f32> = section.steps().iter().map(|s| s.delay).collect();
    for (got, want) in delays.iter().zip([0.5, 0.6, 0.7, 0.8]) {
        assert!((got - want).abs() < 1e-5, "{got} vs {want}");
    }
}

#[test]
fn unvisited_section_keeps_children_hidden() {
    let mut section = Section::new("blog", &Cascade::CARDS, 3);
    for _ in 0..50 {
        section.observe(false);
    }
    assert!(!section.is_revealed());
    for step in section.steps() {
        // no reveal means no clock; children sit at their start state
        assert_eq!(step.sample(0.0).opacity, 0.0);
    }
}

#[test]
fn pointer_drives_hero_light() {
    let mut light = MouseLight::default();
    light.track(0.5, -0.3);
    let p = light.position();
    assert!((p.x - 2.5).abs() < 1e-6);
    assert!((p.y - -1.5).abs() < 1e-6);
}

#[test]
fn hero_particle_field_bounds() {
    let mut rng = StdRng::seed_from_u64(2024);
    let field = ParticleField::generate(300, Vec3::splat(10.0), Vec2::new(0.01, 0.02), &mut rng);
    assert_eq!(field.len(), 300);
    for p in field.points() {
        for c in p.to_array() {
            assert!((-10.0..=10.0).contains(&c), "{c} out of range");
        }
    }
}

#[test]
fn hero_runs_a_minute_of_frames() {
    let mut scene = Scene::hero(&mut StdRng::seed_from_u64(99));
    let mut enc = Encoder::new(1920, 1080);
    let mut last_spin: Vec<DVec3> = Vec::new();

    for frame in 0..3600 {
        let t = frame as f64 / 60.0;
        scene.set_pointer((t * 0.3).sin() as f32, (t * 0.2).cos() as f32);
        scene.tick(t);
        enc.encode(&scene);

        let spin: Vec<DVec3> = scene.shapes().iter().map(|s| s.rotation()).collect();
        if !last_spin.is_empty() {
            for (now, before) in spin.iter().zip(&last_spin) {
                assert!(now.x > before.x && now.y > before.y);
            }
        }
        last_spin = spin;

        for p in enc.points().chunks_exact(POINT_STRIDE) {
            assert!(p.iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn left_decor_in_section_color() {
    let config = DecorConfig {
        position: Side::Left,
        color: "#0891b2".into(),
    };
    let mut scene = Scene::decor(&config, &mut StdRng::seed_from_u64(5)).unwrap();
    scene.tick(1.5);
    let mut enc = Encoder::new(256, 256);
    enc.encode(&scene);
    assert!(enc.segment_count() > 0);
    assert_eq!(enc.point_count(), 30);
}
