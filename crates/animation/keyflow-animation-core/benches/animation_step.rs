use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyflow_animation_core::{
    parse_animation_json, AnimationController, ControllerCfg, ManualClock, PlaybackStyle,
};

fn controller(style: PlaybackStyle) -> (AnimationController, Rc<ManualClock>) {
    let json = keyflow_test_fixtures::json("bounce").expect("bounce fixture");
    let asset = parse_animation_json(&json).expect("parse bounce");
    let clock = Rc::new(ManualClock::new());
    let cfg = ControllerCfg {
        playback_style: style,
        ..ControllerCfg::default()
    };
    (
        AnimationController::new(asset.into_shared(), clock.clone(), cfg),
        clock,
    )
}

fn bench_animation_step(c: &mut Criterion) {
    for (label, style) in [
        ("tick continuous", PlaybackStyle::Continuous),
        ("tick rastered", PlaybackStyle::RasteredToFps),
        ("tick frame based", PlaybackStyle::FrameBased),
    ] {
        let (mut ctrl, clock) = controller(style);
        c.bench_function(label, |b| {
            b.iter(|| {
                clock.advance(16.0);
                black_box(ctrl.tick())
            })
        });
    }

    let json = keyflow_test_fixtures::json("bounce").expect("bounce fixture");
    let mut asset = parse_animation_json(&json).expect("parse bounce");
    c.bench_function("evaluate reverse", |b| {
        let mut t = 0.0;
        b.iter(|| {
            t = (t + 7.0) % 1000.0;
            black_box(asset.evaluate(black_box(t), -1.0, PlaybackStyle::Continuous))
        })
    });
}

criterion_group!(benches, bench_animation_step);
criterion_main!(benches);
