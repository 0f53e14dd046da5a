//! Recommend using with
//! `RUSTFLAGS="-C target-cpu=x86-64-v2" cargo bench`
//!
//! Compares the cost of linear and spline sampling. Spline sampling
//! includes a squad per rotation channel so it is expected to be several
//! times slower than linear.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kinetrack::{
    animation::{Animation, BoneTrack, Interpolation},
    skeleton::Skeleton,
    spline::RotationalSpline,
    types::BoneId,
};
use nalgebra_glm as glm;

const COUNT: usize = 100;
const KEY_FRAMES: usize = 30;
const STEP: f32 = 1.0_f32 / 30.0_f32;
const MUL: f32 = (KEY_FRAMES as f32) * STEP / (COUNT as f32);

fn use_this_track(bone: BoneId) -> BoneTrack {
    let mut track = BoneTrack::new(bone);
    for i in 0..KEY_FRAMES {
        let f = i as f32;
        let kf = track.create_key_frame(f * STEP);
        kf.translation = glm::vec3(f.sin(), 0.1 * f, f.cos());
        kf.set_rotation(&glm::quat_angle_axis(
            0.2 * f, //
            &glm::normalize(&glm::vec3(1.0, f, 0.5)),
        ));
        kf.scale = glm::vec3(1.0, 1.0 + 0.01 * f, 1.0);
    }
    track
}

fn use_this_animation() -> Animation {
    let mut animation = Animation::new("bench");
    for bone in BoneId::ALL {
        *animation.create_bone_track(bone) = use_this_track(bone);
    }
    animation
}

fn sample(c: &mut Criterion, name: &str, interpolation: Interpolation) {
    let mut track = use_this_track(BoneId::ElbowLeft);
    track.ensure_splines();
    let track = black_box(track);
    c.bench_function(
        name, //
        |b| {
            b.iter(|| {
                for i in 0..=COUNT {
                    let _ = track.sample((i as f32) * MUL, interpolation);
                }
            });
        },
    );
}

fn linear_sample(c: &mut Criterion) {
    sample(c, "linear sample", Interpolation::Linear);
}

fn spline_sample(c: &mut Criterion) {
    sample(c, "spline sample", Interpolation::Spline);
}

fn squad(c: &mut Criterion) {
    let mut spline: RotationalSpline = (0..KEY_FRAMES)
        .map(|i| {
            glm::quat_angle_axis(
                0.2 * i as f32, //
                &glm::vec3(0.0, 1.0, 0.0),
            )
        })
        .collect();
    spline.calc_tangents();
    let spline = black_box(spline);
    c.bench_function(
        "squad", //
        |b| {
            b.iter(|| {
                for i in 0..=COUNT {
                    let _ = spline.point((i as f32) / (COUNT as f32));
                }
            });
        },
    );
}

fn apply_animation(c: &mut Criterion) {
    let mut animation = use_this_animation();
    animation.set_interpolation(Interpolation::Spline);
    let mut skeleton = Skeleton::new();
    c.bench_function(
        "apply spline animation", //
        |b| {
            b.iter(|| {
                animation.apply(
                    &mut skeleton,
                    black_box(0.43),
                    1.0,
                    1.0,
                    None,
                );
            });
        },
    );
}

criterion_group!(
    benches,
    linear_sample,
    spline_sample,
    squad,
    apply_animation
);
criterion_main!(benches);
