//! End to end properties of re-basing whole sequences through the public API.

use approx::assert_relative_eq;
use motion_core::{
    common::{errors::MotionError, sequence::MotionSequence},
    transform::{
        config::RigidTransformConfig,
        options::TransformerOptions,
        rigid::RigidTransform,
        transformer::{transform_sequence, SequenceTransformer},
    },
};
use ndarray::{array, Array1, Array2, Axis};

/// A few seconds of a made up walk: moderate joint angles, root drifting
/// forward and bobbing up and down.
fn captured_walk(num_frames: usize) -> MotionSequence {
    let mut seq = MotionSequence::new_rest(num_frames);
    for t in 0..num_frames {
        let phase = t as f32 * 0.2;
        seq.global_orient.row_mut(t).assign(&array![0.1 * phase.sin(), 0.3, 0.05]);
        seq.transl.row_mut(t).assign(&array![0.02 * t as f32, 0.9 + 0.03 * phase.sin(), 0.5 * t as f32]);
        for j in 0..69 {
            seq.body_pose[(t, j)] = 0.4 * ((j as f32 * 0.37 + phase).sin());
        }
    }
    seq.betas = Array1::from_iter((0..10).map(|i| 0.1 * i as f32 - 0.3));
    seq
}

fn assert_close(a: &Array2<f32>, b: &Array2<f32>, eps: f32) {
    assert_eq!(a.dim(), b.dim());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_relative_eq!(*x, *y, epsilon = eps);
    }
}

// ============================================================================
// Numbered properties
// ============================================================================

#[test]
fn identity_transform_leaves_motion_unchanged() {
    let seq = captured_walk(12);
    let out = transform_sequence(&seq, &RigidTransformConfig::default().to_transform()).unwrap();
    assert_close(&out.global_orient, &seq.global_orient, 1e-5);
    assert_close(&out.body_pose, &seq.body_pose, 1e-5);
    assert_close(&out.transl, &seq.transl, 1e-5);
    assert_eq!(out.betas, seq.betas);
}

#[test]
fn centering_without_offset_gives_zero_mean() {
    let seq = captured_walk(30);
    let config = RigidTransformConfig {
        rx: -90.0,
        rz: 15.0,
        center: true,
        ..Default::default()
    };
    let out = transform_sequence(&seq, &config.to_transform()).unwrap();
    let mean = out.transl.mean_axis(Axis(0)).unwrap();
    for m in &mean {
        assert_relative_eq!(*m, 0.0, epsilon = 1e-5);
    }
}

#[test]
fn quarter_turn_about_y_single_frame() {
    let mut seq = MotionSequence::new_rest(1);
    seq.transl = array![[1.0, 0.0, 0.0]];
    let config = RigidTransformConfig {
        ry: 90.0,
        ..Default::default()
    };
    let out = transform_sequence(&seq, &config.to_transform()).unwrap();
    assert_close(&out.transl, &array![[0.0, 0.0, -1.0]], 1e-6);
    assert_eq!(out.global_orient, array![[0.0_f32, 0.0, 0.0]]);
}

#[test]
fn translation_length_mismatch_fails() {
    let mut seq = captured_walk(5);
    seq.transl = Array2::zeros((4, 3));
    let err = transform_sequence(&seq, &RigidTransform::from_euler_deg(0.0, 90.0, 0.0)).unwrap_err();
    match err {
        MotionError::ShapeMismatch { field, expected, found } => {
            assert_eq!(field, "transl");
            assert_eq!(expected, "5 frames");
            assert_eq!(found, "[4, 3]");
        }
        other => panic!("expected a shape mismatch, got {other}"),
    }
}

// ============================================================================
// Further guarantees
// ============================================================================

#[test]
fn inverse_transform_restores_motion() {
    let seq = captured_walk(8);
    let forward = RigidTransform::from_euler_deg(-90.0, 0.0, 0.0);
    let backward = RigidTransform::new(forward.rotation.transpose(), false, forward.offset);
    let there = transform_sequence(&seq, &forward).unwrap();
    let back = transform_sequence(&there, &backward).unwrap();
    assert_close(&back.global_orient, &seq.global_orient, 1e-5);
    assert_close(&back.body_pose, &seq.body_pose, 1e-5);
    assert_close(&back.transl, &seq.transl, 1e-5);
}

#[test]
fn thread_count_does_not_change_results() {
    let seq = captured_walk(64);
    let rt = RigidTransform::from_euler_deg(30.0, -45.0, 60.0).with_centering(true);
    let serial = SequenceTransformer::with_options(rt.clone(), TransformerOptions::serial())
        .apply(&seq)
        .unwrap();
    let parallel = SequenceTransformer::new(rt).apply(&seq).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn betas_pass_through_bit_identical() {
    let mut seq = captured_walk(3);
    seq.betas[7] = f32::from_bits(0x3f80_0001);
    let out = transform_sequence(&seq, &RigidTransform::from_euler_deg(0.0, 180.0, 0.0)).unwrap();
    for (a, b) in out.betas.iter().zip(seq.betas.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn offset_is_added_after_rotation() {
    let mut seq = MotionSequence::new_rest(2);
    seq.transl = array![[0.0, 0.0, 1.0], [0.0, 0.0, 2.0]];
    let config = RigidTransformConfig {
        ry: 90.0,
        tx: 10.0,
        ..Default::default()
    };
    let out = transform_sequence(&seq, &config.to_transform()).unwrap();
    assert_close(&out.transl, &array![[11.0, 0.0, 0.0], [12.0, 0.0, 0.0]], 1e-5);
}
