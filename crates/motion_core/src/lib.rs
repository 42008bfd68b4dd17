//! Rigid re-basing of SMPL motion sequences.
//!
//! A [`MotionSequence`](common::sequence::MotionSequence) is loaded from the
//! renderer's ``.npz`` layout, re-expressed in another frame with a
//! [`SequenceTransformer`](transform::transformer::SequenceTransformer) and
//! written back. The [`conversions`] module holds the root-only scene fitting
//! helpers and the import of generator joint positions.
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod common;
pub mod conversions;
pub mod transform;
