use super::sequence::MotionSequence;
use ndarray as nd;
use std::fmt;

const AXIS_NAMES: [&str; 3] = ["X", "Y", "Z"];

/// Closed value range of one column. NaNs are skipped; an all-NaN or empty
/// column gives ``min = +inf, max = -inf``.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}
impl AxisRange {
    pub const EMPTY: Self = Self {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };
    pub fn from_column(column: &nd::ArrayView1<f32>) -> Self {
        column.iter().fold(Self::EMPTY, |range, &x| Self {
            min: range.min.min(x),
            max: range.max.max(x),
        })
    }
    pub fn extent(&self) -> f32 {
        self.max - self.min
    }
}

/// Summary printed by the tools before and after they touch a motion
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceStats {
    pub num_frames: usize,
    pub shapes: Vec<(&'static str, Vec<usize>)>,
    pub translation: [AxisRange; 3],
    pub global_orient: [AxisRange; 3],
}
impl SequenceStats {
    pub fn from_sequence(seq: &MotionSequence) -> Self {
        let ranges = |arr: &nd::Array2<f32>| -> [AxisRange; 3] {
            std::array::from_fn(|axis| {
                if axis < arr.ncols() {
                    AxisRange::from_column(&arr.column(axis))
                } else {
                    AxisRange::EMPTY
                }
            })
        };
        Self {
            num_frames: seq.num_frames(),
            shapes: vec![
                ("global_orient", seq.global_orient.shape().to_vec()),
                ("body_pose", seq.body_pose.shape().to_vec()),
                ("transl", seq.transl.shape().to_vec()),
                ("betas", seq.betas.shape().to_vec()),
            ],
            translation: ranges(&seq.transl),
            global_orient: ranges(&seq.global_orient),
        }
    }
}
impl fmt::Display for SequenceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames: {}", self.num_frames)?;
        writeln!(f, "shapes:")?;
        for (name, shape) in &self.shapes {
            writeln!(f, "  {name}: {shape:?}")?;
        }
        writeln!(f, "translation range:")?;
        for (axis, range) in AXIS_NAMES.iter().zip(&self.translation) {
            writeln!(f, "  {axis}: {:.3} to {:.3}", range.min, range.max)?;
        }
        writeln!(f, "global orient (axis-angle) range:")?;
        for (axis, range) in AXIS_NAMES.iter().zip(&self.global_orient) {
            writeln!(f, "  {axis}: {:.3} to {:.3}", range.min, range.max)?;
        }
        Ok(())
    }
}
