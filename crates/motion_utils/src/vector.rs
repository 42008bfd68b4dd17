use na::{Matrix3, Vector3};
use ndarray as nd;
extern crate nalgebra as na;
pub type Vector3d = Vector3<f64>;
pub type Matrix3d = Matrix3<f64>;
pub fn vec3d_from_row(row: &nd::ArrayView1<f64>) -> Vector3d {
    Vector3d::new(row[0], row[1], row[2])
}
pub fn vec3d_from_row_f(row: &nd::ArrayView1<f32>) -> Vector3d {
    Vector3d::new(f64::from(row[0]), f64::from(row[1]), f64::from(row[2]))
}
pub fn set_row_from_vec3d(row: &mut nd::ArrayViewMut1<f64>, v: &Vector3d) {
    row[0] = v.x;
    row[1] = v.y;
    row[2] = v.z;
}
#[allow(clippy::cast_possible_truncation)]
pub fn set_row_f_from_vec3d(row: &mut nd::ArrayViewMut1<f32>, v: &Vector3d) {
    row[0] = v.x as f32;
    row[1] = v.y as f32;
    row[2] = v.z as f32;
}
/// Reads a 3x3 block of a batched rotation array into a nalgebra matrix
pub fn mat3d_from_view(view: &nd::ArrayView2<f64>) -> Matrix3d {
    Matrix3d::from_fn(|r, c| view[(r, c)])
}
pub fn set_view_from_mat3d(view: &mut nd::ArrayViewMut2<f64>, m: &Matrix3d) {
    for r in 0..3 {
        for c in 0..3 {
            view[(r, c)] = m[(r, c)];
        }
    }
}
