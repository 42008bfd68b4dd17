use crate::common::{
    errors::{MotionError, Result},
    metadata::{BETAS_KEY, BODY_POSE_KEY, GLOBAL_ORIENT_KEY, TRANSL_KEY},
    sequence::MotionSequence,
};
use log::{debug, info};
use ndarray as nd;
use ndarray_npy::{NpzReader, NpzWriter};
use std::{
    fs::File,
    io::{Cursor, Read, Seek, Write},
    path::Path,
};

/// Reads a float array stored either as float32 or as float64. Motion files
/// written straight from numpy frequently keep the float64 default.
#[allow(clippy::cast_possible_truncation)]
fn read_f32_array<R: Read + Seek, D: nd::Dimension>(npz: &mut NpzReader<R>, names: &[String], name: &str) -> Result<nd::Array<f32, D>> {
    if !names.iter().any(|n| n.trim_end_matches(".npy") == name) {
        return Err(MotionError::MissingField(name.to_owned()));
    }
    match npz.by_name::<nd::OwnedRepr<f32>, D>(name) {
        Ok(arr) => Ok(arr),
        Err(err_f32) => {
            debug!("{name} is not float32 ({err_f32}), trying float64");
            let arr: nd::Array<f64, D> = npz.by_name(name).map_err(|_| err_f32)?;
            Ok(arr.mapv(|x| x as f32))
        }
    }
}

impl MotionSequence {
    /// # Errors
    /// Will return an error if one of the four arrays is missing, has a non
    /// float dtype or the wrong number of dimensions, or if the arrays don't
    /// form a valid sequence
    pub fn new_from_npz_reader<R: Read + Seek>(npz: &mut NpzReader<R>) -> Result<Self> {
        let names = npz.names()?;
        debug!("npz names is {names:?}");
        let global_orient: nd::Array2<f32> = read_f32_array(npz, &names, GLOBAL_ORIENT_KEY)?;
        let body_pose: nd::Array2<f32> = read_f32_array(npz, &names, BODY_POSE_KEY)?;
        let transl: nd::Array2<f32> = read_f32_array(npz, &names, TRANSL_KEY)?;
        let betas: nd::Array1<f32> = read_f32_array(npz, &names, BETAS_KEY)?;
        Self::new(global_orient, body_pose, transl, betas)
    }
    /// # Errors
    /// Will return an error if the path cannot be opened or the archive is not
    /// a valid motion
    pub fn new_from_npz(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("loading motion from {}", path.display());
        let mut npz = NpzReader::new(File::open(path)?)?;
        let seq = Self::new_from_npz_reader(&mut npz)?;
        info!("loaded motion with {} frames", seq.num_frames());
        Ok(seq)
    }
    /// # Errors
    /// Will return an error if the buffer is not a valid motion archive
    pub fn new_from_npz_buf(buf: &[u8]) -> Result<Self> {
        let mut npz = NpzReader::new(Cursor::new(buf))?;
        Self::new_from_npz_reader(&mut npz)
    }
    /// Writes the four arrays as float32, under the names the renderer expects
    ///
    /// # Errors
    /// Will return an error if the sequence is malformed or writing fails
    pub fn write_to_npz<W: Write + Seek>(&self, npz: &mut NpzWriter<W>) -> Result<()> {
        self.validate()?;
        npz.add_array(GLOBAL_ORIENT_KEY, &self.global_orient)?;
        npz.add_array(BODY_POSE_KEY, &self.body_pose)?;
        npz.add_array(TRANSL_KEY, &self.transl)?;
        npz.add_array(BETAS_KEY, &self.betas)?;
        Ok(())
    }
    /// Saves the motion, creating missing parent directories.
    ///
    /// # Errors
    /// Will return an error if the file can't be created or written
    pub fn to_npz_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut npz = NpzWriter::new(File::create(path)?);
        self.write_to_npz(&mut npz)?;
        npz.finish()?;
        info!("saved motion to {}", path.display());
        Ok(())
    }
    /// # Errors
    /// Will return an error if the sequence is malformed
    pub fn to_npz_buf(&self) -> Result<Vec<u8>> {
        let mut npz = NpzWriter::new(Cursor::new(Vec::new()));
        self.write_to_npz(&mut npz)?;
        Ok(npz.finish()?.into_inner())
    }
}
