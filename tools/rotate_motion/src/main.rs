use clap::Parser;
use log::{error, info};
use motion_core::{
    codec::ensure_file_type,
    common::{errors::MotionError, sequence::MotionSequence, stats::SequenceStats},
    transform::{config::RigidTransformConfig, options::TransformerOptions, transformer::SequenceTransformer},
};
use motion_utils::{
    io::FileType,
    logging::{setup_logger, LogLevel},
};
use std::{path::Path, process::ExitCode};

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Rotates a motion .npz by a fixed Euler XYZ rotation (Rz * Ry * Rx) in world coordinates. Joint rotations are conjugated, the root trajectory is rotated, optionally centered and offset."
)]
struct Args {
    /// Input motion. MUST be an npz file.
    #[arg(short, long)]
    input: String,
    /// Output motion. MUST have extension .npz. Missing directories are created.
    #[arg(short, long)]
    output: String,
    /// Rotation about X in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rx: f64,
    /// Rotation about Y in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    ry: f64,
    /// Rotation about Z in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rz: f64,
    /// Center the translation to zero mean before offsetting
    #[arg(long)]
    center: bool,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    tx: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    ty: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    tz: f64,
    /// JSON file with the transform. Can't be combined with the rotation, centering or offset flags.
    #[arg(long, conflicts_with_all = ["rx", "ry", "rz", "center", "tx", "ty", "tz"])]
    config: Option<String>,
    /// Run on a single thread
    #[arg(long)]
    serial: bool,
}
impl Args {
    fn transform_config(&self) -> Result<RigidTransformConfig, MotionError> {
        if let Some(config_path) = &self.config {
            let path = Path::new(config_path);
            ensure_file_type(path, FileType::Json)?;
            info!("reading transform from {}", path.display());
            return RigidTransformConfig::load_json(path);
        }
        Ok(RigidTransformConfig {
            rx: self.rx,
            ry: self.ry,
            rz: self.rz,
            center: self.center,
            tx: self.tx,
            ty: self.ty,
            tz: self.tz,
        })
    }
}

fn run(args: &Args) -> Result<(), MotionError> {
    let input_path = Path::new(&args.input);
    let output_path = Path::new(&args.output);
    ensure_file_type(input_path, FileType::Npz)?;
    ensure_file_type(output_path, FileType::Npz)?;
    let config = args.transform_config()?;
    info!(
        "rotation rx={} ry={} rz={} (degrees), center={}, offset=[{}, {}, {}]",
        config.rx, config.ry, config.rz, config.center, config.tx, config.ty, config.tz
    );
    let options = if args.serial {
        TransformerOptions::serial()
    } else {
        TransformerOptions::default()
    };
    let seq = MotionSequence::new_from_npz(input_path)?;
    info!("input motion\n{}", SequenceStats::from_sequence(&seq));
    let rotated = SequenceTransformer::with_options(config.to_transform(), options).apply(&seq)?;
    info!("rotated motion\n{}", SequenceStats::from_sequence(&rotated));
    rotated.to_npz_file(output_path)?;
    Ok(())
}

fn main() -> ExitCode {
    setup_logger(LogLevel::Info, None); // Call only once per process
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
