use clap::Parser;
use log::{error, info};
use motion_core::{
    codec::ensure_file_type,
    common::{errors::MotionError, sequence::MotionSequence, stats::SequenceStats},
    conversions::adjust::{adjust_translation, AdjustConfig},
};
use motion_utils::{
    io::FileType,
    logging::{setup_logger, LogLevel},
};
use std::{path::Path, process::ExitCode};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "Fits a motion into a scene: turns the body about Y, scales the trajectory, lifts it to a target height and centers it horizontally")]
struct Args {
    /// Input motion. MUST be an npz file.
    #[arg(short, long)]
    input: String,
    /// Output motion. MUST have extension .npz.
    #[arg(short, long)]
    output: String,
    /// Target mean height of the trajectory (0.0 = ground level)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    center_y: f32,
    /// Scale factor for the trajectory
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
    /// Rotation about Y in degrees, use 180 to turn the motion around
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotate_y: f64,
}

fn run(args: &Args) -> Result<(), MotionError> {
    let input_path = Path::new(&args.input);
    let output_path = Path::new(&args.output);
    ensure_file_type(input_path, FileType::Npz)?;
    ensure_file_type(output_path, FileType::Npz)?;
    let config = AdjustConfig {
        rotate_y: args.rotate_y,
        scale: args.scale,
        center_y: args.center_y,
    };
    let seq = MotionSequence::new_from_npz(input_path)?;
    info!("input motion\n{}", SequenceStats::from_sequence(&seq));
    let adjusted = adjust_translation(&seq, &config)?;
    info!("adjusted motion\n{}", SequenceStats::from_sequence(&adjusted));
    adjusted.to_npz_file(output_path)?;
    Ok(())
}

fn main() -> ExitCode {
    setup_logger(LogLevel::Info, None);
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
