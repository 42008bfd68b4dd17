use clap::Parser;
use log::{error, info};
use motion_core::{
    codec::ensure_file_type,
    common::{errors::MotionError, sequence::MotionSequence, stats::SequenceStats},
    conversions::adjust::{flip_direction, FlipConfig},
};
use motion_utils::{
    io::FileType,
    logging::{setup_logger, LogLevel},
};
use std::{path::Path, process::ExitCode};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "Flips the direction of a motion by mirroring Z and turning the body 180 degrees about Y")]
struct Args {
    /// Input motion. MUST be an npz file.
    #[arg(short, long)]
    input: String,
    /// Output motion. MUST have extension .npz.
    #[arg(short, long)]
    output: String,
    /// Target mean height of the trajectory
    #[arg(long, default_value_t = FlipConfig::default().center_y, allow_hyphen_values = true)]
    center_y: f32,
}

fn run(args: &Args) -> Result<(), MotionError> {
    let input_path = Path::new(&args.input);
    let output_path = Path::new(&args.output);
    ensure_file_type(input_path, FileType::Npz)?;
    ensure_file_type(output_path, FileType::Npz)?;
    let seq = MotionSequence::new_from_npz(input_path)?;
    info!("input motion\n{}", SequenceStats::from_sequence(&seq));
    let flipped = flip_direction(&seq, &FlipConfig { center_y: args.center_y })?;
    info!("flipped motion\n{}", SequenceStats::from_sequence(&flipped));
    flipped.to_npz_file(output_path)?;
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
