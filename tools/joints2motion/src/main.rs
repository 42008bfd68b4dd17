use clap::Parser;
use log::{error, info};
use motion_core::{
    codec::ensure_file_type,
    common::{errors::MotionError, stats::SequenceStats},
    conversions::joints::JointPositions,
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
    long_about = "Converts joint positions from a text-to-motion generator, shaped [samples, 22, 3, frames], into a motion .npz that follows the pelvis in the rest pose.\n\nThe generator's results.npy is a pickled dict; export its motion array to a plain .npy first, e.g. in python: np.save('motion.npy', np.load('results.npy', allow_pickle=True).item()['motion'])"
)]
struct Args {
    /// Joint positions. MUST be a raw numeric npy array; pickled results.npy files need their `motion` entry exported first.
    #[arg(short, long)]
    input: String,
    /// Output motion. MUST have extension .npz. Missing directories are created.
    #[arg(short, long)]
    output: String,
}

fn run(args: &Args) -> Result<(), MotionError> {
    let input_path = Path::new(&args.input);
    let output_path = Path::new(&args.output);
    ensure_file_type(input_path, FileType::Npy)?;
    ensure_file_type(output_path, FileType::Npz)?;
    let joints = JointPositions::from_npy(input_path)?;
    info!("{} frames of {} joints", joints.num_frames(), joints.num_joints());
    let seq = joints.to_sequence()?;
    info!("converted motion\n{}", SequenceStats::from_sequence(&seq));
    seq.to_npz_file(output_path)?;
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
