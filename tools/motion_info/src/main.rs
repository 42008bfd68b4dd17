use clap::Parser;
use log::error;
use motion_core::{
    codec::ensure_file_type,
    common::{errors::MotionError, sequence::MotionSequence, stats::SequenceStats},
};
use motion_utils::{
    io::FileType,
    logging::{setup_logger, LogLevel},
};
use std::{path::Path, process::ExitCode};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "Prints frame count, array shapes and the translation and root orientation ranges of a motion .npz")]
struct Args {
    /// Input motion. MUST be an npz file.
    #[arg(short, long)]
    input: String,
}

fn run(args: &Args) -> Result<(), MotionError> {
    let input_path = Path::new(&args.input);
    ensure_file_type(input_path, FileType::Npz)?;
    let seq = MotionSequence::new_from_npz(input_path)?;
    seq.warn_if_non_finite(&args.input);
    print!("{}", SequenceStats::from_sequence(&seq));
    Ok(())
}

fn main() -> ExitCode {
    setup_logger(LogLevel::Warn, None);
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
