// #![warn(
//     clippy::all,
//     clippy::pedantic,
// )]
// #![allow(clippy::must_use_candidate)]

pub mod io;
pub mod logging;
pub mod numerical;
pub mod vector;
