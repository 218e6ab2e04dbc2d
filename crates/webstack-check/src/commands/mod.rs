pub mod check;
pub mod sample;
