pub mod diff;
pub mod serve;
