pub mod levels;
pub mod maze;
pub mod palette;
