pub mod audio;
pub mod console;
pub mod event;
pub mod game;
pub mod input;
pub mod timing;
