pub mod char_reader;
pub mod pending;
pub mod renderer;
