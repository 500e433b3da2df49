pub mod log;
pub mod string;
pub mod time;
