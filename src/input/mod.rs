pub mod parser;
pub mod text;

pub use parser::CommandParser;
pub use text::{Input, InputHistory, SharedLines, TypedInput, stdin_lines};
