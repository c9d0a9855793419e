pub mod ai;
pub mod calculator;
pub mod history;
pub mod launcher;
pub mod speech;
pub mod system;
