pub mod gemini;
pub mod weather;
