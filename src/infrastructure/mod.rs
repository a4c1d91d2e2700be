pub mod audio;
pub mod observability;
pub mod recognizer;
