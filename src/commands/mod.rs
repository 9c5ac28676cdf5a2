pub mod generate;
pub mod options;
pub mod package;
pub mod pass;
pub mod project;
