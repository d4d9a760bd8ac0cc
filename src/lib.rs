pub mod descriptor;
pub mod generator;
pub mod paths;
pub mod prompt;
pub mod runner;
pub mod util;
