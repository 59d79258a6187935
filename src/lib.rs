pub mod config;
pub mod detectors;
pub mod github;
pub mod notify;
pub mod run;
pub mod window;
