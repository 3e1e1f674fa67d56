pub mod compare;
pub mod config;
pub mod error;
pub mod recorder;
pub mod runner;
pub mod stats;
pub mod statsfile;

pub use compare::*;
pub use config::*;
pub use error::*;
pub use recorder::*;
pub use runner::*;
pub use stats::*;
pub use statsfile::*;
