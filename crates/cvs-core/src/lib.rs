pub mod error;
mod path;
mod probe;
pub mod types;

pub use error::*;
pub use path::{SplitPath, split_path};
pub use probe::{FileSystemProbe, PathProbe};
pub use types::*;
