pub mod source;

pub use source::{DatasetSource, FileSource, HttpSource, StaticSource};
