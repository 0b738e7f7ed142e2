//! Fixed catalogs of built-in tags and pipes
//!
//! Both catalogs are static, immutable tables dispatched by name. They are
//! safe to read from any number of resolution calls at once.

mod pipes;
mod tags;

pub use pipes::{lookup_pipe, PipeDefinition, PipeFn, PIPES};
pub use tags::{lookup_tag, TagDefinition, ValueType, DATE_FORMAT, TAGS};
