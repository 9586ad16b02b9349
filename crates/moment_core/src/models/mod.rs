//! Input records (match metadata, timeline frames) and the output record.

pub mod match_info;
pub mod moment;
pub mod position;
pub mod timeline;

pub use match_info::*;
pub use moment::*;
pub use position::*;
pub use timeline::*;
