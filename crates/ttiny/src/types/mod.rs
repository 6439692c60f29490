mod block_kind;
mod correlation_id;
mod stash;
mod value;

pub use block_kind::BlockKind;
pub use correlation_id::CorrelationId;
pub use stash::Stash;
pub use value::{StashObject, Value};
