// Data-layer modules: the in-memory store and its seed dataset
pub mod storage {
    pub use crate::storage::*;
}

pub mod seed {
    pub use crate::seed::*;
}
