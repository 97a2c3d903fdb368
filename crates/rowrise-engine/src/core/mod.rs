pub use self::{block::*, board::*, cell::*};

pub(crate) mod block;
pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod connectivity;
