pub mod blast;
pub mod rank_file;
pub mod ranked_list;

pub use ranked_list::{RankedCollection, RankedList, TieSet};
