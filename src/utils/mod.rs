pub mod ids;
pub mod mentions;
pub mod reorder;
pub mod slug;
pub mod time;
pub mod validation;
