pub mod chat;
pub mod listing;
