pub mod access;
pub mod app;
pub mod comment;
pub mod community;
pub mod notification;
pub mod post;
pub mod ranking;
pub mod search;
pub mod state;
