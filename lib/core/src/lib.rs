pub mod access;
pub mod comment;
pub mod community;
pub mod expansion;
pub mod filter;
pub mod notification;
pub mod post;
pub mod progress;
pub mod ranking;
pub mod search;
pub mod service;
pub mod store;
pub mod thread;
pub mod user;
