pub mod blog;
pub mod comment;
pub mod dashboard;
pub mod follow;
pub mod like;
pub mod user;
pub mod view;
