pub mod prelude;

pub mod blogs;
pub mod comments;
pub mod follows;
pub mod likes;
pub mod users;
pub mod views;
