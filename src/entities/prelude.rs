pub use super::blogs::Entity as Blogs;
pub use super::comments::Entity as Comments;
pub use super::follows::Entity as Follows;
pub use super::likes::Entity as Likes;
pub use super::users::Entity as Users;
pub use super::views::Entity as Views;
