mod admin;
mod migrate;

pub use admin::cmd_create_admin;
pub use migrate::cmd_migrate;
