use anyhow::{Context, bail};
use tracing::info;

use crate::api::validation::{validate_email, validate_password, validate_username};
use crate::config::Config;
use crate::db::{NewUser, Store, User};
use crate::models::Role;
use crate::security::hash_password;

/// Promote the account matching `username` or `email`, or create it.
pub async fn cmd_create_admin(
    config: &Config,
    username: &str,
    email: &str,
    password: Option<&str>,
) -> anyhow::Result<()> {
    let username = validate_username(username)?;
    let email = validate_email(email)?;

    let store = Store::connect(&config.database).await?;

    if let Some(user) = find_existing(&store, &username, &email).await? {
        if user.role.is_admin() {
            println!("{} (ID: {}) is already an admin", user.username, user.id);
            return Ok(());
        }

        store.set_user_role(user.id, Role::Admin).await?;
        info!(user_id = user.id, "Promoted user to admin");
        println!("✓ Promoted {} (ID: {}) to admin", user.username, user.id);
        return Ok(());
    }

    let Some(password) = password else {
        bail!("--password is required to create a new admin account");
    };
    validate_password(password, config.security.min_password_length)?;

    let password_hash = hash_password(password, &config.security)
        .await
        .context("Failed to hash password")?;

    let user = store
        .create_user(NewUser {
            username,
            email,
            password_hash,
            role: Role::Admin,
            pfp: None,
        })
        .await?;

    info!(user_id = user.id, "Created admin account");
    println!("✓ Created admin {} (ID: {})", user.username, user.id);
    Ok(())
}

async fn find_existing(store: &Store, username: &str, email: &str) -> anyhow::Result<Option<User>> {
    let by_name = store.get_user_by_username(username).await?;
    let by_email = store.get_user_by_email(email).await?;

    match (by_name, by_email) {
        (Some(a), Some(b)) if a.id != b.id => {
            bail!("Username and email belong to different accounts")
        }
        (Some(user), _) | (None, Some(user)) => Ok(Some(user)),
        (None, None) => Ok(None),
    }
}
