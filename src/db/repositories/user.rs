use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entities::{blogs, comments, users};
use crate::models::Role;

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub pfp: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: Role::from_db(&model.role),
            pfp: model.pfp,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub pfp: Option<String>,
}

/// Whitelisted user fields; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub pfp: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl UserPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.pfp.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, user: NewUser) -> Result<User> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = users::ActiveModel {
            username: Set(user.username),
            email: Set(user.email.to_lowercase()),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_string()),
            pfp: Set(user.pfp),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        info!(user_id = model.id, username = %model.username, "User created");
        Ok(User::from(model))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    /// Case-insensitive email lookup
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(email_matches(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(User::from))
    }

    /// Resolve a login identifier (email or username) together with the stored hash.
    pub async fn get_credentials(&self, identifier: &str) -> Result<Option<(User, String)>> {
        let user = users::Entity::find()
            .filter(
                Condition::any()
                    .add(email_matches(identifier))
                    .add(users::Column::Username.eq(identifier)),
            )
            .one(&self.conn)
            .await
            .context("Failed to query user credentials")?;

        Ok(user.map(|u| {
            let password_hash = u.password_hash.clone();
            (User::from(u), password_hash)
        }))
    }

    pub async fn get_password_hash(&self, id: i32) -> Result<Option<String>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user password hash")?;

        Ok(user.map(|u| u.password_hash))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Apply a patch. A username change is propagated to the `author`
    /// column of the user's blogs and comments in the same transaction.
    pub async fn update(&self, id: i32, patch: UserPatch) -> Result<Option<User>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = users::Entity::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to query user for update")?
        else {
            return Ok(None);
        };

        let renamed = patch
            .username
            .as_deref()
            .filter(|name| *name != existing.username)
            .map(str::to_string);

        let mut active: users::ActiveModel = existing.into();
        if let Some(username) = patch.username {
            active.username = Set(username);
        }
        if let Some(email) = patch.email {
            active.email = Set(email.to_lowercase());
        }
        if let Some(pfp) = patch.pfp {
            active.pfp = Set(Some(pfp));
        }
        if let Some(hash) = patch.password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(role) = patch.role {
            active.role = Set(role.as_str().to_string());
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&txn)
            .await
            .context("Failed to update user")?;

        if let Some(username) = renamed {
            blogs::Entity::update_many()
                .col_expr(blogs::Column::Author, Expr::value(username.clone()))
                .filter(blogs::Column::UserId.eq(id))
                .exec(&txn)
                .await
                .context("Failed to rename blog author")?;

            comments::Entity::update_many()
                .col_expr(comments::Column::Author, Expr::value(username))
                .filter(comments::Column::UserId.eq(id))
                .exec(&txn)
                .await
                .context("Failed to rename comment author")?;
        }

        txn.commit().await?;

        Ok(Some(User::from(model)))
    }

    pub async fn set_role(&self, id: i32, role: Role) -> Result<bool> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Role, Expr::value(role.as_str()))
            .col_expr(
                users::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update user role")?;

        if result.rows_affected > 0 {
            info!(user_id = id, role = %role, "User role changed");
        }
        Ok(result.rows_affected > 0)
    }

    /// Hard delete; blogs, comments, likes, views and follows go with it.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        if result.rows_affected > 0 {
            info!(user_id = id, "User deleted");
        }
        Ok(result.rows_affected > 0)
    }
}

fn email_matches(email: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(users::Column::Email))).eq(email.to_lowercase())
}
