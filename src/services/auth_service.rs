use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::{
    entity::users::{ActiveModel as UserActive, Entity as Users},
    error::{StoreError, StoreResult},
    models::User,
};

pub async fn user_exists(conn: &DatabaseConnection, username: &str) -> StoreResult<bool> {
    let found = Users::find_by_id(username.to_string()).one(conn).await?;
    Ok(found.is_some())
}

pub async fn register_user(
    conn: &DatabaseConnection,
    username: &str,
    password: &str,
) -> StoreResult<User> {
    // The key is stored exactly as given; lookups never normalize it.
    if username.trim().is_empty() || password.is_empty() {
        return Err(StoreError::validation(
            "username and password must not be empty",
        ));
    }

    if user_exists(conn, username).await? {
        return Err(StoreError::validation(format!(
            "username {username:?} is already taken"
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Credential(e.to_string()))?
        .to_string();

    let user = UserActive {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
    }
    .insert(conn)
    .await?;

    tracing::info!(username = %user.username, "user registered");
    Ok(User {
        username: user.username,
    })
}

/// `Ok(None)` for an unknown user or a wrong password.
pub async fn login_user(
    conn: &DatabaseConnection,
    username: &str,
    password: &str,
) -> StoreResult<Option<User>> {
    let user = Users::find_by_id(username.to_string()).one(conn).await?;
    let user = match user {
        Some(u) => u,
        None => return Ok(None),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| StoreError::Credential(format!("stored hash for {username:?} is malformed")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Ok(None);
    }

    Ok(Some(User {
        username: user.username,
    }))
}
