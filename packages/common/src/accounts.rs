//! User accounts and the profiles provisioned alongside them.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::entity::{profile, recipe, user};
use crate::lifecycle::{self, MediaLifecycle, MediaOutcome};
use crate::media::layout::DEFAULT_AVATAR;

pub const USERNAME_MAX_CHARS: usize = 150;
pub const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("A user with that username already exists.")]
    UsernameTaken,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Letters, digits and `@ . + - _`, at most 150 characters.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("Username is required");
    }
    if username.chars().count() > USERNAME_MAX_CHARS {
        return Err("Username must be at most 150 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err("Username may contain only letters, digits and @/./+/-/_ characters");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err("This password is too short. It must contain at least 8 characters.");
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err("This password is entirely numeric.");
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, AccountError> {
    let mut salt = [0u8; 16];
    rand::rng().fill(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|e| AccountError::Hash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::Hash(e.to_string()))
}

/// `false` for a wrong password; an error only for a malformed stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AccountError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AccountError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn username_taken<C: ConnectionTrait>(
    db: &C,
    username: &str,
    except_user: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = user::Entity::find().filter(user::Column::Username.eq(username));
    if let Some(id) = except_user {
        query = query.filter(user::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

fn map_unique_violation(err: DbErr) -> AccountError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            debug!("Unique constraint caught on user write");
            AccountError::UsernameTaken
        }
        _ => AccountError::Db(err),
    }
}

/// Post-creation hook: give a new user their profile with the default avatar.
pub async fn provision_profile<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<profile::Model, DbErr> {
    profile::ActiveModel {
        user_id: Set(user_id),
        image: Set(DEFAULT_AVATAR.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Create a user and, in the same transaction, their profile.
pub async fn register(
    db: &DatabaseConnection,
    media: &MediaLifecycle,
    account: NewAccount,
) -> Result<(user::Model, MediaOutcome), AccountError> {
    if username_taken(db, &account.username, None).await? {
        return Err(AccountError::UsernameTaken);
    }
    let password = hash_password(&account.password)?;

    let txn = db.begin().await?;
    let user = user::ActiveModel {
        username: Set(account.username),
        email: Set(account.email),
        password: Set(password),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(map_unique_violation)?;
    let profile = provision_profile(&txn, user.id).await?;
    txn.commit().await?;

    info!(user_id = user.id, username = %user.username, "User registered");
    let outcome = media.after_profile_saved(&profile).await;
    Ok((user, outcome))
}

/// The user if `username` exists and `password` matches.
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>, AccountError> {
    let Some(user) = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    if verify_password(password, &user.password)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

pub async fn find_profile<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Option<profile::Model>, DbErr> {
    profile::Entity::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Post-save hook for users: re-run the profile's save side effects,
/// provisioning the profile first if it went missing.
pub async fn after_user_saved<C: ConnectionTrait>(
    db: &C,
    media: &MediaLifecycle,
    user_id: i32,
) -> Result<(profile::Model, MediaOutcome), DbErr> {
    let profile = match find_profile(db, user_id).await? {
        Some(profile) => profile,
        None => {
            info!(user_id, "Provisioning missing profile");
            provision_profile(db, user_id).await?
        }
    };
    let outcome = media.after_profile_saved(&profile).await;
    Ok((profile, outcome))
}

/// Change a user's username and email, then run the post-save hook.
pub async fn update_user<C: ConnectionTrait>(
    db: &C,
    media: &MediaLifecycle,
    user: user::Model,
    username: String,
    email: String,
) -> Result<(user::Model, profile::Model, MediaOutcome), AccountError> {
    if username_taken(db, &username, Some(user.id)).await? {
        return Err(AccountError::UsernameTaken);
    }

    let mut active = user.into_active_model();
    active.username = Set(username);
    active.email = Set(email);
    let user = active.update(db).await.map_err(map_unique_violation)?;

    let (profile, outcome) = after_user_saved(db, media, user.id).await?;
    Ok((user, profile, outcome))
}

/// Delete a user with their recipes and profile, cleaning up every file
/// they own before the rows go.
pub async fn delete_user<C: ConnectionTrait>(
    db: &C,
    media: &MediaLifecycle,
    user: user::Model,
) -> Result<MediaOutcome, DbErr> {
    let mut outcome = MediaOutcome::default();

    for recipe in user.find_related(recipe::Entity).all(db).await? {
        outcome.merge(lifecycle::delete_recipe(db, media, recipe).await?);
    }
    if let Some(profile) = find_profile(db, user.id).await? {
        outcome.merge(lifecycle::delete_profile(db, media, profile).await?);
    }

    let user_id = user.id;
    user.delete(db).await?;
    info!(user_id, "User deleted");
    Ok(outcome)
}
