use axum::extract::{Multipart, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use common::accounts::{self, AccountError, NewAccount};
use common::entity::profile;
use common::lifecycle::{self, MediaError, validate_image};
use common::media::layout::DEFAULT_AVATAR;
use tracing::{info, instrument};

use super::{INVALID_IMAGE, load_account, report};
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::extractors::page::PageContext;
use crate::extractors::session::{CurrentUser, clear_session, start_session};
use crate::models::account::{LoginForm, NextQuery, ProfileForm, RegisterForm};
use crate::models::form::MultipartForm;
use crate::pages::{LoginPage, LogoutPage, ProfilePage, RegisterPage, media_url};
use crate::state::AppState;
use crate::utils::flash::{self, FlashMessage};
use crate::utils::redirect::safe_next;

const BAD_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

pub async fn register_form(ctx: PageContext) -> Result<Response, AppError> {
    ctx.render(|layout| RegisterPage {
        layout,
        username: String::new(),
        email: String::new(),
        errors: vec![],
    })
}

#[instrument(skip_all, fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    ctx: PageContext,
    AppForm(form): AppForm<RegisterForm>,
) -> Result<Response, AppError> {
    let form = form.normalize();
    let mut errors = form.validate();

    if errors.is_empty() {
        let account = NewAccount {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password1.clone(),
        };
        match accounts::register(&state.db, &state.media, account).await {
            Ok((user, outcome)) => {
                report(outcome, "register");
                let message = format!("Account created for {}. You can now log in.", user.username);
                let jar = flash::push(ctx.into_jar(), FlashMessage::success(message));
                return Ok((jar, Redirect::to("/login/")).into_response());
            }
            Err(AccountError::UsernameTaken) => errors.push(AccountError::UsernameTaken.to_string()),
            Err(e) => return Err(e.into()),
        }
    }

    ctx.render(|layout| RegisterPage {
        layout,
        username: form.username,
        email: form.email,
        errors,
    })
}

pub async fn login_form(
    ctx: PageContext,
    Query(query): Query<NextQuery>,
) -> Result<Response, AppError> {
    ctx.render(|layout| LoginPage {
        layout,
        username: String::new(),
        next: query.next.unwrap_or_default(),
        errors: vec![],
    })
}

#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    ctx: PageContext,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Response, AppError> {
    let username = form.username.trim();
    match accounts::authenticate(&state.db, username, &form.password).await? {
        Some(user) => {
            info!(user_id = user.id, "Logged in");
            let jar = start_session(ctx.into_jar(), &state, user.id, &user.username)?;
            let target = safe_next(Some(form.next.as_str())).to_string();
            Ok((jar, Redirect::to(&target)).into_response())
        }
        None => ctx.render(|layout| LoginPage {
            layout,
            username: username.to_string(),
            next: form.next.clone(),
            errors: vec![BAD_CREDENTIALS.to_string()],
        }),
    }
}

/// Ends the session and shows the logged-out page. Answers both GET and
/// POST.
pub async fn logout(mut ctx: PageContext) -> Result<Response, AppError> {
    if let Some(user) = ctx.user.take() {
        info!(user_id = user.user_id, "Logged out");
    }
    ctx.layout.username = None;
    ctx.with_jar(clear_session)
        .render(|layout| LogoutPage { layout })
}

fn avatar_of(profile: Option<&profile::Model>) -> String {
    media_url(profile.map_or(DEFAULT_AVATAR, |p| p.image.as_str()))
}

#[instrument(skip(state, ctx), fields(user_id = user.user_id))]
pub async fn profile_page(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ctx: PageContext,
) -> Result<Response, AppError> {
    let account = load_account(&state, user.user_id, "/profile/").await?;
    let profile = accounts::find_profile(&state.db, account.id).await?;
    ctx.render(|layout| ProfilePage {
        layout,
        username: account.username,
        email: account.email,
        avatar_url: avatar_of(profile.as_ref()),
        errors: vec![],
    })
}

#[instrument(skip(state, ctx, multipart), fields(user_id = user.user_id))]
pub async fn update_profile(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ctx: PageContext,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let account = load_account(&state, user.user_id, "/profile/").await?;
    let form = ProfileForm::from_multipart(MultipartForm::read(multipart).await?);

    let mut errors = form.validate();
    if errors.is_empty()
        && accounts::username_taken(&state.db, &form.username, Some(account.id)).await?
    {
        errors.push(AccountError::UsernameTaken.to_string());
    }
    if let Some(image) = &form.image {
        match validate_image(image.bytes.clone()).await {
            Ok(()) => {}
            Err(MediaError::Image(_)) => errors.push(INVALID_IMAGE.to_string()),
            Err(e) => return Err(AppError::Internal(format!("Checking avatar: {e}"))),
        }
    }

    let user_id = account.id;
    if errors.is_empty() {
        match accounts::update_user(
            &state.db,
            &state.media,
            account,
            form.username.clone(),
            form.email.clone(),
        )
        .await
        {
            Ok((saved, profile, mut outcome)) => {
                if let Some(image) = &form.image {
                    let path = state
                        .media
                        .store_avatar(saved.id, &image.filename, &image.bytes)
                        .await
                        .map_err(|e| AppError::Internal(format!("Storing avatar: {e}")))?;
                    let (_, replaced) =
                        lifecycle::replace_avatar(&state.db, &state.media, profile, path).await?;
                    outcome.merge(replaced);
                }
                report(outcome, "update_profile");

                let jar = start_session(ctx.into_jar(), &state, saved.id, &saved.username)?;
                let jar = flash::push(jar, FlashMessage::success("Your account has been updated!"));
                return Ok((jar, Redirect::to("/profile/")).into_response());
            }
            Err(AccountError::UsernameTaken) => errors.push(AccountError::UsernameTaken.to_string()),
            Err(e) => return Err(e.into()),
        }
    }

    let profile = accounts::find_profile(&state.db, user_id).await?;
    ctx.render(|layout| ProfilePage {
        layout,
        username: form.username,
        email: form.email,
        avatar_url: avatar_of(profile.as_ref()),
        errors,
    })
}
