use reqwest::multipart::Form;

use crate::common::{PASSWORD, TestApp, dimensions, image_part, png, routes};

fn profile_form(username: &str, email: &str) -> Form {
    Form::new()
        .text("username", username.to_string())
        .text("email", email.to_string())
}

mod registration {
    use super::*;

    #[tokio::test]
    async fn creates_exactly_one_profile_with_the_default_avatar() {
        let app = TestApp::spawn().await;
        let visitor = app.anonymous();

        let res = visitor
            .post_form(
                routes::REGISTER,
                &[
                    ("username", "anna"),
                    ("email", "anna@example.com"),
                    ("password1", PASSWORD),
                    ("password2", PASSWORD),
                ],
            )
            .await;
        assert_eq!(res.status, 303, "{}", res.text);
        assert_eq!(res.location.as_deref(), Some(routes::LOGIN));

        let user = app.user("anna").await;
        assert_ne!(user.password, PASSWORD);
        let profiles = app.profile_of(user.id).await;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].image, "avatar_default.jpg");

        let login = visitor.get(routes::LOGIN).await;
        assert!(login.text.contains("Account created for anna"));
    }

    #[tokio::test]
    async fn invalid_submissions_rerender_the_form() {
        let app = TestApp::spawn().await;
        let visitor = app.anonymous();

        let res = visitor
            .post_form(
                routes::REGISTER,
                &[
                    ("username", "anna"),
                    ("email", "not-an-email"),
                    ("password1", "12345678"),
                    ("password2", "12345678"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Enter a valid email address."));
        assert!(res.text.contains("entirely numeric"));
        assert!(res.text.contains("value=\"anna\""));
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let app = TestApp::spawn().await;
        app.signed_in("anna").await;

        let res = app
            .anonymous()
            .post_form(
                routes::REGISTER,
                &[
                    ("username", "anna"),
                    ("email", "other@example.com"),
                    ("password1", PASSWORD),
                    ("password2", PASSWORD),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("A user with that username already exists."));
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn login_follows_local_next_only() {
        let app = TestApp::spawn().await;
        app.signed_in("anna").await;

        let local = app
            .anonymous()
            .post_form(
                routes::LOGIN,
                &[("username", "anna"), ("password", PASSWORD), ("next", "/recipe/new/")],
            )
            .await;
        assert_eq!(local.status, 303);
        assert_eq!(local.location.as_deref(), Some("/recipe/new/"));

        let foreign = app
            .anonymous()
            .post_form(
                routes::LOGIN,
                &[
                    ("username", "anna"),
                    ("password", PASSWORD),
                    ("next", "//evil.example.com/"),
                ],
            )
            .await;
        assert_eq!(foreign.location.as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn wrong_password_is_an_error_on_the_form() {
        let app = TestApp::spawn().await;
        app.signed_in("anna").await;

        let res = app
            .anonymous()
            .post_form(routes::LOGIN, &[("username", "anna"), ("password", "nope nope")])
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Please enter a correct username and password."));
    }

    #[tokio::test]
    async fn logout_ends_the_session() {
        let app = TestApp::spawn().await;
        app.category("Soups").await;
        let anna = app.signed_in("anna").await;
        assert_eq!(anna.get(routes::NEW_RECIPE).await.status, 200);

        let res = anna.post_form(routes::LOGOUT, &[]).await;
        assert_eq!(res.status, 200);
        assert!(res.text.contains("You have been logged out"));
        assert!(res.text.contains("Soups"));

        assert_eq!(anna.get(routes::NEW_RECIPE).await.status, 303);
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn requires_login() {
        let app = TestApp::spawn().await;
        let res = app.anonymous().get(routes::PROFILE).await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/login/?next=/profile/"));
    }

    #[tokio::test]
    async fn rename_reissues_the_session() {
        let app = TestApp::spawn().await;
        let anna = app.signed_in("anna").await;

        let res = anna
            .post_multipart(routes::PROFILE, profile_form("anya", "anya@example.com"))
            .await;
        assert_eq!(res.status, 303, "{}", res.text);

        let page = anna.get(routes::PROFILE).await;
        assert_eq!(page.status, 200);
        assert!(page.text.contains("value=\"anya\""));
        assert!(page.text.contains("Your account has been updated!"));
        assert!(page.text.contains(">anya</a>"), "header shows the new name");
    }

    #[tokio::test]
    async fn username_taken_by_someone_else_is_an_error() {
        let app = TestApp::spawn().await;
        app.signed_in("boris").await;
        let anna = app.signed_in("anna").await;

        let res = anna
            .post_multipart(routes::PROFILE, profile_form("boris", "anna@example.com"))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("A user with that username already exists."));
        assert_eq!(app.user("anna").await.email, "anna@example.com");
    }

    #[tokio::test]
    async fn new_avatar_is_shrunk_and_the_old_one_removed() {
        let app = TestApp::spawn().await;
        let anna = app.signed_in("anna").await;
        let user_id = app.user("anna").await.id;

        let upload = |name: &str| {
            profile_form("anna", "anna@example.com").part("image", image_part(png(600, 400), name))
        };

        let res = anna.post_multipart(routes::PROFILE, upload("me.png")).await;
        assert_eq!(res.status, 303, "{}", res.text);
        let first = app.profile_of(user_id).await.remove(0).image;
        assert_eq!(first, format!("users_media/profile_pics/user_{user_id}/me.png"));
        let (w, h) = dimensions(&app.media_file(&first));
        assert!(w <= 300 && h <= 300, "{w}x{h}");

        let res = anna.post_multipart(routes::PROFILE, upload("me2.png")).await;
        assert_eq!(res.status, 303, "{}", res.text);
        let second = app.profile_of(user_id).await.remove(0).image;
        assert_ne!(second, first);
        assert!(!app.media_file(&first).exists());
        assert!(app.media_file(&second).exists());
    }

    #[tokio::test]
    async fn a_non_image_avatar_is_a_form_error() {
        let app = TestApp::spawn().await;
        let anna = app.signed_in("anna").await;

        let form = profile_form("anna", "anna@example.com")
            .part("image", image_part(b"plain text".to_vec(), "me.png"));
        let res = anna.post_multipart(routes::PROFILE, form).await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Upload a valid image"));
    }
}
