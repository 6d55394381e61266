use common::entity::{recipe, user};
use sea_orm::EntityTrait;

use crate::common::{TestApp, dimensions, png, recipe_form, recipe_id_from, routes};

mod listing {
    use super::*;

    #[tokio::test]
    async fn home_paginates_by_five_newest_first() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let anna = app.signed_in("anna").await;
        for n in 1..=6 {
            app.create_recipe(&anna, soups, &format!("dish {n}")).await;
        }

        let first = anna.get(routes::HOME).await;
        assert_eq!(first.status, 200);
        assert_eq!(first.card_count(), 5);
        assert!(first.text.contains("DISH 6"));
        assert!(!first.text.contains("DISH 1<"));

        let second = anna.get("/?page=2").await;
        assert_eq!(second.status, 200);
        assert_eq!(second.card_count(), 1);
        assert!(second.text.contains("DISH 1"));
    }

    #[tokio::test]
    async fn out_of_range_or_malformed_pages_are_not_found() {
        let app = TestApp::spawn().await;
        let visitor = app.anonymous();

        assert_eq!(visitor.get("/?page=1").await.status, 200);
        assert_eq!(visitor.get("/?page=2").await.status, 404);
        assert_eq!(visitor.get("/?page=0").await.status, 404);
        assert_eq!(visitor.get("/?page=last").await.status, 404);
    }

    #[tokio::test]
    async fn every_page_carries_the_category_menu() {
        let app = TestApp::spawn().await;
        let cakes = app.category("Cakes").await;
        let visitor = app.anonymous();

        for path in [routes::HOME, "/about/", routes::LOGIN, routes::REGISTER] {
            let res = visitor.get(path).await;
            assert_eq!(res.status, 200, "{path}");
            assert!(res.text.contains(&routes::category(cakes)), "{path}");
        }
    }

    #[tokio::test]
    async fn scoped_listings_filter_and_reject_unknown_scopes() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let pies = app.category("Pies").await;
        let anna = app.signed_in("anna").await;
        let boris = app.signed_in("boris").await;
        app.create_recipe(&anna, soups, "borscht").await;
        app.create_recipe(&boris, pies, "apple pie").await;

        let by_category = anna.get(&routes::category(pies)).await;
        assert_eq!(by_category.card_count(), 1);
        assert!(by_category.text.contains("APPLE PIE"));

        let by_author = anna.get("/user/anna").await;
        assert_eq!(by_author.card_count(), 1);
        assert!(by_author.text.contains("BORSCHT"));

        assert_eq!(anna.get("/user/nobody").await.status, 404);
        assert_eq!(anna.get(&routes::category(999)).await.status, 404);
        assert_eq!(anna.get("/recipes/category/soup/").await.status, 404);
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let app = TestApp::spawn().await;
        let res = app.anonymous().get(routes::NEW_RECIPE).await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/login/?next=/recipe/new/"));
    }

    #[tokio::test]
    async fn a_session_outliving_its_user_is_sent_to_login() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let anna = app.signed_in("anna").await;
        let user = app.user("anna").await;
        user::Entity::delete_by_id(user.id)
            .exec(&app.db)
            .await
            .unwrap();

        let res = anna
            .post_multipart(
                routes::NEW_RECIPE,
                recipe_form(soups, "Borscht", Some(png(64, 48))),
            )
            .await;

        assert_eq!(res.status, 303, "{}", res.text);
        assert_eq!(res.location.as_deref(), Some("/login/?next=/recipe/new/"));
        assert!(recipe::Entity::find().all(&app.db).await.unwrap().is_empty());
        assert!(!app.media_file(&format!("users_media/upload/user_{}", user.id)).exists());
    }

    #[tokio::test]
    async fn title_is_uppercased_and_photo_resampled() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let anna = app.signed_in("anna").await;

        let res = anna
            .post_multipart(
                routes::NEW_RECIPE,
                recipe_form(soups, "Borscht", Some(png(2000, 1500))),
            )
            .await;
        assert_eq!(res.status, 303, "{}", res.text);
        let id = recipe_id_from(&res);

        let recipe = app.recipe(id).await.unwrap();
        assert_eq!(recipe.title, "BORSCHT");
        assert_eq!(recipe.cooking_time, 90 * 60);
        assert!(recipe.image.ends_with(".jpg"));
        let (w, h) = dimensions(&app.media_file(&recipe.image));
        assert!(w <= 1024 && h <= 768, "{w}x{h}");

        let detail = anna.get(&routes::recipe(id)).await;
        assert_eq!(detail.status, 200);
        assert!(detail.text.contains("Recipe added."));
        assert!(detail.text.contains("1:30:00"));
    }

    #[tokio::test]
    async fn a_non_image_upload_is_a_form_error() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let anna = app.signed_in("anna").await;

        let res = anna
            .post_multipart(
                routes::NEW_RECIPE,
                recipe_form(soups, "Borscht", Some(b"not a picture".to_vec())),
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Upload a valid image"));
        assert!(res.text.contains("Borscht"));
    }

    #[tokio::test]
    async fn missing_fields_are_reported_together() {
        let app = TestApp::spawn().await;
        app.category("Soups").await;
        let anna = app.signed_in("anna").await;

        let res = anna
            .post_multipart(routes::NEW_RECIPE, recipe_form(999, "", None))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Title is required"));
        assert!(res.text.contains("Select a valid category"));
        assert!(res.text.contains("A photo of the dish is required"));
    }
}

mod update_and_delete {
    use super::*;

    #[tokio::test]
    async fn only_the_author_may_update_or_delete() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let anna = app.signed_in("anna").await;
        let boris = app.signed_in("boris").await;
        let id = app.create_recipe(&anna, soups, "borscht").await;

        let update = boris
            .post_multipart(&routes::update_recipe(id), recipe_form(soups, "stolen", None))
            .await;
        assert_eq!(update.status, 403);
        assert!(update.text.contains("Soups"), "403 page keeps the menu");

        let delete = boris.post_form(&routes::delete_recipe(id), &[]).await;
        assert_eq!(delete.status, 403);

        assert_eq!(boris.get(&routes::update_recipe(id)).await.status, 403);
        assert_eq!(app.recipe(id).await.unwrap().title, "BORSCHT");
    }

    #[tokio::test]
    async fn replacing_the_photo_removes_the_old_one_and_its_thumbnail() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let anna = app.signed_in("anna").await;
        let id = app.create_recipe(&anna, soups, "borscht").await;
        let old = app.recipe(id).await.unwrap();

        let thumb = anna
            .get(&routes::media(&format!("CACHE/thumbnails/{}", old.image)))
            .await;
        assert_eq!(thumb.status, 200);
        assert!(app.media_file(&old.thumbnail_path()).exists());

        let res = anna
            .post_multipart(
                &routes::update_recipe(id),
                recipe_form(soups, "beet soup", Some(png(300, 200))),
            )
            .await;
        assert_eq!(res.status, 303, "{}", res.text);
        assert_eq!(res.location.as_deref(), Some(routes::recipe(id).as_str()));

        let new = app.recipe(id).await.unwrap();
        assert_eq!(new.title, "BEET SOUP");
        assert_ne!(new.image, old.image);
        assert!(!app.media_file(&old.image).exists());
        assert!(!app.media_file(&old.thumbnail_path()).exists());
        assert!(app.media_file(&new.image).exists());
    }

    #[tokio::test]
    async fn keeping_the_photo_leaves_files_alone() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let anna = app.signed_in("anna").await;
        let id = app.create_recipe(&anna, soups, "borscht").await;
        let old = app.recipe(id).await.unwrap();

        let res = anna
            .post_multipart(&routes::update_recipe(id), recipe_form(soups, "borscht", None))
            .await;
        assert_eq!(res.status, 303, "{}", res.text);

        assert_eq!(app.recipe(id).await.unwrap().image, old.image);
        assert!(app.media_file(&old.image).exists());
    }

    #[tokio::test]
    async fn delete_confirms_then_removes_row_and_files() {
        let app = TestApp::spawn().await;
        let soups = app.category("Soups").await;
        let anna = app.signed_in("anna").await;
        let id = app.create_recipe(&anna, soups, "borscht").await;
        let recipe = app.recipe(id).await.unwrap();

        let confirm = anna.get(&routes::delete_recipe(id)).await;
        assert_eq!(confirm.status, 200);
        assert!(confirm.text.contains("BORSCHT"));
        assert!(app.recipe(id).await.is_some());

        let res = anna.post_form(&routes::delete_recipe(id), &[]).await;
        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/"));

        assert!(app.recipe(id).await.is_none());
        assert!(!app.media_file(&recipe.image).exists());
        assert_eq!(anna.get(&routes::media(&recipe.image)).await.status, 404);
        assert_eq!(anna.get(&routes::recipe(id)).await.status, 404);

        let home = anna.get(routes::HOME).await;
        assert!(home.text.contains("Recipe deleted."));
    }
}

mod error_pages {
    use super::*;

    #[tokio::test]
    async fn error_pages_render_with_status_and_menu() {
        let app = TestApp::spawn().await;
        app.category("Salads").await;
        let visitor = app.anonymous();

        for (path, status) in [
            ("/error403/", 403),
            ("/error404/", 404),
            ("/error500/", 500),
            ("/no/such/page", 404),
            ("/recipe/abc/", 404),
        ] {
            let res = visitor.get(path).await;
            assert_eq!(res.status, status, "{path}");
            assert!(res.text.contains("Salads"), "{path}");
            assert!(res.text.contains(&status.to_string()), "{path}");
        }
    }
}
