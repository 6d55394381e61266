use crate::common::TestApp;

mod by_name {
    use super::*;

    #[tokio::test]
    async fn matches_any_fragment_ignoring_case() {
        let app = TestApp::spawn().await;
        let anna = app.user("anna").await;
        let soups = app.category("Soups").await;
        app.recipe(anna, soups, "BORSCHT DELUXE", "beets", 0).await;

        for fragment in ["borscht", "DELUXE", "scht%20del"] {
            let res = app.get(&format!("/recipes/{fragment}")).await;
            assert_eq!(res.status, 200, "{fragment}: {}", res.text);
            assert_eq!(res.body["title"], "BORSCHT DELUXE");
        }
    }

    #[tokio::test]
    async fn projects_the_flat_response() {
        let app = TestApp::spawn().await;
        let anna = app.user("anna").await;
        let soups = app.category("Soups").await;
        app.recipe(anna, soups, "BORSCHT", "beets", 0).await;

        let res = app.get("/recipes/borscht").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["category"], "Soups");
        assert_eq!(res.body["author"], "anna");
        assert_eq!(res.body["cooking_time"], "1:30:00");
        assert_eq!(res.body["active"], true);
        let image = res.body["image"].as_str().unwrap();
        assert_eq!(
            res.body["image_thumbnail"],
            format!("CACHE/thumbnails/{image}")
        );
        let created = res.body["created_date"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());
    }

    #[tokio::test]
    async fn newest_match_wins() {
        let app = TestApp::spawn().await;
        let anna = app.user("anna").await;
        let soups = app.category("Soups").await;
        app.recipe(anna, soups, "OLD SOUP", "water", 60).await;
        app.recipe(anna, soups, "NEW SOUP", "water", 0).await;

        let res = app.get("/recipes/soup").await;
        assert_eq!(res.body["title"], "NEW SOUP");
    }

    #[tokio::test]
    async fn no_match_is_404_with_detail() {
        let app = TestApp::spawn().await;

        let res = app.get("/recipes/nothing").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["detail"], "Recipe not found");
    }
}

mod by_ingredient {
    use super::*;

    #[tokio::test]
    async fn lists_every_match_newest_first() {
        let app = TestApp::spawn().await;
        let anna = app.user("anna").await;
        let soups = app.category("Soups").await;
        app.recipe(anna, soups, "BORSCHT", "Beets\nCabbage", 30).await;
        app.recipe(anna, soups, "BEET SALAD", "beets\nfeta", 0).await;
        app.recipe(anna, soups, "PANCAKES", "flour", 10).await;

        let res = app.get("/recipes/by-ingredient?ingredient=BEET").await;

        assert_eq!(res.status, 200, "{}", res.text);
        let titles: Vec<_> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["BEET SALAD", "BORSCHT"]);
    }

    #[tokio::test]
    async fn wildcards_are_matched_literally() {
        let app = TestApp::spawn().await;
        let anna = app.user("anna").await;
        let soups = app.category("Soups").await;
        app.recipe(anna, soups, "BORSCHT", "beets", 0).await;

        let res = app.get("/recipes/by-ingredient?ingredient=%25").await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["detail"], "Recipes not found");
    }

    #[tokio::test]
    async fn missing_parameter_is_422() {
        let app = TestApp::spawn().await;

        let res = app.get("/recipes/by-ingredient").await;

        assert_eq!(res.status, 422);
        assert!(res.body["detail"].is_string());
    }
}

mod by_category {
    use super::*;

    #[tokio::test]
    async fn matches_the_whole_name_ignoring_case() {
        let app = TestApp::spawn().await;
        let anna = app.user("anna").await;
        let desserts = app.category("Desserts").await;
        let frozen = app.category("Frozen Desserts").await;
        app.recipe(anna, desserts, "TIRAMISU", "mascarpone", 0).await;
        app.recipe(anna, frozen, "GELATO", "milk", 0).await;

        let res = app.get("/recipes/by-category?category=desserts").await;

        assert_eq!(res.status, 200, "{}", res.text);
        let list = res.body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "TIRAMISU");
    }

    #[tokio::test]
    async fn empty_or_unknown_category_is_404() {
        let app = TestApp::spawn().await;
        app.category("Salads").await;

        assert_eq!(app.get("/recipes/by-category?category=salads").await.status, 404);
        assert_eq!(app.get("/recipes/by-category?category=nope").await.status, 404);
        assert_eq!(app.get("/recipes/by-category").await.status, 422);
    }
}

#[tokio::test]
async fn openapi_document_lists_the_endpoints() {
    let app = TestApp::spawn().await;

    let res = app.get("/openapi.json").await;

    assert_eq!(res.status, 200);
    let paths = &res.body["paths"];
    assert!(paths["/recipes/{recipe_name}"].is_object());
    assert!(paths["/recipes/by-ingredient"].is_object());
    assert!(paths["/recipes/by-category"].is_object());
}

#[tokio::test]
async fn unknown_routes_are_json_404s() {
    let app = TestApp::spawn().await;

    let res = app.get("/nope").await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["detail"], "Not Found");
}
