use recipe_finder::request::{Cuisine, MealType, Preference};
use recipe_finder::synthesizer::FALLBACK_NEED_INGREDIENTS;
use recipe_finder::{
    synthesize, Difficulty, FailureReason, RecipeFinder, RecipeForm, RecipeRequest,
};

#[test]
fn test_every_request_yields_complete_recipe() {
    let requests = vec![
        RecipeRequest::with_ingredients(["chicken"]),
        RecipeRequest::with_ingredients(Vec::<String>::new()),
        RecipeRequest::with_ingredients(["tofu", "rice"])
            .cuisine(Cuisine::Thai)
            .preference(Preference::Vegan)
            .max_cooking_time(5)
            .servings(1),
    ];

    for request in requests {
        let recipe = synthesize(&request);
        assert!(!recipe.name.is_empty());
        assert!(!recipe.have_ingredients.is_empty());
        assert_eq!(recipe.need_ingredients.len(), 5);
        assert_eq!(recipe.steps.len(), 7);
        assert!(recipe.servings > 0);
        assert!(recipe.youtube_url.starts_with("https://www.youtube.com/results?search_query="));
        assert!(recipe.nutritional_info.is_some());
        assert_eq!(recipe.tips.as_ref().map(Vec::len), Some(3));
    }
}

#[test]
fn test_same_request_same_recipe() {
    let request = RecipeRequest::with_ingredients(["salmon", "lemon"])
        .cuisine(Cuisine::Japanese)
        .meal_type(MealType::Lunch);
    assert_eq!(synthesize(&request), synthesize(&request));
}

#[test]
fn test_title_follows_cuisine_preference_meal_order() {
    let request = RecipeRequest::with_ingredients(["chicken"])
        .cuisine(Cuisine::Italian)
        .preference(Preference::Vegan)
        .meal_type(MealType::Dinner);

    assert_eq!(synthesize(&request).name, "Italian Vegan Dinner Chicken Delight");
}

#[test]
fn test_title_uses_first_preference_only() {
    let request = RecipeRequest::with_ingredients(["beans"])
        .preference(Preference::Spicy)
        .preference(Preference::Vegetarian);
    assert_eq!(synthesize(&request).name, "Spicy Beans Delight");
}

#[test]
fn test_cook_time_is_clamped() {
    let short = RecipeRequest::with_ingredients(["egg"]).max_cooking_time(10);
    assert_eq!(synthesize(&short).cook_time, "10 minutes");

    let long = RecipeRequest::with_ingredients(["egg"]).max_cooking_time(90);
    assert_eq!(synthesize(&long).cook_time, "20 minutes");
}

#[test]
fn test_blank_ingredients_use_placeholder() {
    let request = RecipeRequest::from_form(&RecipeForm::new("  , ,"));
    assert!(request.ingredients_missing());

    let recipe = synthesize(&request);
    assert_eq!(recipe.have_ingredients, vec!["food"]);
    assert_eq!(recipe.name, "Food Delight");
    assert!(recipe.steps[0].contains("food"));
}

#[test]
fn test_video_link_encodes_main_ingredient() {
    let recipe = synthesize(&RecipeRequest::with_ingredients(["bell pepper & onion"]));
    assert_eq!(
        recipe.youtube_url,
        "https://www.youtube.com/results?search_query=how+to+cook+bell%20pepper%20%26%20onion"
    );
}

#[tokio::test]
async fn test_unconfigured_generation_end_to_end() {
    let form: RecipeForm = serde_json::from_str(
        r#"{
            "preferences": [],
            "allergies": [],
            "deficiencies": [],
            "cuisine": "any",
            "ingredients": "chicken, rice",
            "maxCookingTime": 60,
            "mealType": "any",
            "servings": 4
        }"#,
    )
    .unwrap();

    let result = RecipeFinder::without_provider().find(&form).await;
    assert_eq!(result.reason(), Some(FailureReason::Unconfigured));

    let recipe = &result.recipe;
    assert_eq!(recipe.name, "Chicken Delight");
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.cook_time, "20 minutes");
    assert_eq!(recipe.prep_time, "15 minutes");
    assert_eq!(recipe.difficulty, Difficulty::Easy);
    assert_eq!(recipe.have_ingredients, vec!["chicken", "rice"]);
    assert_eq!(recipe.need_ingredients, FALLBACK_NEED_INGREDIENTS.to_vec());

    let response = serde_json::to_value(result.into_response()).unwrap();
    assert_eq!(response["errorType"], "unconfigured");
    assert_eq!(response["difficulty"], "easy");
    assert_eq!(response["cookTime"], "20 minutes");
}
