use crate::model::{Difficulty, NutritionalInfo, Recipe};

struct Sample {
    name: &'static str,
    have: [&'static str; 3],
    need: &'static [&'static str],
    steps: [&'static str; 4],
    prep_time: &'static str,
    cook_time: &'static str,
    youtube_url: &'static str,
    difficulty: Difficulty,
    servings: u32,
    nutrition: [&'static str; 4],
    tips: [&'static str; 2],
}

const SAMPLES: [Sample; 3] = [
    Sample {
        name: "Quick Pasta Primavera",
        have: ["pasta", "olive oil", "garlic"],
        need: &["bell peppers", "zucchini", "broccoli", "grated parmesan"],
        steps: [
            "Cook pasta according to package directions",
            "Sauté garlic in olive oil until fragrant",
            "Add chopped vegetables and cook until tender",
            "Toss with pasta and top with parmesan",
        ],
        prep_time: "10 minutes",
        cook_time: "15 minutes",
        youtube_url: "https://www.youtube.com/results?search_query=how+to+cook+pasta+primavera",
        difficulty: Difficulty::Easy,
        servings: 2,
        nutrition: ["450 kcal per serving", "12g", "65g", "14g"],
        tips: [
            "Use seasonal vegetables for best flavor",
            "Reserve some pasta water to create a silkier sauce",
        ],
    },
    Sample {
        name: "Chicken Stir Fry",
        have: ["chicken breast", "soy sauce", "garlic"],
        need: &["broccoli", "carrots", "bell peppers", "ginger", "sesame oil"],
        steps: [
            "Dice chicken and marinate in soy sauce",
            "Stir fry vegetables until crisp-tender",
            "Add chicken and cook through",
            "Finish with a drizzle of sesame oil",
        ],
        prep_time: "15 minutes",
        cook_time: "10 minutes",
        youtube_url: "https://www.youtube.com/results?search_query=how+to+cook+chicken+stir+fry",
        difficulty: Difficulty::Medium,
        servings: 3,
        nutrition: ["320 kcal per serving", "28g", "18g", "12g"],
        tips: [
            "Cut all ingredients to similar sizes for even cooking",
            "Don't overcrowd the pan",
        ],
    },
    Sample {
        name: "Mediterranean Salad",
        have: ["lettuce", "cucumber", "tomatoes"],
        need: &["feta cheese", "kalamata olives", "red onion", "olive oil", "lemon juice"],
        steps: [
            "Chop all vegetables",
            "Combine in a large bowl",
            "Whisk olive oil and lemon juice for dressing",
            "Toss salad with dressing and top with feta",
        ],
        prep_time: "15 minutes",
        cook_time: "0 minutes",
        youtube_url: "https://www.youtube.com/results?search_query=how+to+make+mediterranean+salad",
        difficulty: Difficulty::Easy,
        servings: 2,
        nutrition: ["220 kcal per serving", "8g", "14g", "16g"],
        tips: [
            "Add grilled chicken for extra protein",
            "Make dressing ahead for enhanced flavors",
        ],
    },
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Built-in recipes shown to visitors without a history.
pub fn sample_recipes() -> Vec<Recipe> {
    SAMPLES
        .iter()
        .map(|sample| {
            let [calories, protein, carbs, fats] = sample.nutrition;
            Recipe {
                name: sample.name.to_string(),
                have_ingredients: owned(&sample.have),
                need_ingredients: owned(sample.need),
                steps: owned(&sample.steps),
                prep_time: sample.prep_time.to_string(),
                cook_time: sample.cook_time.to_string(),
                servings: sample.servings,
                difficulty: sample.difficulty,
                nutritional_info: Some(NutritionalInfo {
                    calories: calories.to_string(),
                    protein: protein.to_string(),
                    carbs: carbs.to_string(),
                    fats: fats.to_string(),
                }),
                tips: Some(owned(&sample.tips)),
                youtube_url: sample.youtube_url.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples() {
        let samples = sample_recipes();
        let names: Vec<&str> = samples.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Quick Pasta Primavera", "Chicken Stir Fry", "Mediterranean Salad"]
        );
        assert!(samples.iter().all(|r| r.steps.len() == 4 && r.servings > 0));
        assert_eq!(samples[1].difficulty, Difficulty::Medium);
    }
}
