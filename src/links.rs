use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const YOUTUBE_SEARCH: &str = "https://www.youtube.com/results?search_query=";

/// Characters escaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Video-tutorial search link for a recipe title.
pub fn video_search_url(recipe_name: &str) -> String {
    format!(
        "{}{}",
        YOUTUBE_SEARCH,
        encode_uri_component(&format!("how to cook {}", recipe_name))
    )
}

/// Video-tutorial search link for a single ingredient, used by fallback recipes.
pub fn ingredient_video_search_url(ingredient: &str) -> String {
    format!(
        "{}how+to+cook+{}",
        YOUTUBE_SEARCH,
        encode_uri_component(ingredient)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("chicken breast"), "chicken%20breast");
        assert_eq!(encode_uri_component("mac & cheese"), "mac%20%26%20cheese");
        assert_eq!(encode_uri_component("it's (ok)!"), "it's%20(ok)!");
        assert_eq!(encode_uri_component("jalapeño"), "jalape%C3%B1o");
    }

    #[test]
    fn test_video_search_url() {
        assert_eq!(
            video_search_url("Pad Thai"),
            "https://www.youtube.com/results?search_query=how%20to%20cook%20Pad%20Thai"
        );
    }

    #[test]
    fn test_ingredient_video_search_url() {
        assert_eq!(
            ingredient_video_search_url("sweet potato"),
            "https://www.youtube.com/results?search_query=how+to+cook+sweet%20potato"
        );
    }
}
