//! Search input component

use super::layout::escape_html;

/// Renders the search field.
///
/// Every keystroke posts the raw value to `/htmx/search`; the server answers
/// with no content and the result sections pick up the change on their next
/// poll.
pub fn search_input(search_term: &str) -> String {
    let value = escape_html(search_term);

    format!(
        r#"<div class="search">
            <div>
                <img src="/static/search.svg" alt="search">
                <input type="text" name="search_term" value="{value}"
                       placeholder="Search through thousands of movies"
                       autocomplete="off"
                       hx-post="/htmx/search"
                       hx-trigger="input"
                       hx-swap="none">
            </div>
        </div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_posts_every_keystroke() {
        let html = search_input("");

        assert!(html.contains(r#"name="search_term""#));
        assert!(html.contains(r#"hx-post="/htmx/search""#));
        assert!(html.contains(r#"hx-trigger="input""#));
        assert!(html.contains(r#"value="""#));
    }

    #[test]
    fn test_value_is_escaped() {
        let html = search_input(r#""><img src=x>"#);

        assert!(html.contains(r#"value="&quot;&gt;&lt;img src=x&gt;""#));
        assert!(!html.contains("<img src=x>"));
    }
}
