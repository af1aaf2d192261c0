//! Trending searches component

use reelscout_trending::TrendingEntry;

use super::NO_POSTER_URL;
use super::layout::escape_html;

/// How often the trending slot re-renders itself.
const TRENDING_POLL: &str = "every 10s";

/// Renders the ranked trending list, or nothing when there are no entries.
pub fn trending_content(entries: &[TrendingEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let items: String = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let poster = escape_html(entry.poster_url.as_deref().unwrap_or(NO_POSTER_URL));
            format!(
                r#"<li class="min-w-[230px] flex flex-row items-center">
                    <p class="fancy-text mt-[22px] text-nowrap">{}</p>
                    <img src="{poster}" alt="{}" class="w-[127px] h-[163px] rounded-lg object-cover -ml-3.5">
                </li>"#,
                index + 1,
                escape_html(&entry.search_term),
            )
        })
        .collect();

    format!(
        r#"<section class="trending mt-20">
            <h2>Trending Movies</h2>
            <ul class="flex flex-row overflow-y-auto gap-5 -mt-10 w-full hide-scrollbar">{items}</ul>
        </section>"#
    )
}

/// Renders the polled slot holding the trending list.
pub fn trending_section(entries: &[TrendingEntry]) -> String {
    format!(
        r#"<div id="trending" hx-get="/htmx/trending" hx-trigger="{TRENDING_POLL}" hx-swap="innerHTML">{}</div>"#,
        trending_content(entries)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(term: &str, count: u64, poster_url: Option<&str>) -> TrendingEntry {
        TrendingEntry {
            id: format!("id-{term}"),
            search_term: term.to_string(),
            count,
            poster_url: poster_url.map(str::to_string),
            movie_id: Some(1),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        assert_eq!(trending_content(&[]), "");
        assert!(!trending_section(&[]).contains("Trending Movies"));
    }

    #[test]
    fn test_entries_are_ranked_in_order() {
        let entries = vec![
            entry("dune", 5, Some("https://image.tmdb.org/t/p/w500/dune.jpg")),
            entry("alien", 2, None),
        ];

        let html = trending_content(&entries);

        let first = html.find(">1</p>").unwrap();
        let second = html.find(">2</p>").unwrap();
        assert!(first < second);
        assert!(html.contains("https://image.tmdb.org/t/p/w500/dune.jpg"));
        assert!(html.contains(NO_POSTER_URL));
        assert!(html.contains(r#"alt="alien""#));
    }

    #[test]
    fn test_search_term_is_escaped() {
        let html = trending_content(&[entry("\"><b>", 1, None)]);

        assert!(html.contains(r#"alt="&quot;&gt;&lt;b&gt;""#));
    }
}
