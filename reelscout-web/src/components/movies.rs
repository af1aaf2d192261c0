//! Movie components - cards and the "All Movies" section

use reelscout_search::Movie;

use super::NO_POSTER_URL;
use super::feedback::{error_message, spinner};
use super::layout::escape_html;
use crate::state::SearchState;

/// How often the results section re-renders itself.
const MOVIES_POLL: &str = "every 1s";

/// Renders one movie card: poster, title, rating, language and year.
pub fn movie_card(movie: &Movie, image_base: &str) -> String {
    let poster = movie
        .poster_url(image_base)
        .unwrap_or_else(|| NO_POSTER_URL.to_string());
    let title = escape_html(&movie.title);
    let rating = escape_html(&movie.rating_label());
    let language = escape_html(movie.language_label());
    let year = escape_html(movie.release_year().unwrap_or("N/A"));

    format!(
        r#"<li class="movie-card bg-dark-100 p-5 rounded-2xl shadow-inner shadow-light-100/10">
            <img src="{poster}" alt="{title}" class="rounded-lg h-auto w-full">
            <div class="mt-4">
                <h3 class="text-white font-bold text-base line-clamp-1">{title}</h3>
                <div class="content mt-2 flex flex-row items-center flex-wrap gap-2">
                    <div class="rating flex flex-row items-center gap-1">
                        <img src="/static/star.svg" alt="Star Icon" class="size-4 object-contain">
                        <p class="font-bold text-base text-white">{rating}</p>
                    </div>
                    <span class="text-sm text-gray-100">&bull;</span>
                    <p class="lang capitalize text-gray-100 font-medium text-base">{language}</p>
                    <span class="text-sm text-gray-100">&bull;</span>
                    <p class="year text-gray-100 font-medium text-base">{year}</p>
                </div>
            </div>
        </li>"#
    )
}

/// Renders the inside of the "All Movies" section.
///
/// Loading wins over an error, and an error wins over the results.
pub fn all_movies_content(search: &SearchState, image_base: &str) -> String {
    let body = if search.is_loading {
        spinner()
    } else if !search.error_message.is_empty() {
        error_message(&search.error_message)
    } else {
        let cards: String = search
            .movies
            .iter()
            .map(|movie| movie_card(movie, image_base))
            .collect();
        format!(
            r#"<ul class="grid grid-cols-1 gap-5 xs:grid-cols-2 md:grid-cols-3 lg:grid-cols-4">{cards}</ul>"#
        )
    };

    format!(r#"<h2 class="mt-[40px]">All Movies</h2>{body}"#)
}

/// Renders the "All Movies" section, which refreshes itself by polling.
pub fn all_movies_section(search: &SearchState, image_base: &str) -> String {
    format!(
        r#"<section id="all-movies" class="all-movies space-y-9"
                 hx-get="/htmx/movies"
                 hx-trigger="{MOVIES_POLL}"
                 hx-swap="innerHTML">
            {}
        </section>"#,
        all_movies_content(search, image_base)
    )
}
