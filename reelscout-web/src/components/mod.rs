//! Reusable HTML components for the HTMX + Tailwind UI
//!
//! Components are server-rendered HTML fragments used both in the full page
//! and as HTMX partial updates. Every value interpolated into markup goes
//! through [`escape_html`].

pub mod feedback;
pub mod layout;
pub mod movies;
pub mod search;
pub mod trending;

// Re-export main component functions
pub use feedback::{error_message, spinner};
pub use layout::{escape_html, hero, page_shell};
pub use movies::{all_movies_content, all_movies_section, movie_card};
pub use search::search_input;
pub use trending::{trending_content, trending_section};

/// Poster shown for movies without one.
pub const NO_POSTER_URL: &str = "/static/no-movie.svg";
