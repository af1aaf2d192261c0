//! Data types for catalog queries and results.

use serde::{Deserialize, Serialize};

/// Poster width requested from the image CDN.
pub const POSTER_SIZE: &str = "w500";

/// A movie record as returned by the catalog.
///
/// Unknown fields are ignored and every descriptive field is optional, since
/// catalog entries are frequently incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog identifier
    pub id: u64,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Poster path relative to the image CDN, e.g. `/abc.jpg`
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average user rating on a 0-10 scale
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// ISO 639-1 language code
    #[serde(default)]
    pub original_language: Option<String>,
    /// Release date as `YYYY-MM-DD`, sometimes empty
    #[serde(default)]
    pub release_date: Option<String>,
    /// Plot summary
    #[serde(default)]
    pub overview: Option<String>,
    /// Catalog popularity score
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl Movie {
    /// Full poster URL under `image_base`, if the movie has a poster.
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| {
                let path = path.trim_start_matches('/');
                format!("{}/{POSTER_SIZE}/{path}", image_base.trim_end_matches('/'))
            })
    }

    /// Release year, taken from the leading component of the release date.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }

    /// Rating with one decimal, or `N/A` when unrated.
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(score) if score > 0.0 => format!("{score:.1}"),
            _ => "N/A".to_string(),
        }
    }

    /// Language code, or `N/A` when unknown.
    pub fn language_label(&self) -> &str {
        self.original_language
            .as_deref()
            .filter(|lang| !lang.is_empty())
            .unwrap_or("N/A")
    }
}

/// Which catalog listing a committed search term maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Popular movies, most popular first
    Discover,
    /// Free-text title search
    Search(String),
}

impl CatalogQuery {
    /// Maps a committed term to a query.
    ///
    /// Only the empty string selects the discover listing; whitespace is a
    /// real search term and is sent as-is.
    pub fn from_term(term: &str) -> Self {
        if term.is_empty() {
            CatalogQuery::Discover
        } else {
            CatalogQuery::Search(term.to_string())
        }
    }

    /// Request path and query string relative to the catalog base URL.
    pub fn path_and_query(&self) -> String {
        match self {
            CatalogQuery::Discover => "/discover/movie?sort_by=popularity.desc".to_string(),
            CatalogQuery::Search(query) => {
                format!("/search/movie?query={}", urlencoding::encode(query))
            }
        }
    }

    /// Search term carried by the query, if any.
    pub fn term(&self) -> Option<&str> {
        match self {
            CatalogQuery::Discover => None,
            CatalogQuery::Search(query) => Some(query),
        }
    }
}

/// Listing envelope returned by both discover and search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    /// Result page; absent or null is treated as empty
    #[serde(default)]
    pub results: Option<Vec<Movie>>,
}

impl CatalogResponse {
    /// Unwraps the result list.
    pub fn into_movies(self) -> Vec<Movie> {
        self.results.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(json: &str) -> Movie {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_query_from_term() {
        assert_eq!(CatalogQuery::from_term(""), CatalogQuery::Discover);
        assert_eq!(
            CatalogQuery::from_term("dune"),
            CatalogQuery::Search("dune".to_string())
        );
        assert_eq!(
            CatalogQuery::from_term(" "),
            CatalogQuery::Search(" ".to_string())
        );
    }

    #[test]
    fn test_path_and_query_encodes_term() {
        assert_eq!(
            CatalogQuery::Discover.path_and_query(),
            "/discover/movie?sort_by=popularity.desc"
        );
        assert_eq!(
            CatalogQuery::from_term("dune").path_and_query(),
            "/search/movie?query=dune"
        );
        assert_eq!(
            CatalogQuery::from_term("fast & furious 7").path_and_query(),
            "/search/movie?query=fast%20%26%20furious%207"
        );
        assert_eq!(
            CatalogQuery::from_term("amélie").path_and_query(),
            "/search/movie?query=am%C3%A9lie"
        );
    }

    #[test]
    fn test_movie_tolerates_sparse_records() {
        let sparse = movie(r#"{"id": 7, "adult": false, "genre_ids": [1, 2]}"#);

        assert_eq!(sparse.id, 7);
        assert_eq!(sparse.title, "");
        assert_eq!(sparse.poster_url("https://image.tmdb.org/t/p"), None);
        assert_eq!(sparse.release_year(), None);
        assert_eq!(sparse.rating_label(), "N/A");
        assert_eq!(sparse.language_label(), "N/A");
    }

    #[test]
    fn test_movie_card_labels() {
        let dune = movie(
            r#"{"id": 438631, "title": "Dune", "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
                "vote_average": 7.784, "original_language": "en", "release_date": "2021-09-15"}"#,
        );

        assert_eq!(
            dune.poster_url("https://image.tmdb.org/t/p/").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")
        );
        assert_eq!(dune.release_year(), Some("2021"));
        assert_eq!(dune.rating_label(), "7.8");
        assert_eq!(dune.language_label(), "en");
    }

    #[test]
    fn test_response_without_results_is_empty() {
        let missing: CatalogResponse = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        let null: CatalogResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();

        assert!(missing.into_movies().is_empty());
        assert!(null.into_movies().is_empty());
    }
}
