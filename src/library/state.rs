use crate::mvi::UiState;

/// Library list filters offered by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LibraryFilter {
    #[default]
    Followed,
    Watched,
    All,
}

impl LibraryFilter {
    /// Every filter, in display order.
    pub const VALUES: [LibraryFilter; 3] =
        [LibraryFilter::Followed, LibraryFilter::Watched, LibraryFilter::All];

    /// Filter selected when the screen opens.
    pub const DEFAULT: LibraryFilter = LibraryFilter::Followed;
}

/// Authorization state as reported by the auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub vip: bool,
}

/// Resolves image paths into sized image URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlProvider {
    pub base_url: String,
    pub poster_sizes: Vec<String>,
    pub backdrop_sizes: Vec<String>,
    pub logo_sizes: Vec<String>,
}

impl ImageUrlProvider {
    pub fn poster_url(&self, path: &str, width: u32) -> String {
        self.url(&self.poster_sizes, path, width)
    }

    pub fn backdrop_url(&self, path: &str, width: u32) -> String {
        self.url(&self.backdrop_sizes, path, width)
    }

    pub fn logo_url(&self, path: &str, width: u32) -> String {
        self.url(&self.logo_sizes, path, width)
    }

    fn url(&self, sizes: &[String], path: &str, width: u32) -> String {
        let size = select_size(sizes, width).unwrap_or("original");
        format!("{}{}{}", self.base_url, size, path)
    }
}

/// Smallest `w<N>` bucket at least `width` wide, else the last bucket.
fn select_size(sizes: &[String], width: u32) -> Option<&str> {
    sizes
        .iter()
        .find(|size| {
            size.strip_prefix('w')
                .and_then(|n| n.parse::<u32>().ok())
                .is_some_and(|n| n >= width)
        })
        .or_else(|| sizes.last())
        .map(String::as_str)
}

/// Everything the library screen renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LibraryViewState {
    pub filter: LibraryFilter,
    pub allowed_filters: Vec<LibraryFilter>,
    pub image_url_provider: Option<ImageUrlProvider>,
    pub user: Option<UserProfile>,
    pub auth_state: AuthState,
}

impl UiState for LibraryViewState {}

impl LibraryViewState {
    pub fn is_logged_in(&self) -> bool {
        self.auth_state == AuthState::LoggedIn
    }

    pub fn is_filter_allowed(&self, filter: LibraryFilter) -> bool {
        self.allowed_filters.contains(&filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ImageUrlProvider {
        ImageUrlProvider {
            base_url: "https://image.tmdb.org/t/p/".to_string(),
            poster_sizes: ["w92", "w154", "w342", "original"].map(String::from).to_vec(),
            backdrop_sizes: ["w300", "w780", "original"].map(String::from).to_vec(),
            logo_sizes: Vec::new(),
        }
    }

    #[test]
    fn poster_url_picks_smallest_bucket_that_fits() {
        assert_eq!(
            provider().poster_url("/a.jpg", 100),
            "https://image.tmdb.org/t/p/w154/a.jpg"
        );
        assert_eq!(
            provider().poster_url("/a.jpg", 92),
            "https://image.tmdb.org/t/p/w92/a.jpg"
        );
    }

    #[test]
    fn oversized_request_falls_back_to_last_bucket() {
        assert_eq!(
            provider().backdrop_url("/b.jpg", 4000),
            "https://image.tmdb.org/t/p/original/b.jpg"
        );
    }

    #[test]
    fn empty_buckets_use_original() {
        assert_eq!(
            provider().logo_url("/c.png", 10),
            "https://image.tmdb.org/t/p/original/c.png"
        );
    }

    #[test]
    fn default_state_is_logged_out_with_no_filters() {
        let state = LibraryViewState::default();
        assert_eq!(state.filter, LibraryFilter::Followed);
        assert!(state.allowed_filters.is_empty());
        assert!(!state.is_logged_in());
        assert!(state.image_url_provider.is_none());
        assert!(state.user.is_none());
    }
}
