use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, WeatherError};

use super::{FetchStatus, RequestToken, RequestTracker};

static CITY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s,.'-]+$").expect("city name pattern is valid"));

/// Whether typed text is long enough to ask for suggestions.
pub fn wants_suggestions(text: &str) -> bool {
    text.trim().chars().count() > 1
}

/// Check free text before it is used to open a city screen.
pub fn validate_city_name(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if !CITY_NAME.is_match(text) {
        return Err(ValidationError::Invalid);
    }
    Ok(())
}

/// Query text and the place suggestions fetched for it.
///
/// `suggestions` is empty whenever the query is too short to search;
/// clearing also retires any in-flight fetch so a late answer cannot
/// bring the list back.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub suggestions: Vec<String>,
    pub highlighted_index: Option<usize>,
    pub status: FetchStatus,
    pub error: Option<String>,
    requests: RequestTracker,
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Pending
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.highlighted_index = None;
        self.requests.invalidate();
        if self.status == FetchStatus::Pending {
            self.status = FetchStatus::Idle;
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Back to an empty search box.
    pub fn reset(&mut self) {
        self.query.clear();
        self.clear_suggestions();
        self.error = None;
    }

    pub fn begin_fetch(&mut self) -> RequestToken {
        self.status = FetchStatus::Pending;
        self.error = None;
        self.requests.issue()
    }

    /// Apply a fetch outcome. Returns `false` if a newer fetch superseded it.
    pub fn settle(&mut self, token: RequestToken, result: Result<Vec<String>, WeatherError>) -> bool {
        if !self.requests.is_current(token) {
            return false;
        }

        match result {
            Ok(suggestions) => {
                self.status = FetchStatus::Fulfilled;
                self.suggestions = suggestions;
            }
            Err(err) => {
                self.status = FetchStatus::Rejected;
                self.suggestions.clear();
                self.error = Some(err.to_string());
            }
        }
        self.highlighted_index = None;
        true
    }

    /// Out-of-range indices clear the highlight.
    pub fn set_highlighted_index(&mut self, index: Option<usize>) {
        self.highlighted_index = index.filter(|i| *i < self.suggestions.len());
    }

    pub fn highlight_next(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        self.highlighted_index = Some(match self.highlighted_index {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn highlight_previous(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        self.highlighted_index = Some(match self.highlighted_index {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    pub fn highlighted_suggestion(&self) -> Option<&str> {
        self.highlighted_index
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }
}
