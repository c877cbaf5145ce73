//! Search query derivation from a ranking page URL
//!
//! The public ranking pages (`/best-colleges/rankings/<program>/<specialty>-...`)
//! are backed by one JSON search endpoint. This module turns a ranking page URL
//! into the endpoint's query parameters and a human-readable dataset title.

use url::Url;

/// Query parameter carrying the page number
pub const PAGE_PARAM: &str = "_page";

/// Title used when the URL names no program
pub const DEFAULT_TITLE: &str = "Ranking";

/// Query parameters and title derived from a starting URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    params: Vec<(String, String)>,
    title: String,
}

impl SourceQuery {
    /// Derives the search parameters from a ranking page URL
    ///
    /// # Example
    ///
    /// ```
    /// use usnews_ranker::source::SourceQuery;
    ///
    /// let query = SourceQuery::from_start_url(
    ///     "https://www.usnews.com/best-colleges/rankings/engineering-doctorate-ai?_sort=rank",
    /// ).unwrap();
    /// assert_eq!(query.title(), "Engineering Doctorate");
    /// assert_eq!(query.get("_sort"), Some("rank"));
    /// ```
    pub fn from_start_url(start_url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(start_url)?;
        let mut params: Vec<(String, String)> = Vec::new();
        let mut title = DEFAULT_TITLE.to_string();

        // "/best-colleges/rankings/national-universities" -> ["rankings", "national-universities"]
        let locations: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.skip(1).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        if let Some(program) = locations.first() {
            if *program != "search" {
                params.push(("program".to_string(), (*program).to_string()));
                title = (*program).to_string();
            }
        }

        if let Some(segment) = locations.get(1) {
            let specialty = match segment.rfind('-') {
                Some(cut) => &segment[..cut],
                None => segment,
            };
            if !specialty.is_empty() {
                params.push(("specialty".to_string(), specialty.to_string()));
                title = specialty.to_string();
            }
        }

        params.push((PAGE_PARAM.to_string(), "1".to_string()));

        let mut query = Self {
            params,
            title: title_case(&title.replace('-', " ")),
        };
        for (key, value) in url.query_pairs() {
            query.set(&key, &value);
        }

        Ok(query)
    }

    /// Human-readable title for the dataset
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All query parameters, in insertion order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns the value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets a parameter, replacing an existing value in place
    pub fn set(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    /// Returns the parameters for fetching one page
    pub fn for_page(&self, page: u32) -> Vec<(String, String)> {
        let mut query = self.clone();
        query.set(PAGE_PARAM, &page.to_string());
        query.params
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
