//! Station catalogue — the data behind the browse pages.
//!
//! Stands in for the station directory service: a bundled JSON document
//! served in pages, filtered by country and genre.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Station {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub genre: String,
    /// ISO 3166 alpha-2 code.
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationFilter {
    pub country: Option<String>,
    pub genre: Option<String>,
}

impl StationFilter {
    pub fn matches(&self, station: &Station) -> bool {
        self.country
            .as_deref()
            .map_or(true, |c| station.country.eq_ignore_ascii_case(c))
            && self
                .genre
                .as_deref()
                .map_or(true, |g| station.genre.eq_ignore_ascii_case(g))
    }
}

/// One page of a filtered station query.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPage {
    pub page: usize,
    pub stations: Vec<Station>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub stations: Vec<Station>,
}

impl Catalog {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn bundled() -> anyhow::Result<Self> {
        Self::from_json(include_str!("../data/stations.json"))
    }

    /// Distinct genres in first-seen order.
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = Vec::new();
        for station in &self.stations {
            if !station.genre.is_empty() && !genres.contains(&station.genre) {
                genres.push(station.genre.clone());
            }
        }
        genres
    }

    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .map(|c| c.name.as_str())
    }

    pub fn query<'a>(&'a self, filter: &'a StationFilter) -> impl Iterator<Item = &'a Station> + 'a {
        self.stations.iter().filter(move |s| filter.matches(s))
    }

    pub fn page(&self, filter: &StationFilter, page: usize, page_size: usize) -> StationPage {
        let page_size = page_size.max(1);
        let start = page * page_size;
        let mut matching = self.query(filter).skip(start);
        let stations: Vec<Station> = matching.by_ref().take(page_size).cloned().collect();
        let has_more = matching.next().is_some();
        StationPage {
            page,
            stations,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "countries": [{"code": "CL", "name": "Chile"}],
                "stations": [
                    {"name": "A", "url": "http://a", "genre": "jazz", "country": "CL"},
                    {"name": "B", "url": "http://b", "genre": "rock", "country": "US"},
                    {"name": "C", "url": "http://c", "genre": "jazz", "country": "US"},
                    {"name": "D", "url": "http://d", "genre": "jazz", "country": "CL"},
                    {"name": "E", "url": "http://e"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = Catalog::bundled().unwrap();
        assert!(catalog.stations.len() > 40);
        assert!(catalog.genres().len() >= 8);
        assert_eq!(catalog.country_name("cl"), Some("Chile"));
    }

    #[test]
    fn test_genres_in_first_seen_order() {
        assert_eq!(catalog().genres(), vec!["jazz".to_string(), "rock".to_string()]);
    }

    #[test]
    fn test_paging_and_has_more() {
        let catalog = catalog();
        let all = StationFilter::default();
        let first = catalog.page(&all, 0, 2);
        assert_eq!(first.stations.len(), 2);
        assert!(first.has_more);
        let last = catalog.page(&all, 2, 2);
        assert_eq!(last.stations.len(), 1);
        assert!(!last.has_more);
        assert!(catalog.page(&all, 9, 2).stations.is_empty());
    }

    #[test]
    fn test_filter_by_country_and_genre() {
        let catalog = catalog();
        let filter = StationFilter {
            country: Some("cl".to_string()),
            genre: Some("jazz".to_string()),
        };
        let names: Vec<&str> = catalog.query(&filter).map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);
    }
}
