//! Query construction for the two count services.

use std::fmt;
use std::str::FromStr;

/// Fixed suffix that steers the web search towards the right field
pub const SEARCH_SUFFIX: &str = "astronomy";

/// Inclusive publication-year bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, String> {
        if start > end {
            return Err(format!("year range start {} is after end {}", start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }
}

impl FromStr for YearRange {
    type Err = String;

    /// Parse `"2000-2025"` or a single year `"2010"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse_year = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| format!("invalid year '{}' in range '{}'", part.trim(), s))
        };

        match s.split_once('-') {
            Some((start, end)) => YearRange::new(parse_year(start)?, parse_year(end)?),
            None => {
                let year = parse_year(s)?;
                YearRange::new(year, year)
            }
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Filters applied to the bibliographic query of every researcher in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    /// ADS collection (e.g. "astronomy")
    pub collection: Option<String>,
    /// Peer-reviewed records only
    pub refereed_only: bool,
    /// Affiliation substring
    pub affiliation: Option<String>,
    pub year_range: Option<YearRange>,
    pub orcid: Option<String>,
}

/// The pair of queries issued for one researcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQueries {
    /// ADS `q` parameter
    pub metrics: String,
    /// Web search `q` parameter
    pub search: String,
}

/// Build the bibliographic and web-search queries for `name`.
///
/// Inactive filters (None, empty strings, `refereed_only == false`) add nothing.
pub fn build_queries(name: &str, filters: &QueryFilters) -> LookupQueries {
    LookupQueries {
        metrics: metrics_query(name, filters),
        search: format!("{} {}", name, SEARCH_SUFFIX),
    }
}

fn metrics_query(name: &str, filters: &QueryFilters) -> String {
    let mut clauses = vec![format!("author:{}", quoted(name))];

    if let Some(collection) = active(&filters.collection) {
        clauses.push(format!("collection:{}", collection));
    }
    if filters.refereed_only {
        clauses.push("property:refereed".to_string());
    }
    if let Some(aff) = active(&filters.affiliation) {
        clauses.push(format!("aff:{}", quoted(aff)));
    }
    if let Some(range) = filters.year_range {
        clauses.push(format!("year:{}", range));
    }
    if let Some(orcid) = active(&filters.orcid) {
        clauses.push(format!("orcid:{}", orcid));
    }

    clauses.join(" AND ")
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Wrap a phrase in double quotes, backslash-escaping embedded quotes.
fn quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_encodes_only_name() {
        let queries = build_queries("Vera Rubin", &QueryFilters::default());
        assert_eq!(queries.metrics, "author:\"Vera Rubin\"");
        assert_eq!(queries.search, "Vera Rubin astronomy");
    }

    #[test]
    fn test_all_filters_compose() {
        let filters = QueryFilters {
            collection: None,
            refereed_only: true,
            affiliation: Some("Cambridge".to_string()),
            year_range: Some(YearRange::new(2000, 2025).expect("valid range")),
            orcid: None,
        };
        let queries = build_queries("Jocelyn Bell Burnell", &filters);
        assert_eq!(
            queries.metrics,
            "author:\"Jocelyn Bell Burnell\" AND property:refereed AND aff:\"Cambridge\" AND year:2000-2025"
        );
        // Filters never touch the web query
        assert_eq!(queries.search, "Jocelyn Bell Burnell astronomy");
    }

    #[test]
    fn test_collection_and_orcid() {
        let filters = QueryFilters {
            collection: Some("astronomy".to_string()),
            orcid: Some("0000-0002-1825-0097".to_string()),
            ..Default::default()
        };
        let queries = build_queries("Vera Rubin", &filters);
        assert_eq!(
            queries.metrics,
            "author:\"Vera Rubin\" AND collection:astronomy AND orcid:0000-0002-1825-0097"
        );
    }

    #[test]
    fn test_blank_filters_are_inactive() {
        let filters = QueryFilters {
            collection: Some(String::new()),
            affiliation: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(build_queries("A", &filters).metrics, "author:\"A\"");
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let queries = build_queries("O\"Neil", &QueryFilters::default());
        assert_eq!(queries.metrics, "author:\"O\\\"Neil\"");

        let filters = QueryFilters {
            affiliation: Some("Inst. \"Lick\" \\ UC".to_string()),
            ..Default::default()
        };
        let queries = build_queries("A", &filters);
        assert_eq!(
            queries.metrics,
            "author:\"A\" AND aff:\"Inst. \\\"Lick\\\" \\\\ UC\""
        );
        // The web query is the plain phrase
        assert_eq!(
            build_queries("O\"Neil", &QueryFilters::default()).search,
            "O\"Neil astronomy"
        );
    }

    #[test]
    fn test_parse_year_range() {
        assert_eq!("2000-2025".parse::<YearRange>(), YearRange::new(2000, 2025));
        assert_eq!(" 2010 ".parse::<YearRange>(), YearRange::new(2010, 2010));
        assert!("2025-2000".parse::<YearRange>().is_err());
        assert!("20x0-2025".parse::<YearRange>().is_err());
        assert!("2000-".parse::<YearRange>().is_err());
    }
}
