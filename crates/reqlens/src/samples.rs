//! Demo inputs covering the supported input shapes

/// Bare JSON body with URL-encoded `params`
pub const BARE_JSON: &str = r#"{"requests":[{"indexName":"npm-search","params":"query=yarn&analyticsTags=%5B%22yarnpkg.com%22%5D&attributesToRetrieve=%5B%22deprecated%22%2C%22description%22%2C%22downloadsLast30Days%22%2C%22repository%22%2C%22homepage%22%2C%22humanDownloadsLast30Days%22%2C%22keywords%22%2C%22license%22%2C%22modified%22%2C%22name%22%2C%22owner%22%2C%22version%22%5D&attributesToHighlight=%5B%22name%22%2C%22description%22%2C%22keywords%22%5D&highlightPreTag=%3Cais-highlight-0000000000%3E&highlightPostTag=%3C%2Fais-highlight-0000000000%3E&hitsPerPage=5&maxValuesPerFacet=10&page=0&facets=%5B%22keywords%22%2C%22keywords%22%2C%22owner.name%22%5D&tagFilters="}]}"#;

/// Single-line transcript with credentials in the query string
pub const QUERY_CREDENTIALS: &str = r#"curl 'https://ofcncog2cu-dsn.algolia.net/1/indexes/*/queries?x-algolia-agent=Algolia%20for%20JavaScript%20(4.0.0-beta.14)%3B%20Browser%20(lite)%3B%20JS%20Helper%20(3.1.0)%3B%20react%20(16.8.4)%3B%20react-instantsearch%20(6.2.0)&x-algolia-application-id=OFCNCOG2CU&x-algolia-api-key=f54e21fa3a2a0160595bb058179bfb1e' -H 'Referer: https://yarnpkg.com/' -H 'accept: application/json' -H 'content-type: application/x-www-form-urlencoded' --data-raw '{"requests":[{"indexName":"npm-search","params":"query=algoliasearch&analyticsTags=%5B%22yarnpkg.com%22%5D&attributesToRetrieve=%5B%22deprecated%22%2C%22description%22%2C%22downloadsLast30Days%22%2C%22homepage%22%2C%22humanDownloadsLast30Days%22%2C%22keywords%22%2C%22license%22%2C%22modified%22%2C%22name%22%2C%22owner%22%2C%22repository%22%2C%22types%22%2C%22version%22%5D&attributesToHighlight=%5B%22name%22%2C%22description%22%2C%22keywords%22%5D&highlightPreTag=%3Cais-highlight-0000000000%3E&highlightPostTag=%3C%2Fais-highlight-0000000000%3E&hitsPerPage=5&maxValuesPerFacet=10&facets=%5B%22keywords%22%2C%22keywords%22%2C%22owner.name%22%5D&tagFilters="}]}' --compressed"#;

/// Multi-line transcript with the agent in the query string and keys in headers
pub const HEADER_CREDENTIALS: &str = r#"curl 'https://ofcncog2cu-dsn.algolia.net/1/indexes/*/queries?x-algolia-agent=Algolia%20for%20JavaScript%20(5.13.0)%3B%20Search%20(5.13.0)%3B%20Browser%3B%20Algolia%20Dashboard%3B%20instantsearch.js%20(4.75.7)%3B%20react%20(18.3.1)%3B%20react-instantsearch%20(7.13.10)%3B%20react-instantsearch-core%20(7.13.10)%3B%20JS%20Helper%20(3.22.6)' \
  -H 'accept: */*' \
  -H 'accept-language: en-GB,en;q=0.9' \
  -H 'content-type: text/plain' \
  -H 'origin: https://dashboard.algolia.com' \
  -H 'x-algolia-api-key: f54e21fa3a2a0160595bb058179bfb1e' \
  -H 'x-algolia-application-id: OFCNCOG2CU' \
  --data-raw '{"requests":[{"indexName":"npm-search","analytics":false,"clickAnalytics":false,"query":""},{"indexName":"npm-search","analytics":false,"clickAnalytics":false,"filters":"","highlightPostTag":"__/ais-highlight__","highlightPreTag":"__ais-highlight__","query":""}]}' \
  --compressed"#;

/// All demo inputs, in the order the demo command cycles through them
pub const DEMO_INPUTS: &[&str] = &[BARE_JSON, QUERY_CREDENTIALS, HEADER_CREDENTIALS];

/// Demo input for a counter, wrapping around
pub fn demo_input(index: usize) -> &'static str {
    DEMO_INPUTS[index % DEMO_INPUTS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_inputs() {
        assert_eq!(DEMO_INPUTS.len(), 3);
    }

    #[test]
    fn test_demo_input_wraps() {
        assert_eq!(demo_input(0), BARE_JSON);
        assert_eq!(demo_input(4), QUERY_CREDENTIALS);
    }
}
