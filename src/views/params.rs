// Query string parameters

/// Decoded `application/x-www-form-urlencoded` query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let Some(query) = query else {
            return Self::default();
        };
        Self(
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// Last value for `name`; a repeated key overrides earlier ones
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_decode() {
        let params = QueryParams::parse(Some("q=ignored&page=2&q=mary+ann"));
        assert_eq!(params.get("q"), Some("mary ann"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("missing"), None);

        let params = QueryParams::parse(Some("q=%C3%85ng"));
        assert_eq!(params.get("q"), Some("Ång"));
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(QueryParams::parse(None).get("q"), None);
        assert_eq!(QueryParams::parse(Some("")).get("q"), None);
        assert_eq!(QueryParams::parse(Some("q=")).get("q"), Some(""));
        assert_eq!(QueryParams::parse(Some("q")).get("q"), Some(""));
    }
}
