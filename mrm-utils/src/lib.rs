//! Shared utility functions for MRM crates.

/// Number formatting for statistics shown in tooltips, cards and overlays.
pub mod numbers {
    /// Format an integer with thousands separators, e.g. `144000` -> `"144,000"`.
    pub fn with_commas(n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Short form used by the trust indicator overlay: `144000` -> `"144K"`.
    ///
    /// Values under 10,000 keep their separators so small counts read exactly.
    pub fn compact(n: u64) -> String {
        if n >= 1_000_000 {
            let tenths = n / 100_000;
            if tenths % 10 == 0 {
                format!("{}M", tenths / 10)
            } else {
                format!("{}.{}M", tenths / 10, tenths % 10)
            }
        } else if n >= 10_000 {
            format!("{}K", n / 1_000)
        } else {
            with_commas(n)
        }
    }

    /// Whole-dollar currency, e.g. `1850000` -> `"$1,850,000"`.
    pub fn currency(dollars: u64) -> String {
        format!("${}", with_commas(dollars))
    }

}

/// Contact page links carried by every map navigation.
pub mod links {
    /// Same-origin path of the contact page.
    pub const CONTACT_PATH: &str = "/contact";

    /// `/contact?basin=<id>`
    pub fn basin_contact_url(basin_id: &str) -> String {
        format!("{}?basin={}", CONTACT_PATH, basin_id)
    }

    /// `/contact?basin=<basin_id>&project=<project_id>`
    pub fn project_contact_url(basin_id: &str, project_id: &str) -> String {
        format!("{}?basin={}&project={}", CONTACT_PATH, basin_id, project_id)
    }

    /// Look up a query parameter on a same-origin contact URL.
    ///
    /// Returns `None` when the path is not the contact page.
    pub fn contact_query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
        let (path, query) = url.split_once('?')?;
        if path != CONTACT_PATH {
            return None;
        }
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Ids are lowercase slugs so they can travel in a query string unescaped.
    pub fn is_slug(id: &str) -> bool {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_contact_urls() {
            assert_eq!(basin_contact_url("williston"), "/contact?basin=williston");
            assert_eq!(
                project_contact_url("delaware", "del-001"),
                "/contact?basin=delaware&project=del-001"
            );
        }

        #[test]
        fn test_contact_query_param() {
            let url = "/contact?basin=eagle-ford&project=ef-001";
            assert_eq!(contact_query_param(url, "basin"), Some("eagle-ford"));
            assert_eq!(contact_query_param(url, "project"), Some("ef-001"));
            assert_eq!(contact_query_param(url, "state"), None);
            assert_eq!(contact_query_param("/about?basin=dj", "basin"), None);
            assert_eq!(contact_query_param("https://evil.example/contact?basin=dj", "basin"), None);
            assert_eq!(contact_query_param("/contact", "basin"), None);
        }

        #[test]
        fn test_is_slug() {
            assert!(is_slug("powder-river"));
            assert!(is_slug("dj"));
            assert!(!is_slug(""));
            assert!(!is_slug("Powder River"));
            assert!(!is_slug("a&b=c"));
        }
    }
}
