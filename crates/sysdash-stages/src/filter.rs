//! Record validation against the country directory and an allow-list.
use crate::allowlist::ProviderAllowList;
use std::sync::Arc;
use sysdash_core::CountryDirectory;

#[derive(Clone)]
pub struct RecordFilter {
    directory: Arc<CountryDirectory>,
    providers: &'static ProviderAllowList,
}

impl RecordFilter {
    pub fn new(directory: Arc<CountryDirectory>, providers: &'static ProviderAllowList) -> Self {
        Self {
            directory,
            providers,
        }
    }

    /// Returns the country's display name iff the code resolves and the
    /// provider is allow-listed. `None` means drop the record.
    pub fn admit(&self, country_code: &str, provider: &str) -> Option<String> {
        let country = self.directory.lookup(country_code)?;
        if !self.providers.contains(provider) {
            return None;
        }
        Some(country.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowlist::MESSAGING_PROVIDERS;

    fn filter() -> RecordFilter {
        let directory = CountryDirectory::parse("United States;US\nFrance;FR");
        RecordFilter::new(Arc::new(directory), &MESSAGING_PROVIDERS)
    }

    #[test]
    fn test_accepts_iff_both_lookups_succeed() {
        let filter = filter();
        let cases = [
            ("US", "Rond", Some("United States")),
            ("FR", "Kildy", Some("France")),
            ("US", "Unknown", None),
            ("XX", "Rond", None),
            ("XX", "Unknown", None),
            ("", "", None),
        ];

        for (code, provider, expected) in cases {
            assert_eq!(
                filter.admit(code, provider).as_deref(),
                expected,
                "Failed for: {} / {}",
                code,
                provider
            );
        }
    }
}
