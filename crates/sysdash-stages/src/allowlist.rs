//! Provider allow-lists, fixed per subsystem.
use once_cell::sync::Lazy;
use std::collections::HashSet;

#[derive(Debug)]
pub struct ProviderAllowList {
    providers: HashSet<&'static str>,
}

impl ProviderAllowList {
    pub fn new(providers: &[&'static str]) -> Self {
        Self {
            providers: providers.iter().copied().collect(),
        }
    }

    pub fn contains(&self, provider: &str) -> bool {
        self.providers.contains(provider)
    }
}

/// Shared by SMS and MMS.
pub static MESSAGING_PROVIDERS: Lazy<ProviderAllowList> =
    Lazy::new(|| ProviderAllowList::new(&["Topolo", "Rond", "Kildy"]));

pub static VOICE_PROVIDERS: Lazy<ProviderAllowList> =
    Lazy::new(|| ProviderAllowList::new(&["TransparentCalls", "E-Voice", "JustPhone"]));

pub static EMAIL_PROVIDERS: Lazy<ProviderAllowList> = Lazy::new(|| {
    ProviderAllowList::new(&[
        "Gmail",
        "Yahoo",
        "Hotmail",
        "MSN",
        "Orange",
        "Comcast",
        "AOL",
        "Live",
        "RediffMail",
        "GMX",
        "Proton Mail",
        "Yandex",
        "Mail.ru",
    ])
});
