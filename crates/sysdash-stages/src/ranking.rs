//! Ranking rules shared by more than one stage.
use sysdash_core::ordering::selection_sort_by;
use sysdash_core::EmailData;

/// `[sorted by provider, sorted by country]`, both holding every record.
pub fn provider_and_country_views<T, P, C>(records: &[T], provider: P, country: C) -> Vec<Vec<T>>
where
    T: Clone,
    P: Fn(&T) -> &str,
    C: Fn(&T) -> &str,
{
    let mut by_provider = records.to_vec();
    selection_sort_by(&mut by_provider, |a, b| provider(a) < provider(b));

    let mut by_country = records.to_vec();
    selection_sort_by(&mut by_country, |a, b| country(a) < country(b));

    vec![by_provider, by_country]
}

/// Sorts one country bucket by delivery time and returns
/// `[bucket[1..4], bucket[n-3..n]]`.
///
/// Buckets under four records are clamped: the fastest window becomes
/// `[min(1, n), min(4, n))` and the slowest `[n.saturating_sub(3), n)`.
pub fn fastest_and_slowest(mut bucket: Vec<EmailData>) -> Vec<Vec<EmailData>> {
    selection_sort_by(&mut bucket, |a, b| a.delivery_time < b.delivery_time);

    let n = bucket.len();
    let fastest = bucket[n.min(1)..n.min(4)].to_vec();
    let slowest = bucket[n.saturating_sub(3)..].to_vec();

    vec![fastest, slowest]
}
