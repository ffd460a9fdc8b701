//! Delimited text feeds: newline-separated records, `;`-separated fields.

const RECORD_DELIMITER: char = '\n';
const FIELD_DELIMITER: char = ';';

/// Yields the fields of every line with at least `min_fields` fields.
/// Shorter lines are skipped.
pub fn delimited_records(text: &str, min_fields: usize) -> impl Iterator<Item = Vec<&str>> + '_ {
    text.split(RECORD_DELIMITER)
        .map(|line| line.trim_end_matches('\r'))
        .map(|line| line.split(FIELD_DELIMITER).collect::<Vec<_>>())
        .filter(move |fields| fields.len() >= min_fields)
}
