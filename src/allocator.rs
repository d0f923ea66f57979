//! Identifier allocation for new catalog and membership rows.
//!
//! Display identifiers are derived from the set of identifiers already in
//! use: the next numeric id is the current maximum plus one, and reader ids
//! follow the `Reader N` format. There is no counter table; callers must
//! run the scan and the subsequent insert inside one transaction so that
//! two concurrent inserts cannot compute the same id.

/// Next numeric identifier (books, staff).
///
/// Stored values may be digit-only strings. Values that do not parse are
/// skipped with a warning; if nothing parses the sequence starts at 1.
pub fn next_numeric(ids: &[String]) -> i64 {
    let mut max: Option<i64> = None;
    for id in ids {
        match id.trim().parse::<i64>() {
            Ok(n) => max = Some(max.map_or(n, |m| m.max(n))),
            Err(_) => {
                tracing::warn!(id = %id, "ignoring non-numeric identifier during allocation");
            }
        }
    }
    max.map_or(1, |m| m + 1)
}

/// Next reader identifier, canonical format `Reader N`.
///
/// Historical rows carry two prefix casings (`Reader N` and `reader N`);
/// the trailing integer is compared numerically across both and the output
/// is always canonical. Identifiers that do not match the pattern are
/// skipped with a warning; an empty or fully unparseable set yields
/// `Reader 1`.
pub fn next_reader_id(ids: &[String]) -> String {
    let mut max: Option<i64> = None;
    for id in ids {
        match parse_reader_number(id) {
            Some(n) => max = Some(max.map_or(n, |m| m.max(n))),
            None => {
                tracing::warn!(id = %id, "ignoring malformed reader identifier during allocation");
            }
        }
    }
    format!("Reader {}", max.map_or(1, |m| m + 1))
}

fn parse_reader_number(id: &str) -> Option<i64> {
    let rest = id
        .strip_prefix("Reader ")
        .or_else(|| id.strip_prefix("reader "))?;
    rest.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_takes_max_plus_one() {
        let ids = vec!["3".to_string(), "7".to_string(), "2".to_string()];
        assert_eq!(next_numeric(&ids), 8);
    }

    #[test]
    fn numeric_starts_at_one_when_empty() {
        assert_eq!(next_numeric(&[]), 1);
    }

    #[test]
    fn numeric_tolerates_garbage() {
        let ids = vec!["not-a-number".to_string()];
        assert_eq!(next_numeric(&ids), 1);
    }

    #[test]
    fn numeric_skips_garbage_but_keeps_valid() {
        let ids = vec!["5".to_string(), "abc".to_string(), "9".to_string()];
        assert_eq!(next_numeric(&ids), 10);
    }

    #[test]
    fn reader_id_compares_case_variants_numerically() {
        let ids = vec!["Reader 5".to_string(), "reader 9".to_string()];
        assert_eq!(next_reader_id(&ids), "Reader 10");
    }

    #[test]
    fn reader_id_starts_at_one_when_empty() {
        assert_eq!(next_reader_id(&[]), "Reader 1");
    }

    #[test]
    fn reader_id_skips_malformed_entries() {
        let ids = vec!["Reader three".to_string(), "borrower 12".to_string()];
        assert_eq!(next_reader_id(&ids), "Reader 1");
    }

    #[test]
    fn reader_id_output_is_canonical() {
        let ids = vec!["reader 2".to_string()];
        assert_eq!(next_reader_id(&ids), "Reader 3");
    }
}
