pub mod album;
pub mod artist;
pub mod error;
pub mod genre;
pub mod graph;
pub mod playlist;
pub mod track;
pub mod user;

use std::collections::HashMap;
use std::ops::RangeInclusive;

pub use error::CatalogError;

use crate::collections::{Collection, DocumentHandle};

/// Keys of the handles that point into `collection`, in input order. Handles into
/// other collections, or malformed ones, are skipped.
pub(crate) fn keys_in<'a, I>(handles: I, collection: Collection) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    handles
        .into_iter()
        .filter_map(|h| h.parse::<DocumentHandle>().ok())
        .filter(|h| h.collection == collection)
        .map(|h| h.key)
        .collect()
}

/// Reorders `models` to follow `keys`. Keys without a model are dropped, repeated keys
/// repeat the model.
pub(crate) fn in_key_order<M: Clone>(
    keys: &[String],
    models: Vec<M>,
    key_of: impl Fn(&M) -> &str,
) -> Vec<M> {
    let by_key: HashMap<String, M> = models
        .into_iter()
        .map(|m| (key_of(&m).to_string(), m))
        .collect();
    keys.iter().filter_map(|k| by_key.get(k).cloned()).collect()
}

pub(crate) fn check_range(name: &str, value: u64, range: RangeInclusive<u64>) -> Result<(), CatalogError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CatalogError::BadRequest(format!(
            "{} must be between {} and {}",
            name,
            range.start(),
            range.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_in_filters_collection() {
        let handles = vec![
            "albums/al1".to_string(),
            "tracks/t1".to_string(),
            "garbage".to_string(),
            "albums/al2".to_string(),
        ];
        assert_eq!(keys_in(&handles, Collection::Albums), vec!["al1", "al2"]);
    }

    #[test]
    fn test_in_key_order() {
        let keys = vec!["b".to_string(), "x".to_string(), "a".to_string()];
        let ordered = in_key_order(&keys, vec!["a", "b"], |m| *m);
        assert_eq!(ordered, vec!["b", "a"]);
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("n", 1, 1..=100).is_ok());
        assert!(check_range("n", 100, 1..=100).is_ok());
        assert_eq!(
            check_range("n", 0, 1..=100),
            Err(CatalogError::BadRequest(
                "n must be between 1 and 100".to_string()
            ))
        );
    }
}
