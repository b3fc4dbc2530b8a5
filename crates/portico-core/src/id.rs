//! Stable item identifiers

use crate::error::PorticoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An item identifier within a room snapshot.
///
/// Snapshots key items by decimal strings (`"0"`, `"1"`, `"47"`, ...).
/// `ItemId` keeps the numeric value so maps of items stay in numeric
/// rather than lexicographic order.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Whether a raw snapshot key is a valid item key (numeric string).
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty() && key.chars().all(|c| c.is_ascii_digit())
    }
}

impl FromStr for ItemId {
    type Err = PorticoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| PorticoError::InvalidItemKey(s.to_string()))
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse() {
        let id: ItemId = "42".parse().unwrap();
        assert_eq!(id.raw(), 42);
        assert!("4a".parse::<ItemId>().is_err());
        assert!("".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_key_validation() {
        assert!(ItemId::is_valid_key("0"));
        assert!(ItemId::is_valid_key("123"));
        assert!(!ItemId::is_valid_key("12a"));
        assert!(!ItemId::is_valid_key(""));
    }

    #[test]
    fn test_numeric_map_order() {
        let mut map = BTreeMap::new();
        for raw in [10u64, 2, 100, 1] {
            map.insert(ItemId::from_raw(raw), ());
        }
        let keys: Vec<u64> = map.keys().map(|k| k.raw()).collect();
        assert_eq!(keys, vec![1, 2, 10, 100]);
    }

    #[test]
    fn test_json_map_keys_are_strings() {
        let mut map = BTreeMap::new();
        map.insert(ItemId::from_raw(7), "x");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"7":"x"}"#);

        let back: BTreeMap<ItemId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&ItemId::from_raw(7)).unwrap(), "x");
    }
}
