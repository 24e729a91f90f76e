use crate::response::Asset;
use crate::types::{Amount, ClassId, SetKey};
use std::collections::{HashMap, HashSet};

/// A snapshot of an inventory grouped by set, holding per-class counts. Duplicates within a
/// set are represented by counts greater than one. Updates during a matching pass are local
/// to the pass and never persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryState {
    sets: HashMap<SetKey, HashMap<ClassId, Amount>>,
}

impl InventoryState {
    /// Builds the state from a flat inventory by grouping and counting.
    pub fn from_assets<'a, I>(assets: I) -> Self
    where
        I: IntoIterator<Item = &'a Asset>,
    {
        let mut sets: HashMap<SetKey, HashMap<ClassId, Amount>> = HashMap::new();

        for asset in assets {
            let classes = sets.entry(asset.set_key()).or_default();

            *classes.entry(asset.classid).or_insert(0) += asset.amount;
        }

        Self { sets }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The keys of all sets present in this state.
    pub fn set_keys(&self) -> HashSet<SetKey> {
        self.sets.keys().copied().collect()
    }

    /// Set keys in a fixed order, for deterministic iteration.
    pub fn sorted_set_keys(&self) -> Vec<SetKey> {
        let mut keys = self.sets.keys().copied().collect::<Vec<_>>();

        keys.sort_unstable();
        keys
    }

    pub fn get(&self, set_key: &SetKey) -> Option<&HashMap<ClassId, Amount>> {
        self.sets.get(set_key)
    }

    pub fn get_mut(&mut self, set_key: &SetKey) -> Option<&mut HashMap<ClassId, Amount>> {
        self.sets.get_mut(set_key)
    }

    pub fn remove_set(&mut self, set_key: &SetKey) {
        self.sets.remove(set_key);
    }

    /// Whether any set holds a class with a count greater than one.
    pub fn has_surplus(&self) -> bool {
        self.sets
            .values()
            .any(|classes| classes.values().any(|count| *count > 1))
    }

    /// Whether the given set holds a class with a count greater than one.
    pub fn set_has_surplus(&self, set_key: &SetKey) -> bool {
        self.sets
            .get(set_key)
            .map(|classes| classes.values().any(|count| *count > 1))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::AssetType;

    fn card(assetid: u64, classid: ClassId, real_appid: u32) -> Asset {
        Asset {
            appid: 753,
            contextid: 6,
            assetid,
            classid,
            real_appid,
            r#type: AssetType::TradingCard,
            amount: 1,
            tradable: true,
        }
    }

    #[test]
    fn groups_and_counts_by_set() {
        let assets = vec![
            card(1, 100, 730),
            card(2, 100, 730),
            card(3, 101, 730),
            card(4, 200, 440),
        ];
        let state = InventoryState::from_assets(&assets);

        assert_eq!(state.set_keys().len(), 2);

        let classes = state.get(&(730, AssetType::TradingCard)).unwrap();

        assert_eq!(classes.get(&100), Some(&2));
        assert_eq!(classes.get(&101), Some(&1));
    }

    #[test]
    fn detects_surplus() {
        let no_dupes = InventoryState::from_assets(&[card(1, 100, 730), card(2, 101, 730)]);
        let dupes = InventoryState::from_assets(&[card(1, 100, 730), card(2, 100, 730)]);

        assert!(!no_dupes.has_surplus());
        assert!(dupes.has_surplus());
        assert!(dupes.set_has_surplus(&(730, AssetType::TradingCard)));
        assert!(!dupes.set_has_surplus(&(440, AssetType::TradingCard)));
    }

    #[test]
    fn empty_inventory_produces_empty_state() {
        let state = InventoryState::from_assets(&[]);

        assert!(state.is_empty());
        assert!(!state.has_surplus());
    }
}
