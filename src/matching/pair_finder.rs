//! The greedy pair-finder. Operates on the per-class counts of a single set, swapping one of
//! our surplus duplicates for one of their classes we are missing, until no further swap
//! strictly improves our distribution.

use crate::types::{Amount, ClassId};
use std::collections::HashMap;

/// Finds exchange pairs within a single set and applies them to the local states.
///
/// Our classes are visited most-duplicated first; for each, their classes are visited in
/// ascending order of how many we already hold. A pair `(ours, theirs)` is accepted iff our
/// count of `ours` exceeds our count of `theirs` by at least two, which guarantees the swap
/// strictly reduces the imbalance of the set. `class_id` breaks ties on both sides so a run
/// is deterministic.
///
/// Accepted pairs are recorded in `give` and `take`, mirrored into `ours`/`theirs`, and add
/// two to `items_in_trade`. Stops when no pair is accepted or the trade is one item short of
/// `max_items_per_trade`.
///
/// Returns whether any pair was accepted.
pub(crate) fn match_set(
    ours: &mut HashMap<ClassId, Amount>,
    theirs: &mut HashMap<ClassId, Amount>,
    give: &mut HashMap<ClassId, Amount>,
    take: &mut HashMap<ClassId, Amount>,
    items_in_trade: &mut usize,
    max_items_per_trade: usize,
) -> bool {
    let mut matched_any = false;

    'searching: while *items_in_trade < max_items_per_trade.saturating_sub(1) {
        let mut our_surplus = ours
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(classid, count)| (*classid, *count))
            .collect::<Vec<_>>();

        // Trade away the most-duplicated classes first.
        our_surplus.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut their_classes = theirs.keys().copied().collect::<Vec<_>>();

        // Prefer the classes we hold the least of.
        their_classes.sort_unstable_by_key(|classid| (ours.get(classid).copied().unwrap_or(0), *classid));

        for (our_classid, our_count) in our_surplus {
            for their_classid in their_classes.iter().copied() {
                let our_count_of_theirs = ours.get(&their_classid).copied().unwrap_or(0);

                if our_count <= our_count_of_theirs + 1 {
                    continue;
                }

                *give.entry(our_classid).or_insert(0) += 1;
                *take.entry(their_classid).or_insert(0) += 1;

                if let Some(count) = ours.get_mut(&our_classid) {
                    *count -= 1;
                }

                *ours.entry(their_classid).or_insert(0) += 1;

                if let Some(count) = theirs.get_mut(&their_classid) {
                    *count -= 1;

                    if *count == 0 {
                        theirs.remove(&their_classid);
                    }
                }

                *items_in_trade += 2;
                matched_any = true;

                continue 'searching;
            }
        }

        break;
    }

    matched_any
}
