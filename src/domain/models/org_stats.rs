use std::collections::BTreeMap;

use crate::domain::ContributorStat;

/// Organization-wide snapshot: repository name to the contributors of that
/// repository. Replaced wholesale on every refresh, never patched.
///
/// A `BTreeMap` keeps assembly deterministic by repository name regardless
/// of fetch completion order, which also makes the serialized cache value
/// byte-identical across refreshes over unchanged data.
pub type OrgStats = BTreeMap<String, Vec<ContributorStat>>;

/// The same facts as [`OrgStats`], re-keyed by username: each user maps to
/// one record per repository they contributed to.
pub type OrgStatsByUser = BTreeMap<String, Vec<ContributorStat>>;

/// Re-keys an [`OrgStats`] snapshot by username.
///
/// Pure transform, no I/O. Each user's records are ordered by repository
/// name (the iteration order of the input map).
pub fn group_by_user(stats: &OrgStats) -> OrgStatsByUser {
    let mut by_user = OrgStatsByUser::new();

    for contributors in stats.values() {
        for stat in contributors {
            by_user
                .entry(stat.username.clone())
                .or_default()
                .push(stat.clone());
        }
    }

    by_user
}
