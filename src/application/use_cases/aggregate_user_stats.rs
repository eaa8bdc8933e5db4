use crate::domain::{OrgStatsByUser, UserCommits};

/// Folds the by-user view of the snapshot into one total per user.
///
/// Pure function: no I/O and no failure mode. A user whose record list is
/// empty yields a zeroed entry rather than an error. Output follows the
/// input map's iteration order (ascending username); callers wanting a
/// different order sort downstream.
pub fn aggregate_user_commits(by_user: &OrgStatsByUser) -> Vec<UserCommits> {
    by_user
        .iter()
        .map(|(username, records)| {
            let mut totals = UserCommits::zero(username.clone());
            for record in records {
                totals.total_commits += record.total_commits;
                totals.total_additions += record.total_additions;
                totals.total_deletions += record.total_deletions;
            }
            totals
        })
        .collect()
}
