//! Last-write-wins arbitration between two candidate documents.

use crate::models::TravelPlan;

/// Pick the newer of two whole documents by their `lastUpdated` stamp.
///
/// The local document wins ties, so re-applying an equal-or-older remote
/// snapshot (a stale poll completing out of order) is a no-op. This is a
/// whole-document replace, not a field merge: concurrent edits on different
/// items lose one edit set silently.
#[must_use]
pub fn merge(remote: TravelPlan, local: TravelPlan) -> TravelPlan {
    let remote_stamp = remote.last_updated.unwrap_or(0);
    let local_stamp = local.last_updated.unwrap_or(0);

    if remote_stamp > local_stamp {
        remote
    } else {
        local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plan_with_stamp(hero: &str, stamp: Option<i64>) -> TravelPlan {
        let mut plan = TravelPlan::initial();
        plan.hero_image = hero.to_string();
        plan.last_updated = stamp;
        plan
    }

    #[test]
    fn newer_remote_wins() {
        let remote = plan_with_stamp("remote", Some(200));
        let local = plan_with_stamp("local", Some(100));
        assert_eq!(merge(remote.clone(), local), remote);
    }

    #[test]
    fn newer_local_wins() {
        let remote = plan_with_stamp("remote", Some(100));
        let local = plan_with_stamp("local", Some(200));
        assert_eq!(merge(remote, local.clone()), local);
    }

    #[test]
    fn local_wins_ties() {
        let remote = plan_with_stamp("remote", Some(100));
        let local = plan_with_stamp("local", Some(100));
        assert_eq!(merge(remote, local.clone()), local);
    }

    #[test]
    fn missing_stamp_counts_as_zero() {
        let remote = plan_with_stamp("remote", Some(1));
        let local = plan_with_stamp("local", None);
        assert_eq!(merge(remote.clone(), local), remote);

        let remote = plan_with_stamp("remote", None);
        let local = plan_with_stamp("local", None);
        assert_eq!(merge(remote, local.clone()), local);
    }

    #[test]
    fn merge_is_idempotent() {
        let plan = plan_with_stamp("same", Some(42));
        assert_eq!(merge(plan.clone(), plan.clone()), plan);
    }
}
