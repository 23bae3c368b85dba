use proptest::prelude::*;

/// Strategy for `(max_attempts, failures)` where the action eventually succeeds
pub fn recoverable_budget_strategy() -> impl Strategy<Value = (u32, u32)> {
    (1u32..8).prop_flat_map(|max_attempts| (Just(max_attempts), 0..max_attempts))
}

/// Strategy for replication agent ids
pub fn agent_ids_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("publish-[a-z0-9]{1,8}", 1..6)
}

/// Strategy for repository item paths
pub fn item_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9_-]{1,12}", 1..5)
        .prop_map(|segments| format!("/content/dam/{}", segments.join("/")))
}
