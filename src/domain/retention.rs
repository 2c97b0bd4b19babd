//! Retention policy: which assets fall outside the cap

use super::release::Asset;

/// Assets to delete so that at most `max_assets` remain
///
/// Oldest first by `updated_at`; equal timestamps fall back to id order.
pub fn select_oldest(assets: &[Asset], max_assets: usize) -> Vec<Asset> {
    if assets.len() <= max_assets {
        return Vec::new();
    }
    let mut sorted = assets.to_vec();
    sorted.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).then(a.id.cmp(&b.id)));
    sorted.truncate(assets.len() - max_assets);
    sorted
}
