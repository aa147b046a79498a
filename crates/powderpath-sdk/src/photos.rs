//! Photo enrichment for recently used locations.

use std::future::Future;

use powderpath_core::{LatLng, RecentLocation};

use crate::cancel::{CancelToken, Cancelled};
use crate::pool::run_bounded;

/// Place lookup backend used to attach photos.
pub trait PlaceLookup {
    /// Photo URL for the best text match near `near`.
    fn find_photo_by_query(&self, query: &str, near: LatLng) -> impl Future<Output = Option<String>>;

    /// Photo URL for the closest place to `near`.
    fn find_nearby_photo(&self, near: LatLng) -> impl Future<Output = Option<String>>;
}

/// Attach a photo to each location: a named search first, then a nearby
/// search. Any previous photo is replaced; misses leave `photo_url` empty.
pub async fn enrich_recent_with_photos<L: PlaceLookup>(
    items: Vec<RecentLocation>,
    places: &L,
    workers: usize,
    cancel: &CancelToken,
) -> Result<Vec<RecentLocation>, Cancelled> {
    run_bounded(items, workers, cancel, move |mut item: RecentLocation| async move {
        let near = LatLng::new(item.lat, item.lng);
        let mut photo = None;
        if let Some(name) = item.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            photo = places.find_photo_by_query(name, near).await;
        }
        if photo.is_none() && near.is_finite() {
            photo = places.find_nearby_photo(near).await;
        }
        item.photo_url = photo;
        item
    })
    .await
}
