use crate::rating::Rated;

/// Reduces one item's ratings to `(item, mean rating)`.
///
/// An absent group is the same thing as an empty one, and both average to
/// exactly `0.0`. Callers that need to tell "no ratings" apart from a real
/// mean of zero have to track that themselves.
///
/// The signature matches [`ReduceFn`](crate::worker::ReduceFn), so
/// `average_rating::<Rating>` can be handed straight to a worker.
pub fn average_rating<R: Rated>(item: i32, ratings: Option<Vec<R>>) -> (i32, f64) {
    let ratings = ratings.unwrap_or_default();
    if ratings.is_empty() {
        return (item, 0.0);
    }

    let mut sum = 0.0;
    for rating in &ratings {
        sum += rating.rating();
    }

    (item, sum / ratings.len() as f64)
}
