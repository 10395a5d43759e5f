//! Sequential execution of async thunks.

use futures_util::future::BoxFuture;

/// A zero-argument async task, started only when the series reaches it.
pub type Thunk<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, T> + Send + 'a>;

/// Run thunks one after another.
///
/// Each thunk is invoked only after the previous one's future has completed,
/// so no two futures are ever in flight together. Results keep input order.
pub async fn run_series<'a, T, I>(thunks: I) -> Vec<T>
where
    I: IntoIterator<Item = Thunk<'a, T>>,
{
    let thunks = thunks.into_iter();
    let mut results = Vec::with_capacity(thunks.size_hint().0);
    for thunk in thunks {
        results.push(thunk().await);
    }
    results
}
