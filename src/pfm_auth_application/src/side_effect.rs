use std::fmt::Display;
use std::future::Future;

/// What became of an auxiliary write that rides along a primary operation.
///
/// The value never reaches callers of the use cases: a failed side effect is
/// logged and the primary result stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    Applied,
    Failed,
}

/// Awaits `effect` and swallows its error after logging it.
pub async fn best_effort<T, E, F>(action: &'static str, effect: F) -> SideEffect
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match effect.await {
        Ok(_) => {
            tracing::debug!(action, "Auxiliary write applied");
            SideEffect::Applied
        }
        Err(error) => {
            tracing::error!(action, error = %error, "Auxiliary write failed");
            SideEffect::Failed
        }
    }
}
