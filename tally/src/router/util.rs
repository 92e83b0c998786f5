use tally_core::{Capability, TallyError};

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with the same deadline handling
/// as a single reconciliation. On timeout the whole batch fails with
/// `TallyError::RequestTimeout` for `capability`; partial results are dropped.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    capability: Capability,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, TallyError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, capability, futures::future::join_all(tasks))
        .await
}

/// Collapse a set of source errors into a uniform `TallyError` outcome.
///
/// `reconcile` calls this once per half, so a reconciliation reports history
/// and total failures separately, each labelled with its own capability.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `SourceTimeout` → `AllSourcesTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllSourcesFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<TallyError>,
    not_found_what: Option<String>,
) -> TallyError {
    if !attempted_any {
        return TallyError::unsupported(capability.to_string());
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, TallyError::SourceTimeout { .. }))
    {
        return TallyError::AllSourcesTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, TallyError::NotFound { .. }))
    {
        return TallyError::not_found(what);
    }
    TallyError::AllSourcesFailed(errors)
}
