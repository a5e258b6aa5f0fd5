use std::future::Future;

/// Outcome of a candidate list in which nothing succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Exhausted<E> {
    pub attempts: usize,
    pub last_error: Option<E>,
}

/// Tries each candidate in order and returns the first success.
///
/// Candidates after the first success are never attempted. When every
/// attempt fails, the error of the last one is kept for diagnostics.
pub async fn first_success<'a, C, T, E, F, Fut>(
    candidates: &'a [C],
    mut attempt: F,
) -> Result<T, Exhausted<E>>
where
    F: FnMut(&'a C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last_error = None;
    let mut attempts = 0;

    for candidate in candidates {
        attempts += 1;
        match attempt(candidate).await {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }
    }

    Err(Exhausted {
        attempts,
        last_error,
    })
}
