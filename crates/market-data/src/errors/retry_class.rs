/// Classification for retry policy.
///
/// Used to determine how [`RetryPolicy`](crate::retry::RetryPolicy) should
/// respond to errors from a price source.
///
/// # Behavior Summary
///
/// | Class | Re-attempt? |
/// |-------|-------------|
/// | `Never` | No |
/// | `Retry` | Yes, after the configured delay |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, missing configuration, or terminal failure.
    /// The request is fundamentally invalid and retrying won't help.
    Never,

    /// Re-attempt the operation.
    ///
    /// Used for transient errors like rate limiting (429), timeout, or a
    /// dropped connection. The retry policy sleeps between attempts and,
    /// when unbounded, keeps going until the operation succeeds or the
    /// caller cancels the task.
    Retry,
}
