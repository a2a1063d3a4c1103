/// Sensitive-data masking for SQL text headed to storage or display.
///
/// Implementations never fail: on internal error they degrade according to
/// their configured policy and log.
pub trait ISqlMasker: Send + Sync {
    /// Mask every sensitive value in `sql`.
    fn mask(&self, sql: &str) -> String;

    /// Whether `sql` contains any detectable sensitive value.
    fn contains_sensitive(&self, sql: &str) -> bool;
}
