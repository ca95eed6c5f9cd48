/// Read side used by the traffic redirector to look names up.
pub trait NameMatcher: Send + Sync {
    /// Returns Some(list_index) of the first list holding `domain`, None otherwise.
    ///
    /// Matching is exact: case-insensitive and ignoring one trailing dot, but
    /// a subdomain of a listed name does not match.
    fn check(&self, domain: &str) -> Option<usize>;
}
