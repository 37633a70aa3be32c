//! Option types for the matching pipeline

/// Options controlling how the match is applied
///
/// Grayscale routing defaults to off and is only enabled explicitly by the
/// caller.
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    /// Route the source through a grayscale copy before table application
    ///
    /// The lookup table is still built from the original color channels, so
    /// this produces a tri-tone remap of the grayscale image rather than a
    /// true color match.
    pub grayscale: bool,
}
