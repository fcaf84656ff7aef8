/*
 * Responsibility
 * - DTO の公開と、request DTO 共通の Validate trait
 */
pub mod posts;

/// Shape checks that serde cannot express (blank strings etc.).
pub trait Validate {
    fn validate(&self) -> Result<(), &'static str>;
}
