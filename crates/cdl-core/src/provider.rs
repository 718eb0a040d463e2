//! Descriptor extraction seam.
//!
//! Turning a course page into a `CourseDescriptor` (HTML scraping,
//! metadata extraction) is an external collaborator's job; the core only
//! depends on this trait.

use anyhow::Result;
use async_trait::async_trait;

use crate::course::CourseDescriptor;

/// Resolves a course URL into its pre-parsed descriptor.
#[async_trait]
pub trait CourseProvider: Send + Sync {
    async fn fetch_course(&self, url: &str) -> Result<CourseDescriptor>;
}
