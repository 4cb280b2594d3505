//! Abstract gateway traits for the remote persistence service.
//!
//! Defines the contract between the reconciliation logic and whatever
//! backend stores the records, decoupling the application layer from the
//! specific service (hosted API, test double, ...).

use crate::error::Result;
use crate::project::{Project, ProjectDraft, ProjectPatch};
use crate::skill::{Skill, SkillDraft, SkillPatch};
use async_trait::async_trait;

/// CRUD access to the two top-level record collections.
///
/// A pure passthrough: one remote call per operation, no retries and no
/// local validation. Any service-level failure (network, constraint
/// violation, auth rejection) comes back as an `Err` carrying the
/// service's human-readable message.
#[async_trait]
pub trait PortfolioGateway: Send + Sync {
    /// Returns all projects, newest first (`created_at` descending).
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Inserts one project and returns the stored record, including the
    /// service-assigned id and timestamp.
    async fn create_project(&self, draft: ProjectDraft) -> Result<Project>;

    /// Applies a partial-field patch and returns the updated record.
    async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Project>;

    /// Deletes a project. Success carries no payload.
    async fn delete_project(&self, id: i64) -> Result<()>;

    /// Returns all skills, newest first.
    async fn list_skills(&self) -> Result<Vec<Skill>>;

    /// Inserts one skill and returns the stored record.
    async fn create_skill(&self, draft: SkillDraft) -> Result<Skill>;

    /// Applies a partial-field patch and returns the updated record.
    async fn update_skill(&self, id: i64, patch: SkillPatch) -> Result<Skill>;

    /// Deletes a skill. Success carries no payload.
    async fn delete_skill(&self, id: i64) -> Result<()>;
}

/// Binary object storage passthrough.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads bytes to `bucket` at `path`, returning the stored object key.
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<String>;

    /// Resolves the public URL for an object. Purely local string
    /// formatting; does not verify the object exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
