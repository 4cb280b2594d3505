//! PostgREST-backed record gateway.
//!
//! Implements [`PortfolioGateway`] over the `/rest/v1` table endpoints.
//! Every operation is a single request; failures surface the service's
//! message untouched. Pure passthrough: no retries, no validation.

use crate::client::{SupabaseClient, response_error, transport_error};
use async_trait::async_trait;
use folio_core::error::{FolioError, Result};
use folio_core::gateway::PortfolioGateway;
use folio_core::project::{Project, ProjectDraft, ProjectPatch};
use folio_core::skill::{Skill, SkillDraft, SkillPatch};
use serde::Serialize;
use serde::de::DeserializeOwned;

const PROJECTS_TABLE: &str = "projects";
const SKILLS_TABLE: &str = "skills";

/// Query string for a full-collection fetch, newest first.
pub(crate) fn list_query() -> [(&'static str, &'static str); 2] {
    [("select", "*"), ("order", "created_at.desc")]
}

/// Query string addressing a single row by id.
pub(crate) fn id_filter(id: i64) -> (&'static str, String) {
    ("id", format!("eq.{id}"))
}

impl SupabaseClient {
    async fn list_rows<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let request = self.http.get(self.rest_url(table)).query(&list_query());
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        response.json().await.map_err(transport_error)
    }

    async fn insert_row<T, D>(&self, table: &str, draft: &D) -> Result<T>
    where
        T: DeserializeOwned,
        D: Serialize + Sync,
    {
        // PostgREST takes a row array and, with return=representation,
        // answers with the inserted rows.
        let request = self
            .http
            .post(self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(&[draft]);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        let mut rows: Vec<T> = response.json().await.map_err(transport_error)?;
        rows.pop()
            .ok_or_else(|| FolioError::gateway("insert returned no row"))
    }

    async fn update_row<T, P>(&self, table: &'static str, id: i64, patch: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + Sync,
    {
        let request = self
            .http
            .patch(self.rest_url(table))
            .query(&[id_filter(id)])
            .header("Prefer", "return=representation")
            .json(patch);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        let mut rows: Vec<T> = response.json().await.map_err(transport_error)?;
        rows.pop()
            .ok_or_else(|| FolioError::not_found(table, id.to_string()))
    }

    async fn delete_row(&self, table: &str, id: i64) -> Result<()> {
        let request = self
            .http
            .delete(self.rest_url(table))
            .query(&[id_filter(id)]);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioGateway for SupabaseClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.list_rows(PROJECTS_TABLE).await
    }

    async fn create_project(&self, draft: ProjectDraft) -> Result<Project> {
        self.insert_row(PROJECTS_TABLE, &draft).await
    }

    async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Project> {
        self.update_row(PROJECTS_TABLE, id, &patch).await
    }

    async fn delete_project(&self, id: i64) -> Result<()> {
        self.delete_row(PROJECTS_TABLE, id).await
    }

    async fn list_skills(&self) -> Result<Vec<Skill>> {
        self.list_rows(SKILLS_TABLE).await
    }

    async fn create_skill(&self, draft: SkillDraft) -> Result<Skill> {
        self.insert_row(SKILLS_TABLE, &draft).await
    }

    async fn update_skill(&self, id: i64, patch: SkillPatch) -> Result<Skill> {
        self.update_row(SKILLS_TABLE, id, &patch).await
    }

    async fn delete_skill(&self, id: i64) -> Result<()> {
        self.delete_row(SKILLS_TABLE, id).await
    }
}
