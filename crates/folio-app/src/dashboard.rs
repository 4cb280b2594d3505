//! Dashboard reconciliation logic.
//!
//! Maintains the in-memory project and skill collections for the
//! management view and applies the minimal local edit matching each
//! successful mutation. A failed mutation leaves the collection exactly
//! as it was and surfaces the failure on the page banner; the active
//! form stays open so the user can retry without re-entering data.
//!
//! Collections are newest-first: `create` inserts at the front, so the
//! local collection always matches what a fresh list (ordered by
//! descending creation time) would return.

use folio_core::auth::Identity;
use folio_core::error::{FolioError, Result};
use folio_core::gateway::PortfolioGateway;
use folio_core::project::{Project, ProjectDraft, ProjectPatch};
use folio_core::skill::{Skill, SkillDraft, SkillPatch};
use std::sync::Arc;

/// State of a create/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    /// The add form is open.
    Creating,
    /// The edit form is open for the record with this id.
    Editing(i64),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// The management view's reconciliation core.
///
/// Single-writer: all mutations go through `&mut self`, so a collection
/// is only ever what the last successful gateway response implies, or
/// untouched after a failed attempt — never partially applied.
pub struct Dashboard {
    gateway: Arc<dyn PortfolioGateway>,
    owner: Identity,
    projects: Vec<Project>,
    skills: Vec<Skill>,
    loading: bool,
    banner: Option<String>,
    project_form: FormState,
    skill_form: FormState,
}

impl Dashboard {
    /// Creates an empty dashboard for the signed-in owner.
    pub fn new(gateway: Arc<dyn PortfolioGateway>, owner: Identity) -> Self {
        Self {
            gateway,
            owner,
            projects: Vec::new(),
            skills: Vec::new(),
            loading: false,
            banner: None,
            project_form: FormState::Closed,
            skill_form: FormState::Closed,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The page-level error banner, if one is showing.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn project_form(&self) -> FormState {
        self.project_form
    }

    pub fn skill_form(&self) -> FormState {
        self.skill_form
    }

    pub fn open_project_form(&mut self) {
        self.project_form = FormState::Creating;
    }

    pub fn edit_project(&mut self, id: i64) {
        self.project_form = FormState::Editing(id);
    }

    pub fn close_project_form(&mut self) {
        self.project_form = FormState::Closed;
    }

    pub fn open_skill_form(&mut self) {
        self.skill_form = FormState::Creating;
    }

    pub fn edit_skill(&mut self, id: i64) {
        self.skill_form = FormState::Editing(id);
    }

    pub fn close_skill_form(&mut self) {
        self.skill_form = FormState::Closed;
    }

    /// Loads both collections concurrently.
    ///
    /// The two list calls are issued together and awaited independently:
    /// one arm failing (or being slow) neither blocks nor cancels the
    /// other. A failed arm surfaces its error on the banner while the
    /// successful arm's collection is still replaced wholesale.
    pub async fn load_all(&mut self) {
        self.loading = true;
        let (projects, skills) =
            tokio::join!(self.gateway.list_projects(), self.gateway.list_skills());

        match projects {
            Ok(projects) => self.projects = projects,
            Err(err) => self.surface(&err),
        }
        match skills {
            Ok(skills) => self.skills = skills,
            Err(err) => self.surface(&err),
        }
        self.loading = false;
    }

    /// Creates a project owned by the current session's identity.
    ///
    /// On success the stored record is inserted at the front of the
    /// collection and the project form closes. On failure nothing
    /// changes except the banner.
    pub async fn create_project(&mut self, mut draft: ProjectDraft) -> Result<()> {
        draft.user_id = Some(self.owner.id);
        match self.gateway.create_project(draft).await {
            Ok(project) => {
                tracing::debug!(id = project.id, "project created");
                self.projects.insert(0, project);
                self.project_form = FormState::Closed;
                Ok(())
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// Updates a project, replacing the matching entry in place.
    pub async fn update_project(&mut self, id: i64, patch: ProjectPatch) -> Result<()> {
        match self.gateway.update_project(id, patch).await {
            Ok(updated) => {
                self.replace_project(updated)?;
                self.project_form = FormState::Closed;
                Ok(())
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// Deletes a project, removing the matching entry. Other entries keep
    /// their relative order.
    pub async fn delete_project(&mut self, id: i64) -> Result<()> {
        match self.gateway.delete_project(id).await {
            Ok(()) => {
                self.projects.retain(|p| p.id != id);
                Ok(())
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// Creates a skill owned by the current session's identity.
    pub async fn create_skill(&mut self, mut draft: SkillDraft) -> Result<()> {
        draft.user_id = Some(self.owner.id);
        match self.gateway.create_skill(draft).await {
            Ok(skill) => {
                tracing::debug!(id = skill.id, "skill created");
                self.skills.insert(0, skill);
                self.skill_form = FormState::Closed;
                Ok(())
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// Updates a skill, replacing the matching entry in place.
    pub async fn update_skill(&mut self, id: i64, patch: SkillPatch) -> Result<()> {
        match self.gateway.update_skill(id, patch).await {
            Ok(updated) => {
                self.replace_skill(updated)?;
                self.skill_form = FormState::Closed;
                Ok(())
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// Deletes a skill, removing the matching entry.
    pub async fn delete_skill(&mut self, id: i64) -> Result<()> {
        match self.gateway.delete_skill(id).await {
            Ok(()) => {
                self.skills.retain(|s| s.id != id);
                Ok(())
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    fn replace_project(&mut self, updated: Project) -> Result<()> {
        match self.projects.iter_mut().find(|p| p.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                Ok(())
            }
            None => Err(FolioError::not_found("project", updated.id.to_string())),
        }
    }

    fn replace_skill(&mut self, updated: Skill) -> Result<()> {
        match self.skills.iter_mut().find(|s| s.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                Ok(())
            }
            None => Err(FolioError::not_found("skill", updated.id.to_string())),
        }
    }

    fn surface(&mut self, err: &FolioError) {
        tracing::warn!(error = %err, "gateway call failed");
        self.banner = Some(err.surface_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use folio_core::skill::SkillCategory;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};
    use uuid::Uuid;

    fn owner() -> Identity {
        Identity::new(Uuid::nil(), "admin@example.com")
    }

    fn project(id: i64, title: &str) -> Project {
        Project {
            id,
            title: title.to_string(),
            description: String::new(),
            long_description: None,
            github_url: None,
            link_url: None,
            category: None,
            technologies: Vec::new(),
            images: Vec::new(),
            featured: false,
            project_status: Default::default(),
            project_type: Default::default(),
            client_name: None,
            start_date: None,
            end_date: None,
            user_id: Uuid::nil(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn skill(id: i64, name: &str) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            skill_category: SkillCategory::Other,
            description: None,
            icon_url: None,
            user_id: Uuid::nil(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    /// In-memory gateway double. `fail_with` makes every call fail with
    /// that message; drafts are recorded for owner-attachment assertions.
    #[derive(Default)]
    struct MockGateway {
        projects: Mutex<Vec<Project>>,
        skills: Mutex<Vec<Skill>>,
        fail_with: Mutex<Option<String>>,
        fail_projects_only: Mutex<bool>,
        last_project_draft: Mutex<Option<ProjectDraft>>,
        last_skill_draft: Mutex<Option<SkillDraft>>,
        next_id: AtomicI64,
    }

    impl MockGateway {
        fn with_records(projects: Vec<Project>, skills: Vec<Skill>) -> Self {
            Self {
                projects: Mutex::new(projects),
                skills: Mutex::new(skills),
                next_id: AtomicI64::new(100),
                ..Default::default()
            }
        }

        fn fail_with(&self, message: &str) {
            *self.fail_with.lock().unwrap() = Some(message.to_string());
        }

        fn check(&self) -> Result<()> {
            match self.fail_with.lock().unwrap().as_ref() {
                Some(message) => Err(FolioError::gateway(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl PortfolioGateway for MockGateway {
        async fn list_projects(&self) -> Result<Vec<Project>> {
            if *self.fail_projects_only.lock().unwrap() {
                return Err(FolioError::gateway("projects unavailable"));
            }
            self.check()?;
            Ok(self.projects.lock().unwrap().clone())
        }

        async fn create_project(&self, draft: ProjectDraft) -> Result<Project> {
            self.check()?;
            *self.last_project_draft.lock().unwrap() = Some(draft.clone());
            let mut stored = project(self.next_id.fetch_add(1, Ordering::SeqCst), &draft.title);
            stored.user_id = draft.user_id.unwrap_or_default();
            Ok(stored)
        }

        async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Project> {
            self.check()?;
            let projects = self.projects.lock().unwrap();
            let current = projects
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| FolioError::not_found("project", id.to_string()))?;
            let mut updated = current.clone();
            if let Some(title) = patch.title {
                updated.title = title;
            }
            if let Some(featured) = patch.featured {
                updated.featured = featured;
            }
            Ok(updated)
        }

        async fn delete_project(&self, _id: i64) -> Result<()> {
            self.check()
        }

        async fn list_skills(&self) -> Result<Vec<Skill>> {
            self.check()?;
            Ok(self.skills.lock().unwrap().clone())
        }

        async fn create_skill(&self, draft: SkillDraft) -> Result<Skill> {
            self.check()?;
            *self.last_skill_draft.lock().unwrap() = Some(draft.clone());
            let mut stored = skill(self.next_id.fetch_add(1, Ordering::SeqCst), &draft.name);
            stored.skill_category = draft.skill_category;
            stored.user_id = draft.user_id.unwrap_or_default();
            Ok(stored)
        }

        async fn update_skill(&self, id: i64, patch: SkillPatch) -> Result<Skill> {
            self.check()?;
            let skills = self.skills.lock().unwrap();
            let current = skills
                .iter()
                .find(|s| s.id == id)
                .ok_or_else(|| FolioError::not_found("skill", id.to_string()))?;
            let mut updated = current.clone();
            if let Some(name) = patch.name {
                updated.name = name;
            }
            Ok(updated)
        }

        async fn delete_skill(&self, _id: i64) -> Result<()> {
            self.check()
        }
    }

    fn dashboard(gateway: MockGateway) -> Dashboard {
        Dashboard::new(Arc::new(gateway), owner())
    }

    #[tokio::test]
    async fn test_load_all_populates_both_collections() {
        let gateway = MockGateway::with_records(
            vec![project(2, "newer"), project(1, "older")],
            vec![skill(10, "Go")],
        );
        let mut dash = dashboard(gateway);

        dash.load_all().await;

        assert_eq!(dash.projects().len(), 2);
        assert_eq!(dash.projects()[0].title, "newer");
        assert_eq!(dash.skills().len(), 1);
        assert!(dash.banner().is_none());
        assert!(!dash.is_loading());
    }

    #[tokio::test]
    async fn test_load_all_partial_failure_keeps_other_collection() {
        let gateway = MockGateway::with_records(Vec::new(), vec![skill(10, "Go")]);
        *gateway.fail_projects_only.lock().unwrap() = true;
        let mut dash = dashboard(gateway);

        dash.load_all().await;

        // The failing projects arm did not block the skills load.
        assert_eq!(dash.skills().len(), 1);
        assert!(dash.projects().is_empty());
        assert_eq!(dash.banner(), Some("projects unavailable"));
    }

    #[tokio::test]
    async fn test_create_skill_prepends_and_closes_form() {
        let gateway = MockGateway::with_records(Vec::new(), vec![skill(10, "Go")]);
        let mut dash = dashboard(gateway);
        dash.load_all().await;
        dash.open_skill_form();

        let draft = SkillDraft::new("Rust", SkillCategory::BackendDevelopment);
        dash.create_skill(draft).await.unwrap();

        assert_eq!(dash.skills().len(), 2);
        // Newest-first: the created record sorts first, as a fresh list would.
        assert_eq!(dash.skills()[0].name, "Rust");
        assert_eq!(dash.skills()[1].name, "Go");
        assert_eq!(dash.skill_form(), FormState::Closed);
    }

    #[tokio::test]
    async fn test_create_attaches_owner_id() {
        let gateway = Arc::new(MockGateway::with_records(Vec::new(), Vec::new()));
        let mut dash = Dashboard::new(gateway.clone(), owner());

        dash.create_skill(SkillDraft::new("Go", SkillCategory::BackendDevelopment))
            .await
            .unwrap();

        let draft = gateway.last_skill_draft.lock().unwrap().clone().unwrap();
        assert_eq!(draft.user_id, Some(owner().id));
    }

    #[tokio::test]
    async fn test_failed_create_leaves_everything_untouched() {
        let gateway = Arc::new(MockGateway::with_records(Vec::new(), vec![skill(10, "Go")]));
        let mut dash = Dashboard::new(gateway.clone(), owner());
        dash.load_all().await;
        dash.open_skill_form();
        gateway.fail_with("permission denied");

        let err = dash
            .create_skill(SkillDraft::new("Rust", SkillCategory::Other))
            .await
            .unwrap_err();

        assert_eq!(err.surface_message(), "permission denied");
        assert_eq!(dash.skills().len(), 1);
        // The form stays open so the user can retry without re-entering data.
        assert_eq!(dash.skill_form(), FormState::Creating);
        assert_eq!(dash.banner(), Some("permission denied"));
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let gateway = MockGateway::with_records(
            vec![project(3, "c"), project(2, "b"), project(1, "a")],
            Vec::new(),
        );
        let mut dash = dashboard(gateway);
        dash.load_all().await;
        dash.edit_project(2);

        let patch = ProjectPatch {
            title: Some("b2".to_string()),
            ..Default::default()
        };
        dash.update_project(2, patch).await.unwrap();

        // Position preserved, neighbors untouched.
        let titles: Vec<_> = dash.projects().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["c", "b2", "a"]);
        assert_eq!(dash.project_form(), FormState::Closed);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_collection_and_form() {
        let gateway = Arc::new(MockGateway::with_records(
            vec![project(7, "site")],
            Vec::new(),
        ));
        let mut dash = Dashboard::new(gateway.clone(), owner());
        dash.load_all().await;
        dash.edit_project(7);
        let before = dash.projects().to_vec();

        gateway.fail_with("permission denied");
        let patch = ProjectPatch {
            featured: Some(true),
            ..Default::default()
        };
        let err = dash.update_project(7, patch).await.unwrap_err();

        assert_eq!(err.surface_message(), "permission denied");
        assert_eq!(dash.projects(), &before[..]);
        // The edit form stays open for a retry.
        assert_eq!(dash.project_form(), FormState::Editing(7));
        assert_eq!(dash.banner(), Some("permission denied"));
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_record() {
        let gateway = MockGateway::with_records(
            vec![project(3, "c"), project(2, "b"), project(1, "a")],
            Vec::new(),
        );
        let mut dash = dashboard(gateway);
        dash.load_all().await;

        dash.delete_project(2).await.unwrap();

        let ids: Vec<_> = dash.projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, [3, 1]);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_collection() {
        let gateway = Arc::new(MockGateway::with_records(
            vec![project(7, "site")],
            Vec::new(),
        ));
        let mut dash = Dashboard::new(gateway.clone(), owner());
        dash.load_all().await;

        gateway.fail_with("permission denied");
        let err = dash.delete_project(7).await.unwrap_err();

        assert_eq!(err.surface_message(), "permission denied");
        assert_eq!(dash.projects().len(), 1);
        assert_eq!(dash.banner(), Some("permission denied"));
    }

    #[tokio::test]
    async fn test_dismiss_banner() {
        let gateway = MockGateway::default();
        gateway.fail_with("boom");
        let mut dash = dashboard(gateway);
        dash.load_all().await;
        assert!(dash.banner().is_some());

        dash.dismiss_banner();
        assert!(dash.banner().is_none());
    }
}
