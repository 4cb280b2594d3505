//! Command implementations.
//!
//! Each invocation is one session: the store resolves against the remote
//! provider at startup, and mutating commands sign in with credentials
//! from `FOLIO_EMAIL` / `FOLIO_PASSWORD` before touching the dashboard.

use anyhow::{Context, Result, bail};
use folio_app::{Dashboard, SessionStore};
use folio_core::config::FolioConfig;
use folio_core::guard::{self, RouteDecision};
use folio_core::project::ProjectDraft;
use folio_core::route::Route;
use folio_core::skill::{SkillCategory, SkillDraft, group_by_category};
use folio_core::{AuthState, Identity};
use folio_supabase::SupabaseClient;
use std::str::FromStr;
use std::sync::Arc;

const EMAIL_VAR: &str = "FOLIO_EMAIL";
const PASSWORD_VAR: &str = "FOLIO_PASSWORD";

fn client() -> Result<Arc<SupabaseClient>> {
    let config = FolioConfig::from_env().context("cannot start without backend configuration")?;
    Ok(Arc::new(SupabaseClient::new(config)))
}

async fn store(client: Arc<SupabaseClient>) -> SessionStore {
    SessionStore::initialize(client).await
}

/// Signs in with environment credentials and waits for the session store
/// to observe the change event.
async fn sign_in_from_env(store: &SessionStore) -> Result<Identity> {
    let email = std::env::var(EMAIL_VAR).with_context(|| format!("{EMAIL_VAR} is not set"))?;
    let password =
        std::env::var(PASSWORD_VAR).with_context(|| format!("{PASSWORD_VAR} is not set"))?;
    let identity = store
        .sign_in(&email, &password)
        .await
        .map_err(|err| anyhow::anyhow!(err.surface_message()))?;

    let mut state = store.watch();
    state
        .wait_for(AuthState::is_signed_in)
        .await
        .context("session store never observed the sign-in")?;
    Ok(identity)
}

/// Builds a dashboard for the management view, enforcing the
/// authenticated-area guard.
async fn open_dashboard(client: Arc<SupabaseClient>, store: &SessionStore) -> Result<Dashboard> {
    if !store.state().is_signed_in() {
        sign_in_from_env(store).await?;
    }
    let state = store.state();
    match guard::resolve(Route::Dashboard, &state) {
        RouteDecision::Render => {}
        RouteDecision::Redirect(route) => bail!("not signed in (redirected to {})", route.path()),
        RouteDecision::Loading => bail!("session state is still unresolved"),
    }
    let Some(identity) = state.identity().cloned() else {
        bail!("not signed in");
    };
    let mut dashboard = Dashboard::new(client, identity);
    dashboard.load_all().await;
    if let Some(banner) = dashboard.banner() {
        tracing::warn!(banner, "initial load reported an error");
    }
    Ok(dashboard)
}

pub async fn login(email: &str) -> Result<()> {
    let client = client()?;
    let store = store(client).await;
    let password =
        std::env::var(PASSWORD_VAR).with_context(|| format!("{PASSWORD_VAR} is not set"))?;
    let identity = store
        .sign_in(email, &password)
        .await
        .map_err(|err| anyhow::anyhow!(err.surface_message()))?;
    println!("signed in as {} ({})", identity.email, identity.id);
    Ok(())
}

pub async fn whoami() -> Result<()> {
    let client = client()?;
    let store = store(client).await;
    match store.state() {
        AuthState::Authenticated(identity) => {
            println!("signed in as {} ({})", identity.email, identity.id)
        }
        AuthState::Anonymous => println!("not signed in"),
        AuthState::Unresolved => println!("session unresolved"),
    }
    Ok(())
}

pub async fn project_list() -> Result<()> {
    let client = client()?;
    let store = store(client.clone()).await;
    let dashboard = open_dashboard(client, &store).await?;
    for project in dashboard.projects() {
        let featured = if project.featured { " [featured]" } else { "" };
        println!(
            "#{:<4} {}{} - {} ({})",
            project.id,
            project.title,
            featured,
            project.description,
            project.project_status
        );
        if !project.technologies.is_empty() {
            println!("      tech: {}", project.technologies.join(", "));
        }
    }
    println!("{} project(s)", dashboard.projects().len());
    Ok(())
}

pub async fn project_add(
    title: String,
    description: String,
    technologies: Option<String>,
    featured: bool,
) -> Result<()> {
    let client = client()?;
    let store = store(client.clone()).await;
    let mut dashboard = open_dashboard(client, &store).await?;

    let draft = ProjectDraft {
        title,
        description,
        technologies: split_list(technologies.as_deref()),
        featured,
        ..Default::default()
    };
    dashboard
        .create_project(draft)
        .await
        .map_err(|err| anyhow::anyhow!(err.surface_message()))?;
    let created = &dashboard.projects()[0];
    println!("created project #{} '{}'", created.id, created.title);
    Ok(())
}

pub async fn project_rm(id: i64) -> Result<()> {
    let client = client()?;
    let store = store(client.clone()).await;
    let mut dashboard = open_dashboard(client, &store).await?;
    dashboard
        .delete_project(id)
        .await
        .map_err(|err| anyhow::anyhow!(err.surface_message()))?;
    println!("deleted project #{id}");
    Ok(())
}

pub async fn skill_list() -> Result<()> {
    let client = client()?;
    let store = store(client.clone()).await;
    let dashboard = open_dashboard(client, &store).await?;
    for (category, skills) in group_by_category(dashboard.skills()) {
        println!("{} {} ({})", category.glyph(), category, skills.len());
        for skill in skills {
            match &skill.description {
                Some(description) => println!("  #{:<4} {} - {}", skill.id, skill.name, description),
                None => println!("  #{:<4} {}", skill.id, skill.name),
            }
        }
    }
    println!("{} skill(s)", dashboard.skills().len());
    Ok(())
}

pub async fn skill_add(name: String, category: String) -> Result<()> {
    let client = client()?;
    let store = store(client.clone()).await;
    let mut dashboard = open_dashboard(client, &store).await?;

    let category = SkillCategory::from_str(&category)
        .map_err(|_| anyhow::anyhow!("unknown category '{category}'"))?;
    let draft = SkillDraft::new(name, category);
    dashboard
        .create_skill(draft)
        .await
        .map_err(|err| anyhow::anyhow!(err.surface_message()))?;
    let created = &dashboard.skills()[0];
    println!("created skill #{} '{}'", created.id, created.name);
    Ok(())
}

pub async fn skill_rm(id: i64) -> Result<()> {
    let client = client()?;
    let store = store(client.clone()).await;
    let mut dashboard = open_dashboard(client, &store).await?;
    dashboard
        .delete_skill(id)
        .await
        .map_err(|err| anyhow::anyhow!(err.surface_message()))?;
    println!("deleted skill #{id}");
    Ok(())
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
