//! Skill domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use uuid::Uuid;

/// Fixed set of skill categories. Wire names match the stored values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum SkillCategory {
    #[serde(rename = "Web Development")]
    #[strum(serialize = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    #[strum(serialize = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "AI/ML & Data Science")]
    #[strum(serialize = "AI/ML & Data Science")]
    AiMlDataScience,
    #[serde(rename = "Backend Development")]
    #[strum(serialize = "Backend Development")]
    BackendDevelopment,
    #[serde(rename = "Database & Cloud")]
    #[strum(serialize = "Database & Cloud")]
    DatabaseCloud,
    #[serde(rename = "DevOps & Tools")]
    #[strum(serialize = "DevOps & Tools")]
    DevOpsTools,
    #[default]
    Other,
}

impl SkillCategory {
    /// Display glyph shown next to the category heading.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "🌐",
            Self::MobileDevelopment => "📱",
            Self::AiMlDataScience => "🤖",
            Self::BackendDevelopment => "⚙️",
            Self::DatabaseCloud => "☁️",
            Self::DevOpsTools => "🛠️",
            Self::Other => "📋",
        }
    }
}

/// A stored skill record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub skill_category: SkillCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillDraft {
    pub name: String,
    #[serde(default)]
    pub skill_category: SkillCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl SkillDraft {
    /// Creates a draft, auto-filling the icon URL for well-known skill
    /// names when none was given.
    pub fn new(name: impl Into<String>, skill_category: SkillCategory) -> Self {
        let name = name.into();
        let icon_url = known_icon_url(&name).map(str::to_string);
        Self {
            name,
            skill_category,
            icon_url,
            ..Default::default()
        }
    }
}

/// Partial-field patch for updating a skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_category: Option<SkillCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Groups skills by category, in category declaration order. Categories
/// with no skills are omitted.
pub fn group_by_category(skills: &[Skill]) -> Vec<(SkillCategory, Vec<&Skill>)> {
    SkillCategory::iter()
        .filter_map(|category| {
            let members: Vec<&Skill> = skills
                .iter()
                .filter(|skill| skill.skill_category == category)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((category, members))
            }
        })
        .collect()
}

macro_rules! devicon {
    ($slug:literal) => {
        concat!("https://cdn.jsdelivr.net/gh/devicons/devicon/icons/", $slug)
    };
}

/// Devicon URL for a well-known skill name, if one is on file.
pub fn known_icon_url(name: &str) -> Option<&'static str> {
    let url = match name {
        "JavaScript" => devicon!("javascript/javascript-original.svg"),
        "TypeScript" => devicon!("typescript/typescript-original.svg"),
        "React" | "React Native" => devicon!("react/react-original.svg"),
        "Vue.js" => devicon!("vuejs/vuejs-original.svg"),
        "Angular" => devicon!("angularjs/angularjs-original.svg"),
        "HTML5" => devicon!("html5/html5-original.svg"),
        "CSS3" => devicon!("css3/css3-original.svg"),
        "Tailwind CSS" => devicon!("tailwindcss/tailwindcss-plain.svg"),
        "Bootstrap" => devicon!("bootstrap/bootstrap-original.svg"),
        "Next.js" => devicon!("nextjs/nextjs-original.svg"),
        "Node.js" => devicon!("nodejs/nodejs-original.svg"),
        "Python" => devicon!("python/python-original.svg"),
        "Java" => devicon!("java/java-original.svg"),
        "PHP" => devicon!("php/php-original.svg"),
        "C#" => devicon!("csharp/csharp-original.svg"),
        "Go" => devicon!("go/go-original.svg"),
        "Rust" => devicon!("rust/rust-plain.svg"),
        "Flutter" => devicon!("flutter/flutter-original.svg"),
        "Dart" => devicon!("dart/dart-original.svg"),
        "Kotlin" => devicon!("kotlin/kotlin-original.svg"),
        "Swift" => devicon!("swift/swift-original.svg"),
        "MySQL" => devicon!("mysql/mysql-original.svg"),
        "PostgreSQL" => devicon!("postgresql/postgresql-original.svg"),
        "MongoDB" => devicon!("mongodb/mongodb-original.svg"),
        "Redis" => devicon!("redis/redis-original.svg"),
        "AWS" => devicon!("amazonwebservices/amazonwebservices-original.svg"),
        "Google Cloud" => devicon!("googlecloud/googlecloud-original.svg"),
        "Docker" => devicon!("docker/docker-original.svg"),
        "Kubernetes" => devicon!("kubernetes/kubernetes-plain.svg"),
        "Git" => devicon!("git/git-original.svg"),
        "GitHub" => devicon!("github/github-original.svg"),
        "GitLab" => devicon!("gitlab/gitlab-original.svg"),
        "Linux" => devicon!("linux/linux-original.svg"),
        "VS Code" => devicon!("vscode/vscode-original.svg"),
        _ => return None,
    };
    Some(url)
}
