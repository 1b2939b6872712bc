//! Data models for the portfolio store
//!
//! Defines the single record type kept in the `projects` store.

use serde::{Deserialize, Serialize};

/// Store-assigned project key
pub type ProjectId = i64;

/// A portfolio project
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Unique key, assigned by the store on first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,
    /// Display title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Ordered tag labels
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Project {
    /// Create an unsaved project with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style tag setter, keeping only the first occurrence of each tag
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    /// Update the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Update the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Remove a tag
    pub fn remove_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        }
    }

    /// Set all tags (replacing existing)
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Exact tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match on title, description or any tag
    ///
    /// An empty term matches every project.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_new() {
        let project = Project::new("Weather dashboard");
        assert_eq!(project.title, "Weather dashboard");
        assert!(project.id.is_none());
        assert!(project.description.is_empty());
        assert!(project.tags.is_empty());
    }

    #[test]
    fn test_project_builders() {
        let project = Project::new("Portfolio site")
            .with_description("Static site generator output")
            .with_tags(["web", "rust", "web"]);

        assert_eq!(project.description, "Static site generator output");
        assert_eq!(project.tags, vec!["web", "rust"]);
    }

    #[test]
    fn test_project_tags() {
        let mut project = Project::new("CLI");
        project.add_tag("rust");
        project.add_tag("tooling");
        assert_eq!(project.tags, vec!["rust", "tooling"]);

        // Adding duplicate should not add again
        project.add_tag("rust");
        assert_eq!(project.tags.len(), 2);

        project.remove_tag("rust");
        assert_eq!(project.tags, vec!["tooling"]);

        project.set_tags(vec!["new-tag".to_string()]);
        assert_eq!(project.tags, vec!["new-tag"]);
    }

    #[test]
    fn test_has_tag_is_exact() {
        let project = Project::new("Chat").with_tags(["javascript"]);
        assert!(project.has_tag("javascript"));
        assert!(!project.has_tag("java"));
        assert!(!project.has_tag("JavaScript"));
    }

    #[test]
    fn test_matches_each_field() {
        let project = Project::new("Recipe Finder")
            .with_description("Search meals by INGREDIENT")
            .with_tags(["React", "api"]);

        assert!(project.matches("recipe"));
        assert!(project.matches("ingredient"));
        assert!(project.matches("REACT"));
        assert!(project.matches("ap"));
        assert!(!project.matches("vue"));
    }

    #[test]
    fn test_matches_empty_term() {
        assert!(Project::new("").matches(""));
        assert!(Project::new("Anything").matches(""));
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Tracker").with_tags(["finance"]);
        project.set_description("Budget tracking");

        let json = serde_json::to_string(&project).unwrap();
        assert!(!json.contains("\"id\""));

        project.id = Some(7);
        let json = serde_json::to_string(&project).unwrap();
        let deserialized: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(project, deserialized);
    }
}
