//! The captured-entity chain that gates dependent probe steps.

use std::collections::HashMap;

use serde_json::Value;

/// Logical resources created or observed during the dependent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Client,
    Site,
    SitePost,
    Guard,
    ShiftType,
    Assignment,
    Attendance,
}

impl Resource {
    pub fn label(self) -> &'static str {
        match self {
            Resource::Client => "client",
            Resource::Site => "site",
            Resource::SitePost => "site post",
            Resource::Guard => "guard",
            Resource::ShiftType => "shift type",
            Resource::Assignment => "assignment",
            Resource::Attendance => "attendance",
        }
    }
}

/// What was captured for a resource: an identifier from a create response,
/// or bare presence (check-in leaves no id behind).
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    Id(Value),
    Present,
}

/// Ephemeral map of resources captured in this run. A missing entry means
/// every step depending on it is skipped, never failed. Scoped to a single
/// run and discarded at exit.
#[derive(Debug, Default)]
pub struct EntityChain {
    captured: HashMap<Resource, Capture>,
}

impl EntityChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_id(&mut self, resource: Resource, id: Value) {
        self.captured.insert(resource, Capture::Id(id));
    }

    pub fn mark_present(&mut self, resource: Resource) {
        self.captured.insert(resource, Capture::Present);
    }

    pub fn contains(&self, resource: Resource) -> bool {
        self.captured.contains_key(&resource)
    }

    /// True only when every listed dependency was captured in this run.
    pub fn satisfied(&self, requires: &[Resource]) -> bool {
        requires.iter().all(|r| self.contains(*r))
    }

    /// The captured identifier as a JSON value, for request payloads.
    pub fn id_value(&self, resource: Resource) -> Option<&Value> {
        match self.captured.get(&resource)? {
            Capture::Id(id) => Some(id),
            Capture::Present => None,
        }
    }

    /// The captured identifier rendered for a URL path segment.
    pub fn path_id(&self, resource: Resource) -> Option<String> {
        Some(match self.id_value(resource)? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gating_requires_every_dependency() {
        let mut chain = EntityChain::new();
        chain.record_id(Resource::Guard, json!(1));
        chain.record_id(Resource::SitePost, json!(2));

        assert!(chain.satisfied(&[Resource::Guard, Resource::SitePost]));
        assert!(!chain.satisfied(&[
            Resource::Guard,
            Resource::SitePost,
            Resource::ShiftType
        ]));
        assert!(chain.satisfied(&[]));
    }

    #[test]
    fn test_presence_counts_for_gating_but_has_no_id() {
        let mut chain = EntityChain::new();
        chain.mark_present(Resource::Attendance);

        assert!(chain.contains(Resource::Attendance));
        assert!(chain.id_value(Resource::Attendance).is_none());
    }

    #[test]
    fn test_path_id_renders_without_quotes() {
        let mut chain = EntityChain::new();
        chain.record_id(Resource::Assignment, json!(99));
        chain.record_id(Resource::SitePost, json!("sp-7"));

        assert_eq!(chain.path_id(Resource::Assignment).as_deref(), Some("99"));
        assert_eq!(chain.path_id(Resource::SitePost).as_deref(), Some("sp-7"));
    }
}
