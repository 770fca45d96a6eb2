use chrono::Local;

use crate::role::{Group, PromptRole};

/// Owner of the in-memory role collection and the current selection.
///
/// All mutation funnels through the methods below; the collection is never
/// persisted across sessions. `current` may reference a record that is not
/// (or not yet) in `roles`, e.g. the placeholder after the last delete.
#[derive(Debug, Clone)]
pub struct RoleStore {
    pub roles: Vec<PromptRole>,
    pub current: PromptRole,
}

impl Default for RoleStore {
    fn default() -> Self {
        let roles = seed_roles();
        let current = roles[0].clone();
        Self { roles, current }
    }
}

impl RoleStore {
    /// Makes the record with `slug` current. Returns false (selection
    /// unchanged) when no record carries that slug.
    pub fn select(&mut self, slug: &str) -> bool {
        match self.roles.iter().find(|r| r.slug.as_deref() == Some(slug)) {
            Some(role) => {
                self.current = role.clone();
                true
            }
            None => false,
        }
    }

    /// Appends a fresh record with a timestamp-derived slug and makes it
    /// current. The caller is expected to mark the form dirty so switching
    /// away tries to persist the new record.
    pub fn add_role(&mut self) -> PromptRole {
        let role = PromptRole {
            slug: Some(format!("new-prompt-{}", Local::now().timestamp_millis())),
            name: Some("New Prompt".to_string()),
            role_definition: Some(String::new()),
            custom_instructions: Some(String::new()),
            groups: Some(Vec::new()),
        };
        self.roles.push(role.clone());
        self.current = role.clone();
        role
    }

    /// Removes the record with `slug`. The first remaining record becomes
    /// current; when the collection empties, current becomes a placeholder
    /// that is not part of the collection.
    pub fn delete_role(&mut self, slug: &str) {
        self.roles.retain(|r| r.slug.as_deref() != Some(slug));
        self.current = match self.roles.first() {
            Some(role) => role.clone(),
            None => PromptRole::placeholder(),
        };
    }

    /// Replaces the record whose slug equals the pre-edit current slug with
    /// `data` and makes `data` current.
    pub fn save_current(&mut self, data: PromptRole) {
        let key = self.current.slug.clone();
        for role in &mut self.roles {
            if role.slug == key {
                *role = data.clone();
            }
        }
        self.current = data;
    }

    /// Commits an import: the merged collection replaces `roles` wholesale
    /// and the first record of the imported batch becomes current.
    pub fn apply_import(&mut self, merged: Vec<PromptRole>, first_imported: PromptRole) {
        self.roles = merged;
        self.current = first_imported;
    }

    /// Index of the current record in the collection, if it is in there.
    pub fn current_index(&self) -> Option<usize> {
        self.roles.iter().position(|r| r.slug == self.current.slug)
    }
}

/// The two roles the dashboard starts with.
fn seed_roles() -> Vec<PromptRole> {
    vec![
        PromptRole {
            slug: Some("roo-commander".to_string()),
            name: Some("👑 Roo Commander".to_string()),
            role_definition: Some(
                "You are Roo Chief Executive, the highest-level coordinator for software \
                 development projects. You understand goals, delegate tasks, manage state via \
                 the project journal, and ensure project success."
                    .to_string(),
            ),
            custom_instructions: Some(
                "As Roo Chief Executive:\n\n**Phase 1: Initial Interaction & Intent \
                 Clarification**\n\n1. **Analyze Initial Request:** Check for explicit mode \
                 directives before anything else.\n2. **Determine Response Path:** Confirm a \
                 direct mode request, or map intent to a likely persona and assess confidence."
                    .to_string(),
            ),
            groups: Some(vec![
                Group::Read,
                Group::Edit,
                Group::Browser,
                Group::Command,
                Group::Mcp,
            ]),
        },
        PromptRole {
            slug: Some("code-writer".to_string()),
            name: Some("💻 Code Writer".to_string()),
            role_definition: Some(
                "You are Code Writer, a specialist in writing clean, efficient code. You focus \
                 on implementation details and best practices."
                    .to_string(),
            ),
            custom_instructions: Some(
                "As a Code Writer, you should follow these principles:\n\n1. Write clean, \
                 well-documented code\n2. Follow language-specific best practices\n3. Consider \
                 edge cases and error handling"
                    .to_string(),
            ),
            groups: Some(vec![Group::Read, Group::Edit]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(roles: Vec<PromptRole>) -> RoleStore {
        let current = roles[0].clone();
        RoleStore { roles, current }
    }

    fn role(slug: &str, name: &str) -> PromptRole {
        PromptRole {
            slug: Some(slug.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn starts_with_seed_roles_and_first_selected() {
        let store = RoleStore::default();
        assert_eq!(store.roles.len(), 2);
        assert_eq!(store.current.slug.as_deref(), Some("roo-commander"));
    }

    #[test]
    fn select_known_slug_changes_current() {
        let mut store = store_with(vec![role("a", "A"), role("b", "B")]);
        assert!(store.select("b"));
        assert_eq!(store.current.slug.as_deref(), Some("b"));
    }

    #[test]
    fn select_unknown_slug_is_a_no_op() {
        let mut store = store_with(vec![role("a", "A")]);
        assert!(!store.select("missing"));
        assert_eq!(store.current.slug.as_deref(), Some("a"));
    }

    #[test]
    fn add_role_appends_and_selects_a_fresh_record() {
        let mut store = store_with(vec![role("a", "A")]);
        let added = store.add_role();
        assert_eq!(store.roles.len(), 2);
        assert_eq!(store.current, added);
        assert_eq!(added.name.as_deref(), Some("New Prompt"));
        let slug = added.slug.unwrap();
        assert!(slug.starts_with("new-prompt-"));
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn delete_selects_first_remaining() {
        let mut store = store_with(vec![role("a", "A"), role("b", "B")]);
        store.delete_role("a");
        assert_eq!(store.roles.len(), 1);
        assert_eq!(store.current.slug.as_deref(), Some("b"));
    }

    #[test]
    fn deleting_the_last_role_leaves_a_placeholder_outside_the_collection() {
        let mut store = store_with(vec![role("only", "Only")]);
        store.delete_role("only");
        assert!(store.roles.is_empty());
        assert_eq!(store.current.slug.as_deref(), Some(""));
        assert_eq!(store.current.name.as_deref(), Some(""));
        assert_eq!(store.current.groups.as_deref(), Some(&[][..]));
    }

    #[test]
    fn save_current_replaces_by_pre_edit_slug_in_place() {
        let mut store = store_with(vec![role("a", "A"), role("b", "B")]);
        let edited = role("a-renamed", "A2");
        store.save_current(edited.clone());
        assert_eq!(store.roles[0], edited);
        assert_eq!(store.roles[1].slug.as_deref(), Some("b"));
        assert_eq!(store.current, edited);
    }

    #[test]
    fn apply_import_selects_first_of_imported_batch() {
        let mut store = store_with(vec![role("a", "A")]);
        let merged = vec![role("a", "A2"), role("b", "B")];
        store.apply_import(merged.clone(), merged[0].clone());
        assert_eq!(store.roles, merged);
        assert_eq!(store.current.name.as_deref(), Some("A2"));
    }

    #[test]
    fn current_index_follows_the_selection() {
        let mut store = store_with(vec![role("a", "A"), role("b", "B")]);
        assert_eq!(store.current_index(), Some(0));
        store.select("b");
        assert_eq!(store.current_index(), Some(1));
        store.delete_role("a");
        store.delete_role("b");
        assert_eq!(store.current_index(), None);
    }
}
