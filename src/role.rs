use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Permission tag a role can be granted. The set is closed; files carrying
/// any other tag are rejected at the import boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Group {
    Read,
    Edit,
    Browser,
    Command,
    Mcp,
}

/// A named configuration record for an AI assistant persona.
///
/// Every field is optional so that partially filled files can still be
/// imported, but a record without a slug cannot be selected or deleted.
/// Field names stay camelCase on the wire so exports round-trip with the
/// web tool that produced the format. Unknown keys in imported files are
/// stripped, not rejected, so files from richer exporters still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,
}

/// A single validation failure, keyed by the wire name of the field so the
/// form can show it next to the right input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl PromptRole {
    /// The record bound to the form after the last role was deleted. It is
    /// never stored in the collection.
    pub fn placeholder() -> Self {
        Self {
            slug: Some(String::new()),
            name: Some(String::new()),
            role_definition: Some(String::new()),
            custom_instructions: Some(String::new()),
            groups: Some(Vec::new()),
        }
    }

    /// Checks the per-field constraints. Absent optional fields are valid.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(slug) = &self.slug {
            if slug.is_empty() {
                errors.push(FieldError {
                    field: "slug",
                    message: "Slug is required",
                });
            } else if !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                errors.push(FieldError {
                    field: "slug",
                    message: "Slug can only contain letters, numbers, and hyphens",
                });
            }
        }
        if let Some(name) = &self.name {
            if name.is_empty() {
                errors.push(FieldError {
                    field: "name",
                    message: "Name is required",
                });
            }
        }
        errors
    }

    /// Display label for lists: name first, slug as fallback.
    pub fn display_name(&self) -> &str {
        match (&self.name, &self.slug) {
            (Some(name), _) if !name.is_empty() => name,
            (_, Some(slug)) if !slug.is_empty() => slug,
            _ => "(untitled)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_with_space_and_punctuation_is_rejected() {
        let role = PromptRole {
            slug: Some("bad slug!".to_string()),
            ..Default::default()
        };
        let errors = role.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "slug");
        assert_eq!(
            errors[0].message,
            "Slug can only contain letters, numbers, and hyphens"
        );
    }

    #[test]
    fn empty_slug_and_name_are_rejected_when_present() {
        let role = PromptRole {
            slug: Some(String::new()),
            name: Some(String::new()),
            ..Default::default()
        };
        let errors = role.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "slug"));
        assert!(errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn absent_fields_are_valid() {
        assert!(PromptRole::default().validate().is_empty());
    }

    #[test]
    fn hyphenated_alphanumeric_slug_is_valid() {
        let role = PromptRole {
            slug: Some("roo-commander-2".to_string()),
            name: Some("Roo".to_string()),
            ..Default::default()
        };
        assert!(role.validate().is_empty());
    }

    #[test]
    fn groups_use_lowercase_wire_names() {
        let json = serde_json::to_string(&Group::Mcp).unwrap();
        assert_eq!(json, "\"mcp\"");
        let group: Group = serde_json::from_str("\"browser\"").unwrap();
        assert_eq!(group, Group::Browser);
    }

    #[test]
    fn unknown_fields_are_stripped_on_import() {
        let role: PromptRole =
            serde_json::from_str(r#"{"slug":"a","name":"A","source":"project"}"#).unwrap();
        assert_eq!(role.slug.as_deref(), Some("a"));
        let back = serde_json::to_string(&role).unwrap();
        assert!(!back.contains("source"));
    }

    #[test]
    fn literal_escape_sequences_survive_serde() {
        let role: PromptRole =
            serde_json::from_str(r#"{"customInstructions":"line one\\nline two"}"#).unwrap();
        assert_eq!(
            role.custom_instructions.as_deref(),
            Some("line one\\nline two")
        );
        let back = serde_json::to_string(&role).unwrap();
        assert!(back.contains("line one\\\\nline two"));
    }
}
