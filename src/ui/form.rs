use crossterm::event::{Event, KeyEvent};
use strum::IntoEnumIterator;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::role::{FieldError, Group, PromptRole};

/// The editable fields, in focus order. Groups is a checkbox row rather
/// than a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Slug,
    Name,
    RoleDefinition,
    CustomInstructions,
    Groups,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Slug => "Slug",
            Field::Name => "Name",
            Field::RoleDefinition => "Role Definition",
            Field::CustomInstructions => "Custom Instructions",
            Field::Groups => "Groups",
        }
    }

    /// Wire name matching the validation error keys.
    pub fn key(self) -> &'static str {
        match self {
            Field::Slug => "slug",
            Field::Name => "name",
            Field::RoleDefinition => "roleDefinition",
            Field::CustomInstructions => "customInstructions",
            Field::Groups => "groups",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Slug => Field::Name,
            Field::Name => Field::RoleDefinition,
            Field::RoleDefinition => Field::CustomInstructions,
            Field::CustomInstructions => Field::Groups,
            Field::Groups => Field::Slug,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Field::Slug => Field::Groups,
            Field::Name => Field::Slug,
            Field::RoleDefinition => Field::Name,
            Field::CustomInstructions => Field::RoleDefinition,
            Field::Groups => Field::CustomInstructions,
        }
    }
}

/// Binds one role record to editable inputs and tracks the dirty flag.
///
/// CLEAN and DIRTY are the only states: any edit sets dirty, and rebinding
/// (selection change, save, import, delete-reset) clears it.
#[derive(Debug)]
pub struct RoleForm {
    pub slug: Input,
    pub name: Input,
    pub role_definition: Input,
    pub custom_instructions: Input,
    pub groups: Vec<Group>,
    pub focus: Field,
    pub group_cursor: usize,
    pub dirty: bool,
    pub errors: Vec<FieldError>,
}

impl RoleForm {
    pub fn bind(role: &PromptRole) -> Self {
        Self {
            slug: Input::new(role.slug.clone().unwrap_or_default()),
            name: Input::new(role.name.clone().unwrap_or_default()),
            role_definition: Input::new(role.role_definition.clone().unwrap_or_default()),
            custom_instructions: Input::new(role.custom_instructions.clone().unwrap_or_default()),
            groups: role.groups.clone().unwrap_or_default(),
            focus: Field::Slug,
            group_cursor: 0,
            dirty: false,
            errors: Vec::new(),
        }
    }

    /// The record the form would submit. Every field is present; the form
    /// never produces absent fields, matching the records it seeds.
    pub fn to_role(&self) -> PromptRole {
        PromptRole {
            slug: Some(self.slug.value().to_string()),
            name: Some(self.name.value().to_string()),
            role_definition: Some(self.role_definition.value().to_string()),
            custom_instructions: Some(self.custom_instructions.value().to_string()),
            groups: Some(self.groups.clone()),
        }
    }

    /// Re-runs validation, storing field-keyed errors for rendering.
    pub fn validate(&mut self) -> bool {
        self.errors = self.to_role().validate();
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field.key())
            .map(|e| e.message)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Routes a key to the focused text input; value changes set dirty.
    pub fn handle_edit(&mut self, key: KeyEvent) {
        let Some(input) = self.focused_input_mut() else {
            return;
        };
        if let Some(change) = input.handle_event(&Event::Key(key)) {
            if change.value {
                self.dirty = true;
            }
        }
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            Field::Slug => Some(&mut self.slug),
            Field::Name => Some(&mut self.name),
            Field::RoleDefinition => Some(&mut self.role_definition),
            Field::CustomInstructions => Some(&mut self.custom_instructions),
            Field::Groups => None,
        }
    }

    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Slug => self.slug.value(),
            Field::Name => self.name.value(),
            Field::RoleDefinition => self.role_definition.value(),
            Field::CustomInstructions => self.custom_instructions.value(),
            Field::Groups => "",
        }
    }

    pub fn group_cursor_left(&mut self) {
        let count = Group::iter().count();
        self.group_cursor = (self.group_cursor + count - 1) % count;
    }

    pub fn group_cursor_right(&mut self) {
        self.group_cursor = (self.group_cursor + 1) % Group::iter().count();
    }

    /// Toggles the tag under the cursor: appended when absent, removed when
    /// present. One checkbox per enum member keeps the list duplicate-free.
    pub fn toggle_group(&mut self) {
        let Some(group) = Group::iter().nth(self.group_cursor) else {
            return;
        };
        match self.groups.iter().position(|g| *g == group) {
            Some(index) => {
                self.groups.remove(index);
            }
            None => self.groups.push(group),
        }
        self.dirty = true;
    }
}
