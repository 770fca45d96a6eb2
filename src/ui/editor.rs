// ui/editor.rs
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, StatefulWidget, Widget},
};
use strum::IntoEnumIterator;

use crate::app::{Action, InputMode};
use crate::context::Context;
use crate::message::Notice;
use crate::role::{Group, PromptRole};
use crate::ui::chrome;
use crate::ui::form::{Field, RoleForm};
use crate::ui::import_menu::ImportMenu;
use crate::ui::widgets::StatefulList;

const SIDEBAR_WIDTH: u16 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Sidebar,
    Form,
}

/// The main screen: role list on the left, the form bound to the current
/// role on the right.
#[derive(Debug)]
pub struct Editor {
    sidebar: StatefulList<PromptRole>,
    form: RoleForm,
    pane: Pane,
    // Deleting asks for a second Backspace before it commits.
    backspace_counter: bool,
}

impl Editor {
    pub fn new(store: &crate::store::RoleStore) -> Self {
        let mut sidebar = StatefulList::with_items(store.roles.clone());
        sidebar.state.select(store.current_index());
        Self {
            sidebar,
            form: RoleForm::bind(&store.current),
            pane: Pane::Sidebar,
            backspace_counter: false,
        }
    }

    /// Rebuilds the sidebar from the store after any collection change and
    /// re-aligns the highlight with the current record.
    fn refresh(&mut self, context: &Context) {
        self.sidebar = StatefulList::with_items(context.store.roles.clone());
        self.sidebar.state.select(context.store.current_index());
    }

    /// Dirty-guarded selection switch. A dirty form is persisted before the
    /// switch, even when re-selecting the current record; a dirty form that
    /// fails validation blocks the switch and the highlight snaps back to
    /// the current record.
    fn try_select(&mut self, slug: String, context: &mut Context) {
        if !self.flush_dirty(context) {
            self.sidebar.state.select(context.store.current_index());
            return;
        }
        if context.store.current.slug.as_deref() == Some(slug.as_str()) {
            return;
        }
        if context.store.select(&slug) {
            self.form = RoleForm::bind(&context.store.current);
            self.refresh(context);
        }
    }

    /// Persists a dirty form. Returns false when validation blocks it.
    fn flush_dirty(&mut self, context: &mut Context) -> bool {
        if !self.form.dirty {
            return true;
        }
        if !self.form.validate() {
            *context.notice =
                Some(Notice::error("Fix the highlighted fields before switching"));
            return false;
        }
        context.store.save_current(self.form.to_role());
        self.form.dirty = false;
        self.refresh(context);
        true
    }

    fn save_form(&mut self, context: &mut Context) {
        if !self.form.validate() {
            *context.notice = Some(Notice::error("Please fix the errors before saving"));
            return;
        }
        context.store.save_current(self.form.to_role());
        self.form.dirty = false;
        self.refresh(context);
        *context.notice = Some(Notice::success("Prompt saved successfully!"));
    }

    fn add_role(&mut self, context: &mut Context) {
        if !self.flush_dirty(context) {
            return;
        }
        context.store.add_role();
        self.form = RoleForm::bind(&context.store.current);
        // A fresh record only survives a selection switch once it is saved.
        self.form.dirty = true;
        self.refresh(context);
    }

    fn delete_current(&mut self, context: &mut Context) {
        let Some(slug) = context.store.current.slug.clone().filter(|s| !s.is_empty()) else {
            *context.notice = Some(Notice::error("Nothing to delete"));
            return;
        };
        context.store.delete_role(&slug);
        self.form = RoleForm::bind(&context.store.current);
        self.refresh(context);
        *context.notice = Some(Notice::success(format!("Deleted prompt '{slug}'")));
    }

    fn on_key_normal(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        if key.code != KeyCode::Backspace {
            self.backspace_counter = false;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Char('?') => {
                return Some(Action::SwitchComponent(
                    crate::ui::help::Help::default().into(),
                ));
            }
            KeyCode::Char('x') => return Some(Action::ExportRoles),
            KeyCode::Char('i') => {
                if self.flush_dirty(context) {
                    return Some(Action::SwitchComponent(ImportMenu::new().into()));
                }
            }
            KeyCode::Char('a') => self.add_role(context),
            KeyCode::Char('s') => self.save_form(context),
            KeyCode::Backspace => {
                if self.backspace_counter {
                    self.delete_current(context);
                    self.backspace_counter = false;
                } else {
                    self.backspace_counter = true;
                }
            }
            KeyCode::Tab => {
                self.pane = match self.pane {
                    Pane::Sidebar => Pane::Form,
                    Pane::Form => Pane::Sidebar,
                };
            }
            _ => match self.pane {
                Pane::Sidebar => return self.on_sidebar_key(key, context),
                Pane::Form => return self.on_form_key(key, context),
            },
        }
        None
    }

    fn on_sidebar_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.sidebar.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.sidebar.next(),
            KeyCode::Enter => {
                if let Some(slug) = self
                    .sidebar
                    .selected_item()
                    .and_then(|r| r.slug.clone())
                {
                    self.try_select(slug, context);
                }
            }
            _ => {}
        }
        None
    }

    fn on_form_key(&mut self, key: KeyEvent, _context: &mut Context) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.form.focus_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.form.focus_next(),
            KeyCode::Left | KeyCode::Char('h') if self.form.focus == Field::Groups => {
                self.form.group_cursor_left()
            }
            KeyCode::Right | KeyCode::Char('l') if self.form.focus == Field::Groups => {
                self.form.group_cursor_right()
            }
            KeyCode::Char(' ') if self.form.focus == Field::Groups => self.form.toggle_group(),
            KeyCode::Enter => {
                if self.form.focus == Field::Groups {
                    self.form.toggle_group();
                } else {
                    return Some(Action::SwitchInputMode(InputMode::Editing));
                }
            }
            _ => {}
        }
        None
    }

    fn on_key_editing(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.form.validate();
                return Some(Action::SwitchInputMode(InputMode::Normal));
            }
            KeyCode::Tab => {
                self.form.focus_next();
                if self.form.focus == Field::Groups {
                    return Some(Action::SwitchInputMode(InputMode::Normal));
                }
            }
            _ => self.form.handle_edit(key),
        }
        None
    }

    fn render_sidebar(&mut self, area: Rect, buffer: &mut Buffer) {
        let border_style = if self.pane == Pane::Sidebar {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let items: Vec<ListItem> = self
            .sidebar
            .items
            .iter()
            .map(|role| ListItem::new(role.display_name().to_string()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Prompts")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        StatefulWidget::render(list, area, buffer, &mut self.sidebar.state);
    }

    fn render_text_field(
        &self,
        field: Field,
        area: Rect,
        buffer: &mut Buffer,
        context: &Context,
    ) {
        let focused = self.pane == Pane::Form && self.form.focus == field;
        let editing = focused && *context.input_mode == InputMode::Editing;
        let border_style = match (focused, editing) {
            (_, true) => Style::default().fg(Color::Green),
            (true, _) => Style::default().fg(Color::Yellow),
            _ => Style::default(),
        };
        let mut block = Block::default()
            .title(field.label())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        if let Some(message) = self.form.error_for(field) {
            block = block.title_bottom(
                Line::from(Span::styled(message, Style::default().fg(Color::Red))),
            );
        }
        let inner_width = area.width.saturating_sub(2) as usize;
        let value = self.form.field_value(field);
        let scroll = match field {
            Field::Slug => self.form.slug.visual_scroll(inner_width),
            Field::Name => self.form.name.visual_scroll(inner_width),
            Field::RoleDefinition => self.form.role_definition.visual_scroll(inner_width),
            Field::CustomInstructions => {
                self.form.custom_instructions.visual_scroll(inner_width)
            }
            Field::Groups => 0,
        };
        let paragraph = Paragraph::new(value)
            .scroll((0, scroll as u16))
            .block(block);
        paragraph.render(area, buffer);
    }

    fn render_groups(&self, area: Rect, buffer: &mut Buffer) {
        let focused = self.pane == Pane::Form && self.form.focus == Field::Groups;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let mut spans = Vec::new();
        for (index, group) in Group::iter().enumerate() {
            let checked = self.form.groups.contains(&group);
            let marker = if checked { "[x]" } else { "[ ]" };
            let style = if focused && index == self.form.group_cursor {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("{marker} {group}"), style));
            spans.push(Span::raw("   "));
        }
        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(Field::Groups.label())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        );
        paragraph.render(area, buffer);
    }

    fn render_preview(&self, area: Rect, buffer: &mut Buffer) {
        let width = area.width.saturating_sub(2) as usize;
        let text = format!(
            "{}\n\n{}",
            self.form.role_definition.value(),
            self.form.custom_instructions.value()
        );
        let wrapped = textwrap::fill(&text, width.max(1));
        let paragraph = Paragraph::new(wrapped)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title("Preview")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        paragraph.render(area, buffer);
    }

    fn render_form(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let [slug, name, role_definition, custom_instructions, groups, preview] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .areas(area);
        self.render_text_field(Field::Slug, slug, buffer, context);
        self.render_text_field(Field::Name, name, buffer, context);
        self.render_text_field(Field::RoleDefinition, role_definition, buffer, context);
        self.render_text_field(Field::CustomInstructions, custom_instructions, buffer, context);
        self.render_groups(groups, buffer);
        self.render_preview(preview, buffer);
    }

    fn status_message(&self, context: &Context) -> &'static str {
        if *context.input_mode == InputMode::Editing {
            return "Editing: Esc/Enter done, Tab next field";
        }
        if self.backspace_counter {
            return "Press Backspace again to delete the current prompt";
        }
        match self.pane {
            Pane::Sidebar => {
                "j/k select, Enter open, a add, s save, i import, x export, ? help, q quit"
            }
            Pane::Form => "j/k field, Enter edit, Space toggle group, Tab sidebar, s save",
        }
    }
}

impl super::Component for Editor {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        match context.input_mode {
            InputMode::Normal => self.on_key_normal(key, context),
            InputMode::Editing => self.on_key_editing(key),
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let [header, console, body, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .areas(area);

        chrome::render_header(buffer, header);
        chrome::render_notice(buffer, console, context.notice.as_ref());

        let [sidebar, form] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
                .areas(body);
        self.render_sidebar(sidebar, buffer);
        self.render_form(form, buffer, context);

        chrome::render_status(buffer, status, self.status_message(context));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RoleStore;
    use crate::ui::Component;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn clean_form_switches_selection_directly() {
        let mut store = RoleStore::default();
        let mut notice = None;
        let input_mode = InputMode::Normal;
        let mut editor = Editor::new(&store);
        let mut context = Context {
            store: &mut store,
            notice: &mut notice,
            input_mode: &input_mode,
        };
        editor.try_select("code-writer".to_string(), &mut context);
        assert_eq!(store.current.slug.as_deref(), Some("code-writer"));
    }

    #[test]
    fn dirty_valid_form_is_saved_before_switching() {
        let mut store = RoleStore::default();
        let mut notice = None;
        let input_mode = InputMode::Normal;
        let mut editor = Editor::new(&store);
        editor.form.name = tui_input::Input::new("Renamed Commander".to_string());
        editor.form.dirty = true;
        let mut context = Context {
            store: &mut store,
            notice: &mut notice,
            input_mode: &input_mode,
        };
        editor.try_select("code-writer".to_string(), &mut context);
        assert_eq!(store.current.slug.as_deref(), Some("code-writer"));
        assert_eq!(store.roles[0].name.as_deref(), Some("Renamed Commander"));
    }

    #[test]
    fn reselecting_the_current_record_persists_a_dirty_edit() {
        let mut store = RoleStore::default();
        let mut notice = None;
        let input_mode = InputMode::Normal;
        let mut editor = Editor::new(&store);
        editor.form.name = tui_input::Input::new("Commander, edited".to_string());
        editor.form.dirty = true;
        let mut context = Context {
            store: &mut store,
            notice: &mut notice,
            input_mode: &input_mode,
        };
        editor.try_select("roo-commander".to_string(), &mut context);
        assert_eq!(store.current.slug.as_deref(), Some("roo-commander"));
        assert_eq!(store.roles[0].name.as_deref(), Some("Commander, edited"));
        assert!(!editor.form.dirty);
    }

    #[test]
    fn dirty_invalid_form_blocks_the_switch() {
        let mut store = RoleStore::default();
        let mut notice = None;
        let input_mode = InputMode::Normal;
        let mut editor = Editor::new(&store);
        editor.form.slug = tui_input::Input::new("bad slug!".to_string());
        editor.form.dirty = true;
        let mut context = Context {
            store: &mut store,
            notice: &mut notice,
            input_mode: &input_mode,
        };
        editor.try_select("code-writer".to_string(), &mut context);
        assert_eq!(store.current.slug.as_deref(), Some("roo-commander"));
        assert!(notice.is_some());
        assert!(editor.form.error_for(Field::Slug).is_some());
    }

    #[test]
    fn delete_requires_a_second_backspace() {
        let mut store = RoleStore::default();
        let mut notice = None;
        let input_mode = InputMode::Normal;
        let mut editor = Editor::new(&store);
        {
            let mut context = Context {
                store: &mut store,
                notice: &mut notice,
                input_mode: &input_mode,
            };
            editor.on_key(key(KeyCode::Backspace), &mut context);
        }
        assert_eq!(store.roles.len(), 2);
        {
            let mut context = Context {
                store: &mut store,
                notice: &mut notice,
                input_mode: &input_mode,
            };
            editor.on_key(key(KeyCode::Backspace), &mut context);
        }
        assert_eq!(store.roles.len(), 1);
        assert_eq!(store.current.slug.as_deref(), Some("code-writer"));
    }

    #[test]
    fn deleting_every_role_binds_the_placeholder() {
        let mut store = RoleStore::default();
        let mut notice = None;
        let input_mode = InputMode::Normal;
        let mut editor = Editor::new(&store);
        let mut context = Context {
            store: &mut store,
            notice: &mut notice,
            input_mode: &input_mode,
        };
        editor.delete_current(&mut context);
        editor.delete_current(&mut context);
        assert!(store.roles.is_empty());
        assert_eq!(editor.form.slug.value(), "");
        assert!(!editor.form.dirty);
    }

    #[test]
    fn add_role_marks_the_form_dirty() {
        let mut store = RoleStore::default();
        let mut notice = None;
        let input_mode = InputMode::Normal;
        let mut editor = Editor::new(&store);
        let mut context = Context {
            store: &mut store,
            notice: &mut notice,
            input_mode: &input_mode,
        };
        editor.on_key(key(KeyCode::Char('a')), &mut context);
        assert_eq!(store.roles.len(), 3);
        assert!(editor.form.dirty);
        assert_eq!(editor.form.name.value(), "New Prompt");
    }

    #[test]
    fn save_with_invalid_slug_reports_errors() {
        let mut store = RoleStore::default();
        let mut notice = None;
        let input_mode = InputMode::Normal;
        let mut editor = Editor::new(&store);
        editor.form.slug = tui_input::Input::new(String::new());
        let mut context = Context {
            store: &mut store,
            notice: &mut notice,
            input_mode: &input_mode,
        };
        editor.save_form(&mut context);
        assert_eq!(editor.form.error_for(Field::Slug), Some("Slug is required"));
        assert_eq!(store.roles[0].slug.as_deref(), Some("roo-commander"));
    }
}
