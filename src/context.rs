use crate::{app::InputMode, message::Notice, store::RoleStore};

/// Mutable borrows handed to the active component for key handling and
/// rendering. All state mutation stays on the run loop thread.
#[derive(Debug)]
pub struct Context<'a> {
    pub store: &'a mut RoleStore,
    pub notice: &'a mut Option<Notice>,
    pub input_mode: &'a InputMode,
}
