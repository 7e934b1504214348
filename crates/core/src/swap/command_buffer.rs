use std::sync::{Mutex, MutexGuard};

use log::warn;

use super::swap_model::{FieldSetCommand, FieldValue, FormField, SetFieldOptions};
use super::swap_traits::SwapFormControl;
use crate::errors::Result;

/// A control surface that records commands instead of driving a widget.
///
/// Used when the widget lives in another process (the browser) and the
/// command sequence has to be shipped to it, and in tests.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Mutex<Vec<FieldSetCommand>>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FieldSetCommand>> {
        self.commands.lock().unwrap_or_else(|poisoned| {
            warn!("Command buffer mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Commands recorded so far, in the order they were issued.
    pub fn commands(&self) -> Vec<FieldSetCommand> {
        self.lock().clone()
    }

    pub fn into_commands(self) -> Vec<FieldSetCommand> {
        self.commands
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SwapFormControl for CommandBuffer {
    fn set_field(
        &self,
        field: FormField,
        value: &FieldValue,
        options: SetFieldOptions,
    ) -> Result<()> {
        self.lock().push(FieldSetCommand {
            field,
            value: value.clone(),
            options,
        });
        Ok(())
    }
}
