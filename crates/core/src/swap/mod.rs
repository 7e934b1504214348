//! Swap module - turns token selections into swap-form field commands.

mod command_buffer;
mod swap_intent_resolver;
mod swap_model;
mod swap_traits;

pub use command_buffer::CommandBuffer;
pub use swap_intent_resolver::{SelectionDispatcher, SwapIntentResolver};
pub use swap_model::{
    FieldSetCommand, FieldValue, FormField, SetFieldOptions, SwapFormState, SwapLegRole,
    TokenSelectionEvent,
};
pub use swap_traits::{SwapFormControl, TokenSelectionHandler};
