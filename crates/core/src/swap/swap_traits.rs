use super::swap_model::{FieldValue, FormField, SetFieldOptions, TokenSelectionEvent};
use crate::errors::Result;

/// Field-control surface exposed by the embedded swap widget.
///
/// Implementations forward each call to the widget's live form. An error means
/// the widget refused the value or is no longer mounted.
pub trait SwapFormControl: Send + Sync {
    fn set_field(&self, field: FormField, value: &FieldValue, options: SetFieldOptions)
        -> Result<()>;
}

/// Entry point handed to the token search component at construction time.
///
/// The search component calls this for every pick; it never needs to know
/// about classification or the widget.
pub trait TokenSelectionHandler: Send + Sync {
    fn on_token_selected(&self, event: &TokenSelectionEvent);
}
