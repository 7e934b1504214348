use serde::{Deserialize, Serialize};

use crate::chains::ChainId;
use crate::tokens::Token;

/// Which side of the pending swap a selection affects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapLegRole {
    Source,
    Destination,
}

/// A token picked in the token search for one leg of the swap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSelectionEvent {
    pub role: SwapLegRole,
    pub token: Token,
}

impl TokenSelectionEvent {
    pub fn new(role: SwapLegRole, token: Token) -> Self {
        Self { role, token }
    }
}

/// Field names of the widget's swap form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    #[serde(rename = "fromChain")]
    SourceChain,
    #[serde(rename = "fromToken")]
    SourceToken,
    #[serde(rename = "toChain")]
    DestinationChain,
    #[serde(rename = "toToken")]
    DestinationToken,
    #[serde(rename = "fromAmount")]
    Amount,
}

impl FormField {
    /// The field name the widget's form API expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceChain => "fromChain",
            Self::SourceToken => "fromToken",
            Self::DestinationChain => "toChain",
            Self::DestinationToken => "toToken",
            Self::Amount => "fromAmount",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value written into a form field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Chain(ChainId),
    Token(String),
    Amount(String),
}

/// Options accepted by the widget's field setter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFieldOptions {
    /// Mirror the value into the shareable URL.
    pub persist_to_address_bar: bool,
}

impl Default for SetFieldOptions {
    fn default() -> Self {
        Self {
            persist_to_address_bar: true,
        }
    }
}

/// One instruction for the widget: set `field` to `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSetCommand {
    pub field: FormField,
    pub value: FieldValue,
    pub options: SetFieldOptions,
}

impl FieldSetCommand {
    pub fn chain(field: FormField, chain_id: ChainId, options: SetFieldOptions) -> Self {
        Self {
            field,
            value: FieldValue::Chain(chain_id),
            options,
        }
    }

    pub fn token(field: FormField, address: impl Into<String>, options: SetFieldOptions) -> Self {
        Self {
            field,
            value: FieldValue::Token(address.into()),
            options,
        }
    }
}

/// Snapshot of the widget's swap form.
///
/// The live form belongs to the widget. This mirror exists so callers can see
/// what a command sequence does to a given starting state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapFormState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_chain: Option<ChainId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_chain: Option<ChainId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl SwapFormState {
    /// Apply one command. Commands whose value kind does not fit the field
    /// are ignored, as the widget would ignore them.
    pub fn apply(&mut self, command: &FieldSetCommand) {
        match (command.field, &command.value) {
            (FormField::SourceChain, FieldValue::Chain(id)) => self.source_chain = Some(*id),
            (FormField::DestinationChain, FieldValue::Chain(id)) => {
                self.destination_chain = Some(*id)
            }
            (FormField::SourceToken, FieldValue::Token(address)) => {
                self.source_token = Some(address.clone())
            }
            (FormField::DestinationToken, FieldValue::Token(address)) => {
                self.destination_token = Some(address.clone())
            }
            (FormField::Amount, FieldValue::Amount(amount)) => self.amount = Some(amount.clone()),
            _ => {}
        }
    }

    /// Apply a whole command sequence in order.
    pub fn apply_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a FieldSetCommand>) {
        for command in commands {
            self.apply(command);
        }
    }
}
