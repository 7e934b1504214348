//! Swap-intent resolution.
//!
//! Turns a token selection into the complete list of field-set commands that
//! puts the widget's swap form into the right state for that token:
//!
//! | Role        | Category         | Source leg                 | Destination leg      |
//! |-------------|------------------|----------------------------|----------------------|
//! | Source      | any              | (exec(chain), token)       | untouched            |
//! | Destination | PrivateRestricted| (venue exec, quote asset)  | (venue exec, token)  |
//! | Destination | TokenizedEquity  | (primary chain, stable)    | (primary, token)     |
//! | Destination | Ordinary         | untouched                  | (exec(chain), token) |
//!
//! Commands are always ordered chain before token and source before
//! destination, so the widget never sees a (chain, token) pair that was not
//! meant to exist together.

use std::sync::Arc;

use log::{debug, warn};

use super::swap_model::{
    FieldSetCommand, FormField, SetFieldOptions, SwapLegRole, TokenSelectionEvent,
};
use super::swap_traits::{SwapFormControl, TokenSelectionHandler};
use crate::chains::{ChainId, ChainIdMap, VenueConfig};
use crate::classification::{AssetCategory, AssetClassifier};

/// Stateless resolver from selection events to form commands.
#[derive(Clone, Debug)]
pub struct SwapIntentResolver {
    classifier: AssetClassifier,
    venues: VenueConfig,
    chain_ids: ChainIdMap,
    options: SetFieldOptions,
}

impl SwapIntentResolver {
    pub fn new(venues: VenueConfig) -> Self {
        Self {
            classifier: AssetClassifier::new(&venues),
            chain_ids: venues.chain_id_map(),
            venues,
            options: SetFieldOptions::default(),
        }
    }

    /// Override the options attached to every emitted command.
    pub fn with_options(mut self, options: SetFieldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn classifier(&self) -> &AssetClassifier {
        &self.classifier
    }

    pub fn venues(&self) -> &VenueConfig {
        &self.venues
    }

    /// Compute the ordered command sequence for a selection.
    pub fn resolve(&self, event: &TokenSelectionEvent) -> Vec<FieldSetCommand> {
        let token = &event.token;

        match event.role {
            SwapLegRole::Source => self.leg(
                SwapLegRole::Source,
                self.chain_ids.to_execution(token.chain_id),
                &token.address,
            ),
            SwapLegRole::Destination => match self.classifier.classify(token) {
                AssetCategory::PrivateRestrictedAsset => {
                    let venue = &self.venues.restricted;
                    let mut commands =
                        self.leg(SwapLegRole::Source, venue.execution_chain_id, &venue.quote_asset);
                    commands.extend(self.leg(
                        SwapLegRole::Destination,
                        venue.execution_chain_id,
                        &token.address,
                    ));
                    commands
                }
                AssetCategory::PublicTokenizedEquity => {
                    let primary = &self.venues.primary;
                    let mut commands =
                        self.leg(SwapLegRole::Source, primary.chain_id, &primary.stable_asset);
                    commands.extend(self.leg(
                        SwapLegRole::Destination,
                        primary.chain_id,
                        &token.address,
                    ));
                    commands
                }
                AssetCategory::Ordinary => self.leg(
                    SwapLegRole::Destination,
                    self.chain_ids.to_execution(token.chain_id),
                    &token.address,
                ),
            },
        }
    }

    /// Resolve a selection and push the commands into the widget.
    ///
    /// Never fails. Without a control surface, or when the control rejects a
    /// command, the rest of the sequence is dropped; the next selection issues
    /// a complete sequence again. Returns whether the full sequence was
    /// delivered.
    pub fn dispatch(
        &self,
        event: &TokenSelectionEvent,
        control: Option<&dyn SwapFormControl>,
    ) -> bool {
        let commands = self.resolve(event);

        let Some(control) = control else {
            warn!(
                "Swap form control unavailable, dropping {} command(s) for '{}'",
                commands.len(),
                event.token.symbol
            );
            return false;
        };

        for command in &commands {
            if let Err(e) = control.set_field(command.field, &command.value, command.options) {
                warn!(
                    "Swap form rejected '{}' for '{}': {}, dropping remaining commands",
                    command.field, event.token.symbol, e
                );
                return false;
            }
        }

        debug!(
            "Applied {} command(s) for {:?} selection of '{}'",
            commands.len(),
            event.role,
            event.token.symbol
        );
        true
    }

    fn leg(&self, role: SwapLegRole, chain_id: ChainId, address: &str) -> Vec<FieldSetCommand> {
        let (chain_field, token_field) = match role {
            SwapLegRole::Source => (FormField::SourceChain, FormField::SourceToken),
            SwapLegRole::Destination => (FormField::DestinationChain, FormField::DestinationToken),
        };
        vec![
            FieldSetCommand::chain(chain_field, chain_id, self.options),
            FieldSetCommand::token(token_field, address, self.options),
        ]
    }
}

impl Default for SwapIntentResolver {
    fn default() -> Self {
        Self::new(VenueConfig::default())
    }
}

/// Binds a resolver to the widget's control surface.
///
/// Built once when the widget mounts and handed to the token search as its
/// [`TokenSelectionHandler`].
pub struct SelectionDispatcher {
    resolver: Arc<SwapIntentResolver>,
    control: Option<Arc<dyn SwapFormControl>>,
}

impl SelectionDispatcher {
    pub fn new(
        resolver: Arc<SwapIntentResolver>,
        control: Option<Arc<dyn SwapFormControl>>,
    ) -> Self {
        Self { resolver, control }
    }
}

impl TokenSelectionHandler for SelectionDispatcher {
    fn on_token_selected(&self, event: &TokenSelectionEvent) {
        self.resolver.dispatch(event, self.control.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, Result};
    use crate::swap::{CommandBuffer, FieldValue, SwapFormState};
    use crate::tokens::Token;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn resolver() -> SwapIntentResolver {
        SwapIntentResolver::default()
    }

    fn event(role: SwapLegRole, chain_id: ChainId, address: &str) -> TokenSelectionEvent {
        TokenSelectionEvent::new(role, Token::new(chain_id, address, "TKN", "Token", 18))
    }

    fn fields(commands: &[FieldSetCommand]) -> Vec<FormField> {
        commands.iter().map(|c| c.field).collect()
    }

    #[test]
    fn test_restricted_destination_pins_both_legs_in_order() {
        let venues = VenueConfig::default();
        let commands = resolver().resolve(&event(
            SwapLegRole::Destination,
            venues.restricted.search_chain_id,
            "X",
        ));

        let exec = venues.restricted.execution_chain_id;
        assert_eq!(
            commands,
            vec![
                FieldSetCommand::chain(FormField::SourceChain, exec, SetFieldOptions::default()),
                FieldSetCommand::token(
                    FormField::SourceToken,
                    venues.restricted.quote_asset.clone(),
                    SetFieldOptions::default()
                ),
                FieldSetCommand::chain(
                    FormField::DestinationChain,
                    exec,
                    SetFieldOptions::default()
                ),
                FieldSetCommand::token(
                    FormField::DestinationToken,
                    "X",
                    SetFieldOptions::default()
                ),
            ]
        );
    }

    #[test]
    fn test_equity_destination_forces_stable_source() {
        let venues = VenueConfig::default();
        let commands = resolver().resolve(&event(SwapLegRole::Destination, 1, "0xequity"));

        assert_eq!(
            fields(&commands),
            vec![
                FormField::SourceChain,
                FormField::SourceToken,
                FormField::DestinationChain,
                FormField::DestinationToken
            ]
        );
        assert_eq!(commands[0].value, FieldValue::Chain(venues.primary.chain_id));
        assert_eq!(commands[1].value, FieldValue::Token(venues.primary.stable_asset));
        assert_eq!(commands[2].value, FieldValue::Chain(1));
        assert_eq!(commands[3].value, FieldValue::Token("0xequity".to_string()));
    }

    #[test]
    fn test_ordinary_destination_only_sets_destination() {
        let commands = resolver().resolve(&event(SwapLegRole::Destination, 8453, "0xbase"));
        assert_eq!(
            fields(&commands),
            vec![FormField::DestinationChain, FormField::DestinationToken]
        );
        assert_eq!(commands[0].value, FieldValue::Chain(8453));
    }

    #[test]
    fn test_source_selection_never_overrides() {
        let commands = resolver().resolve(&event(SwapLegRole::Source, 1, "0xequity"));
        assert_eq!(fields(&commands), vec![FormField::SourceChain, FormField::SourceToken]);
        assert_eq!(commands[0].value, FieldValue::Chain(1));
    }

    #[test]
    fn test_restricted_source_uses_execution_id() {
        let venues = VenueConfig::default();
        let commands = resolver().resolve(&event(
            SwapLegRole::Source,
            venues.restricted.search_chain_id,
            "Mint",
        ));
        assert_eq!(
            commands[0].value,
            FieldValue::Chain(venues.restricted.execution_chain_id)
        );
    }

    #[test]
    fn test_options_are_configurable() {
        let options = SetFieldOptions {
            persist_to_address_bar: false,
        };
        let commands = resolver()
            .with_options(options)
            .resolve(&event(SwapLegRole::Source, 1, "0xabc"));
        assert!(commands.iter().all(|c| !c.options.persist_to_address_bar));
    }

    #[test]
    fn test_dispatch_without_control_drops_sequence() {
        assert!(!resolver().dispatch(&event(SwapLegRole::Destination, 1, "0xequity"), None));
    }

    struct FailingControl {
        calls: AtomicUsize,
        fail_at: usize,
    }

    impl SwapFormControl for FailingControl {
        fn set_field(
            &self,
            field: FormField,
            _value: &FieldValue,
            _options: SetFieldOptions,
        ) -> Result<()> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == self.fail_at {
                return Err(Error::ControlRejected {
                    field: field.to_string(),
                    reason: "widget unmounted".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_stops_at_first_rejection() {
        let control = FailingControl {
            calls: AtomicUsize::new(0),
            fail_at: 1,
        };
        let delivered = resolver().dispatch(
            &event(SwapLegRole::Destination, 1, "0xequity"),
            Some(&control),
        );
        assert!(!delivered);
        assert_eq!(control.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_selection_dispatcher_drives_bound_control() {
        let buffer = Arc::new(CommandBuffer::new());
        let handler: Box<dyn TokenSelectionHandler> = Box::new(SelectionDispatcher::new(
            Arc::new(resolver()),
            Some(buffer.clone()),
        ));

        handler.on_token_selected(&event(SwapLegRole::Destination, 8453, "0xbase"));
        handler.on_token_selected(&event(SwapLegRole::Source, 8453, "0xusdc"));

        let mut state = SwapFormState::default();
        state.apply_all(&buffer.commands());
        assert_eq!(state.destination_token.as_deref(), Some("0xbase"));
        assert_eq!(state.source_token.as_deref(), Some("0xusdc"));
    }

    fn chain_ids() -> impl Strategy<Value = ChainId> {
        let v = VenueConfig::default();
        prop_oneof![
            Just(v.primary.chain_id),
            Just(v.restricted.search_chain_id),
            Just(v.restricted.execution_chain_id),
            any::<ChainId>(),
        ]
    }

    fn prior_states() -> impl Strategy<Value = SwapFormState> {
        (
            proptest::option::of(any::<ChainId>()),
            proptest::option::of("0x[0-9a-f]{40}"),
            proptest::option::of(any::<ChainId>()),
            proptest::option::of("0x[0-9a-f]{40}"),
            proptest::option::of("[0-9]{1,6}"),
        )
            .prop_map(
                |(source_chain, source_token, destination_chain, destination_token, amount)| {
                    SwapFormState {
                        source_chain,
                        source_token,
                        destination_chain,
                        destination_token,
                        amount,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn source_selection_never_touches_destination(
            chain_id in chain_ids(),
            address in "0x[0-9a-fA-F]{40}",
            prior in prior_states(),
        ) {
            let commands = resolver().resolve(&event(SwapLegRole::Source, chain_id, &address));
            let mut state = prior.clone();
            state.apply_all(&commands);
            prop_assert_eq!(state.destination_chain, prior.destination_chain);
            prop_assert_eq!(state.destination_token, prior.destination_token);
            prop_assert_eq!(state.source_token, Some(address));
        }

        #[test]
        fn equity_destination_always_lands_on_stable_source(
            address in "0x[0-9a-fA-F]{40}",
            prior in prior_states(),
        ) {
            let venues = VenueConfig::default();
            prop_assume!(!address.eq_ignore_ascii_case(&venues.primary.stable_asset));

            let commands = resolver()
                .resolve(&event(SwapLegRole::Destination, venues.primary.chain_id, &address));
            let mut state = prior;
            state.apply_all(&commands);
            prop_assert_eq!(state.source_chain, Some(venues.primary.chain_id));
            prop_assert_eq!(state.source_token, Some(venues.primary.stable_asset.clone()));
            prop_assert_eq!(state.destination_chain, Some(venues.primary.chain_id));
            prop_assert_eq!(state.destination_token, Some(address));
        }

        #[test]
        fn restricted_destination_always_lands_on_venue(
            address in "[1-9A-HJ-NP-Za-km-z]{32,44}",
            prior in prior_states(),
        ) {
            let venues = VenueConfig::default();
            let commands = resolver().resolve(&event(
                SwapLegRole::Destination,
                venues.restricted.search_chain_id,
                &address,
            ));
            let mut state = prior;
            state.apply_all(&commands);
            prop_assert_eq!(state.source_chain, Some(venues.restricted.execution_chain_id));
            prop_assert_eq!(state.destination_chain, Some(venues.restricted.execution_chain_id));
            prop_assert_eq!(state.source_token, Some(venues.restricted.quote_asset.clone()));
            prop_assert_eq!(state.destination_token, Some(address));
        }
    }
}
