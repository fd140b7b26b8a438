//! Primary-action derivation for a listing card
//!
//! Pure function over compare state and price configuration; the host UI
//! renders whichever action comes out.

use crate::compare::AppCompare;
use agora_core::types::{ApplicationSearchResult, PriceMode};

/// The action a listing card offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    /// Free (or already bought), compatible, not installed
    Install,

    /// One-time purchase required before installing
    Buy {
        /// Price in cents
        price_cents: u64,
    },

    /// Already installed; disabled state
    Installed,

    /// Host runtime does not satisfy the release range; disabled state
    Incompatible,
}

/// Pick the primary action for a listing, first applicable wins
pub fn primary_action(listing: &ApplicationSearchResult, compare: &AppCompare) -> ListingAction {
    let price = listing.application.spec.price_config.as_ref();
    let one_time = price.is_some_and(|p| p.mode == PriceMode::OneTime);

    if !compare.has_installed() && compare.satisfies_host && !one_time {
        return ListingAction::Install;
    }

    if one_time && !compare.has_installed() {
        return ListingAction::Buy {
            price_cents: price.and_then(|p| p.one_time_price).unwrap_or(0),
        };
    }

    if compare.has_installed() {
        return ListingAction::Installed;
    }

    ListingAction::Incompatible
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::types::{
        ApplicationSearchResult, Extension, ExtensionKind, PriceConfig,
    };

    fn listing(price: Option<PriceConfig>) -> ApplicationSearchResult {
        let mut listing = ApplicationSearchResult::default();
        listing.application.spec.kind = ExtensionKind::Plugin;
        listing.application.spec.price_config = price;
        listing
    }

    fn compare(installed: bool, satisfies: bool) -> AppCompare {
        AppCompare {
            kind: ExtensionKind::Plugin,
            matched: installed.then(Extension::default),
            has_update: false,
            satisfies_host: satisfies,
        }
    }

    fn one_time(price_cents: u64) -> PriceConfig {
        PriceConfig {
            mode: PriceMode::OneTime,
            one_time_price: Some(price_cents),
        }
    }

    #[test]
    fn free_compatible_uninstalled_installs() {
        assert_eq!(
            primary_action(&listing(None), &compare(false, true)),
            ListingAction::Install
        );
    }

    #[test]
    fn paid_uninstalled_buys() {
        assert_eq!(
            primary_action(&listing(Some(one_time(9900))), &compare(false, true)),
            ListingAction::Buy { price_cents: 9900 }
        );
    }

    #[test]
    fn paid_wins_over_incompatible() {
        // Purchase is offered even when the current host cannot run it yet
        assert_eq!(
            primary_action(&listing(Some(one_time(9900))), &compare(false, false)),
            ListingAction::Buy { price_cents: 9900 }
        );
    }

    #[test]
    fn installed_is_terminal() {
        assert_eq!(
            primary_action(&listing(None), &compare(true, true)),
            ListingAction::Installed
        );
        assert_eq!(
            primary_action(&listing(Some(one_time(100))), &compare(true, false)),
            ListingAction::Installed
        );
    }

    #[test]
    fn incompatible_disables() {
        assert_eq!(
            primary_action(&listing(None), &compare(false, false)),
            ListingAction::Incompatible
        );
    }
}
