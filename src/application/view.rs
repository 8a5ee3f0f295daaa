use crate::domain::catalog::{Catalog, ItemId};
use crate::domain::money::{Denomination, Money};
use crate::domain::session::{PaymentMethod, Phase, Session};
use serde::Serialize;
use std::collections::BTreeMap;

/// Remaining count of one catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLevel {
    pub item: ItemId,
    pub display_name: String,
    pub price: Money,
    pub remaining: u32,
}

/// Read-only snapshot of the session and stock ledger for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub phase: Phase,
    pub payment_method: PaymentMethod,
    pub inserted_total: Money,
    pub selected_denomination: Denomination,
    pub card_fault_simulated: bool,
    /// Rendered notice; empty when there is nothing to report.
    pub message: String,
    /// Stock in catalog order.
    pub stock: Vec<StockLevel>,
}

impl View {
    pub(crate) fn build(
        session: &Session,
        catalog: &Catalog,
        levels: &BTreeMap<ItemId, u32>,
    ) -> Self {
        let stock = catalog
            .entries()
            .iter()
            .map(|entry| StockLevel {
                item: entry.id.clone(),
                display_name: entry.display_name.clone(),
                price: entry.price,
                remaining: levels.get(&entry.id).copied().unwrap_or(0),
            })
            .collect();

        Self {
            phase: session.phase,
            payment_method: session.payment_method,
            inserted_total: session.inserted_total,
            selected_denomination: session.selected_denomination,
            card_fault_simulated: session.card_fault_simulated,
            message: session
                .notice
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            stock,
        }
    }

    /// True while a check or dispense cycle is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Checking | Phase::Dispensing)
    }

    /// Remaining count of `item`, if it is in the catalog.
    pub fn remaining(&self, item: &str) -> Option<u32> {
        self.stock
            .iter()
            .find(|level| level.item.as_str() == item)
            .map(|level| level.remaining)
    }

    /// True when the other payment method already owns the session, so
    /// controls for `method` must stay disabled until it ends.
    pub fn method_locked_out(&self, method: PaymentMethod) -> bool {
        self.payment_method != PaymentMethod::None && self.payment_method != method
    }

    /// Whether the presentation layer should offer the change button.
    pub fn can_return_change(&self) -> bool {
        self.payment_method == PaymentMethod::Cash
            && !self.inserted_total.is_zero()
            && !self.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_for(session: &Session) -> View {
        let catalog = Catalog::standard();
        View::build(session, &catalog, &BTreeMap::new())
    }

    #[test]
    fn test_method_lock_out() {
        let mut session = Session::new();
        let view = view_for(&session);
        assert!(!view.method_locked_out(PaymentMethod::Card));
        assert!(!view.method_locked_out(PaymentMethod::Cash));

        session.claim_method(PaymentMethod::Cash).unwrap();
        let view = view_for(&session);
        assert!(view.method_locked_out(PaymentMethod::Card));
        assert!(!view.method_locked_out(PaymentMethod::Cash));
    }

    #[test]
    fn test_missing_levels_read_as_zero() {
        let view = view_for(&Session::new());
        assert_eq!(view.remaining("cola"), Some(0));
        assert_eq!(view.remaining("juice"), None);
        assert!(!view.can_return_change());
    }

    #[test]
    fn test_view_serializes_stock_in_catalog_order() {
        let json = serde_json::to_value(view_for(&Session::new())).unwrap();
        assert_eq!(json["phase"], "Idle");
        assert_eq!(json["inserted_total"], 0);
        assert_eq!(json["selected_denomination"], 1000);
        assert_eq!(json["stock"][0]["item"], "cola");
        assert_eq!(json["stock"][2]["price"], 700);
    }
}
