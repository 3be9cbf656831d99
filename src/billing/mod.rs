//! Billing domain — recurring bills on an action-driven countdown.
//!
//! Structurally the action-driven twin of the growth timer: instead of a
//! wall-clock deadline, a bill comes due after N more meaningful player
//! actions (sales). Overdue is a queryable state and an event, never a
//! penalty the core enforces itself.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ledger::Ledger;
use crate::shared::*;

/// Live countdown state for one recurring bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillCycle {
    pub id: BillId,
    pub name: String,
    pub base_amount: u32,
    pub recurring_increase: u32,
    pub actions_per_cycle: u32,
    pub actions_remaining: u32,
    pub current_amount: u32,
    pub is_paid: bool,
}

impl BillCycle {
    pub fn from_def(def: &BillDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            base_amount: def.base_amount,
            recurring_increase: def.recurring_increase,
            actions_per_cycle: def.actions_per_cycle,
            actions_remaining: def.actions_per_cycle,
            current_amount: def.base_amount,
            is_paid: false,
        }
    }

    /// Begin the next cycle: fresh countdown, increased amount. Runs
    /// immediately on payment, so `is_paid` ends false with a full
    /// countdown ahead of it.
    fn start_new_cycle(&mut self) {
        self.is_paid = false;
        self.actions_remaining = self.actions_per_cycle;
        self.current_amount = self.current_amount.saturating_add(self.recurring_increase);
    }
}

/// All bills, created once at load from the data layer and cycling for the
/// rest of the session.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bills {
    pub bills: HashMap<BillId, BillCycle>,
}

impl Bills {
    pub fn get(&self, id: &str) -> Option<&BillCycle> {
        self.bills.get(id)
    }

    /// Burn `count` actions off one bill's countdown, floored at zero.
    /// Paid bills sit out until their next cycle starts. Returns false for
    /// unknown ids.
    pub fn record_action(&mut self, id: &str, count: u32) -> bool {
        let Some(bill) = self.bills.get_mut(id) else {
            return false;
        };
        if !bill.is_paid {
            bill.actions_remaining = bill.actions_remaining.saturating_sub(count);
        }
        true
    }

    pub fn is_due(&self, id: &str) -> bool {
        self.bills
            .get(id)
            .is_some_and(|bill| !bill.is_paid && bill.actions_remaining == 0)
    }

    pub fn is_due_soon(&self, id: &str, threshold: u32) -> bool {
        self.bills
            .get(id)
            .is_some_and(|bill| !bill.is_paid && bill.actions_remaining <= threshold)
    }

    /// Pay one bill out of the wallet. Only a successful spend flips the
    /// bill over into its next cycle; insufficient funds leave every field
    /// untouched.
    pub fn pay(&mut self, id: &str, ledger: &mut Ledger) -> bool {
        let Some(bill) = self.bills.get_mut(id) else {
            return false;
        };
        if !ledger.try_spend_money(bill.current_amount) {
            return false;
        }
        bill.is_paid = true;
        bill.start_new_cycle();
        true
    }
}

pub struct BillingPlugin;

impl Plugin for BillingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Bills>().add_systems(
            Update,
            (apply_sale_actions, handle_pay_request).run_if(in_state(GameState::Ready)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Every completed sale burns one action off every unpaid bill, emitting
/// the warning/overdue events once per threshold crossing.
fn apply_sale_actions(
    mut sale_events: EventReader<SaleCompletedEvent>,
    mut bills: ResMut<Bills>,
    mut due_soon_events: EventWriter<BillDueSoonEvent>,
    mut overdue_events: EventWriter<BillOverdueEvent>,
) {
    for _sale in sale_events.read() {
        let ids: Vec<BillId> = bills.bills.keys().cloned().collect();
        for id in ids {
            let before = bills.get(&id).map(|b| b.actions_remaining).unwrap_or(0);
            bills.record_action(&id, 1);
            let Some(bill) = bills.get(&id) else { continue };
            let after = bill.actions_remaining;

            if before > 0 && after == 0 {
                warn!("[Billing] {} is overdue ({})", bill.name, bill.current_amount);
                overdue_events.send(BillOverdueEvent { bill_id: id });
            } else if before > BILL_WARNING_ACTIONS && after <= BILL_WARNING_ACTIONS {
                info!(
                    "[Billing] {} due soon: {} actions left",
                    bill.name, after
                );
                due_soon_events.send(BillDueSoonEvent {
                    bill_id: id,
                    actions_remaining: after,
                });
            }
        }
    }
}

fn handle_pay_request(
    mut pay_events: EventReader<PayBillRequestEvent>,
    mut bills: ResMut<Bills>,
    mut ledger: ResMut<Ledger>,
    mut paid_events: EventWriter<BillPaidEvent>,
) {
    for event in pay_events.read() {
        let amount = match bills.get(&event.bill_id) {
            Some(bill) => bill.current_amount,
            None => {
                warn!("[Billing] Unknown bill {:?}", event.bill_id);
                continue;
            }
        };
        if bills.pay(&event.bill_id, &mut ledger) {
            let next_amount = bills
                .get(&event.bill_id)
                .map(|b| b.current_amount)
                .unwrap_or(amount);
            info!(
                "[Billing] Paid {} ({}); next cycle costs {}",
                event.bill_id, amount, next_amount
            );
            paid_events.send(BillPaidEvent {
                bill_id: event.bill_id.clone(),
                amount_paid: amount,
                next_amount,
            });
        } else {
            warn!(
                "[Billing] Could not pay {} ({}): balance {}",
                event.bill_id,
                amount,
                ledger.money
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rent() -> BillDef {
        BillDef {
            id: "rent".to_string(),
            name: "Rent".to_string(),
            base_amount: 50,
            recurring_increase: 10,
            actions_per_cycle: 10,
        }
    }

    fn bills_with_rent() -> Bills {
        let mut bills = Bills::default();
        bills
            .bills
            .insert("rent".to_string(), BillCycle::from_def(&rent()));
        bills
    }

    #[test]
    fn test_actions_count_down_to_due() {
        let mut bills = bills_with_rent();
        assert!(!bills.is_due("rent"));

        bills.record_action("rent", 7);
        assert!(!bills.is_due("rent"));
        assert!(bills.is_due_soon("rent", 3));

        bills.record_action("rent", 3);
        assert!(bills.is_due("rent"));

        // Extra actions floor at zero rather than wrapping.
        bills.record_action("rent", 5);
        assert_eq!(bills.get("rent").unwrap().actions_remaining, 0);
    }

    #[test]
    fn test_failed_payment_changes_nothing() {
        let mut bills = bills_with_rent();
        let mut ledger = Ledger::default();
        ledger.try_spend_money(ledger.money); // drain the wallet

        bills.record_action("rent", 10);
        let before = bills.get("rent").unwrap().clone();

        assert!(!bills.pay("rent", &mut ledger));
        assert_eq!(bills.get("rent").unwrap(), &before);
        assert!(bills.is_due("rent"));
        assert_eq!(ledger.money, 0);
    }

    #[test]
    fn test_payment_starts_next_cycle_with_increase() {
        let mut bills = bills_with_rent();
        let mut ledger = Ledger::default();

        bills.record_action("rent", 10);
        assert!(bills.pay("rent", &mut ledger));
        assert_eq!(ledger.money, STARTING_MONEY - 50);

        let bill = bills.get("rent").unwrap();
        assert!(!bill.is_paid);
        assert_eq!(bill.actions_remaining, 10);
        assert_eq!(bill.current_amount, 60);
        assert!(!bills.is_due("rent"));
    }

    #[test]
    fn test_unknown_bill() {
        let mut bills = bills_with_rent();
        let mut ledger = Ledger::default();
        assert!(!bills.record_action("electricity", 1));
        assert!(!bills.is_due("electricity"));
        assert!(!bills.pay("electricity", &mut ledger));
        assert_eq!(ledger.money, STARTING_MONEY);
    }
}
