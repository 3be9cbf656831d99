use crate::billing::{BillCycle, Bills};
use crate::shared::*;

/// Create the recurring bills. Each countdown is measured in sales, not
/// wall time, and every payment bumps the next cycle's amount.
pub fn populate_bills(bills: &mut Bills) {
    let defs: Vec<BillDef> = vec![
        BillDef {
            id: "rent".into(),
            name: "Rent".into(),
            base_amount: 50,
            recurring_increase: 10,
            actions_per_cycle: 10,
        },
        BillDef {
            id: "electricity".into(),
            name: "Electricity".into(),
            base_amount: 15,
            recurring_increase: 5,
            actions_per_cycle: 8,
        },
        BillDef {
            id: "water".into(),
            name: "Water".into(),
            base_amount: 10,
            recurring_increase: 2,
            actions_per_cycle: 12,
        },
    ];

    for def in defs {
        bills.bills.insert(def.id.clone(), BillCycle::from_def(&def));
    }
}
