#![allow(dead_code)]

extern crate std;

use crate::types::{BuyerPosition, Sale, SaleConfig, SalePhase, SaleState};

/// INV-1: Sold tokens never exceed the deposited cap.
pub fn assert_cap_safety(state: &SaleState) {
    assert!(
        state.total_purchased <= state.total_cap,
        "INV-1 violated: total_purchased {} exceeds total_cap {}",
        state.total_purchased,
        state.total_cap
    );
}

/// INV-2: A buyer never claims more than they purchased.
pub fn assert_position_bounded(position: &BuyerPosition) {
    assert!(
        position.claimed >= 0 && position.claimed <= position.purchased,
        "INV-2 violated: claimed {} outside 0..={}",
        position.claimed,
        position.purchased
    );
}

/// INV-3: A buyer never holds more than the allocation in their proof.
pub fn assert_within_allocation(position: &BuyerPosition, allocation_cap: i128) {
    assert!(
        position.purchased <= allocation_cap,
        "INV-3 violated: purchased {} exceeds allocation {}",
        position.purchased,
        allocation_cap
    );
}

/// INV-4: Tokens still owed to buyers are always held by the sale.
pub fn assert_holdings_cover_claims(state: &SaleState) {
    let owed = state.total_purchased - state.total_claimed;
    assert!(
        state.token_balance >= owed,
        "INV-4 violated: token_balance {} below owed {}",
        state.token_balance,
        owed
    );
}

/// INV-5: Running totals never go negative.
pub fn assert_totals_non_negative(state: &SaleState) {
    assert!(state.total_cap >= 0, "INV-5 violated: negative total_cap");
    assert!(state.total_purchased >= 0, "INV-5 violated: negative total_purchased");
    assert!(state.total_claimed >= 0, "INV-5 violated: negative total_claimed");
    assert!(state.proceeds >= 0, "INV-5 violated: negative proceeds");
}

/// INV-6: Phases only move forward:
///   Unvalidated -> Pending -> Open -> VestingLocked -> Claimable
/// Skipping ahead is allowed (time may jump), going back is not.
pub fn assert_valid_phase_transition(from: &SalePhase, to: &SalePhase) {
    fn rank(phase: &SalePhase) -> u8 {
        match phase {
            SalePhase::Unvalidated => 0,
            SalePhase::Pending => 1,
            SalePhase::Open => 2,
            SalePhase::VestingLocked => 3,
            SalePhase::Claimable => 4,
        }
    }
    assert!(
        rank(to) >= rank(from),
        "INV-6 violated: invalid phase transition from {:?} to {:?}",
        from,
        to
    );
}

/// INV-7: Fields fixed at creation never change.
pub fn assert_creation_fields_immutable(original: &SaleConfig, current: &SaleConfig) {
    assert_eq!(original.id, current.id, "INV-7 violated: sale id changed");
    assert_eq!(
        original.sale_token, current.sale_token,
        "INV-7 violated: sale token changed"
    );
    assert_eq!(
        original.payment_token, current.payment_token,
        "INV-7 violated: payment token changed"
    );
    assert_eq!(
        original.token_unit, current.token_unit,
        "INV-7 violated: token unit changed"
    );
    assert_eq!(
        original.fee_bps, current.fee_bps,
        "INV-7 violated: fee snapshot changed"
    );
    assert_eq!(
        original.fee_recipient, current.fee_recipient,
        "INV-7 violated: fee recipient snapshot changed"
    );
}

/// INV-8: Dates of a validated sale never change.
pub fn assert_dates_frozen(original: &SaleConfig, current: &SaleConfig) {
    assert_eq!(
        (original.start_date, original.end_date),
        (current.start_date, current.end_date),
        "INV-8 violated: dates changed after validation"
    );
}

/// Run all stateless sale invariants.
pub fn assert_all_sale_invariants(sale: &Sale) {
    assert_cap_safety(&sale.state);
    assert_holdings_cover_claims(&sale.state);
    assert_totals_non_negative(&sale.state);
}
