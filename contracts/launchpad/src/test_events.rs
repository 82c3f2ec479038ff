extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{
    CapIncreased, FundsWithdrawn, SaleCreated, TokensClaimed, TokensPurchased, TokensWithdrawn,
};
use crate::test::{
    sale_params, Setup, END, FEE_BPS, HARD_CAP, RELEASE_DELAY, TOKENS_FOR_VALUE, UNIT, VALUE,
    VESTING,
};

/// Sale events are published under `(symbol, sale_id)`.
fn assert_sale_topics(env: &Env, topics: Vec<Val>, name: Symbol, sale_id: u64) {
    let expected = vec![env, name.into_val(env), sale_id.into_val(env)];
    assert_eq!(topics, expected);
}

#[test]
fn test_sale_created_event() {
    let s = Setup::new();
    let params = sale_params(&s.env, &s.sale_token.address, &s.payment_token.address);
    let operator = Address::generate(&s.env);
    let sale_id = s.client.create_launchpad(&operator, &params);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, s.client.address);
    assert_sale_topics(&s.env, last_event.1, symbol_short!("created"), sale_id);

    let event_data: SaleCreated = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        SaleCreated {
            sale_id,
            operator,
            sale_token: s.sale_token.address.clone(),
            fee_bps: FEE_BPS,
        }
    );
}

#[test]
fn test_cap_increased_event() {
    let s = Setup::new();
    s.client.deposit_tokens(&s.sale_id, &(300 * UNIT));
    s.client.deposit_tokens(&s.sale_id, &(200 * UNIT));

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, s.client.address);
    assert_sale_topics(&s.env, last_event.1, symbol_short!("cap_inc"), s.sale_id);

    let event_data: CapIncreased = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        CapIncreased {
            amount: 200 * UNIT,
            total_cap: 500 * UNIT,
        }
    );
}

#[test]
fn test_tokens_purchased_event() {
    let s = Setup::open();
    s.buy(2, VALUE);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, s.client.address);
    assert_sale_topics(&s.env, last_event.1, symbol_short!("purchase"), s.sale_id);

    let event_data: TokensPurchased = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        TokensPurchased {
            asset: s.sale_token.address.clone(),
            beneficiary: s.buyers[2].clone(),
            amount: TOKENS_FOR_VALUE,
        }
    );
}

#[test]
fn test_tokens_claimed_event() {
    let s = Setup::open();
    s.buy(0, VALUE);
    s.set_time(END + RELEASE_DELAY + VESTING);
    s.client.claim_tokens(&s.sale_id, &s.buyers[0]);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, s.client.address);
    assert_sale_topics(&s.env, last_event.1, symbol_short!("claim"), s.sale_id);

    let event_data: TokensClaimed = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        TokensClaimed {
            asset: s.sale_token.address.clone(),
            beneficiary: s.buyers[0].clone(),
            amount: TOKENS_FOR_VALUE,
        }
    );
}

#[test]
fn test_funds_withdrawn_event() {
    let s = Setup::open();
    s.buy(0, UNIT);
    s.set_time(END);
    s.client.withdraw_proceeds(&s.sale_id);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, s.client.address);
    assert_sale_topics(&s.env, last_event.1, symbol_short!("wd_funds"), s.sale_id);

    let event_data: FundsWithdrawn = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            operator: s.operator.clone(),
            amount: 9_500_000,
            fee_recipient: s.fee_recipient.clone(),
            fee: 500_000,
        }
    );
}

#[test]
fn test_tokens_withdrawn_event() {
    let s = Setup::open();
    s.buy(0, VALUE);
    s.set_time(END);
    s.client.withdraw_tokens(&s.sale_id);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_sale_topics(&s.env, last_event.1, symbol_short!("wd_tokens"), s.sale_id);
    let event_data: TokensWithdrawn = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(event_data.operator, s.operator);
    assert_eq!(event_data.amount, HARD_CAP - TOKENS_FOR_VALUE);
}

#[test]
fn test_protocol_fee_event_has_registry_topic() {
    let s = Setup::new();
    s.client.set_protocol_fee(&250);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&s.env, symbol_short!("fee_set").into_val(&s.env)];
    assert_eq!(last_event.1, expected_topics);
    let fee: u32 = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(fee, 250);
}
