extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::test::{sale_params, Setup, END, FEE_BPS, PRICE, START, UNIT};
use crate::{Error, FeeConfig, Launchpad, LaunchpadClient, SalePhase, SaleState};

fn bare_client() -> (Env, LaunchpadClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(Launchpad, ());
    let client = LaunchpadClient::new(&env, &contract_id);
    (env, client)
}

#[test]
fn test_init_once() {
    let s = Setup::new();
    assert_eq!(s.client.owner(), s.owner);
    assert_eq!(
        s.client.fee_config(),
        FeeConfig {
            fee_bps: FEE_BPS,
            fee_recipient: s.fee_recipient.clone(),
        }
    );

    let intruder = Address::generate(&s.env);
    assert_eq!(
        s.client.try_init(&intruder, &0, &intruder),
        Err(Ok(Error::AlreadyInitialized))
    );
    assert_eq!(s.client.owner(), s.owner);
}

#[test]
fn test_calls_before_init() {
    let (env, client) = bare_client();
    let token = Address::generate(&env);
    let params = sale_params(&env, &token, &token);
    let operator = Address::generate(&env);

    assert_eq!(
        client.try_create_launchpad(&operator, &params),
        Err(Ok(Error::NotInitialized))
    );
    assert_eq!(client.try_owner(), Err(Ok(Error::NotInitialized)));
    assert_eq!(client.try_set_protocol_fee(&100), Err(Ok(Error::NotInitialized)));
    assert_eq!(client.sale_count(), 0);
}

#[test]
fn test_protocol_fee_bounds() {
    let (env, client) = bare_client();
    let owner = Address::generate(&env);
    assert_eq!(
        client.try_init(&owner, &1_001, &owner),
        Err(Ok(Error::InvalidProtocolFee))
    );
    client.init(&owner, &1_000, &owner);

    assert_eq!(
        client.try_set_protocol_fee(&5_000),
        Err(Ok(Error::InvalidProtocolFee))
    );
    client.set_protocol_fee(&0);
    assert_eq!(client.fee_config().fee_bps, 0);
}

#[test]
fn test_fee_changes_only_reach_new_sales() {
    let s = Setup::new();
    let new_recipient = Address::generate(&s.env);
    s.client.set_protocol_fee(&800);
    s.client.set_fee_recipient(&new_recipient);

    let params = sale_params(&s.env, &s.sale_token.address, &s.payment_token.address);
    let later = s.client.create_launchpad(&s.operator, &params);

    let first = s.client.get_sale(&s.sale_id).config;
    assert_eq!(first.fee_bps, FEE_BPS);
    assert_eq!(first.fee_recipient, s.fee_recipient);

    let second = s.client.get_sale(&later).config;
    assert_eq!(second.fee_bps, 800);
    assert_eq!(second.fee_recipient, new_recipient);
}

#[test]
fn test_created_sale_fields() {
    let s = Setup::new();
    let sale = s.client.get_sale(&s.sale_id);

    assert_eq!(sale.config.id, 0);
    assert_eq!(sale.config.name, String::from_str(&s.env, "Genesis Sale"));
    assert_eq!(sale.config.operator, s.operator);
    assert_eq!(sale.config.sale_token, s.sale_token.address);
    assert_eq!(sale.config.payment_token, s.payment_token.address);
    assert_eq!(sale.config.token_unit, UNIT);
    assert_eq!(sale.config.price, PRICE);
    assert_eq!(sale.config.allowlist_root, None);
    assert_eq!(sale.state, SaleState::default());
    assert!(!sale.trusted);
    assert_eq!(s.client.phase(&s.sale_id), SalePhase::Unvalidated);
}

#[test]
fn test_create_rejects_bad_parameters() {
    let s = Setup::new();
    let base = sale_params(&s.env, &s.sale_token.address, &s.payment_token.address);

    let mut params = base.clone();
    params.price = 0;
    assert_eq!(
        s.client.try_create_launchpad(&s.operator, &params),
        Err(Ok(Error::InvalidPrice))
    );

    let mut params = base.clone();
    params.start_date = END;
    params.end_date = START;
    assert_eq!(
        s.client.try_create_launchpad(&s.operator, &params),
        Err(Ok(Error::InvalidDates))
    );

    let mut params = base;
    params.min_token_buy = -1;
    assert_eq!(
        s.client.try_create_launchpad(&s.operator, &params),
        Err(Ok(Error::InvalidAmount))
    );

    assert_eq!(s.client.sale_count(), 1);
}

#[test]
fn test_sale_ids_are_sequential_and_listable() {
    let s = Setup::new();
    let params = sale_params(&s.env, &s.sale_token.address, &s.payment_token.address);
    for expected in 1..5u64 {
        assert_eq!(s.client.create_launchpad(&s.operator, &params), expected);
    }
    assert_eq!(s.client.sale_count(), 5);

    let page = s.client.list_sales(&1, &3);
    assert_eq!(page.len(), 3);
    assert_eq!(page.get(0).unwrap().config.id, 1);
    assert_eq!(page.get(2).unwrap().config.id, 3);

    let tail = s.client.list_sales(&4, &10);
    assert_eq!(tail.len(), 1);
    assert_eq!(tail.get(0).unwrap().config.id, 4);

    assert_eq!(s.client.list_sales(&9, &10).len(), 0);
}

#[test]
fn test_list_sales_page_is_bounded() {
    let s = Setup::new();
    let params = sale_params(&s.env, &s.sale_token.address, &s.payment_token.address);
    for _ in 0..60 {
        s.client.create_launchpad(&s.operator, &params);
    }
    let page = s.client.list_sales(&0, &u32::MAX);
    assert_eq!(page.len(), crate::registry::MAX_PAGE_SIZE);
}

#[test]
fn test_trusted_flag() {
    let s = Setup::new();
    assert!(!s.client.is_trusted(&s.sale_id));

    s.client.set_trusted(&s.sale_id, &true);
    assert!(s.client.is_trusted(&s.sale_id));
    assert!(s.client.get_sale(&s.sale_id).trusted);

    s.client.set_trusted(&s.sale_id, &false);
    assert!(!s.client.is_trusted(&s.sale_id));

    assert_eq!(
        s.client.try_set_trusted(&42, &true),
        Err(Ok(Error::SaleNotFound))
    );
}

#[test]
fn test_transfer_ownership() {
    let s = Setup::new();
    let successor = Address::generate(&s.env);
    s.client.transfer_ownership(&successor);
    assert_eq!(s.client.owner(), successor);
}

#[test]
fn test_registry_updates_are_signed_by_owner() {
    let s = Setup::new();
    let owner = std::vec![s.owner.clone()];

    s.client.set_protocol_fee(&250);
    assert_eq!(s.signers_of("set_protocol_fee"), owner);
    s.client.set_fee_recipient(&Address::generate(&s.env));
    assert_eq!(s.signers_of("set_fee_recipient"), owner);
    s.client.set_trusted(&s.sale_id, &true);
    assert_eq!(s.signers_of("set_trusted"), owner);

    let successor = Address::generate(&s.env);
    s.client.transfer_ownership(&successor);
    let signers = s.signers_of("transfer_ownership");
    assert_eq!(signers.len(), 2);
    assert!(signers.contains(&s.owner) && signers.contains(&successor));

    // The old owner no longer holds the gate.
    s.client.set_trusted(&s.sale_id, &false);
    assert_eq!(s.signers_of("set_trusted"), std::vec![successor]);
}

#[test]
fn test_create_is_signed_by_operator() {
    let s = Setup::new();
    let operator = Address::generate(&s.env);
    let params = sale_params(&s.env, &s.sale_token.address, &s.payment_token.address);
    s.client.create_launchpad(&operator, &params);
    assert_eq!(s.signers_of("create_launchpad"), std::vec![operator]);
}

#[test]
#[should_panic]
fn test_init_requires_owner_signature() {
    let env = Env::default();
    let contract_id = env.register(Launchpad, ());
    let client = LaunchpadClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.init(&owner, &FEE_BPS, &owner);
}
