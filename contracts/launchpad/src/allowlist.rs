//! Allowlist membership proofs.
//!
//! The operator publishes the root of a binary hash tree built offline over
//! `(beneficiary, allocation_cap)` leaves. A proof is the ordered list of
//! sibling hashes from the leaf up to the root. Each level hashes the smaller
//! of the two nodes first, so proofs carry no left/right flags.
//!
//! Leaf: `sha256(xdr(beneficiary) || allocation_cap.to_be_bytes())`.
//! Node: `sha256(min(a, b) || max(a, b))`.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

/// Proofs deeper than this cannot come from a tree of realistic size.
pub const MAX_PROOF_DEPTH: u32 = 32;

/// Hash a `(beneficiary, allocation_cap)` pair into a tree leaf.
pub fn leaf_hash(env: &Env, beneficiary: &Address, allocation_cap: i128) -> BytesN<32> {
    let mut payload = Bytes::new(env);
    payload.append(&beneficiary.clone().to_xdr(env));
    payload.extend_from_array(&allocation_cap.to_be_bytes());
    env.crypto().sha256(&payload).into()
}

/// Order-independent parent hash of two nodes.
pub fn hash_pair(env: &Env, a: &BytesN<32>, b: &BytesN<32>) -> BytesN<32> {
    let (a, b) = (a.to_array(), b.to_array());
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut payload = Bytes::from_array(env, &left);
    payload.extend_from_array(&right);
    env.crypto().sha256(&payload).into()
}

/// Recompute the root from `leaf` and `proof` and compare it to `root`.
///
/// An empty proof only matches a single-leaf tree, i.e. `leaf == root`.
pub fn verify(env: &Env, proof: &Vec<BytesN<32>>, root: &BytesN<32>, leaf: &BytesN<32>) -> bool {
    if proof.len() > MAX_PROOF_DEPTH {
        return false;
    }
    let mut computed = leaf.clone();
    for sibling in proof.iter() {
        computed = hash_pair(env, &computed, &sibling);
    }
    computed == *root
}

/// Check that `beneficiary` may buy up to `allocation_cap` under `root`.
pub fn verify_allocation(
    env: &Env,
    proof: &Vec<BytesN<32>>,
    root: &BytesN<32>,
    beneficiary: &Address,
    allocation_cap: i128,
) -> bool {
    verify(env, proof, root, &leaf_hash(env, beneficiary, allocation_cap))
}
