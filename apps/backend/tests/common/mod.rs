#![allow(dead_code)]

// tests/common/mod.rs

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Policy defaults to rollback but can be flipped per-binary via `CHUTES_TXN_POLICY=commit`.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("CHUTES_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "commit" => backend::db::txn_policy::TxnPolicy::CommitOnOk,
        _ => backend::db::txn_policy::TxnPolicy::RollbackOnOk,
    };

    backend::db::txn_policy::set_txn_policy(policy);
}
