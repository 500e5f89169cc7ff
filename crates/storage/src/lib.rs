// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer: durable key-value store and the execution ledger on top.

mod kv;
mod ledger;

pub use kv::{FsStoreWriter, KvStore, StoreError, StoreWriter, Transaction, CURRENT_STORE_VERSION};
pub use ledger::{ExecutionLedger, ExecutionRecord};
