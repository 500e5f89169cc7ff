// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod jobs;
pub mod ledger;
pub mod lifecycle;
pub mod schedule;
