// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer (local workout document).

pub mod local;

pub use local::{LocalStorage, StorageError};
