// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod codec;
pub mod map;
pub mod session;
pub mod sorter;
pub mod store;
pub mod validator;

pub use codec::CodecError;
pub use session::{Clock, FormState, SessionError, WorkoutSession};
pub use sorter::SortKey;
pub use store::{StoreError, WorkoutStore};
pub use self::validator::{Field, FieldError, Measurements};
