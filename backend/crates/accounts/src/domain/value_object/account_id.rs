//! AccountId Value Object
//!
//! Internal primary key for accounts. Never serialized into API responses;
//! clients only ever see the [`PublicId`](super::public_id::PublicId).

pub use kernel::id::AccountId;
