pub mod account_id;
pub mod public_id;
