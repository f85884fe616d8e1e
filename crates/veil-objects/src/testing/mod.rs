pub mod account_id;
