//! Account IDs for use in tests.
//!
//! Each value sets the two most significant bits to the desired account type and carries enough
//! one-bits in the remaining prefix to pass ID validation.

// CONSTANTS
// --------------------------------------------------------------------------------------------

// REGULAR ACCOUNTS
pub const ACCOUNT_ID_SENDER: u64 = 0b0110111011u64 << 54;
pub const ACCOUNT_ID_REGULAR_ACCOUNT_IMMUTABLE_CODE: u64 = 0b0010011011u64 << 54;
pub const ACCOUNT_ID_REGULAR_ACCOUNT_UPDATABLE_CODE: u64 = 0b0110101011u64 << 54;

// FUNGIBLE FAUCETS
pub const ACCOUNT_ID_FUNGIBLE_FAUCET: u64 = 0b1010011100u64 << 54;
pub const ACCOUNT_ID_FUNGIBLE_FAUCET_1: u64 = 0b1010101010u64 << 54;
pub const ACCOUNT_ID_FUNGIBLE_FAUCET_2: u64 = 0b1011110110u64 << 54;

// NON-FUNGIBLE FAUCETS
pub const ACCOUNT_ID_NON_FUNGIBLE_FAUCET: u64 = 0b1110011100u64 << 54;
pub const ACCOUNT_ID_NON_FUNGIBLE_FAUCET_1: u64 = 0b1110101101u64 << 54;

// TESTS
// ================================================================================================
