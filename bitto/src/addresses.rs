use alloy::primitives::address;
use alloy::primitives::Address;

pub const BITTO_TOKEN: Address = address!("0x5929590099b12ad2c63cb1b8812de9da2c707c3b");
