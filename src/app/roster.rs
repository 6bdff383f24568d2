//! Pasted roster -> TransferBatch. Rows are tab separated:
//! label, recipient address, amount in whole tokens. The label column is
//! whatever the spreadsheet had in it and is ignored.

use anyhow::Result;
use thiserror::Error;

use alloy::primitives::{Address, U256};
use bitto::token::TransferBatch;
use bitto::units::parse_token;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster is empty, paste at least one tab separated row")]
    Empty,
    #[error("line {line}: expected at least 3 tab separated fields (label, address, amount), got {got}")]
    MissingFields { line: usize, got: usize },
    #[error("line {line}: bad recipient address `{value}`")]
    BadAddress { line: usize, value: String },
    #[error("line {line}: bad amount `{value}`: {reason}")]
    BadAmount {
        line: usize,
        value: String,
        reason: String,
    },
    #[error("line {line}: amount must be greater than zero")]
    ZeroAmount { line: usize },
}

/// Parse pasted rows into parallel recipient/value columns, preserving
/// line order. Blank lines and trailing carriage returns are tolerated;
/// everything else that is malformed fails with its line number instead
/// of leaking garbage into the submitted call.
pub fn parse_roster(text: &str) -> Result<TransferBatch> {
    let mut recipients: Vec<Address> = Vec::new();
    let mut values: Vec<U256> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let row = raw.trim_end_matches('\r');
        if row.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < 3 {
            return Err(RosterError::MissingFields {
                line,
                got: fields.len(),
            }
            .into());
        }

        let addr: Address = fields[1].trim().parse().map_err(|_| RosterError::BadAddress {
            line,
            value: fields[1].trim().to_string(),
        })?;

        let value = parse_token(fields[2]).map_err(|e| RosterError::BadAmount {
            line,
            value: fields[2].trim().to_string(),
            reason: e.to_string(),
        })?;
        if value.is_zero() {
            return Err(RosterError::ZeroAmount { line }.into());
        }

        recipients.push(addr);
        values.push(value);
    }

    if recipients.is_empty() {
        return Err(RosterError::Empty.into());
    }
    TransferBatch::new(recipients, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_err(text: &str) -> RosterError {
        parse_roster(text)
            .unwrap_err()
            .downcast::<RosterError>()
            .expect("expected a roster error")
    }

    #[test]
    fn n_rows_give_n_pairs_in_line_order() {
        let text = "Alice\t0x1111111111111111111111111111111111111111\t1\n\
                    Bob\t0x2222222222222222222222222222222222222222\t2\n\
                    Carol\t0x3333333333333333333333333333333333333333\t3\n";
        let batch = parse_roster(text).unwrap();
        assert_eq!(batch.len(), 3);
        for (i, expected) in ["0x1111", "0x2222", "0x3333"].iter().enumerate() {
            assert!(format!("{:?}", batch.recipients()[i]).starts_with(expected));
            assert_eq!(
                batch.values()[i],
                U256::from(i as u64 + 1) * U256::from(10u64).pow(U256::from(18u64))
            );
        }
    }

    #[test]
    fn sample_row_scales_amount() {
        let text = "Alice\t0x4Bbeeb066eD09B7AEd07bF39EEe0460DFa261520\t2.5";
        let batch = parse_roster(text).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch.values()[0],
            U256::from(2_500_000_000_000_000_000u128)
        );
        assert_eq!(
            batch.recipients()[0],
            "0x4Bbeeb066eD09B7AEd07bF39EEe0460DFa261520".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn tolerates_blank_lines_and_crlf() {
        let text = "\r\nAlice\t0x1111111111111111111111111111111111111111\t1\r\n\r\n";
        let batch = parse_roster(text).unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn short_rows_fail_with_line_number() {
        let text = "Alice\t0x1111111111111111111111111111111111111111\t1\nBob\t0x2222";
        assert!(matches!(
            roster_err(text),
            RosterError::MissingFields { line: 2, got: 2 }
        ));
    }

    #[test]
    fn bad_address_fails_with_line_number() {
        let text = "Alice\tnot-an-address\t1";
        assert!(matches!(
            roster_err(text),
            RosterError::BadAddress { line: 1, .. }
        ));
    }

    #[test]
    fn bad_amount_fails_instead_of_propagating_nan() {
        let text = "Alice\t0x1111111111111111111111111111111111111111\tlots";
        assert!(matches!(
            roster_err(text),
            RosterError::BadAmount { line: 1, .. }
        ));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let text = "Alice\t0x1111111111111111111111111111111111111111\t0";
        assert!(matches!(roster_err(text), RosterError::ZeroAmount { line: 1 }));
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert!(matches!(roster_err(""), RosterError::Empty));
        assert!(matches!(roster_err("\n  \n"), RosterError::Empty));
    }

    #[test]
    fn extra_fields_beyond_amount_are_ignored() {
        let text = "Alice\t0x1111111111111111111111111111111111111111\t1\tpaid\tQ3";
        let batch = parse_roster(text).unwrap();
        assert_eq!(batch.len(), 1);
    }
}
