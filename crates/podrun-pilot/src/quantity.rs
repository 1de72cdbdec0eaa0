//! Resource quantity parsing.
//!
//! Accepts the cluster quantity grammar:
//!
//! ```text
//! quantity      ::= signedNumber suffix
//! signedNumber  ::= [+-] number
//! number        ::= digits | digits "." digits | digits "." | "." digits
//! suffix        ::= binarySI | decimalExponent | decimalSI
//! binarySI      ::= Ki | Mi | Gi | Ti | Pi | Ei
//! decimalSI     ::= m | "" | k | M | G | T | P | E
//! decimalExponent ::= ("e" | "E") [+-] digits
//! ```

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use crate::error::{PilotError, Result};

const BINARY_SI: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const DECIMAL_SI: [&str; 8] = ["m", "", "k", "M", "G", "T", "P", "E"];

/// Parse `value` as a quantity, naming `field` in the error on failure.
pub fn parse_quantity(field: &'static str, value: &str) -> Result<Quantity> {
    if is_valid_quantity(value) {
        Ok(Quantity(value.to_string()))
    } else {
        Err(PilotError::InvalidQuantity {
            field,
            value: value.to_string(),
        })
    }
}

fn is_valid_quantity(s: &str) -> bool {
    let unsigned = strip_sign(s);
    let number_len = unsigned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unsigned.len());
    let (number, suffix) = unsigned.split_at(number_len);

    is_number(number) && is_suffix(suffix)
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s)
}

fn is_number(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let frac = parts.next().unwrap_or_default();

    (!whole.is_empty() || !frac.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && frac.chars().all(|c| c.is_ascii_digit())
}

fn is_suffix(s: &str) -> bool {
    if BINARY_SI.contains(&s) || DECIMAL_SI.contains(&s) {
        return true;
    }
    match s.strip_prefix(|c: char| c == 'e' || c == 'E') {
        Some(exponent) => {
            let digits = strip_sign(exponent);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
