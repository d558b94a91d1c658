// src/common/format.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

pub const NON_SPECIFIE: &str = "Non spécifié";
pub const NON_RENSEIGNE: &str = "NON RENSEIGNÉ";
pub const NA: &str = "N/A";

const MOIS_LONGS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin",
    "juillet", "août", "septembre", "octobre", "novembre", "décembre",
];

/// `05/03/2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `05 mars 2025`
pub fn format_date_long(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MOIS_LONGS[date.month0() as usize],
        date.year()
    )
}

/// Montante em FCFA com separador de milhares: `1 250 000`.
/// Centavos só aparecem quando existem (`1 250,50`).
pub fn format_montant(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let integer = abs.trunc().normalize();
    let fraction = abs - integer;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !fraction.is_zero() {
        let cents = (fraction * Decimal::from(100)).trunc().to_u32().unwrap_or(0);
        out.push_str(&format!(",{:02}", cents));
    }
    out
}

/// Texto ou o marcador quando ausente/vazio.
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn dates_are_day_first() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_date(d), "05/03/2025");
        assert_eq!(format_date_long(d), "05 mars 2025");

        let d = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        assert_eq!(format_date_long(d), "15 août 2024");
    }

    #[test]
    fn amounts_use_space_thousands_separator() {
        assert_eq!(format_montant(Decimal::from(0)), "0");
        assert_eq!(format_montant(Decimal::from(999)), "999");
        assert_eq!(format_montant(Decimal::from(1000)), "1 000");
        assert_eq!(format_montant(Decimal::from(1_250_000)), "1 250 000");
        assert_eq!(format_montant(Decimal::from_str("15000.00").unwrap()), "15 000");
        assert_eq!(format_montant(Decimal::from_str("1250.5").unwrap()), "1 250,50");
        assert_eq!(format_montant(Decimal::from(-4500)), "-4 500");
    }

    #[test]
    fn placeholder_replaces_missing_and_blank() {
        assert_eq!(or_placeholder(None, NON_SPECIFIE), "Non spécifié");
        assert_eq!(or_placeholder(Some("   "), NA), "N/A");
        assert_eq!(or_placeholder(Some("A12"), NA), "A12");
    }
}
