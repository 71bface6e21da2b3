// src/common/format.rs

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formatação pt-BR usada por todas as páginas (moeda, data, percentual).
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    offset: FixedOffset,
}

impl Formatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// R$ 1.234,56 (com espaço não separável, como o Intl do navegador).
    pub fn currency(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        let digits = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        format!("{}R$\u{a0}{},{}", sign, group_thousands(int_part), frac_part)
    }

    /// dd/mm/aaaa, hh:mm no fuso configurado.
    pub fn date_time(&self, value: &DateTime<Utc>) -> String {
        value
            .with_timezone(&self.offset)
            .format("%d/%m/%Y, %H:%M")
            .to_string()
    }

    /// Razão × 100 (0.05 -> "5%").
    pub fn percent(&self, ratio: Decimal) -> String {
        let value = (ratio * Decimal::ONE_HUNDRED).normalize();
        format!("{}%", value.to_string().replace('.', ","))
    }

    /// Número simples com vírgula decimal (pesos, custos sem moeda).
    pub fn number(&self, value: Decimal) -> String {
        value.normalize().to_string().replace('.', ",")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
