//! Presentation of monetary amounts as `pt-BR` currency text.

use balcao_core::MonetaryAmount;

/// Format an amount the way the dashboard shows money: `R$` prefix,
/// dot-grouped integer part, comma before the two decimal digits
/// (`123456` centavos renders as `"R$ 1.234,56"`).
pub fn format_brl(amount: MonetaryAmount) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let reais = group_thousands(magnitude / 100);
    let centavos = magnitude % 100;
    format!("{sign}R$ {reais},{centavos:02}")
}

/// Insert a `.` every three digits, counting from the right.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
