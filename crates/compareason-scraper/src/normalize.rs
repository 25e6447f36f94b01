//! Conversion of scraped price text into a [`Price`].

use compareason_core::Price;

/// Currency glyph stripped before digits are collected.
pub const RUPEE: char = '₹';

/// Normalizes raw price text into a [`Price`].
///
/// The currency glyph and `,` separators are removed, then every run of
/// ASCII digits in the remainder is concatenated, in order, into one integer:
/// `"₹1,23,456"` becomes `123456`. Text with no digits, or with more digits
/// than fit in a `u64`, is returned untouched as [`Price::Raw`].
///
/// Decimal points are not special: `"₹1,299.00"` yields `129900`.
#[must_use]
pub fn normalize_price(raw: &str) -> Price {
    // Dropping every non-digit strips the glyph and separators and joins the runs.
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Price::Raw(raw.to_owned());
    }

    match digits.parse::<u64>() {
        Ok(amount) => Price::Amount(amount),
        Err(e) => {
            tracing::debug!(raw, error = %e, "price digits do not fit u64; keeping raw text");
            Price::Raw(raw.to_owned())
        }
    }
}
