use crate::{format::StatusBucket, transaction::Direction};

/// How the digits of the major units are grouped with thousands separators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Grouping {
    /// The Indian numbering system: the last three digits, then groups of two (12,34,567).
    #[default]
    Indian,
    /// Groups of three digits (1,234,567).
    Western,
}

/// Formats amounts stored as integer minor units as a currency string with
/// exactly two decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// The currency symbol placed before the amount, e.g. "₹".
    pub symbol: String,
    /// How to group the digits of the major units.
    pub grouping: Grouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_owned(),
            grouping: Grouping::Indian,
        }
    }
}

impl CurrencyFormat {
    /// Format `amount` minor units, e.g. `1234567` as "₹12,345.67".
    ///
    /// Only integer arithmetic is used, so no amount is ever rounded.
    pub fn format_minor_units(&self, amount: i64) -> String {
        let sign = if amount < 0 { "-" } else { "" };
        let amount = amount.unsigned_abs();
        let major = (amount / 100).to_string();
        let minor = amount % 100;

        format!(
            "{sign}{}{}.{minor:02}",
            self.symbol,
            group_digits(&major, self.grouping)
        )
    }

    /// Format `amount` with a sign that shows which way the money moved.
    ///
    /// Credits get a "+" prefix and debits get a "-" prefix. Pending amounts
    /// have not moved yet and are shown without a sign.
    pub fn format_signed(&self, amount: i64, direction: Direction, status: &str) -> String {
        let formatted = self.format_minor_units(amount);

        if StatusBucket::classify(status) == StatusBucket::Pending {
            return formatted;
        }

        match direction {
            Direction::Credit => format!("+{formatted}"),
            Direction::Debit => format!("-{formatted}"),
        }
    }
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    match grouping {
        Grouping::Western => group_from_right(digits, 3).join(","),
        Grouping::Indian => {
            if digits.len() <= 3 {
                return digits.to_owned();
            }

            let (head, tail) = digits.split_at(digits.len() - 3);
            let mut groups = group_from_right(head, 2);
            groups.push(tail);
            groups.join(",")
        }
    }
}

/// Split an ASCII digit string into groups of `size` counting from the right.
fn group_from_right(digits: &str, size: usize) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut end = digits.len();

    while end > size {
        groups.push(&digits[end - size..end]);
        end -= size;
    }

    groups.push(&digits[..end]);
    groups.reverse();
    groups
}

#[cfg(test)]
mod tests {
    use crate::transaction::Direction;

    use super::{CurrencyFormat, Grouping};

    fn western() -> CurrencyFormat {
        CurrencyFormat {
            symbol: "$".to_owned(),
            grouping: Grouping::Western,
        }
    }

    #[test]
    fn formats_whole_major_units() {
        assert_eq!(CurrencyFormat::default().format_minor_units(50000), "₹500.00");
    }

    #[test]
    fn always_shows_two_decimal_digits() {
        let format = CurrencyFormat::default();

        assert_eq!(format.format_minor_units(0), "₹0.00");
        assert_eq!(format.format_minor_units(5), "₹0.05");
        assert_eq!(format.format_minor_units(130), "₹1.30");
        assert_eq!(format.format_minor_units(99_999), "₹999.99");
    }

    #[test]
    fn groups_digits_the_indian_way() {
        let format = CurrencyFormat::default();

        assert_eq!(format.format_minor_units(1_000_00), "₹1,000.00");
        assert_eq!(format.format_minor_units(12_345_00), "₹12,345.00");
        assert_eq!(format.format_minor_units(1_234_567_89), "₹12,34,567.89");
        assert_eq!(format.format_minor_units(123_456_789_00), "₹12,34,56,789.00");
    }

    #[test]
    fn groups_digits_the_western_way() {
        let format = western();

        assert_eq!(format.format_minor_units(999_00), "$999.00");
        assert_eq!(format.format_minor_units(1_234_567_89), "$1,234,567.89");
    }

    #[test]
    fn negative_amounts_have_leading_minus() {
        assert_eq!(western().format_minor_units(-1_234_56), "-$1,234.56");
    }

    #[test]
    fn handles_extreme_values() {
        let format = western();

        assert_eq!(
            format.format_minor_units(i64::MIN),
            "-$92,233,720,368,547,758.08"
        );
        assert_eq!(
            format.format_minor_units(i64::MAX),
            "$92,233,720,368,547,758.07"
        );
    }

    #[test]
    fn repeated_calls_give_same_result() {
        let format = CurrencyFormat::default();

        let first = format.format_minor_units(2_500_050);
        let second = format.format_minor_units(2_500_050);

        assert_eq!(first, second);
        assert_eq!(first, "₹25,000.50");
    }

    #[test]
    fn credit_is_prefixed_with_plus() {
        let format = CurrencyFormat::default();

        assert_eq!(
            format.format_signed(10000, Direction::Credit, "success"),
            "+₹100.00"
        );
    }

    #[test]
    fn debit_is_prefixed_with_minus() {
        let format = CurrencyFormat::default();

        assert_eq!(
            format.format_signed(10000, Direction::Debit, "Completed"),
            "-₹100.00"
        );
    }

    #[test]
    fn pending_amounts_are_unsigned() {
        let format = CurrencyFormat::default();

        assert_eq!(
            format.format_signed(25000, Direction::Credit, "Processing"),
            "₹250.00"
        );
        assert_eq!(
            format.format_signed(25000, Direction::Debit, "PENDING"),
            "₹250.00"
        );
    }

    #[test]
    fn failed_amounts_keep_their_sign() {
        let format = CurrencyFormat::default();

        assert_eq!(
            format.format_signed(100, Direction::Credit, "failed"),
            "+₹1.00"
        );
    }
}
