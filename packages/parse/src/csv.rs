//! Quote-aware CSV line splitting.
//!
//! The PLUTO-derived extracts quote fields containing commas (owner names
//! like `"SMITH, JOHN"`) and escape embedded quotes by doubling them. The
//! stock line splitter here handles both; malformed quoting (an unterminated
//! quote) is accepted to end-of-line rather than rejected, since the
//! pipeline's error policy for data quality is "skip and tally", not abort.

/// Splits one CSV line into its fields.
///
/// Commas inside quoted fields are literal, doubled quotes inside quoted
/// fields unescape to a single quote, and a trailing comma yields a trailing
/// empty field.
#[must_use]
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
