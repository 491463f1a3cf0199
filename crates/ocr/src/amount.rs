use slipsort_core::Money;

use crate::normalize::NormalizedText;

re!(re_amount, r"[$£€¥]?\s*((?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})");
re!(re_total_keyword,
    r"(?i)\b(?:grand\s+total|amount\s+due|balance(?:\s+due)?|total(?:\s+due)?|sum)\b");

/// Find the most likely grand total in normalized text.
///
/// Candidates are currency-shaped tokens ("$1,234.56", "45.67") bounded
/// by non-digit characters. Lines carrying a "total"-family keyword are
/// preferred: the last amount on the last such line wins, since the
/// final total sits below subtotal and tax on real receipts. With no
/// keyword line, the maximum candidate anywhere in the text wins.
pub fn extract_amount(text: &NormalizedText) -> Option<Money> {
    extract_amount_with(text, |line| re_total_keyword().is_match(line))
}

/// Same selection logic with a caller-supplied total-line predicate.
/// The keyword preference is a layout heuristic, not a guarantee, so it
/// stays replaceable.
pub fn extract_amount_with(
    text: &NormalizedText,
    is_total_line: impl Fn(&str) -> bool,
) -> Option<Money> {
    let mut keyword_pick: Option<Money> = None;
    let mut overall_max: Option<Money> = None;

    for line in text.lines() {
        let candidates = amounts_in_line(line);
        if candidates.is_empty() {
            continue;
        }
        if is_total_line(line) {
            keyword_pick = candidates.last().copied();
        }
        for value in candidates {
            overall_max = Some(overall_max.map_or(value, |m| m.max(value)));
        }
    }

    keyword_pick.or(overall_max)
}

/// All currency-shaped amounts on one line, left to right.
fn amounts_in_line(line: &str) -> Vec<Money> {
    re_amount()
        .captures_iter(line)
        .filter_map(|caps| {
            let m = caps.get(1)?;
            if !digit_bounded(line, m.start(), m.end()) {
                return None;
            }
            Money::parse_str(m.as_str())
        })
        .collect()
}

/// A candidate inside a longer numeric token (phone number, ID) is not
/// an amount: both neighbors of the match must be non-digits, and not
/// separators that would glue it to more digits.
fn digit_bounded(line: &str, start: usize, end: usize) -> bool {
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    let ok_before = !matches!(before, Some(c) if c.is_ascii_digit() || c == '.' || c == ',');
    let ok_after = !matches!(after, Some(c) if c.is_ascii_digit());
    ok_before && ok_after
}
