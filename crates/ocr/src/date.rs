use slipsort_core::ReceiptDate;

use crate::normalize::NormalizedText;

re!(re_numeric, r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})\b");
re!(re_day_month_name,
    r"(?i)\b(\d{1,2})\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{2,4})\b");
re!(re_month_name_day,
    r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2}),?\s+(\d{2,4})\b");
re!(re_iso, r"\b(\d{4})-(\d{2})-(\d{2})\b");

/// Find the receipt's transaction date in normalized text.
///
/// Pattern classes are tried in priority order: numeric day/month,
/// spelled-out month, then ISO. The first class with any valid match
/// wins; within a class the leftmost match wins. Candidates that are
/// not valid calendar dates are skipped and scanning continues.
pub fn extract_date(text: &NormalizedText) -> Option<ReceiptDate> {
    let haystack = text.text();
    if let Some(d) = scan_numeric(haystack) {
        return Some(d);
    }
    if let Some(d) = scan_month_name(haystack) {
        return Some(d);
    }
    scan_iso(haystack)
}

fn scan_numeric(text: &str) -> Option<ReceiptDate> {
    re_numeric().captures_iter(text).find_map(|caps| {
        let a: u32 = caps.get(1)?.as_str().parse().ok()?;
        let b: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year = expand_year(caps.get(3)?.as_str().parse().ok()?);
        // A leading component that can only be a day flips to day-first.
        let (month, day) = if a <= 12 { (a, b) } else { (b, a) };
        ReceiptDate::from_ymd(year, month, day)
    })
}

fn scan_month_name(text: &str) -> Option<ReceiptDate> {
    // "15 June 2024" and "June 15, 2024" are the same priority class;
    // merge the candidates of both shapes and take the leftmost valid one.
    let mut candidates: Vec<(usize, Option<ReceiptDate>)> = Vec::new();

    for caps in re_day_month_name().captures_iter(text) {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        let parsed = (|| {
            let day: u32 = caps.get(1)?.as_str().parse().ok()?;
            let month = month_from_prefix(caps.get(2)?.as_str())?;
            let year = expand_year(caps.get(3)?.as_str().parse().ok()?);
            ReceiptDate::from_ymd(year, month, day)
        })();
        candidates.push((start, parsed));
    }
    for caps in re_month_name_day().captures_iter(text) {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        let parsed = (|| {
            let month = month_from_prefix(caps.get(1)?.as_str())?;
            let day: u32 = caps.get(2)?.as_str().parse().ok()?;
            let year = expand_year(caps.get(3)?.as_str().parse().ok()?);
            ReceiptDate::from_ymd(year, month, day)
        })();
        candidates.push((start, parsed));
    }

    candidates.sort_by_key(|(start, _)| *start);
    candidates.into_iter().find_map(|(_, parsed)| parsed)
}

fn scan_iso(text: &str) -> Option<ReceiptDate> {
    re_iso().captures_iter(text).find_map(|caps| {
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        let day: u32 = caps.get(3)?.as_str().parse().ok()?;
        ReceiptDate::from_ymd(year, month, day)
    })
}

/// Two-digit years pivot at 50: 00–49 → 2000s, 50–99 → 1900s.
fn expand_year(y: i32) -> i32 {
    match y {
        0..=49 => 2000 + y,
        50..=99 => 1900 + y,
        _ => y,
    }
}

fn month_from_prefix(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" => Some(1), "feb" => Some(2), "mar" => Some(3), "apr" => Some(4),
        "may" => Some(5), "jun" => Some(6), "jul" => Some(7), "aug" => Some(8),
        "sep" => Some(9), "oct" => Some(10), "nov" => Some(11), "dec" => Some(12),
        _ => None,
    }
}
