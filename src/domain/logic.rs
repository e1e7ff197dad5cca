// src/domain/logic.rs

/// Parses a numeric cell, keeping only strictly positive finite values.
/// Blank text, placeholders like "-" and zero all come back as `None`.
pub fn parse_positive(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Keeps a value only when it is a usable price or area.
pub fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Rounds a float into `u64`, rejecting anything negative, non-finite or too large to fit.
pub fn round_to_u64(value: f64) -> Option<u64> {
    let rounded = value.round();
    (rounded.is_finite() && rounded >= 0.0 && rounded < u64::MAX as f64).then_some(rounded as u64)
}

/// Converts portal price text (units of 10,000 KRW) into a number.
///
/// "5억 3,000" -> 53000, "12억" -> 120000, "9,500" -> 9500.
pub fn parse_price_text(raw: &str) -> Option<u64> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    if compact.is_empty() {
        return None;
    }

    let value = match compact.split_once('억') {
        Some((eok, rest)) => {
            let eok: u64 = eok.parse().ok()?;
            let rest: u64 = if rest.is_empty() { 0 } else { rest.parse().ok()? };
            eok.checked_mul(10_000)?.checked_add(rest)?
        }
        None => round_to_u64(compact.parse::<f64>().ok()?)?,
    };

    (value > 0).then_some(value)
}

/// Renders a price in units of 10,000 KRW the way the portal shows it.
pub fn format_price(price: u64) -> String {
    let eok = price / 10_000;
    let rest = price % 10_000;
    match (eok, rest) {
        (0, r) => group_thousands(r),
        (e, 0) => format!("{e}억"),
        (e, r) => format!("{e}억 {}", group_thousands(r)),
    }
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Median of integer prices; even counts average the two middle values, rounded.
pub fn median_u64(values: &[u64]) -> Option<u64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        let sum = u128::from(sorted[mid - 1]) + u128::from(sorted[mid]);
        Some(((sum + 1) / 2) as u64)
    }
}

/// Arithmetic mean, summed wide so large prices cannot overflow.
pub fn mean_u64(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u128 = values.iter().map(|v| u128::from(*v)).sum();
    Some(sum as f64 / values.len() as f64)
}

pub fn median_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Most frequent value; ties go to the lexicographically smallest.
pub fn mode<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for v in values {
        let v = v.trim();
        if !v.is_empty() {
            *counts.entry(v).or_default() += 1;
        }
    }
    // BTreeMap iterates in key order, so max_by_key's last-wins rule needs the reversal.
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map(|(v, _)| v.to_string())
}

/// Median price divided by representative area, rounded. Absent when either input is.
pub fn price_per_area(price: Option<u64>, area: Option<f64>) -> Option<u64> {
    let price = price.filter(|p| *p > 0)?;
    let area = positive(area)?;
    round_to_u64(price as f64 / area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_text_variants() {
        assert_eq!(parse_price_text("5억 3,000"), Some(53_000));
        assert_eq!(parse_price_text("12억"), Some(120_000));
        assert_eq!(parse_price_text("9,500"), Some(9_500));
        assert_eq!(parse_price_text(" 3억5000 "), Some(35_000));
        assert_eq!(parse_price_text(""), None);
        assert_eq!(parse_price_text("0"), None);
        assert_eq!(parse_price_text("협의"), None);
    }

    #[test]
    fn oversized_price_text_is_rejected() {
        assert_eq!(parse_price_text("9999999999999999억"), None);
        assert_eq!(parse_price_text("1e30"), None);
        assert_eq!(parse_price_text("1844674407370955억 1,616"), None);
        assert_eq!(parse_price_text("1844674407370955억 1,615"), Some(u64::MAX));
        assert_eq!(parse_price_text("1844674407370억"), Some(18_446_744_073_700_000));
    }

    #[test]
    fn wide_sums_do_not_overflow() {
        let big = [u64::MAX - 1, u64::MAX - 1];
        assert_eq!(median_u64(&big), Some(u64::MAX - 1));
        assert_eq!(mean_u64(&big), Some((u64::MAX - 1) as f64));
        assert_eq!(mean_u64(&[10_000, 20_000, 30_000]), Some(20_000.0));
        assert_eq!(mean_u64(&[]), None);
        assert_eq!(round_to_u64(-1.0), None);
        assert_eq!(round_to_u64(f64::INFINITY), None);
        assert_eq!(round_to_u64(2.5), Some(3));
    }

    #[test]
    fn formats_like_the_portal() {
        assert_eq!(format_price(53_000), "5억 3,000");
        assert_eq!(format_price(120_000), "12억");
        assert_eq!(format_price(9_500), "9,500");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn positive_rejects_placeholders() {
        assert_eq!(parse_positive("84.97"), Some(84.97));
        assert_eq!(parse_positive("-"), None);
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("NaN"), None);
    }

    #[test]
    fn medians() {
        assert_eq!(median_u64(&[30, 10, 20]), Some(20));
        assert_eq!(median_u64(&[10, 21]), Some(16));
        assert_eq!(median_u64(&[]), None);
        assert_eq!(median_f64(&[84.0, 59.0, 114.0, 84.0]), Some(84.0));
    }

    #[test]
    fn mode_breaks_ties_alphabetically() {
        assert_eq!(mode(["남향", "동향", "남향"]), Some("남향".to_string()));
        assert_eq!(mode(["b", "a"]), Some("a".to_string()));
        assert_eq!(mode(["", "  "]), None);
    }

    #[test]
    fn price_per_area_needs_both_inputs() {
        assert_eq!(price_per_area(Some(50_000), Some(100.0)), Some(500));
        assert_eq!(price_per_area(Some(50_000), None), None);
        assert_eq!(price_per_area(Some(0), Some(84.0)), None);
        assert_eq!(price_per_area(None, Some(84.0)), None);
    }
}
