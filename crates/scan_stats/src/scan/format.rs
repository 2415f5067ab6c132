//! Text rendering for stat fragments: digit grouping, address shortening,
//! series and leaderboard lines. Providers paste these fragments under a
//! label without parsing them.

/// Insert thousands separators into a decimal string. Anything that is not a
/// plain decimal number is returned unchanged.
pub(crate) fn group_digits(raw: &str) -> String {
    let raw = raw.trim();
    let (sign, digits) = raw
        .strip_prefix('-')
        .map_or(("", raw), |rest| ("-", rest));
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    if let Some(f) = frac_part {
        if !f.bytes().all(|b| b.is_ascii_digit()) {
            return raw.to_string();
        }
    }
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Shorten a long address to `head...tail` for leaderboard lines.
pub(crate) fn shorten_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 16 {
        return addr.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{head}...{tail}")
}

/// Render a daily series as `YYYY-MM-DD: n,nnn` lines, oldest first.
pub(crate) fn render_series(points: &[(String, String)]) -> String {
    points
        .iter()
        .map(|(day, count)| format!("{day}: {}", group_digits(count)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a leaderboard as `rank. address: value` lines.
pub(crate) fn render_leaderboard(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, (addr, value))| {
            format!("{}. {}: {}", i + 1, shorten_address(addr), group_digits(value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_digits_plain() {
        assert_eq!(group_digits("1234567"), "1,234,567");
        assert_eq!(group_digits("45"), "45");
        assert_eq!(group_digits("100"), "100");
        assert_eq!(group_digits("1000"), "1,000");
    }

    #[test]
    fn group_digits_fraction_and_sign() {
        assert_eq!(group_digits("45.2"), "45.2");
        assert_eq!(group_digits("-1234.5"), "-1,234.5");
    }

    #[test]
    fn group_digits_passes_through_non_numeric() {
        assert_eq!(group_digits("n/a"), "n/a");
        assert_eq!(group_digits("1,234"), "1,234");
        assert_eq!(group_digits(""), "");
    }

    #[test]
    fn shorten_address_long_and_short() {
        assert_eq!(
            shorten_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x123456...345678"
        );
        assert_eq!(shorten_address("0xdeadbeef"), "0xdeadbeef");
    }

    #[test]
    fn render_series_lines() {
        let points = vec![
            ("2026-08-05".to_string(), "1502000".to_string()),
            ("2026-08-06".to_string(), "1543210".to_string()),
        ];
        assert_eq!(
            render_series(&points),
            "2026-08-05: 1,502,000\n2026-08-06: 1,543,210"
        );
    }

    #[test]
    fn render_leaderboard_lines() {
        let entries = vec![
            (
                "0x1234567890abcdef1234567890abcdef12345678".to_string(),
                "98765".to_string(),
            ),
            ("0xshort".to_string(), "1000".to_string()),
        ];
        assert_eq!(
            render_leaderboard(&entries),
            "1. 0x123456...345678: 98,765\n2. 0xshort: 1,000"
        );
    }
}
