use std::fs::Metadata;

const UNIT: u64 = 1024;

/// Unit letters for successive powers of 1024, starting at KiB.
const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Get apparent file size (content length)
pub fn apparent_size(metadata: &Metadata) -> u64 {
    metadata.len()
}

/// Format size in human-readable format.
///
/// Whole bytes below 1 KB, otherwise one decimal place in the largest unit
/// that keeps the value under 1024.
pub fn format_size(bytes: u64) -> String {
    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}

/// Parse a size string like "1GB" or "512K" into bytes
pub fn parse_size(s: &str) -> Option<u64> {
    let s = s.trim().to_uppercase();

    let (num_str, exp) = match s.strip_suffix('B').unwrap_or(&s) {
        rest if rest.ends_with('P') => (&rest[..rest.len() - 1], 5),
        rest if rest.ends_with('T') => (&rest[..rest.len() - 1], 4),
        rest if rest.ends_with('G') => (&rest[..rest.len() - 1], 3),
        rest if rest.ends_with('M') => (&rest[..rest.len() - 1], 2),
        rest if rest.ends_with('K') => (&rest[..rest.len() - 1], 1),
        rest => (rest, 0),
    };

    let num_str = num_str.trim();
    if exp == 0 {
        if let Ok(n) = num_str.parse::<u64>() {
            return Some(n);
        }
    }

    let n = num_str.parse::<f64>().ok()?;
    if !n.is_finite() || n < 0.0 {
        return None;
    }

    Some((n * UNIT.pow(exp) as f64) as u64)
}
