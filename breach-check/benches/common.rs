use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALL_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Generates a specified number of random passwords with uniform distribution.
/// Uses a fixed seed for reproducible benchmark results.
pub fn generate_random_passwords(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let length = rng.gen_range(8..=64);
            (0..length)
                .map(|_| ALL_CHARS[rng.gen_range(0..ALL_CHARS.len())] as char)
                .collect()
        })
        .collect()
}

/// Builds a range response body with `records` random `SUFFIX:COUNT` lines,
/// the shape the service returns for a single prefix.
pub fn generate_range_body(records: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let lines: Vec<String> = (0..records)
        .map(|_| {
            let suffix: String = (0..35).map(|_| HEX[rng.gen_range(0..16)] as char).collect();
            format!("{suffix}:{}", rng.gen_range(1..100_000))
        })
        .collect();
    lines.join("\r\n")
}
