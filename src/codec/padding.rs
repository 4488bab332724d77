//! Perfect-square padding with the NUL sentinel
//!
//! Lengths are counted in chars, since each char becomes one pixel.

/// Padding filler. Never valid in real content.
pub const SENTINEL: char = '\0';

/// Integer square root (floor)
pub fn isqrt(n: usize) -> usize {
    if n < 2 {
        return n;
    }
    // Start from the float estimate and correct for rounding in either direction
    let mut root = (n as f64).sqrt() as usize;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= n) {
        root += 1;
    }
    root
}

pub fn is_perfect_square(n: usize) -> bool {
    let root = isqrt(n);
    root * root == n
}

/// Smallest perfect square `>= n`
pub fn next_square(n: usize) -> usize {
    let root = isqrt(n);
    if root * root == n {
        n
    } else {
        (root + 1) * (root + 1)
    }
}

/// Append sentinels until the char count is a perfect square
pub fn pad(text: &str) -> String {
    let len = text.chars().count();
    let target = next_square(len);
    let mut padded = String::with_capacity(text.len() + (target - len));
    padded.push_str(text);
    padded.extend(std::iter::repeat(SENTINEL).take(target - len));
    padded
}

/// Remove every sentinel, wherever it appears
///
/// Sentinels that were part of the original content are removed too; they cannot be told
/// apart from padding.
pub fn unpad(text: &str) -> String {
    text.chars().filter(|&c| c != SENTINEL).collect()
}
