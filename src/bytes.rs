//! Small byte-level helpers shared by container callers.

/// Find the first occurrence of `needle` as a contiguous subsequence of
/// `haystack`, returning its byte offset.
///
/// An empty needle matches at offset 0; a needle longer than the haystack
/// never matches.
pub fn search(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Split a `u64` into its high and low 32-bit halves, in that order.
#[inline]
pub fn unpack64(value: u64) -> (u32, u32) {
    ((value >> 32) as u32, value as u32)
}
