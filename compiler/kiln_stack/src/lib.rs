//! Stack growth for recursive tree walks.
//!
//! Left-associative operator chains nest one level per operator, so a long
//! `a + b + c + ...` produces a tree as deep as the chain is long. Walks over
//! such trees run their recursive step through [`ensure_sufficient_stack`],
//! which moves onto a freshly allocated stack segment when the current one
//! is nearly exhausted.
//!
//! On `wasm32` the closure is called directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new segment.
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    #[test]
    fn shallow_calls_pass_through() {
        assert_eq!(ensure_sufficient_stack(|| 7), 7);
        assert_eq!(depth(16), 16);
    }

    #[test]
    fn deep_recursion_grows_the_stack() {
        assert_eq!(depth(200_000), 200_000);
    }

    #[test]
    fn results_are_returned_unchanged() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Err("boom".to_string()));
        assert_eq!(result, Err("boom".to_string()));
    }
}
