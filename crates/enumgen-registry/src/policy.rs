//! Increment policies for sequential generators.
//!
//! A policy maps the current (not yet registered) value to the one after it.
//! Policies run under the generator's write lock, so they must be cheap and
//! must not touch the generator themselves.

use enumgen_core::EnumScalar;

pub trait Incrementer<T>: Send + Sync {
    fn advance(&self, current: &T) -> T;
}

/// Plain closures are policies too.
impl<T, F> Incrementer<T> for F
where
    F: Fn(&T) -> T + Send + Sync,
{
    fn advance(&self, current: &T) -> T {
        self(current)
    }
}

/// +1 for numbers (wrapping for integers), alphabetic odometer for text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Step;

impl<T: EnumScalar> Incrementer<T> for Step {
    fn advance(&self, current: &T) -> T {
        current.step()
    }
}

/// `x << 1`. Non-integer kinds repeat the same value forever; that is a
/// caller error, not something the policy can detect.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitFlag;

impl<T: EnumScalar> Incrementer<T> for BitFlag {
    fn advance(&self, current: &T) -> T {
        current.shift_left()
    }
}

/// `(x + 1) mod modulus` over integers.
#[derive(Debug, Clone, Copy)]
pub struct Cyclic {
    modulus: i64,
}

impl Cyclic {
    /// `modulus <= 0` is coerced to 1, which makes every value 0.
    pub fn new(modulus: i64) -> Self {
        Self {
            modulus: modulus.max(1),
        }
    }

    pub fn modulus(&self) -> i64 {
        self.modulus
    }
}

impl<T: EnumScalar> Incrementer<T> for Cyclic {
    fn advance(&self, current: &T) -> T {
        // A result that does not fit T (or a non-integer T) repeats the value.
        current
            .as_i64()
            .and_then(|v| T::from_i64(v.wrapping_add(1) % self.modulus).ok())
            .unwrap_or_else(|| current.clone())
    }
}

/// `prefix + n -> prefix + (n + 1)`.
///
/// If the suffix after `prefix` is not an integer the value repeats; the
/// generator does not try to repair it.
#[derive(Debug, Clone)]
pub struct Prefixed {
    prefix: String,
}

impl Prefixed {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn format(&self, n: i64) -> String {
        format!("{}{}", self.prefix, n)
    }
}

impl<T: EnumScalar> Incrementer<T> for Prefixed {
    fn advance(&self, current: &T) -> T {
        let text = current.to_text();
        let suffix = text.strip_prefix(self.prefix.as_str()).unwrap_or(&text);
        match suffix.parse::<i64>() {
            Ok(n) => T::parse_text(&self.format(n.wrapping_add(1)))
                .unwrap_or_else(|_| current.clone()),
            Err(_) => current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T: EnumScalar, I: Incrementer<T>>(inc: &I, start: T, n: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(n);
        let mut cur = start;
        for _ in 0..n {
            let next = inc.advance(&cur);
            out.push(cur);
            cur = next;
        }
        out
    }

    #[test]
    fn test_step() {
        assert_eq!(run(&Step, 10i32, 3), vec![10, 11, 12]);
        assert_eq!(run(&Step, 0.5f64, 2), vec![0.5, 1.5]);
        assert_eq!(run(&Step, "Y".to_string(), 3), vec!["Y", "Z", "AA"]);
    }

    #[test]
    fn test_bit_flag() {
        assert_eq!(run(&BitFlag, 1u8, 4), vec![1, 2, 4, 8]);
        assert_eq!(run(&BitFlag, 1.0f64, 2), vec![1.0, 1.0]);
    }

    #[test]
    fn test_cyclic() {
        assert_eq!(run(&Cyclic::new(3), 0i64, 5), vec![0, 1, 2, 0, 1]);
        assert_eq!(run(&Cyclic::new(0), 0i64, 3), vec![0, 0, 0]);
        assert_eq!(run(&Cyclic::new(-5), 0i64, 2), vec![0, 0]);
        assert_eq!(Cyclic::new(-5).modulus(), 1);
    }

    #[test]
    fn test_prefixed() {
        let p = Prefixed::new("dog");
        assert_eq!(run(&p, p.format(1), 3), vec!["dog1", "dog2", "dog3"]);
        assert_eq!(run(&p, "dogx".to_string(), 2), vec!["dogx", "dogx"]);
    }

    #[test]
    fn test_closure_policy() {
        let by_two = |x: &i32| x + 2;
        assert_eq!(run(&by_two, 0, 3), vec![0, 2, 4]);
    }
}
