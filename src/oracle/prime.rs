/// Trial-division primality test.
///
/// Divides `n` by every integer in `[2, n)` and stops at the first exact divisor. Values below 2
/// report `false`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    (2..n).all(|d| n % d != 0)
}

#[cfg(test)]
#[path = "../../tests/unit/oracle/prime.rs"]
mod tests;
