// Weighted random selection for automated picks.

use rand::Rng;

use crate::error::ContractViolation;
use crate::rates::PickRateTable;

/// Choose one of `candidates` with probability proportional to its weight.
///
/// Draws a uniform value in `[0, total)` and walks the candidates in order,
/// subtracting each weight; the first candidate that takes the remainder to
/// zero or below wins. Should rounding leave the walk unfinished, the last
/// candidate is returned.
pub fn pick<'a, R, S>(
    candidates: &'a [S],
    rates: &PickRateTable,
    rng: &mut R,
) -> Result<&'a str, ContractViolation>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let last = candidates.last().ok_or(ContractViolation::NoCandidates)?;

    let total: u64 = candidates
        .iter()
        .map(|c| u64::from(rates.weight(c.as_ref())))
        .sum();

    let mut remainder = rng.gen::<f64>() * total as f64;
    for candidate in candidates {
        remainder -= f64::from(rates.weight(candidate.as_ref()));
        if remainder <= 0.0 {
            return Ok(candidate.as_ref());
        }
    }

    Ok(last.as_ref())
}
