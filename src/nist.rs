//! A subset of the NIST SP 800-22 statistical test suite.
//!
//! Every test takes a sequence of bits and returns a _p-value_, the probability
//! that a perfect random generator would have produced a sequence less random
//! than the one tested. A sequence is usually considered random when the
//! p-value is at least `0.01`.
use tracing::debug;

use crate::{error::RandSeqError, math};

/// Size of the blocks of [`longest_run_of_ones`].
pub const BLOCK_SIZE: usize = 8;
/// Minimum number of bits required by [`longest_run_of_ones`].
pub const MIN_LONGEST_RUN_LENGTH: usize = 128;
/// Theoretical probabilities of the longest run of ones in a block of
/// [`BLOCK_SIZE`] bits being `<= 1`, `2`, `3` and `>= 4`.
pub const LONGEST_RUN_PROBABILITIES: [f64; 4] = [0.2148, 0.3672, 0.2305, 0.2266];

/// The p-values of all the tests for a single sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct TestReport {
    pub frequency: f64,
    pub runs: f64,
    pub longest_run: Result<f64, RandSeqError>,
}

/// Reads a string of `0`s and `1`s, surrounding whitespace is ignored.
pub fn parse_bits(s: &str) -> Result<Vec<bool>, RandSeqError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(RandSeqError::EmptySequence);
    }

    s.chars()
        .enumerate()
        .map(|(index, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            found => Err(RandSeqError::InvalidSequence { index, found }),
        })
        .collect()
}

fn count_ones(bits: &[bool]) -> usize {
    bits.iter().filter(|&&b| b).count()
}

/// Frequency (monobit) test.
pub fn frequency(bits: &[bool]) -> Result<f64, RandSeqError> {
    if bits.is_empty() {
        return Err(RandSeqError::EmptySequence);
    }

    let n = bits.len() as f64;
    let sum: i64 = bits.iter().map(|&b| if b { 1 } else { -1 }).sum();
    let s_obs = (sum as f64).abs() / n.sqrt();
    debug!("frequency: n = {}, S_n = {}, s_obs = {}", n, sum, s_obs);

    Ok(math::erfc(s_obs / std::f64::consts::SQRT_2))
}

/// Runs test, i.e. the number of uninterrupted runs of identical bits.
///
/// If the proportion of ones is too far from `1/2`, or if the sequence is
/// constant, the frequency prerequisite fails and the p-value is `0`.
pub fn runs(bits: &[bool]) -> Result<f64, RandSeqError> {
    if bits.is_empty() {
        return Err(RandSeqError::EmptySequence);
    }

    let n = bits.len() as f64;
    let pi = count_ones(bits) as f64 / n;
    if pi == 0.0 || pi == 1.0 || (pi - 0.5).abs() >= 2.0 / n.sqrt() {
        debug!("runs: frequency prerequisite failed with pi = {}", pi);
        return Ok(0.0);
    }

    let v_obs = 1 + bits.windows(2).filter(|w| w[0] != w[1]).count();
    debug!("runs: n = {}, pi = {}, V_n = {}", n, pi, v_obs);

    let num = (v_obs as f64 - 2.0 * n * pi * (1.0 - pi)).abs();
    let den = 2.0 * (2.0 * n).sqrt() * pi * (1.0 - pi);
    Ok(math::erfc(num / den))
}

fn longest_run(block: &[bool]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for &b in block {
        if b {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Longest run of ones in blocks of [`BLOCK_SIZE`] bits.
///
/// Trailing bits that do not fill a whole block are ignored. The p-value is
/// the _regularized_ upper incomplete gamma function `Q(3/2, χ²/2)`.
pub fn longest_run_of_ones(bits: &[bool]) -> Result<f64, RandSeqError> {
    if bits.len() < MIN_LONGEST_RUN_LENGTH {
        return Err(RandSeqError::SequenceTooShort {
            expected: MIN_LONGEST_RUN_LENGTH,
            found: bits.len(),
        });
    }

    let mut v = [0usize; 4];
    for block in bits.chunks_exact(BLOCK_SIZE) {
        let class = longest_run(block).clamp(1, 4) - 1;
        v[class] += 1;
    }
    let nb_blocks = (bits.len() / BLOCK_SIZE) as f64;

    let chi_squared: f64 = v
        .iter()
        .zip(LONGEST_RUN_PROBABILITIES)
        .map(|(&v, pi)| {
            let expected = nb_blocks * pi;
            (v as f64 - expected).powi(2) / expected
        })
        .sum();
    debug!("longest run: v = {:?}, chi^2 = {}", v, chi_squared);

    Ok(math::igamc(1.5, chi_squared / 2.0))
}

/// Runs all the tests on `bits`.
///
/// Only [`longest_run_of_ones`] has a length requirement, so its failure is
/// reported in the [`TestReport`] instead of aborting the whole run.
pub fn run_all(bits: &[bool]) -> Result<TestReport, RandSeqError> {
    Ok(TestReport {
        frequency: frequency(bits)?,
        runs: runs(bits)?,
        longest_run: longest_run_of_ones(bits),
    })
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{frequency, longest_run_of_ones, parse_bits, run_all, runs};
    use crate::{error::RandSeqError, Generator};

    const LONGEST_RUN_EXAMPLE: &str = "11001100000101010110110001001100111000000000001001001101010100010001001111010110100000001101011111001100111001101101100010110010";

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, found {actual}"
        );
    }

    #[test]
    fn parsing() {
        assert_eq!(parse_bits(" 0110\n"), Ok(vec![false, true, true, false]));
        assert_eq!(parse_bits("   "), Err(RandSeqError::EmptySequence));
        assert_eq!(
            parse_bits("01a1"),
            Err(RandSeqError::InvalidSequence {
                index: 2,
                found: 'a'
            })
        );
    }

    #[test]
    fn frequency_reference() {
        let bits = parse_bits("1011010101").unwrap();
        assert_close(frequency(&bits).unwrap(), 0.527089);

        assert_eq!(frequency(&[]), Err(RandSeqError::EmptySequence));
    }

    #[test]
    fn runs_reference() {
        let bits = parse_bits("1001101011").unwrap();
        assert_close(runs(&bits).unwrap(), 0.147232);

        assert_eq!(runs(&[]), Err(RandSeqError::EmptySequence));
    }

    #[test]
    fn runs_fails_frequency_prerequisite() {
        let bits = vec![true; 100];
        assert_eq!(runs(&bits), Ok(0.0));
    }

    #[test]
    fn runs_on_short_constant_sequences() {
        for n in 1..16 {
            assert_eq!(runs(&vec![true; n]), Ok(0.0), "{n} ones");
            assert_eq!(runs(&vec![false; n]), Ok(0.0), "{n} zeros");
        }
        assert_eq!(run_all(&[false]).unwrap().runs, 0.0);
    }

    #[test]
    fn longest_run_reference() {
        let bits = parse_bits(LONGEST_RUN_EXAMPLE).unwrap();
        assert_close(longest_run_of_ones(&bits).unwrap(), 0.138149);
    }

    #[test]
    fn longest_run_ignores_trailing_bits() {
        let mut bits = parse_bits(LONGEST_RUN_EXAMPLE).unwrap();
        let expected = longest_run_of_ones(&bits).unwrap();
        bits.extend([true; 7]);
        assert_eq!(longest_run_of_ones(&bits), Ok(expected));
    }

    #[test]
    fn longest_run_too_short() {
        assert_eq!(
            longest_run_of_ones(&[true; 127]),
            Err(RandSeqError::SequenceTooShort {
                expected: 128,
                found: 127
            })
        );
    }

    #[test]
    fn constant_sequences_are_not_random() {
        let report = run_all(&[false; 128]).unwrap();
        assert!(report.frequency < 0.01);
        assert_eq!(report.runs, 0.0);
        assert!(report.longest_run.unwrap() < 0.01);
    }

    #[test]
    fn generated_sequences_mostly_pass() {
        let mut generator = Generator::new(StdRng::seed_from_u64(0));

        let mut passed = 0;
        for _ in 0..100 {
            let bits: Vec<bool> = generator.generate().bits().collect();
            let report = run_all(&bits).unwrap();
            if report.frequency >= 0.01 {
                passed += 1;
            }
        }
        // expected around 99 at the 0.01 level, plus a comfortable margin
        assert!(passed >= 90, "only {passed} / 100 sequences passed");
    }
}
