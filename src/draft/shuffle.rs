use super::*;

/// Fisher-Yates shuffle drawing from a fallible source, so that a failing
/// entropy source is reported instead of panicking.
pub(crate) fn shuffle<T, R: RngCore + CryptoRng + ?Sized>(
  items: &mut [T],
  rng: &mut R,
) -> SnafuResult {
  for i in (1..items.len()).rev() {
    let j = below(rng, i + 1)?;
    items.swap(i, j);
  }

  Ok(())
}

/// Uniform draw from `0..bound`, rejecting values from the final partial
/// block of `bound`s to avoid modulo bias.
fn below<R: RngCore + CryptoRng + ?Sized>(rng: &mut R, bound: usize) -> SnafuResult<usize> {
  let bound = u64::try_from(bound)
    .ok()
    .filter(|bound| *bound > 0)
    .snafu_context(error::ValueOverflow)?;

  let zone = u64::MAX - u64::MAX % bound;

  loop {
    let mut bytes = [0; 8];
    rng
      .try_fill_bytes(&mut bytes)
      .snafu_context(error::EntropyUnavailable)?;

    let value = u64::from_le_bytes(bytes);

    if value < zone {
      return usize::try_from(value % bound)
        .ok()
        .snafu_context(error::ValueOverflow);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shuffle_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut items = (0..100).collect::<Vec<u32>>();

    shuffle(&mut items, &mut rng).unwrap();

    assert_ne!(items, (0..100).collect::<Vec<u32>>());

    items.sort_unstable();
    assert_eq!(items, (0..100).collect::<Vec<u32>>());
  }

  #[test]
  fn trivial_inputs_draw_no_randomness() {
    let mut empty: [u8; 0] = [];
    shuffle(&mut empty, &mut ExhaustedRng).unwrap();

    let mut single = [1];
    shuffle(&mut single, &mut ExhaustedRng).unwrap();
    assert_eq!(single, [1]);
  }

  #[test]
  fn exhausted_entropy() {
    assert_matches!(
      shuffle(&mut [1, 2], &mut ExhaustedRng),
      Err(SnafuError::EntropyUnavailable { .. })
    );
  }

  #[test]
  fn below_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(1);

    for bound in 1..50 {
      for _ in 0..20 {
        assert!(below(&mut rng, bound).unwrap() < bound);
      }
    }
  }

  /// Each of the 24 orderings of four items should appear equally often. The
  /// chi-square statistic over 24,000 shuffles is compared against the
  /// critical value for 23 degrees of freedom at p = 0.001.
  #[test]
  fn orderings_are_uniform() {
    const TRIALS: usize = 24_000;
    const CRITICAL: f64 = 49.728;

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut counts = BTreeMap::<[u8; 4], usize>::new();

    for _ in 0..TRIALS {
      let mut items = [0, 1, 2, 3];
      shuffle(&mut items, &mut rng).unwrap();
      *counts.entry(items).or_default() += 1;
    }

    assert_eq!(counts.len(), 24);

    let expected = 1000.0;

    let statistic = counts
      .values()
      .map(|count| {
        let observed = f64::from(u32::try_from(*count).unwrap());
        (observed - expected).powi(2) / expected
      })
      .sum::<f64>();

    tprintln!("chi-square statistic {statistic}");

    assert!(
      statistic < CRITICAL,
      "chi-square statistic {statistic} exceeds {CRITICAL}"
    );
  }
}
