use std::error::Error;

/// Boxed static error type
pub type Err = Box<dyn Error + 'static>;

/// Pads a sequence with `bol` and `eol` and returns the trigram centered on each
/// element. Will clone the elements.
///
/// ```
/// let v = vec!["a", "b"];
///
/// assert_eq!(arceager::utils::centered_trigrams(&v, "<", ">"), vec![
///   ["<", "a", "b"],
///   ["a", "b", ">"],
/// ]);
/// ```
pub fn centered_trigrams<T>(list: &[T], bol: T, eol: T) -> Vec<[T; 3]>
where
  T: Clone,
{
  let padded = std::iter::once(bol)
    .chain(list.iter().cloned())
    .chain(std::iter::once(eol))
    .collect::<Vec<_>>();

  padded
    .windows(3)
    .map(|w| [w[0].clone(), w[1].clone(), w[2].clone()])
    .collect()
}
