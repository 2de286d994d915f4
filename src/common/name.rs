/// Folds a catalog or provider name into its lookup key.
///
/// Names keep their original spelling for display, but every map in the
/// catalog layer is keyed by the folded form so lookups ignore case.
///
/// Folding is per character (uppercase, then lowercase) so the result does
/// not depend on word position: `Σ`, `σ` and the final `ς` all fold to `σ`.
/// A character whose uppercase form expands to several characters (`ß`) is
/// only lowercased.
pub(crate) fn fold(name: &str) -> String {
    name.chars()
        .flat_map(|ch| {
            let mut upper = ch.to_uppercase();
            let ch = match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => ch,
            };
            ch.to_lowercase()
        })
        .collect()
}
