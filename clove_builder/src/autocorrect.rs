use crate::model::CliConfig;

/// The edit distance between `a` and `b`, counted in unicode code points.
///
/// Insertions, deletions and substitutions each cost 1.
/// Unless the config is case sensitive, both strings are lowercased first.
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::{levenshtein_distance, CliConfig};
///
/// let config = CliConfig::default();
/// assert_eq!(levenshtein_distance("--firstme", "--firstName", &config), 2);
/// ```
pub fn levenshtein_distance(a: &str, b: &str, config: &CliConfig) -> usize {
    strsim::levenshtein(&config.fold(a), &config.fold(b))
}

/// The candidate closest to `given`, when it is within the config's auto-correct limit.
/// Ties go to the earliest candidate.
pub(crate) fn suggest<'c>(
    given: &str,
    candidates: impl IntoIterator<Item = &'c str>,
    config: &CliConfig,
) -> Option<&'c str> {
    let mut best: Option<(usize, &str)> = None;

    for candidate in candidates {
        let distance = levenshtein_distance(given, candidate, config);

        if distance <= config.auto_correct_limit
            && best.map_or(true, |(closest, _)| distance < closest)
        {
            best.replace((distance, candidate));
        }
    }

    best.map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn random_string(rng: &mut impl Rng) -> String {
        let length = rng.gen_range(0..12);

        if rng.gen_bool(0.5) {
            (0..length).map(|_| rng.gen::<char>()).collect()
        } else {
            (0..length)
                .map(|_| rng.sample(Alphanumeric) as char)
                .collect()
        }
    }

    #[test]
    fn distance_properties() {
        let mut rng = thread_rng();
        let config = CliConfig {
            case_sensitive: true,
            ..CliConfig::default()
        };

        for _ in 0..200 {
            let a = random_string(&mut rng);
            let b = random_string(&mut rng);

            assert_eq!(
                levenshtein_distance(&a, &b, &config),
                levenshtein_distance(&b, &a, &config)
            );
            assert_eq!(levenshtein_distance(&a, &a, &config), 0);
            assert_eq!(levenshtein_distance("", &a, &config), a.chars().count());
        }
    }

    #[rstest]
    #[case("kitten", "sitting", false, 3)]
    #[case("FLAG", "flag", false, 0)]
    #[case("FLAG", "flag", true, 4)]
    #[case("héllo", "hello", true, 1)]
    #[case("日本語", "日本", true, 1)]
    #[case("", "", true, 0)]
    fn distance(#[case] a: &str, #[case] b: &str, #[case] case_sensitive: bool, #[case] expected: usize) {
        let config = CliConfig {
            case_sensitive,
            ..CliConfig::default()
        };
        assert_eq!(levenshtein_distance(a, b, &config), expected);
    }

    #[rstest]
    #[case("--firstme", vec!["--lastName", "--firstName"], Some("--firstName"))]
    #[case("--verbse", vec!["--verbose", "--version"], Some("--verbose"))]
    #[case("--colour", vec!["--color", "--colours"], Some("--color"))]
    #[case("--xyz", vec!["--verbose"], None)]
    #[case("--xyz", vec![], None)]
    fn suggestions(#[case] given: &str, #[case] candidates: Vec<&str>, #[case] expected: Option<&str>) {
        let config = CliConfig::default();
        assert_eq!(suggest(given, candidates, &config), expected);
    }
}
