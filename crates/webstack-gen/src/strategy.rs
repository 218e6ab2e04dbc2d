//! Proptest strategies that only produce valid site inputs.
//!
//! Text is built from whole words joined by single spaces, so a value survives
//! TOML/YAML serialization, HTML escaping and whitespace-collapsing minifiers
//! unchanged and can be found again as a literal substring.

use std::borrow::Cow;
use std::ops::RangeInclusive;

use proptest::arbitrary::Arbitrary;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;

use crate::model::{
    NavigationCategory, NavigationLink, SiteUrl, TrialInput, HOSTS, ICONS, LOGOS, PATHS, SCHEMES,
};

/// Longest single word a text strategy emits.
pub const MAX_WORD_LEN: usize = 12;

const LABEL_CHARS: &[RangeInclusive<char>] = &['a'..='z', 'A'..='Z', '0'..='9'];

const PROSE_CHARS: &[RangeInclusive<char>] = &[
    'a'..='z',
    'A'..='Z',
    '0'..='9',
    '.'..='.',
    ','..=',',
    '!'..='!',
    '?'..='?',
    ';'..=';',
];

/// Characters a generated text value may contain, besides the space separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// ASCII letters and digits
    Label,
    /// Letters, digits and sentence punctuation that HTML leaves unescaped
    Prose,
}

impl Alphabet {
    fn ranges(self) -> &'static [RangeInclusive<char>] {
        match self {
            Alphabet::Label => LABEL_CHARS,
            Alphabet::Prose => PROSE_CHARS,
        }
    }

    /// Whether `c` may appear inside a word.
    pub fn contains(self, c: char) -> bool {
        self.ranges().iter().any(|range| range.contains(&c))
    }
}

/// Inclusive length bounds for a text value, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    /// Minimum length
    pub min_len: usize,
    /// Maximum length
    pub max_len: usize,
}

impl TextBounds {
    /// Non-empty text of at most `max_len` characters.
    pub const fn non_empty(max_len: usize) -> Self {
        Self { min_len: 1, max_len }
    }

    /// Possibly empty text of at most `max_len` characters.
    pub const fn up_to(max_len: usize) -> Self {
        Self { min_len: 0, max_len }
    }
}

/// Inclusive size bounds for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBounds {
    /// Minimum number of elements
    pub min: usize,
    /// Maximum number of elements
    pub max: usize,
}

impl CountBounds {
    /// Bounds of `min..=max` elements.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    fn non_empty_range(self) -> RangeInclusive<usize> {
        let min = self.min.max(1);
        min..=self.max.max(min)
    }
}

/// Size bounds for every generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationBounds {
    /// Site title
    pub title: TextBounds,
    /// Author name
    pub author: TextBounds,
    /// Site description
    pub description: TextBounds,
    /// Category name
    pub category_name: TextBounds,
    /// Link title
    pub link_title: TextBounds,
    /// Link description
    pub link_description: TextBounds,
    /// Categories per trial, at least one
    pub categories: CountBounds,
    /// Links per category, at least one
    pub links: CountBounds,
}

impl Default for GenerationBounds {
    fn default() -> Self {
        Self {
            title: TextBounds::non_empty(100),
            author: TextBounds::non_empty(50),
            description: TextBounds::up_to(200),
            category_name: TextBounds::non_empty(30),
            link_title: TextBounds::non_empty(50),
            link_description: TextBounds::up_to(200),
            categories: CountBounds::new(1, 5),
            links: CountBounds::new(1, 5),
        }
    }
}

/// Text drawn from `alphabet` within `bounds`.
///
/// Shrinks toward fewer, shorter words made of the first characters of the
/// alphabet. A minimum above the maximum is lowered to the maximum, so
/// `max_len == 0` only ever yields the empty string.
pub fn text(alphabet: Alphabet, bounds: TextBounds) -> impl Strategy<Value = String> {
    let max_len = bounds.max_len;
    let min_len = bounds.min_len.min(max_len);
    let min_words = usize::from(min_len > 0);
    let max_words = max_len.div_ceil(2).max(min_words);
    let word = vec(
        prop::char::ranges(Cow::Borrowed(alphabet.ranges())),
        1..=MAX_WORD_LEN.min(max_len).max(1),
    )
    .prop_map(|chars| chars.into_iter().collect::<String>());

    vec(word, min_words..=max_words)
        .prop_map(move |words| fit_words(&words, max_len))
        .prop_filter("text shorter than minimum", move |s| {
            s.chars().count() >= min_len
        })
}

/// Join words with single spaces, cutting at `max_len` without leaving a
/// trailing separator.
fn fit_words(words: &[String], max_len: usize) -> String {
    let mut joined: String = words.join(" ").chars().take(max_len).collect();
    let trimmed = joined.trim_end().len();
    joined.truncate(trimmed);
    joined
}

/// A URL from the allowed schemes, hosts and paths.
pub fn site_url() -> impl Strategy<Value = SiteUrl> {
    (select(SCHEMES), select(HOSTS), select(PATHS))
        .prop_map(|(scheme, host, path)| SiteUrl { scheme, host, path })
}

/// A single navigation link.
pub fn navigation_link(bounds: GenerationBounds) -> impl Strategy<Value = NavigationLink> {
    (
        text(Alphabet::Label, bounds.link_title),
        site_url(),
        text(Alphabet::Prose, bounds.link_description),
        select(LOGOS),
    )
        .prop_map(|(title, url, description, logo)| NavigationLink {
            title,
            logo: logo.to_string(),
            url: url.to_string(),
            description,
        })
}

/// A navigation category with at least one link.
pub fn navigation_category(bounds: GenerationBounds) -> impl Strategy<Value = NavigationCategory> {
    (
        text(Alphabet::Label, bounds.category_name),
        select(ICONS),
        vec(navigation_link(bounds), bounds.links.non_empty_range()),
    )
        .prop_map(|(taxonomy, icon, links)| NavigationCategory {
            taxonomy,
            icon: icon.to_string(),
            links,
        })
}

/// A non-empty navigation dataset.
pub fn categories(bounds: GenerationBounds) -> impl Strategy<Value = Vec<NavigationCategory>> {
    vec(
        navigation_category(bounds),
        bounds.categories.non_empty_range(),
    )
}

/// One complete trial input.
pub fn trial_input(bounds: GenerationBounds) -> impl Strategy<Value = TrialInput> {
    (
        site_url(),
        text(Alphabet::Label, bounds.title),
        text(Alphabet::Label, bounds.author),
        text(Alphabet::Prose, bounds.description),
        categories(bounds),
    )
        .prop_map(
            |(base_url, title, author, description, categories)| TrialInput {
                base_url,
                title,
                author,
                description,
                categories,
            },
        )
}

impl Arbitrary for TrialInput {
    type Parameters = GenerationBounds;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(bounds: Self::Parameters) -> Self::Strategy {
        trial_input(bounds).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    fn assert_well_formed(s: &str, alphabet: Alphabet, bounds: TextBounds) {
        let len = s.chars().count();
        assert!(len >= bounds.min_len && len <= bounds.max_len, "{s:?}");
        assert!(!s.starts_with(' ') && !s.ends_with(' '), "{s:?}");
        assert!(!s.contains("  "), "{s:?}");
        assert!(s.chars().all(|c| c == ' ' || alphabet.contains(c)), "{s:?}");
    }

    proptest! {
        #[test]
        fn label_text_respects_bounds(s in text(Alphabet::Label, TextBounds::non_empty(30))) {
            assert_well_formed(&s, Alphabet::Label, TextBounds::non_empty(30));
        }

        #[test]
        fn prose_text_may_be_empty_but_stays_bounded(s in text(Alphabet::Prose, TextBounds::up_to(200))) {
            assert_well_formed(&s, Alphabet::Prose, TextBounds::up_to(200));
        }

        #[test]
        fn minimum_above_one_is_honoured(s in text(Alphabet::Label, TextBounds { min_len: 5, max_len: 20 })) {
            assert_well_formed(&s, Alphabet::Label, TextBounds { min_len: 5, max_len: 20 });
        }

        #[test]
        fn generated_urls_parse(url in site_url()) {
            let rendered = url.to_string();
            let parsed = url::Url::parse(&rendered).unwrap();
            prop_assert!(SCHEMES.contains(&parsed.scheme()));
            prop_assert!(HOSTS.contains(&parsed.host_str().unwrap()));
        }

        #[test]
        fn every_category_has_links(cats in categories(GenerationBounds::default())) {
            prop_assert!(!cats.is_empty() && cats.len() <= 5);
            for category in &cats {
                prop_assert!(!category.links.is_empty() && category.links.len() <= 5);
                prop_assert!(ICONS.contains(&category.icon.as_str()));
                for link in &category.links {
                    prop_assert!(LOGOS.contains(&link.logo.as_str()));
                    prop_assert!(!link.title.is_empty());
                }
            }
        }

        #[test]
        fn trial_title_and_author_are_labels(input in any::<TrialInput>()) {
            let bounds = GenerationBounds::default();
            assert_well_formed(&input.title, Alphabet::Label, bounds.title);
            assert_well_formed(&input.author, Alphabet::Label, bounds.author);
            assert_well_formed(&input.description, Alphabet::Prose, bounds.description);
        }
    }

    #[test]
    fn zero_minimum_is_raised_for_collections() {
        let bounds = GenerationBounds {
            categories: CountBounds::new(0, 0),
            links: CountBounds::new(0, 0),
            ..GenerationBounds::default()
        };
        let mut runner = TestRunner::deterministic();

        let cats = categories(bounds)
            .new_tree(&mut runner)
            .unwrap()
            .current();

        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].links.len(), 1);
    }

    #[test]
    fn text_shrinks_toward_single_short_word() {
        let mut runner = TestRunner::deterministic();
        let mut tree = text(Alphabet::Label, TextBounds::non_empty(100))
            .new_tree(&mut runner)
            .unwrap();

        while tree.simplify() {}

        let shrunk = tree.current();
        assert!(!shrunk.is_empty());
        assert!(!shrunk.contains(' '), "{shrunk:?}");
    }

    #[test]
    fn zero_maximum_only_yields_empty_text() {
        let mut runner = TestRunner::deterministic();
        let strategy = text(Alphabet::Prose, TextBounds::up_to(0));

        for _ in 0..200 {
            let value = strategy.new_tree(&mut runner).unwrap().current();
            assert_eq!(value, "");
        }
    }

    #[test]
    fn minimum_above_maximum_is_lowered() {
        let mut runner = TestRunner::deterministic();
        let strategy = text(Alphabet::Label, TextBounds { min_len: 8, max_len: 3 });

        for _ in 0..50 {
            let value = strategy.new_tree(&mut runner).unwrap().current();
            assert_eq!(value.chars().count(), 3, "{value:?}");
        }
    }

    #[test]
    fn fit_words_drops_trailing_separator() {
        let words = vec!["abc".to_string(), "def".to_string()];

        assert_eq!(fit_words(&words, 4), "abc");
        assert_eq!(fit_words(&words, 7), "abc def");
        assert_eq!(fit_words(&words, 5), "abc d");
    }
}
