use crate::components::prelude::*;
use crate::config::Config;
use std::collections::BTreeSet;
use std::fmt;

/// A multi-choice selection with an explicit "select all" switch.
///
/// When the switch is off only the chosen items match; an empty choice matches nothing. The
/// chosen items are kept while the switch is on so that turning it off restores them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Selection<T: Ord> {
    all: bool,
    items: BTreeSet<T>,
}

impl<T: Ord> Default for Selection<T> {
    #[inline]
    fn default() -> Self {
        Self::all()
    }
}

impl<T: Ord> Selection<T> {
    /// A selection matching everything.
    #[inline]
    #[must_use]
    pub const fn all() -> Self {
        Self {
            all: true,
            items: BTreeSet::new(),
        }
    }

    /// A selection matching only the given items.
    #[inline]
    pub fn only<I: IntoIterator<Item = T>>(items: I) -> Self {
        Self {
            all: false,
            items: items.into_iter().collect(),
        }
    }

    /// Whether the "select all" switch is on.
    #[inline]
    #[must_use]
    pub const fn is_all(&self) -> bool {
        self.all
    }

    /// Turns the "select all" switch on or off.
    #[inline]
    pub fn set_all(&mut self, all: bool) {
        self.all = all;
    }

    /// Whether the item has been chosen explicitly.
    #[inline]
    #[must_use]
    pub fn is_chosen(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Adds or removes an explicit choice.
    #[inline]
    pub fn choose(&mut self, item: T, chosen: bool) {
        if chosen {
            self.items.insert(item);
        } else {
            self.items.remove(&item);
        }
    }

    /// The explicit choices.
    #[inline]
    pub fn chosen(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Whether the item passes the selection.
    #[inline]
    #[must_use]
    pub fn matches(&self, item: &T) -> bool {
        self.all || self.items.contains(item)
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Selection<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all {
            return write!(f, "all");
        }
        let items = self
            .items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        write!(f, "{}", items.join(", "))
    }
}

/// Reduces a text input to the letter it constrains: the first non-blank character, upper-cased.
#[inline]
#[must_use]
pub fn normalize_letter(input: &str) -> Option<char> {
    input.trim().chars().next().map(|c| c.to_ascii_uppercase())
}

/// What the user filters the airports by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct FilterCriteria {
    /// The countries to show
    pub countries: Selection<CountryCode>,
    /// The airport types to show
    pub types: Selection<AirportType>,
    letters: [Option<char>; 3],
}

impl FilterCriteria {
    /// Builds criteria from explicit parts. Letters are normalized as with `set_letter`.
    #[inline]
    #[must_use]
    pub fn new(
        countries: Selection<CountryCode>,
        types: Selection<AirportType>,
        letters: [&str; 3],
    ) -> Self {
        Self {
            countries,
            types,
            letters: letters.map(normalize_letter),
        }
    }

    /// The criteria shown before the user changes anything.
    #[inline]
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let [first, second, third] = &config.default_letters;
        Self::new(
            Selection::only(config.default_countries.iter().cloned().map(CountryCode)),
            Selection::only(config.default_types.iter().cloned().map(AirportType)),
            [first.as_str(), second.as_str(), third.as_str()],
        )
    }

    /// The letter required at a zero-based position of the IATA code, if any.
    #[inline]
    #[must_use]
    pub fn letter(&self, position: usize) -> Option<char> {
        self.letters.get(position).copied().flatten()
    }

    /// Sets the letter required at a zero-based position from a text input. Positions past the
    /// third are ignored.
    #[inline]
    pub fn set_letter(&mut self, position: usize, input: &str) {
        if let Some(letter) = self.letters.get_mut(position) {
            *letter = normalize_letter(input);
        }
    }

    /// Whether the record's country passes.
    #[inline]
    #[must_use]
    pub fn country_ok(&self, record: &AirportRecord) -> bool {
        self.countries.matches(&record.country)
    }

    /// Whether the record's airport type passes.
    #[inline]
    #[must_use]
    pub fn type_ok(&self, record: &AirportRecord) -> bool {
        self.types.matches(&record.airport_type)
    }

    /// Whether the record's IATA code passes the letter constraints.
    ///
    /// Blank positions do not constrain. With no letter set every record passes; otherwise the
    /// record passes if the code carries any one of the set letters at its position.
    #[inline]
    #[must_use]
    pub fn position_ok(&self, record: &AirportRecord) -> bool {
        let mut constrained = false;
        for (position, letter) in self.letters.iter().enumerate() {
            if let Some(letter) = letter {
                constrained = true;
                let actual = record
                    .iata_code
                    .as_ref()
                    .and_then(|code| code.char_at(position))
                    .map(|c| c.to_ascii_uppercase());
                if actual == Some(*letter) {
                    return true;
                }
            }
        }
        !constrained
    }

    /// Whether the record passes every criterion.
    #[inline]
    #[must_use]
    pub fn matches(&self, record: &AirportRecord) -> bool {
        self.country_ok(record) && self.type_ok(record) && self.position_ok(record)
    }

    /// The records passing the criteria, in their original order.
    #[inline]
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [AirportRecord]) -> Vec<&'a AirportRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

impl fmt::Display for FilterCriteria {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = self
            .letters
            .iter()
            .map(|l| l.map_or_else(String::new, String::from))
            .collect::<String>();
        write!(
            f,
            "Currently showing `{}` in `{}` with letters `{}` in `iata_code`",
            self.types, self.countries, letters
        )
    }
}
