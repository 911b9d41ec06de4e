//! The closed registry of date-pattern field symbols.
//!
//! Each pattern letter maps to one [`FieldSymbol`]. A symbol knows which
//! calendar field it projects onto, its rank (finer fields rank lower), and
//! the groups of coarser symbols it depends on. A pattern such as `MM.dd`
//! is rejected for enumeration because `d` (day of month) cannot be placed
//! on a timeline without a year.

use serde::Serialize;

use crate::calendar::Unit;

/// The calendar field a [`FieldSymbol`] denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CalendarField {
    NanoOfDay,
    NanoOfSecond,
    MilliOfDay,
    SecondOfMinute,
    MinuteOfHour,
    ClockHourOfAmPm,
    HourOfAmPm,
    ClockHourOfDay,
    HourOfDay,
    AmPmOfDay,
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    DayOfMonth,
    DayOfYear,
    WeekOfWeekBasedYear,
    AlignedWeekOfMonth,
    MonthOfYear,
    QuarterOfYear,
    WeekBasedYear,
    Year,
    YearOfEra,
    Era,
}

impl CalendarField {
    /// The unit one step of this field spans.
    pub fn base_unit(self) -> Unit {
        match self {
            Self::NanoOfDay | Self::NanoOfSecond => Unit::Nanos,
            Self::MilliOfDay => Unit::Millis,
            Self::SecondOfMinute => Unit::Seconds,
            Self::MinuteOfHour => Unit::Minutes,
            Self::ClockHourOfAmPm | Self::HourOfAmPm | Self::ClockHourOfDay | Self::HourOfDay => {
                Unit::Hours
            }
            Self::AmPmOfDay => Unit::HalfDays,
            Self::DayOfWeek | Self::AlignedDayOfWeekInMonth | Self::DayOfMonth | Self::DayOfYear => {
                Unit::Days
            }
            Self::WeekOfWeekBasedYear | Self::AlignedWeekOfMonth => Unit::Weeks,
            Self::MonthOfYear => Unit::Months,
            Self::QuarterOfYear => Unit::Quarters,
            Self::WeekBasedYear => Unit::WeekBasedYears,
            Self::Year | Self::YearOfEra => Unit::Years,
            Self::Era => Unit::Eras,
        }
    }
}

/// A pattern letter with a calendar meaning.
///
/// Variants are declared finest first; the declaration order is the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FieldSymbol {
    /// `N`
    NanoOfDay,
    /// `n`
    NanoOfSecond,
    /// `A`
    MilliOfDay,
    /// `S`
    FractionOfSecond,
    /// `s`
    SecondOfMinute,
    /// `m`
    MinuteOfHour,
    /// `h`
    ClockHourOfAmPm,
    /// `K`
    HourOfAmPm,
    /// `k`
    ClockHourOfDay,
    /// `H`
    HourOfDay,
    /// `a`
    AmPmOfDay,
    /// `e`
    LocalizedDayOfWeek,
    /// `c`
    StandaloneDayOfWeek,
    /// `E`
    DayOfWeek,
    /// `F`
    AlignedDayOfWeekInMonth,
    /// `d`
    DayOfMonth,
    /// `D`
    DayOfYear,
    /// `w`
    WeekOfWeekBasedYear,
    /// `W`
    AlignedWeekOfMonth,
    /// `L`
    StandaloneMonth,
    /// `M`
    MonthOfYear,
    /// `q`
    StandaloneQuarter,
    /// `Q`
    QuarterOfYear,
    /// `Y`
    WeekBasedYear,
    /// `u`
    Year,
    /// `y`
    YearOfEra,
    /// `G`
    Era,
}

use FieldSymbol::*;

const YEARS: &[FieldSymbol] = &[YearOfEra, Year, WeekBasedYear];
const MONTHS: &[FieldSymbol] = &[MonthOfYear, StandaloneMonth];
const WEEKS: &[FieldSymbol] = &[AlignedWeekOfMonth, WeekOfWeekBasedYear];
const DAYS: &[FieldSymbol] = &[
    DayOfYear,
    DayOfMonth,
    AlignedDayOfWeekInMonth,
    DayOfWeek,
    StandaloneDayOfWeek,
    LocalizedDayOfWeek,
];
const AMPM: &[FieldSymbol] = &[AmPmOfDay];
const HOURS: &[FieldSymbol] = &[HourOfDay, ClockHourOfDay, HourOfAmPm, ClockHourOfAmPm];
const MINUTES: &[FieldSymbol] = &[MinuteOfHour];
const SECONDS: &[FieldSymbol] = &[SecondOfMinute];

impl FieldSymbol {
    /// Every symbol, in rank order.
    pub const ALL: [FieldSymbol; 27] = [
        NanoOfDay,
        NanoOfSecond,
        MilliOfDay,
        FractionOfSecond,
        SecondOfMinute,
        MinuteOfHour,
        ClockHourOfAmPm,
        HourOfAmPm,
        ClockHourOfDay,
        HourOfDay,
        AmPmOfDay,
        LocalizedDayOfWeek,
        StandaloneDayOfWeek,
        DayOfWeek,
        AlignedDayOfWeekInMonth,
        DayOfMonth,
        DayOfYear,
        WeekOfWeekBasedYear,
        AlignedWeekOfMonth,
        StandaloneMonth,
        MonthOfYear,
        StandaloneQuarter,
        QuarterOfYear,
        WeekBasedYear,
        Year,
        YearOfEra,
        Era,
    ];

    /// Look up the symbol for a pattern letter.
    pub fn of(letter: char) -> Option<Self> {
        let symbol = match letter {
            'N' => NanoOfDay,
            'n' => NanoOfSecond,
            'A' => MilliOfDay,
            'S' => FractionOfSecond,
            's' => SecondOfMinute,
            'm' => MinuteOfHour,
            'h' => ClockHourOfAmPm,
            'K' => HourOfAmPm,
            'k' => ClockHourOfDay,
            'H' => HourOfDay,
            'a' => AmPmOfDay,
            'e' => LocalizedDayOfWeek,
            'c' => StandaloneDayOfWeek,
            'E' => DayOfWeek,
            'F' => AlignedDayOfWeekInMonth,
            'd' => DayOfMonth,
            'D' => DayOfYear,
            'w' => WeekOfWeekBasedYear,
            'W' => AlignedWeekOfMonth,
            'L' => StandaloneMonth,
            'M' => MonthOfYear,
            'q' => StandaloneQuarter,
            'Q' => QuarterOfYear,
            'Y' => WeekBasedYear,
            'u' => Year,
            'y' => YearOfEra,
            'G' => Era,
            _ => return None,
        };
        Some(symbol)
    }

    /// The pattern letter for this symbol.
    pub fn letter(self) -> char {
        match self {
            NanoOfDay => 'N',
            NanoOfSecond => 'n',
            MilliOfDay => 'A',
            FractionOfSecond => 'S',
            SecondOfMinute => 's',
            MinuteOfHour => 'm',
            ClockHourOfAmPm => 'h',
            HourOfAmPm => 'K',
            ClockHourOfDay => 'k',
            HourOfDay => 'H',
            AmPmOfDay => 'a',
            LocalizedDayOfWeek => 'e',
            StandaloneDayOfWeek => 'c',
            DayOfWeek => 'E',
            AlignedDayOfWeekInMonth => 'F',
            DayOfMonth => 'd',
            DayOfYear => 'D',
            WeekOfWeekBasedYear => 'w',
            AlignedWeekOfMonth => 'W',
            StandaloneMonth => 'L',
            MonthOfYear => 'M',
            StandaloneQuarter => 'q',
            QuarterOfYear => 'Q',
            WeekBasedYear => 'Y',
            Year => 'u',
            YearOfEra => 'y',
            Era => 'G',
        }
    }

    /// Position in the registry; finer fields rank lower.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn field(self) -> CalendarField {
        match self {
            NanoOfDay => CalendarField::NanoOfDay,
            NanoOfSecond | FractionOfSecond => CalendarField::NanoOfSecond,
            MilliOfDay => CalendarField::MilliOfDay,
            SecondOfMinute => CalendarField::SecondOfMinute,
            MinuteOfHour => CalendarField::MinuteOfHour,
            ClockHourOfAmPm => CalendarField::ClockHourOfAmPm,
            HourOfAmPm => CalendarField::HourOfAmPm,
            ClockHourOfDay => CalendarField::ClockHourOfDay,
            HourOfDay => CalendarField::HourOfDay,
            AmPmOfDay => CalendarField::AmPmOfDay,
            LocalizedDayOfWeek | StandaloneDayOfWeek | DayOfWeek => CalendarField::DayOfWeek,
            AlignedDayOfWeekInMonth => CalendarField::AlignedDayOfWeekInMonth,
            DayOfMonth => CalendarField::DayOfMonth,
            DayOfYear => CalendarField::DayOfYear,
            WeekOfWeekBasedYear => CalendarField::WeekOfWeekBasedYear,
            AlignedWeekOfMonth => CalendarField::AlignedWeekOfMonth,
            StandaloneMonth | MonthOfYear => CalendarField::MonthOfYear,
            StandaloneQuarter | QuarterOfYear => CalendarField::QuarterOfYear,
            WeekBasedYear => CalendarField::WeekBasedYear,
            Year => CalendarField::Year,
            YearOfEra => CalendarField::YearOfEra,
            Era => CalendarField::Era,
        }
    }

    /// Groups of symbols this one depends on. Any present (and itself
    /// satisfied) member of a group satisfies the dependency.
    pub fn dependency_groups(self) -> &'static [&'static [FieldSymbol]] {
        match self {
            NanoOfDay | MilliOfDay | ClockHourOfDay | HourOfDay | AmPmOfDay => &[DAYS],
            NanoOfSecond | FractionOfSecond => &[SECONDS],
            SecondOfMinute => &[MINUTES],
            MinuteOfHour => &[HOURS],
            ClockHourOfAmPm | HourOfAmPm => &[AMPM],
            LocalizedDayOfWeek | StandaloneDayOfWeek | DayOfWeek | AlignedDayOfWeekInMonth => {
                &[WEEKS]
            }
            DayOfMonth | AlignedWeekOfMonth => &[MONTHS],
            DayOfYear | WeekOfWeekBasedYear | StandaloneMonth | MonthOfYear
            | StandaloneQuarter | QuarterOfYear => &[YEARS],
            WeekBasedYear | Year | YearOfEra | Era => &[],
        }
    }

    /// Whether this symbol's dependency chain is satisfied by `present`.
    ///
    /// Dependencies always point at coarser symbols, so the recursion
    /// terminates at the year and era symbols.
    pub fn is_satisfied_by(self, present: SymbolSet) -> bool {
        let groups = self.dependency_groups();
        groups.is_empty()
            || groups.iter().any(|group| {
                group
                    .iter()
                    .any(|dep| present.contains(*dep) && dep.is_satisfied_by(present))
            })
    }
}

/// A set of [`FieldSymbol`]s, iterated in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SymbolSet(u32);

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: FieldSymbol) {
        self.0 |= 1 << symbol.rank();
    }

    pub fn contains(&self, symbol: FieldSymbol) -> bool {
        self.0 & (1 << symbol.rank()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// The lowest-ranked (finest) symbol in the set.
    pub fn lowest(&self) -> Option<FieldSymbol> {
        self.iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldSymbol> + '_ {
        FieldSymbol::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

impl FromIterator<FieldSymbol> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = FieldSymbol>>(iter: I) -> Self {
        let mut set = Self::new();
        for symbol in iter {
            set.insert(symbol);
        }
        set
    }
}
