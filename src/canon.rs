//! The 66-book Protestant canon: codes, names, ordering, and lookups.
//!
//! Books are identified by their three-character USFM code ("GEN", "1SA",
//! "REV"). [`BookId`] is the canonical handle used throughout the crate;
//! everything else (display names, canon numbers, divisions) hangs off it.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One row per book in canonical order: (USFM code, display name).
const BOOKS: [(&str, &str); 66] = [
    ("GEN", "Genesis"),
    ("EXO", "Exodus"),
    ("LEV", "Leviticus"),
    ("NUM", "Numbers"),
    ("DEU", "Deuteronomy"),
    ("JOS", "Joshua"),
    ("JDG", "Judges"),
    ("RUT", "Ruth"),
    ("1SA", "1 Samuel"),
    ("2SA", "2 Samuel"),
    ("1KI", "1 Kings"),
    ("2KI", "2 Kings"),
    ("1CH", "1 Chronicles"),
    ("2CH", "2 Chronicles"),
    ("EZR", "Ezra"),
    ("NEH", "Nehemiah"),
    ("EST", "Esther"),
    ("JOB", "Job"),
    ("PSA", "Psalms"),
    ("PRO", "Proverbs"),
    ("ECC", "Ecclesiastes"),
    ("SNG", "Song of Solomon"),
    ("ISA", "Isaiah"),
    ("JER", "Jeremiah"),
    ("LAM", "Lamentations"),
    ("EZK", "Ezekiel"),
    ("DAN", "Daniel"),
    ("HOS", "Hosea"),
    ("JOL", "Joel"),
    ("AMO", "Amos"),
    ("OBA", "Obadiah"),
    ("JON", "Jonah"),
    ("MIC", "Micah"),
    ("NAM", "Nahum"),
    ("HAB", "Habakkuk"),
    ("ZEP", "Zephaniah"),
    ("HAG", "Haggai"),
    ("ZEC", "Zechariah"),
    ("MAL", "Malachi"),
    ("MAT", "Matthew"),
    ("MRK", "Mark"),
    ("LUK", "Luke"),
    ("JHN", "John"),
    ("ACT", "Acts"),
    ("ROM", "Romans"),
    ("1CO", "1 Corinthians"),
    ("2CO", "2 Corinthians"),
    ("GAL", "Galatians"),
    ("EPH", "Ephesians"),
    ("PHP", "Philippians"),
    ("COL", "Colossians"),
    ("1TH", "1 Thessalonians"),
    ("2TH", "2 Thessalonians"),
    ("1TI", "1 Timothy"),
    ("2TI", "2 Timothy"),
    ("TIT", "Titus"),
    ("PHM", "Philemon"),
    ("HEB", "Hebrews"),
    ("JAS", "James"),
    ("1PE", "1 Peter"),
    ("2PE", "2 Peter"),
    ("1JN", "1 John"),
    ("2JN", "2 John"),
    ("3JN", "3 John"),
    ("JUD", "Jude"),
    ("REV", "Revelation"),
];

/// A book of the Bible, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BookId {
    Genesis = 1,
    Exodus,
    Leviticus,
    Numbers,
    Deuteronomy,
    Joshua,
    Judges,
    Ruth,
    FirstSamuel,
    SecondSamuel,
    FirstKings,
    SecondKings,
    FirstChronicles,
    SecondChronicles,
    Ezra,
    Nehemiah,
    Esther,
    Job,
    Psalms,
    Proverbs,
    Ecclesiastes,
    SongOfSolomon,
    Isaiah,
    Jeremiah,
    Lamentations,
    Ezekiel,
    Daniel,
    Hosea,
    Joel,
    Amos,
    Obadiah,
    Jonah,
    Micah,
    Nahum,
    Habakkuk,
    Zephaniah,
    Haggai,
    Zechariah,
    Malachi,
    Matthew,
    Mark,
    Luke,
    John,
    Acts,
    Romans,
    FirstCorinthians,
    SecondCorinthians,
    Galatians,
    Ephesians,
    Philippians,
    Colossians,
    FirstThessalonians,
    SecondThessalonians,
    FirstTimothy,
    SecondTimothy,
    Titus,
    Philemon,
    Hebrews,
    James,
    FirstPeter,
    SecondPeter,
    FirstJohn,
    SecondJohn,
    ThirdJohn,
    Jude,
    Revelation,
}

/// Old or New Testament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testament {
    Old,
    New,
}

/// Traditional canon divisions, as used for grouping in book pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    Law,
    History,
    Poetry,
    MajorProphets,
    MinorProphets,
    NewTestament,
}

impl Division {
    /// Human-readable division name.
    pub fn name(self) -> &'static str {
        match self {
            Division::Law => "Law",
            Division::History => "History",
            Division::Poetry => "Poetry",
            Division::MajorProphets => "Major Prophets",
            Division::MinorProphets => "Minor Prophets",
            Division::NewTestament => "New Testament",
        }
    }
}

impl BookId {
    /// All 66 books in canonical order.
    pub const ALL: [BookId; 66] = [
        BookId::Genesis,
        BookId::Exodus,
        BookId::Leviticus,
        BookId::Numbers,
        BookId::Deuteronomy,
        BookId::Joshua,
        BookId::Judges,
        BookId::Ruth,
        BookId::FirstSamuel,
        BookId::SecondSamuel,
        BookId::FirstKings,
        BookId::SecondKings,
        BookId::FirstChronicles,
        BookId::SecondChronicles,
        BookId::Ezra,
        BookId::Nehemiah,
        BookId::Esther,
        BookId::Job,
        BookId::Psalms,
        BookId::Proverbs,
        BookId::Ecclesiastes,
        BookId::SongOfSolomon,
        BookId::Isaiah,
        BookId::Jeremiah,
        BookId::Lamentations,
        BookId::Ezekiel,
        BookId::Daniel,
        BookId::Hosea,
        BookId::Joel,
        BookId::Amos,
        BookId::Obadiah,
        BookId::Jonah,
        BookId::Micah,
        BookId::Nahum,
        BookId::Habakkuk,
        BookId::Zephaniah,
        BookId::Haggai,
        BookId::Zechariah,
        BookId::Malachi,
        BookId::Matthew,
        BookId::Mark,
        BookId::Luke,
        BookId::John,
        BookId::Acts,
        BookId::Romans,
        BookId::FirstCorinthians,
        BookId::SecondCorinthians,
        BookId::Galatians,
        BookId::Ephesians,
        BookId::Philippians,
        BookId::Colossians,
        BookId::FirstThessalonians,
        BookId::SecondThessalonians,
        BookId::FirstTimothy,
        BookId::SecondTimothy,
        BookId::Titus,
        BookId::Philemon,
        BookId::Hebrews,
        BookId::James,
        BookId::FirstPeter,
        BookId::SecondPeter,
        BookId::FirstJohn,
        BookId::SecondJohn,
        BookId::ThirdJohn,
        BookId::Jude,
        BookId::Revelation,
    ];

    /// The three-character USFM code ("GEN", "1SA", "REV").
    pub fn code(self) -> &'static str {
        BOOKS[self as usize - 1].0
    }

    /// The English display name ("Genesis", "1 Samuel").
    pub fn name(self) -> &'static str {
        BOOKS[self as usize - 1].1
    }

    /// Canon number, 1 (Genesis) through 66 (Revelation).
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Which testament this book belongs to.
    pub fn testament(self) -> Testament {
        if self.number() <= 39 {
            Testament::Old
        } else {
            Testament::New
        }
    }

    /// Traditional canon division.
    pub fn division(self) -> Division {
        match self.number() {
            1..=5 => Division::Law,
            6..=17 => Division::History,
            18..=22 => Division::Poetry,
            23..=27 => Division::MajorProphets,
            28..=39 => Division::MinorProphets,
            _ => Division::NewTestament,
        }
    }

    /// Look up a book by canon number (1-66).
    pub fn from_number(number: u8) -> Option<BookId> {
        if number == 0 {
            return None;
        }
        Self::ALL.get(number as usize - 1).copied()
    }

    /// Look up a book by USFM code, case-insensitively.
    pub fn from_code(code: &str) -> Option<BookId> {
        BOOKS
            .iter()
            .position(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|i| Self::ALL[i])
    }

    /// Look up a book by full English name, case-insensitively.
    pub fn from_name(name: &str) -> Option<BookId> {
        BOOKS
            .iter()
            .position(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|i| Self::ALL[i])
    }

    /// Extract the book from a canonical USX/USJ key such as `"01GENBSB"`.
    ///
    /// The key format is two digits of canon order, the USFM code, then a
    /// translation tag. Only the code portion (bytes 2-4) is consulted.
    pub fn from_canonical_key(key: &str) -> Option<BookId> {
        let code = key.get(2..5)?;
        Self::from_code(code)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Books serialize as their USFM code so references stay compact in JSON.

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = BookId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a USFM book code such as \"GEN\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BookId, E> {
                BookId::from_code(v)
                    .ok_or_else(|| E::custom(format!("unknown book code: {v:?}")))
            }
        }

        deserializer.deserialize_str(CodeVisitor)
    }
}
