//! crates/cinematcher_core/src/catalog.rs
//!
//! The fixed catalogs the form is built from: the eight time buckets and the
//! pool of tags used by the "surprise me" action.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{TimeBucket, CLUE_SLOTS};

/// Candidate tags for a surprise pick. `Noir` appears twice.
pub const SURPRISE_TAGS: [&str; 20] = [
    "Cyberpunk",
    "Misterioso",
    "Anni 80",
    "Noir",
    "Distopico",
    "Inseguimenti",
    "Paranoia",
    "Plot Twist",
    "Venezia",
    "Noir",
    "Spaziale",
    "Introspettivo",
    "Violento",
    "Sognante",
    "Tecnologico",
    "Dramma familiare",
    "Vendetta",
    "Amore proibito",
    "Magia",
    "Post-apocalittico",
];

impl TimeBucket {
    pub const ALL: [TimeBucket; 8] = [
        TimeBucket::Quick,
        TimeBucket::StandardFilm,
        TimeBucket::LongFilm,
        TimeBucket::Miniseries,
        TimeBucket::Weekend,
        TimeBucket::LongMarathon,
        TimeBucket::LongSeries,
        TimeBucket::Flexible,
    ];

    /// The canonical label, as sent to the service and persisted.
    pub fn label(self) -> &'static str {
        match self {
            TimeBucket::Quick => "Veloce (30-60 min)",
            TimeBucket::StandardFilm => "Film standard (90-120 min)",
            TimeBucket::LongFilm => "Film lungo (2-3 ore)",
            TimeBucket::Miniseries => "Miniserie (3-6 ore)",
            TimeBucket::Weekend => "Weekend (6-12 ore)",
            TimeBucket::LongMarathon => "Maratona lunga (12-24 ore)",
            TimeBucket::LongSeries => "Serie lunga (24+ ore)",
            TimeBucket::Flexible => "Flessibile",
        }
    }

    /// The label shown on the selector button.
    pub fn short_label(self) -> &'static str {
        match self {
            TimeBucket::Quick => "⚡ Veloce",
            TimeBucket::StandardFilm => "🎬 Film Standard",
            TimeBucket::LongFilm => "🎭 Film Lungo",
            TimeBucket::Miniseries => "📺 Miniserie",
            TimeBucket::Weekend => "🍿 Weekend",
            TimeBucket::LongMarathon => "🎪 Maratona",
            TimeBucket::LongSeries => "🎯 Serie Lunga",
            TimeBucket::Flexible => "🔄 Flessibile",
        }
    }

    pub fn range(self) -> &'static str {
        match self {
            TimeBucket::Quick => "30-60 min",
            TimeBucket::StandardFilm => "90-120 min",
            TimeBucket::LongFilm => "2-3 ore",
            TimeBucket::Miniseries => "3-6 ore",
            TimeBucket::Weekend => "6-12 ore",
            TimeBucket::LongMarathon => "12-24 ore",
            TimeBucket::LongSeries => "24+ ore",
            TimeBucket::Flexible => "Scegli tu",
        }
    }

    /// Command-line friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            TimeBucket::Quick => "veloce",
            TimeBucket::StandardFilm => "film-standard",
            TimeBucket::LongFilm => "film-lungo",
            TimeBucket::Miniseries => "miniserie",
            TimeBucket::Weekend => "weekend",
            TimeBucket::LongMarathon => "maratona",
            TimeBucket::LongSeries => "serie-lunga",
            TimeBucket::Flexible => "flessibile",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown time bucket '{0}'")]
pub struct UnknownTimeBucket(pub String);

impl FromStr for TimeBucket {
    type Err = UnknownTimeBucket;

    /// Accepts either the slug or the canonical label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeBucket::ALL
            .into_iter()
            .find(|bucket| {
                bucket.slug().eq_ignore_ascii_case(wanted)
                    || bucket.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownTimeBucket(s.to_string()))
    }
}

/// A randomized form: ten tags and one time bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surprise {
    pub clues: Vec<String>,
    pub time: TimeBucket,
}

/// Shuffles the tag catalog, keeps the first ten entries, then picks a bucket.
pub fn surprise<R: Rng + ?Sized>(rng: &mut R) -> Surprise {
    let mut tags = SURPRISE_TAGS.to_vec();
    tags.shuffle(rng);
    tags.truncate(CLUE_SLOTS);

    let time = TimeBucket::ALL[rng.gen_range(0..TimeBucket::ALL.len())];

    Surprise {
        clues: tags.into_iter().map(str::to_string).collect(),
        time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_slugs_and_labels() {
        assert_eq!("veloce".parse::<TimeBucket>().unwrap(), TimeBucket::Quick);
        assert_eq!(
            "Serie lunga (24+ ore)".parse::<TimeBucket>().unwrap(),
            TimeBucket::LongSeries
        );
        assert_eq!("FLESSIBILE".parse::<TimeBucket>().unwrap(), TimeBucket::Flexible);
        assert!("due ore".parse::<TimeBucket>().is_err());
    }

    #[test]
    fn display_matches_serialized_label() {
        for bucket in TimeBucket::ALL {
            let encoded = serde_json::to_string(&bucket).unwrap();
            assert_eq!(encoded, format!("\"{}\"", bucket));
        }
    }

    #[test]
    fn surprise_is_the_shuffled_catalog_truncated_to_ten() {
        let picked = surprise(&mut StdRng::seed_from_u64(42));

        let mut expected_rng = StdRng::seed_from_u64(42);
        let mut expected = SURPRISE_TAGS.to_vec();
        expected.shuffle(&mut expected_rng);
        expected.truncate(CLUE_SLOTS);
        let expected_time = TimeBucket::ALL[expected_rng.gen_range(0..TimeBucket::ALL.len())];

        assert_eq!(picked.clues, expected);
        assert_eq!(picked.time, expected_time);
    }

    #[test]
    fn surprise_draws_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = surprise(&mut rng);
            assert_eq!(picked.clues.len(), CLUE_SLOTS);
            for tag in &picked.clues {
                let in_pick = picked.clues.iter().filter(|t| *t == tag).count();
                let in_catalog = SURPRISE_TAGS.iter().filter(|t| *t == tag).count();
                assert!(in_pick <= in_catalog, "{tag} drawn {in_pick} times");
            }
        }
    }
}
