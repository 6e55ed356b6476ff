//! Human-readable place summaries.

use compass_core::{MAX_SCORE, ScoredPlace};

/// Describe a scored place in a few sentences.
///
/// Clauses appear in a fixed order: business type and category, age or
/// a generic establishment phrase, distance when known, the authenticity
/// score, then a closing line that depends on whether a website is listed.
///
/// # Examples
/// ```
/// use compass_core::{CanonicalPlace, Scorer};
/// use compass_scorer::{AuthenticityScorer, summarize};
///
/// let place = CanonicalPlace::new("c-1", "Blue Door")
///     .with_category("Coffee Shop")
///     .with_age_years(12)
///     .with_distance_meters(310.4);
/// let scored = AuthenticityScorer::default().score_place(place);
/// assert_eq!(
///     summarize(&scored),
///     "This independent coffee shop has been serving the community for 12 years. \
///      Located just 310 meters away, it offers an authentic local experience with an \
///      authenticity score of 100/100. This local gem maintains a traditional approach \
///      to business."
/// );
/// ```
#[must_use]
pub fn summarize(scored: &ScoredPlace) -> String {
    let place = scored.place();
    let ownership = if place.is_chain() {
        "chain"
    } else {
        "independent"
    };
    let category = place.category().to_lowercase();

    let history = match place.age_years() {
        Some(1) => "has been serving the community for 1 year.".to_owned(),
        Some(years) if years > 0 => {
            format!("has been serving the community for {years} years.")
        }
        _ => "is a local establishment.".to_owned(),
    };

    let experience = format!(
        "offers an authentic local experience with an authenticity score of {}/{MAX_SCORE}.",
        scored.authenticity_score()
    );
    let location = place.distance_meters().map_or_else(
        || format!("It {experience}"),
        |meters| {
            format!(
                "Located just {:.0} meters away, it {experience}",
                meters.round()
            )
        },
    );

    let closing = if place.has_website() {
        "Visit their website for more information about their offerings and hours."
    } else {
        "This local gem maintains a traditional approach to business."
    };

    format!("This {ownership} {category} {history} {location} {closing}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::{Assessment, AuthenticityLabel, CanonicalPlace};
    use rstest::rstest;

    fn scored(place: CanonicalPlace, score: u8) -> ScoredPlace {
        ScoredPlace::new(
            place,
            Assessment {
                score,
                label: AuthenticityLabel::Authentic,
            },
        )
    }

    #[rstest]
    fn chain_without_age_or_distance() {
        let place = CanonicalPlace::new("b", "Big Burger")
            .with_category("Fast Food Restaurant")
            .with_chain(Some("Big Burger".into()))
            .with_website("https://bigburger.example");
        assert_eq!(
            summarize(&scored(place, 40)),
            "This chain fast food restaurant is a local establishment. It offers an authentic \
             local experience with an authenticity score of 40/100. Visit their website for \
             more information about their offerings and hours."
        );
    }

    #[rstest]
    #[case(Some(1), "has been serving the community for 1 year.")]
    #[case(Some(4), "has been serving the community for 4 years.")]
    #[case(Some(0), "is a local establishment.")]
    #[case(None, "is a local establishment.")]
    fn age_clause(#[case] age: Option<u32>, #[case] expected: &str) {
        let base = CanonicalPlace::new("p", "P").with_category("Bookstore");
        let place = match age {
            Some(years) => base.with_age_years(years),
            None => base,
        };
        let summary = summarize(&scored(place, 60));
        assert!(
            summary.starts_with(&format!("This independent bookstore {expected}")),
            "unexpected summary: {summary}"
        );
    }

    #[rstest]
    #[case(849.5, "Located just 850 meters away")]
    #[case(0.2, "Located just 0 meters away")]
    fn distance_is_rounded(#[case] meters: f64, #[case] expected: &str) {
        let place = CanonicalPlace::new("p", "P").with_distance_meters(meters);
        let summary = summarize(&scored(place, 60));
        assert!(summary.contains(expected), "unexpected summary: {summary}");
    }
}
