use once_cell::sync::Lazy;
use regex::Regex;

/// Videos shorter than this many seconds are treated as Shorts.
pub const SHORT_FORM_THRESHOLD_SECS: u64 = 60;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
});

/// Converts a `PT#H#M#S` duration into whole seconds.
///
/// Missing components count as zero and anything without a `PT` section yields
/// zero, which callers read as "short or unknown".
pub fn parse_duration(duration: &str) -> u64 {
    let Some(captures) = DURATION_RE.captures(duration) else {
        return 0;
    };

    let component = |index: usize| -> u64 {
        captures
            .get(index)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_components() {
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("PT2M"), 120);
        assert_eq!(parse_duration("PT3H"), 10800);
        assert_eq!(parse_duration("PT1H5S"), 3605);
    }

    #[test]
    fn missing_components_default_to_zero() {
        assert_eq!(parse_duration("PT"), 0);
        assert_eq!(parse_duration("PT0M30S"), 30);
        assert_eq!(parse_duration("PT1M0S"), 60);
    }

    #[test]
    fn unparsable_input_is_zero() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("ten minutes"), 0);
        assert_eq!(parse_duration("P1D"), 0);
    }

    #[test]
    fn large_hour_counts_are_accepted() {
        assert_eq!(parse_duration("PT1000H"), 3_600_000);
        assert_eq!(parse_duration("PT99999999999999999999999H"), u64::MAX);
    }

    #[test]
    fn threshold_sits_between_59_and_60_seconds() {
        assert!(parse_duration("PT0M59S") < SHORT_FORM_THRESHOLD_SECS);
        assert!(parse_duration("PT1M0S") >= SHORT_FORM_THRESHOLD_SECS);
    }
}
