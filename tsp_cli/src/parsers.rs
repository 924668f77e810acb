use jiff::SpanRelativeTo;
use tsp_optimizer::problem::distance_method::DistanceMethod;

/// Accepts `30s`, `5m`, ISO 8601 durations like `PT1H30M` or plain seconds.
pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(format!("invalid duration: {input}"))
}

pub fn parse_distance_method(input: &str) -> Result<DistanceMethod, String> {
    input.parse()
}
