//! Argument parsing and text rendering for the PowderPath CLI.

use std::fmt::Write as _;

use powderpath_core::{format_km, Itinerary, LatLng, StepKind};

/// A `--stop LAT,LNG[,NAME]` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct StopArg {
    pub point: LatLng,
    pub name: Option<String>,
}

/// Clap value parser for `LAT,LNG[,NAME]`.
pub fn parse_stop(raw: &str) -> Result<StopArg, String> {
    let mut parts = raw.splitn(3, ',');
    let lat = parse_coord(parts.next(), "latitude", 90.0)?;
    let lng = parse_coord(parts.next(), "longitude", 180.0)?;
    let name = parts
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from);
    Ok(StopArg {
        point: LatLng::new(lat, lng),
        name,
    })
}

fn parse_coord(value: Option<&str>, label: &str, limit: f64) -> Result<f64, String> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("missing {}", label))?;
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("invalid {} '{}'", label, value))?;
    if !parsed.is_finite() || parsed.abs() > limit {
        return Err(format!("{} out of range: {}", label, parsed));
    }
    Ok(parsed)
}

fn kind_marker(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Ski => "SKI ",
        StepKind::Lift => "LIFT",
        StepKind::Walk => "WALK",
    }
}

/// Plain-text itinerary: one line per step, then totals.
pub fn render_itinerary(itinerary: &Itinerary) -> String {
    let mut out = String::new();
    if itinerary.is_empty() {
        out.push_str("No steps.\n");
        return out;
    }

    for (idx, step) in itinerary.steps.iter().enumerate() {
        let _ = write!(out, "{:>3}. [{}] {}", idx + 1, kind_marker(step.kind), step.label());
        if let Some(difficulty) = &step.difficulty {
            let _ = write!(out, " ({})", difficulty);
        }
        let _ = writeln!(out, "  {}", format_km(step.length_m));
    }

    let summary = &itinerary.summary;
    let _ = writeln!(
        out,
        "Total {}  ski {}  lift {}  walk {}",
        format_km(summary.total_m),
        format_km(summary.ski_m),
        format_km(summary.lift_m),
        format_km(summary.walk_m)
    );
    if summary.fallback_count > 0 {
        let _ = writeln!(out, "{} leg(s) could not be routed and are shown as straight lines", summary.fallback_count);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use powderpath_core::{build_itinerary, Fallback, Segment};

    #[test]
    fn parses_stop_with_and_without_name() {
        assert_eq!(
            parse_stop("45.30,6.58").unwrap(),
            StopArg { point: LatLng::new(45.30, 6.58), name: None }
        );
        let named = parse_stop(" 45.29 , 6.59 , Col de la Loze, top").unwrap();
        assert_eq!(named.name.as_deref(), Some("Col de la Loze, top"));
    }

    #[test]
    fn rejects_bad_stops() {
        assert!(parse_stop("45.3").is_err());
        assert!(parse_stop("abc,6.5").is_err());
        assert!(parse_stop("95.0,6.5").is_err());
        assert!(parse_stop("45.0,NaN").is_err());
    }

    #[test]
    fn renders_steps_and_fallback_note() {
        let a = LatLng::new(45.30, 6.58);
        let b = LatLng::new(45.29, 6.59);
        let segments = vec![Segment {
            name: Some("Verte".into()),
            difficulty: Some("easy".into()),
            path: vec![a, b],
        }];
        let itinerary = build_itinerary(&segments, &[Fallback { start: b, end: a }], &[], &[a, b]);
        let text = render_itinerary(&itinerary);
        assert!(text.contains("[SKI ] Verte (easy)"));
        assert!(text.contains("[LIFT] Unnamed lift"));
        assert!(text.contains("1 leg(s) could not be routed"));
    }

    #[test]
    fn empty_itinerary() {
        assert_eq!(render_itinerary(&Itinerary::default()), "No steps.\n");
    }
}
