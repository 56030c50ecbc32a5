//! Scenario tests for the journey search.

use super::*;
use crate::availability::MockAvailability;
use crate::domain::{Quota, Span, TrainNumber, TravelClass};
use crate::routes::RouteTable;
use chrono::NaiveDate;
use std::time::Duration;

fn code(s: &str) -> StationCode {
    StationCode::parse(s).unwrap()
}

fn codes(list: &[&str]) -> Vec<StationCode> {
    list.iter().map(|s| code(s)).collect()
}

fn route(list: &[&str]) -> Route {
    Route::new(codes(list)).unwrap()
}

fn train() -> TrainNumber {
    TrainNumber::parse("17644").unwrap()
}

fn ticket() -> TicketRequest {
    TicketRequest::new(
        train(),
        NaiveDate::from_ymd_opt(2025, 12, 6).unwrap(),
        TravelClass::parse("2A").unwrap(),
        Quota::parse("GN").unwrap(),
    )
}

/// (origin, destination) codes of each booking.
fn legs(report: &JourneyReport) -> Vec<(String, String)> {
    report
        .plan()
        .map(|plan| {
            plan.bookings()
                .iter()
                .map(|s| (s.origin.to_string(), s.destination.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn leg(origin: &str, destination: &str) -> (String, String) {
    (origin.to_string(), destination.to_string())
}

#[tokio::test]
async fn two_bookings_with_one_seat_change() {
    let mock = MockAvailability::new()
        .with_status(code("A"), code("C"), "AVAILABLE-0005")
        .with_status(code("C"), code("E"), "RAC 2");
    let r = route(&["A", "B", "C", "D", "E"]);

    let report = plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    assert_eq!(legs(&report), vec![leg("A", "C"), leg("C", "E")]);
    let plan = report.plan().unwrap();
    assert_eq!(plan.booking_count(), 2);
    assert_eq!(plan.seat_changes(), 1);
    assert_eq!(plan.bookings()[0].status, "AVAILABLE-0005");
    assert_eq!(plan.bookings()[1].status, "RAC 2");

    assert!(!report.matrix.fast_path());
    assert_eq!(report.matrix.checked(), 10);
    assert_eq!(report.matrix.bookable(), 2);
}

#[tokio::test]
async fn bookable_direct_segment_skips_sweep() {
    let mock = MockAvailability::new()
        .with_status(code("A"), code("E"), "CNF")
        .with_status(code("A"), code("B"), "CNF")
        .with_status(code("B"), code("E"), "CNF");
    let r = route(&["A", "B", "C", "D", "E"]);

    let report = plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    assert_eq!(legs(&report), vec![leg("A", "E")]);
    assert_eq!(report.plan().unwrap().seat_changes(), 0);
    assert!(report.matrix.fast_path());
    assert_eq!(mock.call_count(), 1);
    assert_eq!(report.matrix.upstream_calls(), 1);
}

#[tokio::test]
async fn overlap_lets_traveller_board_mid_segment() {
    // Bookable: 0 -> 3 and 2 -> 5. Ride the first to D, stay on for the
    // second from there.
    let mock = MockAvailability::new()
        .with_status(code("A"), code("D"), "CNF")
        .with_status(code("C"), code("F"), "AVAILABLE-0001");
    let r = route(&["A", "B", "C", "D", "E", "F"]);

    let report = plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    // Bookings report the real ticket stations, not where they're boarded.
    assert_eq!(legs(&report), vec![leg("A", "D"), leg("C", "F")]);
    let spans: Vec<Span> = report
        .plan()
        .unwrap()
        .bookings()
        .iter()
        .map(|s| s.span)
        .collect();
    assert_eq!(
        spans,
        vec![Span::new(0, 3, 6).unwrap(), Span::new(2, 5, 6).unwrap()]
    );
}

#[tokio::test]
async fn nothing_bookable_is_no_plan() {
    let mock = MockAvailability::new()
        .with_status(code("A"), code("B"), "GNWL 10")
        .with_status(code("B"), code("C"), "NOT AVAILABLE");
    let r = route(&["A", "B", "C"]);

    let report = plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    assert_eq!(report.outcome, JourneyOutcome::NoPlanFound);
    assert!(report.plan().is_none());
    assert_eq!(report.paths_found, 0);
    assert_eq!(report.matrix.checked(), 3);
    assert_eq!(report.matrix.bookable(), 0);
}

#[tokio::test]
async fn gap_in_coverage_is_no_plan() {
    let mock = MockAvailability::new()
        .with_status(code("A"), code("B"), "CNF")
        .with_status(code("C"), code("D"), "CNF");
    let r = route(&["A", "B", "C", "D"]);

    let report = plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    assert_eq!(report.outcome, JourneyOutcome::NoPlanFound);
    assert_eq!(report.matrix.bookable(), 2);
}

#[tokio::test]
async fn sweep_makes_one_call_per_pair() {
    let mock = MockAvailability::new();
    let names = ["A", "B", "C", "D", "E", "F", "G"];
    let r = route(&names);

    let report = plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    // n·(n-1)/2 pairs; the direct pair is probed first and then reused.
    assert_eq!(mock.call_count(), 21);
    assert_eq!(report.matrix.upstream_calls(), 21);
    assert_eq!(report.matrix.checked(), 21);
}

#[tokio::test]
async fn each_search_starts_with_an_empty_cache() {
    let mock = MockAvailability::new();
    let r = route(&["A", "B", "C"]);

    plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;
    plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    assert_eq!(mock.call_count(), 6);
}

#[tokio::test]
async fn failing_segment_does_not_block_other_paths() {
    let mock = MockAvailability::new()
        .with_failure(code("A"), code("C"))
        .with_failure(code("A"), code("D"))
        .with_status(code("A"), code("B"), "CNF")
        .with_status(code("B"), code("D"), "CNF");
    let r = route(&["A", "B", "C", "D"]);

    let report = plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    assert_eq!(legs(&report), vec![leg("A", "B"), leg("B", "D")]);
    let failed: Vec<_> = report
        .matrix
        .probes()
        .iter()
        .filter(|p| p.result.is_error())
        .collect();
    assert_eq!(failed.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn slow_probes_time_out_as_unbookable() {
    let mock = MockAvailability::new()
        .with_delay(Duration::from_secs(30))
        .with_status(code("A"), code("B"), "CNF")
        .with_status(code("B"), code("C"), "CNF");
    let config = PlannerConfig::default().with_probe_timeout(Duration::from_secs(5));

    let report = plan_journey(&mock, &route(&["A", "B", "C"]), &ticket(), &config).await;

    assert_eq!(report.outcome, JourneyOutcome::NoPlanFound);
    assert!(
        report
            .matrix
            .probes()
            .iter()
            .all(|p| p.result.status.starts_with("ERROR: "))
    );
}

#[tokio::test(start_paused = true)]
async fn sweep_stays_within_concurrency_limit() {
    let mock = MockAvailability::new().with_delay(Duration::from_millis(100));
    let names: Vec<String> = (b'A'..=b'L').map(|c| (c as char).to_string()).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let config = PlannerConfig::default().with_max_concurrent_probes(4);

    let report = plan_journey(&mock, &route(&names), &ticket(), &config).await;

    assert_eq!(report.matrix.checked(), 66);
    assert!(mock.peak_in_flight() <= 4);
}

#[tokio::test]
async fn dense_availability_picks_fewest_bookings() {
    // Everything bookable except the full route.
    let names = ["A", "B", "C", "D", "E", "F"];
    let mut mock = MockAvailability::new();
    for span in Span::all(names.len()) {
        if span.start() == 0 && span.end() == names.len() - 1 {
            continue;
        }
        mock = mock.with_status(code(names[span.start()]), code(names[span.end()]), "CNF");
    }
    let r = route(&names);

    let report = plan_journey(&mock, &r, &ticket(), &PlannerConfig::default()).await;

    assert_eq!(report.plan().unwrap().booking_count(), 2);
    assert!(report.paths_found > 1);
}

#[tokio::test]
async fn enumeration_cap_still_yields_a_plan() {
    let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let mut mock = MockAvailability::new();
    for span in Span::all(names.len()) {
        if span.start() == 0 && span.end() == names.len() - 1 {
            continue;
        }
        mock = mock.with_status(code(names[span.start()]), code(names[span.end()]), "CNF");
    }
    let config = PlannerConfig::default().with_max_paths(3);

    let report = plan_journey(&mock, &route(&names), &ticket(), &config).await;

    assert_eq!(report.paths_found, 3);
    assert!(report.plan().is_some());
}

fn table() -> RouteTable {
    RouteTable::new().with_route(
        train(),
        codes(&["COA", "VSKP", "RJY", "BZA", "NLR", "MS"]),
    )
}

#[tokio::test]
async fn search_plans_between_requested_stations() {
    let routes = table();
    let mock = MockAvailability::new()
        .with_status(code("VSKP"), code("BZA"), "CNF")
        .with_status(code("BZA"), code("NLR"), "RAC 4");
    let config = PlannerConfig::default();
    let search = JourneySearch::new(&routes, &mock, &config);

    let request = SearchRequest::new(ticket(), code("VSKP"), code("NLR"));
    let report = search.search(&request).await.unwrap();

    assert_eq!(report.route.stations(), codes(&["VSKP", "RJY", "BZA", "NLR"]).as_slice());
    assert_eq!(legs(&report), vec![leg("VSKP", "BZA"), leg("BZA", "NLR")]);
    assert_eq!(report.matrix.checked(), 6);
}

#[tokio::test]
async fn unknown_train_is_fatal() {
    let routes = RouteTable::new();
    let mock = MockAvailability::new();
    let config = PlannerConfig::default();
    let search = JourneySearch::new(&routes, &mock, &config);

    let request = SearchRequest::new(ticket(), code("COA"), code("MS"));
    let err = search.search(&request).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::Route(RouteError::RouteUnavailable { .. })
    ));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn missing_station_lists_known_codes() {
    let routes = table();
    let mock = MockAvailability::new();
    let config = PlannerConfig::default();
    let search = JourneySearch::new(&routes, &mock, &config);

    let request = SearchRequest::new(ticket(), code("COA"), code("SBC"));
    let err = search.search(&request).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::StationNotOnRoute {
            role: StationRole::Destination,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "destination station SBC not found on route (known: COA, VSKP, RJY, BZA, NLR, MS)"
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn destination_before_source_is_fatal() {
    let routes = table();
    let mock = MockAvailability::new();
    let config = PlannerConfig::default();
    let search = JourneySearch::new(&routes, &mock, &config);

    let request = SearchRequest::new(ticket(), code("NLR"), code("VSKP"));
    let err = search.search(&request).await.unwrap_err();

    assert!(matches!(err, SearchError::DestinationBeforeSource { .. }));
}

#[tokio::test]
async fn same_station_is_rejected() {
    let routes = table();
    let mock = MockAvailability::new();
    let config = PlannerConfig::default();
    let search = JourneySearch::new(&routes, &mock, &config);

    let request = SearchRequest::new(ticket(), code("BZA"), code("BZA"));
    let err = search.search(&request).await.unwrap_err();

    assert!(matches!(err, SearchError::SameStation(_)));
}

#[test]
fn domain_errors_map_to_search_errors() {
    let err = SearchError::from(DomainError::RouteTooShort(1));
    assert!(matches!(err, SearchError::InvalidRoute(_)));

    let err = SearchError::from(DomainError::SameStation(code("MS")));
    assert_eq!(err.to_string(), "source and destination are both MS");
}
