use super::*;
use chrono::{NaiveDate, TimeZone};

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, minute, 0).unwrap()
}

fn raw(twilight: (u32, u32), sunrise: (u32, u32), sunset: (u32, u32), dusk: (u32, u32)) -> RawSunPhases {
    RawSunPhases::new(
        time(twilight.0, twilight.1),
        time(sunrise.0, sunrise.1),
        time(sunset.0, sunset.1),
        time(dusk.0, dusk.1),
    )
}

fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_from_fields_maps_twilight_keys() {
    let payload = fields(&[
        ("sunrise", "6:00:00 AM"),
        ("sunset", "6:00:00 PM"),
        ("civil_twilight_begin", "5:30:00 AM"),
        ("civil_twilight_end", "6:30:00 PM"),
        ("day_length", "12:00:00"),
    ]);

    let phases = RawSunPhases::from_fields(&payload).unwrap();
    assert_eq!(phases.morning_twilight, time(5, 30));
    assert_eq!(phases.sunrise, time(6, 0));
    assert_eq!(phases.sunset, time(18, 0));
    assert_eq!(phases.night_twilight, time(18, 30));
}

#[test]
fn test_from_fields_missing_key() {
    let payload = fields(&[
        ("sunrise", "6:00:00 AM"),
        ("sunset", "6:00:00 PM"),
        ("civil_twilight_begin", "5:30:00 AM"),
    ]);

    let err = RawSunPhases::from_fields(&payload).unwrap_err();
    assert!(matches!(err, NightTempError::Provider(_)));
    assert!(err.to_string().contains("civil_twilight_end"));
}

#[test]
fn test_from_fields_unparseable_value() {
    let payload = fields(&[
        ("sunrise", "dawn-ish"),
        ("sunset", "6:00:00 PM"),
        ("civil_twilight_begin", "5:30:00 AM"),
        ("civil_twilight_end", "6:30:00 PM"),
    ]);

    let err = RawSunPhases::from_fields(&payload).unwrap_err();
    assert!(matches!(err, NightTempError::Provider(_)));
    assert!(err.to_string().contains("dawn-ish"));
}

#[test]
fn test_anchor_uses_date_of_now() {
    let now = at(15, 12, 0);
    let phases = SunPhases::anchor(raw((5, 30), (6, 0), (18, 0), (18, 30)), now);

    assert_eq!(phases.morning_twilight, at(15, 5, 30));
    assert_eq!(phases.night_twilight, at(15, 18, 30));
    assert_eq!(phases.user_time, now);
    assert_eq!(phases.midday_begin, None);
    assert!(!phases.is_ordered());
}

#[test]
fn test_normalize_same_day_cycle_untouched() {
    let mut phases = SunPhases::anchor(raw((5, 30), (6, 0), (18, 0), (18, 30)), at(15, 3, 30));
    normalize(&mut phases).unwrap();

    assert_eq!(phases.morning_twilight, at(15, 5, 30));
    assert_eq!(phases.sunrise, at(15, 6, 0));
    assert_eq!(phases.sunset, at(15, 18, 0));
    assert_eq!(phases.night_twilight, at(15, 18, 30));
    assert_eq!(phases.user_time, at(15, 3, 30));
}

#[test]
fn test_normalize_wrap_between_twilight_and_sunrise() {
    // Twilight starts before midnight, the sun rises after it
    let mut phases = SunPhases::anchor(raw((23, 30), (0, 30), (9, 0), (10, 30)), at(15, 23, 45));
    normalize(&mut phases).unwrap();

    assert_eq!(phases.morning_twilight, at(15, 23, 30));
    assert_eq!(phases.sunrise, at(16, 0, 30));
    assert_eq!(phases.sunset, at(16, 9, 0));
    assert_eq!(phases.night_twilight, at(16, 10, 30));
    // 23:45 already follows the twilight start, it stays on the earlier day
    assert_eq!(phases.user_time, at(15, 23, 45));
}

#[test]
fn test_normalize_wrap_between_sunrise_and_sunset() {
    let mut phases = SunPhases::anchor(raw((19, 0), (19, 30), (7, 30), (8, 0)), at(15, 20, 0));
    normalize(&mut phases).unwrap();

    assert_eq!(phases.sunrise, at(15, 19, 30));
    assert_eq!(phases.sunset, at(16, 7, 30));
    assert_eq!(phases.night_twilight, at(16, 8, 0));
    assert_eq!(phases.user_time, at(15, 20, 0));
}

#[test]
fn test_normalize_wrap_between_sunset_and_night_twilight() {
    let mut phases = SunPhases::anchor(raw((11, 0), (11, 30), (23, 45), (0, 15)), at(15, 12, 0));
    normalize(&mut phases).unwrap();

    assert_eq!(phases.sunset, at(15, 23, 45));
    assert_eq!(phases.night_twilight, at(16, 0, 15));
}

#[test]
fn test_normalize_moves_now_into_post_midnight_part_of_cycle() {
    // The cycle began yesterday evening; at 01:00 the day is well underway
    let mut phases = SunPhases::anchor(raw((19, 0), (19, 30), (7, 30), (8, 0)), at(15, 1, 0));
    normalize(&mut phases).unwrap();

    assert_eq!(phases.user_time, at(16, 1, 0));
    assert!(phases.user_time > phases.sunrise && phases.user_time < phases.sunset);
}

#[test]
fn test_normalize_keeps_now_between_cycles() {
    // 12:00 is after yesterday's cycle ended (08:00) and before today's starts
    let mut phases = SunPhases::anchor(raw((19, 0), (19, 30), (7, 30), (8, 0)), at(15, 12, 0));
    normalize(&mut phases).unwrap();

    assert_eq!(phases.user_time, at(15, 12, 0));
    assert!(phases.user_time < phases.morning_twilight);
}

#[test]
fn test_plateau_mirrors_twilight_durations() {
    let phases = SunPhases::prepare(raw((5, 30), (6, 0), (18, 0), (18, 30)), at(15, 16, 0)).unwrap();

    assert_eq!(phases.midday_begin, Some(at(15, 6, 30)));
    assert_eq!(phases.midday_end, Some(at(15, 17, 30)));
    assert!(phases.is_ordered());
}

#[test]
fn test_plateau_symmetry_after_midnight_wrap() {
    let phases =
        SunPhases::prepare(raw((23, 30), (0, 30), (9, 0), (10, 30)), at(15, 23, 45)).unwrap();

    let midday_begin = phases.midday_begin.unwrap();
    let midday_end = phases.midday_end.unwrap();
    assert_eq!(midday_begin - phases.sunrise, phases.sunrise - phases.morning_twilight);
    assert_eq!(phases.sunset - midday_end, phases.night_twilight - phases.sunset);
    assert_eq!(midday_begin, at(16, 1, 30));
    assert_eq!(midday_end, at(16, 7, 30));
    assert!(phases.is_ordered());
}

#[test]
fn test_degenerate_cycle_is_not_ordered() {
    // Twilight longer than half of the daylight: the ramps overlap
    let phases = SunPhases::prepare(raw((2, 0), (8, 0), (12, 0), (18, 0)), at(15, 10, 0)).unwrap();

    assert!(!phases.is_ordered());
}

#[test]
fn test_twilight_durations() {
    let phases = SunPhases::prepare(raw((5, 30), (6, 0), (18, 0), (18, 45)), at(15, 9, 0)).unwrap();

    assert_eq!(phases.morning_twilight_duration(), Duration::minutes(30));
    assert_eq!(phases.night_twilight_duration(), Duration::minutes(45));
}

#[test]
fn test_next_day_overflow_is_computation_error() {
    let last = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap().and_utc();
    let err = next_day(last).unwrap_err();
    assert!(matches!(err, NightTempError::Computation(_)));
}
