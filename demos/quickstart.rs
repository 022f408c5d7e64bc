use swecal::ephemeris::EphemerisConfig;
use swecal::utc::{jd_et_to_utc, utc_time_zone, utc_to_jd, UtcTimestamp};
use swecal::{
    day_of_week, to_calendar_date, to_julian_day, CalendarDate, CalendarSystem, JulianDate,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let jd = to_julian_day(CalendarDate::new(2000, 1, 1, 12.0), CalendarSystem::Gregorian);
    println!("J2000 = {} ({:?})", jd, day_of_week(jd));

    let reform = JulianDate::GREGORIAN_REFORM;
    println!(
        "Reform: {} Gregorian, {} Julian",
        to_calendar_date(reform, CalendarSystem::Gregorian),
        to_calendar_date(reform - qtty::Days::new(1.0), CalendarSystem::Julian),
    );

    let config = EphemerisConfig::new();
    let leap = config.leap_seconds()?;
    let local = UtcTimestamp::new(2017, 1, 1, 0, 59, 60.0);
    let utc = utc_time_zone(&local, 1.0);
    let days = utc_to_jd(&utc, CalendarSystem::Gregorian, &leap)?;
    println!("{utc}: JD(TT) = {:.8}, JD(UT1) = {:.8}", days.tt.value(), days.ut1.value());
    println!(
        "back to UTC: {}",
        jd_et_to_utc(days.tt, CalendarSystem::Gregorian, &leap)
    );
    Ok(())
}
