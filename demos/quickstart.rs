use chrono::FixedOffset;
use civildate::{divide_period, Date, Datetime, Format, NullDate};

fn main() -> civildate::Result<()> {
    let today = FixedOffset::east_opt(9 * 3600)
        .map(Datetime::now_at)
        .unwrap_or_else(Datetime::now_utc);
    println!("now (UTC+9): {today}");
    println!("RFC 1123:    {}", today.format(Format::Rfc1123)?);

    let overflow = Date::new(2024, 14, 33);
    println!("2024-14-33 normalizes to {overflow}");

    let parsed = Datetime::parse(Format::Rfc3339, "2024-03-10T08:30:00-05:00")?;
    println!("offset dropped: {parsed}");

    for period in divide_period(Date::new(2024, 1, 1), Date::new(2024, 1, 10), 4)? {
        println!("chunk: {period} ({} days)", period.duration_days().value());
    }

    let absent: NullDate = "".parse()?;
    println!("empty flag is valid? {}", absent.is_valid());
    Ok(())
}
