use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};

/// São Paulo civil holidays, 2025–2026. Submissions reference dates in this
/// window; the list needs a yearly refresh.
pub const SP_HOLIDAYS: &[&str] = &[
    "2025-01-01",
    "2025-01-25",
    "2025-03-03",
    "2025-03-04",
    "2025-04-18",
    "2025-04-21",
    "2025-05-01",
    "2025-06-19",
    "2025-07-09",
    "2025-09-07",
    "2025-10-12",
    "2025-11-02",
    "2025-11-15",
    "2025-11-20",
    "2025-12-25",
    "2026-01-01",
    "2026-01-25",
    "2026-02-16",
    "2026-02-17",
    "2026-04-03",
    "2026-04-21",
    "2026-05-01",
    "2026-06-04",
    "2026-07-09",
    "2026-09-07",
    "2026-10-12",
    "2026-11-02",
    "2026-11-15",
    "2026-11-20",
    "2026-12-25",
];

/// Brazil has no DST since 2019, so São Paulo is a fixed UTC-3.
const SAO_PAULO_OFFSET_SECS: i32 = 3 * 3600;

pub fn local_now() -> DateTime<FixedOffset> {
    let offset = FixedOffset::west_opt(SAO_PAULO_OFFSET_SECS).expect("valid fixed offset");
    Utc::now().with_timezone(&offset)
}

pub fn local_today() -> NaiveDate {
    local_now().date_naive()
}

pub fn is_business_day(date: NaiveDate) -> bool {
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    let formatted = date.format("%Y-%m-%d").to_string();
    !SP_HOLIDAYS.iter().any(|h| *h == formatted)
}

/// Most recent date that lies `business_days` business days before `today`,
/// found by walking backward one calendar day at a time. An occurrence date
/// is inside the allowed window when it is on or before this limit.
pub fn limit_date(today: NaiveDate, business_days: u32) -> NaiveDate {
    let mut date = today;
    let mut counted = 0;
    while counted < business_days {
        date = date.pred_opt().expect("calendar underflow");
        if is_business_day(date) {
            counted += 1;
        }
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn weekends_are_not_business_days() {
        assert!(!is_business_day(date("2025-09-06"))); // Saturday
        assert!(!is_business_day(date("2025-09-07"))); // Sunday (also a holiday)
        assert!(is_business_day(date("2025-09-08"))); // Monday
    }

    #[test]
    fn holidays_are_not_business_days() {
        assert!(!is_business_day(date("2025-05-01")));
        assert!(!is_business_day(date("2026-04-03")));
        assert!(is_business_day(date("2025-05-02")));
    }

    #[test]
    fn limit_walks_over_a_weekend_and_holiday() {
        // Wed 2025-09-10 looking back 3 business days: Tue 9th, Mon 8th,
        // then Sun the 7th (holiday) and Sat the 6th are skipped, landing
        // on Fri the 5th.
        assert_eq!(limit_date(date("2025-09-10"), 3), date("2025-09-05"));
    }

    #[test]
    fn limit_walks_over_consecutive_holidays() {
        // Thu 2025-03-06: Wed 5th counts, Carnival Mon/Tue and the weekend
        // are skipped, then Fri Feb 28th and Thu Feb 27th count.
        assert_eq!(limit_date(date("2025-03-06"), 3), date("2025-02-27"));
    }

    #[test]
    fn boundary_acceptance() {
        let today = date("2025-09-10");
        let limit = limit_date(today, 3);
        assert!(date("2025-09-05") <= limit); // boundary accepted
        assert!(date("2025-09-04") <= limit); // earlier accepted
        assert!(date("2025-09-08") > limit); // one business day later rejected
    }
}
