//! Browser-local calendar date for relative date filters.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use time::Date;

/// Today in the browser's timezone, or `None` during SSR.
pub fn today() -> Option<Date> {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        let month = time::Month::try_from(u8::try_from(now.get_month() + 1).ok()?).ok()?;
        let day = u8::try_from(now.get_date()).ok()?;
        let year = i32::try_from(now.get_full_year()).ok()?;
        Date::from_calendar_date(year, month, day).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Render an API date or timestamp as `DD.MM.YYYY`, falling back to the raw text.
pub fn format_day(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "—".to_owned();
    };
    match crate::state::filters::parse_day(raw) {
        Some(date) => format!("{:02}.{:02}.{}", date.day(), u8::from(date.month()), date.year()),
        None => raw.to_owned(),
    }
}
