use weather_core::ReportView;

/// Plain-text rendering of a report: header, current conditions, one line per day.
pub fn report(view: &ReportView) -> String {
    let cur = &view.current;

    let mut out = format!(
        "{}  ({})\n\
         {}  {}  {}\n\
         Feels like {} · Humidity {} · Wind {}\n\
         Timezone {} · Updated {}\n",
        view.place,
        view.coords,
        cur.icon,
        cur.temperature,
        cur.description,
        cur.feels_like,
        cur.humidity,
        cur.wind,
        view.timezone,
        cur.updated,
    );

    if !view.days.is_empty() {
        out.push('\n');
    }
    for day in &view.days {
        out.push_str(&format!(
            "{:<4} {}  {:<28} {}\n",
            day.weekday, day.icon, day.description, day.range
        ));
    }

    out
}
