use chrono::NaiveDate;

// Unanchored: OCR often glues a label onto the date ("FECHA01/02/2024").
re!(re_date, r"(\d{1,2})[-/.](\d{1,2})[-/.](\d{2,4})");

/// The first date printed on the receipt, scanning lines in order.
///
/// Only the first date-shaped match counts; if it is not a real calendar day
/// the result is `None` rather than a later match.
pub fn extract(lines: &[&str]) -> Option<NaiveDate> {
    lines.iter().find_map(|line| match_line(line))?
}

/// `Some(parsed)` when the line holds a date shape, `None` when it does not.
/// Groups are read as day, month, year whatever their width, so ISO
/// `2024-03-15` comes out as the 24th of March 2015.
fn match_line(line: &str) -> Option<Option<NaiveDate>> {
    let c = re_date().captures(line)?;
    let mut day: u32 = c[1].parse().ok()?;
    let mut month: u32 = c[2].parse().ok()?;
    let year = expand_year(&c[3])?;

    // Month-first receipts (05/13/24) come out with month > 12.
    if month > 12 {
        std::mem::swap(&mut day, &mut month);
    }
    Some(NaiveDate::from_ymd_opt(year, month, day))
}

/// Two-digit years are read as 20xx; receipts from other centuries misdate.
fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    Some(if raw.len() == 2 { 2000 + year } else { year })
}
