use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};

pub struct DisplaySlice<'a, D: Display> {
    items: &'a [D],
}
impl<'a, D: Display> Display for DisplaySlice<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, item) in self.items.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

impl<'a, D: Display> From<&'a [D]> for DisplaySlice<'a, D> {
    fn from(items: &'a [D]) -> Self {
        DisplaySlice { items }
    }
}

/// Renders a date window as `YYYY-MM-DD..YYYY-MM-DD`.
pub struct DisplayWindow<'a> {
    start: &'a DateTime<Utc>,
    end: &'a DateTime<Utc>,
}

impl<'a> DisplayWindow<'a> {
    pub fn new(start: &'a DateTime<Utc>, end: &'a DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

impl<'a> Display for DisplayWindow<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn display_slice() {
        let data = vec!["m1", "m7"];
        assert_eq!("[m1, m7]", format!("{}", DisplaySlice::from(&*data)));

        let data: Vec<String> = vec![];
        assert_eq!("[]", format!("{}", DisplaySlice::from(&*data)));
    }

    #[test]
    fn display_window() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        assert_eq!("2024-03-01..2024-03-15", DisplayWindow::new(&start, &end).to_string());
    }
}
