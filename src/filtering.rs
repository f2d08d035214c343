use crate::types::dataset::DATE_COLUMN;
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataType, Expr, LazyFrame};

fn date_col() -> Expr {
    col(DATE_COLUMN).cast(DataType::Date)
}

pub trait ForecastFrameFilterExt {
    /// Keeps rows whose `date` lies in `[start_date, end_date]`, both inclusive.
    /// A reversed range keeps nothing.
    ///
    /// # Arguments
    /// * `start_date`: The start NaiveDate (inclusive).
    /// * `end_date`: The end NaiveDate (inclusive).
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Type errors surface on `collect`.
    fn filter_date_range(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame;

    /// Keeps rows whose `date` equals `date`.
    fn filter_date(self, date: NaiveDate) -> LazyFrame;
}

impl ForecastFrameFilterExt for LazyFrame {
    fn filter_date_range(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame {
        self.filter(
            date_col()
                .gt_eq(lit(start_date))
                .and(date_col().lt_eq(lit(end_date))),
        )
    }

    fn filter_date(self, date: NaiveDate) -> LazyFrame {
        self.filter(date_col().eq(lit(date)))
    }
}
