//! Built-in demo dataset: two years of monthly herd yield.

use crate::dataset::{Dataset, Period, Record, RecordFeatures};
use chrono::Month;

#[allow(clippy::too_many_arguments)]
fn rec(
    year: i32,
    month: Month,
    measured: f64,
    reference: f64,
    fat: f64,
    protein: f64,
    cells: f64,
    herd: f64,
    season_sin: f64,
    season_cos: f64,
) -> Record {
    Record {
        period: Period::new(year, month),
        measured_outcome: measured,
        reference_outcome: reference,
        features: RecordFeatures {
            fat_percent: fat,
            protein_percent: protein,
            somatic_cell_count: cells,
            herd_size: herd,
            season_sin,
            season_cos,
        },
    }
}

/// Records shown on the accuracy view when no dataset file is configured.
pub fn sample_records() -> Vec<Record> {
    vec![
        rec(2022, Month::January, 60221.0, 58749.0, 4.19, 3.38, 161.0, 412.0, 0.0, 1.0),
        rec(2022, Month::February, 63597.0, 61629.0, 4.05, 3.32, 162.0, 412.0, 0.5, 0.866),
        rec(2022, Month::March, 65960.0, 64070.0, 3.92, 3.31, 166.0, 412.0, 0.866, 0.5),
        rec(2022, Month::April, 68799.0, 69413.0, 3.88, 3.25, 183.0, 413.0, 1.0, 0.0),
        rec(2022, Month::May, 71929.0, 69646.0, 3.84, 3.22, 192.0, 413.0, 0.866, -0.5),
        rec(2022, Month::June, 68483.0, 67565.0, 3.87, 3.23, 208.0, 413.0, 0.5, -0.866),
        rec(2022, Month::July, 67667.0, 67063.0, 3.93, 3.26, 203.0, 414.0, 0.0, -1.0),
        rec(2022, Month::August, 63118.0, 63915.0, 4.04, 3.34, 208.0, 414.0, -0.5, -0.866),
        rec(2022, Month::September, 60610.0, 59760.0, 4.2, 3.42, 193.0, 414.0, -0.866, -0.5),
        rec(2022, Month::October, 58594.0, 58697.0, 4.3, 3.47, 182.0, 415.0, -1.0, 0.0),
        rec(2022, Month::November, 58941.0, 57365.0, 4.29, 3.49, 167.0, 415.0, -0.866, 0.5),
        rec(2022, Month::December, 58338.0, 56456.0, 4.28, 3.47, 165.0, 415.0, -0.5, 0.866),
        rec(2023, Month::January, 63676.0, 62846.0, 4.19, 3.42, 161.0, 426.0, 0.0, 1.0),
        rec(2023, Month::February, 65669.0, 67232.0, 4.09, 3.35, 166.0, 426.0, 0.5, 0.866),
        rec(2023, Month::March, 67732.0, 68687.0, 3.94, 3.32, 178.0, 426.0, 0.866, 0.5),
        rec(2023, Month::April, 70783.0, 70217.0, 3.85, 3.22, 184.0, 427.0, 1.0, 0.0),
        rec(2023, Month::May, 71304.0, 69393.0, 3.76, 3.25, 192.0, 427.0, 0.866, -0.5),
        rec(2023, Month::June, 70672.0, 70133.0, 3.87, 3.22, 206.0, 427.0, 0.5, -0.866),
        rec(2023, Month::July, 69198.0, 71055.0, 3.96, 3.31, 206.0, 428.0, 0.0, -1.0),
        rec(2023, Month::August, 65546.0, 64898.0, 4.09, 3.38, 201.0, 428.0, -0.5, -0.866),
        rec(2023, Month::September, 61579.0, 60424.0, 4.15, 3.41, 199.0, 428.0, -0.866, -0.5),
        rec(2023, Month::October, 59459.0, 57395.0, 4.26, 3.45, 186.0, 429.0, -1.0, 0.0),
        rec(2023, Month::November, 60659.0, 61468.0, 4.3, 3.48, 175.0, 429.0, -0.866, 0.5),
        rec(2023, Month::December, 58833.0, 60478.0, 4.29, 3.48, 168.0, 429.0, -0.5, 0.866),
    ]
}

/// The sample records as a dataset.
pub fn sample_dataset() -> Dataset {
    Dataset::from_trusted(sample_records())
}
