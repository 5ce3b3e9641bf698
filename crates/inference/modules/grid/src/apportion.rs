//! Largest-remainder apportionment of an integer cell budget.

use acr_model::GridCell;

/// Raw shares within this distance below an integer floor to that integer.
const FLOOR_EPSILON: f64 = 1e-9;

/// Floor-sum of the shares exceeded the budget before any remainder was
/// distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub floor_sum: u32,
    pub budget: u32,
}

/// Split `budget` cells between columns whose widths are given in percent
/// of the row.
///
/// Every column first receives the floor of its share; the remaining cells
/// go one at a time to the column with the largest fractional remainder.
/// Ties go to the leftmost column. The counts sum to `budget` whenever the
/// floors fit.
///
/// # Errors
/// Returns [`Overflow`] when the floors alone already exceed `budget`.
pub fn apportion(relative_widths: &[f64], budget: u32) -> Result<Vec<GridCell>, Overflow> {
    let mut cells: Vec<GridCell> = relative_widths
        .iter()
        .map(|&percent| {
            let raw = (percent / 100.0 * f64::from(budget)).max(0.0);
            let count = (raw + FLOOR_EPSILON).floor();
            GridCell {
                count: count as u32,
                clip_size: raw - count,
            }
        })
        .collect();

    let floor_sum: u32 = cells.iter().map(|cell| cell.count).sum();
    if floor_sum > budget {
        return Err(Overflow { floor_sum, budget });
    }

    let mut remaining = budget - floor_sum;
    tracing::debug!(
        "apportion: columns={}, floor_sum={}, remaining={}",
        cells.len(),
        floor_sum,
        remaining
    );
    while remaining > 0 {
        let Some(largest) = largest_clip(&cells) else {
            break;
        };
        if let Some(cell) = cells.get_mut(largest) {
            cell.count += 1;
            cell.clip_size -= 1.0;
        }
        remaining -= 1;
        tracing::debug!("  remainder cell -> column {}", largest);
    }
    Ok(cells)
}

/// Index of the first cell with the strictly largest clip size.
fn largest_clip(cells: &[GridCell]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, cell) in cells.iter().enumerate() {
        if best.is_none_or(|(_, clip)| cell.clip_size > clip) {
            best = Some((index, cell.clip_size));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Rows in these tests fit the budget")]
mod tests {
    use super::*;

    fn counts(cells: &[GridCell]) -> Vec<u32> {
        cells.iter().map(|cell| cell.count).collect()
    }

    #[test]
    fn thirds_round_up_evenly() {
        let cells = apportion(&[33.3, 33.3, 33.3], 12).unwrap();
        assert_eq!(counts(&cells), vec![4, 4, 4]);
    }

    #[test]
    fn exact_shares_need_no_remainder() {
        let cells = apportion(&[25.0, 25.0, 50.0], 12).unwrap();
        assert_eq!(counts(&cells), vec![3, 3, 6]);
        assert!(cells.iter().all(|cell| cell.clip_size.abs() < 1e-9));
    }

    #[test]
    fn ties_go_to_the_leftmost_column() {
        // 12 * 0.375 = 4.5 for both; one spare cell.
        let cells = apportion(&[37.5, 37.5, 25.0], 12).unwrap();
        assert_eq!(counts(&cells), vec![5, 4, 3]);
    }

    #[test]
    fn underfilled_rows_still_spend_the_whole_budget() {
        let cells = apportion(&[20.0, 20.0], 12).unwrap();
        assert_eq!(counts(&cells).iter().sum::<u32>(), 12);
    }

    #[test]
    fn overflowing_floors_are_reported() {
        let err = apportion(&[60.0, 60.0], 12).unwrap_err();
        assert_eq!(
            err,
            Overflow {
                floor_sum: 14,
                budget: 12
            }
        );
    }

    #[test]
    fn near_integer_shares_are_not_floored_away() {
        // 12 * 0.25 evaluates just below 3 for some inputs.
        let cells = apportion(&[24.999_999_999_99, 75.0], 12).unwrap();
        assert_eq!(counts(&cells), vec![3, 9]);
    }
}
