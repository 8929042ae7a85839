//! Splitting of per-residue RMSF series into chains.
//!
//! `gmx rmsf -res` writes the residues of every chain one after the other, so
//! the residue number starts over at each chain boundary.

use super::xvg::RawSeries;

/// A run of a residue series between two index resets.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Letter suffix for the segment at `ordinal` (`A`, `B`, …, `Z`, `AA`, `AB`, …).
pub fn segment_letter(ordinal: usize) -> String {
    let mut n = ordinal;
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

pub fn segment_label(logical_name: &str, ordinal: usize) -> String {
    format!("{} - Residue {}", logical_name, segment_letter(ordinal))
}

/// Split `series` wherever x fails to increase.
///
/// A repeated x value (`x == prev`) also starts a new segment. Segments keep
/// file order and are never merged.
pub fn segment(logical_name: &str, series: &RawSeries) -> Vec<Segment> {
    let mut runs: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    let mut prev_x: Option<f64> = None;

    for &p in &series.points {
        if let Some(prev) = prev_x {
            if p[0] <= prev {
                runs.push(std::mem::take(&mut current));
            }
        }
        current.push(p);
        prev_x = Some(p[0]);
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs.into_iter()
        .enumerate()
        .map(|(i, points)| Segment {
            label: segment_label(logical_name, i),
            points,
        })
        .collect()
}
