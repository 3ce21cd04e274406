use float_cmp::approx_eq;
use itertools::Itertools;
use log::error;

use crate::entities::{NestingResult, PlacedPart, SheetSize};
use crate::opt::grain;
use crate::util::FPA;

//Various checks to verify correctness of produced layouts
//Used in debug_assert!() blocks and throughout the tests

/// No two parts on the same sheet overlap.
pub fn parts_do_not_overlap(parts: &[PlacedPart]) -> bool {
    for (a, b) in parts.iter().tuple_combinations() {
        if a.sheet_index == b.sheet_index && a.rect().overlaps(&b.rect()) {
            error!(
                "{} and {} overlap on sheet {}",
                a.instance_id, b.instance_id, a.sheet_index
            );
            return false;
        }
    }
    true
}

/// Every part lies within the bounds of its sheet.
pub fn parts_within_sheet(parts: &[PlacedPart], sheet: SheetSize) -> bool {
    let bounds = sheet.rect();
    parts.iter().all(|p| bounds.contains(&p.rect()))
}

/// Every part not flagged as a grain violation is oriented as its grain demands.
pub fn grain_is_respected(parts: &[PlacedPart]) -> bool {
    parts
        .iter()
        .all(|p| p.grain_violated || grain::is_legal(p.grain, p.rotation))
}

/// A part is only flagged as a grain violation if its orientation actually violates its grain.
pub fn grain_violations_are_genuine(parts: &[PlacedPart]) -> bool {
    parts
        .iter()
        .filter(|p| p.grain_violated)
        .all(|p| !grain::is_legal(p.grain, p.rotation))
}

/// The used, waste and total areas add up and match the placed parts and sheet count.
pub fn area_is_conserved(result: &NestingResult) -> bool {
    let placed_area = result.parts.iter().map(PlacedPart::area).sum::<f64>();
    let expected_total = result.sheet_size.area() * result.sheet_count as f64;
    let eps = 1e-9 * result.total_area.max(1.0);

    approx_eq!(f64, placed_area, result.used_area, epsilon = eps)
        && approx_eq!(f64, expected_total, result.total_area, epsilon = eps)
        && approx_eq!(
            f64,
            result.waste_area + result.used_area,
            result.total_area,
            epsilon = eps
        )
}

/// Sheet indices are contiguous: every sheet that was counted holds at least one part.
pub fn sheets_are_all_used(result: &NestingResult) -> bool {
    (0..result.sheet_count).all(|i| result.parts_on_sheet(i).next().is_some())
        && result.parts.iter().all(|p| p.sheet_index < result.sheet_count)
}

pub fn efficiency_in_bounds(result: &NestingResult) -> bool {
    FPA(result.efficiency) >= FPA(0.0)
        && FPA(result.efficiency) <= FPA(100.0)
        && FPA(result.raw_efficiency) >= FPA(0.0)
        && FPA(result.raw_efficiency) <= FPA(100.0)
}

pub fn result_is_consistent(result: &NestingResult) -> bool {
    parts_do_not_overlap(&result.parts)
        && parts_within_sheet(&result.parts, result.sheet_size)
        && grain_is_respected(&result.parts)
        && grain_violations_are_genuine(&result.parts)
        && area_is_conserved(result)
        && sheets_are_all_used(result)
        && efficiency_in_bounds(result)
}
