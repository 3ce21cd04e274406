use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::NestConfig;
use crate::entities::{NestingOutput, NestingResult, NestingWarning, PartSpec, SheetSize};
use crate::opt::allocator::{Allocation, SheetAllocator};
use crate::opt::free_rects::FreeRectSheet;
use crate::opt::shelf::ShelfSheet;
use crate::opt::strategy::{PlacementMode, StrategyKind};
use crate::util::assertions;

/// Material filter value which disables filtering
pub const ALL_MATERIALS: &str = "all";

/// Parts sharing a material type and thickness, nested together onto the same sheets.
#[derive(Clone, Debug)]
pub struct MaterialGroup<'a> {
    pub material_type: &'a str,
    pub thickness: f64,
    pub specs: Vec<&'a PartSpec>,
}

/// Nests cutting lists group by group according to a [`NestConfig`].
pub struct NestingOptimizer {
    pub config: NestConfig,
    /// Source of randomness for the randomized strategies, every group receives its own seed drawn from it
    pub rng: SmallRng,
}

impl NestingOptimizer {
    pub fn new(config: NestConfig, rng: SmallRng) -> Self {
        Self { config, rng }
    }

    /// Creates an optimizer seeded according to [`NestConfig::prng_seed`]
    pub fn from_config(config: NestConfig) -> Self {
        let rng = config.rng();
        Self::new(config, rng)
    }

    pub fn optimize(&mut self, cutting_list: &[PartSpec]) -> NestingOutput {
        let mut warnings = vec![];

        let sheet = self.config.sheet_size;
        if !sheet.is_valid() {
            warn!(
                "[NEST] invalid sheet size {} x {}, nothing nested",
                sheet.length, sheet.width
            );
            warnings.push(NestingWarning::InvalidSheetSize { sheet_size: sheet });
            return NestingOutput {
                results: vec![],
                warnings,
            };
        }

        let strategy = match self.config.strategy.parse::<StrategyKind>() {
            Ok(kind) => kind,
            Err(err) => {
                let fallback = StrategyKind::default();
                warn!("[NEST] {err}, falling back to {fallback}");
                warnings.push(NestingWarning::UnknownStrategy {
                    requested: self.config.strategy.clone(),
                    used: fallback,
                });
                fallback
            }
        };

        let groups = group_by_material(
            cutting_list,
            self.config.material_filter.as_deref(),
            &mut warnings,
        );
        let seeds = groups.iter().map(|_| self.rng.random::<u64>()).collect_vec();
        if strategy.is_randomized() {
            debug!("[NEST] {strategy} group seeds: {seeds:?}");
        }

        let outcomes: Vec<(NestingResult, Vec<NestingWarning>)> = groups
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(group, seed)| {
                let mut rng = SmallRng::seed_from_u64(*seed);
                nest_group(group, sheet, strategy, &mut rng)
            })
            .collect();

        let mut results = Vec::with_capacity(outcomes.len());
        for (result, group_warnings) in outcomes {
            results.push(result);
            warnings.extend(group_warnings);
        }

        info!(
            "[NEST] {} group(s) nested with {} onto {} sheet(s), {} instance(s) unplaced",
            results.len(),
            strategy,
            results.iter().map(|r| r.sheet_count).sum::<usize>(),
            results.iter().map(|r| r.unplaced.len()).sum::<usize>()
        );

        NestingOutput { results, warnings }
    }
}

/// Nests a cutting list in a single call.
///
/// * `sheet_size` - Defaults to 2440 x 1220 mm
/// * `material_filter` - Only nest parts of this material type, `"all"` or `None` nests everything
/// * `strategy_name` - Defaults to the rectangle packer, unknown names fall back to it with a warning
///
/// The randomized strategies are seeded from entropy, use [`NestingOptimizer`] for reproducible runs.
pub fn optimize_nesting(
    cutting_list: &[PartSpec],
    sheet_size: Option<SheetSize>,
    material_filter: Option<&str>,
    strategy_name: Option<&str>,
) -> NestingOutput {
    let config = NestConfig {
        sheet_size: sheet_size.unwrap_or_default(),
        material_filter: material_filter.map(str::to_owned),
        strategy: strategy_name
            .unwrap_or(StrategyKind::default().name())
            .to_owned(),
        prng_seed: None,
    };
    NestingOptimizer::from_config(config).optimize(cutting_list)
}

/// Splits the cutting list into groups of equal material type and thickness, in order of first appearance.
/// Parts with invalid dimensions are left out and reported.
pub fn group_by_material<'a>(
    cutting_list: &'a [PartSpec],
    material_filter: Option<&str>,
    warnings: &mut Vec<NestingWarning>,
) -> Vec<MaterialGroup<'a>> {
    let filter = material_filter.filter(|m| !m.eq_ignore_ascii_case(ALL_MATERIALS));

    let mut groups: Vec<MaterialGroup> = vec![];
    let mut group_index: HashMap<(&str, OrderedFloat<f64>), usize> = HashMap::new();

    for spec in cutting_list {
        if filter.is_some_and(|m| m != spec.material_type) {
            continue;
        }
        if !spec.has_valid_dimensions() {
            warn!(
                "[NEST] part {} has invalid dimensions ({} x {}), skipping",
                spec.id, spec.length, spec.width
            );
            warnings.push(NestingWarning::InvalidPartDimensions {
                spec_id: spec.id.clone(),
                length: spec.length,
                width: spec.width,
            });
            continue;
        }
        let key = (spec.material_type.as_str(), OrderedFloat(spec.thickness));
        let idx = *group_index.entry(key).or_insert_with(|| {
            groups.push(MaterialGroup {
                material_type: &spec.material_type,
                thickness: spec.thickness,
                specs: vec![],
            });
            groups.len() - 1
        });
        groups[idx].specs.push(spec);
    }
    groups
}

/// Runs `strategy` on a single material group.
pub fn nest_group(
    group: &MaterialGroup,
    sheet: SheetSize,
    strategy: StrategyKind,
    rng: &mut impl Rng,
) -> (NestingResult, Vec<NestingWarning>) {
    let config = strategy.config();

    let mut instances = group
        .specs
        .iter()
        .flat_map(|spec| spec.instances())
        .collect_vec();
    config.order.sort(&mut instances);

    let Allocation {
        placed,
        unplaced,
        used_area,
        sheet_count,
    } = match config.mode {
        PlacementMode::FreeRectangles => SheetAllocator::new(
            FreeRectSheet::new(sheet),
            FreeRectSheet::new(sheet),
            &config,
            rng,
        )
        .allocate(&instances),
        PlacementMode::GridWalk => {
            SheetAllocator::new(ShelfSheet::new(sheet), ShelfSheet::new(sheet), &config, rng)
                .allocate(&instances)
        }
    };

    let total_area = sheet.area() * sheet_count as f64;
    let raw_efficiency = match total_area > 0.0 {
        true => used_area / total_area * 100.0,
        false => 0.0,
    };
    let edge_banding_length = placed
        .iter()
        .map(|p| {
            let (length, width) = p.original_dimensions();
            p.edge_banding.banded_length(length, width)
        })
        .sum();

    let warnings = unplaced
        .iter()
        .map(|u| {
            warn!(
                "[NEST] {} ({} x {}) does not fit on a {} x {} sheet in any permitted orientation",
                u.instance_id, u.length, u.width, sheet.length, sheet.width
            );
            NestingWarning::PartTooLargeForSheet {
                material_type: group.material_type.to_owned(),
                thickness: group.thickness,
                spec_id: u.spec_id.clone(),
                instance_id: u.instance_id.clone(),
                length: u.length,
                width: u.width,
                sheet_size: sheet,
            }
        })
        .collect_vec();

    let result = NestingResult {
        sheet_size: sheet,
        material_type: group.material_type.to_owned(),
        thickness: group.thickness,
        strategy,
        parts: placed,
        efficiency: config.efficiency.apply(raw_efficiency, sheet_count),
        raw_efficiency,
        used_area,
        waste_area: total_area - used_area,
        total_area,
        sheet_count,
        unplaced,
        edge_banding_length,
    };

    debug_assert!(assertions::result_is_consistent(&result));

    info!(
        "[NEST] {} {}mm: {} part(s) on {} sheet(s), efficiency {:.2}% (raw {:.2}%)",
        result.material_type,
        result.thickness,
        result.parts.len(),
        result.sheet_count,
        result.efficiency,
        result.raw_efficiency
    );

    (result, warnings)
}
