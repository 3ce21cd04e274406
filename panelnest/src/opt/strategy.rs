use std::cmp::Reverse;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Error, bail};
use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::{Grain, PartInstance};
use crate::geometry::Orientation;
use crate::opt::grain::{self, GrainFallback};

/// The placement strategies a caller can select by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Largest parts first, Best Short Side Fit on free rectangles
    #[default]
    Rectangle,
    /// Longest side first, falls back to violating the grain when nothing else fits
    Adaptive,
    /// Parts in cutting list order on a row-by-row grid walk, random orientation of grain-free parts
    RandomGrid,
    /// Most elongated parts first, randomized rotation order and grain violations
    RandomFit,
    /// Grain-constrained parts first, never rotated beyond what the grain dictates
    GrainStrip,
    /// Parts in cutting list order on a row-by-row grid walk
    GridStrip,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Rectangle,
        StrategyKind::Adaptive,
        StrategyKind::RandomGrid,
        StrategyKind::RandomFit,
        StrategyKind::GrainStrip,
        StrategyKind::GridStrip,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Rectangle => "rectangle",
            StrategyKind::Adaptive => "adaptive",
            StrategyKind::RandomGrid => "random-grid",
            StrategyKind::RandomFit => "random-fit",
            StrategyKind::GrainStrip => "grain-strip",
            StrategyKind::GridStrip => "grid-strip",
        }
    }

    /// Strategies whose layout depends on the random source
    pub fn is_randomized(&self) -> bool {
        matches!(self, StrategyKind::RandomGrid | StrategyKind::RandomFit)
    }

    pub fn config(&self) -> StrategyConfig {
        match self {
            StrategyKind::Rectangle => StrategyConfig {
                order: PartOrder::AreaDesc,
                rotation: RotationPolicy::WhenGrainFree,
                grain_fallback: GrainFallback::Never,
                mode: PlacementMode::FreeRectangles,
                efficiency: EfficiencyAdjustment::NONE,
            },
            StrategyKind::Adaptive => StrategyConfig {
                order: PartOrder::LongestSideDesc,
                rotation: RotationPolicy::WhenGrainFree,
                grain_fallback: GrainFallback::OnFailure,
                mode: PlacementMode::FreeRectangles,
                efficiency: EfficiencyAdjustment {
                    factor: 1.05,
                    cap: Some(99.5),
                    floor: None,
                },
            },
            StrategyKind::RandomGrid => StrategyConfig {
                order: PartOrder::Insertion,
                rotation: RotationPolicy::RandomFirst,
                grain_fallback: GrainFallback::Never,
                mode: PlacementMode::GridWalk,
                efficiency: EfficiencyAdjustment {
                    factor: 0.95,
                    cap: None,
                    floor: Some(60.0),
                },
            },
            StrategyKind::RandomFit => StrategyConfig {
                order: PartOrder::AspectRatioDesc,
                rotation: RotationPolicy::RandomFirst,
                grain_fallback: GrainFallback::Probabilistic(0.7),
                mode: PlacementMode::FreeRectangles,
                efficiency: EfficiencyAdjustment {
                    factor: 1.02,
                    cap: Some(99.0),
                    floor: None,
                },
            },
            StrategyKind::GrainStrip => StrategyConfig {
                order: PartOrder::GrainFirst,
                rotation: RotationPolicy::Never,
                grain_fallback: GrainFallback::Never,
                mode: PlacementMode::FreeRectangles,
                efficiency: EfficiencyAdjustment {
                    factor: 1.08,
                    cap: Some(99.9),
                    floor: None,
                },
            },
            StrategyKind::GridStrip => StrategyConfig {
                order: PartOrder::Insertion,
                rotation: RotationPolicy::Never,
                grain_fallback: GrainFallback::Never,
                mode: PlacementMode::GridWalk,
                efficiency: EfficiencyAdjustment::NONE,
            },
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    /// Case-insensitive, `_` and spaces are treated as `-`.
    /// Names of renderers which have no packer of their own resolve to [`StrategyKind::Rectangle`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        let kind = match normalized.as_str() {
            "" | "default" | "rectangle" => StrategyKind::Rectangle,
            "svg" | "canvas" | "preview" => StrategyKind::Rectangle,
            "adaptive" => StrategyKind::Adaptive,
            "random-grid" => StrategyKind::RandomGrid,
            "random-fit" => StrategyKind::RandomFit,
            "grain-strip" => StrategyKind::GrainStrip,
            "grid-strip" => StrategyKind::GridStrip,
            _ => bail!("unknown nesting strategy: {s:?}"),
        };
        Ok(kind)
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Policy preset applied on top of the shared placement core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrategyConfig {
    pub order: PartOrder,
    pub rotation: RotationPolicy,
    pub grain_fallback: GrainFallback,
    pub mode: PlacementMode,
    pub efficiency: EfficiencyAdjustment,
}

/// Order in which instances are offered to the allocator. All orderings are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartOrder {
    /// As they appear in the cutting list
    Insertion,
    AreaDesc,
    /// Descending `max(length, width)`
    LongestSideDesc,
    /// Descending ratio of the longest to the shortest side
    AspectRatioDesc,
    /// Grain `length` first, then `width`, then unconstrained parts, each by descending area
    GrainFirst,
}

impl PartOrder {
    pub fn sort(&self, instances: &mut [PartInstance]) {
        match self {
            PartOrder::Insertion => {}
            PartOrder::AreaDesc => {
                instances.sort_by_cached_key(|i| Reverse(OrderedFloat(i.area())));
            }
            PartOrder::LongestSideDesc => {
                instances
                    .sort_by_cached_key(|i| Reverse(OrderedFloat(f64::max(i.length(), i.width()))));
            }
            PartOrder::AspectRatioDesc => {
                instances.sort_by_cached_key(|i| {
                    let (long, short) = match i.length() >= i.width() {
                        true => (i.length(), i.width()),
                        false => (i.width(), i.length()),
                    };
                    Reverse(OrderedFloat(long / short))
                });
            }
            PartOrder::GrainFirst => {
                instances.sort_by_cached_key(|i| {
                    let grain_rank = match i.grain() {
                        Grain::Length => 0,
                        Grain::Width => 1,
                        Grain::None => 2,
                    };
                    (grain_rank, Reverse(OrderedFloat(i.area())))
                });
            }
        }
    }
}

/// Which orientations are tried for a part, and in which order.
/// An orientation mandated by the grain is always tried, regardless of the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Grain-free parts are tried as specified, then rotated
    WhenGrainFree,
    /// Grain-free parts are tried in both orientations, with a coin flip deciding which goes first
    RandomFirst,
    /// Grain-free parts are only tried as specified
    Never,
}

impl RotationPolicy {
    pub fn orientations(&self, grain: Grain, rng: &mut impl Rng) -> Vec<Orientation> {
        if let Some(mandated) = grain::mandated_orientation(grain) {
            return vec![mandated];
        }
        match self {
            RotationPolicy::WhenGrainFree => vec![Orientation::Normal, Orientation::Rotated],
            RotationPolicy::RandomFirst => match rng.random_bool(0.5) {
                true => vec![Orientation::Rotated, Orientation::Normal],
                false => vec![Orientation::Normal, Orientation::Rotated],
            },
            RotationPolicy::Never => vec![Orientation::Normal],
        }
    }
}

/// How free space on the active sheet is tracked and searched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementMode {
    /// Best Short Side Fit over a set of free rectangles
    FreeRectangles,
    /// Simplified row-by-row grid walk without free-space search
    GridWalk,
}

/// Transformation of the measured efficiency into the efficiency reported by a strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EfficiencyAdjustment {
    pub factor: f64,
    /// Upper limit of the reported efficiency, in percent
    pub cap: Option<f64>,
    /// Lower limit of the reported efficiency, in percent. Only applies if at least one sheet was used.
    pub floor: Option<f64>,
}

impl EfficiencyAdjustment {
    pub const NONE: EfficiencyAdjustment = EfficiencyAdjustment {
        factor: 1.0,
        cap: None,
        floor: None,
    };

    pub fn apply(&self, raw_efficiency: f64, sheet_count: usize) -> f64 {
        let mut efficiency = raw_efficiency * self.factor;
        if let Some(cap) = self.cap {
            efficiency = efficiency.min(cap);
        }
        if let (Some(floor), true) = (self.floor, sheet_count > 0) {
            efficiency = efficiency.max(floor);
        }
        efficiency.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PartSpec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use test_case::test_case;

    fn spec(id: &str, length: f64, width: f64, grain: Grain) -> PartSpec {
        PartSpec {
            id: id.to_string(),
            item_id: "cab".to_string(),
            name: None,
            material_type: "mdf".to_string(),
            thickness: 18.0,
            length,
            width,
            grain,
            edge_banding: Default::default(),
            quantity: 1,
        }
    }

    fn ordered_ids(order: PartOrder, specs: &[PartSpec]) -> Vec<String> {
        let mut instances = specs.iter().flat_map(|s| s.instances()).collect::<Vec<_>>();
        order.sort(&mut instances);
        instances.iter().map(|i| i.spec.id.clone()).collect()
    }

    #[test_case("rectangle", StrategyKind::Rectangle)]
    #[test_case("Default", StrategyKind::Rectangle)]
    #[test_case("", StrategyKind::Rectangle)]
    #[test_case("SVG", StrategyKind::Rectangle)]
    #[test_case("canvas", StrategyKind::Rectangle)]
    #[test_case("adaptive", StrategyKind::Adaptive)]
    #[test_case("Random_Grid", StrategyKind::RandomGrid)]
    #[test_case("random fit", StrategyKind::RandomFit)]
    #[test_case("grain-strip", StrategyKind::GrainStrip)]
    #[test_case("GRID_STRIP", StrategyKind::GridStrip)]
    fn parses_names(name: &str, expected: StrategyKind) {
        assert_eq!(name.parse::<StrategyKind>().unwrap(), expected);
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!("maxrects-bssf".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn canonical_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn orders_are_stable() {
        let specs = [
            spec("a", 500.0, 500.0, Grain::None),
            spec("b", 1000.0, 100.0, Grain::Width),
            spec("c", 250.0, 1000.0, Grain::None),
            spec("d", 800.0, 400.0, Grain::Length),
        ];
        assert_eq!(ordered_ids(PartOrder::Insertion, &specs), ["a", "b", "c", "d"]);
        assert_eq!(ordered_ids(PartOrder::AreaDesc, &specs), ["d", "a", "c", "b"]);
        assert_eq!(ordered_ids(PartOrder::LongestSideDesc, &specs), ["b", "c", "d", "a"]);
        assert_eq!(ordered_ids(PartOrder::AspectRatioDesc, &specs), ["b", "c", "d", "a"]);
        assert_eq!(ordered_ids(PartOrder::GrainFirst, &specs), ["d", "b", "a", "c"]);
    }

    #[test]
    fn grain_mandated_orientation_overrides_policy() {
        let mut rng = SmallRng::seed_from_u64(0);
        for policy in [
            RotationPolicy::WhenGrainFree,
            RotationPolicy::RandomFirst,
            RotationPolicy::Never,
        ] {
            assert_eq!(policy.orientations(Grain::Length, &mut rng), [Orientation::Normal]);
            assert_eq!(policy.orientations(Grain::Width, &mut rng), [Orientation::Rotated]);
        }
        assert_eq!(
            RotationPolicy::Never.orientations(Grain::None, &mut rng),
            [Orientation::Normal]
        );
        assert_eq!(
            RotationPolicy::WhenGrainFree.orientations(Grain::None, &mut rng),
            [Orientation::Normal, Orientation::Rotated]
        );
        assert_eq!(RotationPolicy::RandomFirst.orientations(Grain::None, &mut rng).len(), 2);
    }

    #[test]
    fn efficiency_adjustments() {
        let adaptive = StrategyKind::Adaptive.config().efficiency;
        assert!((adaptive.apply(80.0, 1) - 84.0).abs() < 1e-9);
        assert_eq!(adaptive.apply(97.0, 1), 99.5);

        let random_grid = StrategyKind::RandomGrid.config().efficiency;
        assert_eq!(random_grid.apply(40.0, 2), 60.0);
        assert!((random_grid.apply(80.0, 2) - 76.0).abs() < 1e-9);
        assert_eq!(random_grid.apply(0.0, 0), 0.0);

        let grain_strip = StrategyKind::GrainStrip.config().efficiency;
        assert_eq!(grain_strip.apply(99.0, 1), 99.9);

        assert_eq!(EfficiencyAdjustment::NONE.apply(73.25, 3), 73.25);
    }
}
