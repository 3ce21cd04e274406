use log::debug;
use rand::Rng;

use crate::entities::{Grain, PartInstance, PlacedPart, UnplacedPart};
use crate::geometry::Orientation;
use crate::opt::grain;
use crate::opt::search;
use crate::opt::strategy::StrategyConfig;
use crate::opt::{Position, SheetLayout};

/// Outcome of allocating one ordered list of instances over consecutive sheets.
#[derive(Clone, Debug, Default)]
pub struct Allocation {
    pub placed: Vec<PlacedPart>,
    pub unplaced: Vec<UnplacedPart>,
    /// Sum of the areas of all placed parts, as specified (rotation does not affect it)
    pub used_area: f64,
    pub sheet_count: usize,
}

/// Places instances on the active sheet, opening a new one whenever an instance no longer fits.
/// A part never moves back to an earlier sheet.
pub struct SheetAllocator<'a, L: SheetLayout, R: Rng> {
    config: &'a StrategyConfig,
    rng: &'a mut R,
    /// Layout of the active sheet
    layout: L,
    /// Spare layout, used to try an instance on a fresh sheet before opening it
    fresh: L,
    allocation: Allocation,
}

/// Where and how an instance will be placed.
struct Hit {
    position: Position,
    orientation: Orientation,
    grain_violated: bool,
}

impl<'a, L: SheetLayout, R: Rng> SheetAllocator<'a, L, R> {
    /// `layout` and `fresh` must model the same, empty sheet
    pub fn new(layout: L, fresh: L, config: &'a StrategyConfig, rng: &'a mut R) -> Self {
        Self {
            config,
            rng,
            layout,
            fresh,
            allocation: Allocation::default(),
        }
    }

    /// Places all instances in the given order.
    pub fn allocate(mut self, instances: &[PartInstance]) -> Allocation {
        for instance in instances {
            self.place(instance);
        }
        self.allocation
    }

    /// Places a single instance, on the active sheet if possible and on a new sheet otherwise.
    /// Instances that do not even fit on a fresh sheet are recorded as unplaced.
    pub fn place(&mut self, instance: &PartInstance) -> bool {
        let on_active_sheet = match self.allocation.sheet_count {
            0 => None,
            _ => attempt(&self.layout, instance, self.config, &mut *self.rng),
        };
        if let Some(hit) = on_active_sheet {
            self.commit(instance, hit);
            return true;
        }

        self.fresh.reset();
        match attempt(&self.fresh, instance, self.config, &mut *self.rng) {
            Some(hit) => {
                std::mem::swap(&mut self.layout, &mut self.fresh);
                self.allocation.sheet_count += 1;
                debug!("[NEST] opened sheet {}", self.allocation.sheet_count);
                self.commit(instance, hit);
                true
            }
            None => {
                debug!(
                    "[NEST] {} ({} x {}) does not fit on an empty sheet",
                    instance.instance_id(),
                    instance.length(),
                    instance.width()
                );
                self.allocation.unplaced.push(UnplacedPart {
                    instance_id: instance.instance_id(),
                    spec_id: instance.spec.id.clone(),
                    length: instance.length(),
                    width: instance.width(),
                });
                false
            }
        }
    }

    fn commit(&mut self, instance: &PartInstance, hit: Hit) {
        let (length, width) = hit.orientation.apply(instance.length(), instance.width());
        self.layout.commit(&hit.position, length, width);

        let placed = PlacedPart::new(
            instance,
            self.allocation.sheet_count - 1,
            hit.position.x,
            hit.position.y,
            hit.orientation,
            hit.grain_violated,
        );
        debug!(
            "[NEST] placed {} at ({}, {}) on sheet {}, rotation: {}, grain violated: {}",
            placed.instance_id,
            placed.x,
            placed.y,
            placed.sheet_index,
            placed.rotation.degrees(),
            placed.grain_violated
        );
        self.allocation.used_area += instance.area();
        self.allocation.placed.push(placed);
    }
}

/// Tries the orientations permitted by the strategy in order, the first one that fits is used.
/// If none fits and the strategy allows it, the orientations which violate the grain are tried as well.
fn attempt(
    layout: &impl SheetLayout,
    instance: &PartInstance,
    config: &StrategyConfig,
    rng: &mut impl Rng,
) -> Option<Hit> {
    let (length, width, grain) = (instance.length(), instance.width(), instance.grain());

    for orientation in config.rotation.orientations(grain, rng) {
        if let Some(position) = search::find(layout, length, width, grain, orientation) {
            return Some(Hit {
                position,
                orientation,
                grain_violated: false,
            });
        }
    }

    let violating = grain::violating_orientations(grain);
    if !violating.is_empty() && config.grain_fallback.permits(rng) {
        for &orientation in violating {
            if let Some(position) = search::find(layout, length, width, Grain::None, orientation)
            {
                return Some(Hit {
                    position,
                    orientation,
                    grain_violated: true,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PartSpec, SheetSize};
    use crate::opt::free_rects::FreeRectSheet;
    use crate::opt::strategy::StrategyKind;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn spec(id: &str, length: f64, width: f64, grain: Grain, quantity: usize) -> PartSpec {
        PartSpec {
            id: id.to_string(),
            item_id: "cab".to_string(),
            name: None,
            material_type: "birch".to_string(),
            thickness: 18.0,
            length,
            width,
            grain,
            edge_banding: Default::default(),
            quantity,
        }
    }

    fn allocate(kind: StrategyKind, sheet: SheetSize, specs: &[PartSpec]) -> Allocation {
        let config = kind.config();
        let mut rng = SmallRng::seed_from_u64(0);
        let instances = specs.iter().flat_map(|s| s.instances()).collect::<Vec<_>>();
        SheetAllocator::new(
            FreeRectSheet::new(sheet),
            FreeRectSheet::new(sheet),
            &config,
            &mut rng,
        )
        .allocate(&instances)
    }

    #[test]
    fn overflows_onto_new_sheets() {
        let sheet = SheetSize::try_new(1000.0, 1000.0).unwrap();
        let specs = [spec("q", 600.0, 600.0, Grain::None, 3)];
        let alloc = allocate(StrategyKind::Rectangle, sheet, &specs);
        assert_eq!(alloc.sheet_count, 3);
        assert_eq!(
            alloc.placed.iter().map(|p| p.sheet_index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(alloc.placed.iter().all(|p| (p.x, p.y) == (0.0, 0.0)));
        assert_eq!(alloc.used_area, 3.0 * 360_000.0);
    }

    #[test]
    fn too_large_part_is_reported_and_opens_no_sheet() {
        let specs = [spec("long", 3000.0, 100.0, Grain::None, 1)];
        let alloc = allocate(StrategyKind::Rectangle, SheetSize::STANDARD, &specs);
        assert_eq!(alloc.sheet_count, 0);
        assert!(alloc.placed.is_empty());
        assert_eq!(alloc.unplaced.len(), 1);
        assert_eq!(alloc.unplaced[0].instance_id, "long#1");
    }

    #[test]
    fn too_large_part_does_not_abandon_the_active_sheet() {
        let specs = [
            spec("a", 1000.0, 600.0, Grain::None, 1),
            spec("huge", 2500.0, 1300.0, Grain::None, 1),
            spec("b", 1000.0, 600.0, Grain::None, 1),
        ];
        let alloc = allocate(StrategyKind::GridStrip, SheetSize::STANDARD, &specs);
        assert_eq!(alloc.sheet_count, 1);
        assert_eq!(alloc.placed.len(), 2);
        assert_eq!(alloc.unplaced.len(), 1);
    }

    #[test]
    fn grain_violation_only_with_fallback() {
        //fits only when rotated, but the grain forbids it
        let specs = [spec("panel", 600.0, 1300.0, Grain::Length, 1)];

        let strict = allocate(StrategyKind::Rectangle, SheetSize::STANDARD, &specs);
        assert!(strict.placed.is_empty());
        assert_eq!(strict.unplaced.len(), 1);

        let lenient = allocate(StrategyKind::Adaptive, SheetSize::STANDARD, &specs);
        assert_eq!(lenient.placed.len(), 1);
        let placed = &lenient.placed[0];
        assert!(placed.grain_violated);
        assert_eq!(placed.rotation, Orientation::Rotated);
        assert_eq!((placed.length, placed.width), (1300.0, 600.0));
    }

    #[test]
    fn width_grain_is_placed_rotated() {
        let specs = [spec("door", 700.0, 400.0, Grain::Width, 1)];
        let alloc = allocate(StrategyKind::GrainStrip, SheetSize::STANDARD, &specs);
        let placed = &alloc.placed[0];
        assert_eq!(placed.rotation, Orientation::Rotated);
        assert!(!placed.grain_violated);
        assert_eq!((placed.length, placed.width), (400.0, 700.0));
    }
}
